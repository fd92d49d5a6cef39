// src/main.rs

use std::fs;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion2markdown::{
    AppError, CommandLineInput, CrawlReport, CrawlScheduler, ExportConfig, HttpMediaFetcher,
    NotionHttpClient, OutputLayout,
};

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_file_path = std::env::temp_dir().join("notion2markdown.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Crawls the configured root page and writes the Markdown tree.
async fn export(config: &ExportConfig) -> Result<CrawlReport, AppError> {
    let client = NotionHttpClient::new(&config.api_key)?;
    let media = HttpMediaFetcher::new(config.media_timeout)?;

    let mut scheduler = CrawlScheduler::new(
        Arc::new(client),
        Arc::new(media),
        OutputLayout::new(&config.output_dir),
    )
    .with_indent(config.indent);

    scheduler.run(&config.root_page).await
}

fn print_summary(config: &ExportConfig, report: &CrawlReport) {
    let media = report.media_totals();

    println!(
        "📁 Exported {} page(s) to {}",
        report.pages.len(),
        config.output_dir.display()
    );
    println!(
        "🖼  Images: {} saved, {} failed",
        media.images_saved, media.images_failed
    );
    println!(
        "📎 Attachments: {} saved, {} failed",
        media.attachments_saved, media.attachments_failed
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)
        .map_err(|e| anyhow::anyhow!(e.to_string()))
        .context("failed to initialize logging")?;

    let config = ExportConfig::resolve(cli).context("invalid configuration")?;

    let report = match export(&config).await {
        Ok(report) => report,
        Err(err) => {
            if err.is_auth_failure() {
                eprintln!(
                    "⚠️  Notion rejected the token. Check that the integration is shared with the root page."
                );
            }
            return Err(err).context(format!("export of {} failed", config.root_page));
        }
    };

    print_summary(&config, &report);
    Ok(())
}
