// src/config.rs
use crate::constants::{DEFAULT_OUTPUT_DIR, MEDIA_FETCH_TIMEOUT};
use crate::error::AppError;
use crate::formatting::IndentStyle;
use crate::types::{ApiKey, NotionId};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Root page to export: a Notion page URL, a 32-character id or a UUID
    #[arg(env = "NOTION_ROOT_PAGE_ID")]
    pub root_page: Option<String>,

    /// Notion integration token
    #[arg(long, env = "NOTION_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Directory the Markdown tree is written to
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Seconds allowed for each image or attachment download
    #[arg(long, default_value_t = MEDIA_FETCH_TIMEOUT.as_secs())]
    pub media_timeout: u64,

    /// Indent nested blocks by four spaces per level
    #[arg(long, default_value_t = false)]
    pub nested_indent: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Resolved export configuration, validated before any request is made.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub root_page: NotionId,
    pub api_key: ApiKey,
    pub output_dir: PathBuf,
    pub media_timeout: Duration,
    pub indent: IndentStyle,
}

impl ExportConfig {
    /// Resolves the configuration from CLI input (flags or environment).
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let token = non_blank(cli.token).ok_or_else(|| {
            AppError::MissingConfiguration(
                "Notion token not set (use --token or NOTION_TOKEN)".to_string(),
            )
        })?;
        let root_page = non_blank(cli.root_page).ok_or_else(|| {
            AppError::MissingConfiguration(
                "Root page not set (pass it as an argument or set NOTION_ROOT_PAGE_ID)"
                    .to_string(),
            )
        })?;

        let api_key = ApiKey::new(token)?;
        let root_page = NotionId::parse(&root_page)?;

        if cli.media_timeout == 0 {
            return Err(AppError::MissingConfiguration(
                "--media-timeout must be at least one second".to_string(),
            ));
        }

        Ok(ExportConfig {
            root_page,
            api_key,
            output_dir: cli.output_dir,
            media_timeout: Duration::from_secs(cli.media_timeout),
            indent: if cli.nested_indent {
                IndentStyle::Nested
            } else {
                IndentStyle::Flat
            },
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
