// src/crawl/scheduler.rs
//! Drives an export from the root page until no page is left to visit.

use std::path::PathBuf;
use std::sync::Arc;

use super::queue::CrawlQueue;
use super::task::PageTask;
use crate::api::{fetch_all_blocks, BlockSource};
use crate::error::AppError;
use crate::formatting::{DocumentRenderer, IndentStyle, MediaStats};
use crate::media::MediaFetcher;
use crate::output::{prepare_layout, write_document, OutputLayout, RenderedDocument};
use crate::types::NotionId;

/// Lifecycle of a scheduler. `run` moves it from `Idle` through `Draining`
/// to `Done`; a finished scheduler does not run again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
    Idle,
    Draining,
    Done,
}

/// What happened to one exported page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    pub id: NotionId,
    pub title: String,
    pub path: PathBuf,
    /// Top-level blocks of the page.
    pub block_count: usize,
    /// Blocks rendered including nested children.
    pub blocks_rendered: usize,
    pub media: MediaStats,
}

/// Outcome of a complete crawl, pages in export order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    pub pages: Vec<PageReport>,
    pub duplicates_skipped: usize,
}

impl CrawlReport {
    pub fn media_totals(&self) -> MediaStats {
        let mut totals = MediaStats::default();
        for page in &self.pages {
            totals.merge(&page.media);
        }
        totals
    }
}

/// Breadth-first exporter of a Notion page tree.
pub struct CrawlScheduler {
    source: Arc<dyn BlockSource>,
    media: Arc<dyn MediaFetcher>,
    layout: OutputLayout,
    indent: IndentStyle,
    queue: CrawlQueue,
    state: CrawlState,
}

impl CrawlScheduler {
    pub fn new(
        source: Arc<dyn BlockSource>,
        media: Arc<dyn MediaFetcher>,
        layout: OutputLayout,
    ) -> Self {
        Self {
            source,
            media,
            layout,
            indent: IndentStyle::default(),
            queue: CrawlQueue::new(),
            state: CrawlState::Idle,
        }
    }

    pub fn with_indent(mut self, indent: IndentStyle) -> Self {
        self.indent = indent;
        self
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    /// Exports `root` and every page reachable from it through child-page
    /// blocks, each exactly once.
    ///
    /// A failure to list blocks aborts the crawl. Documents already written
    /// stay on disk.
    pub async fn run(&mut self, root: &NotionId) -> Result<CrawlReport, AppError> {
        match self.state {
            CrawlState::Idle => {}
            CrawlState::Draining => return Err(AppError::CrawlStarted("running")),
            CrawlState::Done => return Err(AppError::CrawlStarted("finished")),
        }

        prepare_layout(&self.layout)?;
        log::info!("Exporting to {}", self.layout.root().display());

        self.queue.enqueue(PageTask::root(root.clone()));
        self.state = CrawlState::Draining;

        let mut report = CrawlReport::default();
        while let Some(task) = self.queue.next_pending() {
            log::info!("Processing {} ({})", task.title, task.id);
            let page = self.export_page(&task).await?;
            self.queue.mark_visited(task.id.clone());
            report.pages.push(page);
        }

        report.duplicates_skipped = self.queue.duplicates_skipped();
        self.state = CrawlState::Done;

        log::info!(
            "Exported {} page(s); skipped {} duplicate reference(s)",
            report.pages.len(),
            report.duplicates_skipped
        );
        Ok(report)
    }

    async fn export_page(&mut self, task: &PageTask) -> Result<PageReport, AppError> {
        let blocks = fetch_all_blocks(self.source.as_ref(), &task.id).await?;
        log::debug!("Page {} has {} top-level block(s)", task.title, blocks.len());

        let mut renderer = DocumentRenderer::new(
            self.source.as_ref(),
            self.media.as_ref(),
            &self.layout,
            &mut self.queue,
        )
        .with_indent(self.indent);
        let body = renderer.render(&blocks, 0).await?;
        let media = renderer.media_stats();
        let blocks_rendered = renderer.blocks_rendered();
        drop(renderer);

        let document = RenderedDocument::new(task.title.clone(), body);
        let path = write_document(&self.layout, &task.file_name, &document)?;

        if media.failures() > 0 {
            log::warn!(
                "{} media item(s) of {} could not be saved",
                media.failures(),
                task.title
            );
        }

        Ok(PageReport {
            id: task.id.clone(),
            title: task.title.clone(),
            path,
            block_count: blocks.len(),
            blocks_rendered,
            media,
        })
    }
}
