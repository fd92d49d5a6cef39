// src/crawl/mod.rs
//! Breadth-first traversal of a page tree, one document per page.

mod queue;
mod scheduler;
mod task;

pub use queue::{CrawlQueue, PageDiscovery};
pub use scheduler::{CrawlReport, CrawlScheduler, CrawlState, PageReport};
pub use task::PageTask;
