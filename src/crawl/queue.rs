// src/crawl/queue.rs
//! Breadth-first work queue with a visited set.

use std::collections::{HashMap, HashSet, VecDeque};

use super::task::PageTask;
use crate::types::NotionId;

/// The ability to register pages found while rendering another page.
///
/// Handed to the renderer for the duration of a single page render.
pub trait PageDiscovery: Send {
    /// Offers a newly found page. Returns whether it was queued.
    fn discover(&mut self, task: PageTask) -> bool;

    /// Whether `id` has already been exported.
    fn is_visited(&self, id: &NotionId) -> bool;
}

/// FIFO of pending pages plus the set of pages already exported.
///
/// A page id enters `visited` only once its document has been written, and
/// `next_pending` checks it again on the way out, so a page reachable
/// through several parents (or through a cycle) is exported once.
#[derive(Debug, Default)]
pub struct CrawlQueue {
    pending: VecDeque<PageTask>,
    queued: HashSet<NotionId>,
    visited: HashSet<NotionId>,
    file_owners: HashMap<String, NotionId>,
    duplicates_skipped: usize,
}

impl CrawlQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `task` unless its page was exported already or is pending.
    pub fn enqueue(&mut self, task: PageTask) -> bool {
        if self.visited.contains(&task.id) || self.queued.contains(&task.id) {
            log::debug!("Skipping already known page {} ({})", task.title, task.id);
            self.duplicates_skipped += 1;
            return false;
        }

        match self.file_owners.get(&task.file_name) {
            Some(owner) if owner != &task.id => {
                log::warn!(
                    "Pages {} and {} both export to {}; the later one overwrites",
                    owner,
                    task.id,
                    task.file_name
                );
            }
            Some(_) => {}
            None => {
                self.file_owners
                    .insert(task.file_name.clone(), task.id.clone());
            }
        }

        self.queued.insert(task.id.clone());
        self.pending.push_back(task);
        true
    }

    /// Pops the oldest pending task whose page has not been exported yet.
    pub fn next_pending(&mut self) -> Option<PageTask> {
        while let Some(task) = self.pending.pop_front() {
            self.queued.remove(&task.id);
            if self.visited.contains(&task.id) {
                log::debug!("Page {} already exported, skipping", task.id);
                self.duplicates_skipped += 1;
                continue;
            }
            return Some(task);
        }
        None
    }

    /// Records that the document for `id` has been written.
    pub fn mark_visited(&mut self, id: NotionId) -> bool {
        self.visited.insert(id)
    }

    pub fn is_visited(&self, id: &NotionId) -> bool {
        self.visited.contains(id)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    /// Discoveries and dequeues that did not lead to a new export.
    pub fn duplicates_skipped(&self) -> usize {
        self.duplicates_skipped
    }
}

impl PageDiscovery for CrawlQueue {
    fn discover(&mut self, task: PageTask) -> bool {
        self.enqueue(task)
    }

    fn is_visited(&self, id: &NotionId) -> bool {
        CrawlQueue::is_visited(self, id)
    }
}
