use crate::types::NotionId;
use serde::{Deserialize, Serialize};

/// Common fields for all blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockCommon {
    pub id: NotionId,
    pub has_children: bool,
}

impl BlockCommon {
    pub fn new(id: NotionId) -> Self {
        Self {
            id,
            has_children: false,
        }
    }

    /// Marks the block as a container whose children must be listed.
    pub fn with_children(mut self) -> Self {
        self.has_children = true;
        self
    }
}

impl Default for BlockCommon {
    fn default() -> Self {
        Self::new(NotionId::new_v4())
    }
}
