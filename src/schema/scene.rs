use serde::{Deserialize, Serialize};
use std::fmt;

use super::content::{ContentId, ContentNode};

/// Newtype wrapper for scene IDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneId(pub String);

impl SceneId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SceneId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An ordered section of the play.
///
/// `number` is the 1-based display order. `content` is in performance
/// order and must never be re-sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub id: SceneId,
    pub number: u32,
    pub title: String,
    pub content: Vec<ContentNode>,
}

impl Scene {
    /// Looks up a content node of this scene by id.
    pub fn find(&self, id: &ContentId) -> Option<&ContentNode> {
        self.content.iter().find(|node| node.id() == id)
    }
}
