use serde::{Deserialize, Serialize};
use std::fmt;

use super::character::CharacterId;

/// Newtype wrapper for content node IDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(pub String);

impl ContentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which of the two content node variants an item carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentKind {
    Dialogue,
    StageDirection,
}

impl ContentKind {
    /// Returns the label used at the UI boundary ("dialogue", "stage-direction").
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dialogue => "dialogue",
            Self::StageDirection => "stage-direction",
        }
    }
}

/// One or more spoken lines attributed to a single character.
///
/// `character_name` and `actor` are carried on the dialogue itself rather
/// than looked up, so a line can be credited to a pair ("María y José")
/// while still being filed under one character id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialogue {
    pub id: ContentId,
    pub character_id: CharacterId,
    pub character_name: String,
    pub actor: String,
    /// Delivery note, e.g. "enojada" or "con ternura".
    #[serde(default)]
    pub direction: Option<String>,
    pub lines: Vec<String>,
}

impl Dialogue {
    /// All lines joined with a single space.
    pub fn joined_lines(&self) -> String {
        self.lines.join(" ")
    }
}

/// A non-spoken staging instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDirection {
    pub id: ContentId,
    pub text: String,
}

/// A node of scene content: either dialogue or a stage direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentNode {
    Dialogue(Dialogue),
    StageDirection(StageDirection),
}

impl ContentNode {
    pub fn id(&self) -> &ContentId {
        match self {
            Self::Dialogue(dialogue) => &dialogue.id,
            Self::StageDirection(direction) => &direction.id,
        }
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Dialogue(_) => ContentKind::Dialogue,
            Self::StageDirection(_) => ContentKind::StageDirection,
        }
    }

    pub fn as_dialogue(&self) -> Option<&Dialogue> {
        match self {
            Self::Dialogue(dialogue) => Some(dialogue),
            Self::StageDirection(_) => None,
        }
    }

    pub fn as_stage_direction(&self) -> Option<&StageDirection> {
        match self {
            Self::Dialogue(_) => None,
            Self::StageDirection(direction) => Some(direction),
        }
    }

    /// Returns true if this node is dialogue spoken by `character_id`.
    pub fn is_spoken_by(&self, character_id: &CharacterId) -> bool {
        matches!(self, Self::Dialogue(d) if &d.character_id == character_id)
    }

    /// The text fields a search query is matched against.
    ///
    /// Stage directions expose their text; dialogue exposes its joined
    /// lines, the character name and the actor.
    pub fn searchable_fields(&self) -> Vec<String> {
        match self {
            Self::Dialogue(dialogue) => vec![
                dialogue.joined_lines(),
                dialogue.character_name.clone(),
                dialogue.actor.clone(),
            ],
            Self::StageDirection(direction) => vec![direction.text.clone()],
        }
    }

    /// Display text used for search results: `"Name: lines"` for dialogue,
    /// the raw text for stage directions.
    pub fn summary(&self) -> String {
        match self {
            Self::Dialogue(dialogue) => {
                format!("{}: {}", dialogue.character_name, dialogue.joined_lines())
            }
            Self::StageDirection(direction) => direction.text.clone(),
        }
    }
}

impl From<Dialogue> for ContentNode {
    fn from(dialogue: Dialogue) -> Self {
        Self::Dialogue(dialogue)
    }
}

impl From<StageDirection> for ContentNode {
    fn from(direction: StageDirection) -> Self {
        Self::StageDirection(direction)
    }
}
