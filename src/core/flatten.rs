/// Flattener — projects the scene hierarchy into linear item sequences.
///
/// Every sequence preserves scene order, then content order, and places
/// the final message last with scene number 0.
use serde::{Deserialize, Serialize};

use crate::schema::character::CharacterId;
use crate::schema::content::{ContentId, ContentKind, ContentNode};
use crate::schema::scene::{Scene, SceneId};
use crate::schema::script::Script;

/// Scene id given to the final message, which belongs to no scene.
pub const FINAL_MESSAGE_SCENE_ID: &str = "final-message";
/// Scene title given to the final message.
pub const FINAL_MESSAGE_TITLE: &str = "Final Message";

/// One addressable entry of a flattened sequence: a content node together
/// with the scene it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub kind: ContentKind,
    pub scene_id: SceneId,
    pub scene_number: u32,
    pub scene_title: String,
    pub content: ContentNode,
}

impl Item {
    fn in_scene(scene: &Scene, content: &ContentNode) -> Self {
        Self {
            kind: content.kind(),
            scene_id: scene.id.clone(),
            scene_number: scene.number,
            scene_title: scene.title.clone(),
            content: content.clone(),
        }
    }

    fn final_message(script: &Script) -> Self {
        Self {
            kind: ContentKind::Dialogue,
            scene_id: SceneId::from(FINAL_MESSAGE_SCENE_ID),
            scene_number: 0,
            scene_title: FINAL_MESSAGE_TITLE.to_string(),
            content: ContentNode::Dialogue(script.final_message.clone()),
        }
    }

    /// Id of the underlying content node.
    pub fn id(&self) -> &ContentId {
        self.content.id()
    }

    /// Returns true if this item is the closing message rather than part
    /// of a scene.
    pub fn is_final_message(&self) -> bool {
        self.scene_number == 0
    }
}

/// Every content node of every scene in document order, followed by the
/// final message. This is the projection sequence.
pub fn flatten_all(script: &Script) -> Vec<Item> {
    let mut items = Vec::with_capacity(script.content_count() + 1);
    for scene in &script.scenes {
        for content in &scene.content {
            items.push(Item::in_scene(scene, content));
        }
    }
    items.push(Item::final_message(script));
    items
}

/// Only the dialogue spoken by `character_id`, in document order, with the
/// final message last if it is theirs. This is the rehearsal sequence.
///
/// An id with no lines yields an empty sequence.
pub fn flatten_by_character(script: &Script, character_id: &CharacterId) -> Vec<Item> {
    filter_by_character(flatten_all(script), character_id)
}

/// Keep only the dialogue items of `character_id`. Stage directions are
/// dropped, since they are spoken by nobody.
pub fn filter_by_character(items: Vec<Item>, character_id: &CharacterId) -> Vec<Item> {
    let filtered: Vec<Item> = items
        .into_iter()
        .filter(|item| item.content.is_spoken_by(character_id))
        .collect();
    if filtered.is_empty() {
        tracing::debug!(character = %character_id, "no dialogue for character");
    }
    filtered
}

/// Every dialogue inside the scenes, in document order. The final message
/// is not included. Used to give a rehearsing actor their cue lines.
pub fn flatten_dialogues(script: &Script) -> Vec<Item> {
    script
        .scenes
        .iter()
        .flat_map(|scene| {
            scene
                .content
                .iter()
                .filter(|content| content.kind() == ContentKind::Dialogue)
                .map(move |content| Item::in_scene(scene, content))
        })
        .collect()
}
