use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::character::{Character, CharacterId, FALLBACK_COLOR};
use super::content::{ContentId, ContentNode, Dialogue};
use super::scene::{Scene, SceneId};

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// The whole play: title block, cast, scenes, and the closing message.
///
/// A script is loaded once and never mutated. `final_message` is not part
/// of any scene but is always sequenced after the last one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub central_phrase: String,
    pub characters: Vec<Character>,
    pub scenes: Vec<Scene>,
    pub final_message: Dialogue,
}

impl Script {
    /// Load a script from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<Script, ScriptError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a script from a RON string.
    pub fn parse_ron(input: &str) -> Result<Script, ScriptError> {
        Ok(ron::from_str(input)?)
    }

    pub fn character(&self, id: &CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| &c.id == id)
    }

    /// The color of a character, or [`FALLBACK_COLOR`] when the id is not
    /// part of the cast.
    pub fn character_color(&self, id: &CharacterId) -> &str {
        self.character_color_or(id, FALLBACK_COLOR)
    }

    /// The color of a character, or `fallback` when the id is not part of
    /// the cast.
    pub fn character_color_or<'a>(&'a self, id: &CharacterId, fallback: &'a str) -> &'a str {
        match self.character(id) {
            Some(character) => &character.color,
            None => {
                tracing::debug!(character = %id, "unknown character, using fallback color");
                fallback
            }
        }
    }

    pub fn scene(&self, id: &SceneId) -> Option<&Scene> {
        self.scenes.iter().find(|s| &s.id == id)
    }

    /// Locate a content node anywhere in the play. The final message is
    /// returned with no owning scene.
    pub fn find_content(&self, id: &ContentId) -> Option<(Option<&Scene>, ContentNode)> {
        for scene in &self.scenes {
            if let Some(node) = scene.find(id) {
                return Some((Some(scene), node.clone()));
            }
        }
        if &self.final_message.id == id {
            return Some((None, ContentNode::Dialogue(self.final_message.clone())));
        }
        None
    }

    /// Total number of content nodes across all scenes, excluding the
    /// final message.
    pub fn content_count(&self) -> usize {
        self.scenes.iter().map(|s| s.content.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_SCRIPT: &str = r##"(
        title: "Prueba",
        central_phrase: "Una frase.",
        characters: [
            (id: "x", name: "Equis", actor: "Ana", color: "#111111"),
        ],
        scenes: [
            (
                id: "s1",
                number: 1,
                title: "Uno",
                content: [
                    StageDirection((id: "s1-d1", text: "Entra Equis.")),
                    Dialogue((
                        id: "s1-l1",
                        character_id: "x",
                        character_name: "Equis",
                        actor: "Ana",
                        direction: Some("seria"),
                        lines: ["Hola."],
                    )),
                ],
            ),
        ],
        final_message: (
            id: "fin",
            character_id: "x",
            character_name: "Equis",
            actor: "Ana",
            lines: ["Adiós."],
        ),
    )"##;

    #[test]
    fn parse_small_script() {
        let script = Script::parse_ron(SMALL_SCRIPT).unwrap();
        assert_eq!(script.title, "Prueba");
        assert_eq!(script.subtitle, None);
        assert_eq!(script.scenes.len(), 1);
        assert_eq!(script.content_count(), 2);
        let dialogue = script.scenes[0].content[1].as_dialogue().unwrap();
        assert_eq!(dialogue.direction.as_deref(), Some("seria"));
    }

    #[test]
    fn character_color_resolves_and_falls_back() {
        let script = Script::parse_ron(SMALL_SCRIPT).unwrap();
        assert_eq!(script.character_color(&CharacterId::from("x")), "#111111");
        assert_eq!(
            script.character_color(&CharacterId::from("nobody")),
            FALLBACK_COLOR
        );
    }

    #[test]
    fn find_content_in_scene_and_final_message() {
        let script = Script::parse_ron(SMALL_SCRIPT).unwrap();

        let (scene, node) = script.find_content(&ContentId::from("s1-l1")).unwrap();
        assert_eq!(scene.map(|s| s.number), Some(1));
        assert_eq!(node.id().as_str(), "s1-l1");

        let (scene, node) = script.find_content(&ContentId::from("fin")).unwrap();
        assert!(scene.is_none());
        assert!(node.as_dialogue().is_some());

        assert!(script.find_content(&ContentId::from("missing")).is_none());
    }

    #[test]
    fn parse_error_is_reported() {
        assert!(matches!(
            Script::parse_ron("(title: 1)"),
            Err(ScriptError::Ron(_))
        ));
    }

    #[test]
    fn ron_round_trip() {
        let script = Script::parse_ron(SMALL_SCRIPT).unwrap();
        let serialized = ron::to_string(&script).unwrap();
        let deserialized = Script::parse_ron(&serialized).unwrap();
        assert_eq!(script, deserialized);
    }
}
