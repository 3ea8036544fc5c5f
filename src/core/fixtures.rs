//! Small hand-built scripts shared by the unit tests.

use crate::schema::character::{Character, CharacterId};
use crate::schema::content::{ContentId, ContentNode, Dialogue, StageDirection};
use crate::schema::scene::{Scene, SceneId};
use crate::schema::script::Script;

pub(crate) fn dialogue(id: &str, character: &str, name: &str, lines: &[&str]) -> Dialogue {
    Dialogue {
        id: ContentId::from(id),
        character_id: CharacterId::from(character),
        character_name: name.to_string(),
        actor: format!("{} (actor)", name),
        direction: None,
        lines: lines.iter().map(|l| l.to_string()).collect(),
    }
}

pub(crate) fn direction(id: &str, text: &str) -> ContentNode {
    ContentNode::StageDirection(StageDirection {
        id: ContentId::from(id),
        text: text.to_string(),
    })
}

/// Two scenes: scene 1 holds one line for `x` between a stage direction
/// and a line for `y`; scene 2 holds a single line for `x`. The final
/// message belongs to `y`.
pub(crate) fn two_scene_script() -> Script {
    Script {
        title: "Two Scenes".to_string(),
        subtitle: None,
        central_phrase: "Less is more.".to_string(),
        characters: vec![
            Character {
                id: CharacterId::from("x"),
                name: "Xavier".to_string(),
                actor: "Xavier (actor)".to_string(),
                color: "#ff0000".to_string(),
            },
            Character {
                id: CharacterId::from("y"),
                name: "Yara".to_string(),
                actor: "Yara (actor)".to_string(),
                color: "#00ff00".to_string(),
            },
        ],
        scenes: vec![
            Scene {
                id: SceneId::from("s1"),
                number: 1,
                title: "Opening".to_string(),
                content: vec![
                    direction("s1-d1", "Lights rise on an empty room."),
                    dialogue("s1-l1", "x", "Xavier", &["Is anyone here?"]).into(),
                    dialogue("s1-l2", "y", "Yara", &["Only me.", "As always."]).into(),
                ],
            },
            Scene {
                id: SceneId::from("s2"),
                number: 2,
                title: "Closing".to_string(),
                content: vec![ContentNode::Dialogue(dialogue(
                    "s2-l1",
                    "x",
                    "Xavier",
                    &["Then we begin."],
                ))],
            },
        ],
        final_message: dialogue("final", "y", "Yara", &["Goodnight."]),
    }
}
