/// Transcript export — renders the script as a plain-text theatrical
/// transcript.
use crate::schema::content::{ContentNode, Dialogue};
use crate::schema::script::Script;

const HEAVY_RULE: &str = "═";
const LIGHT_RULE: &str = "─";
const HEAVY_WIDTH: usize = 60;
const LIGHT_WIDTH: usize = 40;

/// Closing line of every transcript.
pub const END_MARK: &str = "FIN";

fn push_dialogue(out: &mut Vec<String>, dialogue: &Dialogue) {
    let direction = dialogue
        .direction
        .as_ref()
        .map(|d| format!(" ({})", d))
        .unwrap_or_default();
    out.push(format!(
        "{} ({}{}):",
        dialogue.character_name.to_uppercase(),
        dialogue.actor,
        direction
    ));
    for line in &dialogue.lines {
        out.push(format!("  \"{}\"", line));
    }
}

/// The full transcript: title block, cast list, every scene, the final
/// message and the end mark, one `\n`-separated line each.
pub fn transcript(script: &Script) -> String {
    let heavy = HEAVY_RULE.repeat(HEAVY_WIDTH);
    let light = LIGHT_RULE.repeat(LIGHT_WIDTH);
    let mut out: Vec<String> = Vec::new();

    out.push(heavy.clone());
    out.push(String::new());
    out.push(script.title.to_uppercase());
    if let Some(subtitle) = &script.subtitle {
        out.push(subtitle.clone());
    }
    out.push(String::new());
    out.push(format!("\"{}\"", script.central_phrase));
    out.push(String::new());
    out.push(heavy.clone());
    out.push(String::new());

    out.push("CHARACTERS:".to_string());
    out.push(light.clone());
    for character in &script.characters {
        out.push(format!("  {} — {}", character.name, character.actor));
    }
    out.push(String::new());
    out.push(heavy.clone());
    out.push(String::new());

    for scene in &script.scenes {
        out.push(format!("SCENE {}: \"{}\"", scene.number, scene.title));
        out.push(light.clone());
        out.push(String::new());
        for node in &scene.content {
            match node {
                ContentNode::StageDirection(direction) => {
                    out.push(format!("[{}]", direction.text));
                }
                ContentNode::Dialogue(dialogue) => push_dialogue(&mut out, dialogue),
            }
            out.push(String::new());
        }
        out.push(String::new());
    }

    out.push(heavy.clone());
    out.push("FINAL MESSAGE:".to_string());
    out.push(light);
    out.push(String::new());
    // The final message never shows a delivery note.
    push_dialogue(
        &mut out,
        &Dialogue {
            direction: None,
            ..script.final_message.clone()
        },
    );
    out.push(String::new());
    out.push(heavy);
    out.push(String::new());
    out.push(END_MARK.to_string());
    out.push(String::new());

    out.join("\n")
}
