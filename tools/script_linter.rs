/// Script Linter — validates a script document before it is staged.
///
/// Usage: script_linter <script.ron>
use rustc_hash::{FxHashMap, FxHashSet};
use script_engine::schema::content::ContentNode;
use script_engine::schema::script::Script;
use std::path::Path;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: script_linter <script.ron>");
        process::exit(0);
    }

    let script = match Script::load_from_ron(Path::new(&args[1])) {
        Ok(script) => script,
        Err(e) => {
            eprintln!("ERROR: Failed to load script: {}", e);
            process::exit(1);
        }
    };

    println!(
        "Loaded '{}': {} characters, {} scenes",
        script.title,
        script.characters.len(),
        script.scenes.len()
    );

    let (errors, warnings) = lint_script(&script);

    println!("\n=== Script Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    if errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn lint_script(script: &Script) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // Cast: unique ids, one color per character
    let mut cast_ids = FxHashSet::default();
    let mut colors: FxHashMap<&str, &str> = FxHashMap::default();
    for character in &script.characters {
        if !cast_ids.insert(character.id.as_str()) {
            errors.push(format!("Duplicate character id '{}'", character.id));
        }
        if let Some(other) = colors.insert(character.color.as_str(), character.id.as_str()) {
            warnings.push(format!(
                "Characters '{}' and '{}' share color {}",
                other, character.id, character.color
            ));
        }
    }

    // Scenes: unique ids, numbers strictly increasing from 1
    let mut scene_ids = FxHashSet::default();
    let mut last_number = 0;
    for scene in &script.scenes {
        if !scene_ids.insert(scene.id.as_str()) {
            errors.push(format!("Duplicate scene id '{}'", scene.id));
        }
        if scene.number <= last_number {
            errors.push(format!(
                "Scene '{}' has number {} after scene number {}",
                scene.id, scene.number, last_number
            ));
        }
        last_number = scene.number;
        if scene.content.is_empty() {
            warnings.push(format!("Scene '{}' has no content", scene.id));
        }
    }

    // Content: unique ids across the play, resolvable speakers, spoken lines
    let mut content_ids = FxHashSet::default();
    let nodes = script
        .scenes
        .iter()
        .flat_map(|scene| scene.content.iter().map(move |node| (scene.id.as_str(), node.clone())))
        .chain(std::iter::once((
            "final message",
            ContentNode::Dialogue(script.final_message.clone()),
        )));

    for (scene, node) in nodes {
        if !content_ids.insert(node.id().clone()) {
            errors.push(format!("Duplicate content id '{}' in {}", node.id(), scene));
        }
        match &node {
            ContentNode::Dialogue(dialogue) => {
                match script.character(&dialogue.character_id) {
                    None => errors.push(format!(
                        "Dialogue '{}' in {} references unknown character '{}'",
                        dialogue.id, scene, dialogue.character_id
                    )),
                    Some(character) if character.name != dialogue.character_name => {
                        // Shared lines credit several names under one id.
                        warnings.push(format!(
                            "Dialogue '{}' credits '{}' but character '{}' is named '{}'",
                            dialogue.id, dialogue.character_name, character.id, character.name
                        ));
                    }
                    Some(_) => {}
                }
                if dialogue.lines.is_empty() {
                    errors.push(format!("Dialogue '{}' in {} has no lines", dialogue.id, scene));
                }
                if dialogue.lines.iter().any(|l| l.trim().is_empty()) {
                    warnings.push(format!(
                        "Dialogue '{}' in {} has a blank line",
                        dialogue.id, scene
                    ));
                }
            }
            ContentNode::StageDirection(direction) => {
                if direction.text.trim().is_empty() {
                    warnings.push(format!(
                        "Stage direction '{}' in {} is blank",
                        direction.id, scene
                    ));
                }
            }
        }
    }

    (errors, warnings)
}
