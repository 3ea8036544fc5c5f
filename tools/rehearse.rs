/// Rehearse — interactive shell over a staged script.
///
/// Usage: rehearse --script <script.ron> [--config <stage.ron>]
///
/// Commands:
///   cast                  — list characters
///   search <query>        — search the script, highlighting matches
///   scenes                — list scenes and whether they are open
///   toggle <scene-id>     — open or close a scene
///   rehearse <char-id>    — rehearse a character's lines
///   project [char-id]     — project the play, optionally one character
///   next | n              — next line / item
///   prev | p              — previous line / item
///   goto <content-id>     — jump to a line / item
///   export                — print the transcript
///   help                  — list commands
///   quit                  — exit
use script_engine::core::flatten::Item;
use script_engine::core::highlight::Segment;
use script_engine::core::navigator::Progress;
use script_engine::core::session::{ProjectionSession, RehearsalSession};
use script_engine::schema::character::CharacterId;
use script_engine::schema::content::{ContentId, ContentNode};
use script_engine::schema::scene::SceneId;
use script_engine::stage::Stage;
use std::io::{self, BufRead, Write};
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Which cursor `next`/`prev`/`goto` drive.
enum Mode<'s> {
    Reading,
    Rehearsal(RehearsalSession<'s>),
    Projection(ProjectionSession<'s>),
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let mut script_path = None;
    let mut config_path = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--script" if i + 1 < args.len() => {
                i += 1;
                script_path = Some(args[i].clone());
            }
            "--config" if i + 1 < args.len() => {
                i += 1;
                config_path = Some(args[i].clone());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut builder = Stage::builder();
    if let Some(ref path) = script_path {
        builder = builder.script_path(path);
    }
    if let Some(ref path) = config_path {
        builder = builder.config_path(path);
    }
    let stage = match builder.build() {
        Ok(stage) => stage,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    println!("{}", stage.script().title);
    println!(
        "{} characters, {} scenes",
        stage.script().characters.len(),
        stage.script().scenes.len()
    );
    println!("Type 'help' for commands.\n");

    let mut reading = stage.reading_with_configured_store();
    let mut mode = Mode::Reading;

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("rehearse> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd.to_lowercase(), rest.trim()),
            None => (line.to_lowercase(), ""),
        };

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => print_help(),
            "cast" => {
                for character in &stage.script().characters {
                    println!(
                        "  {:<14} {} — {} ({})",
                        character.id, character.name, character.actor, character.color
                    );
                }
            }
            "search" => {
                if rest.is_empty() {
                    println!("Usage: search <query>");
                    continue;
                }
                reading.set_query(rest);
                if reading.results().is_empty() {
                    println!("No results for '{}'.", rest);
                    continue;
                }
                for result in reading.visible_results() {
                    let text = render_segments(&reading.highlight(&result.matched_text));
                    println!(
                        "  [{} {}] {} — {}",
                        result.scene_number,
                        result.scene_title,
                        result.content_id,
                        text
                    );
                }
                if reading.hidden_results() > 0 {
                    println!("  … and {} more", reading.hidden_results());
                }
            }
            "scenes" => {
                for scene in &stage.script().scenes {
                    let marker = if reading.is_expanded(&scene.id) { "-" } else { "+" };
                    println!("  {} {} {} ({})", marker, scene.number, scene.title, scene.id);
                }
            }
            "toggle" => {
                if rest.is_empty() {
                    println!("Usage: toggle <scene-id>");
                    continue;
                }
                let id = SceneId::from(rest);
                if stage.script().scene(&id).is_none() {
                    println!("Unknown scene: {}", rest);
                    continue;
                }
                let open = reading.toggle_scene(&id);
                println!("Scene {} {}.", id, if open { "opened" } else { "closed" });
            }
            "rehearse" => {
                if rest.is_empty() {
                    println!("Usage: rehearse <character-id>");
                    continue;
                }
                let mut session = stage.rehearsal();
                session.select_character(Some(CharacterId::from(rest)));
                if !session.has_lines() {
                    println!("Nothing to rehearse for '{}'.", rest);
                    continue;
                }
                show_rehearsal(&stage, &session);
                mode = Mode::Rehearsal(session);
            }
            "project" => {
                let filter = if rest.is_empty() {
                    None
                } else {
                    Some(CharacterId::from(rest))
                };
                let session = stage.projection(filter);
                if session.current().is_none() {
                    println!("Nothing to project.");
                    continue;
                }
                show_projection(&stage, &session);
                mode = Mode::Projection(session);
            }
            "next" | "n" | "prev" | "p" => {
                let forward = matches!(cmd.as_str(), "next" | "n");
                match &mut mode {
                    Mode::Reading => println!("Start 'rehearse' or 'project' first."),
                    Mode::Rehearsal(session) => {
                        let moved = if forward { session.next() } else { session.previous() };
                        if !moved {
                            println!("(no more lines that way)");
                        }
                        show_rehearsal(&stage, session);
                    }
                    Mode::Projection(session) => {
                        let moved = if forward { session.next() } else { session.previous() };
                        if !moved {
                            println!("(no more items that way)");
                        }
                        show_projection(&stage, session);
                    }
                }
            }
            "goto" => {
                if rest.is_empty() {
                    println!("Usage: goto <content-id>");
                    continue;
                }
                let id = ContentId::from(rest);
                match &mut mode {
                    Mode::Reading => println!("Start 'rehearse' or 'project' first."),
                    Mode::Rehearsal(session) => match session.seek_to_id(&id) {
                        Ok(_) => show_rehearsal(&stage, session),
                        Err(e) => println!("{}", e),
                    },
                    Mode::Projection(session) => match session.seek_to_id(&id) {
                        Ok(_) => show_projection(&stage, session),
                        Err(e) => println!("{}", e),
                    },
                }
            }
            "export" => print!("{}", stage.transcript()),
            _ => {
                println!("Unknown command: '{}'. Type 'help' for commands.", cmd);
            }
        }
    }
}

fn render_segments(segments: &[Segment<'_>]) -> String {
    segments
        .iter()
        .map(|s| {
            if s.matched {
                format!("«{}»", s.text)
            } else {
                s.text.to_string()
            }
        })
        .collect()
}

fn render_item(stage: &Stage, item: &Item) -> String {
    match &item.content {
        ContentNode::StageDirection(direction) => format!("    [{}]", direction.text),
        ContentNode::Dialogue(dialogue) => {
            let direction = dialogue
                .direction
                .as_ref()
                .map(|d| format!(" ({})", d))
                .unwrap_or_default();
            let mut out = format!(
                "    {}{} {}:",
                dialogue.character_name.to_uppercase(),
                direction,
                stage.color_of(item)
            );
            for line in &dialogue.lines {
                out.push_str("\n      ");
                out.push_str(line);
            }
            out
        }
    }
}

fn render_progress(progress: Option<Progress>) -> String {
    match progress {
        Some(p) => format!("{} / {} ({:.0}%)", p.current, p.total, p.fraction() * 100.0),
        None => "0 / 0".to_string(),
    }
}

fn scene_heading(item: &Item) -> String {
    if item.is_final_message() {
        item.scene_title.clone()
    } else {
        format!("Scene {}: {}", item.scene_number, item.scene_title)
    }
}

fn show_rehearsal(stage: &Stage, session: &RehearsalSession<'_>) {
    let Some(current) = session.current_line() else {
        println!("Nothing to rehearse.");
        return;
    };
    println!(
        "\n--- {} — line {} ---",
        scene_heading(current),
        render_progress(session.progress())
    );
    let cues = session.cues();
    for cue in cues.before {
        println!("{}", render_item(stage, cue));
    }
    println!(">>>");
    println!("{}", render_item(stage, current));
    println!("<<<");
    for cue in cues.after {
        println!("{}", render_item(stage, cue));
    }
    println!();
}

fn show_projection(stage: &Stage, session: &ProjectionSession<'_>) {
    let Some(current) = session.current() else {
        println!("Nothing to project.");
        return;
    };
    println!("\n--- {} — {} ---", scene_heading(current), render_progress(session.progress()));
    println!("{}", render_item(stage, current));
    println!();
}

fn print_usage() {
    println!("Usage: rehearse --script <script.ron> [--config <stage.ron>]");
}

fn print_help() {
    println!("Commands:");
    println!("  cast                  list characters");
    println!("  search <query>        search the script, highlighting matches");
    println!("  scenes                list scenes (- open, + closed)");
    println!("  toggle <scene-id>     open or close a scene");
    println!("  rehearse <char-id>    rehearse a character's lines");
    println!("  project [char-id]     project the play, optionally one character");
    println!("  next | n              next line / item");
    println!("  prev | p              previous line / item");
    println!("  goto <content-id>     jump to a line / item");
    println!("  export                print the transcript");
    println!("  help                  this list");
    println!("  quit                  exit");
}
