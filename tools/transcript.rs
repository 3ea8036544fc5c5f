/// Transcript — exports a script as a plain-text theatrical transcript.
///
/// Usage: transcript --script <script.ron> [--output <file.txt>]
use script_engine::core::export::transcript;
use script_engine::schema::script::Script;
use std::env;
use std::path::Path;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "Usage: transcript --script <script.ron> [--output <file.txt>]";

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = env::args().collect();

    let mut script_path = None;
    let mut output = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--script" if i + 1 < args.len() => {
                i += 1;
                script_path = Some(args[i].clone());
            }
            "--output" if i + 1 < args.len() => {
                i += 1;
                output = Some(args[i].clone());
            }
            "--help" | "-h" => {
                println!("{}", USAGE);
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("{}", USAGE);
                process::exit(1);
            }
        }
        i += 1;
    }

    let script_path = script_path.unwrap_or_else(|| {
        eprintln!("Error: --script is required");
        eprintln!("{}", USAGE);
        process::exit(1);
    });

    let script = match Script::load_from_ron(Path::new(&script_path)) {
        Ok(script) => script,
        Err(e) => {
            eprintln!("Error loading {}: {}", script_path, e);
            process::exit(1);
        }
    };

    let text = transcript(&script);

    match output {
        Some(path) => {
            if let Err(e) = std::fs::write(&path, &text) {
                eprintln!("Error writing {}: {}", path, e);
                process::exit(1);
            }
            tracing::info!(path = %path, bytes = text.len(), "transcript written");
            println!("Wrote {} ({} scenes)", path, script.scenes.len());
        }
        None => print!("{}", text),
    }
}
