use std::io::{self, BufRead, Write};

use scene_editor_lib::command::{execute_json, execute_json_batch, CommandResponse};
use scene_editor_lib::state::{AppSettings, SceneStore};
use scene_editor_lib::EditorError;

struct Args {
    script: Option<String>,
    template: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scene_editor=info".into()),
        )
        .init();

    let args = parse_args();
    let settings = AppSettings::load();
    let mut store = SceneStore::from_settings(&settings);

    let template = args.template.or(settings.startup_template);
    if let Some(template) = template {
        if let Err(e) = store.load_template(&template) {
            tracing::error!("Failed to load startup scene: {e}");
        }
    }

    store.on_history_change(|status| {
        tracing::debug!(
            "history: {}/{} undo={} redo={}",
            status.index,
            status.length,
            status.can_undo,
            status.can_redo
        );
    });

    let result = match args.script {
        Some(path) => run_script(&mut store, &path),
        None => run_stdin(&mut store),
    };
    if let Err(e) = result {
        tracing::error!("{e}");
        std::process::exit(1);
    }

    store.settings().save();
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        script: None,
        template: None,
    };
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--script" if i + 1 < args.len() => {
                parsed.script = Some(args[i + 1].clone());
                i += 1;
            }
            "--template" if i + 1 < args.len() => {
                parsed.template = Some(args[i + 1].clone());
                i += 1;
            }
            other => tracing::warn!("Ignoring argument: {other}"),
        }
        i += 1;
    }
    parsed
}

/// Run a JSON array of commands from a file
fn run_script(store: &mut SceneStore, path: &str) -> Result<(), EditorError> {
    let json = std::fs::read_to_string(path)?;
    let responses = execute_json_batch(store, &json)?;
    tracing::info!("Ran {} commands from {path}", responses.len());

    let mut out = io::stdout().lock();
    for resp in &responses {
        print_response(&mut out, resp)?;
    }
    Ok(())
}

/// One command per line on stdin, one response per line on stdout
fn run_stdin(store: &mut SceneStore) -> Result<(), EditorError> {
    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let resp = match execute_json(store, &line) {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!("{e}");
                CommandResponse {
                    success: false,
                    error: Some(e.to_string()),
                    data: None,
                }
            }
        };
        print_response(&mut out, &resp)?;
    }
    Ok(())
}

fn print_response(out: &mut impl Write, resp: &CommandResponse) -> Result<(), EditorError> {
    serde_json::to_writer(&mut *out, resp)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
