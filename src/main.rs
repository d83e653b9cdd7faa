use std::io;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use syllogy::engine::Engine;
use syllogy::settings::Settings;

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(engine: &mut Engine, prompt: &str) -> rustyline::Result<()> {
    let mut rl = DefaultEditor::new()?;
    loop {
        match rl.readline(prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line)?;
                if line == ":quit" || line == ":q" {
                    break;
                }
                match engine.execute(line) {
                    Ok(outcome) => println!("{}", outcome),
                    Err(e) => println!("Error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

fn main() {
    let (settings, problem) = match Settings::load() {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };
    init_tracing(&settings.log);
    if let Some(e) = problem {
        warn!(error = %e, "falling back to default settings");
    }

    let mut engine = match Engine::new(&settings) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!("syllogy: define, search, save and load. Type ':quit' to exit.");
    if let Err(e) = run(&mut engine, &settings.prompt) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
