use std::io::BufRead;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use sifter_core::{update, Msg, Session};
use sifter_engine::{EngineConfig, EngineHandle, RuntimeMode};
use sifter_logging::engine_info;

use super::commands::{parse_command, ShellCommand, HELP};
use super::effects::{map_event, EffectRunner};
use super::render;

pub struct AppOptions {
    pub mode: RuntimeMode,
    pub resource_dir: PathBuf,
}

/// Runs the shell: stdin commands and engine events feed one message loop
/// that owns the session, executes effects, and renders dirty views.
pub fn run(options: AppOptions) {
    let mut config = EngineConfig::with_mode(options.mode);
    config.resource_dir = options.resource_dir;
    engine_info!("Starting sifter in {:?} mode", options.mode);

    let (engine, event_rx) = EngineHandle::spawn(config);
    let runner = EffectRunner::new(engine);

    let (input_tx, input_rx) = mpsc::channel::<ShellCommand>();

    let event_input = input_tx.clone();
    thread::spawn(move || {
        for event in event_rx {
            if event_input.send(ShellCommand::Dispatch(map_event(event))).is_err() {
                break;
            }
        }
    });

    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let command = parse_command(&line);
            let quit = command == ShellCommand::Quit;
            if input_tx.send(command).is_err() || quit {
                return;
            }
        }
        // EOF on stdin closes the session like a window close would.
        let _ = input_tx.send(ShellCommand::Quit);
    });

    println!("sifter — drop a .json/.ndjson file with `open <path>`; `help` for commands");

    let mut session = Session::new();
    while let Ok(command) = input_rx.recv() {
        match command {
            ShellCommand::Dispatch(msg) => dispatch(&mut session, &runner, msg),
            ShellCommand::Show => render::render(&session.view()),
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Invalid(message) => eprintln!("{message}"),
            ShellCommand::Empty => {}
            ShellCommand::Quit => break,
        }
    }

    // Teardown cleanup is best-effort: the deletion is queued on the engine
    // thread and given a moment, never awaited.
    dispatch(&mut session, &runner, Msg::SessionClosing);
    thread::sleep(Duration::from_millis(100));
}

fn dispatch(session: &mut Session, runner: &EffectRunner, msg: Msg) {
    let (mut next, effects) = update(std::mem::take(session), msg);
    runner.run(effects);
    if next.consume_dirty() {
        render::render(&next.view());
    }
    *session = next;
}
