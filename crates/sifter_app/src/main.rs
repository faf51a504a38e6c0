mod shell;

use std::path::PathBuf;
use std::process::ExitCode;

use sifter_engine::RuntimeMode;

use shell::app::AppOptions;
use shell::logging::{self, LogDestination};

const USAGE: &str = "usage: sifter [--mode prod|dev] [--resources <dir>] [--log file|term|both]

Commands are read from stdin; type `help` once running.";

fn main() -> ExitCode {
    let mut mode = mode_from_env();
    let mut resource_dir = PathBuf::from("resources");
    let mut destination = LogDestination::File;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--mode" => match args.next().as_deref() {
                Some("prod") | Some("production") => mode = RuntimeMode::Production,
                Some("dev") | Some("development") => mode = RuntimeMode::Development,
                other => return usage_error(&format!("--mode expects prod|dev, got {other:?}")),
            },
            "--resources" => match args.next() {
                Some(dir) => resource_dir = PathBuf::from(dir),
                None => return usage_error("--resources expects a directory"),
            },
            "--log" => match args.next().as_deref() {
                Some("file") => destination = LogDestination::File,
                Some("term") => destination = LogDestination::Terminal,
                Some("both") => destination = LogDestination::Both,
                other => return usage_error(&format!("--log expects file|term|both, got {other:?}")),
            },
            "--help" | "-h" => {
                println!("{USAGE}");
                return ExitCode::SUCCESS;
            }
            other => return usage_error(&format!("unknown argument {other}")),
        }
    }

    logging::initialize(destination);
    shell::app::run(AppOptions { mode, resource_dir });
    ExitCode::SUCCESS
}

fn mode_from_env() -> RuntimeMode {
    match std::env::var("SIFTER_MODE").as_deref() {
        Ok("dev") | Ok("development") => RuntimeMode::Development,
        _ => RuntimeMode::Production,
    }
}

fn usage_error(message: &str) -> ExitCode {
    eprintln!("{message}\n{USAGE}");
    ExitCode::FAILURE
}
