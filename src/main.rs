/*
 * ==========================================================================
 * OKEREW - Token-Stream Scripting
 * ==========================================================================
 *
 * Command-line entry: `okerew <file.okerew>`.
 *
 * License:
 * This file is part of the Okerew scripting language project.
 *
 * Okerew is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use okerew::interpreter::StdConsole;
use okerew::{load_source, tokenize, DiagnosticPrinter, Interpreter, InterpreterConfig, LoadError};

#[derive(Parser, Debug)]
#[command(name = "okerew")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Runs an Okerew script", long_about = None)]
struct Args {
    /// Script to run; must end in `.okerew`.
    #[arg(value_name = "FILE")]
    script: PathBuf,
}

/// Installs a stderr subscriber when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let source = match load_source(&args.script) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Error: {}", err);
            if matches!(err, LoadError::WrongExtension(_)) {
                eprintln!("{}", Args::command().render_usage());
            }
            return ExitCode::FAILURE;
        }
    };

    let file_name = args.script.display().to_string();
    let printer = DiagnosticPrinter::new(file_name, source.as_str());

    let tokens = match tokenize(&source) {
        Ok(tokens) => tokens,
        Err(err) => {
            printer.print(&err);
            return ExitCode::FAILURE;
        }
    };

    if tracing::enabled!(tracing::Level::TRACE) {
        match serde_json::to_string(&tokens) {
            Ok(json) => tracing::trace!(tokens = %json, "token stream"),
            Err(err) => tracing::trace!(%err, "could not serialize token stream"),
        }
    }

    let mut interpreter = Interpreter::new(InterpreterConfig::from_env());
    let mut console = StdConsole;

    let outcome = interpreter.run(&tokens, &mut console);

    if tracing::enabled!(tracing::Level::DEBUG) {
        let variables = interpreter.context().variables.sorted();
        if let Ok(json) = serde_json::to_string(&variables) {
            tracing::debug!(variables = %json, "final variable store");
        }
    }

    match outcome {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            printer.print(&err);
            ExitCode::FAILURE
        }
    }
}
