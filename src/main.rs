// ABOUTME: CLI entry point: REPL driver and script runner around the core library

mod ast;
mod builtins;
mod config;
mod env;
mod error;
mod eval;
mod lexer;
mod parser;
mod token;
mod value;

use clap::Parser as ClapParser;
use config::{ERROR_BANNER, PARSER_ERROR_HEADER, PROMPT, VERSION, WELCOME_MESSAGE, WELCOME_SUBTITLE};
use env::Environment;
use error::DriverError;
use eval::eval_program;
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};
use std::path::PathBuf;
use std::process::ExitCode;

/// An interpreter for a small dynamically-typed, expression-oriented
/// scripting language.
#[derive(ClapParser, Debug)]
#[command(name = "monkey")]
#[command(version = VERSION)]
#[command(about = "An interpreter for the Monkey programming language")]
struct CliArgs {
    /// Script file to run. If omitted, starts the interactive REPL.
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    match args.script {
        Some(path) => match run_script(&path) {
            Ok(code) => code,
            Err(err) => {
                eprintln!("{}", err);
                ExitCode::FAILURE
            }
        },
        None => match run_repl() {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("{}", err);
                ExitCode::FAILURE
            }
        },
    }
}

fn run_script(path: &PathBuf) -> Result<ExitCode, DriverError> {
    let source = std::fs::read_to_string(path).map_err(|source| DriverError::ScriptRead {
        path: path.display().to_string(),
        source,
    })?;

    let (program, diagnostics) = parser::parse(&source);
    if !diagnostics.is_empty() {
        print_diagnostics(&diagnostics);
        return Ok(ExitCode::FAILURE);
    }

    let env = Environment::new();
    let result = eval_program(&program, &env);
    let is_error = result.is_error();
    println!("{}", result);

    Ok(if is_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn run_repl() -> Result<(), DriverError> {
    println!("{}", WELCOME_MESSAGE);
    println!("{}", WELCOME_SUBTITLE);

    let config = Config::builder().auto_add_history(true).build();
    let mut rl: Editor<(), rustyline::history::DefaultHistory> = Editor::with_config(config)?;

    let env = Environment::new();

    loop {
        let readline = rl.readline(&format!("{} ", PROMPT));
        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }

                let (program, diagnostics) = parser::parse(&line);
                if !diagnostics.is_empty() {
                    print_diagnostics(&diagnostics);
                    continue;
                }

                let result = eval_program(&program, &env);
                println!("{}", result);
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

/// Prints parser diagnostics in the exact format spec.md §6 mandates: the
/// ASCII-art marker, the header line, then one tab-indented message per line.
fn print_diagnostics(diagnostics: &[String]) {
    eprintln!("{}", ERROR_BANNER);
    eprintln!("{}", PARSER_ERROR_HEADER);
    eprintln!(" parser errors:");
    for msg in diagnostics {
        eprintln!("\t{}", msg);
    }
}
