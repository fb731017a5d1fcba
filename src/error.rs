// ABOUTME: Driver-level error types; the evaluator itself never uses these

use thiserror::Error;

/// Failures that can only happen at the process boundary: reading a script
/// file, or the interactive line reader failing. The core (lexer, parser,
/// evaluator) never returns this type — runtime failures there are
/// `Value::Error`, not a `Result`.
#[derive(Error, Debug)]
pub enum DriverError {
    #[error("could not read script {path}: {source}")]
    ScriptRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("readline failed: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}
