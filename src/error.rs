use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid process: {0}")]
    InvalidProcess(String),

    #[error("Invalid input: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),
}

pub type Result<T> = std::result::Result<T, Error>;

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
