use condition_engine::EvalError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read the record file: {0}")]
    RecordRead(#[from] std::io::Error),

    #[error("Failed to parse the record as JSON: {0}")]
    RecordParse(#[from] serde_json::Error),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),

    #[error("Failed to compile condition:\n{0}")]
    Compile(String),

    #[error("Failed to evaluate condition: {0}")]
    Eval(#[from] EvalError),

    #[error("Invalid value for --now: {0}")]
    InvalidNow(#[source] chrono::ParseError),
}
