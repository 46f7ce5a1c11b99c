use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Invalid command JSON: {0}")]
    InvalidCommand(#[source] serde_json::Error),

    #[error("Unknown scene template: {0}")]
    UnknownTemplate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
