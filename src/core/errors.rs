use thiserror::Error;

#[derive(Error, Debug)]
pub enum PracticeError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to load dataset: {0}")]
    FailedToLoadDataset(String),

    #[error("Dataset has no sentences")]
    NoSentences,

    #[error("PracticeError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for PracticeError {
    fn from(error: std::io::Error) -> Self {
        PracticeError::Io(Box::new(error))
    }
}
