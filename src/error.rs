use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid date `{input}`, expected YYYY-MM-DD: {source}")]
    InvalidDate {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("failed to initialise logging: {0}")]
    Logger(String),
}

pub type Result<T> = std::result::Result<T, Error>;
