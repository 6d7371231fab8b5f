use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecolorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse PDF: {0}")]
    ParseError(String),

    #[error("Page {0} has no usable MediaBox")]
    MissingMediaBox(u32),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("PDF operation failed: {0}")]
    OperationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, RecolorError>;
