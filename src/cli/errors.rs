use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid size parameter: {size}. Must be a positive integer or HEIGHTxWIDTH")]
    InvalidSize { size: String },

    #[error("Invalid point: {point}. Expected ROW,COL")]
    InvalidPoint { point: String },

    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error(transparent)]
    Library(#[from] roicrop::Error),
}
