//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Covers buffer shape validation, crop geometry failures, resampling and encoding
//! problems, and converts underlying I/O, decoder and JSON errors.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Shape of given image should be one of (H, W) or (H, W, C), got {ndim} dimensions")]
    InvalidShape { ndim: usize },

    #[error(
        "Given image shape ({height}, {width}) is smaller than cropped image shape ({target_height}, {target_width}). Adjust cropped size or enable resizing"
    )]
    TargetTooLarge {
        height: usize,
        width: usize,
        target_height: usize,
        target_width: usize,
    },

    #[error("Size must be greater than 0, got: {size}")]
    ZeroSize { size: usize },

    #[error("Cannot resize an empty image of shape ({height}, {width})")]
    EmptyImage { height: usize, width: usize },

    #[error("Unsupported channel count: {channels}")]
    UnsupportedChannels { channels: usize },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Selection error: {0}")]
    Selection(String),

    #[error("Resize error: {0}")]
    Resize(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Encoding error: {0}")]
    Encode(String),

    #[error("Failed to load image from {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn resize<E: std::fmt::Display>(e: E) -> Self {
        Error::Resize(e.to_string())
    }

    pub fn encode<E: std::fmt::Display>(e: E) -> Self {
        Error::Encode(e.to_string())
    }
}
