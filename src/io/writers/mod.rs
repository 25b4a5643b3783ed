pub mod jpeg;
pub mod metadata;
pub mod png;
pub mod tiff;
