pub mod annotate;
pub mod crop;
pub mod padding;
pub mod resize;
pub mod save;
