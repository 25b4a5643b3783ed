//! I/O layer: decoding image files into ndarray buffers (`load`) and the
//! PNG/JPEG/TIFF encoders plus JSON sidecars used when saving (`writers`).
pub mod load;
pub use load::load_image;

pub mod writers;
pub use writers::metadata::write_crop_sidecar;
