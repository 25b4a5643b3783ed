use std::path::Path;

use image::{ColorType, DynamicImage};
use ndarray::{ArrayD, IxDyn};
use tracing::debug;

use crate::error::{Error, Result};

/// Decode an image file into an `(H, W)` or `(H, W, C)` u8 buffer.
///
/// Grayscale files load as `(H, W)`, files with an alpha channel as
/// `(H, W, 4)` and everything else as `(H, W, 3)`.
pub fn load_image(path: &Path) -> Result<ArrayD<u8>> {
    let img = image::open(path).map_err(|source| Error::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    let array = image_to_array(img)?;
    debug!("Loaded {:?} with shape {:?}", path, array.shape());
    Ok(array)
}

pub fn image_to_array(img: DynamicImage) -> Result<ArrayD<u8>> {
    let (rows, cols) = (img.height() as usize, img.width() as usize);
    let (shape, data) = match img.color() {
        ColorType::L8 | ColorType::L16 => (vec![rows, cols], img.into_luma8().into_raw()),
        color if color.has_alpha() => (vec![rows, cols, 4], img.into_rgba8().into_raw()),
        _ => (vec![rows, cols, 3], img.into_rgb8().into_raw()),
    };
    ArrayD::from_shape_vec(IxDyn(&shape), data).map_err(|e| Error::Processing(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_follow_color_type() {
        let gray = image_to_array(DynamicImage::new_luma8(5, 3)).unwrap();
        assert_eq!(gray.shape(), &[3, 5]);
        let rgb = image_to_array(DynamicImage::new_rgb8(5, 3)).unwrap();
        assert_eq!(rgb.shape(), &[3, 5, 3]);
        let rgba = image_to_array(DynamicImage::new_luma_a8(2, 4)).unwrap();
        assert_eq!(rgba.shape(), &[4, 2, 4]);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_image(Path::new("/nonexistent/roicrop.png")).unwrap_err();
        assert!(matches!(err, Error::ImageLoad { .. }));
        assert!(err.to_string().contains("roicrop.png"));
    }
}
