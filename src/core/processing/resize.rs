use fast_image_resize::{ResizeOptions, Resizer, images::Image};
use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{ResizeFilter, Sample};

/// Scaled dimensions for an aspect-preserving resize that covers `target`.
///
/// `ratio = max(target_h / rows, target_w / cols)`; each side is scaled and
/// truncated with a small bias so an exact ratio is not rounded down, then
/// clamped up to the target so the crop that follows never sees an
/// undersized image.
pub fn calculate_cover_dimensions(
    rows: usize,
    cols: usize,
    target_rows: usize,
    target_cols: usize,
) -> (f64, usize, usize) {
    let ratio_rows = target_rows as f64 / rows as f64;
    let ratio_cols = target_cols as f64 / cols as f64;
    let ratio = ratio_rows.max(ratio_cols);

    let new_rows = (rows as f64 * ratio + 0.01) as usize;
    let new_cols = (cols as f64 * ratio + 0.01) as usize;

    (ratio, new_rows.max(target_rows), new_cols.max(target_cols))
}

/// Resample a single channel plane to `(target_rows, target_cols)`.
pub fn resize_plane<T: Sample>(
    plane: ArrayView2<'_, T>,
    target_rows: usize,
    target_cols: usize,
    filter: ResizeFilter,
) -> Result<Array2<T>> {
    let (rows, cols) = plane.dim();
    if rows == 0 || cols == 0 || target_rows == 0 || target_cols == 0 {
        return Err(Error::Resize(format!(
            "cannot resample {}x{} to {}x{}",
            rows, cols, target_rows, target_cols
        )));
    }

    let resize_options = ResizeOptions::new().resize_alg(filter.algorithm());
    let mut resizer = Resizer::new();

    // Logical iteration order is row-major regardless of the view's strides
    let mut src_bytes = Vec::with_capacity(rows * cols * T::SIZE);
    for &v in plane.iter() {
        v.extend_ne_bytes(&mut src_bytes);
    }

    let src_image = Image::from_vec_u8(cols as u32, rows as u32, src_bytes, T::PIXEL_TYPE)
        .map_err(Error::resize)?;
    let mut dst_image = Image::new(target_cols as u32, target_rows as u32, T::PIXEL_TYPE);
    resizer
        .resize(&src_image, &mut dst_image, &resize_options)
        .map_err(Error::resize)?;

    let dst_bytes = dst_image.into_vec();
    let values: Vec<T> = dst_bytes.chunks_exact(T::SIZE).map(T::from_ne_slice).collect();
    Array2::from_shape_vec((target_rows, target_cols), values).map_err(Error::resize)
}

/// Resample an `(H, W, C)` buffer channel by channel.
///
/// The channel count is opaque: every plane goes through the resizer as a
/// single-channel image, so any number of channels is accepted.
pub fn resize_image<T: Sample>(
    image: ArrayView3<'_, T>,
    target_rows: usize,
    target_cols: usize,
    filter: ResizeFilter,
) -> Result<Array3<T>> {
    let (rows, cols, channels) = image.dim();
    if (rows, cols) == (target_rows, target_cols) {
        debug!("Resize skipped, already {}x{}", rows, cols);
        return Ok(image.to_owned());
    }

    debug!(
        "Resampling {}x{}x{} -> {}x{} ({})",
        rows, cols, channels, target_rows, target_cols, filter
    );

    let mut out = Array3::<T>::default((target_rows, target_cols, channels));
    for (c, plane) in image.axis_iter(Axis(2)).enumerate() {
        let resized = resize_plane(plane, target_rows, target_cols, filter)?;
        out.index_axis_mut(Axis(2), c).assign(&resized);
    }
    Ok(out)
}
