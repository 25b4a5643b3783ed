use ndarray::{Array3, ArrayView3, s};
use tracing::debug;

/// Surround an `(H, W, C)` image with a `border`-wide frame of constant color.
///
/// `fill` supplies one value per channel; channels beyond its length are
/// filled with the maximum sample value (opaque alpha).
pub fn add_constant_border(image: ArrayView3<'_, u8>, border: usize, fill: &[u8]) -> Array3<u8> {
    let (rows, cols, channels) = image.dim();
    let out_rows = rows + 2 * border;
    let out_cols = cols + 2 * border;

    debug!(
        "Adding border: rows={}, cols={}, border={}, final={}x{}",
        rows, cols, border, out_rows, out_cols
    );

    let mut padded = Array3::<u8>::zeros((out_rows, out_cols, channels));
    for ch in 0..channels {
        let value = fill.get(ch).copied().unwrap_or(u8::MAX);
        padded.slice_mut(s![.., .., ch]).fill(value);
    }
    padded
        .slice_mut(s![border..border + rows, border..border + cols, ..])
        .assign(&image);
    padded
}
