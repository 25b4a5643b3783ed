//! Region-of-interest rendering for labeled figures.
//!
//! Draws a colored outline around the ROI and pastes a magnified, framed copy
//! of the ROI interior into one corner of the image.
use ndarray::{Array3, ArrayView3, ArrayViewD, Axis, Ix2, Ix3, s};
use tracing::{debug, info};

use crate::core::params::AnnotationStyle;
use crate::core::processing::padding::add_constant_border;
use crate::core::processing::resize::resize_image;
use crate::error::{Error, Result};
use crate::types::{Corner, RoiRect};

/// Map a rectangle from display coordinates (e.g. a preview widget) into image coordinates.
pub fn scale_rect_to_image(
    rect: RoiRect,
    display: (usize, usize),
    image: (usize, usize),
) -> Result<RoiRect> {
    let (display_rows, display_cols) = display;
    if display_rows == 0 || display_cols == 0 {
        return Err(Error::InvalidArgument {
            arg: "display_size",
            value: format!("{}x{}", display_rows, display_cols),
        });
    }
    let row_scale = image.0 as f64 / display_rows as f64;
    let col_scale = image.1 as f64 / display_cols as f64;
    Ok(RoiRect {
        top: (row_scale * rect.top as f64) as usize,
        left: (col_scale * rect.left as f64) as usize,
        bottom: (row_scale * rect.bottom as f64) as usize,
        right: (col_scale * rect.right as f64) as usize,
    })
}

/// Expand grayscale `(H, W)` / `(H, W, 1)` buffers to RGB; 3- and 4-channel buffers are copied.
pub fn to_color(image: ArrayViewD<'_, u8>) -> Result<Array3<u8>> {
    let ndim = image.ndim();
    let planes = match ndim {
        2 => image
            .into_dimensionality::<Ix2>()
            .map_err(|_| Error::InvalidShape { ndim })?
            .insert_axis(Axis(2)),
        3 => image
            .into_dimensionality::<Ix3>()
            .map_err(|_| Error::InvalidShape { ndim })?,
        _ => return Err(Error::InvalidShape { ndim }),
    };
    let (rows, cols, channels) = planes.dim();
    match channels {
        1 => planes
            .broadcast((rows, cols, 3))
            .map(|b| b.to_owned())
            .ok_or_else(|| Error::Processing("cannot broadcast grayscale to RGB".to_string())),
        3 | 4 => Ok(planes.to_owned()),
        other => Err(Error::UnsupportedChannels { channels: other }),
    }
}

fn paint(out: &mut Array3<u8>, rows: (usize, usize), cols: (usize, usize), color: &[u8; 3]) {
    let channels = out.len_of(Axis(2));
    for ch in 0..channels {
        let value = color.get(ch).copied().unwrap_or(u8::MAX);
        out.slice_mut(s![rows.0..rows.1, cols.0..cols.1, ch]).fill(value);
    }
}

/// Draw `rect` onto an RGB or RGBA image and paste a magnified inset of it.
///
/// Outline bands are `thickness` wide and centered on the rectangle edges,
/// clipped to the image. The inset is the area strictly inside the outline,
/// scaled by `style.scale` and framed with a border of the outline color.
pub fn render_annotation(
    image: ArrayView3<'_, u8>,
    rect: RoiRect,
    style: &AnnotationStyle,
) -> Result<Array3<u8>> {
    style.validate()?;
    let (rows, cols, channels) = image.dim();
    if channels != 3 && channels != 4 {
        return Err(Error::UnsupportedChannels { channels });
    }
    if rect.top > rect.bottom || rect.left > rect.right || rect.bottom > rows || rect.right > cols
    {
        return Err(Error::InvalidArgument {
            arg: "roi",
            value: format!(
                "({}, {})-({}, {}) in {}x{} image",
                rect.top, rect.left, rect.bottom, rect.right, rows, cols
            ),
        });
    }

    let t = style.thickness;
    let (lo, hi) = (t / 2, (t + 1) / 2);
    let pr = [
        rect.top.saturating_sub(lo),
        (rect.top + hi).min(rows),
        rect.bottom.saturating_sub(lo),
        (rect.bottom + hi).min(rows),
    ];
    let pc = [
        rect.left.saturating_sub(lo),
        (rect.left + hi).min(cols),
        rect.right.saturating_sub(lo),
        (rect.right + hi).min(cols),
    ];
    if pr[2] <= pr[1] || pc[2] <= pc[1] {
        return Err(Error::InvalidArgument {
            arg: "roi",
            value: format!("interior is empty with thickness {}", t),
        });
    }

    let mut out = image.to_owned();
    paint(&mut out, (pr[0], pr[1]), (pc[0], pc[3]), &style.color);
    paint(&mut out, (pr[2], pr[3]), (pc[0], pc[3]), &style.color);
    paint(&mut out, (pr[0], pr[3]), (pc[0], pc[1]), &style.color);
    paint(&mut out, (pr[0], pr[3]), (pc[2], pc[3]), &style.color);

    let inner = out.slice(s![pr[1]..pr[2], pc[1]..pc[2], ..]);
    let inset_rows = ((pr[2] - pr[1]) as f32 * style.scale) as usize;
    let inset_cols = ((pc[2] - pc[1]) as f32 * style.scale) as usize;
    let inset = resize_image(inner, inset_rows, inset_cols, style.filter)?;
    let framed = add_constant_border(inset.view(), t, &style.color);

    let (fr, fc, _) = framed.dim();
    if fr > rows || fc > cols {
        return Err(Error::InvalidArgument {
            arg: "scale",
            value: format!("inset {}x{} does not fit in {}x{} image", fr, fc, rows, cols),
        });
    }
    let (r0, c0) = match style.corner {
        Corner::LU => (0, 0),
        Corner::RU => (0, cols - fc),
        Corner::LD => (rows - fr, 0),
        Corner::RD => (rows - fr, cols - fc),
    };
    debug!("Placing {}x{} inset at ({}, {})", fr, fc, r0, c0);
    out.slice_mut(s![r0..r0 + fr, c0..c0 + fc, ..]).assign(&framed);

    info!(
        "Annotated ROI ({}, {})-({}, {}), inset x{:.2} in {} corner",
        rect.top, rect.left, rect.bottom, rect.right, style.scale, style.corner
    );
    Ok(out)
}
