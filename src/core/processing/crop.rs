use ndarray::parallel::prelude::*;
use ndarray::{Array3, Array4, ArrayD, ArrayView3, ArrayView4, ArrayViewD, Axis, Ix2, Ix3, s};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::processing::resize::{calculate_cover_dimensions, resize_image};
use crate::error::{Error, Result};
use crate::types::{ResizeFilter, Sample, TargetSize};

/// Options for a center crop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropOptions {
    /// Scale the image to cover the target before cropping
    pub resize: bool,
    pub filter: ResizeFilter,
}

impl Default for CropOptions {
    fn default() -> Self {
        Self {
            resize: true,
            filter: ResizeFilter::Lanczos3,
        }
    }
}

/// Resolved geometry of a single center crop. All pairs are (rows, cols).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropPlan {
    pub source: (usize, usize),
    /// Scale ratio applied before cropping; None when resizing was disabled
    pub ratio: Option<f64>,
    pub resized: (usize, usize),
    pub offset: (usize, usize),
    pub target: (usize, usize),
}

/// Spatial (rows, cols) of an `(H, W)` or `(H, W, C)` buffer.
pub fn image_dims<T>(image: &ArrayViewD<'_, T>) -> Result<(usize, usize)> {
    match image.shape() {
        [rows, cols] | [rows, cols, _] => Ok((*rows, *cols)),
        other => Err(Error::InvalidShape { ndim: other.len() }),
    }
}

/// Compute the crop geometry for a `rows x cols` source without touching samples.
pub fn plan_center_crop(
    rows: usize,
    cols: usize,
    target: TargetSize,
    resize: bool,
) -> Result<CropPlan> {
    let (target_rows, target_cols) = target.validated()?;

    let (ratio, resized) = if resize {
        if rows == 0 || cols == 0 {
            return Err(Error::EmptyImage {
                height: rows,
                width: cols,
            });
        }
        let (ratio, new_rows, new_cols) =
            calculate_cover_dimensions(rows, cols, target_rows, target_cols);
        (Some(ratio), (new_rows, new_cols))
    } else {
        (None, (rows, cols))
    };

    let offset = center_offset(resized, (target_rows, target_cols))?;

    Ok(CropPlan {
        source: (rows, cols),
        ratio,
        resized,
        offset,
        target: (target_rows, target_cols),
    })
}

fn center_offset(current: (usize, usize), target: (usize, usize)) -> Result<(usize, usize)> {
    let ((rows, cols), (target_rows, target_cols)) = (current, target);
    if rows < target_rows || cols < target_cols {
        return Err(Error::TargetTooLarge {
            height: rows,
            width: cols,
            target_height: target_rows,
            target_width: target_cols,
        });
    }
    Ok(((rows - target_rows) / 2, (cols - target_cols) / 2))
}

/// Crop the center of an `(H, W)` or `(H, W, C)` image.
///
/// With `resize` the image is first scaled, preserving aspect ratio, so that
/// both sides cover the target. The result has the input's dimensionality
/// and channel count and never aliases the input.
///
/// # Errors
///
/// - `InvalidShape` if the buffer is not 2-D or 3-D
/// - `TargetTooLarge` if the (possibly resized) image is smaller than the target
/// - `ZeroSize` for a zero target component, `EmptyImage` when resizing an empty image
pub fn crop_center<T: Sample>(
    image: &ArrayD<T>,
    target: impl Into<TargetSize>,
    resize: bool,
) -> Result<ArrayD<T>> {
    let options = CropOptions {
        resize,
        ..CropOptions::default()
    };
    crop_center_with(image.view(), target.into(), &options)
}

pub fn crop_center_with<T: Sample>(
    image: ArrayViewD<'_, T>,
    target: TargetSize,
    options: &CropOptions,
) -> Result<ArrayD<T>> {
    crop_center_planned(image, target, options).map(|(cropped, _)| cropped)
}

/// Like [`crop_center_with`], also returning the geometry that was applied.
///
/// `resized` and `offset` in the returned plan are measured on the resampled
/// buffer, so they describe the crop actually taken.
pub fn crop_center_planned<T: Sample>(
    image: ArrayViewD<'_, T>,
    target: TargetSize,
    options: &CropOptions,
) -> Result<(ArrayD<T>, CropPlan)> {
    let ndim = image.ndim();
    let (rows, cols) = image_dims(&image)?;
    let mut plan = plan_center_crop(rows, cols, target, options.resize)?;

    // Treat grayscale as a single-channel image and drop the axis again at the end
    let planes: ArrayView3<'_, T> = match ndim {
        2 => image
            .into_dimensionality::<Ix2>()
            .map_err(|_| Error::InvalidShape { ndim })?
            .insert_axis(Axis(2)),
        _ => image
            .into_dimensionality::<Ix3>()
            .map_err(|_| Error::InvalidShape { ndim })?,
    };

    let resized: Option<Array3<T>> = if options.resize {
        let (new_rows, new_cols) = plan.resized;
        Some(resize_image(planes.view(), new_rows, new_cols, options.filter)?)
    } else {
        None
    };
    let source = match &resized {
        Some(r) => r.view(),
        None => planes.view(),
    };

    // Re-measure after resampling; this check is the authoritative one
    let (cur_rows, cur_cols, _) = source.dim();
    let (target_rows, target_cols) = plan.target;
    let (start_row, start_col) = center_offset((cur_rows, cur_cols), plan.target)?;
    plan.resized = (cur_rows, cur_cols);
    plan.offset = (start_row, start_col);

    debug!(
        "Center crop {}x{} -> {}x{} at ({}, {})",
        cur_rows, cur_cols, target_rows, target_cols, start_row, start_col
    );

    let cropped = source
        .slice(s![
            start_row..start_row + target_rows,
            start_col..start_col + target_cols,
            ..
        ])
        .to_owned();

    let cropped = if ndim == 2 {
        cropped.index_axis_move(Axis(2), 0).into_dyn()
    } else {
        cropped.into_dyn()
    };
    Ok((cropped, plan))
}

/// Crop every image of a sequence; the first failure aborts the whole batch.
pub fn crop_center_batch<T: Sample>(
    images: &[ArrayD<T>],
    target: impl Into<TargetSize>,
    options: &CropOptions,
) -> Result<Vec<ArrayD<T>>> {
    let target = target.into();
    images
        .par_iter()
        .map(|img| crop_center_with(img.view(), target, options))
        .collect()
}

/// Crop an `(N, H, W, C)` stack image by image and restack the results.
pub fn crop_center_stack<T: Sample>(
    stack: ArrayView4<'_, T>,
    target: impl Into<TargetSize>,
    options: &CropOptions,
) -> Result<Array4<T>> {
    let target = target.into();
    let (target_rows, target_cols) = target.validated()?;
    let channels = stack.len_of(Axis(3));

    let crops = stack
        .outer_iter()
        .map(|img| {
            crop_center_with(img.into_dyn(), target, options)?
                .into_dimensionality::<Ix3>()
                .map_err(|e| Error::Processing(e.to_string()))
        })
        .collect::<Result<Vec<Array3<T>>>>()?;

    if crops.is_empty() {
        return Ok(Array4::default((0, target_rows, target_cols, channels)));
    }
    let views: Vec<ArrayView3<'_, T>> = crops.iter().map(|c| c.view()).collect();
    ndarray::stack(Axis(0), &views).map_err(|e| Error::Processing(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, IxDyn};

    fn gradient2(rows: usize, cols: usize) -> ArrayD<u16> {
        Array2::from_shape_fn((rows, cols), |(r, c)| (r * 1000 + c) as u16).into_dyn()
    }

    #[test]
    fn crop_without_resize_is_centered() {
        let img = gradient2(10, 9);
        let out = crop_center(&img, (4, 3), false).unwrap();
        assert_eq!(out.shape(), &[4, 3]);
        // offsets (3, 3)
        assert_eq!(out[[0, 0]], 3003);
        assert_eq!(out[[3, 2]], 6005);
    }

    #[test]
    fn crop_keeps_channels() {
        let img = Array3::<u8>::from_shape_fn((7, 8, 4), |(r, c, ch)| (r * 16 + c + ch * 100) as u8)
            .into_dyn();
        let out = crop_center(&img, 4, false).unwrap();
        assert_eq!(out.shape(), &[4, 4, 4]);
        // offsets (1, 2)
        for ch in 0..4 {
            assert_eq!(out[[0, 0, ch]], (16 + 2 + ch * 100) as u8);
        }
    }

    #[test]
    fn exact_size_is_identity() {
        let img = gradient2(5, 6);
        let out = crop_center(&img, (5, 6), false).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn square_shorthand_equals_pair() {
        let img = gradient2(12, 9);
        let a = crop_center(&img, 6, false).unwrap();
        let b = crop_center(&img, (6, 6), false).unwrap();
        assert_eq!(a, b);
        let a = crop_center(&img, 6, true).unwrap();
        let b = crop_center(&img, (6, 6), true).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_bad_dimensionality() {
        let one = ArrayD::<u8>::zeros(IxDyn(&[10]));
        let four = ArrayD::<u8>::zeros(IxDyn(&[2, 4, 4, 3]));
        assert!(matches!(
            crop_center(&one, 2, true),
            Err(Error::InvalidShape { ndim: 1 })
        ));
        assert!(matches!(
            crop_center(&four, 2, false),
            Err(Error::InvalidShape { ndim: 4 })
        ));
    }

    #[test]
    fn too_small_without_resize() {
        let img = ArrayD::<u8>::zeros(IxDyn(&[100, 100]));
        match crop_center(&img, 200, false) {
            Err(Error::TargetTooLarge {
                height,
                width,
                target_height,
                target_width,
            }) => {
                assert_eq!((height, width), (100, 100));
                assert_eq!((target_height, target_width), (200, 200));
            }
            other => panic!("unexpected result: {:?}", other.map(|a| a.shape().to_vec())),
        }
    }

    #[test]
    fn error_message_mentions_both_shapes() {
        let img = ArrayD::<u8>::zeros(IxDyn(&[100, 100]));
        let msg = crop_center(&img, 200, false).unwrap_err().to_string();
        assert!(msg.contains("(100, 100)"));
        assert!(msg.contains("(200, 200)"));
    }

    #[test]
    fn downscale_then_crop_grayscale() {
        let img = ArrayD::<u8>::from_elem(IxDyn(&[800, 712]), 40);
        let out = crop_center(&img, 512, true).unwrap();
        assert_eq!(out.shape(), &[512, 512]);
    }

    #[test]
    fn upscale_then_crop_color() {
        let img = ArrayD::<u8>::from_elem(IxDyn(&[300, 300, 3]), 200);
        let out = crop_center(&img, (400, 200), true).unwrap();
        assert_eq!(out.shape(), &[400, 200, 3]);
    }

    #[test]
    fn plan_matches_scenarios() {
        let plan = plan_center_crop(300, 300, TargetSize::Rect(400, 200), true).unwrap();
        assert_eq!(plan.resized, (400, 400));
        assert_eq!(plan.offset, (0, 100));
        let ratio = plan.ratio.unwrap();
        assert!((ratio - 4.0 / 3.0).abs() < 1e-12);

        let plan = plan_center_crop(800, 712, TargetSize::Square(512), true).unwrap();
        assert_eq!(plan.resized, (575, 512));
        assert_eq!(plan.offset, (31, 0));

        let plan = plan_center_crop(10, 9, TargetSize::Rect(4, 3), false).unwrap();
        assert_eq!(plan.ratio, None);
        assert_eq!(plan.offset, (3, 3));
    }

    #[test]
    fn resize_never_reports_too_large() {
        for rows in [1usize, 3, 17, 33, 64] {
            for cols in [1usize, 5, 19, 40] {
                for target in [TargetSize::Square(9), TargetSize::Rect(31, 4), TargetSize::Rect(2, 50)] {
                    let img = ArrayD::<f32>::from_elem(IxDyn(&[rows, cols]), 0.5);
                    let out = crop_center_with(
                        img.view(),
                        target,
                        &CropOptions {
                            resize: true,
                            filter: ResizeFilter::Bilinear,
                        },
                    )
                    .unwrap();
                    let (th, tw) = target.dims();
                    assert_eq!(out.shape(), &[th, tw]);
                }
            }
        }
    }

    #[test]
    fn empty_image_with_resize() {
        let img = ArrayD::<u8>::zeros(IxDyn(&[0, 4]));
        assert!(matches!(
            crop_center(&img, 2, true),
            Err(Error::EmptyImage { height: 0, width: 4 })
        ));
    }

    #[test]
    fn zero_target_rejected() {
        let img = gradient2(4, 4);
        assert!(matches!(crop_center(&img, (0, 2), false), Err(Error::ZeroSize { .. })));
    }

    #[test]
    fn input_is_not_mutated() {
        let img = gradient2(6, 6);
        let before = img.clone();
        let mut out = crop_center(&img, 2, false).unwrap();
        out.fill(0);
        assert_eq!(img, before);
    }

    #[test]
    fn batch_matches_single() {
        let images = vec![gradient2(10, 12), gradient2(7, 7), gradient2(30, 5)];
        let options = CropOptions::default();
        let batch = crop_center_batch(&images, 4, &options).unwrap();
        for (img, got) in images.iter().zip(&batch) {
            let single = crop_center_with(img.view(), TargetSize::Square(4), &options).unwrap();
            assert_eq!(&single, got);
        }
    }

    #[test]
    fn batch_propagates_errors() {
        let images = vec![gradient2(10, 10), gradient2(2, 2)];
        let options = CropOptions {
            resize: false,
            ..CropOptions::default()
        };
        assert!(matches!(
            crop_center_batch(&images, 5, &options),
            Err(Error::TargetTooLarge { .. })
        ));
    }

    #[test]
    fn stack_crops_each_image() {
        let stack = Array4::<u8>::from_shape_fn((3, 6, 8, 2), |(n, r, c, ch)| {
            (n * 50 + r * 8 + c + ch) as u8
        });
        let options = CropOptions {
            resize: false,
            ..CropOptions::default()
        };
        let out = crop_center_stack(stack.view(), (2, 4), &options).unwrap();
        assert_eq!(out.dim(), (3, 2, 4, 2));
        // offsets (2, 2)
        assert_eq!(out[[1, 0, 0, 1]], (50 + 2 * 8 + 2 + 1) as u8);
    }

    #[test]
    fn empty_stack() {
        let stack = Array4::<u8>::zeros((0, 6, 8, 3));
        let out = crop_center_stack(stack.view(), 4, &CropOptions::default()).unwrap();
        assert_eq!(out.dim(), (0, 4, 4, 3));
    }

    #[test]
    fn planned_crop_reports_applied_geometry() {
        let img = Array2::<u8>::from_shape_fn((800, 712), |(r, c)| ((r + c) % 251) as u8).into_dyn();
        let (out, plan) =
            crop_center_planned(img.view(), TargetSize::Square(512), &CropOptions::default()).unwrap();
        assert_eq!(out.shape(), &[512, 512]);
        assert_eq!(plan.source, (800, 712));
        assert_eq!(plan.resized, (575, 512));
        assert_eq!(plan.offset, (31, 0));
        assert_eq!(plan.target, (512, 512));
        assert_eq!(out, crop_center(&img, 512, true).unwrap());
    }

    #[test]
    fn crop_of_transposed_view() {
        let img = gradient2(20, 30);
        let transposed = img.t().into_dyn();
        let out = crop_center_with(
            transposed,
            TargetSize::Rect(10, 4),
            &CropOptions {
                resize: false,
                ..CropOptions::default()
            },
        )
        .unwrap();
        assert_eq!(out.shape(), &[10, 4]);
        // transposed is 30x20, offsets (10, 8): element (0, 0) is img[8, 10]
        assert_eq!(out[[0, 0]], 8010);
    }

    #[test]
    fn stack_with_resize() {
        let stack = Array4::<f32>::from_elem((2, 40, 30, 3), 0.3);
        let out = crop_center_stack(stack.view(), (9, 12), &CropOptions::default()).unwrap();
        assert_eq!(out.dim(), (2, 9, 12, 3));
        assert!(out.iter().all(|v| (v - 0.3).abs() < 1e-3));
    }
}
