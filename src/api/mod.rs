//! High-level, ergonomic library API: crop or annotate image files straight to
//! output paths, and batch-crop whole directories. Prefer these entrypoints
//! over the low-level processing modules when integrating roicrop.
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::core::params::{AnnotationStyle, CropParams};
use crate::core::processing::annotate::{render_annotation, scale_rect_to_image, to_color};
use crate::core::processing::crop::{CropPlan, crop_center_planned};
use crate::core::processing::save::{DEFAULT_JPEG_QUALITY, save_image_as};
use crate::error::Result;
use crate::io::{load_image, write_crop_sidecar};
use crate::types::{OutputFormat, RoiRect};

/// Outcome of a directory run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Whether `path` has an extension the loader understands.
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(OutputFormat::from_extension)
        .is_some()
}

/// Load `input`, center-crop it per `params` and save to `output`.
pub fn crop_file_to_path(input: &Path, output: &Path, params: &CropParams) -> Result<CropPlan> {
    params.validate()?;
    let image = load_image(input)?;
    let (cropped, plan) = crop_center_planned(image.view(), params.size, &params.crop_options())?;
    save_image_as(cropped.view(), output, params.format, params.jpeg_quality)?;

    if params.sidecar {
        write_crop_sidecar(output, &plan, Some(input))?;
    }
    info!(
        "Cropped {:?} ({}x{}) -> {:?} ({}x{})",
        input, plan.source.0, plan.source.1, output, plan.target.0, plan.target.1
    );
    Ok(plan)
}

/// Output path for `input` inside `output_dir`: same stem, extension of the
/// requested format or else of the input.
pub fn batch_output_path(input: &Path, output_dir: &Path, format: Option<OutputFormat>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let ext = match format {
        Some(f) => f.extension().to_string(),
        None => input
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_else(|| OutputFormat::PNG.extension().to_string()),
    };
    output_dir.join(format!("{}.{}", stem, ext))
}

/// Crop every image file directly inside `input_dir` into `output_dir`.
///
/// Non-image entries are skipped. With `continue_on_error` failures are
/// logged and counted; otherwise the first failure is returned.
pub fn crop_directory_to_path(
    input_dir: &Path,
    output_dir: &Path,
    params: &CropParams,
    continue_on_error: bool,
) -> Result<BatchReport> {
    params.validate()?;
    fs::create_dir_all(output_dir)?;

    info!("Starting batch crop from directory: {:?}", input_dir);
    info!("Output directory: {:?}", output_dir);

    let mut entries = fs::read_dir(input_dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<PathBuf>>>()?;
    entries.sort();

    let mut report = BatchReport::default();
    for path in entries {
        if !path.is_file() || !is_image_path(&path) {
            info!("Skipping non-image entry: {:?}", path);
            report.skipped += 1;
            continue;
        }

        let output_path = batch_output_path(&path, output_dir, params.format);
        match crop_file_to_path(&path, &output_path, params) {
            Ok(_) => report.processed += 1,
            Err(e) if continue_on_error => {
                warn!("Error processing {:?}: {}", path, e);
                report.errors += 1;
            }
            Err(e) => return Err(e),
        }
    }

    info!("Batch crop complete!");
    info!("Processed: {}", report.processed);
    info!("Skipped: {}", report.skipped);
    info!("Errors: {}", report.errors);
    Ok(report)
}

/// Draw an ROI outline and magnified inset onto `input` and save to `output`.
///
/// When `display_size` is given, `rect` is in those (rows, cols) coordinates
/// and is mapped onto the image first. Grayscale input is converted to RGB.
pub fn annotate_file_to_path(
    input: &Path,
    output: &Path,
    rect: RoiRect,
    display_size: Option<(usize, usize)>,
    style: &AnnotationStyle,
    format: Option<OutputFormat>,
) -> Result<RoiRect> {
    let image = to_color(load_image(input)?.view())?;
    let (rows, cols, _) = image.dim();
    let rect = match display_size {
        Some(display) => scale_rect_to_image(rect, display, (rows, cols))?,
        None => rect,
    };

    let annotated = render_annotation(image.view(), rect, style)?;
    save_image_as(annotated.into_dyn().view(), output, format, DEFAULT_JPEG_QUALITY)?;
    Ok(rect)
}
