use std::path::Path;

use ndarray::ArrayViewD;
use tracing::info;

use crate::error::{Error, Result};
use crate::io::writers::jpeg::write_jpeg;
use crate::io::writers::png::write_png;
use crate::io::writers::tiff::write_tiff_u8;
use crate::types::{OutputFormat, Sample};

pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Resolve the output format: explicit, else from the file extension.
pub fn resolve_format(output: &Path, format: Option<OutputFormat>) -> Result<OutputFormat> {
    if let Some(f) = format {
        return Ok(f);
    }
    output
        .extension()
        .and_then(|e| e.to_str())
        .and_then(OutputFormat::from_extension)
        .ok_or_else(|| Error::InvalidArgument {
            arg: "output",
            value: output.display().to_string(),
        })
}

/// Save an `(H, W)` or `(H, W, C)` buffer, inferring the format from the extension.
///
/// Float samples are clipped to [0, 1] and rescaled to [0, 255]; u16 samples
/// keep their high byte.
pub fn save_image<T: Sample>(image: ArrayViewD<'_, T>, output: &Path) -> Result<()> {
    save_image_as(image, output, None, DEFAULT_JPEG_QUALITY)
}

pub fn save_image_as<T: Sample>(
    image: ArrayViewD<'_, T>,
    output: &Path,
    format: Option<OutputFormat>,
    jpeg_quality: u8,
) -> Result<()> {
    let (rows, cols, channels) = match image.shape() {
        [rows, cols] => (*rows, *cols, 1),
        [rows, cols, channels] => (*rows, *cols, *channels),
        other => return Err(Error::InvalidShape { ndim: other.len() }),
    };
    if !matches!(channels, 1 | 3 | 4) {
        return Err(Error::UnsupportedChannels { channels });
    }
    let format = resolve_format(output, format)?;

    let data: Vec<u8> = image.iter().map(|v| v.to_u8()).collect();

    match format {
        OutputFormat::PNG => write_png(output, rows, cols, channels, &data)?,
        OutputFormat::JPEG => write_jpeg(output, rows, cols, channels, &data, jpeg_quality)?,
        OutputFormat::TIFF => write_tiff_u8(output, rows, cols, channels, &data)?,
    }

    info!(
        "save_image: {}x{}x{} {:?} saved to {:?}",
        rows, cols, channels, format, output
    );
    Ok(())
}
