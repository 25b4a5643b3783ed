use jpeg_encoder::{ColorType, Encoder};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::{Error, Result};

/// Write interleaved 8-bit samples as a baseline JPEG.
///
/// `channels` selects the color type: 1 (luma), 3 (RGB) or 4 (RGBA, alpha is dropped).
pub fn write_jpeg(
    output: &Path,
    rows: usize,
    cols: usize,
    channels: usize,
    data: &[u8],
    quality: u8,
) -> Result<()> {
    let color = match channels {
        1 => ColorType::Luma,
        3 => ColorType::Rgb,
        4 => ColorType::Rgba,
        other => return Err(Error::UnsupportedChannels { channels: other }),
    };
    let (width, height) = match (u16::try_from(cols), u16::try_from(rows)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(Error::Encode(format!(
                "JPEG dimensions {}x{} exceed 65535",
                cols, rows
            )));
        }
    };

    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    let encoder = Encoder::new(&mut writer, quality);
    encoder
        .encode(data, width, height, color)
        .map_err(Error::encode)?;
    Ok(())
}
