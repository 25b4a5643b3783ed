use std::path::Path;

use image::{ExtendedColorType, ImageFormat};

use crate::error::{Error, Result};

pub fn write_png(
    output: &Path,
    rows: usize,
    cols: usize,
    channels: usize,
    data: &[u8],
) -> Result<()> {
    let color = match channels {
        1 => ExtendedColorType::L8,
        3 => ExtendedColorType::Rgb8,
        4 => ExtendedColorType::Rgba8,
        other => return Err(Error::UnsupportedChannels { channels: other }),
    };
    image::save_buffer_with_format(
        output,
        data,
        cols as u32,
        rows as u32,
        color,
        ImageFormat::Png,
    )
    .map_err(Error::encode)
}
