use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tiff::encoder::{TiffEncoder, colortype};

use crate::error::{Error, Result};

/// Write interleaved 8-bit samples as an uncompressed TIFF (gray, RGB or RGBA).
pub fn write_tiff_u8(
    output: &Path,
    rows: usize,
    cols: usize,
    channels: usize,
    data: &[u8],
) -> Result<()> {
    let file = File::create(output)?;
    let mut encoder = TiffEncoder::new(BufWriter::new(file)).map_err(Error::encode)?;
    let (width, height) = (cols as u32, rows as u32);
    match channels {
        1 => encoder.write_image::<colortype::Gray8>(width, height, data),
        3 => encoder.write_image::<colortype::RGB8>(width, height, data),
        4 => encoder.write_image::<colortype::RGBA8>(width, height, data),
        other => return Err(Error::UnsupportedChannels { channels: other }),
    }
    .map_err(Error::encode)
}
