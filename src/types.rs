//! Shared types and enums used across roicrop.
//! Includes `TargetSize`, `ResizeFilter`, `OutputFormat`, `Corner`, `RoiShape`
//! and the `Sample` trait implemented by the supported pixel sample types.
use std::str::FromStr;

use clap::ValueEnum;
use fast_image_resize::{FilterType, PixelType, ResizeAlg};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Requested output size of a crop, as (height, width).
///
/// A bare integer means a square target. In JSON this is either `512` or
/// `[400, 200]`; on the command line either `512` or `400x200`.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetSize {
    Square(usize),
    Rect(usize, usize),
}

impl TargetSize {
    /// Resolved (height, width).
    pub fn dims(self) -> (usize, usize) {
        match self {
            TargetSize::Square(n) => (n, n),
            TargetSize::Rect(h, w) => (h, w),
        }
    }

    /// Resolved (height, width), rejecting zero components.
    pub fn validated(self) -> Result<(usize, usize), Error> {
        let (h, w) = self.dims();
        if h == 0 || w == 0 {
            return Err(Error::ZeroSize { size: h.min(w) });
        }
        Ok((h, w))
    }
}

impl From<usize> for TargetSize {
    fn from(n: usize) -> Self {
        TargetSize::Square(n)
    }
}

impl From<(usize, usize)> for TargetSize {
    fn from((h, w): (usize, usize)) -> Self {
        TargetSize::Rect(h, w)
    }
}

impl FromStr for TargetSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidArgument {
            arg: "size",
            value: s.to_string(),
        };
        let s_trim = s.trim();
        match s_trim.split_once(['x', 'X']) {
            Some((h, w)) => {
                let h = h.trim().parse::<usize>().map_err(|_| invalid())?;
                let w = w.trim().parse::<usize>().map_err(|_| invalid())?;
                Ok(TargetSize::Rect(h, w))
            }
            None => s_trim
                .parse::<usize>()
                .map(TargetSize::Square)
                .map_err(|_| invalid()),
        }
    }
}

impl std::fmt::Display for TargetSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetSize::Square(n) => write!(f, "{}", n),
            TargetSize::Rect(h, w) => write!(f, "{}x{}", h, w),
        }
    }
}

#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
pub enum ResizeFilter {
    Nearest,
    Bilinear,
    CatmullRom,
    #[default]
    Lanczos3,
}

impl ResizeFilter {
    pub fn algorithm(self) -> ResizeAlg {
        match self {
            ResizeFilter::Nearest => ResizeAlg::Nearest,
            ResizeFilter::Bilinear => ResizeAlg::Convolution(FilterType::Bilinear),
            ResizeFilter::CatmullRom => ResizeAlg::Convolution(FilterType::CatmullRom),
            ResizeFilter::Lanczos3 => ResizeAlg::Convolution(FilterType::Lanczos3),
        }
    }
}

impl std::fmt::Display for ResizeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResizeFilter::Nearest => write!(f, "Nearest"),
            ResizeFilter::Bilinear => write!(f, "Bilinear"),
            ResizeFilter::CatmullRom => write!(f, "CatmullRom"),
            ResizeFilter::Lanczos3 => write!(f, "Lanczos3"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
pub enum OutputFormat {
    PNG,
    JPEG, // Lossy
    TIFF,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::PNG => "png",
            OutputFormat::JPEG => "jpg",
            OutputFormat::TIFF => "tiff",
        }
    }

    /// Infer the format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(OutputFormat::PNG),
            "jpg" | "jpeg" => Some(OutputFormat::JPEG),
            "tif" | "tiff" => Some(OutputFormat::TIFF),
            _ => None,
        }
    }
}

/// Image corner the magnified ROI inset is pasted into.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
pub enum Corner {
    /// Left-upper
    #[value(name = "lu")]
    LU,
    /// Right-upper
    #[value(name = "ru")]
    RU,
    /// Left-lower
    #[default]
    #[value(name = "ld")]
    LD,
    /// Right-lower
    #[value(name = "rd")]
    RD,
}

impl std::fmt::Display for Corner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Corner::LU => "LU",
            Corner::RU => "RU",
            Corner::LD => "LD",
            Corner::RD => "RD",
        };
        write!(f, "{}", s)
    }
}

/// A pixel position as (row, col).
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl FromStr for Point {
    type Err = Error;

    /// Parses `ROW,COL`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidArgument {
            arg: "point",
            value: s.to_string(),
        };
        let (row, col) = s.split_once(',').ok_or_else(invalid)?;
        let row = row.trim().parse::<usize>().map_err(|_| invalid())?;
        let col = col.trim().parse::<usize>().map_err(|_| invalid())?;
        Ok(Point { row, col })
    }
}

/// Region of interest; `top <= bottom` and `left <= right`.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct RoiRect {
    pub top: usize,
    pub left: usize,
    pub bottom: usize,
    pub right: usize,
}

impl RoiRect {
    /// Rectangle spanned by two corners given in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            top: a.row.min(b.row),
            left: a.col.min(b.col),
            bottom: a.row.max(b.row),
            right: a.col.max(b.col),
        }
    }

    pub fn height(&self) -> usize {
        self.bottom - self.top
    }

    pub fn width(&self) -> usize {
        self.right - self.left
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum RoiShape {
    Rectangle,
    Square,
}

/// Pixel sample types the crop and resampling code can carry.
///
/// Samples travel through `fast_image_resize` as native-endian bytes of a
/// single-channel image of `PIXEL_TYPE`.
pub trait Sample: Copy + Default + Send + Sync + 'static {
    const PIXEL_TYPE: PixelType;
    const SIZE: usize;

    fn extend_ne_bytes(self, out: &mut Vec<u8>);
    fn from_ne_slice(bytes: &[u8]) -> Self;
    /// Convert to an 8-bit sample for encoding.
    fn to_u8(self) -> u8;
}

impl Sample for u8 {
    const PIXEL_TYPE: PixelType = PixelType::U8;
    const SIZE: usize = 1;

    fn extend_ne_bytes(self, out: &mut Vec<u8>) {
        out.push(self);
    }

    fn from_ne_slice(bytes: &[u8]) -> Self {
        bytes[0]
    }

    fn to_u8(self) -> u8 {
        self
    }
}

impl Sample for u16 {
    const PIXEL_TYPE: PixelType = PixelType::U16;
    const SIZE: usize = 2;

    fn extend_ne_bytes(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_ne_bytes());
    }

    fn from_ne_slice(bytes: &[u8]) -> Self {
        u16::from_ne_bytes([bytes[0], bytes[1]])
    }

    fn to_u8(self) -> u8 {
        (self >> 8) as u8
    }
}

impl Sample for f32 {
    const PIXEL_TYPE: PixelType = PixelType::F32;
    const SIZE: usize = 4;

    fn extend_ne_bytes(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_ne_bytes());
    }

    fn from_ne_slice(bytes: &[u8]) -> Self {
        f32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    // Clip to [0, 1] then rescale; NaN maps to 0.
    fn to_u8(self) -> u8 {
        (self.clamp(0.0, 1.0) * 255.0) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_square_and_rect_sizes() {
        assert_eq!("512".parse::<TargetSize>().unwrap(), TargetSize::Square(512));
        assert_eq!("400x200".parse::<TargetSize>().unwrap(), TargetSize::Rect(400, 200));
        assert_eq!(" 3 X 4 ".parse::<TargetSize>().unwrap(), TargetSize::Rect(3, 4));
        assert!("abc".parse::<TargetSize>().is_err());
        assert!("10x".parse::<TargetSize>().is_err());
    }

    #[test]
    fn square_shorthand_matches_pair() {
        assert_eq!(TargetSize::from(7).dims(), TargetSize::from((7, 7)).dims());
    }

    #[test]
    fn zero_target_is_rejected() {
        assert!(matches!(
            TargetSize::Rect(0, 5).validated(),
            Err(Error::ZeroSize { size: 0 })
        ));
        assert_eq!(TargetSize::Square(3).validated().unwrap(), (3, 3));
    }

    #[test]
    fn target_size_json_forms() {
        let sq: TargetSize = serde_json::from_str("256").unwrap();
        let rect: TargetSize = serde_json::from_str("[400, 200]").unwrap();
        assert_eq!(sq, TargetSize::Square(256));
        assert_eq!(rect, TargetSize::Rect(400, 200));
    }

    #[test]
    fn float_samples_are_clipped() {
        assert_eq!((-0.5f32).to_u8(), 0);
        assert_eq!(1.5f32.to_u8(), 255);
        assert_eq!(0.5f32.to_u8(), 127);
        assert_eq!(f32::NAN.to_u8(), 0);
        assert_eq!(0xABCDu16.to_u8(), 0xAB);
    }

    #[test]
    fn rect_from_corners_is_normalized() {
        let r = RoiRect::from_corners(Point::new(10, 2), Point::new(4, 8));
        assert_eq!((r.top, r.left, r.bottom, r.right), (4, 2, 10, 8));
        assert_eq!((r.height(), r.width()), (6, 6));
        assert_eq!("3, 4".parse::<Point>().unwrap(), Point::new(3, 4));
        assert!("3".parse::<Point>().is_err());
    }

    #[test]
    fn output_format_from_extension() {
        assert_eq!(OutputFormat::from_extension("JPEG"), Some(OutputFormat::JPEG));
        assert_eq!(OutputFormat::from_extension("tif"), Some(OutputFormat::TIFF));
        assert_eq!(OutputFormat::from_extension("bmp"), None);
    }
}
