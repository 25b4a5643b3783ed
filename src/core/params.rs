use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::processing::crop::CropOptions;
use crate::error::{Error, Result};
use crate::types::{Corner, OutputFormat, ResizeFilter, TargetSize};

/// Crop parameters suitable for config files and presets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropParams {
    /// Output size; a single integer for a square crop
    pub size: TargetSize,
    /// Scale to cover the target before cropping
    pub resize: bool,
    pub filter: ResizeFilter,
    /// None means infer from the output extension
    pub format: Option<OutputFormat>,
    pub jpeg_quality: u8,
    /// Write a JSON sidecar with the crop geometry next to each output
    pub sidecar: bool,
}

impl Default for CropParams {
    fn default() -> Self {
        Self {
            size: TargetSize::Square(256),
            resize: true,
            filter: ResizeFilter::Lanczos3,
            format: None,
            jpeg_quality: 95,
            sidecar: false,
        }
    }
}

impl CropParams {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let params: CropParams = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        self.size.validated()?;
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(Error::InvalidArgument {
                arg: "jpeg_quality",
                value: self.jpeg_quality.to_string(),
            });
        }
        Ok(())
    }

    pub fn crop_options(&self) -> CropOptions {
        CropOptions {
            resize: self.resize,
            filter: self.filter,
        }
    }
}

/// How a region of interest is drawn onto the photograph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationStyle {
    /// Outline and inset border color (RGB)
    pub color: [u8; 3],
    /// Outline width in pixels, 1..=20
    pub thickness: usize,
    /// Magnification of the inset, 1.0..=5.0
    pub scale: f32,
    pub corner: Corner,
    pub filter: ResizeFilter,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            color: [255, 0, 0],
            thickness: 5,
            scale: 1.0,
            corner: Corner::LD,
            filter: ResizeFilter::CatmullRom,
        }
    }
}

impl AnnotationStyle {
    pub fn validate(&self) -> Result<()> {
        if !(1..=20).contains(&self.thickness) {
            return Err(Error::InvalidArgument {
                arg: "thickness",
                value: self.thickness.to_string(),
            });
        }
        if !(1.0..=5.0).contains(&self.scale) {
            return Err(Error::InvalidArgument {
                arg: "scale",
                value: self.scale.to_string(),
            });
        }
        Ok(())
    }
}

/// Parse an `RRGGBB` hex color, with or without a leading `#`.
pub fn parse_hex_color(s: &str) -> Result<[u8; 3]> {
    let invalid = || Error::InvalidArgument {
        arg: "color",
        value: s.to_string(),
    };
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_from_partial_json() {
        let params: CropParams = serde_json::from_str(r#"{"size": [400, 200], "resize": false}"#).unwrap();
        assert_eq!(params.size, TargetSize::Rect(400, 200));
        assert!(!params.resize);
        assert_eq!(params.jpeg_quality, 95);
        assert_eq!(params.filter, ResizeFilter::Lanczos3);
    }

    #[test]
    fn params_round_trip_through_json() {
        let params = CropParams {
            size: TargetSize::Square(128),
            format: Some(OutputFormat::JPEG),
            sidecar: true,
            ..CropParams::default()
        };
        let json = serde_json::to_string_pretty(&params).unwrap();
        let back: CropParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }

    #[test]
    fn invalid_params_are_rejected() {
        let zero = CropParams {
            size: TargetSize::Square(0),
            ..CropParams::default()
        };
        assert!(zero.validate().is_err());
        let quality = CropParams {
            jpeg_quality: 0,
            ..CropParams::default()
        };
        assert!(quality.validate().is_err());
    }

    #[test]
    fn style_bounds() {
        assert!(AnnotationStyle::default().validate().is_ok());
        let thick = AnnotationStyle {
            thickness: 21,
            ..AnnotationStyle::default()
        };
        assert!(thick.validate().is_err());
        let scale = AnnotationStyle {
            scale: 0.5,
            ..AnnotationStyle::default()
        };
        assert!(scale.validate().is_err());
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("#ff8000").unwrap(), [255, 128, 0]);
        assert_eq!(parse_hex_color("00FF00").unwrap(), [0, 255, 0]);
        assert!(parse_hex_color("fff").is_err());
        assert!(parse_hex_color("zzzzzz").is_err());
    }
}
