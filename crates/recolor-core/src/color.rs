//! Normalized RGB colors
//!
//! Colors are stored as three `f32` channels in the 0-1 range, the form PDF's
//! `rg` operator expects. Constructors validate their inputs; once built an
//! [`Rgb`] always satisfies the range invariant.

use crate::error::{RecolorError, Result};
use serde::Serialize;

/// Light cream, (229, 229, 204) on the 8-bit scale.
pub const DEFAULT_BACKGROUND: Rgb = Rgb {
    r: 229.0 / 255.0,
    g: 229.0 / 255.0,
    b: 204.0 / 255.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for Rgb {
    fn default() -> Self {
        DEFAULT_BACKGROUND
    }
}

impl Rgb {
    /// Normalize an 8-bit triple by dividing each channel by 255
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: normalize(r),
            g: normalize(g),
            b: normalize(b),
        }
    }

    /// Normalize integer components, rejecting anything outside 0-255
    pub fn from_components(r: i64, g: i64, b: i64) -> Result<Self> {
        let channel = |name: &str, value: i64| {
            u8::try_from(value).map_err(|_| {
                RecolorError::InvalidColor(format!(
                    "{} value {} must be between 0 and 255",
                    name, value
                ))
            })
        };
        Ok(Self::from_u8(
            channel("red", r)?,
            channel("green", g)?,
            channel("blue", b)?,
        ))
    }

    /// Parse a hex color string (e.g., "#C8DCFF" or "C8DCFF")
    pub fn from_hex(color: &str) -> Result<Self> {
        let hex = color.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(RecolorError::InvalidColor(format!(
                "expected six hex digits, got {:?}",
                color
            )));
        }

        let byte = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| RecolorError::InvalidColor(format!("invalid hex color {:?}", color)))
        };
        Ok(Self::from_u8(byte(0..2)?, byte(2..4)?, byte(4..6)?))
    }

    /// Channels as an array, in r, g, b order
    pub fn channels(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

fn normalize(value: u8) -> f32 {
    value as f32 / 255.0
}
