//! Turning user-typed text into background colors
//!
//! Anything that does not parse is reported as `RecolorError::InvalidColor`;
//! callers decide whether to fall back to the default.

use recolor_core::{RecolorError, Rgb};

/// Parse one 0-255 channel the way a person types it
pub fn parse_channel(name: &str, text: &str) -> Result<i64, RecolorError> {
    text.trim().parse::<i64>().map_err(|_| {
        RecolorError::InvalidColor(format!("{} value {:?} is not an integer", name, text.trim()))
    })
}

/// Build a color from three typed channels
pub fn parse_rgb(red: &str, green: &str, blue: &str) -> Result<Rgb, RecolorError> {
    Rgb::from_components(
        parse_channel("red", red)?,
        parse_channel("green", green)?,
        parse_channel("blue", blue)?,
    )
}

/// Resolve the color given on the command line
///
/// `Ok(None)` means no color flags were given at all.
pub fn color_from_flags(
    red: Option<&str>,
    green: Option<&str>,
    blue: Option<&str>,
    hex: Option<&str>,
) -> Result<Option<Rgb>, RecolorError> {
    if let Some(hex) = hex {
        return Rgb::from_hex(hex).map(Some);
    }
    match (red, green, blue) {
        (None, None, None) => Ok(None),
        (Some(r), Some(g), Some(b)) => parse_rgb(r, g, b).map(Some),
        _ => Err(RecolorError::InvalidColor(
            "--red, --green and --blue must be given together".into(),
        )),
    }
}
