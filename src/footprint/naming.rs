//! KiCad library naming conventions.
//!
//! Used when the caller does not supply a footprint name.
//!
//! Examples:
//! - `SMD_1608Metric` - 1.6mm x 0.8mm two-pad passive
//! - `SOIC-14_3.9x8.7mm_P1.27mm` - 14-pin SOIC, body width first
//! - `QFN-32-1EP_5x5mm_P0.5mm_EP3.2x3.2mm` - QFN with exposed pad
//! - `QFP-64_10x10mm_P0.5mm` - gullwing quad

use crate::footprint::params::ExposedPad;

/// Name for a two-pad passive from its body size.
///
/// Format: `SMD_{LENGTH}{WIDTH}Metric` with dimensions in 0.1mm units.
///
/// ```
/// use pcbai::footprint::naming::two_pad_name;
///
/// assert_eq!(two_pad_name(1.6, 0.8), "SMD_1608Metric");
/// ```
#[must_use]
pub fn two_pad_name(body_length: f64, body_width: f64) -> String {
    let length_units = mm_to_tenths(body_length);
    let width_units = mm_to_tenths(body_width);
    format!("SMD_{length_units:02}{width_units:02}Metric")
}

/// Name for a dual-row package.
///
/// Format: `SOIC-{PINS}_{WIDTH}x{LENGTH}mm_P{PITCH}mm`
#[must_use]
pub fn dual_row_name(pins: u32, pitch: f64, body_length: f64, body_width: f64) -> String {
    format!(
        "SOIC-{pins}_{}x{}mm_P{}mm",
        format_mm(body_width),
        format_mm(body_length),
        format_mm(pitch)
    )
}

/// Name for a quad package.
///
/// Format: `{PREFIX}-{PINS}[-1EP]_{LENGTH}x{WIDTH}mm_P{PITCH}mm[_EP{L}x{W}mm]`
#[must_use]
pub fn quad_name(
    prefix: &str,
    pins: u32,
    pitch: f64,
    body_length: f64,
    body_width: f64,
    exposed_pad: Option<ExposedPad>,
) -> String {
    let body = format!(
        "{}x{}mm_P{}mm",
        format_mm(body_length),
        format_mm(body_width),
        format_mm(pitch)
    );
    match exposed_pad.filter(ExposedPad::is_emitted) {
        Some(ep) => format!(
            "{prefix}-{pins}-1EP_{body}_EP{}x{}mm",
            format_mm(ep.length),
            format_mm(ep.width)
        ),
        None => format!("{prefix}-{pins}_{body}"),
    }
}

/// Formats millimetres with up to three decimals and no trailing zeros.
fn format_mm(mm: f64) -> String {
    let text = format!("{mm:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    text.to_string()
}

/// Converts millimetres to 0.1mm units, rounded to the nearest integer.
fn mm_to_tenths(mm: f64) -> u32 {
    // Package dimensions are positive and small, so the cast is safe
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let units = (mm * 10.0).round() as u32;
    units
}
