//! Parameter records for each package family.
//!
//! Records validate on construction. Generators call [`validate`] again
//! before emitting geometry because all fields are public.
//!
//! All dimensions are in millimetres.
//!
//! [`validate`]: TwoPadParams::validate

use serde::{Deserialize, Serialize};

use crate::footprint::error::{FootprintError, FootprintResult};

/// Default solder mask expansion for two-pad passives (IPC-7351 nominal).
pub const DEFAULT_TWO_PAD_MASK_EXPANSION: f64 = 0.05;

/// Default solder mask expansion for leaded packages.
pub const DEFAULT_LEAD_MASK_EXPANSION: f64 = 0.03;

/// Default paste ratio (paste aperture equal to the pad).
pub const DEFAULT_PASTE_RATIO: f64 = 1.0;

/// Two-terminal passive (chip resistor, capacitor, inductor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoPadParams {
    /// Footprint name.
    pub name: String,
    /// Body length along the pad axis.
    pub body_length: f64,
    /// Body width.
    pub body_width: f64,
    /// Pad length along the pad axis.
    pub pad_length: f64,
    /// Pad width.
    pub pad_width: f64,
    /// Distance between the facing pad edges.
    pub gap: f64,
    /// Solder mask margin.
    pub mask_expansion: f64,
    /// Paste aperture relative to the pad (1.0 = same size).
    pub paste_ratio: f64,
}

impl TwoPadParams {
    /// Family label used in errors.
    pub const FAMILY: &'static str = "two-pad";

    /// Creates a validated two-pad record with default mask and paste settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is unusable, any length is not positive
    /// or the gap is negative.
    pub fn new(
        name: impl Into<String>,
        body_length: f64,
        body_width: f64,
        pad_length: f64,
        pad_width: f64,
        gap: f64,
    ) -> FootprintResult<Self> {
        let params = Self {
            name: name.into(),
            body_length,
            body_width,
            pad_length,
            pad_width,
            gap,
            mask_expansion: DEFAULT_TWO_PAD_MASK_EXPANSION,
            paste_ratio: DEFAULT_PASTE_RATIO,
        };
        params.validate()?;
        Ok(params)
    }

    /// Sets the solder mask margin.
    #[must_use]
    pub fn with_mask_expansion(mut self, mask_expansion: f64) -> Self {
        self.mask_expansion = mask_expansion;
        self
    }

    /// Sets the paste ratio.
    #[must_use]
    pub fn with_paste_ratio(mut self, paste_ratio: f64) -> Self {
        self.paste_ratio = paste_ratio;
        self
    }

    /// Checks every invariant of the record.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> FootprintResult<()> {
        validate_name(&self.name)?;
        positive("body_length", self.body_length)?;
        positive("body_width", self.body_width)?;
        positive("pad_length", self.pad_length)?;
        positive("pad_width", self.pad_width)?;
        non_negative("gap", self.gap)?;
        validate_margins(self.mask_expansion, self.paste_ratio)
    }
}

/// Dual-row leaded package (SOIC, SSOP, TSSOP).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DualRowParams {
    /// Footprint name.
    pub name: String,
    /// Total pin count (even).
    pub pins: u32,
    /// Pin pitch along a row.
    pub pitch: f64,
    /// Body length.
    pub body_length: f64,
    /// Body width.
    pub body_width: f64,
    /// Pad length (perpendicular to the row).
    pub pad_length: f64,
    /// Pad width (along the row).
    pub pad_width: f64,
    /// Distance from the body centre to each pad row.
    pub row_offset: f64,
    /// Solder mask margin.
    pub mask_expansion: f64,
    /// Paste aperture relative to the pad.
    pub paste_ratio: f64,
    /// Emit a pin-1 locator on the silkscreen.
    pub pin1_marker: bool,
}

impl DualRowParams {
    /// Family label used in errors.
    pub const FAMILY: &'static str = "SOIC";

    /// Creates a validated dual-row record.
    ///
    /// # Errors
    ///
    /// Returns an error if the pin count is odd or zero, or any dimension is
    /// out of range.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        pins: u32,
        pitch: f64,
        body_length: f64,
        body_width: f64,
        pad_length: f64,
        pad_width: f64,
        row_offset: f64,
    ) -> FootprintResult<Self> {
        let params = Self {
            name: name.into(),
            pins,
            pitch,
            body_length,
            body_width,
            pad_length,
            pad_width,
            row_offset,
            mask_expansion: DEFAULT_LEAD_MASK_EXPANSION,
            paste_ratio: DEFAULT_PASTE_RATIO,
            pin1_marker: true,
        };
        params.validate()?;
        Ok(params)
    }

    /// Sets the solder mask margin.
    #[must_use]
    pub fn with_mask_expansion(mut self, mask_expansion: f64) -> Self {
        self.mask_expansion = mask_expansion;
        self
    }

    /// Sets the paste ratio.
    #[must_use]
    pub fn with_paste_ratio(mut self, paste_ratio: f64) -> Self {
        self.paste_ratio = paste_ratio;
        self
    }

    /// Enables or disables the pin-1 locator.
    #[must_use]
    pub fn with_pin1_marker(mut self, pin1_marker: bool) -> Self {
        self.pin1_marker = pin1_marker;
        self
    }

    /// Pins in each row.
    #[must_use]
    pub const fn pins_per_row(&self) -> u32 {
        self.pins / 2
    }

    /// Checks every invariant of the record.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> FootprintResult<()> {
        validate_name(&self.name)?;
        if self.pins < 2 {
            return Err(FootprintError::invalid_pin_count(
                Self::FAMILY,
                self.pins,
                "at least 2 pins are required",
            ));
        }
        if self.pins % 2 != 0 {
            return Err(FootprintError::invalid_pin_count(
                Self::FAMILY,
                self.pins,
                "pin count must be even",
            ));
        }
        positive("pitch", self.pitch)?;
        positive("body_length", self.body_length)?;
        positive("body_width", self.body_width)?;
        positive("pad_length", self.pad_length)?;
        positive("pad_width", self.pad_width)?;
        positive("row_offset", self.row_offset)?;
        validate_margins(self.mask_expansion, self.paste_ratio)
    }
}

/// Exposed thermal pad dimensions.
///
/// A zero length or width is a valid record but produces no pad.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExposedPad {
    /// Pad size in X.
    pub length: f64,
    /// Pad size in Y.
    pub width: f64,
}

impl ExposedPad {
    /// Creates exposed pad dimensions.
    #[must_use]
    pub const fn new(length: f64, width: f64) -> Self {
        Self { length, width }
    }

    /// Builds exposed pad dimensions when both values are present.
    #[must_use]
    pub fn from_dimensions(length: Option<f64>, width: Option<f64>) -> Option<Self> {
        match (length, width) {
            (Some(length), Some(width)) => Some(Self::new(length, width)),
            _ => None,
        }
    }

    /// Whether this pad appears in the generated footprint.
    #[must_use]
    pub fn is_emitted(&self) -> bool {
        self.length > 0.0 && self.width > 0.0
    }
}

/// Lead style of a quad package.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum QuadLeads {
    /// Leads flush with the body edge (QFN), optionally with an exposed pad.
    Flush {
        /// Exposed pad; `None` when the package has none.
        exposed_pad: Option<ExposedPad>,
    },
    /// Gullwing leads projecting past the body edge (QFP).
    Gullwing {
        /// Additional distance the pad row moves outwards.
        extension: f64,
    },
}

/// Quad-leaded package (QFN, QFP).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadParams {
    /// Footprint name.
    pub name: String,
    /// Total pin count (multiple of 4).
    pub pins: u32,
    /// Pin pitch along a side.
    pub pitch: f64,
    /// Body length.
    pub body_length: f64,
    /// Body width.
    pub body_width: f64,
    /// Pad length (perpendicular to the body edge).
    pub pad_length: f64,
    /// Pad width (along the body edge).
    pub pad_width: f64,
    /// Solder mask margin.
    pub mask_expansion: f64,
    /// Paste aperture relative to the pad.
    pub paste_ratio: f64,
    /// Lead style.
    pub leads: QuadLeads,
}

impl QuadParams {
    /// Creates a validated flush-lead (QFN) record.
    ///
    /// # Errors
    ///
    /// Returns an error if the pin count is not a positive multiple of 4 or
    /// any dimension is out of range.
    #[allow(clippy::too_many_arguments)]
    pub fn flush(
        name: impl Into<String>,
        pins: u32,
        pitch: f64,
        body_length: f64,
        body_width: f64,
        pad_length: f64,
        pad_width: f64,
        exposed_pad: Option<ExposedPad>,
    ) -> FootprintResult<Self> {
        Self::build(
            name.into(),
            pins,
            pitch,
            (body_length, body_width),
            (pad_length, pad_width),
            QuadLeads::Flush { exposed_pad },
        )
    }

    /// Creates a validated gullwing-lead (QFP) record.
    ///
    /// # Errors
    ///
    /// Returns an error if the pin count is not a positive multiple of 4 or
    /// any dimension is out of range.
    #[allow(clippy::too_many_arguments)]
    pub fn gullwing(
        name: impl Into<String>,
        pins: u32,
        pitch: f64,
        body_length: f64,
        body_width: f64,
        pad_length: f64,
        pad_width: f64,
        extension: f64,
    ) -> FootprintResult<Self> {
        Self::build(
            name.into(),
            pins,
            pitch,
            (body_length, body_width),
            (pad_length, pad_width),
            QuadLeads::Gullwing { extension },
        )
    }

    fn build(
        name: String,
        pins: u32,
        pitch: f64,
        (body_length, body_width): (f64, f64),
        (pad_length, pad_width): (f64, f64),
        leads: QuadLeads,
    ) -> FootprintResult<Self> {
        let params = Self {
            name,
            pins,
            pitch,
            body_length,
            body_width,
            pad_length,
            pad_width,
            mask_expansion: DEFAULT_LEAD_MASK_EXPANSION,
            paste_ratio: DEFAULT_PASTE_RATIO,
            leads,
        };
        params.validate()?;
        Ok(params)
    }

    /// Sets the solder mask margin.
    #[must_use]
    pub fn with_mask_expansion(mut self, mask_expansion: f64) -> Self {
        self.mask_expansion = mask_expansion;
        self
    }

    /// Sets the paste ratio.
    #[must_use]
    pub fn with_paste_ratio(mut self, paste_ratio: f64) -> Self {
        self.paste_ratio = paste_ratio;
        self
    }

    /// Family label used in errors and logs.
    #[must_use]
    pub const fn family(&self) -> &'static str {
        match self.leads {
            QuadLeads::Flush { .. } => "QFN",
            QuadLeads::Gullwing { .. } => "QFP",
        }
    }

    /// Pins on each side.
    #[must_use]
    pub const fn pins_per_side(&self) -> u32 {
        self.pins / 4
    }

    /// Exposed pad that will be emitted, if any.
    #[must_use]
    pub fn emitted_exposed_pad(&self) -> Option<ExposedPad> {
        match self.leads {
            QuadLeads::Flush {
                exposed_pad: Some(ep),
            } if ep.is_emitted() => Some(ep),
            _ => None,
        }
    }

    /// Checks every invariant of the record.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> FootprintResult<()> {
        validate_name(&self.name)?;
        if self.pins < 4 {
            return Err(FootprintError::invalid_pin_count(
                self.family(),
                self.pins,
                "at least 4 pins are required",
            ));
        }
        if self.pins % 4 != 0 {
            return Err(FootprintError::invalid_pin_count(
                self.family(),
                self.pins,
                "pin count must be a multiple of 4",
            ));
        }
        positive("pitch", self.pitch)?;
        positive("body_length", self.body_length)?;
        positive("body_width", self.body_width)?;
        positive("pad_length", self.pad_length)?;
        positive("pad_width", self.pad_width)?;
        match self.leads {
            QuadLeads::Flush {
                exposed_pad: Some(ep),
            } => {
                non_negative("ep_length", ep.length)?;
                non_negative("ep_width", ep.width)?;
            }
            QuadLeads::Flush { exposed_pad: None } => {}
            QuadLeads::Gullwing { extension } => non_negative("gullwing_extension", extension)?,
        }
        validate_margins(self.mask_expansion, self.paste_ratio)
    }
}

/// Rejects names that would break the s-expression or escape the output directory.
fn validate_name(name: &str) -> FootprintResult<()> {
    if name.is_empty() {
        return Err(FootprintError::invalid_name(name, "name is empty"));
    }
    if name == "." || name == ".." {
        return Err(FootprintError::invalid_name(name, "name is a relative path"));
    }
    if let Some(c) = name
        .chars()
        .find(|c| c.is_whitespace() || c.is_control() || matches!(c, '(' | ')' | '"' | '/' | '\\'))
    {
        return Err(FootprintError::invalid_name(
            name,
            format!("character {c:?} is not allowed"),
        ));
    }
    Ok(())
}

fn positive(name: &'static str, value: f64) -> FootprintResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FootprintError::invalid_dimension(
            name,
            value,
            "must be greater than zero",
        ))
    }
}

fn non_negative(name: &'static str, value: f64) -> FootprintResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(FootprintError::invalid_dimension(
            name,
            value,
            "must not be negative",
        ))
    }
}

fn validate_margins(mask_expansion: f64, paste_ratio: f64) -> FootprintResult<()> {
    non_negative("mask_expansion", mask_expansion)?;
    positive("paste_ratio", paste_ratio)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_pad_defaults() {
        let p = TwoPadParams::new("R_0603", 1.6, 0.8, 0.9, 0.8, 0.8).unwrap();
        assert!((p.mask_expansion - 0.05).abs() < f64::EPSILON);
        assert!((p.paste_ratio - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn two_pad_allows_zero_gap() {
        assert!(TwoPadParams::new("R", 1.6, 0.8, 0.9, 0.8, 0.0).is_ok());
    }

    #[test]
    fn two_pad_rejects_non_positive_lengths() {
        let err = TwoPadParams::new("R", 0.0, 0.8, 0.9, 0.8, 0.8).unwrap_err();
        assert!(matches!(
            err,
            FootprintError::InvalidDimension {
                name: "body_length",
                ..
            }
        ));
        assert!(TwoPadParams::new("R", 1.6, 0.8, -0.9, 0.8, 0.8).is_err());
        assert!(TwoPadParams::new("R", 1.6, 0.8, 0.9, f64::NAN, 0.8).is_err());
        assert!(TwoPadParams::new("R", 1.6, 0.8, 0.9, 0.8, -0.1).is_err());
    }

    #[test]
    fn mutated_record_fails_validation() {
        let p = TwoPadParams::new("R", 1.6, 0.8, 0.9, 0.8, 0.8)
            .unwrap()
            .with_paste_ratio(0.0);
        assert!(p.validate().is_err());
    }

    #[test]
    fn dual_row_pin_parity() {
        assert!(DualRowParams::new("SOIC-14", 14, 1.27, 8.7, 3.9, 1.5, 0.6, 2.3).is_ok());

        let err = DualRowParams::new("SOIC-13", 13, 1.27, 8.7, 3.9, 1.5, 0.6, 2.3).unwrap_err();
        assert!(matches!(err, FootprintError::InvalidPinCount { pins: 13, .. }));

        assert!(DualRowParams::new("SOIC-0", 0, 1.27, 8.7, 3.9, 1.5, 0.6, 2.3).is_err());
    }

    #[test]
    fn quad_pin_multiple_of_four() {
        assert!(QuadParams::flush("QFN-32", 32, 0.5, 5.0, 5.0, 0.6, 0.25, None).is_ok());
        assert!(QuadParams::gullwing("QFP-64", 64, 0.5, 10.0, 10.0, 1.2, 0.3, 0.0).is_ok());

        let err = QuadParams::flush("QFN-30", 30, 0.5, 5.0, 5.0, 0.6, 0.25, None).unwrap_err();
        assert!(err.to_string().contains("QFN"));
        let err = QuadParams::gullwing("QFP-62", 62, 0.5, 10.0, 10.0, 1.2, 0.3, 0.0).unwrap_err();
        assert!(err.to_string().contains("QFP"));
        assert!(QuadParams::flush("QFN-0", 0, 0.5, 5.0, 5.0, 0.6, 0.25, None).is_err());
    }

    #[test]
    fn quad_rejects_negative_extension() {
        assert!(QuadParams::gullwing("QFP", 64, 0.5, 10.0, 10.0, 1.2, 0.3, -0.5).is_err());
    }

    #[test]
    fn exposed_pad_absent_vs_zero() {
        assert_eq!(ExposedPad::from_dimensions(None, Some(3.2)), None);
        assert_eq!(
            ExposedPad::from_dimensions(Some(3.2), Some(3.2)),
            Some(ExposedPad::new(3.2, 3.2))
        );
        assert!(!ExposedPad::new(0.0, 3.2).is_emitted());
        assert!(ExposedPad::new(3.2, 3.2).is_emitted());

        let zero = QuadParams::flush(
            "QFN",
            16,
            0.5,
            3.0,
            3.0,
            0.6,
            0.25,
            Some(ExposedPad::new(0.0, 0.0)),
        )
        .unwrap();
        assert_eq!(zero.emitted_exposed_pad(), None);
    }

    #[test]
    fn rejects_bad_names() {
        assert!(TwoPadParams::new("", 1.6, 0.8, 0.9, 0.8, 0.8).is_err());
        assert!(TwoPadParams::new("R 0603", 1.6, 0.8, 0.9, 0.8, 0.8).is_err());
        assert!(TwoPadParams::new("../R", 1.6, 0.8, 0.9, 0.8, 0.8).is_err());
        assert!(TwoPadParams::new("R(1)", 1.6, 0.8, 0.9, 0.8, 0.8).is_err());
        assert!(TwoPadParams::new("..", 1.6, 0.8, 0.9, 0.8, 0.8).is_err());
        assert!(TwoPadParams::new("R_0603_1608Metric", 1.6, 0.8, 0.9, 0.8, 0.8).is_ok());
    }
}
