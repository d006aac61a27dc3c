//! Boundary between loosely-typed inputs and validated parameter records.
//!
//! CLI flags and package-guess files both supply every dimension as
//! optional. [`PackageInputs::build`] checks that the family's required
//! parameters are present, fills defaults and derives a name when none was
//! given, then hands over to the validating record constructors.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::footprint::error::{FootprintError, FootprintResult};
use crate::footprint::naming;
use crate::footprint::params::{
    DualRowParams, ExposedPad, QuadParams, TwoPadParams, DEFAULT_LEAD_MASK_EXPANSION,
    DEFAULT_PASTE_RATIO, DEFAULT_TWO_PAD_MASK_EXPANSION,
};
use crate::footprint::Footprint;

/// Supported package families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageFamily {
    /// Two-pad chip passive.
    SmdRc,
    /// Dual-row gullwing (SOIC).
    Soic,
    /// Flush-lead quad (QFN).
    Qfn,
    /// Gullwing quad (QFP).
    Qfp,
}

impl PackageFamily {
    /// Short label used in errors and logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::SmdRc => "SMD RC",
            Self::Soic => "SOIC",
            Self::Qfn => "QFN",
            Self::Qfp => "QFP",
        }
    }

    /// Parses a family from a loose package-type string.
    ///
    /// Accepts `smd_rc`, `soic`, `qfn`, `qfp` and common aliases
    /// (case-insensitive).
    #[must_use]
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "smd_rc" | "smd-rc" | "chip" => Some(Self::SmdRc),
            "soic" | "sop" | "ssop" | "tssop" => Some(Self::Soic),
            "qfn" | "vqfn" | "vfqfn" | "mlf" => Some(Self::Qfn),
            "qfp" | "lqfp" | "tqfp" => Some(Self::Qfp),
            _ => None,
        }
    }
}

impl fmt::Display for PackageFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Default solder mask and paste settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FootprintDefaults {
    /// Mask expansion for two-pad passives (mm).
    #[serde(default = "default_two_pad_mask_expansion")]
    pub two_pad_mask_expansion: f64,

    /// Mask expansion for leaded packages (mm).
    #[serde(default = "default_lead_mask_expansion")]
    pub lead_mask_expansion: f64,

    /// Paste aperture relative to the pad.
    #[serde(default = "default_paste_ratio")]
    pub paste_ratio: f64,
}

impl Default for FootprintDefaults {
    fn default() -> Self {
        Self {
            two_pad_mask_expansion: default_two_pad_mask_expansion(),
            lead_mask_expansion: default_lead_mask_expansion(),
            paste_ratio: default_paste_ratio(),
        }
    }
}

const fn default_two_pad_mask_expansion() -> f64 {
    DEFAULT_TWO_PAD_MASK_EXPANSION
}

const fn default_lead_mask_expansion() -> f64 {
    DEFAULT_LEAD_MASK_EXPANSION
}

const fn default_paste_ratio() -> f64 {
    DEFAULT_PASTE_RATIO
}

/// Package parameters as supplied by a caller; any of them may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageInputs {
    /// Footprint name; derived from the dimensions when absent.
    pub name: Option<String>,
    /// Total pin count.
    pub pins: Option<u32>,
    /// Pin pitch.
    pub pitch: Option<f64>,
    /// Body length.
    pub body_length: Option<f64>,
    /// Body width.
    pub body_width: Option<f64>,
    /// Pad length.
    pub pad_length: Option<f64>,
    /// Pad width.
    pub pad_width: Option<f64>,
    /// Gap between the two pads of a passive.
    pub gap: Option<f64>,
    /// Centre-to-row distance for dual-row packages.
    pub row_offset: Option<f64>,
    /// Exposed pad length (QFN).
    pub ep_length: Option<f64>,
    /// Exposed pad width (QFN).
    pub ep_width: Option<f64>,
    /// Gullwing lead extension (QFP); zero when absent.
    pub gullwing_extension: Option<f64>,
    /// Pin-1 locator for dual-row packages; on when absent.
    pub pin1_marker: Option<bool>,
    /// Mask expansion override.
    pub mask_expansion: Option<f64>,
    /// Paste ratio override.
    pub paste_ratio: Option<f64>,
}

impl PackageInputs {
    /// Builds a validated footprint for `family`.
    ///
    /// # Errors
    ///
    /// Returns [`FootprintError::MissingParameter`] if a parameter required
    /// by the family is absent, or a validation error from the record
    /// constructor.
    pub fn build(
        &self,
        family: PackageFamily,
        defaults: &FootprintDefaults,
    ) -> FootprintResult<Footprint> {
        let label = family.label();
        let need = |value: Option<f64>, name: &'static str| {
            value.ok_or_else(|| FootprintError::missing(label, name))
        };
        let paste_ratio = self.paste_ratio.unwrap_or(defaults.paste_ratio);
        let lead_mask = self.mask_expansion.unwrap_or(defaults.lead_mask_expansion);

        let footprint = match family {
            PackageFamily::SmdRc => {
                let body_length = need(self.body_length, "body_l")?;
                let body_width = need(self.body_width, "body_w")?;
                let pad_length = need(self.pad_length, "pad_l")?;
                let pad_width = need(self.pad_width, "pad_w")?;
                let gap = need(self.gap, "gap")?;
                let name = self
                    .name
                    .clone()
                    .unwrap_or_else(|| naming::two_pad_name(body_length, body_width));
                let mask = self
                    .mask_expansion
                    .unwrap_or(defaults.two_pad_mask_expansion);

                let params = TwoPadParams::new(
                    name,
                    body_length,
                    body_width,
                    pad_length,
                    pad_width,
                    gap,
                )?
                .with_mask_expansion(mask)
                .with_paste_ratio(paste_ratio);
                params.validate()?;
                Footprint::TwoPad(params)
            }
            PackageFamily::Soic => {
                let pins = self.pins.ok_or_else(|| FootprintError::missing(label, "pins"))?;
                let pitch = need(self.pitch, "pitch")?;
                let body_length = need(self.body_length, "body_l")?;
                let body_width = need(self.body_width, "body_w")?;
                let pad_length = need(self.pad_length, "pad_l")?;
                let pad_width = need(self.pad_width, "pad_w")?;
                let row_offset = need(self.row_offset, "row_offset")?;
                let name = self.name.clone().unwrap_or_else(|| {
                    naming::dual_row_name(pins, pitch, body_length, body_width)
                });

                let params = DualRowParams::new(
                    name,
                    pins,
                    pitch,
                    body_length,
                    body_width,
                    pad_length,
                    pad_width,
                    row_offset,
                )?
                .with_mask_expansion(lead_mask)
                .with_paste_ratio(paste_ratio)
                .with_pin1_marker(self.pin1_marker.unwrap_or(true));
                params.validate()?;
                Footprint::DualRow(params)
            }
            PackageFamily::Qfn | PackageFamily::Qfp => {
                let pins = self.pins.ok_or_else(|| FootprintError::missing(label, "pins"))?;
                let pitch = need(self.pitch, "pitch")?;
                let body_length = need(self.body_length, "body_l")?;
                let body_width = need(self.body_width, "body_w")?;
                let pad_length = need(self.pad_length, "pad_l")?;
                let pad_width = need(self.pad_width, "pad_w")?;

                let params = (if family == PackageFamily::Qfn {
                    let exposed_pad = self.exposed_pad();
                    let name = self.name.clone().unwrap_or_else(|| {
                        naming::quad_name("QFN", pins, pitch, body_length, body_width, exposed_pad)
                    });
                    QuadParams::flush(
                        name,
                        pins,
                        pitch,
                        body_length,
                        body_width,
                        pad_length,
                        pad_width,
                        exposed_pad,
                    )?
                } else {
                    let extension = self.gullwing_extension.unwrap_or(0.0);
                    let name = self.name.clone().unwrap_or_else(|| {
                        naming::quad_name("QFP", pins, pitch, body_length, body_width, None)
                    });
                    QuadParams::gullwing(
                        name,
                        pins,
                        pitch,
                        body_length,
                        body_width,
                        pad_length,
                        pad_width,
                        extension,
                    )?
                })
                .with_mask_expansion(lead_mask)
                .with_paste_ratio(paste_ratio);
                params.validate()?;
                Footprint::Quad(params)
            }
        };

        debug!(family = %family, "Package inputs accepted");
        Ok(footprint)
    }

    /// Exposed pad from the optional dimensions; warns when only one is given.
    fn exposed_pad(&self) -> Option<ExposedPad> {
        let exposed_pad = ExposedPad::from_dimensions(self.ep_length, self.ep_width);
        if exposed_pad.is_none() && (self.ep_length.is_some() || self.ep_width.is_some()) {
            warn!("Exposed pad needs both length and width; ignoring the single dimension given");
        }
        exposed_pad
    }
}
