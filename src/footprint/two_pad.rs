//! Two-pad footprints for chip passives and discretes.
//!
//! Pads sit on the X axis, symmetric about the origin, with their facing
//! edges exactly `gap` apart. Pad 1 is on the negative X side.

use tracing::debug;

use crate::footprint::error::FootprintResult;
use crate::footprint::params::TwoPadParams;
use crate::footprint::{DocumentBuilder, FootprintGenerator, GeometryDocument, Pad, PadNumber, Point};

/// Vertical offset of the reference and value anchors (mm).
const TEXT_OFFSET_Y: f64 = 1.5;

/// Returns the X coordinate of pad 2's centre; pad 1 mirrors it.
#[must_use]
pub fn pad_centre_x(params: &TwoPadParams) -> f64 {
    params.gap / 2.0 + params.pad_length / 2.0
}

/// Generates a two-pad footprint.
///
/// # Errors
///
/// Returns a validation error if the record violates its invariants.
pub fn generate(params: &TwoPadParams) -> FootprintResult<GeometryDocument> {
    params.validate()?;

    let x = pad_centre_x(params);
    debug!(name = %params.name, pad_centre_x = x, "Generating two-pad footprint");

    let pad = |number: u32, x: f64| {
        Pad::smd(
            PadNumber::Numbered(number),
            Point::new(x, 0.0),
            params.pad_length,
            params.pad_width,
            params.mask_expansion,
            params.paste_ratio,
        )
    };

    Ok(DocumentBuilder::new(&params.name)
        .texts(
            Point::new(0.0, -TEXT_OFFSET_Y),
            Point::new(0.0, TEXT_OFFSET_Y),
        )
        .fab_outline(params.body_length, params.body_width)
        .pad(pad(1, -x))
        .pad(pad(2, x))
        .build())
}

impl FootprintGenerator for TwoPadParams {
    fn generate(&self) -> FootprintResult<GeometryDocument> {
        generate(self)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
