//! Dual-row footprints (SOIC, SSOP, TSSOP).
//!
//! Pins are split into two rows at `y = ±row_offset`. The top row is
//! numbered 1..n/2 left to right; the bottom row runs from n down to
//! n/2+1 left to right, so numbering goes counter-clockwise around the body.

use tracing::debug;

use crate::footprint::error::FootprintResult;
use crate::footprint::params::DualRowParams;
use crate::footprint::{DocumentBuilder, FootprintGenerator, GeometryDocument, Pad, PadNumber, Point};

/// Clearance between the body edge and the reference anchor (mm).
const REFERENCE_CLEARANCE: f64 = 2.0;

/// X coordinate of the first pad in a centred row of `count` pads.
#[must_use]
pub fn first_pad_x(count: u32, pitch: f64) -> f64 {
    -(pitch * f64::from(count.saturating_sub(1))) / 2.0
}

/// Generates a dual-row footprint.
///
/// # Errors
///
/// Returns a validation error if the pin count is odd or the record violates
/// any other invariant. Nothing is produced in that case.
pub fn generate(params: &DualRowParams) -> FootprintResult<GeometryDocument> {
    params.validate()?;

    let per_row = params.pins_per_row();
    let x0 = first_pad_x(per_row, params.pitch);
    debug!(name = %params.name, pins = params.pins, x0, "Generating dual-row footprint");

    let pad = |number: u32, x: f64, y: f64| {
        Pad::smd(
            PadNumber::Numbered(number),
            Point::new(x, y),
            params.pad_width,
            params.pad_length,
            params.mask_expansion,
            params.paste_ratio,
        )
    };

    // Top and bottom pads of each column are emitted together.
    let pads = (0..per_row).flat_map(|i| {
        let x = f64::from(i).mul_add(params.pitch, x0);
        [
            pad(1 + i, x, params.row_offset),
            pad(params.pins - i, x, -params.row_offset),
        ]
    });

    let mut builder = DocumentBuilder::new(&params.name)
        .texts(
            Point::new(0.0, -(params.body_length / 2.0 + REFERENCE_CLEARANCE)),
            Point::default(),
        )
        .fab_outline(params.body_length, params.body_width);
    if params.pin1_marker {
        builder = builder.pin1_marker(params.body_length, params.body_width);
    }

    Ok(builder.pads(pads).build())
}

impl FootprintGenerator for DualRowParams {
    fn generate(&self) -> FootprintResult<GeometryDocument> {
        generate(self)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footprint::FootprintError;

    fn soic(pins: u32) -> DualRowParams {
        DualRowParams {
            name: format!("SOIC-{pins}"),
            pins,
            pitch: 1.27,
            body_length: 8.7,
            body_width: 3.9,
            pad_length: 1.5,
            pad_width: 0.6,
            row_offset: 2.3,
            mask_expansion: 0.03,
            paste_ratio: 1.0,
            pin1_marker: true,
        }
    }

    fn number_at(doc: &GeometryDocument, n: u32) -> &Pad {
        doc.pad(&PadNumber::Numbered(n)).unwrap()
    }

    #[test]
    fn soic14_has_every_pin_once() {
        let doc = generate(&soic(14)).unwrap();
        let mut numbers: Vec<u32> = doc.pads().filter_map(|p| p.number.as_number()).collect();
        numbers.sort_unstable();
        assert_eq!(numbers, (1..=14).collect::<Vec<_>>());
    }

    #[test]
    fn numbering_runs_counter_clockwise() {
        let doc = generate(&soic(8)).unwrap();

        // Pin 1 top-left, pin 4 top-right, pin 5 bottom-right, pin 8 bottom-left.
        let p1 = number_at(&doc, 1);
        let p4 = number_at(&doc, 4);
        let p5 = number_at(&doc, 5);
        let p8 = number_at(&doc, 8);

        assert!((p1.at.y - 2.3).abs() < 1e-9);
        assert!((p5.at.y + 2.3).abs() < 1e-9);
        assert!((p1.at.x - p8.at.x).abs() < 1e-9);
        assert!((p4.at.x - p5.at.x).abs() < 1e-9);
        assert!((p1.at.x + 1.905).abs() < 1e-9);
        assert!((p4.at.x - 1.905).abs() < 1e-9);
    }

    #[test]
    fn rows_are_centred() {
        let doc = generate(&soic(14)).unwrap();
        let sum: f64 = doc.pads().map(|p| p.at.x).sum();
        assert!(sum.abs() < 1e-9);
    }

    #[test]
    fn pads_are_oriented_across_the_row() {
        let doc = generate(&soic(8)).unwrap();
        let pad = number_at(&doc, 1);
        assert!((pad.size_x - 0.6).abs() < 1e-9);
        assert!((pad.size_y - 1.5).abs() < 1e-9);
    }

    #[test]
    fn two_pin_minimum() {
        let doc = generate(&soic(2)).unwrap();
        assert_eq!(doc.pads().count(), 2);
        assert!(number_at(&doc, 1).at.x.abs() < 1e-9);
    }

    #[test]
    fn odd_pin_count_fails() {
        let err = generate(&soic(13)).unwrap_err();
        assert!(matches!(err, FootprintError::InvalidPinCount { pins: 13, .. }));
    }

    #[test]
    fn marker_is_optional() {
        assert!(generate(&soic(8)).unwrap().marker().is_some());

        let params = soic(8).with_pin1_marker(false);
        assert!(generate(&params).unwrap().marker().is_none());
    }

    #[test]
    fn first_pad_x_centres_row() {
        assert!((first_pad_x(7, 1.27) + 3.81).abs() < 1e-9);
        assert!(first_pad_x(1, 1.27).abs() < f64::EPSILON);
    }
}
