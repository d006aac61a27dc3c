//! Quad-leaded footprints (QFN, QFP).
//!
//! Both variants place `pins / 4` pads on each of four sides. Numbering
//! starts on the top side and continues left, bottom, right:
//!
//! | Side   | Row position     | Pins           | Pad size (x × y)          |
//! |--------|------------------|----------------|---------------------------|
//! | Top    | `y = +offset`    | 1 ..= k        | `pad_width × pad_length`  |
//! | Left   | `x = -offset`    | k+1 ..= 2k     | `pad_length × pad_width`  |
//! | Bottom | `y = -offset`    | 2k+1 ..= 3k    | `pad_width × pad_length`  |
//! | Right  | `x = +offset`    | 3k+1 ..= 4k    | `pad_length × pad_width`  |
//!
//! The row offset is `body_width / 2 + pad_length / 2`, plus the lead
//! extension for gullwing packages. QFN packages may add a centred `EP` pad.

use tracing::debug;

use crate::footprint::dual_row::first_pad_x;
use crate::footprint::error::FootprintResult;
use crate::footprint::params::{QuadLeads, QuadParams};
use crate::footprint::{DocumentBuilder, FootprintGenerator, GeometryDocument, Pad, PadNumber, Point};

/// Clearance between the outer pad edge and the text anchors (mm).
const TEXT_CLEARANCE: f64 = 1.0;

/// A side of a quad package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Horizontal row at positive Y.
    Top,
    /// Vertical row at negative X.
    Left,
    /// Horizontal row at negative Y.
    Bottom,
    /// Vertical row at positive X.
    Right,
}

impl Side {
    /// All sides in numbering order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Left, Self::Bottom, Self::Right];

    /// Position of this side in the numbering order.
    #[must_use]
    pub const fn index(self) -> u32 {
        match self {
            Self::Top => 0,
            Self::Left => 1,
            Self::Bottom => 2,
            Self::Right => 3,
        }
    }

    /// First pin number on this side.
    #[must_use]
    pub const fn first_pin(self, per_side: u32) -> u32 {
        1 + self.index() * per_side
    }

    /// Whether pads on this side are stacked along Y.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Pad centre for position `t` along the side at distance `offset` from the centre.
    #[must_use]
    pub const fn place(self, t: f64, offset: f64) -> Point {
        match self {
            Self::Top => Point::new(t, offset),
            Self::Left => Point::new(-offset, t),
            Self::Bottom => Point::new(t, -offset),
            Self::Right => Point::new(offset, t),
        }
    }

    /// Pad size as `(size_x, size_y)` with the long axis perpendicular to the edge.
    #[must_use]
    pub const fn pad_size(self, pad_length: f64, pad_width: f64) -> (f64, f64) {
        if self.is_vertical() {
            (pad_length, pad_width)
        } else {
            (pad_width, pad_length)
        }
    }
}

/// Distance from the package centre to each pad row.
#[must_use]
pub fn row_offset(params: &QuadParams) -> f64 {
    let flush = params.body_width / 2.0 + params.pad_length / 2.0;
    match params.leads {
        QuadLeads::Flush { .. } => flush,
        QuadLeads::Gullwing { extension } => flush + extension,
    }
}

/// Places the pads of one side.
#[must_use]
pub fn side_pads(params: &QuadParams, side: Side, offset: f64) -> Vec<Pad> {
    let per_side = params.pins_per_side();
    let t0 = first_pad_x(per_side, params.pitch);
    let first = side.first_pin(per_side);
    let (size_x, size_y) = side.pad_size(params.pad_length, params.pad_width);

    (0..per_side)
        .map(|i| {
            let t = f64::from(i).mul_add(params.pitch, t0);
            Pad::smd(
                PadNumber::Numbered(first + i),
                side.place(t, offset),
                size_x,
                size_y,
                params.mask_expansion,
                params.paste_ratio,
            )
        })
        .collect()
}

/// Generates a quad footprint for either lead style.
///
/// # Errors
///
/// Returns a validation error if the pin count is not a positive multiple
/// of 4 or the record violates any other invariant.
pub fn generate(params: &QuadParams) -> FootprintResult<GeometryDocument> {
    params.validate()?;

    let offset = row_offset(params);
    let text_y = offset + params.pad_length / 2.0 + TEXT_CLEARANCE;
    debug!(
        name = %params.name,
        family = params.family(),
        pins = params.pins,
        offset,
        "Generating quad footprint"
    );

    let mut builder = DocumentBuilder::new(&params.name)
        .texts(Point::new(0.0, -text_y), Point::new(0.0, text_y))
        .fab_outline(params.body_length, params.body_width)
        .pin1_marker(params.body_length, params.body_width);

    for side in Side::ALL {
        builder = builder.pads(side_pads(params, side, offset));
    }

    if let Some(ep) = params.emitted_exposed_pad() {
        debug!(length = ep.length, width = ep.width, "Adding exposed pad");
        builder = builder.pad(Pad::smd(
            PadNumber::Named(PadNumber::EXPOSED_PAD.to_string()),
            Point::default(),
            ep.length,
            ep.width,
            params.mask_expansion,
            params.paste_ratio,
        ));
    }

    Ok(builder.build())
}

impl FootprintGenerator for QuadParams {
    fn generate(&self) -> FootprintResult<GeometryDocument> {
        generate(self)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
