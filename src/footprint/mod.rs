//! Parametric footprint geometry.
//!
//! Each package family turns a validated parameter record into a
//! [`GeometryDocument`]: an ordered list of text anchors, fabrication outline
//! segments, an optional pin-1 locator and numbered pads.
//!
//! # Supported Package Families
//!
//! - [`two_pad`] - Chip resistors, capacitors and other two-terminal parts
//! - [`dual_row`] - SOIC style dual-row leaded packages
//! - [`quad`] - QFN (flush leads, optional exposed pad) and QFP (gullwing leads)
//!
//! # Example
//!
//! ```
//! use pcbai::footprint::{two_pad, TwoPadParams};
//!
//! let params = TwoPadParams::new("R_0603", 1.6, 0.8, 0.9, 0.8, 0.8).unwrap();
//! let doc = two_pad::generate(&params).unwrap();
//!
//! assert_eq!(doc.pads().count(), 2);
//! ```

pub mod dual_row;
pub mod error;
pub mod inputs;
pub mod naming;
pub mod params;
pub mod quad;
pub mod two_pad;

use std::fmt;

use bitflags::bitflags;
use serde::Serialize;

pub use error::{FootprintError, FootprintResult};
pub use inputs::{PackageFamily, PackageInputs};
pub use params::{DualRowParams, ExposedPad, QuadLeads, QuadParams, TwoPadParams};

/// Fabrication outline line width (mm).
pub const FAB_LINE_WIDTH: f64 = 0.1;

/// Pin-1 locator line width (mm).
pub const MARKER_LINE_WIDTH: f64 = 0.2;

/// Inset of the pin-1 locator centre from the body corner (mm).
const MARKER_INSET: f64 = 0.6;

/// Radius of the pin-1 locator (mm).
const MARKER_RADIUS: f64 = 0.3;

/// Reference designator placeholder replaced by KiCad on placement.
pub const REFERENCE_PLACEHOLDER: &str = "REF**";

/// A 2D point in millimetres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    /// X coordinate (mm).
    pub x: f64,
    /// Y coordinate (mm).
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single board layer used by graphic primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Layer {
    /// Front copper.
    #[serde(rename = "F.Cu")]
    FrontCopper,
    /// Front silkscreen.
    #[serde(rename = "F.SilkS")]
    FrontSilkscreen,
    /// Front fabrication drawing.
    #[serde(rename = "F.Fab")]
    FrontFab,
}

impl Layer {
    /// Returns the KiCad layer name.
    #[must_use]
    pub const fn kicad_name(&self) -> &'static str {
        match self {
            Self::FrontCopper => "F.Cu",
            Self::FrontSilkscreen => "F.SilkS",
            Self::FrontFab => "F.Fab",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kicad_name())
    }
}

bitflags! {
    /// Set of layers a pad exists on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    pub struct LayerSet: u8 {
        /// Front copper.
        const F_CU = 0b001;
        /// Front solder paste.
        const F_PASTE = 0b010;
        /// Front solder mask opening.
        const F_MASK = 0b100;
        /// Standard surface-mount pad stack.
        const SMD = Self::F_CU.bits() | Self::F_PASTE.bits() | Self::F_MASK.bits();
    }
}

impl LayerSet {
    /// Returns the KiCad layer names in stack order.
    #[must_use]
    pub fn kicad_names(&self) -> Vec<&'static str> {
        let mut names = Vec::with_capacity(3);
        if self.contains(Self::F_CU) {
            names.push("F.Cu");
        }
        if self.contains(Self::F_PASTE) {
            names.push("F.Paste");
        }
        if self.contains(Self::F_MASK) {
            names.push("F.Mask");
        }
        names
    }
}

/// Footprint mounting attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    /// Surface-mount technology.
    #[default]
    Smd,
}

/// Kind of text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    /// Reference designator (R1, U3, ...).
    Reference,
    /// Component value.
    Value,
}

/// A text anchor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    /// Text kind.
    pub kind: TextKind,
    /// Displayed text.
    pub text: String,
    /// Anchor position.
    pub at: Point,
    /// Layer.
    pub layer: Layer,
    /// Whether the text is hidden.
    pub hidden: bool,
}

/// A line segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Line {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
    /// Layer.
    pub layer: Layer,
    /// Stroke width (mm).
    pub width: f64,
}

/// A circle given by its centre and a point on its circumference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Circle {
    /// Centre point.
    pub center: Point,
    /// Point on the circle.
    pub end: Point,
    /// Layer.
    pub layer: Layer,
    /// Stroke width (mm).
    pub width: f64,
}

impl Circle {
    /// Returns the circle radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        (self.end.x - self.center.x).hypot(self.end.y - self.center.y)
    }
}

/// Pad designator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PadNumber {
    /// Regular numbered pin.
    Numbered(u32),
    /// Named pad outside the pin numbering (e.g. `EP`).
    Named(String),
}

impl PadNumber {
    /// Designator of the exposed thermal pad.
    pub const EXPOSED_PAD: &'static str = "EP";

    /// Returns the pin number for numbered pads.
    #[must_use]
    pub const fn as_number(&self) -> Option<u32> {
        match self {
            Self::Numbered(n) => Some(*n),
            Self::Named(_) => None,
        }
    }
}

impl fmt::Display for PadNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numbered(n) => write!(f, "{n}"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// A rectangular SMD pad.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pad {
    /// Pad designator.
    pub number: PadNumber,
    /// Pad centre.
    pub at: Point,
    /// Size in X (mm).
    pub size_x: f64,
    /// Size in Y (mm).
    pub size_y: f64,
    /// Layers the pad exists on.
    pub layers: LayerSet,
    /// Solder mask margin (mm).
    pub solder_mask_margin: f64,
    /// Solder paste margin ratio, `paste_ratio - 1.0`.
    pub solder_paste_margin_ratio: f64,
}

impl Pad {
    /// Creates a rectangular SMD pad on the front copper, paste and mask layers.
    ///
    /// `paste_ratio` is the paste aperture size relative to the pad; KiCad
    /// stores it as a margin ratio, so 1.0 becomes 0.0 and 0.9 becomes -0.1.
    #[must_use]
    pub fn smd(
        number: PadNumber,
        at: Point,
        size_x: f64,
        size_y: f64,
        mask_expansion: f64,
        paste_ratio: f64,
    ) -> Self {
        Self {
            number,
            at,
            size_x,
            size_y,
            layers: LayerSet::SMD,
            solder_mask_margin: mask_expansion,
            solder_paste_margin_ratio: paste_ratio - 1.0,
        }
    }

    /// Minimum X of the pad rectangle.
    #[must_use]
    pub fn min_x(&self) -> f64 {
        self.at.x - self.size_x / 2.0
    }

    /// Maximum X of the pad rectangle.
    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.at.x + self.size_x / 2.0
    }
}

/// A drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    /// Text anchor.
    Text(Text),
    /// Line segment.
    Line(Line),
    /// Circle.
    Circle(Circle),
    /// Pad.
    Pad(Pad),
}

/// Generated footprint geometry.
///
/// Built once by a generator and not modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeometryDocument {
    name: String,
    attribute: Attribute,
    primitives: Vec<Primitive>,
}

impl GeometryDocument {
    /// Package name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mounting attribute.
    #[must_use]
    pub const fn attribute(&self) -> Attribute {
        self.attribute
    }

    /// All primitives in emission order.
    #[must_use]
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// All pads, numbered and named.
    pub fn pads(&self) -> impl Iterator<Item = &Pad> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Pad(pad) => Some(pad),
            _ => None,
        })
    }

    /// Pads carrying a pin number.
    pub fn numbered_pads(&self) -> impl Iterator<Item = &Pad> {
        self.pads()
            .filter(|pad| matches!(pad.number, PadNumber::Numbered(_)))
    }

    /// Fabrication and other outline segments.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Line(line) => Some(line),
            _ => None,
        })
    }

    /// Text anchors.
    pub fn texts(&self) -> impl Iterator<Item = &Text> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text(text) => Some(text),
            _ => None,
        })
    }

    /// Pin-1 locator, if any.
    #[must_use]
    pub fn marker(&self) -> Option<&Circle> {
        self.primitives.iter().find_map(|p| match p {
            Primitive::Circle(circle) => Some(circle),
            _ => None,
        })
    }

    /// Looks up a pad by designator.
    #[must_use]
    pub fn pad(&self, number: &PadNumber) -> Option<&Pad> {
        self.pads().find(|pad| &pad.number == number)
    }
}

/// Accumulates primitives for a [`GeometryDocument`].
#[derive(Debug)]
pub(crate) struct DocumentBuilder {
    name: String,
    primitives: Vec<Primitive>,
}

impl DocumentBuilder {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primitives: Vec::new(),
        }
    }

    /// Adds the hidden reference anchor and the visible value anchor.
    pub(crate) fn texts(mut self, reference_at: Point, value_at: Point) -> Self {
        self.primitives.push(Primitive::Text(Text {
            kind: TextKind::Reference,
            text: REFERENCE_PLACEHOLDER.to_string(),
            at: reference_at,
            layer: Layer::FrontSilkscreen,
            hidden: true,
        }));
        let value = self.name.clone();
        self.primitives.push(Primitive::Text(Text {
            kind: TextKind::Value,
            text: value,
            at: value_at,
            layer: Layer::FrontFab,
            hidden: false,
        }));
        self
    }

    /// Adds a closed body rectangle on the fabrication layer.
    pub(crate) fn fab_outline(mut self, body_length: f64, body_width: f64) -> Self {
        let hl = body_length / 2.0;
        let hw = body_width / 2.0;
        let corners = [
            Point::new(-hl, -hw),
            Point::new(hl, -hw),
            Point::new(hl, hw),
            Point::new(-hl, hw),
            Point::new(-hl, -hw),
        ];
        self.primitives
            .extend(corners.windows(2).map(|pair| {
                Primitive::Line(Line {
                    start: pair[0],
                    end: pair[1],
                    layer: Layer::FrontFab,
                    width: FAB_LINE_WIDTH,
                })
            }));
        self
    }

    /// Adds the pin-1 locator near the top-left body corner.
    pub(crate) fn pin1_marker(mut self, body_length: f64, body_width: f64) -> Self {
        let hl = body_length / 2.0;
        let hw = body_width / 2.0;
        let center = Point::new(-hl + MARKER_INSET, -hw + MARKER_INSET);
        self.primitives.push(Primitive::Circle(Circle {
            center,
            end: Point::new(center.x - MARKER_RADIUS, center.y),
            layer: Layer::FrontSilkscreen,
            width: MARKER_LINE_WIDTH,
        }));
        self
    }

    pub(crate) fn pad(mut self, pad: Pad) -> Self {
        self.primitives.push(Primitive::Pad(pad));
        self
    }

    pub(crate) fn pads(mut self, pads: impl IntoIterator<Item = Pad>) -> Self {
        self.primitives.extend(pads.into_iter().map(Primitive::Pad));
        self
    }

    pub(crate) fn build(self) -> GeometryDocument {
        GeometryDocument {
            name: self.name,
            attribute: Attribute::Smd,
            primitives: self.primitives,
        }
    }
}

/// Package generator trait.
pub trait FootprintGenerator {
    /// Generates the footprint geometry.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the parameters violate the package
    /// family's constraints.
    fn generate(&self) -> FootprintResult<GeometryDocument>;

    /// Package name used for the document and the output file.
    fn name(&self) -> &str;
}

/// A fully parameterised footprint of any supported family.
#[derive(Debug, Clone, PartialEq)]
pub enum Footprint {
    /// Two-pad passive.
    TwoPad(TwoPadParams),
    /// Dual-row leaded.
    DualRow(DualRowParams),
    /// Quad-leaded (QFN or QFP).
    Quad(QuadParams),
}

impl FootprintGenerator for Footprint {
    fn generate(&self) -> FootprintResult<GeometryDocument> {
        match self {
            Self::TwoPad(p) => two_pad::generate(p),
            Self::DualRow(p) => dual_row::generate(p),
            Self::Quad(p) => quad::generate(p),
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::TwoPad(p) => &p.name,
            Self::DualRow(p) => &p.name,
            Self::Quad(p) => &p.name,
        }
    }
}
