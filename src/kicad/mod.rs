//! KiCad footprint (`.kicad_mod`) output.
//!
//! Renders a [`GeometryDocument`] as the legacy `(module ...)` s-expression
//! accepted by KiCad 5 and later:
//!
//! ```text
//! (module R_0603 (layer F.Cu) (tedit 5B3079AF)
//!   (attr smd)
//!   (fp_text reference REF** (at 0.000 -1.500) (layer F.SilkS) hide (effects ...))
//!   (fp_line (start -0.800 -0.400) (end 0.800 -0.400) (layer F.Fab) (width 0.100))
//!   (pad 1 smd rect (at -0.850 0.000) (size 0.900 0.800) (layers F.Cu F.Paste F.Mask) ...)
//! )
//! ```
//!
//! Every number is written with three decimals, so output is byte-identical
//! for identical inputs.

pub mod writer;

pub use writer::ModuleWriter;

use std::fmt::Write;

use crate::footprint::{
    Attribute, Circle, GeometryDocument, Line, Pad, Primitive, Text, TextKind,
};

/// File extension for KiCad footprints.
pub const EXTENSION: &str = "kicad_mod";

/// Fixed edit timestamp.
const TEDIT: &str = "5B3079AF";

/// Font used for reference and value text.
const TEXT_EFFECTS: &str = "(effects (font (size 1 1) (thickness 0.15)))";

/// Renders a document as `.kicad_mod` text, ending with a newline.
#[must_use]
pub fn render(doc: &GeometryDocument) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "(module {} (layer F.Cu) (tedit {TEDIT})", doc.name());
    match doc.attribute() {
        Attribute::Smd => out.push_str("  (attr smd)\n"),
    }

    for primitive in doc.primitives() {
        match primitive {
            Primitive::Text(text) => write_text(&mut out, text),
            Primitive::Line(line) => write_line(&mut out, line),
            Primitive::Circle(circle) => write_circle(&mut out, circle),
            Primitive::Pad(pad) => write_pad(&mut out, pad),
        }
    }

    out.push_str(")\n");
    out
}

fn write_text(out: &mut String, text: &Text) {
    let kind = match text.kind {
        TextKind::Reference => "reference",
        TextKind::Value => "value",
    };
    let hide = if text.hidden { " hide" } else { "" };
    let _ = writeln!(
        out,
        "  (fp_text {kind} {} (at {} {}) (layer {}){hide} {TEXT_EFFECTS})",
        text.text,
        mm(text.at.x),
        mm(text.at.y),
        text.layer,
    );
}

fn write_line(out: &mut String, line: &Line) {
    let _ = writeln!(
        out,
        "  (fp_line (start {} {}) (end {} {}) (layer {}) (width {}))",
        mm(line.start.x),
        mm(line.start.y),
        mm(line.end.x),
        mm(line.end.y),
        line.layer,
        mm(line.width),
    );
}

fn write_circle(out: &mut String, circle: &Circle) {
    let _ = writeln!(
        out,
        "  (fp_circle (center {} {}) (end {} {}) (layer {}) (width {}))",
        mm(circle.center.x),
        mm(circle.center.y),
        mm(circle.end.x),
        mm(circle.end.y),
        circle.layer,
        mm(circle.width),
    );
}

fn write_pad(out: &mut String, pad: &Pad) {
    let _ = writeln!(
        out,
        "  (pad {} smd rect (at {} {}) (size {} {}) (layers {}) (solder_mask_margin {}) (solder_paste_margin_ratio {}))",
        pad.number,
        mm(pad.at.x),
        mm(pad.at.y),
        mm(pad.size_x),
        mm(pad.size_y),
        pad.layers.kicad_names().join(" "),
        mm(pad.solder_mask_margin),
        mm(pad.solder_paste_margin_ratio),
    );
}

/// Formats a value with three decimals; values that round to zero print as `0.000`.
fn mm(value: f64) -> String {
    let text = format!("{value:.3}");
    if text == "-0.000" {
        "0.000".to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footprint::{two_pad, DualRowParams, QuadParams, TwoPadParams};

    #[test]
    fn mm_normalises_negative_zero() {
        assert_eq!(mm(-0.0), "0.000");
        assert_eq!(mm(-0.0001), "0.000");
        assert_eq!(mm(-0.85), "-0.850");
        assert_eq!(mm(1.27), "1.270");
    }

    #[test]
    fn renders_two_pad_footprint() {
        let params = TwoPadParams::new("R_0603", 1.6, 0.8, 0.9, 0.8, 0.8).unwrap();
        let text = render(&two_pad::generate(&params).unwrap());

        assert!(text.starts_with("(module R_0603 (layer F.Cu) (tedit 5B3079AF)\n  (attr smd)\n"));
        assert!(text.contains(
            "  (fp_text reference REF** (at 0.000 -1.500) (layer F.SilkS) hide (effects (font (size 1 1) (thickness 0.15))))\n"
        ));
        assert!(text.contains(
            "  (fp_text value R_0603 (at 0.000 1.500) (layer F.Fab) (effects (font (size 1 1) (thickness 0.15))))\n"
        ));
        assert!(text.contains(
            "  (fp_line (start -0.800 -0.400) (end 0.800 -0.400) (layer F.Fab) (width 0.100))\n"
        ));
        assert!(text.contains(
            "  (pad 1 smd rect (at -0.850 0.000) (size 0.900 0.800) (layers F.Cu F.Paste F.Mask) (solder_mask_margin 0.050) (solder_paste_margin_ratio 0.000))\n"
        ));
        assert!(text.contains("  (pad 2 smd rect (at 0.850 0.000)"));
        assert!(text.ends_with(")\n"));
        assert_eq!(text.matches("(pad ").count(), 2);
    }

    #[test]
    fn renders_paste_reduction() {
        let params = TwoPadParams::new("R", 1.6, 0.8, 0.9, 0.8, 0.8)
            .unwrap()
            .with_paste_ratio(0.9);
        let text = render(&two_pad::generate(&params).unwrap());
        assert!(text.contains("(solder_paste_margin_ratio -0.100)"));
    }

    #[test]
    fn renders_marker_circle() {
        let params = DualRowParams::new("SOIC-8", 8, 1.27, 4.9, 3.9, 1.5, 0.6, 2.3).unwrap();
        let text = render(&crate::footprint::dual_row::generate(&params).unwrap());
        assert!(text.contains(
            "  (fp_circle (center -1.850 -1.350) (end -2.150 -1.350) (layer F.SilkS) (width 0.200))\n"
        ));
    }

    #[test]
    fn renders_exposed_pad() {
        let params = QuadParams::flush(
            "QFN-16",
            16,
            0.5,
            3.0,
            3.0,
            0.6,
            0.25,
            Some(crate::footprint::ExposedPad::new(1.7, 1.7)),
        )
        .unwrap();
        let text = render(&crate::footprint::quad::generate(&params).unwrap());
        assert!(text.contains("  (pad EP smd rect (at 0.000 0.000) (size 1.700 1.700)"));
        assert_eq!(text.matches("(pad ").count(), 17);
    }
}
