//! Package-guess files.
//!
//! A package guess is a JSON record of package dimensions read off a
//! datasheet, usually by a heuristic extractor and confirmed by a person:
//!
//! ```json
//! {
//!   "pkg_type": "qfn",
//!   "pins": 32,
//!   "pitch": 0.5,
//!   "body_l": 5.0,
//!   "body_w": 5.0,
//!   "pad_l": 0.6,
//!   "pad_w": 0.25,
//!   "ep_l": 3.2,
//!   "ep_w": 3.2
//! }
//! ```
//!
//! Any dimension may be `null`; missing ones are reported when the footprint
//! is built.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::footprint::{FootprintError, FootprintResult, PackageFamily, PackageInputs};

/// Best-effort package dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageGuess {
    /// Package type: `qfn`, `qfp`, `soic` or `unknown`.
    pub pkg_type: String,
    /// Pin count.
    #[serde(default)]
    pub pins: Option<u32>,
    /// Pitch (mm).
    #[serde(default)]
    pub pitch: Option<f64>,
    /// Body length (mm).
    #[serde(default)]
    pub body_l: Option<f64>,
    /// Body width (mm).
    #[serde(default)]
    pub body_w: Option<f64>,
    /// Terminal length (mm).
    #[serde(default)]
    pub pad_l: Option<f64>,
    /// Terminal width (mm).
    #[serde(default)]
    pub pad_w: Option<f64>,
    /// Exposed pad length (mm).
    #[serde(default)]
    pub ep_l: Option<f64>,
    /// Exposed pad width (mm).
    #[serde(default)]
    pub ep_w: Option<f64>,
    /// Pad row offset for dual-row packages (mm).
    #[serde(default)]
    pub row_offset: Option<f64>,
}

impl PackageGuess {
    /// Parses a guess from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the text does not match the guess layout.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Loads a guess from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`FootprintError::FileRead`] or [`FootprintError::GuessParse`].
    pub fn load(path: &Path) -> FootprintResult<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| FootprintError::file_read(path, e))?;
        let guess = Self::from_json(&contents).map_err(|e| FootprintError::GuessParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!(path = %path.display(), pkg_type = %guess.pkg_type, "Loaded package guess");
        Ok(guess)
    }

    /// Package family named by `pkg_type`.
    ///
    /// # Errors
    ///
    /// Returns [`FootprintError::UnsupportedPackage`] for `unknown` or any
    /// type without a generator.
    pub fn family(&self) -> FootprintResult<PackageFamily> {
        PackageFamily::from_str_loose(&self.pkg_type).ok_or_else(|| {
            FootprintError::UnsupportedPackage {
                package: self.pkg_type.clone(),
            }
        })
    }

    /// Converts the guess into generator inputs.
    #[must_use]
    pub fn to_inputs(&self, name: Option<String>) -> PackageInputs {
        PackageInputs {
            name,
            pins: self.pins,
            pitch: self.pitch,
            body_length: self.body_l,
            body_width: self.body_w,
            pad_length: self.pad_l,
            pad_width: self.pad_w,
            row_offset: self.row_offset,
            ep_length: self.ep_l,
            ep_width: self.ep_w,
            ..PackageInputs::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footprint::inputs::FootprintDefaults;
    use crate::footprint::FootprintGenerator;

    const QFN_GUESS: &str = r#"{
        "pkg_type": "qfn",
        "pins": 32,
        "pitch": 0.5,
        "body_l": 5.0,
        "body_w": 5.0,
        "pad_l": 0.6,
        "pad_w": 0.25,
        "ep_l": 3.2,
        "ep_w": 3.2
    }"#;

    #[test]
    fn parses_and_builds_qfn() {
        let guess = PackageGuess::from_json(QFN_GUESS).unwrap();
        assert_eq!(guess.family().unwrap(), PackageFamily::Qfn);

        let doc = guess
            .to_inputs(None)
            .build(PackageFamily::Qfn, &FootprintDefaults::default())
            .unwrap()
            .generate()
            .unwrap();
        assert_eq!(doc.pads().count(), 33);
    }

    #[test]
    fn unknown_package_is_rejected() {
        let guess = PackageGuess::from_json(r#"{"pkg_type": "unknown"}"#).unwrap();
        assert!(matches!(
            guess.family(),
            Err(FootprintError::UnsupportedPackage { .. })
        ));
    }

    #[test]
    fn null_dimensions_become_missing_parameters() {
        let guess =
            PackageGuess::from_json(r#"{"pkg_type": "qfp", "pins": 64, "pitch": null}"#).unwrap();
        let err = guess
            .to_inputs(None)
            .build(guess.family().unwrap(), &FootprintDefaults::default())
            .unwrap_err();
        assert!(matches!(
            err,
            FootprintError::MissingParameter { name: "pitch", .. }
        ));
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("guess.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = PackageGuess::load(&path).unwrap_err();
        assert!(matches!(err, FootprintError::GuessParse { .. }));
        assert!(err.to_string().contains("guess.json"));
    }

    #[test]
    fn load_missing_file() {
        let err = PackageGuess::load(Path::new("/nonexistent/guess.json")).unwrap_err();
        assert!(matches!(err, FootprintError::FileRead { .. }));
    }
}
