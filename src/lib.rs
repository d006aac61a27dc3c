//! pcbai: parametric KiCad footprint generator
//!
//! Turns a handful of package dimensions into `.kicad_mod` footprints for
//! four package families: two-pad passives, dual-row SOIC style packages,
//! flush-lead QFN and gullwing QFP.
//!
//! # Architecture
//!
//! - **Parameter records** validate pin counts and dimensions on construction
//! - **Generators** are pure functions from a record to a [`footprint::GeometryDocument`]
//! - **Serializer and writer** render the document and place it in a library directory
//!
//! # Modules
//!
//! - [`config`] - Configuration loading and validation
//! - [`error`] - Error types
//! - [`footprint`] - Parameter records, geometry and generators
//! - [`guess`] - Package-guess JSON input
//! - [`kicad`] - `.kicad_mod` rendering and file output

pub mod config;
pub mod error;
pub mod footprint;
pub mod guess;
pub mod kicad;
