//! Core library for the competence-map command line application.
//!
//! The library turns a competence category taxonomy and the skill, education,
//! and license sheets that hang off it into one flattened table for bulk
//! import into a competence map. IO adapters live under
//! [`competence::map::io`], data representations inside
//! [`competence::map::model`], the reshaping steps in
//! [`competence::map::flatten`], and run orchestration under
//! [`competence::map::generate`].

pub mod competence;

pub use competence::map::{MapError, Result, error, flatten, generate, io, model};
