//! docnav - Browse structured product documentation from the terminal
//!
//! A documentation set is an ordered list of categories, each holding
//! sections with a stable ID. docnav resolves `#fragment` deep links to
//! sections, keeps a browser-style history, searches titles and
//! descriptions, and renders each section's markdown body.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{DocSet, DocsController, Fragment, Location, SectionId, SectionRegistry};
