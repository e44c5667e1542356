//! Namesake distance ratios.
//!
//! Pulls (namesake, original) place pairs out of a list page, geocodes both
//! sides, and finds the two namesakes that sit closest together relative to
//! how far apart the places they were named after are.

pub mod distance;
pub mod document;
pub mod extract;
pub mod location;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod search;
