//! presetcard - Library for rendering loadout preset records into PNG cards
//!
//! This library provides functionality to:
//! - Normalize raw preset documents against an item catalog
//! - Compute the card layout, including conditional "Alternatives" blocks
//! - Resolve item icons concurrently with a two-tier fallback
//! - Composite the final raster and encode it as PNG

pub mod catalog;
pub mod cli;
pub mod compositor;
pub mod fetch;
pub mod layout;
pub mod models;
pub mod normalize;
pub mod output;
pub mod render;
pub mod text;
