//! Output helpers: screen layouts and indicator patterns.

pub mod display;
pub mod patterns;
