pub mod consolidator;
pub mod premiation;

pub use consolidator::{consolidate, ratio_or_zero};
pub use premiation::PremiationEngine;
