//! Core building blocks: center crop and resampling, ROI annotation and
//! selection, processing parameters, and save helpers. These are the
//! primitives consumed by the high-level `api` module.
pub mod params;
pub mod processing;
pub mod selection;
