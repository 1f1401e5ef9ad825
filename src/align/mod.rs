//! Local alignment of fingerprint sequences.

pub mod engine;
pub mod scoring;

pub use engine::{align, AlignConfig, Alignment};
pub use scoring::FingerprintScoring;
