//! Simulated X-ray analysis
//!
//! There is no model behind this: analysis always completes after a fixed
//! delay with the same reassuring result.

pub mod analysis;

pub use analysis::{AnalysisState, XrayAnalysis, ANALYSIS_DISCLAIMER, ANALYSIS_RESULT};
