//! X-ray analysis state machine

use std::time::Duration;

use tracing::{debug, info};

use crate::config::XrayConfig;
use crate::schedule::Timeline;

/// Result text produced by every analysis
pub const ANALYSIS_RESULT: &str = "Analysis complete! No significant abnormalities detected in \
the X-ray image. The bone structure appears normal with no visible fractures or lesions.";

/// Shown next to every result
pub const ANALYSIS_DISCLAIMER: &str = "This analysis is for informational purposes only. \
Please consult with a healthcare professional for medical advice.";

/// Where the screen is in the select / analyze / read flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisState {
    Empty,
    Selected { uri: String },
    Analyzing { uri: String },
    Complete { uri: String, result: String },
}

impl AnalysisState {
    pub fn image_uri(&self) -> Option<&str> {
        match self {
            AnalysisState::Empty => None,
            AnalysisState::Selected { uri }
            | AnalysisState::Analyzing { uri }
            | AnalysisState::Complete { uri, .. } => Some(uri.as_str()),
        }
    }
}

/// The X-ray screen's state
#[derive(Debug)]
pub struct XrayAnalysis {
    config: XrayConfig,
    state: AnalysisState,
    /// Completion tokens; the value is the run number it belongs to
    timeline: Timeline<u64>,
    run: u64,
}

impl XrayAnalysis {
    pub fn new(config: XrayConfig) -> Self {
        Self {
            config,
            state: AnalysisState::Empty,
            timeline: Timeline::new(),
            run: 0,
        }
    }

    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self.state, AnalysisState::Analyzing { .. })
    }

    /// Choose an image, discarding any earlier result
    pub fn select_image(&mut self, uri: impl Into<String>) {
        let uri = uri.into();
        debug!("Selected X-ray image {}", uri);
        self.invalidate();
        self.state = AnalysisState::Selected { uri };
    }

    /// Start analysing the selected image. Does nothing with no image or
    /// while an analysis is already running. Returns whether one started.
    pub fn analyze(&mut self) -> bool {
        let uri = match &self.state {
            AnalysisState::Selected { uri } | AnalysisState::Complete { uri, .. } => uri.clone(),
            AnalysisState::Empty | AnalysisState::Analyzing { .. } => return false,
        };

        self.run += 1;
        self.timeline.schedule_in(self.config.analysis_delay(), self.run);
        info!("Analyzing X-ray image {}", uri);
        self.state = AnalysisState::Analyzing { uri };
        true
    }

    /// Advance the clock; returns true when an analysis completed
    pub fn advance(&mut self, by: Duration) -> bool {
        let fired = self.timeline.advance_by(by);
        self.complete(fired)
    }

    /// Finish any running analysis immediately
    pub fn flush(&mut self) -> bool {
        let fired = self.timeline.drain();
        self.complete(fired)
    }

    /// Time left until the running analysis completes
    pub fn remaining(&self) -> Option<Duration> {
        self.timeline
            .next_due()
            .map(|due| due.saturating_sub(self.timeline.now()))
    }

    /// Back to the empty screen
    pub fn reset(&mut self) {
        self.invalidate();
        self.state = AnalysisState::Empty;
    }

    fn invalidate(&mut self) {
        // Completions from an abandoned run must not land.
        self.timeline.retain(|_| false);
        self.run += 1;
    }

    fn complete(&mut self, fired: Vec<u64>) -> bool {
        if !fired.contains(&self.run) {
            return false;
        }
        let AnalysisState::Analyzing { uri } = &self.state else {
            return false;
        };
        self.state = AnalysisState::Complete {
            uri: uri.clone(),
            result: ANALYSIS_RESULT.to_string(),
        };
        info!("X-ray analysis complete");
        true
    }
}

impl Default for XrayAnalysis {
    fn default() -> Self {
        Self::new(XrayConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_without_image_is_noop() {
        let mut xray = XrayAnalysis::default();
        assert!(!xray.analyze());
        assert_eq!(xray.state(), &AnalysisState::Empty);
    }

    #[test]
    fn test_full_flow() {
        let mut xray = XrayAnalysis::default();
        xray.select_image("file:///scan.png");
        assert!(xray.analyze());
        assert!(xray.is_analyzing());
        assert!(!xray.analyze());
        assert_eq!(xray.remaining(), Some(Duration::from_secs(3)));

        assert!(!xray.advance(Duration::from_millis(2999)));
        assert!(xray.advance(Duration::from_millis(1)));
        assert_eq!(
            xray.state(),
            &AnalysisState::Complete {
                uri: "file:///scan.png".to_string(),
                result: ANALYSIS_RESULT.to_string(),
            }
        );
    }

    #[test]
    fn test_new_image_clears_result_and_pending_run() {
        let mut xray = XrayAnalysis::default();
        xray.select_image("file:///a.png");
        xray.analyze();
        xray.select_image("file:///b.png");

        assert!(!xray.flush());
        assert_eq!(
            xray.state(),
            &AnalysisState::Selected {
                uri: "file:///b.png".to_string()
            }
        );
    }

    #[test]
    fn test_reset() {
        let mut xray = XrayAnalysis::default();
        xray.select_image("file:///a.png");
        xray.analyze();
        xray.reset();
        assert!(!xray.flush());
        assert_eq!(xray.state().image_uri(), None);
    }

    #[test]
    fn test_reanalyze_completed_image() {
        let mut xray = XrayAnalysis::new(XrayConfig {
            analysis_delay_ms: 10,
        });
        xray.select_image("file:///a.png");
        xray.analyze();
        assert!(xray.flush());
        assert!(xray.analyze());
        assert!(xray.advance(Duration::from_millis(10)));
    }

    #[test]
    fn test_disclaimer_mentions_professional() {
        assert!(ANALYSIS_DISCLAIMER.contains("healthcare professional"));
    }
}
