//! Per-Frame Orchestration

use calibration::{AdaptiveBaseline, CalibrationBaseline};
use pose_capture::landmark::index;
use pose_capture::Snapshot;
use posture_features::{
    compensate, estimate_angle_change, extract_features, extract_signals, FeatureChannel,
    PostureFeatures, ScreenAngleReference,
};
use signal_filters::{EmaFilter, JitterFilter};
use tracing::{debug, info};

use crate::config::AnalyzerConfig;
use crate::result::{ClassificationResult, DetailedAnalysis};
use crate::rules::{evaluate, RuleToggles};
use crate::thresholds::RuleThresholds;
use crate::AnalyzerError;

/// Landmarks whose visibility gates classification
const CRITICAL_LANDMARKS: [usize; 4] = [
    index::LEFT_EAR,
    index::RIGHT_EAR,
    index::LEFT_SHOULDER,
    index::RIGHT_SHOULDER,
];

/// Critical landmarks below 0.5 visibility before a frame is discarded
const DISCARD_COUNT: usize = 3;

/// One EMA + jitter-hold chain per feature channel
struct FilterBank {
    chains: Vec<(FeatureChannel, EmaFilter, JitterFilter)>,
}

impl FilterBank {
    fn new(config: &AnalyzerConfig) -> Result<Self, AnalyzerError> {
        let mut chains = Vec::with_capacity(FeatureChannel::ALL.len());
        for &channel in &FeatureChannel::ALL {
            let jitter_threshold = if channel.is_angle() {
                config.angle_jitter_threshold
            } else {
                config.ratio_jitter_threshold
            };
            chains.push((
                channel,
                EmaFilter::new(config.smoothing_alpha)?,
                JitterFilter::new(jitter_threshold)?,
            ));
        }
        Ok(Self { chains })
    }

    fn apply(&mut self, features: &PostureFeatures) -> PostureFeatures {
        let mut smoothed = *features;
        for (channel, ema, jitter) in &mut self.chains {
            let value = jitter.update(ema.update(features.channel(*channel)));
            smoothed.set_channel(*channel, value);
        }
        smoothed
    }

    fn reset(&mut self) {
        for (_, ema, jitter) in &mut self.chains {
            ema.reset();
            jitter.reset();
        }
    }
}

/// Classifies sitting posture frame by frame against a personal baseline
///
/// Owns all mutable pipeline state (filter bank, adaptive baseline); one
/// analyzer instance per monitored user/session, not safe for concurrent
/// calls without external mutual exclusion.
pub struct PostureAnalyzer {
    filters: FilterBank,
    adaptive: AdaptiveBaseline,
    sensitivity: f32,
    toggles: RuleToggles,
    screen_reference: Option<ScreenAngleReference>,
    last_timestamp_ms: Option<u64>,
}

impl PostureAnalyzer {
    /// Create an analyzer judging against `baseline`
    ///
    /// Fails only on invalid smoothing parameters in the config. A
    /// multi-angle baseline's first angle reference is installed for tilt
    /// compensation automatically.
    pub fn new(
        config: AnalyzerConfig,
        baseline: &CalibrationBaseline,
    ) -> Result<Self, AnalyzerError> {
        info!(
            sensitivity = config.sensitivity,
            alpha = config.smoothing_alpha,
            multi_angle = !baseline.angle_references.is_empty(),
            "creating posture analyzer"
        );
        Ok(Self {
            filters: FilterBank::new(&config)?,
            adaptive: AdaptiveBaseline::new(baseline),
            sensitivity: config.sensitivity,
            toggles: config.toggles,
            screen_reference: baseline.primary_reference().copied(),
            last_timestamp_ms: None,
        })
    }

    /// Classify one snapshot
    pub fn analyze(&mut self, snapshot: &Snapshot) -> ClassificationResult {
        self.analyze_detailed(snapshot).result
    }

    /// Classify one snapshot, returning pipeline intermediates as well
    pub fn analyze_detailed(&mut self, snapshot: &Snapshot) -> DetailedAnalysis {
        let confidence = self.confidence(snapshot);

        // A transient tracking loss presents as "no new information": the
        // frame must neither manufacture a violation nor corrupt filter or
        // baseline state.
        if self.should_discard(snapshot) {
            debug!(confidence, "discarding low-confidence snapshot");
            return DetailedAnalysis {
                result: ClassificationResult::low_confidence(confidence, snapshot.timestamp_ms),
                features: None,
                smoothed: None,
                deviations: None,
            };
        }

        let dt = self.frame_delta_secs(snapshot.timestamp_ms);
        self.last_timestamp_ms = Some(snapshot.timestamp_ms);

        let extracted = extract_features(&snapshot.world_landmarks, &snapshot.landmarks);
        let features = match &self.screen_reference {
            Some(reference) => {
                let signals = extract_signals(&snapshot.landmarks);
                let pitch_delta = estimate_angle_change(&signals, &reference.signals);
                compensate(&extracted, pitch_delta)
            }
            None => extracted,
        };

        let smoothed = self.filters.apply(&features);
        let deviations = compute_deviations(&smoothed, self.adaptive.current());
        let thresholds = RuleThresholds::scale(self.sensitivity);
        let violations = evaluate(&deviations, &thresholds, &self.toggles);
        let is_good = violations.is_empty();

        self.adaptive.update(is_good, &features, dt);

        debug!(
            is_good,
            violations = violations.len(),
            confidence,
            "classified snapshot"
        );

        DetailedAnalysis {
            result: ClassificationResult {
                is_good,
                violations,
                confidence,
                timestamp_ms: snapshot.timestamp_ms,
            },
            features: Some(features),
            smoothed: Some(smoothed),
            deviations: Some(deviations),
        }
    }

    /// Replace the baseline after recalibration
    ///
    /// Starts fresh drift tracking and installs the baseline's primary angle
    /// reference (cleared for a single-angle baseline). Smoothing-filter
    /// memory is deliberately kept: the sensor stream did not change, only
    /// the judgment reference did.
    pub fn update_calibration(&mut self, baseline: &CalibrationBaseline) {
        info!(
            multi_angle = !baseline.angle_references.is_empty(),
            "replacing calibration baseline"
        );
        self.adaptive = AdaptiveBaseline::new(baseline);
        self.screen_reference = baseline.primary_reference().copied();
    }

    /// Change the sensitivity dial; effective from the next frame
    pub fn update_sensitivity(&mut self, sensitivity: f32) {
        self.sensitivity = sensitivity;
    }

    /// Swap the rule toggle set; effective from the next frame
    pub fn update_rule_toggles(&mut self, toggles: RuleToggles) {
        self.toggles = toggles;
    }

    /// Install or clear the screen-angle reference for tilt compensation
    pub fn set_screen_reference(&mut self, reference: Option<ScreenAngleReference>) {
        self.screen_reference = reference;
    }

    /// The adaptive baseline state (for diagnostics)
    pub fn baseline(&self) -> &AdaptiveBaseline {
        &self.adaptive
    }

    /// Clear filter memory and restore the calibrated baseline
    pub fn reset(&mut self) {
        self.filters.reset();
        self.adaptive.reset();
        self.last_timestamp_ms = None;
    }

    /// Mean visibility over the four critical landmarks, clamped to [0,1]
    fn confidence(&self, snapshot: &Snapshot) -> f32 {
        let sum: f32 = CRITICAL_LANDMARKS
            .iter()
            .map(|&idx| snapshot.landmark(idx).visibility.clamp(0.0, 1.0))
            .sum();
        sum / CRITICAL_LANDMARKS.len() as f32
    }

    fn should_discard(&self, snapshot: &Snapshot) -> bool {
        let low = CRITICAL_LANDMARKS
            .iter()
            .filter(|&&idx| snapshot.landmark(idx).visibility < 0.5)
            .count();
        low >= DISCARD_COUNT
    }

    /// Seconds since the last processed frame; 0 on the first frame and for
    /// out-of-order timestamps
    fn frame_delta_secs(&self, timestamp_ms: u64) -> f32 {
        match self.last_timestamp_ms {
            Some(prev) if timestamp_ms > prev => (timestamp_ms - prev) as f32 / 1000.0,
            _ => 0.0,
        }
    }
}

/// Smoothed features minus the operating baseline, per channel
///
/// The head-tilt deviation is a magnitude: tilting to either side counts
/// against the tilt rule. Other channels keep their sign so only the "worse"
/// direction can fire.
fn compute_deviations(smoothed: &PostureFeatures, baseline: &PostureFeatures) -> PostureFeatures {
    let mut out = PostureFeatures::default();
    for &channel in &FeatureChannel::ALL {
        let mut dev = smoothed.channel(channel) - baseline.channel(channel);
        if channel == FeatureChannel::HeadTiltAngle {
            dev = dev.abs();
        }
        out.set_channel(channel, dev);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pose_capture::landmark::{Landmark, LANDMARK_COUNT};
    use proptest::prelude::*;

    fn neutral_baseline() -> CalibrationBaseline {
        CalibrationBaseline::new(
            PostureFeatures {
                head_forward_angle: 0.0,
                torso_angle: 0.0,
                head_tilt_angle: 0.0,
                face_frame_ratio: 0.12,
                face_y: 0.40,
                nose_to_ear_avg: 0.53,
                shoulder_diff: 0.0,
            },
            0,
        )
    }

    fn snapshot_with_visibility(vis: [f32; 4], timestamp_ms: u64) -> Snapshot {
        let mut frame = vec![Landmark::default(); LANDMARK_COUNT];
        for (i, &idx) in CRITICAL_LANDMARKS.iter().enumerate() {
            frame[idx].visibility = vis[i];
        }
        Snapshot::new(
            frame.clone(),
            vec![Landmark::default(); LANDMARK_COUNT],
            timestamp_ms,
            640,
            480,
        )
    }

    #[test]
    fn test_confidence_is_mean_visibility() {
        let analyzer =
            PostureAnalyzer::new(AnalyzerConfig::default(), &neutral_baseline()).unwrap();
        let snapshot = snapshot_with_visibility([1.0, 1.0, 0.5, 0.5], 0);
        assert!((analyzer.confidence(&snapshot) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_discard_needs_three_low_landmarks() {
        let analyzer =
            PostureAnalyzer::new(AnalyzerConfig::default(), &neutral_baseline()).unwrap();
        assert!(!analyzer.should_discard(&snapshot_with_visibility([0.1, 0.1, 0.9, 0.9], 0)));
        assert!(analyzer.should_discard(&snapshot_with_visibility([0.1, 0.1, 0.1, 0.9], 0)));
        assert!(analyzer.should_discard(&snapshot_with_visibility([0.0, 0.0, 0.0, 0.0], 0)));
    }

    #[test]
    fn test_low_confidence_frame_reports_good() {
        let mut analyzer =
            PostureAnalyzer::new(AnalyzerConfig::default(), &neutral_baseline()).unwrap();
        let detailed = analyzer.analyze_detailed(&snapshot_with_visibility([0.0; 4], 10));
        assert!(detailed.result.is_good);
        assert!(detailed.result.violations.is_empty());
        assert!(detailed.features.is_none());
        assert!(detailed.smoothed.is_none());
    }

    #[test]
    fn test_head_tilt_deviation_is_magnitude() {
        let smoothed = PostureFeatures {
            head_tilt_angle: -9.0,
            ..Default::default()
        };
        let dev = compute_deviations(&smoothed, &PostureFeatures::default());
        assert_eq!(dev.head_tilt_angle, 9.0);
    }

    #[test]
    fn test_frame_delta_clamps_out_of_order() {
        let mut analyzer =
            PostureAnalyzer::new(AnalyzerConfig::default(), &neutral_baseline()).unwrap();
        analyzer.last_timestamp_ms = Some(1000);
        assert_eq!(analyzer.frame_delta_secs(500), 0.0);
        assert_eq!(analyzer.frame_delta_secs(1500), 0.5);
    }

    #[test]
    fn test_invalid_alpha_fails_construction() {
        let config = AnalyzerConfig {
            smoothing_alpha: 0.0,
            ..Default::default()
        };
        assert!(PostureAnalyzer::new(config, &neutral_baseline()).is_err());
    }

    proptest! {
        #[test]
        fn prop_confidence_in_unit_range(vis in proptest::array::uniform4(-5.0f32..5.0)) {
            let analyzer =
                PostureAnalyzer::new(AnalyzerConfig::default(), &neutral_baseline()).unwrap();
            let confidence = analyzer.confidence(&snapshot_with_visibility(vis, 0));
            prop_assert!((0.0..=1.0).contains(&confidence));
        }
    }
}
