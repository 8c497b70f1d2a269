//! Calibration Session Manager

use posture_features::{FeatureChannel, PostureFeatures, ScreenAngleReference, ScreenAngleSignals};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::baseline::{BaselineSpread, BaselineSummary, CalibrationBaseline};
use crate::CalibrationError;

/// Progress report for one accumulated sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleProgress {
    /// Fill fraction of the current batch, clamped to [0,1]
    pub fraction: f32,
    /// Whether the target sample count has been reached
    pub complete: bool,
    pub sample_count: usize,
    pub total_samples: usize,
}

/// One closed per-angle sample batch
#[derive(Debug, Clone)]
struct AngleBatch {
    angle_degrees: f32,
    features: Vec<PostureFeatures>,
    signals: Vec<ScreenAngleSignals>,
}

/// Accumulates posture samples during a guided calibration session
///
/// Single-angle flow: `add_sample` until complete, then `compute_baseline`.
/// Multi-angle flow: repeat `start_angle_collection` + samples +
/// `complete_current_angle` per screen angle, then
/// `compute_multi_angle_baseline`. Step sequencing and sample cadence are
/// owned by the external calibration wizard, not this type.
pub struct CalibrationSession {
    target_samples: usize,
    features: Vec<PostureFeatures>,
    signals: Vec<ScreenAngleSignals>,
    open_angle: Option<f32>,
    batches: Vec<AngleBatch>,
}

impl CalibrationSession {
    /// Create a session collecting `target_samples` per batch
    pub fn new(target_samples: usize) -> Self {
        info!(target_samples, "starting calibration session");
        Self {
            target_samples: target_samples.max(1),
            features: Vec::new(),
            signals: Vec::new(),
            open_angle: None,
            batches: Vec::new(),
        }
    }

    /// Accumulate one feature sample into the open batch
    pub fn add_sample(&mut self, features: PostureFeatures) -> SampleProgress {
        self.features.push(features);
        self.progress()
    }

    /// Accumulate one feature sample with its screen-angle signals
    ///
    /// The signals variant is required for multi-angle calibration; the
    /// plain variant leaves the batch without a usable angle reference.
    pub fn add_sample_with_signals(
        &mut self,
        features: PostureFeatures,
        signals: ScreenAngleSignals,
    ) -> SampleProgress {
        self.features.push(features);
        self.signals.push(signals);
        self.progress()
    }

    /// Open a fresh batch for the given screen angle
    ///
    /// Any samples in the currently open batch that were not closed via
    /// `complete_current_angle` are discarded.
    pub fn start_angle_collection(&mut self, angle_degrees: f32) {
        debug!(angle_degrees, "opening angle batch");
        self.features.clear();
        self.signals.clear();
        self.open_angle = Some(angle_degrees);
    }

    /// Close the open batch into the ordered batch list
    pub fn complete_current_angle(&mut self) -> Result<(), CalibrationError> {
        if self.features.is_empty() {
            return Err(CalibrationError::EmptyAngleBatch);
        }
        let angle_degrees = self.open_angle.take().unwrap_or(0.0);
        debug!(
            angle_degrees,
            samples = self.features.len(),
            "closing angle batch"
        );
        self.batches.push(AngleBatch {
            angle_degrees,
            features: std::mem::take(&mut self.features),
            signals: std::mem::take(&mut self.signals),
        });
        Ok(())
    }

    /// Number of closed angle batches
    pub fn completed_angles(&self) -> usize {
        self.batches.len()
    }

    /// Reduce the open batch to a single-angle baseline
    ///
    /// Returns the per-channel mean plus the population standard deviation
    /// (diagnostic only). Never silently produces a baseline of zeros.
    pub fn compute_baseline(&self) -> Result<BaselineSummary, CalibrationError> {
        if self.features.is_empty() {
            return Err(CalibrationError::EmptySession);
        }
        let mean = mean_features(&self.features);
        let spread = spread_features(&self.features, &mean);
        info!(samples = self.features.len(), "computed calibration baseline");
        Ok(BaselineSummary {
            baseline: CalibrationBaseline::new(mean, now_ms()),
            spread: BaselineSpread {
                per_channel: spread,
            },
        })
    }

    /// Reduce the closed batches to a multi-angle baseline
    ///
    /// The first closed batch is the canonical reference posture: its mean
    /// becomes the operating baseline. Every closed batch (including the
    /// first) contributes one averaged screen-angle reference point.
    pub fn compute_multi_angle_baseline(&self) -> Result<BaselineSummary, CalibrationError> {
        let first = self.batches.first().ok_or(CalibrationError::NoAngleBatches)?;

        let mean = mean_features(&first.features);
        let spread = spread_features(&first.features, &mean);

        let angle_references = self
            .batches
            .iter()
            .map(|batch| {
                ScreenAngleReference::capture(batch.angle_degrees, mean_signals(&batch.signals))
            })
            .collect();

        info!(
            angles = self.batches.len(),
            samples = first.features.len(),
            "computed multi-angle calibration baseline"
        );

        Ok(BaselineSummary {
            baseline: CalibrationBaseline {
                features: mean,
                timestamp_ms: now_ms(),
                angle_references,
            },
            spread: BaselineSpread {
                per_channel: spread,
            },
        })
    }

    /// Discard all accumulated state, keeping the target sample count
    pub fn reset(&mut self) {
        self.features.clear();
        self.signals.clear();
        self.open_angle = None;
        self.batches.clear();
    }

    fn progress(&self) -> SampleProgress {
        let count = self.features.len();
        SampleProgress {
            fraction: (count as f32 / self.target_samples as f32).min(1.0),
            complete: count >= self.target_samples,
            sample_count: count,
            total_samples: self.target_samples,
        }
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn mean_features(samples: &[PostureFeatures]) -> PostureFeatures {
    let n = samples.len().max(1) as f32;
    let mut mean = PostureFeatures::default();
    for &channel in &FeatureChannel::ALL {
        let sum: f32 = samples.iter().map(|s| s.channel(channel)).sum();
        mean.set_channel(channel, sum / n);
    }
    mean
}

/// Population standard deviation per channel
fn spread_features(samples: &[PostureFeatures], mean: &PostureFeatures) -> PostureFeatures {
    let n = samples.len().max(1) as f32;
    let mut spread = PostureFeatures::default();
    for &channel in &FeatureChannel::ALL {
        let var: f32 = samples
            .iter()
            .map(|s| {
                let d = s.channel(channel) - mean.channel(channel);
                d * d
            })
            .sum::<f32>()
            / n;
        spread.set_channel(channel, var.sqrt());
    }
    spread
}

fn mean_signals(samples: &[ScreenAngleSignals]) -> ScreenAngleSignals {
    let n = samples.len().max(1) as f32;
    ScreenAngleSignals {
        face_y: samples.iter().map(|s| s.face_y).sum::<f32>() / n,
        nose_chin_ratio: samples.iter().map(|s| s.nose_chin_ratio).sum::<f32>() / n,
        eye_mouth_ratio: samples.iter().map(|s| s.eye_mouth_ratio).sum::<f32>() / n,
    }
}
