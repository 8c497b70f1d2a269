//! Landmark Feature Extraction

use pose_capture::landmark::{index, Landmark};
use tracing::trace;

use crate::features::PostureFeatures;
use crate::geometry::guard_span;

fn get(landmarks: &[Landmark], idx: usize) -> Landmark {
    landmarks.get(idx).copied().unwrap_or_default()
}

/// Extract the seven posture channels from one snapshot's landmark arrays
///
/// `world` carries metric/depth-aware landmarks and drives the angle
/// channels; `frame` carries frame-normalized landmarks and drives the ratio
/// channels. Pure: identical inputs always yield identical output, and every
/// channel is finite even for all-zero landmark arrays.
pub fn extract_features(world: &[Landmark], frame: &[Landmark]) -> PostureFeatures {
    // Angle channels from metric space. Convention: y grows downward,
    // z decreases toward the camera, so leaning in reads as positive.
    let l_ear_w = get(world, index::LEFT_EAR);
    let r_ear_w = get(world, index::RIGHT_EAR);
    let l_shoulder_w = get(world, index::LEFT_SHOULDER);
    let r_shoulder_w = get(world, index::RIGHT_SHOULDER);
    let l_hip_w = get(world, index::LEFT_HIP);
    let r_hip_w = get(world, index::RIGHT_HIP);

    let ear_mid = Landmark::midpoint(&l_ear_w, &r_ear_w);
    let shoulder_mid = Landmark::midpoint(&l_shoulder_w, &r_shoulder_w);
    let hip_mid = Landmark::midpoint(&l_hip_w, &r_hip_w);

    // Shoulder-mid -> ear-mid vs vertical: how far the head sits in front
    // of the shoulders.
    let head_forward_angle = (shoulder_mid.z - ear_mid.z)
        .atan2(shoulder_mid.y - ear_mid.y)
        .to_degrees();

    // Hip-mid -> shoulder-mid vs vertical: torso lean.
    let torso_angle = (hip_mid.z - shoulder_mid.z)
        .atan2(hip_mid.y - shoulder_mid.y)
        .to_degrees();

    // Ear line vs horizontal: head roll, signed. The horizontal component is
    // taken as a magnitude so a mirrored ear order cannot wrap the angle.
    let head_tilt_angle = (l_ear_w.y - r_ear_w.y)
        .atan2((l_ear_w.x - r_ear_w.x).abs())
        .to_degrees();

    // Shoulder line vs horizontal, magnitude only.
    let shoulder_diff = (l_shoulder_w.y - r_shoulder_w.y)
        .abs()
        .atan2((l_shoulder_w.x - r_shoulder_w.x).abs())
        .to_degrees();

    // Ratio channels from the visual frame.
    let nose = get(frame, index::NOSE);
    let l_ear = get(frame, index::LEFT_EAR);
    let r_ear = get(frame, index::RIGHT_EAR);

    let ear_span = (l_ear.x - r_ear.x).abs();
    let face_frame_ratio = ear_span;
    let face_y = nose.y;
    let nose_to_ear_avg = (nose.planar_distance(&l_ear) + nose.planar_distance(&r_ear))
        / 2.0
        / guard_span(ear_span);

    let features = PostureFeatures {
        head_forward_angle,
        torso_angle,
        head_tilt_angle,
        face_frame_ratio,
        face_y,
        nose_to_ear_avg,
        shoulder_diff,
    };

    trace!(
        head_forward = features.head_forward_angle,
        torso = features.torso_angle,
        tilt = features.head_tilt_angle,
        "extracted posture features"
    );

    features
}
