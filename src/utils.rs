//! Helper functions

use std::f64::consts::PI;
use nalgebra::Isometry3;
use tracing::debug;
use crate::kinematic_traits::Joints;

/// Checks the solution for validity. Failed poses of a batch are reported as rows of NaN.
pub fn is_valid(qs: &Joints) -> bool {
    qs.iter().all(|&q| q.is_finite())
}

/// Normalize the angle into (-π, π].
pub fn normalize_angle(angle: f64) -> f64 {
    let mut normalized = angle % (2.0 * PI);
    if normalized > PI {
        normalized -= 2.0 * PI;
    } else if normalized <= -PI {
        normalized += 2.0 * PI;
    }
    normalized
}

/// Convert joints that are array of f64's in radians to
/// array of f32's in degrees
pub fn to_degrees(angles: &Joints) -> [f32; 6] {
    angles.map(|a| a.to_degrees() as f32)
}

/// Allows to specify joint values in degrees (converts to radians)
#[allow(dead_code)]
pub fn as_radians(degrees: [i32; 6]) -> Joints {
    std::array::from_fn(|i| (degrees[i] as f64).to_radians())
}

/// Format joint values, optionally converting radians to degrees.
pub fn format_joints(joints: &Joints, degrees: bool) -> String {
    let values: Vec<String> = joints
        .iter()
        .map(|q| if degrees { q.to_degrees() } else { *q })
        .map(|q| format!("{:8.4}", q))
        .collect();
    format!("[{}]", values.join(" "))
}

/// Compare two poses with the given tolerances, logging the difference if they do not match.
pub fn compare_poses(ta: &Isometry3<f64>, tb: &Isometry3<f64>,
                     distance_tolerance: f64, angular_tolerance: f64) -> bool {
    let translation_distance = (ta.translation.vector - tb.translation.vector).norm();
    let angular_distance = ta.rotation.angle_to(&tb.rotation);

    if translation_distance > distance_tolerance {
        debug!("Translation error: {}", translation_distance);
        return false;
    }

    if angular_distance > angular_tolerance {
        debug!("Angular error: {}", angular_distance);
        return false;
    }
    true
}
