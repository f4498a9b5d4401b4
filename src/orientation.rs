//! Orientation stage of the inverse kinematics: J4 .. J6 of the spherical wrist.
//!
//! Once J1 .. J3 are known, the rotation R0_3 they produce is fixed. What remains of the target
//! rotation, R3_6 = R0_3ᵀ R0_6, must be realized by the wrist alone and is decomposed into
//! Euler angles along the wrist axes.

use std::f64::consts::PI;

use crate::geometry::{chain_transform, orthonormality_error, rotation_of};
use crate::ik_error::IkError;
use crate::kinematic_traits::{RotationMatrix, Singularity};
use crate::parameters::dh_kinematics::LinkGeometry;
use crate::position::ORTHONORMALITY_TOLERANCE;
use crate::utils::normalize_angle;

/// Below this value of sin(J5), J4 and J6 are treated as collinear.
pub const SINGULARITY_THRESHOLD: f64 = 1e-6;

/// Wrist joints with the singularity, if any, that constrained them.
#[derive(Debug, Clone, Copy)]
pub struct WristSolution {
    pub theta: [f64; 3],
    pub singularity: Option<Singularity>,
}

/// Rotation from the base to the frame of joint 3 (R0_3) for the given J1 .. J3.
pub fn base_to_elbow(geometry: &LinkGeometry, arm: &[f64; 3]) -> RotationMatrix {
    rotation_of(&chain_transform(&geometry.dh_table()[0..3], arm))
}

/// Rotation that J4 .. J6 must realize (R3_6).
pub fn wrist_rotation(geometry: &LinkGeometry, arm: &[f64; 3], r_target: &RotationMatrix)
                      -> Result<RotationMatrix, IkError> {
    let r3_6 = base_to_elbow(geometry, arm).transpose() * r_target;
    let error = orthonormality_error(&r3_6);
    if !(error <= ORTHONORMALITY_TOLERANCE) {
        return Err(IkError::MalformedOrientation(format!(
            "wrist rotation deviates from orthonormal by {:e}", error
        )));
    }
    Ok(r3_6)
}

/// Euler decomposition of R3_6 into J4, J5, J6. J5 is always in [0, π].
/// Fails with [`IkError::Singular`] when sin(J5) is below [`SINGULARITY_THRESHOLD`] as J4 and J6
/// are not separable there.
pub fn wrist_angles(r3_6: &RotationMatrix) -> Result<[f64; 3], IkError> {
    let sin5 = r3_6[(0, 2)].hypot(r3_6[(2, 2)]);
    let theta5 = f64::atan2(sin5, r3_6[(1, 2)]);
    if sin5 < SINGULARITY_THRESHOLD {
        return Err(IkError::Singular { theta5 });
    }
    let theta4 = f64::atan2(r3_6[(2, 2)], -r3_6[(0, 2)]);
    let theta6 = f64::atan2(-r3_6[(1, 1)], r3_6[(1, 0)]);
    Ok([theta4, theta5, theta6])
}

/// Decomposition at the singularity: J6 is fixed at 0 and all the rotation goes to J4.
///
/// At J5 = 0, R3_6 reduces to Rx(-π/2) Rz(J4 + J6); at J5 = π to Rx(π/2) Rz(π + J6 - J4).
/// In both cases the first row holds cos and -sin of that single angle.
pub fn wrist_angles_at_singularity(r3_6: &RotationMatrix) -> ([f64; 3], Singularity) {
    let phi = f64::atan2(-r3_6[(0, 1)], r3_6[(0, 0)]);
    if r3_6[(1, 2)] >= 0.0 {
        ([normalize_angle(phi), 0.0, 0.0], Singularity::WristAligned)
    } else {
        ([normalize_angle(PI - phi), PI, 0.0], Singularity::WristFlipped)
    }
}

/// Orientation stage: J4 .. J6 for the given J1 .. J3 and target rotation R0_6.
pub fn solve_orientation(geometry: &LinkGeometry, arm: &[f64; 3], r_target: &RotationMatrix)
                         -> Result<WristSolution, IkError> {
    let r3_6 = wrist_rotation(geometry, arm, r_target)?;
    match wrist_angles(&r3_6) {
        Ok(theta) => Ok(WristSolution { theta, singularity: None }),
        Err(IkError::Singular { .. }) => {
            let (theta, singularity) = wrist_angles_at_singularity(&r3_6);
            Ok(WristSolution { theta, singularity: Some(singularity) })
        }
        Err(other) => Err(other),
    }
}
