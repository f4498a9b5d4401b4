//! Position stage of the inverse kinematics: wrist center and the first three joints.
//!
//! With a spherical wrist, the wrist center depends only on J1 .. J3. It is found by stepping
//! back from the gripper along its approach axis; J1 then points the arm at it, and J2, J3
//! follow from the triangle upper arm, forearm, joint 2 to wrist center.

use std::f64::consts::FRAC_PI_2;
use nalgebra::Vector3;

use crate::geometry::{frame_correction, orthonormality_error};
use crate::ik_error::IkError;
use crate::kinematic_traits::{Pose, RotationMatrix};
use crate::parameters::dh_kinematics::LinkGeometry;

/// Allowed deviation of the target rotation from orthonormal.
pub(crate) const ORTHONORMALITY_TOLERANCE: f64 = 1e-9;

/// If the wrist center is closer than this to the J1 axis, J1 is taken as 0.
pub(crate) const ON_AXIS_TOLERANCE: f64 = 1e-12;

/// First three joints together with the wrist center they place.
#[derive(Debug, Clone, Copy)]
pub struct ArmSolution {
    pub theta: [f64; 3],
    pub wrist_center: Vector3<f64>,
}

/// Rotation of the gripper in the DH convention of the chain (R0_6).
pub fn target_rotation(pose: &Pose) -> Result<RotationMatrix, IkError> {
    let r_target = pose.rotation.to_rotation_matrix().into_inner() * frame_correction();
    let error = orthonormality_error(&r_target);
    if !(error <= ORTHONORMALITY_TOLERANCE) { // NaN included
        return Err(IkError::MalformedOrientation(format!(
            "target rotation deviates from orthonormal by {:e}", error
        )));
    }
    Ok(r_target)
}

/// Step back from the gripper along the approach axis (third column of `r_target`).
pub fn wrist_center(geometry: &LinkGeometry, position: &Vector3<f64>, r_target: &RotationMatrix) -> Vector3<f64> {
    let approach: Vector3<f64> = r_target.column(2).into_owned();
    position - approach * geometry.flange_offset()
}

/// J1 .. J3 placing the wrist center at the given point.
pub fn solve_position(geometry: &LinkGeometry, wrist: &Vector3<f64>) -> Result<[f64; 3], IkError> {
    let g = geometry;

    // Wrist right above the base: J1 does not move the wrist, keep it at zero.
    let radial = wrist.x.hypot(wrist.y);
    let theta1 = if radial < ON_AXIS_TOLERANCE {
        0.0
    } else {
        f64::atan2(wrist.y, wrist.x)
    };

    // Planar problem in the arm plane, origin at joint 2.
    let p25_xy = radial - g.a1;
    let p25_z = wrist.z - g.d1;
    let p25 = p25_xy.hypot(p25_z);
    if p25 == 0.0 {
        return Err(IkError::Unreachable { ratio: f64::INFINITY });
    }

    let forearm = g.forearm_length();

    // Law of cosines, angle at joint 3
    let d = (g.a2 * g.a2 + forearm * forearm - p25 * p25) / (2.0 * g.a2 * forearm);
    if !(-1.0..=1.0).contains(&d) {
        return Err(IkError::Unreachable { ratio: d });
    }
    let gamma = f64::atan2((1.0 - d * d).sqrt(), d);
    let theta3 = FRAC_PI_2 - gamma - g.forearm_offset_angle();

    // Law of cosines, angle at joint 2
    let e = (g.a2 * g.a2 + p25 * p25 - forearm * forearm) / (2.0 * g.a2 * p25);
    if !(-1.0..=1.0).contains(&e) {
        return Err(IkError::Unreachable { ratio: e });
    }
    let elevation = f64::atan2(p25_z, p25_xy);
    let inner = f64::atan2((1.0 - e * e).sqrt(), e);
    let theta2 = FRAC_PI_2 - (elevation + inner);

    Ok([theta1, theta2, theta3])
}

/// Position stage for the full pose. Also returns R0_6 as the orientation stage needs it.
pub fn solve_arm(geometry: &LinkGeometry, pose: &Pose) -> Result<(ArmSolution, RotationMatrix), IkError> {
    let r_target = target_rotation(pose)?;
    let wrist = wrist_center(geometry, &pose.translation.vector, &r_target);
    let theta = solve_position(geometry, &wrist)?;
    Ok((ArmSolution { theta, wrist_center: wrist }, r_target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Translation3, UnitQuaternion};

    fn kr210() -> LinkGeometry {
        LinkGeometry::kr210()
    }

    #[test]
    fn test_wrist_center_identity_orientation() {
        let pose = Pose::from_parts(Translation3::new(2.153, 0.0, 1.946), UnitQuaternion::identity());
        let (arm, _) = solve_arm(&kr210(), &pose).expect("reachable");
        assert!((arm.wrist_center - Vector3::new(1.85, 0.0, 1.946)).norm() < 1e-12);
    }

    #[test]
    fn test_stretched_arm_is_zero() {
        let theta = solve_position(&kr210(), &Vector3::new(1.85, 0.0, 1.946)).expect("reachable");
        for q in theta {
            assert!(q.abs() < 1e-9, "{:?}", theta);
        }
    }

    #[test]
    fn test_theta1_follows_wrist() {
        let theta = solve_position(&kr210(), &Vector3::new(0.0, 1.85, 1.946)).expect("reachable");
        assert!((theta[0] - FRAC_PI_2).abs() < 1e-12);
        assert!(theta[1].abs() < 1e-9);
        assert!(theta[2].abs() < 1e-9);
    }

    #[test]
    fn test_theta1_on_axis_is_zero() {
        // Above the base, within reach of the folded arm.
        let theta = solve_position(&kr210(), &Vector3::new(0.0, 0.0, 2.5)).expect("reachable");
        assert_eq!(theta[0], 0.0);
    }

    #[test]
    fn test_too_far_is_unreachable() {
        let result = solve_position(&kr210(), &Vector3::new(5.0, 0.0, 1.0));
        match result {
            Err(IkError::Unreachable { ratio }) => assert!(ratio < -1.0),
            other => panic!("Expected unreachable, got {:?}", other),
        }
    }

    #[test]
    fn test_at_joint2_is_unreachable() {
        let result = solve_position(&kr210(), &Vector3::new(0.35, 0.0, 0.75));
        assert!(matches!(result, Err(IkError::Unreachable { .. })));
    }

    #[test]
    fn test_nan_wrist_is_unreachable() {
        let result = solve_position(&kr210(), &Vector3::new(f64::NAN, 0.0, 1.0));
        assert!(matches!(result, Err(IkError::Unreachable { .. })));
    }

    #[test]
    fn test_target_rotation_not_orthonormal() {
        let scaled = UnitQuaternion::new_unchecked(nalgebra::Quaternion::new(2.0, 0.0, 0.0, 0.0));
        let pose = Pose::from_parts(Translation3::new(2.153, 0.0, 1.946), scaled);
        assert!(matches!(target_rotation(&pose), Err(IkError::MalformedOrientation(_))));
        assert!(matches!(solve_arm(&kr210(), &pose), Err(IkError::MalformedOrientation(_))));
    }

    #[test]
    fn test_wrist_center_steps_back_along_approach() {
        // Gripper pointing straight down: approach axis is -Z in the base frame.
        let pose = Pose::from_parts(
            Translation3::new(1.5, 0.2, 1.0),
            UnitQuaternion::from_euler_angles(0.0, FRAC_PI_2, 0.0),
        );
        let r_target = target_rotation(&pose).expect("valid rotation");
        let wrist = wrist_center(&kr210(), &pose.translation.vector, &r_target);
        assert!((wrist - Vector3::new(1.5, 0.2, 1.303)).norm() < 1e-12);
    }
}
