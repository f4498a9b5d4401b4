use crate::geometry::{chain_transform, dh_transform, frame_correction, rotation_of, translation_of};
use crate::ik_error::IkError;
use crate::kinematic_traits::{IkSolution, Joints, Kinematics, Pose, Singularity};
use crate::orientation::{solve_orientation, SINGULARITY_THRESHOLD};
use crate::parameters::dh_kinematics::LinkGeometry;
use crate::position::solve_arm;
use nalgebra::{Isometry3, Matrix4, Rotation3, Translation3, UnitQuaternion};

/// Closed form kinematics of the 6 axis arm with the spherical wrist, for the given geometry.
/// The geometry is owned and never changes, so one instance can serve any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct DHKinematics {
    geometry: LinkGeometry,
}

impl DHKinematics {
    /// Creates a new `DHKinematics` instance with the given geometry.
    pub fn new(geometry: LinkGeometry) -> Self {
        DHKinematics { geometry }
    }
}

impl Default for DHKinematics {
    fn default() -> Self {
        DHKinematics::new(LinkGeometry::kr210())
    }
}

/// Homogeneous DH transform to the pose.
fn to_pose(t: &Matrix4<f64>) -> Pose {
    let rotation = Rotation3::from_matrix_unchecked(rotation_of(t));
    Isometry3::from_parts(Translation3::from(translation_of(t)),
                          UnitQuaternion::from_rotation_matrix(&rotation))
}

impl Kinematics for DHKinematics {
    fn inverse(&self, pose: &Pose) -> Result<IkSolution, IkError> {
        let (arm, r_target) = solve_arm(&self.geometry, pose)?;
        let wrist = solve_orientation(&self.geometry, &arm.theta, &r_target)?;
        let [j1, j2, j3] = arm.theta;
        let [j4, j5, j6] = wrist.theta;
        Ok(IkSolution {
            joints: [j1, j2, j3, j4, j5, j6],
            wrist_center: arm.wrist_center,
            singularity: wrist.singularity,
        })
    }

    fn forward(&self, qs: &Joints) -> Pose {
        let t0_g = chain_transform(&self.geometry.dh_table(), qs);
        // Back from the DH gripper frame to the convention of incoming poses.
        let rotation = rotation_of(&t0_g) * frame_correction().transpose();
        Isometry3::from_parts(
            Translation3::from(translation_of(&t0_g)),
            UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(rotation)),
        )
    }

    fn forward_with_joint_poses(&self, qs: &Joints) -> [Pose; 7] {
        let table = self.geometry.dh_table();
        let mut poses = [Pose::identity(); 7];
        let mut t = Matrix4::identity();
        for (i, row) in table.iter().enumerate() {
            t *= dh_transform(row, qs.get(i).copied().unwrap_or(0.0));
            poses[i] = to_pose(&t);
        }
        poses
    }

    fn kinematic_singularity(&self, qs: &Joints) -> Option<Singularity> {
        if qs[4].sin().abs() >= SINGULARITY_THRESHOLD {
            None
        } else if qs[4].cos() > 0.0 {
            Some(Singularity::WristAligned)
        } else {
            Some(Singularity::WristFlipped)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    use nalgebra::{Quaternion, Vector3};
    use crate::kinematic_traits::JOINTS_AT_ZERO;
    use crate::utils::compare_poses;

    #[test]
    fn test_forward_at_zero() {
        let robot = DHKinematics::default();
        let pose = robot.forward(&JOINTS_AT_ZERO);
        assert!((pose.translation.vector - Vector3::new(2.153, 0.0, 1.946)).norm() < 1e-12);
        assert!(pose.rotation.angle() < 1e-6);
    }

    #[test]
    fn test_inverse_stretched_pose() {
        let robot = DHKinematics::default();
        let pose = Pose::from_parts(Translation3::new(2.153, 0.0, 1.946), UnitQuaternion::identity());
        let solution = robot.inverse(&pose).expect("reachable");
        for q in &solution.joints[0..3] {
            assert!(q.abs() < 1e-6, "{:?}", solution.joints);
        }
        // Straight wrist is the singularity, resolved with J6 = 0.
        assert_eq!(solution.singularity, Some(Singularity::WristAligned));
        for q in &solution.joints[3..6] {
            assert!(q.abs() < 1e-6, "{:?}", solution.joints);
        }
    }

    #[test]
    fn test_inverse_matches_forward() {
        let robot = DHKinematics::default();
        let joints = [0.4, 0.2, -0.3, 1.1, 0.7, -0.5];
        let pose = robot.forward(&joints);
        let solution = robot.inverse(&pose).expect("reachable");
        assert!(solution.singularity.is_none());
        for i in 0..6 {
            assert!((solution.joints[i] - joints[i]).abs() < 1e-9, "{:?}", solution.joints);
        }
        assert!(compare_poses(&pose, &robot.forward(&solution.joints), 1e-9, 1e-6));
    }

    #[test]
    fn test_inverse_at_singularity_reproduces_pose() {
        let robot = DHKinematics::default();
        let joints = [0.1, 0.3, 0.2, 0.3, 0.0, 0.5];
        let pose = robot.forward(&joints);
        let solution = robot.inverse(&pose).expect("reachable");
        assert_eq!(solution.singularity, Some(Singularity::WristAligned));
        assert_eq!(solution.joints[5], 0.0);
        assert!((solution.joints[3] - 0.8).abs() < 1e-9);
        assert!(compare_poses(&pose, &robot.forward(&solution.joints), 1e-9, 1e-6));
    }

    #[test]
    fn test_inverse_rejects_non_unit_rotation() {
        let robot = DHKinematics::default();
        let scaled = UnitQuaternion::new_unchecked(Quaternion::new(2.0, 0.0, 0.0, 0.0));
        let pose = Pose::from_parts(Translation3::new(2.153, 0.0, 1.946), scaled);
        assert!(matches!(robot.inverse(&pose), Err(IkError::MalformedOrientation(_))));
    }

    #[test]
    fn test_joint_poses() {
        let robot = DHKinematics::default();
        let joints = [0.4, 0.2, -0.3, 1.1, 0.7, -0.5];
        let poses = robot.forward_with_joint_poses(&joints);
        let solution = robot.inverse(&robot.forward(&joints)).expect("reachable");

        // Frames 4 .. 6 share the wrist center.
        for pose in &poses[3..6] {
            assert!((pose.translation.vector - solution.wrist_center).norm() < 1e-9);
        }
        let gripper = robot.forward(&joints);
        assert!((poses[6].translation.vector - gripper.translation.vector).norm() < 1e-12);
        assert!((poses[0].translation.vector - Vector3::new(0.0, 0.0, 0.75)).norm() < 1e-12);
    }

    #[test]
    fn test_kinematic_singularity() {
        let robot = DHKinematics::default();
        assert_eq!(robot.kinematic_singularity(&[0.0, 0.1, 0.2, 0.3, 0.0, 0.5]),
                   Some(Singularity::WristAligned));
        assert_eq!(robot.kinematic_singularity(&[0.0, 0.1, 0.2, 0.3, PI, 0.5]),
                   Some(Singularity::WristFlipped));
        assert_eq!(robot.kinematic_singularity(&[0.0, 0.1, 0.2, 0.3, 0.4, 0.5]), None);
    }
}
