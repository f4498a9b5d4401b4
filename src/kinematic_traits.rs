extern crate nalgebra as na;

use na::{Isometry3, Matrix3, Vector3};
use crate::ik_error::IkError;

/// Pose is used a pose of the robot gripper. It contains both Cartesian position and rotation quaternion
/// ```
/// extern crate nalgebra as na;
/// use na::{Isometry3, Translation3, UnitQuaternion};
///
/// type Pose = Isometry3<f64>;
///
/// let translation = Translation3::new(2.153, 0.0, 1.946);
/// // Roll, pitch, yaw in radians.
/// let rotation = UnitQuaternion::from_euler_angles(0.0, 0.0, 0.0);
/// let pose = Pose::from_parts(translation, rotation);
/// ```
pub type Pose = Isometry3<f64>;

/// Six joint angles in radians, J1 first.
pub type Joints = [f64; 6];

/// 3x3 orthonormal rotation block, as used by both solver stages.
pub type RotationMatrix = Matrix3<f64>;

/// For providing joint values when all joints are at zero.
pub const JOINTS_AT_ZERO: Joints = [0.0; 6];

/// Wrist singularities. At both, axes of J4 and J6 are collinear and only their sum
/// (J5 = 0) or difference (J5 = π) is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Singularity {
    /// J5 = 0, wrist stretched straight.
    WristAligned,
    /// J5 = π, wrist folded back onto itself.
    WristFlipped,
}

/// Result of the inverse kinematics for a single pose.
#[derive(Debug, Clone, Copy)]
pub struct IkSolution {
    /// Joint angles, radians.
    pub joints: Joints,

    /// Wrist center the position stage has solved for, in the base frame.
    pub wrist_center: Vector3<f64>,

    /// Set if the pose hits the wrist singularity. J4 and J6 then follow the fixed
    /// decomposition J6 = 0, see [`crate::orientation::wrist_angles_at_singularity`].
    pub singularity: Option<Singularity>,
}

pub trait Kinematics: Send + Sync {
    /// Find the joint angles that place the gripper at the given pose.
    /// Reachable, non-degenerate poses always produce exactly one solution.
    fn inverse(&self, pose: &Pose) -> Result<IkSolution, IkError>;

    /// Find the pose of the gripper for the given joint angles.
    fn forward(&self, qs: &Joints) -> Pose;

    /// Poses of all seven frames of the chain (J1 .. J6 and the gripper), in the DH convention
    /// of the chain. Origin of the frame 4 (index 3) is the wrist center.
    fn forward_with_joint_poses(&self, qs: &Joints) -> [Pose; 7];

    /// Detect the wrist singularity for the given joint angles.
    fn kinematic_singularity(&self, qs: &Joints) -> Option<Singularity>;
}
