//! Poses as they arrive from the transport: a position and a raw quaternion that still
//! needs to be checked before it can be trusted as a rotation.

use nalgebra::{Quaternion, Translation3, UnitQuaternion};
use crate::ik_error::IkError;
use crate::kinematic_traits::Pose;

/// Allowed deviation of the quaternion norm from 1.
pub const QUATERNION_NORM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseRequest {
    /// Translation in meters: [x, y, z]
    pub position: [f64; 3],
    /// Quaternion in [x, y, z, w] ordering
    pub orientation: [f64; 4],
}

impl PoseRequest {
    pub fn new(position: [f64; 3], orientation: [f64; 4]) -> Self {
        PoseRequest { position, orientation }
    }

    /// Orientation given as roll, pitch, yaw (radians, rotations about fixed X, Y, Z).
    pub fn from_rpy(position: [f64; 3], roll: f64, pitch: f64, yaw: f64) -> Self {
        let q = UnitQuaternion::from_euler_angles(roll, pitch, yaw);
        PoseRequest { position, orientation: [q.i, q.j, q.k, q.w] }
    }

    pub fn from_pose(pose: &Pose) -> Self {
        let t = pose.translation.vector;
        let q = pose.rotation.quaternion();
        PoseRequest { position: [t.x, t.y, t.z], orientation: [q.i, q.j, q.k, q.w] }
    }

    /// Roll, pitch, yaw of the requested orientation, radians.
    pub fn rpy(&self) -> Result<(f64, f64, f64), IkError> {
        Ok(self.to_pose()?.rotation.euler_angles())
    }

    /// Validated pose. The quaternion must be finite and unit within [`QUATERNION_NORM_TOLERANCE`];
    /// it is renormalized to full precision afterwards. The position is not checked here, a
    /// non-finite one is reported as unreachable by the solver.
    pub fn to_pose(&self) -> Result<Pose, IkError> {
        let [x, y, z] = self.position;
        let [qx, qy, qz, qw] = self.orientation;
        let quaternion = Quaternion::new(qw, qx, qy, qz);
        let norm = quaternion.norm();
        if !norm.is_finite() || (norm - 1.0).abs() > QUATERNION_NORM_TOLERANCE {
            return Err(IkError::MalformedOrientation(format!(
                "quaternion {:?} has norm {}", self.orientation, norm
            )));
        }

        Ok(Pose::from_parts(
            Translation3::new(x, y, z),
            UnitQuaternion::from_quaternion(quaternion),
        ))
    }
}
