//! Rust implementation of closed form inverse and forward kinematics for six-axis industrial robots
//! with a spherical wrist, described by modified Denavit–Hartenberg parameters. The link geometry
//! of the KUKA KR210 is built in.
//!
//! The solver is geometric. The spherical wrist decouples the problem: the wrist center is found
//! by stepping back from the gripper along its approach axis, the first three joints place the
//! wrist center by planar trigonometry, and the last three realize the remaining rotation as
//! Euler angles.
//!
//! # Features
//!
//! - One solution per pose (elbow up, J1 facing the wrist center), in plain numeric matrix algebra.
//! - Unreachable poses are reported as [`ik_error::IkError::Unreachable`], never as NaN angles.
//! - At the wrist singularity (J5 = 0 or π) J6 is fixed at 0 and the whole J4 + J6 rotation
//!   goes to J4; the solution is flagged with the [`kinematic_traits::Singularity`] found.
//! - Batches of poses are solved independently, a failing pose does not stop the others.
//!   Batches can be solved in parallel (feature `parallel`).
//! - Link geometry and pose batches can be read from YAML (feature `allow_filesystem`).
//!
//! # Parameters
//!
//! Seven constants describe the arm: _d1_ (base to joint 2, vertical), _a1_ (joint 1 axis to
//! joint 2, horizontal), _a2_ (upper arm), _a3_ and _d4_ (forearm offset and length), _d6_ and
//! _d7_ (wrist center to gripper). The zero position has the upper arm pointing up and the forearm
//! stretched forward.
//!
//! ```
//! use rs_dh_kinematics::kinematic_traits::{Kinematics, Pose};
//! use rs_dh_kinematics::kinematics_impl::DHKinematics;
//! use rs_dh_kinematics::parameters::dh_kinematics::LinkGeometry;
//!
//! let robot = DHKinematics::new(LinkGeometry::kr210());
//! let pose: Pose = robot.forward(&[0.4, 0.2, -0.3, 1.1, 0.7, -0.5]);
//! let solution = robot.inverse(&pose).expect("reachable");
//! assert!((solution.joints[0] - 0.4).abs() < 1e-9);
//! ```

pub mod kinematic_traits;
pub mod ik_error;

pub mod parameters;
pub mod parameters_robots;

#[cfg(feature = "allow_filesystem")]
pub mod parameters_from_file;
#[cfg(feature = "allow_filesystem")]
pub mod parameter_error;

pub mod utils;
pub mod geometry;
pub mod position;
pub mod orientation;
pub mod kinematics_impl;

pub mod pose_request;
pub mod batch;

#[cfg(feature = "allow_filesystem")]
pub mod pose_file;

#[cfg(test)]
#[cfg(feature = "allow_filesystem")]
mod tests;
