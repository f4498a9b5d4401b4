//! Solves a batch of poses as received in one request. Every pose is solved independently;
//! a pose that fails is flagged in its own slot and does not stop the others.

use tracing::{debug, info, warn};

use crate::ik_error::IkError;
use crate::kinematic_traits::{IkSolution, Joints, Kinematics};
use crate::pose_request::PoseRequest;

/// Row reported for the pose that could not be solved.
pub const FAILED_JOINTS: Joints = [f64::NAN; 6];

/// Outcome for one pose of the batch.
#[derive(Debug, Clone)]
pub enum PoseOutcome {
    Solved(IkSolution),
    Failed(IkError),
}

impl PoseOutcome {
    /// Joint angles, or [`FAILED_JOINTS`] if the pose failed.
    pub fn joints(&self) -> Joints {
        match self {
            PoseOutcome::Solved(solution) => solution.joints,
            PoseOutcome::Failed(_) => FAILED_JOINTS,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, PoseOutcome::Solved(_))
    }
}

/// Outcomes in the same order and count as the poses of the request.
#[derive(Debug, Clone)]
pub struct BatchSolution {
    pub outcomes: Vec<PoseOutcome>,
}

impl BatchSolution {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of poses that could not be solved.
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_solved()).count()
    }

    /// Number of poses solved at the wrist singularity.
    pub fn singularities(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, PoseOutcome::Solved(s) if s.singularity.is_some()))
            .count()
    }

    /// Joint trajectory, one row per pose, failed poses as rows of NaN.
    pub fn joint_trajectory(&self) -> Vec<Joints> {
        self.outcomes.iter().map(PoseOutcome::joints).collect()
    }
}

fn solve_one<K: Kinematics + ?Sized>(robot: &K, index: usize, request: &PoseRequest) -> PoseOutcome {
    let outcome = request.to_pose().and_then(|pose| {
        let (roll, pitch, yaw) = pose.rotation.euler_angles();
        debug!(index, position = ?request.position, roll, pitch, yaw, "Requested pose");
        robot.inverse(&pose)
    });

    match outcome {
        Ok(solution) => {
            if let Some(singularity) = solution.singularity {
                warn!(index, ?singularity, "Pose at wrist singularity, J6 fixed at 0");
            }
            PoseOutcome::Solved(solution)
        }
        Err(err) => {
            warn!(index, %err, "Pose not solved");
            PoseOutcome::Failed(err)
        }
    }
}

fn check_not_empty(poses: &[PoseRequest]) -> Result<(), IkError> {
    info!("Received {} end-effector poses", poses.len());
    if poses.is_empty() {
        warn!("No valid poses received");
        return Err(IkError::NoPoses);
    }
    Ok(())
}

fn report(batch: &BatchSolution) {
    info!(
        failures = batch.failures(),
        singularities = batch.singularities(),
        "Length of joint trajectory: {}", batch.len()
    );
}

/// Solve every pose of the request in order. Fails only if the request is empty.
pub fn calculate_ik<K: Kinematics + ?Sized>(robot: &K, poses: &[PoseRequest])
                                                -> Result<BatchSolution, IkError> {
    check_not_empty(poses)?;
    let outcomes = poses
        .iter()
        .enumerate()
        .map(|(index, request)| solve_one(robot, index, request))
        .collect();
    let batch = BatchSolution { outcomes };
    report(&batch);
    Ok(batch)
}

/// As [`calculate_ik`], solving the poses on the rayon thread pool. Output order still
/// follows the input order.
#[cfg(feature = "parallel")]
pub fn calculate_ik_parallel<K: Kinematics + ?Sized>(robot: &K, poses: &[PoseRequest])
                                                         -> Result<BatchSolution, IkError> {
    use rayon::prelude::*;

    check_not_empty(poses)?;
    let outcomes = poses
        .par_iter()
        .enumerate()
        .map(|(index, request)| solve_one(robot, index, request))
        .collect();
    let batch = BatchSolution { outcomes };
    report(&batch);
    Ok(batch)
}
