//! Errors reported by the inverse kinematics

/// Failure of a single pose solve or of a whole batch request.
#[derive(Debug, Clone, PartialEq)]
pub enum IkError {
    /// Batch request did not contain any poses.
    NoPoses,

    /// The wrist center is outside the working space of the arm. Carries the law of cosines
    /// ratio that fell outside [-1, 1].
    Unreachable { ratio: f64 },

    /// J4 and J6 are collinear. Carries the J5 angle found (0 or π).
    Singular { theta5: f64 },

    /// Quaternion is not unit or the rotation matrix is not orthonormal.
    MalformedOrientation(String),
}

impl IkError {
    /// Status code of the batch request as seen by the transport. Only the empty batch is a
    /// request level failure, signalled by the -1 sentinel.
    pub fn status_code(&self) -> i32 {
        match self {
            IkError::NoPoses => -1,
            _ => 0,
        }
    }
}

impl std::fmt::Display for IkError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            IkError::NoPoses =>
                write!(f, "No valid poses received"),
            IkError::Unreachable { ratio } =>
                write!(f, "Pose is not reachable (law of cosines ratio {:.6})", ratio),
            IkError::Singular { theta5 } =>
                write!(f, "Wrist singularity at J5 = {:.4} rad", theta5),
            IkError::MalformedOrientation(ref msg) =>
                write!(f, "Malformed orientation: {}", msg),
        }
    }
}

impl std::error::Error for IkError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code() {
        assert_eq!(IkError::NoPoses.status_code(), -1);
        assert_eq!(IkError::Unreachable { ratio: 1.2 }.status_code(), 0);
    }

    #[test]
    fn test_display() {
        let err = IkError::Unreachable { ratio: 1.5 };
        assert_eq!(err.to_string(), "Pose is not reachable (law of cosines ratio 1.500000)");
        assert_eq!(IkError::NoPoses.to_string(), "No valid poses received");
    }
}
