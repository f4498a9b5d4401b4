//! Reads a batch of poses from YAML file (optional)
//!
//! ```yaml
//! poses:
//!   - position: [2.153, 0.0, 1.946]
//!     orientation: [0.0, 0.0, 0.0, 1.0]   # quaternion x, y, z, w
//!   - position: [1.8, 0.6, 1.4]
//!     rpy: [0.1, deg(15.0), 0.2]           # roll, pitch, yaw
//! ```

use std::path::Path;
use serde::Deserialize;

use crate::parameter_error::ParameterError;
use crate::parameters_from_file::yaml_options;
use crate::pose_request::PoseRequest;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PoseYaml {
    position: [f64; 3],
    /// Quaternion in [x, y, z, w] ordering
    #[serde(default)]
    orientation: Option<[f64; 4]>,
    /// Roll, pitch, yaw
    #[serde(default)]
    rpy: Option<[f64; 3]>,
}

#[derive(Deserialize)]
struct PosesRoot {
    #[serde(default)]
    poses: Option<Vec<PoseYaml>>,
}

impl PoseYaml {
    fn to_request(&self, index: usize) -> Result<PoseRequest, ParameterError> {
        match (self.orientation, self.rpy) {
            (Some(orientation), None) => Ok(PoseRequest::new(self.position, orientation)),
            (None, Some([roll, pitch, yaw])) => Ok(PoseRequest::from_rpy(self.position, roll, pitch, yaw)),
            (Some(_), Some(_)) => Err(ParameterError::ParseError(format!(
                "poses[{}] has both orientation and rpy", index
            ))),
            (None, None) => Err(ParameterError::MissingField(format!("poses[{}].orientation", index))),
        }
    }
}

/// Parse the poses from YAML text. An empty or absent list is returned as empty; it is up
/// to the batch driver to refuse it.
pub fn read_poses_str(contents: &str) -> Result<Vec<PoseRequest>, ParameterError> {
    let root: PosesRoot = serde_saphyr::from_str_with_options(contents, yaml_options())
        .map_err(|e| ParameterError::ParseError(format!("{}", e)))?;
    root.poses
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(i, entry)| entry.to_request(i))
        .collect()
}

pub fn read_poses_file<P: AsRef<Path>>(path: P) -> Result<Vec<PoseRequest>, ParameterError> {
    let contents = std::fs::read_to_string(path)?;
    read_poses_str(&contents)
}
