//! Supports reading the link geometry from YAML file (optional)

use std::path::Path;
use serde::Deserialize;
use serde_saphyr::Options;

use crate::parameter_error::ParameterError;
use crate::parameters::dh_kinematics::LinkGeometry;

#[derive(Deserialize)]
struct GeometryParameters {
    pub d1: f64,
    pub a1: f64,
    pub a2: f64,
    pub a3: f64,
    pub d4: f64,
    #[serde(default)]
    pub d6: f64,
    pub d7: f64,
}

#[derive(Deserialize)]
struct Root {
    #[serde(rename = "dh_kinematics_link_geometry")]
    pub geometry: GeometryParameters,
}

/// YAML options shared by all files of this crate: deg(angle) is read as radians.
pub(crate) fn yaml_options() -> Options {
    Options { angle_conversions: true, ..Default::default() }
}

impl LinkGeometry {
    /// Read the robot geometry from YAML file. YAML file like this is supported:
    /// ```yaml
    /// # KUKA KR210
    /// dh_kinematics_link_geometry:
    ///   d1: 0.75
    ///   a1: 0.35
    ///   a2: 1.25
    ///   a3: -0.054
    ///   d4: 1.5
    ///   d6: 0.0
    ///   d7: 0.303
    /// ```
    /// d6 is optional and defaults to 0.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ParameterError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// As [`LinkGeometry::from_yaml_file`], from the YAML text.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ParameterError> {
        let root: Root = serde_saphyr::from_str_with_options(contents, yaml_options())
            .map_err(|e| ParameterError::ParseError(format!("{}", e)))?;

        let p = root.geometry;
        let geometry = LinkGeometry { d1: p.d1, a1: p.a1, a2: p.a2, a3: p.a3, d4: p.d4, d6: p.d6, d7: p.d7 };

        let fields = [
            ("d1", geometry.d1), ("a1", geometry.a1), ("a2", geometry.a2), ("a3", geometry.a3),
            ("d4", geometry.d4), ("d6", geometry.d6), ("d7", geometry.d7),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ParameterError::InvalidValue { field: field.to_string(), value: value.to_string() });
            }
        }

        // Degenerate links leave the law of cosines without a triangle.
        if geometry.a2 <= 0.0 {
            return Err(ParameterError::InvalidValue {
                field: "a2".to_string(),
                value: geometry.a2.to_string(),
            });
        }
        if geometry.forearm_length() <= 0.0 {
            return Err(ParameterError::InvalidValue {
                field: "a3, d4".to_string(),
                value: "forearm of zero length".to_string(),
            });
        }
        Ok(geometry)
    }
}
