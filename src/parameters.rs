//! Defines the link geometry data structure

pub mod dh_kinematics {
    use std::f64::consts::FRAC_PI_2;

    /// Physical constants of the arm, named after the modified DH parameters they occupy.
    /// See [parameters_robots.rs](parameters_robots.rs) for the concrete robot model.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct LinkGeometry {
        /// Vertical offset from the base to the axis of joint 2.
        pub d1: f64,

        /// Horizontal offset from the axis of joint 1 to the axis of joint 2.
        pub a1: f64,

        /// Length of the upper arm (joint 2 to joint 3).
        pub a2: f64,

        /// Offset of the forearm perpendicular to its length, joint 3 to the wrist.
        /// Negative on the KR210 where the forearm sits below the elbow axis.
        pub a3: f64,

        /// Length of the forearm, joint 3 to the wrist center.
        pub d4: f64,

        /// Offset from the wrist center to joint 6 along the approach axis.
        pub d6: f64,

        /// Offset from joint 6 to the gripper along the approach axis.
        pub d7: f64,
    }

    /// Row of the modified DH table: twist and length of the previous link, offset and joint
    /// angle offset of this one.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct DhRow {
        pub alpha: f64,
        pub a: f64,
        pub d: f64,
        pub theta_offset: f64,
    }

    impl LinkGeometry {
        /// Distance from the wrist center to the gripper, along the approach axis.
        pub fn flange_offset(&self) -> f64 {
            self.d6 + self.d7
        }

        /// Straight line distance from joint 3 to the wrist center.
        pub fn forearm_length(&self) -> f64 {
            self.a3.hypot(self.d4)
        }

        /// Angle the forearm sags below its nominal direction because of the a3 offset.
        pub fn forearm_offset_angle(&self) -> f64 {
            f64::atan2(-self.a3, self.d4)
        }

        /// Modified DH table from the base to the gripper (7 rows, the last one rigid).
        pub fn dh_table(&self) -> [DhRow; 7] {
            [
                DhRow { alpha: 0.0, a: 0.0, d: self.d1, theta_offset: 0.0 },
                DhRow { alpha: -FRAC_PI_2, a: self.a1, d: 0.0, theta_offset: -FRAC_PI_2 },
                DhRow { alpha: 0.0, a: self.a2, d: 0.0, theta_offset: 0.0 },
                DhRow { alpha: -FRAC_PI_2, a: self.a3, d: self.d4, theta_offset: 0.0 },
                DhRow { alpha: FRAC_PI_2, a: 0.0, d: 0.0, theta_offset: 0.0 },
                DhRow { alpha: -FRAC_PI_2, a: 0.0, d: self.d6, theta_offset: 0.0 },
                DhRow { alpha: 0.0, a: 0.0, d: self.d7, theta_offset: 0.0 },
            ]
        }

        /// Convert to string yaml representation (quick viewing, etc).
        pub fn to_yaml(&self) -> String {
            format!(
                "dh_kinematics_link_geometry:\n  \
              d1: {:?}\n  \
              a1: {:?}\n  \
              a2: {:?}\n  \
              a3: {:?}\n  \
              d4: {:?}\n  \
              d6: {:?}\n  \
              d7: {:?}\n",
                self.d1, self.a1, self.a2, self.a3, self.d4, self.d6, self.d7
            )
        }
    }
}
