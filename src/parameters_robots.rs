//! Hardcoded link geometry for supported robots

pub mod dh_kinematics {
    use crate::parameters::dh_kinematics::LinkGeometry;

    impl LinkGeometry {
        /// KUKA KR210, meters. Matches the kr210 URDF joint placements.
        pub fn kr210() -> Self {
            LinkGeometry {
                d1: 0.75,
                a1: 0.35,
                a2: 1.25,
                a3: -0.054,
                d4: 1.5,
                d6: 0.0,
                d7: 0.303,
            }
        }
    }

    impl Default for LinkGeometry {
        fn default() -> Self {
            Self::kr210()
        }
    }
}
