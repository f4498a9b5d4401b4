#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::kinematic_traits::{Joints, Kinematics};
    use crate::kinematics_impl::DHKinematics;
    use crate::parameters::dh_kinematics::LinkGeometry;
    use crate::utils::compare_poses;

    /// Joint ranges where the wrist center stays in front of the base and the elbow is up.
    fn random_joints(rng: &mut StdRng) -> Joints {
        let j5 = rng.gen_range(0.2..2.0);
        [
            rng.gen_range(-3.0..3.0),
            rng.gen_range(-0.5..1.0),
            rng.gen_range(-0.6..1.0),
            rng.gen_range(-3.0..3.0),
            if rng.gen_bool(0.5) { j5 } else { -j5 },
            rng.gen_range(-3.0..3.0),
        ]
    }

    #[test]
    fn test_forward_inverse_round_trip() {
        let robot = DHKinematics::new(LinkGeometry::kr210());
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..2000 {
            let joints = random_joints(&mut rng);
            let pose = robot.forward(&joints);
            let solution = robot.inverse(&pose)
                .unwrap_or_else(|e| panic!("No solution for {:?}: {}", joints, e));
            assert!(solution.singularity.is_none());
            assert!(compare_poses(&pose, &robot.forward(&solution.joints), 1e-5, 1e-3),
                    "{:?} solved as {:?}", joints, solution.joints);
        }
    }

    #[test]
    fn test_round_trip_recovers_positive_j5() {
        let robot = DHKinematics::new(LinkGeometry::kr210());
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let mut joints = random_joints(&mut rng);
            joints[4] = joints[4].abs();
            let solution = robot.inverse(&robot.forward(&joints)).expect("reachable");
            for i in 0..6 {
                assert!((solution.joints[i] - joints[i]).abs() < 1e-7,
                        "J{}: {:?} vs {:?}", i + 1, solution.joints, joints);
            }
        }
    }

    #[test]
    fn test_round_trip_at_singularity() {
        let robot = DHKinematics::new(LinkGeometry::kr210());
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..200 {
            let mut joints = random_joints(&mut rng);
            joints[4] = 0.0;
            let pose = robot.forward(&joints);
            let solution = robot.inverse(&pose).expect("reachable");
            assert!(solution.singularity.is_some());
            assert_eq!(solution.joints[5], 0.0);
            assert!(compare_poses(&pose, &robot.forward(&solution.joints), 1e-5, 1e-3),
                    "{:?} solved as {:?}", joints, solution.joints);
        }
    }
}
