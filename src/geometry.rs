//! Fixed geometry shared by all solves: the link constants, the correction between the gripper
//! frame of the chain and the gripper frame of incoming poses, and numeric DH transforms.

use std::f64::consts::{FRAC_PI_2, PI};
use std::sync::LazyLock;
use nalgebra::{Matrix3, Matrix4, Rotation3, Vector3};

use crate::kinematic_traits::RotationMatrix;
use crate::parameters::dh_kinematics::{DhRow, LinkGeometry};

/// Rotation mapping the gripper orientation of incoming poses into the DH gripper frame:
/// -90 degrees about Y, then 180 degrees about Z.
static FRAME_CORRECTION: LazyLock<RotationMatrix> = LazyLock::new(|| {
    let r_z = Rotation3::from_axis_angle(&Vector3::z_axis(), PI);
    let r_y = Rotation3::from_axis_angle(&Vector3::y_axis(), -FRAC_PI_2);
    (r_z * r_y).into_inner()
});

/// Link geometry of the robot this crate is built for (KUKA KR210).
pub fn link_geometry() -> LinkGeometry {
    LinkGeometry::kr210()
}

/// Cached correction rotation, see [`FRAME_CORRECTION`].
pub fn frame_correction() -> &'static RotationMatrix {
    &FRAME_CORRECTION
}

/// Homogeneous transform of one modified DH row: Rx(alpha) Tx(a) Rz(theta) Tz(d).
pub fn dh_transform(row: &DhRow, q: f64) -> Matrix4<f64> {
    let theta = q + row.theta_offset;
    let (st, ct) = theta.sin_cos();
    let (sa, ca) = row.alpha.sin_cos();
    Matrix4::new(
        ct, -st, 0.0, row.a,
        st * ca, ct * ca, -sa, -sa * row.d,
        st * sa, ct * sa, ca, ca * row.d,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Product of the DH transforms for the given rows, each row taking its joint value from `qs`.
/// Rows past the end of `qs` are rigid (joint value 0).
pub fn chain_transform(rows: &[DhRow], qs: &[f64]) -> Matrix4<f64> {
    rows.iter()
        .enumerate()
        .fold(Matrix4::identity(), |t, (i, row)| {
            t * dh_transform(row, qs.get(i).copied().unwrap_or(0.0))
        })
}

/// Rotation block of a homogeneous transform.
pub fn rotation_of(t: &Matrix4<f64>) -> RotationMatrix {
    t.fixed_view::<3, 3>(0, 0).into_owned()
}

/// Translation column of a homogeneous transform.
pub fn translation_of(t: &Matrix4<f64>) -> Vector3<f64> {
    t.fixed_view::<3, 1>(0, 3).into_owned()
}

/// Frobenius norm of RᵀR - I. Zero for a perfect rotation.
pub fn orthonormality_error(r: &Matrix3<f64>) -> f64 {
    (r.transpose() * r - Matrix3::identity()).norm()
}
