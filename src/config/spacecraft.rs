use crate::errors::SimError;
use crate::geometry::{Axis, CubeSat, Face2D, Face3D, Orientation};
use crate::physics::hysteresis::HysteresisRod;
use nalgebra as na;

/// Demo 1U-class CubeSat used by the driver and the tests.
pub struct SimpleCube;

impl SimpleCube {
    pub const SIDE: f64 = 0.1; // meters
    pub const APERTURE: f64 = 0.02; // camera cutout in the +z face (meters)

    pub fn inertia_tensor() -> na::Matrix3<f64> {
        na::Matrix3::new(
            8.0e-3, 0.0, 0.0, //
            0.0, 8.0e-3, 0.0, //
            0.0, 0.0, 2.0e-3,
        )
    }

    /// Residual dipole from the magnetorquer bar, body z (A·m²).
    pub fn magnetic_moment() -> na::Vector3<f64> {
        na::Vector3::new(0.0, 0.0, 1.5)
    }

    /// Two transverse HyMu-80 damping rods.
    pub fn hysteresis_rods() -> Vec<HysteresisRod> {
        let volume = 0.075 / 100.0_f64.powi(3); // 0.075 cm³
        vec![
            HysteresisRod::new(0.35, 0.73, 1.59, volume, na::Vector3::x(), 0.0, 0.0),
            HysteresisRod::new(0.35, 0.73, 1.59, volume, na::Vector3::y(), 0.0, 0.0),
        ]
    }
}

/// Builds the demo body: a cube with a square aperture cut out of the +z
/// face and body-mounted solar panels on the four side faces.
pub fn demo_cubesat() -> Result<CubeSat, SimError> {
    let half = SimpleCube::SIDE / 2.0;
    let side = Face2D::rectangle(SimpleCube::SIDE, SimpleCube::SIDE);
    let top = side.difference(&Face2D::rectangle(
        SimpleCube::APERTURE,
        SimpleCube::APERTURE,
    ));

    let faces = vec![
        Face3D::new(
            top,
            Orientation::AxisPair(Axis::PlusX, Axis::PlusY),
            na::Vector3::new(0.0, 0.0, half),
        )
        .named("top"),
        Face3D::new(
            side.clone(),
            Orientation::AxisPair(Axis::PlusX, Axis::MinusY),
            na::Vector3::new(0.0, 0.0, -half),
        )
        .named("bottom"),
        Face3D::new(
            side.clone(),
            Orientation::AxisPair(Axis::PlusY, Axis::PlusZ),
            na::Vector3::new(half, 0.0, 0.0),
        )
        .named("panel+x")
        .as_solar_panel(),
        Face3D::new(
            side.clone(),
            Orientation::AxisPair(Axis::MinusY, Axis::PlusZ),
            na::Vector3::new(-half, 0.0, 0.0),
        )
        .named("panel-x")
        .as_solar_panel(),
        Face3D::new(
            side.clone(),
            Orientation::AxisPair(Axis::PlusZ, Axis::PlusX),
            na::Vector3::new(0.0, half, 0.0),
        )
        .named("panel+y")
        .as_solar_panel(),
        Face3D::new(
            side,
            Orientation::AxisPair(Axis::MinusZ, Axis::PlusX),
            na::Vector3::new(0.0, -half, 0.0),
        )
        .named("panel-y")
        .as_solar_panel(),
    ];

    CubeSat::new(
        faces,
        na::Vector3::zeros(),
        SimpleCube::inertia_tensor(),
        SimpleCube::magnetic_moment(),
        SimpleCube::hysteresis_rods(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn demo_faces_point_outward() {
        let sat = demo_cubesat().unwrap();
        assert_eq!(sat.faces().len(), 6);
        for face in sat.faces() {
            // outward: normal and centroid on the same side
            assert!(face.normal().dot(&face.centroid()) > 0.0, "{}", face.name());
        }
    }

    #[test]
    fn aperture_reduces_top_area() {
        let sat = demo_cubesat().unwrap();
        let top = &sat.faces()[0];
        let expected = SimpleCube::SIDE.powi(2) - SimpleCube::APERTURE.powi(2);
        assert_abs_diff_eq!(top.area(), expected, epsilon = 1e-12);
    }
}
