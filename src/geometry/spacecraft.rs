use crate::errors::SimError;
use crate::geometry::Face3D;
use crate::physics::hysteresis::HysteresisRod;
use nalgebra as na;

/// The assembled satellite body: ordered surface faces plus the mass
/// properties the dynamics needs. The inertia tensor is inverted once at
/// construction and neither is ever mutated afterwards.
#[derive(Debug)]
pub struct CubeSat {
    faces: Vec<Face3D>,
    center_of_mass: na::Vector3<f64>,
    inertia: na::Matrix3<f64>,
    inertia_inv: na::Matrix3<f64>,
    magnetic_moment: na::Vector3<f64>,
    hyst_rods: Vec<HysteresisRod>,
}

impl CubeSat {
    pub fn new(
        faces: Vec<Face3D>,
        center_of_mass: na::Vector3<f64>,
        inertia: na::Matrix3<f64>,
        magnetic_moment: na::Vector3<f64>,
        hyst_rods: Vec<HysteresisRod>,
    ) -> Result<Self, SimError> {
        let inertia_inv = inertia.try_inverse().ok_or(SimError::SingularMatrix)?;
        Ok(CubeSat {
            faces,
            center_of_mass,
            inertia,
            inertia_inv,
            magnetic_moment,
            hyst_rods,
        })
    }

    pub fn faces(&self) -> &[Face3D] {
        &self.faces
    }

    pub fn center_of_mass(&self) -> na::Vector3<f64> {
        self.center_of_mass
    }

    pub fn inertia(&self) -> &na::Matrix3<f64> {
        &self.inertia
    }

    pub fn inertia_inv(&self) -> &na::Matrix3<f64> {
        &self.inertia_inv
    }

    /// Residual magnetic dipole moment in the body frame (A·m²).
    pub fn magnetic_moment(&self) -> na::Vector3<f64> {
        self.magnetic_moment
    }

    pub fn hyst_rods(&self) -> &[HysteresisRod] {
        &self.hyst_rods
    }

    /// Rod state mutates once per integration step; everything else on the
    /// assembly stays read-only.
    pub fn hyst_rods_mut(&mut self) -> &mut [HysteresisRod] {
        &mut self.hyst_rods
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn body(inertia: na::Matrix3<f64>) -> Result<CubeSat, SimError> {
        CubeSat::new(
            Vec::new(),
            na::Vector3::zeros(),
            inertia,
            na::Vector3::zeros(),
            Vec::new(),
        )
    }

    #[test]
    fn inverse_is_consistent() {
        let inertia = na::Matrix3::new(
            8.0e-3, 1.0e-4, 0.0, //
            1.0e-4, 8.0e-3, 0.0, //
            0.0, 0.0, 2.0e-3,
        );
        let sat = body(inertia).unwrap();
        let product = sat.inertia_inv() * sat.inertia();
        assert_abs_diff_eq!(product, na::Matrix3::identity(), epsilon = 1e-10);
    }

    #[test]
    fn singular_inertia_is_rejected() {
        let err = body(na::Matrix3::zeros()).unwrap_err();
        assert!(matches!(err, SimError::SingularMatrix));
    }
}
