use crate::constants::{SOLAR_FLUX, SPEED_OF_LIGHT};
use crate::geometry::CubeSat;
use nalgebra as na;

/// Solar radiation pressure torque about the center of mass, in the body
/// frame. `sun_vec` is the unit direction toward the sun in the body frame;
/// faces are lit when it hits their outward side. Eclipse gating is the
/// caller's job.
pub fn solar_pressure_torque(sun_vec: &na::Vector3<f64>, cubesat: &CubeSat) -> na::Vector3<f64> {
    let pressure = SOLAR_FLUX / SPEED_OF_LIGHT;

    let mut torque = na::Vector3::zeros();
    for face in cubesat.faces() {
        let cos_in = sun_vec.dot(&face.normal());
        if cos_in <= 0.0 {
            continue;
        }
        let refl = face.reflection_coeff();
        let absorbed = sun_vec * (1.0 - refl);
        let reflected = 2.0 * refl * cos_in * face.normal();
        let force = -pressure * face.area() * cos_in * (absorbed + reflected);
        torque += (face.centroid() - cubesat.center_of_mass()).cross(&force);
    }
    torque
}

/// Total power collected by the faces flagged as solar panels (W). Returns
/// the full insolation value; the engine zeroes it during eclipse.
pub fn solar_panel_power(sun_vec: &na::Vector3<f64>, cubesat: &CubeSat) -> f64 {
    cubesat
        .faces()
        .iter()
        .filter(|face| face.is_solar_panel())
        .map(|face| {
            let cos_in = sun_vec.dot(&face.normal());
            if cos_in > 0.0 {
                SOLAR_FLUX * face.area() * cos_in
            } else {
                0.0
            }
        })
        .sum()
}
