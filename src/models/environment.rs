use crate::constants::{G, M_EARTH, MU_0, R_EARTH};
use nalgebra as na;

/// Everything the torque engine needs from the outside world at one instant,
/// all in the inertial frame. How these values are produced (ephemeris,
/// atmosphere model, eclipse geometry) is the provider's business.
#[derive(Debug, Clone)]
pub struct EnvironmentSample {
    /// Unit vector toward the sun.
    pub sun_vec: na::Vector3<f64>,
    /// Magnetic field (T).
    pub mag_field: na::Vector3<f64>,
    /// Atmospheric density (kg/m³).
    pub density: f64,
    /// Spacecraft position (m).
    pub position: na::Vector3<f64>,
    /// Velocity relative to the atmosphere (m/s).
    pub velocity: na::Vector3<f64>,
    pub is_eclipse: bool,
}

pub trait EnvironmentProvider {
    fn sample(&self, t: f64) -> EnvironmentSample;
}

/// Closed-form environment for the demo driver and tests: a circular
/// equatorial orbit, exponential atmosphere, polar dipole field, fixed sun
/// direction, and a cylindrical Earth shadow.
#[derive(Debug, Clone)]
pub struct AnalyticEnvironment {
    radius: f64,
    orbit_rate: f64,
    density: f64,
    mag_field_z: f64,
    sun_vec: na::Vector3<f64>,
}

impl AnalyticEnvironment {
    pub fn new(altitude: f64) -> Self {
        let radius = R_EARTH + altitude;
        let orbit_rate = (G * M_EARTH / radius.powi(3)).sqrt();

        // Simple exponential atmospheric model
        let scale_height = 7200.0; // meters
        let density = 1.225 * (-altitude / scale_height).exp();

        // Simplified dipole magnetic field model
        let m = 7.94e22; // Earth's magnetic dipole moment
        let b0 = (MU_0 * m) / (4.0 * std::f64::consts::PI * radius.powi(3));

        AnalyticEnvironment {
            radius,
            orbit_rate,
            density,
            mag_field_z: 2.0 * b0,
            sun_vec: na::Vector3::x(),
        }
    }
}

impl EnvironmentProvider for AnalyticEnvironment {
    fn sample(&self, t: f64) -> EnvironmentSample {
        let angle = self.orbit_rate * t;
        let position = self.radius * na::Vector3::new(angle.cos(), angle.sin(), 0.0);
        let speed = self.radius * self.orbit_rate;
        let velocity = speed * na::Vector3::new(-angle.sin(), angle.cos(), 0.0);

        // in shadow when behind the Earth relative to the sun, inside the
        // Earth-radius cylinder
        let along_sun = position.dot(&self.sun_vec);
        let off_axis = (position - along_sun * self.sun_vec).norm();
        let is_eclipse = along_sun < 0.0 && off_axis < R_EARTH;

        EnvironmentSample {
            sun_vec: self.sun_vec,
            mag_field: na::Vector3::new(0.0, 0.0, self.mag_field_z),
            density: self.density,
            position,
            velocity,
            is_eclipse,
        }
    }
}
