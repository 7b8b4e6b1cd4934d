use nalgebra as na;

/// The propagated attitude state: modified Rodrigues parameters plus the body
/// angular velocity. Implements the arithmetic the RK4 stepper needs.
#[derive(Debug, Clone, Copy)]
pub struct AttitudeState {
    pub sigma: na::Vector3<f64>,
    pub omega: na::Vector3<f64>,
}

impl AttitudeState {
    pub fn new(sigma: na::Vector3<f64>, omega: na::Vector3<f64>) -> Self {
        AttitudeState { sigma, omega }
    }

    pub fn zero() -> Self {
        AttitudeState {
            sigma: na::Vector3::zeros(),
            omega: na::Vector3::zeros(),
        }
    }
}

impl std::ops::Add for AttitudeState {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        AttitudeState {
            sigma: self.sigma + other.sigma,
            omega: self.omega + other.omega,
        }
    }
}

impl std::ops::Mul<f64> for AttitudeState {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        AttitudeState {
            sigma: self.sigma * scalar,
            omega: self.omega * scalar,
        }
    }
}
