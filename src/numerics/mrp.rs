use crate::models::state::AttitudeState;
use nalgebra as na;

/// Modified Rodrigues parameter attitude utilities.
///
/// sigma = tan(angle/4) * axis encodes the body orientation relative to the
/// inertial frame. The representation blows up at a full-turn rotation;
/// `mrp_switching` keeps |sigma| <= 1 by jumping to the shadow set, which
/// describes the same physical orientation.

pub fn skew(v: &na::Vector3<f64>) -> na::Matrix3<f64> {
    na::Matrix3::new(
        0.0, -v.z, v.y, //
        v.z, 0.0, -v.x, //
        -v.y, v.x, 0.0,
    )
}

/// Direction cosine matrix mapping inertial-frame vectors into the body frame.
pub fn mrp_to_dcm(sigma: &na::Vector3<f64>) -> na::Matrix3<f64> {
    let s2 = sigma.norm_squared();
    let tilde = skew(sigma);
    let denom = (1.0 + s2) * (1.0 + s2);
    na::Matrix3::identity() + (tilde * tilde * 8.0 - tilde * 4.0 * (1.0 - s2)) / denom
}

/// MRP differential kinematic equation: sigma-dot for a given body rate.
pub fn mrp_kinematics(sigma: &na::Vector3<f64>, omega: &na::Vector3<f64>) -> na::Vector3<f64> {
    let s2 = sigma.norm_squared();
    let tilde = skew(sigma);
    let b = na::Matrix3::identity() * (1.0 - s2) + tilde * 2.0 + sigma * sigma.transpose() * 2.0;
    b * omega * 0.25
}

/// The alternate MRP vector describing the same orientation.
pub fn mrp_shadow(sigma: &na::Vector3<f64>) -> na::Vector3<f64> {
    -sigma / sigma.norm_squared()
}

/// Post-step tidy-up: switch to the shadow set whenever the parameter
/// magnitude leaves the unit ball, keeping the representation away from its
/// singularity. The physical orientation is unchanged.
pub fn mrp_switching(state: &AttitudeState) -> AttitudeState {
    if state.sigma.norm_squared() > 1.0 {
        AttitudeState::new(mrp_shadow(&state.sigma), state.omega)
    } else {
        *state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn dcm_is_orthonormal() {
        let sigma = na::Vector3::new(0.3, -0.2, 0.5);
        let c = mrp_to_dcm(&sigma);
        assert_abs_diff_eq!(c * c.transpose(), na::Matrix3::identity(), epsilon = 1e-12);
        assert_abs_diff_eq!(c.determinant(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_sigma_is_identity() {
        let c = mrp_to_dcm(&na::Vector3::zeros());
        assert_abs_diff_eq!(c, na::Matrix3::identity(), epsilon = 1e-15);
    }

    #[test]
    fn shadow_set_magnitude_is_reciprocal() {
        let sigma = na::Vector3::new(0.9, 0.6, 0.4);
        let shadow = mrp_shadow(&sigma);
        assert_abs_diff_eq!(shadow.norm(), 1.0 / sigma.norm(), epsilon = 1e-12);
    }

    #[test]
    fn shadow_set_preserves_orientation() {
        let sigma = na::Vector3::new(0.8, -0.7, 0.3);
        let shadow = mrp_shadow(&sigma);
        assert_abs_diff_eq!(mrp_to_dcm(&sigma), mrp_to_dcm(&shadow), epsilon = 1e-10);
    }

    #[test]
    fn switching_only_fires_outside_unit_ball() {
        let inside = AttitudeState::new(na::Vector3::new(0.2, 0.1, 0.0), na::Vector3::zeros());
        let kept = mrp_switching(&inside);
        assert_abs_diff_eq!(kept.sigma, inside.sigma, epsilon = 1e-15);

        let outside = AttitudeState::new(na::Vector3::new(1.2, 0.0, 0.0), na::Vector3::zeros());
        let switched = mrp_switching(&outside);
        assert!(switched.sigma.norm() < 1.0);
        assert_abs_diff_eq!(
            switched.sigma.norm(),
            1.0 / outside.sigma.norm(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn kinematics_matches_small_angle_rate() {
        // at sigma = 0 the kinematics reduce to sigma-dot = omega / 4
        let omega = na::Vector3::new(0.1, -0.2, 0.3);
        let rate = mrp_kinematics(&na::Vector3::zeros(), &omega);
        assert_abs_diff_eq!(rate, omega / 4.0, epsilon = 1e-15);
    }
}
