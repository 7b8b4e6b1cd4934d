use crate::geometry::CubeSat;
use crate::integrators::rk4::rk4;
use crate::models::environment::EnvironmentSample;
use crate::models::state::AttitudeState;
use crate::numerics::mrp::{mrp_kinematics, mrp_switching, mrp_to_dcm};
use crate::physics::torques::DisturbanceTorques;

/// Mutable context threaded through the derivative evaluations of one step.
/// The first evaluation propagates the hysteresis rods and records the
/// torque breakdown; the remaining RK4 stages reuse that rod state.
struct StepContext<'a> {
    cubesat: &'a mut CubeSat,
    engine: &'a mut DisturbanceTorques,
    env: &'a EnvironmentSample,
    first_eval: bool,
}

fn state_derivative(_t: f64, state: &AttitudeState, ctx: &mut StepContext) -> AttitudeState {
    let dcm_bn = mrp_to_dcm(&state.sigma);
    let torque = ctx
        .engine
        .total_torque(&dcm_bn, ctx.env, ctx.cubesat, ctx.first_eval);
    ctx.first_eval = false;

    let sigma_dot = mrp_kinematics(&state.sigma, &state.omega);
    let inertia = ctx.cubesat.inertia();
    let gyroscopic = state.omega.cross(&(inertia * state.omega));
    let omega_dot = ctx.cubesat.inertia_inv() * (torque - gyroscopic);

    AttitudeState::new(sigma_dot, omega_dot)
}

/// Advances the attitude state by one fixed step: MRP kinematics plus Euler's
/// rigid-body equation under the enabled disturbance torques, integrated with
/// a single RK4 step, then shadow-set switching to keep |sigma| <= 1. The
/// environment sample is held over the step; the caller owns the loop.
pub fn step(
    t: f64,
    state: &AttitudeState,
    dt: f64,
    env: &EnvironmentSample,
    cubesat: &mut CubeSat,
    engine: &mut DisturbanceTorques,
) -> AttitudeState {
    let mut ctx = StepContext {
        cubesat,
        engine,
        env,
        first_eval: true,
    };
    let next = rk4(state_derivative, t, state, dt, &mut ctx);
    mrp_switching(&next)
}
