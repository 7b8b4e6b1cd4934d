use std::ops::{Add, Mul};

/// Single classical 4th-order Runge-Kutta step.
///
/// Generic over the state: anything that can be cloned, added, and scaled by
/// f64 works, which covers both the scalar hysteresis ODE and the composite
/// attitude state. The derivative receives the independent variable, the
/// state, and a mutable caller context; no integrator state survives between
/// calls, the caller owns the trajectory loop.
pub fn rk4<S, C, F>(f: F, t: f64, state: &S, dt: f64, ctx: &mut C) -> S
where
    S: Clone + Add<Output = S> + Mul<f64, Output = S>,
    F: Fn(f64, &S, &mut C) -> S,
{
    let k1 = f(t, state, ctx);

    let s2 = state.clone() + k1.clone() * (dt / 2.0);
    let k2 = f(t + dt / 2.0, &s2, ctx);

    let s3 = state.clone() + k2.clone() * (dt / 2.0);
    let k3 = f(t + dt / 2.0, &s3, ctx);

    let s4 = state.clone() + k3.clone() * dt;
    let k4 = f(t + dt, &s4, ctx);

    state.clone() + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0)
}
