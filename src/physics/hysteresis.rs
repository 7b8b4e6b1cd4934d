use crate::constants::{MU_0, PI};
use crate::integrators::rk4::rk4;
use nalgebra as na;

/// Path-dependent magnetization model for a soft ferromagnetic damping rod.
///
/// The limiting hysteresis loop is a pair of arctan saturation curves offset
/// by the coercivity; between them a differential-permeability law blends the
/// branch derivatives depending on whether the applied field is rising or
/// falling. Branch choice depends only on the sign of the field change, no
/// further loop memory is kept (deliberately simpler than a Preisach
/// ensemble). The four branch expressions and the two blending formulas are
/// reproduced literally from the reference model, including its top/bottom
/// asymmetry; see NOTE on `permeability_rising`.
#[derive(Debug, Clone)]
pub struct HysteresisRod {
    br: f64,
    bs: f64,
    hc: f64,
    k: f64,
    volume: f64,
    axis: na::Vector3<f64>,
    h_previous: f64,
    h_current: f64,
    b_previous: f64,
    b_current: f64,
    h_history: Vec<f64>,
    b_history: Vec<f64>,
}

impl HysteresisRod {
    /// `br` remanence (T), `bs` saturation (T), `hc` coercivity (A/m),
    /// `volume` rod volume (m³), `axis` rod direction in the body frame.
    pub fn new(
        br: f64,
        bs: f64,
        hc: f64,
        volume: f64,
        axis: na::Vector3<f64>,
        h_initial: f64,
        b_initial: f64,
    ) -> Self {
        let k = (PI * br / (2.0 * bs)).tan() / hc;
        HysteresisRod {
            br,
            bs,
            hc,
            k,
            volume,
            axis,
            h_previous: h_initial,
            h_current: h_initial,
            b_previous: b_initial,
            b_current: b_initial,
            h_history: Vec::new(),
            b_history: Vec::new(),
        }
    }

    /// Preallocates per-step history buffers for `propagate_and_save`, seeding
    /// slot 0 with the current state. A zero-step request leaves the buffers
    /// empty.
    pub fn with_history(mut self, steps: usize) -> Self {
        self.h_history = vec![0.0; steps];
        self.b_history = vec![0.0; steps];
        if steps > 0 {
            self.h_history[0] = self.h_current;
            self.b_history[0] = self.b_current;
        }
        self
    }

    /// Puts the rod on the ascending limiting branch at field `h`, a sane
    /// starting state that avoids spurious initial magnetization.
    pub fn seed_lower_branch(&mut self, h: f64) {
        self.h_previous = h;
        self.h_current = h;
        self.b_previous = self.b_bottom(h);
        self.b_current = self.b_previous;
        if !self.h_history.is_empty() {
            self.h_history[0] = h;
            self.b_history[0] = self.b_current;
        }
    }

    pub fn br(&self) -> f64 {
        self.br
    }

    pub fn bs(&self) -> f64 {
        self.bs
    }

    pub fn hc(&self) -> f64 {
        self.hc
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn axis(&self) -> na::Vector3<f64> {
        self.axis
    }

    pub fn h_current(&self) -> f64 {
        self.h_current
    }

    pub fn b_current(&self) -> f64 {
        self.b_current
    }

    pub fn h_history(&self) -> &[f64] {
        &self.h_history
    }

    pub fn b_history(&self) -> &[f64] {
        &self.b_history
    }

    /// Descending (upper) limiting branch.
    pub fn b_top(&self, h: f64) -> f64 {
        2.0 * self.bs * (self.k * (h + self.hc)).atan() / PI
    }

    /// Ascending (lower) limiting branch.
    pub fn b_bottom(&self, h: f64) -> f64 {
        2.0 * self.bs * (self.k * (h - self.hc)).atan() / PI
    }

    pub fn b_top_derivative(&self, h: f64) -> f64 {
        2.0 * self.bs * self.k / (1.0 + (h + self.hc).powi(2) * self.k * self.k) / PI
    }

    pub fn b_bottom_derivative(&self, h: f64) -> f64 {
        2.0 * self.bs * self.k / (1.0 + (h - self.hc).powi(2) * self.k * self.k) / PI
    }

    /// Differential permeability dB/dH while the field is rising.
    ///
    /// NOTE: the rising law references the top branch value but the bottom
    /// branch derivative (and vice versa below). Whether the limiting-cycle
    /// ordinate should be B or M = B - mu0*H was left open in the reference
    /// model; these expressions are kept as written rather than re-derived.
    pub fn permeability_rising(&self, h: f64, b: f64) -> f64 {
        MU_0 + (self.b_top(h) - b) * (self.b_bottom_derivative(h) - MU_0)
            / (self.b_top(h) - self.b_bottom(h))
    }

    /// Differential permeability dB/dH while the field is falling.
    pub fn permeability_falling(&self, h: f64, b: f64) -> f64 {
        MU_0 + (b - self.b_bottom(h)) * (self.b_top_derivative(h) - MU_0)
            / (self.b_top(h) - self.b_bottom(h))
    }

    /// Advances the magnetization to the new field value `h` with one RK4
    /// step of dB/dH over [h_previous, h], treated as autonomous in H.
    pub fn propagate(&mut self, h: f64) {
        self.h_previous = self.h_current;
        self.h_current = h;
        self.b_previous = self.b_current;
        let dh = self.h_current - self.h_previous;
        let b_next = if dh >= 0.0 {
            rk4(
                |hh, bb: &f64, _: &mut ()| self.permeability_rising(hh, *bb),
                self.h_previous,
                &self.b_previous,
                dh,
                &mut (),
            )
        } else {
            rk4(
                |hh, bb: &f64, _: &mut ()| self.permeability_falling(hh, *bb),
                self.h_previous,
                &self.b_previous,
                dh,
                &mut (),
            )
        };
        self.b_current = b_next;
    }

    /// Fast path for long histories: a single explicit Euler update with the
    /// permeability evaluated at the new field, writing the preallocated
    /// history buffers at step `i + 1`.
    pub fn propagate_and_save(&mut self, h: f64, i: usize) {
        self.h_previous = self.h_current;
        self.h_current = h;
        self.b_previous = self.b_current;
        let dh = self.h_current - self.h_previous;
        let slope = if dh >= 0.0 {
            self.permeability_rising(h, self.b_previous)
        } else {
            self.permeability_falling(h, self.b_previous)
        };
        self.b_current = self.b_previous + slope * dh;
        self.h_history[i + 1] = self.h_current;
        self.b_history[i + 1] = self.b_current;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn rod() -> HysteresisRod {
        // flight-typical HyMu-80 rod parameters
        HysteresisRod::new(0.35, 0.73, 1.59, 7.5e-8, na::Vector3::x(), 0.0, 0.0)
    }

    #[test]
    fn history_buffers_accept_any_length() {
        let empty = rod().with_history(0);
        assert!(empty.h_history().is_empty());

        let seeded = rod().with_history(3);
        assert_eq!(seeded.h_history().len(), 3);
        assert_abs_diff_eq!(seeded.b_history()[0], seeded.b_current(), epsilon = 1e-15);
    }

    #[test]
    fn branches_are_ordered_and_symmetric() {
        let rod = rod();
        for h in [-20.0, -3.0, 0.0, 1.0, 5.0, 40.0] {
            assert!(rod.b_top(h) > rod.b_bottom(h));
            assert_abs_diff_eq!(rod.b_top(h), -rod.b_bottom(-h), epsilon = 1e-12);
        }
        // remanence: the top branch crosses H = 0 at +br
        assert_abs_diff_eq!(rod.b_top(0.0), rod.br(), epsilon = 1e-12);
    }

    #[test]
    fn magnetization_stays_between_branches() {
        let mut rod = rod();
        rod.seed_lower_branch(0.0);
        let steps = 4000;
        for i in 0..steps {
            let t = i as f64 / steps as f64;
            // two full loops of a +/-20 A/m sinusoid
            let h = 20.0 * (4.0 * PI * t).sin();
            rod.propagate(h);
            let b = rod.b_current();
            assert!(b <= rod.b_top(h) + 1e-9, "b above top branch at h={}", h);
            assert!(b >= rod.b_bottom(h) - 1e-9, "b below bottom branch at h={}", h);
        }
    }

    #[test]
    fn strong_field_drives_to_saturation() {
        let mut rod = rod();
        rod.seed_lower_branch(0.0);
        let h_max = 100.0 * rod.hc();
        for i in 1..=2000 {
            rod.propagate(h_max * i as f64 / 2000.0);
        }
        assert!(rod.b_current() > 0.95 * rod.bs());

        for i in 1..=4000 {
            rod.propagate(h_max - 2.0 * h_max * i as f64 / 4000.0);
        }
        assert!(rod.b_current() < -0.95 * rod.bs());
    }

    #[test]
    fn history_mode_matches_in_place_state() {
        let mut rod = rod().with_history(101);
        rod.seed_lower_branch(0.5);
        for i in 0..100 {
            let h = 5.0 * ((i + 1) as f64 / 100.0 * 2.0 * PI).sin();
            rod.propagate_and_save(h, i);
            assert_abs_diff_eq!(rod.b_history()[i + 1], rod.b_current(), epsilon = 1e-15);
            assert_abs_diff_eq!(rod.h_history()[i + 1], rod.h_current(), epsilon = 1e-15);
        }
    }

    #[test]
    fn euler_and_rk4_paths_agree_for_small_steps() {
        let mut fast = rod().with_history(1001);
        let mut accurate = rod();
        fast.seed_lower_branch(0.0);
        accurate.seed_lower_branch(0.0);
        for i in 0..1000 {
            let h = 10.0 * ((i + 1) as f64 * 0.002 * PI).sin();
            fast.propagate_and_save(h, i);
            accurate.propagate(h);
        }
        assert_abs_diff_eq!(fast.b_current(), accurate.b_current(), epsilon = 5e-3);
    }
}
