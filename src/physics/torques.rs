use crate::constants::{G, M_EARTH, MU_0};
use crate::geometry::CubeSat;
use crate::models::environment::EnvironmentSample;
use crate::physics::aerodynamics::aerodynamic_torque;
use crate::physics::solar::{solar_panel_power, solar_pressure_torque};
use crate::physics::table::{PowerTable, TorqueTable, DEFAULT_RESOLUTION};
use nalgebra as na;
use serde::{Deserialize, Serialize};

/// Which disturbance sources are active, plus whether to track panel power.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TorqueConfig {
    pub gravity: bool,
    pub magnetic: bool,
    pub hysteresis: bool,
    pub aerodynamic: bool,
    pub solar: bool,
    pub calculate_power: bool,
}

impl Default for TorqueConfig {
    fn default() -> Self {
        TorqueConfig {
            gravity: true,
            magnetic: true,
            hysteresis: true,
            aerodynamic: true,
            solar: true,
            calculate_power: true,
        }
    }
}

impl TorqueConfig {
    pub fn none() -> Self {
        TorqueConfig {
            gravity: false,
            magnetic: false,
            hysteresis: false,
            aerodynamic: false,
            solar: false,
            calculate_power: false,
        }
    }
}

/// Per-step record of the individual torque components (body frame, N·m) and
/// the panel power (W), written on the first derivative evaluation of each
/// step so the outer loop can persist it.
#[derive(Debug, Clone)]
pub struct TorqueBreakdown {
    pub gravity: na::Vector3<f64>,
    pub magnetic: na::Vector3<f64>,
    pub hysteresis: na::Vector3<f64>,
    pub aerodynamic: na::Vector3<f64>,
    pub solar: na::Vector3<f64>,
    pub solar_power: f64,
}

impl Default for TorqueBreakdown {
    fn default() -> Self {
        TorqueBreakdown {
            gravity: na::Vector3::zeros(),
            magnetic: na::Vector3::zeros(),
            hysteresis: na::Vector3::zeros(),
            aerodynamic: na::Vector3::zeros(),
            solar: na::Vector3::zeros(),
            solar_power: 0.0,
        }
    }
}

impl TorqueBreakdown {
    pub fn total(&self) -> na::Vector3<f64> {
        self.gravity + self.magnetic + self.hysteresis + self.aerodynamic + self.solar
    }
}

/// Evaluates the enabled disturbance torques at one instant. The aerodynamic
/// and solar models go through precomputed direction tables; gravity
/// gradient, magnetic dipole, and hysteresis are cheap enough to evaluate
/// directly. Build the tables once before the integration loop; they are
/// read-only afterwards.
pub struct DisturbanceTorques {
    config: TorqueConfig,
    aero_table: Option<TorqueTable>,
    solar_table: Option<TorqueTable>,
    power_table: Option<PowerTable>,
    last: TorqueBreakdown,
}

impl DisturbanceTorques {
    pub fn new(config: TorqueConfig) -> Self {
        DisturbanceTorques {
            config,
            aero_table: None,
            solar_table: None,
            power_table: None,
            last: TorqueBreakdown::default(),
        }
    }

    pub fn config(&self) -> &TorqueConfig {
        &self.config
    }

    /// The breakdown recorded at the start of the most recent step.
    pub fn last(&self) -> &TorqueBreakdown {
        &self.last
    }

    /// Precomputes the direction tables for the enabled table-backed sources
    /// at the default 101x101 resolution.
    pub fn build_tables(&mut self, cubesat: &CubeSat) {
        self.build_tables_with_resolution(cubesat, DEFAULT_RESOLUTION, DEFAULT_RESOLUTION);
    }

    pub fn build_tables_with_resolution(&mut self, cubesat: &CubeSat, n_az: usize, n_el: usize) {
        if self.config.aerodynamic {
            // sampled at unit density and unit speed; queries rescale by
            // rho * v^2
            self.aero_table = Some(TorqueTable::build(n_az, n_el, |dir| {
                aerodynamic_torque(dir, 1.0, cubesat)
            }));
        }
        if self.config.solar {
            self.solar_table = Some(TorqueTable::build(n_az, n_el, |dir| {
                solar_pressure_torque(dir, cubesat)
            }));
        }
        if self.config.calculate_power {
            self.power_table = Some(PowerTable::build(n_az, n_el, |dir| {
                solar_panel_power(dir, cubesat)
            }));
        }
    }

    /// Total enabled torque in the body frame. `dcm_bn` maps inertial vectors
    /// into the body frame at the current attitude. When `record` is set the
    /// hysteresis rods are propagated to the sampled field and the component
    /// breakdown is saved; derivative re-evaluations within the same step
    /// pass `record = false` and reuse the rod state.
    pub fn total_torque(
        &mut self,
        dcm_bn: &na::Matrix3<f64>,
        env: &EnvironmentSample,
        cubesat: &mut CubeSat,
        record: bool,
    ) -> na::Vector3<f64> {
        let mut breakdown = TorqueBreakdown::default();

        if self.config.gravity {
            breakdown.gravity = gravity_gradient_torque(dcm_bn, &env.position, cubesat);
        }

        let b_body = dcm_bn * env.mag_field;
        if self.config.magnetic {
            breakdown.magnetic = cubesat.magnetic_moment().cross(&b_body);
        }

        if self.config.hysteresis {
            breakdown.hysteresis = hysteresis_torque(&b_body, cubesat, record);
        }

        if self.config.aerodynamic {
            let v_body = dcm_bn * env.velocity;
            let vm = v_body.norm();
            if vm > 0.0 {
                if let Some(table) = &self.aero_table {
                    breakdown.aerodynamic = table.query(&(v_body / vm)) * (env.density * vm * vm);
                }
            }
        }

        if !env.is_eclipse {
            let s_body = dcm_bn * env.sun_vec;
            if self.config.solar {
                if let Some(table) = &self.solar_table {
                    breakdown.solar = table.query(&s_body);
                }
            }
            if self.config.calculate_power {
                if let Some(table) = &self.power_table {
                    breakdown.solar_power = table.query(&s_body);
                }
            }
        }

        let total = breakdown.total();
        if record {
            self.last = breakdown;
        }
        total
    }
}

/// Gravity gradient torque in the body frame for a spacecraft at inertial
/// position `position`.
pub fn gravity_gradient_torque(
    dcm_bn: &na::Matrix3<f64>,
    position: &na::Vector3<f64>,
    cubesat: &CubeSat,
) -> na::Vector3<f64> {
    let r_mag = position.norm();
    let nadir_body = dcm_bn * (position / r_mag);
    (3.0 * G * M_EARTH / r_mag.powi(3)) * nadir_body.cross(&(cubesat.inertia() * nadir_body))
}

/// Torque from the hysteresis rods given the body-frame magnetic field.
/// Each rod sees the field component along its axis; its magnetization gives
/// an equivalent dipole moment b*V/mu0 along the axis.
pub fn hysteresis_torque(
    b_body: &na::Vector3<f64>,
    cubesat: &mut CubeSat,
    propagate: bool,
) -> na::Vector3<f64> {
    let mut torque = na::Vector3::zeros();
    for rod in cubesat.hyst_rods_mut() {
        if propagate {
            let h = b_body.dot(&rod.axis()) / MU_0;
            rod.propagate(h);
        }
        let moment = rod.axis() * (rod.b_current() * rod.volume() / MU_0);
        torque += moment.cross(b_body);
    }
    torque
}
