use csv::Writer;
use hifitime::{Duration, Epoch};
use nalgebra as na;
use spinsat::config::spacecraft::demo_cubesat;
use spinsat::models::environment::{AnalyticEnvironment, EnvironmentProvider};
use spinsat::models::AttitudeState;
use spinsat::physics::propagation;
use spinsat::physics::torques::{DisturbanceTorques, TorqueConfig};
use spinsat::{constants, numerics};
use std::error::Error;
use std::fs::{self, File};
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    let mut cubesat = demo_cubesat()?;

    let config = TorqueConfig::default();
    let mut engine = DisturbanceTorques::new(config);
    println!("Precomputing aerodynamic/solar torque tables...");
    engine.build_tables(&cubesat);

    let environment = AnalyticEnvironment::new(400e3);
    let start_time = Epoch::from_gregorian_utc(2024, 3, 15, 0, 0, 0, 0);

    // initial tumble
    let sigma0 = na::Vector3::new(0.6440, 0.3984, 0.1859);
    let omega0 = na::Vector3::new(-2.0, 3.0, 3.5) * (constants::PI / 180.0);
    let mut state = AttitudeState::new(sigma0, omega0);

    let dt = 0.2; // seconds
    let duration = 3000.0;
    let save_every = 10; // decimate persisted steps
    let steps = (duration / dt) as usize;

    // seed the rods from the initial body-frame field so they do not start
    // with a spurious magnetization
    {
        let env = environment.sample(0.0);
        let b_body = numerics::mrp::mrp_to_dcm(&state.sigma) * env.mag_field;
        for rod in cubesat.hyst_rods_mut() {
            let h = b_body.dot(&rod.axis()) / constants::MU_0;
            rod.seed_lower_branch(h);
        }
    }

    // Create output directory if it doesn't exist
    let output_dir = Path::new("output");
    fs::create_dir_all(output_dir)?;
    let file = File::create(output_dir.join("attitude_data.csv"))?;
    let mut writer = Writer::from_writer(file);

    writer.write_record([
        "UTC Time",
        "Time (s)",
        "Sigma X",
        "Sigma Y",
        "Sigma Z",
        "Angular Velocity X (rad/s)",
        "Angular Velocity Y (rad/s)",
        "Angular Velocity Z (rad/s)",
        "Gravity Torque (N·m)",
        "Magnetic Torque (N·m)",
        "Hysteresis Torque (N·m)",
        "Aerodynamic Torque (N·m)",
        "Solar Torque (N·m)",
        "Solar Power (W)",
        "Density (kg/m³)",
        "Eclipse",
    ])?;

    for i in 0..steps {
        let t = i as f64 * dt;
        let env = environment.sample(t);
        state = propagation::step(t, &state, dt, &env, &mut cubesat, &mut engine);

        if i % save_every == 0 {
            let epoch = start_time + Duration::from_seconds(t);
            let torques = engine.last();
            writer.write_record([
                epoch.to_string(),
                t.to_string(),
                state.sigma.x.to_string(),
                state.sigma.y.to_string(),
                state.sigma.z.to_string(),
                state.omega.x.to_string(),
                state.omega.y.to_string(),
                state.omega.z.to_string(),
                torques.gravity.norm().to_string(),
                torques.magnetic.norm().to_string(),
                torques.hysteresis.norm().to_string(),
                torques.aerodynamic.norm().to_string(),
                torques.solar.norm().to_string(),
                torques.solar_power.to_string(),
                env.density.to_string(),
                env.is_eclipse.to_string(),
            ])?;
        }
    }

    writer.flush()?;
    println!("Simulation data has been written to output/attitude_data.csv");

    Ok(())
}
