pub mod environment;
pub mod state;

pub use state::AttitudeState;
