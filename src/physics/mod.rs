pub mod aerodynamics;
pub mod hysteresis;
pub mod propagation;
pub mod solar;
pub mod table;
pub mod torques;
