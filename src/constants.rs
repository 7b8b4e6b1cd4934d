pub const G: f64 = 6.67430e-11; // Gravitational constant (m³/kg/s²)
pub const M_EARTH: f64 = 5.972e24; // Mass of Earth (kg)
pub const R_EARTH: f64 = 6.371e6; // Radius of Earth (m)

// Environmental constants
pub const MU_0: f64 = 4.0 * std::f64::consts::PI * 1e-7; // Vacuum permeability (T·m/A)
pub const SOLAR_FLUX: f64 = 1361.0; // Solar constant at 1 AU (W/m^2)
pub const SPEED_OF_LIGHT: f64 = 299792458.0; // (m/s)

// Math
pub const PI: f64 = std::f64::consts::PI;
