pub mod config;
pub mod constants;
pub mod errors;
pub mod geometry;
pub mod integrators;
pub mod models;
pub mod numerics;
pub mod physics;
