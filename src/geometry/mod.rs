pub mod face2d;
pub mod face3d;
pub mod spacecraft;

pub use face2d::{CombineOp, Face2D, Operand};
pub use face3d::{Axis, Face3D, Orientation};
pub use spacecraft::CubeSat;
