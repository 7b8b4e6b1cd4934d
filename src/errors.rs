use std::{error::Error, fmt};

#[derive(Debug)]
pub enum SimError {
    /// An operand that the geometry layer cannot combine or parse.
    TypeConflict(String),
    /// The inertia tensor handed to the body assembly is not invertible.
    SingularMatrix,
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::TypeConflict(what) => write!(f, "type conflict: {}", what),
            SimError::SingularMatrix => write!(f, "inertia tensor is singular"),
        }
    }
}

impl Error for SimError {}
