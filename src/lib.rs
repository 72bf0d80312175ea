#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod config;
pub mod editor;
pub mod errors;
pub mod geometry;
pub mod matrix;
pub mod solver;
pub mod structure;

pub use config::EditorConfig;
pub use editor::Editor;
pub use errors::{ConfigError, MatrixError, SolveError, StructureError};
pub use geometry::{point, Point};
pub use matrix::{solve_linear_system, Matrix};
pub use solver::{equilibrium_system, is_solvable, resolve, solve};
pub use structure::{
    nearest, Element, JointKind, Reaction, Structure, GRAVITY, MASS_PER_LENGTH,
};
