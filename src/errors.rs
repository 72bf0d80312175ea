//! Error types produced while editing structures or solving for reactions.

use petgraph::graph::{EdgeIndex, NodeIndex};
use thiserror::Error;

/// Error returned by the dense [`Matrix`](crate::Matrix) routines.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum MatrixError {
    /// Returned when the operands of an elementwise operation differ in shape,
    /// when a square matrix is required, or when rows have unequal lengths.
    #[error("incompatible shape: expected {expected:?}, found {found:?}")]
    ShapeError {
        /// Shape (rows, columns) the operation required.
        expected: (usize, usize),
        /// Shape (rows, columns) that was supplied.
        found: (usize, usize),
    },
    /// Returned when the inner dimensions of a product do not agree.
    #[error("cannot multiply a {left:?} matrix by a {right:?} matrix")]
    DimensionMismatch {
        /// Shape of the left operand.
        left: (usize, usize),
        /// Shape of the right operand.
        right: (usize, usize),
    },
    /// Returned when an inverse is requested for a matrix with zero determinant.
    #[error("matrix of size {0} is singular so no inverse exists")]
    SingularMatrix(usize),
}

/// Error returned when editing a [`Structure`](crate::Structure).
///
/// # Examples
///
/// ```
/// use trussreact::{point, Structure, StructureError};
///
/// let mut structure = Structure::new();
/// let a = structure.add_node(point(0.0, 1.0));
/// let b = structure.add_node(point(1.0, 1.0));
/// structure.add_beam(a, b).expect("first beam accepted");
/// let error = structure.add_beam(b, a).expect_err("reversed duplicate rejected");
/// assert_eq!(error, StructureError::DuplicateBeam(b, a));
/// ```
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum StructureError {
    /// Returned when a beam already joins the same unordered pair of joints.
    #[error("a beam already joins {0:?} and {1:?}")]
    DuplicateBeam(NodeIndex, NodeIndex),
    /// Returned when both ends of a requested beam are the same joint.
    #[error("a beam cannot join {0:?} to itself")]
    SelfConnectedBeam(NodeIndex),
    /// Returned when a position value is not a pair of finite coordinates.
    #[error("a position needs exactly two finite coordinates (received {len} values)")]
    TypeMismatch {
        /// Number of values that were supplied.
        len: usize,
    },
    /// Returned when a joint cannot be found in the structure.
    #[error("joint {0:?} does not exist in this structure")]
    UnknownJoint(NodeIndex),
    /// Returned when a beam cannot be found in the structure.
    #[error("beam {0:?} does not exist in this structure")]
    UnknownBeam(EdgeIndex),
}

/// Error returned when the support reactions cannot be computed.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum SolveError {
    /// Returned by the gated resolve when the structure has fewer than two
    /// supports or is not a single connected piece.
    #[error("structure is not solvable; it needs two supports and one connected piece")]
    Unsolvable,
    /// Returned when the equilibrium system cannot be solved, typically because
    /// two supports share an x position.
    #[error("equilibrium system could not be solved: {0}")]
    Matrix(#[from] MatrixError),
}

/// Error returned when loading an [`EditorConfig`](crate::EditorConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when the configuration file cannot be read.
    #[error("could not read configuration: {0}")]
    Io(#[from] std::io::Error),
    /// Returned when the configuration is not valid JSON for the expected schema.
    #[error("could not parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// Returned when fewer than two supports are allowed.
    #[error("max_supports must be at least 2 (received {0})")]
    TooFewSupports(usize),
}
