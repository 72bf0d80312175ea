//! Vertical support reactions under the self-weight of the beams.
//!
//! Each beam's weight acts at its centre. For every support `s_i` the solver
//! writes one moment equation about that support's x position:
//!
//! ```text
//! sum_j (x_i - x_j) * f_j = sum_beams (x_i - centre_x) * weight
//! ```
//!
//! With two supports on a common level this is the classical lever rule. The
//! equations never impose net vertical balance separately, so with three or
//! more supports they yield one admissible solution rather than a unique one.

use log::{debug, info, warn};

use crate::errors::SolveError;
use crate::matrix::solve_linear_system;
use crate::structure::Structure;

/// Whether the structure can be resolved.
///
/// Requires at least two supports and every joint reachable from every other
/// joint along beams. This is only a connectivity check: it does not verify
/// static determinacy or reject degenerate geometry.
///
/// # Examples
/// ```
/// use trussreact::{is_solvable, point, Structure};
///
/// let mut structure = Structure::new();
/// let left = structure.add_support(point(-1.0, 0.0));
/// let right = structure.add_support(point(1.0, 0.0));
/// assert!(!is_solvable(&structure));
/// structure.add_beam(left, right).expect("beam accepted");
/// assert!(is_solvable(&structure));
/// ```
#[must_use]
pub fn is_solvable(structure: &Structure) -> bool {
    if structure.support_count() < 2 {
        return false;
    }
    structure.is_connected()
}

/// Build the moment equations: one coefficient row and one right-hand side
/// per support, in [`Structure::supports`] order.
#[must_use]
pub fn equilibrium_system(structure: &Structure) -> (Vec<Vec<f64>>, Vec<f64>) {
    let support_x: Vec<f64> = structure
        .supports()
        .filter_map(|support| structure.position(support))
        .map(|position| position.x)
        .collect();
    let loads: Vec<(f64, f64)> = structure
        .beams()
        .filter_map(|beam| Some((structure.beam_centre(beam)?.x, structure.beam_weight(beam)?)))
        .collect();

    let mut coefficients = Vec::with_capacity(support_x.len());
    let mut rhs = Vec::with_capacity(support_x.len());
    for x_i in &support_x {
        coefficients.push(support_x.iter().map(|x_j| x_i - x_j).collect());
        rhs.push(
            loads
                .iter()
                .map(|(centre_x, weight)| (x_i - centre_x) * weight)
                .sum(),
        );
    }
    (coefficients, rhs)
}

/// Compute and store the vertical reaction of every support.
///
/// The caller must check [`is_solvable`] first; this function does not.
///
/// # Errors
///
/// Returns [`SolveError::Matrix`] when the equations cannot be solved, for
/// example when two supports share an x position or there are no supports.
pub fn solve(structure: &mut Structure) -> Result<(), SolveError> {
    let (coefficients, rhs) = equilibrium_system(structure);
    debug!("equilibrium system: coefficients {coefficients:?}, rhs {rhs:?}");
    let forces = solve_linear_system(&coefficients, &rhs).map_err(|error| {
        warn!("support reactions could not be solved: {error}");
        SolveError::from(error)
    })?;
    let supports: Vec<_> = structure.supports().collect();
    for (support, force) in supports.into_iter().zip(forces) {
        structure.set_vertical_force(support, force);
    }
    info!("resolved reactions for {} supports", structure.support_count());
    Ok(())
}

/// Check [`is_solvable`] and then [`solve`].
///
/// # Errors
///
/// Returns [`SolveError::Unsolvable`] when the structure fails the
/// connectivity check, otherwise the errors of [`solve`].
pub fn resolve(structure: &mut Structure) -> Result<(), SolveError> {
    if !is_solvable(structure) {
        warn!(
            "refusing to resolve: {} supports, connected = {}",
            structure.support_count(),
            structure.is_connected()
        );
        return Err(SolveError::Unsolvable);
    }
    solve(structure)
}
