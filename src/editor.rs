//! Editing rules layered on top of a [`Structure`].
//!
//! The structure itself accepts any combination of joints and beams. The
//! editor applies the placement policy from [`EditorConfig`], turns duplicate
//! connections into no-ops, cascades deletions, and tracks whether the
//! current reactions belong to the current geometry.

use log::{debug, warn};
use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::config::EditorConfig;
use crate::errors::{SolveError, StructureError};
use crate::geometry::Point;
use crate::solver;
use crate::structure::{Element, Structure};

/// A structure together with its placement policy and resolved state.
#[derive(Clone, Debug, Default)]
pub struct Editor {
    /// The structure being edited.
    structure: Structure,
    /// Placement policy.
    config: EditorConfig,
    /// Whether the stored reactions match the current structure.
    resolved: bool,
}

impl Editor {
    /// Create an editor over an empty structure.
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        Self {
            structure: Structure::new(),
            config,
            resolved: false,
        }
    }

    /// The structure being edited.
    #[must_use]
    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    /// The placement policy in force.
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Whether the support reactions were computed for the current structure.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Give up the editor and keep the structure.
    #[must_use]
    pub fn into_structure(self) -> Structure {
        self.structure
    }

    /// Place a weightless node.
    pub fn place_node(&mut self, position: Point) -> NodeIndex {
        self.invalidate();
        self.structure.add_node(position)
    }

    /// Place a fixed support.
    ///
    /// While supports are locked the request is refused once the maximum
    /// count is reached, and the support is placed on the support level.
    ///
    /// # Examples
    /// ```
    /// use trussreact::{point, Editor, EditorConfig};
    ///
    /// let mut editor = Editor::new(EditorConfig::default());
    /// let left = editor.place_support(point(-3.0, 2.0)).expect("first support");
    /// assert_eq!(editor.structure().position(left), Some(point(-3.0, 0.0)));
    /// editor.place_support(point(3.0, 0.0)).expect("second support");
    /// assert!(editor.place_support(point(6.0, 0.0)).is_none());
    /// ```
    pub fn place_support(&mut self, position: Point) -> Option<NodeIndex> {
        if self.config.locked_supports {
            if self.structure.support_count() >= self.config.max_supports {
                warn!(
                    "support limit of {} reached; placement refused",
                    self.config.max_supports
                );
                return None;
            }
            let position = self.locked(position);
            self.invalidate();
            return Some(self.structure.add_support(position));
        }
        self.invalidate();
        Some(self.structure.add_support(position))
    }

    /// Join two joints with a beam.
    ///
    /// Returns `Ok(None)` without changing anything when the joints are the
    /// same or already joined.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::UnknownJoint`] when either joint is missing.
    pub fn connect(
        &mut self,
        a: NodeIndex,
        b: NodeIndex,
    ) -> Result<Option<EdgeIndex>, StructureError> {
        match self.structure.add_beam(a, b) {
            Ok(beam) => {
                self.invalidate();
                Ok(Some(beam))
            }
            Err(StructureError::DuplicateBeam(..) | StructureError::SelfConnectedBeam(_)) => {
                debug!("ignored repeated connection between {a:?} and {b:?}");
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    /// Move a joint. Locked supports keep to the support level.
    ///
    /// Beams attached to the joint keep the mass they were created with.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::UnknownJoint`] when `joint` is missing.
    pub fn move_joint(&mut self, joint: NodeIndex, position: Point) -> Result<(), StructureError> {
        let position = if self.config.locked_supports && self.structure.is_support(joint) {
            self.locked(position)
        } else {
            position
        };
        self.structure.move_joint(joint, position)?;
        self.invalidate();
        Ok(())
    }

    /// Delete a joint with its beams, or a single beam.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::UnknownJoint`] or [`StructureError::UnknownBeam`]
    /// when the element is missing.
    pub fn delete(&mut self, element: Element) -> Result<(), StructureError> {
        match element {
            Element::Joint(joint) => {
                self.structure.remove_joint(joint)?;
            }
            Element::Beam(beam) => self.structure.remove_beam(beam)?,
        }
        self.invalidate();
        Ok(())
    }

    /// The element nearest to `target`, if it lies within `radius`.
    #[must_use]
    pub fn select_nearest(&self, target: Point, radius: f64) -> Option<Element> {
        let element = self.structure.nearest_element(target)?;
        let distance = self.structure.distance_from(element, target)?;
        (distance < radius).then_some(element)
    }

    /// Every joint and every beam centre strictly inside the box spanned by
    /// two corners. Locations on the edge of the box are not selected.
    #[must_use]
    pub fn select_within(&self, corner: Point, opposite: Point) -> Vec<Element> {
        let (min_x, max_x) = (corner.x.min(opposite.x), corner.x.max(opposite.x));
        let (min_y, max_y) = (corner.y.min(opposite.y), corner.y.max(opposite.y));
        self.structure
            .elements()
            .filter(|element| {
                self.structure.location(*element).is_some_and(|location| {
                    min_x < location.x
                        && location.x < max_x
                        && min_y < location.y
                        && location.y < max_y
                })
            })
            .collect()
    }

    /// Compute the support reactions if the structure is solvable.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::Unsolvable`] when the structure fails the
    /// connectivity check and [`SolveError::Matrix`] when the equations are
    /// singular. The editor stays unresolved in both cases.
    pub fn resolve(&mut self) -> Result<(), SolveError> {
        self.invalidate();
        solver::resolve(&mut self.structure)?;
        self.resolved = true;
        Ok(())
    }

    /// Vertical reaction of each support, in support order.
    #[must_use]
    pub fn reactions(&self) -> Vec<(NodeIndex, f64)> {
        self.structure
            .supports()
            .filter_map(|support| Some((support, self.structure.vertical_force(support)?)))
            .collect()
    }

    /// Snap a position onto the support level.
    fn locked(&self, position: Point) -> Point {
        Point::new(position.x, self.config.support_level)
    }

    /// Zero stored reactions after a change.
    fn invalidate(&mut self) {
        if self.resolved {
            let supports: Vec<_> = self.structure.supports().collect();
            for support in supports {
                self.structure.set_vertical_force(support, 0.0);
            }
            self.resolved = false;
        }
    }
}
