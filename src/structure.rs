//! Joints, supports and beams making up a planar structure.

use log::debug;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::stable_graph::StableUnGraph;
use petgraph::visit::{Bfs, EdgeRef};

use crate::errors::StructureError;
use crate::geometry::Point;

/// Mass of a beam per metre of length, in kilograms.
pub const MASS_PER_LENGTH: f64 = 1.0;

/// Gravitational acceleration in metres per second squared.
pub const GRAVITY: f64 = 9.81;

/// Reaction forces carried by a fixed support, in newtons.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Reaction {
    /// Upward force at the support. Only meaningful after a successful solve.
    pub vertical_force: f64,
    /// Horizontal force at the support. Carried but never computed.
    pub horizontal_force: f64,
}

/// What a joint is: a weightless node or a fixed support.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum JointKind {
    /// A weightless joint that beams can connect to.
    Node,
    /// A reaction point together with its latest reactions.
    Support(Reaction),
}

/// Handle to anything that can be picked in a structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Element {
    /// A node or a fixed support.
    Joint(NodeIndex),
    /// A beam.
    Beam(EdgeIndex),
}

/// Internal representation of a joint.
#[derive(Clone, Debug)]
struct Joint {
    /// Current position of the joint.
    position: Point,
    /// Node or support facet.
    kind: JointKind,
}

/// Internal representation of a beam.
#[derive(Clone, Debug)]
struct Beam {
    /// Mass frozen from the endpoint positions at construction time.
    mass: f64,
}

/// Container for the joints and beams of a structure.
///
/// Joints are addressed by [`NodeIndex`] and beams by [`EdgeIndex`]. Handles
/// stay valid when other elements are removed, so two joints at the same
/// coordinates remain distinct.
#[derive(Clone, Debug, Default)]
pub struct Structure {
    /// Undirected graph whose nodes are joints and whose edges are beams.
    graph: StableUnGraph<Joint, Beam>,
}

impl Structure {
    /// Create an empty structure.
    ///
    /// # Examples
    /// ```
    /// use trussreact::Structure;
    ///
    /// let structure = Structure::new();
    /// assert_eq!(structure.joint_count(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: StableUnGraph::default(),
        }
    }

    /// Number of joints, nodes and supports together.
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of fixed supports.
    #[must_use]
    pub fn support_count(&self) -> usize {
        self.supports().count()
    }

    /// Number of beams.
    #[must_use]
    pub fn beam_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Add a weightless node.
    pub fn add_node(&mut self, position: Point) -> NodeIndex {
        let joint = self.graph.add_node(Joint {
            position,
            kind: JointKind::Node,
        });
        debug!("added node {joint:?} at {position:?}");
        joint
    }

    /// Add a fixed support with zeroed reactions.
    ///
    /// The solver assumes exactly two supports sharing a y coordinate; this
    /// method does not enforce that, see [`Editor`](crate::Editor).
    pub fn add_support(&mut self, position: Point) -> NodeIndex {
        let joint = self.graph.add_node(Joint {
            position,
            kind: JointKind::Support(Reaction::default()),
        });
        debug!("added support {joint:?} at {position:?}");
        joint
    }

    /// Join two distinct joints with a beam.
    ///
    /// The beam's mass is computed from the current endpoint positions and is
    /// not updated if the endpoints move later.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::UnknownJoint`] when either joint is missing,
    /// [`StructureError::SelfConnectedBeam`] when `a == b` and
    /// [`StructureError::DuplicateBeam`] when a beam already joins the pair in
    /// either order.
    pub fn add_beam(&mut self, a: NodeIndex, b: NodeIndex) -> Result<EdgeIndex, StructureError> {
        let start = self.joint(a)?.position;
        let end = self.joint(b)?.position;
        if a == b {
            return Err(StructureError::SelfConnectedBeam(a));
        }
        if self.graph.find_edge(a, b).is_some() {
            return Err(StructureError::DuplicateBeam(a, b));
        }
        let mass = start.distance_to(end) * MASS_PER_LENGTH;
        let beam = self.graph.add_edge(a, b, Beam { mass });
        debug!("added beam {beam:?} between {a:?} and {b:?} with mass {mass}");
        Ok(beam)
    }

    /// Relocate a joint.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::UnknownJoint`] when `joint` is not part of this structure.
    pub fn move_joint(&mut self, joint: NodeIndex, position: Point) -> Result<(), StructureError> {
        let node = self
            .graph
            .node_weight_mut(joint)
            .ok_or(StructureError::UnknownJoint(joint))?;
        node.position = position;
        Ok(())
    }

    /// Relocate a joint from raw coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::TypeMismatch`] unless `coordinates` holds exactly
    /// two finite values, and [`StructureError::UnknownJoint`] when `joint` is
    /// not part of this structure.
    ///
    /// # Examples
    /// ```
    /// use trussreact::{point, Structure, StructureError};
    ///
    /// let mut structure = Structure::new();
    /// let joint = structure.add_node(point(0.0, 0.0));
    /// let error = structure
    ///     .set_position(joint, &[1.0, 2.0, 3.0])
    ///     .expect_err("three coordinates rejected");
    /// assert_eq!(error, StructureError::TypeMismatch { len: 3 });
    /// ```
    pub fn set_position(
        &mut self,
        joint: NodeIndex,
        coordinates: &[f64],
    ) -> Result<(), StructureError> {
        let position = Point::try_from(coordinates)?;
        self.move_joint(joint, position)
    }

    /// Remove a joint together with every beam touching it.
    ///
    /// Returns the handles of the beams that were removed.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::UnknownJoint`] when `joint` is not part of this structure.
    pub fn remove_joint(&mut self, joint: NodeIndex) -> Result<Vec<EdgeIndex>, StructureError> {
        self.joint(joint)?;
        let beams: Vec<EdgeIndex> = self.graph.edges(joint).map(|edge| edge.id()).collect();
        self.graph.remove_node(joint);
        debug!("removed joint {joint:?} and {} connected beams", beams.len());
        Ok(beams)
    }

    /// Remove a beam.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::UnknownBeam`] when `beam` is not part of this structure.
    pub fn remove_beam(&mut self, beam: EdgeIndex) -> Result<(), StructureError> {
        self.graph
            .remove_edge(beam)
            .ok_or(StructureError::UnknownBeam(beam))?;
        debug!("removed beam {beam:?}");
        Ok(())
    }

    /// Position of a joint.
    #[must_use]
    pub fn position(&self, joint: NodeIndex) -> Option<Point> {
        self.graph.node_weight(joint).map(|joint| joint.position)
    }

    /// Whether the joint is a node or a support.
    #[must_use]
    pub fn kind(&self, joint: NodeIndex) -> Option<JointKind> {
        self.graph.node_weight(joint).map(|joint| joint.kind)
    }

    /// Whether `joint` exists and is a fixed support.
    #[must_use]
    pub fn is_support(&self, joint: NodeIndex) -> bool {
        matches!(self.kind(joint), Some(JointKind::Support(_)))
    }

    /// Reactions at a support, `None` for nodes and unknown handles.
    #[must_use]
    pub fn reaction(&self, joint: NodeIndex) -> Option<Reaction> {
        match self.kind(joint)? {
            JointKind::Support(reaction) => Some(reaction),
            JointKind::Node => None,
        }
    }

    /// Vertical reaction at a support.
    #[must_use]
    pub fn vertical_force(&self, joint: NodeIndex) -> Option<f64> {
        self.reaction(joint).map(|reaction| reaction.vertical_force)
    }

    /// Overwrite the vertical reaction of a support; nodes are left untouched.
    pub(crate) fn set_vertical_force(&mut self, joint: NodeIndex, force: f64) {
        if let Some(Joint {
            kind: JointKind::Support(reaction),
            ..
        }) = self.graph.node_weight_mut(joint)
        {
            reaction.vertical_force = force;
        }
    }

    /// All joints, nodes and supports alike.
    pub fn joints(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Weightless nodes only.
    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.joints().filter(move |joint| !self.is_support(*joint))
    }

    /// Fixed supports only.
    pub fn supports(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.joints().filter(move |joint| self.is_support(*joint))
    }

    /// All beams.
    pub fn beams(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    /// Every joint followed by every beam.
    pub fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        self.joints()
            .map(Element::Joint)
            .chain(self.beams().map(Element::Beam))
    }

    /// Joints at either end of a beam.
    #[must_use]
    pub fn beam_endpoints(&self, beam: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(beam)
    }

    /// Joints connected to `joint` by a beam.
    pub fn neighbours(&self, joint: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(joint)
    }

    /// The beam joining `a` and `b` in either order.
    #[must_use]
    pub fn find_beam(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        self.graph.find_edge(a, b)
    }

    /// Mass of a beam in kilograms, as computed when it was added.
    #[must_use]
    pub fn beam_mass(&self, beam: EdgeIndex) -> Option<f64> {
        self.graph.edge_weight(beam).map(|beam| beam.mass)
    }

    /// Weight of a beam in newtons.
    #[must_use]
    pub fn beam_weight(&self, beam: EdgeIndex) -> Option<f64> {
        self.beam_mass(beam).map(|mass| mass * GRAVITY)
    }

    /// Current positions of both ends of a beam.
    #[must_use]
    pub fn beam_ends(&self, beam: EdgeIndex) -> Option<(Point, Point)> {
        let (a, b) = self.beam_endpoints(beam)?;
        Some((self.position(a)?, self.position(b)?))
    }

    /// Midpoint of a beam, where its weight acts.
    #[must_use]
    pub fn beam_centre(&self, beam: EdgeIndex) -> Option<Point> {
        let (start, end) = self.beam_ends(beam)?;
        Some(start.midpoint(end))
    }

    /// Point used to locate an element: a joint's position or a beam's centre.
    #[must_use]
    pub fn location(&self, element: Element) -> Option<Point> {
        match element {
            Element::Joint(joint) => self.position(joint),
            Element::Beam(beam) => self.beam_centre(beam),
        }
    }

    /// Distance from an element's location to `target`.
    #[must_use]
    pub fn distance_from(&self, element: Element, target: Point) -> Option<f64> {
        self.location(element)
            .map(|location| location.distance_to(target))
    }

    /// The weightless node closest to `target`.
    #[must_use]
    pub fn nearest_node(&self, target: Point) -> Option<NodeIndex> {
        nearest(self.nodes().map(|joint| (joint, self.graph[joint].position)), target)
    }

    /// The fixed support closest to `target`.
    #[must_use]
    pub fn nearest_support(&self, target: Point) -> Option<NodeIndex> {
        nearest(
            self.supports().map(|joint| (joint, self.graph[joint].position)),
            target,
        )
    }

    /// The node or support closest to `target`.
    #[must_use]
    pub fn nearest_joint(&self, target: Point) -> Option<NodeIndex> {
        nearest(
            self.joints().map(|joint| (joint, self.graph[joint].position)),
            target,
        )
    }

    /// The beam whose centre is closest to `target`.
    #[must_use]
    pub fn nearest_beam(&self, target: Point) -> Option<EdgeIndex> {
        nearest(
            self.beams()
                .filter_map(|beam| Some((beam, self.beam_centre(beam)?))),
            target,
        )
    }

    /// The joint or beam closest to `target`.
    #[must_use]
    pub fn nearest_element(&self, target: Point) -> Option<Element> {
        nearest(
            self.elements()
                .filter_map(|element| Some((element, self.location(element)?))),
            target,
        )
    }

    /// Whether every joint is reachable from the first joint along beams.
    ///
    /// An empty structure is trivially connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        let Some(start) = self.joints().next() else {
            return true;
        };
        let mut bfs = Bfs::new(&self.graph, start);
        let mut reached = 0;
        while bfs.next(&self.graph).is_some() {
            reached += 1;
        }
        reached == self.joint_count()
    }

    /// Look up a joint or report it as unknown.
    fn joint(&self, joint: NodeIndex) -> Result<&Joint, StructureError> {
        self.graph
            .node_weight(joint)
            .ok_or(StructureError::UnknownJoint(joint))
    }
}

/// The candidate whose location is closest to `target`.
///
/// Ties go to the first candidate encountered. Candidates whose distance is
/// not a number are skipped; an empty input yields `None`.
///
/// # Examples
/// ```
/// use trussreact::{nearest, point};
///
/// let candidates = [("a", point(0.0, 0.0)), ("b", point(4.0, 0.0))];
/// assert_eq!(nearest(candidates, point(3.0, 1.0)), Some("b"));
/// assert_eq!(nearest(Vec::<(&str, _)>::new(), point(0.0, 0.0)), None);
/// ```
pub fn nearest<T, I>(candidates: I, target: Point) -> Option<T>
where
    I: IntoIterator<Item = (T, Point)>,
{
    let mut best: Option<(T, f64)> = None;
    for (candidate, location) in candidates {
        let distance = location.distance_to(target);
        if distance.is_nan() {
            continue;
        }
        if best.as_ref().map_or(true, |(_, closest)| distance < *closest) {
            best = Some((candidate, distance));
        }
    }
    best.map(|(candidate, _)| candidate)
}
