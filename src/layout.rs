use std::error::Error;

use petgraph::graph::NodeIndex;
use trussreact::{point, Editor};

/// Handles of the joints in the demonstration bridge.
#[derive(Debug, Clone, Copy)]
pub struct BridgeLayout {
    /// Support at the left end of the deck.
    pub left_support: NodeIndex,
    /// Support at the right end of the deck.
    pub right_support: NodeIndex,
    /// Apex of the king-post above the deck.
    pub apex: NodeIndex,
}

/// Build a symmetric 12 m bridge: a deck on two supports, braced by a
/// king-post whose apex sits 3 m above the middle.
pub fn build_sample_bridge(editor: &mut Editor) -> Result<BridgeLayout, Box<dyn Error>> {
    let left_support = editor
        .place_support(point(-6.0, 0.0))
        .ok_or("left support refused by the placement policy")?;
    let right_support = editor
        .place_support(point(6.0, 0.0))
        .ok_or("right support refused by the placement policy")?;

    // Deck joints split the span into thirds.
    let deck_left = editor.place_node(point(-2.0, 0.0));
    let deck_right = editor.place_node(point(2.0, 0.0));
    let apex = editor.place_node(point(0.0, 3.0));

    for (a, b) in [
        (left_support, deck_left),
        (deck_left, deck_right),
        (deck_right, right_support),
        (left_support, apex),
        (deck_left, apex),
        (deck_right, apex),
        (right_support, apex),
    ] {
        editor.connect(a, b)?;
    }

    Ok(BridgeLayout {
        left_support,
        right_support,
        apex,
    })
}
