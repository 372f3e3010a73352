//! Flex column computation for the card stack.

use taffy::{
    AvailableSpace, Dimension, Display, FlexDirection, LengthPercentage, NodeId, Size, Style,
    TaffyError, TaffyTree,
};

use crate::error::{Error, Result};

/// Rows between two cards.
pub const CARD_GAP: u16 = 1;

/// Computed slot of one card, relative to the top of the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub y: u16,
    pub height: u16,
}

fn layout_error(err: TaffyError) -> Error {
    Error::Layout(format!("{err:?}"))
}

fn card_style(height: u16) -> Style {
    Style {
        size: Size {
            width: Dimension::Percent(1.0),
            height: Dimension::Length(f32::from(height)),
        },
        flex_shrink: 0.0,
        ..Default::default()
    }
}

fn column_style(width: u16) -> Style {
    Style {
        display: Display::Flex,
        flex_direction: FlexDirection::Column,
        size: Size {
            width: Dimension::Length(f32::from(width)),
            height: Dimension::Auto,
        },
        gap: Size {
            width: LengthPercentage::Length(0.0),
            height: LengthPercentage::Length(f32::from(CARD_GAP)),
        },
        ..Default::default()
    }
}

/// Lay out cards of the given heights top to bottom in a column `width` wide.
///
/// The column is unbounded vertically; clipping to the viewport happens at
/// draw time.
pub fn stack_layout(width: u16, heights: &[u16]) -> Result<Vec<Slot>> {
    if heights.is_empty() {
        return Ok(Vec::new());
    }

    let mut tree: TaffyTree<()> = TaffyTree::new();
    let children = heights
        .iter()
        .map(|&height| tree.new_leaf(card_style(height)))
        .collect::<std::result::Result<Vec<NodeId>, _>>()
        .map_err(layout_error)?;

    let root = tree
        .new_with_children(column_style(width), &children)
        .map_err(layout_error)?;

    tree.compute_layout(
        root,
        Size {
            width: AvailableSpace::Definite(f32::from(width)),
            height: AvailableSpace::MaxContent,
        },
    )
    .map_err(layout_error)?;

    children
        .iter()
        .map(|&node| {
            let layout = tree.layout(node).map_err(layout_error)?;
            Ok(Slot {
                y: layout.location.y.round() as u16,
                height: layout.size.height.round() as u16,
            })
        })
        .collect()
}
