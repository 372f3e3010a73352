//! Layout - vertical placement of the card stack using Taffy.
//!
//! The storyboard is a single flex column: each visible card is a leaf with
//! a fixed row height, separated by a one-row gap. Taffy computes the natural
//! slot of every card; the animated list springs cards towards those slots.
//!
//! # Example
//!
//! ```
//! use spark_storyboard::layout::{stack_layout, Slot};
//!
//! let slots = stack_layout(40, &[3, 5]).unwrap();
//! assert_eq!(slots, vec![Slot { y: 0, height: 3 }, Slot { y: 4, height: 5 }]);
//! ```

mod stack;

pub use stack::{stack_layout, Slot, CARD_GAP};
