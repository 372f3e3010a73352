//! Animated Presentation Layer - keyed list reconciliation with springs.
//!
//! [`AnimatedList`] takes the ordered targets produced by the view policy
//! (plus their laid-out row positions) and keeps one [`Entry`] per key:
//!
//! - New keys enter from above their slot, shrunk and transparent
//! - Existing keys keep their entry and spring to the new slot
//! - Removed keys spring downwards to transparent and are dropped once settled
//!
//! A reconcile in the middle of a transition retargets the springs from
//! wherever they are; no animation frames are queued.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use spark_storyboard::animate::{AnimatedList, Target};
//!
//! let mut list: AnimatedList<&str, u8> = AnimatedList::new();
//! list.reconcile(vec![Target::new("a", 0, 0.0)]);
//! assert!(list.is_animating());
//!
//! list.advance(Duration::from_secs(2));
//! assert!(!list.is_animating());
//! assert_eq!(list.entries()[0].pose().opacity, 1.0);
//! ```

mod spring;

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

pub use spring::{Spring, DAMPING, STIFFNESS};

/// Rows above the slot a new entry starts from.
pub const ENTER_OFFSET: f32 = -2.0;
/// Scale a new entry starts from.
pub const ENTER_SCALE: f32 = 0.5;
/// Rows below its slot an exiting entry heads to.
pub const EXIT_OFFSET: f32 = 2.0;
/// Scale an exiting entry shrinks to.
pub const EXIT_SCALE: f32 = 0.5;

// =============================================================================
// TYPES
// =============================================================================

/// Where an item should end up.
#[derive(Debug, Clone, PartialEq)]
pub struct Target<K, T> {
    pub key: K,
    pub item: T,
    /// Natural row position of the item's slot.
    pub y: f32,
}

impl<K, T> Target<K, T> {
    pub fn new(key: K, item: T, y: f32) -> Self {
        Self { key, item, y }
    }
}

/// Lifecycle phase of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Present,
    Exiting,
}

/// Sampled visual state of an entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub y: f32,
    pub scale: f32,
    pub opacity: f32,
}

/// One animated item.
#[derive(Debug, Clone)]
pub struct Entry<K, T> {
    key: K,
    item: T,
    phase: Phase,
    mount_id: u64,
    y: Spring,
    scale: Spring,
    opacity: Spring,
}

impl<K, T> Entry<K, T> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn item(&self) -> &T {
        &self.item
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Changes only when an entry is created, never on update or reorder.
    pub fn mount_id(&self) -> u64 {
        self.mount_id
    }

    pub fn pose(&self) -> Pose {
        Pose {
            y: self.y.value(),
            scale: self.scale.value().clamp(0.0, 1.0),
            opacity: self.opacity.value().clamp(0.0, 1.0),
        }
    }

    /// Row position the entry is heading for.
    pub fn target_y(&self) -> f32 {
        self.y.target()
    }

    pub fn is_settled(&self) -> bool {
        self.y.is_settled() && self.scale.is_settled() && self.opacity.is_settled()
    }

    fn retarget(&mut self, y: f32) {
        self.y.set_target(y);
        self.scale.set_target(1.0);
        self.opacity.set_target(1.0);
        if self.phase == Phase::Exiting {
            self.phase = Phase::Entering;
        }
    }

    fn begin_exit(&mut self) {
        self.phase = Phase::Exiting;
        self.y.set_target(self.y.target() + EXIT_OFFSET);
        self.scale.set_target(EXIT_SCALE);
        self.opacity.set_target(0.0);
    }

    fn step(&mut self, dt: Duration) {
        self.y.step(dt);
        self.scale.step(dt);
        self.opacity.step(dt);
        if self.phase == Phase::Entering && self.is_settled() {
            self.phase = Phase::Present;
        }
    }
}

// =============================================================================
// ANIMATED LIST
// =============================================================================

/// Keyed, animated list. Order of [`entries`](Self::entries) follows the last
/// targets, with exiting entries after them.
#[derive(Debug, Clone)]
pub struct AnimatedList<K, T> {
    entries: Vec<Entry<K, T>>,
    last: Vec<Target<K, T>>,
    next_mount_id: u64,
}

impl<K, T> Default for AnimatedList<K, T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            last: Vec::new(),
            next_mount_id: 0,
        }
    }
}

impl<K, T> AnimatedList<K, T>
where
    K: Clone + Eq + Hash,
    T: Clone + PartialEq,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a new ordered target list.
    ///
    /// Returns `false` when the targets equal the previous ones, in which
    /// case nothing is touched.
    pub fn reconcile(&mut self, targets: Vec<Target<K, T>>) -> bool {
        if targets == self.last {
            return false;
        }

        let mut previous: Vec<Option<Entry<K, T>>> = self.entries.drain(..).map(Some).collect();
        let positions: HashMap<K, usize> = previous
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| entry.as_ref().map(|e| (e.key.clone(), i)))
            .collect();

        let mut next = Vec::with_capacity(targets.len() + previous.len());
        for target in &targets {
            let existing = positions
                .get(&target.key)
                .and_then(|&i| previous[i].take());

            let entry = match existing {
                Some(mut entry) => {
                    entry.item = target.item.clone();
                    entry.retarget(target.y);
                    entry
                }
                None => self.mount(target),
            };
            next.push(entry);
        }

        for mut entry in previous.into_iter().flatten() {
            if entry.phase != Phase::Exiting {
                entry.begin_exit();
            }
            next.push(entry);
        }

        self.entries = next;
        self.last = targets;
        true
    }

    fn mount(&mut self, target: &Target<K, T>) -> Entry<K, T> {
        let mount_id = self.next_mount_id;
        self.next_mount_id += 1;
        Entry {
            key: target.key.clone(),
            item: target.item.clone(),
            phase: Phase::Entering,
            mount_id,
            y: Spring::from_to(target.y + ENTER_OFFSET, target.y),
            scale: Spring::from_to(ENTER_SCALE, 1.0),
            opacity: Spring::from_to(0.0, 1.0),
        }
    }

    /// Step every spring by `dt` and drop exits that have finished.
    pub fn advance(&mut self, dt: Duration) {
        for entry in &mut self.entries {
            entry.step(dt);
        }
        self.entries
            .retain(|entry| !(entry.phase == Phase::Exiting && entry.is_settled()));
    }

    pub fn is_animating(&self) -> bool {
        self.entries.iter().any(|entry| !entry.is_settled())
    }

    pub fn entries(&self) -> &[Entry<K, T>] {
        &self.entries
    }

    pub fn get(&self, key: &K) -> Option<&Entry<K, T>> {
        self.entries.iter().find(|entry| &entry.key == key)
    }

    /// Drop everything immediately (unmount).
    pub fn clear(&mut self) {
        self.entries.clear();
        self.last.clear();
    }
}

// =============================================================================
// TESTS
// =============================================================================
