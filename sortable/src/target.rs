// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Target state helper: compute leave/enter transitions for a single drop target.
//!
//! ## Usage
//! 1) Resolve the candidate under the pointer on every move (or `None`).
//! 2) Call [`TargetTracker::update`] with it.
//! 3) Fire leave for [`TargetTransition::left`] and enter for [`TargetTransition::entered`].
//!
//! Nothing fires while the candidate stays the same.
//!
//! ## Minimal example
//! ```
//! use sortable::target::{TargetTracker, TargetTransition};
//! let mut t: TargetTracker<u32> = TargetTracker::new();
//! assert_eq!(t.update(Some(1)), TargetTransition { left: None, entered: Some(1) });
//! assert_eq!(t.update(Some(1)), TargetTransition::NONE);
//! assert_eq!(t.update(Some(2)), TargetTransition { left: Some(1), entered: Some(2) });
//! assert_eq!(t.update(None), TargetTransition { left: Some(2), entered: None });
//! ```

/// Tracks the current drop target.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TargetTracker<K: Copy + Eq> {
    current: Option<K>,
}

/// The change produced by one [`TargetTracker::update`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TargetTransition<K> {
    /// The target that was left, if the target changed away from one.
    pub left: Option<K>,
    /// The target that was entered, if the target changed to one.
    pub entered: Option<K>,
}

impl<K> TargetTransition<K> {
    /// No change.
    pub const NONE: Self = Self {
        left: None,
        entered: None,
    };

    /// Returns `true` if nothing was left or entered.
    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.entered.is_none()
    }
}

impl<K: Copy + Eq> TargetTracker<K> {
    /// A tracker with no target.
    pub fn new() -> Self {
        Self { current: None }
    }

    /// The current target.
    pub fn current(&self) -> Option<K> {
        self.current
    }

    /// Move to `candidate`, reporting what was left and entered.
    pub fn update(&mut self, candidate: Option<K>) -> TargetTransition<K> {
        if candidate == self.current {
            return TargetTransition::NONE;
        }
        let left = self.current;
        self.current = candidate;
        TargetTransition {
            left,
            entered: candidate,
        }
    }

    /// Forget the current target, returning it.
    pub fn clear(&mut self) -> Option<K> {
        self.current.take()
    }
}
