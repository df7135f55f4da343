// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors returned by structural edits.

use crate::NodeId;

/// Failure of a structural edit on a [`Document`](crate::Document).
///
/// A failed edit leaves the document unchanged.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// The handle refers to a freed slot.
    #[error("node {0:?} is not alive")]
    StaleNode(NodeId),
    /// The reference node is not a child of the given parent.
    #[error("node {child:?} is not a child of {parent:?}")]
    NotAChild {
        /// The expected parent.
        parent: NodeId,
        /// The node that was not found among its children.
        child: NodeId,
    },
    /// The edit would make a node its own ancestor.
    #[error("inserting {node:?} under {parent:?} would create a cycle")]
    Cycle {
        /// The prospective parent.
        parent: NodeId,
        /// The node being inserted.
        node: NodeId,
    },
    /// The document root cannot be moved, cloned into place, or removed.
    #[error("the document root cannot be moved or removed")]
    Root,
}
