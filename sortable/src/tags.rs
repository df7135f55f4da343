// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute names making up the tagging contract with the host tree.
//!
//! External styles and selectors may read these. The engine itself only
//! interprets them for eligibility and hit testing.

/// Marks an element as draggable. A value of `"false"` opts out of picking.
pub const DRAGGABLE: &str = "draggable";

/// Marks an element as disabled; disabled items are never picked.
pub const DISABLED: &str = "disabled";

/// Present on an element while it is lifted by a drag.
pub const PICKED: &str = "picked-element";

/// Present on the placeholder. The placeholder never carries [`DRAGGABLE`].
pub const CLONE: &str = "clone-element";

/// Context name, set on the container and on every managed child.
pub const CONTEXT: &str = "data-sortable-context";

/// Zero-based index of a managed child, reassigned on every refresh.
pub const INDEX: &str = "data-sortable-index";

/// Opaque per-item payload owned by the host.
pub const DRAG_DATA: &str = "data-drag-data";
