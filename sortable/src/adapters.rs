// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host integrations.
//!
//! - [`dom`] (`dom_adapter` feature): [`ElementTree`](crate::ElementTree) for
//!   [`sortable_dom::Document`] and a dispatch helper that delivers routed
//!   pointer events to a set of contexts.

#[cfg(feature = "dom_adapter")]
pub mod dom;
