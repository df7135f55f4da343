// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction errors.

/// Why a [`DragContext`](crate::DragContext) could not be wired up.
///
/// These only surface from [`DragContext::try_new`](crate::DragContext::try_new).
/// [`DragContext::new`](crate::DragContext::new) logs them and returns an inert
/// context instead.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// No container element was supplied.
    #[error("no container element was provided")]
    MissingContainer,
    /// No options were supplied.
    #[error("no options were provided")]
    MissingOptions,
    /// The options carry no context name.
    #[error("the options carry no context name")]
    MissingContextName,
    /// The context name is the empty string.
    #[error("the context name is empty")]
    EmptyContextName,
}
