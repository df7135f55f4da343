// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener registry: explicit subscription handles instead of closures.
//!
//! A subscription is a `(scope, kind)` pair identified by a [`ListenerId`].
//! The registry never runs code; [`Document::route`](crate::Document::route)
//! reports which handles an event reaches and the host hands the event to
//! whoever owns them.

use alloc::vec::Vec;

use crate::{EventKind, ListenerId, Scope};

#[derive(Clone, Debug, Default)]
pub(crate) struct Listeners {
    next: u64,
    entries: Vec<Entry>,
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct Entry {
    pub(crate) id: ListenerId,
    pub(crate) scope: Scope,
    pub(crate) kind: EventKind,
}

impl Listeners {
    pub(crate) fn add(&mut self, scope: Scope, kind: EventKind) -> ListenerId {
        self.next += 1;
        let id = ListenerId(self.next);
        self.entries.push(Entry { id, scope, kind });
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub(crate) fn retain_scopes(&mut self, mut keep: impl FnMut(Scope) -> bool) {
        self.entries.retain(|e| keep(e.scope));
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries of the given kind, in registration order.
    pub(crate) fn of_kind(&self, kind: EventKind) -> impl Iterator<Item = &Entry> + '_ {
        self.entries.iter().filter(move |e| e.kind == kind)
    }
}
