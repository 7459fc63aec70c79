//! Per-kind work lists addressed by stable slot indices.
//!
//! Slots are never removed, only re-stated, so an index handed out by a
//! lookup stays valid while other rules consume operations from any list.

use tracing::warn;

use crate::change::{EditKind, SourceCodeChange};
use crate::model::{SourceCodeEntity, StructureEntityVersion};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState {
    /// Not yet visited and not paired away.
    Pending,
    /// Visited by the main loop.
    Processed,
    /// Taken by a pairing rule while another operation was classified.
    Consumed,
}

#[derive(Debug)]
struct Slot {
    change: SourceCodeChange,
    state: SlotState,
}

impl Slot {
    /// Pending and not pre-classified by the differencer. Pre-classified
    /// operations pass through untouched and never take part in a pairing.
    fn is_pairable(&self) -> bool {
        self.state == SlotState::Pending && !self.change.is_classified()
    }
}

/// Wildcard lookup key. `None` fields match anything.
///
/// Parent and changed entities are compared by construct (type and unique
/// name) because paired operations come from the old and the new tree.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Lookup<'a> {
    root: Option<&'a StructureEntityVersion>,
    parent: Option<&'a SourceCodeEntity>,
    changed: Option<&'a SourceCodeEntity>,
}

impl<'a> Lookup<'a> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn root(mut self, root: &'a StructureEntityVersion) -> Self {
        self.root = Some(root);
        self
    }

    pub(crate) fn parent(mut self, parent: &'a SourceCodeEntity) -> Self {
        self.parent = Some(parent);
        self
    }

    pub(crate) fn changed(mut self, changed: &'a SourceCodeEntity) -> Self {
        self.changed = Some(changed);
        self
    }

    fn matches(&self, change: &SourceCodeChange) -> bool {
        self.root.map_or(true, |r| change.root_entity().as_ref() == r)
            && self.parent.map_or(true, |p| change.parent_entity().is_same_construct(p))
            && self.changed.map_or(true, |c| change.changed_entity().is_same_construct(c))
    }
}

/// Operations of one edit kind, in differencer order.
#[derive(Debug)]
pub(crate) struct Worklist {
    kind: EditKind,
    slots: Vec<Slot>,
}

impl Worklist {
    pub(crate) fn new(kind: EditKind) -> Self {
        Self { kind, slots: Vec::new() }
    }

    pub(crate) fn push(&mut self, change: SourceCodeChange) {
        debug_assert_eq!(change.kind(), self.kind);
        self.slots.push(Slot { change, state: SlotState::Pending });
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Start processing slot `idx`. Returns `None` if it was already visited
    /// or consumed by a pairing.
    pub(crate) fn begin(&mut self, idx: usize) -> Option<SourceCodeChange> {
        let slot = self.slots.get_mut(idx)?;
        if slot.state != SlotState::Pending {
            return None;
        }
        slot.state = SlotState::Processed;
        Some(slot.change.clone())
    }

    /// First pairable operation matching `lookup` and `filter`.
    pub(crate) fn find<F>(&self, lookup: &Lookup<'_>, filter: F) -> Option<usize>
    where
        F: Fn(&SourceCodeChange) -> bool,
    {
        self.slots
            .iter()
            .position(|s| s.is_pairable() && lookup.matches(&s.change) && filter(&s.change))
    }

    /// First operation matching `lookup` and `filter`, in any state.
    pub(crate) fn find_any<F>(&self, lookup: &Lookup<'_>, filter: F) -> Option<usize>
    where
        F: Fn(&SourceCodeChange) -> bool,
    {
        self.slots
            .iter()
            .position(|s| lookup.matches(&s.change) && filter(&s.change))
    }

    pub(crate) fn get(&self, idx: usize) -> Option<&SourceCodeChange> {
        self.slots.get(idx).map(|s| &s.change)
    }

    /// Take a pending operation out of the list for a pairing.
    ///
    /// Each operation can be taken exactly once; a second attempt, or an
    /// attempt on an operation the main loop already visited, yields `None`.
    /// Pre-classified operations are never taken.
    pub(crate) fn consume(&mut self, idx: usize) -> Option<SourceCodeChange> {
        let kind = self.kind;
        let slot = self.slots.get_mut(idx)?;
        if slot.change.is_classified() {
            return None;
        }
        match slot.state {
            SlotState::Pending => {
                slot.state = SlotState::Consumed;
                Some(slot.change.clone())
            }
            state => {
                warn!(%kind, idx, ?state, change = %slot.change, "refusing to consume operation twice");
                None
            }
        }
    }

    /// Consume the first pairable operation equal to `change`.
    pub(crate) fn remove(&mut self, change: &SourceCodeChange) -> bool {
        let idx = self
            .slots
            .iter()
            .position(|s| s.is_pairable() && &s.change == change);
        match idx {
            Some(idx) => self.consume(idx).is_some(),
            None => false,
        }
    }
}
