use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Stable identifier of a participant within one graph instance.
///
/// Identifiers are handed out in first-seen order starting at 0 and are
/// never reused, even after the participant is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(usize);

impl ParticipantId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bidirectional name <-> identifier mapping.
///
/// Removal leaves a hole in the id space instead of renumbering, so
/// identifiers held by callers stay valid for everyone else.
///
/// # Examples
///
/// ```
/// use debt_graph::core::participant::{ParticipantDirectory, ParticipantId};
///
/// let mut dir = ParticipantDirectory::new();
/// let alice = dir.add("Alice");
/// let bob = dir.add("Bob");
/// assert_eq!(alice, ParticipantId::new(0));
/// assert_eq!(dir.add("Alice"), alice);
///
/// dir.remove("Alice");
/// assert_eq!(dir.id_of("Bob"), Some(bob));
/// assert_eq!(dir.add("Carol"), ParticipantId::new(2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParticipantDirectory {
    /// Indexed by id; `None` marks a removed participant.
    names: Vec<Option<String>>,
    ids: HashMap<String, ParticipantId>,
}

impl ParticipantDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name`, returning its id. Adding a known name is a no-op.
    pub fn add(&mut self, name: &str) -> ParticipantId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.next_id();
        self.names.push(Some(name.to_string()));
        self.ids.insert(name.to_string(), id);
        id
    }

    /// Forget `name`. Returns the id it had, or `None` if it was unknown.
    pub fn remove(&mut self, name: &str) -> Option<ParticipantId> {
        let id = self.ids.remove(name)?;
        self.names[id.index()] = None;
        Some(id)
    }

    pub fn id_of(&self, name: &str) -> Option<ParticipantId> {
        self.ids.get(name).copied()
    }

    pub fn name_of(&self, id: ParticipantId) -> Option<&str> {
        self.names.get(id.index()).and_then(|n| n.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    /// The identifier the next new participant will receive.
    pub fn next_id(&self) -> ParticipantId {
        ParticipantId::new(self.names.len())
    }

    /// Number of live participants.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Live participants in ascending id (discovery) order.
    pub fn iter(&self) -> impl Iterator<Item = (ParticipantId, &str)> + '_ {
        self.names
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.as_deref().map(|name| (ParticipantId::new(i), name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut dir = ParticipantDirectory::new();
        assert_eq!(dir.add("A"), ParticipantId::new(0));
        assert_eq!(dir.add("B"), ParticipantId::new(1));
        assert_eq!(dir.add("C"), ParticipantId::new(2));
        assert_eq!(dir.len(), 3);
    }

    #[test]
    fn test_duplicate_add_is_noop() {
        let mut dir = ParticipantDirectory::new();
        dir.add("A");
        dir.add("A");
        assert_eq!(dir.len(), 1);
        assert_eq!(dir.next_id(), ParticipantId::new(1));
    }

    #[test]
    fn test_remove_keeps_ids_stable() {
        let mut dir = ParticipantDirectory::new();
        dir.add("A");
        let b = dir.add("B");
        let c = dir.add("C");

        assert_eq!(dir.remove("B"), Some(b));
        assert_eq!(dir.id_of("C"), Some(c));
        assert_eq!(dir.name_of(b), None);
        assert_eq!(dir.name_of(c), Some("C"));

        // B's id is not recycled, even for B itself
        assert_eq!(dir.add("B"), ParticipantId::new(3));
    }

    #[test]
    fn test_remove_unknown() {
        let mut dir = ParticipantDirectory::new();
        dir.add("A");
        assert_eq!(dir.remove("Z"), None);
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn test_iter_skips_removed_in_order() {
        let mut dir = ParticipantDirectory::new();
        dir.add("A");
        dir.add("B");
        dir.add("C");
        dir.remove("A");
        let names: Vec<&str> = dir.iter().map(|(_, n)| n).collect();
        assert_eq!(names, vec!["B", "C"]);
    }

    #[test]
    fn test_lookup_out_of_range() {
        let dir = ParticipantDirectory::new();
        assert_eq!(dir.name_of(ParticipantId::new(42)), None);
        assert_eq!(dir.id_of("nobody"), None);
    }
}
