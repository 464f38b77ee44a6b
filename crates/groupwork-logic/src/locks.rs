//! Fixed slots and locked members.
//!
//! Both are plain bookkeeping held by the caller and passed into the
//! engine on each call:
//!
//! - [`FixedSlots`] lists slot ids that [`crate::rotate`] must not touch.
//! - [`LockedMembers`] pins names to slot ids for the next
//!   [`crate::assign`] call.
//!
//! Neither structure is checked against the current groups or roster.
//! Entries naming a slot or person that no longer exists simply have no
//! effect until they become relevant again.
//!
//! ```
//! use groupwork_logic::locks::{FixedSlots, LockedMembers};
//!
//! let mut fixed = FixedSlots::new();
//! assert!(fixed.toggle(2));
//! assert!(!fixed.toggle(2));
//!
//! let mut locked = LockedMembers::new();
//! assert_eq!(locked.toggle("Ada", 1), Some(1));
//! assert_eq!(locked.toggle("Ada", 3), Some(3));
//! assert_eq!(locked.toggle("Ada", 3), None);
//! ```

use std::collections::BTreeSet;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Slot ids excluded from rotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixedSlots {
    slots: BTreeSet<usize>,
}

impl FixedSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip a slot's fixed status. Returns `true` if the slot is now fixed.
    pub fn toggle(&mut self, slot: usize) -> bool {
        if self.slots.remove(&slot) {
            false
        } else {
            self.slots.insert(slot);
            true
        }
    }

    pub fn contains(&self, slot: usize) -> bool {
        self.slots.contains(&slot)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Fixed slot ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().copied()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

impl FromIterator<usize> for FixedSlots {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().collect(),
        }
    }
}

/// A single name pinned to a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberLock {
    pub name: String,
    pub slot: usize,
}

/// Names pinned to slot ids, kept in insertion order.
///
/// Insertion order decides the order locked names appear within a slot
/// after assignment. Re-locking a name to a different slot keeps its
/// original position.
///
/// Serializes as a map of name to slot id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockedMembers {
    locks: Vec<MemberLock>,
}

impl LockedMembers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin `name` to `slot`, replacing any previous target.
    pub fn lock(&mut self, name: impl Into<String>, slot: usize) {
        let name = name.into();
        match self.locks.iter_mut().find(|l| l.name == name) {
            Some(existing) => existing.slot = slot,
            None => self.locks.push(MemberLock { name, slot }),
        }
    }

    /// Remove the lock on `name`, returning the slot it was pinned to.
    pub fn unlock(&mut self, name: &str) -> Option<usize> {
        let index = self.locks.iter().position(|l| l.name == name)?;
        Some(self.locks.remove(index).slot)
    }

    /// Toggle a lock from a group's member list.
    ///
    /// Clears the lock if `name` is already pinned to `slot`, otherwise
    /// pins it there. Returns the resulting lock target.
    pub fn toggle(&mut self, name: &str, slot: usize) -> Option<usize> {
        if self.slot_for(name) == Some(slot) {
            self.unlock(name);
            None
        } else {
            self.lock(name, slot);
            Some(slot)
        }
    }

    pub fn slot_for(&self, name: &str) -> Option<usize> {
        self.locks.iter().find(|l| l.name == name).map(|l| l.slot)
    }

    pub fn is_locked_to(&self, name: &str, slot: usize) -> bool {
        self.slot_for(name) == Some(slot)
    }

    /// Locks in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.locks.iter().map(|l| (l.name.as_str(), l.slot))
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    pub fn clear(&mut self) {
        self.locks.clear();
    }
}

impl<S: Into<String>> FromIterator<(S, usize)> for LockedMembers {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        let mut locked = LockedMembers::new();
        for (name, slot) in iter {
            locked.lock(name, slot);
        }
        locked
    }
}

impl Serialize for LockedMembers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.locks.len()))?;
        for lock in &self.locks {
            map.serialize_entry(&lock.name, &lock.slot)?;
        }
        map.end()
    }
}

struct LockedMembersVisitor;

impl<'de> Visitor<'de> for LockedMembersVisitor {
    type Value = LockedMembers;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of member name to slot id")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut locked = LockedMembers::new();
        while let Some((name, slot)) = access.next_entry::<String, usize>()? {
            locked.lock(name, slot);
        }
        Ok(locked)
    }
}

impl<'de> Deserialize<'de> for LockedMembers {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(LockedMembersVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_toggle_flips_membership() {
        let mut fixed = FixedSlots::new();
        assert!(fixed.toggle(1));
        assert!(fixed.toggle(3));
        assert!(fixed.contains(1));
        assert!(!fixed.toggle(1));
        assert!(!fixed.contains(1));
        assert_eq!(fixed.iter().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn stale_fixed_slots_are_kept() {
        let fixed: FixedSlots = [0, 40].into_iter().collect();
        assert_eq!(fixed.len(), 2);
        assert!(fixed.contains(40));
    }

    #[test]
    fn lock_toggle_same_slot_clears() {
        let mut locked = LockedMembers::new();
        assert_eq!(locked.toggle("Ada", 2), Some(2));
        assert!(locked.is_locked_to("Ada", 2));
        assert_eq!(locked.toggle("Ada", 2), None);
        assert!(locked.is_empty());
    }

    #[test]
    fn lock_toggle_other_slot_overwrites_in_place() {
        let mut locked: LockedMembers = [("Ada", 0), ("Ben", 1)].into_iter().collect();
        assert_eq!(locked.toggle("Ada", 3), Some(3));
        assert_eq!(locked.len(), 2);
        assert_eq!(
            locked.iter().collect::<Vec<_>>(),
            vec![("Ada", 3), ("Ben", 1)]
        );
    }

    #[test]
    fn unlock_missing_is_none() {
        let mut locked = LockedMembers::new();
        assert_eq!(locked.unlock("Nobody"), None);
    }

    #[test]
    fn json_keeps_insertion_order() {
        let locked: LockedMembers = [("Zoe", 2), ("Ada", 0), ("Max", 1)].into_iter().collect();
        let json = serde_json::to_string(&locked).unwrap();
        assert_eq!(json, r#"{"Zoe":2,"Ada":0,"Max":1}"#);

        let back: LockedMembers = serde_json::from_str(&json).unwrap();
        assert_eq!(back, locked);
    }

    #[test]
    fn fixed_serializes_as_array() {
        let fixed: FixedSlots = [2, 0].into_iter().collect();
        assert_eq!(serde_json::to_string(&fixed).unwrap(), "[0,2]");
        let back: FixedSlots = serde_json::from_str("[5,1]").unwrap();
        assert!(back.contains(5) && back.contains(1));
    }
}
