//! Group slots and group sets.
//!
//! A [`Group`] is a *slot*: its `id`, `title` and `color_index` belong to
//! the position, not to the people currently in it. Rotation moves
//! `members` between slots and leaves everything else where it was.
//!
//! ```
//! use groupwork_logic::group::{Group, GroupSet};
//!
//! let mut set = GroupSet::from_groups(vec![Group::new(0), Group::new(1)]);
//! set.set_title(1, "Lab partners");
//! assert_eq!(set.get(1).unwrap().display_title(), "Lab partners");
//! assert_eq!(set.get(0).unwrap().display_title(), "Group 1");
//! ```

use serde::{Deserialize, Serialize};

use crate::palette::{default_color_index, GroupColor};

/// Title a slot receives when none has been set.
pub fn default_title(slot: usize) -> String {
    format!("Group {}", slot + 1)
}

/// A single group slot and its current occupants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Stable 0-based slot index.
    pub id: usize,
    /// User-editable title.
    #[serde(default)]
    pub title: String,
    /// Index into the palette (see [`crate::palette`]).
    #[serde(default)]
    pub color_index: usize,
    /// Names currently in this slot, in placement order.
    #[serde(default)]
    pub members: Vec<String>,
}

impl Group {
    /// An empty slot with default title and color.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            title: default_title(id),
            color_index: default_color_index(id),
            members: Vec::new(),
        }
    }

    /// Title to render; blank titles fall back to the default.
    pub fn display_title(&self) -> String {
        if self.title.is_empty() {
            default_title(self.id)
        } else {
            self.title.clone()
        }
    }

    /// Palette color to render.
    pub fn color(&self) -> GroupColor {
        GroupColor::from_index(self.color_index)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|m| m == name)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Ordered collection of group slots, indexed `0..len()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupSet {
    groups: Vec<Group>,
}

impl GroupSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap existing groups. Slot `i` is expected to carry `id == i`.
    pub fn from_groups(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, slot: usize) -> Option<&Group> {
        self.groups.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Group> {
        self.groups.get_mut(slot)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Group> {
        self.groups.iter()
    }

    /// Slot currently holding `name`, if any.
    pub fn slot_of(&self, name: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.contains(name))
    }

    /// Total number of placed members across all slots.
    pub fn member_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    /// Every placed member, slot by slot.
    pub fn all_members(&self) -> Vec<&str> {
        self.groups
            .iter()
            .flat_map(|g| g.members.iter().map(String::as_str))
            .collect()
    }

    /// Rename a slot. Returns `false` when the slot does not exist.
    pub fn set_title(&mut self, slot: usize, title: &str) -> bool {
        match self.groups.get_mut(slot) {
            Some(group) => {
                group.title = title.to_string();
                true
            }
            None => false,
        }
    }

    /// Recolor a slot. Returns `false` when the slot does not exist.
    pub fn set_color(&mut self, slot: usize, color_index: usize) -> bool {
        match self.groups.get_mut(slot) {
            Some(group) => {
                group.color_index = color_index;
                true
            }
            None => false,
        }
    }

    /// Drop every slot.
    pub fn clear(&mut self) {
        self.groups.clear();
    }
}

impl<'a> IntoIterator for &'a GroupSet {
    type Item = &'a Group;
    type IntoIter = std::slice::Iter<'a, Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}
