//! Group generation.
//!
//! Builds a fresh [`GroupSet`] from the roster in two passes:
//!
//! 1. **Locked members** go straight to their pinned slot, in lock
//!    insertion order, ignoring capacity.
//! 2. **Everyone else** is shuffled and dealt out. With a capacity set,
//!    shuffled name `i` targets slot `(i / capacity) % num_groups` and is
//!    left out if that slot is already full. Without one, name `i` goes to
//!    slot `i % num_groups`.
//!
//! Names left out by a full target slot are *not* moved to another slot;
//! they come back in [`Assignment::unplaced`].
//!
//! ```
//! use groupwork_logic::assign::{assign_groups, AssignRequest};
//! use groupwork_logic::config::GroupConfig;
//! use groupwork_logic::locks::LockedMembers;
//!
//! let roster: Vec<String> = ["A", "B", "C", "D", "E"].iter().map(|s| s.to_string()).collect();
//! let locked: LockedMembers = [("A", 1)].into_iter().collect();
//! let request = AssignRequest {
//!     roster: &roster,
//!     selection: &[],
//!     config: GroupConfig { num_groups: 2, members_per_group: 0 },
//!     locked: &locked,
//!     previous: None,
//! };
//!
//! let result = assign_groups(&request, &mut rand::thread_rng()).unwrap();
//! assert!(result.groups.get(1).unwrap().contains("A"));
//! assert_eq!(result.groups.member_count(), 5);
//! ```

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::GroupConfig;
use crate::group::{default_title, Group, GroupSet};
use crate::locks::LockedMembers;
use crate::roster::available_names;

/// Everything an Assign call reads.
#[derive(Debug, Clone, Copy)]
pub struct AssignRequest<'a> {
    /// Full roster, in display order.
    pub roster: &'a [String],
    /// Subset to place; empty means the whole roster.
    pub selection: &'a [String],
    pub config: GroupConfig,
    pub locked: &'a LockedMembers,
    /// Current groups, used to keep titles and colors when the slot
    /// count is unchanged.
    pub previous: Option<&'a GroupSet>,
}

/// Result of a successful Assign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// The new groups, replacing any previous set.
    pub groups: GroupSet,
    /// Shuffled names whose target slot was already full.
    pub unplaced: Vec<String>,
}

/// Build a new group set.
///
/// Returns `None` when there is nobody to place or `num_groups` is zero;
/// the caller keeps whatever groups it already has.
pub fn assign_groups(request: &AssignRequest<'_>, rng: &mut impl Rng) -> Option<Assignment> {
    let num_groups = request.config.num_groups;
    if num_groups == 0 {
        return None;
    }

    let mut available = available_names(request.roster, request.selection);
    if available.is_empty() {
        return None;
    }

    let mut slots = fresh_slots(num_groups, request.previous);

    for (name, slot) in request.locked.iter() {
        if slot >= num_groups {
            continue;
        }
        if let Some(index) = available.iter().position(|n| n == name) {
            let name = available.remove(index);
            slots[slot].members.push(name);
        }
    }

    available.shuffle(rng);

    let per_group = request.config.members_per_group;
    let mut unplaced = Vec::new();
    if per_group > 0 {
        for (i, name) in available.into_iter().enumerate() {
            let target = (i / per_group) % num_groups;
            if slots[target].members.len() < per_group {
                slots[target].members.push(name);
            } else {
                unplaced.push(name);
            }
        }
    } else {
        for (i, name) in available.into_iter().enumerate() {
            slots[i % num_groups].members.push(name);
        }
    }

    Some(Assignment {
        groups: GroupSet::from_groups(slots),
        unplaced,
    })
}

/// Empty slots, keeping titles and colors from `previous` only when it
/// has exactly `num_groups` slots.
fn fresh_slots(num_groups: usize, previous: Option<&GroupSet>) -> Vec<Group> {
    let carry = previous.filter(|p| p.len() == num_groups);
    (0..num_groups)
        .map(|slot| match carry.and_then(|p| p.get(slot)) {
            Some(old) => Group {
                id: slot,
                title: if old.title.is_empty() {
                    default_title(slot)
                } else {
                    old.title.clone()
                },
                color_index: old.color_index,
                members: Vec::new(),
            },
            None => Group::new(slot),
        })
        .collect()
}
