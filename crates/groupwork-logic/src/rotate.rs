//! Group rotation.
//!
//! Every non-fixed slot hands its members to the next non-fixed slot in
//! circular order. Fixed slots are skipped as destinations and keep their
//! own members. Slot metadata (id, title, color) never moves.
//!
//! ```text
//!   slots:   0      1(fixed)   2
//!   before:  [A,B]  [C,D]      [E,F]
//!   after:   [E,F]  [C,D]      [A,B]
//! ```
//!
//! ```
//! use groupwork_logic::group::{Group, GroupSet};
//! use groupwork_logic::locks::FixedSlots;
//! use groupwork_logic::rotate::rotate_groups;
//!
//! let groups = GroupSet::from_groups(
//!     [["A", "B"], ["C", "D"], ["E", "F"]]
//!         .iter()
//!         .enumerate()
//!         .map(|(i, m)| Group { members: m.iter().map(|s| s.to_string()).collect(), ..Group::new(i) })
//!         .collect(),
//! );
//! let fixed: FixedSlots = [1].into_iter().collect();
//!
//! let rotated = rotate_groups(&groups, &fixed);
//! assert_eq!(rotated.get(0).unwrap().members, ["E", "F"]);
//! assert_eq!(rotated.get(1).unwrap().members, ["C", "D"]);
//! assert_eq!(rotated.get(2).unwrap().members, ["A", "B"]);
//! ```

use crate::group::GroupSet;
use crate::locks::FixedSlots;

/// Slot that receives `slot`'s members on rotation.
///
/// Walks forward from `slot`, skipping fixed slots, and stops at the
/// first free slot or when the walk wraps back to `slot`. A fixed slot
/// maps to itself.
pub fn rotation_target(slot: usize, slot_count: usize, fixed: &FixedSlots) -> usize {
    if slot_count == 0 || fixed.contains(slot) {
        return slot;
    }
    let mut target = slot;
    loop {
        target = (target + 1) % slot_count;
        if target == slot || !fixed.contains(target) {
            return target;
        }
    }
}

/// Rotated copy of `groups`.
pub fn rotate_groups(groups: &GroupSet, fixed: &FixedSlots) -> GroupSet {
    let mut rotated = groups.clone();
    rotate_in_place(&mut rotated, fixed);
    rotated
}

/// Rotate membership in place. Empty sets are left alone.
pub fn rotate_in_place(groups: &mut GroupSet, fixed: &FixedSlots) {
    let slot_count = groups.len();
    if slot_count == 0 {
        return;
    }

    let mut outgoing: Vec<Vec<String>> = (0..slot_count)
        .map(|slot| {
            groups
                .get_mut(slot)
                .map(|g| std::mem::take(&mut g.members))
                .unwrap_or_default()
        })
        .collect();

    for (slot, members) in outgoing.iter_mut().enumerate() {
        let target = rotation_target(slot, slot_count, fixed);
        if let Some(group) = groups.get_mut(target) {
            group.members = std::mem::take(members);
        }
    }
}
