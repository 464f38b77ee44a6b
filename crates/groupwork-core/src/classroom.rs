//! Classroom session - main entry point for a group-maker front end

use groupwork_logic::assign::{assign_groups, AssignRequest};
use groupwork_logic::config::{
    clamp_group_count, clamp_members_per_group, parse_count, validate_config, GroupConfig,
};
use groupwork_logic::group::GroupSet;
use groupwork_logic::locks::{FixedSlots, LockedMembers};
use groupwork_logic::palette::GroupColor;
use groupwork_logic::rotate::rotate_in_place;
use groupwork_logic::roster::{normalize_name, pick_random, toggle_selection};
use rand::Rng;

use crate::persistence::{SaveData, SaveError, SAVE_VERSION};

/// All state behind the group maker: roster, settings, locks and the
/// current groups.
///
/// Every method is one complete user action. The session owns its state
/// exclusively; callers read it back through the accessors after each
/// action and persist it however they like.
#[derive(Debug, Clone, Default)]
pub struct Classroom {
    roster: Vec<String>,
    selection: Vec<String>,
    config: GroupConfig,
    locked: LockedMembers,
    fixed: FixedSlots,
    groups: GroupSet,
    /// Names left out by the last capacity-bounded generate.
    unplaced: Vec<String>,
}

impl Classroom {
    /// Create an empty classroom with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a typed name. Blank input and names already on the roster are
    /// ignored; returns whether the roster changed.
    pub fn add_name(&mut self, raw: &str) -> bool {
        let Some(name) = normalize_name(raw) else {
            return false;
        };
        if self.roster.contains(&name) {
            log::debug!("'{}' already on roster", name);
            return false;
        }
        log::debug!("Added '{}' to roster", name);
        self.roster.push(name);
        true
    }

    /// Remove the name at `index`, also dropping it from the selection.
    ///
    /// Locks and current groups keep the name; stale entries are harmless.
    pub fn remove_name(&mut self, index: usize) -> Option<String> {
        if index >= self.roster.len() {
            return None;
        }
        let name = self.roster.remove(index);
        self.selection.retain(|n| n != &name);
        log::debug!("Removed '{}' from roster", name);
        Some(name)
    }

    /// Select or deselect a name for the next generate.
    pub fn toggle_selected(&mut self, name: &str) -> bool {
        toggle_selection(&mut self.selection, name)
    }

    /// Set the group count from raw user input (clamped to `1..=MAX_GROUPS`).
    pub fn set_num_groups(&mut self, raw: i64) {
        self.config.num_groups = clamp_group_count(raw);
        if self.config.num_groups as i64 != raw {
            log::debug!("Group count {} clamped to {}", raw, self.config.num_groups);
        }
    }

    /// Set the per-group capacity from raw user input (clamped to ≥ 0).
    pub fn set_members_per_group(&mut self, raw: i64) {
        self.config.members_per_group = clamp_members_per_group(raw);
    }

    /// Set the group count from the text typed into the settings field.
    pub fn set_num_groups_text(&mut self, input: &str) {
        let count = parse_count(input, 1);
        self.set_num_groups(i64::try_from(count).unwrap_or(i64::MAX));
    }

    /// Set the per-group capacity from the settings field text.
    pub fn set_members_per_group_text(&mut self, input: &str) {
        let count = parse_count(input, 0);
        self.set_members_per_group(i64::try_from(count).unwrap_or(i64::MAX));
    }

    /// Generate fresh groups using the thread RNG.
    pub fn generate_groups(&mut self) -> bool {
        let mut rng = rand::thread_rng();
        self.generate_groups_with(&mut rng)
    }

    /// Generate fresh groups, replacing the current ones.
    ///
    /// Returns `false` and leaves the groups untouched when nobody is
    /// available to place.
    pub fn generate_groups_with(&mut self, rng: &mut impl Rng) -> bool {
        let request = AssignRequest {
            roster: &self.roster,
            selection: &self.selection,
            config: self.config.clamped(),
            locked: &self.locked,
            previous: Some(&self.groups),
        };
        let Some(assignment) = assign_groups(&request, rng) else {
            log::debug!("No names available, keeping current groups");
            return false;
        };

        log::info!(
            "Generated {} groups with {} members",
            assignment.groups.len(),
            assignment.groups.member_count()
        );
        if !assignment.unplaced.is_empty() {
            log::warn!(
                "{} names left unplaced (capacity {} per group): {}",
                assignment.unplaced.len(),
                self.config.members_per_group,
                assignment.unplaced.join(", ")
            );
        }

        self.groups = assignment.groups;
        self.unplaced = assignment.unplaced;
        true
    }

    /// Rotate members through every non-fixed group.
    pub fn rotate_groups(&mut self) {
        if self.groups.is_empty() {
            return;
        }
        rotate_in_place(&mut self.groups, &self.fixed);
        log::info!(
            "Rotated {} groups ({} fixed)",
            self.groups.len(),
            self.fixed.len()
        );
    }

    /// Flip whether a group stays put on rotation. Returns the new state.
    pub fn toggle_fixed_group(&mut self, slot: usize) -> bool {
        let fixed = self.fixed.toggle(slot);
        log::debug!("Group {} fixed: {}", slot, fixed);
        fixed
    }

    /// Lock or unlock a member to a group for the next generate.
    pub fn toggle_locked_member(&mut self, name: &str, slot: usize) -> Option<usize> {
        let lock = self.locked.toggle(name, slot);
        log::debug!("Lock for '{}': {:?}", name, lock);
        lock
    }

    /// Rename a group. Returns `false` for an unknown slot.
    pub fn set_group_title(&mut self, slot: usize, title: &str) -> bool {
        self.groups.set_title(slot, title)
    }

    /// Recolor a group. Returns `false` for an unknown slot.
    pub fn set_group_color(&mut self, slot: usize, color_index: usize) -> bool {
        let changed = self.groups.set_color(slot, color_index);
        if changed {
            log::debug!(
                "Group {} color: {}",
                slot,
                GroupColor::from_index(color_index).name()
            );
        }
        changed
    }

    /// Pick a random name from the whole roster.
    pub fn pick_random(&self) -> Option<&str> {
        pick_random(&self.roster, &mut rand::thread_rng())
    }

    /// Clear names, groups, selection, locks and fixed groups.
    ///
    /// Group settings survive a clear.
    pub fn clear_all(&mut self) {
        log::info!("Clearing classroom");
        *self = Self {
            config: self.config,
            ..Self::default()
        };
    }

    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    pub fn config(&self) -> GroupConfig {
        self.config
    }

    pub fn groups(&self) -> &GroupSet {
        &self.groups
    }

    pub fn locked(&self) -> &LockedMembers {
        &self.locked
    }

    pub fn fixed(&self) -> &FixedSlots {
        &self.fixed
    }

    pub fn unplaced(&self) -> &[String] {
        &self.unplaced
    }

    /// Snapshot of the persistable state.
    pub fn snapshot(&self) -> SaveData {
        SaveData {
            version: SAVE_VERSION,
            roster: self.roster.clone(),
            selection: self.selection.clone(),
            config: self.config,
            locked: self.locked.clone(),
            fixed: self.fixed.clone(),
            groups: self.groups.clone(),
        }
    }

    /// Replace all state with a snapshot.
    pub fn restore(&mut self, data: SaveData) {
        for problem in validate_config(&data.config) {
            log::warn!("Saved settings out of range, clamping: {:?}", problem);
        }
        self.roster = data.roster;
        self.selection = data.selection;
        self.config = data.config.clamped();
        self.locked = data.locked;
        self.fixed = data.fixed;
        self.groups = data.groups;
        self.unplaced.clear();
    }

    /// Save classroom state to a writer
    pub fn save<W: std::io::Write>(&self, writer: W) -> Result<(), SaveError> {
        crate::persistence::save_classroom(writer, &self.snapshot())
    }

    /// Load classroom state from a reader
    pub fn load<R: std::io::Read>(&mut self, reader: R) -> Result<(), SaveError> {
        let loaded = crate::persistence::load_classroom(reader)?;
        log::info!(
            "Loaded classroom: {} names, {} groups",
            loaded.roster.len(),
            loaded.groups.len()
        );
        self.restore(loaded);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use groupwork_logic::config::MAX_GROUPS;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn classroom(names: &[&str]) -> Classroom {
        let mut room = Classroom::new();
        for name in names {
            room.add_name(name);
        }
        room
    }

    #[test]
    fn test_classroom_creation() {
        let room = Classroom::new();
        assert!(room.roster().is_empty());
        assert!(room.groups().is_empty());
        assert_eq!(room.config(), GroupConfig::default());
    }

    #[test]
    fn add_name_trims_and_rejects_duplicates() {
        let mut room = Classroom::new();
        assert!(room.add_name("  Ada "));
        assert!(!room.add_name("Ada"));
        assert!(!room.add_name("   "));
        assert_eq!(room.roster(), ["Ada"]);
    }

    #[test]
    fn remove_name_drops_selection() {
        let mut room = classroom(&["Ada", "Ben"]);
        room.toggle_selected("Ben");
        assert_eq!(room.remove_name(1), Some("Ben".to_string()));
        assert!(room.selection().is_empty());
        assert_eq!(room.remove_name(5), None);
    }

    #[test]
    fn settings_are_clamped() {
        let mut room = Classroom::new();
        room.set_num_groups(-2);
        room.set_members_per_group(-7);
        assert_eq!(room.config().num_groups, 1);
        assert_eq!(room.config().members_per_group, 0);
    }

    #[test]
    fn huge_settings_do_not_panic() {
        let mut room = classroom(&["A", "B", "C", "D", "E"]);
        room.set_num_groups(i64::MAX);
        room.set_members_per_group(i64::MAX);
        assert_eq!(room.config().num_groups, MAX_GROUPS);
        assert_eq!(room.config().total_capacity(), None);

        assert!(room.generate_groups());
        assert_eq!(room.groups().len(), MAX_GROUPS);
        assert_eq!(room.groups().member_count(), 5);
        assert!(room.unplaced().is_empty());
    }

    #[test]
    fn settings_from_text() {
        let mut room = Classroom::new();
        room.set_num_groups_text("3 tables");
        room.set_members_per_group_text(" 5 ");
        assert_eq!(room.config().num_groups, 3);
        assert_eq!(room.config().members_per_group, 5);

        room.set_num_groups_text("lots");
        room.set_members_per_group_text("-2");
        assert_eq!(room.config().num_groups, 1);
        assert_eq!(room.config().members_per_group, 0);

        room.set_num_groups_text("9999999999999999999999");
        assert_eq!(room.config().num_groups, 1);
        room.set_num_groups_text("500");
        assert_eq!(room.config().num_groups, MAX_GROUPS);
    }

    #[test]
    fn restore_clamps_out_of_range_settings() {
        let mut data = Classroom::new().snapshot();
        data.config.num_groups = MAX_GROUPS * 10;
        let mut room = Classroom::new();
        room.restore(data);
        assert_eq!(room.config().num_groups, MAX_GROUPS);
    }

    #[test]
    fn generate_replaces_groups() {
        let mut room = classroom(&["A", "B", "C", "D", "E"]);
        room.set_num_groups(2);
        room.toggle_locked_member("A", 1);
        let mut rng = StdRng::seed_from_u64(3);

        assert!(room.generate_groups_with(&mut rng));
        assert_eq!(room.groups().len(), 2);
        assert_eq!(room.groups().slot_of("A"), Some(1));
        assert_eq!(room.groups().member_count(), 5);
    }

    #[test]
    fn generate_with_nobody_keeps_groups() {
        let mut room = classroom(&["A", "B"]);
        room.set_num_groups(2);
        room.generate_groups();
        let before = room.groups().clone();

        room.remove_name(0);
        room.remove_name(0);
        assert!(!room.generate_groups());
        assert_eq!(room.groups(), &before);
    }

    #[test]
    fn generate_respects_selection() {
        let mut room = classroom(&["A", "B", "C", "D"]);
        room.toggle_selected("B");
        room.toggle_selected("D");
        room.generate_groups();
        let mut placed = room.groups().all_members();
        placed.sort();
        assert_eq!(placed, vec!["B", "D"]);
    }

    #[test]
    fn generate_reports_unplaced() {
        let mut room = classroom(&["A", "B", "C", "D"]);
        room.set_num_groups(3);
        room.set_members_per_group(1);
        room.generate_groups();
        assert_eq!(room.unplaced().len(), 1);
        assert_eq!(room.groups().member_count(), 3);
    }

    #[test]
    fn titles_survive_regenerate() {
        let mut room = classroom(&["A", "B", "C", "D"]);
        room.set_num_groups(2);
        room.generate_groups();
        assert!(room.set_group_title(1, "Builders"));
        assert!(room.set_group_color(1, 4));
        room.generate_groups();
        assert_eq!(room.groups().get(1).unwrap().title, "Builders");
        assert_eq!(room.groups().get(1).unwrap().color_index, 4);

        room.set_num_groups(3);
        room.generate_groups();
        assert_eq!(room.groups().get(1).unwrap().title, "Group 2");
    }

    #[test]
    fn rotate_respects_fixed() {
        let mut room = classroom(&["A", "B", "C", "D", "E", "F"]);
        room.set_num_groups(3);
        room.generate_groups();
        let before = room.groups().clone();

        assert!(room.toggle_fixed_group(1));
        room.rotate_groups();
        let after = room.groups();
        assert_eq!(after.get(1), before.get(1));
        assert_eq!(after.get(2).unwrap().members, before.get(0).unwrap().members);
        assert_eq!(after.get(0).unwrap().members, before.get(2).unwrap().members);
    }

    #[test]
    fn rotate_without_groups_is_noop() {
        let mut room = Classroom::new();
        room.rotate_groups();
        assert!(room.groups().is_empty());
    }

    #[test]
    fn lock_toggle_does_not_move_members() {
        let mut room = classroom(&["A", "B", "C", "D"]);
        room.set_num_groups(2);
        room.generate_groups();
        let before = room.groups().clone();
        let slot = before.slot_of("A").unwrap();
        let other = 1 - slot;

        assert_eq!(room.toggle_locked_member("A", other), Some(other));
        assert_eq!(room.groups(), &before);
        assert_eq!(room.locked().slot_for("A"), Some(other));
    }

    #[test]
    fn pick_random_uses_roster() {
        let room = classroom(&["Ada", "Ben"]);
        let picked = room.pick_random().unwrap();
        assert!(picked == "Ada" || picked == "Ben");
        assert_eq!(Classroom::new().pick_random(), None);
    }

    #[test]
    fn clear_all_keeps_settings() {
        let mut room = classroom(&["A", "B"]);
        room.set_num_groups(2);
        room.toggle_fixed_group(0);
        room.toggle_locked_member("A", 0);
        room.generate_groups();

        room.clear_all();
        assert!(room.roster().is_empty());
        assert!(room.groups().is_empty());
        assert!(room.fixed().is_empty());
        assert!(room.locked().is_empty());
        assert_eq!(room.config().num_groups, 2);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let mut room = classroom(&["A", "B", "C", "D", "E"]);
        room.set_num_groups(2);
        room.toggle_fixed_group(1);
        room.toggle_locked_member("C", 0);
        room.generate_groups();
        room.set_group_title(0, "Front row");

        let mut save_buffer = Vec::new();
        room.save(&mut save_buffer).expect("Save failed");

        let mut loaded = Classroom::new();
        loaded.load(&save_buffer[..]).expect("Load failed");

        assert_eq!(loaded.roster(), room.roster());
        assert_eq!(loaded.groups(), room.groups());
        assert_eq!(loaded.fixed(), room.fixed());
        assert_eq!(loaded.locked(), room.locked());
        assert_eq!(loaded.config(), room.config());
    }
}
