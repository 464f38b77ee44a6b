//! Roster helpers: name entry, selection and the random picker.
//!
//! The roster is an ordered list of unique display names. Uniqueness is
//! the caller's job; nothing here deduplicates.

use rand::seq::SliceRandom;
use rand::Rng;

/// Trim a typed name, rejecting blank input.
pub fn normalize_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Names eligible for an Assign call, in roster order.
///
/// An empty selection means the whole roster. Selected names that are
/// no longer on the roster are ignored.
pub fn available_names(roster: &[String], selection: &[String]) -> Vec<String> {
    if selection.is_empty() {
        roster.to_vec()
    } else {
        roster
            .iter()
            .filter(|name| selection.contains(name))
            .cloned()
            .collect()
    }
}

/// Add or remove `name` from the selection. Returns `true` if it is now
/// selected.
pub fn toggle_selection(selection: &mut Vec<String>, name: &str) -> bool {
    match selection.iter().position(|n| n == name) {
        Some(index) => {
            selection.remove(index);
            false
        }
        None => {
            selection.push(name.to_string());
            true
        }
    }
}

/// Pick one name uniformly at random.
pub fn pick_random<'a>(roster: &'a [String], rng: &mut impl Rng) -> Option<&'a str> {
    roster.choose(rng).map(String::as_str)
}
