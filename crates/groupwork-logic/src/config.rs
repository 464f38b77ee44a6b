//! Group-generation settings and capacity math.
//!
//! The settings panel hands over raw text for "number of groups" and
//! "members per group". These helpers clamp that input into the range
//! the engine expects, so [`crate::assign`] never sees a zero group
//! count from a well-behaved caller.
//!
//! ```
//! use groupwork_logic::config::{parse_count, validate_config, GroupConfig};
//!
//! let config = GroupConfig {
//!     num_groups: parse_count("3", 1),
//!     members_per_group: parse_count("abc", 0),
//! };
//! assert_eq!(config.num_groups, 3);
//! assert_eq!(config.members_per_group, 0);
//! assert!(validate_config(&config).is_empty());
//! ```

use serde::{Deserialize, Serialize};

/// Largest group count the session accepts.
pub const MAX_GROUPS: usize = 64;

/// Settings for one Assign call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupConfig {
    /// Number of slots to build (≥ 1).
    pub num_groups: usize,
    /// Capacity per slot; 0 means unconstrained round-robin.
    pub members_per_group: usize,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            num_groups: 4,
            members_per_group: 0,
        }
    }
}

impl GroupConfig {
    /// Total seats across all slots, or `None` when unconstrained.
    ///
    /// A product too large for `usize` is treated as unconstrained.
    pub fn total_capacity(&self) -> Option<usize> {
        if self.members_per_group == 0 {
            None
        } else {
            self.num_groups.checked_mul(self.members_per_group)
        }
    }

    /// Minimum number of shuffled names a capacity-bounded Assign leaves
    /// out, given how many names reach the shuffle pass.
    ///
    /// Locked names never count here: they bypass capacity, but they do
    /// occupy seats, so the actual number left out can be higher.
    pub fn expected_unplaced(&self, shuffled: usize) -> usize {
        match self.total_capacity() {
            Some(capacity) => shuffled.saturating_sub(capacity),
            None => 0,
        }
    }

    /// Copy with the group count pulled into `1..=MAX_GROUPS`.
    pub fn clamped(self) -> Self {
        Self {
            num_groups: self.num_groups.clamp(1, MAX_GROUPS),
            members_per_group: self.members_per_group,
        }
    }
}

/// Clamp a raw group count into `1..=MAX_GROUPS`.
pub fn clamp_group_count(raw: i64) -> usize {
    raw.clamp(1, MAX_GROUPS as i64) as usize
}

/// Clamp a raw members-per-group value to zero or more.
pub fn clamp_members_per_group(raw: i64) -> usize {
    usize::try_from(raw.max(0)).unwrap_or(usize::MAX)
}

/// Parse user text into a count no smaller than `min`.
///
/// Non-numeric input yields `min`. A leading integer is accepted even
/// when followed by junk ("4 groups" → 4).
pub fn parse_count(input: &str, min: usize) -> usize {
    let trimmed = input.trim();
    let digits_end = trimmed
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    match trimmed[..digits_end].parse::<i64>() {
        Ok(value) if value >= min as i64 => value as usize,
        _ => min,
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Group count must be at least one.
    ZeroGroups,
    /// Group count beyond [`MAX_GROUPS`].
    TooManyGroups(usize),
}

/// Validate a group configuration, returning all errors found.
pub fn validate_config(config: &GroupConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.num_groups == 0 {
        errors.push(ConfigError::ZeroGroups);
    }
    if config.num_groups > MAX_GROUPS {
        errors.push(ConfigError::TooManyGroups(config.num_groups));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_four_auto_groups() {
        let config = GroupConfig::default();
        assert_eq!(config.num_groups, 4);
        assert_eq!(config.members_per_group, 0);
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn clamps() {
        assert_eq!(clamp_group_count(-3), 1);
        assert_eq!(clamp_group_count(0), 1);
        assert_eq!(clamp_group_count(6), 6);
        assert_eq!(clamp_group_count(i64::MAX), MAX_GROUPS);
        assert_eq!(clamp_members_per_group(-1), 0);
        assert_eq!(clamp_members_per_group(5), 5);
    }

    #[test]
    fn parse_count_falls_back_to_min() {
        assert_eq!(parse_count("", 1), 1);
        assert_eq!(parse_count("abc", 1), 1);
        assert_eq!(parse_count("-4", 1), 1);
        assert_eq!(parse_count("0", 1), 1);
        assert_eq!(parse_count("0", 0), 0);
        assert_eq!(parse_count(" 7 ", 1), 7);
        assert_eq!(parse_count("4 groups", 1), 4);
        assert_eq!(parse_count("+3", 0), 3);
    }

    #[test]
    fn capacity_math() {
        let auto = GroupConfig::default();
        assert_eq!(auto.total_capacity(), None);
        assert_eq!(auto.expected_unplaced(100), 0);

        let bounded = GroupConfig {
            num_groups: 3,
            members_per_group: 1,
        };
        assert_eq!(bounded.total_capacity(), Some(3));
        assert_eq!(bounded.expected_unplaced(4), 1);
        assert_eq!(bounded.expected_unplaced(2), 0);
    }

    #[test]
    fn huge_capacity_is_unconstrained() {
        let huge = GroupConfig {
            num_groups: 4,
            members_per_group: clamp_members_per_group(i64::MAX),
        };
        assert_eq!(huge.total_capacity(), None);
        assert_eq!(huge.expected_unplaced(1_000), 0);

        let wide = GroupConfig {
            num_groups: MAX_GROUPS,
            members_per_group: usize::MAX / 2,
        };
        assert_eq!(wide.total_capacity(), None);
    }

    #[test]
    fn validation_reports_errors() {
        let zero = GroupConfig {
            num_groups: 0,
            members_per_group: 0,
        };
        assert_eq!(validate_config(&zero), vec![ConfigError::ZeroGroups]);
        assert!(validate_config(&zero.clamped()).is_empty());

        let huge = GroupConfig {
            num_groups: MAX_GROUPS + 1,
            members_per_group: 2,
        };
        assert_eq!(
            validate_config(&huge),
            vec![ConfigError::TooManyGroups(MAX_GROUPS + 1)]
        );
        assert_eq!(huge.clamped().num_groups, MAX_GROUPS);
        assert!(validate_config(&huge.clamped()).is_empty());
    }
}
