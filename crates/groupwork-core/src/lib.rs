//! Groupwork Core - Classroom Group Maker Engine
//!
//! Wraps the pure logic in `groupwork-logic` in a stateful session that
//! owns the roster, group settings, locks and current groups, and can
//! save or restore all of it.
//!
//! # Example
//!
//! ```rust
//! use groupwork_core::prelude::*;
//!
//! let mut room = Classroom::new();
//! for name in ["Ada", "Ben", "Cy", "Dee"] {
//!     room.add_name(name);
//! }
//! room.set_num_groups(2);
//! room.generate_groups();
//! room.toggle_fixed_group(0);
//! room.rotate_groups();
//!
//! assert_eq!(room.groups().member_count(), 4);
//! ```

pub mod classroom;
pub mod persistence;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::classroom::Classroom;
    pub use crate::persistence::{SaveData, SaveError};
    pub use groupwork_logic::config::GroupConfig;
    pub use groupwork_logic::group::{Group, GroupSet};
    pub use groupwork_logic::locks::{FixedSlots, LockedMembers};
}
