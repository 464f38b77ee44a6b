//! Pure group logic for Groupwork.
//!
//! This crate contains the group assignment and rotation engine that is
//! independent of any storage, UI, or runtime. Functions take plain data
//! (roster, settings, locks) and return results, making them unit-testable
//! and usable from the session engine, the headless harness, or any
//! future front end.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`assign`] | Two-pass group generation (locked members, then shuffled fill) |
//! | [`config`] | Group count / capacity settings, clamping, validation |
//! | [`group`] | Slot model: id, title, color, members; group sets |
//! | [`locks`] | Fixed slots and locked members bookkeeping |
//! | [`palette`] | The eight-color group palette |
//! | [`rotate`] | Cyclic rotation of members around fixed slots |
//! | [`roster`] | Name entry, selection filtering, random picker |

pub mod assign;
pub mod config;
pub mod group;
pub mod locks;
pub mod palette;
pub mod rotate;
pub mod roster;
