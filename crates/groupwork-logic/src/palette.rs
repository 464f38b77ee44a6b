//! Group color palette.
//!
//! Every group slot carries a `color_index` into a fixed eight-entry
//! palette. New slots cycle through the palette by position; an index
//! outside the palette renders with the first entry.
//!
//! ```
//! use groupwork_logic::palette::{default_color_index, GroupColor, PALETTE_SIZE};
//!
//! assert_eq!(PALETTE_SIZE, 8);
//! assert_eq!(default_color_index(9), 1);
//! assert_eq!(GroupColor::from_index(42), GroupColor::Blue);
//! ```

use serde::{Deserialize, Serialize};

/// Number of entries in the group palette.
pub const PALETTE_SIZE: usize = 8;

/// Named group colors, in palette order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupColor {
    Blue,
    Green,
    Purple,
    Pink,
    Yellow,
    Red,
    Indigo,
    Teal,
}

impl GroupColor {
    /// All colors for iteration, indexed by `color_index`.
    pub const ALL: [GroupColor; PALETTE_SIZE] = [
        GroupColor::Blue,
        GroupColor::Green,
        GroupColor::Purple,
        GroupColor::Pink,
        GroupColor::Yellow,
        GroupColor::Red,
        GroupColor::Indigo,
        GroupColor::Teal,
    ];

    /// Resolve a stored color index, falling back to [`GroupColor::Blue`].
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(GroupColor::Blue)
    }

    /// Palette position of this color.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display name shown in the color picker.
    pub fn name(self) -> &'static str {
        match self {
            GroupColor::Blue => "Blue",
            GroupColor::Green => "Green",
            GroupColor::Purple => "Purple",
            GroupColor::Pink => "Pink",
            GroupColor::Yellow => "Yellow",
            GroupColor::Red => "Red",
            GroupColor::Indigo => "Indigo",
            GroupColor::Teal => "Teal",
        }
    }

    /// Light background swatch (hex).
    pub fn background(self) -> &'static str {
        match self {
            GroupColor::Blue => "#eff6ff",
            GroupColor::Green => "#f0fdf4",
            GroupColor::Purple => "#faf5ff",
            GroupColor::Pink => "#fdf2f8",
            GroupColor::Yellow => "#fefce8",
            GroupColor::Red => "#fef2f2",
            GroupColor::Indigo => "#eef2ff",
            GroupColor::Teal => "#f0fdfa",
        }
    }

    /// Border swatch (hex).
    pub fn border(self) -> &'static str {
        match self {
            GroupColor::Blue => "#93c5fd",
            GroupColor::Green => "#86efac",
            GroupColor::Purple => "#d8b4fe",
            GroupColor::Pink => "#f9a8d4",
            GroupColor::Yellow => "#fde047",
            GroupColor::Red => "#fca5a5",
            GroupColor::Indigo => "#a5b4fc",
            GroupColor::Teal => "#5eead4",
        }
    }
}

/// Color a freshly created slot receives.
pub fn default_color_index(slot: usize) -> usize {
    slot % PALETTE_SIZE
}
