//! Domain types representing expense categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of categories an expense can be filed under.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Food,
    Transport,
    Entertainment,
    Shopping,
    Health,
    Education,
    Utilities,
    Other,
}

/// Presentation hints attached to a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryAttributes {
    pub label: &'static str,
    pub icon: &'static str,
    pub color: CategoryColor,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CategoryColor {
    Orange,
    Blue,
    Purple,
    Pink,
    Red,
    Green,
    Yellow,
    Gray,
}

// Indexed by `ExpenseCategory as usize`; keep in declaration order.
static CATEGORY_ATTRIBUTES: [CategoryAttributes; ExpenseCategory::COUNT] = [
    CategoryAttributes {
        label: "Food",
        icon: "fork.knife",
        color: CategoryColor::Orange,
    },
    CategoryAttributes {
        label: "Transport",
        icon: "car.fill",
        color: CategoryColor::Blue,
    },
    CategoryAttributes {
        label: "Entertainment",
        icon: "tv.fill",
        color: CategoryColor::Purple,
    },
    CategoryAttributes {
        label: "Shopping",
        icon: "bag.fill",
        color: CategoryColor::Pink,
    },
    CategoryAttributes {
        label: "Health",
        icon: "cross.fill",
        color: CategoryColor::Red,
    },
    CategoryAttributes {
        label: "Education",
        icon: "book.fill",
        color: CategoryColor::Green,
    },
    CategoryAttributes {
        label: "Utilities",
        icon: "bolt.fill",
        color: CategoryColor::Yellow,
    },
    CategoryAttributes {
        label: "Other",
        icon: "questionmark.circle.fill",
        color: CategoryColor::Gray,
    },
];

impl ExpenseCategory {
    pub const COUNT: usize = 8;

    pub const ALL: [ExpenseCategory; ExpenseCategory::COUNT] = [
        ExpenseCategory::Food,
        ExpenseCategory::Transport,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Shopping,
        ExpenseCategory::Health,
        ExpenseCategory::Education,
        ExpenseCategory::Utilities,
        ExpenseCategory::Other,
    ];

    /// Looks up the static attribute row for this category.
    pub fn attributes(self) -> &'static CategoryAttributes {
        &CATEGORY_ATTRIBUTES[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.attributes().label
    }

    pub fn icon(self) -> &'static str {
        self.attributes().icon
    }

    pub fn color(self) -> CategoryColor {
        self.attributes().color
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
