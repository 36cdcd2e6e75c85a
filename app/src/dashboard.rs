//! Dashboard figures.
//!
//! Placeholder numbers until the ordering backend lands; the dashboard
//! screen is otherwise static.

/// One dashboard stat card.
#[derive(Debug, Clone, Copy)]
pub struct StatCard {
    /// Card label.
    pub label: &'static str,

    /// Displayed value.
    pub value: &'static str,
}

/// The three stat cards shown on the dashboard.
#[must_use]
pub const fn stat_cards() -> [StatCard; 3] {
    [
        StatCard {
            label: "Orders Today",
            value: "24",
        },
        StatCard {
            label: "Revenue",
            value: "$1,240",
        },
        StatCard {
            label: "Customers",
            value: "142",
        },
    ]
}
