use serde::{Deserialize, Serialize};

/// The two votable content item kinds.
///
/// Tickets and replies are structurally identical for voting purposes; every
/// operation in the engine is parameterized by this kind rather than
/// duplicated per table.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Ticket,
    Reply,
}

impl ItemKind {
    /// Both kinds, in a fixed order. Used by code that aggregates across
    /// every votable table.
    pub const ALL: [ItemKind; 2] = [ItemKind::Ticket, ItemKind::Reply];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Ticket => "ticket",
            ItemKind::Reply => "reply",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
