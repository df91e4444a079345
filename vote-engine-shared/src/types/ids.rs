/// Identifier of a user row.
pub type UserId = i64;

/// Identifier of a content item row (a ticket or a reply).
pub type ItemId = i64;
