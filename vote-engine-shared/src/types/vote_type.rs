use serde::{Deserialize, Serialize};

/// Represents the direction of a vote cast by a user.
///
/// Serialized as `"upvote"` / `"downvote"`, the strings clients send and
/// render next to each item.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum VoteType {
    /// Indicates an upvote or positive endorsement.
    #[serde(rename = "upvote")]
    Up,
    /// Indicates a downvote or negative endorsement.
    #[serde(rename = "downvote")]
    Down,
}

impl VoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteType::Up => "upvote",
            VoteType::Down => "downvote",
        }
    }
}

impl std::fmt::Display for VoteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
