use crate::types::VoteType;

/// The vote-row write a transition requires.
///
/// Updates and deletes carry the vote type the engine observed when it
/// computed the transition, so the storage layer can make the write
/// conditional on that state and reject it if a concurrent writer got there
/// first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoteWrite {
    /// Create a vote where none existed.
    Insert(VoteType),
    /// Flip an existing vote from one direction to the other.
    Update { from: VoteType, to: VoteType },
    /// Delete an existing vote.
    Delete { previous: VoteType },
}

/// A vote-row write bundled with the counter deltas it implies.
///
/// The storage layer applies both sides in a single transaction: the row
/// write first, then the counter adjustment, so the aggregate counters only
/// ever move together with a vote record change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoteMutation {
    pub write: VoteWrite,
    pub upvote_delta: i64,
    pub downvote_delta: i64,
}
