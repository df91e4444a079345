mod ids;
mod item;
mod mutation;
mod outcome;
mod vote_counts;
mod vote_record;
mod vote_type;

pub use ids::{ItemId, UserId};
pub use item::ItemKind;
pub use mutation::{VoteMutation, VoteWrite};
pub use outcome::{TransitionAction, TransitionOutcome};
pub use vote_counts::VoteCounts;
pub use vote_record::VoteRecord;
pub use vote_type::VoteType;
