use serde::{Deserialize, Serialize};

use crate::types::VoteType;

/// Classifies what a vote request did to the caller's stored vote.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransitionAction {
    /// A vote was created where none existed.
    Added,
    /// An existing vote flipped direction.
    Changed,
    /// An existing vote was deleted.
    Removed,
    /// Nothing to do (clearing a vote that does not exist).
    None,
}

/// The result of a vote transition, returned verbatim to the caller.
///
/// Clients use this to reconcile their locally displayed counters without a
/// follow-up read: `previous` is the vote that was replaced or removed, `new`
/// the vote now in effect. Absent fields are omitted from the serialized
/// form.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransitionOutcome {
    pub action: TransitionAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<VoteType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new: Option<VoteType>,
}

impl TransitionOutcome {
    pub fn added(new: VoteType) -> Self {
        Self {
            action: TransitionAction::Added,
            previous: None,
            new: Some(new),
        }
    }

    pub fn changed(previous: VoteType, new: VoteType) -> Self {
        Self {
            action: TransitionAction::Changed,
            previous: Some(previous),
            new: Some(new),
        }
    }

    pub fn removed(previous: VoteType) -> Self {
        Self {
            action: TransitionAction::Removed,
            previous: Some(previous),
            new: None,
        }
    }

    pub fn none() -> Self {
        Self {
            action: TransitionAction::None,
            previous: None,
            new: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changed_outcome_wire_shape() {
        let outcome = TransitionOutcome::changed(VoteType::Up, VoteType::Down);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "action": "changed",
                "previous": "upvote",
                "new": "downvote",
            })
        );
    }

    #[test]
    fn test_none_outcome_omits_vote_fields() {
        let outcome = TransitionOutcome::none();
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json, serde_json::json!({ "action": "none" }));
    }

    #[test]
    fn test_added_outcome_wire_shape() {
        let outcome = TransitionOutcome::added(VoteType::Up);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "action": "added",
                "new": "upvote",
            })
        );
    }
}
