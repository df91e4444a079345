//! The per-user, per-item vote state machine.
//!
//! States are `None`, `Upvoted`, `Downvoted`; a cast request moves between
//! them and a clear request forces `None`. Each transition is expressed as a
//! `VoteMutation`: the vote-row write plus the counter deltas it implies,
//! applied together by the repository.
use vote_engine_shared::types::{TransitionOutcome, VoteMutation, VoteType, VoteWrite};

fn mutation(write: VoteWrite) -> VoteMutation {
    let (upvote_delta, downvote_delta) = match write {
        VoteWrite::Insert(VoteType::Up) => (1, 0),
        VoteWrite::Insert(VoteType::Down) => (0, 1),
        VoteWrite::Update {
            from: VoteType::Up,
            to: VoteType::Down,
        } => (-1, 1),
        VoteWrite::Update {
            from: VoteType::Down,
            to: VoteType::Up,
        } => (1, -1),
        VoteWrite::Delete {
            previous: VoteType::Up,
        } => (-1, 0),
        VoteWrite::Delete {
            previous: VoteType::Down,
        } => (0, -1),
        // Same-direction updates are never produced by the transitions below.
        VoteWrite::Update { .. } => (0, 0),
    };
    VoteMutation {
        write,
        upvote_delta,
        downvote_delta,
    }
}

/// Computes the transition for a cast request.
///
/// Casting the direction already held toggles the vote off; casting the
/// opposite direction flips it; casting with no stored vote creates one.
pub(crate) fn cast_transition(
    current: Option<VoteType>,
    requested: VoteType,
) -> (VoteMutation, TransitionOutcome) {
    match current {
        None => (
            mutation(VoteWrite::Insert(requested)),
            TransitionOutcome::added(requested),
        ),
        Some(existing) if existing == requested => (
            mutation(VoteWrite::Delete { previous: existing }),
            TransitionOutcome::removed(existing),
        ),
        Some(existing) => (
            mutation(VoteWrite::Update {
                from: existing,
                to: requested,
            }),
            TransitionOutcome::changed(existing, requested),
        ),
    }
}

/// Computes the transition for a clear request.
///
/// Returns no mutation when there is nothing to clear.
pub(crate) fn clear_transition(
    current: Option<VoteType>,
) -> (Option<VoteMutation>, TransitionOutcome) {
    match current {
        None => (None, TransitionOutcome::none()),
        Some(existing) => (
            Some(mutation(VoteWrite::Delete { previous: existing })),
            TransitionOutcome::removed(existing),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vote_engine_shared::types::TransitionAction;

    #[test]
    fn test_cast_on_empty_state_adds_upvote() {
        let (mutation, outcome) = cast_transition(None, VoteType::Up);
        assert_eq!(mutation.write, VoteWrite::Insert(VoteType::Up));
        assert_eq!((mutation.upvote_delta, mutation.downvote_delta), (1, 0));
        assert_eq!(outcome, TransitionOutcome::added(VoteType::Up));
    }

    #[test]
    fn test_cast_on_empty_state_adds_downvote() {
        let (mutation, outcome) = cast_transition(None, VoteType::Down);
        assert_eq!(mutation.write, VoteWrite::Insert(VoteType::Down));
        assert_eq!((mutation.upvote_delta, mutation.downvote_delta), (0, 1));
        assert_eq!(outcome, TransitionOutcome::added(VoteType::Down));
    }

    #[test]
    fn test_cast_same_direction_toggles_upvote_off() {
        let (mutation, outcome) = cast_transition(Some(VoteType::Up), VoteType::Up);
        assert_eq!(
            mutation.write,
            VoteWrite::Delete {
                previous: VoteType::Up
            }
        );
        assert_eq!((mutation.upvote_delta, mutation.downvote_delta), (-1, 0));
        assert_eq!(outcome, TransitionOutcome::removed(VoteType::Up));
    }

    #[test]
    fn test_cast_same_direction_toggles_downvote_off() {
        let (mutation, outcome) = cast_transition(Some(VoteType::Down), VoteType::Down);
        assert_eq!(
            mutation.write,
            VoteWrite::Delete {
                previous: VoteType::Down
            }
        );
        assert_eq!((mutation.upvote_delta, mutation.downvote_delta), (0, -1));
        assert_eq!(outcome, TransitionOutcome::removed(VoteType::Down));
    }

    #[test]
    fn test_cast_opposite_direction_flips_up_to_down() {
        let (mutation, outcome) = cast_transition(Some(VoteType::Up), VoteType::Down);
        assert_eq!(
            mutation.write,
            VoteWrite::Update {
                from: VoteType::Up,
                to: VoteType::Down
            }
        );
        assert_eq!((mutation.upvote_delta, mutation.downvote_delta), (-1, 1));
        assert_eq!(outcome, TransitionOutcome::changed(VoteType::Up, VoteType::Down));
    }

    #[test]
    fn test_cast_opposite_direction_flips_down_to_up() {
        let (mutation, outcome) = cast_transition(Some(VoteType::Down), VoteType::Up);
        assert_eq!(
            mutation.write,
            VoteWrite::Update {
                from: VoteType::Down,
                to: VoteType::Up
            }
        );
        assert_eq!((mutation.upvote_delta, mutation.downvote_delta), (1, -1));
        assert_eq!(outcome, TransitionOutcome::changed(VoteType::Down, VoteType::Up));
    }

    #[test]
    fn test_clear_with_no_vote_is_a_noop() {
        let (mutation, outcome) = clear_transition(None);
        assert!(mutation.is_none());
        assert_eq!(outcome.action, TransitionAction::None);
        assert_eq!(outcome.previous, None);
        assert_eq!(outcome.new, None);
    }

    #[test]
    fn test_clear_removes_stored_upvote() {
        let (mutation, outcome) = clear_transition(Some(VoteType::Up));
        let mutation = mutation.unwrap();
        assert_eq!(
            mutation.write,
            VoteWrite::Delete {
                previous: VoteType::Up
            }
        );
        assert_eq!((mutation.upvote_delta, mutation.downvote_delta), (-1, 0));
        assert_eq!(outcome, TransitionOutcome::removed(VoteType::Up));
    }

    #[test]
    fn test_clear_removes_stored_downvote() {
        let (mutation, outcome) = clear_transition(Some(VoteType::Down));
        let mutation = mutation.unwrap();
        assert_eq!((mutation.upvote_delta, mutation.downvote_delta), (0, -1));
        assert_eq!(outcome, TransitionOutcome::removed(VoteType::Down));
    }
}
