//! Mission lifecycle: `pending -> today -> completed`, with `completed`
//! terminal. At most one mission per active plan holds `today` at a time
//! (enforced by the guarded promotion in `schedule`).

pub mod complete;
pub mod handlers;
pub mod schedule;
pub mod streak;
pub mod today;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionStatus {
    Pending,
    Today,
    Completed,
}

impl MissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissionStatus::Pending => "pending",
            MissionStatus::Today => "today",
            MissionStatus::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Result<Self, AppError> {
        match s {
            "pending" => Ok(MissionStatus::Pending),
            "today" => Ok(MissionStatus::Today),
            "completed" => Ok(MissionStatus::Completed),
            other => Err(AppError::Internal(anyhow::anyhow!(
                "Unknown mission status '{other}'"
            ))),
        }
    }

    /// Legal transitions. `pending` and `today` may both complete; nothing
    /// leaves `completed`.
    pub fn can_transition_to(&self, to: MissionStatus) -> bool {
        use MissionStatus::*;
        matches!(
            (self, to),
            (Pending, Today) | (Pending, Completed) | (Today, Completed)
        )
    }

    pub fn validate_transition(&self, to: MissionStatus) -> Result<(), AppError> {
        if self.can_transition_to(to) {
            Ok(())
        } else {
            Err(AppError::InvalidTransition(format!(
                "cannot move mission from '{}' to '{}'",
                self.as_str(),
                to.as_str()
            )))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    Completed,
    /// Redelivery or a double-click: success, but no side effects ran.
    AlreadyCompleted,
}

/// What a completion request does given the mission's current status.
/// Already-completed missions report idempotent success rather than an
/// error, so client retries and double-clicks are safe.
pub fn completion_outcome(status: MissionStatus) -> Result<CompletionOutcome, AppError> {
    if status == MissionStatus::Completed {
        return Ok(CompletionOutcome::AlreadyCompleted);
    }
    status.validate_transition(MissionStatus::Completed)?;
    Ok(CompletionOutcome::Completed)
}

#[cfg(test)]
mod tests {
    use super::MissionStatus::*;
    use super::{completion_outcome, CompletionOutcome};

    #[test]
    fn test_pending_and_today_may_complete() {
        assert!(Pending.can_transition_to(Completed));
        assert!(Today.can_transition_to(Completed));
    }

    #[test]
    fn test_pending_may_be_promoted_to_today() {
        assert!(Pending.can_transition_to(Today));
    }

    #[test]
    fn test_completed_is_terminal() {
        assert!(!Completed.can_transition_to(Pending));
        assert!(!Completed.can_transition_to(Today));
        assert!(!Completed.can_transition_to(Completed));
    }

    #[test]
    fn test_today_cannot_be_demoted() {
        assert!(!Today.can_transition_to(Pending));
    }

    #[test]
    fn test_validate_transition_names_both_states() {
        let err = Completed.validate_transition(Today).unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("completed"));
        assert!(msg.contains("today"));
    }

    #[test]
    fn test_parse_round_trips_all_statuses() {
        for status in [Pending, Today, Completed] {
            assert_eq!(
                super::MissionStatus::parse(status.as_str()).unwrap(),
                status
            );
        }
        assert!(super::MissionStatus::parse("archived").is_err());
    }

    #[test]
    fn test_pending_and_today_complete_normally() {
        assert_eq!(
            completion_outcome(Pending).unwrap(),
            CompletionOutcome::Completed
        );
        assert_eq!(
            completion_outcome(Today).unwrap(),
            CompletionOutcome::Completed
        );
    }

    #[test]
    fn test_completing_a_completed_mission_is_idempotent_success() {
        // Not an InvalidTransition: the caller gets ok with no side effects.
        assert_eq!(
            completion_outcome(Completed).unwrap(),
            CompletionOutcome::AlreadyCompleted
        );
    }
}
