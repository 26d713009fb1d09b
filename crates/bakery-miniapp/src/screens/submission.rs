//! # Submission State Machine
//!
//! Every write-producing screen tracks its last attempt with a [`Submission`]:
//!
//! ```text
//! Idle ──begin──▶ Submitting ──succeed──▶ Succeeded(T)
//!   ▲                 │
//!   └──edit── Failed ◀┘ fail
//! ```
//!
//! `begin` refuses while a write is in flight and after success, so a second activation
//! of the submit control never produces a second request. `Succeeded` is terminal until
//! [`Submission::reset`] starts a fresh draft.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission<T> {
    Idle,
    Submitting,
    Succeeded(T),
    Failed(String),
}

impl<T> Default for Submission<T> {
    fn default() -> Self {
        Submission::Idle
    }
}

impl<T> Submission<T> {
    /// Whether a submit would be accepted. A failed attempt may be retried as is.
    pub fn can_submit(&self) -> bool {
        matches!(self, Submission::Idle | Submission::Failed(_))
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Submission::Submitting)
    }

    /// Moves to `Submitting`. Returns `false`, and changes nothing, if not allowed.
    pub fn begin(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        *self = Submission::Submitting;
        true
    }

    pub fn succeed(&mut self, value: T) -> bool {
        if !self.is_submitting() {
            return false;
        }
        *self = Submission::Succeeded(value);
        true
    }

    pub fn fail(&mut self, message: impl Into<String>) -> bool {
        if !self.is_submitting() {
            return false;
        }
        *self = Submission::Failed(message.into());
        true
    }

    /// The user changed the input: a failed attempt goes back to `Idle`.
    pub fn edit(&mut self) {
        if matches!(self, Submission::Failed(_)) {
            *self = Submission::Idle;
        }
    }

    pub fn reset(&mut self) {
        *self = Submission::Idle;
    }

    pub fn succeeded(&self) -> Option<&T> {
        match self {
            Submission::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Submission::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn status(&self) -> SubmissionStatus {
        match self {
            Submission::Idle => SubmissionStatus::Idle,
            Submission::Submitting => SubmissionStatus::Submitting,
            Submission::Succeeded(_) => SubmissionStatus::Succeeded,
            Submission::Failed(_) => SubmissionStatus::Failed,
        }
    }
}

/// [`Submission`] without its payload, for views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStatus {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_begin_is_refused_while_submitting() {
        let mut submission = Submission::<()>::default();

        assert!(submission.begin());
        assert!(!submission.begin());
        assert!(submission.is_submitting());
    }

    #[test]
    fn test_succeeded_is_terminal() {
        let mut submission = Submission::default();
        submission.begin();
        assert!(submission.succeed(7));

        assert!(!submission.begin());
        submission.edit();
        assert_eq!(submission.succeeded(), Some(&7));

        submission.reset();
        assert!(submission.begin());
    }

    #[test]
    fn test_failed_returns_to_idle_on_edit() {
        let mut submission = Submission::<()>::default();
        submission.begin();
        submission.fail("Network down");
        assert_eq!(submission.error(), Some("Network down"));

        submission.edit();
        assert_eq!(submission, Submission::Idle);
    }

    #[test]
    fn test_failed_can_be_retried() {
        let mut submission = Submission::<()>::default();
        submission.begin();
        submission.fail("Timeout");

        assert!(submission.begin());
    }

    #[test]
    fn test_outcome_without_attempt_is_ignored() {
        let mut submission = Submission::<u32>::default();
        assert!(!submission.succeed(1));
        assert!(!submission.fail("late"));
        assert_eq!(submission.status(), SubmissionStatus::Idle);
    }
}
