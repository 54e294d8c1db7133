use crate::selection::ValidationError;
use thiserror::Error;

/// Identifies one outgoing request so its reply can be matched.
pub type Ticket = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitBlocked {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("A request is already in flight")]
    InFlight,
}

/// The submit button: its label and the one request it may have outstanding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    idle_label: &'static str,
    busy_label: &'static str,
    in_flight: Option<Ticket>,
}

impl SubmitControl {
    pub const fn new(idle_label: &'static str, busy_label: &'static str) -> Self {
        Self {
            idle_label,
            busy_label,
            in_flight: None,
        }
    }

    pub const fn label(&self) -> &'static str {
        if self.in_flight.is_some() {
            self.busy_label
        } else {
            self.idle_label
        }
    }

    pub const fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn begin(&mut self, ticket: Ticket) -> Result<(), SubmitBlocked> {
        if self.in_flight.is_some() {
            return Err(SubmitBlocked::InFlight);
        }
        self.in_flight = Some(ticket);
        Ok(())
    }

    /// Restores the idle label if `ticket` is the outstanding request.
    ///
    /// Returns `false` for replies that no longer belong to this control.
    pub fn finish(&mut self, ticket: Ticket) -> bool {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_follows_the_request() {
        let mut control = SubmitControl::new("Generate Prediction", "Predicting...");
        assert_eq!(control.label(), "Generate Prediction");

        assert_eq!(control.begin(1), Ok(()));
        assert_eq!(control.label(), "Predicting...");
        assert_eq!(control.begin(2), Err(SubmitBlocked::InFlight));

        assert!(!control.finish(2));
        assert!(control.is_busy());
        assert!(control.finish(1));
        assert_eq!(control.label(), "Generate Prediction");
    }
}
