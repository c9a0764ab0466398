use super::FlowStore;
use crate::error::StoreError;
use crate::flow::Step;

/// Captures the store revision at the time an asynchronous request was issued.
///
/// A response is only applied if no mutation happened in between, so a slow
/// generation request can never overwrite edits made while it was in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    revision: u64,
}

impl Ticket {
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl FlowStore {
    pub fn ticket(&self) -> Ticket {
        Ticket {
            revision: self.revision,
        }
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.revision == self.revision
    }

    /// Replaces the steps with a generated list, unless the store changed since
    /// `ticket` was issued.
    pub fn apply_generated(&mut self, ticket: Ticket, steps: Vec<Step>) -> Result<(), StoreError> {
        if !self.is_current(ticket) {
            tracing::warn!(
                ticket = ticket.revision,
                current = self.revision,
                "Discarding stale generation response"
            );
            return Err(StoreError::Stale {
                ticket: ticket.revision,
                current: self.revision,
            });
        }
        self.set_steps(steps);
        Ok(())
    }
}
