//! Sequencing for filter submissions.
//!
//! Every submission takes a ticket; only the response belonging to the most
//! recently issued ticket may reach the results view.

use api::{AnalysisResult, FilterSelection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmissionTracker {
    issued: u64,
}

impl SubmissionTracker {
    pub fn begin(&mut self) -> Ticket {
        self.issued = self.issued.wrapping_add(1);
        Ticket(self.issued)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued
    }
}

/// A relayed result together with the filters that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedAnalysis {
    pub filters: FilterSelection,
    pub result: AnalysisResult,
}
