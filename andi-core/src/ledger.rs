//! Opportunity ledger: inbound posts and their comment threads.

use tracing::{debug, info, warn};

use crate::types::{Comment, EngineError, Opportunity, OpportunityPatch, Result};

/// Ordered store of opportunities plus the in-progress draft message.
#[derive(Debug, Clone, Default)]
pub struct OpportunityLedger {
    opportunities: Vec<Opportunity>,
    /// Recommendation text carried from the details screen to the review screen
    draft_message: Option<String>,
}

impl OpportunityLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_opportunities(opportunities: Vec<Opportunity>) -> Self {
        Self {
            opportunities,
            draft_message: None,
        }
    }

    /// Get an opportunity by ID.
    pub fn get_by_id(&self, id: &str) -> Option<&Opportunity> {
        self.opportunities.iter().find(|o| o.id == id)
    }

    /// All opportunities in ledger order.
    pub fn all(&self) -> &[Opportunity] {
        &self.opportunities
    }

    pub fn len(&self) -> usize {
        self.opportunities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opportunities.is_empty()
    }

    /// Replace every opportunity.
    pub fn set_all(&mut self, opportunities: Vec<Opportunity>) {
        info!(count = opportunities.len(), "Replacing opportunities");
        self.opportunities = opportunities;
    }

    /// Append an opportunity.
    pub fn add(&mut self, opportunity: Opportunity) {
        debug!(opportunity_id = %opportunity.id, source = %opportunity.source, "Adding opportunity");
        self.opportunities.push(opportunity);
    }

    /// Apply a partial update. Unknown IDs leave the ledger untouched.
    pub fn update(&mut self, id: &str, patch: OpportunityPatch) -> Result<()> {
        match self.opportunities.iter_mut().find(|o| o.id == id) {
            Some(opportunity) => {
                patch.apply(opportunity);
                debug!(opportunity_id = %id, "Opportunity updated");
                Ok(())
            }
            None => {
                warn!(opportunity_id = %id, "Update ignored, opportunity not found");
                Err(EngineError::OpportunityNotFound(id.to_string()))
            }
        }
    }

    /// Remove an opportunity. Unknown IDs leave the ledger untouched.
    pub fn remove(&mut self, id: &str) -> Result<Opportunity> {
        match self.opportunities.iter().position(|o| o.id == id) {
            Some(index) => {
                info!(opportunity_id = %id, "Removing opportunity");
                Ok(self.opportunities.remove(index))
            }
            None => {
                warn!(opportunity_id = %id, "Remove ignored, opportunity not found");
                Err(EngineError::OpportunityNotFound(id.to_string()))
            }
        }
    }

    /// Append a comment and bump the comment count by one.
    ///
    /// Unknown IDs leave the ledger untouched and report `OpportunityNotFound`.
    pub fn add_comment(&mut self, opportunity_id: &str, comment: Comment) -> Result<()> {
        let Some(opportunity) = self
            .opportunities
            .iter_mut()
            .find(|o| o.id == opportunity_id)
        else {
            warn!(
                opportunity_id = %opportunity_id,
                comment_id = %comment.id,
                "Comment dropped, opportunity not found"
            );
            return Err(EngineError::OpportunityNotFound(opportunity_id.to_string()));
        };

        debug!(
            opportunity_id = %opportunity_id,
            comment_id = %comment.id,
            is_referral = comment.is_referral,
            "Appending comment"
        );
        opportunity.comments_list.push(comment);
        opportunity.comments = opportunity.comments.saturating_add(1);
        Ok(())
    }

    /// Set or clear the draft message.
    pub fn set_draft_message(&mut self, message: Option<String>) {
        self.draft_message = message;
    }

    pub fn draft_message(&self) -> Option<&str> {
        self.draft_message.as_deref()
    }
}
