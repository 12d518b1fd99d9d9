//! Read-only ledger of referrals received from partners.

use crate::types::ReceivedReferral;

/// Seeded, read-only list of received referrals.
#[derive(Debug, Clone, Default)]
pub struct ReceivedReferralLedger {
    referrals: Vec<ReceivedReferral>,
}

impl ReceivedReferralLedger {
    pub fn new(referrals: Vec<ReceivedReferral>) -> Self {
        Self { referrals }
    }

    pub fn get_by_id(&self, id: &str) -> Option<&ReceivedReferral> {
        self.referrals.iter().find(|r| r.id == id)
    }

    pub fn all(&self) -> &[ReceivedReferral] {
        &self.referrals
    }

    pub fn total_received(&self) -> usize {
        self.referrals.len()
    }

    /// Referrals attributed to one partner.
    pub fn for_partner<'a>(&'a self, partner_id: &'a str) -> impl Iterator<Item = &'a ReceivedReferral> + 'a {
        self.referrals.iter().filter(move |r| r.partner_id == partner_id)
    }
}
