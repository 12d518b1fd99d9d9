//! Referral statistics.
//!
//! Every query re-scans the ledgers; nothing is cached. The only stored value
//! is the given-referral counter, which the session bumps once per posted
//! referral. [`StatsAggregator::scan_referrals_given`] recomputes the same
//! number from the comment threads so the two can be cross-checked.

use serde::Serialize;

use crate::directory::PartnerDirectory;
use crate::ledger::OpportunityLedger;
use crate::received::ReceivedReferralLedger;

/// Dashboard counters at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsSummary {
    pub referrals_given: usize,
    pub referrals_received: usize,
    pub open_opportunities: usize,
    pub used_slots: usize,
    pub max_partners: usize,
}

/// Derives referral counters from the ledgers.
#[derive(Debug, Clone)]
pub struct StatsAggregator {
    local_author: String,
    given: usize,
}

impl StatsAggregator {
    pub fn new(local_author: impl Into<String>) -> Self {
        Self {
            local_author: local_author.into(),
            given: 0,
        }
    }

    /// Start the counter at `given`, e.g. to account for referrals already in seed data.
    pub fn with_given(mut self, given: usize) -> Self {
        self.given = given;
        self
    }

    pub fn local_author(&self) -> &str {
        &self.local_author
    }

    /// Count one posted referral.
    pub fn record_given(&mut self) {
        self.given += 1;
    }

    /// Referrals posted through the session.
    pub fn referrals_given(&self) -> usize {
        self.given
    }

    /// Opportunities carrying a local referral, counted from the threads.
    pub fn scan_referrals_given(&self, ledger: &OpportunityLedger) -> usize {
        ledger
            .all()
            .iter()
            .filter(|o| o.has_local_referral(&self.local_author))
            .count()
    }

    /// Whether the opportunity carries a local referral. Unknown IDs are not referred.
    pub fn has_referral(&self, ledger: &OpportunityLedger, opportunity_id: &str) -> bool {
        ledger
            .get_by_id(opportunity_id)
            .map(|o| o.has_local_referral(&self.local_author))
            .unwrap_or(false)
    }

    /// Opportunities still waiting for a local referral.
    pub fn open_opportunities(&self, ledger: &OpportunityLedger) -> usize {
        ledger.len() - self.scan_referrals_given(ledger)
    }

    pub fn referrals_received(&self, received: &ReceivedReferralLedger) -> usize {
        received.total_received()
    }

    pub fn summary(
        &self,
        ledger: &OpportunityLedger,
        received: &ReceivedReferralLedger,
        directory: &PartnerDirectory,
    ) -> StatsSummary {
        StatsSummary {
            referrals_given: self.referrals_given(),
            referrals_received: self.referrals_received(received),
            open_opportunities: self.open_opportunities(ledger),
            used_slots: directory.used_slots(),
            max_partners: directory.max_partners(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Comment, Opportunity, OpportunitySource, LOCAL_AUTHOR};
    use chrono::Utc;

    fn ledger() -> OpportunityLedger {
        let now = Utc::now();
        OpportunityLedger::with_opportunities(vec![
            Opportunity::new("1", OpportunitySource::Facebook, "advisor?", now),
            Opportunity::new("2", OpportunitySource::Linkedin, "attorney?", now),
            Opportunity::new("3", OpportunitySource::Facebook, "contractor?", now),
        ])
    }

    #[test]
    fn test_fresh_ledger_is_all_open() {
        let stats = StatsAggregator::new(LOCAL_AUTHOR);
        let ledger = ledger();
        assert_eq!(stats.open_opportunities(&ledger), 3);
        assert_eq!(stats.scan_referrals_given(&ledger), 0);
        assert!(!stats.has_referral(&ledger, "1"));
    }

    #[test]
    fn test_non_referral_comment_does_not_count() {
        let stats = StatsAggregator::new(LOCAL_AUTHOR);
        let mut ledger = ledger();
        ledger
            .add_comment("1", Comment::new("c1", LOCAL_AUTHOR, "Following!", "now"))
            .unwrap();
        ledger
            .add_comment("1", Comment::referral("c2", "Jane Doe", "Try Bob", "now"))
            .unwrap();

        assert!(!stats.has_referral(&ledger, "1"));
        assert_eq!(stats.open_opportunities(&ledger), 3);
    }

    #[test]
    fn test_local_referral_closes_opportunity() {
        let mut stats = StatsAggregator::new(LOCAL_AUTHOR);
        let mut ledger = ledger();
        ledger
            .add_comment("1", Comment::referral("c1", LOCAL_AUTHOR, "Try Sarah", "now"))
            .unwrap();
        stats.record_given();

        assert!(stats.has_referral(&ledger, "1"));
        assert_eq!(stats.open_opportunities(&ledger), 2);
        assert_eq!(stats.referrals_given(), stats.scan_referrals_given(&ledger));
    }

    #[test]
    fn test_unknown_opportunity_has_no_referral() {
        let stats = StatsAggregator::new(LOCAL_AUTHOR);
        assert!(!stats.has_referral(&ledger(), "missing"));
    }

    #[test]
    fn test_custom_local_author() {
        let stats = StatsAggregator::new("Andi");
        let mut ledger = ledger();
        ledger
            .add_comment("2", Comment::referral("c1", LOCAL_AUTHOR, "Try David", "now"))
            .unwrap();
        assert!(!stats.has_referral(&ledger, "2"));

        ledger
            .add_comment("2", Comment::referral("c2", "Andi", "Try David", "now"))
            .unwrap();
        assert!(stats.has_referral(&ledger, "2"));
    }

    #[test]
    fn test_summary() {
        let stats = StatsAggregator::new(LOCAL_AUTHOR).with_given(2);
        let received = ReceivedReferralLedger::default();
        let directory = PartnerDirectory::new();

        let summary = stats.summary(&ledger(), &received, &directory);
        assert_eq!(
            summary,
            StatsSummary {
                referrals_given: 2,
                referrals_received: 0,
                open_opportunities: 3,
                used_slots: 0,
                max_partners: 10,
            }
        );
    }
}
