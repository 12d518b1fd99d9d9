//! Read-side views over the ledgers: dashboard feed, given referrals,
//! review navigation and the received-referral join.

use serde::Serialize;

use crate::directory::PartnerDirectory;
use crate::ledger::OpportunityLedger;
use crate::received::ReceivedReferralLedger;
use crate::types::{Comment, Opportunity, OpportunitySource, Partner, ReceivedReferral};

/// Which open opportunities to show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedFilter {
    /// Restrict to one network
    pub source: Option<OpportunitySource>,
    /// Skip opportunities with `listed == false`
    pub listed_only: bool,
    /// Keep at most this many, newest first
    pub limit: Option<usize>,
}

impl FeedFilter {
    /// Listed opportunities only, capped at `limit`.
    pub fn dashboard(limit: usize) -> Self {
        Self {
            source: None,
            listed_only: true,
            limit: Some(limit),
        }
    }

    pub fn with_source(mut self, source: OpportunitySource) -> Self {
        self.source = Some(source);
        self
    }

    fn accepts(&self, opportunity: &Opportunity) -> bool {
        if self.listed_only && !opportunity.listed {
            return false;
        }
        self.source.map_or(true, |s| s == opportunity.source)
    }
}

/// Opportunities without a local referral, newest first.
pub fn open_feed<'a>(
    ledger: &'a OpportunityLedger,
    local_author: &str,
    filter: &FeedFilter,
) -> Vec<&'a Opportunity> {
    let mut feed: Vec<&Opportunity> = ledger
        .all()
        .iter()
        .filter(|o| !o.has_local_referral(local_author))
        .filter(|o| filter.accepts(o))
        .collect();

    feed.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));

    if let Some(limit) = filter.limit {
        feed.truncate(limit);
    }
    feed
}

/// Opportunities carrying a local referral, in ledger order.
pub fn given_feed<'a>(ledger: &'a OpportunityLedger, local_author: &str) -> Vec<&'a Opportunity> {
    ledger
        .all()
        .iter()
        .filter(|o| o.has_local_referral(local_author))
        .collect()
}

/// The opportunity after `id` in ledger order. Unknown IDs and the last entry yield `None`.
pub fn next_opportunity<'a>(ledger: &'a OpportunityLedger, id: &str) -> Option<&'a Opportunity> {
    let all = ledger.all();
    let index = all.iter().position(|o| o.id == id)?;
    all.get(index + 1)
}

/// A received referral joined with the records it points at.
#[derive(Debug, Clone, Serialize)]
pub struct ReceivedReferralView<'a> {
    pub referral: &'a ReceivedReferral,
    pub partner: &'a Partner,
    pub opportunity: &'a Opportunity,
    /// The thread entry named by `post_id`, when it still exists
    pub referral_comment: Option<&'a Comment>,
}

/// Join every received referral with its partner and opportunity.
///
/// Entries whose partner or opportunity no longer resolves are skipped.
pub fn received_views<'a>(
    received: &'a ReceivedReferralLedger,
    directory: &'a PartnerDirectory,
    ledger: &'a OpportunityLedger,
) -> Vec<ReceivedReferralView<'a>> {
    received
        .all()
        .iter()
        .filter_map(|referral| {
            let partner = directory.get_by_id(&referral.partner_id)?;
            let opportunity = ledger.get_by_id(referral.opportunity_id.as_deref()?)?;
            let referral_comment = referral
                .post_id
                .as_deref()
                .and_then(|post_id| opportunity.comments_list.iter().find(|c| c.id == post_id));
            Some(ReceivedReferralView {
                referral,
                partner,
                opportunity,
                referral_comment,
            })
        })
        .collect()
}

/// Received referrals whose partner or opportunity no longer resolves.
///
/// These still count toward the received total; they just have nothing to
/// join against.
pub fn unresolved_received<'a>(
    received: &'a ReceivedReferralLedger,
    directory: &PartnerDirectory,
    ledger: &OpportunityLedger,
) -> Vec<&'a ReceivedReferral> {
    received
        .all()
        .iter()
        .filter(|referral| {
            directory.get_by_id(&referral.partner_id).is_none()
                || referral
                    .opportunity_id
                    .as_deref()
                    .and_then(|id| ledger.get_by_id(id))
                    .is_none()
        })
        .collect()
}
