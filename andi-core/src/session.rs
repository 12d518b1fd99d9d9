//! ReferralSession - owns every store and runs the referral workflow.
//!
//! The session replaces process-wide stores: each instance is isolated, so a
//! UI shell holds one and tests build as many as they need.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::directory::PartnerDirectory;
use crate::feed::{self, FeedFilter, ReceivedReferralView};
use crate::intake::{self, PartnerDraft};
use crate::ledger::OpportunityLedger;
use crate::matcher::{self, MatchReason, PartnerMatch};
use crate::profile::ProfileStore;
use crate::received::ReceivedReferralLedger;
use crate::seed;
use crate::stats::{StatsAggregator, StatsSummary};
use crate::time::relative_label;
use crate::types::{
    Comment, EngineError, Opportunity, Partner, Profile, ReceivedReferral, Result,
};

/// What the details screen shows for one opportunity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferralPreview {
    pub opportunity_id: String,
    /// Selected partner, `None` when no partner is available
    pub partner: Option<Partner>,
    /// Whether the selection came from the opportunity's pre-match
    pub pre_matched: bool,
    /// Generated recommendation for `partner`
    pub draft: Option<String>,
    /// Badge value. Display constant, not a computed score.
    pub match_badge_percent: u8,
    /// Opportunity already carries a local referral
    pub already_referred: bool,
}

/// A single user's referral state.
#[derive(Debug, Clone)]
pub struct ReferralSession {
    config: EngineConfig,
    directory: PartnerDirectory,
    ledger: OpportunityLedger,
    received: ReceivedReferralLedger,
    profile: ProfileStore,
    stats: StatsAggregator,
}

impl ReferralSession {
    /// Create a session with empty stores and the seed profile.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            directory: PartnerDirectory::with_capacity(config.max_partners),
            ledger: OpportunityLedger::new(),
            received: ReceivedReferralLedger::default(),
            profile: ProfileStore::new(seed::profile()),
            stats: StatsAggregator::new(config.local_author.clone()),
            config,
        })
    }

    /// Create a session loaded with the demo data set.
    pub fn seeded(config: EngineConfig, now: DateTime<Utc>) -> Result<Self> {
        let mut session = Self::new(config)?;
        session.directory.replace_all(seed::partners())?;
        session.ledger.set_all(seed::opportunities(now));
        session.received = ReceivedReferralLedger::new(seed::received_referrals());
        let already_given = session.stats.scan_referrals_given(&session.ledger);
        session.stats = session.stats.clone().with_given(already_given);

        info!(
            partners = session.directory.used_slots(),
            opportunities = session.ledger.len(),
            received = session.received.total_received(),
            "Seeded referral session"
        );
        Ok(session)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn directory(&self) -> &PartnerDirectory {
        &self.directory
    }

    pub fn directory_mut(&mut self) -> &mut PartnerDirectory {
        &mut self.directory
    }

    pub fn ledger(&self) -> &OpportunityLedger {
        &self.ledger
    }

    pub fn received(&self) -> &ReceivedReferralLedger {
        &self.received
    }

    pub fn profile(&self) -> &Profile {
        self.profile.profile()
    }

    pub fn profile_store_mut(&mut self) -> &mut ProfileStore {
        &mut self.profile
    }

    pub fn stats(&self) -> &StatsAggregator {
        &self.stats
    }

    // ---- Partners -------------------------------------------------------

    /// Add a partner built from the add-partner form. Returns the new partner's ID.
    pub fn add_partner_from_draft(&mut self, draft: PartnerDraft) -> Result<String> {
        if !self.directory.has_available_slots() {
            return Err(EngineError::CapacityExceeded {
                max: self.directory.max_partners(),
            });
        }
        let id = uuid::Uuid::new_v4().to_string();
        self.directory.add(draft.into_partner(id.clone()))?;
        Ok(id)
    }

    /// Merge a member directory import into the partner directory.
    pub fn import_members(&mut self, members: Vec<Partner>) -> Result<()> {
        intake::import_members(&mut self.directory, members)?;
        self.profile.connect_bni();
        Ok(())
    }

    pub fn suggest_partners(&self, query: &str) -> Vec<&Partner> {
        intake::suggest_partners(&self.directory, query)
    }

    // ---- Matching -------------------------------------------------------

    /// Choose the partner for an opportunity.
    ///
    /// `selected` wins when it resolves to an available partner; otherwise the
    /// best match is used, as when a chosen partner becomes unavailable.
    fn select<'a>(
        &'a self,
        opportunity: &Opportunity,
        selected: Option<&str>,
    ) -> Option<PartnerMatch<'a>> {
        if let Some(id) = selected {
            match self.directory.get_by_id(id).filter(|p| p.is_available()) {
                Some(partner) => {
                    let reason = if opportunity.matched_user_id.as_deref() == Some(id) {
                        MatchReason::PreMatched
                    } else {
                        MatchReason::Selected
                    };
                    return Some(PartnerMatch { partner, reason });
                }
                None => debug!(
                    opportunity_id = %opportunity.id,
                    partner_id = %id,
                    "Selected partner not selectable, using best match"
                ),
            }
        }
        matcher::match_partner(opportunity, &self.directory)
    }

    /// Build the details-screen preview for an opportunity.
    pub fn preview(&self, opportunity_id: &str, selected: Option<&str>) -> Result<ReferralPreview> {
        let opportunity = self
            .ledger
            .get_by_id(opportunity_id)
            .ok_or_else(|| EngineError::OpportunityNotFound(opportunity_id.to_string()))?;

        let chosen = self.select(opportunity, selected);
        Ok(ReferralPreview {
            opportunity_id: opportunity.id.clone(),
            pre_matched: chosen.map_or(false, |m| m.reason == MatchReason::PreMatched),
            draft: chosen.map(|m| matcher::generate_draft_message(opportunity, m.partner)),
            partner: chosen.map(|m| m.partner.clone()),
            match_badge_percent: self.config.match_badge_percent,
            already_referred: opportunity.has_local_referral(&self.config.local_author),
        })
    }

    /// Post a referral: the only `Open -> Referred` transition.
    ///
    /// `message` carries the user's edits; `None` posts the generated draft.
    /// Appends a local referral comment, bumps the given counter and keeps the
    /// message as the draft for the review screen.
    pub fn post_referral(
        &mut self,
        opportunity_id: &str,
        selected: Option<&str>,
        message: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Comment> {
        let opportunity = self
            .ledger
            .get_by_id(opportunity_id)
            .ok_or_else(|| EngineError::OpportunityNotFound(opportunity_id.to_string()))?;

        if opportunity.has_local_referral(&self.config.local_author) {
            warn!(opportunity_id = %opportunity_id, "Referral already posted");
            return Err(EngineError::AlreadyReferred(opportunity_id.to_string()));
        }

        let chosen = self
            .select(opportunity, selected)
            .ok_or_else(|| EngineError::NoAvailablePartner(opportunity_id.to_string()))?;
        let partner_id = chosen.partner.id.clone();
        let content = match message.filter(|m| !m.trim().is_empty()) {
            Some(edited) => edited,
            None => matcher::generate_draft_message(opportunity, chosen.partner),
        };

        let comment = Comment::referral(
            uuid::Uuid::new_v4().to_string(),
            self.config.local_author.clone(),
            content.clone(),
            relative_label(now, now),
        );

        self.ledger.add_comment(opportunity_id, comment.clone())?;
        self.stats.record_given();
        self.ledger.set_draft_message(Some(content));

        info!(
            opportunity_id = %opportunity_id,
            partner_id = %partner_id,
            comment_id = %comment.id,
            given = self.stats.referrals_given(),
            "Referral posted"
        );
        Ok(comment)
    }

    /// Append a comment to an opportunity's thread.
    ///
    /// A comment that gives the opportunity its first local referral counts
    /// toward referrals given, same as [`post_referral`](Self::post_referral).
    pub fn add_comment(&mut self, opportunity_id: &str, comment: Comment) -> Result<()> {
        let was_referred = self.has_referral(opportunity_id);
        self.ledger.add_comment(opportunity_id, comment)?;
        if !was_referred && self.has_referral(opportunity_id) {
            self.stats.record_given();
            debug!(opportunity_id = %opportunity_id, "Comment marked opportunity referred");
        }
        Ok(())
    }

    // ---- Stats and views ------------------------------------------------

    pub fn has_referral(&self, opportunity_id: &str) -> bool {
        self.stats.has_referral(&self.ledger, opportunity_id)
    }

    pub fn referrals_given(&self) -> usize {
        self.stats.referrals_given()
    }

    pub fn open_opportunities(&self) -> usize {
        self.stats.open_opportunities(&self.ledger)
    }

    pub fn referrals_received(&self) -> usize {
        self.stats.referrals_received(&self.received)
    }

    pub fn summary(&self) -> StatsSummary {
        self.stats.summary(&self.ledger, &self.received, &self.directory)
    }

    pub fn open_feed(&self, filter: &FeedFilter) -> Vec<&Opportunity> {
        feed::open_feed(&self.ledger, &self.config.local_author, filter)
    }

    /// Listed open opportunities, capped at the configured feed limit.
    pub fn dashboard_feed(&self) -> Vec<&Opportunity> {
        self.open_feed(&FeedFilter::dashboard(self.config.feed_limit))
    }

    pub fn given_referrals(&self) -> Vec<&Opportunity> {
        feed::given_feed(&self.ledger, &self.config.local_author)
    }

    pub fn next_opportunity(&self, opportunity_id: &str) -> Option<&Opportunity> {
        feed::next_opportunity(&self.ledger, opportunity_id)
    }

    pub fn received_views(&self) -> Vec<ReceivedReferralView<'_>> {
        feed::received_views(&self.received, &self.directory, &self.ledger)
    }

    pub fn unresolved_received(&self) -> Vec<&ReceivedReferral> {
        feed::unresolved_received(&self.received, &self.directory, &self.ledger)
    }
}
