//! Referral Matching & Stats Engine for the Andi referral network
//!
//! This crate holds everything behind the app's screens that is more than
//! layout:
//!
//! - **Partner directory**: bounded list of partners with slot accounting
//! - **Opportunity ledger**: inbound posts, their comment threads, the draft message
//! - **Matcher**: picks a partner for an opportunity and drafts the recommendation
//! - **Stats**: given / received / open counters, recomputed on every query
//! - **Received referrals**: seeded, read-only history
//!
//! All state lives in a [`ReferralSession`]; there are no global stores.
//!
//! # Example
//!
//! ```ignore
//! use andi_core::{EngineConfig, ReferralSession};
//!
//! let mut session = ReferralSession::seeded(EngineConfig::default(), chrono::Utc::now())?;
//! session.import_members(andi_core::seed::partners())?;
//!
//! let preview = session.preview("1", None)?;
//! session.post_referral("1", None, preview.draft, chrono::Utc::now())?;
//! assert!(session.has_referral("1"));
//! ```

pub mod config;
pub mod directory;
pub mod feed;
pub mod intake;
pub mod ledger;
pub mod matcher;
pub mod profile;
pub mod received;
pub mod seed;
pub mod session;
pub mod stats;
pub mod time;
pub mod types;

// Re-export main types
pub use config::EngineConfig;
pub use directory::PartnerDirectory;
pub use feed::{FeedFilter, ReceivedReferralView};
pub use intake::PartnerDraft;
pub use ledger::OpportunityLedger;
pub use matcher::{find_best_matching_partner, generate_draft_message, MatchReason};
pub use profile::ProfileStore;
pub use received::ReceivedReferralLedger;
pub use session::{ReferralPreview, ReferralSession};
pub use stats::{StatsAggregator, StatsSummary};
pub use types::*;
