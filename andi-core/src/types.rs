//! Core types for the referral engine.
//!
//! These types model partners, opportunities and the referrals flowing between
//! them.
//!
//! With the `typescript` feature enabled, these types can be exported to TypeScript
//! using ts-rs for consistency with the mobile frontend.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Maximum number of partners a directory may hold.
pub const MAX_PARTNERS: usize = 10;

/// Author name that marks a comment as written by the local user.
pub const LOCAL_AUTHOR: &str = "You";

/// Percentage shown on the "Best Match" badge. Display constant, not a score.
pub const MATCH_BADGE_PERCENT: u8 = 95;

/// Social platforms a partner or profile can link to.
///
/// Declaration order is the priority used when picking a single link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum SocialPlatform {
    Linkedin,
    Facebook,
    Instagram,
}

impl SocialPlatform {
    /// Platforms in the order they are preferred for recommendations.
    pub const PRIORITY: [SocialPlatform; 3] = [Self::Linkedin, Self::Facebook, Self::Instagram];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linkedin => "linkedin",
            Self::Facebook => "facebook",
            Self::Instagram => "instagram",
        }
    }
}

/// Social profile links. A `None` entry means "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

impl SocialLinks {
    /// Link for a single platform, if provided.
    pub fn get(&self, platform: SocialPlatform) -> Option<&str> {
        match platform {
            SocialPlatform::Linkedin => self.linkedin.as_deref(),
            SocialPlatform::Facebook => self.facebook.as_deref(),
            SocialPlatform::Instagram => self.instagram.as_deref(),
        }
    }

    /// First provided link in [`SocialPlatform::PRIORITY`] order.
    pub fn preferred(&self) -> Option<(SocialPlatform, &str)> {
        SocialPlatform::PRIORITY
            .iter()
            .find_map(|p| self.get(*p).map(|url| (*p, url)))
    }

    /// Overlay every link present in `other` onto `self`.
    pub fn merge(&mut self, other: &SocialLinks) {
        if let Some(url) = &other.linkedin {
            self.linkedin = Some(url.clone());
        }
        if let Some(url) = &other.facebook {
            self.facebook = Some(url.clone());
        }
        if let Some(url) = &other.instagram {
            self.instagram = Some(url.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.linkedin.is_none() && self.facebook.is_none() && self.instagram.is_none()
    }
}

/// Where a directory entry came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum PartnerOrigin {
    /// Shipped with the demo data set
    Seed,
    /// Pulled in by a member directory import
    Imported,
    /// Added by hand through the add-partner flow
    #[default]
    Manual,
}

/// A business or professional that can be recommended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Partner {
    /// Stable identifier
    pub id: String,
    #[serde(default)]
    pub email: String,
    pub name: String,
    pub business: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slogan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default)]
    pub social: SocialLinks,
    /// Avatar URL
    #[serde(default)]
    pub image: String,
    /// Eligibility for matching. Unset counts as available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(default)]
    pub origin: PartnerOrigin,
}

impl Partner {
    /// Create a partner with the required fields set.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        business: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            email: String::new(),
            name: name.into(),
            business: business.into(),
            category: category.into(),
            slogan: None,
            phone: None,
            website: None,
            social: SocialLinks::default(),
            image: String::new(),
            available: None,
            origin: PartnerOrigin::default(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_slogan(mut self, slogan: impl Into<String>) -> Self {
        self.slogan = Some(slogan.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    pub fn with_social(mut self, social: SocialLinks) -> Self {
        self.social = social;
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_available(mut self, available: bool) -> Self {
        self.available = Some(available);
        self
    }

    pub fn with_origin(mut self, origin: PartnerOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Whether the partner may be matched. Only an explicit `false` excludes it.
    pub fn is_available(&self) -> bool {
        self.available != Some(false)
    }

    /// Name, business and category are all non-empty.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.business.trim().is_empty()
            && !self.category.trim().is_empty()
    }
}

/// Network an opportunity was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum OpportunitySource {
    Facebook,
    Instagram,
    Linkedin,
    Nextdoor,
    Alignable,
}

impl OpportunitySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Facebook => "facebook",
            Self::Instagram => "instagram",
            Self::Linkedin => "linkedin",
            Self::Nextdoor => "nextdoor",
            Self::Alignable => "alignable",
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            Self::Facebook,
            Self::Instagram,
            Self::Linkedin,
            Self::Nextdoor,
            Self::Alignable,
        ]
    }
}

impl std::str::FromStr for OpportunitySource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|source| source.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown opportunity source: {s}"))
    }
}

impl std::fmt::Display for OpportunitySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A comment in an opportunity's thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub content: String,
    /// Display string, e.g. "1h ago" or "Just now"
    pub timestamp: String,
    /// Marks a posted recommendation rather than ordinary commentary
    #[serde(default)]
    pub is_referral: bool,
}

impl Comment {
    /// Ordinary comment.
    pub fn new(
        id: impl Into<String>,
        author: impl Into<String>,
        content: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            content: content.into(),
            timestamp: timestamp.into(),
            is_referral: false,
        }
    }

    /// Recommendation comment written by `author`.
    pub fn referral(
        id: impl Into<String>,
        author: impl Into<String>,
        content: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            is_referral: true,
            ..Self::new(id, author, content, timestamp)
        }
    }

    /// A referral written by the local user.
    pub fn is_local_referral(&self, local_author: &str) -> bool {
        self.is_referral && self.author == local_author
    }
}

/// An inbound post soliciting a recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Opportunity {
    pub id: String,
    pub source: OpportunitySource,
    pub content: String,
    #[serde(default)]
    pub likes: u32,
    /// Comment count shown on the card. Incremented once per appended comment.
    #[serde(default)]
    pub comments: u32,
    #[serde(default)]
    pub shares: u32,
    /// When the post was published
    pub posted_at: DateTime<Utc>,
    /// Pre-matched partner, may dangle if that partner was removed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_user_id: Option<String>,
    /// Whether the dashboard feed shows this opportunity
    #[serde(default = "default_listed")]
    pub listed: bool,
    #[serde(default)]
    pub comments_list: Vec<Comment>,
}

fn default_listed() -> bool {
    true
}

impl Opportunity {
    /// Create an opportunity with no engagement and an empty thread.
    pub fn new(
        id: impl Into<String>,
        source: OpportunitySource,
        content: impl Into<String>,
        posted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            source,
            content: content.into(),
            likes: 0,
            comments: 0,
            shares: 0,
            posted_at,
            matched_user_id: None,
            listed: true,
            comments_list: Vec::new(),
        }
    }

    pub fn with_matched_partner(mut self, partner_id: impl Into<String>) -> Self {
        self.matched_user_id = Some(partner_id.into());
        self
    }

    pub fn with_engagement(mut self, likes: u32, comments: u32, shares: u32) -> Self {
        self.likes = likes;
        self.comments = comments;
        self.shares = shares;
        self
    }

    pub fn with_comments(mut self, comments: Vec<Comment>) -> Self {
        self.comments_list = comments;
        self
    }

    /// Whether the thread holds a referral written by `local_author`.
    pub fn has_local_referral(&self, local_author: &str) -> bool {
        self.comments_list
            .iter()
            .any(|c| c.is_local_referral(local_author))
    }

    /// The first referral written by `local_author`, if any.
    pub fn local_referral(&self, local_author: &str) -> Option<&Comment> {
        self.comments_list
            .iter()
            .find(|c| c.is_local_referral(local_author))
    }
}

/// Partial update for an [`Opportunity`]. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct OpportunityPatch {
    #[serde(default)]
    pub source: Option<OpportunitySource>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub likes: Option<u32>,
    #[serde(default)]
    pub comments: Option<u32>,
    #[serde(default)]
    pub shares: Option<u32>,
    #[serde(default)]
    pub posted_at: Option<DateTime<Utc>>,
    /// `Some(None)` clears the match
    #[serde(default)]
    pub matched_user_id: Option<Option<String>>,
    #[serde(default)]
    pub listed: Option<bool>,
    #[serde(default)]
    pub comments_list: Option<Vec<Comment>>,
}

impl OpportunityPatch {
    pub fn apply(self, opportunity: &mut Opportunity) {
        if let Some(source) = self.source {
            opportunity.source = source;
        }
        if let Some(content) = self.content {
            opportunity.content = content;
        }
        if let Some(likes) = self.likes {
            opportunity.likes = likes;
        }
        if let Some(comments) = self.comments {
            opportunity.comments = comments;
        }
        if let Some(shares) = self.shares {
            opportunity.shares = shares;
        }
        if let Some(posted_at) = self.posted_at {
            opportunity.posted_at = posted_at;
        }
        if let Some(matched) = self.matched_user_id {
            opportunity.matched_user_id = matched;
        }
        if let Some(listed) = self.listed {
            opportunity.listed = listed;
        }
        if let Some(comments_list) = self.comments_list {
            opportunity.comments_list = comments_list;
        }
    }
}

/// Follow-up state of a received referral.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum ReferralStatus {
    #[default]
    New,
    Contacted,
    Converted,
    Closed,
}

impl ReferralStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Converted => "converted",
            Self::Closed => "closed",
        }
    }
}

/// Contact details of the customer behind a received referral.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct CustomerContact {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A historical inbound referral attributed to a partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ReceivedReferral {
    pub id: String,
    /// May dangle if the partner was removed
    pub partner_id: String,
    pub date: NaiveDate,
    /// Opportunity the referral was given on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opportunity_id: Option<String>,
    /// Post (comment thread entry) carrying the referral
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    #[serde(default)]
    pub status: ReferralStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerContact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ReceivedReferral {
    /// Referral correlated to an opportunity and post.
    pub fn correlated(
        id: impl Into<String>,
        partner_id: impl Into<String>,
        date: NaiveDate,
        opportunity_id: impl Into<String>,
        post_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            partner_id: partner_id.into(),
            date,
            opportunity_id: Some(opportunity_id.into()),
            post_id: Some(post_id.into()),
            status: ReferralStatus::New,
            customer: None,
            notes: None,
        }
    }
}

/// Accounts the local user has linked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Connections {
    #[serde(default)]
    pub bni: bool,
    #[serde(default)]
    pub facebook: bool,
}

/// The local user's own profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Profile {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub avatar: String,
    pub business: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default)]
    pub social: SocialLinks,
    #[serde(default)]
    pub connections: Connections,
}

/// Partial update for a [`Profile`]. Social links merge key by key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ProfileUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub business: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub social: Option<SocialLinks>,
}

/// Error types for the referral engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Directory is full
    #[error("Partner capacity exceeded: at most {max} partners allowed")]
    CapacityExceeded { max: usize },

    /// Partner lookup failed
    #[error("Partner not found: {0}")]
    PartnerNotFound(String),

    /// Opportunity lookup failed
    #[error("Opportunity not found: {0}")]
    OpportunityNotFound(String),

    /// Opportunity already carries a local referral
    #[error("Opportunity already referred: {0}")]
    AlreadyReferred(String),

    /// Nothing to recommend
    #[error("No available partner for opportunity: {0}")]
    NoAvailablePartner(String),

    /// Configuration rejected
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl EngineError {
    /// Lookup failures that callers are expected to tolerate.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PartnerNotFound(_) | Self::OpportunityNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
