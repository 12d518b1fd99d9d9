//! Configuration for the referral engine.

use serde::{Deserialize, Serialize};

use crate::types::{EngineError, Result, LOCAL_AUTHOR, MATCH_BADGE_PERCENT, MAX_PARTNERS};

/// Configuration for a [`ReferralSession`](crate::session::ReferralSession).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Directory capacity, at most [`MAX_PARTNERS`]
    #[serde(default = "default_max_partners")]
    pub max_partners: usize,
    /// Author name that marks locally written comments
    #[serde(default = "default_local_author")]
    pub local_author: String,
    /// Opportunities shown on the dashboard feed
    #[serde(default = "default_feed_limit")]
    pub feed_limit: usize,
    /// Simulated delay before a referral is posted (ms)
    #[serde(default = "default_posting_delay_ms")]
    pub posting_delay_ms: u64,
    /// Value shown on the "Best Match" badge
    #[serde(default = "default_match_badge_percent")]
    pub match_badge_percent: u8,
}

fn default_max_partners() -> usize {
    MAX_PARTNERS
}

fn default_local_author() -> String {
    LOCAL_AUTHOR.to_string()
}

fn default_feed_limit() -> usize {
    3
}

fn default_posting_delay_ms() -> u64 {
    1000
}

fn default_match_badge_percent() -> u8 {
    MATCH_BADGE_PERCENT
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_partners: default_max_partners(),
            local_author: default_local_author(),
            feed_limit: default_feed_limit(),
            posting_delay_ms: default_posting_delay_ms(),
            match_badge_percent: default_match_badge_percent(),
        }
    }
}

impl EngineConfig {
    /// Load config from YAML.
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> std::result::Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_partners == 0 {
            return Err(EngineError::ConfigError(
                "max_partners must be at least 1".to_string(),
            ));
        }
        if self.max_partners > MAX_PARTNERS {
            return Err(EngineError::ConfigError(format!(
                "max_partners must be at most {}, got {}",
                MAX_PARTNERS, self.max_partners
            )));
        }
        if self.local_author.trim().is_empty() {
            return Err(EngineError::ConfigError(
                "local_author must not be empty".to_string(),
            ));
        }
        if self.match_badge_percent > 100 {
            return Err(EngineError::ConfigError(format!(
                "match_badge_percent must be 0-100, got {}",
                self.match_badge_percent
            )));
        }
        Ok(())
    }
}
