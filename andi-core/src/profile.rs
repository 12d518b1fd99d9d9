//! The local user's profile.

use tracing::info;

use crate::types::{Profile, ProfileUpdate, SocialLinks};

/// Owns the local profile and applies partial updates.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    profile: Profile,
}

impl ProfileStore {
    pub fn new(profile: Profile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Overwrite every field set in `update`. Social links merge key by key.
    pub fn update_profile(&mut self, update: ProfileUpdate) {
        let profile = &mut self.profile;
        if let Some(name) = update.name {
            profile.name = name;
        }
        if let Some(email) = update.email {
            profile.email = email;
        }
        if let Some(phone) = update.phone {
            profile.phone = phone;
        }
        if let Some(avatar) = update.avatar {
            profile.avatar = avatar;
        }
        if let Some(business) = update.business {
            profile.business = business;
        }
        if let Some(website) = update.website {
            profile.website = Some(website);
        }
        if let Some(social) = update.social {
            profile.social.merge(&social);
        }
    }

    /// Link the member directory account. Blank fields get member defaults.
    pub fn connect_bni(&mut self) {
        info!("Connecting member directory account");
        let profile = &mut self.profile;
        if profile.name.trim().is_empty() {
            profile.name = "BNI Member".to_string();
        }
        if profile.phone.trim().is_empty() {
            profile.phone = "(425) 555-1234".to_string();
        }
        if profile.website.as_deref().map_or(true, |w| w.trim().is_empty()) {
            profile.website = Some("www.bnimember.com".to_string());
        }
        if profile.social.linkedin.as_deref().map_or(true, |l| l.trim().is_empty()) {
            profile.social.merge(&SocialLinks {
                linkedin: Some("linkedin.com/in/bnimember".to_string()),
                ..Default::default()
            });
        }
        profile.connections.bni = true;
    }

    pub fn connect_facebook(&mut self) {
        info!("Connecting Facebook account");
        self.profile.connections.facebook = true;
    }
}
