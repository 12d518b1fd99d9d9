//! Referral matching and recommendation drafting.
//!
//! Matching is deliberately unscored: a pre-matched partner wins when it is
//! available, otherwise the first available partner in directory order is used.

use tracing::debug;

use crate::directory::PartnerDirectory;
use crate::types::{Opportunity, Partner, SocialPlatform};

const CLOSING: &str = "They have an excellent track record and I'm confident they can help.";

/// Why a partner was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchReason {
    /// The opportunity's pre-matched partner is available
    PreMatched,
    /// First available partner in directory order
    Fallback,
    /// Chosen by the user in place of the pre-match
    Selected,
}

/// A selected partner.
#[derive(Debug, Clone, Copy)]
pub struct PartnerMatch<'a> {
    pub partner: &'a Partner,
    pub reason: MatchReason,
}

/// Select a partner and say why.
pub fn match_partner<'a>(
    opportunity: &Opportunity,
    directory: &'a PartnerDirectory,
) -> Option<PartnerMatch<'a>> {
    let available = directory.available_partners();
    let first = *available.first()?;

    if let Some(partner) = directory
        .resolve(opportunity.matched_user_id.as_deref())
        .filter(|p| p.is_available())
    {
        return Some(PartnerMatch {
            partner,
            reason: MatchReason::PreMatched,
        });
    }

    debug!(
        opportunity_id = %opportunity.id,
        matched_user_id = ?opportunity.matched_user_id,
        fallback_partner = %first.id,
        "Pre-matched partner unavailable, using fallback"
    );
    Some(PartnerMatch {
        partner: first,
        reason: MatchReason::Fallback,
    })
}

/// The partner to recommend for `opportunity`, if any partner is available.
pub fn find_best_matching_partner<'a>(
    opportunity: &Opportunity,
    directory: &'a PartnerDirectory,
) -> Option<&'a Partner> {
    match_partner(opportunity, directory).map(|m| m.partner)
}

/// Build the recommendation text for `partner`.
///
/// Optional segments that have nothing to say are dropped whole, so the
/// result never carries empty sentences.
pub fn generate_draft_message(opportunity: &Opportunity, partner: &Partner) -> String {
    debug!(
        opportunity_id = %opportunity.id,
        partner_id = %partner.id,
        "Generating draft message"
    );

    let mut segments = vec![format!(
        "I'd like to recommend an excellent {}, {} from {}.",
        partner.category.to_lowercase(),
        partner.name,
        partner.business
    )];

    if let Some(contact) = contact_clause(partner) {
        segments.push(contact);
    }
    if let Some(social) = social_clause(partner) {
        segments.push(social);
    }
    segments.push(CLOSING.to_string());

    segments.join(" ")
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn contact_clause(partner: &Partner) -> Option<String> {
    let phone = present(partner.phone.as_deref())?;
    let website = present(partner.website.as_deref())?;
    Some(format!(
        "You can reach them at {phone} or visit their website at {website}."
    ))
}

fn social_clause(partner: &Partner) -> Option<String> {
    SocialPlatform::PRIORITY.iter().find_map(|platform| {
        present(partner.social.get(*platform)).map(|url| match platform {
            SocialPlatform::Linkedin => format!("Connect with them on LinkedIn at {url}."),
            SocialPlatform::Facebook => format!("Find them on Facebook at {url}."),
            SocialPlatform::Instagram => {
                format!("Check out their work on Instagram at {url}.")
            }
        })
    })
}
