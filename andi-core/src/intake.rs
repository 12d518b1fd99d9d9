//! Partner intake: search suggestions, drafts for the add-partner flow and
//! member directory imports.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::directory::PartnerDirectory;
use crate::types::{Partner, PartnerOrigin, Result, SocialLinks};

const DEFAULT_BUSINESS: &str = "Business";
const DEFAULT_SLOGAN: &str = "Partner Slogan";
const DEFAULT_CATEGORY: &str = "Other";

/// Directory entries whose email, name or business contains `query`, ignoring case.
///
/// A blank query yields no suggestions.
pub fn suggest_partners<'a>(directory: &'a PartnerDirectory, query: &str) -> Vec<&'a Partner> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    directory
        .all()
        .iter()
        .filter(|p| {
            p.email.to_lowercase().contains(&needle)
                || p.name.to_lowercase().contains(&needle)
                || p.business.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Guess a display name from an email address: `john.doe@x.com` becomes `John Doe`.
pub fn name_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    local
        .split(|c: char| c == '.' || c == '_')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn filled(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Form contents of the add-partner flow. Only `email` is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartnerDraft {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub business: Option<String>,
    #[serde(default)]
    pub slogan: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub social: SocialLinks,
}

impl PartnerDraft {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Default::default()
        }
    }

    /// Name to prefill when the user has not typed one.
    pub fn suggested_name(&self) -> String {
        filled(self.name.clone()).unwrap_or_else(|| name_from_email(&self.email))
    }

    /// Build an available, manually added partner, filling blanks with defaults.
    pub fn into_partner(self, id: impl Into<String>) -> Partner {
        let name = self.suggested_name();
        Partner {
            id: id.into(),
            name,
            business: filled(self.business).unwrap_or_else(|| DEFAULT_BUSINESS.to_string()),
            category: filled(self.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            slogan: Some(filled(self.slogan).unwrap_or_else(|| DEFAULT_SLOGAN.to_string())),
            phone: filled(self.phone),
            website: filled(self.website),
            social: self.social,
            image: self.image.unwrap_or_default(),
            email: self.email,
            available: Some(true),
            origin: PartnerOrigin::Manual,
        }
    }
}

/// Merge imported members into the directory.
///
/// Imported members come first and are marked available; manually added
/// partners already in the directory follow. Everything else is dropped. The
/// merge goes through `replace_all`, so an oversized result leaves the
/// directory untouched.
pub fn import_members(directory: &mut PartnerDirectory, members: Vec<Partner>) -> Result<()> {
    let imported = members.len();
    let mut merged: Vec<Partner> = members
        .into_iter()
        .map(|m| m.with_available(true).with_origin(PartnerOrigin::Imported))
        .collect();
    merged.extend(
        directory
            .all()
            .iter()
            .filter(|p| p.origin == PartnerOrigin::Manual)
            .cloned(),
    );

    let manual = merged.len() - imported;
    directory.replace_all(merged)?;
    info!(imported, manual, "Imported member directory");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EngineError;

    fn directory() -> PartnerDirectory {
        PartnerDirectory::with_partners(
            vec![
                Partner::new("1", "Sarah Chen", "Evergreen Financial Planning", "Financial Advisor")
                    .with_email("sarah@example.com")
                    .with_origin(PartnerOrigin::Seed),
                Partner::new("2", "Michael Rodriguez", "Elite Real Estate Group", "Real Estate Agent")
                    .with_email("michael@example.com")
                    .with_origin(PartnerOrigin::Seed),
                Partner::new("m1", "Pat Lee", "Lee Plumbing", "Plumber")
                    .with_email("pat@leeplumbing.com"),
            ],
            10,
        )
        .unwrap()
    }

    #[test]
    fn test_suggestions_match_any_field() {
        let dir = directory();
        let by_email: Vec<&str> = suggest_partners(&dir, "SARAH@").iter().map(|p| p.id.as_str()).collect();
        assert_eq!(by_email, vec!["1"]);

        let by_business: Vec<&str> = suggest_partners(&dir, "elite").iter().map(|p| p.id.as_str()).collect();
        assert_eq!(by_business, vec!["2"]);

        assert_eq!(suggest_partners(&dir, "example.com").len(), 2);
        assert!(suggest_partners(&dir, "   ").is_empty());
    }

    #[test]
    fn test_name_from_email() {
        assert_eq!(name_from_email("john.doe@example.com"), "John Doe");
        assert_eq!(name_from_email("mary_ann_smith@x.org"), "Mary Ann Smith");
        assert_eq!(name_from_email("solo"), "Solo");
        assert_eq!(name_from_email(""), "");
    }

    #[test]
    fn test_draft_defaults() {
        let partner = PartnerDraft::new("jane.roe@example.com").into_partner("p1");

        assert_eq!(partner.id, "p1");
        assert_eq!(partner.name, "Jane Roe");
        assert_eq!(partner.business, "Business");
        assert_eq!(partner.category, "Other");
        assert_eq!(partner.slogan.as_deref(), Some("Partner Slogan"));
        assert!(partner.phone.is_none());
        assert_eq!(partner.available, Some(true));
        assert_eq!(partner.origin, PartnerOrigin::Manual);
    }

    #[test]
    fn test_draft_keeps_typed_values() {
        let draft = PartnerDraft {
            name: Some("Jane R.".to_string()),
            business: Some("Roe Realty".to_string()),
            phone: Some(" ".to_string()),
            ..PartnerDraft::new("jane@example.com")
        };
        let partner = draft.into_partner("p2");
        assert_eq!(partner.name, "Jane R.");
        assert_eq!(partner.business, "Roe Realty");
        assert!(partner.phone.is_none());
    }

    #[test]
    fn test_import_puts_members_first_and_keeps_manual() {
        let mut dir = directory();
        let members = vec![
            Partner::new("b1", "Ana Ruiz", "Ruiz Insurance", "Insurance").with_available(false),
            Partner::new("b2", "Tom Park", "Park Roofing", "Roofer"),
        ];

        import_members(&mut dir, members).unwrap();

        let ids: Vec<&str> = dir.all().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b1", "b2", "m1"]);
        assert!(dir.all()[0].is_available());
        assert_eq!(dir.all()[1].origin, PartnerOrigin::Imported);
    }

    #[test]
    fn test_oversized_import_is_rejected() {
        let mut dir = directory();
        let members: Vec<Partner> = (0..10)
            .map(|i| Partner::new(format!("b{i}"), "Member", "Biz", "Cat"))
            .collect();

        assert_eq!(
            import_members(&mut dir, members),
            Err(EngineError::CapacityExceeded { max: 10 })
        );
        assert_eq!(dir.used_slots(), 3);
        assert_eq!(dir.all()[0].id, "1");
    }
}
