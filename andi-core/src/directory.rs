//! Bounded directory of referral partners.

use tracing::{debug, info, warn};

use crate::types::{EngineError, Partner, Result, MAX_PARTNERS};

/// Holds at most `max_partners` partners in insertion order.
#[derive(Debug, Clone)]
pub struct PartnerDirectory {
    partners: Vec<Partner>,
    max_partners: usize,
}

impl PartnerDirectory {
    /// Create an empty directory with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(MAX_PARTNERS)
    }

    /// Create an empty directory holding at most `max_partners` entries.
    pub fn with_capacity(max_partners: usize) -> Self {
        Self {
            partners: Vec::new(),
            max_partners,
        }
    }

    /// Create a directory pre-filled with `partners`.
    ///
    /// Fails with [`EngineError::CapacityExceeded`] when the list is too long.
    pub fn with_partners(partners: Vec<Partner>, max_partners: usize) -> Result<Self> {
        let mut directory = Self::with_capacity(max_partners);
        directory.replace_all(partners)?;
        Ok(directory)
    }

    /// Append a partner.
    pub fn add(&mut self, partner: Partner) -> Result<()> {
        if self.partners.len() >= self.max_partners {
            warn!(
                partner_id = %partner.id,
                max = self.max_partners,
                "Partner directory full, add rejected"
            );
            return Err(EngineError::CapacityExceeded {
                max: self.max_partners,
            });
        }

        info!(partner_id = %partner.id, name = %partner.name, "Adding partner");
        self.partners.push(partner);
        Ok(())
    }

    /// Remove a partner by ID. Unknown IDs leave the directory untouched.
    pub fn remove(&mut self, id: &str) -> Result<Partner> {
        match self.partners.iter().position(|p| p.id == id) {
            Some(index) => {
                info!(partner_id = %id, "Removing partner");
                Ok(self.partners.remove(index))
            }
            None => {
                warn!(partner_id = %id, "Remove ignored, partner not found");
                Err(EngineError::PartnerNotFound(id.to_string()))
            }
        }
    }

    /// Replace the entry sharing `partner.id`. Unknown IDs leave the directory untouched.
    pub fn update(&mut self, partner: Partner) -> Result<()> {
        match self.partners.iter_mut().find(|p| p.id == partner.id) {
            Some(existing) => {
                debug!(partner_id = %partner.id, "Updating partner");
                *existing = partner;
                Ok(())
            }
            None => {
                warn!(partner_id = %partner.id, "Update ignored, partner not found");
                Err(EngineError::PartnerNotFound(partner.id))
            }
        }
    }

    /// Wholesale replace. Rejected without change when `partners` exceeds capacity.
    pub fn replace_all(&mut self, partners: Vec<Partner>) -> Result<()> {
        if partners.len() > self.max_partners {
            warn!(
                requested = partners.len(),
                max = self.max_partners,
                "Replace rejected, too many partners"
            );
            return Err(EngineError::CapacityExceeded {
                max: self.max_partners,
            });
        }

        info!(count = partners.len(), "Replacing partner directory");
        self.partners = partners;
        Ok(())
    }

    /// Remove every partner.
    pub fn clear(&mut self) {
        info!(count = self.partners.len(), "Clearing partner directory");
        self.partners.clear();
    }

    /// Get a partner by ID.
    pub fn get_by_id(&self, id: &str) -> Option<&Partner> {
        self.partners.iter().find(|p| p.id == id)
    }

    /// Resolve an optional reference, treating a dangling ID as no match.
    pub fn resolve(&self, id: Option<&str>) -> Option<&Partner> {
        id.and_then(|id| self.get_by_id(id))
    }

    /// All partners in insertion order.
    pub fn all(&self) -> &[Partner] {
        &self.partners
    }

    /// Partners eligible for matching, in insertion order.
    pub fn available_partners(&self) -> Vec<&Partner> {
        self.partners.iter().filter(|p| p.is_available()).collect()
    }

    pub fn used_slots(&self) -> usize {
        self.partners.len()
    }

    pub fn max_partners(&self) -> usize {
        self.max_partners
    }

    pub fn has_available_slots(&self) -> bool {
        self.used_slots() < self.max_partners
    }

    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }
}

impl Default for PartnerDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partner(id: &str) -> Partner {
        Partner::new(id, format!("Partner {id}"), "Business", "Category")
    }

    fn full_directory() -> PartnerDirectory {
        let mut directory = PartnerDirectory::new();
        for i in 0..MAX_PARTNERS {
            directory.add(partner(&i.to_string())).unwrap();
        }
        directory
    }

    #[test]
    fn test_add_first_partner() {
        let mut directory = PartnerDirectory::new();
        directory
            .add(
                Partner::new(
                    "1",
                    "Sarah Chen",
                    "Evergreen Financial Planning",
                    "Financial Advisor",
                )
                .with_image("https://images.example.com/sarah.jpg"),
            )
            .unwrap();

        assert_eq!(directory.used_slots(), 1);
        assert!(directory.has_available_slots());
        assert_eq!(directory.get_by_id("1").unwrap().name, "Sarah Chen");
    }

    #[test]
    fn test_slots_until_full() {
        let mut directory = PartnerDirectory::new();
        for i in 0..MAX_PARTNERS {
            assert!(directory.has_available_slots());
            directory.add(partner(&i.to_string())).unwrap();
        }
        assert!(!directory.has_available_slots());
    }

    #[test]
    fn test_add_beyond_capacity_is_rejected() {
        let mut directory = full_directory();
        let before = directory.all().to_vec();

        let err = directory.add(partner("11")).unwrap_err();

        assert_eq!(err, EngineError::CapacityExceeded { max: MAX_PARTNERS });
        assert_eq!(directory.used_slots(), MAX_PARTNERS);
        assert_eq!(directory.all(), before.as_slice());
    }

    #[test]
    fn test_replace_all_oversized_is_noop() {
        let mut directory = PartnerDirectory::new();
        directory.add(partner("keep")).unwrap();

        let oversized: Vec<Partner> = (0..=MAX_PARTNERS).map(|i| partner(&i.to_string())).collect();
        assert!(directory.replace_all(oversized).is_err());

        assert_eq!(directory.used_slots(), 1);
        assert!(directory.get_by_id("keep").is_some());
    }

    #[test]
    fn test_replace_all_at_capacity() {
        let mut directory = PartnerDirectory::new();
        let exact: Vec<Partner> = (0..MAX_PARTNERS).map(|i| partner(&i.to_string())).collect();
        directory.replace_all(exact).unwrap();
        assert_eq!(directory.used_slots(), MAX_PARTNERS);
    }

    #[test]
    fn test_remove_and_unknown_remove() {
        let mut directory = PartnerDirectory::new();
        directory.add(partner("1")).unwrap();
        directory.add(partner("2")).unwrap();

        assert_eq!(directory.remove("1").unwrap().id, "1");
        assert!(directory.remove("missing").unwrap_err().is_not_found());
        assert_eq!(directory.used_slots(), 1);
        assert_eq!(directory.all()[0].id, "2");
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut directory = PartnerDirectory::new();
        directory.add(partner("1")).unwrap();
        directory.add(partner("2")).unwrap();

        directory
            .update(partner("1").with_phone("(425) 555-0123"))
            .unwrap();
        assert_eq!(directory.all()[0].phone.as_deref(), Some("(425) 555-0123"));

        assert!(directory.update(partner("3")).is_err());
        assert_eq!(directory.used_slots(), 2);
    }

    #[test]
    fn test_available_partners_filter() {
        let mut directory = PartnerDirectory::new();
        directory.add(partner("unset")).unwrap();
        directory.add(partner("off").with_available(false)).unwrap();
        directory.add(partner("on").with_available(true)).unwrap();

        let ids: Vec<&str> = directory
            .available_partners()
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["unset", "on"]);
    }

    #[test]
    fn test_resolve_dangling_reference() {
        let mut directory = PartnerDirectory::new();
        directory.add(partner("1")).unwrap();
        directory.remove("1").unwrap();

        assert!(directory.resolve(Some("1")).is_none());
        assert!(directory.resolve(None).is_none());
    }

    #[test]
    fn test_custom_capacity() {
        let mut directory = PartnerDirectory::with_capacity(2);
        directory.add(partner("1")).unwrap();
        directory.add(partner("2")).unwrap();
        assert_eq!(
            directory.add(partner("3")),
            Err(EngineError::CapacityExceeded { max: 2 })
        );
    }
}
