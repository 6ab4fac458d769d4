//! Company profile — the singleton seller identity printed on invoices.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::RecordId;

fn default_footer() -> Option<String> {
    Some("Thank you for your business!".to_string())
}

/// Client-submitted profile fields.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCompanyProfile {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub gstin: Option<String>,
    #[serde(default)]
    pub bank_details: Option<String>,
    #[serde(default = "default_footer")]
    pub footer_text: Option<String>,
}

/// The stored company profile. At most one exists at any time; the store
/// enforces that structurally (single slot / single row), not by convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub gstin: Option<String>,
    #[serde(default)]
    pub bank_details: Option<String>,
    #[serde(default = "default_footer")]
    pub footer_text: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl CompanyProfile {
    /// Build a fresh profile from submitted fields.
    pub fn create(new: NewCompanyProfile, now: DateTime<Utc>) -> Self {
        Self {
            id: RecordId::new(),
            name: new.name,
            phone: new.phone,
            email: new.email,
            address: new.address,
            gstin: new.gstin,
            bank_details: new.bank_details,
            footer_text: new.footer_text,
            updated_at: now,
        }
    }

    /// Apply submitted fields onto the existing profile, keeping its id and
    /// refreshing `updated_at`.
    pub fn apply(&mut self, new: NewCompanyProfile, now: DateTime<Utc>) {
        self.name = new.name;
        self.phone = new.phone;
        self.email = new.email;
        self.address = new.address;
        self.gstin = new.gstin;
        self.bank_details = new.bank_details;
        self.footer_text = new.footer_text;
        self.updated_at = now;
    }

    /// The in-memory default returned (not persisted) when no profile exists,
    /// and persisted on first PDF render.
    pub fn placeholder(now: DateTime<Utc>) -> Self {
        Self {
            id: RecordId::new(),
            name: "Your Company Name".to_string(),
            phone: None,
            email: None,
            address: None,
            gstin: None,
            bank_details: None,
            footer_text: default_footer(),
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn footer_text_defaults_when_absent_from_payload() {
        let new: NewCompanyProfile = serde_json::from_str(r#"{"name": "Acme"}"#).unwrap();
        assert_eq!(new.footer_text.as_deref(), Some("Thank you for your business!"));
    }

    #[test]
    fn apply_keeps_id_and_refreshes_updated_at() {
        let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();
        let mut profile = CompanyProfile::placeholder(t0);
        let id = profile.id;

        let new: NewCompanyProfile =
            serde_json::from_str(r#"{"name": "Acme", "phone": "123"}"#).unwrap();
        profile.apply(new, t1);

        assert_eq!(profile.id, id);
        assert_eq!(profile.name, "Acme");
        assert_eq!(profile.phone.as_deref(), Some("123"));
        assert_eq!(profile.updated_at, t1);
    }

    #[test]
    fn placeholder_uses_the_default_company_name() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let p = CompanyProfile::placeholder(now);
        assert_eq!(p.name, "Your Company Name");
        assert_eq!(p.footer_text.as_deref(), Some("Thank you for your business!"));
    }
}
