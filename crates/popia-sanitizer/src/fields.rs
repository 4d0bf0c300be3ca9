//! # Field Resolution
//!
//! Contact lists come from many tools and spell their headers differently.
//! A column is found by walking an ordered alias list and taking the first
//! alias that matches a header case-insensitively **and** carries a
//! non-empty value. An empty `Consent` cell therefore falls through to
//! `OptIn`.
//!
//! ## Sentinels
//!
//! A missing name or email is stored as `None`. The strings
//! [`UNKNOWN_NAME`] and [`NO_EMAIL`] exist only for display; they are never
//! stored in a [`Contact`] and never compared against real data.

use serde::{Deserialize, Serialize};

/// Display text for a contact without a name.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Display text for a contact without an email address.
pub const NO_EMAIL: &str = "No Email";

/// Consent flag columns, in lookup order.
pub const CONSENT_ALIASES: &[&str] = &["consent", "optin"];

/// Name columns, in lookup order.
pub const NAME_ALIASES: &[&str] = &["name"];

/// Email columns, in lookup order.
pub const EMAIL_ALIASES: &[&str] = &["email"];

/// Consent timestamp columns used by the strict policy.
pub const CONSENT_DATE_ALIASES: &[&str] = &["consent_date"];

/// Consent source columns used by the strict policy.
pub const SOURCE_ALIASES: &[&str] = &["source"];

/// One parsed CSV row: header/value pairs in column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    /// 1-based line in the source file, when known.
    pub line: Option<u64>,
    fields: Vec<(String, String)>,
}

impl ContactRecord {
    /// Build a record from header/value pairs.
    pub fn new<K, V>(line: Option<u64>, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            line,
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Whether every value in the row is empty.
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|(_, v)| v.trim().is_empty())
    }

    /// Value of the first header matching `key` case-insensitively, if non-empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .filter(|(header, _)| header.trim().eq_ignore_ascii_case(key))
            .map(|(_, value)| value.trim())
            .find(|value| !value.is_empty())
    }

    /// Value of the first alias, in alias order, that has a non-empty value.
    pub fn resolve(&self, aliases: &[&str]) -> Option<&str> {
        aliases.iter().find_map(|alias| self.get(alias))
    }

    /// The contact identity carried by this row.
    pub fn contact(&self, consent: Option<&str>) -> Contact {
        Contact {
            name: self.resolve(NAME_ALIASES).map(str::to_string),
            email: self.resolve(EMAIL_ALIASES).map(str::to_string),
            consent: consent.map(str::to_string),
        }
    }
}

/// A contact as shown in the flagged list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Name, if the row has one.
    pub name: Option<String>,
    /// Email address, if the row has one.
    pub email: Option<String>,
    /// The consent flag value evaluated under the standard policy. Always
    /// `None` under the strict policy, which checks date and source instead.
    pub consent: Option<String>,
}

impl Contact {
    /// Name, or [`UNKNOWN_NAME`].
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_NAME)
    }

    /// Email, or [`NO_EMAIL`].
    pub fn display_email(&self) -> &str {
        self.email.as_deref().unwrap_or(NO_EMAIL)
    }

    /// Whether the row identifies anyone at all.
    pub fn is_identifiable(&self) -> bool {
        self.name.is_some() || self.email.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> ContactRecord {
        ContactRecord::new(Some(2), pairs.iter().copied())
    }

    #[test]
    fn test_get_is_case_insensitive() {
        let r = record(&[("CONSENT", "Yes")]);
        assert_eq!(r.get("consent"), Some("Yes"));
        assert_eq!(r.get("Consent"), Some("Yes"));
    }

    #[test]
    fn test_get_skips_empty_values() {
        let r = record(&[("Consent", "  "), ("consent", "true")]);
        assert_eq!(r.get("consent"), Some("true"));
    }

    #[test]
    fn test_resolve_follows_alias_order() {
        let r = record(&[("OptIn", "no"), ("Consent", "yes")]);
        assert_eq!(r.resolve(CONSENT_ALIASES), Some("yes"));
    }

    #[test]
    fn test_resolve_falls_through_empty_alias() {
        let r = record(&[("Consent", ""), ("OptIn", "1")]);
        assert_eq!(r.resolve(CONSENT_ALIASES), Some("1"));
    }

    #[test]
    fn test_resolve_missing() {
        let r = record(&[("Name", "Alice")]);
        assert_eq!(r.resolve(CONSENT_ALIASES), None);
    }

    #[test]
    fn test_contact_sentinels_are_display_only() {
        let r = record(&[("Phone", "0821234567")]);
        let contact = r.contact(None);
        assert_eq!(contact.name, None);
        assert_eq!(contact.email, None);
        assert_eq!(contact.display_name(), UNKNOWN_NAME);
        assert_eq!(contact.display_email(), NO_EMAIL);
        assert!(!contact.is_identifiable());
    }

    #[test]
    fn test_literal_unknown_name_is_a_real_name() {
        let r = record(&[("name", "Unknown")]);
        let contact = r.contact(None);
        assert_eq!(contact.name.as_deref(), Some("Unknown"));
        assert!(contact.is_identifiable());
    }

    #[test]
    fn test_is_blank() {
        assert!(record(&[("Name", ""), ("Email", " ")]).is_blank());
        assert!(!record(&[("Name", "A"), ("Email", "")]).is_blank());
    }
}
