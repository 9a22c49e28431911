// --- File: crates/salon_meevo/src/catalog.rs ---
//! Service catalog and name-to-identifier resolution.
//!
//! Callers may name a service by any of its aliases (case-insensitive,
//! surrounding whitespace ignored) or pass the upstream identifier directly.

use salon_common::{config_error, SalonError};
use salon_config::{AppConfig, CatalogEntryConfig, ServiceCategory};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;
use uuid::Uuid;

/// Inputs longer than this that contain a dash are treated as canonical ids.
const CANONICAL_MIN_LEN: usize = 30;
const CANONICAL_SEPARATOR: char = '-';

/// Resolves a caller-supplied service reference to an upstream service id.
pub trait ServiceResolver: Send + Sync {
    /// Returns the canonical id, or `None` when the input cannot be resolved.
    fn resolve(&self, raw: &str) -> Option<String>;
}

/// How an input is recognised as an already-canonical identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentifierCheck {
    /// Contains a dash and is longer than 30 characters. Returned unchanged.
    ///
    /// A long alias containing a dash is misread as an id; switch to
    /// `StrictUuid` if the catalog has such aliases.
    #[default]
    Heuristic,
    /// Must parse as a UUID. Returned trimmed.
    StrictUuid,
}

impl IdentifierCheck {
    pub fn from_strict_flag(strict: bool) -> Self {
        if strict {
            IdentifierCheck::StrictUuid
        } else {
            IdentifierCheck::Heuristic
        }
    }

    /// Returns the pass-through identifier if `raw` already looks canonical.
    pub fn canonical(&self, raw: &str) -> Option<String> {
        match self {
            IdentifierCheck::Heuristic => {
                (raw.contains(CANONICAL_SEPARATOR) && raw.chars().count() > CANONICAL_MIN_LEN)
                    .then(|| raw.to_string())
            }
            IdentifierCheck::StrictUuid => {
                let trimmed = raw.trim();
                Uuid::parse_str(trimmed).ok().map(|_| trimmed.to_string())
            }
        }
    }
}

/// One bookable service.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub key: String,
    pub service_id: String,
    pub category: ServiceCategory,
    pub aliases: Vec<String>,
    pub price: Option<String>,
    pub note: Option<String>,
}

impl From<CatalogEntryConfig> for CatalogEntry {
    fn from(cfg: CatalogEntryConfig) -> Self {
        Self {
            key: cfg.key,
            service_id: cfg.service_id,
            category: cfg.category,
            aliases: cfg.aliases,
            price: cfg.price,
            note: cfg.note,
        }
    }
}

/// Immutable alias table built once at startup.
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    entries: Vec<CatalogEntry>,
    aliases: HashMap<String, String>,
    check: IdentifierCheck,
}

/// Trim and lowercase, the form every alias is stored under.
pub fn normalize_alias(raw: &str) -> String {
    raw.trim().to_lowercase()
}

impl ServiceCatalog {
    /// Builds the catalog, rejecting aliases that normalize to the same key
    /// but point at different service ids.
    pub fn new(entries: Vec<CatalogEntry>, check: IdentifierCheck) -> Result<Self, SalonError> {
        let mut aliases: HashMap<String, String> = HashMap::new();

        for entry in &entries {
            if entry.service_id.trim().is_empty() {
                return Err(config_error(format!(
                    "catalog entry '{}' has an empty service_id",
                    entry.key
                )));
            }
            for alias in std::iter::once(&entry.key).chain(entry.aliases.iter()) {
                let normalized = normalize_alias(alias);
                if normalized.is_empty() {
                    return Err(config_error(format!(
                        "catalog entry '{}' has an empty alias",
                        entry.key
                    )));
                }
                match aliases.get(&normalized) {
                    Some(existing) if existing != &entry.service_id => {
                        return Err(config_error(format!(
                            "catalog alias '{}' maps to both {} and {}",
                            normalized, existing, entry.service_id
                        )));
                    }
                    Some(_) => {}
                    None => {
                        aliases.insert(normalized, entry.service_id.clone());
                    }
                }
            }
        }

        Ok(Self {
            entries,
            aliases,
            check,
        })
    }

    /// Catalog from `AppConfig`, or the development catalog when none is configured.
    pub fn from_config(config: &AppConfig) -> Result<Self, SalonError> {
        let check = IdentifierCheck::from_strict_flag(config.meevo.strict_service_ids);
        match &config.catalog {
            Some(entries) => Self::new(entries.iter().cloned().map(CatalogEntry::from).collect(), check),
            None => Self::new(development_entries(), check),
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn entries_in(&self, category: ServiceCategory) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    /// Normalized alias to service id, sorted by alias.
    pub fn alias_table(&self) -> BTreeMap<String, String> {
        self.aliases
            .iter()
            .map(|(alias, id)| (alias.clone(), id.clone()))
            .collect()
    }

    pub fn identifier_check(&self) -> IdentifierCheck {
        self.check
    }
}

impl ServiceResolver for ServiceCatalog {
    fn resolve(&self, raw: &str) -> Option<String> {
        if raw.trim().is_empty() {
            return None;
        }
        if let Some(id) = self.check.canonical(raw) {
            return Some(id);
        }
        let resolved = self.aliases.get(&normalize_alias(raw)).cloned();
        if resolved.is_none() {
            debug!("Service reference '{}' did not resolve", raw);
        }
        resolved
    }
}

const MENS_HAIRCUT: &str = "480b1fd6-1c42-4c8a-add3-a7600102a9b1";
const WOMENS_HAIRCUT: &str = "54761597-e106-480a-898e-a76001002356";
const CHILDRENS_HAIRCUT: &str = "d16c704b-3ff0-4d18-b73b-a7600102fdf1";
const BLOW_OUT: &str = "978cbc02-048b-4d39-9f0d-a760010f32f8";
const BEARD_TRIM: &str = "aff1ff92-15a6-4090-bf75-abf80103eebb";

fn entry(
    key: &str,
    service_id: &str,
    category: ServiceCategory,
    aliases: &[&str],
    price: Option<&str>,
    note: Option<&str>,
) -> CatalogEntry {
    CatalogEntry {
        key: key.to_string(),
        service_id: service_id.to_string(),
        category,
        aliases: aliases.iter().map(|a| a.to_string()).collect(),
        price: price.map(str::to_string),
        note: note.map(str::to_string),
    }
}

/// Keep It Cut services mapped onto the Meevo development tenant.
///
/// Production tenants use different ids and should configure `[[catalog]]`.
pub fn development_entries() -> Vec<CatalogEntry> {
    use ServiceCategory::*;
    const ADDON_NOTE: Option<&str> = Some("Optional add-on for any haircut");

    vec![
        // No skin fade in dev, both haircuts book the men's haircut
        entry("haircut_standard", MENS_HAIRCUT, Primary, &["haircut standard", "standard", "haircut"], Some("$26"), None),
        entry("haircut_skin_fade", MENS_HAIRCUT, Primary, &["haircut skin fade", "skin_fade", "skin fade", "fade"], Some("$32"), None),
        entry("long_locks", WOMENS_HAIRCUT, Primary, &["long locks", "long"], Some("$60"), None),
        entry("wash", BLOW_OUT, Addon, &["shampoo"], Some("$6"), ADDON_NOTE),
        entry("grooming", BEARD_TRIM, Addon, &["beard", "beard_trim", "beard trim"], Some("$14"), ADDON_NOTE),
        entry("mens_haircut", MENS_HAIRCUT, Legacy, &["mens haircut"], None, None),
        entry("womens_haircut", WOMENS_HAIRCUT, Legacy, &["womens haircut"], None, None),
        entry("childrens_haircut", CHILDRENS_HAIRCUT, Legacy, &["childrens haircut", "kids_haircut"], None, None),
    ]
}
