//! Typed read-model over raw platform catalog records.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

use crate::error::CatalogError;

/// Status values that mark a platform as in progress.
const ACTIVE_STATUSES: [&str; 2] = ["In-Flight", "Pipeline"];

/// One raw catalog entry, as published in the platform tracker document.
///
/// Only the fields the resolver reads are mapped; everything else in the
/// document is ignored. Blank values deserialize as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformRecord {
    /// Primary platform name.
    #[serde(rename = "Platform", default, deserialize_with = "loose_string")]
    pub platform: Option<String>,
    /// Alternate (code) name.
    #[serde(rename = "Code_Name", default, deserialize_with = "loose_string")]
    pub code_name: Option<String>,
    /// Canonical platform code name used for tagging.
    #[serde(
        rename = "Canonical_Platform_Code_name",
        default,
        deserialize_with = "loose_string"
    )]
    pub canonical_code_name: Option<String>,
    /// Lifecycle status.
    #[serde(rename = "Status", default, deserialize_with = "loose_string")]
    pub status: Option<String>,
    /// Preferred tag source.
    #[serde(rename = "Official_Tag", default, deserialize_with = "loose_string")]
    pub official_tag: Option<String>,
    /// Fallback tag source.
    #[serde(rename = "LP_tag_short", default, deserialize_with = "loose_string")]
    pub lp_tag_short: Option<String>,
    /// Fallback tag source under its other spelling; both may be present.
    #[serde(rename = "LP_Tag_short", default, deserialize_with = "loose_string")]
    pub lp_tag_short_alt: Option<String>,
    /// Responsible engineer.
    #[serde(rename = "Canonical_Eng", default, deserialize_with = "loose_string")]
    pub engineer: Option<String>,
    /// CPU vendor, e.g. `Intel`.
    #[serde(rename = "CPU_Vendor", default, deserialize_with = "loose_string")]
    pub cpu_vendor: Option<String>,
}

/// Accept strings, numbers, booleans or null; blank strings become `None`.
fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let text = match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        Some(_) => None,
    };
    Ok(text.filter(|s| !s.trim().is_empty()))
}

/// A catalog platform as seen by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    name: String,
    alt_name: Option<String>,
    code_name_override: Option<String>,
    record: PlatformRecord,
}

impl Platform {
    /// Builds a platform from a raw record.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingField`] when the record has no primary
    /// name. `index` is the record's position, used for the message.
    pub fn from_record(index: usize, record: PlatformRecord) -> Result<Self, CatalogError> {
        let Some(name) = record.platform.clone() else {
            return Err(CatalogError::MissingField {
                index,
                field: "Platform",
            });
        };
        Ok(Self {
            name,
            alt_name: record.code_name.clone(),
            code_name_override: None,
            record,
        })
    }

    /// Primary name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Alternate name, if the record carries one.
    #[must_use]
    pub fn alt_name(&self) -> Option<&str> {
        self.alt_name.as_deref()
    }

    /// All name variants usable as match candidates.
    #[must_use]
    pub fn alternate_names(&self) -> Vec<&str> {
        std::iter::once(self.name.as_str())
            .chain(self.alt_name.as_deref())
            .collect()
    }

    /// Raw status string.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.record.status.as_deref()
    }

    /// Whether the platform is in flight or in the pipeline.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status().is_some_and(|s| ACTIVE_STATUSES.contains(&s))
    }

    /// Replaces the catalog code name, e.g. with a caller-supplied filter value.
    pub fn set_code_name(&mut self, code_name: impl Into<String>) {
        self.code_name_override = Some(code_name.into());
    }

    /// The override if set, else the catalog's canonical code name.
    #[must_use]
    pub fn code_name(&self) -> Option<&str> {
        self.code_name_override
            .as_deref()
            .or(self.record.canonical_code_name.as_deref())
    }

    /// First non-empty tag source field, else the code name.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        let sources = [
            ("Official_Tag", self.record.official_tag.as_deref()),
            ("LP_tag_short", self.record.lp_tag_short.as_deref()),
            ("LP_Tag_short", self.record.lp_tag_short_alt.as_deref()),
        ];
        for (field, value) in sources {
            if let Some(value) = value {
                info!("key: {field} value: {value}");
                return Some(value);
            }
        }
        self.code_name()
    }

    /// Responsible engineer.
    #[must_use]
    pub fn engineer(&self) -> Option<&str> {
        self.record.engineer.as_deref()
    }

    /// CPU vendor.
    #[must_use]
    pub fn cpu_vendor(&self) -> Option<&str> {
        self.record.cpu_vendor.as_deref()
    }
}

/// Decodes a catalog document (a JSON array of records) into platforms.
///
/// # Errors
///
/// Returns [`CatalogError::Parse`] if the document is not an array of
/// objects, or [`CatalogError::MissingField`] for a record without a name.
pub fn parse_catalog(document: &serde_json::Value) -> Result<Vec<Platform>, CatalogError> {
    let records = Vec::<PlatformRecord>::deserialize(document)
        .map_err(|e| CatalogError::Parse(e.to_string()))?;
    records
        .into_iter()
        .enumerate()
        .map(|(i, r)| Platform::from_record(i, r))
        .collect()
}
