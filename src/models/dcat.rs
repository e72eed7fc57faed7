//! DCAT catalog input model
//!
//! Mirrors the subset of the DCAT (Project Open Data flavour) vocabulary
//! that the metadata mapping reads. Every dataset field is optional; the
//! converter decides placeholders, not the parser.

use serde::{Deserialize, Serialize};

/// Top-level DCAT document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DcatCatalog {
    /// Datasets in the catalog. A missing key means no datasets.
    #[serde(default)]
    pub dataset: Vec<DcatDataset>,
}

/// A single DCAT dataset record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DcatDataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Contact point (DCAT: contactPoint)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_point: Option<ContactPoint>,
    /// Keywords, emitted as tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keyword: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landing_page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spatial: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accrual_periodicity: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub distribution: Vec<Distribution>,
}

/// DCAT contact point (vCard subset)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactPoint {
    /// Formatted name (vCard: fn)
    #[serde(rename = "fn", default, skip_serializing_if = "Option::is_none")]
    pub fn_name: Option<String>,
    /// Email, usually as a `mailto:` URI (vCard: hasEmail)
    #[serde(rename = "hasEmail", default, skip_serializing_if = "Option::is_none")]
    pub has_email: Option<String>,
}

/// DCAT distribution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(rename = "accessURL", default, skip_serializing_if = "Option::is_none")]
    pub access_url: Option<String>,
    #[serde(rename = "downloadURL", default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(rename = "mediaType", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

impl ContactPoint {
    /// Email address with the `mailto:` scheme removed; empty when absent
    pub fn email(&self) -> String {
        self.has_email
            .as_deref()
            .map(|e| e.replace("mailto:", ""))
            .unwrap_or_default()
    }
}
