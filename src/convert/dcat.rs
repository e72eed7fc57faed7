//! DCAT to DataHub conversion
//!
//! Maps DCAT dataset records onto DataHub metadata change events. The
//! mapping never fails: absent fields fall back to placeholders.

use crate::config::CatalogSettings;
use crate::models::dcat::{DcatCatalog, DcatDataset, Distribution};
use crate::models::metadata::{
    BrowsePaths, DatasetAspect, DatasetProperties, DatasetSnapshot, Domains, MetadataChangeEvent,
    Ownership, OwnershipType,
};
use crate::models::urn::{make_dataset_urn, make_domain_urn, make_user_urn};
use std::collections::BTreeMap;
use tracing::debug;

/// Placeholder for a missing identifier, contact name, access level or owner
pub const UNKNOWN: &str = "unknown";

/// Placeholder for a missing title
pub const UNTITLED_DATASET: &str = "Untitled Dataset";

/// Placeholder for a missing description
pub const NO_DESCRIPTION: &str = "No description provided.";

/// Flatten DCAT distributions into custom properties.
///
/// Distribution `i` (1-indexed) contributes `distribution_{i}_format`,
/// `distribution_{i}_accessURL`, `distribution_{i}_downloadURL` and
/// `distribution_{i}_mediaType`; absent values become empty strings.
pub fn transform_distribution_to_properties(
    distribution: &[Distribution],
) -> BTreeMap<String, String> {
    let mut properties = BTreeMap::new();
    for (idx, dist) in distribution.iter().enumerate() {
        let prefix = format!("distribution_{}_", idx + 1);
        properties.insert(format!("{}format", prefix), or_empty(&dist.format));
        properties.insert(format!("{}accessURL", prefix), or_empty(&dist.access_url));
        properties.insert(
            format!("{}downloadURL", prefix),
            or_empty(&dist.download_url),
        );
        properties.insert(format!("{}mediaType", prefix), or_empty(&dist.media_type));
    }
    properties
}

/// Transform a DCAT dataset into a DataHub metadata change event
///
/// # Example
///
/// ```rust
/// use catalog_ingest_sdk::config::CatalogSettings;
/// use catalog_ingest_sdk::convert::transform_dcat_to_mce;
/// use catalog_ingest_sdk::models::DcatDataset;
///
/// let settings = CatalogSettings::new("opendata", "PROD", "transport");
/// let event = transform_dcat_to_mce(&DcatDataset::default(), &settings);
/// assert_eq!(
///     event.urn(),
///     "urn:li:dataset:(urn:li:dataPlatform:opendata,unknown,PROD)"
/// );
/// ```
pub fn transform_dcat_to_mce(
    dataset: &DcatDataset,
    settings: &CatalogSettings,
) -> MetadataChangeEvent {
    let dataset_id = dataset.identifier.as_deref().unwrap_or(UNKNOWN);
    let title = dataset.title.as_deref().unwrap_or(UNTITLED_DATASET);
    let description = dataset.description.as_deref().unwrap_or(NO_DESCRIPTION);
    let contact = dataset.contact_point.clone().unwrap_or_default();
    let contact_name = contact.fn_name.as_deref().unwrap_or(UNKNOWN);
    let contact_email = contact.email();

    let mut custom_properties = BTreeMap::from([
        (
            "accessLevel".to_string(),
            dataset.access_level.as_deref().unwrap_or(UNKNOWN).to_string(),
        ),
        ("contactName".to_string(), contact_name.to_string()),
        ("contactEmail".to_string(), contact_email.clone()),
        ("issued".to_string(), or_empty(&dataset.issued)),
        ("modified".to_string(), or_empty(&dataset.modified)),
        ("landingPage".to_string(), or_empty(&dataset.landing_page)),
        ("temporal".to_string(), or_empty(&dataset.temporal)),
        ("spatial".to_string(), or_empty(&dataset.spatial)),
        (
            "accrualPeriodicity".to_string(),
            or_empty(&dataset.accrual_periodicity),
        ),
    ]);
    custom_properties.extend(transform_distribution_to_properties(&dataset.distribution));

    let owner = if contact_email.is_empty() {
        make_user_urn(UNKNOWN)
    } else {
        make_user_urn(&contact_email)
    };

    let urn = make_dataset_urn(&settings.platform, dataset_id, &settings.env);
    debug!("Mapped DCAT dataset {} to {}", dataset_id, urn);

    MetadataChangeEvent::new(DatasetSnapshot {
        urn,
        aspects: vec![
            DatasetAspect::Properties(DatasetProperties {
                custom_properties,
                name: title.to_string(),
                description: Some(description.to_string()),
                tags: dataset.keyword.clone(),
            }),
            DatasetAspect::Ownership(Ownership::single(owner, OwnershipType::DataOwner)),
            DatasetAspect::Domains(Domains {
                domains: vec![make_domain_urn(&settings.domain)],
            }),
            DatasetAspect::BrowsePaths(BrowsePaths {
                paths: vec![format!("/{}/{}", settings.domain, title)],
            }),
        ],
    })
}

/// Transform every dataset of a catalog, preserving input order
pub fn transform_catalog(
    catalog: &DcatCatalog,
    settings: &CatalogSettings,
) -> Vec<MetadataChangeEvent> {
    catalog
        .dataset
        .iter()
        .map(|dataset| transform_dcat_to_mce(dataset, settings))
        .collect()
}

fn or_empty(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}
