//! Models module for the SDK
//!
//! Defines the DCAT input records, the DataHub metadata events produced
//! from them, and the URN builders that address those events.

pub mod dcat;
pub mod metadata;
pub mod urn;

pub use dcat::{ContactPoint, DcatCatalog, DcatDataset, Distribution};
pub use metadata::{
    AuditStamp, BrowsePaths, DATASET_SNAPSHOT_TYPE, DatasetAspect, DatasetProperties,
    DatasetSnapshot, Domains, MetadataChangeEvent, Owner, Ownership, OwnershipType,
};
pub use urn::{make_data_platform_urn, make_dataset_urn, make_domain_urn, make_user_urn};
