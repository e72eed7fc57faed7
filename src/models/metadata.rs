//! DataHub metadata change event model
//!
//! Snapshot-style ingestion events (`MetadataChangeEvent`) as accepted by
//! the DataHub GMS Rest.li API. Aspects are Rest.li unions, serialized as a
//! single-key object whose key is the fully qualified aspect type.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::urn::make_user_urn;

/// Rest.li union key for dataset snapshots
pub const DATASET_SNAPSHOT_TYPE: &str = "com.linkedin.metadata.snapshot.DatasetSnapshot";

/// Metadata change event proposing a dataset snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataChangeEvent {
    #[serde(with = "dataset_snapshot_union")]
    pub proposed_snapshot: DatasetSnapshot,
}

impl MetadataChangeEvent {
    pub fn new(snapshot: DatasetSnapshot) -> Self {
        Self {
            proposed_snapshot: snapshot,
        }
    }

    /// URN of the entity this event targets
    pub fn urn(&self) -> &str {
        &self.proposed_snapshot.urn
    }
}

/// Snapshot of a dataset entity: its URN plus the aspects being written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSnapshot {
    pub urn: String,
    pub aspects: Vec<DatasetAspect>,
}

impl DatasetSnapshot {
    /// Find the properties aspect, if present
    pub fn properties(&self) -> Option<&DatasetProperties> {
        self.aspects.iter().find_map(|a| match a {
            DatasetAspect::Properties(p) => Some(p),
            _ => None,
        })
    }

    /// Find the ownership aspect, if present
    pub fn ownership(&self) -> Option<&Ownership> {
        self.aspects.iter().find_map(|a| match a {
            DatasetAspect::Ownership(o) => Some(o),
            _ => None,
        })
    }

    /// Find the domains aspect, if present
    pub fn domains(&self) -> Option<&Domains> {
        self.aspects.iter().find_map(|a| match a {
            DatasetAspect::Domains(d) => Some(d),
            _ => None,
        })
    }

    /// Find the browse paths aspect, if present
    pub fn browse_paths(&self) -> Option<&BrowsePaths> {
        self.aspects.iter().find_map(|a| match a {
            DatasetAspect::BrowsePaths(b) => Some(b),
            _ => None,
        })
    }
}

/// Aspects a dataset snapshot may carry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DatasetAspect {
    #[serde(rename = "com.linkedin.dataset.DatasetProperties")]
    Properties(DatasetProperties),
    #[serde(rename = "com.linkedin.common.Ownership")]
    Ownership(Ownership),
    #[serde(rename = "com.linkedin.domain.Domains")]
    Domains(Domains),
    #[serde(rename = "com.linkedin.common.BrowsePaths")]
    BrowsePaths(BrowsePaths),
}

impl DatasetAspect {
    /// Fully qualified aspect type name
    pub fn aspect_type(&self) -> &'static str {
        match self {
            DatasetAspect::Properties(_) => "com.linkedin.dataset.DatasetProperties",
            DatasetAspect::Ownership(_) => "com.linkedin.common.Ownership",
            DatasetAspect::Domains(_) => "com.linkedin.domain.Domains",
            DatasetAspect::BrowsePaths(_) => "com.linkedin.common.BrowsePaths",
        }
    }
}

/// Dataset properties aspect
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetProperties {
    #[serde(default)]
    pub custom_properties: BTreeMap<String, String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Ownership aspect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ownership {
    pub owners: Vec<Owner>,
    #[serde(default)]
    pub last_modified: AuditStamp,
}

impl Ownership {
    /// Ownership with a single owner of the given type
    pub fn single(owner_urn: String, owner_type: OwnershipType) -> Self {
        Self {
            owners: vec![Owner {
                owner: owner_urn,
                owner_type,
            }],
            last_modified: AuditStamp::default(),
        }
    }
}

/// A single owner entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    /// Owner URN (corp user or corp group)
    pub owner: String,
    #[serde(rename = "type")]
    pub owner_type: OwnershipType,
}

/// DataHub ownership types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OwnershipType {
    #[serde(rename = "DATAOWNER")]
    DataOwner,
    TechnicalOwner,
    BusinessOwner,
    Steward,
    None,
}

/// Who changed something and when (epoch milliseconds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditStamp {
    pub time: i64,
    pub actor: String,
}

impl Default for AuditStamp {
    fn default() -> Self {
        Self {
            time: 0,
            actor: make_user_urn("unknown"),
        }
    }
}

/// Domains aspect
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Domains {
    pub domains: Vec<String>,
}

/// Browse paths aspect
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrowsePaths {
    pub paths: Vec<String>,
}

mod dataset_snapshot_union {
    use super::{DATASET_SNAPSHOT_TYPE, DatasetSnapshot};
    use serde::de::Error as _;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S: Serializer>(
        snapshot: &DatasetSnapshot,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(DATASET_SNAPSHOT_TYPE, snapshot)?;
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DatasetSnapshot, D::Error> {
        let mut union: BTreeMap<String, DatasetSnapshot> = BTreeMap::deserialize(deserializer)?;
        union.remove(DATASET_SNAPSHOT_TYPE).ok_or_else(|| {
            D::Error::custom(format!("expected a {} snapshot", DATASET_SNAPSHOT_TYPE))
        })
    }
}
