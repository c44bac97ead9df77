//! Asset type tags and the extensible asset type table

use factory_config::limits::MAX_ASSET_TYPE_NAME_LEN;
use num_enum::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Behavioral class of a pool coin, as seen by pool math
///
/// Equality, ordering and hashing go through [`AssetType::id`], so
/// `Custom(2)` and `Rebasing` are the same type.
#[derive(Debug, Clone, Copy, FromPrimitive, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
#[repr(u8)]
pub enum AssetType {
    /// Plain ERC-20 style token
    Standard = 0,
    /// Token priced through an external rate oracle
    Oracle = 1,
    /// Balance changes without transfers
    Rebasing = 2,
    /// Vault share token exposing a conversion rate
    Erc4626 = 3,
    /// Admin-registered type
    #[num_enum(catch_all)]
    Custom(u8),
}

impl AssetType {
    pub fn id(self) -> u8 {
        match self {
            AssetType::Standard => 0,
            AssetType::Oracle => 1,
            AssetType::Rebasing => 2,
            AssetType::Erc4626 => 3,
            AssetType::Custom(id) => id,
        }
    }

    pub fn is_rebasing(self) -> bool {
        self.id() == AssetType::Rebasing.id()
    }
}

impl PartialEq for AssetType {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for AssetType {}

impl std::hash::Hash for AssetType {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl PartialOrd for AssetType {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AssetType {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id().cmp(&other.id())
    }
}

// num_enum takes `#[default]` as its fallback, which conflicts with catch_all
impl Default for AssetType {
    fn default() -> Self {
        AssetType::Standard
    }
}

impl From<AssetType> for u8 {
    fn from(value: AssetType) -> Self {
        value.id()
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetType::Custom(id) => write!(f, "Custom({})", id),
            other => write!(f, "{:?}", other),
        }
    }
}

/// Asset type table errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssetTypeError {
    #[error("Asset type id {id} is already registered as '{existing}'")]
    AlreadyRegistered { id: u8, existing: String },

    #[error("Asset type name must be 1..={max} characters, got {len}")]
    InvalidName { len: usize, max: usize },
}

/// Built-in plus admin-registered asset types, keyed by id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetTypeTable {
    names: BTreeMap<u8, String>,
}

impl Default for AssetTypeTable {
    fn default() -> Self {
        let names = [
            (AssetType::Standard, "Standard"),
            (AssetType::Oracle, "Oracle"),
            (AssetType::Rebasing, "Rebasing"),
            (AssetType::Erc4626, "ERC4626"),
        ]
        .into_iter()
        .map(|(ty, name)| (ty.id(), name.to_string()))
        .collect();

        Self { names }
    }
}

impl AssetTypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, asset_type: AssetType) -> bool {
        self.names.contains_key(&asset_type.id())
    }

    pub fn name(&self, id: u8) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Check that `id` can be registered under `name` without mutating
    pub fn check_add(&self, id: u8, name: &str) -> Result<(), AssetTypeError> {
        if let Some(existing) = self.names.get(&id) {
            return Err(AssetTypeError::AlreadyRegistered {
                id,
                existing: existing.clone(),
            });
        }
        if name.is_empty() || name.len() > MAX_ASSET_TYPE_NAME_LEN {
            return Err(AssetTypeError::InvalidName {
                len: name.len(),
                max: MAX_ASSET_TYPE_NAME_LEN,
            });
        }
        Ok(())
    }

    /// Register a custom asset type
    pub fn add(&mut self, id: u8, name: &str) -> Result<AssetType, AssetTypeError> {
        self.check_add(id, name)?;
        self.names.insert(id, name.to_string());
        Ok(AssetType::from(id))
    }
}
