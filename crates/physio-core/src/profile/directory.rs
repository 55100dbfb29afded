//! File-backed profile source.
//!
//! Profiles live in a TOML file of `[[profiles]]` tables keyed by
//! `user_id`. The whole file is read once at load time; lookups are
//! plain map reads.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use super::{ProfileSnapshot, ProfileSource};

/// Errors that can occur while loading a profile file.
#[derive(Debug, Error)]
pub enum ProfileLoadError {
    #[error("failed to read profile file {path:?}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("profile entry has an empty user_id")]
    EmptyUserId,

    #[error("duplicate profile for user {0:?}")]
    DuplicateUser(String),
}

#[derive(Debug, Deserialize)]
struct ProfileFile {
    #[serde(default)]
    profiles: Vec<ProfileEntry>,
}

#[derive(Debug, Deserialize)]
struct ProfileEntry {
    user_id: String,
    #[serde(flatten)]
    snapshot: ProfileSnapshot,
}

/// In-memory profile map loaded from TOML.
#[derive(Debug, Clone, Default)]
pub struct ProfileDirectory {
    profiles: HashMap<String, ProfileSnapshot>,
}

impl ProfileDirectory {
    /// Parse a profile file's contents.
    pub fn from_toml(content: &str) -> Result<Self, ProfileLoadError> {
        let file: ProfileFile = toml::from_str(content)?;
        let mut profiles = HashMap::with_capacity(file.profiles.len());
        for entry in file.profiles {
            let user_id = entry.user_id.trim().to_string();
            if user_id.is_empty() {
                return Err(ProfileLoadError::EmptyUserId);
            }
            if profiles.contains_key(&user_id) {
                return Err(ProfileLoadError::DuplicateUser(user_id));
            }
            profiles.insert(user_id, entry.snapshot);
        }
        Ok(Self { profiles })
    }

    /// Read and parse a profile file from disk.
    pub fn load(path: &Path) -> Result<Self, ProfileLoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| ProfileLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let directory = Self::from_toml(&content)?;
        tracing::debug!(
            path = %path.display(),
            count = directory.len(),
            "loaded profile directory"
        );
        Ok(directory)
    }

    pub fn get(&self, user_id: &str) -> Option<&ProfileSnapshot> {
        self.profiles.get(user_id.trim())
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[async_trait]
impl ProfileSource for ProfileDirectory {
    async fn lookup(&self, user_id: &str) -> Result<Option<ProfileSnapshot>> {
        Ok(self.get(user_id).cloned())
    }
}
