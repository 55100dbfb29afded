//! User profile lookup for prompt personalization.
//!
//! The core never owns profile storage. It reads an immutable
//! [`ProfileSnapshot`] through the [`ProfileSource`] trait, once per
//! request, and discards it afterwards.

pub mod directory;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use directory::{ProfileDirectory, ProfileLoadError};

/// Read-only view of the user attributes relevant to plan generation.
///
/// Every field is present-or-absent. An absent field and a blank field both
/// suppress the corresponding prompt clause, but only `None` means the
/// store had nothing recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness_goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injury_history: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chronic_diseases: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_access: Option<String>,
}

impl ProfileSnapshot {
    /// The fitness goal, if recorded and not blank.
    pub fn goal(&self) -> Option<&str> {
        non_blank(self.fitness_goal.as_deref())
    }

    /// The injury history, if recorded and not blank.
    pub fn injuries(&self) -> Option<&str> {
        non_blank(self.injury_history.as_deref())
    }
}

/// Return the trimmed value when it has visible content.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Lookup interface for the external profile store.
///
/// `Ok(None)` is a legitimate answer ("no profile for this user"); the
/// pipeline then omits every profile-derived prompt clause.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn lookup(&self, user_id: &str) -> Result<Option<ProfileSnapshot>>;
}

/// A source that never has a profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProfiles;

#[async_trait]
impl ProfileSource for NoProfiles {
    async fn lookup(&self, _user_id: &str) -> Result<Option<ProfileSnapshot>> {
        Ok(None)
    }
}

const _: () = {
    fn _assert_object_safe(_: &dyn ProfileSource) {}
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_read_as_absent() {
        let profile = ProfileSnapshot {
            fitness_goal: Some("   ".to_string()),
            injury_history: Some(" knee ".to_string()),
            ..Default::default()
        };
        assert_eq!(profile.goal(), None);
        assert_eq!(profile.injuries(), Some("knee"));
    }

    #[test]
    fn absent_and_empty_stay_distinct() {
        let absent = ProfileSnapshot::default();
        let empty = ProfileSnapshot {
            fitness_goal: Some(String::new()),
            ..Default::default()
        };
        assert_ne!(absent, empty);
        assert_eq!(absent.goal(), empty.goal());
    }

    #[tokio::test]
    async fn no_profiles_returns_none() {
        let source: Box<dyn ProfileSource> = Box::new(NoProfiles);
        let found = source.lookup("anyone").await.unwrap();
        assert!(found.is_none());
    }
}
