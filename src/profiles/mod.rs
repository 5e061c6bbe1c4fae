//! Trading profile management.
//!
//! Built-in profiles are immutable; custom profiles are created, updated
//! and deleted through the manager, which validates the weight-sum
//! invariant before any change is applied. Switching the active profile
//! is atomic and observed by the engine at the start of its next cycle.

pub mod builtins;

use crate::models::profile::{TradingProfile, WEIGHT_SUM_TOLERANCE};
use std::collections::HashMap;
use std::fmt;
use tokio::sync::RwLock;
use tracing::info;

pub const DEFAULT_PROFILE_ID: &str = "balanced";

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileError {
    /// Weights do not sum to 1.0 within tolerance.
    InvalidWeights { sum: f64 },
    /// Built-in profiles cannot be updated or deleted.
    Immutable(String),
    NotFound(String),
    DuplicateId(String),
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::InvalidWeights { sum } => write!(
                f,
                "strategy weights must sum to 1.0 within {} (got {:.4})",
                WEIGHT_SUM_TOLERANCE, sum
            ),
            ProfileError::Immutable(id) => write!(f, "profile '{}' is built-in and immutable", id),
            ProfileError::NotFound(id) => write!(f, "profile '{}' not found", id),
            ProfileError::DuplicateId(id) => write!(f, "profile '{}' already exists", id),
        }
    }
}

impl std::error::Error for ProfileError {}

/// Holds every known profile and the id of the active one.
pub struct ProfileManager {
    profiles: RwLock<HashMap<String, TradingProfile>>,
    active: RwLock<String>,
}

impl ProfileManager {
    /// Manager seeded with the built-in profiles, `balanced` active.
    pub fn new() -> Self {
        let mut profiles = HashMap::new();
        for profile in builtins::builtin_profiles() {
            profiles.insert(profile.id.clone(), profile);
        }
        Self {
            profiles: RwLock::new(profiles),
            active: RwLock::new(DEFAULT_PROFILE_ID.to_string()),
        }
    }

    /// Snapshot of the active profile.
    pub async fn current(&self) -> TradingProfile {
        let active = self.active.read().await.clone();
        let profiles = self.profiles.read().await;
        profiles
            .get(&active)
            .or_else(|| profiles.get(DEFAULT_PROFILE_ID))
            .cloned()
            .expect("default profile always present")
    }

    /// Activate a profile. Returns false for an unknown id.
    pub async fn switch(&self, id: &str) -> bool {
        let profiles = self.profiles.read().await;
        if !profiles.contains_key(id) {
            return false;
        }
        drop(profiles);
        let mut active = self.active.write().await;
        if *active != id {
            info!(profile = %id, "switching active profile");
            *active = id.to_string();
        }
        true
    }

    pub async fn active_id(&self) -> String {
        self.active.read().await.clone()
    }

    pub async fn list(&self) -> Vec<TradingProfile> {
        let profiles = self.profiles.read().await;
        let mut all: Vec<_> = profiles.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    pub async fn get(&self, id: &str) -> Option<TradingProfile> {
        self.profiles.read().await.get(id).cloned()
    }

    /// Create a custom profile. Rejected configurations leave the store
    /// unchanged.
    pub async fn create(&self, mut profile: TradingProfile) -> Result<(), ProfileError> {
        validate(&profile)?;
        profile.builtin = false;
        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(&profile.id) {
            return Err(ProfileError::DuplicateId(profile.id));
        }
        info!(profile = %profile.id, "created custom profile");
        profiles.insert(profile.id.clone(), profile);
        Ok(())
    }

    /// Update a custom profile in place.
    pub async fn update(&self, id: &str, mut profile: TradingProfile) -> Result<(), ProfileError> {
        validate(&profile)?;
        let mut profiles = self.profiles.write().await;
        let existing = profiles
            .get(id)
            .ok_or_else(|| ProfileError::NotFound(id.to_string()))?;
        if existing.builtin {
            return Err(ProfileError::Immutable(id.to_string()));
        }
        profile.id = id.to_string();
        profile.builtin = false;
        info!(profile = %id, "updated custom profile");
        profiles.insert(id.to_string(), profile);
        Ok(())
    }

    /// Delete a custom profile. Deleting the active one falls back to the
    /// default.
    pub async fn delete(&self, id: &str) -> Result<(), ProfileError> {
        let mut profiles = self.profiles.write().await;
        let existing = profiles
            .get(id)
            .ok_or_else(|| ProfileError::NotFound(id.to_string()))?;
        if existing.builtin {
            return Err(ProfileError::Immutable(id.to_string()));
        }
        profiles.remove(id);
        drop(profiles);

        let mut active = self.active.write().await;
        if *active == id {
            info!(
                profile = %id,
                fallback = DEFAULT_PROFILE_ID,
                "deleted active profile, falling back to default"
            );
            *active = DEFAULT_PROFILE_ID.to_string();
        } else {
            info!(profile = %id, "deleted custom profile");
        }
        Ok(())
    }
}

impl Default for ProfileManager {
    fn default() -> Self {
        Self::new()
    }
}

fn validate(profile: &TradingProfile) -> Result<(), ProfileError> {
    if !profile.weights.is_normalized() {
        return Err(ProfileError::InvalidWeights {
            sum: profile.weights.sum(),
        });
    }
    Ok(())
}
