//! Single-record user profile (`user_profile.json`).

use crate::error::StoreError;
use std::fs;
use std::path::{Path, PathBuf};
use wellness_core::UserProfile;

pub const PROFILE_FILE: &str = "user_profile.json";

#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(PROFILE_FILE))
    }

    /// Missing file ⇒ default (blank) profile. A corrupt file is an error.
    pub fn load(&self) -> Result<UserProfile, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(UserProfile::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, profile: &UserProfile) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(profile)?)?;
        Ok(())
    }
}
