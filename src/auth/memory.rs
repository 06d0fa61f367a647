//! JSON-seeded in-memory collaborators for the standalone binary.
//!
//! Deployments embedding the library inject their own [`Authenticator`] and
//! [`UserStore`]; this store exists so the server can run by itself from a
//! seed file of `{username, password, roles}` records.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::auth::{Authenticator, Identity, UserStore};
use crate::error::Error;

#[derive(Deserialize, Debug)]
struct SeedUser {
    username: String,
    password: String,
    #[serde(default)]
    roles: Vec<String>,
}

pub struct MemoryUsers {
    users: HashMap<String, SeedUser>,
}

impl MemoryUsers {
    /// Load seed records from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read user seed file {}", path.display()))?;
        Self::from_json(&data)
    }

    /// # Errors
    /// Returns an error if the JSON is not a list of seed records.
    pub fn from_json(data: &str) -> Result<Self> {
        let seeds: Vec<SeedUser> =
            serde_json::from_str(data).context("Failed to parse user seed records")?;

        let users = seeds
            .into_iter()
            .map(|seed| (seed.username.clone(), seed))
            .collect();

        Ok(Self { users })
    }
}

impl Authenticator for MemoryUsers {
    fn authenticate(&self, username: &str, password: &str) -> Result<(), Error> {
        match self.users.get(username) {
            Some(seed) if seed.password == password => Ok(()),
            _ => Err(Error::Authentication("Bad credentials".to_string())),
        }
    }
}

impl UserStore for MemoryUsers {
    fn find_by_username(&self, username: &str) -> Option<Identity> {
        self.users.get(username).map(|seed| Identity {
            username: seed.username.clone(),
            roles: seed.roles.clone(),
        })
    }
}
