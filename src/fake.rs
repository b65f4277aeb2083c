// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! In-process stand-ins for the catalog and auth backend.

use std::io;

use async_trait::async_trait;
use secrecy::{ExposeSecret as _, SecretString};

use crate::{
    client::{Auth, Catalog, Country, CountryName, Credentials, Region, User},
    error::{self, Error, Result},
    storage::{IsPersistent, Memory, Storage},
};

pub(crate) fn country(code: &str, name: &str, region: &str, borders: &[&str]) -> Country {
    Country {
        cca3: code.to_owned(),
        name: CountryName {
            common: name.to_owned(),
            ..CountryName::default()
        },
        region: region.to_owned(),
        borders: borders.iter().map(|&code| code.to_owned()).collect(),
        ..Country::default()
    }
}

/// An in-process catalog. Codes listed in `broken` fail as if the
/// backend were down, and `offline` fails everything.
#[derive(Default)]
pub(crate) struct FakeCatalog {
    pub(crate) countries: Vec<Country>,
    pub(crate) broken: Vec<&'static str>,
    pub(crate) offline: bool,
}

impl FakeCatalog {
    pub(crate) fn new(countries: Vec<Country>) -> Self {
        Self {
            countries,
            ..Self::default()
        }
    }

    fn check(&self, lookup: &str) -> Result<()> {
        if self.offline || self.broken.iter().any(|&broken| broken == lookup) {
            return Err(error::Catalog::Status(reqwest::StatusCode::BAD_GATEWAY).into());
        }
        Ok(())
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn all(&self) -> Result<Vec<Country>> {
        self.check("all")?;
        Ok(self.countries.clone())
    }

    async fn by_region(&self, region: Region) -> Result<Vec<Country>> {
        self.check(&region.name())?;
        Ok(self
            .countries
            .iter()
            .filter(|country| country.region == region.name())
            .cloned()
            .collect())
    }

    async fn by_name(&self, name: &str) -> Result<Vec<Country>> {
        self.check(name)?;
        let needle = name.to_lowercase();
        let found = self
            .countries
            .iter()
            .filter(|country| country.name.common.to_lowercase().contains(&needle))
            .cloned()
            .collect::<Vec<_>>();
        if found.is_empty() {
            return Err(error::Catalog::NotFound(name.to_owned()).into());
        }
        Ok(found)
    }

    async fn by_code(&self, code: &str) -> Result<Country> {
        self.check(code)?;
        self.countries
            .iter()
            .find(|country| country.cca3 == code)
            .cloned()
            .ok_or_else(|| Error::from(error::Catalog::NotFound(code.to_owned())))
    }
}

pub(crate) fn credentials(username: &str) -> Credentials {
    Credentials {
        user: User {
            username: username.to_owned(),
            extra: serde_json::Map::new(),
        },
        token: SecretString::new(format!("token-for-{username}")),
    }
}

/// Accepts the password `correct` for anyone, and registers any username
/// except `taken`.
pub(crate) struct FakeAuth;

#[async_trait]
impl Auth for FakeAuth {
    async fn register(&self, username: &str, _: &SecretString) -> Result<Credentials> {
        if username == "taken" {
            return Err(Error::Auth("Username already taken".to_owned()));
        }
        Ok(credentials(username))
    }

    async fn login(&self, username: &str, password: &SecretString) -> Result<Credentials> {
        if password.expose_secret() != "correct" {
            return Err(Error::Auth("Invalid credentials".to_owned()));
        }
        Ok(credentials(username))
    }
}

/// Storage that refuses writes or removals of the listed keys and otherwise
/// behaves like the [`Memory`] it wraps.
#[derive(Clone, Default)]
pub(crate) struct FailingStorage {
    pub(crate) inner: Memory,
    pub(crate) fail_set: Vec<&'static str>,
    pub(crate) fail_delete: Vec<&'static str>,
}

fn refused(key: &str) -> Error {
    io::Error::new(io::ErrorKind::PermissionDenied, format!("refusing to touch {key:?}")).into()
}

impl IsPersistent for FailingStorage {
    fn is_persistent(&self) -> bool {
        false
    }
}

#[async_trait]
impl Storage for FailingStorage {
    async fn get(&mut self, key: &str) -> Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_set.iter().any(|&failing| failing == key) {
            return Err(refused(key));
        }
        self.inner.set(key, value).await
    }

    async fn delete(&mut self, key: &str) -> Result<()> {
        if self.fail_delete.iter().any(|&failing| failing == key) {
            return Err(refused(key));
        }
        self.inner.delete(key).await
    }
}
