// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use async_trait::async_trait;
use clap::ValueEnum;
use inflector::Inflector as _;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Region {
    Africa,
    Americas,
    Asia,
    Europe,
    Oceania,
}

impl Region {
    /// The region name as the catalog spells it.
    pub(crate) fn name(self) -> String {
        self.to_possible_value()
            .map(|value| value.get_name().to_title_case())
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub(crate) struct NativeName {
    #[serde(default)]
    pub(crate) common: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CountryName {
    pub(crate) common: String,
    #[serde(default)]
    pub(crate) official: String,
    #[serde(default)]
    pub(crate) native_name: BTreeMap<String, NativeName>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub(crate) struct Flags {
    #[serde(default)]
    pub(crate) png: String,
    #[serde(default)]
    pub(crate) svg: String,
    pub(crate) alt: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub(crate) struct Currency {
    #[serde(default)]
    pub(crate) name: String,
    pub(crate) symbol: Option<String>,
}

/// A country record as the catalog describes it. Only the code and common
/// name are guaranteed to be present.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub(crate) struct Country {
    pub(crate) cca3: String,
    pub(crate) name: CountryName,
    pub(crate) flags: Flags,
    pub(crate) population: u64,
    pub(crate) region: String,
    pub(crate) subregion: Option<String>,
    pub(crate) capital: Option<Vec<String>>,
    pub(crate) tld: Option<Vec<String>>,
    pub(crate) currencies: Option<BTreeMap<String, Currency>>,
    pub(crate) languages: Option<BTreeMap<String, String>>,
    pub(crate) borders: Vec<String>,
    pub(crate) area: Option<f64>,
}

/// The identity the auth backend hands back. Everything other than the
/// username is kept as-is so it survives a trip through storage.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub(crate) struct User {
    pub(crate) username: String,
    #[serde(flatten)]
    pub(crate) extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Credentials {
    pub(crate) user: User,
    pub(crate) token: SecretString,
}

#[async_trait]
pub(crate) trait Catalog {
    async fn all(&self) -> Result<Vec<Country>>;
    async fn by_region(&self, region: Region) -> Result<Vec<Country>>;
    async fn by_name(&self, name: &str) -> Result<Vec<Country>>;
    async fn by_code(&self, code: &str) -> Result<Country>;
}

#[async_trait]
impl<T: Catalog + Send + Sync + ?Sized> Catalog for Box<T> {
    async fn all(&self) -> Result<Vec<Country>> {
        (**self).all().await
    }

    async fn by_region(&self, region: Region) -> Result<Vec<Country>> {
        (**self).by_region(region).await
    }

    async fn by_name(&self, name: &str) -> Result<Vec<Country>> {
        (**self).by_name(name).await
    }

    async fn by_code(&self, code: &str) -> Result<Country> {
        (**self).by_code(code).await
    }
}

#[async_trait]
pub(crate) trait Auth {
    async fn register(&self, username: &str, password: &SecretString) -> Result<Credentials>;
    async fn login(&self, username: &str, password: &SecretString) -> Result<Credentials>;
}
