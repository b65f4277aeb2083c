// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

mod file;
mod memory;

use async_trait::async_trait;
use log::warn;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;

pub(crate) use file::File;
pub(crate) use memory::Memory;

pub(crate) trait IsPersistent {
    fn is_persistent(&self) -> bool;
}

impl<T: IsPersistent + ?Sized> IsPersistent for Box<T> {
    fn is_persistent(&self) -> bool {
        (**self).is_persistent()
    }
}

/// A string-valued key-value store. Writes are last-write-wins and there are
/// no transactions.
#[async_trait]
pub(crate) trait Storage: Send + Sync + IsPersistent {
    async fn get(&mut self, key: &str) -> Result<Option<String>>;
    async fn set(&mut self, key: &str, value: &str) -> Result<()>;
    /// Removing a key that is not present succeeds.
    async fn delete(&mut self, key: &str) -> Result<()>;
}

#[async_trait]
impl<T: Storage + ?Sized> Storage for Box<T> {
    async fn get(&mut self, key: &str) -> Result<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value).await
    }

    async fn delete(&mut self, key: &str) -> Result<()> {
        (**self).delete(key).await
    }
}

/// Reads and decodes the JSON value stored under `key`. Anything that cannot
/// be read back is treated as if nothing had been stored.
pub(crate) async fn load<T, S>(storage: &mut S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: Storage + ?Sized,
{
    let raw = match storage.get(key).await {
        Ok(raw) => raw?,
        Err(e) => {
            warn!("Ignoring stored value for {:?} because we could not read it: {}", key, e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring stored value for {:?} because it is corrupt: {}", key, e);
            None
        }
    }
}

pub(crate) async fn save<T, S>(storage: &mut S, key: &str, value: &T) -> Result<()>
where
    T: Serialize + Sync + ?Sized,
    S: Storage + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    storage.set(key, &raw).await
}
