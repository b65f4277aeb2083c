// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use futures_util::future;
use log::{info, warn};

use crate::{
    client::{Catalog, Country},
    error::Result,
};

pub(crate) const FETCH_FAILED: &str = "Failed to fetch country details. Please try again later.";

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Detail {
    pub(crate) country: Country,
    pub(crate) borders: Vec<Country>,
}

/// Fetches a country and all of its neighbors. The neighbors are looked up
/// concurrently and the whole fetch fails if any one of them does.
pub(crate) async fn fetch<C: Catalog + Sync + ?Sized>(catalog: &C, code: &str) -> Result<Detail> {
    let country = catalog.by_code(code).await?;
    let borders =
        future::try_join_all(country.borders.iter().map(|border| catalog.by_code(border)))
            .await?;

    Ok(Detail { country, borders })
}

/// Loads the detail page. A missing country and a failed neighbor lookup
/// produce the same message; the log says which one it was.
pub(crate) async fn load<C: Catalog + Sync + ?Sized>(
    catalog: &C,
    code: &str,
) -> Result<Detail, String> {
    info!("Loading country details for {}...", code);
    fetch(catalog, code).await.map_err(|e| {
        if e.is_not_found() {
            warn!("Country {} or one of its neighbors does not exist: {}", code, e);
        } else {
            warn!("Could not fetch details for {}: {}", code, e);
        }
        FETCH_FAILED.to_owned()
    })
}
