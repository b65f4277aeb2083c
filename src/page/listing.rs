// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use log::{info, warn};

use crate::client::{Catalog, Country, Region};

pub(crate) const FETCH_ALL_FAILED: &str = "Failed to fetch countries. Please try again later.";
pub(crate) const SEARCH_NOT_FOUND: &str = "No countries found with that name.";
pub(crate) const SEARCH_FAILED: &str = "Failed to search countries. Please try again later.";

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Shown {
    Countries(Vec<Country>),
    /// Nothing matched; not a failure of the catalog.
    NotFound(String),
    /// The catalog could not be reached or answered badly.
    Failed(String),
}

/// The country listing: every country, narrowed by the most recent region
/// filter, search, or favorites view.
pub(crate) struct Listing<'catalog, C: Catalog + Sync + ?Sized> {
    catalog: &'catalog C,
    countries: Vec<Country>,
    region: Option<Region>,
    search: String,
    favorites_only: bool,
    shown: Shown,
}

impl<'catalog, C: Catalog + Sync + ?Sized> Listing<'catalog, C> {
    pub(crate) const fn new(catalog: &'catalog C) -> Self {
        Self {
            catalog,
            countries: Vec::new(),
            region: None,
            search: String::new(),
            favorites_only: false,
            shown: Shown::Countries(Vec::new()),
        }
    }

    pub(crate) const fn shown(&self) -> &Shown {
        &self.shown
    }

    pub(crate) const fn is_showing_favorites(&self) -> bool {
        self.favorites_only
    }

    pub(crate) async fn load(&mut self, favorites: &[String]) {
        info!("Loading countries...");
        match self.catalog.all().await {
            Ok(countries) => self.set_countries(countries, favorites),
            Err(e) => {
                warn!("Could not load the country list: {}", e);
                self.shown = Shown::Failed(FETCH_ALL_FAILED.to_owned());
            }
        }
    }

    /// Replaces the full country list and shows it again through whichever
    /// view is active.
    pub(crate) fn set_countries(&mut self, countries: Vec<Country>, favorites: &[String]) {
        self.countries = countries;
        if self.favorites_only {
            self.shown = Shown::Countries(self.only_favorites(favorites));
        } else if self.region.is_none() && self.search.trim().is_empty() {
            self.shown = Shown::Countries(self.countries.clone());
        }
    }

    /// Narrows to a region, or shows everything for `None`.
    pub(crate) async fn select_region(&mut self, region: Option<Region>) {
        self.region = region;
        self.favorites_only = false;

        let Some(region) = region else {
            self.shown = Shown::Countries(self.countries.clone());
            return;
        };

        self.shown = match self.catalog.by_region(region).await {
            Ok(countries) => Shown::Countries(countries),
            Err(e) => {
                warn!("Could not load countries in {}: {}", region, e);
                Shown::Failed(format!(
                    "Failed to fetch countries in {region}. Please try again later."
                ))
            }
        };
    }

    /// Looks countries up by name. A blank term shows every country.
    pub(crate) async fn search(&mut self, term: &str) {
        term.clone_into(&mut self.search);
        self.favorites_only = false;

        let term = term.trim();
        if term.is_empty() {
            self.shown = Shown::Countries(self.countries.clone());
            return;
        }

        self.shown = match self.catalog.by_name(term).await {
            Ok(countries) => Shown::Countries(countries),
            Err(e) if e.is_not_found() => Shown::NotFound(SEARCH_NOT_FOUND.to_owned()),
            Err(e) => {
                warn!("Could not search for {:?}: {}", term, e);
                Shown::Failed(SEARCH_FAILED.to_owned())
            }
        };
    }

    /// Switches between the favorites view and whatever was shown before it.
    pub(crate) async fn toggle_favorites(&mut self, favorites: &[String]) {
        if self.favorites_only {
            self.favorites_only = false;
            if self.region.is_some() {
                self.select_region(self.region).await;
            } else if !self.search.is_empty() {
                let search = self.search.clone();
                self.search(&search).await;
            } else {
                self.shown = Shown::Countries(self.countries.clone());
            }
        } else {
            self.shown = Shown::Countries(self.only_favorites(favorites));
            self.favorites_only = true;
        }
    }

    fn only_favorites(&self, favorites: &[String]) -> Vec<Country> {
        self.countries
            .iter()
            .filter(|country| favorites.contains(&country.cca3))
            .cloned()
            .collect()
    }
}
