// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use core::num;

use async_trait::async_trait;
use clap::Parser;

use crate::{
    client::Region,
    error::{self, Result},
    page::listing::{Listing, Shown},
    view,
};

/// List countries, optionally narrowed by region, name, or your favorites.
/// Only one of those filters may be given at a time.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// Only show countries in this region.
    #[arg(long, short, value_enum, conflicts_with_all = ["search", "favorites"])]
    region: Option<Region>,

    /// Search for countries whose name contains this text. Blank text shows
    /// every country.
    #[arg(long, short, conflicts_with = "favorites")]
    search: Option<String>,

    /// Only show your favorite countries. You must be logged in.
    #[arg(long, short)]
    favorites: bool,

    /// The number of countries to show.
    #[arg(long, short)]
    count: Option<num::NonZeroUsize>,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, ctx: &mut super::Context) -> Result<()> {
        if self.favorites {
            ctx.require_authenticated()?;
        }
        let favorites = ctx.session.favorites().to_vec();

        let mut listing = Listing::new(ctx.catalog.as_ref());
        listing.load(&favorites).await;
        if !matches!(listing.shown(), Shown::Failed(_)) {
            if self.region.is_some() {
                listing.select_region(self.region).await;
            } else if let Some(ref term) = self.search {
                listing.search(term).await;
            } else if self.favorites {
                listing.toggle_favorites(&favorites).await;
            }
        }

        let shown = match listing.shown() {
            Shown::Countries(countries) => Shown::Countries(
                countries
                    .iter()
                    .take(self.count.map_or(usize::MAX, num::NonZeroUsize::get))
                    .cloned()
                    .collect(),
            ),
            other => other.clone(),
        };
        if listing.is_showing_favorites() {
            println!("Your favorite countries");
        }
        println!(
            "{}",
            view::country_list(
                &shown,
                ctx.session
                    .is_authenticated()
                    .then(|| ctx.session.favorites())
            )
        );

        match shown {
            Shown::Failed(_) => Err(error::Error::Command),
            Shown::Countries(_) | Shown::NotFound(_) => Ok(()),
        }
    }
}
