// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;

use crate::error::Result;

/// Add a country to your favorites, or remove it if it already is one. You
/// must be logged in.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// The three-letter code of the country, such as FRA.
    #[arg(value_parser = super::parse_country_code)]
    code: String,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, ctx: &mut super::Context) -> Result<()> {
        ctx.require_authenticated()?;

        if ctx.session.toggle_favorite(&self.code).await? {
            println!("Added {} to your favorites", self.code);
        } else {
            println!("Removed {} from your favorites", self.code);
        }
        Ok(())
    }
}
