// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;

use crate::{
    error::{self, Result},
    page::detail,
    view,
};

/// Show everything about one country, including its neighbors.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// The three-letter code of the country, such as FRA.
    #[arg(value_parser = super::parse_country_code)]
    code: String,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, ctx: &mut super::Context) -> Result<()> {
        match detail::load(ctx.catalog.as_ref(), &self.code).await {
            Ok(detail) => {
                let favorite = ctx
                    .session
                    .is_authenticated()
                    .then(|| ctx.session.is_favorite(&detail.country.cca3));
                println!("{}", view::country_detail(&detail, favorite));
                Ok(())
            }
            Err(message) => {
                println!("Error: {message}");
                Err(error::Error::Command)
            }
        }
    }
}
