// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;

use crate::{error::Result, view};

/// Create an account and log in to it. The password is read from
/// COUNTRIES_PASSWORD, Pinentry, or the terminal.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// The name of the new account.
    #[clap()]
    username: String,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, ctx: &mut super::Context) -> Result<()> {
        let password = ctx.password(&self.username).await?;
        ctx.session
            .register(ctx.auth.as_ref(), &self.username, &password)
            .await?;

        println!("{}", view::navigation(&ctx.session.subscribe().borrow()));
        Ok(())
    }
}
