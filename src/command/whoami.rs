// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;

use crate::{error::Result, view};

/// Show who is logged in and which countries they have favorited.
#[derive(Debug, Parser)]
pub(crate) struct Command;

#[async_trait]
impl super::Command for Command {
    async fn execute(self, ctx: &mut super::Context) -> Result<()> {
        let snapshot = ctx.session.subscribe().borrow().clone();
        println!("{}", view::navigation(&snapshot));
        if snapshot.is_authenticated() && !snapshot.favorites.is_empty() {
            println!("Favorites: {}", snapshot.favorites.join(", "));
        }
        Ok(())
    }
}
