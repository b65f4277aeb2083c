// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use log::error;
use secrecy::SecretString;

use crate::{
    client::{Auth, Catalog},
    error::{self, Result},
    password::{self, Prompt},
    session::Session,
    storage::Storage,
};

pub(crate) mod favorite;
pub(crate) mod list;
pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod register;
pub(crate) mod show;
pub(crate) mod whoami;

/// Everything a command may touch.
pub(crate) struct Context {
    pub(crate) catalog: Box<dyn Catalog + Send + Sync>,
    pub(crate) auth: Box<dyn Auth + Send + Sync>,
    pub(crate) session: Session<Box<dyn Storage>>,
    pub(crate) prompt: Box<dyn Prompt>,
}

impl Context {
    /// Stops commands that only make sense for a logged-in user.
    pub(crate) fn require_authenticated(&self) -> Result<()> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            error!("You need to log in first; try the login or register command");
            Err(error::Error::NotAuthenticated)
        }
    }

    pub(crate) async fn password(&self, username: &str) -> Result<SecretString> {
        self.prompt
            .prompt(password::Request::new(username))
            .await?
            .ok_or_else(|| error::Password::NoPrompt.into())
    }
}

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, ctx: &mut Context) -> Result<()>;
}

/// Parses a three-letter country code, ignoring case and surrounding space.
pub(crate) fn parse_country_code(value: &str) -> Result<String, String> {
    let code = value.trim();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code.to_ascii_uppercase())
    } else {
        Err(format!("{value:?} is not a three-letter country code"))
    }
}
