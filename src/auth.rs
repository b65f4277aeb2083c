// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use log::debug;
use secrecy::{ExposeSecret as _, SecretString};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    client::{self, Credentials},
    error::{Error, Result},
    http,
};

pub(crate) const DEFAULT_URL: &str = "http://localhost:5000/";

#[derive(Serialize)]
struct CredentialsRequest<'req> {
    username: &'req str,
    password: &'req str,
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: Option<String>,
}

/// The account backend. Every failure, including an unreachable server, is
/// reported as [`Error::Auth`] carrying a message fit to show the user.
pub(crate) struct Auth {
    http: reqwest::Client,
    base: Url,
}

impl Auth {
    pub(crate) const fn new(http: reqwest::Client, base: Url) -> Self {
        Self { http, base }
    }

    async fn post(
        &self,
        action: &str,
        username: &str,
        password: &SecretString,
        fallback: &str,
    ) -> Result<Credentials> {
        let url = http::endpoint(&self.base, &["api", action])?;
        let sent = self
            .http
            .post(url)
            .json(&CredentialsRequest {
                username,
                password: password.expose_secret(),
            })
            .send()
            .await;

        let resp = match sent {
            Ok(resp) => resp,
            Err(e) => {
                debug!("The auth backend could not be reached: {}", e);
                return Err(Error::Auth(fallback.to_owned()));
            }
        };

        if resp.status().is_success() {
            resp.json::<Credentials>().await.map_err(|e| {
                debug!("The auth backend sent a malformed {} response: {}", action, e);
                Error::Auth(fallback.to_owned())
            })
        } else {
            let status = resp.status();
            let message = resp
                .json::<ErrorResponse>()
                .await
                .ok()
                .and_then(|body| body.message);
            debug!("The auth backend rejected {} with HTTP status {}", action, status);
            Err(Error::Auth(message.unwrap_or_else(|| fallback.to_owned())))
        }
    }
}

#[async_trait]
impl client::Auth for Auth {
    async fn register(&self, username: &str, password: &SecretString) -> Result<Credentials> {
        self.post("register", username, password, "Registration failed")
            .await
    }

    async fn login(&self, username: &str, password: &SecretString) -> Result<Credentials> {
        self.post("login", username, password, "Login failed").await
    }
}
