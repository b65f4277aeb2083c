// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use url::Url;

use crate::{
    error::{Error, Result},
    metadata,
};

pub(crate) fn new_client(timeout: Duration) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .user_agent(format!(
            "{}/{}",
            *metadata::CLIENT_NAME,
            env!("CARGO_PKG_VERSION")
        ))
        .timeout(timeout)
        .build()?)
}

/// Appends path segments to `base`, percent-encoding each one. A trailing
/// slash on `base` is not treated as an empty segment.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|()| Error::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?;
        let _ = path.pop_if_empty().extend(segments);
    }
    Ok(url)
}
