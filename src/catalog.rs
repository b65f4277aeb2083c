// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use log::debug;
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Deserialize};
use url::Url;

use crate::{
    client::{self, Country, Region},
    error::{self, Result},
    http,
};

pub(crate) const DEFAULT_URL: &str = "https://restcountries.com/v3.1/";

// The listing endpoints refuse to answer without a field selection.
const LISTING_FIELDS: &str = "name,cca3,flags,population,region,capital";

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<Country>),
    One(Box<Country>),
}

/// A REST Countries catalog reachable over HTTP.
pub(crate) struct Catalog {
    http: reqwest::Client,
    base: Url,
}

impl Catalog {
    pub(crate) const fn new(http: reqwest::Client, base: Url) -> Self {
        Self { http, base }
    }

    fn listing(&self, segments: &[&str]) -> Result<Url> {
        let mut url = http::endpoint(&self.base, segments)?;
        url.set_query(Some(&format!("fields={LISTING_FIELDS}")));
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url, lookup: &str) -> Result<T> {
        debug!("Fetching {}", url);
        let resp = self.http.get(url).send().await?;
        match resp.status() {
            StatusCode::NOT_FOUND => Err(error::Catalog::NotFound(lookup.to_owned()).into()),
            status if !status.is_success() => Err(error::Catalog::Status(status).into()),
            _ => Ok(resp.json().await?),
        }
    }
}

#[async_trait]
impl client::Catalog for Catalog {
    async fn all(&self) -> Result<Vec<Country>> {
        self.fetch(self.listing(&["all"])?, "all countries").await
    }

    async fn by_region(&self, region: Region) -> Result<Vec<Country>> {
        let name = region.name();
        self.fetch(self.listing(&["region", &name])?, &name).await
    }

    async fn by_name(&self, name: &str) -> Result<Vec<Country>> {
        let countries: Vec<Country> = self.fetch(self.listing(&["name", name])?, name).await?;
        if countries.is_empty() {
            return Err(error::Catalog::NotFound(name.to_owned()).into());
        }
        Ok(countries)
    }

    async fn by_code(&self, code: &str) -> Result<Country> {
        match self
            .fetch::<OneOrMany>(http::endpoint(&self.base, &["alpha", code])?, code)
            .await?
        {
            OneOrMany::One(country) => Ok(*country),
            OneOrMany::Many(countries) => countries
                .into_iter()
                .next()
                .ok_or_else(|| error::Catalog::NotFound(code.to_owned()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    use crate::client::Catalog as _;

    use super::*;

    async fn catalog(server: &MockServer) -> Result<Catalog> {
        Ok(Catalog::new(
            http::new_client(std::time::Duration::from_secs(5))?,
            Url::parse(&server.uri())?,
        ))
    }

    fn country(code: &str, name: &str) -> serde_json::Value {
        json!({
            "cca3": code,
            "name": {"common": name, "official": name, "nativeName": {}},
            "flags": {"png": format!("https://flags.example/{code}.png"), "svg": ""},
            "population": 1000,
            "region": "Americas",
        })
    }

    #[tokio::test]
    async fn all_requests_listing_fields() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/all"))
            .and(query_param("fields", LISTING_FIELDS))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                country("USA", "United States"),
                country("CAN", "Canada"),
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let countries = catalog(&server).await?.all().await?;
        assert_eq!(
            countries.iter().map(|c| c.cca3.as_str()).collect::<Vec<_>>(),
            ["USA", "CAN"],
        );
        Ok(())
    }

    #[tokio::test]
    async fn by_region_uses_catalog_spelling() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/region/Americas"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([country("MEX", "Mexico")])),
            )
            .mount(&server)
            .await;

        let countries = catalog(&server).await?.by_region(Region::Americas).await?;
        assert_eq!(countries.len(), 1);
        assert_eq!(countries[0].name.common, "Mexico");
        Ok(())
    }

    #[tokio::test]
    async fn by_name_not_found() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/name/atlantis"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"status": 404, "message": "Not Found"})),
            )
            .mount(&server)
            .await;

        let err = catalog(&server).await?.by_name("atlantis").await;
        assert!(matches!(err, Err(ref e) if e.is_not_found()));
        Ok(())
    }

    #[tokio::test]
    async fn by_name_server_error_is_not_not_found() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/name/canada"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = catalog(&server).await?.by_name("canada").await;
        assert!(matches!(
            err,
            Err(error::Error::Catalog(error::Catalog::Status(StatusCode::SERVICE_UNAVAILABLE)))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn malformed_body_is_a_transport_error() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/all"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = catalog(&server).await?.all().await;
        assert!(matches!(err, Err(error::Error::Http(_))));
        Ok(())
    }

    #[tokio::test]
    async fn by_code_accepts_array_and_object() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/alpha/FRA"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([country("FRA", "France")])),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/alpha/BEL"))
            .respond_with(ResponseTemplate::new(200).set_body_json(country("BEL", "Belgium")))
            .mount(&server)
            .await;

        let catalog = catalog(&server).await?;
        assert_eq!(catalog.by_code("FRA").await?.name.common, "France");
        assert_eq!(catalog.by_code("BEL").await?.name.common, "Belgium");
        Ok(())
    }

    #[tokio::test]
    async fn by_code_empty_array_is_not_found() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/alpha/ZZZ"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let err = catalog(&server).await?.by_code("ZZZ").await;
        assert!(matches!(err, Err(ref e) if e.is_not_found()));
        Ok(())
    }
}
