// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! Terminal renderings of countries and the session.

use tabled::{settings::Style, Table, Tabled};

use crate::{
    client::Country,
    page::{detail::Detail, listing::Shown},
    session::Snapshot,
};

const NOT_AVAILABLE: &str = "N/A";

/// Groups the integer digits of a number in threes, keeping any fraction.
pub(crate) fn format_number(number: &str) -> String {
    let (integer, fraction) = number
        .split_once('.')
        .map_or((number, None), |(integer, fraction)| (integer, Some(fraction)));

    let digits = integer.chars().collect::<Vec<_>>();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 && digit.is_ascii_digit() {
            grouped.push(',');
        }
        grouped.push(*digit);
    }

    match fraction {
        Some(fraction) => format!("{grouped}.{fraction}"),
        None => grouped,
    }
}

fn join_or_na(values: Option<&Vec<String>>) -> String {
    match values {
        Some(values) if !values.is_empty() => values.join(", "),
        _ => NOT_AVAILABLE.to_owned(),
    }
}

fn currencies(country: &Country) -> String {
    match country.currencies.as_ref() {
        Some(currencies) if !currencies.is_empty() => currencies
            .values()
            .map(|currency| {
                format!(
                    "{} ({})",
                    currency.name,
                    currency.symbol.as_deref().unwrap_or(NOT_AVAILABLE)
                )
            })
            .collect::<Vec<_>>()
            .join(", "),
        _ => NOT_AVAILABLE.to_owned(),
    }
}

fn languages(country: &Country) -> String {
    match country.languages.as_ref() {
        Some(languages) if !languages.is_empty() => {
            languages.values().cloned().collect::<Vec<_>>().join(", ")
        }
        _ => NOT_AVAILABLE.to_owned(),
    }
}

#[derive(Clone, Debug, Tabled)]
pub(crate) struct CountryCard {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Population")]
    population: String,
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "Capital")]
    capital: String,
}

impl From<&Country> for CountryCard {
    fn from(country: &Country) -> Self {
        Self {
            code: country.cca3.clone(),
            name: country.name.common.clone(),
            population: format_number(&country.population.to_string()),
            region: country.region.clone(),
            capital: join_or_na(country.capital.as_ref()),
        }
    }
}

#[derive(Clone, Debug, Tabled)]
pub(crate) struct FavoriteCountryCard {
    #[tabled(inline)]
    card: CountryCard,
    #[tabled(rename = "Favorite", display_with = "Self::format_favorite")]
    favorite: bool,
}

impl FavoriteCountryCard {
    fn format_favorite(favorite: &bool) -> String {
        if *favorite { "★" } else { "" }.to_owned()
    }
}

/// Renders the country list. `favorites` is only given for an authenticated
/// user, in which case each card also says whether it is a favorite.
pub(crate) fn country_list(shown: &Shown, favorites: Option<&[String]>) -> String {
    match shown {
        Shown::Failed(message) => format!("Error: {message}"),
        Shown::NotFound(message) => message.clone(),
        Shown::Countries(countries) if countries.is_empty() => "No countries found.".to_owned(),
        Shown::Countries(countries) => match favorites {
            Some(favorites) => Table::new(countries.iter().map(|country| FavoriteCountryCard {
                card: country.into(),
                favorite: favorites.contains(&country.cca3),
            }))
            .with(Style::rounded())
            .to_string(),
            None => Table::new(countries.iter().map(CountryCard::from))
                .with(Style::rounded())
                .to_string(),
        },
    }
}

#[derive(Clone, Debug, Tabled)]
struct Fact {
    #[tabled(rename = "Fact")]
    label: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Clone, Debug, Tabled)]
struct BorderLink {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Flag")]
    flag: String,
}

fn facts(country: &Country) -> Vec<Fact> {
    let mut facts = vec![
        Fact {
            label: "Population",
            value: format_number(&country.population.to_string()),
        },
        Fact {
            label: "Region",
            value: country.region.clone(),
        },
        Fact {
            label: "Sub Region",
            value: country
                .subregion
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
        },
        Fact {
            label: "Capital",
            value: join_or_na(country.capital.as_ref()),
        },
        Fact {
            label: "Top Level Domain",
            value: join_or_na(country.tld.as_ref()),
        },
        Fact {
            label: "Currencies",
            value: currencies(country),
        },
        Fact {
            label: "Languages",
            value: languages(country),
        },
    ];
    if let Some(area) = country.area.filter(|area| *area > 0.0) {
        facts.push(Fact {
            label: "Area",
            value: format!("{} km²", format_number(&area.to_string())),
        });
    }
    facts
}

/// Renders the detail page. `favorite` is only given for an authenticated
/// user.
pub(crate) fn country_detail(detail: &Detail, favorite: Option<bool>) -> String {
    let country = &detail.country;
    let mut lines = vec![match favorite {
        Some(true) => format!("{} (Favorited)", country.name.common),
        Some(false) => format!("{} (Not a favorite)", country.name.common),
        None => country.name.common.clone(),
    }];

    if !country.name.official.is_empty() && country.name.official != country.name.common {
        lines.push(format!("Official name: {}", country.name.official));
    }
    if let Some(native) = country.name.native_name.values().next() {
        lines.push(format!("Native name: {}", native.common));
    }
    let flag = if country.flags.svg.is_empty() {
        &country.flags.png
    } else {
        &country.flags.svg
    };
    match (flag.is_empty(), country.flags.alt.as_deref()) {
        (true, _) => {}
        (false, Some(alt)) => lines.push(format!("Flag: {flag} ({alt})")),
        (false, None) => lines.push(format!("Flag: {flag}")),
    }

    lines.push(String::new());
    lines.push("Quick Facts".to_owned());
    lines.push(Table::new(facts(country)).with(Style::rounded()).to_string());

    if !detail.borders.is_empty() {
        lines.push(String::new());
        lines.push("Border Countries".to_owned());
        lines.push(
            Table::new(detail.borders.iter().map(|border| BorderLink {
                code: border.cca3.clone(),
                name: border.name.common.clone(),
                flag: border.flags.png.clone(),
            }))
            .with(Style::rounded())
            .to_string(),
        );
    }

    lines.join("\n")
}

/// The one-line banner naming who is logged in.
pub(crate) fn navigation(snapshot: &Snapshot) -> String {
    match snapshot.username {
        Some(ref username) => format!("Welcome, {username}"),
        None => "Not logged in".to_owned(),
    }
}
