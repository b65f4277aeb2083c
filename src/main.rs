// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
#![deny(elided_lifetimes_in_paths)]
#![warn(
    rust_2018_idioms,
    future_incompatible,
    unused,
    unused_lifetimes,
    unused_qualifications,
    unused_results,
    anonymous_parameters,
    deprecated_in_future,
    elided_lifetimes_in_paths,
    explicit_outlives_requirements,
    keyword_idents,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::unseparated_literal_suffix,
    clippy::decimal_literal_representation,
    clippy::single_char_lifetime_names,
    clippy::fallible_impl_from,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::wildcard_enum_match_arm,
    clippy::deref_by_slicing,
    clippy::default_numeric_fallback,
    clippy::shadow_reuse,
    clippy::clone_on_ref_ptr,
    clippy::todo,
    clippy::string_add,
    clippy::use_debug,
    clippy::future_not_send
)]
#![cfg_attr(not(test), warn(clippy::panic_in_result_fn))]

mod auth;
mod catalog;
mod client;
mod command;
mod error;
#[cfg(test)]
mod fake;
mod http;
mod metadata;
mod page;
mod password;
mod session;
mod storage;
mod view;

use std::{path::PathBuf, process, time::Duration};

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use error::Result;
use log::{error, info, warn};
use secrecy::SecretString;
use storage::IsPersistent as _;
use url::Url;

#[derive(Debug, Subcommand)]
enum Command {
    List(command::list::Command),
    Show(command::show::Command),
    Favorite(command::favorite::Command),
    Register(command::register::Command),
    Login(command::login::Command),
    Logout(command::logout::Command),
    Whoami(command::whoami::Command),
}

#[async_trait]
impl command::Command for Command {
    async fn execute(self, ctx: &mut command::Context) -> Result<()> {
        match self {
            Self::List(cmd) => cmd.execute(ctx).await,
            Self::Show(cmd) => cmd.execute(ctx).await,
            Self::Favorite(cmd) => cmd.execute(ctx).await,
            Self::Register(cmd) => cmd.execute(ctx).await,
            Self::Login(cmd) => cmd.execute(ctx).await,
            Self::Logout(cmd) => cmd.execute(ctx).await,
            Self::Whoami(cmd) => cmd.execute(ctx).await,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// The base URL of the REST Countries catalog.
    #[arg(long, env = "COUNTRIES_CATALOG_URL", default_value = catalog::DEFAULT_URL, value_parser = Url::parse)]
    catalog_url: Url,

    /// The base URL of the account backend.
    #[arg(long, env = "COUNTRIES_AUTH_URL", default_value = auth::DEFAULT_URL, value_parser = Url::parse)]
    auth_url: Url,

    /// The directory to keep the session and favorites in. Defaults to the
    /// platform's data directory.
    #[arg(long, env = "COUNTRIES_DATA_DIR", value_hint = clap::ValueHint::DirPath)]
    data_dir: Option<PathBuf>,

    /// Keep the session in memory only, forgetting it when the command ends.
    #[arg(long, conflicts_with = "data_dir")]
    no_persist: bool,

    /// How long to wait for a response from either backend, in seconds.
    #[arg(long, env = "COUNTRIES_TIMEOUT", default_value_t = 30)]
    timeout: u64,

    /// The path to the Pinentry program to use when asking for a password.
    #[arg(long, value_hint = clap::ValueHint::ExecutablePath)]
    pinentry_program: Option<PathBuf>,

    #[arg(long, env = "COUNTRIES_PASSWORD", hide = true, hide_env_values = true)]
    password: Option<String>,

    #[clap(subcommand)]
    command: Command,
}

fn get_session_storage(args: &Args) -> Box<dyn storage::Storage> {
    if !args.no_persist {
        if let Some(ref dir) = args.data_dir {
            return Box::new(storage::File::new(dir));
        }
        if let Some(file_storage) = storage::File::in_project_dirs() {
            return Box::new(file_storage);
        }
        warn!("We need to fall back to in-memory storage because there is no data directory for this platform");
    }

    Box::new(storage::Memory::new())
}

async fn run(args: Args) -> Result<()> {
    let prompt: Vec<Box<dyn password::Prompt>> = vec![
        Box::new(password::PresetPrompt::new(
            args.password.clone().map(SecretString::new),
        )),
        Box::new(args.pinentry_program.clone().map_or_else(
            password::PinentryPrompt::new,
            password::PinentryPrompt::new_with_executable,
        )),
        Box::new(password::RpasswordPrompt),
    ];

    let http = http::new_client(Duration::from_secs(args.timeout))?;
    let session = session::Session::new(get_session_storage(&args)).await;
    if !session.storage().is_persistent() {
        info!("The session will be forgotten when this command ends");
    }

    let mut ctx = command::Context {
        catalog: Box::new(catalog::Catalog::new(http.clone(), args.catalog_url)),
        auth: Box::new(auth::Auth::new(http, args.auth_url)),
        session,
        prompt: Box::new(prompt),
    };

    command::Command::execute(args.command, &mut ctx).await
}

#[tokio::main]
async fn main() {
    let logger_env = env_logger::Env::new()
        .filter_or("COUNTRIES_LOG", "warn")
        .write_style("COUNTRIES_LOG_STYLE");
    env_logger::Builder::from_env(logger_env).init();

    if let Err(e) = run(Args::parse()).await {
        error!("We encountered an error: {}", e);
        process::exit(1);
    };
}
