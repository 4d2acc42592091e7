//! Command-line surface of the `backoffice` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dashboard::columns::UnknownColumn;
use dashboard::config::ConfigError;
use dashboard::export::ExportError;
use dashboard::form::{UnknownField, ValidationError};
use dashboard::menu::MenuError;
use dashboard::resource::RegistryError;
use dashboard::{DispatchError, HttpError};

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("navigation menu: {0}")]
    Menu(#[from] MenuError),
    #[error("resource registry: {0}")]
    Registry(#[from] RegistryError),
    #[error("{0}")]
    Http(#[from] HttpError),
    #[error("unknown resource `{0}`; run `backoffice resources` for the list")]
    UnknownResource(String),
    #[error("{0}")]
    UnknownColumn(#[from] UnknownColumn),
    #[error("{0}")]
    UnknownField(#[from] UnknownField),
    #[error("expected --field NAME=VALUE, got `{0}`")]
    InvalidFieldArg(String),
    #[error("could not load `{0}` from the backend")]
    NotLoaded(&'static str),
    #[error("{0}")]
    Invalid(ValidationError),
    #[error("create failed: {0}")]
    Create(DispatchError),
    #[error("a create is already in flight")]
    Busy,
    #[error("export: {0}")]
    Export(#[from] ExportError),
    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "backoffice", about = "Business administration dashboard for the terminal")]
pub struct Cli {
    /// Backend API base URL; overrides the configured default.
    #[arg(long, env = "BACKOFFICE_API_BASE_URL")]
    pub base_url: Option<String>,

    /// Refetch the list after every successful create.
    #[arg(long, default_value_t = false)]
    pub reload_after_create: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the navigation menu.
    Menu,
    /// List the managed resources.
    Resources,
    /// Fetch and print a resource's table.
    List(ListArgs),
    /// Create a record from NAME=VALUE pairs.
    Create(CreateArgs),
    /// Fetch a resource and write it as CSV.
    Export(ExportArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    pub resource: String,

    /// Column key to sort by.
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending instead of ascending.
    #[arg(long, default_value_t = false, requires = "sort")]
    pub desc: bool,

    /// Column key to hide; repeatable.
    #[arg(long = "hide")]
    pub hidden: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct CreateArgs {
    pub resource: String,

    #[arg(long = "field", value_name = "NAME=VALUE")]
    pub fields: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    pub resource: String,

    /// Directory to write the CSV file into.
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
}

/// Split a `NAME=VALUE` argument. The value may itself contain `=`.
pub fn parse_field(raw: &str) -> Result<(&str, &str), CliError> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value)),
        _ => Err(CliError::InvalidFieldArg(raw.to_owned())),
    }
}
