//! Print the OpenAPI document as JSON or YAML.

use std::io::Write;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};
use utoipa::OpenApi;
use webapi::doc::ApiDoc;

/// Output encoding of the dumped document.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

/// Export the service's OpenAPI document for external tooling.
#[derive(Debug, Parser)]
#[command(name = "openapi-dump")]
struct Cli {
    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

fn render(format: Format) -> Result<String> {
    let document = ApiDoc::openapi();
    match format {
        Format::Json => document
            .to_pretty_json()
            .wrap_err("serialise OpenAPI document as JSON"),
        Format::Yaml => document
            .to_yaml()
            .wrap_err("serialise OpenAPI document as YAML"),
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let rendered = render(cli.format)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}").wrap_err("write OpenAPI document to stdout")?;
    Ok(())
}
