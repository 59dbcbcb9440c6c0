//! Docsmith CLI — metadata-driven documentation generator.
//!
//! Parses bibliographic element metadata (CSV, RDF/XML, Turtle), asks a
//! generation service to draft documentation for each element against an
//! uploaded reference document, and writes templated MDX files.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    // Credentials may live in a local .env file.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
