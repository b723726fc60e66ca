// src/bin/server.rs
use std::sync::Arc;

use chd_activities::{
    cli::ServeArgs,
    config::options::ServeOptions,
    query::{Catalog, QueryService},
    server,
};
use clap::Parser;
use color_eyre::eyre::WrapErr;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    chd_activities::log::init();

    let opts: ServeOptions = ServeArgs::parse().into();

    // Load and index before binding: no request can see a partial dataset.
    let catalog = Catalog::open(&opts.activity_file)
        .wrap_err("refusing to start without a dataset")?;
    let service = QueryService::new(Arc::new(catalog), &opts.public_base);

    server::serve(service, &opts.listen)
        .await
        .wrap_err_with(|| format!("server on {} failed", opts.listen))
}
