// src/cli.rs
use std::{collections::HashSet, path::PathBuf, sync::Arc, time::Duration};

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{WrapErr, eyre};

use crate::{
    config::{
        consts::*,
        options::{ScrapeOptions, ServeOptions},
    },
    core::HttpSource,
    file,
    model::DossierSpec,
    progress::LogProgress,
    query::{Catalog, QueryService},
    scrape,
};

/// Batch tooling: scrape dossier pages, merge the results, inspect a dataset.
#[derive(Debug, Parser)]
#[command(name = "cli", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scrape each dossier in the list; one JSON file per dossier with activities.
    Scrape(ScrapeArgs),
    /// Concatenate per-dossier files into one dataset file.
    Merge(MergeArgs),
    /// Load a dataset file and print a summary as JSON.
    Summary(SummaryArgs),
}

#[derive(Debug, Args)]
pub struct ScrapeArgs {
    /// JSON array of dossier ids or dossier objects.
    #[arg(long, default_value = DEFAULT_DOSSIER_LIST)]
    pub list: PathBuf,
    /// Comma-separated ids or ranges (`7800-7805,8001`); replaces `--list`.
    #[arg(long)]
    pub ids: Option<String>,
    #[arg(long, default_value = DEFAULT_SCRAPE_DIR)]
    pub out_dir: PathBuf,
    #[arg(long, default_value = SITE_ORIGIN)]
    pub origin: String,
    #[arg(long, default_value_t = REQUEST_TIMEOUT_SECS)]
    pub timeout_secs: u64,
    #[arg(long, default_value_t = REQUEST_PAUSE_MS)]
    pub pause_ms: u64,
}

impl ScrapeArgs {
    pub fn options(&self) -> ScrapeOptions {
        ScrapeOptions {
            origin: self.origin.clone(),
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
            pause: Duration::from_millis(self.pause_ms),
            out_dir: self.out_dir.clone(),
        }
    }
}

#[derive(Debug, Args)]
pub struct MergeArgs {
    /// Directory holding `<dossier id>.json` files.
    #[arg(long, default_value = DEFAULT_SCRAPE_DIR)]
    pub dir: PathBuf,
    /// Take files in this list's order instead of by file name.
    #[arg(long)]
    pub list: Option<PathBuf>,
    #[arg(long, short = 'o', env = ACTIVITY_FILE_ENV, default_value = DEFAULT_ACTIVITY_FILE)]
    pub out: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SummaryKind {
    Categories,
    Dossiers,
}

#[derive(Debug, Args)]
pub struct SummaryArgs {
    #[arg(long, env = ACTIVITY_FILE_ENV, default_value = DEFAULT_ACTIVITY_FILE)]
    pub activity_file: PathBuf,
    #[arg(long, value_enum, default_value_t = SummaryKind::Categories)]
    pub by: SummaryKind,
    #[arg(long, env = PUBLIC_BASE_ENV, default_value = DEFAULT_PUBLIC_BASE)]
    pub public_base: String,
}

/// Read API settings (the `chd_activities` binary).
#[derive(Debug, Parser)]
#[command(name = "chd_activities", version, about = "Read API over a scraped activity dataset")]
pub struct ServeArgs {
    #[arg(long, env = ACTIVITY_FILE_ENV, default_value = DEFAULT_ACTIVITY_FILE)]
    pub activity_file: PathBuf,
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen: String,
    #[arg(long, env = PUBLIC_BASE_ENV, default_value = DEFAULT_PUBLIC_BASE)]
    pub public_base: String,
}

impl From<ServeArgs> for ServeOptions {
    fn from(a: ServeArgs) -> Self {
        Self { activity_file: a.activity_file, listen: a.listen, public_base: a.public_base }
    }
}

pub fn run(cli: Cli) -> color_eyre::Result<()> {
    match cli.command {
        Command::Scrape(args) => run_scrape(&args),
        Command::Merge(args) => run_merge(&args),
        Command::Summary(args) => run_summary(&args),
    }
}

fn run_scrape(args: &ScrapeArgs) -> color_eyre::Result<()> {
    let specs = match &args.ids {
        Some(ids) => parse_ids_list(ids)?.into_iter().map(DossierSpec::bare).collect(),
        None => scrape::load_dossier_list(&args.list)?,
    };
    if specs.is_empty() {
        tracing::warn!("no dossiers to scrape");
        return Ok(());
    }

    let opts = args.options();
    let source = HttpSource::new(&opts).wrap_err("cannot build HTTP client")?;
    let mut progress = LogProgress::default();
    let summary = scrape::run_batch(&source, &specs, &opts, Some(&mut progress));

    tracing::info!(
        written = summary.written.len(),
        empty = summary.empty.len(),
        failed = summary.failed.len(),
        out_dir = %opts.out_dir.display(),
        "scrape done"
    );
    Ok(())
}

fn run_merge(args: &MergeArgs) -> color_eyre::Result<()> {
    let order = args.list.as_deref().map(scrape::load_dossier_list).transpose()?;
    let summary = file::merge_dossier_files(&args.dir, order.as_deref(), &args.out)?;
    if !summary.missing.is_empty() {
        tracing::info!(missing = summary.missing.len(), "listed dossiers without a file");
    }
    tracing::info!(files = summary.files, rows = summary.entries, out = %args.out.display(), "merged");
    Ok(())
}

fn run_summary(args: &SummaryArgs) -> color_eyre::Result<()> {
    let catalog = Catalog::open(&args.activity_file)?;
    let svc = QueryService::new(Arc::new(catalog), &args.public_base);
    let json = match args.by {
        SummaryKind::Categories => serde_json::to_string_pretty(&svc.category_summary())?,
        SummaryKind::Dossiers => serde_json::to_string_pretty(&svc.dossier_summary())?,
    };
    println!("{json}");
    Ok(())
}

/// `7800-7802, 8001,abc` → `["7800", "7801", "7802", "8001", "abc"]`.
/// Numeric ranges expand; other tokens are taken verbatim. First occurrence
/// wins, order is kept. A range wider than `MAX_ID_RANGE` is an error.
pub fn parse_ids_list(s: &str) -> color_eyre::Result<Vec<String>> {
    let mut out: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut push = |id: String| {
        if seen.insert(id.clone()) {
            out.push(id);
        }
    };

    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() { continue; }

        let range = part
            .split_once('-')
            .and_then(|(a, b)| Some((a.trim().parse::<u64>().ok()?, b.trim().parse::<u64>().ok()?)));
        match range {
            Some((a, b)) if a > b => return Err(eyre!("Invalid range: {part}")),
            Some((a, b)) if b - a >= MAX_ID_RANGE => {
                return Err(eyre!("Range too wide: {part} (at most {MAX_ID_RANGE} ids)"));
            }
            Some((a, b)) => (a..=b).for_each(|v| push(v.to_string())),
            None => push(s!(part)),
        }
    }
    Ok(out)
}
