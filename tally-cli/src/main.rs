use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tally_core::{Transaction, TransactionId, TransactionStore, parse_date};
use tally_ingest::{FormEntry, add_form_entry, load_dataset, write_dataset};

mod config;
mod logging;
mod query;
mod render;
mod state;

use config::Config;
use query::Query;

#[derive(Parser, Debug)]
#[command(
    name = "tally",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TALLY_BUILD_SHA"), ")"),
    about = "Query an in-memory transaction ledger"
)]
struct Cli {
    /// Dataset JSON file (defaults to data.dataset from config)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every aggregate plus any filtered listings requested
    Report(ReportArgs),

    /// Run a single query
    Query {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        #[command(subcommand)]
        query: Query,
    },

    /// Validate a form entry, append it and show the new total
    Add(AddArgs),

    /// Write a default config to $TALLY_HOME/config.toml
    InitConfig,
}

#[derive(Args, Debug, Default)]
struct ReportArgs {
    /// Year for the dated total
    #[arg(long)]
    year: Option<i32>,
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=31))]
    day: Option<u32>,

    /// Start of the date range listing (inclusive)
    #[arg(long, requires = "to")]
    from: Option<String>,
    /// End of the date range listing (inclusive)
    #[arg(long, requires = "from")]
    to: Option<String>,

    #[arg(long)]
    merchant: Option<String>,

    #[arg(long, requires = "max", allow_hyphen_values = true)]
    min: Option<f64>,
    #[arg(long, requires = "min", allow_hyphen_values = true)]
    max: Option<f64>,

    /// List records dated strictly before this date
    #[arg(long)]
    before: Option<String>,

    /// Look up a record by id
    #[arg(long)]
    id: Option<String>,
}

#[derive(Args, Debug)]
struct AddArgs {
    #[arg(long)]
    date: String,
    #[arg(long, allow_hyphen_values = true)]
    amount: String,
    #[arg(long = "type", default_value = "debit")]
    kind: String,
    #[arg(long)]
    description: String,
    #[arg(long)]
    merchant: Option<String>,
    #[arg(long)]
    card: Option<String>,

    /// Write the dataset back after appending
    #[arg(long)]
    save: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    logging::init_tracing(&cfg.log_filter);

    let data_path = || cli.data.clone().unwrap_or_else(|| cfg.data.dataset.clone());

    match cli.command {
        Command::Report(ref args) => {
            let store = load_store(&data_path())?;
            print!("{}", report(&store, args, &cfg)?);
        }

        Command::Query { json, ref query } => {
            let store = load_store(&data_path())?;
            let answer = query.run(&store)?;
            if json {
                println!("{}", answer.to_json()?);
            } else {
                print!("{}", answer.render(&cfg.display));
            }
        }

        Command::Add(ref args) => {
            print!("{}", add_to_dataset(&data_path(), args, &cfg)?);
        }

        Command::InitConfig => {
            config::init_config()?;
        }
    }

    Ok(())
}

fn load_store(path: &Path) -> Result<TransactionStore> {
    if !path.exists() {
        bail!("Dataset not found: {} (pass --data <path>)", path.display());
    }
    load_dataset(path).with_context(|| format!("loading {}", path.display()))
}

/// Ids typed on the command line are text; fall back to a numeric id when the
/// dataset uses JSON integers.
pub(crate) fn lookup<'a>(store: &'a TransactionStore, raw: &str) -> Option<&'a Transaction> {
    store.find_by_id(&TransactionId::from(raw)).or_else(|| {
        raw.trim()
            .parse::<i64>()
            .ok()
            .and_then(|n| store.find_by_id(&TransactionId::Number(n)))
    })
}

fn report(store: &TransactionStore, args: &ReportArgs, cfg: &Config) -> Result<String> {
    let display = &cfg.display;
    let mut out = String::new();

    writeln!(out, "# Ledger report ({} transactions)\n", store.len())?;

    let types: Vec<&str> = store.unique_types().into_iter().collect();
    writeln!(out, "Unique types: {}", types.join(", "))?;
    writeln!(out, "Total amount: {}", render::amount(store.total_amount(), display))?;

    if args.year.is_some() || args.month.is_some() || args.day.is_some() {
        let total = store.total_amount_by_date(args.year, args.month, args.day);
        writeln!(
            out,
            "Total for {}-{}-{}: {}",
            args.year.map_or("*".to_string(), |y| y.to_string()),
            args.month.map_or("*".to_string(), |m| format!("{m:02}")),
            args.day.map_or("*".to_string(), |d| format!("{d:02}")),
            render::amount(total, display)
        )?;
    }

    match store.average_amount() {
        Some(avg) => writeln!(out, "Average amount: {}", render::amount(avg, display))?,
        None => writeln!(out, "Average amount: n/a (no transactions)")?,
    }
    writeln!(
        out,
        "Total debit amount: {}",
        render::amount(store.total_debit_amount(), display)
    )?;
    writeln!(out, "Busiest month: {}", store.most_frequent_month())?;
    writeln!(out, "Busiest debit month: {}", store.most_frequent_debit_month().name())?;
    writeln!(out, "Dominant type: {}\n", store.dominant_type())?;

    out.push_str(&render::listing(
        "Debit transactions",
        &store.by_type(tally_core::DEBIT),
        display,
    ));

    if let (Some(from), Some(to)) = (&args.from, &args.to) {
        let start = parse_date(from).context("--from")?;
        let end = parse_date(to).context("--to")?;
        let title = format!("Between {from} and {to}");
        out.push_str(&render::listing(&title, &store.in_date_range(start, end), display));
    }

    if let Some(name) = &args.merchant {
        let title = format!("Merchant {name}");
        out.push_str(&render::listing(&title, &store.by_merchant(name), display));
    }

    if let (Some(min), Some(max)) = (args.min, args.max) {
        let title = format!("Amounts {min} to {max}");
        out.push_str(&render::listing(&title, &store.by_amount_range(min, max), display));
    }

    if let Some(raw) = &args.before {
        let date = parse_date(raw).context("--before")?;
        let title = format!("Before {raw}");
        out.push_str(&render::listing(&title, &store.before(date), display));
    }

    if let Some(raw) = &args.id {
        writeln!(out, "## Transaction {raw}")?;
        match lookup(store, raw) {
            Some(t) => writeln!(out, "{}", render::detail(t, display))?,
            None => writeln!(out, "(not found)")?,
        }
    }

    writeln!(out, "\n## Descriptions")?;
    for d in store.descriptions() {
        writeln!(out, "- {d}")?;
    }

    Ok(out)
}

/// Append a form entry to the dataset at `path` (empty if the file is
/// missing), writing it back when `--save` is set. Returns the lines to print.
fn add_to_dataset(path: &Path, args: &AddArgs, cfg: &Config) -> Result<String> {
    let mut store = if path.exists() {
        load_dataset(path).with_context(|| format!("loading {}", path.display()))?
    } else {
        tracing::info!(path = %path.display(), "no dataset yet, starting empty");
        TransactionStore::new()
    };

    let mut out = add_entry(&mut store, args, cfg)?;
    if args.save {
        write_dataset(path, store.all())?;
        writeln!(out, "Saved {} records to {}", store.len(), path.display())?;
    }
    Ok(out)
}

fn add_entry(store: &mut TransactionStore, args: &AddArgs, cfg: &Config) -> Result<String> {
    let entry = FormEntry {
        date: args.date.clone(),
        amount: args.amount.clone(),
        kind: args.kind.clone(),
        description: args.description.clone(),
        merchant_name: args.merchant.clone(),
        card_type: args.card.clone(),
    };

    let added = add_form_entry(store, &entry).context("invalid entry")?;
    let mut out = format!(
        "Added [{}] {}\n",
        render::sign_class(added),
        render::row(added, &cfg.display)
    );
    writeln!(out, "Total: {}", render::amount(store.total_amount(), &cfg.display))?;
    Ok(out)
}
