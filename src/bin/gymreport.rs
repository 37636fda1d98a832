use std::path::PathBuf;

use clap::Parser;

use gymreport::input::{load_collections, load_records};
use gymreport::{build_report, Collections, DateRange, ReportParams, SectionSelection};

#[derive(Parser)]
#[command(name = "gymreport", about = "Gym chain reporting CLI")]
struct Cli {
    /// Report window: YYYY-MM-DD..YYYY-MM-DD, YYYY-MM-DD, YYYY-MM, or Nd
    #[arg(long)]
    range: String,

    /// Second window to compare against, same formats as --range
    #[arg(long)]
    compare: Option<String>,

    /// Single JSON file with all collections keyed by name
    #[arg(long, conflicts_with_all = [
        "members", "subscriptions", "payments", "check_ins", "schedules", "packages",
    ])]
    data: Option<PathBuf>,

    /// JSON file with an array of member records
    #[arg(long)]
    members: Option<PathBuf>,

    /// JSON file with an array of subscription records
    #[arg(long)]
    subscriptions: Option<PathBuf>,

    /// JSON file with an array of payment records
    #[arg(long)]
    payments: Option<PathBuf>,

    /// JSON file with an array of check-in records
    #[arg(long)]
    check_ins: Option<PathBuf>,

    /// JSON file with an array of schedule records
    #[arg(long)]
    schedules: Option<PathBuf>,

    /// JSON file with an array of package records
    #[arg(long)]
    packages: Option<PathBuf>,

    /// Comma-separated sections: members, revenue, attendance, sessions, packages
    #[arg(long)]
    sections: Option<String>,

    /// How many entries Top-N rankings keep
    #[arg(long, default_value = "10")]
    top: usize,

    /// Keep section titles exactly as composed (skip tab-name sanitizing)
    #[arg(long)]
    raw_titles: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_selection(list: &str) -> anyhow::Result<SectionSelection> {
    let mut selection = SectionSelection::none();
    for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match name {
            "members" => selection.members = true,
            "revenue" => selection.revenue = true,
            "attendance" => selection.attendance = true,
            "sessions" => selection.sessions = true,
            "packages" => selection.packages = true,
            other => anyhow::bail!(
                "Unknown section: {other}. Use: members, revenue, attendance, sessions, packages"
            ),
        }
    }
    Ok(selection)
}

fn load(cli: &Cli) -> anyhow::Result<Collections> {
    if let Some(path) = &cli.data {
        return Ok(load_collections(path)?);
    }
    let mut collections = Collections::default();
    if let Some(path) = &cli.members {
        collections.members = load_records("member", path)?;
    }
    if let Some(path) = &cli.subscriptions {
        collections.subscriptions = load_records("subscription", path)?;
    }
    if let Some(path) = &cli.payments {
        collections.payments = load_records("payment", path)?;
    }
    if let Some(path) = &cli.check_ins {
        collections.check_ins = load_records("check-in", path)?;
    }
    if let Some(path) = &cli.schedules {
        collections.schedules = load_records("schedule", path)?;
    }
    if let Some(path) = &cli.packages {
        collections.packages = load_records("package", path)?;
    }
    Ok(collections)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut params = ReportParams::new(DateRange::parse(&cli.range)?).top(cli.top);
    if let Some(compare) = &cli.compare {
        params = params.compare_with(DateRange::parse(compare)?);
    }
    if let Some(list) = &cli.sections {
        params = params.select(parse_selection(list)?);
    }
    params.assemble.sanitize_titles = !cli.raw_titles;

    let collections = load(&cli)?;
    let report = build_report(&collections, &params)?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");
    Ok(())
}
