use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use folio_protocol::{parse_request, ErrorEnvelope, Kind, QueryRequest, ResponseEnvelope};
use serde::Serialize;
use std::env;
use std::path::PathBuf;

mod command;
mod settings;

use settings::View;

#[derive(Parser)]
#[command(name = "folio-finder")]
#[command(about = "Launcher-style search over a folio document library", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Library root (default: FOLIO_FINDER_LIBRARY, then ~/Folio/Library)
    #[arg(long, global = true)]
    library: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a library query and print result items as JSON
    Query(QueryArgs),

    /// Build the forest and report per-root counts
    Check(CheckArgs),

    /// Read or change the per-kind "open with view" preference
    View(ViewArgs),
}

#[derive(Args)]
struct QueryArgs {
    /// Free-text query; omit to list everything in scope
    query: Option<String>,

    /// Restrict results to one node kind
    #[arg(long, value_enum, default_value_t = KindArg::All)]
    kind: KindArg,

    /// Folder location whose direct children to search
    #[arg(long)]
    scope: Option<PathBuf>,

    /// Match document text via the content index instead of titles
    #[arg(long, conflicts_with = "full_path")]
    content: bool,

    /// Fuzzy-match against slash-joined display paths instead of bare titles
    #[arg(long)]
    full_path: bool,

    /// Pretty-print the JSON response
    #[arg(long)]
    pretty: bool,

    /// Verbatim request JSON round-tripped from an item action
    #[arg(long, conflicts_with_all = ["query", "kind", "scope", "content", "full_path"])]
    request: Option<String>,
}

#[derive(Args)]
struct CheckArgs {
    /// Pretty-print the JSON response
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct ViewArgs {
    #[command(subcommand)]
    command: ViewCommands,
}

#[derive(Subcommand)]
enum ViewCommands {
    /// List the selectable views for one node kind
    List(ViewListArgs),

    /// Print the effective view for one node kind
    Get(ViewGetArgs),

    /// Persist the view a node kind opens with
    Set(ViewSetArgs),
}

#[derive(Args)]
struct ViewListArgs {
    /// Node kind the preference applies to
    #[arg(value_enum)]
    kind: ItemKindArg,

    /// Pretty-print the JSON response
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct ViewGetArgs {
    /// Node kind the preference applies to
    #[arg(value_enum)]
    kind: ItemKindArg,

    /// Pretty-print the JSON response
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct ViewSetArgs {
    /// Node kind the preference applies to
    #[arg(value_enum)]
    kind: ItemKindArg,

    /// View to open that kind with
    #[arg(value_enum)]
    view: ViewArg,

    /// Pretty-print the JSON response
    #[arg(long)]
    pretty: bool,
}

/// Flag form of the wire `kind` filter.
#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Folder,
    Document,
    All,
}

impl KindArg {
    fn as_domain(self) -> Kind {
        match self {
            KindArg::Folder => Kind::Folder,
            KindArg::Document => Kind::Document,
            KindArg::All => Kind::All,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ItemKindArg {
    Folder,
    Document,
}

impl ItemKindArg {
    fn as_domain(self) -> folio_protocol::ItemKind {
        match self {
            ItemKindArg::Folder => folio_protocol::ItemKind::Folder,
            ItemKindArg::Document => folio_protocol::ItemKind::Document,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ViewArg {
    Default,
    Library,
    Documents,
    Editor,
}

impl ViewArg {
    fn as_domain(self) -> View {
        match self {
            ViewArg::Default => View::Default,
            ViewArg::Library => View::Library,
            ViewArg::Documents => View::Documents,
            ViewArg::Editor => View::Editor,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let library_root = resolve_library_root(cli.library);

    match cli.command {
        Commands::Query(args) => run_query(args, library_root).await?,
        Commands::Check(args) => run_check(args, library_root)?,
        Commands::View(args) => run_view(args)?,
    }

    Ok(())
}

/// `--library` wins, then the env override, then the conventional home
/// location.
fn resolve_library_root(flag: Option<PathBuf>) -> PathBuf {
    if let Some(path) = flag {
        return path;
    }
    if let Some(path) = env::var_os("FOLIO_FINDER_LIBRARY") {
        return PathBuf::from(path);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Folio/Library")
}

async fn run_query(args: QueryArgs, library_root: PathBuf) -> Result<()> {
    let response = match build_request(&args) {
        Ok(request) => command::query::run(&request, &library_root).await,
        Err(envelope) => ResponseEnvelope::error(envelope),
    };

    print_json(&response, args.pretty)?;

    if response.is_error() {
        std::process::exit(1);
    }
    Ok(())
}

/// The flag form and the `--request` form converge on one request value.
/// Clap already rejects mixing them.
fn build_request(args: &QueryArgs) -> Result<QueryRequest, ErrorEnvelope> {
    if let Some(raw) = &args.request {
        return parse_request(raw).map_err(|err| {
            command::invalid_request(
                format!("malformed request JSON: {err}"),
                Some("pass the follow-up request exactly as an item action emitted it".to_owned()),
            )
        });
    }

    Ok(QueryRequest {
        kind: args.kind.as_domain(),
        query: args.query.clone(),
        scope_path: args.scope.clone(),
        search_content: args.content,
        search_full_path: args.full_path,
    })
}

fn run_check(args: CheckArgs, library_root: PathBuf) -> Result<()> {
    match command::check::run(&library_root) {
        Ok(report) => print_json(&report, args.pretty)?,
        Err(envelope) => {
            print_json(&ResponseEnvelope::error(envelope), args.pretty)?;
            std::process::exit(1);
        }
    }
    Ok(())
}

fn run_view(args: ViewArgs) -> Result<()> {
    match args.command {
        ViewCommands::List(args) => {
            print_json(&command::view::list(args.kind.as_domain()), args.pretty)?;
        }
        ViewCommands::Get(args) => {
            print_json(&command::view::get(args.kind.as_domain()), args.pretty)?;
        }
        ViewCommands::Set(args) => {
            match command::view::set(args.kind.as_domain(), args.view.as_domain()) {
                Ok(report) => print_json(&report, args.pretty)?,
                Err(envelope) => {
                    print_json(&ResponseEnvelope::error(envelope), args.pretty)?;
                    std::process::exit(1);
                }
            }
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{output}");
    Ok(())
}
