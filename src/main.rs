use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tabled::{settings::Style, Table, Tabled};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use faturas::config::{
    config_dir, load_config, load_state, resolve_output_dir, save_state, State, CONFIG_TEMPLATE,
};
use faturas::error::{FaturasError, Result};
use faturas::format::{format_brl, format_file_size, format_kwh};
use faturas::table::{
    compute_visible, distinct_years, from_query_string, page_window, to_query_string, PageLabel,
    PageSize, Sort, SortDirection, SortKey, ViewParams, YearFilter,
};
use faturas::{ApiClient, Config, InvoiceRecord, PendingUpload, SummaryItem};

#[derive(Parser)]
#[command(name = "faturas")]
#[command(version, about = "Electricity invoice dashboard for the terminal", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.faturas or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    /// Invoice API base URL (overrides api.base_url in config.toml)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct ListArgs {
    /// Show only client numbers containing this text (case-sensitive)
    #[arg(short, long)]
    client: Option<String>,

    /// Show only this year, or 'all'
    #[arg(short, long)]
    year: Option<String>,

    /// Rows per page (5, 10, 20 or 50)
    #[arg(long)]
    per_page: Option<u32>,

    /// Sort by column (clientNumber, month, year, electricEnergyR, energySCEER, publicLightingR)
    #[arg(short, long)]
    sort: Option<String>,

    /// Sort descending (with --sort)
    #[arg(long, requires = "sort")]
    desc: bool,

    /// Cycle a column through ascending, descending and unsorted (can be repeated)
    #[arg(long, value_name = "COLUMN", conflicts_with = "sort")]
    toggle_sort: Vec<String>,

    /// Go to this page
    #[arg(short, long, conflicts_with_all = ["next", "prev"])]
    page: Option<u32>,

    /// Go to the next page
    #[arg(long, conflicts_with = "prev")]
    next: bool,

    /// Go to the previous page
    #[arg(long)]
    prev: bool,

    /// Highlight a row by invoice id (selecting it again clears the highlight)
    #[arg(long, value_name = "ID")]
    select: Option<String>,

    /// Start from a shared view link (e.g. "client=700&year=2024&page=2")
    #[arg(long, conflicts_with = "reset")]
    link: Option<String>,

    /// Start from the default view instead of the saved one
    #[arg(long)]
    reset: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a template config.toml
    Init,

    /// Show the invoice table (filters, sorting and page are remembered)
    List(ListArgs),

    /// List the years present in the invoice data
    Years,

    /// Show energy and financial totals
    Dashboard,

    /// Upload invoice PDFs (non-PDF files are skipped)
    Upload {
        /// Files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Leave a queued file out of the upload, by file name (repeatable)
        #[arg(long, value_name = "NAME")]
        exclude: Vec<String>,
    },

    /// Save an invoice record as JSON
    Download {
        /// Invoice id (see 'faturas list')
        #[arg(required_unless_present = "selected", conflicts_with = "selected")]
        id: Option<String>,

        /// Download the row highlighted with 'list --select'
        #[arg(long)]
        selected: bool,

        /// Custom output file path (default: download.output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };
    let api_url = cli.api_url.as_deref();

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::List(args) => cmd_list(&cfg_dir, api_url, args),
        Commands::Years => cmd_years(&cfg_dir, api_url),
        Commands::Dashboard => cmd_dashboard(&cfg_dir, api_url),
        Commands::Upload { files, exclude } => cmd_upload(&cfg_dir, api_url, &files, &exclude),
        Commands::Download {
            id,
            selected: _,
            output,
        } => cmd_download(&cfg_dir, api_url, id, output),
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(FaturasError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;

    println!("Initialized faturas config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Point it at your invoice API:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!("  2. Browse invoices:               faturas list");

    Ok(())
}

fn open_config(cfg_dir: &Path) -> Result<Config> {
    if !cfg_dir.exists() {
        return Err(FaturasError::ConfigNotFound(cfg_dir.to_path_buf()));
    }
    load_config(cfg_dir)
}

fn api_client(config: &Config, api_url: Option<&str>) -> ApiClient {
    let base_url = api_url.unwrap_or(&config.api.base_url);
    ApiClient::new(base_url, Duration::from_secs(config.api.timeout_secs))
}

// Table row structs for tabled
#[derive(Tabled)]
struct InvoiceRow {
    #[tabled(rename = "")]
    marker: &'static str,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "CLIENT")]
    client: String,
    #[tabled(rename = "MONTH")]
    month: String,
    #[tabled(rename = "YEAR")]
    year: i32,
    #[tabled(rename = "ELECTRIC ENERGY")]
    electric_energy: String,
    #[tabled(rename = "SCEE ENERGY")]
    scee_energy: String,
    #[tabled(rename = "PUBLIC LIGHTING")]
    public_lighting: String,
}

#[derive(Tabled)]
struct SeriesRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "VALUE")]
    value: String,
}

/// Pick the starting view: a shared link, the defaults, or what was saved last time.
fn initial_params(cfg_dir: &Path, config: &Config, args: &ListArgs) -> Result<ViewParams> {
    if let Some(link) = &args.link {
        return Ok(from_query_string(link));
    }

    let state = load_state(cfg_dir)?;
    if args.reset || state.view.is_empty() {
        let mut params = ViewParams::default();
        params.set_page_size(PageSize::try_from(config.table.per_page)?);
        return Ok(params);
    }
    Ok(state.to_params())
}

/// Apply filter, sort and selection flags in the same order a user would click them.
fn apply_view_flags(params: &mut ViewParams, args: &ListArgs) -> Result<()> {
    if let Some(client) = &args.client {
        params.set_text_filter(client.as_str());
    }
    if let Some(year) = &args.year {
        params.set_year_filter(year.parse::<YearFilter>()?);
    }
    if let Some(per_page) = args.per_page {
        params.set_page_size(PageSize::try_from(per_page)?);
    }
    if let Some(key) = &args.sort {
        let direction = if args.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        params.set_sort(Some(Sort {
            key: key.parse::<SortKey>()?,
            direction,
        }));
    }
    for key in &args.toggle_sort {
        params.toggle_sort(key.parse::<SortKey>()?);
    }
    if let Some(id) = &args.select {
        params.select(Some(id.as_str()));
    }
    Ok(())
}

/// Move between pages. The pager never goes past either end; an explicit
/// page outside the result is refused.
fn apply_page_flags(params: &mut ViewParams, args: &ListArgs, total_pages: u32) -> Result<()> {
    if let Some(page) = args.page {
        if page == 0 || (total_pages > 0 && page > total_pages) {
            return Err(FaturasError::PageOutOfRange { page, total_pages });
        }
        params.set_page(page);
    }
    if args.next && params.page() < total_pages {
        params.set_page(params.page() + 1);
    }
    if args.prev && params.page() > 1 {
        params.set_page(params.page() - 1);
    }
    Ok(())
}

fn render_pager(current_page: u32, total_pages: u32) -> String {
    page_window(current_page, total_pages)
        .iter()
        .map(|label| match label {
            PageLabel::Page(n) if *n == current_page => format!("[{n}]"),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Show the invoice table
fn cmd_list(cfg_dir: &Path, api_url: Option<&str>, args: ListArgs) -> Result<()> {
    let config = open_config(cfg_dir)?;
    let api = api_client(&config, api_url);

    let mut params = initial_params(cfg_dir, &config, &args)?;
    apply_view_flags(&mut params, &args)?;

    let records = api.fetch_invoices()?;
    let total_pages = compute_visible(&records, &params).total_pages;
    apply_page_flags(&mut params, &args, total_pages)?;

    let view = compute_visible(&records, &params);
    debug!(query = %to_query_string(&params), "rendering view");

    if view.visible.is_empty() {
        println!("No records found.");
    } else {
        let rows: Vec<InvoiceRow> = view
            .visible
            .iter()
            .map(|record| InvoiceRow {
                marker: if params.selected_id() == Some(record.id.as_str()) {
                    "*"
                } else {
                    ""
                },
                id: record.id.clone(),
                client: record.client_number.clone(),
                month: record.month.clone(),
                year: record.year,
                electric_energy: format_brl(record.electric_energy_r),
                scee_energy: format_brl(record.energy_scee_r),
                public_lighting: format_brl(record.public_lighting_r),
            })
            .collect();

        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{table}");
    }

    println!();
    println!(
        "Showing {} of {} records",
        view.visible.len(),
        view.total_items
    );
    if view.total_pages > 0 {
        println!(
            "Pages: {}",
            render_pager(params.page(), view.total_pages)
        );
    }
    if let Some(sort) = params.sort() {
        println!("Sorted by: {} ({})", sort.key, sort.direction.as_str());
    }
    if let Some(id) = params.selected_id() {
        println!("Selected: {id}");
    }
    println!("Link: ?{}", to_query_string(&params));

    save_state(cfg_dir, &State::from_params(&params))?;

    Ok(())
}

/// List the years present in the data
fn cmd_years(cfg_dir: &Path, api_url: Option<&str>) -> Result<()> {
    let config = open_config(cfg_dir)?;
    let records = api_client(&config, api_url).fetch_invoices()?;

    let years = distinct_years(&records);
    if years.is_empty() {
        println!("No invoices available.");
        return Ok(());
    }

    for year in years {
        println!("{year}");
    }
    Ok(())
}

fn series_table(items: &[SummaryItem], format_value: fn(f64) -> String) -> String {
    let rows: Vec<SeriesRow> = items
        .iter()
        .map(|item| SeriesRow {
            name: item.name.clone(),
            value: format_value(item.value),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Show the aggregate dashboard
fn cmd_dashboard(cfg_dir: &Path, api_url: Option<&str>) -> Result<()> {
    let config = open_config(cfg_dir)?;
    let summary = api_client(&config, api_url).fetch_aggregate()?;

    println!("Dashboard");
    println!("{}", "-".repeat(50));
    println!(
        "Electric energy consumption: {}",
        format_kwh(summary.energy_consumption)
    );
    println!(
        "Compensated energy:          {}",
        format_kwh(summary.compensated_energy)
    );
    println!(
        "Total without GD:            {}",
        format_brl(summary.total_without_gd)
    );
    println!(
        "GD savings:                  {}",
        format_brl(summary.gd_economy)
    );
    println!(
        "Total value:                 {}",
        format_brl(summary.total_value)
    );

    if !summary.energy_results.is_empty() {
        println!();
        println!("Energy results (kWh)");
        println!("{}", series_table(&summary.energy_results, format_kwh));
    }
    if !summary.financial_results.is_empty() {
        println!();
        println!("Financial results (R$)");
        println!("{}", series_table(&summary.financial_results, format_brl));
    }

    Ok(())
}

/// Upload invoice PDFs
fn cmd_upload(
    cfg_dir: &Path,
    api_url: Option<&str>,
    files: &[PathBuf],
    exclude: &[String],
) -> Result<()> {
    let config = open_config(cfg_dir)?;
    let api = api_client(&config, api_url);

    let mut pending = PendingUpload::new();
    let added = pending.add_files(files)?;
    let skipped = files.len() - added;
    if skipped > 0 {
        println!("Skipped {skipped} non-PDF file(s)");
    }

    for name in exclude {
        let index = pending.files().iter().position(|f| &f.name == name);
        match index.and_then(|i| pending.remove(i)) {
            Some(file) => println!("Excluded {}", file.name),
            None => println!("Nothing queued named {name}"),
        }
    }

    for file in pending.files() {
        println!("  {} ({})", file.name, format_file_size(file.size));
    }

    let sent = pending.submit(&api)?;
    println!("Uploaded {} file(s) to {}", sent.len(), api.base_url());
    println!("Invoice list and dashboard totals changed; run 'faturas list' to see them.");

    Ok(())
}

fn download_file_name(record: &InvoiceRecord) -> String {
    format!("{}-{}-{}.json", record.client_number, record.month, record.year)
        .replace(['/', '\\'], "-")
}

/// Save an invoice record as JSON
fn cmd_download(
    cfg_dir: &Path,
    api_url: Option<&str>,
    id: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = open_config(cfg_dir)?;

    let id = match id {
        Some(id) => id,
        None => load_state(cfg_dir)?
            .selected
            .ok_or(FaturasError::NoSelection)?,
    };

    let records = api_client(&config, api_url).fetch_invoices()?;
    let record = records
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| FaturasError::InvoiceNotFound(id.clone()))?;

    println!(
        "Downloading data for client {} - {} {}",
        record.client_number, record.month, record.year
    );

    let path = match output {
        Some(path) => path,
        None => {
            let dir = resolve_output_dir(&config.download.output_dir, cfg_dir);
            std::fs::create_dir_all(&dir)?;
            dir.join(download_file_name(record))
        }
    };

    let json = serde_json::to_string_pretty(record).map_err(FaturasError::Encode)?;
    std::fs::write(&path, json)?;
    println!("  Saved: {}", path.display());

    Ok(())
}
