//! Placement Archive CLI
//!
//! Browse a published placement archive from the terminal.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use placement_archive::{
    config::{DEFAULT_CONFIG_FILE, load_validated},
    error::{AppError, Result},
    models::{CompanyProforma, Edition, StudentPlacement},
    services::{
        PageItem, PageSize, PageView, PlacementStore, StudentDirectory, filter, group_by_slot,
        resolve_page_size,
    },
    utils::html::display_text,
};

/// Placement Archive - cached browsing of static placement datasets
#[derive(Parser, Debug)]
#[command(
    name = "placement",
    version,
    about = "Browse placement archive datasets"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Read datasets from this base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Read datasets from this directory
    #[arg(long, global = true, conflicts_with = "base_url")]
    base_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Dataset edition (legacy or 2025)
    #[arg(short, long, default_value = "2025")]
    edition: Edition,

    /// Free-text filter
    #[arg(short, long, default_value = "")]
    search: String,

    /// Page to show (1-based)
    #[arg(short, long, default_value_t = 1)]
    page: usize,

    /// Page size: a number or "all"
    #[arg(long)]
    page_size: Option<PageSize>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List placed students
    Students(ListArgs),

    /// List company proformas
    Companies(ListArgs),

    /// Show one company's proforma
    Company {
        /// Record id (legacy) or position (2025)
        id: String,

        #[arg(short, long, default_value = "2025")]
        edition: Edition,
    },

    /// Show notices attributed to a company
    Notices {
        company: String,

        #[arg(short, long, default_value = "legacy")]
        edition: Edition,
    },

    /// Show the 2025 slot timeline
    Slots,

    /// Show the aggregated placement summary
    Summary,

    /// Validate configuration and dataset availability
    Validate,

    /// Print the effective configuration as TOML
    Config,
}

/// Initialize logging based on verbosity flag.
///
/// Returns whether the level is fixed by `--verbose` or `RUST_LOG`.
fn init_logging(verbose: bool) -> bool {
    let from_env = std::env::var_os("RUST_LOG").is_some();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace"))
        .format_timestamp_secs()
        .init();
    if !from_env {
        log::set_max_level(startup_level(verbose));
    }
    verbose || from_env
}

/// Level in effect while the configuration is loaded.
fn startup_level(verbose: bool) -> log::LevelFilter {
    if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    }
}

/// Switch to the configured `logging.level`.
fn apply_config_level(level: &str) {
    match level.parse::<log::LevelFilter>() {
        Ok(filter) => log::set_max_level(filter),
        Err(_) => log::warn!("Unknown logging.level '{level}', keeping info"),
    }
}


fn print_footer(meta_page: usize, total_pages: usize, matched: usize, window: &[PageItem]) {
    let buttons: Vec<String> = window
        .iter()
        .map(|item| match item {
            PageItem::Page(n) if *n == meta_page => format!("[{n}]"),
            other => other.to_string(),
        })
        .collect();
    println!();
    println!(
        "Page {meta_page}/{total_pages} ({matched} matches)  {}",
        buttons.join(" ")
    );
}

async fn list_students(store: &PlacementStore, args: &ListArgs) -> Result<()> {
    let roster = store.students(args.edition).await?;
    let catalog = &store.config().catalog;
    let matched: Vec<&StudentPlacement> = filter(&roster.students, &args.search, catalog);
    let view = PageView::build(
        &matched,
        args.page,
        resolve_page_size(&store.config().pagination, args.page_size)?,
        store.config().pagination.max_buttons,
    );

    for student in view.items {
        println!(
            "{:<10} {:<28} {:<14} {:<30} {}",
            student.roll_no,
            student.name,
            student.department.display_name(catalog),
            student.company_name,
            student.profile
        );
    }
    print_footer(view.meta.valid_page, view.meta.total_pages, matched.len(), &view.window);
    Ok(())
}

async fn list_companies(store: &PlacementStore, args: &ListArgs) -> Result<()> {
    let companies = store.companies(args.edition).await?;
    let catalog = &store.config().catalog;
    let matched: Vec<&CompanyProforma> = filter(&companies, &args.search, catalog);
    let view = PageView::build(
        &matched,
        args.page,
        resolve_page_size(&store.config().pagination, args.page_size)?,
        store.config().pagination.max_buttons,
    );

    for company in view.items {
        println!(
            "{:>5}  {:<36} {:<24} {}",
            company.key.to_string(),
            company.display_name(),
            company.profile,
            company.location.as_deref().unwrap_or("-")
        );
    }
    print_footer(view.meta.valid_page, view.meta.total_pages, matched.len(), &view.window);
    Ok(())
}

async fn show_company(store: &PlacementStore, edition: Edition, id: &str) -> Result<()> {
    let detail = store.company_detail(edition, id).await?;
    let company = &detail.company;

    println!("{} ({edition}, id {})", company.display_name(), company.key);
    if !company.role.is_empty() {
        println!("Role: {}", company.role);
    }
    println!("Profile: {}", company.profile);
    let sections = [
        ("Location", &company.location),
        ("Nature of business", &company.nature_of_business),
        ("Job description", &company.job_description),
        ("Skill set", &company.skill_set),
        ("Bond", &company.bond_details),
        ("Medical requirements", &company.medical_requirements),
    ];
    for (label, value) in sections {
        if let Some(text) = value.as_deref().and_then(display_text) {
            println!("{label}: {text}");
        }
    }

    let compensation = company.compensation.rows();
    if !compensation.is_empty() {
        println!("\nCompensation");
        for (label, value) in compensation {
            if let Some(text) = display_text(value) {
                println!("  {label}: {text}");
            }
        }
    }

    let catalog = &store.config().catalog;
    println!("\nEligibility ({} branches eligible)", detail.eligibility.eligible_count());
    println!("{:<12} {}", "", catalog.columns.join(" "));
    for (program, row) in catalog
        .programs
        .iter()
        .zip(detail.eligibility.grid(&catalog.programs, &catalog.columns))
    {
        let cells: Vec<String> = row
            .iter()
            .zip(&catalog.columns)
            .map(|(cell, column)| format!("{:^width$}", cell.symbol(), width = column.len()))
            .collect();
        println!("{program:<12} {}", cells.join(" "));
    }

    if !detail.events.is_empty() {
        println!("\nTimeline");
        for notice in &detail.events {
            println!("  {}  {}", notice.created_at, notice.title);
        }
    }
    Ok(())
}

async fn show_notices(store: &PlacementStore, edition: Edition, company: &str) -> Result<()> {
    let index = store.timeline_index(edition).await?;
    let events = index.events_for(company);
    if events.is_empty() {
        log::info!("No notices mention {company}");
        return Ok(());
    }
    for notice in events {
        println!("{}  {}", notice.created_at, notice.title);
        let tags = notice.tag_list();
        if !tags.is_empty() {
            println!("    tags: {}", tags.join(", "));
        }
        if let Some(text) = display_text(&notice.description) {
            println!("    {text}");
        }
    }
    Ok(())
}

async fn show_slots(store: &PlacementStore) -> Result<()> {
    let (slots, resumes) = tokio::join!(store.slots(), store.resumes());
    let slots = slots?;
    // Resumes only fill in emails missing from the slot data
    let directory = match resumes {
        Ok(resumes) => StudentDirectory::new(&resumes, &store.config().directory),
        Err(e) => {
            log::warn!("Resumes unavailable: {e}");
            StudentDirectory::new(&[], &store.config().directory)
        }
    };

    for group in group_by_slot(&slots) {
        println!("Slot {} ({} placements)", group.slot, group.placement_count());
        for company in &group.companies {
            println!("  {} ({})", company.company, company.students.len());
            for student in &company.students {
                let email = if student.email.trim().is_empty() {
                    directory.email_for(&student.roll)
                } else {
                    student.email.clone()
                };
                println!("    {:<10} {:<28} {}", student.roll, student.name, email);
            }
        }
    }
    Ok(())
}

async fn show_summary(store: &PlacementStore) -> Result<()> {
    let analytics = store.analytics().await?;
    let overview = &analytics.placement_overview;
    println!("Registered students: {}", overview.registered_students);
    println!("Students placed:     {}", overview.students_placed);
    println!("PPOs received:       {}", overview.ppo_received);
    println!("Placement rate:      {:.1}%", overview.placement_percentage);
    println!("Offers generated:    {}", overview.total_offers_generated);

    let salary = &analytics.salary_insights_lpa;
    println!(
        "CTC (LPA): average {:.1}, median {:.1}, highest {:.1}",
        salary.average_ctc, salary.median_ctc, salary.highest_ctc
    );

    println!("\nTop recruiters");
    for (name, offers) in analytics.ranked_recruiters().into_iter().take(10) {
        println!("  {offers:>4}  {name}");
    }

    match store.students(Edition::Legacy).await {
        Ok(roster) if !roster.branches.is_empty() => {
            let catalog = &store.config().catalog;
            println!("\nBranches");
            for branch in &roster.branches {
                println!(
                    "  {:<16} {:>4}/{:<4} {:>5.1}%",
                    catalog.label(branch.program_department_id).unwrap_or("Unknown"),
                    branch.recruited,
                    branch.total,
                    branch.placement_rate()
                );
            }
        }
        Ok(_) => {}
        Err(e) => log::warn!("Branch statistics unavailable: {e}"),
    }
    Ok(())
}

async fn validate(store: &PlacementStore) -> Result<()> {
    log::info!("✓ Config OK");

    let handles: Vec<_> = store
        .config()
        .datasets
        .iter()
        .map(|d| (d.kind, d.edition, d.path.clone(), store.preload(d.kind, d.edition)))
        .collect();

    let mut missing = 0;
    for (kind, edition, path, handle) in handles {
        if let Err(e) = handle.await {
            log::error!("Preload task for {path} panicked: {e}");
        }
        if store.is_loaded(kind, edition) {
            log::info!("✓ {kind} ({edition}): {path}");
        } else {
            log::error!("✗ {kind} ({edition}): {path}");
            missing += 1;
        }
    }

    if missing > 0 {
        return Err(AppError::validation(format!("{missing} dataset(s) failed to load")));
    }
    log::info!("All validations passed!");
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let level_fixed = init_logging(cli.verbose);

    let config = load_validated(&cli.config, cli.base_url.clone(), cli.base_dir.clone())
        .inspect_err(|e| log::error!("{e}"))?;
    if !level_fixed {
        apply_config_level(&config.logging.level);
    }

    if let Command::Config = cli.command {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let store = PlacementStore::from_config(config)?;

    match cli.command {
        Command::Students(args) => list_students(&store, &args).await?,
        Command::Companies(args) => list_companies(&store, &args).await?,
        Command::Company { id, edition } => show_company(&store, edition, &id).await?,
        Command::Notices { company, edition } => show_notices(&store, edition, &company).await?,
        Command::Slots => show_slots(&store).await?,
        Command::Summary => show_summary(&store).await?,
        Command::Validate => validate(&store).await?,
        Command::Config => {}
    }

    Ok(())
}
