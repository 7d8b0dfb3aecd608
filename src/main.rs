use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use budgetwise::cli::{handle_export_command, handle_preview_command, ExportArgs, FilterArgs};
use budgetwise::config::{paths::DATA_DIR_ENV, BudgetWisePaths, Settings};
use budgetwise::storage::write_json_atomic;

#[derive(Parser)]
#[command(
    name = "budgetwise",
    version,
    about = "Export BudgetWise expenses and deposits as CSV or JSON",
    long_about = "Filters a BudgetWise record snapshot by date range and record type, \
                  writes it as a CSV or JSON artifact with a summary, and optionally \
                  hands the artifact to a share program or an email draft."
)]
struct Cli {
    /// Base directory for settings, records and exports
    #[arg(long, global = true, env = DATA_DIR_ENV, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write an export artifact and optionally share or email it
    Export(ExportArgs),

    /// Show what an export would contain without writing it
    Preview(FilterArgs),

    /// Create the data directories and default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => BudgetWisePaths::with_base_dir(dir),
        None => BudgetWisePaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Export(args)) => {
            handle_export_command(&paths, &settings, args)?;
        }
        Some(Commands::Preview(filter)) => {
            handle_preview_command(&paths, &settings, filter)?;
        }
        Some(Commands::Init) => {
            println!("Initializing BudgetWise at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            let records = paths.records_file();
            if !records.exists() {
                write_json_atomic(
                    &records,
                    &serde_json::json!({ "expenses": [], "deposits": [] }),
                )?;
            }
            println!("Initialization complete!");
            println!("Place your records in: {}", records.display());
        }
        Some(Commands::Config) => {
            println!("BudgetWise Configuration");
            println!("========================");
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Records file:     {}", paths.records_file().display());
            println!("Exports dir:      {}", paths.exports_dir().display());
            println!("Outbox dir:       {}", paths.outbox_dir().display());
            println!();
            println!("Settings:");
            println!("  Date format:     {}", settings.date_format);
            println!("  Default format:  {}", settings.default_format);
            println!(
                "  Share command:   {}",
                settings.share_command.as_deref().unwrap_or("(not configured)")
            );
            println!("  Email outbox:    {}", settings.email_outbox_enabled);
        }
        None => {
            println!("BudgetWise - data export");
            println!();
            println!("Run 'budgetwise --help' for usage information.");
        }
    }

    Ok(())
}
