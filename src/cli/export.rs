//! CLI commands for data export
//!
//! Bridges clap arguments to the [`Exporter`], wiring in the record
//! snapshot, output directory and delivery facilities from settings.

use chrono::{DateTime, NaiveDate, Utc};
use clap::Args;
use std::path::PathBuf;

use crate::config::{BudgetWisePaths, Settings};
use crate::delivery::{ArtifactWriter, CommandShare, OutboxMailer};
use crate::display::{format_money_colored, format_preview};
use crate::error::{BudgetWiseError, BudgetWiseResult};
use crate::export::{DateRange, ExportFormat, ExportOptions, ExportResult, Exporter};
use crate::storage::JsonRecordStore;

/// Record selection shared by `export` and `preview`
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Artifact format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Date range to include
    #[arg(short, long, value_enum, default_value = "all")]
    pub range: DateRange,

    /// Start of a custom range (YYYY-MM-DD, inclusive)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub from: Option<NaiveDate>,

    /// End of a custom range (YYYY-MM-DD, inclusive)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub to: Option<NaiveDate>,

    /// Leave expenses out of the export
    #[arg(long)]
    pub no_expenses: bool,

    /// Leave deposits out of the export
    #[arg(long)]
    pub no_deposits: bool,

    /// Record snapshot to read (defaults to data/records.json)
    #[arg(long, value_name = "PATH")]
    pub records: Option<PathBuf>,
}

impl FilterArgs {
    /// Build export options; `--from`/`--to` imply a custom range
    pub fn to_options(&self, settings: &Settings) -> BudgetWiseResult<ExportOptions> {
        let has_bounds = self.from.is_some() || self.to.is_some();
        let range = match self.range {
            DateRange::All | DateRange::Custom if has_bounds => DateRange::Custom,
            rolling if has_bounds => {
                return Err(BudgetWiseError::Validation(format!(
                    "--from/--to cannot be combined with --range {}",
                    rolling
                )))
            }
            range => range,
        };

        let mut options = ExportOptions::new(self.format.unwrap_or(settings.default_format))
            .with_range(range)
            .with_expenses(!self.no_expenses)
            .with_deposits(!self.no_deposits);

        if range == DateRange::Custom {
            options.start_date = self.from.and_then(start_of_day);
            options.end_date = self.to.and_then(end_of_day);
        }

        Ok(options)
    }
}

/// Arguments for `budgetwise export`
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Directory to write the artifact to (defaults to exports/)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Hand the artifact to the configured share program
    #[arg(long)]
    pub share: bool,

    /// Save an email draft with the artifact attached
    #[arg(long, value_name = "RECIPIENT", num_args = 0..=1, default_missing_value = "")]
    pub email: Option<String>,
}

/// Handle `budgetwise export`
pub fn handle_export_command(
    paths: &BudgetWisePaths,
    settings: &Settings,
    args: ExportArgs,
) -> BudgetWiseResult<()> {
    let options = args.filter.to_options(settings)?;
    let output_dir = args.output_dir.clone().unwrap_or_else(|| paths.exports_dir());
    let exporter = build_exporter(paths, settings, &args.filter, output_dir)?;

    let now = Utc::now();
    let result = exporter.export_at(&options, now);
    let path = check(&result)?;

    if let Some(stats) = &result.stats {
        println!(
            "Exported {} expenses and {} deposits to: {}",
            stats.expense_count,
            stats.deposit_count,
            path.display()
        );
        println!("Balance: {}", format_money_colored(stats.summary.balance));
    }

    if args.share {
        check(&exporter.share(&path, options.format))?;
        println!("Shared: {}", path.display());
    }

    if let Some(recipient) = args.email {
        let recipient = if recipient.trim().is_empty() {
            settings.default_recipient.clone()
        } else {
            Some(recipient)
        };
        check(&exporter.email(&path, options.format, recipient, now))?;
        println!("Email draft saved to: {}", paths.outbox_dir().display());
    }

    Ok(())
}

/// Handle `budgetwise preview`
pub fn handle_preview_command(
    paths: &BudgetWisePaths,
    settings: &Settings,
    filter: FilterArgs,
) -> BudgetWiseResult<()> {
    let options = filter.to_options(settings)?;
    let exporter = build_exporter(paths, settings, &filter, paths.exports_dir())?;
    let preview = exporter.preview(&options, Utc::now())?;
    println!("{}", format_preview(&preview));
    Ok(())
}

fn build_exporter(
    paths: &BudgetWisePaths,
    settings: &Settings,
    filter: &FilterArgs,
    output_dir: PathBuf,
) -> BudgetWiseResult<Exporter<JsonRecordStore>> {
    let records = filter.records.clone().unwrap_or_else(|| paths.records_file());
    let mailer = if settings.email_outbox_enabled {
        OutboxMailer::new(paths.outbox_dir())
    } else {
        OutboxMailer::disabled()
    };

    Ok(
        Exporter::new(JsonRecordStore::new(records), ArtifactWriter::new(output_dir))
            .with_date_style(settings.date_style()?)
            .with_share(CommandShare::from_command_line(settings.share_command.as_deref()))
            .with_email(mailer),
    )
}

/// Turn a failed step into an error carrying its message
fn check(result: &ExportResult) -> BudgetWiseResult<PathBuf> {
    match (&result.artifact_path, result.succeeded) {
        (Some(path), true) => Ok(path.clone()),
        _ => Err(BudgetWiseError::Export(
            result
                .error_message
                .clone()
                .unwrap_or_else(|| "Export failed".to_string()),
        )),
    }
}

fn start_of_day(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc())
}

fn end_of_day(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_milli_opt(23, 59, 59, 999).map(|naive| naive.and_utc())
}
