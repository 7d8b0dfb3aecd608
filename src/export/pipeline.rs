//! Export pipeline
//!
//! [`Exporter`] runs one export end to end: validate, snapshot, filter,
//! summarize, render, name, write. Every failure is caught here and returned
//! as an [`ExportResult`]; nothing escapes as a panic or error to the caller.

use chrono::{DateTime, Utc};
use log::{info, warn};
use std::path::{Path, PathBuf};

use super::csv::render_csv;
use super::date_style::DateStyle;
use super::filter::{filter_records, DateWindow};
use super::json::render_json;
use super::naming::artifact_name;
use super::options::{ExportFormat, ExportOptions};
use super::summary::{summarize, Summary};
use crate::delivery::{ArtifactWriter, EmailCapability, EmailDraft, ShareCapability, ShareRequest};
use crate::error::{BudgetWiseError, BudgetWiseResult};
use crate::storage::RecordSource;

/// Message used for any failure while producing or writing the artifact
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to export data. Please try again.";

/// Why an export step failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Nothing was selected for export
    Validation,
    /// Reading records, rendering, or writing the artifact failed
    Write,
    SharingUnavailable,
    EmailUnavailable,
    Share,
    Email,
}

/// Record counts and totals of a finished export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportStats {
    pub expense_count: usize,
    pub deposit_count: usize,
    pub summary: Summary,
}

/// Outcome of an export, share, or email step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    pub succeeded: bool,
    pub artifact_path: Option<PathBuf>,
    pub error_message: Option<String>,
    pub failure: Option<FailureKind>,
    pub stats: Option<ExportStats>,
}

impl ExportResult {
    pub fn success(artifact_path: PathBuf) -> Self {
        Self {
            succeeded: true,
            artifact_path: Some(artifact_path),
            error_message: None,
            failure: None,
            stats: None,
        }
    }

    fn with_stats(mut self, stats: ExportStats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Map an error onto a typed failure
    ///
    /// Capability and validation errors keep their own message so the caller
    /// can show specific guidance; everything else gets the generic message.
    pub fn failure(err: &BudgetWiseError) -> Self {
        let (kind, message) = match err {
            BudgetWiseError::Validation(msg) => (FailureKind::Validation, msg.clone()),
            BudgetWiseError::SharingUnavailable => {
                (FailureKind::SharingUnavailable, err.to_string())
            }
            BudgetWiseError::EmailUnavailable => (FailureKind::EmailUnavailable, err.to_string()),
            BudgetWiseError::Share(_) => (FailureKind::Share, err.to_string()),
            BudgetWiseError::Email(_) => (FailureKind::Email, err.to_string()),
            _ => (FailureKind::Write, GENERIC_FAILURE_MESSAGE.to_string()),
        };

        Self {
            succeeded: false,
            artifact_path: None,
            error_message: Some(message),
            failure: Some(kind),
            stats: None,
        }
    }
}

/// A rendered artifact that has not been written yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    pub file_name: String,
    pub content: String,
    pub stats: ExportStats,
}

/// What an export would contain, without writing anything
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPreview {
    pub options: ExportOptions,
    pub window: Option<DateWindow>,
    pub file_name: String,
    pub stats: ExportStats,
}

/// Runs exports against a record source and delivers the artifacts
pub struct Exporter<S: RecordSource> {
    source: S,
    writer: ArtifactWriter,
    date_style: DateStyle,
    share: Option<Box<dyn ShareCapability>>,
    email: Option<Box<dyn EmailCapability>>,
}

impl<S: RecordSource> Exporter<S> {
    pub fn new(source: S, writer: ArtifactWriter) -> Self {
        Self {
            source,
            writer,
            date_style: DateStyle::default(),
            share: None,
            email: None,
        }
    }

    pub fn with_date_style(mut self, date_style: DateStyle) -> Self {
        self.date_style = date_style;
        self
    }

    pub fn with_share(mut self, share: impl ShareCapability + 'static) -> Self {
        self.share = Some(Box::new(share));
        self
    }

    pub fn with_email(mut self, email: impl EmailCapability + 'static) -> Self {
        self.email = Some(Box::new(email));
        self
    }

    /// Produce the artifact text and its name
    ///
    /// The pure stages tolerate a request with nothing selected and render
    /// an empty report; rejecting it is left to [`Exporter::export_at`].
    pub fn render(&self, options: &ExportOptions, now: DateTime<Utc>) -> BudgetWiseResult<RenderedArtifact> {
        let records = self.source.snapshot()?;
        let filtered = filter_records(&records, options, now);
        let summary = summarize(&filtered)?;

        let content = match options.format {
            ExportFormat::Csv => render_csv(&filtered, options, &self.date_style, now)?,
            ExportFormat::Json => render_json(&filtered, options, now)?,
        };

        Ok(RenderedArtifact {
            file_name: artifact_name(options.format, now.date_naive()),
            content,
            stats: ExportStats {
                expense_count: filtered.expenses.len(),
                deposit_count: filtered.deposits.len(),
                summary,
            },
        })
    }

    /// Counts and totals for the given options, nothing written
    pub fn preview(&self, options: &ExportOptions, now: DateTime<Utc>) -> BudgetWiseResult<ExportPreview> {
        let records = self.source.snapshot()?;
        let filtered = filter_records(&records, options, now);

        Ok(ExportPreview {
            options: options.clone(),
            window: DateWindow::resolve(options, now),
            file_name: artifact_name(options.format, now.date_naive()),
            stats: ExportStats {
                expense_count: filtered.expenses.len(),
                deposit_count: filtered.deposits.len(),
                summary: summarize(&filtered)?,
            },
        })
    }

    /// Export as of the current instant
    pub fn export(&self, options: &ExportOptions) -> ExportResult {
        self.export_at(options, Utc::now())
    }

    /// Export as of `now`
    pub fn export_at(&self, options: &ExportOptions, now: DateTime<Utc>) -> ExportResult {
        info!(
            "Starting {} export (range: {}, expenses: {}, deposits: {})",
            options.format, options.date_range, options.include_expenses, options.include_deposits
        );

        match self.try_export(options, now) {
            Ok((path, stats)) => {
                info!(
                    "Exported {} expenses and {} deposits to {}",
                    stats.expense_count,
                    stats.deposit_count,
                    path.display()
                );
                ExportResult::success(path).with_stats(stats)
            }
            Err(err) => {
                warn!("Export failed: {}", err);
                ExportResult::failure(&err)
            }
        }
    }

    fn try_export(&self, options: &ExportOptions, now: DateTime<Utc>) -> BudgetWiseResult<(PathBuf, ExportStats)> {
        options.validate()?;
        let artifact = self.render(options, now)?;
        let path = self.writer.write(&artifact.file_name, &artifact.content)?;
        Ok((path, artifact.stats))
    }

    /// Hand a written artifact to the share capability
    pub fn share(&self, path: &Path, format: ExportFormat) -> ExportResult {
        let request = ShareRequest::new(path, format.mime_type());

        let outcome = match &self.share {
            Some(share) if share.is_available() => share.share(&request),
            _ => Err(BudgetWiseError::SharingUnavailable),
        };

        match outcome {
            Ok(()) => ExportResult::success(path.to_path_buf()),
            Err(err) => {
                warn!("Share failed: {}", err);
                ExportResult::failure(&err)
            }
        }
    }

    /// Compose an email with a written artifact attached
    pub fn email(
        &self,
        path: &Path,
        format: ExportFormat,
        recipient: Option<String>,
        now: DateTime<Utc>,
    ) -> ExportResult {
        let draft = EmailDraft::for_artifact(path, format.mime_type(), recipient, now.date_naive());

        let outcome = match &self.email {
            Some(email) if email.is_available() => email.compose(&draft),
            _ => Err(BudgetWiseError::EmailUnavailable),
        };

        match outcome {
            Ok(()) => ExportResult::success(path.to_path_buf()),
            Err(err) => {
                warn!("Email failed: {}", err);
                ExportResult::failure(&err)
            }
        }
    }
}
