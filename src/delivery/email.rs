//! Composing an email with the artifact attached
//!
//! Independent of the generic share path: a device may be able to share
//! files but not compose mail, or the other way round.

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::NaiveDate;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BudgetWiseError, BudgetWiseResult};
use crate::storage::write_atomic;

/// Fixed subject line for export emails
pub const EMAIL_SUBJECT: &str = "BudgetWise Data Export";

const BOUNDARY: &str = "budgetwise-export-boundary";

/// A message with exactly one attachment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailDraft {
    pub recipient: Option<String>,
    pub subject: &'static str,
    pub body: String,
    pub attachment: PathBuf,
    pub attachment_mime: &'static str,
}

impl EmailDraft {
    /// Draft for an export artifact using the fixed subject and body template
    pub fn for_artifact(
        attachment: impl Into<PathBuf>,
        attachment_mime: &'static str,
        recipient: Option<String>,
        export_date: NaiveDate,
    ) -> Self {
        let attachment = attachment.into();
        let body = format!(
            "Hello,\n\n\
             Please find attached your BudgetWise data export.\n\n\
             File: {}\n\
             Export Date: {}\n\n\
             This file was generated by BudgetWise.\n",
            file_name(&attachment),
            export_date.format("%Y-%m-%d")
        );

        Self {
            recipient: recipient.filter(|r| !r.trim().is_empty()),
            subject: EMAIL_SUBJECT,
            body,
            attachment,
            attachment_mime,
        }
    }

    pub fn attachment_name(&self) -> String {
        file_name(&self.attachment)
    }
}

/// A platform facility that can compose an email
///
/// Implementations report [`BudgetWiseError::EmailUnavailable`] when mail
/// composition is not possible on this device.
pub trait EmailCapability {
    fn is_available(&self) -> bool;

    fn compose(&self, draft: &EmailDraft) -> BudgetWiseResult<()>;
}

/// Saves drafts as `.eml` files in an outbox directory for a mail client to
/// pick up
#[derive(Debug, Clone, Default)]
pub struct OutboxMailer {
    outbox: Option<PathBuf>,
}

impl OutboxMailer {
    pub fn new(outbox: impl Into<PathBuf>) -> Self {
        Self {
            outbox: Some(outbox.into()),
        }
    }

    /// A mailer with no outbox; every compose reports unavailable
    pub fn disabled() -> Self {
        Self { outbox: None }
    }

    /// Where a draft for `draft` would be written
    pub fn draft_path(&self, draft: &EmailDraft) -> Option<PathBuf> {
        let stem = draft
            .attachment
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "export".to_string());
        self.outbox.as_ref().map(|dir| dir.join(format!("{}.eml", stem)))
    }
}

impl EmailCapability for OutboxMailer {
    fn is_available(&self) -> bool {
        self.outbox.is_some()
    }

    fn compose(&self, draft: &EmailDraft) -> BudgetWiseResult<()> {
        let path = self.draft_path(draft).ok_or(BudgetWiseError::EmailUnavailable)?;

        let attachment = fs::read(&draft.attachment).map_err(|e| {
            BudgetWiseError::Email(format!(
                "Failed to read attachment {}: {}",
                draft.attachment.display(),
                e
            ))
        })?;

        let message = render_message(draft, &attachment);
        write_atomic(&path, message.as_bytes())
            .map_err(|e| BudgetWiseError::Email(e.to_string()))?;

        info!("Email draft saved to {}", path.display());
        Ok(())
    }
}

/// Render a multipart/mixed RFC 5322 message
pub fn render_message(draft: &EmailDraft, attachment: &[u8]) -> String {
    let name = draft.attachment_name();
    let mut lines: Vec<String> = Vec::new();

    if let Some(recipient) = &draft.recipient {
        lines.push(format!("To: {}", recipient));
    }
    lines.push(format!("Subject: {}", draft.subject));
    lines.push("MIME-Version: 1.0".into());
    lines.push(format!(
        "Content-Type: multipart/mixed; boundary=\"{}\"",
        BOUNDARY
    ));
    lines.push(String::new());

    lines.push(format!("--{}", BOUNDARY));
    lines.push("Content-Type: text/plain; charset=utf-8".into());
    lines.push(String::new());
    lines.extend(draft.body.lines().map(String::from));

    lines.push(format!("--{}", BOUNDARY));
    lines.push(format!(
        "Content-Type: {}; name=\"{}\"",
        draft.attachment_mime, name
    ));
    lines.push(format!("Content-Disposition: attachment; filename=\"{}\"", name));
    lines.push("Content-Transfer-Encoding: base64".into());
    lines.push(String::new());

    // RFC 2045 caps encoded lines at 76 characters
    let encoded = STANDARD.encode(attachment);
    let bytes = encoded.as_bytes();
    for chunk in bytes.chunks(76) {
        lines.push(String::from_utf8_lossy(chunk).into_owned());
    }

    lines.push(format!("--{}--", BOUNDARY));
    lines.push(String::new());

    lines.join("\r\n")
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_draft_template() {
        let draft = EmailDraft::for_artifact(
            "/tmp/BudgetWise_Export_2024-05-01.csv",
            "text/csv",
            Some("me@example.com".into()),
            day(),
        );
        assert_eq!(draft.subject, "BudgetWise Data Export");
        assert!(draft.body.contains("File: BudgetWise_Export_2024-05-01.csv"));
        assert!(draft.body.contains("Export Date: 2024-05-01"));
        assert_eq!(draft.recipient.as_deref(), Some("me@example.com"));
    }

    #[test]
    fn test_blank_recipient_dropped() {
        let draft = EmailDraft::for_artifact("/tmp/a.csv", "text/csv", Some("  ".into()), day());
        assert_eq!(draft.recipient, None);
    }

    #[test]
    fn test_disabled_mailer_is_unavailable() {
        let mailer = OutboxMailer::disabled();
        let draft = EmailDraft::for_artifact("/tmp/a.csv", "text/csv", None, day());
        assert!(!mailer.is_available());
        assert!(matches!(
            mailer.compose(&draft),
            Err(BudgetWiseError::EmailUnavailable)
        ));
    }

    #[test]
    fn test_compose_writes_eml_with_attachment() {
        let temp_dir = TempDir::new().unwrap();
        let artifact = temp_dir.path().join("BudgetWise_Export_2024-05-01.csv");
        fs::write(&artifact, "SUMMARY\nBalance,0\n").unwrap();

        let mailer = OutboxMailer::new(temp_dir.path().join("outbox"));
        let draft = EmailDraft::for_artifact(&artifact, "text/csv", Some("me@example.com".into()), day());
        mailer.compose(&draft).unwrap();

        let eml_path = temp_dir.path().join("outbox").join("BudgetWise_Export_2024-05-01.eml");
        let eml = fs::read_to_string(eml_path).unwrap();
        assert!(eml.starts_with("To: me@example.com\r\nSubject: BudgetWise Data Export\r\n"));
        assert!(eml.contains("filename=\"BudgetWise_Export_2024-05-01.csv\""));
        assert!(eml.contains("Content-Type: text/csv;"));
        assert!(eml.contains(&STANDARD.encode("SUMMARY\nBalance,0\n")));
        assert!(eml.trim_end().ends_with("--budgetwise-export-boundary--"));
    }

    #[test]
    fn test_missing_attachment_is_email_error() {
        let temp_dir = TempDir::new().unwrap();
        let mailer = OutboxMailer::new(temp_dir.path());
        let draft = EmailDraft::for_artifact(temp_dir.path().join("gone.csv"), "text/csv", None, day());
        assert!(matches!(mailer.compose(&draft), Err(BudgetWiseError::Email(_))));
    }

    #[test]
    fn test_long_attachment_lines_wrapped() {
        let draft = EmailDraft::for_artifact("/tmp/a.json", "application/json", None, day());
        let message = render_message(&draft, &[b'x'; 300]);
        let start = message.find("base64\r\n\r\n").unwrap() + "base64\r\n\r\n".len();
        let end = message.find("--budgetwise-export-boundary--").unwrap();
        let encoded: Vec<&str> = message[start..end].split("\r\n").filter(|l| !l.is_empty()).collect();
        assert_eq!(encoded.len(), 6);
        assert!(encoded.iter().all(|line| line.len() <= 76));
        assert!(!message.starts_with("To:"));
    }
}
