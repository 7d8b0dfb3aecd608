//! Handing an artifact to the platform share surface

use log::{info, warn};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Command;

use crate::error::{BudgetWiseError, BudgetWiseResult};

/// Title shown by the share dialog
pub const SHARE_DIALOG_TITLE: &str = "Save BudgetWise Export";

/// What the share surface is asked to present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    pub path: PathBuf,
    pub mime_type: &'static str,
    pub dialog_title: &'static str,
}

impl ShareRequest {
    pub fn new(path: impl Into<PathBuf>, mime_type: &'static str) -> Self {
        Self {
            path: path.into(),
            mime_type,
            dialog_title: SHARE_DIALOG_TITLE,
        }
    }
}

/// A platform facility that can share a file
///
/// Implementations report [`BudgetWiseError::SharingUnavailable`] when the
/// device has no such facility, and [`BudgetWiseError::Share`] when it exists
/// but the attempt failed.
pub trait ShareCapability {
    fn is_available(&self) -> bool;

    fn share(&self, request: &ShareRequest) -> BudgetWiseResult<()>;
}

/// Shares by launching an opener program with the artifact path
///
/// The MIME type and dialog title are passed to the program through the
/// `BUDGETWISE_SHARE_MIME` and `BUDGETWISE_SHARE_TITLE` environment variables.
#[derive(Debug, Clone, Default)]
pub struct CommandShare {
    program: Option<String>,
    args: Vec<String>,
}

impl CommandShare {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: Some(program.into()),
            args: Vec::new(),
        }
    }

    /// Parse a whitespace separated command line such as `"xdg-open"` or
    /// `"open -a Finder"`; blank input leaves sharing unavailable
    pub fn from_command_line(command: Option<&str>) -> Self {
        let mut parts = command.unwrap_or_default().split_whitespace().map(String::from);
        match parts.next() {
            Some(program) => Self {
                program: Some(program),
                args: parts.collect(),
            },
            None => Self::default(),
        }
    }

    pub fn program(&self) -> Option<&str> {
        self.program.as_deref()
    }
}

impl ShareCapability for CommandShare {
    fn is_available(&self) -> bool {
        self.program.is_some()
    }

    fn share(&self, request: &ShareRequest) -> BudgetWiseResult<()> {
        let program = self.program.as_deref().ok_or(BudgetWiseError::SharingUnavailable)?;

        let status = Command::new(program)
            .args(&self.args)
            .arg(&request.path)
            .env("BUDGETWISE_SHARE_MIME", request.mime_type)
            .env("BUDGETWISE_SHARE_TITLE", request.dialog_title)
            .status()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    warn!("Share program '{}' not found", program);
                    BudgetWiseError::SharingUnavailable
                } else {
                    BudgetWiseError::Share(format!("Failed to launch '{}': {}", program, e))
                }
            })?;

        if !status.success() {
            return Err(BudgetWiseError::Share(format!(
                "'{}' exited with {}",
                program, status
            )));
        }

        info!("Shared {} via '{}'", request.path.display(), program);
        Ok(())
    }
}
