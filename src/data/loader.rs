//! Business Data Loader Module
//! Reads task, sales, and SOP resources from a base directory using Polars.

use polars::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::coerce;
use crate::logging::{EventLog, FacadeLog};

/// Date-like columns expected in `task.csv`.
const TASK_DATE_COLUMNS: [&str; 2] = ["due_date", "last_followup"];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("failed to read file: {0}")]
    Io(#[from] io::Error),
}

/// Reads business-operations resources with empty-result fallbacks.
///
/// Every public load operation is infallible: a missing or unreadable
/// resource is logged and surfaces as an empty DataFrame or empty string,
/// so callers never handle errors themselves.
pub struct DataLoader {
    data_dir: PathBuf,
    log: Box<dyn EventLog>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new("data")
    }
}

impl DataLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            log: Box::new(FacadeLog),
        }
    }

    /// Route diagnostics to an injected sink instead of the `log` facade.
    pub fn with_log(data_dir: impl Into<PathBuf>, log: Box<dyn EventLog>) -> Self {
        Self {
            data_dir: data_dir.into(),
            log,
        }
    }

    /// Get the configured base directory.
    pub fn get_data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load task tracker data from `<base>/task.csv`.
    ///
    /// `due_date` and `last_followup` are coerced to datetimes when present;
    /// cells that fail to parse become null.
    pub fn load_tasks(&self) -> DataFrame {
        let path = self.data_dir.join("task.csv");
        match self.read_tasks(&path) {
            Ok(df) => df,
            Err(LoaderError::NotFound(_)) => {
                self.log
                    .error(&format!("Tasks file not found: {}", path.display()));
                DataFrame::empty()
            }
            Err(err) => {
                self.log.error(&format!("Error loading tasks: {err}"));
                DataFrame::empty()
            }
        }
    }

    /// Load sales lead data from `<base>/sales.csv`.
    ///
    /// `created_date` is coerced in place to a datetime and `value` to a
    /// float when present; cells that fail to parse become null.
    pub fn load_sales(&self) -> DataFrame {
        let path = self.data_dir.join("sales.csv");
        match self.read_sales(&path) {
            Ok(df) => df,
            Err(LoaderError::NotFound(_)) => {
                self.log
                    .error(&format!("Sales file not found in: {}", path.display()));
                DataFrame::empty()
            }
            Err(err) => {
                self.log.error(&format!("Error loading sales: {err}"));
                DataFrame::empty()
            }
        }
    }

    /// Load the SOP document from `<base>/docs/sop.md` as UTF-8 text.
    pub fn load_documents(&self) -> String {
        let path = self.data_dir.join("docs").join("sop.md");
        match self.read_document(&path) {
            Ok(text) => {
                self.log.info(&format!(
                    "Loaded SOP document ({} chars) from {}",
                    text.chars().count(),
                    path.display()
                ));
                text
            }
            Err(LoaderError::NotFound(_)) => {
                self.log
                    .error(&format!("SOP document not found: {}", path.display()));
                String::new()
            }
            Err(err) => {
                self.log.error(&format!("Error loading SOP document: {err}"));
                String::new()
            }
        }
    }

    /// Load every resource in the order tasks, sales, document.
    ///
    /// One operation's empty result never blocks the others from running.
    pub fn load_all(&self) -> (DataFrame, DataFrame, String) {
        let tasks = self.load_tasks();
        let sales = self.load_sales();
        let sop = self.load_documents();
        (tasks, sales, sop)
    }

    fn read_tasks(&self, path: &Path) -> Result<DataFrame, LoaderError> {
        let mut df = self.read_csv(path)?;
        self.log
            .info(&format!("Loaded {} tasks from {}", df.height(), path.display()));

        for column in TASK_DATE_COLUMNS {
            coerce::coerce_datetime(&mut df, column)?;
        }

        Ok(df)
    }

    fn read_sales(&self, path: &Path) -> Result<DataFrame, LoaderError> {
        let mut df = self.read_csv(path)?;
        self.log.info(&format!(
            "Loaded {} sales leads from {}",
            df.height(),
            path.display()
        ));

        coerce::coerce_datetime(&mut df, "created_date")?;
        coerce::coerce_numeric(&mut df, "value")?;

        Ok(df)
    }

    /// Read a CSV file using Polars' lazy reader.
    fn read_csv(&self, path: &Path) -> Result<DataFrame, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }

        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        Ok(df)
    }

    fn read_document(&self, path: &Path) -> Result<String, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }

        Ok(fs::read_to_string(path)?)
    }
}
