// ABOUTME: Common utilities and fixtures for integration tests
// ABOUTME: Provides a temp workspace, a reflectable fixture type and a fixed clock

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use tokio::fs;

use templar::template::{Reflectable, StringProperty};

pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub async fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, contents)
            .await
            .expect("Failed to write test file");
        path
    }
}

/// The built `templar` binary, isolated from any config in the caller's cwd
pub fn templar_command(env: &TestEnvironment) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_templar"));
    command
        .current_dir(env.path())
        .env_remove("RUST_LOG")
        .env_remove("TEMPLAR_LOG_LEVEL")
        .env_remove("TEMPLAR_LOG_FORMAT")
        .env_remove("TEMPLAR_STRICT_MODE")
        .env_remove("TEMPLAR_ESCAPE_HTML")
        .env("HOME", env.path());
    command
}

/// 2024-01-31T12:00:00Z, chosen so month arithmetic hits a short month
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 31, 12, 0, 0).unwrap()
}

pub fn millis(year: i32, month: u32, day: u32) -> i64 {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .unwrap()
        .timestamp_millis()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invoice {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub reference: String,
    pub due: String,
}

impl Invoice {
    pub fn new(title: &str, summary: &str, reference: &str, due: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            summary: Some(summary.to_string()),
            reference: reference.to_string(),
            due: due.to_string(),
        }
    }

    fn get_title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn set_title(&mut self, value: String) {
        self.title = Some(value);
    }

    fn get_summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    fn set_summary(&mut self, value: String) {
        self.summary = Some(value);
    }

    fn get_reference(&self) -> Option<&str> {
        Some(&self.reference)
    }

    fn get_due(&self) -> Option<&str> {
        Some(&self.due)
    }

    fn set_due(&mut self, value: String) -> Result<(), String> {
        if value.is_empty() {
            return Err("due date rendered empty".to_string());
        }
        self.due = value;
        Ok(())
    }
}

impl Reflectable for Invoice {
    fn string_properties() -> Vec<StringProperty<Self>> {
        vec![
            StringProperty::new("title", Invoice::get_title, Invoice::set_title),
            StringProperty::new("summary", Invoice::get_summary, Invoice::set_summary),
            StringProperty::read_only("reference", Invoice::get_reference),
            StringProperty::fallible("due", Invoice::get_due, Invoice::set_due),
        ]
    }
}
