//! Output formatting

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

/// One line of command output
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct Report {
    pub outcome: String,
    pub message: String,
    pub redirect: String,
}

impl Report {
    pub fn new(outcome: &str, message: impl Into<String>) -> Self {
        Self {
            outcome: outcome.into(),
            message: message.into(),
            redirect: String::new(),
        }
    }

    pub fn with_redirect(mut self, redirect: impl Into<String>) -> Self {
        self.redirect = redirect.into();
        self
    }

    fn colored(&self) -> Self {
        let outcome = match self.outcome.as_str() {
            "valid" | "accepted" => self.outcome.green().to_string(),
            "ignored" => self.outcome.yellow().to_string(),
            _ => self.outcome.red().to_string(),
        };
        Self {
            outcome,
            ..self.clone()
        }
    }
}

impl OutputFormat {
    pub fn print(&self, reports: &[Report]) {
        match self {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(reports).unwrap_or_default());
            }
            OutputFormat::Yaml => {
                println!("{}", serde_yaml::to_string(reports).unwrap_or_default());
            }
            OutputFormat::Table => {
                let rows: Vec<Report> = reports.iter().map(Report::colored).collect();
                println!("{}", Table::new(rows).with(Style::rounded()));
            }
        }
    }

    pub fn print_value<T: Serialize>(&self, data: &T) {
        match self {
            OutputFormat::Yaml => {
                println!("{}", serde_yaml::to_string(data).unwrap_or_default());
            }
            OutputFormat::Json | OutputFormat::Table => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
        }
    }
}
