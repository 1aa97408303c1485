//! Table rendering of classification results.

use crate::notify::json::Report;
use crate::types::Status;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct ResultRow {
    #[tabled(rename = "Package")]
    package: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Reason")]
    reason: String,
    #[tabled(rename = "Private latest")]
    private_version: String,
    #[tabled(rename = "Public latest")]
    public_version: String,
}

/// Render results as a table.
pub fn render_table(report: &Report) -> String {
    let rows: Vec<ResultRow> = report
        .packages
        .iter()
        .map(|p| ResultRow {
            package: p.package.clone(),
            version: p.version.clone(),
            status: format_status(p.status),
            reason: p.reason.clone(),
            private_version: or_dash(&p.private_version),
            public_version: or_dash(&p.public_version),
        })
        .collect();

    Table::new(rows).with(Style::modern()).to_string()
}

fn format_status(status: Status) -> String {
    let text = status.as_str();
    match status {
        Status::Secure | Status::Available => text.green().to_string(),
        Status::Vulnerable => text.red().bold().to_string(),
        Status::Suspicious => text.yellow().to_string(),
        Status::NotFound | Status::NotPossible | Status::Unknown => text.dimmed().to_string(),
    }
}

fn or_dash(s: &str) -> String {
    if s.is_empty() {
        "-".to_string()
    } else {
        s.to_string()
    }
}
