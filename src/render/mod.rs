//! Output writers for a finished comparison report.

pub mod csv;
pub mod html;

pub use self::csv::render_csv;
pub use self::html::render_html_report;

use crate::model::ComparisonReport;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    #[default]
    Json,
    Csv,
    Html,
}

pub fn render_json(report: &ComparisonReport) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn render(report: &ComparisonReport, format: Format) -> anyhow::Result<String> {
    match format {
        Format::Json => render_json(report),
        Format::Csv => render_csv(report),
        Format::Html => render_html_report(report),
    }
}
