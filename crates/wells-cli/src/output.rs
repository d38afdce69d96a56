//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use wells_domain::WellRecord;
use wells_ingest::RunSummary;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format one well record.
    pub fn format_record(&self, record: &WellRecord) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
            OutputFormat::Table => Ok(self.format_record_table(record)),
        }
    }

    /// Format the outcome of an ingestion run.
    pub fn format_summary(&self, summary: &RunSummary) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
            OutputFormat::Table => Ok(self.format_summary_table(summary)),
        }
    }

    fn format_record_table(&self, record: &WellRecord) -> String {
        let rows: Vec<(&str, String)> = vec![
            ("API Number", record.api_number.to_string()),
            ("Operator", record.operator.clone()),
            ("Status", record.status.clone()),
            ("Well Type", record.well_type.clone()),
            ("Work Type", record.work_type.clone()),
            ("Directional Status", record.directional_status.clone()),
            ("Multi-Lateral", record.multi_lateral.clone()),
            ("Mineral Owner", record.mineral_owner.clone()),
            ("Surface Owner", record.surface_owner.clone()),
            ("Surface Location", record.surface_location.clone()),
            ("GL Elevation", record.gl_elevation.to_string()),
            ("KB Elevation", record.kb_elevation.to_string()),
            ("DF Elevation", record.df_elevation.to_string()),
            ("Completion", record.single_multiple_completion.clone()),
            ("Potash Waiver", record.potash_waiver.clone()),
            ("Spud Date", record.spud_date.format("%Y-%m-%d").to_string()),
            ("Last Inspection", record.last_inspection.format("%Y-%m-%d").to_string()),
            ("TVD", record.tvd.to_string()),
            ("Latitude", record.latitude.to_string()),
            ("Longitude", record.longitude.to_string()),
            ("CRS", record.crs.clone()),
        ];

        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (field, value) in rows {
            builder.push_record([field.to_string(), value]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    fn format_summary_table(&self, summary: &RunSummary) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Run", "Total", "Ingested", "Skipped", "Failed", "Elapsed"]);
        builder.push_record([
            summary.run_id.to_string(),
            summary.total.to_string(),
            summary.ingested.to_string(),
            summary.skipped.to_string(),
            summary.failed().to_string(),
            format!("{:.1}s", summary.elapsed().as_secs_f64()),
        ]);

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let mut out = table.to_string();

        if !summary.failures.is_empty() {
            let mut failures = Builder::default();
            failures.push_record(["API Number", "Reason"]);
            for failure in &summary.failures {
                failures.push_record([failure.api_number.to_string(), failure.reason.clone()]);
            }
            let mut table = failures.build();
            table.with(Style::rounded());

            out.push('\n');
            out.push_str(&self.warning(&format!("{} item(s) failed", summary.failed())));
            out.push('\n');
            out.push_str(&table.to_string());
        }

        if summary.cancelled {
            out.push('\n');
            out.push_str(&self.warning(&format!(
                "Cancelled after {} of {} item(s); rerun to resume",
                summary.processed(),
                summary.total
            )));
        } else if summary.failures.is_empty() {
            out.push('\n');
            out.push_str(&self.success("Ingestion complete"));
        }

        out
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wells_domain::ApiNumber;

    fn create_test_record() -> WellRecord {
        let mut record = WellRecord::new(ApiNumber::parse("30-015-20001").unwrap());
        record.operator = "ACME OIL".to_string();
        record.surface_location = "L, 10N, 5E".to_string();
        record.latitude = 32.5;
        record.longitude = -103.7;
        record
    }

    #[test]
    fn test_record_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_record(&create_test_record()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["api_number"], "30-015-20001");
        assert_eq!(value["operator"], "ACME OIL");
    }

    #[test]
    fn test_record_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_record(&create_test_record()).unwrap();
        assert!(output.contains("Operator"));
        assert!(output.contains("ACME OIL"));
        assert!(output.contains("L, 10N, 5E"));
    }

    #[test]
    fn test_summary_table_lists_failures() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let mut summary = RunSummary::new(2);
        summary.record_ingested();
        summary.record_failure(&ApiNumber::parse("30-015-9").unwrap(), "HTTP 404");

        let output = formatter.format_summary(&summary).unwrap();
        assert!(output.contains("30-015-9"));
        assert!(output.contains("HTTP 404"));
        assert!(output.contains("1 item(s) failed"));
    }

    #[test]
    fn test_summary_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let mut summary = RunSummary::new(1);
        summary.record_skipped();

        let output = formatter.format_summary(&summary).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["skipped"], 1);
    }

    #[test]
    fn test_no_color() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("done"), "✓ done");
        assert_eq!(formatter.error("bad"), "✗ bad");
    }
}
