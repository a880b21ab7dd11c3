use crate::engine::{PerformanceAnalysis, VdotReport};
use crate::specialty::{PersonalBest, SpecialtyReport};
use crate::error::ExportError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub mod csv;
pub mod json;
pub mod text;

/// Export format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
    Text,
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "text" | "txt" | "table" => Ok(ExportFormat::Text),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Anything that can be rendered as a VDOT report
pub trait ReportContent: Serialize {
    /// Title plus `(label, value)` lines describing the source performance
    fn heading(&self) -> (String, Vec<(String, String)>);

    fn analysis(&self) -> &PerformanceAnalysis;
}

impl ReportContent for VdotReport {
    fn heading(&self) -> (String, Vec<(String, String)>) {
        let mut lines = vec![
            ("Distance".to_string(), format!("{} {}", self.distance_value, self.distance_unit)),
            ("Time".to_string(), self.duration.clone()),
        ];
        if let Some(elevation) = self.elevation {
            lines.push(("Elevation".to_string(), format!("{} m", elevation)));
        }
        if let Some(temperature) = self.temperature {
            lines.push(("Temperature".to_string(), format!("{} °C", temperature)));
        }

        let title = match self.id {
            Some(id) => format!("VDOT REPORT (record {})", id),
            None => "VDOT REPORT".to_string(),
        };
        (title, lines)
    }

    fn analysis(&self) -> &PerformanceAnalysis {
        &self.analysis
    }
}

impl ReportContent for SpecialtyReport {
    fn heading(&self) -> (String, Vec<(String, String)>) {
        let lines = vec![
            ("Event".to_string(), self.event.event_name.to_string()),
            ("Best time".to_string(), self.event.best_time.clone()),
            ("Recorded".to_string(), self.event.recorded_at.format("%Y-%m-%d").to_string()),
        ];
        ("SPECIALTY EVENT".to_string(), lines)
    }

    fn analysis(&self) -> &PerformanceAnalysis {
        &self.analysis
    }
}

/// Write a report in the requested format
pub fn export_report<R, W>(report: &R, format: ExportFormat, writer: W) -> Result<(), ExportError>
where
    R: ReportContent,
    W: Write,
{
    match format {
        ExportFormat::Json => json::write_report(report, writer),
        ExportFormat::Csv => csv::write_report(report.analysis(), writer),
        ExportFormat::Text => text::write_report(report, writer),
    }
}

/// Write a user's personal-best listing in the requested format
pub fn export_personal_bests<W: Write>(
    bests: &[PersonalBest],
    format: ExportFormat,
    writer: W,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Json => json::write_report(&bests, writer),
        ExportFormat::Csv => csv::write_rows(bests, writer),
        ExportFormat::Text => text::write_personal_bests(bests, writer),
    }
}

/// Write a report to a file, creating or truncating it
pub fn export_report_to_file<R, P>(report: &R, format: ExportFormat, path: P) -> Result<(), ExportError>
where
    R: ReportContent,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let write_failed = |e: std::io::Error| ExportError::WriteFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let file = File::create(path).map_err(write_failed)?;
    let mut writer = BufWriter::new(file);
    export_report(report, format, &mut writer)?;
    writer.flush().map_err(write_failed)?;

    tracing::info!(path = %path.display(), ?format, "report exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::VdotEngine;
    use crate::models::PerformanceRecord;
    use tempfile::tempdir;

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert!(matches!(
            "pdf".parse::<ExportFormat>(),
            Err(ExportError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");
        let report = VdotEngine::analyze(&PerformanceRecord::new(10.0, "km", "00:40:00")).unwrap();

        export_report_to_file(&report, ExportFormat::Json, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"VDOT\": 52"));
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("report.csv");
        let report = VdotEngine::analyze(&PerformanceRecord::new(10.0, "km", "00:40:00")).unwrap();

        let err = export_report_to_file(&report, ExportFormat::Csv, &path).unwrap_err();
        assert!(matches!(err, ExportError::WriteFailed { .. }));
    }
}
