use crate::engine::PerformanceAnalysis;
use crate::error::ExportError;
use serde::Serialize;
use std::io::Write;

/// One CSV line; pace zone rows leave the race columns empty and vice versa
#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    section: &'static str,
    name: &'a str,
    distance: &'a str,
    lower_pace: &'a str,
    upper_pace: &'a str,
    predicted_time: &'a str,
    pace_per_km: &'a str,
}

/// Export the pace table (one row per zone and distance) followed by the
/// race predictions (one row per race)
pub fn write_report<W: Write>(analysis: &PerformanceAnalysis, writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for zone in &analysis.pace_zones.zones {
        for cell in &zone.distances {
            csv_writer.serialize(ReportRow {
                section: "pace_zone",
                name: zone.zone.label(),
                distance: cell.distance,
                lower_pace: &cell.pace.lower_pace,
                upper_pace: &cell.pace.upper_pace,
                predicted_time: "",
                pace_per_km: "",
            })?;
        }
    }

    for race in &analysis.race_times {
        csv_writer.serialize(ReportRow {
            section: "race",
            name: race.race,
            distance: "",
            lower_pace: "",
            upper_pace: "",
            predicted_time: &race.predicted_time,
            pace_per_km: &race.pace_per_km,
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Export plain serializable rows, one line each, with a header
pub fn write_rows<T: Serialize, W: Write>(rows: &[T], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::VdotEngine;
    use crate::models::PerformanceRecord;

    #[test]
    fn test_csv_rows() {
        let report = VdotEngine::analyze(&PerformanceRecord::new(10.0, "km", "00:40:00")).unwrap();

        let mut buffer = Vec::new();
        write_report(&report.analysis, &mut buffer).unwrap();
        let content = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(
            lines[0],
            "section,name,distance,lower_pace,upper_pace,predicted_time,pace_per_km"
        );
        assert_eq!(lines.len(), 1 + 40 + 15);
        assert_eq!(lines[1], "pace_zone,E,1mi,09:11,08:21,,");
        assert!(lines.contains(&"race,マラソン,,,,03:04:00,04:21 /km"));
        assert!(lines.contains(&"race,10Km,,,,00:40:00,04:00 /km"));
    }
}
