use super::ReportContent;
use crate::error::ExportError;
use crate::pace_zones::{TrainingZone, ZONE_DISTANCES};
use crate::race_prediction::display_name;
use crate::specialty::PersonalBest;
use std::io::Write;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct RaceRow<'a> {
    #[tabled(rename = "Race")]
    race: &'a str,
    #[tabled(rename = "Predicted Time")]
    predicted_time: &'a str,
    #[tabled(rename = "Pace /km")]
    pace_per_km: &'a str,
}

/// Export a report as human-readable text tables
pub fn write_report<R, W>(report: &R, mut writer: W) -> Result<(), ExportError>
where
    R: ReportContent,
    W: Write,
{
    let (title, heading) = report.heading();
    let analysis = report.analysis();

    writeln!(writer, "{}", "=".repeat(title.len()))?;
    writeln!(writer, "{}", title)?;
    writeln!(writer, "{}", "=".repeat(title.len()))?;
    for (label, value) in &heading {
        writeln!(writer, "{}: {}", label, value)?;
    }
    writeln!(writer)?;

    writeln!(writer, "VDOT: {}", analysis.vdot)?;
    writeln!(writer, "Velocity: {:.1} m/min", analysis.velocity)?;
    writeln!(writer, "VO2max fraction: {:.3}", analysis.vo2max_fraction)?;
    writeln!(writer)?;

    writeln!(writer, "TRAINING PACES")?;
    writeln!(writer, "{}", pace_table(report))?;
    writeln!(writer)?;

    writeln!(writer, "RACE PREDICTIONS")?;
    let rows = analysis.race_times.iter().map(|race| RaceRow {
        race: display_name(race.race),
        predicted_time: &race.predicted_time,
        pace_per_km: &race.pace_per_km,
    });
    let mut races = Table::new(rows);
    races.with(Style::rounded());
    writeln!(writer, "{}", races)?;

    Ok(())
}

/// Export a user's personal bests as one table
pub fn write_personal_bests<W: Write>(bests: &[PersonalBest], mut writer: W) -> Result<(), ExportError> {
    writeln!(writer, "PERSONAL BESTS")?;
    if bests.is_empty() {
        writeln!(writer, "No personal bests recorded.")?;
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["Event", "Best Time", "Recorded", "VDOT"]);
    for best in bests {
        builder.push_record([
            best.event_name.to_string(),
            best.best_time.clone(),
            best.recorded_at.format("%Y-%m-%d").to_string(),
            best.vdot.map_or_else(|| "-".to_string(), |v| v.to_string()),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    writeln!(writer, "{}", table)?;
    Ok(())
}

/// Distances down, zones across; E cells show `lower-upper`
fn pace_table<R: ReportContent>(report: &R) -> String {
    let table = &report.analysis().pace_zones;
    let mut builder = Builder::default();

    let mut header = vec!["Distance".to_string()];
    header.extend(TrainingZone::ALL.iter().map(|z| z.label().to_string()));
    builder.push_record(header);

    for distance in ZONE_DISTANCES.iter() {
        let mut row = vec![distance.label.to_string()];
        for zone in TrainingZone::ALL {
            let cell = match table.zone(zone).and_then(|z| z.pace_at(distance.label)) {
                Some(pace) if pace.upper_pace.is_empty() => pace.lower_pace.clone(),
                Some(pace) => format!("{}-{}", pace.lower_pace, pace.upper_pace),
                None => String::new(),
            };
            row.push(cell);
        }
        builder.push_record(row);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}
