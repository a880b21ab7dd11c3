use chrono::NaiveDate;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};
use vdotrs::export::export_personal_bests;
use vdotrs::specialty::{load_events, personal_bests};
use vdotrs::{
    export_report, export_report_to_file, EventName, ErrorKind, ExportFormat, InMemoryStore,
    PerformanceRecord, SpecialtyEvent, VdotEngine, VdotService,
};

/// Export tests for reports written through the public API

#[test]
fn test_json_report_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("vdot.json");
    let record = PerformanceRecord {
        id: Some(3),
        ..PerformanceRecord::new(10.0, "km", "00:40:00").with_conditions(Some(40.0), Some(21.5))
    };
    let report = VdotEngine::analyze(&record).unwrap();

    export_report_to_file(&report, ExportFormat::Json, &path).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    for key in [
        "id",
        "distanceValue",
        "distanceUnit",
        "time",
        "elevation",
        "temperature",
        "VDOT",
        "velocity",
        "vo2max_fraction",
        "pace_zones",
        "race_times",
    ] {
        assert!(keys.contains(&key), "missing key {}", key);
    }

    assert_eq!(value["id"], 3);
    assert_eq!(value["temperature"], 21.5);
    assert_eq!(value["pace_zones"][0]["E"][1]["1Km"]["lower_pace"], "05:42");
    assert_eq!(value["pace_zones"][1]["M"][0]["1mi"]["upper_pace"], "");
    assert_eq!(value["race_times"][0]["race"], "マラソン");
    assert_eq!(value["race_times"][1]["race"], "ハーフマラソン");
}

#[test]
fn test_csv_report_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("vdot.csv");
    let report = VdotEngine::analyze(&PerformanceRecord::new(5.0, "km", "00:20:00")).unwrap();

    export_report_to_file(&report, ExportFormat::Csv, &path).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 55);
    assert_eq!(rows.iter().filter(|r| &r[0] == "pace_zone").count(), 40);

    let five_k = rows.iter().find(|r| &r[0] == "race" && &r[1] == "5Km").unwrap();
    assert_eq!(&five_k[5], "00:20:00");
    assert_eq!(&five_k[6], "04:00 /km");
}

#[test]
fn test_specialty_event_text_report() {
    let event = SpecialtyEvent {
        id: None,
        user_id: 4,
        event_name: EventName::M1500,
        best_time: "4'12\"11".to_string(),
        recorded_at: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
    };
    let report = event.report().unwrap();

    let mut buffer = Vec::new();
    export_report(&report, ExportFormat::Text, &mut buffer).unwrap();
    let content = String::from_utf8(buffer).unwrap();

    assert!(content.contains("SPECIALTY EVENT"));
    assert!(content.contains("Event: 1500m"));
    assert!(content.contains("Recorded: 2024-06-01"));
    assert!(content.contains(&format!("VDOT: {}", report.analysis.vdot)));
    assert!(content.contains("RACE PREDICTIONS"));
}

#[test]
fn test_report_from_records_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"id": 1, "user_id": 2, "distance_value": 10, "distance_unit": "km", "time": "00:40:00"}},
            {{"id": 2, "user_id": 2, "distance_value": 5, "distance_unit": "km", "time": "00:18:00"}}
        ]"#
    )
    .unwrap();

    let service = VdotService::new(InMemoryStore::load_json(file.path()).unwrap());

    // the earliest stored record is the user's record
    let report = service.user_vdot_value(2).unwrap();
    assert_eq!(report.id, Some(1));
    assert_eq!(report.analysis.vdot, 52);

    let err = service.user_vdot_value(3).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RecordNotFound);
    assert_eq!(err.to_response().kind, ErrorKind::RecordNotFound);
}

#[test]
fn test_personal_bests_listing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("specialty_events.json");
    std::fs::write(
        &path,
        r#"[
            {"id": 1, "user_id": 5, "event_name": "5000m", "best_time": "0:20:00", "recorded_at": "2024-05-12"},
            {"id": 2, "user_id": 5, "event_name": "1500m", "best_time": "4'99\"", "recorded_at": "2024-06-01"},
            {"id": 3, "user_id": 6, "event_name": "10000m", "best_time": "0:40:00", "recorded_at": "2024-07-01"}
        ]"#,
    )
    .unwrap();

    let bests = personal_bests(&load_events(&path).unwrap(), 5);
    assert_eq!(bests.len(), 2);

    let mut text = Vec::new();
    export_personal_bests(&bests, ExportFormat::Text, &mut text).unwrap();
    let text = String::from_utf8(text).unwrap();
    assert!(text.contains("PERSONAL BESTS"));
    assert!(text.contains("5000m"));
    assert!(text.contains("2024-06-01"));
    assert!(!text.contains("10000m"));

    let mut csv_out = Vec::new();
    export_personal_bests(&bests, ExportFormat::Csv, &mut csv_out).unwrap();
    let csv_out = String::from_utf8(csv_out).unwrap();
    let lines: Vec<&str> = csv_out.lines().collect();
    assert_eq!(lines[0], "id,event_name,best_time,recorded_at,VDOT");
    assert_eq!(lines[1], "1,5000m,0:20:00,2024-05-12,50");

    let mut json_out = Vec::new();
    export_personal_bests(&bests, ExportFormat::Json, &mut json_out).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&json_out).unwrap();
    assert_eq!(value[0]["VDOT"], 50);
}
