use chrono::NaiveDate;
use serde_json::{json, Value};

use netex_index::NetexError;
use netex_index::index::NetexIndex;
use netex_index::loader::NetexLoader;
use netex_index::model::{FrameKind, PublicationDelivery};
use netex_index::parser::{DocumentParser, ParseSummary};

fn document(frames: Value) -> PublicationDelivery {
    serde_json::from_value(json!({ "dataObjects": frames })).expect("valid document")
}

fn parse_into(index: &NetexIndex, frames: Value) -> ParseSummary {
    DocumentParser::parse_and_populate_index(index, document(frames)).expect("document parses")
}

fn site_frame(id: &str, stop_place: &str, version: &str, name: &str) -> Value {
    json!({
        "kind": "SiteFrame", "id": id,
        "stopPlaces": [ {
            "id": stop_place, "version": version, "name": name,
            "quays": [ { "kind": "Quay", "id": format!("{}-Q1", stop_place), "version": version } ]
        } ]
    })
}

fn composite(id: &str, frames: Value) -> Value {
    json!({ "kind": "CompositeFrame", "id": id, "frames": frames })
}

#[test]
fn nesting_depth_does_not_change_the_result() {
    let flat = NetexIndex::new();
    parse_into(&flat, json!([site_frame("SF1", "S1", "1", "Central")]));

    let nested = NetexIndex::new();
    let summary = parse_into(
        &nested,
        json!([composite(
            "C1",
            json!([composite("C2", json!([composite("C3", json!([site_frame("SF1", "S1", "1", "Central")]))]))])
        )]),
    );
    assert_eq!(summary.max_depth, 3);
    assert_eq!(summary.frames_of(FrameKind::Composite), 3);
    assert_eq!(summary.frames_of(FrameKind::Site), 1);
    for index in [&flat, &nested] {
        assert_eq!(
            index.stop_places.latest_version("S1").unwrap().name.as_deref(),
            Some("Central")
        );
        assert_eq!(index.stop_place_id_by_quay_id.get("S1-Q1").as_deref(), Some("S1"));
    }
    assert_eq!(nested.composite_frames.len(), 3);
    assert!(nested.composite_frames.all().iter().all(|frame| frame.frames.is_empty()));
}

#[test]
fn versions_accumulate_across_documents() {
    let index = NetexIndex::new();
    parse_into(&index, json!([site_frame("SF1", "S1", "1", "Central")]));
    parse_into(&index, json!([site_frame("SF2", "S1", "2", "Central Station")]));
    let latest = index.stop_places.latest_version("S1").unwrap();
    assert_eq!(latest.name.as_deref(), Some("Central Station"));
    assert_eq!(index.stop_places.all_versions("S1").len(), 2);
    assert_eq!(index.quays.all_versions("S1-Q1").len(), 2);
    assert_eq!(index.site_frames.len(), 2);
}

#[test]
fn frames_without_extractor_are_skipped() {
    let index = NetexIndex::new();
    let summary = parse_into(
        &index,
        json!([
            { "kind": "GeneralFrame", "id": "G1", "members": [] },
            { "kind": "InfrastructureFrame", "id": "I1" },
            { "kind": "DriverScheduleFrame", "id": "D1" },
            composite("C1", json!([ { "kind": "SalesTransactionFrame", "id": "STF1", "sales": [] } ])),
            site_frame("SF1", "S1", "1", "Central")
        ]),
    );
    let skipped = summary.diagnostics.skipped();
    assert_eq!(
        skipped,
        &[
            "GeneralFrame".to_string(),
            "InfrastructureFrame".to_string(),
            "DriverScheduleFrame".to_string(),
            "SalesTransactionFrame".to_string(),
        ]
    );
    assert_eq!(summary.frames_of(FrameKind::Other), 4);
    assert_eq!(index.stop_places.len(), 1);
}

#[test]
fn malformed_version_aborts_the_document() {
    let index = NetexIndex::new();
    let result = DocumentParser::parse_and_populate_index(
        &index,
        document(json!([
            site_frame("SF1", "S1", "1", "Central"),
            {
                "kind": "SiteFrame", "id": "SF2",
                "stopPlaces": [
                    { "id": "S2", "version": "1" },
                    { "id": "S2", "version": "v2" }
                ]
            },
            {
                "kind": "ServiceFrame", "id": "SV1",
                "lines": [ { "kind": "Line", "id": "L1" } ]
            }
        ])),
    );
    match result {
        Err(NetexError::MalformedVersion { kind, id, version }) => {
            assert_eq!(kind, "StopPlace");
            assert_eq!(id, "S2");
            assert_eq!(version, "v2");
        }
        other => panic!("unexpected result {:?}", other.map(|summary| summary.frames)),
    }
    // frames committed before the failure stay, later ones never run
    assert!(index.stop_places.latest_version("S1").is_some());
    assert!(index.stop_places.latest_version("S2").is_none());
    assert!(index.lines.get("L1").is_none());
}

#[test]
fn time_zone_and_publication_timestamp() {
    let index = NetexIndex::new();
    assert!(index.time_zone().is_none());
    let delivery: PublicationDelivery = serde_json::from_value(json!({
        "publicationTimestamp": "2025-03-01T12:30:00",
        "dataObjects": [ {
            "kind": "CompositeFrame", "id": "C1",
            "frameDefaults": { "defaultLocale": { "timeZone": "Europe/Oslo" } },
            "validityConditions": [],
            "frames": [ site_frame("SF1", "S1", "1", "Central") ]
        } ]
    }))
    .unwrap();
    let summary = DocumentParser::parse_and_populate_index(&index, delivery).unwrap();
    assert_eq!(index.time_zone().as_deref(), Some("Europe/Oslo"));
    let expected = NaiveDate::from_ymd_opt(2025, 3, 1)
        .and_then(|date| date.and_hms_opt(12, 30, 0))
        .unwrap();
    assert_eq!(index.publication_timestamp().as_deref(), Some("2025-03-01T12:30:00"));
    assert_eq!(index.publication_time(), Some(expected));
    assert!(summary
        .diagnostics
        .skipped()
        .contains(&"CompositeFrame.validityConditions".to_string()));

    // a later composite without defaults keeps the zone
    parse_into(&index, json!([composite("C2", json!([]))]));
    assert_eq!(index.time_zone().as_deref(), Some("Europe/Oslo"));
}

#[test]
fn publication_timestamps_with_offsets_pass_through() {
    let cases = [
        ("2024-05-01T12:00:00Z", Some((12, 0))),
        ("2024-05-01T12:00:00.123+02:00", Some((10, 123))),
        ("sometime in May", None),
    ];
    for (timestamp, utc) in cases {
        let index = NetexIndex::new();
        let document = json!({
            "publicationTimestamp": timestamp,
            "dataObjects": [ site_frame("SF1", "S1", "1", "Central") ]
        })
        .to_string();
        NetexLoader::new(&index)
            .load("stops.json", document.as_bytes())
            .expect("timestamp never rejects the document");
        assert!(index.stop_places.contains("S1"), "{}", timestamp);
        assert_eq!(index.publication_timestamp().as_deref(), Some(timestamp));
        let expected = utc.and_then(|(hour, milli)| {
            NaiveDate::from_ymd_opt(2024, 5, 1).and_then(|date| date.and_hms_milli_opt(hour, 0, 0, milli))
        });
        assert_eq!(index.publication_time(), expected, "{}", timestamp);
    }
}

#[test]
fn raw_frames_are_kept_per_kind() {
    let index = NetexIndex::new();
    let summary = parse_into(
        &index,
        json!([
            { "kind": "ResourceFrame", "id": "RF1" },
            { "kind": "ServiceCalendarFrame", "id": "SCF1" },
            { "kind": "VehicleScheduleFrame", "id": "VSF1" },
            { "kind": "TimetableFrame", "id": "TF1" },
            { "kind": "ServiceFrame", "id": "SV1" },
            { "kind": "SiteFrame", "id": "SF1" },
            { "kind": "FareFrame", "id": "FF1", "fareZones": [ { "id": "FZ1" } ] },
            composite("C1", json!([ { "kind": "TimetableFrame", "id": "TF2" } ]))
        ]),
    );
    assert_eq!(index.resource_frames.len(), 1);
    assert_eq!(index.service_calendar_frames.len(), 1);
    assert_eq!(index.vehicle_schedule_frames.len(), 1);
    assert_eq!(index.service_frames.len(), 1);
    assert_eq!(index.site_frames.len(), 1);
    assert_eq!(index.fare_frames.len(), 1);
    assert_eq!(index.composite_frames.len(), 1);
    let timetable_ids: Vec<String> = index
        .timetable_frames
        .all()
        .iter()
        .map(|frame| frame.id.clone())
        .collect();
    assert_eq!(timetable_ids, vec!["TF1".to_string(), "TF2".to_string()]);
    assert_eq!(summary.frames_of(FrameKind::Timetable), 2);
    assert_eq!(summary.frames_of(FrameKind::Fare), 1);
    assert_eq!(summary.max_depth, 1);
    assert!(summary.diagnostics.is_empty());
}

#[test]
fn summaries_merge() {
    let index = NetexIndex::new();
    let mut total = parse_into(&index, json!([site_frame("SF1", "S1", "1", "a")]));
    total.merge(parse_into(
        &index,
        json!([composite("C1", json!([site_frame("SF2", "S2", "1", "b")])), { "kind": "GeneralFrame" }]),
    ));
    assert_eq!(total.frames_of(FrameKind::Site), 2);
    assert_eq!(total.frames_of(FrameKind::Composite), 1);
    assert_eq!(total.max_depth, 1);
    assert_eq!(total.diagnostics.skipped().len(), 1);
}

#[test]
fn nested_calendar_frame_matches_top_level() {
    let calendar = json!({
        "kind": "ServiceCalendarFrame", "id": "SCF1",
        "dayTypes": [ { "kind": "DayType", "id": "DT1" } ],
        "operatingPeriods": [ { "kind": "OperatingPeriod", "id": "OP1" } ],
        "dayTypeAssignments": [ { "id": "DTA1", "dayTypeRef": { "ref": "DT1" } } ]
    });
    let flat = NetexIndex::new();
    parse_into(&flat, json!([calendar.clone()]));
    let nested = NetexIndex::new();
    parse_into(
        &nested,
        json!([composite("C1", json!([composite("C2", json!([composite("C3", json!([calendar]))]))]))]),
    );
    for index in [&flat, &nested] {
        assert_eq!(index.day_types.len(), 1);
        assert!(index.operating_periods.contains("OP1"));
        assert_eq!(index.day_type_assignments_by_day_type_id.lookup("DT1").len(), 1);
        assert_eq!(index.service_calendar_frames.len(), 1);
    }
}
