use serde_json::{json, Value};

use netex_index::index::NetexIndex;
use netex_index::model::PublicationDelivery;
use netex_index::parser::{DocumentParser, ParseSummary};

fn parse_into(index: &NetexIndex, frames: Value) -> ParseSummary {
    let document: PublicationDelivery =
        serde_json::from_value(json!({ "dataObjects": frames })).expect("valid document");
    DocumentParser::parse_and_populate_index(index, document).expect("document parses")
}

#[test]
fn day_type_assignments_from_both_levels() {
    let index = NetexIndex::new();
    let summary = parse_into(
        &index,
        json!([{
            "kind": "ServiceCalendarFrame", "id": "SCF1",
            "serviceCalendar": {
                "id": "SC1",
                "dayTypes": [ { "kind": "DayType", "id": "DT1" }, { "kind": "DayTypeRef", "ref": "DT9" } ],
                "operatingDays": [ { "kind": "OperatingDay", "id": "OD1", "calendarDate": "2025-01-01" } ],
                "operatingPeriods": [ { "kind": "OperatingPeriod", "id": "OP1" } ],
                "dayTypeAssignments": [ { "id": "DTA1", "dayTypeRef": { "ref": "DT1" }, "date": "2025-01-01" } ]
            },
            "dayTypes": [ { "kind": "DayType", "id": "DT2" } ],
            "operatingPeriods": [ { "kind": "OperatingPeriodRef", "ref": "OP9" } ],
            "operatingDays": [ { "id": "OD2" } ],
            "dayTypeAssignments": [
                { "id": "DTA2", "dayTypeRef": { "ref": "DT1" }, "operatingPeriodRef": { "ref": "OP1" } },
                { "id": "DTA3" }
            ]
        }]),
    );
    assert!(index.day_types.contains("DT1"));
    assert!(index.day_types.contains("DT2"));
    assert!(!index.day_types.contains("DT9"));
    assert!(index.operating_days.contains("OD1"));
    assert!(index.operating_days.contains("OD2"));
    assert!(index.operating_periods.contains("OP1"));
    assert_eq!(index.operating_periods.len(), 1);
    let assignments = index.day_type_assignments_by_day_type_id.lookup("DT1");
    assert_eq!(assignments.len(), 2);
    assert_eq!(assignments[0].id, "DTA1");
    assert_eq!(summary.diagnostics.dropped().len(), 1);
    assert!(summary.diagnostics.skipped().is_empty());
}

#[test]
fn duplicate_day_type_assignments_are_kept() {
    let index = NetexIndex::new();
    let frame = json!({
        "kind": "ServiceCalendarFrame", "id": "SCF1",
        "dayTypeAssignments": [ { "id": "DTA1", "dayTypeRef": { "ref": "DT1" } } ]
    });
    parse_into(&index, json!([frame.clone()]));
    parse_into(&index, json!([frame]));
    assert_eq!(index.day_type_assignments_by_day_type_id.lookup("DT1").len(), 2);
}

#[test]
fn dated_journeys_and_interchanges_by_service_journey() {
    let index = NetexIndex::new();
    let summary = parse_into(
        &index,
        json!([{
            "kind": "TimetableFrame", "id": "TF1",
            "vehicleJourneys": [
                { "kind": "ServiceJourney", "id": "SJ1" },
                { "kind": "ServiceJourney", "id": "SJ2" },
                {
                    "kind": "DatedServiceJourney", "id": "DSJ1",
                    "operatingDayRef": { "ref": "OD1" },
                    "journeyRefs": [
                        { "kind": "ServiceJourneyRef", "ref": "SJ1" },
                        { "kind": "DatedServiceJourneyRef", "ref": "DSJ0" }
                    ]
                },
                {
                    "kind": "DatedServiceJourney", "id": "DSJ2",
                    "journeyRefs": [ { "kind": "ServiceJourneyRef", "ref": "SJ1" } ]
                },
                { "kind": "DeadRun", "id": "DR1" },
                { "kind": "TemplateServiceJourney", "id": "TSJ1" }
            ],
            "journeyInterchanges": [
                {
                    "kind": "ServiceJourneyInterchange", "id": "SJI1",
                    "fromJourneyRef": { "ref": "SJ1" },
                    "toJourneyRef": { "ref": "SJ2" }
                },
                {
                    "kind": "ServiceJourneyInterchange", "id": "SJI2",
                    "fromJourneyRef": { "ref": "SJ1" }
                },
                { "kind": "ServiceJourneyInterchange", "id": "SJI3" }
            ]
        }]),
    );
    assert_eq!(index.service_journeys.len(), 2);
    assert_eq!(index.dated_service_journeys.len(), 2);
    assert!(index.dead_runs.contains("DR1"));
    let dated = index.dated_service_journeys_by_service_journey_id.lookup("SJ1");
    assert_eq!(dated.len(), 2);
    assert!(index.dated_service_journeys_by_service_journey_id.lookup("DSJ0").is_empty());
    assert_eq!(
        index.dated_service_journeys.get("DSJ1").unwrap().operating_day_ref.as_ref().map(|r| r.target.as_str()),
        Some("OD1")
    );

    let from = index.service_journey_interchanges_by_service_journey_id.lookup("SJ1");
    let to = index.service_journey_interchanges_by_service_journey_id.lookup("SJ2");
    assert_eq!(from.len(), 2);
    assert_eq!(to.len(), 1);
    assert_eq!(from[0].id, "SJI1");
    assert_eq!(from[1].id, "SJI2");
    assert_eq!(to[0].id, "SJI1");
    // an interchange missing a leg is still indexed and related through the other
    assert!(index.service_journey_interchanges.contains("SJI2"));
    assert!(index.service_journey_interchanges.contains("SJI3"));

    assert_eq!(summary.diagnostics.skipped(), &["Journey".to_string()]);
    let dropped = summary.diagnostics.dropped();
    assert_eq!(dropped.len(), 3);
    assert!(dropped[0].contains("'SJI2'") && dropped[0].contains("toJourneyRef"));
    assert!(dropped[1].contains("'SJI3'") && dropped[1].contains("fromJourneyRef"));
}

#[test]
fn timetable_notices_share_the_notice_index() {
    let index = NetexIndex::new();
    parse_into(
        &index,
        json!([{
            "kind": "TimetableFrame", "id": "TF1",
            "notices": [ { "id": "NO1", "text": "Bring a ticket" } ],
            "noticeAssignments": [
                { "id": "NA1", "noticedObjectRef": { "ref": "SJ1" }, "noticeRef": { "ref": "NO1" } }
            ]
        }]),
    );
    assert!(index.notices.contains("NO1"));
    assert!(index.notice_assignments.contains("NA1"));
}

#[test]
fn blocks_and_fare_zones() {
    let index = NetexIndex::new();
    let summary = parse_into(
        &index,
        json!([
            {
                "kind": "VehicleScheduleFrame", "id": "VSF1",
                "blocks": [
                    { "kind": "Block", "id": "B1", "journeys": [ { "ref": "SJ1" }, { "ref": "SJ2" } ] },
                    { "kind": "TrainBlock", "id": "TB1" }
                ]
            },
            { "kind": "FareFrame", "id": "FF1", "fareZones": [ { "id": "FZ1", "name": "Zone 1" } ] }
        ]),
    );
    let block = index.blocks.get("B1").unwrap();
    assert_eq!(block.journeys.len(), 2);
    assert_eq!(block.journeys[1].target, "SJ2");
    assert_eq!(index.blocks.len(), 1);
    assert_eq!(summary.diagnostics.skipped(), &["Block".to_string()]);
    assert_eq!(index.fare_zones.get("FZ1").unwrap().name.as_deref(), Some("Zone 1"));
    assert_eq!(index.fare_frames.len(), 1);
}

#[test]
fn resource_frame_organisations_and_value_sets() {
    let index = NetexIndex::new();
    let summary = parse_into(
        &index,
        json!([{
            "kind": "ResourceFrame", "id": "RF1",
            "organisations": [
                { "kind": "Authority", "id": "A1", "name": "Ruter" },
                { "kind": "Operator", "id": "O1", "name": "Unibuss" },
                { "kind": "GeneralOrganisation", "id": "GO1" }
            ],
            "typesOfValue": [
                { "kind": "Branding", "id": "BR1" },
                {
                    "kind": "ValueSet", "id": "VS1", "nameOfClass": "typeofproductcategory",
                    "values": [
                        { "kind": "TypeOfProductCategory", "id": "TPC1", "name": "Express" },
                        { "kind": "TypeOfProductCategory", "id": "TPC2" }
                    ]
                },
                {
                    "kind": "ValueSet", "id": "VS2", "nameOfClass": "TypeOfService",
                    "values": [ { "kind": "TypeOfProductCategory", "id": "TPC3" } ]
                }
            ]
        }]),
    );
    assert!(index.authorities.contains("A1"));
    assert!(index.operators.contains("O1"));
    assert!(index.brandings.contains("BR1"));
    assert_eq!(index.type_of_product_categories.len(), 2);
    assert!(!index.type_of_product_categories.contains("TPC3"));
    let skipped = summary.diagnostics.skipped();
    assert!(skipped.contains(&"Organisation".to_string()));
    assert!(skipped.contains(&"ValueSet 'VS2'".to_string()));
    assert_eq!(skipped.len(), 2);
}
