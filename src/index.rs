use chrono::{DateTime, NaiveDateTime};
use parking_lot::RwLock;

use crate::construct::{EntityIndex, FrameCollection, Lookup, RelationMap, VersionedEntityIndex};
use crate::model::*;

/// The index built by one parse session.
///
/// Every store can be read while an extractor commits into another one. Entity
/// indexes are keyed by id. Relation maps reconstruct associations that the
/// document only expresses through nesting, which is why they are keyed by the
/// reference string of the nested side.
#[derive(Debug, Default)]
pub struct NetexIndex {
    // ------------- resources -------------
    pub authorities: EntityIndex<Authority>,
    pub operators: EntityIndex<Operator>,
    pub brandings: EntityIndex<Branding>,
    pub type_of_product_categories: EntityIndex<TypeOfProductCategory>,

    // ------------- sites -------------
    pub stop_places: VersionedEntityIndex<StopPlace>,
    pub quays: VersionedEntityIndex<Quay>,
    pub groups_of_stop_places: EntityIndex<GroupOfStopPlaces>,
    pub flexible_stop_places: EntityIndex<FlexibleStopPlace>,
    pub tariff_zones: EntityIndex<TariffZone>,
    pub groups_of_tariff_zones: EntityIndex<GroupOfTariffZones>,
    pub topographic_places: EntityIndex<TopographicPlace>,
    pub parkings: EntityIndex<Parking>,
    pub stop_place_id_by_quay_id: RelationMap,
    pub parkings_by_parent_site_ref: Lookup<Parking>,

    // ------------- service topology -------------
    pub networks: EntityIndex<Network>,
    pub groups_of_lines: EntityIndex<GroupOfLines>,
    pub routes: EntityIndex<Route>,
    pub lines: EntityIndex<Line>,
    pub flexible_lines: EntityIndex<FlexibleLine>,
    pub journey_patterns: EntityIndex<JourneyPattern>,
    pub service_journey_patterns: EntityIndex<ServiceJourneyPattern>,
    pub destination_displays: EntityIndex<DestinationDisplay>,
    pub service_links: EntityIndex<ServiceLink>,
    pub scheduled_stop_points: EntityIndex<ScheduledStopPoint>,
    pub route_points: EntityIndex<RoutePoint>,
    pub network_id_by_group_of_lines_id: RelationMap,
    pub quay_id_by_stop_point_ref: RelationMap,
    pub stop_place_id_by_stop_point_ref: RelationMap,
    pub flexible_stop_place_id_by_stop_point_ref: RelationMap,
    pub passenger_stop_assignments_by_stop_point_ref: Lookup<PassengerStopAssignment>,

    // ------------- notices -------------
    pub notices: EntityIndex<Notice>,
    pub notice_assignments: EntityIndex<NoticeAssignment>,

    // ------------- calendar -------------
    pub day_types: EntityIndex<DayType>,
    pub operating_periods: EntityIndex<OperatingPeriod>,
    pub operating_days: EntityIndex<OperatingDay>,
    pub day_type_assignments_by_day_type_id: Lookup<DayTypeAssignment>,

    // ------------- timetable -------------
    pub service_journeys: EntityIndex<ServiceJourney>,
    pub dated_service_journeys: EntityIndex<DatedServiceJourney>,
    pub dead_runs: EntityIndex<DeadRun>,
    pub service_journey_interchanges: EntityIndex<ServiceJourneyInterchange>,
    pub dated_service_journeys_by_service_journey_id: Lookup<DatedServiceJourney>,
    pub service_journey_interchanges_by_service_journey_id: Lookup<ServiceJourneyInterchange>,

    // ------------- vehicle schedule and fares -------------
    pub blocks: EntityIndex<Block>,
    pub fare_zones: EntityIndex<FareZone>,

    // ------------- raw frames -------------
    pub resource_frames: FrameCollection<ResourceFrame>,
    pub site_frames: FrameCollection<SiteFrame>,
    pub service_frames: FrameCollection<ServiceFrame>,
    pub service_calendar_frames: FrameCollection<ServiceCalendarFrame>,
    pub timetable_frames: FrameCollection<TimetableFrame>,
    pub vehicle_schedule_frames: FrameCollection<VehicleScheduleFrame>,
    pub fare_frames: FrameCollection<FareFrame>,
    // stored without their nested frames
    pub composite_frames: FrameCollection<CompositeFrame>,

    time_zone: RwLock<Option<String>>,
    publication_timestamp: RwLock<Option<String>>,
}

impl NetexIndex {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn time_zone(&self) -> Option<String> {
        self.time_zone.read().clone()
    }
    pub fn set_time_zone(&self, time_zone: impl Into<String>) {
        *self.time_zone.write() = Some(time_zone.into());
    }
    /// The publication timestamp exactly as the last document carried it.
    pub fn publication_timestamp(&self) -> Option<String> {
        self.publication_timestamp.read().clone()
    }
    /// The publication timestamp read as a date-time, in UTC when the text
    /// carries an offset. `None` when it is absent or not a date-time.
    pub fn publication_time(&self) -> Option<NaiveDateTime> {
        let timestamp = self.publication_timestamp.read();
        let text = timestamp.as_deref()?;
        match DateTime::parse_from_rfc3339(text) {
            Ok(time) => Some(time.naive_utc()),
            Err(_) => text.parse::<NaiveDateTime>().ok(),
        }
    }
    pub fn set_publication_timestamp(&self, timestamp: impl Into<String>) {
        *self.publication_timestamp.write() = Some(timestamp.into());
    }
}
