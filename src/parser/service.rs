use std::collections::HashMap;
use std::sync::Arc;

use crate::construct::{EntityIndex, OtherHasher, StagedLookup};
use crate::datatype::Entity;
use crate::error::Result;
use crate::index::NetexIndex;
use crate::model::{
    DestinationDisplay, FlexibleLine, FlexibleStopAssignment, FlexibleStopPlace, GroupOfLines,
    JourneyPattern, JourneyPatternElement, Line, LineElement, Network, PassengerStopAssignment,
    Route, RoutePoint, ScheduledStopPoint, ServiceFrame, ServiceJourneyPattern, ServiceLink,
    StopAssignment,
};

use super::notice::NoticeParser;
use super::{Diagnostics, FrameParser};

/// Extracts the network topology of a service frame.
///
/// Flexible stop assignments are resolved against the flexible stop places
/// already committed to the index, so a site frame has to be walked before
/// the service frame that refers to it.
#[derive(Debug)]
pub struct ServiceFrameParser<'a> {
    flexible_stop_places: &'a EntityIndex<FlexibleStopPlace>,
    networks: Vec<Network>,
    groups_of_lines: Vec<GroupOfLines>,
    routes: Vec<Route>,
    lines: Vec<Line>,
    flexible_lines: Vec<FlexibleLine>,
    journey_patterns: Vec<JourneyPattern>,
    service_journey_patterns: Vec<ServiceJourneyPattern>,
    destination_displays: Vec<DestinationDisplay>,
    service_links: Vec<ServiceLink>,
    scheduled_stop_points: Vec<ScheduledStopPoint>,
    route_points: Vec<RoutePoint>,
    network_id_by_group_of_lines_id: HashMap<String, String, OtherHasher>,
    quay_id_by_stop_point_ref: HashMap<String, String, OtherHasher>,
    stop_place_id_by_stop_point_ref: HashMap<String, String, OtherHasher>,
    flexible_stop_place_id_by_stop_point_ref: HashMap<String, String, OtherHasher>,
    passenger_stop_assignments_by_stop_point_ref: StagedLookup<PassengerStopAssignment>,
    notice_parser: NoticeParser,
}
impl<'a> ServiceFrameParser<'a> {
    pub fn new(flexible_stop_places: &'a EntityIndex<FlexibleStopPlace>) -> Self {
        Self {
            flexible_stop_places,
            networks: Vec::new(),
            groups_of_lines: Vec::new(),
            routes: Vec::new(),
            lines: Vec::new(),
            flexible_lines: Vec::new(),
            journey_patterns: Vec::new(),
            service_journey_patterns: Vec::new(),
            destination_displays: Vec::new(),
            service_links: Vec::new(),
            scheduled_stop_points: Vec::new(),
            route_points: Vec::new(),
            network_id_by_group_of_lines_id: HashMap::default(),
            quay_id_by_stop_point_ref: HashMap::default(),
            stop_place_id_by_stop_point_ref: HashMap::default(),
            flexible_stop_place_id_by_stop_point_ref: HashMap::default(),
            passenger_stop_assignments_by_stop_point_ref: StagedLookup::new(),
            notice_parser: NoticeParser::default(),
        }
    }
    fn parse_stop_assignments(&mut self, assignments: &[StopAssignment], diagnostics: &mut Diagnostics) {
        for assignment in assignments {
            match assignment {
                StopAssignment::PassengerStopAssignment(assignment) => {
                    self.parse_passenger_stop_assignment(assignment, diagnostics)
                }
                StopAssignment::FlexibleStopAssignment(assignment) => {
                    self.parse_flexible_stop_assignment(assignment, diagnostics)
                }
                StopAssignment::Unrecognized => diagnostics.record_skipped("StopAssignment"),
            }
        }
    }
    fn parse_passenger_stop_assignment(
        &mut self,
        assignment: &PassengerStopAssignment,
        diagnostics: &mut Diagnostics,
    ) {
        let Some(stop_point_ref) = &assignment.scheduled_stop_point_ref else {
            diagnostics.record_dropped(
                PassengerStopAssignment::KIND,
                &assignment.id,
                "missing scheduledStopPointRef",
            );
            return;
        };
        let stop_point_ref = stop_point_ref.target.as_str();
        self.passenger_stop_assignments_by_stop_point_ref
            .insert(stop_point_ref, Arc::new(assignment.clone()));
        if let Some(quay_ref) = &assignment.quay_ref {
            self.quay_id_by_stop_point_ref
                .insert(stop_point_ref.to_owned(), quay_ref.target.clone());
        }
        if let Some(stop_place_ref) = &assignment.stop_place_ref {
            self.stop_place_id_by_stop_point_ref
                .insert(stop_point_ref.to_owned(), stop_place_ref.target.clone());
        }
    }
    fn parse_flexible_stop_assignment(
        &mut self,
        assignment: &FlexibleStopAssignment,
        diagnostics: &mut Diagnostics,
    ) {
        let (Some(stop_point_ref), Some(flexible_stop_place_ref)) = (
            &assignment.scheduled_stop_point_ref,
            &assignment.flexible_stop_place_ref,
        ) else {
            diagnostics.record_dropped(
                FlexibleStopAssignment::KIND,
                &assignment.id,
                "missing scheduledStopPointRef or flexibleStopPlaceRef",
            );
            return;
        };
        match self.flexible_stop_places.get(&flexible_stop_place_ref.target) {
            Some(flexible_stop_place) => {
                self.flexible_stop_place_id_by_stop_point_ref
                    .insert(stop_point_ref.target.clone(), flexible_stop_place.id.clone());
            }
            None => diagnostics.record_dropped(
                FlexibleStopAssignment::KIND,
                &assignment.id,
                &format!(
                    "flexible stop place '{}' not found",
                    flexible_stop_place_ref.target
                ),
            ),
        }
    }
    // groups of lines only know their network by being nested in it
    fn parse_network(&mut self, network: &Network) {
        for group in &network.groups_of_lines {
            self.network_id_by_group_of_lines_id
                .insert(group.id.clone(), network.id.clone());
            self.groups_of_lines.push(group.clone());
        }
        self.networks.push(network.clone());
    }
    fn parse_lines(&mut self, lines: &[LineElement], diagnostics: &mut Diagnostics) {
        for line in lines {
            match line {
                LineElement::Line(line) => self.lines.push(line.clone()),
                LineElement::FlexibleLine(line) => self.flexible_lines.push(line.clone()),
                LineElement::Unrecognized => diagnostics.record_skipped("Line"),
            }
        }
    }
    fn parse_journey_patterns(
        &mut self,
        journey_patterns: &[JourneyPatternElement],
        diagnostics: &mut Diagnostics,
    ) {
        for pattern in journey_patterns {
            match pattern {
                JourneyPatternElement::JourneyPattern(pattern) => {
                    self.journey_patterns.push(pattern.clone())
                }
                JourneyPatternElement::ServiceJourneyPattern(pattern) => {
                    self.service_journey_patterns.push(pattern.clone())
                }
                JourneyPatternElement::Unrecognized => diagnostics.record_skipped("JourneyPattern"),
            }
        }
    }
}

impl FrameParser<ServiceFrame> for ServiceFrameParser<'_> {
    fn parse(&mut self, frame: &ServiceFrame, diagnostics: &mut Diagnostics) -> Result<()> {
        self.parse_stop_assignments(&frame.stop_assignments, diagnostics);
        self.routes.extend_from_slice(&frame.routes);
        if let Some(network) = &frame.network {
            self.parse_network(network);
        }
        for network in &frame.additional_networks {
            self.parse_network(network);
        }
        self.notice_parser.parse_notices(&frame.notices);
        self.notice_parser
            .parse_notice_assignments(&frame.notice_assignments, diagnostics);
        self.parse_lines(&frame.lines, diagnostics);
        self.parse_journey_patterns(&frame.journey_patterns, diagnostics);
        self.destination_displays
            .extend_from_slice(&frame.destination_displays);
        self.service_links.extend_from_slice(&frame.service_links);
        self.scheduled_stop_points
            .extend_from_slice(&frame.scheduled_stop_points);
        self.route_points.extend_from_slice(&frame.route_points);
        diagnostics.record_other_elements("ServiceFrame", &frame.other_elements);
        Ok(())
    }
    fn commit(self, index: &NetexIndex) -> Result<()> {
        index.destination_displays.put_all(self.destination_displays);
        index.groups_of_lines.put_all(self.groups_of_lines);
        index.journey_patterns.put_all(self.journey_patterns);
        index
            .service_journey_patterns
            .put_all(self.service_journey_patterns);
        index.flexible_lines.put_all(self.flexible_lines);
        index.lines.put_all(self.lines);
        index.networks.put_all(self.networks);
        self.notice_parser.commit(index);
        index.quay_id_by_stop_point_ref.put_all(self.quay_id_by_stop_point_ref);
        index
            .stop_place_id_by_stop_point_ref
            .put_all(self.stop_place_id_by_stop_point_ref);
        index
            .flexible_stop_place_id_by_stop_point_ref
            .put_all(self.flexible_stop_place_id_by_stop_point_ref);
        index.routes.put_all(self.routes);
        index.service_links.put_all(self.service_links);
        index.scheduled_stop_points.put_all(self.scheduled_stop_points);
        index.route_points.put_all(self.route_points);
        self.passenger_stop_assignments_by_stop_point_ref
            .commit(&index.passenger_stop_assignments_by_stop_point_ref);

        // relations
        index
            .network_id_by_group_of_lines_id
            .put_all(self.network_id_by_group_of_lines_id);
        Ok(())
    }
}
