use std::sync::Arc;

use crate::construct::StagedLookup;
use crate::datatype::Entity;
use crate::error::Result;
use crate::index::NetexIndex;
use crate::model::{
    DatedServiceJourney, DeadRun, Interchange, Journey, JourneyRef, ServiceJourney,
    ServiceJourneyInterchange, TimetableFrame,
};

use super::notice::NoticeParser;
use super::{Diagnostics, FrameParser};

#[derive(Debug, Default)]
pub struct TimetableFrameParser {
    service_journeys: Vec<ServiceJourney>,
    dated_service_journeys: Vec<DatedServiceJourney>,
    dated_service_journeys_by_service_journey_id: StagedLookup<DatedServiceJourney>,
    dead_runs: Vec<DeadRun>,
    service_journey_interchanges: Vec<ServiceJourneyInterchange>,
    service_journey_interchanges_by_service_journey_id: StagedLookup<ServiceJourneyInterchange>,
    notice_parser: NoticeParser,
}
impl TimetableFrameParser {
    pub fn new() -> Self {
        Self::default()
    }
    fn parse_journeys(&mut self, journeys: &[Journey], diagnostics: &mut Diagnostics) {
        for journey in journeys {
            match journey {
                Journey::ServiceJourney(journey) => self.service_journeys.push(journey.clone()),
                Journey::DatedServiceJourney(journey) => self.parse_dated_service_journey(journey),
                Journey::DeadRun(dead_run) => self.dead_runs.push(dead_run.clone()),
                Journey::Unrecognized => diagnostics.record_skipped("Journey"),
            }
        }
    }
    // a dated journey is listed under every service journey it refers to
    fn parse_dated_service_journey(&mut self, journey: &DatedServiceJourney) {
        let shared = Arc::new(journey.clone());
        for journey_ref in &journey.journey_refs {
            if let JourneyRef::ServiceJourneyRef(service_journey) = journey_ref {
                self.dated_service_journeys_by_service_journey_id
                    .insert(service_journey.target.as_str(), Arc::clone(&shared));
            }
        }
        self.dated_service_journeys.push(journey.clone());
    }
    fn parse_interchanges(&mut self, interchanges: &[Interchange], diagnostics: &mut Diagnostics) {
        for interchange in interchanges {
            let interchange = match interchange {
                Interchange::ServiceJourneyInterchange(interchange) => interchange,
                Interchange::Unrecognized => {
                    diagnostics.record_skipped("Interchange");
                    continue;
                }
            };
            // each present leg relates the interchange to its journey
            let shared = Arc::new(interchange.clone());
            for (leg, reference) in [
                ("fromJourneyRef", &interchange.from_journey_ref),
                ("toJourneyRef", &interchange.to_journey_ref),
            ] {
                match reference {
                    Some(reference) => self
                        .service_journey_interchanges_by_service_journey_id
                        .insert(reference.target.as_str(), Arc::clone(&shared)),
                    None => diagnostics.record_dropped(
                        ServiceJourneyInterchange::KIND,
                        &interchange.id,
                        &format!("missing {}, not related through it", leg),
                    ),
                }
            }
            self.service_journey_interchanges.push(interchange.clone());
        }
    }
}

impl FrameParser<TimetableFrame> for TimetableFrameParser {
    fn parse(&mut self, frame: &TimetableFrame, diagnostics: &mut Diagnostics) -> Result<()> {
        self.parse_journeys(&frame.vehicle_journeys, diagnostics);
        self.parse_interchanges(&frame.journey_interchanges, diagnostics);
        self.notice_parser.parse_notices(&frame.notices);
        self.notice_parser
            .parse_notice_assignments(&frame.notice_assignments, diagnostics);
        diagnostics.record_other_elements("TimetableFrame", &frame.other_elements);
        Ok(())
    }
    fn commit(self, index: &NetexIndex) -> Result<()> {
        index.service_journeys.put_all(self.service_journeys);
        index.dated_service_journeys.put_all(self.dated_service_journeys);
        self.dated_service_journeys_by_service_journey_id
            .commit(&index.dated_service_journeys_by_service_journey_id);
        index.dead_runs.put_all(self.dead_runs);
        index
            .service_journey_interchanges
            .put_all(self.service_journey_interchanges);
        self.service_journey_interchanges_by_service_journey_id
            .commit(&index.service_journey_interchanges_by_service_journey_id);
        self.notice_parser.commit(index);
        Ok(())
    }
}
