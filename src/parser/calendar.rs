use std::sync::Arc;

use crate::construct::StagedLookup;
use crate::datatype::Entity;
use crate::error::Result;
use crate::index::NetexIndex;
use crate::model::{
    DayType, DayTypeAssignment, DayTypeElement, OperatingDay, OperatingDayElement,
    OperatingPeriod, OperatingPeriodElement, ServiceCalendar, ServiceCalendarFrame,
};

use super::{Diagnostics, FrameParser};

/// Day types, operating periods and operating days, and the assignments that
/// tie dates to day types.
///
/// Assignments may sit at frame level or inside the embedded service calendar.
/// Both end up in the same relation and are never deduplicated.
#[derive(Debug, Default)]
pub struct ServiceCalendarFrameParser {
    day_types: Vec<DayType>,
    operating_periods: Vec<OperatingPeriod>,
    operating_days: Vec<OperatingDay>,
    day_type_assignments_by_day_type_id: StagedLookup<DayTypeAssignment>,
}
impl ServiceCalendarFrameParser {
    pub fn new() -> Self {
        Self::default()
    }
    fn parse_service_calendar(&mut self, calendar: &ServiceCalendar, diagnostics: &mut Diagnostics) {
        self.parse_day_types(&calendar.day_types, diagnostics);
        for day in &calendar.operating_days {
            match day {
                OperatingDayElement::OperatingDay(day) => self.operating_days.push(day.clone()),
                OperatingDayElement::OperatingDayRef(_) => (),
                OperatingDayElement::Unrecognized => diagnostics.record_skipped("OperatingDay"),
            }
        }
        self.parse_operating_periods(&calendar.operating_periods, diagnostics);
        self.parse_day_type_assignments(&calendar.day_type_assignments, diagnostics);
        diagnostics.record_other_elements("ServiceCalendar", &calendar.other_elements);
    }
    fn parse_day_types(&mut self, day_types: &[DayTypeElement], diagnostics: &mut Diagnostics) {
        for day_type in day_types {
            match day_type {
                DayTypeElement::DayType(day_type) => self.day_types.push(day_type.clone()),
                DayTypeElement::DayTypeRef(_) => (),
                DayTypeElement::Unrecognized => diagnostics.record_skipped("DayType"),
            }
        }
    }
    fn parse_operating_periods(
        &mut self,
        periods: &[OperatingPeriodElement],
        diagnostics: &mut Diagnostics,
    ) {
        for period in periods {
            match period {
                OperatingPeriodElement::OperatingPeriod(period) => {
                    self.operating_periods.push(period.clone())
                }
                OperatingPeriodElement::OperatingPeriodRef(_) => (),
                OperatingPeriodElement::Unrecognized => {
                    diagnostics.record_skipped("OperatingPeriod")
                }
            }
        }
    }
    fn parse_day_type_assignments(
        &mut self,
        assignments: &[DayTypeAssignment],
        diagnostics: &mut Diagnostics,
    ) {
        for assignment in assignments {
            match &assignment.day_type_ref {
                Some(day_type_ref) => self
                    .day_type_assignments_by_day_type_id
                    .insert(day_type_ref.target.as_str(), Arc::new(assignment.clone())),
                None => diagnostics.record_dropped(
                    DayTypeAssignment::KIND,
                    &assignment.id,
                    "missing dayTypeRef",
                ),
            }
        }
    }
}

impl FrameParser<ServiceCalendarFrame> for ServiceCalendarFrameParser {
    fn parse(&mut self, frame: &ServiceCalendarFrame, diagnostics: &mut Diagnostics) -> Result<()> {
        if let Some(calendar) = &frame.service_calendar {
            self.parse_service_calendar(calendar, diagnostics);
        }
        self.parse_day_types(&frame.day_types, diagnostics);
        self.parse_operating_periods(&frame.operating_periods, diagnostics);
        self.operating_days.extend_from_slice(&frame.operating_days);
        self.parse_day_type_assignments(&frame.day_type_assignments, diagnostics);
        diagnostics.record_other_elements("ServiceCalendarFrame", &frame.other_elements);
        Ok(())
    }
    fn commit(self, index: &NetexIndex) -> Result<()> {
        index.day_types.put_all(self.day_types);
        index.operating_periods.put_all(self.operating_periods);
        index.operating_days.put_all(self.operating_days);
        self.day_type_assignments_by_day_type_id
            .commit(&index.day_type_assignments_by_day_type_id);
        Ok(())
    }
}
