//! Walks a document's frame hierarchy and routes every frame to its extractor.
//!
//! Each extractor works in two steps. `parse` stages what a frame contains in
//! collections private to the extractor, resolving relations that are only
//! expressed by nesting inside that frame. `commit` then pushes the staged
//! collections into the shared [`NetexIndex`]. Nothing becomes visible before
//! `commit`, so `parse` alone can be used as a dry run.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::index::NetexIndex;
use crate::model::{Frame, FrameKind, OtherElements, PublicationDelivery};

mod calendar;
mod fare;
mod notice;
mod resource;
mod service;
mod site;
mod timetable;
mod vehicle_schedule;

pub use calendar::ServiceCalendarFrameParser;
pub use fare::FareFrameParser;
pub use resource::ResourceFrameParser;
pub use service::ServiceFrameParser;
pub use site::SiteFrameParser;
pub use timetable::TimetableFrameParser;
pub use vehicle_schedule::VehicleScheduleFrameParser;

pub trait FrameParser<T> {
    /// Stages the content of one frame.
    fn parse(&mut self, frame: &T, diagnostics: &mut Diagnostics) -> Result<()>;
    /// Adds the staged content to the index.
    fn commit(self, index: &NetexIndex) -> Result<()>;
}

// ------------- Diagnostics -------------
/// Observations that never fail a parse. They are logged when recorded and
/// kept so that callers can inspect them afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    skipped: Vec<String>,
    dropped: Vec<String>,
}
impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }
    /// An element that is intentionally not extracted.
    pub fn record_skipped(&mut self, element: impl Into<String>) {
        let element = element.into();
        info!(%element, "element skipped");
        self.skipped.push(element);
    }
    /// A record that could not be indexed and was left out.
    pub fn record_dropped(&mut self, kind: &str, id: &str, reason: &str) {
        warn!(%kind, %id, %reason, "record dropped");
        self.dropped.push(format!("{} '{}': {}", kind, id, reason));
    }
    pub fn record_other_elements(&mut self, frame: &str, other_elements: &OtherElements) {
        for name in other_elements.keys() {
            self.record_skipped(format!("{}.{}", frame, name));
        }
    }
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }
    pub fn dropped(&self) -> &[String] {
        &self.dropped
    }
    pub fn is_empty(&self) -> bool {
        self.skipped.is_empty() && self.dropped.is_empty()
    }
    pub fn extend(&mut self, other: Diagnostics) {
        self.skipped.extend(other.skipped);
        self.dropped.extend(other.dropped);
    }
}

// ------------- ParseSummary -------------
#[derive(Debug, Clone, Default)]
pub struct ParseSummary {
    pub frames: BTreeMap<FrameKind, usize>,
    pub max_depth: usize,
    pub diagnostics: Diagnostics,
}
impl ParseSummary {
    pub fn frames_of(&self, kind: FrameKind) -> usize {
        self.frames.get(&kind).copied().unwrap_or(0)
    }
    pub fn merge(&mut self, other: ParseSummary) {
        for (kind, count) in other.frames {
            *self.frames.entry(kind).or_insert(0) += count;
        }
        self.max_depth = self.max_depth.max(other.max_depth);
        self.diagnostics.extend(other.diagnostics);
    }
}

// ------------- DocumentParser -------------
/// Populates an index from one document. The index is only ever added to, and
/// frames committed before a failing frame stay committed.
pub struct DocumentParser<'a> {
    index: &'a NetexIndex,
    summary: ParseSummary,
}
impl<'a> DocumentParser<'a> {
    pub fn parse_and_populate_index(
        index: &'a NetexIndex,
        document: PublicationDelivery,
    ) -> Result<ParseSummary> {
        let mut parser = Self {
            index,
            summary: ParseSummary::default(),
        };
        if let Some(timestamp) = document.publication_timestamp {
            index.set_publication_timestamp(timestamp);
        }
        parser.parse_frame_list(document.data_objects, 0)?;
        Ok(parser.summary)
    }
    fn parse_frame_list(&mut self, frames: Vec<Frame>, depth: usize) -> Result<()> {
        self.summary.max_depth = self.summary.max_depth.max(depth);
        for frame in frames {
            self.parse_common_frame(frame, depth)?;
        }
        Ok(())
    }
    fn parse_common_frame(&mut self, frame: Frame, depth: usize) -> Result<()> {
        let index = self.index;
        *self.summary.frames.entry(frame.kind()).or_insert(0) += 1;
        debug!(frame = frame.element_name(), depth, "walking frame");
        match frame {
            Frame::Resource(frame) => {
                let frame = Arc::new(frame);
                index.resource_frames.keep(Arc::clone(&frame));
                self.run(&*frame, ResourceFrameParser::new())
            }
            Frame::ServiceCalendar(frame) => {
                let frame = Arc::new(frame);
                index.service_calendar_frames.keep(Arc::clone(&frame));
                self.run(&*frame, ServiceCalendarFrameParser::new())
            }
            Frame::VehicleSchedule(frame) => {
                let frame = Arc::new(frame);
                index.vehicle_schedule_frames.keep(Arc::clone(&frame));
                self.run(&*frame, VehicleScheduleFrameParser::new())
            }
            Frame::Timetable(frame) => {
                let frame = Arc::new(frame);
                index.timetable_frames.keep(Arc::clone(&frame));
                self.run(&*frame, TimetableFrameParser::new())
            }
            Frame::Service(frame) => {
                let frame = Arc::new(frame);
                index.service_frames.keep(Arc::clone(&frame));
                self.run(&*frame, ServiceFrameParser::new(&index.flexible_stop_places))
            }
            Frame::Site(frame) => {
                let frame = Arc::new(frame);
                index.site_frames.keep(Arc::clone(&frame));
                self.run(&*frame, SiteFrameParser::new())
            }
            Frame::Fare(frame) => {
                let frame = Arc::new(frame);
                index.fare_frames.keep(Arc::clone(&frame));
                self.run(&*frame, FareFrameParser::new())
            }
            Frame::Composite(mut frame) => {
                if let Some(time_zone) = frame.time_zone() {
                    index.set_time_zone(time_zone);
                }
                // Nesting deeper than the format allows is accepted, legality
                // is left to schema validation.
                let nested = std::mem::take(&mut frame.frames);
                self.summary
                    .diagnostics
                    .record_other_elements("CompositeFrame", &frame.other_elements);
                index.composite_frames.keep(Arc::new(frame));
                self.parse_frame_list(nested, depth + 1)
            }
            other @ (Frame::General(_) | Frame::Infrastructure(_) | Frame::Unrecognized(_)) => {
                self.summary.diagnostics.record_skipped(other.element_name());
                Ok(())
            }
        }
    }
    fn run<T, P: FrameParser<T>>(&mut self, frame: &T, mut parser: P) -> Result<()> {
        parser.parse(frame, &mut self.summary.diagnostics)?;
        parser.commit(self.index)
    }
}
