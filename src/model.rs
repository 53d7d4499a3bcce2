//! The already-parsed document object tree.
//!
//! A publication delivery is a list of frames. Frames and every polymorphic
//! collection member carry a `kind` tag naming their element type; a kind that
//! is not modelled here deserializes into an `Unrecognized` arm instead of
//! failing, so that the walker can report it and carry on. Unrecognized
//! frames keep their element name.
//!
//! Entities keep the properties this crate does not interpret in an opaque
//! `attributes` map. Frames collect unmodelled sub-elements in
//! `other_elements`, which the extractors report as skipped.

use std::collections::BTreeMap;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::datatype::Entity;

pub type Attributes = Map<String, Value>;
pub type OtherElements = BTreeMap<String, Value>;

macro_rules! impl_entity {
    ($($name:ident),+ $(,)?) => {
        $(
            impl Entity for $name {
                const KIND: &'static str = stringify!($name);
                fn id(&self) -> &str {
                    &self.id
                }
                fn version(&self) -> Option<&str> {
                    self.version.as_deref()
                }
            }
        )+
    };
}

// Entities that only carry identity, version, a name and opaque attributes.
macro_rules! plain_entities {
    ($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
            #[serde(rename_all = "camelCase")]
            pub struct $name {
                pub id: String,
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub version: Option<String>,
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub name: Option<String>,
                #[serde(flatten)]
                pub attributes: Attributes,
            }
            impl $name {
                pub fn new(id: impl Into<String>) -> Self {
                    Self {
                        id: id.into(),
                        ..Default::default()
                    }
                }
                pub fn with_version(mut self, version: impl Into<String>) -> Self {
                    self.version = Some(version.into());
                    self
                }
                pub fn with_name(mut self, name: impl Into<String>) -> Self {
                    self.name = Some(name.into());
                    self
                }
            }
            impl_entity!($name);
        )+
    };
}

// ------------- References -------------
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    #[serde(rename = "ref")]
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}
impl EntityRef {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            version: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

// ------------- Document -------------
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationDelivery {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "passthrough_text"
    )]
    pub publication_timestamp: Option<String>,
    #[serde(default)]
    pub data_objects: Vec<Frame>,
}

// Keeps whatever the document carries. Strings pass unchanged, any other
// scalar keeps its JSON text, null is absent.
fn passthrough_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}

/// Structural kind of a frame, used for classification and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FrameKind {
    Resource,
    ServiceCalendar,
    VehicleSchedule,
    Timetable,
    Service,
    Site,
    Fare,
    Composite,
    Other,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind")]
pub enum Frame {
    #[serde(rename = "ResourceFrame")]
    Resource(ResourceFrame),
    #[serde(rename = "ServiceCalendarFrame")]
    ServiceCalendar(ServiceCalendarFrame),
    #[serde(rename = "VehicleScheduleFrame")]
    VehicleSchedule(VehicleScheduleFrame),
    #[serde(rename = "TimetableFrame")]
    Timetable(TimetableFrame),
    #[serde(rename = "ServiceFrame")]
    Service(ServiceFrame),
    #[serde(rename = "SiteFrame")]
    Site(SiteFrame),
    #[serde(rename = "FareFrame")]
    Fare(FareFrame),
    #[serde(rename = "CompositeFrame")]
    Composite(CompositeFrame),
    #[serde(rename = "GeneralFrame")]
    General(OpaqueFrame),
    #[serde(rename = "InfrastructureFrame")]
    Infrastructure(OpaqueFrame),
    #[serde(untagged)]
    Unrecognized(UnrecognizedFrame),
}
impl Frame {
    pub fn kind(&self) -> FrameKind {
        match self {
            Frame::Resource(_) => FrameKind::Resource,
            Frame::ServiceCalendar(_) => FrameKind::ServiceCalendar,
            Frame::VehicleSchedule(_) => FrameKind::VehicleSchedule,
            Frame::Timetable(_) => FrameKind::Timetable,
            Frame::Service(_) => FrameKind::Service,
            Frame::Site(_) => FrameKind::Site,
            Frame::Fare(_) => FrameKind::Fare,
            Frame::Composite(_) => FrameKind::Composite,
            Frame::General(_) | Frame::Infrastructure(_) | Frame::Unrecognized(_) => FrameKind::Other,
        }
    }
    pub fn element_name(&self) -> &str {
        match self {
            Frame::Resource(_) => "ResourceFrame",
            Frame::ServiceCalendar(_) => "ServiceCalendarFrame",
            Frame::VehicleSchedule(_) => "VehicleScheduleFrame",
            Frame::Timetable(_) => "TimetableFrame",
            Frame::Service(_) => "ServiceFrame",
            Frame::Site(_) => "SiteFrame",
            Frame::Fare(_) => "FareFrame",
            Frame::Composite(_) => "CompositeFrame",
            Frame::General(_) => "GeneralFrame",
            Frame::Infrastructure(_) => "InfrastructureFrame",
            Frame::Unrecognized(frame) => &frame.element,
        }
    }
}

// Dispatches on the `kind` tag by hand so that an unknown kind keeps its name.
impl<'de> Deserialize<'de> for Frame {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = Map::deserialize(deserializer)?;
        let element = match fields.remove("kind") {
            Some(Value::String(kind)) => kind,
            Some(other) => return Err(D::Error::custom(format!("frame kind must be a string, got {}", other))),
            None => return Err(D::Error::missing_field("kind")),
        };
        let fields = Value::Object(fields);
        Ok(match element.as_str() {
            "ResourceFrame" => Frame::Resource(frame_body(fields)?),
            "ServiceCalendarFrame" => Frame::ServiceCalendar(frame_body(fields)?),
            "VehicleScheduleFrame" => Frame::VehicleSchedule(frame_body(fields)?),
            "TimetableFrame" => Frame::Timetable(frame_body(fields)?),
            "ServiceFrame" => Frame::Service(frame_body(fields)?),
            "SiteFrame" => Frame::Site(frame_body(fields)?),
            "FareFrame" => Frame::Fare(frame_body(fields)?),
            "CompositeFrame" => Frame::Composite(frame_body(fields)?),
            "GeneralFrame" => Frame::General(frame_body(fields)?),
            "InfrastructureFrame" => Frame::Infrastructure(frame_body(fields)?),
            _ => {
                let OpaqueFrame { id, other_elements } = frame_body(fields)?;
                Frame::Unrecognized(UnrecognizedFrame {
                    element,
                    id,
                    other_elements,
                })
            }
        })
    }
}

fn frame_body<T: DeserializeOwned, E: serde::de::Error>(fields: Value) -> Result<T, E> {
    serde_json::from_value(fields).map_err(E::custom)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Locale {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_language: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<Locale>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeFrame {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_defaults: Option<FrameDefaults>,
    #[serde(default)]
    pub frames: Vec<Frame>,
    #[serde(flatten)]
    pub other_elements: OtherElements,
}
impl CompositeFrame {
    pub fn time_zone(&self) -> Option<&str> {
        self.frame_defaults
            .as_ref()?
            .default_locale
            .as_ref()?
            .time_zone
            .as_deref()
    }
}

/// A frame kind that is recognised but deliberately not extracted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpaqueFrame {
    #[serde(default)]
    pub id: String,
    #[serde(flatten)]
    pub other_elements: OtherElements,
}

/// A frame of a kind this crate does not know, kept under its element name.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnrecognizedFrame {
    #[serde(rename = "kind")]
    pub element: String,
    pub id: String,
    #[serde(flatten)]
    pub other_elements: OtherElements,
}

// ------------- Resource -------------
plain_entities!(Authority, Operator, Branding, TypeOfProductCategory);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceFrame {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub organisations: Vec<Organisation>,
    #[serde(default)]
    pub types_of_value: Vec<TypeOfValue>,
    #[serde(flatten)]
    pub other_elements: OtherElements,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Organisation {
    Authority(Authority),
    Operator(Operator),
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TypeOfValue {
    Branding(Branding),
    ValueSet(ValueSet),
    #[serde(other)]
    Unrecognized,
}

/// A generic container of "type of value" members, classified by the name of
/// the class it holds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueSet {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_of_class: Option<String>,
    #[serde(default)]
    pub values: Vec<ValueSetMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ValueSetMember {
    TypeOfProductCategory(TypeOfProductCategory),
    #[serde(other)]
    Unrecognized,
}

// ------------- Site -------------
plain_entities!(
    /// A platform, in the Nordic profile called a quay.
    Quay,
    GroupOfStopPlaces,
    FlexibleStopPlace,
    TariffZone,
    GroupOfTariffZones,
    TopographicPlace,
);

pub const IS_PARENT_STOP_PLACE: &str = "IS_PARENT_STOP_PLACE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopPlace {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_list: Vec<KeyValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quays: Vec<QuayElement>,
    #[serde(flatten)]
    pub attributes: Attributes,
}
impl StopPlace {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
    pub fn with_key_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.key_list.push(KeyValue {
            key: key.into(),
            value: value.into(),
        });
        self
    }
    pub fn with_quay(mut self, quay: Quay) -> Self {
        self.quays.push(QuayElement::Quay(quay));
        self
    }
    /// A parent stop groups mode specific child stops; the quays listed under
    /// it physically belong to the children.
    pub fn is_parent_stop_place(&self) -> bool {
        self.key_list
            .iter()
            .any(|kv| kv.key == IS_PARENT_STOP_PLACE && kv.value == "true")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum QuayElement {
    Quay(Quay),
    QuayRef(EntityRef),
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parking {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_site_ref: Option<EntityRef>,
    #[serde(flatten)]
    pub attributes: Attributes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Zone {
    TariffZone(TariffZone),
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteFrame {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub stop_places: Vec<StopPlace>,
    #[serde(default)]
    pub groups_of_stop_places: Vec<GroupOfStopPlaces>,
    #[serde(default)]
    pub flexible_stop_places: Vec<FlexibleStopPlace>,
    #[serde(default)]
    pub tariff_zones: Vec<Zone>,
    #[serde(default)]
    pub groups_of_tariff_zones: Vec<GroupOfTariffZones>,
    #[serde(default)]
    pub topographic_places: Vec<TopographicPlace>,
    #[serde(default)]
    pub parkings: Vec<Parking>,
    #[serde(flatten)]
    pub other_elements: OtherElements,
}

// ------------- Service -------------
plain_entities!(
    GroupOfLines,
    Route,
    Line,
    FlexibleLine,
    JourneyPattern,
    ServiceJourneyPattern,
    DestinationDisplay,
    ServiceLink,
    ScheduledStopPoint,
    RoutePoint,
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups_of_lines: Vec<GroupOfLines>,
    #[serde(flatten)]
    pub attributes: Attributes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum LineElement {
    Line(Line),
    FlexibleLine(FlexibleLine),
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum JourneyPatternElement {
    JourneyPattern(JourneyPattern),
    ServiceJourneyPattern(ServiceJourneyPattern),
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerStopAssignment {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_stop_point_ref: Option<EntityRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quay_ref: Option<EntityRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_place_ref: Option<EntityRef>,
    #[serde(flatten)]
    pub attributes: Attributes,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlexibleStopAssignment {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_stop_point_ref: Option<EntityRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flexible_stop_place_ref: Option<EntityRef>,
    #[serde(flatten)]
    pub attributes: Attributes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum StopAssignment {
    PassengerStopAssignment(PassengerStopAssignment),
    FlexibleStopAssignment(FlexibleStopAssignment),
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceFrame {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<Network>,
    #[serde(default)]
    pub additional_networks: Vec<Network>,
    #[serde(default)]
    pub routes: Vec<Route>,
    #[serde(default)]
    pub lines: Vec<LineElement>,
    #[serde(default)]
    pub journey_patterns: Vec<JourneyPatternElement>,
    #[serde(default)]
    pub destination_displays: Vec<DestinationDisplay>,
    #[serde(default)]
    pub service_links: Vec<ServiceLink>,
    #[serde(default)]
    pub scheduled_stop_points: Vec<ScheduledStopPoint>,
    #[serde(default)]
    pub route_points: Vec<RoutePoint>,
    #[serde(default)]
    pub stop_assignments: Vec<StopAssignment>,
    #[serde(default)]
    pub notices: Vec<Notice>,
    #[serde(default)]
    pub notice_assignments: Vec<NoticeAssignment>,
    #[serde(flatten)]
    pub other_elements: OtherElements,
}

// ------------- Notices -------------
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub attributes: Attributes,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeAssignment {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noticed_object_ref: Option<EntityRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice_ref: Option<EntityRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
    #[serde(flatten)]
    pub attributes: Attributes,
}

// ------------- Calendar -------------
plain_entities!(DayType, OperatingPeriod, OperatingDay);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTypeAssignment {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_type_ref: Option<EntityRef>,
    #[serde(flatten)]
    pub attributes: Attributes,
}
impl DayTypeAssignment {
    pub fn new(id: impl Into<String>, day_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            day_type_ref: Some(EntityRef::new(day_type)),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum DayTypeElement {
    DayType(DayType),
    DayTypeRef(EntityRef),
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum OperatingPeriodElement {
    OperatingPeriod(OperatingPeriod),
    OperatingPeriodRef(EntityRef),
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum OperatingDayElement {
    OperatingDay(OperatingDay),
    OperatingDayRef(EntityRef),
    #[serde(other)]
    Unrecognized,
}

/// Calendar content embedded in a calendar frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCalendar {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub day_types: Vec<DayTypeElement>,
    #[serde(default)]
    pub operating_days: Vec<OperatingDayElement>,
    #[serde(default)]
    pub operating_periods: Vec<OperatingPeriodElement>,
    #[serde(default)]
    pub day_type_assignments: Vec<DayTypeAssignment>,
    #[serde(flatten)]
    pub other_elements: OtherElements,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCalendarFrame {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_calendar: Option<ServiceCalendar>,
    #[serde(default)]
    pub day_types: Vec<DayTypeElement>,
    #[serde(default)]
    pub operating_periods: Vec<OperatingPeriodElement>,
    #[serde(default)]
    pub operating_days: Vec<OperatingDay>,
    #[serde(default)]
    pub day_type_assignments: Vec<DayTypeAssignment>,
    #[serde(flatten)]
    pub other_elements: OtherElements,
}

// ------------- Timetable -------------
plain_entities!(ServiceJourney, DeadRun);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum JourneyRef {
    ServiceJourneyRef(EntityRef),
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatedServiceJourney {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub journey_refs: Vec<JourneyRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_day_ref: Option<EntityRef>,
    #[serde(flatten)]
    pub attributes: Attributes,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceJourneyInterchange {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_journey_ref: Option<EntityRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_journey_ref: Option<EntityRef>,
    #[serde(flatten)]
    pub attributes: Attributes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Journey {
    ServiceJourney(ServiceJourney),
    DatedServiceJourney(DatedServiceJourney),
    DeadRun(DeadRun),
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Interchange {
    ServiceJourneyInterchange(ServiceJourneyInterchange),
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableFrame {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub vehicle_journeys: Vec<Journey>,
    #[serde(default)]
    pub journey_interchanges: Vec<Interchange>,
    #[serde(default)]
    pub notices: Vec<Notice>,
    #[serde(default)]
    pub notice_assignments: Vec<NoticeAssignment>,
    #[serde(flatten)]
    pub other_elements: OtherElements,
}

// ------------- Vehicle schedule -------------
/// Trips run in order by one vehicle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub journeys: Vec<EntityRef>,
    #[serde(flatten)]
    pub attributes: Attributes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum BlockElement {
    Block(Block),
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleScheduleFrame {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub blocks: Vec<BlockElement>,
    #[serde(flatten)]
    pub other_elements: OtherElements,
}

// ------------- Fare -------------
plain_entities!(FareZone);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareFrame {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub fare_zones: Vec<FareZone>,
    #[serde(flatten)]
    pub other_elements: OtherElements,
}

impl_entity!(
    StopPlace,
    Parking,
    Network,
    PassengerStopAssignment,
    FlexibleStopAssignment,
    Notice,
    NoticeAssignment,
    DayTypeAssignment,
    DatedServiceJourney,
    ServiceJourneyInterchange,
    Block,
);
