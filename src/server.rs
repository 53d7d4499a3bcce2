use std::net::SocketAddr;
use std::sync::Arc;
use axum::{routing::post, Router, Json};
use tower_http::cors::{CorsLayer, Any};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use axum::http::StatusCode;
use tracing::{info, warn};
use crate::construct::{EntityIndex, Lookup, RelationMap, VersionedEntityIndex};
use crate::datatype::Entity;
use crate::error::{NetexError, Result};
use crate::index::NetexIndex;
use crate::interface::SharedIndex;

/// Either an entity lookup (`entity` + `id`) or a relation lookup
/// (`relation` + `key`).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRequest {
    #[serde(default)]
    pub entity: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub all_versions: bool,
    #[serde(default)]
    pub relation: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
}

#[derive(Debug, Default, PartialEq)]
pub struct LookupResult {
    pub entities: Option<Vec<Value>>,
    pub values: Option<Vec<String>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResponse {
    pub status: String,
    pub elapsed_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn to_values<V: Entity + Serialize>(found: impl IntoIterator<Item = Arc<V>>) -> Result<Vec<Value>> {
    found
        .into_iter()
        .map(|entity| serde_json::to_value(&*entity).map_err(|e| NetexError::Server(e.to_string())))
        .collect()
}

fn plain<V: Entity + Serialize>(index: &EntityIndex<V>, id: &str) -> Result<Vec<Value>> {
    to_values(index.get(id))
}

fn versioned<V: Entity + Serialize>(index: &VersionedEntityIndex<V>, id: &str, request: &LookupRequest) -> Result<Vec<Value>> {
    if request.all_versions {
        to_values(index.all_versions(id))
    } else if let Some(version) = &request.version {
        to_values(index.version(id, version))
    } else {
        to_values(index.latest_version(id))
    }
}

fn related<V: Entity + Serialize>(lookup: &Lookup<V>, key: &str) -> Result<LookupResult> {
    Ok(LookupResult { entities: Some(to_values(lookup.lookup(key))?), values: None })
}

fn mapped(relation: &RelationMap, key: &str) -> LookupResult {
    LookupResult { entities: None, values: Some(relation.get(key).into_iter().collect()) }
}

fn lookup_entities(index: &NetexIndex, kind: &str, id: &str, request: &LookupRequest) -> Result<Vec<Value>> {
    match kind {
        "StopPlace" => versioned(&index.stop_places, id, request),
        "Quay" => versioned(&index.quays, id, request),
        "Authority" => plain(&index.authorities, id),
        "Operator" => plain(&index.operators, id),
        "Branding" => plain(&index.brandings, id),
        "TypeOfProductCategory" => plain(&index.type_of_product_categories, id),
        "GroupOfStopPlaces" => plain(&index.groups_of_stop_places, id),
        "FlexibleStopPlace" => plain(&index.flexible_stop_places, id),
        "TariffZone" => plain(&index.tariff_zones, id),
        "GroupOfTariffZones" => plain(&index.groups_of_tariff_zones, id),
        "TopographicPlace" => plain(&index.topographic_places, id),
        "Parking" => plain(&index.parkings, id),
        "Network" => plain(&index.networks, id),
        "GroupOfLines" => plain(&index.groups_of_lines, id),
        "Route" => plain(&index.routes, id),
        "Line" => plain(&index.lines, id),
        "FlexibleLine" => plain(&index.flexible_lines, id),
        "JourneyPattern" => plain(&index.journey_patterns, id),
        "ServiceJourneyPattern" => plain(&index.service_journey_patterns, id),
        "DestinationDisplay" => plain(&index.destination_displays, id),
        "ServiceLink" => plain(&index.service_links, id),
        "ScheduledStopPoint" => plain(&index.scheduled_stop_points, id),
        "RoutePoint" => plain(&index.route_points, id),
        "Notice" => plain(&index.notices, id),
        "NoticeAssignment" => plain(&index.notice_assignments, id),
        "DayType" => plain(&index.day_types, id),
        "OperatingPeriod" => plain(&index.operating_periods, id),
        "OperatingDay" => plain(&index.operating_days, id),
        "ServiceJourney" => plain(&index.service_journeys, id),
        "DatedServiceJourney" => plain(&index.dated_service_journeys, id),
        "DeadRun" => plain(&index.dead_runs, id),
        "ServiceJourneyInterchange" => plain(&index.service_journey_interchanges, id),
        "Block" => plain(&index.blocks, id),
        "FareZone" => plain(&index.fare_zones, id),
        other => Err(NetexError::Lookup(format!("entity kind '{}'", other))),
    }
}

fn lookup_relation(index: &NetexIndex, relation: &str, key: &str) -> Result<LookupResult> {
    match relation {
        "stopPlaceIdByQuayId" => Ok(mapped(&index.stop_place_id_by_quay_id, key)),
        "networkIdByGroupOfLinesId" => Ok(mapped(&index.network_id_by_group_of_lines_id, key)),
        "quayIdByStopPointRef" => Ok(mapped(&index.quay_id_by_stop_point_ref, key)),
        "stopPlaceIdByStopPointRef" => Ok(mapped(&index.stop_place_id_by_stop_point_ref, key)),
        "flexibleStopPlaceIdByStopPointRef" => Ok(mapped(&index.flexible_stop_place_id_by_stop_point_ref, key)),
        "parkingsByParentSiteRef" => related(&index.parkings_by_parent_site_ref, key),
        "passengerStopAssignmentsByStopPointRef" => related(&index.passenger_stop_assignments_by_stop_point_ref, key),
        "dayTypeAssignmentsByDayTypeId" => related(&index.day_type_assignments_by_day_type_id, key),
        "datedServiceJourneysByServiceJourneyId" => related(&index.dated_service_journeys_by_service_journey_id, key),
        "serviceJourneyInterchangesByServiceJourneyId" => related(&index.service_journey_interchanges_by_service_journey_id, key),
        other => Err(NetexError::Lookup(format!("relation '{}'", other))),
    }
}

/// Answers one lookup against an index snapshot.
pub fn lookup(index: &NetexIndex, request: &LookupRequest) -> Result<LookupResult> {
    match (&request.entity, &request.id, &request.relation, &request.key) {
        (Some(kind), Some(id), None, _) => Ok(LookupResult {
            entities: Some(lookup_entities(index, kind, id, request)?),
            values: None,
        }),
        (None, _, Some(relation), Some(key)) => lookup_relation(index, relation, key),
        _ => Err(NetexError::Lookup(
            "expected either entity and id, or relation and key".into(),
        )),
    }
}

pub fn router(shared: Arc<SharedIndex>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::POST])
        .allow_headers(Any);
    Router::new()
        .route("/v1/lookup", post(move |Json(req): Json<LookupRequest>| {
        let shared = Arc::clone(&shared);
        async move {
            let started = std::time::Instant::now();
            let result = tokio::task::spawn_blocking(move || {
                let index = shared.current();
                lookup(&index, &req)
            }).await.map_err(|e| {
                warn!(error=%e, "Join error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Join error")
            })?;
            let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
            match result {
                Ok(found) => {
                    info!(ms=elapsed_ms, entities=found.entities.as_ref().map_or(0, Vec::len), "lookup complete");
                    let body = LookupResponse { status: "ok".into(), elapsed_ms, entities: found.entities, values: found.values, error: None };
                    Ok::<_, (StatusCode, &'static str)>((StatusCode::OK, Json(body)))
                }
                Err(e) => {
                    let status = if matches!(e, NetexError::Lookup(_)) { StatusCode::BAD_REQUEST } else { StatusCode::INTERNAL_SERVER_ERROR };
                    let msg = format!("{e}");
                    warn!(%msg, code=%status.as_u16(), "lookup error");
                    let body = LookupResponse { status: "error".into(), elapsed_ms, entities: None, values: None, error: Some(msg) };
                    Ok::<_, (StatusCode, &'static str)>((status, Json(body)))
                }
            }
        }
    }))
    .layer(cors)
}

pub async fn serve(shared: Arc<SharedIndex>, listen: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| NetexError::Server(format!("failed to bind {}: {}", listen, e)))?;
    info!(%listen, "serving lookups");
    axum::serve(listener, router(shared))
        .await
        .map_err(|e| NetexError::Server(e.to_string()))
}
