use std::collections::HashMap;
use std::sync::Arc;

use crate::construct::{OtherHasher, StagedLookup};
use crate::datatype::{Entity, latest_position, version_marker};
use crate::error::Result;
use crate::index::NetexIndex;
use crate::model::{
    FlexibleStopPlace, GroupOfStopPlaces, GroupOfTariffZones, Parking, Quay, QuayElement,
    SiteFrame, StopPlace, TariffZone, TopographicPlace, Zone,
};

use super::{Diagnostics, FrameParser};

// the stop place a quay was found under, and the quay version that put it there
#[derive(Debug)]
struct Placement {
    stop_place_id: String,
    quay: Quay,
}

#[derive(Debug, Default)]
pub struct SiteFrameParser {
    stop_places: Vec<StopPlace>,
    groups_of_stop_places: Vec<GroupOfStopPlaces>,
    flexible_stop_places: Vec<FlexibleStopPlace>,
    tariff_zones: Vec<TariffZone>,
    groups_of_tariff_zones: Vec<GroupOfTariffZones>,
    topographic_places: Vec<TopographicPlace>,
    parkings: Vec<Parking>,
    quays: HashMap<String, Vec<Quay>, OtherHasher>,
    stop_place_id_by_quay_id: HashMap<String, Placement, OtherHasher>,
    parkings_by_parent_site_ref: StagedLookup<Parking>,
}
impl SiteFrameParser {
    pub fn new() -> Self {
        Self::default()
    }
    fn parse_stop_places(&mut self, stop_places: &[StopPlace], diagnostics: &mut Diagnostics) -> Result<()> {
        for stop_place in stop_places {
            self.stop_places.push(stop_place.clone());
            // the quays of a parent stop belong to its children
            if !stop_place.is_parent_stop_place() {
                self.parse_quays(stop_place, diagnostics)?;
            }
        }
        Ok(())
    }
    /// Stages the quays of one stop place and maps each of them to it.
    ///
    /// A quay moved between stop places shows up under both. Then the mapping
    /// follows the stop place of the latest version seen in this frame.
    fn parse_quays(&mut self, stop_place: &StopPlace, diagnostics: &mut Diagnostics) -> Result<()> {
        for element in &stop_place.quays {
            let quay = match element {
                QuayElement::Quay(quay) => quay,
                QuayElement::QuayRef(_) => continue,
                QuayElement::Unrecognized => {
                    diagnostics.record_skipped(format!("StopPlace '{}' quay", stop_place.id));
                    continue;
                }
            };
            let versions = self.quays.entry(quay.id.clone()).or_default();
            versions.push(quay.clone());
            let placement = Placement {
                stop_place_id: stop_place.id.clone(),
                quay: quay.clone(),
            };
            match self.stop_place_id_by_quay_id.get(&quay.id) {
                Some(existing) if existing.stop_place_id != stop_place.id => {
                    // positions identify versions, equal content is not enough
                    if latest_position(versions.iter())? == Some(versions.len() - 1) {
                        self.stop_place_id_by_quay_id.insert(quay.id.clone(), placement);
                    }
                }
                Some(_) => (),
                None => {
                    self.stop_place_id_by_quay_id.insert(quay.id.clone(), placement);
                }
            }
        }
        Ok(())
    }
    fn parse_tariff_zones(&mut self, zones: &[Zone], diagnostics: &mut Diagnostics) {
        for zone in zones {
            match zone {
                Zone::TariffZone(tariff_zone) => self.tariff_zones.push(tariff_zone.clone()),
                Zone::Unrecognized => diagnostics.record_skipped("Zone"),
            }
        }
    }
    fn parse_parkings(&mut self, parkings: &[Parking], diagnostics: &mut Diagnostics) {
        for parking in parkings {
            match &parking.parent_site_ref {
                Some(parent) => self
                    .parkings_by_parent_site_ref
                    .insert(parent.target.as_str(), Arc::new(parking.clone())),
                None => diagnostics.record_dropped(
                    Parking::KIND,
                    &parking.id,
                    "missing parentSiteRef, not related to a site",
                ),
            }
            self.parkings.push(parking.clone());
        }
    }
}

/// A staged placement that disagrees with the one already in the index only
/// wins when its quay is newer than every version stored so far.
fn supersedes_stored(index: &NetexIndex, placement: &Placement) -> Result<bool> {
    let marker = version_marker(&placement.quay)?;
    for stored in index.quays.all_versions(placement.quay.id()) {
        if version_marker(&*stored)? >= marker {
            return Ok(false);
        }
    }
    Ok(true)
}

impl FrameParser<SiteFrame> for SiteFrameParser {
    fn parse(&mut self, frame: &SiteFrame, diagnostics: &mut Diagnostics) -> Result<()> {
        self.parse_stop_places(&frame.stop_places, diagnostics)?;
        self.groups_of_stop_places
            .extend_from_slice(&frame.groups_of_stop_places);
        self.flexible_stop_places
            .extend_from_slice(&frame.flexible_stop_places);
        self.parse_tariff_zones(&frame.tariff_zones, diagnostics);
        self.topographic_places
            .extend_from_slice(&frame.topographic_places);
        self.parse_parkings(&frame.parkings, diagnostics);
        self.groups_of_tariff_zones
            .extend_from_slice(&frame.groups_of_tariff_zones);
        diagnostics.record_other_elements("SiteFrame", &frame.other_elements);
        Ok(())
    }
    fn commit(self, index: &NetexIndex) -> Result<()> {
        // decided against the versions stored before this frame's quays join them
        let mut placements = Vec::with_capacity(self.stop_place_id_by_quay_id.len());
        for (quay_id, placement) in self.stop_place_id_by_quay_id {
            let accepted = match index.stop_place_id_by_quay_id.get(&quay_id) {
                Some(existing) if existing != placement.stop_place_id => {
                    supersedes_stored(index, &placement)?
                }
                _ => true,
            };
            if accepted {
                placements.push((quay_id, placement.stop_place_id));
            }
        }

        index.flexible_stop_places.put_all(self.flexible_stop_places);
        index.groups_of_stop_places.put_all(self.groups_of_stop_places);
        index.stop_places.merge_all(self.stop_places)?;
        index.tariff_zones.put_all(self.tariff_zones);
        index.topographic_places.put_all(self.topographic_places);
        index.parkings.put_all(self.parkings);
        index.quays.merge_all(self.quays.into_values().flatten())?;
        index.stop_place_id_by_quay_id.put_all(placements);
        self.parkings_by_parent_site_ref
            .commit(&index.parkings_by_parent_site_ref);
        index.groups_of_tariff_zones.put_all(self.groups_of_tariff_zones);
        Ok(())
    }
}
