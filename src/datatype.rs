// used to print out readable forms of an entity
use std::fmt;

use crate::error::{NetexError, Result};

/// Anything that can be kept in one of the entity indexes.
///
/// Identifiers are unique within one entity kind, so the kind is part of the
/// type rather than the key.
pub trait Entity: fmt::Debug + Clone + Send + Sync + 'static {
    // static stuff which needs to be implemented downstream
    const KIND: &'static str;
    fn id(&self) -> &str;
    fn version(&self) -> Option<&str>;
    // instance callable with pre-made implementation
    fn kind(&self) -> &'static str {
        Self::KIND
    }
}

// ------------- Versions --------------
//
// The version of an entity is a non-negative integer carried as a string.
// Short sequential numbers ("1", "2") and timestamp-like numbers
// ("20250101000000") are both found in the wild, so ordering is numeric and
// never lexical.

pub type VersionMarker = u64;

pub fn version_marker<E: Entity>(entity: &E) -> Result<VersionMarker> {
    let version = entity.version().ok_or_else(|| NetexError::MissingVersion {
        kind: E::KIND,
        id: entity.id().to_owned(),
    })?;
    version
        .trim()
        .parse::<VersionMarker>()
        .map_err(|_| NetexError::MalformedVersion {
            kind: E::KIND,
            id: entity.id().to_owned(),
            version: version.to_owned(),
        })
}

/// Position of the element with the numerically greatest version.
///
/// A lone element is returned without looking at its version at all. Among
/// equal markers the earliest element wins, so a duplicate arriving later can
/// never displace the one already there.
pub fn latest_position<'a, E, I>(elements: I) -> Result<Option<usize>>
where
    E: Entity,
    I: IntoIterator<Item = &'a E>,
    I::IntoIter: ExactSizeIterator,
{
    let elements = elements.into_iter();
    match elements.len() {
        0 => Ok(None),
        1 => Ok(Some(0)),
        _ => {
            let mut best: Option<(usize, VersionMarker)> = None;
            for (position, element) in elements.enumerate() {
                let marker = version_marker(element)?;
                match best {
                    Some((_, best_marker)) if marker <= best_marker => (),
                    _ => best = Some((position, marker)),
                }
            }
            Ok(best.map(|(position, _)| position))
        }
    }
}

/// The element with the latest version, see [`latest_position`].
pub fn latest_versioned_element_in<'a, E: Entity>(elements: &'a [E]) -> Result<Option<&'a E>> {
    Ok(latest_position(elements.iter())?.map(|position| &elements[position]))
}

/// Exact match on the version string, no numeric interpretation.
pub fn version_of_element_in<'a, E: Entity>(elements: &'a [E], version: &str) -> Option<&'a E> {
    elements.iter().find(|e| e.version() == Some(version))
}
