use std::sync::Arc;

use netex_index::NetexError;
use netex_index::construct::{EntityIndex, Lookup, RelationMap, VersionedEntityIndex};
use netex_index::datatype::{latest_versioned_element_in, version_of_element_in};
use netex_index::model::{Line, Quay, StopPlace};

fn stop_place(id: &str, version: &str, name: &str) -> StopPlace {
    StopPlace::new(id).with_version(version).with_name(name)
}

#[test]
fn latest_version_ignores_insertion_order() {
    let orders: [[&str; 3]; 3] = [["1", "2", "3"], ["3", "1", "2"], ["2", "3", "1"]];
    for order in orders {
        let index = VersionedEntityIndex::new();
        let versions = order
            .iter()
            .map(|v| stop_place("S1", v, &format!("v{}", v)))
            .collect::<Vec<_>>();
        index.put("S1", versions).expect("valid versions");
        let latest = index.latest_version("S1").expect("latest exists");
        assert_eq!(latest.version.as_deref(), Some("3"), "order {:?}", order);
        assert_eq!(latest.name.as_deref(), Some("v3"));
    }
}

#[test]
fn version_markers_compare_numerically() {
    let index = VersionedEntityIndex::new();
    index
        .put_all(vec![
            stop_place("S1", "9", "nine"),
            stop_place("S1", "10", "ten"),
            stop_place("S2", "20250101000000", "timestamp"),
            stop_place("S2", "3", "short"),
        ])
        .expect("valid versions");
    assert_eq!(index.latest_version("S1").unwrap().name.as_deref(), Some("ten"));
    assert_eq!(index.latest_version("S2").unwrap().name.as_deref(), Some("timestamp"));
}

#[test]
fn put_all_replaces_instead_of_merging() {
    let index = VersionedEntityIndex::new();
    index
        .put_all(vec![stop_place("X", "1", "a"), stop_place("X", "2", "b"), stop_place("Y", "1", "y")])
        .unwrap();
    index.put_all(vec![stop_place("X", "3", "c")]).unwrap();
    let versions = index.all_versions("X");
    assert_eq!(versions.len(), 1);
    assert_eq!(versions[0].version.as_deref(), Some("3"));
    // ids absent from the batch are untouched
    assert_eq!(index.all_versions("Y").len(), 1);
}

#[test]
fn merge_all_accumulates_versions() {
    let index = VersionedEntityIndex::new();
    index.merge_all(vec![stop_place("S1", "1", "Central")]).unwrap();
    index.merge_all(vec![stop_place("S1", "2", "Central Station")]).unwrap();
    assert_eq!(index.all_versions("S1").len(), 2);
    assert_eq!(index.latest_version("S1").unwrap().name.as_deref(), Some("Central Station"));
    // same version string again replaces that version only
    index.merge_all(vec![stop_place("S1", "1", "Old Central")]).unwrap();
    assert_eq!(index.all_versions("S1").len(), 2);
    assert_eq!(index.version("S1", "1").unwrap().name.as_deref(), Some("Old Central"));
    assert_eq!(index.latest_version("S1").unwrap().name.as_deref(), Some("Central Station"));
}

#[test]
fn remove_clears_versions_and_latest() {
    let index = VersionedEntityIndex::new();
    index.put_all(vec![stop_place("S1", "1", "a"), stop_place("S1", "2", "b")]).unwrap();
    index.remove("S1");
    assert!(index.all_versions("S1").is_empty());
    assert!(index.latest_version("S1").is_none());
    assert!(index.is_empty());
    // removing something unknown is fine
    index.remove("S1");
}

#[test]
fn version_lookup_is_exact_string_match() {
    let index = VersionedEntityIndex::new();
    index.put_all(vec![stop_place("S1", "1", "a"), stop_place("S1", "2", "b")]).unwrap();
    assert_eq!(index.version("S1", "2").unwrap().name.as_deref(), Some("b"));
    assert!(index.version("S1", "02").is_none());
    assert!(index.version("S2", "1").is_none());
    assert!(index.all_versions("S2").is_empty());
}

#[test]
fn latest_versions_has_one_per_id() {
    let index = VersionedEntityIndex::new();
    index
        .put_all(vec![
            stop_place("A", "1", "a1"),
            stop_place("A", "2", "a2"),
            stop_place("B", "5", "b5"),
        ])
        .unwrap();
    let mut names: Vec<String> = index
        .latest_versions()
        .iter()
        .filter_map(|s| s.name.clone())
        .collect();
    names.sort();
    assert_eq!(names, vec!["a2".to_string(), "b5".to_string()]);
    let by_id = index.all_versions_by_id();
    assert_eq!(by_id["A"].len(), 2);
    assert_eq!(by_id["B"].len(), 1);
}

#[test]
fn equal_markers_keep_the_earliest() {
    let index = VersionedEntityIndex::new();
    index.put("Q", vec![Quay::new("Q").with_version("1").with_name("first"), Quay::new("Q").with_version("1").with_name("second")]).unwrap();
    assert_eq!(index.latest_version("Q").unwrap().name.as_deref(), Some("first"));
}

#[test]
fn singleton_with_malformed_marker_is_accepted() {
    let index = VersionedEntityIndex::new();
    index.put("S1", vec![stop_place("S1", "draft", "a")]).unwrap();
    assert_eq!(index.latest_version("S1").unwrap().version.as_deref(), Some("draft"));
}

#[test]
fn malformed_marker_among_several_fails() {
    let index = VersionedEntityIndex::new();
    index.put("S1", vec![stop_place("S1", "1", "kept")]).unwrap();
    let err = index
        .put("S1", vec![stop_place("S1", "2", "a"), stop_place("S1", "two", "b")])
        .unwrap_err();
    match err {
        NetexError::MalformedVersion { kind, id, version } => {
            assert_eq!(kind, "StopPlace");
            assert_eq!(id, "S1");
            assert_eq!(version, "two");
        }
        other => panic!("unexpected error {other}"),
    }
    // the failing id is left as it was
    assert_eq!(index.latest_version("S1").unwrap().name.as_deref(), Some("kept"));
}

#[test]
fn missing_marker_among_several_fails() {
    let elements = [StopPlace::new("S1"), stop_place("S1", "1", "a")];
    let result = latest_versioned_element_in(&elements);
    assert!(matches!(result, Err(NetexError::MissingVersion { .. })));
}

#[test]
fn version_helpers_on_slices() {
    let versions = vec![stop_place("S1", "3", "c"), stop_place("S1", "12", "l"), stop_place("S1", "7", "g")];
    let latest = latest_versioned_element_in(&versions).unwrap().unwrap();
    assert_eq!(latest.name.as_deref(), Some("l"));
    assert_eq!(version_of_element_in(&versions, "7").unwrap().name.as_deref(), Some("g"));
    assert!(latest_versioned_element_in::<StopPlace>(&[]).unwrap().is_none());
}

#[test]
fn entity_index_overwrites_by_id() {
    let index = EntityIndex::new();
    index.put_all(vec![Line::new("L1").with_name("old"), Line::new("L2")]);
    index.put_all(vec![Line::new("L1").with_name("new")]);
    assert_eq!(index.len(), 2);
    assert_eq!(index.get("L1").unwrap().name.as_deref(), Some("new"));
    index.put("L3", Line::new("L3"));
    index.remove("L2");
    index.remove("unknown");
    let mut ids: Vec<String> = index.all().iter().map(|l| l.id.clone()).collect();
    ids.sort();
    assert_eq!(ids, vec!["L1".to_string(), "L3".to_string()]);
}

#[test]
fn relation_map_last_write_wins() {
    let relation = RelationMap::new();
    relation.insert("Q1", "S1");
    relation.put_all(vec![("Q1".to_string(), "S2".to_string()), ("Q2".to_string(), "S1".to_string())]);
    assert_eq!(relation.get("Q1").as_deref(), Some("S2"));
    assert_eq!(relation.len(), 2);
    relation.remove("Q2");
    assert!(relation.get("Q2").is_none());
}

#[test]
fn lookup_keeps_every_value() {
    let lookup = Lookup::new();
    let line = Arc::new(Line::new("L1"));
    lookup.insert("N1", Arc::clone(&line));
    lookup.insert("N1", Arc::clone(&line));
    lookup.put_all(vec![("N1".to_string(), vec![Arc::new(Line::new("L2"))])]);
    assert_eq!(lookup.lookup("N1").len(), 3);
    assert!(lookup.lookup("N2").is_empty());
    assert_eq!(lookup.keys(), vec!["N1".to_string()]);
}

#[test]
fn concurrent_appends_are_not_lost() {
    let lookup: Arc<Lookup<Line>> = Arc::new(Lookup::new());
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let lookup = Arc::clone(&lookup);
            std::thread::spawn(move || {
                for i in 0..250 {
                    lookup.insert("shared", Arc::new(Line::new(format!("L{}-{}", t, i))));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(lookup.lookup("shared").len(), 2000);
}

#[test]
fn concurrent_merges_keep_every_version() {
    for _ in 0..20 {
        let index: Arc<VersionedEntityIndex<StopPlace>> = Arc::new(VersionedEntityIndex::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let index = Arc::clone(&index);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        let version = (t * 50 + i + 1).to_string();
                        index
                            .merge_all([stop_place("S1", &version, "Central")])
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(index.all_versions("S1").len(), 400);
        assert_eq!(
            index.latest_version("S1").unwrap().version.as_deref(),
            Some("400")
        );
    }
}
