//! End-to-end tests for strength, path and network queries.
//!
//! Each test builds the investigation fixture in a MemoryStore and runs the
//! query through the public `Analyzer` handle.

use chrono::Utc;
use kindi_graph::{
    Analyzer, AnalysisConfig, ConnectionKind, Entity, EntityId, EntityType, Error, Event, EventId,
    Location, LocationId, MarkerType, MemoryStore,
};
use pretty_assertions::assert_eq;

// ============================================================================
// Helper: the investigation fixture.
//
// E1 and E2 share event Ev1 and location L1 (strength 2).
// E1 and E3 share event Ev2 (strength 1).
// E2 and E3 share nothing. E4 shares nothing with anyone.
// ============================================================================

struct Fixture {
    analyzer: Analyzer<MemoryStore>,
    e1: EntityId,
    e2: EntityId,
    e3: EntityId,
    e4: EntityId,
}

fn setup_fixture() -> Fixture {
    let store = MemoryStore::new();

    let e1 = store.create_entity("E1", EntityType::Person);
    let e2 = store.create_entity("E2", EntityType::Person);
    let e3 = store.create_entity("E3", EntityType::Organization);
    let e4 = store.create_entity("E4", EntityType::Asset);

    let l1 = store.create_location("L1", 1.0, 1.0);
    store.associate(l1, e1).unwrap();
    store.associate(l1, e2).unwrap();

    let ev1 = store.create_event("Ev1", Utc::now());
    store.add_participant(ev1, e1).unwrap();
    store.add_participant(ev1, e2).unwrap();

    let ev2 = store.create_event("Ev2", Utc::now());
    store.add_participant(ev2, e1).unwrap();
    store.add_participant(ev2, e3).unwrap();

    Fixture { analyzer: Analyzer::new(store), e1, e2, e3, e4 }
}

// ============================================================================
// 1. Strength
// ============================================================================

#[tokio::test]
async fn test_strength_of_shared_event_and_location() {
    let f = setup_fixture();

    let result = f.analyzer.strength(f.e1, f.e2).await.unwrap();
    assert_eq!(result.value, 2);
    assert_eq!(result.connections.shared_events.len(), 1);
    assert_eq!(result.connections.shared_events[0].title, "Ev1");
    assert_eq!(result.connections.shared_locations.len(), 1);
    assert_eq!(result.connections.shared_locations[0].name, "L1");
}

#[tokio::test]
async fn test_strength_of_unconnected_pair_is_zero() {
    let f = setup_fixture();

    let result = f.analyzer.strength(f.e2, f.e3).await.unwrap();
    assert_eq!(result.value, 0);
    assert!(result.connections.shared_events.is_empty());
    assert!(result.connections.shared_locations.is_empty());
}

#[tokio::test]
async fn test_strength_rejects_same_entity() {
    let f = setup_fixture();
    let err = f.analyzer.strength(f.e1, f.e1).await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)), "got {err:?}");
    assert!(err.is_client_error());
}

#[tokio::test]
async fn test_strength_unknown_entity() {
    let f = setup_fixture();
    let err = f.analyzer.strength(f.e1, EntityId(404)).await.unwrap_err();
    assert!(matches!(err, Error::EntityNotFound(EntityId(404))), "got {err:?}");
}

// ============================================================================
// 2. Path
// ============================================================================

#[tokio::test]
async fn test_path_through_intermediary() {
    let f = setup_fixture();

    let report = f.analyzer.path(f.e2, f.e3, None).await.unwrap();
    assert_eq!(report.path_length, 2);
    assert_eq!(report.entity_ids(), vec![f.e2, f.e1, f.e3]);

    let names: Vec<&str> = report.path.iter().map(|s| s.entity.name.as_str()).collect();
    assert_eq!(names, vec!["E2", "E1", "E3"]);

    // E2 -> E1 attributed to the shared event, not the shared location.
    let first = report.path[0].connection.as_ref().unwrap();
    assert_eq!(first.kind, ConnectionKind::Event);
    assert_eq!(first.name, "Ev1");

    let second = report.path[1].connection.as_ref().unwrap();
    assert_eq!(second.name, "Ev2");
    assert!(report.path[2].connection.is_none());
}

#[tokio::test]
async fn test_path_not_found_is_success() {
    let f = setup_fixture();

    let report = f.analyzer.path(f.e1, f.e4, None).await.unwrap();
    assert_eq!(report.path_length, 0);
    assert!(report.path.is_empty());
}

#[tokio::test]
async fn test_path_respects_max_depth() {
    let f = setup_fixture();

    let report = f.analyzer.path(f.e2, f.e3, Some(1)).await.unwrap();
    assert!(!report.is_found(), "two-hop path must not be returned for maxDepth 1");
}

#[tokio::test]
async fn test_path_to_self_is_trivial() {
    let f = setup_fixture();

    let report = f.analyzer.path(f.e3, f.e3, None).await.unwrap();
    assert_eq!(report.path_length, 0);
    assert_eq!(report.entity_ids(), vec![f.e3]);
    assert!(report.path[0].connection.is_none());
}

#[tokio::test]
async fn test_path_depth_above_limit_rejected() {
    let f = setup_fixture();
    let err = f.analyzer.path(f.e1, f.e2, Some(50)).await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)), "got {err:?}");
}

#[tokio::test]
async fn test_path_unknown_target() {
    let f = setup_fixture();
    let err = f.analyzer.path(f.e1, EntityId(404), None).await.unwrap_err();
    assert!(matches!(err, Error::EntityNotFound(_)), "got {err:?}");
}

// ============================================================================
// 3. Network
// ============================================================================

#[tokio::test]
async fn test_network_default_depth() {
    let f = setup_fixture();

    let network = f.analyzer.network(&[f.e2], None, None).await.unwrap();
    assert_eq!(network.node_ids(), vec![f.e2, f.e1]);
    assert_eq!(network.links.len(), 1);
    assert_eq!(network.link(f.e1, f.e2).unwrap().value, 2);
}

#[tokio::test]
async fn test_network_depth_two() {
    let f = setup_fixture();

    let network = f.analyzer.network(&[f.e2], Some(2), Some(0)).await.unwrap();
    assert_eq!(network.nodes.len(), 3);
    assert_eq!(network.links.len(), 2);
    assert_eq!(network.link(f.e3, f.e1).unwrap().value, 1);
    assert!(!network.contains_node(f.e4));
}

#[tokio::test]
async fn test_network_min_strength_keeps_strong_link() {
    let f = setup_fixture();

    let network = f.analyzer.network(&[f.e2], Some(1), Some(2)).await.unwrap();
    assert_eq!(network.node_ids(), vec![f.e2, f.e1]);
    assert_eq!(network.links.len(), 1);
    assert_eq!(network.link(f.e1, f.e2).unwrap().value, 2);
}

#[tokio::test]
async fn test_network_min_strength_filters_links_not_nodes() {
    let f = setup_fixture();

    let network = f.analyzer.network(&[f.e2], Some(2), Some(2)).await.unwrap();
    assert!(network.contains_node(f.e3), "weak neighbors stay reachable");
    assert!(network.link(f.e1, f.e3).is_none(), "strength-1 link is filtered");
    assert_eq!(network.links.len(), 1);
}

#[tokio::test]
async fn test_network_depth_zero_returns_roots_only() {
    let f = setup_fixture();

    let network = f.analyzer.network(&[f.e1, f.e4], Some(0), None).await.unwrap();
    assert_eq!(network.node_ids(), vec![f.e1, f.e4]);
    assert!(network.links.is_empty());
}

#[tokio::test]
async fn test_network_multiple_roots_visit_once() {
    let f = setup_fixture();

    let network = f.analyzer.network(&[f.e2, f.e3], Some(1), None).await.unwrap();
    // E1 is reachable from both roots but appears once.
    assert_eq!(network.node_ids(), vec![f.e2, f.e3, f.e1]);
    assert_eq!(network.links.len(), 2);
}

#[tokio::test]
async fn test_network_empty_roots() {
    let f = setup_fixture();
    let network = f.analyzer.network(&[], Some(3), None).await.unwrap();
    assert!(network.is_empty());
}

#[tokio::test]
async fn test_network_unknown_root() {
    let f = setup_fixture();
    let err = f.analyzer.network(&[f.e1, EntityId(404)], None, None).await.unwrap_err();
    assert!(matches!(err, Error::EntityNotFound(EntityId(404))), "got {err:?}");
}

#[tokio::test]
async fn test_network_visit_cap() {
    let f = setup_fixture();
    let store = f.analyzer.store().clone();
    let config = AnalysisConfig { max_visited: 2, ..AnalysisConfig::default() };
    let capped = Analyzer::with_config(store, config).unwrap();

    let err = capped.network(&[f.e2], Some(2), None).await.unwrap_err();
    assert!(matches!(err, Error::BudgetExceeded(_)), "got {err:?}");
}

#[tokio::test]
async fn test_with_config_rejects_invalid_caps() {
    let f = setup_fixture();

    for config in [
        AnalysisConfig { max_visited: 0, ..AnalysisConfig::default() },
        AnalysisConfig { timeout_ms: 0, ..AnalysisConfig::default() },
        AnalysisConfig { default_max_depth: 9, ..AnalysisConfig::default() },
    ] {
        let err = Analyzer::with_config(f.analyzer.store().clone(), config).err().unwrap();
        assert!(matches!(err, Error::InvalidArgument(_)), "got {err:?}");
    }
}

// ============================================================================
// 4. Idempotence
// ============================================================================

#[tokio::test]
async fn test_repeated_queries_are_identical() {
    let f = setup_fixture();

    assert_eq!(
        f.analyzer.strength(f.e1, f.e2).await.unwrap(),
        f.analyzer.strength(f.e1, f.e2).await.unwrap(),
    );
    assert_eq!(
        f.analyzer.path(f.e2, f.e3, None).await.unwrap(),
        f.analyzer.path(f.e2, f.e3, None).await.unwrap(),
    );
    assert_eq!(
        f.analyzer.network(&[f.e2], Some(2), None).await.unwrap(),
        f.analyzer.network(&[f.e2], Some(2), None).await.unwrap(),
    );
}

// ============================================================================
// 5. Payload shapes
// ============================================================================

#[tokio::test]
async fn test_payload_shapes() {
    let f = setup_fixture();

    let strength = serde_json::to_value(f.analyzer.strength(f.e1, f.e3).await.unwrap()).unwrap();
    assert_eq!(strength["strength"], 1);
    assert_eq!(strength["connections"]["sharedEvents"][0]["title"], "Ev2");
    assert!(strength["connections"]["sharedLocations"].as_array().unwrap().is_empty());

    let path = serde_json::to_value(f.analyzer.path(f.e2, f.e3, None).await.unwrap()).unwrap();
    assert_eq!(path["pathLength"], 2);
    assert_eq!(path["path"][0]["entity"]["name"], "E2");
    assert_eq!(path["path"][0]["entity"]["type"], "person");
    assert_eq!(path["path"][1]["connection"]["type"], "event");
    assert_eq!(path["path"][1]["connection"]["name"], "Ev2");
    assert!(path["path"][2]["connection"].is_null());

    let network = serde_json::to_value(f.analyzer.network(&[f.e3], None, None).await.unwrap()).unwrap();
    assert_eq!(network["nodes"][0]["id"], f.e3.to_string());
    assert_eq!(network["nodes"][0]["type"], "organization");
    assert_eq!(network["nodes"][0]["group"], 2);
    assert_eq!(network["links"][0]["source"], f.e1.to_string());
    assert_eq!(network["links"][0]["target"], f.e3.to_string());
    assert_eq!(network["links"][0]["value"], 1);
}

// ============================================================================
// 6. Embedded analyzer reflects store writes between queries
// ============================================================================

#[tokio::test]
async fn test_open_memory_sees_later_writes() {
    let analyzer = Analyzer::open_memory();
    assert_eq!(analyzer.config().default_depth, 1);

    let store = analyzer.store();
    let a = store.create_entity("A", EntityType::Person);
    let b = store.create_entity("B", EntityType::Asset);
    assert!(!analyzer.path(a, b, None).await.unwrap().is_found());

    let seen = store.create_event("Seen together", Utc::now());
    store.add_participant(seen, a).unwrap();
    store.add_participant(seen, b).unwrap();
    assert_eq!(analyzer.path(a, b, None).await.unwrap().path_length, 1);

    assert!(store.delete_event(seen));
    assert_eq!(analyzer.strength(a, b).await.unwrap().value, 0);
    assert!(analyzer.network(&[a], None, None).await.unwrap().links.is_empty());
}

// ============================================================================
// 7. Record metadata survives the store and reaches the payloads
// ============================================================================

#[tokio::test]
async fn test_imported_records_carry_metadata() {
    let store = MemoryStore::new();
    store.put_entity(
        Entity::new(EntityId(7), "Courier", EntityType::Person)
            .with_coordinates(120.0, 48.5)
            .with_attribute("alias", "Fox"),
    );
    store.put_entity(Entity::new(EntityId(8), "Van", EntityType::Asset));

    let mut drop_off = Event::new(EventId(3), "Drop-off", Utc::now())
        .with_description("Van seen at the harbor")
        .with_severity("medium")
        .with_type("sighting");
    drop_off.add_entity(EntityId(7));
    drop_off.add_entity(EntityId(8));
    store.put_event(drop_off).unwrap();

    let mut harbor = Location::new(LocationId(4), "Harbor", 51.9, 4.1).with_marker(MarkerType::Primary);
    harbor.associate(EntityId(7));
    harbor.associate(EntityId(8));
    store.put_location(harbor).unwrap();

    let analyzer = Analyzer::new(store);

    let report = analyzer.path(EntityId(7), EntityId(8), None).await.unwrap();
    assert_eq!(report.path_length, 1);
    let courier = &report.path[0].entity;
    assert_eq!(courier.attribute("alias"), Some(&serde_json::json!("Fox")));
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["path"][0]["entity"]["coordinates"]["x"], 120.0);
    assert_eq!(json["path"][0]["entity"]["coordinates"]["y"], 48.5);
    assert_eq!(json["path"][0]["entity"]["attributes"]["alias"], "Fox");
    assert_eq!(json["path"][0]["connection"]["name"], "Drop-off");

    let stored = analyzer.store().get_event(EventId(3)).unwrap();
    assert_eq!(
        (stored.description.as_str(), stored.severity.as_str(), stored.event_type.as_str()),
        ("Van seen at the harbor", "medium", "sighting"),
    );
    let event_json = serde_json::to_value(&stored).unwrap();
    assert_eq!(event_json["type"], "sighting");

    let location = analyzer.store().get_location(LocationId(4)).unwrap();
    assert_eq!(location.marker_type, MarkerType::Primary);
    assert_eq!(serde_json::to_value(&location).unwrap()["marker_type"], "primary");

    assert_eq!(analyzer.strength(EntityId(7), EntityId(8)).await.unwrap().value, 2);
}
