mod common;

use arena_client::{aggregate_traits, SyncChannel, TraitCatalog, TraitScope};
use arena_schema::GamePhase;

use common::{init_tracing, player, snapshot, unit};

/// Server-provided definitions, as delivered once per game/config load.
const SERVER_TRAITS: &str = r#"[
    {
        "id": "straw_hat",
        "name": "Straw Hat",
        "description": "Straw Hat crew members gain health and attack speed.",
        "type": "origin",
        "effects": [
            { "minUnits": 3, "description": "tier 1", "style": "bronze" },
            { "minUnits": 5, "description": "tier 2", "style": "gold" }
        ]
    },
    {
        "id": "swordsman",
        "name": "Swordsman",
        "description": "Swordsmen gain attack damage.",
        "type": "class",
        "effects": [
            { "minUnits": 2, "description": "tier 1", "style": "bronze" }
        ]
    }
]"#;

#[test]
fn server_bulk_load_replaces_builtins_wholesale() {
    init_tracing();
    let catalog = TraitCatalog::with_builtins();
    assert!(catalog.lookup("navigator").is_some());

    catalog
        .replace_all_from_json(SERVER_TRAITS)
        .expect("server payload loads");

    // hot-swap discarded every built-in entry
    assert!(catalog.lookup("navigator").is_none());
    assert!(catalog.lookup("fighter").is_none());
    assert_eq!(catalog.len(), 2);

    // the replaced straw_hat has different breakpoints than the builtin
    let straw_hat = catalog.lookup("Straw Hat").expect("server definition");
    assert_eq!(straw_hat.effects[0].min_units, 3);
}

#[test]
fn aggregation_runs_against_the_held_snapshot_board() {
    init_tracing();
    let catalog = TraitCatalog::new();
    catalog
        .replace_all_from_json(SERVER_TRAITS)
        .expect("server payload loads");

    let mut channel = SyncChannel::new();
    channel.connect();
    let board = vec![
        unit("u1", "p1", 0, 0, &["Straw Hat", "Swordsman"]),
        unit("u2", "p1", 1, 0, &["Straw Hat", "Swordsman"]),
        unit("u3", "p1", 2, 0, &["Straw Hat"]),
        unit("u4", "p1", 3, 0, &["Sniper"]),
    ];
    channel
        .apply_snapshot(snapshot(
            "room-1",
            1,
            GamePhase::Planning,
            vec![player("p1", board, Vec::new())],
        ))
        .expect("snapshot applies");

    let roster = &channel.current().unwrap().players["p1"].board;
    let aggregation = aggregate_traits(roster, &catalog, TraitScope::BoardOnly);

    // three straw hats reach the server-defined bronze tier at 3
    let straw_hat = aggregation
        .active
        .iter()
        .find(|t| t.id == "straw_hat")
        .expect("active");
    assert_eq!((straw_hat.count, straw_hat.active_level), (3, 0));

    let swordsman = aggregation
        .active
        .iter()
        .find(|t| t.id == "swordsman")
        .expect("active");
    assert_eq!((swordsman.count, swordsman.active_level), (2, 0));

    // the unmapped trait id is reported as a configuration error
    assert_eq!(aggregation.unknown_traits, vec!["sniper".to_string()]);
}
