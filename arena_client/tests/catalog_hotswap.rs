use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use arena_client::TraitCatalog;
use arena_schema::{TraitDefinition, TraitEffect, TraitKind, TraitStyle};

fn generation(tag: u32) -> Vec<TraitDefinition> {
    // every trait in one generation carries the same threshold, so a reader
    // can detect a mixed table by comparing entries against each other
    ["alpha", "beta", "gamma"]
        .iter()
        .map(|name| TraitDefinition {
            id: name.to_string(),
            name: name.to_string(),
            description: format!("generation {tag}"),
            kind: TraitKind::Origin,
            effects: vec![TraitEffect {
                min_units: tag,
                description: format!("generation {tag}"),
                style: TraitStyle::Bronze,
            }],
            icon_color: None,
        })
        .collect()
}

#[test]
fn concurrent_readers_never_observe_a_mixed_table() {
    let catalog = Arc::new(TraitCatalog::new());
    catalog.replace_all(generation(1)).expect("initial load");

    let stop = Arc::new(AtomicBool::new(false));
    let mut readers = Vec::new();
    for _ in 0..4 {
        let catalog = Arc::clone(&catalog);
        let stop = Arc::clone(&stop);
        readers.push(thread::spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                let table = catalog.table();
                let thresholds: Vec<u32> = table
                    .values()
                    .map(|definition| definition.effects[0].min_units)
                    .collect();
                assert_eq!(table.len(), 3);
                assert!(
                    thresholds.windows(2).all(|pair| pair[0] == pair[1]),
                    "reader observed entries from two different loads: {thresholds:?}"
                );
            }
        }));
    }

    for tag in 2..200u32 {
        catalog.replace_all(generation(tag)).expect("swap");
    }

    stop.store(true, Ordering::Relaxed);
    for reader in readers {
        reader.join().expect("reader panicked");
    }
}

#[test]
fn swap_is_visible_to_subsequent_lookups() {
    let catalog = TraitCatalog::with_builtins();
    assert!(catalog.lookup("fighter").is_some());

    catalog.replace_all(generation(5)).expect("swap");
    assert!(catalog.lookup("fighter").is_none(), "old entries discarded");
    assert_eq!(catalog.lookup("alpha").unwrap().effects[0].min_units, 5);
}
