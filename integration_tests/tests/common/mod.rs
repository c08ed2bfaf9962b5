use std::collections::HashMap;
use std::sync::Once;

use arena_schema::{
    ActiveTrait, CombatEvent, CombatEventKind, GamePhase, GameState, GameUnit, LootOrb, LootType,
    PlayerState, ShopOffer,
};

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("warn")
            .with_test_writer()
            .try_init();
    });
}

pub fn unit(id: &str, owner: &str, x: i32, y: i32, traits: &[&str]) -> GameUnit {
    GameUnit {
        id: id.to_string(),
        definition_id: format!("{id}_def"),
        name: id.to_string(),
        cost: 1,
        max_health: 650,
        current_health: 650,
        mana: 0,
        max_mana: 60,
        attack_damage: 55,
        ability_power: 30,
        armor: 25,
        magic_resist: 25,
        attack_speed: 0.75,
        range: 1,
        traits: traits.iter().map(|t| t.to_string()).collect(),
        items: Vec::new(),
        x,
        y,
        star_level: 1,
        owner_id: owner.to_string(),
        ability: None,
        active_ability: None,
        stun_ticks_remaining: 0,
        atk_buff: 1.0,
        spd_buff: 1.0,
    }
}

pub fn player(id: &str, board: Vec<GameUnit>, active_traits: Vec<ActiveTrait>) -> PlayerState {
    PlayerState {
        player_id: id.to_string(),
        name: id.to_string(),
        health: 100,
        gold: 10,
        level: 4,
        xp: 2,
        next_level_xp: 10,
        place: None,
        combat_side: None,
        bench: Vec::new(),
        board,
        active_traits,
        shop: vec![ShopOffer {
            id: "luffy_v1".to_string(),
            name: "Luffy".to_string(),
            cost: 1,
            traits: vec!["straw_hat".to_string(), "fighter".to_string()],
        }],
        loot_orbs: Vec::new(),
    }
}

pub fn gold_orb(id: &str) -> LootOrb {
    LootOrb {
        id: id.to_string(),
        x: 3,
        y: 2,
        loot_type: LootType::Gold,
        content_id: String::new(),
        amount: 5,
    }
}

pub fn damage_event(timestamp: u64, source: &str, target: &str, value: i32) -> CombatEvent {
    CombatEvent {
        timestamp,
        kind: CombatEventKind::Damage,
        source_id: source.to_string(),
        target_id: target.to_string(),
        value,
    }
}

pub fn snapshot(room: &str, round: u64, phase: GamePhase, players: Vec<PlayerState>) -> GameState {
    let mut matchups = HashMap::new();
    if players.len() == 2 {
        matchups.insert(players[0].player_id.clone(), players[1].player_id.clone());
        matchups.insert(players[1].player_id.clone(), players[0].player_id.clone());
    }
    GameState {
        room_id: room.to_string(),
        host_id: players
            .first()
            .map(|p| p.player_id.clone())
            .unwrap_or_default(),
        phase,
        round,
        time_remaining_ms: 30_000,
        total_phase_duration: 30_000,
        players: players
            .into_iter()
            .map(|p| (p.player_id.clone(), p))
            .collect(),
        matchups,
        recent_events: Vec::new(),
        damage_log: HashMap::new(),
        game_mode: "onepiece".to_string(),
    }
}
