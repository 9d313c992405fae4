// Fixtures shared by the sorting tests.

use std::collections::{HashMap, HashSet};

use chrono::{Duration, TimeZone, Utc};

use super::types::{
    ClassifiedPlayers, DraftSlot, Player, RankedPreference, SortingResult, GROUP_SIZE,
};

pub fn make_slots(ids: &[&str]) -> Vec<DraftSlot> {
    let first = Utc.with_ymd_and_hms(2024, 8, 18, 19, 0, 0).unwrap();
    ids.iter()
        .enumerate()
        .map(|(i, id)| DraftSlot {
            id: id.to_string(),
            date_time: first + Duration::days(i as i64),
            season_year: 2024,
        })
        .collect()
}

pub fn ranked_player(id: &str, prefs: &[(&str, i32)]) -> Player {
    let mut preferences: Vec<RankedPreference> = prefs
        .iter()
        .map(|(slot, rank)| RankedPreference {
            slot_id: slot.to_string(),
            rank: *rank,
        })
        .collect();
    preferences.sort_by_key(|p| p.rank);

    Player {
        id: id.to_string(),
        display_name: format!("Player {}", id),
        chat_id: format!("chat-{}", id),
        has_preferences: true,
        available_slots: prefs.iter().map(|(slot, _)| slot.to_string()).collect(),
        preferences,
    }
}

pub fn available_player(id: &str, slots: &[&str]) -> Player {
    Player {
        id: id.to_string(),
        display_name: format!("Player {}", id),
        chat_id: format!("chat-{}", id),
        has_preferences: false,
        available_slots: slots.iter().map(|s| s.to_string()).collect(),
        preferences: Vec::new(),
    }
}

impl ClassifiedPlayers {
    pub fn len(&self) -> usize {
        self.ranked.len() + self.unranked.len()
    }
}

pub fn total_players(result: &SortingResult) -> usize {
    result
        .completed_groups
        .iter()
        .map(|g| g.players.len())
        .sum::<usize>()
        + result.ungrouped_players.len()
}

/// Checks the properties every result must hold regardless of the shuffle
pub fn assert_invariants(players: &ClassifiedPlayers, result: &SortingResult) {
    let by_id: HashMap<&str, &Player> = players.iter().map(|p| (p.id.as_str(), p)).collect();

    let mut seen = HashSet::new();
    for group in &result.completed_groups {
        assert_eq!(group.players.len(), GROUP_SIZE, "group {} is not full", group.slot.id);
        for member in &group.players {
            assert!(seen.insert(member.id.clone()), "{} placed twice", member.id);
            let player = by_id[member.id.as_str()];
            assert!(
                player.can_attend(&group.slot.id),
                "{} placed in {} without being available",
                member.id,
                group.slot.id
            );
        }
    }
    for ungrouped in &result.ungrouped_players {
        assert!(seen.insert(ungrouped.id.clone()), "{} listed twice", ungrouped.id);
    }

    let expected: HashSet<String> = by_id.keys().map(|id| id.to_string()).collect();
    assert_eq!(seen, expected, "players lost or invented");
}
