use std::collections::{HashMap, HashSet};

use crate::request::{PreferenceRecord, SelectedPlayer};
use super::types::{ClassifiedPlayers, DraftSlot, Player, RankedPreference, SlotId};

/// Splits the selected players into ranked and unranked-but-available
///
/// * any record with a positive rank → ranked, keeping only the positive records
/// * records but no positive rank → available for every slot the records mention
/// * no records at all → available for every candidate slot
pub fn classify_players(
    selected: &[SelectedPlayer],
    preferences: &[PreferenceRecord],
    candidate_slots: &[DraftSlot],
) -> ClassifiedPlayers {
    let mut records_by_player: HashMap<&str, Vec<&PreferenceRecord>> = HashMap::new();
    for record in preferences {
        records_by_player
            .entry(record.player_id.as_str())
            .or_default()
            .push(record);
    }

    let all_slots: HashSet<SlotId> = candidate_slots.iter().map(|s| s.id.clone()).collect();

    let mut classified = ClassifiedPlayers::default();

    for selected_player in selected {
        let records = records_by_player
            .get(selected_player.id.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        let mut ranked: Vec<RankedPreference> = records
            .iter()
            .filter(|r| r.rank > 0)
            .map(|r| RankedPreference {
                slot_id: r.slot_id.clone(),
                rank: r.rank,
            })
            .collect();

        let player = if !ranked.is_empty() {
            ranked.sort_by_key(|p| p.rank);
            // A slot ranked twice keeps its best rank
            let mut seen = HashSet::new();
            ranked.retain(|p| seen.insert(p.slot_id.clone()));

            Player {
                id: selected_player.id.clone(),
                display_name: selected_player.display_name.clone(),
                chat_id: selected_player.chat_id.clone(),
                has_preferences: true,
                available_slots: seen,
                preferences: ranked,
            }
        } else {
            let available_slots = if records.is_empty() {
                all_slots.clone()
            } else {
                records.iter().map(|r| r.slot_id.clone()).collect()
            };

            Player {
                id: selected_player.id.clone(),
                display_name: selected_player.display_name.clone(),
                chat_id: selected_player.chat_id.clone(),
                has_preferences: false,
                available_slots,
                preferences: Vec::new(),
            }
        };

        if player.has_preferences {
            classified.ranked.push(player);
        } else {
            classified.unranked.push(player);
        }
    }

    classified
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn selected(id: &str) -> SelectedPlayer {
        SelectedPlayer {
            id: id.to_string(),
            display_name: id.to_uppercase(),
            chat_id: format!("chat-{}", id),
        }
    }

    fn record(player_id: &str, slot_id: &str, rank: i32) -> PreferenceRecord {
        PreferenceRecord {
            player_id: player_id.to_string(),
            slot_id: slot_id.to_string(),
            rank,
        }
    }

    fn slots(ids: &[&str]) -> Vec<DraftSlot> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| DraftSlot {
                id: id.to_string(),
                date_time: Utc.with_ymd_and_hms(2024, 8, 20 + i as u32, 19, 0, 0).unwrap(),
                season_year: 2024,
            })
            .collect()
    }

    #[test]
    fn positive_ranks_make_a_ranked_player() {
        let prefs = vec![record("a", "s3", 2), record("a", "s1", 1), record("a", "s2", 0)];
        let out = classify_players(&[selected("a")], &prefs, &slots(&["s1", "s2", "s3"]));

        assert_eq!(out.ranked.len(), 1);
        assert!(out.unranked.is_empty());
        let player = &out.ranked[0];
        assert!(player.has_preferences);
        let order: Vec<&str> = player.preferences.iter().map(|p| p.slot_id.as_str()).collect();
        assert_eq!(order, vec!["s1", "s3"]);
        assert!(!player.can_attend("s2"));
    }

    #[test]
    fn zero_ranks_only_mean_available_for_those_slots() {
        let prefs = vec![record("b", "s1", 0), record("b", "s3", 0)];
        let out = classify_players(&[selected("b")], &prefs, &slots(&["s1", "s2", "s3"]));

        assert!(out.ranked.is_empty());
        let player = &out.unranked[0];
        assert!(!player.has_preferences);
        assert!(player.preferences.is_empty());
        assert!(player.can_attend("s1"));
        assert!(!player.can_attend("s2"));
        assert!(player.can_attend("s3"));
    }

    #[test]
    fn no_records_means_available_for_every_candidate() {
        let out = classify_players(&[selected("c")], &[], &slots(&["s1", "s2", "s3"]));
        let player = &out.unranked[0];
        assert_eq!(player.available_slots.len(), 3);
    }

    #[test]
    fn every_selected_player_lands_in_exactly_one_list() {
        let chosen: Vec<SelectedPlayer> = ["a", "b", "c", "d"].iter().map(|id| selected(id)).collect();
        let prefs = vec![
            record("a", "s1", 1),
            record("b", "s2", 0),
            record("zz", "s1", 1), // not selected
        ];
        let out = classify_players(&chosen, &prefs, &slots(&["s1", "s2"]));

        assert_eq!(out.len(), 4);
        let mut ids: Vec<&str> = out.iter().map(|p| p.id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }
}
