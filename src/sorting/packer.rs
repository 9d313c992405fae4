use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::types::{
    AssignmentResult, ClassifiedPlayers, CompletedGroup, DraftSlot, Player, PlayerName,
    SlotAvailability, SlotRef, UngroupedPlayer, GROUP_SIZE,
};

/// Packs every player into the slots of one combination
///
/// Ranked players go first and take their best-ranked slot with room. Unranked players
/// then take a random slot they can attend. Whoever is left gets one more pass over the
/// combination in order. Buckets that end short of `GROUP_SIZE` are dissolved.
pub fn pack_combination<R: Rng + ?Sized>(
    players: &ClassifiedPlayers,
    combination: &[&DraftSlot],
    rng: &mut R,
) -> AssignmentResult {
    let mut order: Vec<&Player> = players.iter().collect();
    order.shuffle(rng);

    let slot_index = |slot_id: &str| combination.iter().position(|s| s.id == slot_id);

    let mut buckets: Vec<Vec<&Player>> = vec![Vec::new(); combination.len()];
    let mut unassigned: Vec<&Player> = Vec::new();

    // Pass 1: ranked players, best rank first
    for &player in order.iter().filter(|p| p.has_preferences) {
        let target = player
            .preferences
            .iter()
            .filter_map(|pref| slot_index(pref.slot_id.as_str()))
            .find(|&i| buckets[i].len() < GROUP_SIZE);

        match target {
            Some(i) => buckets[i].push(player),
            None => unassigned.push(player),
        }
    }

    // Pass 2: unranked players, any slot they can attend
    for &player in order.iter().filter(|p| !p.has_preferences) {
        let mut options: Vec<usize> = (0..combination.len())
            .filter(|&i| player.can_attend(&combination[i].id))
            .collect();
        options.shuffle(rng);

        match options.into_iter().find(|&i| buckets[i].len() < GROUP_SIZE) {
            Some(i) => buckets[i].push(player),
            None => unassigned.push(player),
        }
    }

    // Pass 3: catch-all over the combination in order
    unassigned.shuffle(rng);
    let mut leftovers: Vec<&Player> = Vec::new();
    for player in unassigned {
        let open = (0..combination.len()).find(|&i| {
            buckets[i].len() < GROUP_SIZE && player.can_attend(&combination[i].id)
        });

        match open {
            Some(i) => buckets[i].push(player),
            None => leftovers.push(player),
        }
    }

    let mut completed_groups = Vec::new();
    for (slot, bucket) in combination.iter().zip(buckets) {
        if bucket.len() == GROUP_SIZE {
            completed_groups.push(CompletedGroup {
                slot: (*slot).clone(),
                players: bucket.iter().map(|p| p.summary()).collect(),
            });
        } else {
            // Partial groups are never kept
            leftovers.extend(bucket);
        }
    }

    let ungrouped_players = leftovers
        .iter()
        .map(|p| UngroupedPlayer {
            id: p.id.clone(),
            display_name: p.display_name.clone(),
            chat_id: p.chat_id.clone(),
            best_slot: best_slot(p, combination),
        })
        .collect();

    let slot_availability_analysis = analyze_availability(&leftovers, combination);

    debug!(
        slots = ?combination.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
        completed = completed_groups.len(),
        ungrouped = leftovers.len(),
        "packed combination"
    );

    AssignmentResult {
        completed_groups,
        ungrouped_players,
        slot_availability_analysis,
    }
}

/// Best slot an ungrouped player could have gone to in this combination
pub fn best_slot(player: &Player, combination: &[&DraftSlot]) -> Option<SlotRef> {
    let preferred = player
        .preferences
        .iter()
        .find_map(|pref| combination.iter().find(|s| s.id == pref.slot_id));

    preferred
        .or_else(|| combination.iter().find(|s| player.can_attend(&s.id)))
        .or_else(|| combination.first())
        .map(|slot| slot.to_ref())
}

/// For each slot, the ungrouped players who cannot make it and how many can
pub fn analyze_availability(
    ungrouped: &[&Player],
    combination: &[&DraftSlot],
) -> Vec<SlotAvailability> {
    combination
        .iter()
        .map(|slot| {
            let unavailable_players: Vec<PlayerName> = ungrouped
                .iter()
                .filter(|p| !p.can_attend(&slot.id))
                .map(|p| PlayerName {
                    id: p.id.clone(),
                    display_name: p.display_name.clone(),
                })
                .collect();

            SlotAvailability {
                slot: (*slot).clone(),
                available_player_count: ungrouped.len() - unavailable_players.len(),
                unavailable_players,
            }
        })
        .collect()
}
