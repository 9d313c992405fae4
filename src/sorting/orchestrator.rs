use rand::Rng;
use tracing::{debug, info, warn};

use super::combinations::get_combinations;
use super::packer::pack_combination;
use super::scorer::score_result;
use super::types::{
    ClassifiedPlayers, DraftSlot, SortingResult, UngroupedPlayer, GROUP_COUNT, GROUP_SIZE,
};

/// Searches every `GROUP_COUNT`-slot combination for the best packing
///
/// The first combination that fills all groups wins outright. Otherwise the highest
/// scoring packing is kept, earlier combinations winning ties. Always looks for exactly
/// `GROUP_COUNT` groups, however many players were selected.
pub fn sort_players<R: Rng + ?Sized>(
    players: &ClassifiedPlayers,
    candidate_slots: &[DraftSlot],
    total_selected: usize,
    rng: &mut R,
) -> SortingResult {
    if total_selected > GROUP_COUNT * GROUP_SIZE {
        warn!(
            total_selected,
            capacity = GROUP_COUNT * GROUP_SIZE,
            "more players selected than {} groups can hold",
            GROUP_COUNT
        );
    }

    let slot_refs: Vec<&DraftSlot> = candidate_slots.iter().collect();
    let combinations = get_combinations(&slot_refs, GROUP_COUNT);

    info!(
        ranked = players.ranked.len(),
        unranked = players.unranked.len(),
        candidate_slots = candidate_slots.len(),
        combinations = combinations.len(),
        "sorting players into draft slots"
    );

    if combinations.is_empty() {
        warn!(
            candidate_slots = candidate_slots.len(),
            "not enough candidate slots to form {} groups", GROUP_COUNT
        );
        return unsorted(players);
    }

    let mut best: Option<(usize, SortingResult)> = None;

    for (index, combination) in combinations.iter().enumerate() {
        let result = pack_combination(players, combination, rng);

        if result.is_perfect() {
            info!(combination = index, "found a packing that fills every group");
            return result;
        }

        let score = score_result(&result);
        debug!(combination = index, score, "scored imperfect packing");

        if best.as_ref().map_or(true, |(best_score, _)| score > *best_score) {
            best = Some((score, result));
        }
    }

    let (score, result) = best.unwrap_or_else(|| (0, unsorted(players)));
    info!(
        score,
        completed = result.completed_groups.len(),
        ungrouped = result.ungrouped_players.len(),
        "no perfect packing; keeping best scoring combination"
    );
    result
}

/// Everyone ungrouped, no hints
fn unsorted(players: &ClassifiedPlayers) -> SortingResult {
    SortingResult {
        completed_groups: Vec::new(),
        ungrouped_players: players
            .iter()
            .map(|p| UngroupedPlayer {
                id: p.id.clone(),
                display_name: p.display_name.clone(),
                chat_id: p.chat_id.clone(),
                best_slot: None,
            })
            .collect(),
        slot_availability_analysis: Vec::new(),
    }
}
