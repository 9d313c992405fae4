pub mod types;
pub mod classify;
pub mod combinations;
pub mod packer;
pub mod scorer;
pub mod orchestrator;

#[cfg(test)]
mod test_support;

use rand::Rng;

use crate::error::SortError;
use crate::request::{validate_request, SortRequest};

pub use types::{
    AssignmentResult, ClassifiedPlayers, CompletedGroup, DraftSlot, Player, PlayerSummary,
    SlotAvailability, SlotRef, SortingResult, UngroupedPlayer, GROUP_COUNT, GROUP_SIZE,
};
pub use classify::classify_players;
pub use combinations::get_combinations;
pub use orchestrator::sort_players;

/// Validates a request, classifies its players and runs the slot search
pub fn run_sort<R: Rng + ?Sized>(
    request: &SortRequest,
    rng: &mut R,
) -> Result<SortingResult, SortError> {
    validate_request(request)?;

    let classified = classify_players(
        &request.selected_players,
        &request.preferences,
        &request.candidate_slots,
    );

    Ok(sort_players(
        &classified,
        &request.candidate_slots,
        request.selected_players.len(),
        rng,
    ))
}
