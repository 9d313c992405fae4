use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::SortError;
use crate::sorting::{DraftSlot, GROUP_SIZE};

/// A registered player picked by the operator for this sort
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedPlayer {
    pub id: String,
    pub display_name: String,
    pub chat_id: String,
}

/// One draft-slot preference row. Rank 0 means "available, not ranked".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    pub player_id: String,
    pub slot_id: String,
    #[serde(default)]
    pub rank: i32,
}

/// Everything the engine needs for one run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SortRequest {
    pub selected_players: Vec<SelectedPlayer>,
    #[serde(default)]
    pub preferences: Vec<PreferenceRecord>,
    #[serde(default)]
    pub candidate_slots: Vec<DraftSlot>,
}

impl SortRequest {
    /// Keeps only the candidate slots of one season
    pub fn restrict_to_season(&mut self, season_year: i32) {
        self.candidate_slots.retain(|s| s.season_year == season_year);
    }
}

/// Validates a sort request before it reaches the engine
pub fn validate_request(req: &SortRequest) -> Result<(), SortError> {
    let count = req.selected_players.len();
    if count == 0 || count % GROUP_SIZE != 0 {
        return Err(SortError::InvalidSelectionCount {
            count,
            group_size: GROUP_SIZE,
        });
    }

    let mut seen = HashSet::new();
    for player in &req.selected_players {
        if !seen.insert(player.id.as_str()) {
            return Err(SortError::DuplicatePlayer(player.id.clone()));
        }
    }

    let mut seen_slots = HashSet::new();
    for slot in &req.candidate_slots {
        if !seen_slots.insert(slot.id.as_str()) {
            return Err(SortError::DuplicateSlot(slot.id.clone()));
        }
    }

    Ok(())
}
