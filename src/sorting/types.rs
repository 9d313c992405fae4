use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Players per completed group
pub const GROUP_SIZE: usize = 12;

/// Groups the engine always tries to fill
pub const GROUP_COUNT: usize = 4;

pub type SlotId = String;

/// A scheduled draft time that can host one group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftSlot {
    pub id: SlotId,
    pub date_time: DateTime<Utc>,
    pub season_year: i32,
}

impl DraftSlot {
    pub fn to_ref(&self) -> SlotRef {
        SlotRef {
            id: self.id.clone(),
            date_time: self.date_time,
        }
    }
}

/// Slot identity as reported back in a best-slot hint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRef {
    pub id: SlotId,
    pub date_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedPreference {
    pub slot_id: SlotId,
    pub rank: i32,
}

/// A selected player after classification
#[derive(Debug, Clone)]
pub struct Player {
    pub id: String,
    pub display_name: String,
    pub chat_id: String,
    pub has_preferences: bool,
    pub available_slots: HashSet<SlotId>,
    /// Sorted by rank ascending, rank 1 first
    pub preferences: Vec<RankedPreference>,
}

impl Player {
    pub fn can_attend(&self, slot_id: &str) -> bool {
        self.available_slots.contains(slot_id)
    }

    pub fn summary(&self) -> PlayerSummary {
        PlayerSummary {
            id: self.id.clone(),
            display_name: self.display_name.clone(),
            chat_id: self.chat_id.clone(),
        }
    }
}

/// Output of the preference classifier
#[derive(Debug, Clone, Default)]
pub struct ClassifiedPlayers {
    pub ranked: Vec<Player>,
    pub unranked: Vec<Player>,
}

impl ClassifiedPlayers {
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.ranked.iter().chain(self.unranked.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: String,
    pub display_name: String,
    pub chat_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerName {
    pub id: String,
    pub display_name: String,
}

/// A slot that received exactly `GROUP_SIZE` players
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedGroup {
    pub slot: DraftSlot,
    pub players: Vec<PlayerSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UngroupedPlayer {
    pub id: String,
    pub display_name: String,
    pub chat_id: String,
    pub best_slot: Option<SlotRef>,
}

/// Ungrouped players who cannot attend a slot, and how many can
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotAvailability {
    pub slot: DraftSlot,
    pub unavailable_players: Vec<PlayerName>,
    pub available_player_count: usize,
}

/// Result of the whole search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SortingResult {
    pub completed_groups: Vec<CompletedGroup>,
    pub ungrouped_players: Vec<UngroupedPlayer>,
    pub slot_availability_analysis: Vec<SlotAvailability>,
}

impl SortingResult {
    pub fn is_perfect(&self) -> bool {
        self.completed_groups.len() == GROUP_COUNT
    }
}

/// Result of packing a single combination
pub type AssignmentResult = SortingResult;
