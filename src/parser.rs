use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::LoadError;
use crate::request::{PreferenceRecord, SelectedPlayer, SortRequest};
use crate::sorting::DraftSlot;

#[derive(Debug, Deserialize)]
struct PreferenceRow {
    player_id: String,
    slot_id: String,
    rank: Option<i32>,
}

fn csv_reader<R: Read>(input: R) -> csv::Reader<R> {
    ReaderBuilder::new().trim(Trim::All).from_reader(input)
}

fn open<P: AsRef<Path>>(path: P) -> Result<std::fs::File, LoadError> {
    std::fs::File::open(path.as_ref()).map_err(|e| LoadError::Open {
        path: path.as_ref().to_path_buf(),
        source: e,
    })
}

/// Reads `id,display_name,chat_id` rows
///
/// A player listed twice keeps the last row, in the position of the first.
/// Rows without an id are skipped.
pub fn read_players<R: Read>(input: R, source: &Path) -> Result<Vec<SelectedPlayer>, LoadError> {
    let mut reader = csv_reader(input);
    let mut players: Vec<SelectedPlayer> = Vec::new();
    let mut index_by_id: HashMap<String, usize> = HashMap::new();

    for row in reader.deserialize::<SelectedPlayer>() {
        let player = row.map_err(|e| LoadError::Record {
            path: source.to_path_buf(),
            source: e,
        })?;

        if player.id.is_empty() {
            continue;
        }

        match index_by_id.get(&player.id) {
            Some(&i) => {
                debug!(player = %player.id, "duplicate player row, keeping the later one");
                players[i] = player;
            }
            None => {
                index_by_id.insert(player.id.clone(), players.len());
                players.push(player);
            }
        }
    }

    Ok(players)
}

/// Reads `player_id,slot_id,rank` rows; an empty rank means availability only
pub fn read_preferences<R: Read>(
    input: R,
    source: &Path,
) -> Result<Vec<PreferenceRecord>, LoadError> {
    let mut reader = csv_reader(input);
    let mut records = Vec::new();

    for row in reader.deserialize::<PreferenceRow>() {
        let row = row.map_err(|e| LoadError::Record {
            path: source.to_path_buf(),
            source: e,
        })?;

        if row.player_id.is_empty() || row.slot_id.is_empty() {
            continue;
        }

        records.push(PreferenceRecord {
            player_id: row.player_id,
            slot_id: row.slot_id,
            rank: row.rank.unwrap_or(0),
        });
    }

    Ok(records)
}

/// Reads `id,date_time,season_year` rows with RFC 3339 date-times
pub fn read_slots<R: Read>(input: R, source: &Path) -> Result<Vec<DraftSlot>, LoadError> {
    let mut reader = csv_reader(input);
    let mut slots: Vec<DraftSlot> = Vec::new();

    for row in reader.deserialize::<DraftSlot>() {
        let slot = row.map_err(|e| LoadError::Record {
            path: source.to_path_buf(),
            source: e,
        })?;
        if !slot.id.is_empty() {
            slots.push(slot);
        }
    }

    slots.sort_by_key(|s| s.date_time);
    Ok(slots)
}

pub fn load_players<P: AsRef<Path>>(path: P) -> Result<Vec<SelectedPlayer>, LoadError> {
    read_players(open(&path)?, path.as_ref())
}

pub fn load_preferences<P: AsRef<Path>>(path: P) -> Result<Vec<PreferenceRecord>, LoadError> {
    read_preferences(open(&path)?, path.as_ref())
}

pub fn load_slots<P: AsRef<Path>>(path: P) -> Result<Vec<DraftSlot>, LoadError> {
    read_slots(open(&path)?, path.as_ref())
}

/// Loads the three CSV files into a sort request
pub fn load_request<P: AsRef<Path>>(
    players_path: P,
    preferences_path: P,
    slots_path: P,
) -> Result<SortRequest, LoadError> {
    let selected_players = load_players(&players_path)?;
    let preferences = load_preferences(&preferences_path)?;
    let candidate_slots = load_slots(&slots_path)?;

    info!(
        players = selected_players.len(),
        preferences = preferences.len(),
        slots = candidate_slots.len(),
        "loaded sort request from CSV"
    );

    Ok(SortRequest {
        selected_players,
        preferences,
        candidate_slots,
    })
}
