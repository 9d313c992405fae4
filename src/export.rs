use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, SortError};
use crate::sorting::{DraftSlot, PlayerSummary, SortingResult};

/// Operator's choice of league for one completed group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueAssignment {
    pub slot_id: String,
    pub league_name: String,
}

/// A completed group bound to its league
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalizedGroup {
    pub league_name: String,
    pub slot: DraftSlot,
    pub players: Vec<PlayerSummary>,
}

/// Names groups "Group 1", "Group 2", ... in draft time order
pub fn default_league_names(result: &SortingResult) -> Vec<LeagueAssignment> {
    let mut slots: Vec<&DraftSlot> = result.completed_groups.iter().map(|g| &g.slot).collect();
    slots.sort_by_key(|s| s.date_time);

    slots
        .iter()
        .enumerate()
        .map(|(i, slot)| LeagueAssignment {
            slot_id: slot.id.clone(),
            league_name: format!("Group {}", i + 1),
        })
        .collect()
}

/// Binds every completed group to exactly one league name
pub fn map_groups_to_leagues(
    result: &SortingResult,
    leagues: &[LeagueAssignment],
) -> Result<Vec<FinalizedGroup>, SortError> {
    let group_slots: HashSet<&str> = result
        .completed_groups
        .iter()
        .map(|g| g.slot.id.as_str())
        .collect();

    let mut name_by_slot: HashMap<&str, &str> = HashMap::new();
    let mut used_names: HashSet<String> = HashSet::new();

    for assignment in leagues {
        let slot_id = assignment.slot_id.as_str();
        if !group_slots.contains(slot_id) {
            return Err(SortError::UnknownGroupSlot(assignment.slot_id.clone()));
        }
        if name_by_slot.contains_key(slot_id) {
            return Err(SortError::GroupMappedTwice(assignment.slot_id.clone()));
        }

        let name = assignment.league_name.trim();
        if name.is_empty() {
            return Err(SortError::EmptyLeagueName(assignment.slot_id.clone()));
        }
        if !used_names.insert(name.to_lowercase()) {
            return Err(SortError::DuplicateLeagueName(name.to_string()));
        }

        name_by_slot.insert(slot_id, name);
    }

    result
        .completed_groups
        .iter()
        .map(|group| -> Result<FinalizedGroup, SortError> {
            let name = name_by_slot
                .get(group.slot.id.as_str())
                .ok_or_else(|| SortError::UnmappedGroup(group.slot.id.clone()))?;
            Ok(FinalizedGroup {
                league_name: name.to_string(),
                slot: group.slot.clone(),
                players: group.players.clone(),
            })
        })
        .collect()
}

/// Writes one CSV row per group member
pub fn write_groups_csv<W: Write>(groups: &[FinalizedGroup], writer: W) -> Result<(), csv::Error> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

    wtr.write_record([
        "league_name",
        "slot_id",
        "date_time",
        "player_id",
        "display_name",
        "chat_id",
    ])?;

    for group in groups {
        let date_time = group.slot.date_time.to_rfc3339();
        for player in &group.players {
            wtr.write_record([
                group.league_name.as_str(),
                group.slot.id.as_str(),
                date_time.as_str(),
                player.id.as_str(),
                player.display_name.as_str(),
                player.chat_id.as_str(),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

pub fn export_groups_to_csv(groups: &[FinalizedGroup], csv_path: &Path) -> Result<(), ExportError> {
    let file = std::fs::File::create(csv_path).map_err(|e| ExportError::Io {
        path: csv_path.to_path_buf(),
        source: e,
    })?;

    write_groups_csv(groups, file).map_err(|e| ExportError::Csv {
        path: csv_path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorting::CompletedGroup;
    use chrono::{TimeZone, Utc};

    fn result_with_groups(ids: &[(&str, u32)]) -> SortingResult {
        SortingResult {
            completed_groups: ids
                .iter()
                .map(|(id, day)| CompletedGroup {
                    slot: DraftSlot {
                        id: id.to_string(),
                        date_time: Utc.with_ymd_and_hms(2024, 8, *day, 19, 0, 0).unwrap(),
                        season_year: 2024,
                    },
                    players: (0..12)
                        .map(|i| PlayerSummary {
                            id: format!("{}-{}", id, i),
                            display_name: format!("Name {}", i),
                            chat_id: format!("{}", i),
                        })
                        .collect(),
                })
                .collect(),
            ..Default::default()
        }
    }

    fn assign(slot_id: &str, league_name: &str) -> LeagueAssignment {
        LeagueAssignment {
            slot_id: slot_id.to_string(),
            league_name: league_name.to_string(),
        }
    }

    #[test]
    fn default_names_follow_draft_time() {
        let result = result_with_groups(&[("late", 25), ("early", 18)]);
        let names = default_league_names(&result);
        assert_eq!(names, vec![assign("early", "Group 1"), assign("late", "Group 2")]);
    }

    #[test]
    fn mapping_binds_every_group() {
        let result = result_with_groups(&[("a", 18), ("b", 19)]);
        let groups =
            map_groups_to_leagues(&result, &[assign("b", "Beta"), assign("a", " Alpha ")]).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].league_name, "Alpha");
        assert_eq!(groups[0].slot.id, "a");
        assert_eq!(groups[1].league_name, "Beta");
    }

    #[test]
    fn mapping_rejects_bad_input() {
        let result = result_with_groups(&[("a", 18), ("b", 19)]);

        assert_eq!(
            map_groups_to_leagues(&result, &[assign("zz", "X")]).unwrap_err(),
            SortError::UnknownGroupSlot("zz".to_string())
        );
        assert_eq!(
            map_groups_to_leagues(&result, &[assign("a", "X"), assign("a", "Y")]).unwrap_err(),
            SortError::GroupMappedTwice("a".to_string())
        );
        assert_eq!(
            map_groups_to_leagues(&result, &[assign("a", "  ")]).unwrap_err(),
            SortError::EmptyLeagueName("a".to_string())
        );
        assert_eq!(
            map_groups_to_leagues(&result, &[assign("a", "Same"), assign("b", "same")]).unwrap_err(),
            SortError::DuplicateLeagueName("same".to_string())
        );
        assert_eq!(
            map_groups_to_leagues(&result, &[assign("a", "Only")]).unwrap_err(),
            SortError::UnmappedGroup("b".to_string())
        );
    }

    #[test]
    fn csv_has_a_row_per_member() {
        let result = result_with_groups(&[("a", 18)]);
        let groups = map_groups_to_leagues(&result, &default_league_names(&result)).unwrap();

        let mut out = Vec::new();
        write_groups_csv(&groups, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 13);
        assert_eq!(lines[0], "league_name,slot_id,date_time,player_id,display_name,chat_id");
        assert_eq!(lines[1], "Group 1,a,2024-08-18T19:00:00+00:00,a-0,Name 0,0");
    }
}
