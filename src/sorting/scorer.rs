use super::types::AssignmentResult;

/// Weight of one completed group; dwarfs any availability count
pub const GROUP_WEIGHT: usize = 1000;

/// Scores an imperfect packing so combinations can be compared
///
/// Completed groups dominate. Ties go to the combination where some slot still has the
/// most ungrouped players able to attend it.
pub fn score_result(result: &AssignmentResult) -> usize {
    let max_available = result
        .slot_availability_analysis
        .iter()
        .map(|a| a.available_player_count)
        .max()
        .unwrap_or(0);

    result.completed_groups.len() * GROUP_WEIGHT + max_available
}
