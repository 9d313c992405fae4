use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::error::ExportError;
use crate::export::FinalizedGroup;
use crate::sorting::{SortingResult, GROUP_COUNT};

/// Formats a player name with their chat mention
pub fn format_player_name(display_name: &str, chat_id: &str) -> String {
    if chat_id.is_empty() {
        display_name.to_string()
    } else {
        format!("{} (<@{}>)", display_name, chat_id)
    }
}

/// Formats a draft time, e.g. "Sun Aug 18, 19:00 UTC"
pub fn format_slot_time(date_time: &DateTime<Utc>) -> String {
    date_time.format("%a %b %-d, %H:%M UTC").to_string()
}

/// Builds the announcement posted once groups are bound to leagues
pub fn format_announcement(groups: &[FinalizedGroup]) -> String {
    let mut out = String::new();
    out.push_str("**Draft slots are set!**\n");

    for group in groups {
        out.push_str(&format!(
            "\n**{}** - {}\n",
            group.league_name,
            format_slot_time(&group.slot.date_time)
        ));
        for player in &group.players {
            out.push_str(&format!(
                "- {}\n",
                format_player_name(&player.display_name, &player.chat_id)
            ));
        }
    }

    out
}

pub fn write_announcement_to_file(
    groups: &[FinalizedGroup],
    filename: &Path,
) -> Result<(), ExportError> {
    let io_err = |e| ExportError::Io {
        path: filename.to_path_buf(),
        source: e,
    };

    let mut file = File::create(filename).map_err(io_err)?;
    file.write_all(format_announcement(groups).as_bytes())
        .map_err(io_err)?;
    Ok(())
}

/// Prints a sorting result in a readable format
pub fn print_sorting_result(result: &SortingResult) {
    println!("\n=== Draft Slot Sort ===");
    println!(
        "Completed groups: {}/{}",
        result.completed_groups.len(),
        GROUP_COUNT
    );

    for group in &result.completed_groups {
        println!(
            "\nSlot {} ({}) -> {} players",
            group.slot.id,
            format_slot_time(&group.slot.date_time),
            group.players.len()
        );
        for player in &group.players {
            println!("  - {} (ID: {})", format_player_name(&player.display_name, &player.chat_id), player.id);
        }
    }

    if !result.ungrouped_players.is_empty() {
        println!("\n⚠️  Ungrouped players ({}):", result.ungrouped_players.len());
        for player in &result.ungrouped_players {
            let hint = match &player.best_slot {
                Some(slot) => format!("best slot: {} ({})", slot.id, format_slot_time(&slot.date_time)),
                None => "no usable slot".to_string(),
            };
            println!("  - {} (ID: {}, {})", player.display_name, player.id, hint);
        }
    }

    if !result.slot_availability_analysis.is_empty() {
        println!("\nAvailability of ungrouped players:");
        for analysis in &result.slot_availability_analysis {
            println!(
                "  Slot {} ({}) -> {} available, {} unavailable",
                analysis.slot.id,
                format_slot_time(&analysis.slot.date_time),
                analysis.available_player_count,
                analysis.unavailable_players.len()
            );
            for player in &analysis.unavailable_players {
                println!("      x {} (ID: {})", player.display_name, player.id);
            }
        }
    }
}
