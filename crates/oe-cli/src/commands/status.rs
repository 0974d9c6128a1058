use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use oe_core::{Ending, FileStorage, StateStore};

pub fn run(save: &Path) -> Result<(), String> {
    let store = super::inspect_store(save);
    print!("{}", render(&store));
    Ok(())
}

fn render(store: &StateStore<FileStorage>) -> String {
    let mut out = String::new();

    let scene = store
        .current_scene()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "none".to_string());
    let typing = if store.has_completed_typing_game() {
        "done"
    } else {
        "not done"
    };
    out.push_str(&format!("  Scene:        {scene}\n"));
    out.push_str(&format!("  Energy:       {}\n", store.energy_level()));
    out.push_str(&format!("  Report:       {typing}\n"));

    let visited: Vec<&str> = store
        .progress()
        .interacted_with
        .iter()
        .filter(|(_, done)| **done)
        .map(|(id, _)| id.as_str())
        .collect();
    let visited = if visited.is_empty() {
        "none".to_string()
    } else {
        visited.join(", ")
    };
    out.push_str(&format!("  Interactions: {visited}\n\n"));

    let choices = store.all_choices();
    if choices.is_empty() {
        out.push_str("  No choices made yet.\n\n");
    } else {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Decision", "Choice"]);
        for (id, value) in &choices {
            table.add_row(vec![id, value]);
        }
        out.push_str(&format!("{table}\n\n"));
    }

    let leader = store.determine_ending();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Ending", "Score"]);
    for ending in Ending::ALL {
        let name = if ending == leader {
            format!("{ending} *")
        } else {
            ending.to_string()
        };
        table.add_row(vec![name, store.ending_score(ending).to_string()]);
    }
    out.push_str(&format!("{table}\n\n"));

    let tied = if store.has_tied_endings() {
        " (tied, earliest wins)"
    } else {
        ""
    };
    out.push_str(&format!(
        "  Heading for: {}{tied}\n",
        leader.to_string().bold()
    ));
    out
}
