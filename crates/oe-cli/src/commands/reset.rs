use std::path::Path;

use colored::Colorize;

pub fn run(save: &Path) -> Result<(), String> {
    let mut store = super::open_store(save);
    store.reset_state();
    println!("  {} {}", "Reset".bold(), save.display());
    Ok(())
}
