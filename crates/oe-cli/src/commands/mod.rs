pub mod play;
pub mod reset;
pub mod status;

use std::path::Path;

use oe_core::{FileStorage, StateStore};

/// Open the progress ledger stored in `save`, migrating legacy keys.
fn open_store(save: &Path) -> StateStore<FileStorage> {
    StateStore::open(FileStorage::open(save))
}

/// Load the progress ledger stored in `save` without writing to it.
fn inspect_store(save: &Path) -> StateStore<FileStorage> {
    StateStore::inspect(FileStorage::open(save))
}
