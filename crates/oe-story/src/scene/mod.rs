//! Per-scene scripts, each an `impl` block on [`GameSession`](crate::GameSession).

mod bus;
mod ending;
mod menu;
mod office;
mod skytrain;

pub use ending::PLAY_AGAIN;
pub use menu::{QUIT, START};
pub use office::{LEAVE_OFFICE, TUTORIAL};
