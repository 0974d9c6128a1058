use oe_core::{EnergyLevel, KeyValueStore, SceneId};
use oe_dialog::DialogRequest;

use crate::error::StoryResult;
use crate::session::{Frontend, GameSession, Transition};

/// Menu option that starts a run.
pub const START: &str = "Start Office Escape";
/// Menu option that leaves the game.
pub const QUIT: &str = "Quit";

impl<S: KeyValueStore, F: Frontend> GameSession<S, F> {
    pub(crate) async fn main_menu(&mut self) -> StoryResult<Transition> {
        let answer = self
            .ask(DialogRequest::narration("Office Escape").with_options([START, QUIT]))
            .await?;
        if answer == START {
            self.store.set_energy_level(EnergyLevel::Low);
            Ok(Transition::Goto(SceneId::Office))
        } else {
            Ok(Transition::Quit)
        }
    }
}
