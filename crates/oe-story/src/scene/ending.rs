use oe_core::{KeyValueStore, SceneId};
use oe_dialog::DialogRequest;
use tracing::info;

use crate::ending_card::EndingCard;
use crate::error::StoryResult;
use crate::scene::QUIT;
use crate::session::{Frontend, GameSession, Transition};

/// Option that wipes progress and returns to the main menu.
pub const PLAY_AGAIN: &str = "Play Again";

impl<S: KeyValueStore, F: Frontend> GameSession<S, F> {
    pub(crate) async fn ending(&mut self) -> StoryResult<Transition> {
        let ending = self.store.determine_ending();
        info!(%ending, tied = self.store.has_tied_endings(), "ending reached");
        self.reached(ending);

        let card = EndingCard::for_ending(ending);
        self.say(DialogRequest::narration(card.text())).await?;

        let answer = self
            .ask(DialogRequest::narration("Thanks for playing.").with_options([PLAY_AGAIN, QUIT]))
            .await?;
        if answer == PLAY_AGAIN {
            self.store.reset_state();
            Ok(Transition::Goto(SceneId::MainMenu))
        } else {
            Ok(Transition::Quit)
        }
    }
}
