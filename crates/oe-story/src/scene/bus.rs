use oe_core::{EnergyLevel, KeyValueStore, SceneId};
use oe_dialog::DialogRequest;

use crate::decision::PHONE_CALL;
use crate::error::StoryResult;
use crate::session::{Frontend, GameSession, Transition};

const DOZING: &str = "Scrolling through the phone, you almost fall asleep. \
    A phone call comes in and wakes you up.";

impl<S: KeyValueStore, F: Frontend> GameSession<S, F> {
    pub(crate) async fn bus(&mut self) -> StoryResult<Transition> {
        self.store.set_energy_level(EnergyLevel::High);
        self.say(DialogRequest::narration(DOZING)).await?;

        if let Some(option) = self.pick(&PHONE_CALL).await? {
            self.commit(&PHONE_CALL, option).await?;
        }
        Ok(Transition::Goto(SceneId::Ending))
    }
}
