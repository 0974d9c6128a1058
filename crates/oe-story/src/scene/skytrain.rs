use oe_core::{EnergyLevel, KeyValueStore, SceneId};
use oe_dialog::DialogRequest;

use crate::decision::COMMUTE_THOUGHT;
use crate::error::StoryResult;
use crate::session::{Frontend, GameSession, Transition};

impl<S: KeyValueStore, F: Frontend> GameSession<S, F> {
    pub(crate) async fn skytrain(&mut self) -> StoryResult<Transition> {
        self.store.set_energy_level(EnergyLevel::Medium);
        self.say(DialogRequest::narration("Walking to the Skytrain"))
            .await?;

        if let Some(option) = self.pick(&COMMUTE_THOUGHT).await? {
            self.store
                .increment_flag(&format!("thought_{}", option.value));
            self.commit(&COMMUTE_THOUGHT, option).await?;
        }

        self.say(DialogRequest::narration(self.recap())).await?;
        self.store.set_energy_level(EnergyLevel::High);
        Ok(Transition::Goto(SceneId::Bus))
    }

    fn recap(&self) -> String {
        let lines: Vec<String> = self
            .store
            .all_choices()
            .into_iter()
            .map(|(id, value)| format!("{id}: {value}"))
            .collect();
        if lines.is_empty() {
            "Your choices so far: none".to_string()
        } else {
            format!("Your choices so far:\n{}", lines.join("\n"))
        }
    }
}
