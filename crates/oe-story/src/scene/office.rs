use oe_core::{EnergyLevel, KeyValueStore, SceneId};
use oe_dialog::DialogRequest;
use tracing::{debug, warn};

use crate::decision::START_REPORT;
use crate::error::StoryResult;
use crate::hotspot::Hotspot;
use crate::session::{Frontend, GameSession, Transition};
use crate::typing::{TypingAttempt, TypingChallenge};

/// The first line of every office visit.
pub const TUTORIAL: &str =
    "Click on objects to interact with them. Complete your work before leaving.";
/// Menu option that appears once the required hotspots are done.
pub const LEAVE_OFFICE: &str = "Leave the office";

const MISMATCH: &str = "That's not quite it. Type the text exactly as shown.";
const REPORT_FAILED: &str = "I couldn't finish the report. I'll try again.";

impl<S: KeyValueStore, F: Frontend> GameSession<S, F> {
    pub(crate) async fn office(&mut self) -> StoryResult<Transition> {
        self.store.reset_for_office();
        self.store.set_energy_level(EnergyLevel::Low);
        self.say(DialogRequest::narration(TUTORIAL)).await?;

        loop {
            let mut options: Vec<&str> = Hotspot::ALL.iter().map(|h| h.label()).collect();
            if self.ready_to_leave() {
                options.push(LEAVE_OFFICE);
            }
            let answer = self
                .ask(DialogRequest::choice("What should I do?", options))
                .await?;

            if answer == LEAVE_OFFICE {
                self.store.set_energy_level(EnergyLevel::Medium);
                return Ok(Transition::Goto(SceneId::Skytrain));
            }
            match Hotspot::from_label(&answer) {
                Some(hotspot) => self.visit(hotspot).await?,
                None => warn!(answer = %answer, "no hotspot with this label"),
            }
        }
    }

    fn ready_to_leave(&self) -> bool {
        Hotspot::REQUIRED
            .iter()
            .all(|h| self.store.has_interacted_with(h.id()))
    }

    async fn visit(&mut self, hotspot: Hotspot) -> StoryResult<()> {
        debug!(hotspot = hotspot.id(), "hotspot clicked");
        if self.store.has_interacted_with(hotspot.id()) {
            return self
                .say(DialogRequest::protagonist(hotspot.reminder()))
                .await;
        }

        let decision = hotspot.decision();
        let Some(option) = self.pick(decision).await? else {
            return Ok(());
        };

        if option.label == START_REPORT {
            if !self.typing_challenge().await? {
                return self.say(DialogRequest::protagonist(REPORT_FAILED)).await;
            }
            self.store.mark_typing_game_completed();
        }

        self.store.mark_interaction(hotspot.id());
        self.commit(decision, option).await
    }

    /// Run the typing challenge until the player types the sentence or gives
    /// up. Returns whether they succeeded.
    async fn typing_challenge(&mut self) -> StoryResult<bool> {
        let challenge = TypingChallenge::pick(&self.config.typing_prompts, &mut self.rng);
        loop {
            match self.frontend.type_attempt(challenge.target()).await {
                TypingAttempt::Typed(text) if challenge.check(&text) => return Ok(true),
                TypingAttempt::Typed(_) => {
                    self.say(DialogRequest::narration(MISMATCH)).await?;
                }
                TypingAttempt::Cancelled => {
                    debug!("typing challenge abandoned");
                    return Ok(false);
                }
            }
        }
    }
}
