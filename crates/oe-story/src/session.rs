//! Story session management.
//!
//! `GameSession` owns the progress ledger and drives scenes one after another.
//! It shares the dialog sequencer with whatever feeds player input, so the
//! frontend can resolve dialogs while a scene is suspended on one.

use std::future::Future;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{error, info, warn};

use oe_core::{Ending, KeyValueStore, SceneId, StateStore};
use oe_dialog::{DialogRequest, DialogSequencer, DialogSurface};

use crate::config::StoryConfig;
use crate::decision::{Decision, DecisionOption};
use crate::error::{StoryError, StoryResult};
use crate::typing::TypingAttempt;

/// What the host provides: a surface per scene and typed attempts.
pub trait Frontend {
    /// A surface to draw this scene's dialogs on.
    fn surface_for(&mut self, scene: SceneId) -> Box<dyn DialogSurface>;

    /// Ask the player to type `target`. Resolves once they submit or give up.
    fn type_attempt(&mut self, target: &str) -> impl Future<Output = TypingAttempt> + Send;
}

/// Where a finished scene sends the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Continue with this scene.
    Goto(SceneId),
    /// Leave the game.
    Quit,
}

/// A playthrough from the main menu to an ending and beyond.
pub struct GameSession<S: KeyValueStore, F: Frontend> {
    pub(crate) store: StateStore<S>,
    pub(crate) dialogs: Arc<DialogSequencer>,
    pub(crate) frontend: F,
    pub(crate) config: StoryConfig,
    pub(crate) rng: StdRng,
    last_ending: Option<Ending>,
}

impl<S: KeyValueStore, F: Frontend> GameSession<S, F> {
    /// Create a session over an opened ledger.
    pub fn new(
        store: StateStore<S>,
        dialogs: Arc<DialogSequencer>,
        frontend: F,
        config: StoryConfig,
    ) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            store,
            dialogs,
            frontend,
            config,
            rng,
            last_ending: None,
        }
    }

    /// Get the progress ledger.
    pub fn store(&self) -> &StateStore<S> {
        &self.store
    }

    /// Consume the session, returning the ledger.
    pub fn into_store(self) -> StateStore<S> {
        self.store
    }

    /// Get the shared dialog sequencer.
    pub fn dialogs(&self) -> &Arc<DialogSequencer> {
        &self.dialogs
    }

    /// Get the frontend.
    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    /// The ending most recently reached in this session.
    pub fn last_ending(&self) -> Option<Ending> {
        self.last_ending
    }

    /// Play from the main menu until the player quits.
    ///
    /// A dialog cancelled from outside ends the session normally, and so does
    /// a surface that cannot draw dialogs. Returns the last ending reached,
    /// if any.
    pub async fn run(&mut self) -> StoryResult<Option<Ending>> {
        let mut scene = SceneId::MainMenu;
        loop {
            match self.play_scene(scene).await {
                Ok(Transition::Goto(next)) => scene = next,
                Ok(Transition::Quit) => break,
                Err(StoryError::Cancelled) => {
                    info!(%scene, "session cancelled");
                    break;
                }
                Err(StoryError::Dialog(e)) => {
                    error!(%scene, error = %e, "dialog could not be shown; ending session");
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(self.last_ending)
    }

    /// Play one scene: bind its surface, run its script, then clean up.
    pub async fn play_scene(&mut self, scene: SceneId) -> StoryResult<Transition> {
        info!(%scene, "entering scene");
        self.store.enter_scene(scene);
        self.dialogs.init(self.frontend.surface_for(scene));

        let result = match scene {
            SceneId::MainMenu => self.main_menu().await,
            SceneId::Office => self.office().await,
            SceneId::Skytrain => self.skytrain().await,
            SceneId::Bus => self.bus().await,
            SceneId::Ending => self.ending().await,
        };

        self.dialogs.cleanup();
        result
    }

    pub(crate) fn reached(&mut self, ending: Ending) {
        self.last_ending = Some(ending);
    }

    /// Show a line and wait for the player to dismiss it.
    pub(crate) async fn say(&self, request: DialogRequest) -> StoryResult<()> {
        self.ask(request).await.map(|_| ())
    }

    /// Show a dialog and wait for the answer.
    ///
    /// Unlike [`DialogSequencer::show_dialog`], failures are not turned into
    /// empty answers: the office loop would ask forever. [`run`](Self::run)
    /// ends the session on them instead.
    pub(crate) async fn ask(&self, request: DialogRequest) -> StoryResult<String> {
        self.dialogs
            .present(request)
            .await
            .map_err(StoryError::from_dialog)
    }

    /// Ask a decision. Returns the picked option, or `None` for an answer
    /// that matches no option.
    pub(crate) async fn pick(
        &self,
        decision: &'static Decision,
    ) -> StoryResult<Option<&'static DecisionOption>> {
        let answer = self.ask(decision.request()).await?;
        let option = decision.option(&answer);
        if option.is_none() {
            warn!(decision = decision.id, answer = %answer, "answer matches no option");
        }
        Ok(option)
    }

    /// Record an option in the ledger and play its replies.
    pub(crate) async fn commit(
        &mut self,
        decision: &Decision,
        option: &DecisionOption,
    ) -> StoryResult<()> {
        self.store
            .record_choice(decision.id, option.value, option.deltas);
        for line in option.replies {
            self.say(DialogRequest::protagonist(*line)).await?;
        }
        Ok(())
    }
}
