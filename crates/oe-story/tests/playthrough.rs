//! Scripted playthroughs from the main menu to each ending.

use std::collections::VecDeque;
use std::sync::Arc;

use oe_core::{Ending, EnergyLevel, MemoryStorage, SceneId, StateStore};
use oe_dialog::{DialogInput, DialogSequencer, DialogSurface, MemorySurface};
use oe_story::decision::START_REPORT;
use oe_story::scene::{LEAVE_OFFICE, PLAY_AGAIN, QUIT, START, TUTORIAL};
use oe_story::{Frontend, GameSession, Hotspot, StoryConfig, TypingAttempt};
use serde_json::json;
use tokio::task::JoinHandle;

struct Scripted {
    surface: MemorySurface,
    attempts: VecDeque<TypingAttempt>,
    targets: Vec<String>,
}

impl Frontend for Scripted {
    fn surface_for(&mut self, _scene: SceneId) -> Box<dyn DialogSurface> {
        Box::new(self.surface.clone())
    }

    async fn type_attempt(&mut self, target: &str) -> TypingAttempt {
        self.targets.push(target.to_string());
        self.attempts
            .pop_front()
            .unwrap_or_else(|| TypingAttempt::Typed(target.to_string()))
    }
}

type Session = GameSession<MemoryStorage, Scripted>;

fn session_over(
    storage: MemoryStorage,
    attempts: Vec<TypingAttempt>,
) -> (Session, MemorySurface) {
    let surface = MemorySurface::new();
    let frontend = Scripted {
        surface: surface.clone(),
        attempts: attempts.into(),
        targets: Vec::new(),
    };
    let session = GameSession::new(
        StateStore::open(storage),
        Arc::new(DialogSequencer::new()),
        frontend,
        StoryConfig::default(),
    );
    (session, surface)
}

fn new_session() -> (Session, MemorySurface) {
    session_over(MemoryStorage::new(), Vec::new())
}

/// Clicks through narration and picks the scripted options in order. When
/// the script runs out, or names an option that is not offered, the dialog
/// is cleaned up, which ends the session.
fn spawn_player(dialogs: Arc<DialogSequencer>, picks: Vec<&'static str>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut picks: VecDeque<_> = picks.into();
        let mut awaiting = dialogs.awaiting_input();
        loop {
            if awaiting.wait_for(|showing| *showing).await.is_err() {
                return;
            }
            let options = dialogs.current_options();
            if options.is_empty() {
                dialogs.handle_input(DialogInput::Click);
                continue;
            }
            let index = picks
                .pop_front()
                .and_then(|pick| options.iter().position(|o| o == pick));
            match index {
                Some(index) => {
                    dialogs.handle_input(DialogInput::Select(index));
                }
                None => dialogs.cleanup(),
            }
        }
    })
}

async fn play(session: &mut Session, picks: &[&'static str]) -> Option<Ending> {
    let player = spawn_player(Arc::clone(session.dialogs()), picks.to_vec());
    let ending = session.run().await.unwrap();
    player.abort();
    ending
}

#[tokio::test]
async fn workaholic_run() {
    let (mut session, surface) = new_session();
    let ending = play(
        &mut session,
        &[
            START,
            "Computer",
            START_REPORT,
            "Coffee cup",
            "Drink the rest",
            "Fish tank",
            "Still, it's doing what it's supposed to do",
            LEAVE_OFFICE,
            "Tomorrow's deadlines",
            "Answer the call",
            QUIT,
        ],
    )
    .await;

    assert_eq!(ending, Some(Ending::Workaholic));
    let store = session.store();
    assert_eq!(store.ending_score(Ending::Workaholic), 8);
    assert_eq!(store.ending_score(Ending::Burnout), 1);
    assert_eq!(store.choice("computer"), Some("completed"));
    assert_eq!(store.choice("coffee"), Some("drink"));
    assert_eq!(store.choice("fish_thought"), Some("overachiever"));
    assert_eq!(store.choice("commute_thought"), Some("work"));
    assert_eq!(store.choice("phone_call"), Some("answer"));
    assert_eq!(store.flag("thought_work"), Some(&json!(1)));
    assert!(store.has_completed_typing_game());
    assert_eq!(store.energy_level(), EnergyLevel::High);
    assert_eq!(store.current_scene(), Some(SceneId::Ending));

    let shown = surface.shown();
    assert!(shown.iter().any(|t| t == TUTORIAL));
    assert!(shown.iter().any(|t| t.starts_with("The Workaholic\n\n")));
    assert!(
        shown
            .iter()
            .any(|t| t.starts_with("Your choices so far:\n") && t.contains("coffee: drink"))
    );
}

#[tokio::test]
async fn carefree_run_then_play_again() {
    let (mut session, _surface) = new_session();
    let ending = play(
        &mut session,
        &[
            START,
            "Computer",
            "Skip it for tomorrow",
            "Fish tank",
            "It's a comfortable prison, like this office",
            "Eye mask",
            "Try it on",
            LEAVE_OFFICE,
            "Nothing at all. I just want to sleep.",
            "Block the call",
            PLAY_AGAIN,
            QUIT,
        ],
    )
    .await;

    assert_eq!(ending, Some(Ending::Carefree));
    let store = session.store();
    assert!(store.all_choices().is_empty());
    assert_eq!(store.ending_scores(), oe_core::EndingScores::new());
    assert!(!store.has_interacted_with("computer"));
    assert_eq!(store.current_scene(), Some(SceneId::MainMenu));
}

#[tokio::test]
async fn balanced_run() {
    let (mut session, _surface) = new_session();
    let ending = play(
        &mut session,
        &[
            START,
            "Computer",
            "Skip it for tomorrow",
            "Fish tank",
            "But at least it's safe and cared for",
            "Coffee cup",
            "Leave it",
            "Plant",
            "Water the plant",
            "Eye mask",
            "Pack it away",
            "Water bottle",
            "Brew goji berries",
            LEAVE_OFFICE,
            "Dinner with friends this weekend",
            "Block the call",
            QUIT,
        ],
    )
    .await;

    assert_eq!(ending, Some(Ending::Balanced));
    assert_eq!(session.store().ending_score(Ending::Balanced), 6);
    assert_eq!(session.store().ending_score(Ending::Carefree), 4);
}

#[tokio::test]
async fn burnout_run() {
    let (mut session, _surface) = new_session();
    let ending = play(
        &mut session,
        &[
            START,
            "Computer",
            "Skip it for tomorrow",
            "Fish tank",
            "I wonder if fish dream of being something else",
            "Plant",
            "Ignore it",
            "Water bottle",
            "Drink plain water",
            LEAVE_OFFICE,
            "Nothing at all. I just want to sleep.",
            "Answer the call",
            QUIT,
        ],
    )
    .await;

    assert_eq!(ending, Some(Ending::Burnout));
    let store = session.store();
    assert_eq!(store.ending_score(Ending::Burnout), 4);
    assert_eq!(store.ending_score(Ending::Carefree), 3);
    assert_eq!(store.ending_score(Ending::Workaholic), 2);
    assert_eq!(store.flag("thought_rest"), Some(&json!(1)));
}

#[tokio::test]
async fn quitting_from_the_menu() {
    let (mut session, surface) = new_session();
    assert_eq!(play(&mut session, &[QUIT]).await, None);
    assert_eq!(surface.shown(), vec!["Office Escape"]);
    assert_eq!(session.store().current_scene(), Some(SceneId::MainMenu));
}

#[tokio::test]
async fn unusable_surface_ends_the_session() {
    let frontend = Scripted {
        surface: MemorySurface::broken(),
        attempts: VecDeque::new(),
        targets: Vec::new(),
    };
    let mut session = GameSession::new(
        StateStore::open(MemoryStorage::new()),
        Arc::new(DialogSequencer::new()),
        frontend,
        StoryConfig::default(),
    );

    assert_eq!(session.run().await.unwrap(), None);
    assert_eq!(session.store().current_scene(), Some(SceneId::MainMenu));
    assert!(session.frontend().surface.shown().is_empty());
    assert!(!session.dialogs().is_showing());
}

#[tokio::test]
async fn leaving_requires_computer_and_fish_tank() {
    let (mut session, _surface) = new_session();
    // The leave option is not offered yet, so the player gives up.
    let ending = play(
        &mut session,
        &[START, "Computer", "Skip it for tomorrow", LEAVE_OFFICE],
    )
    .await;

    assert_eq!(ending, None);
    assert_eq!(session.store().current_scene(), Some(SceneId::Office));
    assert!(session.store().has_interacted_with("computer"));
    assert!(!session.store().has_interacted_with("fishtank"));
}

#[tokio::test]
async fn hotspots_answer_once_per_visit() {
    let (mut session, surface) = new_session();
    play(
        &mut session,
        &[START, "Coffee cup", "Drink the rest", "Coffee cup"],
    )
    .await;

    assert_eq!(session.store().ending_score(Ending::Workaholic), 1);
    let reminders = surface
        .shown()
        .iter()
        .filter(|t| t.as_str() == Hotspot::Coffee.reminder())
        .count();
    assert_eq!(reminders, 1);
}

#[tokio::test]
async fn failed_report_can_be_retried() {
    let (mut session, surface) = session_over(
        MemoryStorage::new(),
        vec![
            TypingAttempt::Typed("not even close".into()),
            TypingAttempt::Cancelled,
        ],
    );
    let ending = play(
        &mut session,
        &[START, "Computer", START_REPORT, "Computer", START_REPORT],
    )
    .await;

    assert_eq!(ending, None);
    let store = session.store();
    assert!(store.has_completed_typing_game());
    assert_eq!(store.choice("computer"), Some("completed"));
    assert_eq!(store.ending_score(Ending::Workaholic), 2);
    assert_eq!(session.frontend().targets.len(), 3);

    let shown = surface.shown();
    assert!(
        shown
            .iter()
            .any(|t| t == "I couldn't finish the report. I'll try again.")
    );
    assert!(
        shown
            .iter()
            .any(|t| t == "Finally done. One less thing to worry about.")
    );
}

#[tokio::test]
async fn returning_to_the_office_keeps_choices() {
    let (mut first, _surface) = new_session();
    play(&mut first, &[START, "Coffee cup", "Drink the rest"]).await;
    let storage = first.into_store().into_storage();

    let (mut second, surface) = session_over(storage, Vec::new());
    assert_eq!(second.store().choice("coffee"), Some("drink"));
    play(&mut second, &[START, "Coffee cup", "Leave it"]).await;

    let store = second.store();
    assert_eq!(store.choice("coffee"), Some("leave"));
    assert_eq!(store.ending_score(Ending::Workaholic), 1);
    assert_eq!(store.ending_score(Ending::Balanced), 1);
    assert!(
        !surface
            .shown()
            .iter()
            .any(|t| t == Hotspot::Coffee.reminder())
    );
}
