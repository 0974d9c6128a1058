//! The progress ledger.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::ending::{Ending, EndingScores, ScoreDelta};
use crate::energy::EnergyLevel;
use crate::error::StoreResult;
use crate::progress::GameProgress;
use crate::scene::SceneId;
use crate::storage::KeyValueStore;

/// Storage key of the canonical progress record.
pub const PROGRESS_KEY: &str = "game_progress";
/// Storage key of the energy level.
pub const ENERGY_KEY: &str = "playerEnergyLevel";
/// Older keys that are folded into [`PROGRESS_KEY`] on open.
pub const LEGACY_KEYS: [&str; 3] = ["gameState", "playerChoices", "endingScores"];

/// Single source of truth for the player's progress.
///
/// Every mutation rewrites the whole record to storage. Storage failures are
/// logged and otherwise ignored: the in-memory record stays authoritative for
/// the rest of the session.
#[derive(Debug)]
pub struct StateStore<S: KeyValueStore> {
    progress: GameProgress,
    storage: S,
}

impl<S: KeyValueStore> StateStore<S> {
    /// Open the ledger on `storage`, loading any persisted progress.
    ///
    /// Unreadable or corrupt records fall back to the default state. When no
    /// canonical record exists, data under the legacy keys is imported and
    /// written back under [`PROGRESS_KEY`]. Legacy keys are then removed.
    pub fn open(storage: S) -> Self {
        let (mut store, migrated) = Self::load_from(storage);
        if migrated {
            info!("migrated legacy progress keys into {PROGRESS_KEY}");
            store.persist();
        }
        store.drop_legacy_keys();
        store
    }

    /// Load the ledger like [`open`](Self::open) without writing to storage.
    ///
    /// Legacy keys are imported in memory only and left in place. Later
    /// mutations still persist as usual.
    pub fn inspect(storage: S) -> Self {
        Self::load_from(storage).0
    }

    fn load_from(storage: S) -> (Self, bool) {
        let mut store = Self {
            progress: GameProgress::default(),
            storage,
        };
        let migrated = match store.load() {
            Some(progress) => {
                store.progress = progress;
                false
            }
            None => store.import_legacy(),
        };
        (store, migrated)
    }

    /// The current progress record.
    pub fn progress(&self) -> &GameProgress {
        &self.progress
    }

    /// The underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the ledger and return its storage.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Record that the player interacted with a hotspot.
    pub fn mark_interaction(&mut self, id: &str) {
        self.progress.interacted_with.insert(id.to_string(), true);
        self.persist();
    }

    /// Whether the player interacted with a hotspot. Unknown ids are `false`.
    pub fn has_interacted_with(&self, id: &str) -> bool {
        self.progress.has_interacted_with(id)
    }

    /// Store a decision and add its score deltas.
    pub fn record_choice(&mut self, id: &str, value: &str, deltas: &[ScoreDelta]) {
        self.progress
            .choices
            .insert(id.to_string(), value.to_string());
        for delta in deltas {
            self.progress.ending_scores.add(*delta);
        }
        debug!(choice = id, value, "recorded choice");
        self.persist();
    }

    /// Like [`record_choice`](Self::record_choice), with endings given by id.
    ///
    /// Every name is validated before anything changes; an unknown ending
    /// rejects the whole call.
    pub fn record_choice_named(
        &mut self,
        id: &str,
        value: &str,
        deltas: &[(&str, u32)],
    ) -> StoreResult<()> {
        let deltas = deltas
            .iter()
            .map(|(name, amount)| Ok(ScoreDelta::new(name.parse::<Ending>()?, *amount)))
            .collect::<StoreResult<Vec<_>>>()?;
        self.record_choice(id, value, &deltas);
        Ok(())
    }

    /// The choice made for a decision, if any.
    pub fn choice(&self, id: &str) -> Option<&str> {
        self.progress.choices.get(id).map(String::as_str)
    }

    /// A copy of all choices.
    pub fn all_choices(&self) -> BTreeMap<String, String> {
        self.progress.choices.clone()
    }

    /// Set a free-form flag.
    pub fn set_flag(&mut self, key: &str, value: impl Into<Value>) {
        self.progress.flags.insert(key.to_string(), value.into());
        self.persist();
    }

    /// Read a free-form flag.
    pub fn flag(&self, key: &str) -> Option<&Value> {
        self.progress.flags.get(key)
    }

    /// Treat a flag as a counter and add one to it.
    ///
    /// A missing or non-integer flag counts as zero. Returns the new count.
    pub fn increment_flag(&mut self, key: &str) -> i64 {
        let count = self
            .flag(key)
            .and_then(Value::as_i64)
            .unwrap_or(0)
            .saturating_add(1);
        self.set_flag(key, count);
        count
    }

    /// Record that the typing minigame was finished.
    pub fn mark_typing_game_completed(&mut self) {
        self.progress.has_completed_typing_game = true;
        self.persist();
    }

    /// Whether the typing minigame was finished.
    pub fn has_completed_typing_game(&self) -> bool {
        self.progress.has_completed_typing_game
    }

    /// Remember the scene the player just entered.
    pub fn enter_scene(&mut self, scene: SceneId) {
        self.progress.current_scene_id = Some(scene);
        self.persist();
    }

    /// The last scene entered.
    pub fn current_scene(&self) -> Option<SceneId> {
        self.progress.current_scene_id
    }

    /// The ending with the highest score; ties go to the earlier ending.
    pub fn determine_ending(&self) -> Ending {
        self.progress.ending_scores.leader()
    }

    /// Whether the top score is shared by several endings.
    pub fn has_tied_endings(&self) -> bool {
        self.progress.ending_scores.is_tied()
    }

    /// The score of one ending.
    pub fn ending_score(&self, ending: Ending) -> i64 {
        self.progress.ending_scores.get(ending)
    }

    /// A copy of all ending scores.
    pub fn ending_scores(&self) -> EndingScores {
        self.progress.ending_scores
    }

    /// Forget the office visit (interactions and the typing game) so its
    /// one-time dialogs can play again. Choices, scores and flags are kept.
    pub fn reset_for_office(&mut self) {
        self.progress.clear_office_visit();
        self.persist();
    }

    /// Restore the default state and erase the persisted record.
    pub fn reset_state(&mut self) {
        self.progress = GameProgress::default();
        if let Err(e) = self.storage.remove(PROGRESS_KEY) {
            warn!(error = %e, "failed to erase persisted progress");
        }
        self.drop_legacy_keys();
        info!("progress reset");
    }

    /// The stored energy level, `Low` when unset or unreadable.
    pub fn energy_level(&self) -> EnergyLevel {
        match self.storage.get(ENERGY_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_default(),
            Ok(None) => EnergyLevel::default(),
            Err(e) => {
                warn!(error = %e, "failed to read energy level");
                EnergyLevel::default()
            }
        }
    }

    /// Store the energy level.
    pub fn set_energy_level(&mut self, level: EnergyLevel) {
        if let Err(e) = self.storage.set(ENERGY_KEY, level.as_str()) {
            warn!(error = %e, "failed to persist energy level");
        }
    }

    fn persist(&mut self) {
        let encoded = match serde_json::to_string(&self.progress) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(error = %e, "failed to encode progress");
                return;
            }
        };
        if let Err(e) = self.storage.set(PROGRESS_KEY, &encoded) {
            warn!(error = %e, "failed to persist progress; keeping it in memory");
        }
    }

    fn load(&self) -> Option<GameProgress> {
        let raw = match self.storage.get(PROGRESS_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "failed to read persisted progress; starting fresh");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(progress) => Some(progress),
            Err(e) => {
                warn!(error = %e, "persisted progress is corrupt; starting fresh");
                None
            }
        }
    }

    fn read_legacy(&self, key: &str) -> Option<Value> {
        let raw = self.storage.get(key).ok()??;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "ignoring corrupt legacy key");
                None
            }
        }
    }

    /// Fold legacy keys into the current record. Returns whether any were found.
    fn import_legacy(&mut self) -> bool {
        let mut found = false;
        if let Some(state) = self.read_legacy("gameState") {
            found = true;
            if let Some(choices) = state.get("choices") {
                self.import_choices(choices);
            }
            if let Some(scores) = state.get("endingScores") {
                self.import_scores(scores);
            }
        }
        if let Some(choices) = self.read_legacy("playerChoices") {
            found = true;
            self.import_choices(&choices);
        }
        if let Some(scores) = self.read_legacy("endingScores") {
            found = true;
            self.import_scores(&scores);
        }
        found
    }

    fn import_choices(&mut self, choices: &Value) {
        let Some(map) = choices.as_object() else {
            return;
        };
        for (id, value) in map {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            self.progress.choices.insert(id.clone(), value);
        }
    }

    fn import_scores(&mut self, scores: &Value) {
        let Some(map) = scores.as_object() else {
            return;
        };
        for (name, score) in map {
            let (Ok(ending), Some(score)) = (name.parse::<Ending>(), score.as_i64()) else {
                continue;
            };
            self.progress.ending_scores.set(ending, score);
        }
    }

    fn drop_legacy_keys(&mut self) {
        for key in LEGACY_KEYS {
            if let Err(e) = self.storage.remove(key) {
                warn!(key, error = %e, "failed to remove legacy key");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::storage::MemoryStorage;
    use proptest::prelude::*;

    fn store() -> StateStore<MemoryStorage> {
        StateStore::open(MemoryStorage::new())
    }

    fn persisted(store: &StateStore<MemoryStorage>) -> GameProgress {
        let raw = store.storage().get(PROGRESS_KEY).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    /// Storage whose writes always fail.
    struct BrokenStorage;

    impl KeyValueStore for BrokenStorage {
        fn get(&self, _key: &str) -> StoreResult<Option<String>> {
            Err(StoreError::Io(std::io::Error::other("unavailable")))
        }

        fn set(&mut self, key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::QuotaExceeded {
                key: key.to_string(),
                limit: 0,
            })
        }

        fn remove(&mut self, _key: &str) -> StoreResult<()> {
            Err(StoreError::Io(std::io::Error::other("unavailable")))
        }
    }

    #[test]
    fn interactions_are_idempotent_and_persisted() {
        let mut store = store();
        assert!(!store.has_interacted_with("coffee"));

        store.mark_interaction("coffee");
        store.mark_interaction("coffee");

        assert!(store.has_interacted_with("coffee"));
        assert_eq!(persisted(&store).interacted_with.len(), 1);
    }

    #[test]
    fn record_choice_updates_scores() {
        let mut store = store();
        store.record_choice(
            "phone_call",
            "answer",
            &[
                ScoreDelta::new(Ending::Workaholic, 2),
                ScoreDelta::new(Ending::Burnout, 1),
            ],
        );

        assert_eq!(store.choice("phone_call"), Some("answer"));
        assert_eq!(store.ending_score(Ending::Workaholic), 2);
        assert_eq!(store.ending_score(Ending::Burnout), 1);
        assert_eq!(persisted(&store).ending_scores, store.ending_scores());
    }

    #[test]
    fn unknown_ending_name_is_rejected_without_changes() {
        let mut store = store();
        let err = store
            .record_choice_named("x", "y", &[("balanced", 1), ("zen", 2)])
            .unwrap_err();

        assert!(matches!(err, StoreError::UnknownEnding(name) if name == "zen"));
        assert_eq!(store.choice("x"), None);
        assert_eq!(store.ending_score(Ending::Balanced), 0);
    }

    #[test]
    fn named_deltas_apply() {
        let mut store = store();
        store
            .record_choice_named("plant", "water", &[("balanced", 1)])
            .unwrap();
        assert_eq!(store.ending_score(Ending::Balanced), 1);
    }

    #[test]
    fn all_choices_is_a_copy() {
        let mut store = store();
        store.record_choice("coffee", "drink", &[]);

        let mut copy = store.all_choices();
        copy.insert("coffee".into(), "spilled".into());
        copy.insert("extra".into(), "value".into());

        assert_eq!(store.choice("coffee"), Some("drink"));
        assert_eq!(store.choice("extra"), None);
    }

    #[test]
    fn tie_break_matches_enumeration_order() {
        let mut store = store();
        assert_eq!(store.determine_ending(), Ending::Balanced);

        store.record_choice("a", "1", &[ScoreDelta::new(Ending::Balanced, 1)]);
        store.record_choice("b", "2", &[ScoreDelta::new(Ending::Workaholic, 3)]);
        store.record_choice("c", "3", &[ScoreDelta::new(Ending::Carefree, 3)]);

        assert_eq!(store.determine_ending(), Ending::Workaholic);
        assert!(store.has_tied_endings());
    }

    #[test]
    fn office_reset_keeps_scores_and_choices() {
        let mut store = store();
        store.record_choice("x", "y", &[ScoreDelta::new(Ending::Balanced, 5)]);
        store.mark_interaction("computer");
        store.mark_typing_game_completed();

        store.reset_for_office();

        assert_eq!(store.determine_ending(), Ending::Balanced);
        assert_eq!(store.ending_score(Ending::Balanced), 5);
        assert_eq!(store.choice("x"), Some("y"));
        assert!(!store.has_interacted_with("computer"));
        assert!(!store.has_completed_typing_game());
        assert!(!persisted(&store).has_completed_typing_game);
    }

    #[test]
    fn full_reset_clears_memory_and_storage() {
        let mut store = store();
        store.record_choice("x", "y", &[ScoreDelta::new(Ending::Burnout, 2)]);
        store.set_flag("thought_work", 3);

        store.reset_state();

        assert!(store.all_choices().is_empty());
        assert!(Ending::ALL.iter().all(|e| store.ending_score(*e) == 0));
        assert_eq!(store.flag("thought_work"), None);
        assert_eq!(store.storage().get(PROGRESS_KEY).unwrap(), None);
    }

    #[test]
    fn progress_survives_reopen() {
        let mut store = store();
        store.record_choice("coffee", "leave", &[ScoreDelta::new(Ending::Balanced, 1)]);
        store.enter_scene(SceneId::Skytrain);

        let reopened = StateStore::open(store.into_storage());
        assert_eq!(reopened.choice("coffee"), Some("leave"));
        assert_eq!(reopened.current_scene(), Some(SceneId::Skytrain));
        assert_eq!(reopened.ending_score(Ending::Balanced), 1);
    }

    #[test]
    fn corrupt_record_falls_back_to_default() {
        let mut storage = MemoryStorage::new();
        storage.set(PROGRESS_KEY, "{not json").unwrap();

        let store = StateStore::open(storage);
        assert_eq!(store.progress(), &GameProgress::default());
    }

    #[test]
    fn storage_failures_keep_memory_state() {
        let mut store = StateStore::open(BrokenStorage);
        store.mark_interaction("plant");
        store.record_choice("plant", "water", &[ScoreDelta::new(Ending::Balanced, 1)]);
        store.set_energy_level(EnergyLevel::High);
        store.reset_for_office();

        assert_eq!(store.choice("plant"), Some("water"));
        assert_eq!(store.ending_score(Ending::Balanced), 1);
        assert_eq!(store.energy_level(), EnergyLevel::Low);
    }

    #[test]
    fn quota_exceeded_is_swallowed() {
        let mut store = StateStore::open(MemoryStorage::new().with_quota(16));
        store.record_choice("a_long_decision_id", "a long value", &[]);
        assert_eq!(store.choice("a_long_decision_id"), Some("a long value"));
        assert_eq!(store.storage().get(PROGRESS_KEY).unwrap(), None);
    }

    #[test]
    fn legacy_keys_are_migrated_and_removed() {
        let mut storage = MemoryStorage::new();
        storage
            .set(
                "gameState",
                r#"{"choices": {"coffee": "drink"}, "endingScores": {"workaholic": 2, "zen": 4}}"#,
            )
            .unwrap();
        storage
            .set("playerChoices", r#"{"phone_call": "block", "computer": "skipped"}"#)
            .unwrap();

        let store = StateStore::open(storage);

        assert_eq!(store.choice("coffee"), Some("drink"));
        assert_eq!(store.choice("phone_call"), Some("block"));
        assert_eq!(store.ending_score(Ending::Workaholic), 2);
        for key in LEGACY_KEYS {
            assert!(!store.storage().contains_key(key));
        }
        assert_eq!(persisted(&store).choices.len(), 3);
    }

    #[test]
    fn inspect_imports_legacy_keys_without_writing() {
        let mut storage = MemoryStorage::new();
        storage
            .set("playerChoices", r#"{"coffee": "drink"}"#)
            .unwrap();
        storage
            .set("endingScores", r#"{"workaholic": 3}"#)
            .unwrap();

        let store = StateStore::inspect(storage);

        assert_eq!(store.choice("coffee"), Some("drink"));
        assert_eq!(store.ending_score(Ending::Workaholic), 3);
        assert!(store.storage().contains_key("playerChoices"));
        assert!(store.storage().contains_key("endingScores"));
        assert_eq!(store.storage().get(PROGRESS_KEY).unwrap(), None);
    }

    #[test]
    fn inspect_reads_canonical_record() {
        let mut store = store();
        store.record_choice("plant", "water", &[ScoreDelta::new(Ending::Balanced, 1)]);

        let inspected = StateStore::inspect(store.into_storage());
        assert_eq!(inspected.choice("plant"), Some("water"));
        assert_eq!(inspected.ending_score(Ending::Balanced), 1);
    }

    #[test]
    fn corrupt_save_file_opens_with_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("save.json");
        std::fs::write(&path, "{truncated").unwrap();

        let mut store = StateStore::open(crate::storage::FileStorage::open(&path));
        assert_eq!(store.progress(), &GameProgress::default());
        assert_eq!(store.energy_level(), EnergyLevel::Low);

        store.mark_interaction("computer");
        let reopened = StateStore::open(crate::storage::FileStorage::open(&path));
        assert!(reopened.has_interacted_with("computer"));
    }

    #[test]
    fn legacy_keys_ignored_when_canonical_record_exists() {
        let mut storage = MemoryStorage::new();
        storage
            .set(PROGRESS_KEY, r#"{"choices": {"coffee": "leave"}}"#)
            .unwrap();
        storage
            .set("playerChoices", r#"{"coffee": "drink"}"#)
            .unwrap();

        let store = StateStore::open(storage);
        assert_eq!(store.choice("coffee"), Some("leave"));
        assert!(!store.storage().contains_key("playerChoices"));
    }

    #[test]
    fn counters_and_flags() {
        let mut store = store();
        assert_eq!(store.increment_flag("thought_work"), 1);
        assert_eq!(store.increment_flag("thought_work"), 2);

        store.set_flag("mood", "tired");
        assert_eq!(store.increment_flag("mood"), 1);
        assert_eq!(store.flag("thought_work"), Some(&Value::from(2)));
    }

    #[test]
    fn energy_level_defaults_to_low() {
        let mut store = store();
        assert_eq!(store.energy_level(), EnergyLevel::Low);

        store.set_energy_level(EnergyLevel::Medium);
        assert_eq!(store.energy_level(), EnergyLevel::Medium);
        assert_eq!(
            store.storage().get(ENERGY_KEY).unwrap().as_deref(),
            Some("medium")
        );
    }

    #[test]
    fn energy_survives_full_reset() {
        let mut store = store();
        store.set_energy_level(EnergyLevel::High);
        store.reset_state();
        assert_eq!(store.energy_level(), EnergyLevel::High);
    }

    fn delta_strategy() -> impl Strategy<Value = ScoreDelta> {
        (0usize..4, 0u32..5).prop_map(|(i, amount)| ScoreDelta::new(Ending::ALL[i], amount))
    }

    proptest! {
        #[test]
        fn scores_never_decrease(batches in prop::collection::vec(
            prop::collection::vec(delta_strategy(), 0..4),
            0..20,
        )) {
            let mut store = store();
            let mut previous = store.ending_scores();
            for (i, deltas) in batches.iter().enumerate() {
                store.record_choice(&format!("choice_{i}"), "v", deltas);
                let current = store.ending_scores();
                for ending in Ending::ALL {
                    prop_assert!(current.get(ending) >= previous.get(ending));
                }
                previous = current;
            }
        }

        #[test]
        fn leader_has_maximal_score(batch in prop::collection::vec(delta_strategy(), 0..12)) {
            let mut store = store();
            store.record_choice("batch", "v", &batch);
            let leader = store.determine_ending();
            let max = Ending::ALL.iter().map(|e| store.ending_score(*e)).max().unwrap();
            prop_assert_eq!(store.ending_score(leader), max);
            for ending in Ending::ALL {
                if ending == leader {
                    break;
                }
                prop_assert!(store.ending_score(ending) < max);
            }
        }
    }
}
