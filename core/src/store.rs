use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

use crate::error::StoreError;
use crate::ids::{Clock, IdGenerator, SystemClock};
use crate::models::{
    Collection, ExportDocument, ImportDocument, Meal, MealEdit, NewMeal, NewNote, NewWorkout, Note,
    NoteEdit, ProfileUpdate, SettingUpdate, Settings, Workout, WorkoutCategory, seed_meals,
    seed_notes, seed_workouts,
};
use crate::storage::Storage;
use crate::views::{self, CalorieSummary, DashboardStats};

/// The session's in-memory copy of all four entities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppState {
    pub workouts: Vec<Workout>,
    pub meals: Vec<Meal>,
    pub notes: Vec<Note>,
    pub settings: Settings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultReason {
    /// Nothing stored under the key.
    Missing,
    /// A value was stored but is not a valid encoding of the entity.
    Corrupt(String),
    /// The backend could not be read.
    Unreadable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultSubstitution {
    pub collection: Collection,
    pub reason: DefaultReason,
}

/// Which collections were replaced by their seed value during a load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub substitutions: Vec<DefaultSubstitution>,
}

impl LoadReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.substitutions.is_empty()
    }

    #[must_use]
    pub fn defaulted(&self, collection: Collection) -> bool {
        self.substitutions.iter().any(|s| s.collection == collection)
    }

    #[must_use]
    pub fn reason(&self, collection: Collection) -> Option<&DefaultReason> {
        self.substitutions
            .iter()
            .find(|s| s.collection == collection)
            .map(|s| &s.reason)
    }
}

/// Returned by operations after which the working state must be rebuilt from storage.
#[must_use = "the store must be reloaded from storage after an import or reset"]
#[derive(Debug)]
pub struct ReloadRequired(());

impl ReloadRequired {
    pub fn reload<S: Storage, C: Clock>(self, store: &mut AppStore<S, C>) -> LoadReport {
        store.reload()
    }
}

/// Owns the working state and keeps storage consistent with it.
///
/// Every mutation is applied in memory first and then written through to the
/// affected collection's key. A failed write is reported as
/// `StoreError::Persist`; the in-memory change is kept and not retried.
pub struct AppStore<S: Storage, C: Clock = SystemClock> {
    storage: S,
    clock: C,
    ids: IdGenerator,
    state: AppState,
}

impl<S: Storage> AppStore<S, SystemClock> {
    pub fn initialize(storage: S) -> (Self, LoadReport) {
        Self::initialize_with_clock(storage, SystemClock)
    }
}

impl<S: Storage, C: Clock> AppStore<S, C> {
    /// Load all four entities from storage, substituting seed values for any
    /// key that is absent or unparsable. Never fails.
    pub fn initialize_with_clock(storage: S, clock: C) -> (Self, LoadReport) {
        let (state, report) = load_state(&storage, &clock);
        let store = Self {
            storage,
            clock,
            ids: IdGenerator::new(),
            state,
        };
        (store, report)
    }

    /// Discard the working state and load it again from storage.
    pub fn reload(&mut self) -> LoadReport {
        let (state, report) = load_state(&self.storage, &self.clock);
        self.state = state;
        report
    }

    // --- Read access ---

    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub fn workouts(&self) -> &[Workout] {
        &self.state.workouts
    }

    #[must_use]
    pub fn meals(&self) -> &[Meal] {
        &self.state.meals
    }

    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.state.notes
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    #[must_use]
    pub fn workouts_in(&self, category: Option<WorkoutCategory>) -> Vec<&Workout> {
        views::filter_workouts(&self.state.workouts, category)
    }

    #[must_use]
    pub fn dashboard_stats(&self) -> DashboardStats {
        views::dashboard_stats(&self.state.workouts, &self.state.meals)
    }

    #[must_use]
    pub fn calorie_summary(&self) -> CalorieSummary {
        CalorieSummary::new(
            views::total_calories(&self.state.meals),
            self.state.settings.calorie_goal,
        )
    }

    // --- Workouts ---

    pub fn add_workout(&mut self, new: NewWorkout) -> Result<Workout, StoreError> {
        let workouts = &self.state.workouts;
        let id = self
            .ids
            .next_id(self.clock.now(), |id| workouts.iter().any(|w| w.id == id));
        let workout = Workout {
            id,
            name: new.name,
            sets: new.sets,
            reps: new.reps,
            category: new.category,
            completed: false,
            icon: new.category.icon().to_string(),
        };
        self.state.workouts.push(workout.clone());
        self.persist(Collection::Workouts)?;
        Ok(workout)
    }

    /// Flip a workout's completion flag. Returns the new value, or `None` if no such workout.
    pub fn toggle_workout_complete(&mut self, id: i64) -> Result<Option<bool>, StoreError> {
        let Some(workout) = self.state.workouts.iter_mut().find(|w| w.id == id) else {
            return Ok(None);
        };
        workout.completed = !workout.completed;
        let completed = workout.completed;
        self.persist(Collection::Workouts)?;
        Ok(Some(completed))
    }

    pub fn delete_workout(&mut self, id: i64) -> Result<bool, StoreError> {
        let before = self.state.workouts.len();
        self.state.workouts.retain(|w| w.id != id);
        if self.state.workouts.len() == before {
            return Ok(false);
        }
        self.persist(Collection::Workouts)?;
        Ok(true)
    }

    // --- Meals ---

    pub fn add_meal(&mut self, new: NewMeal) -> Result<Meal, StoreError> {
        let now = self.clock.now();
        let meals = &self.state.meals;
        let id = self
            .ids
            .next_id(now, |id| meals.iter().any(|m| m.id == id));
        let meal = Meal {
            id,
            food: new.food,
            portion: new.portion,
            calories: new.calories,
            timestamp: now,
        };
        self.state.meals.push(meal.clone());
        self.persist(Collection::Meals)?;
        Ok(meal)
    }

    /// Edit a meal in place, keeping its id and timestamp.
    pub fn edit_meal(&mut self, id: i64, edit: MealEdit) -> Result<Option<Meal>, StoreError> {
        let Some(meal) = self.state.meals.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        edit.apply(meal);
        let meal = meal.clone();
        self.persist(Collection::Meals)?;
        Ok(Some(meal))
    }

    pub fn delete_meal(&mut self, id: i64) -> Result<bool, StoreError> {
        let before = self.state.meals.len();
        self.state.meals.retain(|m| m.id != id);
        if self.state.meals.len() == before {
            return Ok(false);
        }
        self.persist(Collection::Meals)?;
        Ok(true)
    }

    // --- Notes ---

    pub fn add_note(&mut self, new: NewNote) -> Result<Note, StoreError> {
        let now = self.clock.now();
        let notes = &self.state.notes;
        let id = self
            .ids
            .next_id(now, |id| notes.iter().any(|n| n.id == id));
        let note = Note {
            id,
            title: new.title,
            content: new.content,
            category: new.category,
            timestamp: now,
        };
        self.state.notes.push(note.clone());
        self.persist(Collection::Notes)?;
        Ok(note)
    }

    /// Edit a note in place, keeping its id and timestamp.
    pub fn edit_note(&mut self, id: i64, edit: NoteEdit) -> Result<Option<Note>, StoreError> {
        let Some(note) = self.state.notes.iter_mut().find(|n| n.id == id) else {
            return Ok(None);
        };
        edit.apply(note);
        let note = note.clone();
        self.persist(Collection::Notes)?;
        Ok(Some(note))
    }

    pub fn delete_note(&mut self, id: i64) -> Result<bool, StoreError> {
        let before = self.state.notes.len();
        self.state.notes.retain(|n| n.id != id);
        if self.state.notes.len() == before {
            return Ok(false);
        }
        self.persist(Collection::Notes)?;
        Ok(true)
    }

    // --- Settings ---

    pub fn update_setting(&mut self, update: SettingUpdate) -> Result<(), StoreError> {
        debug!(event = "core.store.setting_updated", key = update.key());
        update.apply(&mut self.state.settings);
        self.persist(Collection::Settings)
    }

    pub fn update_profile_setting(&mut self, update: ProfileUpdate) -> Result<(), StoreError> {
        debug!(event = "core.store.profile_updated", key = update.key());
        update.apply(&mut self.state.settings.profile);
        self.persist(Collection::Settings)
    }

    // --- Export / Import / Reset ---

    #[must_use]
    pub fn export_document(&self) -> ExportDocument {
        ExportDocument {
            workouts: self.state.workouts.clone(),
            meals: self.state.meals.clone(),
            notes: self.state.notes.clone(),
            settings: self.state.settings.clone(),
            export_date: self.clock.now(),
        }
    }

    /// Pretty-printed export document.
    pub fn export_json(&self) -> Result<String, StoreError> {
        serde_json::to_string_pretty(&self.export_document()).map_err(|source| {
            StoreError::Serialize {
                what: "export document",
                source,
            }
        })
    }

    /// Replace every collection present in `text`, then write all four back.
    ///
    /// A document that does not parse, or is not a JSON object, leaves the
    /// working state untouched.
    pub fn import_json(&mut self, text: &str) -> Result<ReloadRequired, StoreError> {
        let parse_failed = |source: serde_json::Error| {
            warn!(event = "core.store.import_parse_failed", error = %source);
            StoreError::ImportParse { source }
        };
        // Decoding the struct directly would also accept a positional array
        let object: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(text).map_err(parse_failed)?;
        let doc: ImportDocument =
            serde_json::from_value(serde_json::Value::Object(object)).map_err(parse_failed)?;
        self.import_document(doc)
    }

    pub fn import_document(&mut self, doc: ImportDocument) -> Result<ReloadRequired, StoreError> {
        let replaced = doc.collections();
        if let Some(workouts) = doc.workouts {
            self.state.workouts = workouts;
        }
        if let Some(meals) = doc.meals {
            self.state.meals = meals;
        }
        if let Some(notes) = doc.notes {
            self.state.notes = notes;
        }
        if let Some(settings) = doc.settings {
            self.state.settings = settings;
        }
        self.persist_all()?;
        info!(
            event = "core.store.imported",
            collections = ?replaced.iter().map(|c| c.as_str()).collect::<Vec<_>>()
        );
        Ok(ReloadRequired(()))
    }

    /// Clear every key in storage, including ones this store never wrote.
    pub fn reset_all(&mut self) -> Result<ReloadRequired, StoreError> {
        self.storage.clear().map_err(|source| {
            error!(event = "core.store.clear_failed", error = %source);
            StoreError::Clear { source }
        })?;
        info!(event = "core.store.reset");
        Ok(ReloadRequired(()))
    }

    // --- Persistence ---

    fn persist(&mut self, collection: Collection) -> Result<(), StoreError> {
        let encoded = match collection {
            Collection::Workouts => serde_json::to_string(&self.state.workouts),
            Collection::Meals => serde_json::to_string(&self.state.meals),
            Collection::Notes => serde_json::to_string(&self.state.notes),
            Collection::Settings => serde_json::to_string(&self.state.settings),
        }
        .map_err(|source| StoreError::Serialize {
            what: collection.as_str(),
            source,
        })?;

        match self.storage.set_item(collection.storage_key(), &encoded) {
            Ok(()) => {
                debug!(
                    event = "core.store.saved",
                    collection = collection.as_str(),
                    bytes = encoded.len()
                );
                Ok(())
            }
            Err(source) => {
                error!(
                    event = "core.store.save_failed",
                    collection = collection.as_str(),
                    error = %source,
                    "Change kept in memory but not written to storage"
                );
                Err(StoreError::Persist { collection, source })
            }
        }
    }

    /// Write all four collections, stopping at the first failure.
    fn persist_all(&mut self) -> Result<(), StoreError> {
        for collection in Collection::ALL {
            self.persist(collection)?;
        }
        Ok(())
    }
}

fn load_state<S: Storage, C: Clock>(storage: &S, clock: &C) -> (AppState, LoadReport) {
    let mut report = LoadReport::default();
    let now = clock.now();

    let workouts = load_or(storage, Collection::Workouts, &mut report, seed_workouts);
    let meals = load_or(storage, Collection::Meals, &mut report, || seed_meals(now));
    let notes = load_or(storage, Collection::Notes, &mut report, || seed_notes(now));
    let settings = load_or(storage, Collection::Settings, &mut report, Settings::default);

    (
        AppState {
            workouts,
            meals,
            notes,
            settings,
        },
        report,
    )
}

fn load_or<S: Storage, T: DeserializeOwned>(
    storage: &S,
    collection: Collection,
    report: &mut LoadReport,
    seed: impl FnOnce() -> T,
) -> T {
    match read_collection(storage, collection) {
        Ok(value) => value,
        Err(reason) => {
            report.substitutions.push(DefaultSubstitution {
                collection,
                reason,
            });
            seed()
        }
    }
}

fn read_collection<S: Storage, T: DeserializeOwned>(
    storage: &S,
    collection: Collection,
) -> Result<T, DefaultReason> {
    let key = collection.storage_key();
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) if !raw.is_empty() => raw,
        Ok(_) => {
            debug!(event = "core.store.key_missing", key = key);
            return Err(DefaultReason::Missing);
        }
        Err(e) => {
            warn!(
                event = "core.store.read_failed",
                key = key,
                error = %e,
                "Using default value"
            );
            return Err(DefaultReason::Unreadable(e.to_string()));
        }
    };

    serde_json::from_str(&raw).map_err(|e| {
        warn!(
            event = "core.store.parse_failed",
            key = key,
            error = %e,
            "Stored value is not valid, using default value"
        );
        DefaultReason::Corrupt(e.to_string())
    })
}
