mod dashboard;
mod data;
mod helpers;
mod meal;
mod note;
mod settings;
mod workout;

use fitlife_core::{AppStore, SqliteStorage};

pub(crate) type Store = AppStore<SqliteStorage>;

pub(crate) use dashboard::cmd_dashboard;
pub(crate) use data::{cmd_export, cmd_import, cmd_reset};
pub(crate) use meal::{cmd_meal_add, cmd_meal_delete, cmd_meal_edit, cmd_meal_list};
pub(crate) use note::{cmd_note_add, cmd_note_delete, cmd_note_edit, cmd_note_list};
pub(crate) use settings::{cmd_settings_profile, cmd_settings_set, cmd_settings_show};
pub(crate) use workout::{cmd_workout_add, cmd_workout_delete, cmd_workout_list, cmd_workout_toggle};

#[cfg(test)]
pub(crate) fn test_store() -> Store {
    let storage = SqliteStorage::open_in_memory().unwrap();
    AppStore::initialize(storage).0
}
