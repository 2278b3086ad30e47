//! Data model and persistent state store for the FitLife tracker.
//!
//! The [`store::AppStore`] owns the working copy of workouts, meals, notes, and
//! settings, and writes each mutated collection through to a [`storage::Storage`]
//! backend under its own key.

pub mod db;
pub mod error;
pub mod ids;
pub mod models;
pub mod storage;
pub mod store;
pub mod views;

pub use db::SqliteStorage;
pub use error::{StorageError, StoreError};
pub use ids::{Clock, ManualClock, SystemClock};
pub use storage::{MemoryStorage, Storage};
pub use store::{AppState, AppStore, DefaultReason, LoadReport, ReloadRequired};
