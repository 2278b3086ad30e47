use crate::models::Collection;

/// Failure reported by a key/value storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage quota exceeded writing '{key}' ({needed} bytes needed, {limit} allowed)")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },

    #[error("storage unavailable: {message}")]
    Unavailable { message: String },

    #[error("storage backend error: {source}")]
    Backend {
        #[from]
        source: rusqlite::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The in-memory change was applied but the write to storage was lost.
    #[error("unable to save {collection}: {source}")]
    Persist {
        collection: Collection,
        #[source]
        source: StorageError,
    },

    #[error("unable to clear storage: {source}")]
    Clear {
        #[source]
        source: StorageError,
    },

    #[error("import document could not be parsed: {source}")]
    ImportParse {
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for '{field}': {message}")]
    Invalid { field: String, message: String },
}

impl StoreError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        StoreError::Invalid {
            field: field.to_string(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::Persist { .. } => "STORE_PERSIST_FAILED",
            StoreError::Clear { .. } => "STORE_CLEAR_FAILED",
            StoreError::ImportParse { .. } => "STORE_IMPORT_PARSE",
            StoreError::Serialize { .. } => "STORE_SERIALIZE_FAILED",
            StoreError::Invalid { .. } => "STORE_INVALID_VALUE",
        }
    }

    /// True when the failure came from what the user supplied rather than from storage.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            StoreError::ImportParse { .. } | StoreError::Invalid { .. }
        )
    }

    /// True when the working state changed but storage did not.
    #[must_use]
    pub fn is_lost_write(&self) -> bool {
        matches!(self, StoreError::Persist { .. })
    }
}
