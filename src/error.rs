use rusqlite::ErrorCode;

pub type Result<T> = std::result::Result<T, BudgetError>;

/// What kind of record a `NotFound` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Template,
    Ledger,
    Allocation,
    Profile,
}

impl Entity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Template => "Budget template",
            Self::Ledger => "Monthly ledger",
            Self::Allocation => "Allocation",
            Self::Profile => "Profile",
        }
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BudgetError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: Entity, id: String },

    /// The store refused the write lock. Retry the whole operation.
    #[error("Transaction conflict, retry the operation: {0}")]
    TransactionConflict(#[source] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(#[source] rusqlite::Error),

    #[error("CSV export failed: {0}")]
    Export(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BudgetError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(kind: Entity, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::TransactionConflict(_))
    }
}

impl From<rusqlite::Error> for BudgetError {
    fn from(e: rusqlite::Error) -> Self {
        match e.sqlite_error_code() {
            Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) => {
                Self::TransactionConflict(e)
            }
            _ => Self::Storage(e),
        }
    }
}
