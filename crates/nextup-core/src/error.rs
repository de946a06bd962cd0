use thiserror::Error;

/// Failures of recurrence-rule parsing and next-date calculation.
///
/// `EmptyRule` means "the task does not recur" and callers are expected to
/// branch on it rather than report it as a fault.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("Repeat rule is empty")]
    EmptyRule,

    #[error("Malformed repeat rule '{rule}': {reason}")]
    MalformedRule { rule: String, reason: String },

    #[error("Value {value} is out of range for {field} (allowed: {allowed})")]
    OutOfRangeValue {
        field: &'static str,
        value: i64,
        allowed: &'static str,
    },

    #[error("Unknown repeat rule kind '{0}'")]
    UnknownRuleKind(String),

    #[error("No occurrence found for repeat rule")]
    NoOccurrenceFound,
}

impl RuleError {
    pub(crate) fn malformed(rule: &str, reason: impl Into<String>) -> Self {
        RuleError::MalformedRule {
            rule: rule.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid date '{0}': expected YYYYMMDD")]
    InvalidDate(String),
}
