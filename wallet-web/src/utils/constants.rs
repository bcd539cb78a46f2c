//! Application constants

/// Label recorded for the demo transaction when the page passes none.
pub const DEFAULT_TRANSACTION_LABEL: &str = "demo";
