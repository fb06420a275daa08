//! Destructive and high-risk SQL patterns
//!
//! Best-effort textual detection. The "without WHERE" rules only look at what
//! directly follows `FROM` / `SET`, so a statement with a later WHERE clause
//! still matches.

use crate::rules::Rule;

/// SQL rules in evaluation order
pub const SQL_RULES: &[Rule] = &[
    Rule::new(
        "sql-drop-database",
        r"(?i)DROP\s+DATABASE",
        "DROP DATABASE",
    ),
    Rule::new("sql-drop-table", r"(?i)DROP\s+TABLE", "DROP TABLE"),
    Rule::new(
        "sql-truncate-table",
        r"(?i)TRUNCATE\s+TABLE",
        "TRUNCATE TABLE",
    ),
    Rule::unless_next(
        "sql-delete-without-where",
        r"(?i)DELETE\s+FROM(\s+)",
        "DELETE without WHERE",
        "WHERE",
    ),
    Rule::unless_next(
        "sql-update-without-where",
        r"(?i)UPDATE\s+\w+\s+SET(\s+)",
        "UPDATE without WHERE",
        "WHERE",
    ),
    Rule::new(
        "sql-exec-procedure",
        r"(?i)EXEC\s+sp_",
        "stored procedure execution",
    ),
    Rule::new(
        "sql-execute-procedure",
        r"(?i)EXECUTE\s+sp_",
        "stored procedure execution",
    ),
    Rule::new("sql-xp-cmdshell", r"(?i)xp_cmdshell", "xp_cmdshell"),
    Rule::new(
        "sql-into-outfile",
        r"(?i)INTO\s+OUTFILE",
        "INTO OUTFILE",
    ),
    Rule::new(
        "sql-load-data-infile",
        r"(?i)LOAD\s+DATA\s+INFILE",
        "LOAD DATA INFILE",
    ),
];
