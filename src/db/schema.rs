pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS templates (
    id                  TEXT PRIMARY KEY,
    net_monthly_income  TEXT NOT NULL,
    need_pct            TEXT NOT NULL,
    want_pct            TEXT NOT NULL,
    save_pct            TEXT NOT NULL,
    created_at          TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS template_allocations (
    template_id    TEXT NOT NULL REFERENCES templates(id),
    allocation_id  TEXT NOT NULL,
    position       INTEGER NOT NULL,
    category       TEXT NOT NULL,
    description    TEXT NOT NULL DEFAULT '',
    amount         TEXT NOT NULL,
    PRIMARY KEY (template_id, allocation_id)
);

CREATE TABLE IF NOT EXISTS ledgers (
    template_id         TEXT NOT NULL REFERENCES templates(id),
    month_key           TEXT NOT NULL,
    year                INTEGER NOT NULL,
    month               INTEGER NOT NULL,
    net_monthly_income  TEXT NOT NULL,
    need_pct            TEXT NOT NULL,
    want_pct            TEXT NOT NULL,
    save_pct            TEXT NOT NULL,
    excess_need         TEXT NOT NULL,
    excess_want         TEXT NOT NULL,
    excess_save         TEXT NOT NULL,
    created_at          TEXT NOT NULL,
    PRIMARY KEY (template_id, month_key)
);

CREATE INDEX IF NOT EXISTS idx_ledgers_chrono ON ledgers(template_id, year, month);

CREATE TABLE IF NOT EXISTS ledger_allocations (
    template_id    TEXT NOT NULL,
    month_key      TEXT NOT NULL,
    allocation_id  TEXT NOT NULL,
    position       INTEGER NOT NULL,
    category       TEXT NOT NULL,
    description    TEXT NOT NULL DEFAULT '',
    amount         TEXT NOT NULL,
    recurs         BOOLEAN NOT NULL DEFAULT 0,
    PRIMARY KEY (template_id, month_key, allocation_id),
    FOREIGN KEY (template_id, month_key) REFERENCES ledgers(template_id, month_key)
);

CREATE TABLE IF NOT EXISTS profiles (
    user_id       TEXT PRIMARY KEY,
    display_name  TEXT NOT NULL DEFAULT '',
    email         TEXT,
    template_id   TEXT NOT NULL REFERENCES templates(id),
    start_month   TEXT NOT NULL
);
"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[];
