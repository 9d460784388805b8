//! SQLite schema definitions
//!
//! One canonical table per entity. Unresolved bracket participants are
//! stored as NULL, never as a 0 sentinel.

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema SQL
pub const SCHEMA: &str = r#"
-- =============================================================================
-- Infrastructure: Schema version tracking
-- =============================================================================
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL,
    applied_at INTEGER NOT NULL,
    description TEXT
);

CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at INTEGER NOT NULL,
    checksum TEXT NOT NULL,
    execution_time_ms INTEGER,
    success INTEGER NOT NULL DEFAULT 1
);

-- =============================================================================
-- 1. Team directory (teams + rosters)
-- =============================================================================
CREATE TABLE IF NOT EXISTS teams (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK(length(name) >= 1 AND length(name) <= 250),
    short_name TEXT NOT NULL CHECK(length(short_name) >= 1 AND length(short_name) <= 50),
    logo TEXT,
    category TEXT NOT NULL,
    status INTEGER NOT NULL DEFAULT 1,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_teams_category ON teams(category, status);

CREATE TABLE IF NOT EXISTS players (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    team_id INTEGER NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
    name TEXT NOT NULL CHECK(length(name) >= 1 AND length(name) <= 255),
    position TEXT,
    jersey_number INTEGER,
    photo TEXT,
    status INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX IF NOT EXISTS idx_players_team ON players(team_id);

-- =============================================================================
-- 2. Edition registry (years, categories, pools, pool membership)
-- =============================================================================
CREATE TABLE IF NOT EXISTS editions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    year TEXT NOT NULL UNIQUE CHECK(length(year) >= 1 AND length(year) <= 20),
    status INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    status INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS pools (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK(length(name) >= 1 AND length(name) <= 100),
    category TEXT NOT NULL,
    status INTEGER NOT NULL DEFAULT 1,
    UNIQUE(name, category)
);

-- Membership of a pool for one edition. A pool is a reusable group
-- label; its composition per year lives here.
CREATE TABLE IF NOT EXISTS pool_entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    edition_id INTEGER NOT NULL REFERENCES editions(id) ON DELETE CASCADE,
    pool_id INTEGER NOT NULL REFERENCES pools(id),
    category TEXT NOT NULL,
    team_id INTEGER NOT NULL REFERENCES teams(id),
    created_at INTEGER NOT NULL,
    status INTEGER NOT NULL DEFAULT 1,
    UNIQUE(edition_id, pool_id, category, team_id)
);

CREATE INDEX IF NOT EXISTS idx_pool_entries_edition ON pool_entries(edition_id, pool_id);

-- =============================================================================
-- 3. Fixture ledger
-- =============================================================================
CREATE TABLE IF NOT EXISTS fixtures (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    edition_id INTEGER NOT NULL REFERENCES editions(id) ON DELETE CASCADE,
    match_at INTEGER NOT NULL,
    label TEXT NOT NULL CHECK(length(label) <= 255),
    category TEXT NOT NULL,
    match_number INTEGER NOT NULL,
    pool_id INTEGER REFERENCES pools(id),
    team1_id INTEGER REFERENCES teams(id),
    team2_id INTEGER REFERENCES teams(id),
    slot1 INTEGER,
    slot2 INTEGER,
    winner_id INTEGER,
    completed INTEGER NOT NULL DEFAULT 0,
    report_file TEXT
);

CREATE INDEX IF NOT EXISTS idx_fixtures_edition ON fixtures(edition_id, match_at);

-- =============================================================================
-- 4. Results (1:1 with fixtures)
-- =============================================================================
CREATE TABLE IF NOT EXISTS results (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    fixture_id INTEGER NOT NULL UNIQUE REFERENCES fixtures(id) ON DELETE CASCADE,
    team1_score INTEGER NOT NULL CHECK(team1_score >= 0),
    team2_score INTEGER NOT NULL CHECK(team2_score >= 0),
    winner_id INTEGER,
    summary TEXT,
    updated_at INTEGER NOT NULL
);

-- =============================================================================
-- 5. Standings (derived state, one row per edition/pool/category/team)
-- =============================================================================
CREATE TABLE IF NOT EXISTS standings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    edition_id INTEGER NOT NULL REFERENCES editions(id) ON DELETE CASCADE,
    pool_id INTEGER NOT NULL REFERENCES pools(id),
    category TEXT NOT NULL,
    team_id INTEGER NOT NULL REFERENCES teams(id),
    played INTEGER NOT NULL DEFAULT 0,
    won INTEGER NOT NULL DEFAULT 0,
    drawn INTEGER NOT NULL DEFAULT 0,
    lost INTEGER NOT NULL DEFAULT 0,
    goals_for INTEGER NOT NULL DEFAULT 0,
    goals_against INTEGER NOT NULL DEFAULT 0,
    goal_diff INTEGER NOT NULL DEFAULT 0,
    points INTEGER NOT NULL DEFAULT 0,
    pool_winner INTEGER NOT NULL DEFAULT 0,
    UNIQUE(edition_id, pool_id, category, team_id)
);

CREATE INDEX IF NOT EXISTS idx_standings_scope ON standings(edition_id, pool_id, category);

-- =============================================================================
-- 6. Honours (historical champions, independent of live fixtures)
-- =============================================================================
CREATE TABLE IF NOT EXISTS honours (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    year INTEGER NOT NULL,
    category TEXT NOT NULL,
    team1_id INTEGER NOT NULL REFERENCES teams(id),
    team2_id INTEGER REFERENCES teams(id),
    joint_winner INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_honours_year ON honours(year);

-- =============================================================================
-- 7. Per-player match scoring detail (append-only, never feeds standings)
-- =============================================================================
CREATE TABLE IF NOT EXISTS scoring_details (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    fixture_id INTEGER NOT NULL REFERENCES fixtures(id) ON DELETE CASCADE,
    team_id INTEGER NOT NULL REFERENCES teams(id),
    player_id INTEGER NOT NULL REFERENCES players(id),
    goals INTEGER NOT NULL DEFAULT 0,
    green_cards INTEGER NOT NULL DEFAULT 0,
    yellow_cards INTEGER NOT NULL DEFAULT 0,
    red_cards INTEGER NOT NULL DEFAULT 0,
    fouls INTEGER NOT NULL DEFAULT 0,
    created_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_scoring_fixture ON scoring_details(fixture_id, player_id);

-- =============================================================================
-- Seed data: the two tournament categories
-- =============================================================================
INSERT OR IGNORE INTO categories (id, name, status) VALUES
    (1, 'Men', 1),
    (2, 'Women', 1);
"#;
