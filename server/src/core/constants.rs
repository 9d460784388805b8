//! Application-wide constants

/// Application display name
pub const APP_NAME: &str = "Tourney";
/// Lowercase name used for logging filters and paths
pub const APP_NAME_LOWER: &str = "tourney";
/// Local dot-folder fallback for the data directory
pub const APP_DOT_FOLDER: &str = ".tourney";
/// Config file name looked up in the profile and working directories
pub const CONFIG_FILE_NAME: &str = "tourney.json";

// Environment variables
pub const ENV_LOG: &str = "TOURNEY_LOG";
pub const ENV_HOST: &str = "TOURNEY_HOST";
pub const ENV_PORT: &str = "TOURNEY_PORT";
pub const ENV_CONFIG: &str = "TOURNEY_CONFIG";
pub const ENV_DATA_DIR: &str = "TOURNEY_DATA_DIR";
pub const ENV_ADMIN_TOKEN: &str = "TOURNEY_ADMIN_TOKEN";
pub const ENV_WIN_POINTS: &str = "TOURNEY_WIN_POINTS";
pub const ENV_DRAW_POINTS: &str = "TOURNEY_DRAW_POINTS";
pub const ENV_LOSS_POINTS: &str = "TOURNEY_LOSS_POINTS";

// Server defaults
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 4780;
/// Maximum request body size (1 MiB; the API carries no binary media)
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

// Scoring rule defaults (win = 2 points is the tournament's historical rule)
pub const DEFAULT_WIN_POINTS: i64 = 2;
pub const DEFAULT_DRAW_POINTS: i64 = 1;
pub const DEFAULT_LOSS_POINTS: i64 = 0;

/// Generated admin token length (alphanumeric chars)
pub const ADMIN_TOKEN_LEN: usize = 32;

// SQLite tuning
pub const SQLITE_DB_FILENAME: &str = "tourney.db";
pub const SQLITE_MAX_CONNECTIONS: u32 = 5;
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 5;
pub const SQLITE_CACHE_SIZE: &str = "-64000";
pub const SQLITE_WAL_AUTOCHECKPOINT: &str = "1000";
pub const SQLITE_CHECKPOINT_INTERVAL_SECS: u64 = 300;

/// Graceful shutdown timeout for background tasks
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 10;
