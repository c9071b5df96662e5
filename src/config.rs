use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DATA_URL: &str = "http://localhost:3000/assets";
pub const DEFAULT_PLAYER_FILE: &str = "player_data.json";
pub const DEFAULT_LEAGUES_FILE: &str = "leagues.json";
pub const DEFAULT_MANAGER_TEMPLATE: &str = "fpl_team_similarity_{league_id}_gw{gameweek}.json";
pub const DEFAULT_PROFILE_URL: &str = "https://fantasy.premierleague.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Http { base_url: String },
    Dir { root: PathBuf },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub source: DataSource,
    pub player_file: String,
    pub leagues_file: String,
    pub manager_file_template: String,
    pub profile_base_url: String,
    pub touch_primary: bool,
    pub default_league_id: Option<u32>,
    pub http_timeout: Duration,
    pub tick_rate: Duration,
    pub log_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: DataSource::Http {
                base_url: DEFAULT_DATA_URL.to_string(),
            },
            player_file: DEFAULT_PLAYER_FILE.to_string(),
            leagues_file: DEFAULT_LEAGUES_FILE.to_string(),
            manager_file_template: DEFAULT_MANAGER_TEMPLATE.to_string(),
            profile_base_url: DEFAULT_PROFILE_URL.to_string(),
            touch_primary: false,
            default_league_id: None,
            http_timeout: Duration::from_secs(10),
            tick_rate: Duration::from_millis(250),
            log_path: None,
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_env()
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();

        // A local directory wins over a base URL when both are set.
        let source = match non_empty_env("FPL_DATA_DIR") {
            Some(dir) => DataSource::Dir {
                root: PathBuf::from(dir),
            },
            None => DataSource::Http {
                base_url: non_empty_env("FPL_DATA_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| DEFAULT_DATA_URL.to_string()),
            },
        };

        let http_timeout = Duration::from_secs(
            env::var("FPL_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|val| val.parse::<u64>().ok())
                .unwrap_or(10)
                .clamp(1, 120),
        );
        let tick_rate = Duration::from_millis(
            env::var("FPL_TICK_MS")
                .ok()
                .and_then(|val| val.parse::<u64>().ok())
                .unwrap_or(250)
                .clamp(16, 2000),
        );

        Self {
            source,
            player_file: non_empty_env("FPL_PLAYER_FILE").unwrap_or(defaults.player_file),
            leagues_file: non_empty_env("FPL_LEAGUES_FILE").unwrap_or(defaults.leagues_file),
            manager_file_template: non_empty_env("FPL_MANAGER_FILE_TEMPLATE")
                .unwrap_or(defaults.manager_file_template),
            profile_base_url: non_empty_env("FPL_PROFILE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.profile_base_url),
            touch_primary: env::var("FPL_TOUCH_PRIMARY")
                .ok()
                .map(|val| parse_flag(&val))
                .unwrap_or(false),
            default_league_id: env::var("FPL_DEFAULT_LEAGUE")
                .ok()
                .and_then(|val| val.trim().parse::<u32>().ok()),
            http_timeout,
            tick_rate,
            log_path: non_empty_env("FPL_LOG_PATH").map(PathBuf::from),
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
