use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::store::Store;

const MAX_LOG_LINES: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: u32,
    pub web_name: String,
    pub now_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct League {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterLogic {
    And,
    #[default]
    Or,
}

impl FilterLogic {
    pub fn toggled(self) -> Self {
        match self {
            FilterLogic::And => FilterLogic::Or,
            FilterLogic::Or => FilterLogic::And,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Projection {
    #[default]
    Tsne,
    Pca,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChartView {
    #[default]
    Projection,
    PointsDistribution,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Chart,
    League,
    Gameweek,
    Manager,
    Player,
}

/// One plotted point. Managers whose teams project onto the same coordinate
/// are merged into a single record with `manager_count > 1`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ManagerRecord {
    pub manager_names: Vec<String>,
    pub team_names: Vec<String>,
    pub team_ids: Vec<u32>,
    pub manager_count: u32,
    pub captain: Option<u32>,
    pub vice_captain: Option<u32>,
    pub rank: Option<i64>,
    pub total_points: Option<i64>,
    pub gw_points: i64,
    pub gw_rank: Option<i64>,
    pub active_chip: Option<String>,
    pub players_owned: Vec<u32>,
    pub tsne: (f64, f64),
    pub pca: (f64, f64),
}

impl ManagerRecord {
    pub fn is_group(&self) -> bool {
        self.manager_count > 1
    }

    pub fn display_name(&self) -> String {
        if self.is_group() {
            return format!("Group of {} managers", self.manager_count);
        }
        self.manager_names.first().cloned().unwrap_or_default()
    }

    pub fn first_team_id(&self) -> Option<u32> {
        self.team_ids.first().copied()
    }

    pub fn coords(&self, projection: Projection) -> (f64, f64) {
        match projection {
            Projection::Tsne => self.tsne,
            Projection::Pca => self.pca,
        }
    }

    pub fn has_any_team(&self, team_ids: &BTreeSet<u32>) -> bool {
        self.team_ids.iter().any(|id| team_ids.contains(id))
    }

    pub fn owns_highlighted(&self, player_ids: &BTreeSet<u32>, logic: FilterLogic) -> bool {
        if player_ids.is_empty() {
            return false;
        }
        match logic {
            FilterLogic::Or => self.players_owned.iter().any(|id| player_ids.contains(id)),
            FilterLogic::And => player_ids.iter().all(|id| self.players_owned.contains(id)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DatasetKey {
    pub league_id: u32,
    pub gameweek: u32,
}

impl fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "league {} gw {}", self.league_id, self.gameweek)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProviderCommand {
    LoadPlayers,
    LoadLeagues,
    FetchManagers { key: DatasetKey, generation: u64 },
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetPlayerData {
        players: Vec<PlayerRecord>,
        current_gameweek: u32,
    },
    PlayerDataFailed(String),
    SetLeagues(Vec<League>),
    LeaguesFailed(String),
    SetManagerData {
        key: DatasetKey,
        generation: u64,
        managers: Vec<ManagerRecord>,
    },
    ManagerDataFailed {
        key: DatasetKey,
        generation: u64,
        error: String,
    },
    Log(String),
}

#[derive(Debug)]
pub struct AppState {
    pub store: Store,
    pub focus: Focus,
    pub view: ChartView,
    pub projection: Projection,
    pub point_cursor: Option<usize>,
    pub preferred_league: Option<u32>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            store: Store::new(),
            focus: Focus::Chart,
            view: ChartView::Projection,
            projection: Projection::Tsne,
            point_cursor: None,
            preferred_league: None,
            logs: VecDeque::with_capacity(MAX_LOG_LINES),
            help_overlay: false,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        if let Some(rest) = msg.strip_prefix("[WARN] ") {
            tracing::warn!("{rest}");
        } else if let Some(rest) = msg.strip_prefix("[INFO] ") {
            tracing::info!("{rest}");
        } else {
            tracing::info!("{msg}");
        }
        let stamp = chrono::Local::now().format("%H:%M:%S");
        if self.logs.len() >= MAX_LOG_LINES {
            self.logs.pop_front();
        }
        self.logs.push_back(format!("{stamp} {msg}"));
    }

    pub fn cycle_focus_next(&mut self) {
        self.focus = match self.focus {
            Focus::Chart => Focus::League,
            Focus::League => Focus::Gameweek,
            Focus::Gameweek => Focus::Manager,
            Focus::Manager => Focus::Player,
            Focus::Player => Focus::Chart,
        };
    }

    pub fn cycle_focus_prev(&mut self) {
        self.focus = match self.focus {
            Focus::Chart => Focus::Player,
            Focus::League => Focus::Chart,
            Focus::Gameweek => Focus::League,
            Focus::Manager => Focus::Gameweek,
            Focus::Player => Focus::Manager,
        };
    }

    pub fn toggle_view(&mut self) {
        self.view = match self.view {
            ChartView::Projection => ChartView::PointsDistribution,
            ChartView::PointsDistribution => ChartView::Projection,
        };
        self.point_cursor = None;
    }

    pub fn toggle_projection(&mut self) {
        self.projection = match self.projection {
            Projection::Tsne => Projection::Pca,
            Projection::Pca => Projection::Tsne,
        };
    }

    pub fn select_next_point(&mut self, total: usize) {
        if total == 0 {
            self.point_cursor = None;
            return;
        }
        self.point_cursor = Some(match self.point_cursor {
            Some(idx) if idx + 1 < total => idx + 1,
            _ => 0,
        });
    }

    pub fn select_prev_point(&mut self, total: usize) {
        if total == 0 {
            self.point_cursor = None;
            return;
        }
        self.point_cursor = Some(match self.point_cursor {
            Some(idx) if idx > 0 && idx <= total => idx - 1,
            _ => total - 1,
        });
    }

    pub fn clamp_point_cursor(&mut self) {
        let total = self.store.managers().len();
        if let Some(idx) = self.point_cursor
            && idx >= total
        {
            self.point_cursor = total.checked_sub(1);
        }
    }

    fn initial_league(&self, leagues: &[League]) -> Option<League> {
        self.preferred_league
            .and_then(|id| leagues.iter().find(|league| league.id == id))
            .or_else(|| leagues.first())
            .cloned()
    }
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetPlayerData {
            players,
            current_gameweek,
        } => {
            state.store.set_loading(false);
            let count = players.len();
            state.store.replace_players(players, current_gameweek);
            state.push_log(format!(
                "[INFO] Loaded {count} players (current GW {current_gameweek})"
            ));
        }
        Delta::PlayerDataFailed(error) => {
            state.store.set_loading(false);
            state.store.record_error(format!("player data: {error}"));
            state.push_log(format!("[WARN] Error loading player data: {error}"));
        }
        Delta::SetLeagues(leagues) => {
            state.store.set_loading(false);
            let initial = state.initial_league(&leagues);
            let count = leagues.len();
            state.store.replace_leagues(leagues);
            match initial {
                Some(league) => {
                    state.push_log(format!(
                        "[INFO] Loaded {count} leagues, selecting {}",
                        league.name
                    ));
                    state.store.set_current_league(league);
                }
                None => state.push_log("[WARN] No leagues available"),
            }
        }
        Delta::LeaguesFailed(error) => {
            state.store.set_loading(false);
            state.store.record_error(format!("league list: {error}"));
            state.push_log(format!("[WARN] Error loading leagues: {error}"));
        }
        Delta::SetManagerData {
            key,
            generation,
            managers,
        } => {
            state.store.set_loading(false);
            let count = managers.len();
            if state.store.accept_manager_data(key, generation, managers) {
                state.clamp_point_cursor();
                state.push_log(format!("[INFO] Loaded {count} points for {key}"));
            } else {
                state.push_log(format!("[INFO] Discarded stale response for {key}"));
            }
        }
        Delta::ManagerDataFailed {
            key,
            generation,
            error,
        } => {
            state.store.set_loading(false);
            if state.store.manager_fetch_failed(generation, &error) {
                state.push_log(format!("[WARN] Error loading manager data for {key}: {error}"));
            } else {
                state.push_log(format!("[INFO] Ignored stale failure for {key}: {error}"));
            }
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}

pub fn filter_logic_label(logic: FilterLogic) -> &'static str {
    match logic {
        FilterLogic::And => "AND",
        FilterLogic::Or => "OR",
    }
}

pub fn projection_label(projection: Projection) -> &'static str {
    match projection {
        Projection::Tsne => "t-SNE",
        Projection::Pca => "PCA",
    }
}

pub fn view_label(view: ChartView) -> &'static str {
    match view {
        ChartView::Projection => "SIMILARITY",
        ChartView::PointsDistribution => "GW POINTS",
    }
}
