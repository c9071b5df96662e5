use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::http_cache::{cache_dir, write_atomic};
use crate::state::{AppState, ChartView, FilterLogic, Projection};

const PREFS_FILE: &str = "preferences.json";
const PREFS_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    version: u32,
    #[serde(default)]
    pub league_id: Option<u32>,
    #[serde(default)]
    pub highlighted_managers: BTreeSet<u32>,
    #[serde(default)]
    pub highlighted_players: BTreeSet<u32>,
    #[serde(default)]
    pub filter_logic: FilterLogic,
    #[serde(default)]
    pub projection: Projection,
    #[serde(default)]
    pub view: ChartView,
}

impl Preferences {
    pub fn capture(state: &AppState) -> Self {
        let store = &state.store;
        Self {
            version: PREFS_VERSION,
            league_id: store
                .current_league()
                .map(|league| league.id)
                .or(state.preferred_league),
            highlighted_managers: store.highlighted_managers().clone(),
            highlighted_players: store.highlighted_players().clone(),
            filter_logic: store.player_filter_logic(),
            projection: state.projection,
            view: state.view,
        }
    }

    /// Restores highlights and view settings right away; the league is only
    /// remembered until the league list arrives.
    pub fn apply(self, state: &mut AppState) {
        state.preferred_league = self.league_id.or(state.preferred_league);
        state.store.set_highlighted_managers(self.highlighted_managers);
        state.store.set_highlighted_players(self.highlighted_players);
        state.store.set_player_filter_logic(self.filter_logic);
        state.projection = self.projection;
        state.view = self.view;
    }
}

pub fn preferences_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(PREFS_FILE))
}

pub fn load_preferences_from(path: &Path) -> Option<Preferences> {
    let raw = fs::read_to_string(path).ok()?;
    let prefs = serde_json::from_str::<Preferences>(&raw).ok()?;
    (prefs.version == PREFS_VERSION).then_some(prefs)
}

pub fn save_preferences_to(path: &Path, prefs: &Preferences) -> Result<()> {
    write_atomic(path, prefs).with_context(|| format!("save {}", path.display()))
}

pub fn load_into_state(state: &mut AppState) -> bool {
    let Some(prefs) = preferences_path().and_then(|path| load_preferences_from(&path)) else {
        return false;
    };
    prefs.apply(state);
    true
}

pub fn save_from_state(state: &AppState) -> Result<()> {
    let Some(path) = preferences_path() else {
        return Ok(());
    };
    save_preferences_to(&path, &Preferences::capture(state))
}
