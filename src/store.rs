use std::collections::{BTreeSet, HashMap};

use crate::state::{DatasetKey, FilterLogic, League, ManagerRecord, PlayerRecord, ProviderCommand};

#[derive(Debug, Clone, Default, PartialEq)]
struct Selection {
    // 0 until player metadata has provided a max gameweek.
    gameweek: u32,
    league: Option<League>,
    highlighted_managers: BTreeSet<u32>,
    highlighted_players: BTreeSet<u32>,
    filter_logic: FilterLogic,
}

#[derive(Debug)]
pub struct Store {
    selection: Selection,
    max_gameweek: u32,
    players: Vec<PlayerRecord>,
    player_index: HashMap<u32, usize>,
    managers: Vec<ManagerRecord>,
    manager_key: Option<DatasetKey>,
    leagues: Vec<League>,
    loading: u32,
    last_requested: Option<DatasetKey>,
    generation: u64,
    last_error: Option<String>,
    revision: u64,
    outbox: Vec<ProviderCommand>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        let mut store = Self {
            selection: Selection::default(),
            max_gameweek: 0,
            players: Vec::new(),
            player_index: HashMap::new(),
            managers: Vec::new(),
            manager_key: None,
            leagues: Vec::new(),
            loading: 0,
            last_requested: None,
            generation: 0,
            last_error: None,
            revision: 0,
            outbox: Vec::with_capacity(4),
        };
        store.queue(ProviderCommand::LoadPlayers);
        store.queue(ProviderCommand::LoadLeagues);
        store
    }

    pub fn current_gameweek(&self) -> u32 {
        self.selection.gameweek
    }

    pub fn max_gameweek(&self) -> u32 {
        self.max_gameweek
    }

    pub fn current_league(&self) -> Option<&League> {
        self.selection.league.as_ref()
    }

    pub fn highlighted_managers(&self) -> &BTreeSet<u32> {
        &self.selection.highlighted_managers
    }

    pub fn highlighted_players(&self) -> &BTreeSet<u32> {
        &self.selection.highlighted_players
    }

    pub fn player_filter_logic(&self) -> FilterLogic {
        self.selection.filter_logic
    }

    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    pub fn managers(&self) -> &[ManagerRecord] {
        &self.managers
    }

    pub fn manager_key(&self) -> Option<DatasetKey> {
        self.manager_key
    }

    pub fn leagues(&self) -> &[League] {
        &self.leagues
    }

    pub fn is_loading(&self) -> bool {
        self.loading > 0
    }

    pub fn loading_count(&self) -> u32 {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn name_from_id(&self, id: u32) -> &str {
        self.player_index
            .get(&id)
            .and_then(|idx| self.players.get(*idx))
            .map(|player| player.web_name.as_str())
            .unwrap_or("")
    }

    pub fn clamp_gameweek(&self, gameweek: i64) -> u32 {
        // Mirrors min(max(1, g), max): yields 0 while no max is known.
        let clamped = gameweek.max(1).min(i64::from(self.max_gameweek));
        u32::try_from(clamped).unwrap_or(0)
    }

    pub fn set_current_gameweek(&mut self, gameweek: i64) -> bool {
        let gameweek = self.clamp_gameweek(gameweek);
        if gameweek == self.selection.gameweek {
            return false;
        }
        self.selection.gameweek = gameweek;
        self.touch();
        self.derive_manager_fetch();
        true
    }

    pub fn set_current_league(&mut self, league: League) -> bool {
        if let Some(current) = &self.selection.league
            && current.id == league.id
        {
            return false;
        }
        self.selection.league = Some(league);
        self.touch();
        self.derive_manager_fetch();
        true
    }

    pub fn set_highlighted_managers<I>(&mut self, team_ids: I) -> bool
    where
        I: IntoIterator<Item = u32>,
    {
        let next: BTreeSet<u32> = team_ids.into_iter().collect();
        if next == self.selection.highlighted_managers {
            return false;
        }
        self.selection.highlighted_managers = next;
        self.touch();
        true
    }

    pub fn set_highlighted_players<I>(&mut self, player_ids: I) -> bool
    where
        I: IntoIterator<Item = u32>,
    {
        let next: BTreeSet<u32> = player_ids.into_iter().collect();
        if next == self.selection.highlighted_players {
            return false;
        }
        self.selection.highlighted_players = next;
        self.touch();
        true
    }

    /// Returns whether `team_id` is highlighted after the toggle.
    pub fn toggle_highlighted_manager(&mut self, team_id: u32) -> bool {
        let highlighted = &mut self.selection.highlighted_managers;
        let now_highlighted = if highlighted.remove(&team_id) {
            false
        } else {
            highlighted.insert(team_id);
            true
        };
        self.touch();
        now_highlighted
    }

    pub fn set_player_filter_logic(&mut self, logic: FilterLogic) -> bool {
        if self.selection.filter_logic == logic {
            return false;
        }
        self.selection.filter_logic = logic;
        self.touch();
        true
    }

    pub fn clear_highlights(&mut self) -> bool {
        let changed = self.set_highlighted_managers([]);
        self.set_highlighted_players([]) || changed
    }

    pub fn set_loading(&mut self, loading: bool) {
        let next = if loading {
            self.loading.saturating_add(1)
        } else {
            self.loading.saturating_sub(1)
        };
        if next != self.loading {
            self.loading = next;
            self.touch();
        }
    }

    pub fn take_commands(&mut self) -> Vec<ProviderCommand> {
        std::mem::take(&mut self.outbox)
    }

    pub(crate) fn replace_players(&mut self, mut players: Vec<PlayerRecord>, current_gameweek: u32) {
        players.sort_by_key(|player| player.id);
        self.player_index = players
            .iter()
            .enumerate()
            .map(|(idx, player)| (player.id, idx))
            .collect();
        self.players = players;
        self.max_gameweek = current_gameweek;
        self.touch();
        self.set_current_gameweek(i64::from(current_gameweek));
    }

    pub(crate) fn replace_leagues(&mut self, leagues: Vec<League>) {
        self.leagues = leagues;
        self.touch();
    }

    /// Installs a manager dataset unless a newer request has been issued since.
    pub(crate) fn accept_manager_data(
        &mut self,
        key: DatasetKey,
        generation: u64,
        managers: Vec<ManagerRecord>,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        self.managers = managers;
        self.manager_key = Some(key);
        self.last_error = None;
        self.touch();
        true
    }

    pub(crate) fn manager_fetch_failed(&mut self, generation: u64, error: &str) -> bool {
        if generation != self.generation {
            return false;
        }
        self.record_error(format!("manager data: {error}"));
        true
    }

    pub(crate) fn record_error(&mut self, error: String) {
        self.last_error = Some(error);
        self.touch();
    }

    fn derive_manager_fetch(&mut self) {
        let gameweek = self.selection.gameweek;
        if gameweek < 1 {
            return;
        }
        let Some(league) = &self.selection.league else {
            return;
        };
        let key = DatasetKey {
            league_id: league.id,
            gameweek,
        };
        if self.last_requested == Some(key) {
            return;
        }
        self.last_requested = Some(key);
        self.generation += 1;
        let generation = self.generation;
        self.queue(ProviderCommand::FetchManagers { key, generation });
    }

    fn queue(&mut self, cmd: ProviderCommand) {
        self.set_loading(true);
        self.outbox.push(cmd);
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
