use std::fmt::Debug;

use crate::state::{ManagerRecord, PlayerRecord, filter_logic_label};
use crate::store::Store;

#[derive(Debug, Clone, PartialEq)]
pub struct PickerOption {
    pub key: u32,
    pub label: String,
    pub selected: bool,
}

pub trait Picker: Debug {
    fn title(&self) -> &'static str;

    fn multi_select(&self) -> bool;

    fn options(&self, store: &Store) -> Vec<PickerOption>;

    fn summary(&self, store: &Store) -> String;

    fn activate(&mut self, store: &mut Store, key: u32) -> bool;

    fn read_only(&self, _store: &Store) -> bool {
        false
    }

    fn search(&self) -> Option<&str> {
        None
    }

    fn set_search(&mut self, _query: String) {}

    fn toggle_secondary(&mut self, _store: &mut Store) -> bool {
        false
    }
}

pub fn matches_search(name: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    name.to_lowercase().contains(&query.to_lowercase())
}

pub fn filter_players<'a>(players: &'a [PlayerRecord], query: &str) -> Vec<&'a PlayerRecord> {
    let mut filtered = players
        .iter()
        .filter(|player| matches_search(&player.web_name, query))
        .collect::<Vec<_>>();
    filtered.sort_by(|a, b| b.now_cost.total_cmp(&a.now_cost));
    filtered
}

/// Records where any grouped manager name contains `query`, with their index.
pub fn filter_managers<'a>(
    managers: &'a [ManagerRecord],
    query: &str,
) -> Vec<(usize, &'a ManagerRecord)> {
    managers
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            query.is_empty()
                || record
                    .manager_names
                    .iter()
                    .any(|name| matches_search(name, query))
        })
        .collect()
}

#[derive(Debug, Default)]
pub struct LeaguePicker;

impl Picker for LeaguePicker {
    fn title(&self) -> &'static str {
        "League"
    }

    fn multi_select(&self) -> bool {
        false
    }

    fn options(&self, store: &Store) -> Vec<PickerOption> {
        let current = store.current_league().map(|league| league.id);
        store
            .leagues()
            .iter()
            .map(|league| PickerOption {
                key: league.id,
                label: league.name.clone(),
                selected: Some(league.id) == current,
            })
            .collect()
    }

    fn summary(&self, store: &Store) -> String {
        store
            .current_league()
            .map(|league| league.name.clone())
            .unwrap_or_else(|| "Choose league".to_string())
    }

    fn activate(&mut self, store: &mut Store, key: u32) -> bool {
        if self.read_only(store) {
            return false;
        }
        let Some(league) = store.leagues().iter().find(|league| league.id == key).cloned() else {
            return false;
        };
        store.set_current_league(league)
    }

    fn read_only(&self, store: &Store) -> bool {
        store.is_loading()
    }
}

#[derive(Debug, Default)]
pub struct GameweekPicker;

impl Picker for GameweekPicker {
    fn title(&self) -> &'static str {
        "Gameweek"
    }

    fn multi_select(&self) -> bool {
        false
    }

    fn options(&self, store: &Store) -> Vec<PickerOption> {
        let current = store.current_gameweek();
        (1..=store.max_gameweek())
            .map(|gw| PickerOption {
                key: gw,
                label: format!("GW {gw}"),
                selected: gw == current,
            })
            .collect()
    }

    fn summary(&self, store: &Store) -> String {
        match store.current_gameweek() {
            0 => "Choose gameweek".to_string(),
            gw => format!("GW {gw} / {}", store.max_gameweek()),
        }
    }

    fn activate(&mut self, store: &mut Store, key: u32) -> bool {
        if self.read_only(store) || key == store.current_gameweek() {
            return false;
        }
        store.set_current_gameweek(i64::from(key))
    }

    fn read_only(&self, store: &Store) -> bool {
        store.is_loading()
    }
}

#[derive(Debug, Default)]
pub struct ManagerPicker {
    search: String,
}

impl Picker for ManagerPicker {
    fn title(&self) -> &'static str {
        "Highlight Manager"
    }

    fn multi_select(&self) -> bool {
        true
    }

    fn options(&self, store: &Store) -> Vec<PickerOption> {
        let highlighted = store.highlighted_managers();
        filter_managers(store.managers(), &self.search)
            .into_iter()
            .map(|(idx, record)| PickerOption {
                key: idx as u32,
                label: record.display_name(),
                selected: record.has_any_team(highlighted),
            })
            .collect()
    }

    fn summary(&self, store: &Store) -> String {
        let selected = store
            .managers()
            .iter()
            .filter(|record| record.has_any_team(store.highlighted_managers()))
            .map(|record| record.display_name())
            .collect::<Vec<_>>();
        if selected.is_empty() {
            "none".to_string()
        } else {
            selected.join(", ")
        }
    }

    /// Toggles every team of the chosen record at once.
    fn activate(&mut self, store: &mut Store, key: u32) -> bool {
        let Some(record) = store.managers().get(key as usize) else {
            return false;
        };
        let mut next = store.highlighted_managers().clone();
        if record.has_any_team(&next) {
            for id in &record.team_ids {
                next.remove(id);
            }
        } else {
            next.extend(record.team_ids.iter().copied());
        }
        store.set_highlighted_managers(next)
    }

    fn search(&self) -> Option<&str> {
        Some(&self.search)
    }

    fn set_search(&mut self, query: String) {
        self.search = query;
    }
}

#[derive(Debug, Default)]
pub struct PlayerPicker {
    search: String,
}

impl Picker for PlayerPicker {
    fn title(&self) -> &'static str {
        "Highlight Player Owned"
    }

    fn multi_select(&self) -> bool {
        true
    }

    fn options(&self, store: &Store) -> Vec<PickerOption> {
        let highlighted = store.highlighted_players();
        filter_players(store.players(), &self.search)
            .into_iter()
            .map(|player| PickerOption {
                key: player.id,
                label: format!("{} ({:.1})", player.web_name, player.now_cost),
                selected: highlighted.contains(&player.id),
            })
            .collect()
    }

    fn summary(&self, store: &Store) -> String {
        let names = store
            .highlighted_players()
            .iter()
            .map(|id| store.name_from_id(*id))
            .filter(|name| !name.is_empty())
            .collect::<Vec<_>>();
        let logic = filter_logic_label(store.player_filter_logic());
        if names.is_empty() {
            format!("none [{logic}]")
        } else {
            format!("{} [{logic}]", names.join(", "))
        }
    }

    fn activate(&mut self, store: &mut Store, key: u32) -> bool {
        let mut next = store.highlighted_players().clone();
        if !next.remove(&key) {
            next.insert(key);
        }
        store.set_highlighted_players(next)
    }

    fn search(&self) -> Option<&str> {
        Some(&self.search)
    }

    fn set_search(&mut self, query: String) {
        self.search = query;
    }

    fn toggle_secondary(&mut self, store: &mut Store) -> bool {
        let next = store.player_filter_logic().toggled();
        store.set_player_filter_logic(next)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKind {
    League,
    Gameweek,
    Manager,
    Player,
}

impl PickerKind {
    fn index(self) -> usize {
        match self {
            PickerKind::League => 0,
            PickerKind::Gameweek => 1,
            PickerKind::Manager => 2,
            PickerKind::Player => 3,
        }
    }
}

#[derive(Debug)]
pub struct PickerPanel {
    pickers: Vec<Box<dyn Picker>>,
    cursors: Vec<usize>,
    active: usize,
    searching: bool,
}

impl Default for PickerPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl PickerPanel {
    pub fn new() -> Self {
        let pickers: Vec<Box<dyn Picker>> = vec![
            Box::new(LeaguePicker),
            Box::new(GameweekPicker),
            Box::new(ManagerPicker::default()),
            Box::new(PlayerPicker::default()),
        ];
        let cursors = vec![0; pickers.len()];
        Self {
            pickers,
            cursors,
            active: 0,
            searching: false,
        }
    }

    pub fn picker(&self, kind: PickerKind) -> &dyn Picker {
        self.pickers[kind.index()].as_ref()
    }

    pub fn active_kind(&self) -> PickerKind {
        match self.active {
            0 => PickerKind::League,
            1 => PickerKind::Gameweek,
            2 => PickerKind::Manager,
            _ => PickerKind::Player,
        }
    }

    pub fn cursor(&self, kind: PickerKind) -> usize {
        self.cursors[kind.index()]
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn focus(&mut self, kind: PickerKind, store: &Store) {
        self.active = kind.index();
        self.searching = false;
        let options = self.pickers[self.active].options(store);
        if let Some(pos) = options.iter().position(|option| option.selected) {
            self.cursors[self.active] = pos;
        }
        self.clamp_cursor(options.len());
    }

    pub fn move_cursor(&mut self, store: &Store, delta: isize) {
        let total = self.pickers[self.active].options(store).len();
        if total == 0 {
            self.cursors[self.active] = 0;
            return;
        }
        let current = self.cursors[self.active].min(total - 1) as isize;
        let next = (current + delta).clamp(0, total as isize - 1);
        self.cursors[self.active] = next as usize;
    }

    pub fn activate_cursor(&mut self, store: &mut Store) -> bool {
        let options = self.pickers[self.active].options(store);
        let Some(option) = options.get(self.cursors[self.active]) else {
            return false;
        };
        let key = option.key;
        self.pickers[self.active].activate(store, key)
    }

    pub fn toggle_secondary(&mut self, store: &mut Store) -> bool {
        self.pickers[self.active].toggle_secondary(store)
    }

    pub fn begin_search(&mut self) -> bool {
        self.searching = self.pickers[self.active].search().is_some();
        self.searching
    }

    pub fn end_search(&mut self) {
        self.searching = false;
    }

    pub fn push_search_char(&mut self, ch: char, store: &Store) {
        let picker = &mut self.pickers[self.active];
        let Some(current) = picker.search() else {
            return;
        };
        let mut query = current.to_string();
        query.push(ch);
        picker.set_search(query);
        self.cursors[self.active] = 0;
        let total = self.pickers[self.active].options(store).len();
        self.clamp_cursor(total);
    }

    pub fn pop_search_char(&mut self, store: &Store) {
        let picker = &mut self.pickers[self.active];
        let Some(current) = picker.search() else {
            return;
        };
        let mut query = current.to_string();
        query.pop();
        picker.set_search(query);
        let total = self.pickers[self.active].options(store).len();
        self.clamp_cursor(total);
    }

    fn clamp_cursor(&mut self, total: usize) {
        let cursor = &mut self.cursors[self.active];
        *cursor = (*cursor).min(total.saturating_sub(1));
    }
}
