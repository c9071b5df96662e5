use std::collections::BTreeSet;

use fpl_similarity::pickers::{
    GameweekPicker, LeaguePicker, ManagerPicker, Picker, PickerKind, PickerPanel, PlayerPicker,
    filter_managers, filter_players, matches_search,
};
use fpl_similarity::state::{
    AppState, DatasetKey, Delta, FilterLogic, League, ManagerRecord, PlayerRecord, apply_delta,
};

fn player(id: u32, name: &str, cost: f64) -> PlayerRecord {
    PlayerRecord {
        id,
        web_name: name.to_string(),
        now_cost: cost,
    }
}

fn record(team_ids: &[u32], names: &[&str]) -> ManagerRecord {
    ManagerRecord {
        manager_names: names.iter().map(|n| n.to_string()).collect(),
        team_names: names.iter().map(|n| format!("{n} FC")).collect(),
        team_ids: team_ids.to_vec(),
        manager_count: team_ids.len() as u32,
        ..Default::default()
    }
}

fn loaded_state() -> AppState {
    let mut state = AppState::new();
    state.store.take_commands();
    apply_delta(
        &mut state,
        Delta::SetPlayerData {
            players: vec![
                player(17, "Saka", 10.1),
                player(328, "Salah", 13.2),
                player(99, "Raya", 5.6),
                player(351, "Haaland", 14.9),
            ],
            current_gameweek: 5,
        },
    );
    apply_delta(
        &mut state,
        Delta::SetLeagues(vec![
            League {
                id: 314,
                name: "Overall".to_string(),
            },
            League {
                id: 1234,
                name: "Office League".to_string(),
            },
        ]),
    );
    state.store.take_commands();
    let generation = state.store.generation();
    apply_delta(
        &mut state,
        Delta::SetManagerData {
            key: DatasetKey {
                league_id: 314,
                gameweek: 5,
            },
            generation,
            managers: vec![
                record(&[101, 102, 103], &["Alex Hunter", "Sam Ortiz", "Kim Lee"]),
                record(&[201], &["Dana Wells"]),
            ],
        },
    );
    assert!(!state.store.is_loading());
    state
}

#[test]
fn search_is_case_insensitive_substring() {
    assert!(matches_search("Salah", "sa"));
    assert!(matches_search("Saka", "SA"));
    assert!(matches_search("Haaland", ""));
    assert!(!matches_search("Raya", "sa"));
}

#[test]
fn player_filter_sorts_by_cost_descending() {
    let players = vec![
        player(17, "Saka", 10.1),
        player(328, "Salah", 13.2),
        player(99, "Raya", 5.6),
    ];
    let names = filter_players(&players, "sa")
        .into_iter()
        .map(|p| p.web_name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Salah", "Saka"]);

    let all = filter_players(&players, "");
    assert_eq!(all.first().map(|p| p.id), Some(328));
    assert_eq!(all.last().map(|p| p.id), Some(99));
}

#[test]
fn manager_filter_matches_any_grouped_name() {
    let managers = vec![
        record(&[101, 102], &["Alex Hunter", "Sam Ortiz"]),
        record(&[201], &["Dana Wells"]),
    ];
    let hits = filter_managers(&managers, "ortiz");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].0, 0);
    assert_eq!(filter_managers(&managers, "").len(), 2);
}

#[test]
fn manager_picker_toggles_whole_group() {
    let mut state = loaded_state();
    let mut picker = ManagerPicker::default();
    assert!(picker.activate(&mut state.store, 0));
    let expected: BTreeSet<u32> = [101, 102, 103].into_iter().collect();
    assert_eq!(state.store.highlighted_managers(), &expected);
    let options = picker.options(&state.store);
    assert!(options[0].selected);
    assert!(!options[1].selected);
    assert_eq!(options[0].label, "Group of 3 managers");

    assert!(picker.activate(&mut state.store, 0));
    assert!(state.store.highlighted_managers().is_empty());
    assert!(!picker.activate(&mut state.store, 9));
}

#[test]
fn player_picker_toggles_and_switches_logic() {
    let mut state = loaded_state();
    let mut picker = PlayerPicker::default();
    picker.set_search("sa".to_string());
    let options = picker.options(&state.store);
    assert_eq!(
        options.iter().map(|o| o.key).collect::<Vec<_>>(),
        vec![328, 17]
    );

    assert!(picker.activate(&mut state.store, 328));
    assert!(picker.activate(&mut state.store, 17));
    assert_eq!(picker.summary(&state.store), "Saka, Salah [OR]");

    assert!(picker.toggle_secondary(&mut state.store));
    assert_eq!(state.store.player_filter_logic(), FilterLogic::And);
    assert!(picker.activate(&mut state.store, 17));
    assert_eq!(picker.summary(&state.store), "Salah [AND]");
}

#[test]
fn league_and_gameweek_pickers_lock_while_loading() {
    let mut state = loaded_state();
    let mut league = LeaguePicker;
    let mut gameweek = GameweekPicker;
    assert!(!league.read_only(&state.store));

    assert!(gameweek.activate(&mut state.store, 3));
    assert!(state.store.is_loading());
    assert!(league.read_only(&state.store));
    assert!(gameweek.read_only(&state.store));
    assert!(!league.activate(&mut state.store, 1234));
    assert!(!gameweek.activate(&mut state.store, 4));
    assert_eq!(state.store.current_gameweek(), 3);
    assert_eq!(state.store.current_league().map(|l| l.id), Some(314));

    assert_eq!(gameweek.options(&state.store).len(), 5);
    assert_eq!(gameweek.summary(&state.store), "GW 3 / 5");
}

#[test]
fn panel_search_filters_and_activates() {
    let mut state = loaded_state();
    let mut panel = PickerPanel::new();
    panel.focus(PickerKind::Player, &state.store);
    assert_eq!(panel.active_kind(), PickerKind::Player);

    assert!(panel.begin_search());
    for ch in "sal".chars() {
        panel.push_search_char(ch, &state.store);
    }
    panel.end_search();
    assert_eq!(panel.picker(PickerKind::Player).search(), Some("sal"));
    assert!(panel.activate_cursor(&mut state.store));
    assert!(state.store.highlighted_players().contains(&328));

    panel.pop_search_char(&state.store);
    assert_eq!(panel.picker(PickerKind::Player).search(), Some("sa"));

    panel.focus(PickerKind::League, &state.store);
    assert!(!panel.begin_search());
    panel.move_cursor(&state.store, 1);
    assert_eq!(panel.cursor(PickerKind::League), 1);
    assert!(panel.activate_cursor(&mut state.store));
    assert_eq!(state.store.current_league().map(|l| l.id), Some(1234));
}
