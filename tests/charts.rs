use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use fpl_similarity::charts::{
    ChartCache, ChartKind, ColorTier, HighlightContext, color_tier, points_distribution_chart,
    projection_chart, projection_symbol_size, tooltip_lines,
};
use fpl_similarity::data_fetch::{parse_manager_data_json, parse_player_data_json};
use fpl_similarity::interaction::DeviceClass;
use fpl_similarity::state::{
    AppState, ChartView, DatasetKey, Delta, FilterLogic, League, ManagerRecord, Projection,
    apply_delta,
};

const PROFILE: &str = "https://fantasy.premierleague.com";

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn grouped_managers() -> Vec<ManagerRecord> {
    parse_manager_data_json(&read_fixture("managers_grouped.json")).expect("fixture should parse")
}

/// App state with players, one league and the grouped fixture installed.
fn loaded_state() -> AppState {
    let mut state = AppState::new();
    state.store.take_commands();
    let players = parse_player_data_json(&read_fixture("player_data.json")).expect("players");
    apply_delta(
        &mut state,
        Delta::SetPlayerData {
            players: players.players,
            current_gameweek: players.current_gameweek,
        },
    );
    apply_delta(
        &mut state,
        Delta::SetLeagues(vec![League {
            id: 1234,
            name: "Office League".to_string(),
        }]),
    );
    state.store.take_commands();
    let generation = state.store.generation();
    apply_delta(
        &mut state,
        Delta::SetManagerData {
            key: DatasetKey {
                league_id: 1234,
                gameweek: 12,
            },
            generation,
            managers: grouped_managers(),
        },
    );
    state
}

fn set(ids: &[u32]) -> BTreeSet<u32> {
    ids.iter().copied().collect()
}

#[test]
fn highlighted_manager_outranks_player_ownership() {
    let managers = grouped_managers();
    let highlighted = set(&[201]);
    let players = set(&[17]);
    let ctx = HighlightContext {
        managers: &highlighted,
        players: &players,
        logic: FilterLogic::Or,
    };
    assert_eq!(color_tier(&managers[0], &ctx), ColorTier::Default);
    assert_eq!(color_tier(&managers[1], &ctx), ColorTier::Highlighted);
    assert_eq!(color_tier(&managers[2], &ctx), ColorTier::OwnsHighlightedPlayer);
    assert_eq!(ColorTier::Highlighted.hex(), "#ffffff");
    assert_eq!(ColorTier::OwnsHighlightedPlayer.hex(), "#3bda55");
    assert_eq!(ColorTier::Default.hex(), "#5470C6");
}

#[test]
fn highlighting_any_team_in_a_group_highlights_the_group() {
    let managers = grouped_managers();
    let highlighted = set(&[105]);
    let none = BTreeSet::new();
    let ctx = HighlightContext {
        managers: &highlighted,
        players: &none,
        logic: FilterLogic::Or,
    };
    assert_eq!(color_tier(&managers[0], &ctx), ColorTier::Highlighted);
}

#[test]
fn and_logic_requires_every_highlighted_player() {
    let managers = grouped_managers();
    let none = BTreeSet::new();
    let players = set(&[328, 17]);
    let and_ctx = HighlightContext {
        managers: &none,
        players: &players,
        logic: FilterLogic::And,
    };
    assert_eq!(color_tier(&managers[1], &and_ctx), ColorTier::OwnsHighlightedPlayer);
    assert_eq!(color_tier(&managers[2], &and_ctx), ColorTier::Default);

    let or_ctx = HighlightContext {
        logic: FilterLogic::Or,
        ..and_ctx
    };
    assert_eq!(color_tier(&managers[2], &or_ctx), ColorTier::OwnsHighlightedPlayer);
}

#[test]
fn symbol_size_scales_with_group_and_device() {
    assert_eq!(projection_symbol_size(1, DeviceClass::Pointer, false), 13.5);
    assert_eq!(projection_symbol_size(7, DeviceClass::Pointer, false), 22.5);
    assert_eq!(projection_symbol_size(7, DeviceClass::Pointer, true), 24.5);
    assert_eq!(projection_symbol_size(1, DeviceClass::Touch, false), 7.5);
}

#[test]
fn projection_chart_labels_highlighted_points_only() {
    let managers = grouped_managers();
    let highlighted = set(&[101, 201]);
    let none = BTreeSet::new();
    let ctx = HighlightContext {
        managers: &highlighted,
        players: &none,
        logic: FilterLogic::Or,
    };
    let spec = projection_chart(&managers, &ctx, Projection::Tsne, DeviceClass::Pointer);
    assert_eq!(spec.kind, ChartKind::Projection(Projection::Tsne));
    assert_eq!(spec.points.len(), 3);
    assert_eq!(spec.points[0].label.as_deref(), Some("Group of 7"));
    assert_eq!(spec.points[1].label.as_deref(), Some("Dana Wells"));
    assert_eq!(spec.points[2].label, None);
    assert_eq!((spec.points[0].x, spec.points[0].y), (12.5, -3.25));
    assert!(!spec.x_axis.visible && !spec.y_axis.visible);
    assert!(spec.x_axis.min < -8.0 && spec.x_axis.max > 12.5);

    let pca = projection_chart(&managers, &ctx, Projection::Pca, DeviceClass::Pointer);
    assert_eq!((pca.points[1].x, pca.points[1].y), (-0.3, 0.2));

    let order = spec.paint_order();
    assert_eq!(order.last().map(|p| p.tier), Some(ColorTier::Highlighted));
    assert_eq!(order[0].tier, ColorTier::Default);
}

#[test]
fn points_distribution_stacks_equal_scores() {
    let managers = grouped_managers();
    let none = BTreeSet::new();
    let ctx = HighlightContext {
        managers: &none,
        players: &none,
        logic: FilterLogic::Or,
    };
    let spec = points_distribution_chart(&managers, &ctx, 12);
    assert_eq!(spec.title, "Gameweek 12 Points Distribution");
    let coords = spec.points.iter().map(|p| (p.x, p.y)).collect::<Vec<_>>();
    assert_eq!(coords, vec![(64.0, 0.0), (71.0, 0.0), (64.0, 1.0)]);
    assert_eq!(spec.x_axis.min, 60.0);
    assert_eq!(spec.x_axis.max, 75.0);
    assert_eq!(spec.y_axis.max, 2.0);
    assert_eq!(spec.x_axis.title.as_deref(), Some("Gameweek Points"));
    assert_eq!(spec.y_axis.title.as_deref(), Some("Count"));
    assert!(spec.points.iter().all(|p| p.symbol_size == 10.0));
}

#[test]
fn points_distribution_handles_empty_dataset() {
    let none = BTreeSet::new();
    let ctx = HighlightContext {
        managers: &none,
        players: &none,
        logic: FilterLogic::Or,
    };
    let spec = points_distribution_chart(&[], &ctx, 3);
    assert!(spec.points.is_empty());
    assert_eq!(spec.y_axis.max, 0.0);
}

#[test]
fn nearest_point_respects_tolerance() {
    let managers = grouped_managers();
    let none = BTreeSet::new();
    let ctx = HighlightContext {
        managers: &none,
        players: &none,
        logic: FilterLogic::Or,
    };
    let spec = projection_chart(&managers, &ctx, Projection::Tsne, DeviceClass::Pointer);
    let hit = spec.nearest(-7.5, 4.0, 1.0, 1.0).map(|p| p.record);
    assert_eq!(hit, Some(1));
    assert!(spec.nearest(5.0, 10.0, 1.0, 1.0).is_none());
}

#[test]
fn group_tooltip_truncates_names() {
    let state = loaded_state();
    let record = &state.store.managers()[0];
    let lines = tooltip_lines(record, &state.store, 12, PROFILE);
    assert_eq!(lines[0], "Group of 7 managers");
    assert_eq!(lines[1], "  Alex Hunter (Hunters)");
    assert_eq!(lines[6], "  ...and 2 more");
    assert!(lines.contains(&"Captain: Haaland".to_string()));
    assert!(lines.contains(&"Rank: 1,520,331".to_string()));
    assert!(
        lines.contains(
            &"First team in group: https://fantasy.premierleague.com/entry/101/event/12".to_string()
        )
    );
}

#[test]
fn single_tooltip_shows_chip_and_missing_values() {
    let state = loaded_state();
    let single = tooltip_lines(&state.store.managers()[1], &state.store, 12, PROFILE);
    assert_eq!(single[0], "Dana Wells");
    assert_eq!(single[1], "Wells Fargone");
    assert!(single.contains(&"Captain: Salah".to_string()));
    assert!(single.contains(&"Chip: 3xc".to_string()));

    let sparse = tooltip_lines(&state.store.managers()[2], &state.store, 12, PROFILE);
    assert!(sparse.contains(&"Captain: N/A".to_string()));
    assert!(sparse.contains(&"Rank: N/A".to_string()));
    assert!(sparse.contains(&"Total Points: N/A".to_string()));
    assert!(!sparse.iter().any(|line| line.starts_with("Chip:")));
}

#[test]
fn chart_cache_rebuilds_only_on_change() {
    let mut state = loaded_state();
    let mut cache = ChartCache::default();
    let device = DeviceClass::Pointer;

    cache.get(&state.store, ChartView::Projection, Projection::Tsne, device);
    cache.get(&state.store, ChartView::Projection, Projection::Tsne, device);
    assert_eq!(cache.builds(), 1);

    state.store.set_highlighted_players([17]);
    let spec = cache.get(&state.store, ChartView::Projection, Projection::Tsne, device);
    assert_eq!(spec.points[2].tier, ColorTier::OwnsHighlightedPlayer);
    assert_eq!(cache.builds(), 2);

    state.store.set_highlighted_players([17]);
    cache.get(&state.store, ChartView::Projection, Projection::Tsne, device);
    assert_eq!(cache.builds(), 2);

    let spec = cache.get(
        &state.store,
        ChartView::PointsDistribution,
        Projection::Tsne,
        device,
    );
    assert_eq!(spec.kind, ChartKind::PointsDistribution);
    assert_eq!(cache.builds(), 3);
}

#[test]
fn chart_cache_serves_the_requested_view_after_switching_back() {
    let state = loaded_state();
    let mut cache = ChartCache::default();
    let device = DeviceClass::Touch;

    let first = cache.get(&state.store, ChartView::PointsDistribution, Projection::Pca, device);
    assert_eq!(first.kind, ChartKind::PointsDistribution);
    let pca = cache.get(&state.store, ChartView::Projection, Projection::Pca, device);
    assert_eq!(pca.kind, ChartKind::Projection(Projection::Pca));
    assert_eq!(pca.points.len(), 3);
    let again = cache.get(&state.store, ChartView::Projection, Projection::Pca, device);
    assert_eq!(again.kind, ChartKind::Projection(Projection::Pca));
    assert_eq!(cache.builds(), 2);
}
