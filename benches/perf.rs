use std::collections::BTreeSet;

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use fpl_similarity::charts::{
    HighlightContext, points_distribution_chart, projection_chart,
};
use fpl_similarity::data_fetch::parse_manager_data_json;
use fpl_similarity::interaction::DeviceClass;
use fpl_similarity::pickers::filter_players;
use fpl_similarity::state::{FilterLogic, ManagerRecord, PlayerRecord, Projection};

const MANAGERS: usize = 10_000;

fn synthetic_managers(count: usize) -> Vec<ManagerRecord> {
    (0..count)
        .map(|i| {
            let group = 1 + (i % 4) as u32;
            let base = (i as u32) * 4;
            let t = i as f64;
            ManagerRecord {
                manager_names: (0..group).map(|g| format!("Manager {i}-{g}")).collect(),
                team_names: (0..group).map(|g| format!("Team {i}-{g}")).collect(),
                team_ids: (0..group).map(|g| base + g).collect(),
                manager_count: group,
                captain: Some((i % 600) as u32),
                gw_points: 20 + (i % 90) as i64,
                rank: Some(i as i64 * 37),
                players_owned: (0..15).map(|p| ((i * 7 + p * 13) % 600) as u32).collect(),
                tsne: ((t * 0.37).sin() * 50.0, (t * 0.11).cos() * 50.0),
                pca: ((t * 0.05).sin(), (t * 0.07).cos()),
                ..Default::default()
            }
        })
        .collect()
}

fn synthetic_manager_json(count: usize) -> String {
    let records = (0..count)
        .map(|i| {
            format!(
                r#"{{"manager_names":["M{i}"],"team_names":["T{i}"],"team_ids":[{i}],"manager_count":1,"captain":{c},"total_points":{tp}.0,"rank":{i},"gw_points":{gw},"gw_rank":null,"players_owned":[1,2,3,{c}],"tsne_x":{x},"tsne_y":{y},"pca_x":0.1,"pca_y":-0.2}}"#,
                c = i % 600,
                tp = 400 + i % 500,
                gw = i % 110,
                x = (i as f64 * 0.3).sin(),
                y = (i as f64 * 0.3).cos(),
            )
        })
        .collect::<Vec<_>>();
    format!("[{}]", records.join(","))
}

fn bench_projection_chart(c: &mut Criterion) {
    let managers = synthetic_managers(MANAGERS);
    let highlighted: BTreeSet<u32> = (0..200).map(|i| i * 40).collect();
    let players: BTreeSet<u32> = [13, 26, 39].into_iter().collect();
    let ctx = HighlightContext {
        managers: &highlighted,
        players: &players,
        logic: FilterLogic::And,
    };
    c.bench_function("projection_chart_10k", |b| {
        b.iter(|| {
            let spec = projection_chart(
                black_box(&managers),
                &ctx,
                Projection::Tsne,
                DeviceClass::Pointer,
            );
            black_box(spec.points.len());
        })
    });
}

fn bench_points_distribution(c: &mut Criterion) {
    let managers = synthetic_managers(MANAGERS);
    let none = BTreeSet::new();
    let ctx = HighlightContext {
        managers: &none,
        players: &none,
        logic: FilterLogic::Or,
    };
    c.bench_function("points_distribution_10k", |b| {
        b.iter(|| {
            let spec = points_distribution_chart(black_box(&managers), &ctx, 12);
            black_box(spec.y_axis.max);
        })
    });
}

fn bench_manager_parse(c: &mut Criterion) {
    let raw = synthetic_manager_json(MANAGERS);
    c.bench_function("manager_json_parse_10k", |b| {
        b.iter(|| {
            let records = parse_manager_data_json(black_box(&raw)).expect("valid json");
            black_box(records.len());
        })
    });
}

fn bench_player_search(c: &mut Criterion) {
    let players = (0..700)
        .map(|i| PlayerRecord {
            id: i,
            web_name: format!("Player{i}"),
            now_cost: 4.0 + f64::from(i % 110) / 10.0,
        })
        .collect::<Vec<_>>();
    c.bench_function("player_search", |b| {
        b.iter(|| {
            let hits = filter_players(black_box(&players), "er1");
            black_box(hits.len());
        })
    });
}

criterion_group!(
    benches,
    bench_projection_chart,
    bench_points_distribution,
    bench_manager_parse,
    bench_player_search
);
criterion_main!(benches);
