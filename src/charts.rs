use std::collections::{BTreeSet, HashMap};

use ratatui::layout::Rect;
use ratatui::style::Color;

use crate::interaction::{DeviceClass, team_profile_url};
use crate::state::{ChartView, FilterLogic, ManagerRecord, Projection};
use crate::store::Store;

pub const HIGHLIGHTED_HEX: &str = "#ffffff";
pub const OWNS_PLAYER_HEX: &str = "#3bda55";
pub const DEFAULT_HEX: &str = "#5470C6";

const TOOLTIP_GROUP_LIMIT: usize = 5;
const DISTRIBUTION_SYMBOL_SIZE: f64 = 10.0;

/// Color priority, strongest first: a highlighted manager always wins over
/// one who merely owns a highlighted player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColorTier {
    Highlighted,
    OwnsHighlightedPlayer,
    Default,
}

impl ColorTier {
    pub fn hex(self) -> &'static str {
        match self {
            ColorTier::Highlighted => HIGHLIGHTED_HEX,
            ColorTier::OwnsHighlightedPlayer => OWNS_PLAYER_HEX,
            ColorTier::Default => DEFAULT_HEX,
        }
    }

    pub fn color(self) -> Color {
        match self {
            ColorTier::Highlighted => Color::Rgb(0xff, 0xff, 0xff),
            ColorTier::OwnsHighlightedPlayer => Color::Rgb(0x3b, 0xda, 0x55),
            ColorTier::Default => Color::Rgb(0x54, 0x70, 0xc6),
        }
    }

    pub fn z(self) -> u8 {
        match self {
            ColorTier::Highlighted => 2,
            ColorTier::OwnsHighlightedPlayer => 1,
            ColorTier::Default => 0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HighlightContext<'a> {
    pub managers: &'a BTreeSet<u32>,
    pub players: &'a BTreeSet<u32>,
    pub logic: FilterLogic,
}

impl<'a> HighlightContext<'a> {
    pub fn from_store(store: &'a Store) -> Self {
        Self {
            managers: store.highlighted_managers(),
            players: store.highlighted_players(),
            logic: store.player_filter_logic(),
        }
    }
}

pub fn color_tier(record: &ManagerRecord, ctx: &HighlightContext<'_>) -> ColorTier {
    if record.has_any_team(ctx.managers) {
        ColorTier::Highlighted
    } else if record.owns_highlighted(ctx.players, ctx.logic) {
        ColorTier::OwnsHighlightedPlayer
    } else {
        ColorTier::Default
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub record: usize,
    pub x: f64,
    pub y: f64,
    pub tier: ColorTier,
    pub symbol_size: f64,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub title: Option<String>,
    pub min: f64,
    pub max: f64,
    pub visible: bool,
}

impl Axis {
    fn hidden(min: f64, max: f64) -> Self {
        Self {
            title: None,
            min,
            max,
            visible: false,
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Projection(Projection),
    PointsDistribution,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub points: Vec<ChartPoint>,
}

impl ChartSpec {
    pub fn point_for_record(&self, record: usize) -> Option<&ChartPoint> {
        self.points.iter().find(|point| point.record == record)
    }

    /// Nearest point to `(x, y)` whose distance, scaled per axis by the
    /// tolerances, is at most 1.
    pub fn nearest(&self, x: f64, y: f64, tol_x: f64, tol_y: f64) -> Option<&ChartPoint> {
        if tol_x <= 0.0 || tol_y <= 0.0 {
            return None;
        }
        self.points
            .iter()
            .map(|point| {
                let dx = (point.x - x) / tol_x;
                let dy = (point.y - y) / tol_y;
                (point, dx * dx + dy * dy)
            })
            .filter(|(_, dist)| *dist <= 1.0)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(point, _)| point)
    }

    pub fn view_bounds(&self) -> ([f64; 2], [f64; 2]) {
        let x = [self.x_axis.min, self.x_axis.max];
        let y = [self.y_axis.min, self.y_axis.max];
        if !self.x_axis.visible {
            return (x, y);
        }
        let x_pad = (self.x_axis.span() * 0.02).max(1.0);
        let y_pad = (self.y_axis.span() * 0.08).max(1.0);
        ([x[0] - x_pad, x[1] + x_pad], [y[0] - y_pad, y[1] + 0.5])
    }

    pub fn paint_order(&self) -> Vec<&ChartPoint> {
        let mut ordered: Vec<&ChartPoint> = self.points.iter().collect();
        ordered.sort_by_key(|point| point.tier.z());
        ordered
    }
}

pub fn projection_symbol_size(manager_count: u32, device: DeviceClass, highlighted: bool) -> f64 {
    let base = if device.is_touch() { 6.0 } else { 12.0 };
    let size = base + f64::from(manager_count) * 1.5;
    if highlighted { size + 2.0 } else { size }
}

pub fn projection_chart(
    managers: &[ManagerRecord],
    ctx: &HighlightContext<'_>,
    projection: Projection,
    device: DeviceClass,
) -> ChartSpec {
    let points = managers
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let (x, y) = record.coords(projection);
            let tier = color_tier(record, ctx);
            let highlighted = tier == ColorTier::Highlighted;
            let label = highlighted.then(|| {
                if record.is_group() {
                    format!("Group of {}", record.manager_count)
                } else {
                    record.display_name()
                }
            });
            ChartPoint {
                record: idx,
                x,
                y,
                tier,
                symbol_size: projection_symbol_size(record.manager_count, device, highlighted),
                label,
            }
        })
        .collect::<Vec<_>>();

    let (x_min, x_max) = padded_extent(points.iter().map(|p| p.x));
    let (y_min, y_max) = padded_extent(points.iter().map(|p| p.y));

    ChartSpec {
        kind: ChartKind::Projection(projection),
        title: "Manager Similarity".to_string(),
        x_axis: Axis::hidden(x_min, x_max),
        y_axis: Axis::hidden(y_min, y_max),
        points,
    }
}

/// Manual bee-swarm: one column per distinct gameweek score, entries stacked
/// at y = 0, 1, 2, ... in dataset order.
pub fn points_distribution_chart(
    managers: &[ManagerRecord],
    ctx: &HighlightContext<'_>,
    gameweek: u32,
) -> ChartSpec {
    let mut bucket_sizes: HashMap<i64, usize> = HashMap::new();
    let mut points = Vec::with_capacity(managers.len());
    let mut min_points = i64::MAX;
    let mut max_points = i64::MIN;

    for (idx, record) in managers.iter().enumerate() {
        let score = record.gw_points;
        min_points = min_points.min(score);
        max_points = max_points.max(score);
        let slot = bucket_sizes.entry(score).or_insert(0);
        points.push(ChartPoint {
            record: idx,
            x: score as f64,
            y: *slot as f64,
            tier: color_tier(record, ctx),
            symbol_size: DISTRIBUTION_SYMBOL_SIZE,
            label: None,
        });
        *slot += 1;
    }

    let max_count = bucket_sizes.values().copied().max().unwrap_or(0);
    let (x_min, x_max) = if points.is_empty() {
        (0.0, 5.0)
    } else {
        (
            (min_points as f64 / 5.0).floor() * 5.0,
            (max_points as f64 / 5.0).ceil() * 5.0,
        )
    };

    ChartSpec {
        kind: ChartKind::PointsDistribution,
        title: format!("Gameweek {gameweek} Points Distribution"),
        x_axis: Axis {
            title: Some("Gameweek Points".to_string()),
            min: x_min,
            max: x_max,
            visible: true,
        },
        y_axis: Axis {
            title: Some("Count".to_string()),
            min: 0.0,
            max: max_count as f64,
            visible: true,
        },
        points,
    }
}

fn padded_extent(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() {
        return (-1.0, 1.0);
    }
    let span = max - min;
    if span <= f64::EPSILON {
        return (min - 1.0, max + 1.0);
    }
    let pad = span * 0.05;
    (min - pad, max + pad)
}

pub fn format_number(value: Option<i64>) -> String {
    let Some(value) = value else {
        return "N/A".to_string();
    };
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn tooltip_lines(
    record: &ManagerRecord,
    store: &Store,
    gameweek: u32,
    profile_base_url: &str,
) -> Vec<String> {
    let mut lines = Vec::with_capacity(12);
    if record.is_group() {
        lines.push(format!("Group of {} managers", record.manager_count));
        for (idx, name) in record
            .manager_names
            .iter()
            .take(TOOLTIP_GROUP_LIMIT)
            .enumerate()
        {
            let team = record.team_names.get(idx).map(String::as_str).unwrap_or("");
            lines.push(format!("  {name} ({team})"));
        }
        let count = record.manager_count as usize;
        if count > TOOLTIP_GROUP_LIMIT {
            lines.push(format!("  ...and {} more", count - TOOLTIP_GROUP_LIMIT));
        }
    } else {
        lines.push(record.display_name());
        lines.push(record.team_names.first().cloned().unwrap_or_default());
    }

    let captain = record
        .captain
        .map(|id| store.name_from_id(id))
        .filter(|name| !name.is_empty())
        .unwrap_or("N/A");
    lines.push(format!("Captain: {captain}"));
    if let Some(chip) = &record.active_chip {
        lines.push(format!("Chip: {chip}"));
    }
    lines.push(format!("Rank: {}", format_number(record.rank)));
    lines.push(format!("Total Points: {}", format_number(record.total_points)));
    lines.push(format!("GW Points: {}", format_number(Some(record.gw_points))));
    lines.push(format!("GW Rank: {}", format_number(record.gw_rank)));
    if let Some(team_id) = record.first_team_id() {
        let label = if record.is_group() {
            "First team in group"
        } else {
            "Team page"
        };
        lines.push(format!(
            "{label}: {}",
            team_profile_url(profile_base_url, team_id, gameweek)
        ));
    }
    lines
}

/// Maps a terminal cell inside `plot` to chart coordinates (cell centers).
pub fn cell_to_data(
    plot: Rect,
    column: u16,
    row: u16,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
) -> Option<(f64, f64)> {
    if plot.width == 0 || plot.height == 0 {
        return None;
    }
    if column < plot.x
        || column >= plot.x + plot.width
        || row < plot.y
        || row >= plot.y + plot.height
    {
        return None;
    }
    let fx = (f64::from(column - plot.x) + 0.5) / f64::from(plot.width);
    let fy = (f64::from(row - plot.y) + 0.5) / f64::from(plot.height);
    let x = x_bounds[0] + fx * (x_bounds[1] - x_bounds[0]);
    // Terminal rows grow downward; chart y grows upward.
    let y = y_bounds[1] - fy * (y_bounds[1] - y_bounds[0]);
    Some((x, y))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CacheKey {
    revision: u64,
    view: ChartView,
    projection: Projection,
    device: DeviceClass,
}

#[derive(Debug, Default)]
pub struct ChartCache {
    key: Option<CacheKey>,
    spec: Option<ChartSpec>,
    builds: u64,
}

impl ChartCache {
    pub fn get(
        &mut self,
        store: &Store,
        view: ChartView,
        projection: Projection,
        device: DeviceClass,
    ) -> &ChartSpec {
        let key = CacheKey {
            revision: store.revision(),
            view,
            projection,
            device,
        };
        let fresh = self.key == Some(key);
        if !(fresh && self.spec.is_some()) {
            let ctx = HighlightContext::from_store(store);
            let spec = match view {
                ChartView::Projection => {
                    projection_chart(store.managers(), &ctx, projection, device)
                }
                ChartView::PointsDistribution => points_distribution_chart(
                    store.managers(),
                    &ctx,
                    store.current_gameweek(),
                ),
            };
            self.key = Some(key);
            self.builds += 1;
            self.spec = Some(spec);
        }
        self.spec.as_ref().expect("chart spec populated above")
    }

    pub fn builds(&self) -> u64 {
        self.builds
    }
}
