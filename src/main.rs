use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Circle, Points};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use fpl_similarity::charts::{
    ChartCache, ChartKind, ChartSpec, ColorTier, cell_to_data, tooltip_lines,
};
use fpl_similarity::config::AppConfig;
use fpl_similarity::data_fetch::ArtifactSource;
use fpl_similarity::http_cache::HttpCache;
use fpl_similarity::interaction::{DeviceClass, click_action, perform_click};
use fpl_similarity::logging::init_logging;
use fpl_similarity::persist;
use fpl_similarity::pickers::{PickerKind, PickerPanel};
use fpl_similarity::provider::spawn_provider;
use fpl_similarity::state::{
    AppState, ChartView, Delta, Focus, ProviderCommand, apply_delta, filter_logic_label,
    projection_label, view_label,
};

const CURSOR_COLOR: Color = Color::Rgb(0xff, 0xfb, 0x00);
/// Rough pixel width of one terminal cell, used to scale symbol sizes.
const PIXELS_PER_CELL: f64 = 8.0;

struct App {
    state: AppState,
    config: AppConfig,
    device: DeviceClass,
    pickers: PickerPanel,
    charts: ChartCache,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
    chart_area: Rect,
}

impl App {
    fn new(config: AppConfig, cmd_tx: Option<mpsc::Sender<ProviderCommand>>) -> Self {
        let mut state = AppState::new();
        if persist::load_into_state(&mut state) {
            state.push_log("[INFO] Restored preferences");
        }
        if let Some(id) = config.default_league_id {
            state.preferred_league = Some(id);
        }
        let device = DeviceClass::from_touch_flag(config.touch_primary);
        let mut app = Self {
            state,
            config,
            device,
            pickers: PickerPanel::new(),
            charts: ChartCache::default(),
            should_quit: false,
            cmd_tx,
            chart_area: Rect::default(),
        };
        app.dispatch_commands();
        app
    }

    fn dispatch_commands(&mut self) {
        for cmd in self.state.store.take_commands() {
            let result = match &self.cmd_tx {
                Some(tx) => tx.send(cmd).map_err(|err| err.0),
                None => Err(cmd),
            };
            if let Err(cmd) = result {
                self.state.store.set_loading(false);
                self.state
                    .push_log(format!("[WARN] Fetch unavailable: {cmd:?}"));
            }
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.pickers.is_searching() {
            self.on_search_key(key);
            return;
        }
        if self.state.help_overlay {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
                self.state.help_overlay = false;
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Char('?') => self.state.help_overlay = true,
            KeyCode::Tab => {
                self.state.cycle_focus_next();
                self.sync_picker_focus();
            }
            KeyCode::BackTab => {
                self.state.cycle_focus_prev();
                self.sync_picker_focus();
            }
            KeyCode::Char('v') => self.state.toggle_view(),
            KeyCode::Char('p') => {
                self.state.toggle_projection();
                let label = projection_label(self.state.projection);
                self.state.push_log(format!("[INFO] Projection: {label}"));
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.step_gameweek(1),
            KeyCode::Char('-') => self.step_gameweek(-1),
            KeyCode::Char('l') => self.next_league(),
            KeyCode::Char('c') => {
                if self.state.store.clear_highlights() {
                    self.state.push_log("[INFO] Cleared highlights");
                }
            }
            _ => match self.state.focus {
                Focus::Chart => self.on_chart_key(key),
                _ => self.on_picker_key(key),
            },
        }
        self.dispatch_commands();
    }

    fn on_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.pickers.end_search(),
            KeyCode::Backspace => self.pickers.pop_search_char(&self.state.store),
            KeyCode::Char(ch) => self.pickers.push_search_char(ch, &self.state.store),
            _ => {}
        }
    }

    fn on_chart_key(&mut self, key: KeyEvent) {
        let total = self.state.store.managers().len();
        match key.code {
            KeyCode::Char(']') | KeyCode::Char('j') | KeyCode::Right | KeyCode::Down => {
                self.state.select_next_point(total)
            }
            KeyCode::Char('[') | KeyCode::Char('k') | KeyCode::Left | KeyCode::Up => {
                self.state.select_prev_point(total)
            }
            KeyCode::Enter => {
                if let Some(idx) = self.state.point_cursor {
                    self.click_record(idx, self.device);
                }
            }
            KeyCode::Char('h') => {
                if let Some(idx) = self.state.point_cursor {
                    self.click_record(idx, DeviceClass::Touch);
                }
            }
            KeyCode::Esc => self.state.point_cursor = None,
            _ => {}
        }
    }

    fn on_picker_key(&mut self, key: KeyEvent) {
        let store = &mut self.state.store;
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.pickers.move_cursor(store, 1),
            KeyCode::Char('k') | KeyCode::Up => self.pickers.move_cursor(store, -1),
            KeyCode::PageDown => self.pickers.move_cursor(store, 10),
            KeyCode::PageUp => self.pickers.move_cursor(store, -10),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let kind = self.pickers.active_kind();
                if self.pickers.picker(kind).read_only(store) {
                    self.state.push_log("[INFO] Busy loading, selection locked");
                } else {
                    self.pickers.activate_cursor(store);
                }
            }
            KeyCode::Char('/') => {
                self.pickers.begin_search();
            }
            KeyCode::Char('f') => {
                if self.pickers.toggle_secondary(store) {
                    let logic = store.player_filter_logic();
                    self.state
                        .push_log(format!("[INFO] Player filter: {}", filter_logic_label(logic)));
                }
            }
            _ => {}
        }
    }

    fn sync_picker_focus(&mut self) {
        let kind = match self.state.focus {
            Focus::Chart => return,
            Focus::League => PickerKind::League,
            Focus::Gameweek => PickerKind::Gameweek,
            Focus::Manager => PickerKind::Manager,
            Focus::Player => PickerKind::Player,
        };
        self.pickers.focus(kind, &self.state.store);
    }

    fn step_gameweek(&mut self, delta: i64) {
        let store = &mut self.state.store;
        if self.pickers.picker(PickerKind::Gameweek).read_only(store) {
            self.state.push_log("[INFO] Busy loading, gameweek locked");
            return;
        }
        let next = i64::from(store.current_gameweek()) + delta;
        store.set_current_gameweek(next);
    }

    fn next_league(&mut self) {
        let store = &mut self.state.store;
        if self.pickers.picker(PickerKind::League).read_only(store) {
            self.state.push_log("[INFO] Busy loading, league locked");
            return;
        }
        let leagues = store.leagues();
        if leagues.is_empty() {
            return;
        }
        let current = store
            .current_league()
            .and_then(|league| leagues.iter().position(|l| l.id == league.id));
        let next = current.map(|idx| (idx + 1) % leagues.len()).unwrap_or(0);
        let league = leagues[next].clone();
        store.set_current_league(league);
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let area = self.chart_area;
        let spec = self.charts.get(
            &self.state.store,
            self.state.view,
            self.state.projection,
            self.device,
        );
        let (x_bounds, y_bounds) = spec.view_bounds();
        let Some((x, y)) = cell_to_data(area, mouse.column, mouse.row, x_bounds, y_bounds) else {
            return;
        };
        // One and a half cells in either direction counts as a hit.
        let tol_x = (x_bounds[1] - x_bounds[0]) / f64::from(area.width.max(1)) * 1.5;
        let tol_y = (y_bounds[1] - y_bounds[0]) / f64::from(area.height.max(1)) * 1.5;
        let Some(record) = spec.nearest(x, y, tol_x, tol_y).map(|point| point.record) else {
            return;
        };
        self.state.focus = Focus::Chart;
        self.state.point_cursor = Some(record);
        self.click_record(record, self.device);
        self.dispatch_commands();
    }

    fn click_record(&mut self, idx: usize, device: DeviceClass) {
        let store = &self.state.store;
        let Some(record) = store.managers().get(idx) else {
            return;
        };
        let action = click_action(
            record,
            store.current_gameweek(),
            device,
            &self.config.profile_base_url,
        );
        if let Some(line) = perform_click(&mut self.state.store, action) {
            self.state.push_log(line);
        }
    }
}

fn main() -> io::Result<()> {
    let config = AppConfig::load();
    let file_logging = match init_logging(config.log_path.as_deref()) {
        Ok(enabled) => enabled,
        Err(err) => {
            eprintln!("warning: {err:#}");
            false
        }
    };
    tracing::info!(file_logging, source = ?config.source, "starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let source = ArtifactSource::from_config(&config, HttpCache::open_default());
    spawn_provider(source, tx, cmd_rx);

    let mut app = App::new(config, Some(cmd_tx));
    let res = run_app(&mut terminal, &mut app, rx);

    if let Err(err) = persist::save_from_state(&app.state) {
        tracing::warn!("saving preferences failed: {err:#}");
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = app.config.tick_rate;
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }
        // League/gameweek writes made while applying results may queue fetches.
        app.dispatch_commands();

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.on_key(key),
                Event::Mouse(mouse) => app.on_mouse(mouse),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(5),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_line(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(34),
            Constraint::Min(30),
            Constraint::Length(40),
        ])
        .split(chunks[1]);

    render_pickers(frame, body[0], app);
    render_chart(frame, body[1], app);
    render_details(frame, body[2], app);

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(app))
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_line(state: &AppState) -> Line<'static> {
    let store = &state.store;
    let league = store
        .current_league()
        .map(|league| league.name.clone())
        .unwrap_or_else(|| "-".to_string());
    let gameweek = match store.current_gameweek() {
        0 => "-".to_string(),
        gw => format!("{gw}/{}", store.max_gameweek()),
    };
    let mut spans = vec![
        Span::styled("FPL SIMILARITY", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!(
            " | {league} | GW {gameweek} | {} | {}",
            view_label(state.view),
            projection_label(state.projection)
        )),
    ];
    if store.is_loading() {
        spans.push(Span::styled(
            format!(" | LOADING ({})", store.loading_count()),
            Style::default().fg(Color::Yellow),
        ));
    }
    if let Some(error) = store.last_error() {
        spans.push(Span::styled(
            format!(" | ERROR: {error}"),
            Style::default().fg(Color::Red),
        ));
    }
    Line::from(spans)
}

fn footer_text(app: &App) -> String {
    if app.pickers.is_searching() {
        return "Type to search | Backspace delete | Enter/Esc done".to_string();
    }
    let focus = match app.state.focus {
        Focus::Chart => "[ ] point  Enter open  h highlight  Esc deselect",
        Focus::Manager => "j/k move  Enter toggle  / search",
        Focus::Player => "j/k move  Enter toggle  / search  f AND/OR",
        Focus::League | Focus::Gameweek => "j/k move  Enter select",
    };
    format!("{focus} | Tab focus  v view  p projection  +/- GW  l league  c clear  ? help  q quit")
}

fn render_pickers(frame: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Min(6),
            Constraint::Min(6),
        ])
        .split(area);

    let kinds = [
        (PickerKind::League, Focus::League),
        (PickerKind::Gameweek, Focus::Gameweek),
        (PickerKind::Manager, Focus::Manager),
        (PickerKind::Player, Focus::Player),
    ];
    for ((kind, focus), rect) in kinds.into_iter().zip(rows.iter()) {
        render_picker(frame, *rect, app, kind, app.state.focus == focus);
    }
}

fn render_picker(frame: &mut Frame, area: Rect, app: &App, kind: PickerKind, active: bool) {
    let store = &app.state.store;
    let picker = app.pickers.picker(kind);
    let mut title = picker.title().to_string();
    if picker.read_only(store) {
        title.push_str(" (locked)");
    }
    let border_style = if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner_height = area.height.saturating_sub(2) as usize;

    let mut lines = vec![Line::from(Span::styled(
        picker.summary(store),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if let Some(query) = picker.search() {
        let editing = active && app.pickers.is_searching();
        if editing || !query.is_empty() {
            let cursor = if editing { "_" } else { "" };
            lines.push(Line::from(format!("/{query}{cursor}")));
        }
    }

    let options = picker.options(store);
    let visible = inner_height.saturating_sub(lines.len());
    let cursor = app
        .pickers
        .cursor(kind)
        .min(options.len().saturating_sub(1));
    let (start, end) = visible_range(cursor, options.len(), visible);
    for (idx, option) in options[start..end].iter().enumerate() {
        let mark = match (picker.multi_select(), option.selected) {
            (true, true) => "[x]",
            (true, false) => "[ ]",
            (false, true) => "(*)",
            (false, false) => "( )",
        };
        let style = if active && start + idx == cursor {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!("{mark} {}", option.label),
            style,
        )));
    }
    if options.is_empty() {
        lines.push(Line::from(Span::styled(
            "no options",
            Style::default().fg(Color::DarkGray),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_chart(frame: &mut Frame, area: Rect, app: &mut App) {
    let border_style = if app.state.focus == Focus::Chart {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let spec = app.charts.get(
        &app.state.store,
        app.state.view,
        app.state.projection,
        app.device,
    );
    let block = Block::default()
        .title(spec.title.clone())
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    app.chart_area = inner;

    let (x_bounds, y_bounds) = spec.view_bounds();
    let cell_w = (x_bounds[1] - x_bounds[0]) / f64::from(inner.width.max(1));
    let cursor = app
        .state
        .point_cursor
        .and_then(|idx| spec.point_for_record(idx))
        .cloned();
    let ticks = axis_ticks(spec);

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            for tier in [
                ColorTier::Default,
                ColorTier::OwnsHighlightedPlayer,
                ColorTier::Highlighted,
            ] {
                let coords = spec
                    .points
                    .iter()
                    .filter(|point| point.tier == tier)
                    .map(|point| (point.x, point.y))
                    .collect::<Vec<_>>();
                ctx.draw(&Points {
                    coords: &coords,
                    color: tier.color(),
                });
                ctx.layer();
            }
            for point in spec.paint_order() {
                // Large symbols (groups, highlights) get an outline sized to them.
                let radius = point.symbol_size / PIXELS_PER_CELL / 2.0 * cell_w;
                if point.symbol_size > 14.0 && radius > 0.0 {
                    ctx.draw(&Circle {
                        x: point.x,
                        y: point.y,
                        radius,
                        color: point.tier.color(),
                    });
                }
            }
            if let Some(point) = &cursor {
                ctx.draw(&Circle {
                    x: point.x,
                    y: point.y,
                    radius: cell_w * 1.5,
                    color: CURSOR_COLOR,
                });
            }
            ctx.layer();
            for point in spec.points.iter().filter(|point| point.label.is_some()) {
                if let Some(label) = &point.label {
                    ctx.print(
                        point.x,
                        point.y,
                        Span::styled(label.clone(), Style::default().fg(point.tier.color())),
                    );
                }
            }
            for (x, label) in &ticks {
                ctx.print(
                    *x,
                    y_bounds[0],
                    Span::styled(label.clone(), Style::default().fg(Color::DarkGray)),
                );
            }
        });
    frame.render_widget(canvas, area);
}

fn axis_ticks(spec: &ChartSpec) -> Vec<(f64, String)> {
    if spec.kind != ChartKind::PointsDistribution || !spec.x_axis.visible {
        return Vec::new();
    }
    let span = spec.x_axis.span().max(5.0);
    let step = ((span / 5.0 / 8.0).ceil() * 5.0).max(5.0);
    let mut ticks = Vec::new();
    let mut x = spec.x_axis.min;
    while x <= spec.x_axis.max + f64::EPSILON {
        ticks.push((x, format!("{x:.0}")));
        x += step;
    }
    ticks
}

fn render_details(frame: &mut Frame, area: Rect, app: &App) {
    let store = &app.state.store;
    let mut lines: Vec<Line> = Vec::new();
    match app.state.point_cursor.and_then(|idx| store.managers().get(idx)) {
        Some(record) => {
            for line in tooltip_lines(
                record,
                store,
                store.current_gameweek(),
                &app.config.profile_base_url,
            ) {
                lines.push(Line::from(line));
            }
        }
        None => {
            lines.push(Line::from("No point selected."));
            lines.push(Line::from("Use [ ] on the chart or click a point."));
        }
    }

    lines.push(Line::from(""));
    let highlighted = store
        .managers()
        .iter()
        .filter(|record| record.has_any_team(store.highlighted_managers()))
        .count();
    lines.push(Line::from(Span::styled(
        format!("Points: {}  Highlighted: {highlighted}", store.managers().len()),
        Style::default().fg(Color::DarkGray),
    )));
    if app.state.view == ChartView::PointsDistribution {
        lines.push(Line::from(Span::styled(
            "x: Gameweek Points  y: Count",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for tier in [
        ColorTier::Highlighted,
        ColorTier::OwnsHighlightedPlayer,
        ColorTier::Default,
    ] {
        let label = match tier {
            ColorTier::Highlighted => "highlighted manager",
            ColorTier::OwnsHighlightedPlayer => "owns highlighted player",
            ColorTier::Default => "other",
        };
        lines.push(Line::from(vec![
            Span::styled("● ", Style::default().fg(tier.color())),
            Span::raw(label),
        ]));
    }

    let details = Paragraph::new(lines)
        .block(Block::default().title("Details").borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    frame.render_widget(details, area);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "FPL Similarity - Help",
        "",
        "Global:",
        "  Tab / S-Tab  Cycle focus",
        "  v            Similarity / GW points view",
        "  p            t-SNE / PCA projection",
        "  + / -        Next / previous gameweek",
        "  l            Next league",
        "  c            Clear highlights",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Chart:",
        "  [ / ]        Previous / next point",
        "  Enter        Click point (open team page, or toggle on touch)",
        "  h            Toggle highlight of point",
        "  mouse        Click a point",
        "",
        "Pickers:",
        "  j/k or ↑/↓   Move",
        "  Enter/Space  Select / toggle",
        "  /            Search",
        "  f            Player filter AND / OR",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
