// services/tui-dash/src/main.rs
//
// TUI Dashboard for the admin panel
// Terminal view of the simulated live-metric panels, notifications and orders
//
// Run with: cargo run --bin tui-dash -- --demo

use std::io::stdout;
use std::time::{Duration, Instant};

use adminkit::sim::PanelSnapshot;
use adminkit::table::{self, Column, TableRow, Tone};
use adminkit::types::NotificationKind;
use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{prelude::*, widgets::*};

mod api;
mod mock;
mod state;

use api::ApiClient;
use mock::MockDataGenerator;
use state::DashboardState;

#[derive(Parser, Debug)]
#[command(name = "tui-dash")]
#[command(about = "Terminal UI Dashboard for the admin-panel simulation")]
#[command(version = "0.1.0")]
struct Args {
    /// Run in demo mode with a local simulation (no admin-api required)
    #[arg(long, short)]
    demo: bool,

    /// admin-api endpoint
    #[arg(long, default_value = "http://localhost:8080")]
    api_url: String,

    /// Refresh interval in milliseconds
    #[arg(long, default_value = "100")]
    refresh_ms: u64,
}

// Color palette: Indigo, White, Slate, Amber
mod colors {
    use ratatui::style::Color;

    pub const INDIGO: Color = Color::Rgb(99, 102, 241);
    pub const DARK_INDIGO: Color = Color::Rgb(49, 46, 129);
    pub const WHITE: Color = Color::Rgb(241, 245, 249);
    pub const SLATE: Color = Color::Rgb(148, 163, 184);
    pub const AMBER: Color = Color::Rgb(245, 158, 11);
    pub const CYAN: Color = Color::Rgb(6, 182, 212);
    pub const BG_DARK: Color = Color::Rgb(15, 23, 42);
    pub const BG_PANEL: Color = Color::Rgb(30, 41, 59);
    pub const SUCCESS: Color = Color::Rgb(34, 197, 94);
    pub const ERROR: Color = Color::Rgb(239, 68, 68);
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    // Run app
    let result = run_app(&mut terminal, args);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, args: Args) -> Result<()> {
    let tick_rate = Duration::from_millis(args.refresh_ms.max(1));
    let mut state = DashboardState::new();
    let mut mock_gen = MockDataGenerator::new(tick_rate);
    let mut api_client = if !args.demo {
        Some(ApiClient::new(&args.api_url))
    } else {
        None
    };

    let mut last_tick = Instant::now();

    if args.demo {
        state.add_log("INFO", "TUI Dashboard started in DEMO mode");
    } else {
        state.add_log("INFO", &format!("TUI Dashboard started - connecting to {}", args.api_url));
    }

    loop {
        terminal.draw(|frame| draw_ui(frame, &state, args.demo, api_client.as_ref()))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char(' ') => state.toggle_pause(),
                        KeyCode::Char('r') => {
                            state.reset();
                            mock_gen = MockDataGenerator::new(tick_rate);
                        }
                        KeyCode::Up => state.select_prev(),
                        KeyCode::Down => state.select_next(),
                        KeyCode::Enter => match api_client.as_mut() {
                            Some(client) => client.toggle_mount(&mut state),
                            None => mock_gen.toggle_mount(&mut state),
                        },
                        KeyCode::Char('a') => match api_client.as_mut() {
                            Some(client) => client.trigger(&mut state),
                            None => mock_gen.trigger(&mut state),
                        },
                        KeyCode::Char('m') => match api_client.as_mut() {
                            Some(client) => client.mark_all_read(&mut state),
                            None => mock_gen.mark_all_read(&mut state),
                        },
                        _ => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            if args.demo {
                mock_gen.update(&mut state);
            } else if let Some(ref mut client) = api_client {
                if !state.is_paused {
                    client.fetch_status(&mut state);
                }
            }
            last_tick = Instant::now();
        }
    }
}

fn draw_ui(frame: &mut Frame, state: &DashboardState, demo_mode: bool, api_client: Option<&ApiClient>) {
    let area = frame.area();

    frame.render_widget(
        Block::default().style(Style::default().bg(colors::BG_DARK)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Length(5),  // Stats
            Constraint::Min(12),    // Panels + detail + feed
            Constraint::Length(9),  // Orders
            Constraint::Length(3),  // Footer
        ])
        .split(area);

    draw_header(frame, chunks[0], state, demo_mode, api_client);
    draw_stats_panel(frame, chunks[1], state);
    draw_main_content(frame, chunks[2], state);
    draw_orders_panel(frame, chunks[3], state);
    draw_footer(frame, chunks[4]);
}

fn draw_header(frame: &mut Frame, area: Rect, state: &DashboardState, demo_mode: bool, api_client: Option<&ApiClient>) {
    let (status_indicator, status_color) = if state.is_paused {
        ("[PAUSED]", colors::AMBER)
    } else {
        ("[RUNNING]", colors::SUCCESS)
    };

    let (mode_text, mode_color) = if demo_mode {
        ("DEMO", colors::AMBER)
    } else if let Some(client) = api_client {
        if client.is_connected() {
            ("LIVE", colors::SUCCESS)
        } else {
            ("DISCONNECTED", colors::ERROR)
        }
    } else {
        ("LIVE", colors::SLATE)
    };

    let mut spans = vec![
        Span::styled(
            " ADMIN PANEL ",
            Style::default().fg(colors::WHITE).bg(colors::DARK_INDIGO).bold(),
        ),
        Span::raw("  "),
        Span::styled("LIVE METRICS", Style::default().fg(colors::INDIGO).bold()),
        Span::raw("  "),
        Span::styled(format!("[{}]", mode_text), Style::default().fg(mode_color).bold()),
        Span::raw("  "),
        Span::styled(status_indicator, Style::default().fg(status_color).bold()),
        Span::raw("  "),
        Span::styled(&state.elapsed_display, Style::default().fg(colors::SLATE)),
    ];
    if let Some(err) = api_client.and_then(ApiClient::last_error) {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(err.to_string(), Style::default().fg(colors::ERROR)));
    }

    let header = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(colors::DARK_INDIGO))
                .style(Style::default().bg(colors::BG_DARK)),
        );

    frame.render_widget(header, area);
}

fn draw_stats_panel(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    draw_stat_box(
        frame,
        chunks[0],
        "MOUNTED PANELS",
        &format!("{}/{}", state.mounted_count(), state.panels.len()),
        colors::CYAN,
    );
    draw_stat_box(
        frame,
        chunks[1],
        "UNREAD",
        &state.notifications.unread_count.to_string(),
        if state.notifications.unread_count > 0 { colors::AMBER } else { colors::SLATE },
    );
    draw_stat_box(
        frame,
        chunks[2],
        "REVENUE",
        &format!("${}", format_number(state.total_revenue as u64)),
        colors::SUCCESS,
    );
    draw_stat_box(
        frame,
        chunks[3],
        "OPEN ORDERS",
        &state.open_orders().to_string(),
        colors::WHITE,
    );
}

fn draw_stat_box(frame: &mut Frame, area: Rect, label: &str, value: &str, value_color: Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::SLATE))
        .border_type(BorderType::Rounded)
        .style(Style::default().bg(colors::BG_PANEL));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = vec![
        Line::from(Span::styled(
            label,
            Style::default().fg(colors::SLATE).add_modifier(Modifier::DIM),
        )),
        Line::from(Span::styled(value, Style::default().fg(value_color).bold())),
    ];

    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
}

fn draw_main_content(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(28),
            Constraint::Percentage(42),
            Constraint::Percentage(30),
        ])
        .split(area);

    draw_panel_list(frame, chunks[0], state);
    match state.selected_panel() {
        Some(panel) => draw_panel_detail(frame, chunks[1], panel),
        None => frame.render_widget(panel_block(" PANEL "), chunks[1]),
    }

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);
    draw_notifications_panel(frame, right[0], state);
    draw_activity_panel(frame, right[1], state);
}

fn panel_block(title: &str) -> Block<'_> {
    Block::default()
        .title(Span::styled(title, Style::default().fg(colors::WHITE).bold()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::SLATE))
        .border_type(BorderType::Rounded)
        .style(Style::default().bg(colors::BG_PANEL))
}

fn draw_panel_list(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let rows: Vec<Row> = state
        .panels
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let (marker, marker_style) = if p.pending {
                ("RUN", Style::default().fg(colors::AMBER))
            } else if p.mounted {
                ("ON", Style::default().fg(colors::SUCCESS))
            } else {
                ("off", Style::default().fg(colors::SLATE))
            };
            let name_style = if i == state.selected {
                Style::default().fg(colors::BG_DARK).bg(colors::INDIGO).bold()
            } else {
                Style::default().fg(colors::WHITE)
            };
            Row::new(vec![
                Cell::from(Span::styled(marker, marker_style)),
                Cell::from(Span::styled(p.title.as_str(), name_style)),
            ])
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(4), Constraint::Min(16)])
        .header(
            Row::new(vec![
                Cell::from(Span::styled("", Style::default())),
                Cell::from(Span::styled("PANEL", Style::default().fg(colors::INDIGO).bold())),
            ])
            .bottom_margin(1),
        )
        .block(panel_block(" PANELS "));

    frame.render_widget(table, area);
}

fn draw_panel_detail(frame: &mut Frame, area: Rect, panel: &PanelSnapshot) {
    let title = format!(" {} · {}ms · {} ticks ", panel.title.to_uppercase(), panel.period_ms, panel.ticks);
    let block = panel_block(&title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> = panel.metrics.iter().map(|_| Constraint::Length(2)).collect();
    constraints.extend(panel.runs.iter().map(|_| Constraint::Length(2)));
    constraints.push(Constraint::Min(3));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(inner);

    for (i, metric) in panel.metrics.iter().enumerate() {
        let color = if metric.ratio() > 0.85 {
            colors::ERROR
        } else if metric.ratio() > 0.6 {
            colors::AMBER
        } else {
            colors::CYAN
        };
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(color).bg(colors::BG_DARK))
            .ratio(metric.ratio())
            .label(format!("{} {:.1}{}", metric.label, metric.value, metric.unit));
        frame.render_widget(gauge, rows[i]);
    }

    let offset = panel.metrics.len();
    for (i, run) in panel.runs.iter().enumerate() {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(colors::AMBER).bg(colors::BG_DARK))
            .percent((run.progress as u16).min(100))
            .label(format!("{} {:.0}%", run.kind.label(), run.progress));
        frame.render_widget(gauge, rows[offset + i]);
    }

    // History of the first metric as a block-character strip
    if let (Some(metric), Some(spark_area)) = (panel.metrics.first(), rows.last()) {
        let width = spark_area.width as usize;
        let skip = metric.history.len().saturating_sub(width);
        let strip = history_strip(metric.history.iter().skip(skip).copied(), metric.min, metric.max);
        let paragraph = Paragraph::new(vec![
            Line::from(Span::styled(
                format!("{} history", metric.label),
                Style::default().fg(colors::SLATE).add_modifier(Modifier::DIM),
            )),
            Line::from(Span::styled(strip, Style::default().fg(colors::INDIGO))),
        ]);
        frame.render_widget(paragraph, *spark_area);
    }
}

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

fn history_strip(values: impl Iterator<Item = f64>, min: f64, max: f64) -> String {
    let span = (max - min).max(f64::EPSILON);
    values
        .map(|v| {
            let level = (((v - min) / span).clamp(0.0, 1.0) * (BARS.len() - 1) as f64).round();
            BARS[level as usize]
        })
        .collect()
}

fn draw_notifications_panel(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let title = format!(" NOTIFICATIONS ({}) ", state.notifications.unread_count);

    let lines: Vec<Line> = state
        .notifications
        .notifications
        .iter()
        .take(20)
        .map(|n| {
            let color = match n.kind {
                NotificationKind::Success => colors::SUCCESS,
                NotificationKind::Warning => colors::AMBER,
                NotificationKind::Error => colors::ERROR,
                NotificationKind::Info => colors::CYAN,
            };
            let marker = if n.read { "  " } else { "● " };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(color)),
                Span::styled(n.title.as_str(), Style::default().fg(colors::WHITE).bold()),
                Span::raw(" "),
                Span::styled(n.message.as_str(), Style::default().fg(colors::SLATE)),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(panel_block(&title))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn draw_activity_panel(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let logs: Vec<Line> = state
        .activity_log
        .iter()
        .rev()
        .take(20)
        .map(|entry| {
            let (prefix, color) = match entry.level.as_str() {
                "ERROR" => ("[ERR]", colors::ERROR),
                "WARN" => ("[WRN]", colors::AMBER),
                "INFO" => ("[INF]", colors::SUCCESS),
                _ => ("[---]", colors::SLATE),
            };

            Line::from(vec![
                Span::styled(
                    format!("{} ", entry.timestamp.format("%H:%M:%S")),
                    Style::default().fg(colors::SLATE).add_modifier(Modifier::DIM),
                ),
                Span::styled(format!("{} ", prefix), Style::default().fg(color)),
                Span::styled(entry.message.as_str(), Style::default().fg(colors::WHITE)),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(logs)
        .block(panel_block(" ACTIVITY LOG "))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn draw_orders_panel(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let rows: Vec<TableRow<'_>> = state.orders.iter().map(TableRow::Order).collect();
    let columns: Vec<Column> = rows.first().map(TableRow::columns).unwrap_or_default();

    let body: Vec<Row> = rows
        .iter()
        .map(|row| {
            let cells: Vec<ratatui::widgets::Cell> = columns
                .iter()
                .map(|column| {
                    let cell = table::render_cell(*row, *column);
                    let style = match &cell {
                        Some(table::Cell::Badge { tone, .. }) => Style::default().fg(tone_color(*tone)),
                        Some(table::Cell::Money { .. }) => Style::default().fg(colors::SUCCESS),
                        _ => Style::default().fg(colors::WHITE),
                    };
                    let text = cell.map(|c| c.display()).unwrap_or_default();
                    ratatui::widgets::Cell::from(Span::styled(text, style))
                })
                .collect();
            Row::new(cells)
        })
        .collect();

    let header = Row::new(
        columns
            .iter()
            .map(|c| ratatui::widgets::Cell::from(Span::styled(c.header(), Style::default().fg(colors::INDIGO).bold())))
            .collect::<Vec<_>>(),
    );
    let widths: Vec<Constraint> = columns.iter().map(|_| Constraint::Ratio(1, columns.len().max(1) as u32)).collect();

    let orders = Table::new(body, widths)
        .header(header)
        .block(panel_block(" ORDERS "));
    frame.render_widget(orders, area);
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Positive => colors::SUCCESS,
        Tone::Neutral => colors::SLATE,
        Tone::Warning => colors::AMBER,
        Tone::Negative => colors::ERROR,
        Tone::Info => colors::CYAN,
    }
}

fn draw_footer(frame: &mut Frame, area: Rect) {
    let key = |k: &'static str, bg: Color| Span::styled(k, Style::default().fg(colors::BG_DARK).bg(bg));
    let label = |l: &'static str| Span::styled(l, Style::default().fg(colors::SLATE));

    let help = Line::from(vec![
        key(" [Q] ", colors::ERROR),
        label(" Quit "),
        Span::raw("  "),
        key(" [SPACE] ", colors::AMBER),
        label(" Pause/Resume "),
        Span::raw("  "),
        key(" [ENTER] ", colors::INDIGO),
        label(" Mount/Unmount "),
        Span::raw("  "),
        key(" [A] ", colors::CYAN),
        label(" Run action "),
        Span::raw("  "),
        key(" [M] ", colors::SUCCESS),
        label(" Mark read "),
        Span::raw("  "),
        key(" [R] ", colors::WHITE),
        label(" Reset "),
        Span::raw("  "),
        key(" [UP/DOWN] ", colors::SLATE),
        label(" Select "),
    ]);

    let footer = Paragraph::new(help)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(colors::DARK_INDIGO))
                .style(Style::default().bg(colors::BG_DARK)),
        );

    frame.render_widget(footer, area);
}

fn format_number(n: u64) -> String {
    if n >= 1_000_000_000 {
        format!("{:.2}B", n as f64 / 1_000_000_000.0)
    } else if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.2}K", n as f64 / 1_000.0)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_strip_spans_the_bounds() {
        let strip = history_strip([0.0, 50.0, 100.0, 150.0].into_iter(), 0.0, 100.0);
        assert_eq!(strip, "▁▅██");
    }

    #[test]
    fn numbers_get_unit_suffixes() {
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(12_450), "12.45K");
        assert_eq!(format_number(3_487_274), "3.49M");
    }
}
