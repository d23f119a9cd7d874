//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::actions::ActionExecutor;
use crate::app::AppSession;
use crate::config::UiSettings;
use crate::player::{AudioBackend, Clock};

/// Render the controls help text for the footer.
fn controls_text() -> String {
    [
        ("j/k", "up/down"),
        ("enter/l", "select"),
        ("h/esc", "back"),
        ("space/p", "play/pause"),
        ("x", "stop"),
        ("[/]", "prev/next"),
        ("-/+", "volume"),
        ("R", "refresh playlist"),
        ("q", "quit"),
    ]
    .iter()
    .map(|(k, v)| format!("[{k}] {v}"))
    .collect::<Vec<String>>()
    .join(" | ")
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    // Keep the popup smaller and avoid covering the entire UI.
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the entire UI into the provided `frame` from the session state.
pub fn draw<E, B, C>(frame: &mut Frame, session: &AppSession<E, B, C>, ui_settings: &UiSettings)
where
    E: ActionExecutor,
    B: AudioBackend,
    C: Clock,
{
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" flashdeck ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Main area: menu on the left, player on the right.
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(38)])
        .split(chunks[1]);

    draw_menu(frame, session, panes[0]);
    draw_player(frame, session, panes[1]);

    // Status box
    let status_par = Paragraph::new(session.status.as_str())
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[2]);

    // Footer
    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);

    // Overlay popup (keeps the menu visible under it).
    if let Some(popup) = &session.popup {
        let popup_area = centered_rect_sized(60, 8, chunks[1]);
        frame.render_widget(Clear, popup_area);

        let text = format!("{}\n\n(Esc closes)", popup.text);
        let par = Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", popup.title))
                    .padding(Padding {
                        left: 1,
                        right: 1,
                        top: 0,
                        bottom: 0,
                    }),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(par, popup_area);
    }
}

fn draw_menu<E, B, C>(frame: &mut Frame, session: &AppSession<E, B, C>, area: Rect)
where
    E: ActionExecutor,
    B: AudioBackend,
    C: Clock,
{
    let mut items: Vec<ListItem> = Vec::with_capacity(session.row_count());
    if session.has_back_row() {
        items.push(ListItem::new("← Back"));
    }
    for node in session.nav.current_children() {
        let label = if node.is_branch() {
            format!("{} ›", node.name)
        } else {
            node.name.clone()
        };
        items.push(ListItem::new(label));
    }

    let crumbs = session.nav.breadcrumb();
    let title = if crumbs.is_empty() {
        " navigation ".to_string()
    } else {
        format!(" navigation: {} ", crumbs.join(" / "))
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ratatui::widgets::ListState::default();
    if session.row_count() > 0 {
        state.select(Some(session.selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_player<E, B, C>(frame: &mut Frame, session: &AppSession<E, B, C>, area: Rect)
where
    E: ActionExecutor,
    B: AudioBackend,
    C: Clock,
{
    let block = Block::default().borders(Borders::ALL).title(" music player ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let snapshot = session.player.snapshot();

    let track = Paragraph::new(snapshot.line.as_str()).wrap(Wrap { trim: true });
    frame.render_widget(track, rows[0]);

    let gauge = Gauge::default()
        .ratio(f64::from(snapshot.progress) / 100.0)
        .label(format!("{} / {}", snapshot.elapsed, snapshot.total));
    frame.render_widget(gauge, rows[1]);

    let volume_pct = (session.player.volume() * 100.0).round() as u8;
    let info = format!(
        "Volume: {volume_pct:>3}%  Tracks: {}",
        session.player.track_count()
    );
    frame.render_widget(Paragraph::new(info), rows[2]);
}
