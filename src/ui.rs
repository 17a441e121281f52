//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the page using `ratatui`, plus
//! the layout math the event loop needs to map mouse clicks back to widgets.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Sparkline, Tabs, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock, time::Instant};

use crate::app::{App, InputMode, NoticeKind, Theme};
use crate::catalog::Section;
use crate::clock::{PlaybackClock, TimeSource, format_mmss};
use crate::config::{ControlsSettings, TimeField, UiSettings};
use crate::visualizer::{BAR_HEIGHTS, Visualizer};

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("j/k".to_string(), "up/down".to_string());
    map.insert("tab".to_string(), "next section".to_string());
    map.insert("enter".to_string(), "open card".to_string());
    map.insert("space/p".to_string(), "play/pause".to_string());
    map.insert("0-9".to_string(), "jump to 0-90%".to_string());
    // H/L is filled dynamically from config.
    map.insert("+/-".to_string(), "volume".to_string());
    map.insert("/".to_string(), "search".to_string());
    map.insert("n".to_string(), "newsletter".to_string());
    map.insert("t".to_string(), "theme".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    // Keep the rendered order stable and human-friendly.
    let order = [
        "j/k", "tab", "enter", "space/p", "H/L", "0-9", "+/-", "/", "n", "t", "q",
    ];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] scrub -/+{}s", scrub_seconds))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Colors for one theme.
struct Palette {
    fg: Color,
    bg: Color,
    accent: Color,
    muted: Color,
}

fn palette(theme: Theme) -> Palette {
    let accent = Color::Rgb(0x1D, 0xB9, 0x54);
    match theme {
        Theme::Dark => Palette {
            fg: Color::Rgb(0xFF, 0xFF, 0xFF),
            bg: Color::Rgb(0x12, 0x12, 0x12),
            accent,
            muted: Color::Rgb(0xB3, 0xB3, 0xB3),
        },
        Theme::Light => Palette {
            fg: Color::Rgb(0x21, 0x25, 0x29),
            bg: Color::Rgb(0xF8, 0xF9, 0xFA),
            accent,
            muted: Color::Rgb(0x6C, 0x75, 0x7D),
        },
    }
}

/// Build the player time text (elapsed/total/remaining) per `UiSettings`.
fn now_playing_time_text<T: TimeSource>(clock: &PlaybackClock<T>, ui: &UiSettings) -> String {
    let parts: Vec<String> = ui
        .now_playing_time_fields
        .iter()
        .map(|f| match f {
            TimeField::Elapsed => clock.formatted_position(),
            TimeField::Total => clock.formatted_duration(),
            TimeField::Remaining => {
                let remaining = clock.duration_secs().saturating_sub(clock.position_secs());
                format!("-{}", format_mmss(remaining))
            }
        })
        .collect();
    parts.join(&ui.now_playing_time_separator)
}

/// Screen regions of the page.
pub struct PageAreas {
    pub header: Rect,
    pub nav: Rect,
    pub section: Rect,
    pub player: Rect,
    pub progress: Rect,
    pub visualizer: Rect,
    pub footer: Rect,
}

/// Split the terminal into the page's regions.
pub fn page_layout(area: Rect) -> PageAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(4),
        ])
        .split(area);

    PageAreas {
        header: chunks[0],
        nav: chunks[1],
        section: chunks[2],
        player: chunks[3],
        progress: chunks[4],
        visualizer: chunks[5],
        footer: chunks[6],
    }
}

/// The clickable part of the progress bar (inside its border).
pub fn progress_track(progress: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(progress)
}

/// Map a click at (`column`, `row`) to a seek fraction, if it hit `track`.
pub fn seek_fraction(track: Rect, column: u16, row: u16) -> Option<f64> {
    if track.width == 0
        || column < track.x
        || column >= track.x + track.width
        || row < track.y
        || row >= track.y + track.height
    {
        return None;
    }
    Some(f64::from(column - track.x) / f64::from(track.width))
}

/// Which nav tab, if any, sits under (`column`, `row`). Mirrors the `Tabs`
/// widget layout: one cell of padding each side and a one-cell divider.
pub fn nav_hit(nav: Rect, column: u16, row: u16) -> Option<Section> {
    let inner = Block::default().borders(Borders::ALL).inner(nav);
    if row < inner.y || row >= inner.y + inner.height || column < inner.x {
        return None;
    }
    let mut x = inner.x;
    for section in Section::ALL {
        let width = section.title().chars().count() as u16 + 2;
        if column < x + width {
            return Some(section);
        }
        x += width + 1;
        if column < x {
            return None;
        }
    }
    None
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

fn left_padded() -> Padding {
    Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    }
}

/// Render the entire page into the provided `frame`.
pub fn draw<T: TimeSource>(
    frame: &mut Frame,
    app: &App,
    clock: &PlaybackClock<T>,
    visualizer: &Visualizer,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
    now: Instant,
) {
    let track = clock.state();
    let colors = palette(app.theme);
    let base = Style::default().fg(colors.fg).bg(colors.bg);
    frame.render_widget(Block::default().style(base), frame.area());

    let areas = page_layout(frame.area());

    // Header
    let mut header_block = Block::default()
        .borders(Borders::ALL)
        .title(" nada ")
        .title_alignment(Alignment::Center);
    if let Some(source) = &app.catalog_source {
        header_block = header_block.title_bottom(format!(" {} ", source));
    }
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .style(base.fg(colors.accent).add_modifier(Modifier::BOLD))
        .block(header_block.style(base));
    frame.render_widget(header, areas.header);

    // Navigation
    let titles: Vec<&str> = Section::ALL.iter().map(|s| s.title()).collect();
    let nav = Tabs::new(titles)
        .select(app.section.index())
        .style(base.fg(colors.muted))
        .highlight_style(Style::default().fg(colors.accent).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).style(base));
    frame.render_widget(nav, areas.nav);

    // Focused section
    {
        let loading = app.is_loading(now);
        let items: Vec<ListItem> = app
            .catalog
            .labels(app.section)
            .into_iter()
            .map(ListItem::new)
            .collect();
        let total = items.len();

        let mut list_style = base;
        if loading {
            list_style = list_style.fg(colors.muted).add_modifier(Modifier::DIM);
        }
        let title = format!(" {} ", app.section.title().to_lowercase());
        let list = List::new(items)
            .style(list_style)
            .block(Block::default().borders(Borders::ALL).title(title).style(base))
            .highlight_style(
                Style::default()
                    .fg(colors.accent)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            )
            .highlight_symbol("▲ ");
        let mut state = ListState::default();
        if total > 0 && !loading {
            state.select(Some(app.current_selection()));
        }
        frame.render_stateful_widget(list, areas.section, &mut state);
    }

    // Player box
    {
        let status = if track.is_advancing { "Playing" } else { "Paused" };
        let text = format!(
            "♪ {} · {}\n{} • Volume: {}%",
            track.title, track.artist, status, app.volume
        );
        let player = Paragraph::new(text)
            .style(base)
            .block(
                Block::bordered()
                    .padding(left_padded())
                    .title(" now playing ")
                    .style(base),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(player, areas.player);
    }

    // Progress bar
    let ratio = (clock.position_percent() / 100.0).clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).style(base))
        .gauge_style(Style::default().fg(colors.accent).bg(colors.bg))
        .ratio(ratio)
        .label(now_playing_time_text(clock, ui_settings));
    frame.render_widget(gauge, areas.progress);

    // Visualizer
    let bars = Sparkline::default()
        .block(Block::default().borders(Borders::ALL).style(base))
        .data(visualizer.bars().iter().copied())
        .max(BAR_HEIGHTS.end)
        .style(Style::default().fg(colors.accent).bg(colors.bg));
    frame.render_widget(bars, areas.visualizer);

    // Footer
    let footer = Paragraph::new(controls_text(controls_settings.scrub_seconds))
        .style(base.fg(colors.muted))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(left_padded())
                .style(base),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, areas.footer);

    // Form input overlay
    let form_title = match app.input_mode {
        InputMode::Browse => None,
        InputMode::Search => Some(" search (enter submits, esc closes) "),
        InputMode::Newsletter => Some(" newsletter email (enter submits, esc closes) "),
    };
    if let Some(title) = form_title {
        let popup_area = centered_rect_sized(60, 5, areas.section);
        frame.render_widget(Clear, popup_area);
        let input = Paragraph::new(format!("{}▏", app.input))
            .style(base)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .padding(left_padded())
                    .title(title)
                    .style(base),
            );
        frame.render_widget(input, popup_area);
    }

    // Notice overlay (keeps the page visible under it)
    if let Some(notice) = &app.notice {
        let popup_area = centered_rect_sized(64, 7, areas.section);
        frame.render_widget(Clear, popup_area);
        let title_color = match notice.kind {
            NoticeKind::Info => colors.accent,
            NoticeKind::Warning => Color::Yellow,
        };
        let popup = Paragraph::new(notice.text.as_str())
            .style(base)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .padding(left_padded())
                    .title(" notice (any key closes) ")
                    .border_style(Style::default().fg(title_color))
                    .style(base),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(popup, popup_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{ManualTime, TrackState};
    use std::time::Duration;

    #[test]
    fn controls_text_includes_scrub_seconds() {
        let text = controls_text(7);
        assert!(text.contains("[H/L] scrub -/+7s"));
        assert!(text.starts_with("[j/k] up/down"));
        assert!(text.ends_with("[q] quit"));
    }

    #[test]
    fn time_text_follows_configured_fields() {
        let track = TrackState {
            position_secs: 65,
            ..TrackState::new("t", "a", 225)
        };
        let clock =
            PlaybackClock::with_time_source(track, Duration::from_secs(1), ManualTime::new())
                .unwrap();
        let mut ui = UiSettings::default();
        assert_eq!(now_playing_time_text(&clock, &ui), "1:05 / 3:45");

        ui.now_playing_time_fields = vec![TimeField::Remaining];
        assert_eq!(now_playing_time_text(&clock, &ui), "-2:40");
    }

    #[test]
    fn clicks_map_to_fractions_inside_the_track_only() {
        let track = progress_track(Rect::new(0, 10, 102, 3));
        assert_eq!(track, Rect::new(1, 11, 100, 1));

        assert_eq!(seek_fraction(track, 1, 11), Some(0.0));
        assert_eq!(seek_fraction(track, 51, 11), Some(0.5));
        assert_eq!(seek_fraction(track, 100, 11), Some(0.99));
        assert_eq!(seek_fraction(track, 0, 11), None);
        assert_eq!(seek_fraction(track, 101, 11), None);
        assert_eq!(seek_fraction(track, 50, 10), None);
    }

    #[test]
    fn nav_clicks_map_to_tabs() {
        let nav = page_layout(Rect::new(0, 0, 80, 40)).nav;
        let row = nav.y + 1;
        // " Trending │ Genres │ ..." starting just inside the border.
        assert_eq!(nav_hit(nav, 1, row), Some(Section::Trending));
        assert_eq!(nav_hit(nav, 10, row), Some(Section::Trending));
        assert_eq!(nav_hit(nav, 11, row), None);
        assert_eq!(nav_hit(nav, 12, row), Some(Section::Genres));
        assert_eq!(nav_hit(nav, 12, nav.y), None);
        assert_eq!(nav_hit(nav, 79, row), None);
    }

    #[test]
    fn layout_stacks_regions_top_to_bottom() {
        let areas = page_layout(Rect::new(0, 0, 80, 40));
        assert_eq!(areas.header.y, 0);
        assert!(areas.nav.y > areas.header.y);
        assert!(areas.section.y > areas.nav.y);
        assert!(areas.progress.y > areas.player.y);
        assert!(areas.visualizer.y > areas.progress.y);
        assert_eq!(areas.footer.y + areas.footer.height, 40);
        assert_eq!(areas.progress.height, 3);
    }
}
