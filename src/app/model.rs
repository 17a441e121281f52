//! Application model types: `App`, `Theme`, `Notice` and friends.
//!
//! The `App` struct holds the catalog, per-section selection and the page's
//! presentation state. Playback lives in `PlaybackClock`; `App` only reports
//! which song the user picked.

use std::time::Instant;

use tracing::{debug, info};

use crate::catalog::{Catalog, Section, Song};
use crate::config::ThemeSetting;

use super::forms::{self, Subscription};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl From<ThemeSetting> for Theme {
    fn from(setting: ThemeSetting) -> Self {
        match setting {
            ThemeSetting::Dark => Theme::Dark,
            ThemeSetting::Light => Theme::Light,
        }
    }
}

/// What keystrokes currently go to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Browse,
    Search,
    Newsletter,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
}

/// A message shown in a popup until dismissed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            text: text.into(),
        }
    }
}

/// Result of pressing Enter on a card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Activation {
    /// A song card: the caller should hand it to the playback clock.
    Play(Song),
    /// A genre or artist card: a placeholder notice is now showing.
    Notified,
    Nothing,
}

/// The main application model.
pub struct App {
    pub catalog: Catalog,
    pub section: Section,
    selected: [usize; 4],

    pub theme: Theme,
    pub volume: u8,

    pub input_mode: InputMode,
    pub input: String,
    pub notice: Option<Notice>,

    loading_until: Option<Instant>,
    pub catalog_source: Option<String>,
}

impl App {
    /// Create a new `App` browsing `catalog`, starting on the trending section.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            section: Section::Trending,
            selected: [0; 4],
            theme: Theme::Dark,
            volume: 100,
            input_mode: InputMode::Browse,
            input: String::new(),
            notice: None,
            loading_until: None,
            catalog_source: None,
        }
    }

    /// Record where the catalog came from (shown in the header).
    pub fn set_catalog_source(&mut self, source: impl Into<String>) {
        self.catalog_source = Some(source.into());
    }

    /// Selected card index within `section`.
    pub fn selected(&self, section: Section) -> usize {
        self.selected[section.index()]
    }

    /// Selected card index within the focused section.
    pub fn current_selection(&self) -> usize {
        self.selected(self.section)
    }

    /// Focus the next section (nav links, left to right).
    pub fn next_section(&mut self) {
        self.jump_to(self.section.next());
    }

    pub fn prev_section(&mut self) {
        self.jump_to(self.section.prev());
    }

    pub fn jump_to(&mut self, section: Section) {
        debug!(section = section.title(), "navigate");
        self.section = section;
    }

    /// Move selection to the next card, wrapping around.
    pub fn next(&mut self) {
        let len = self.catalog.len(self.section);
        if len == 0 {
            return;
        }
        let slot = &mut self.selected[self.section.index()];
        *slot = (*slot + 1) % len;
    }

    /// Move selection to the previous card, wrapping around.
    pub fn prev(&mut self) {
        let len = self.catalog.len(self.section);
        if len == 0 {
            return;
        }
        let slot = &mut self.selected[self.section.index()];
        *slot = (*slot + len - 1) % len;
    }

    /// Act on the selected card of the focused section.
    pub fn activate(&mut self) -> Activation {
        let idx = self.current_selection();
        match self.section {
            Section::Trending => match self.catalog.trending.get(idx) {
                Some(song) => Activation::Play(song.clone()),
                None => Activation::Nothing,
            },
            Section::Genres => match self.catalog.genres.get(idx) {
                Some(genre) => {
                    let name = genre.name.clone();
                    self.show_notice(Notice::info(format!(
                        "You picked the {name} genre. Loading {name} songs..."
                    )));
                    Activation::Notified
                }
                None => Activation::Nothing,
            },
            Section::Artists => match self.catalog.artists.get(idx) {
                Some(artist) => {
                    let name = artist.name.clone();
                    self.show_notice(Notice::info(format!(
                        "You picked {name}. Loading {name}'s profile..."
                    )));
                    Activation::Notified
                }
                None => Activation::Nothing,
            },
            Section::Playlists => Activation::Nothing,
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        debug!(theme = ?self.theme, "theme toggled");
    }

    /// Raise the volume by `step`, capped at 100.
    pub fn volume_up(&mut self, step: u8) {
        self.set_volume(self.volume.saturating_add(step).min(100));
    }

    pub fn volume_down(&mut self, step: u8) {
        self.set_volume(self.volume.saturating_sub(step));
    }

    fn set_volume(&mut self, volume: u8) {
        if volume != self.volume {
            self.volume = volume;
            info!(volume, "volume set");
        }
    }

    pub fn begin_search(&mut self) {
        self.input_mode = InputMode::Search;
        self.input.clear();
    }

    pub fn begin_newsletter(&mut self) {
        self.input_mode = InputMode::Newsletter;
        self.input.clear();
    }

    pub fn push_input_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_input_char(&mut self) {
        self.input.pop();
    }

    /// Leave the active form, discarding what was typed.
    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Browse;
        self.input.clear();
    }

    /// Submit the active form.
    ///
    /// Search: an empty query just closes the box; anything else shows a
    /// placeholder notice and clears the box. Newsletter: a rejected address
    /// keeps the form open with its text so it can be corrected.
    pub fn submit_input(&mut self) {
        match self.input_mode {
            InputMode::Browse => {}
            InputMode::Search => {
                if let Some(notice) = forms::search_notice(&self.input) {
                    info!(query = %forms::normalize_query(&self.input), "search submitted");
                    self.show_notice(notice);
                }
                self.cancel_input();
            }
            InputMode::Newsletter => match forms::subscribe(&self.input) {
                Subscription::Accepted(notice) => {
                    info!("newsletter subscription accepted");
                    self.show_notice(notice);
                    self.cancel_input();
                }
                Subscription::Rejected(notice) => self.show_notice(notice),
            },
        }
    }

    pub fn show_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Dim catalog sections until `until`.
    pub fn start_loading(&mut self, until: Instant) {
        self.loading_until = Some(until);
    }

    pub fn is_loading(&self, now: Instant) -> bool {
        self.loading_until.is_some_and(|until| now < until)
    }
}
