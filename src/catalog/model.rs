use serde::Deserialize;

/// A "music card": something that can be played.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Song {
    pub title: String,
    pub artist: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Genre {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Artist {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Playlist {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Everything the page can show, grouped by section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub trending: Vec<Song>,
    pub genres: Vec<Genre>,
    pub artists: Vec<Artist>,
    pub playlists: Vec<Playlist>,
}

/// Page sections, in navigation order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Section {
    Trending,
    Genres,
    Artists,
    Playlists,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Trending,
        Section::Genres,
        Section::Artists,
        Section::Playlists,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::Trending => "Trending",
            Section::Genres => "Genres",
            Section::Artists => "Artists",
            Section::Playlists => "Playlists",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Section::Trending => 0,
            Section::Genres => 1,
            Section::Artists => 2,
            Section::Playlists => 3,
        }
    }

    /// Following section, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Preceding section, wrapping around.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl Catalog {
    /// Number of cards in `section`.
    pub fn len(&self, section: Section) -> usize {
        match section {
            Section::Trending => self.trending.len(),
            Section::Genres => self.genres.len(),
            Section::Artists => self.artists.len(),
            Section::Playlists => self.playlists.len(),
        }
    }

    /// One display line per card in `section`.
    pub fn labels(&self, section: Section) -> Vec<String> {
        match section {
            Section::Trending => self
                .trending
                .iter()
                .map(|s| format!("{} - {}", s.title, s.artist))
                .collect(),
            Section::Genres => self.genres.iter().map(|g| g.name.clone()).collect(),
            Section::Artists => self.artists.iter().map(|a| a.name.clone()).collect(),
            Section::Playlists => self
                .playlists
                .iter()
                .map(|p| {
                    if p.description.trim().is_empty() {
                        p.name.clone()
                    } else {
                        format!("{} · {}", p.name, p.description.trim())
                    }
                })
                .collect(),
        }
    }

    /// The catalog shown when no catalog file is configured.
    pub fn builtin() -> Self {
        let song = |title: &str, artist: &str| Song {
            title: title.to_string(),
            artist: artist.to_string(),
        };
        let genre = |name: &str| Genre {
            name: name.to_string(),
        };
        let artist = |name: &str| Artist {
            name: name.to_string(),
        };
        let playlist = |name: &str, description: &str| Playlist {
            name: name.to_string(),
            description: description.to_string(),
        };

        Self {
            trending: vec![
                song("Midnight Drive", "Neon Coast"),
                song("Paper Lanterns", "Aru & The Tides"),
                song("Golden Hour", "Sari Lestari"),
                song("Static Hearts", "The Overpass"),
                song("Rain on Tin Roofs", "Banyu"),
                song("Northbound", "Kelana"),
            ],
            genres: vec![
                genre("Pop"),
                genre("Rock"),
                genre("Jazz"),
                genre("Hip-Hop"),
                genre("Electronic"),
                genre("Acoustic"),
            ],
            artists: vec![
                artist("Neon Coast"),
                artist("Sari Lestari"),
                artist("The Overpass"),
                artist("Kelana"),
            ],
            playlists: vec![
                playlist("Morning Coffee", "Soft songs to start the day"),
                playlist("Workout Mix", "High tempo, no skips"),
                playlist("Late Night Jazz", "Smoky rooms and slow brushes"),
                playlist("Road Trip", "Windows down"),
            ],
        }
    }
}
