use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/bandstand/config.toml` or `~/.config/bandstand/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `BANDSTAND__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub site: SiteSettings,
    pub contact: ContactSettings,
    pub audio: AudioSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Band name shown in the hero banner and the footer.
    pub band_name: String,
    /// Hero paragraph under the band name.
    pub tagline: String,
    /// Line shown above the contact form.
    pub availability: String,
    /// Hero image, relative to the site directory.
    pub hero_image: PathBuf,
    /// Directory scanned for gallery photos, relative to the site directory.
    pub gallery_dir: PathBuf,
    /// Credit line rendered under the gallery.
    pub photo_credit: String,
    /// Track catalog, relative to the site directory.
    pub catalog: PathBuf,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            band_name: "Swing Dynamique".to_string(),
            tagline: "Nous sommes un groupe basé à Montréal, animé par une passion commune \
                      pour la musique explosive de l'Europe de l'Est et le jazz swing raffiné \
                      des années 1930."
                .to_string(),
            availability: "Nous sommes disponibles pour des concerts ou des événements spéciaux."
                .to_string(),
            hero_image: PathBuf::from("00.jpg"),
            gallery_dir: PathBuf::from("."),
            photo_credit: "Photos © Jacques Bure".to_string(),
            catalog: PathBuf::from("tracks.toml"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContactSettings {
    /// Origin root the form handler listens on.
    pub endpoint: String,
    /// Value of the `form-name` marker sent with every submission.
    pub form_name: String,
    /// Name of the honeypot field. It is always sent empty.
    pub honeypot_field: String,
    /// Message that replaces the form once a submission went through.
    pub thank_you: String,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8888/".to_string(),
            form_name: "contact".to_string(),
            honeypot_field: "bot-field".to_string(),
            thank_you: "Merci de nous avoir contacté! Nous vous répondrons bientôt.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Whether the global mute flag starts enabled.
    pub start_muted: bool,
    /// Fade-out duration applied to playing sinks when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
    /// How often the engine reports playback time while a track plays (milliseconds).
    pub tick_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            start_muted: false,
            quit_fade_out_ms: 300,
            tick_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { scrub_seconds: 5 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Whether the gallery section is rendered.
    pub show_gallery: bool,
    /// Where keyboard focus starts.
    pub initial_focus: FocusSetting,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            show_gallery: true,
            initial_focus: FocusSetting::Playlist,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FocusSetting {
    #[serde(alias = "form")]
    Contact,
    #[serde(alias = "music", alias = "tracks")]
    Playlist,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive when `BANDSTAND_LOG` is not set.
    pub level: String,
    /// Log file. Defaults to `$XDG_STATE_HOME/bandstand/bandstand.log`.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
