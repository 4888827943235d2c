use crate::hotkey::{parse_hotkey, Hotkey, Key};
use serde::{Deserialize, Serialize};

/// A parsed hotkey together with the label the overlay displays for it.
#[derive(Debug, Clone)]
pub struct Binding {
    pub hotkey: Hotkey,
    pub label: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    /// Hotkey that toggles overlay visibility. `None` falls back to `Home`.
    pub toggle_hotkey: Option<String>,
    /// Hotkey that terminates the chosen process and exits.
    /// `None` falls back to `Ctrl+Shift+T`.
    pub close_hotkey: Option<String>,
    /// Hotkey that exits without touching the process.
    /// `None` falls back to `Ctrl+C`.
    pub quit_hotkey: Option<String>,
    /// Point size of the overlay text.
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    /// Overlay text color as RGB.
    #[serde(default = "default_font_color")]
    pub font_color: [u8; 3],
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
}

fn default_font_size() -> f32 {
    16.0
}

fn default_font_color() -> [u8; 3] {
    [255, 0, 0]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            toggle_hotkey: Some("Home".into()),
            close_hotkey: Some("Ctrl+Shift+T".into()),
            quit_hotkey: Some("Ctrl+C".into()),
            font_size: default_font_size(),
            font_color: default_font_color(),
            debug_logging: false,
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn toggle_binding(&self) -> Binding {
        let fallback = Hotkey {
            key: Key::Home,
            ctrl: false,
            shift: false,
            alt: false,
        };
        binding(&self.toggle_hotkey, "Home", fallback)
    }

    pub fn close_binding(&self) -> Binding {
        let fallback = Hotkey {
            key: Key::KeyT,
            ctrl: true,
            shift: true,
            alt: false,
        };
        binding(&self.close_hotkey, "Ctrl+Shift+T", fallback)
    }

    pub fn quit_binding(&self) -> Binding {
        let fallback = Hotkey {
            key: Key::KeyC,
            ctrl: true,
            shift: false,
            alt: false,
        };
        binding(&self.quit_hotkey, "Ctrl+C", fallback)
    }
}

fn binding(configured: &Option<String>, fallback_label: &str, fallback: Hotkey) -> Binding {
    if let Some(s) = configured {
        if let Some(hotkey) = parse_hotkey(s) {
            return Binding {
                hotkey,
                label: s.clone(),
            };
        }
        tracing::warn!(
            "provided hotkey string '{}' is invalid; using default {}",
            s,
            fallback_label
        );
    }
    Binding {
        hotkey: fallback,
        label: fallback_label.to_string(),
    }
}
