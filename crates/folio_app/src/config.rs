//! Site configuration
//!
//! Every timing, easing and threshold the page uses lives here. All fields
//! have defaults, so an empty `folio.toml` describes the stock portfolio:
//!
//! ```toml
//! [loader]
//! progress_duration = 2.0
//! progress_ease = "power2.inOut"
//!
//! [entrance]
//! subtitle_position = "-=0.5"
//!
//! [scroll]
//! start = "top 80%"
//! reverse_on_leave = true
//! ```

use std::fs;
use std::path::Path;

use folio_animation::{Easing, Position, TriggerPoint};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::theme::Theme;

/// Top-level configuration
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    pub loader: LoaderConfig,
    pub entrance: EntranceConfig,
    pub scroll: ScrollConfig,
    pub theme: ThemeConfig,
    pub cursor: CursorConfig,
    pub hover: HoverConfig,
}

/// Loading overlay sequence
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub label_duration: f32,
    pub label_ease: Easing,
    pub progress_duration: f32,
    pub progress_ease: Easing,
    pub overlay_duration: f32,
    pub overlay_ease: Easing,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            label_duration: 0.7,
            label_ease: Easing::power2_out(),
            progress_duration: 2.0,
            progress_ease: Easing::power2_in_out(),
            overlay_duration: 0.7,
            overlay_ease: Easing::default(),
        }
    }
}

/// One-shot entrance timeline
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EntranceConfig {
    pub nav_duration: f32,
    pub nav_ease: Easing,
    /// Logo path as `[x, y]` offsets
    pub logo_path: Vec<[f32; 2]>,
    pub logo_curviness: f32,
    pub logo_duration: f32,
    pub logo_ease: Easing,
    /// Ease shared by the hero text reveals
    pub reveal_ease: Easing,
    pub title_duration: f32,
    /// Revealed verbatim, one character at a time
    pub subtitle_text: String,
    pub subtitle_duration: f32,
    pub subtitle_position: Position,
    pub description_duration: f32,
    pub description_position: Position,
    pub cta_duration: f32,
    pub cta_position: Position,
}

impl Default for EntranceConfig {
    fn default() -> Self {
        Self {
            nav_duration: 1.0,
            nav_ease: Easing::power3_out(),
            logo_path: vec![[-100.0, -50.0], [0.0, 0.0], [50.0, -20.0], [0.0, 0.0]],
            logo_curviness: 1.5,
            logo_duration: 2.0,
            logo_ease: Easing::elastic_out(1.0, 0.5),
            reveal_ease: Easing::power3_out(),
            title_duration: 1.2,
            subtitle_text: "Capturing stories through the lens â€“ not_so_graphy".to_string(),
            subtitle_duration: 2.0,
            subtitle_position: Position::Relative(-0.5),
            description_duration: 0.8,
            description_position: Position::Relative(-0.4),
            cta_duration: 0.8,
            cta_position: Position::Relative(-0.3),
        }
    }
}

/// Scroll-linked reveals and the hero parallax
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub start: TriggerPoint,
    pub reverse_on_leave: bool,
    /// Extra delay per item within a group, in seconds
    pub stagger: f32,
    pub reveal_duration: f32,
    pub reveal_ease: Easing,
    pub about_image_duration: f32,
    /// Hero image shift at the end of the parallax, in percent
    pub parallax_shift: f32,
    pub parallax_start: TriggerPoint,
    pub parallax_end: TriggerPoint,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        use folio_animation::Anchor;
        Self {
            start: TriggerPoint::new(Anchor::Top, Anchor::Percent(80.0)),
            reverse_on_leave: true,
            stagger: 0.2,
            reveal_duration: 1.0,
            reveal_ease: Easing::power3_out(),
            about_image_duration: 1.5,
            parallax_shift: 20.0,
            parallax_start: TriggerPoint::new(Anchor::Top, Anchor::Top),
            parallax_end: TriggerPoint::new(Anchor::Bottom, Anchor::Top),
        }
    }
}

/// Theme toggle
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub storage_key: String,
    /// Theme used when nothing usable is stored
    pub default: Theme,
    pub pulse_scale: f32,
    pub pulse_duration: f32,
    pub pulse_ease: Easing,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
            default: Theme::Dark,
            pulse_scale: 0.95,
            pulse_duration: 0.3,
            pulse_ease: Easing::power2_in_out(),
        }
    }
}

/// Custom cursor
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Cursor effects only run on viewports wider than this
    pub min_viewport_width: f32,
    pub cursor_offset: f32,
    pub cursor_duration: f32,
    pub follower_offset: f32,
    pub follower_duration: f32,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            min_viewport_width: 768.0,
            cursor_offset: 10.0,
            cursor_duration: 0.1,
            follower_offset: 20.0,
            follower_duration: 0.2,
        }
    }
}

/// Call-to-action hover
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HoverConfig {
    pub scale: f32,
    pub duration: f32,
    pub ease: Easing,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            scale: 1.05,
            duration: 0.3,
            ease: Easing::power2_out(),
        }
    }
}

impl SiteConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("failed to read {}: {e}", path.display())))?;
        let config = Self::from_toml(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
        tracing::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: SiteConfig =
            toml::from_str(content).map_err(|e| AppError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Reject values no animation could honour
    pub fn validate(&self) -> Result<()> {
        let durations = [
            ("loader.label_duration", self.loader.label_duration),
            ("loader.progress_duration", self.loader.progress_duration),
            ("loader.overlay_duration", self.loader.overlay_duration),
            ("entrance.nav_duration", self.entrance.nav_duration),
            ("entrance.logo_duration", self.entrance.logo_duration),
            ("entrance.title_duration", self.entrance.title_duration),
            ("entrance.subtitle_duration", self.entrance.subtitle_duration),
            ("entrance.description_duration", self.entrance.description_duration),
            ("entrance.cta_duration", self.entrance.cta_duration),
            ("scroll.stagger", self.scroll.stagger),
            ("scroll.reveal_duration", self.scroll.reveal_duration),
            ("scroll.about_image_duration", self.scroll.about_image_duration),
            ("theme.pulse_duration", self.theme.pulse_duration),
            ("cursor.cursor_duration", self.cursor.cursor_duration),
            ("cursor.follower_duration", self.cursor.follower_duration),
            ("hover.duration", self.hover.duration),
        ];
        if let Some((name, value)) = durations
            .iter()
            .find(|(_, v)| !v.is_finite() || *v < 0.0)
        {
            return Err(AppError::Config(format!(
                "{name} must be a non-negative number of seconds, got {value}"
            )));
        }
        if self.entrance.logo_path.len() < 2 {
            return Err(AppError::Config(
                "entrance.logo_path needs at least two points".to_string(),
            ));
        }
        if self.theme.storage_key.is_empty() {
            return Err(AppError::Config("theme.storage_key is empty".to_string()));
        }
        Ok(())
    }
}
