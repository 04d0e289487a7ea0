//! Configuration file management
//!
//! Loads TOML configuration files and provides CLI defaults.
//! Default config path: ~/.config/spritefont/config.toml

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::DEFAULT_RENDER_PADDING;
use crate::font::loader::LoadOptions;
use crate::font::sprite_font::SpriteFont;
use crate::render::Color;

/// Application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Font loading settings
    pub font: FontConfig,
    /// Text rendering settings
    pub render: RenderConfig,
}

/// Font loading settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Fallback character for missing glyphs (overrides the file's default)
    /// Empty = keep the default stored in the font file
    pub default_character: String,
    /// Line spacing override in pixels (None = keep the font's value)
    pub line_spacing: Option<f32>,
    /// Promote the sprite sheet format to sRGB
    pub force_srgb: bool,
}

/// Text rendering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Text color (RRGGBB or RRGGBBAA)
    pub color: String,
    /// Background color (RRGGBB or RRGGBBAA)
    pub background: String,
    /// Padding around rendered text (pixels)
    pub padding: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            color: "ffffff".to_string(),
            background: "00000000".to_string(),
            padding: DEFAULT_RENDER_PADDING,
        }
    }
}

impl RenderConfig {
    /// Text color, white if the configured value is invalid
    pub fn text_color(&self) -> Color {
        Color::from_hex(&self.color).unwrap_or_else(|| {
            warn!("Invalid render.color {:?}, using white", self.color);
            Color::WHITE
        })
    }

    /// Background color, transparent if the configured value is invalid
    pub fn background_color(&self) -> Color {
        Color::from_hex(&self.background).unwrap_or_else(|| {
            warn!("Invalid render.background {:?}, using transparent", self.background);
            Color::TRANSPARENT
        })
    }
}

impl FontConfig {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            force_srgb: self.force_srgb,
        }
    }

    /// Apply overrides to a loaded font
    pub fn apply(&self, font: &mut SpriteFont) -> Result<()> {
        if let Some(spacing) = self.line_spacing {
            font.set_line_spacing(spacing);
        }

        let mut chars = self.default_character.chars();
        match (chars.next(), chars.next()) {
            (None, _) => {}
            (Some(c), None) => {
                font.set_default_character(c)
                    .with_context(|| format!("Invalid font.default_character {:?}", c))?;
            }
            _ => anyhow::bail!(
                "font.default_character must be a single character, got {:?}",
                self.default_character
            ),
        }
        Ok(())
    }
}

impl Config {
    /// Environment variable pointing at a config file
    pub const ENV_VAR: &'static str = "SPRITEFONT_CONFIG";

    /// Get the path that would be used for loading config
    /// Returns None if using built-in defaults
    pub fn config_path() -> Option<PathBuf> {
        // 1. SPRITEFONT_CONFIG environment variable
        if let Ok(path) = std::env::var(Self::ENV_VAR) {
            let p = Path::new(&path);
            if p.exists() {
                return Some(p.to_path_buf());
            }
            warn!("{} points at missing file: {}", Self::ENV_VAR, path);
        }

        // 2. User config: ~/.config/spritefont/config.toml
        default_config_path().filter(|p| p.exists())
    }

    /// Load configuration with priority:
    /// 1. SPRITEFONT_CONFIG environment variable
    /// 2. ~/.config/spritefont/config.toml (user config)
    /// 3. Built-in defaults
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            match Self::load_from_file(&path) {
                Ok(config) => {
                    info!("Loaded config: {}", path.display());
                    return config;
                }
                Err(e) => {
                    warn!("Failed to load config {}: {:#}", path.display(), e);
                }
            }
        }
        info!("Using built-in default config");
        Self::default()
    }

    /// Load settings from specified path
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse settings from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Commented template with the built-in defaults
    pub fn template() -> Result<String> {
        let defaults = toml::to_string_pretty(&Config::default())?;
        Ok(format!(
            r#"# spritefont configuration file
# Config path: ~/.config/spritefont/config.toml
# Override with the {env} environment variable.
#
# [font]
# default_character = "?"   # Fallback for characters missing from the font
# line_spacing = 20.0       # Override the font's line spacing (pixels)
# force_srgb = false        # Treat the sprite sheet as sRGB
#
# [render]
# color = "ffffff"          # Text color (RRGGBB or RRGGBBAA)
# background = "00000000"   # Background color
# padding = 4               # Pixels around rendered text

{defaults}"#,
            env = Self::ENV_VAR,
        ))
    }

    /// Write the template to `path` (parent directories are created)
    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(path, Self::template()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

/// Get default config file path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("spritefont").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::glyph::{Glyph, Rect};

    fn font() -> SpriteFont {
        let glyphs = vec![
            Glyph::new('?', Rect::new(0, 0, 4, 4), 0.0, 0.0, 0.0),
            Glyph::new('A', Rect::new(4, 0, 8, 4), 0.0, 0.0, 0.0),
        ];
        SpriteFont::from_glyphs(glyphs, 5.0, None).unwrap()
    }

    #[test]
    fn test_parse_partial_config() {
        let cfg = Config::from_toml("[font]\ndefault_character = \"?\"\n").unwrap();
        assert_eq!(cfg.font.default_character, "?");
        assert!(!cfg.font.force_srgb);
        assert_eq!(cfg.render, RenderConfig::default());
    }

    #[test]
    fn test_parse_invalid_config() {
        assert!(Config::from_toml("[render]\npadding = \"wide\"\n").is_err());
    }

    #[test]
    fn test_template_parses_to_defaults() {
        let cfg = Config::from_toml(&Config::template().unwrap()).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_apply_overrides() {
        let mut font = font();
        let fc = FontConfig {
            default_character: "?".to_string(),
            line_spacing: Some(9.0),
            force_srgb: true,
        };
        fc.apply(&mut font).unwrap();
        assert_eq!(font.default_character(), Some('?'));
        assert!((font.line_spacing() - 9.0).abs() < 1e-6);
        assert!(fc.load_options().force_srgb);
    }

    #[test]
    fn test_apply_rejects_bad_default() {
        let mut font = font();
        let fc = FontConfig {
            default_character: "Z".to_string(),
            ..Default::default()
        };
        assert!(fc.apply(&mut font).is_err());

        let fc = FontConfig {
            default_character: "AB".to_string(),
            ..Default::default()
        };
        assert!(fc.apply(&mut font).is_err());
    }

    #[test]
    fn test_render_colors() {
        let rc = RenderConfig::default();
        assert_eq!(rc.text_color(), Color::WHITE);
        assert_eq!(rc.background_color(), Color::TRANSPARENT);

        let rc = RenderConfig {
            color: "bogus".to_string(),
            ..Default::default()
        };
        assert_eq!(rc.text_color(), Color::WHITE);
    }
}
