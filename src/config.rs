use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
    Sepia,
}

impl ThemeMode {
    pub const ALL: [Self; 3] = [Self::Light, Self::Dark, Self::Sepia];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Sepia => "sepia",
        }
    }
}

/// Flags that can come from the rc files or the command line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub width: Option<u16>,
    pub spacing: Option<u8>,
    pub theme: Option<ThemeMode>,
    pub read_only: bool,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            width: other.width.or(self.width),
            spacing: other.spacing.or(self.spacing),
            theme: other.theme.or(self.theme),
            read_only: self.read_only || other.read_only,
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("blockdown").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("blockdown")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("blockdown").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("blockdown")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".blockdownrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# blockdown defaults (saved with --save)".to_string()];
    if let Some(width) = flags.width {
        lines.push(format!("--width {width}"));
    }
    if let Some(spacing) = flags.spacing {
        lines.push(format!("--spacing {spacing}"));
    }
    if let Some(theme) = flags.theme {
        lines.push(format!("--theme {}", theme.name()));
    }
    if flags.read_only {
        lines.push("--read-only".to_string());
    }
    if let Some(path) = &flags.log_file {
        lines.push(format!("--log-file {}", path.display()));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick out the flags this module knows; everything else is ignored.
///
/// Values may follow as the next token or after `=`. Unparseable values are
/// dropped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline_value) = match token.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value)),
            _ => (token, None),
        };
        let takes_value = matches!(name, "--width" | "--spacing" | "--theme" | "--log-file");
        let value = if !takes_value {
            None
        } else if inline_value.is_some() {
            inline_value
        } else {
            i += 1;
            tokens.get(i).map(String::as_str)
        };

        match (name, value) {
            ("--read-only", _) => flags.read_only = true,
            ("--width", Some(v)) => flags.width = v.parse().ok(),
            ("--spacing", Some(v)) => flags.spacing = v.parse().ok(),
            ("--theme", Some(v)) => flags.theme = parse_theme(v),
            ("--log-file", Some(v)) => flags.log_file = Some(PathBuf::from(v)),
            _ => {}
        }
        i += 1;
    }
    flags
}

fn parse_theme(s: &str) -> Option<ThemeMode> {
    ThemeMode::ALL.into_iter().find(|theme| theme.name() == s)
}

/// Layout and theme choices, adjustable from the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Content column width in cells.
    pub max_width: u16,
    /// Blank rows between blocks.
    pub block_spacing: u8,
    pub theme: ThemeMode,
}

impl Settings {
    pub const MIN_WIDTH: u16 = 40;
    pub const MAX_WIDTH: u16 = 160;
    pub const WIDTH_STEP: u16 = 10;
    pub const MAX_SPACING: u8 = 3;

    /// Defaults overridden by whatever the flags set, clamped into range.
    pub fn from_flags(flags: &ConfigFlags) -> Self {
        let defaults = Self::default();
        Self {
            max_width: flags
                .width
                .unwrap_or(defaults.max_width)
                .clamp(Self::MIN_WIDTH, Self::MAX_WIDTH),
            block_spacing: flags
                .spacing
                .unwrap_or(defaults.block_spacing)
                .min(Self::MAX_SPACING),
            theme: flags.theme.unwrap_or(defaults.theme),
        }
    }

    /// Step one setting up (`forward`) or down. Width and spacing stop at
    /// their limits; theme wraps around.
    pub fn adjust(&mut self, field: SettingsField, forward: bool) {
        match field {
            SettingsField::Width => {
                self.max_width = if forward {
                    self.max_width.saturating_add(Self::WIDTH_STEP)
                } else {
                    self.max_width.saturating_sub(Self::WIDTH_STEP)
                }
                .clamp(Self::MIN_WIDTH, Self::MAX_WIDTH);
            }
            SettingsField::Spacing => {
                self.block_spacing = if forward {
                    (self.block_spacing + 1).min(Self::MAX_SPACING)
                } else {
                    self.block_spacing.saturating_sub(1)
                };
            }
            SettingsField::Theme => {
                let all = ThemeMode::ALL;
                let idx = all.iter().position(|t| *t == self.theme).unwrap_or(0);
                let next = if forward {
                    (idx + 1) % all.len()
                } else {
                    (idx + all.len() - 1) % all.len()
                };
                self.theme = all[next];
            }
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_width: 80,
            block_spacing: 1,
            theme: ThemeMode::Dark,
        }
    }
}

/// Rows of the settings panel, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Width,
    Spacing,
    Theme,
}

impl SettingsField {
    pub const ALL: [Self; 3] = [Self::Width, Self::Spacing, Self::Theme];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Width => "Max width",
            Self::Spacing => "Block spacing",
            Self::Theme => "Theme",
        }
    }
}
