use serde::Deserialize;
use serde_with::DeserializeFromStr;
use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Error, ErrorKind, Result};
use crate::picker::{Key, Orientation};

const CONFIG_PATH_ENV_VAR: &str = "DATEPICKER_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> io::Result<Vec<PathBuf>> {
    let home = dirs::home_dir().ok_or_else(|| {
        io::Error::new(io::ErrorKind::Other, "Unable to find home directory")
    })?;

    let config_dir = dirs::config_dir().unwrap_or_else(|| home.join(".config"));

    let mut locations = vec![
        config_dir.join("datepicker").join("config.toml"),
        home.join(".datepicker.toml"),
    ];

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.insert(0, PathBuf::from(path));
    }

    Ok(locations)
}

/// A key as written in the config file: either a name like `Left` or
/// `Enter`, or a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DeserializeFromStr)]
pub enum KeySpec {
    Char(char),
    Left,
    Right,
    Up,
    Down,
    Enter,
    Space,
    Tab,
    Esc,
}

impl KeySpec {
    pub fn from_char(c: char) -> Self {
        match c {
            '\n' => KeySpec::Enter,
            ' ' => KeySpec::Space,
            '\t' => KeySpec::Tab,
            c => KeySpec::Char(c),
        }
    }
}

impl FromStr for KeySpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(KeySpec::from_char(c));
        }

        match s.to_lowercase().as_str() {
            "left" => Ok(KeySpec::Left),
            "right" => Ok(KeySpec::Right),
            "up" => Ok(KeySpec::Up),
            "down" => Ok(KeySpec::Down),
            "enter" | "return" => Ok(KeySpec::Enter),
            "space" => Ok(KeySpec::Space),
            "tab" => Ok(KeySpec::Tab),
            "esc" | "escape" => Ok(KeySpec::Esc),
            _ => Err(Error::new(
                ErrorKind::KeyParse,
                &format!("Key '{}' not recognized", s),
            )),
        }
    }
}

impl fmt::Display for KeySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySpec::Char(c) => write!(f, "{}", c),
            other => write!(f, "{:?}", other),
        }
    }
}

/// What a configured key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Picker(Key),
    Quit,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left: Vec<KeySpec>,
    pub right: Vec<KeySpec>,
    pub up: Vec<KeySpec>,
    pub down: Vec<KeySpec>,
    pub select: Vec<KeySpec>,
    pub tab: Vec<KeySpec>,
    pub quit: Vec<KeySpec>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            left: vec![KeySpec::Left, KeySpec::Char('h')],
            right: vec![KeySpec::Right, KeySpec::Char('l')],
            up: vec![KeySpec::Up, KeySpec::Char('k')],
            down: vec![KeySpec::Down, KeySpec::Char('j')],
            select: vec![KeySpec::Enter, KeySpec::Space],
            tab: vec![KeySpec::Tab],
            quit: vec![KeySpec::Char('q'), KeySpec::Esc],
        }
    }
}

impl KeyBindings {
    pub fn lookup(&self, key: KeySpec) -> Option<Binding> {
        let table = [
            (&self.quit, Binding::Quit),
            (&self.left, Binding::Picker(Key::Left)),
            (&self.right, Binding::Picker(Key::Right)),
            (&self.up, Binding::Picker(Key::Up)),
            (&self.down, Binding::Picker(Key::Down)),
            (&self.select, Binding::Picker(Key::Enter)),
            (&self.tab, Binding::Picker(Key::Tab)),
        ];

        table
            .iter()
            .find(|(keys, _)| keys.contains(&key))
            .map(|(_, binding)| *binding)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Clock refresh interval in milliseconds.
    #[serde(rename = "tick_rate")]
    pub tick_rate_ms: u64,
    pub orientation: Orientation,
    pub keys: KeyBindings,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            tick_rate_ms: 500,
            orientation: Orientation::default(),
            keys: KeyBindings::default(),
        }
    }
}

impl Config {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    content.parse::<Config>().map_err(|err| {
        let msg = format!(
            "{}: {}",
            path.display(),
            err.message.as_deref().unwrap_or("invalid format")
        );
        err.with_msg(&msg)
    })
}

/// Loads `path` if given, otherwise the first existing file of the default
/// locations. Falls back to the default config if none exists.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return load_config(path);
    }

    for location in find_configfile_locations()? {
        if location.is_file() {
            log::info!("Loading config from {}", location.display());
            return load_config(&location);
        }
    }

    log::warn!("No config file found, using defaults");
    Ok(Config::default())
}
