//! Runtime settings: environment variables first, then command-line flags.
//!
//! | Variable             | Default                  |
//! |----------------------|--------------------------|
//! | `MAHJONG_MAP`        | `turtle`                 |
//! | `MAHJONG_MAPS_DIR`   | `maps`                   |
//! | `MAHJONG_SAVE_PATH`  | `tui-mahjong.saved-game` |
//! | `MAHJONG_LOG_PATH`   | unset (no journal)       |
//! | `MAHJONG_SEED`       | time-derived             |
//! | `MAHJONG_STEP_LIMIT` | `2000000`                |

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, bail, Context, Result};

use crate::core::generator::DEFAULT_MAX_STEPS;
use crate::core::{map_file, maps, GeneratorLimits, Map};

pub const DEFAULT_MAP: &str = "turtle";
pub const DEFAULT_MAPS_DIR: &str = "maps";
pub const DEFAULT_SAVE_PATH: &str = "tui-mahjong.saved-game";
const MAP_EXTENSION: &str = "map";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub map: String,
    pub maps_dir: PathBuf,
    pub save_path: PathBuf,
    pub log_path: Option<PathBuf>,
    /// Fixed RNG seed; `None` derives one from the clock.
    pub seed: Option<u32>,
    /// Generator budget; `0` lifts the limit.
    pub step_limit: u64,
    /// Resume the saved game instead of dealing.
    pub resume: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            map: DEFAULT_MAP.to_string(),
            maps_dir: PathBuf::from(DEFAULT_MAPS_DIR),
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
            log_path: None,
            seed: None,
            step_limit: DEFAULT_MAX_STEPS,
            resume: false,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .and_then(|s| if s.is_empty() { None } else { Some(s) })
}

impl Settings {
    /// Create from `MAHJONG_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Settings::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let value = |key: &str| non_empty(lookup(key));

        Self {
            map: value("MAHJONG_MAP").unwrap_or(defaults.map),
            maps_dir: value("MAHJONG_MAPS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.maps_dir),
            save_path: value("MAHJONG_SAVE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.save_path),
            log_path: value("MAHJONG_LOG_PATH").map(PathBuf::from),
            seed: value("MAHJONG_SEED").and_then(|s| s.parse().ok()),
            step_limit: value("MAHJONG_STEP_LIMIT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.step_limit),
            resume: false,
        }
    }

    /// Apply `--map NAME`, `--seed N` and `--continue` on top of the environment.
    pub fn with_args<I>(mut self, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--map" => {
                    self.map = args.next().ok_or_else(|| anyhow!("--map needs a name"))?;
                }
                "--seed" => {
                    let raw = args.next().ok_or_else(|| anyhow!("--seed needs a value"))?;
                    self.seed = Some(
                        raw.parse()
                            .with_context(|| format!("invalid --seed value {raw:?}"))?,
                    );
                }
                "--continue" => self.resume = true,
                other => bail!("unknown argument {other:?}"),
            }
        }
        Ok(self)
    }

    /// The configured seed, or one taken from the clock.
    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(clock_seed)
    }

    pub fn limits(&self) -> GeneratorLimits {
        if self.step_limit == 0 {
            GeneratorLimits::unlimited()
        } else {
            GeneratorLimits::steps(self.step_limit)
        }
    }

    /// Built-in names followed by custom maps from the maps directory.
    pub fn map_names(&self) -> Vec<String> {
        let mut names: Vec<String> = maps::BUILTIN_NAMES.iter().map(|s| s.to_string()).collect();
        for name in custom_map_names(&self.maps_dir) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// The map after `current` in [`Settings::map_names`], wrapping around.
    pub fn next_map_name(&self, current: &str) -> String {
        let names = self.map_names();
        let next = names
            .iter()
            .position(|name| name == current)
            .map(|i| (i + 1) % names.len())
            .unwrap_or(0);
        names
            .get(next)
            .cloned()
            .unwrap_or_else(|| DEFAULT_MAP.to_string())
    }

    /// Load a built-in map, or `<maps_dir>/<name>.map`.
    pub fn load_map(&self, name: &str) -> Result<Map> {
        if let Some(map) = maps::builtin(name) {
            return map.with_context(|| format!("built-in map {name:?} is invalid"));
        }
        let path = self.maps_dir.join(format!("{name}.{MAP_EXTENSION}"));
        let text = fs::read_to_string(&path)
            .with_context(|| format!("cannot read map {}", path.display()))?;
        map_file::parse(name, &text).with_context(|| format!("malformed map {}", path.display()))
    }
}

/// `*.map` files in `dir`, extension stripped and sorted by name.
///
/// A missing or unreadable directory lists nothing.
pub fn custom_map_names(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some(MAP_EXTENSION))
        .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(String::from))
        .collect();
    names.sort();
    names
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| (d.as_secs() as u32) ^ d.subsec_nanos())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tui-mahjong-{tag}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn defaults_without_environment() {
        let settings = Settings::from_lookup(|_| None);
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.limits(), GeneratorLimits::steps(DEFAULT_MAX_STEPS));
    }

    #[test]
    fn environment_overrides_defaults() {
        let settings = Settings::from_lookup(lookup(&[
            ("MAHJONG_MAP", "pyramid"),
            ("MAHJONG_SAVE_PATH", "/tmp/game"),
            ("MAHJONG_LOG_PATH", "  "),
            ("MAHJONG_SEED", "42"),
            ("MAHJONG_STEP_LIMIT", "0"),
        ]));
        assert_eq!(settings.map, "pyramid");
        assert_eq!(settings.save_path, PathBuf::from("/tmp/game"));
        assert_eq!(settings.log_path, None);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.seed_or_clock(), 42);
        assert_eq!(settings.limits(), GeneratorLimits::unlimited());
    }

    #[test]
    fn unparsable_numbers_fall_back() {
        let settings = Settings::from_lookup(lookup(&[
            ("MAHJONG_SEED", "lots"),
            ("MAHJONG_STEP_LIMIT", "-3"),
        ]));
        assert_eq!(settings.seed, None);
        assert_eq!(settings.step_limit, DEFAULT_MAX_STEPS);
    }

    #[test]
    fn flags_override_environment() {
        let args = ["--map", "bridges", "--seed", "7", "--continue"].map(String::from);
        let settings = Settings::from_lookup(lookup(&[("MAHJONG_SEED", "42")]))
            .with_args(args)
            .unwrap();
        assert_eq!(settings.map, "bridges");
        assert_eq!(settings.seed, Some(7));
        assert!(settings.resume);
    }

    #[test]
    fn bad_flags_are_errors() {
        let base = Settings::default();
        assert!(base.clone().with_args(["--seed".to_string()]).is_err());
        assert!(base
            .clone()
            .with_args(["--seed", "x"].map(String::from))
            .is_err());
        assert!(base.with_args(["--fast".to_string()]).is_err());
    }

    #[test]
    fn custom_maps_are_listed_after_builtins() {
        let dir = scratch_dir("list");
        fs::write(dir.join("zigzag.map"), "").unwrap();
        fs::write(dir.join("arena.map"), "").unwrap();
        fs::write(dir.join("notes.txt"), "").unwrap();

        let settings = Settings {
            maps_dir: dir.clone(),
            ..Settings::default()
        };
        assert_eq!(
            settings.map_names(),
            vec!["turtle", "pyramid", "bridges", "arena", "zigzag"]
        );
        assert_eq!(settings.next_map_name("bridges"), "arena");
        assert_eq!(settings.next_map_name("zigzag"), "turtle");
        assert_eq!(settings.next_map_name("unknown"), "turtle");
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn missing_maps_dir_lists_builtins_only() {
        let settings = Settings {
            maps_dir: PathBuf::from("/nonexistent/tui-mahjong/maps"),
            ..Settings::default()
        };
        assert_eq!(settings.map_names().len(), maps::BUILTIN_NAMES.len());
        assert!(settings.load_map("nowhere").is_err());
    }

    #[test]
    fn loads_custom_map_file() {
        let dir = scratch_dir("load");
        let turtle = maps::turtle().unwrap();
        fs::write(dir.join("copy.map"), map_file::encode(&turtle)).unwrap();
        fs::write(dir.join("broken.map"), "30 16\n1 2\n").unwrap();

        let settings = Settings {
            maps_dir: dir.clone(),
            ..Settings::default()
        };
        let map = settings.load_map("copy").unwrap();
        assert_eq!(map.name(), "copy");
        assert_eq!(map.slots(), turtle.slots());
        assert!(settings.load_map("broken").is_err());
        assert_eq!(settings.load_map("turtle").unwrap().slots().len(), 144);
        let _ = fs::remove_dir_all(dir);
    }
}
