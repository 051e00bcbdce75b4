use anyhow::{Context, Result};
use mdinventory_assets::{pack_from_file, pack_from_str, ContainerPack};
use mdinventory_container::ROW_WIDTH;
use mdinventory_core::{MaterialCatalog, StandardItemFactory, DEFAULT_COLOR_CHAR};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

const DEFAULT_CONFIG_PATH: &str = "config/mdinventory.toml";
const DEFAULT_PACK_PATH: &str = "config/packs/demo.json";
const DEFAULT_PACKS_DIR: &str = "config/packs.d";

/// Pack compiled into the binary, used when no pack file can be read.
pub const BUILTIN_PACK: &str = include_str!("../config/packs/demo.json");

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base container pack.
    pub pack_path: PathBuf,
    /// Directory of additional `*.json` packs, appended in file name order.
    pub packs_dir: PathBuf,
    /// Cells per row when printing a grid.
    pub columns: usize,
    /// Audience name used by `--open` when none is given.
    pub audience: String,
    /// Alternate colour character translated in names and lore.
    pub color_char: char,
    /// Materials accepted on top of the built-in catalog.
    pub extra_materials: Vec<String>,
    /// Where to write grid metrics, if anywhere.
    pub grid_metrics_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pack_path: PathBuf::from(DEFAULT_PACK_PATH),
            packs_dir: PathBuf::from(DEFAULT_PACKS_DIR),
            columns: ROW_WIDTH,
            audience: "console".to_string(),
            color_char: DEFAULT_COLOR_CHAR,
            extra_materials: Vec::new(),
            grid_metrics_path: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<AppConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    AppConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH) {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else if err.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!("Config not found at {}. Using defaults", path.display());
                }
                AppConfig::default()
            }
        }
    }

    /// Save configuration to an explicit path, creating parent directories.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }

    /// Item factory described by this configuration.
    pub fn item_factory(&self) -> StandardItemFactory {
        let mut catalog = MaterialCatalog::standard();
        catalog.extend(&self.extra_materials);
        StandardItemFactory::new(catalog).with_color_char(self.color_char)
    }
}

/// Load one pack, returning errors to the caller.
pub fn load_pack_strict(path: &Path) -> Result<ContainerPack> {
    pack_from_file(path).with_context(|| format!("failed to load container pack {}", path.display()))
}

/// Load the base pack plus every pack in the packs directory.
///
/// Unreadable packs are logged and skipped; a container name defined by an
/// earlier pack wins over later ones. Falls back to the built-in pack when
/// the base pack cannot be read.
pub fn load_packs_lenient(base_path: &Path, packs_dir: &Path) -> ContainerPack {
    let mut merged = match pack_from_file(base_path) {
        Ok(pack) => pack,
        Err(err) => {
            warn!(
                "Failed to load container pack {}: {err}. Using built-in pack",
                base_path.display()
            );
            builtin_pack()
        }
    };

    let mut names: BTreeSet<String> = BTreeSet::new();
    merged.containers.retain(|def| {
        let fresh = names.insert(def.name.clone());
        if !fresh {
            warn!("Duplicate container {} in {}", def.name, base_path.display());
        }
        fresh
    });

    for path in discover_pack_files(packs_dir) {
        match pack_from_file(&path) {
            Ok(pack) => {
                for def in pack.containers {
                    if !names.insert(def.name.clone()) {
                        warn!(
                            "Ignoring duplicate container {} from {}",
                            def.name,
                            path.display()
                        );
                        continue;
                    }
                    merged.containers.push(def);
                }
            }
            Err(err) => {
                warn!("Failed to load container pack {}: {err}", path.display());
            }
        }
    }

    merged
}

fn builtin_pack() -> ContainerPack {
    match pack_from_str(BUILTIN_PACK) {
        Ok(pack) => pack,
        Err(err) => {
            warn!("Built-in container pack is invalid: {err}");
            ContainerPack::default()
        }
    }
}

fn discover_pack_files(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to read packs directory {}: {err}", dir.display());
            }
            return Vec::new();
        }
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "mdinventory-config-{tag}-{}",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_config_uses_defaults() {
        let cfg = AppConfig::load_from_path(Path::new("does/not/exist.toml"));
        assert_eq!(cfg.columns, ROW_WIDTH);
        assert_eq!(cfg.color_char, '&');
        assert_eq!(cfg.pack_path, PathBuf::from(DEFAULT_PACK_PATH));
    }

    #[test]
    fn config_round_trips_through_toml() {
        let dir = temp_dir("roundtrip");
        let path = dir.join("mdinventory.toml");
        let cfg = AppConfig {
            columns: 3,
            extra_materials: vec!["ruby".into()],
            grid_metrics_path: Some(PathBuf::from("target/grids.json")),
            ..AppConfig::default()
        };
        cfg.save_to_path(&path).unwrap();

        let loaded = AppConfig::load_from_path(&path);
        assert_eq!(loaded.columns, 3);
        assert_eq!(loaded.extra_materials, vec!["ruby".to_string()]);
        assert_eq!(loaded.grid_metrics_path, Some(PathBuf::from("target/grids.json")));
        assert!(loaded.item_factory().catalog().contains("RUBY"));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn partial_config_fills_defaults() {
        let dir = temp_dir("partial");
        let path = dir.join("mdinventory.toml");
        fs::write(&path, "columns = 6\n").unwrap();
        let cfg = AppConfig::load_from_path(&path);
        assert_eq!(cfg.columns, 6);
        assert_eq!(cfg.audience, "console");
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn builtin_pack_is_valid() {
        let pack = pack_from_str(BUILTIN_PACK).expect("built-in pack parses");
        assert!(!pack.containers.is_empty());
    }

    #[test]
    fn lenient_loading_merges_directory_and_skips_duplicates() {
        let dir = temp_dir("packs");
        let base = dir.join("base.json");
        fs::write(
            &base,
            r#"{ "containers": [ { "name": "Base", "capacity": 9 } ] }"#,
        )
        .unwrap();
        let extra_dir = dir.join("packs.d");
        fs::create_dir_all(&extra_dir).unwrap();
        fs::write(
            extra_dir.join("a.json"),
            r#"{ "containers": [ { "name": "Base", "capacity": 18 }, { "name": "Extra", "capacity": 9 } ] }"#,
        )
        .unwrap();
        fs::write(extra_dir.join("b.json"), "not json").unwrap();
        fs::write(extra_dir.join("notes.txt"), "ignored").unwrap();

        let pack = load_packs_lenient(&base, &extra_dir);
        let names: Vec<_> = pack.containers.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Base", "Extra"]);
        assert_eq!(pack.containers[0].capacity, 9);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn unreadable_base_pack_falls_back_to_builtin() {
        let pack = load_packs_lenient(Path::new("does/not/exist.json"), Path::new("nowhere"));
        assert_eq!(
            pack.containers.len(),
            pack_from_str(BUILTIN_PACK).unwrap().containers.len()
        );
    }
}
