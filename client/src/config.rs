use crate::error::ConfigError;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

#[cfg(not(target_family = "wasm"))]
const CONFIG_PATH: &str = "data/config.json";

const MODE_KEY: &str = "login_mode";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Presence check, then an alert saying a backend is required.
    #[default]
    Demo,
    /// Length checks, a faked round trip and a fixed account.
    Simulated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    pub mode: Mode,
}

impl Config {
    /// Missing keys fall back to the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        #[cfg(target_family = "wasm")]
        {
            Ok(Config {
                mode: get_value(MODE_KEY)?.unwrap_or_default(),
            })
        }
        #[cfg(not(target_family = "wasm"))]
        {
            Config::load_from(CONFIG_PATH)
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        #[cfg(target_family = "wasm")]
        {
            set_value(MODE_KEY, self.mode)
        }
        #[cfg(not(target_family = "wasm"))]
        {
            self.save_to(CONFIG_PATH)
        }
    }

    #[cfg(not(target_family = "wasm"))]
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        Ok(Config {
            mode: get_value_at(path, MODE_KEY)?.unwrap_or_default(),
        })
    }

    #[cfg(not(target_family = "wasm"))]
    pub fn save_to(&self, path: impl AsRef<std::path::Path>) -> Result<(), ConfigError> {
        set_value_at(path, MODE_KEY, self.mode)
    }
}

#[cfg(target_family = "wasm")]
fn local_storage() -> Result<web_sys::Storage, ConfigError> {
    web_sys::window()
        .ok_or_else(|| ConfigError::Storage("no window".to_owned()))?
        .local_storage()
        .map_err(|js| ConfigError::Storage(format!("{:?}", js)))?
        .ok_or_else(|| ConfigError::Storage("unavailable".to_owned()))
}

#[cfg(not(target_family = "wasm"))]
fn read_document(path: &std::path::Path) -> Result<serde_json::Map<String, serde_json::Value>, ConfigError> {
    match std::fs::File::open(path) {
        Ok(file) => Ok(serde_json::from_reader(std::io::BufReader::new(file))?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(serde_json::Map::new()),
        Err(e) => Err(e.into()),
    }
}

/// Sets a configuration value. Uses local storage on web and "data/config.json" on native.
pub fn set_value<T: Serialize>(key: &str, value: T) -> Result<(), ConfigError> {
    #[cfg(target_family = "wasm")]
    {
        let value = serde_json::to_string(&value)?;
        local_storage()?
            .set_item(key, &value)
            .map_err(|js| ConfigError::Storage(format!("{:?}", js)))
    }
    #[cfg(not(target_family = "wasm"))]
    {
        set_value_at(CONFIG_PATH, key, value)
    }
}

/// Gets a configuration value. Uses local storage on web and "data/config.json" on native.
pub fn get_value<T: DeserializeOwned>(key: &str) -> Result<Option<T>, ConfigError> {
    #[cfg(target_family = "wasm")]
    {
        let value = local_storage()?
            .get_item(key)
            .map_err(|js| ConfigError::Storage(format!("{:?}", js)))?;
        match value {
            Some(value) => Ok(Some(serde_json::from_str(&value)?)),
            None => Ok(None),
        }
    }
    #[cfg(not(target_family = "wasm"))]
    {
        get_value_at(CONFIG_PATH, key)
    }
}

#[cfg(not(target_family = "wasm"))]
pub fn set_value_at<T: Serialize>(
    path: impl AsRef<std::path::Path>,
    key: &str,
    value: T,
) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let mut document = read_document(path)?;
    document.insert(key.to_owned(), serde_json::to_value(value)?);

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, &document)?;
    Ok(())
}

#[cfg(not(target_family = "wasm"))]
pub fn get_value_at<T: DeserializeOwned>(
    path: impl AsRef<std::path::Path>,
    key: &str,
) -> Result<Option<T>, ConfigError> {
    let mut document = read_document(path.as_ref())?;
    match document.remove(key) {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

#[cfg(test)]
fn scratch_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir()
        .join(format!("login-client-{}-{}", std::process::id(), name))
        .join("config.json")
}

#[test]
fn test_mode_serialization() {
    assert_eq!(serde_json::to_string(&Mode::Demo).unwrap(), "\"demo\"");
    assert_eq!(
        serde_json::from_str::<Mode>("\"simulated\"").unwrap(),
        Mode::Simulated
    );
    assert!(serde_json::from_str::<Mode>("\"other\"").is_err());
}

#[test]
fn test_missing_file_is_empty() {
    let path = scratch_path("missing");
    assert_eq!(get_value_at::<Mode>(&path, MODE_KEY).unwrap(), None);
}

#[test]
fn test_value_roundtrip_keeps_other_keys() {
    let path = scratch_path("roundtrip");
    set_value_at(&path, "volume", 0.5).unwrap();
    set_value_at(&path, MODE_KEY, Mode::Simulated).unwrap();

    assert_eq!(
        get_value_at::<Mode>(&path, MODE_KEY).unwrap(),
        Some(Mode::Simulated)
    );
    assert_eq!(get_value_at::<f64>(&path, "volume").unwrap(), Some(0.5));

    std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
}

#[test]
fn test_bad_value_is_an_error() {
    let path = scratch_path("bad");
    set_value_at(&path, MODE_KEY, "sideways").unwrap();
    assert!(matches!(
        get_value_at::<Mode>(&path, MODE_KEY),
        Err(ConfigError::Json(_))
    ));
    std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
}

#[test]
fn test_load_missing_key_is_demo() {
    let path = scratch_path("load-missing");
    assert_eq!(Config::load_from(&path).unwrap(), Config { mode: Mode::Demo });

    set_value_at(&path, "volume", 0.5).unwrap();
    assert_eq!(Config::load_from(&path).unwrap().mode, Mode::Demo);
    std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
}

#[test]
fn test_load_corrupt_value_is_an_error() {
    let path = scratch_path("load-corrupt");
    set_value_at(&path, MODE_KEY, 42).unwrap();
    let loaded = Config::load_from(&path);
    assert!(matches!(loaded, Err(ConfigError::Json(_))));
    // Startup falls back to the default on any load error.
    assert_eq!(loaded.unwrap_or_default(), Config::default());
    std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
}

#[test]
fn test_save_then_load() {
    let path = scratch_path("save-load");
    let config = Config {
        mode: Mode::Simulated,
    };
    config.save_to(&path).unwrap();
    assert_eq!(Config::load_from(&path).unwrap(), config);
    std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
}
