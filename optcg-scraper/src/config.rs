use std::path::{Path, PathBuf};

use crate::error::ScrapeError;

pub const DEFAULT_BASE_URL: &str = "https://asia-en.onepiece-cardgame.com";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 7200;

const ENV_BASE_URL: &str = "OPTCG_BASE_URL";
const ENV_OUTPUT_DIR: &str = "OPTCG_OUTPUT_DIR";
const ENV_IMAGE_DIR: &str = "OPTCG_IMAGE_DIR";
const ENV_CACHE_TTL: &str = "OPTCG_CACHE_TTL";
const ENV_NO_CACHE: &str = "OPTCG_NO_CACHE";

/// Settings for one scraper run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScraperConfig {
    /// Site root; page paths are appended to it.
    pub base_url: String,
    /// Where fetch-all writes `<code>.<format>` files.
    pub output_dir: PathBuf,
    /// Where card images are stored.
    pub image_dir: PathBuf,
    pub cache_ttl_secs: u64,
    pub use_cache: bool,
    /// Dump every fetched page into `debug_dir`.
    pub debug: bool,
    pub debug_dir: PathBuf,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        let tmp = std::env::temp_dir();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: tmp.join("optcg").join("packs"),
            image_dir: tmp.join("downloaded_images"),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            use_cache: true,
            debug: false,
            debug_dir: tmp,
        }
    }
}

/// Where a config field's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Built-in default.
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Provenance of each config field.
#[derive(Debug)]
pub struct ConfigSources {
    pub base_url: ConfigSource,
    pub output_dir: ConfigSource,
    pub image_dir: ConfigSource,
    pub cache_ttl_secs: ConfigSource,
    pub use_cache: ConfigSource,
    pub debug_dir: ConfigSource,
}

/// TOML config file format.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct ConfigFile {
    scraper: Option<ScraperSection>,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct ScraperSection {
    base_url: Option<String>,
    output_dir: Option<PathBuf>,
    image_dir: Option<PathBuf>,
    cache_ttl_secs: Option<u64>,
    use_cache: Option<bool>,
    debug_dir: Option<PathBuf>,
}

impl ScraperConfig {
    /// Load from environment variables, the config file, or defaults.
    ///
    /// Priority: env vars > config file > defaults.
    pub fn load() -> Result<Self, ScrapeError> {
        Self::load_from(config_path().as_deref(), |var| std::env::var(var).ok())
    }

    /// Load using an explicit config file and environment lookup.
    pub fn load_from(
        path: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ScrapeError> {
        let file = match path {
            Some(path) => read_config_file(path)?,
            None => None,
        }
        .unwrap_or_default();
        let defaults = Self::default();

        let base_url = env(ENV_BASE_URL)
            .or(file.base_url)
            .unwrap_or(defaults.base_url);

        let output_dir = env(ENV_OUTPUT_DIR)
            .map(PathBuf::from)
            .or(file.output_dir)
            .unwrap_or(defaults.output_dir);

        let image_dir = env(ENV_IMAGE_DIR)
            .map(PathBuf::from)
            .or(file.image_dir)
            .unwrap_or(defaults.image_dir);

        let cache_ttl_secs = match env(ENV_CACHE_TTL) {
            Some(raw) => raw.trim().parse().map_err(|_| {
                ScrapeError::config(format!(
                    "{ENV_CACHE_TTL} must be a number of seconds, got {raw:?}"
                ))
            })?,
            None => file.cache_ttl_secs.unwrap_or(defaults.cache_ttl_secs),
        };

        let use_cache = match env(ENV_NO_CACHE) {
            Some(raw) => !is_truthy(&raw),
            None => file.use_cache.unwrap_or(defaults.use_cache),
        };

        let debug_dir = file.debug_dir.unwrap_or(defaults.debug_dir);

        Ok(Self {
            base_url,
            output_dir,
            image_dir,
            cache_ttl_secs,
            use_cache,
            debug: false,
            debug_dir,
        })
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Base URL without a trailing slash.
    pub fn site_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Return the path to the config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("optcg-scrape").join("config.toml"))
}

/// Save a config to the default config file. Returns the path written.
pub fn save_to_file(config: &ScraperConfig) -> Result<PathBuf, ScrapeError> {
    let path = config_path()
        .ok_or_else(|| ScrapeError::config("Could not determine config directory"))?;
    save_to_path(config, &path)?;
    Ok(path)
}

/// Save a config to `path`, creating parent directories as needed.
///
/// Values equal to the defaults are left out so later default changes apply.
pub fn save_to_path(config: &ScraperConfig, path: &Path) -> Result<(), ScrapeError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let defaults = ScraperConfig::default();
    let file = ConfigFile {
        scraper: Some(ScraperSection {
            base_url: differs(&config.base_url, &defaults.base_url),
            output_dir: differs(&config.output_dir, &defaults.output_dir),
            image_dir: differs(&config.image_dir, &defaults.image_dir),
            cache_ttl_secs: differs(&config.cache_ttl_secs, &defaults.cache_ttl_secs),
            use_cache: differs(&config.use_cache, &defaults.use_cache),
            debug_dir: differs(&config.debug_dir, &defaults.debug_dir),
        }),
    };

    let toml_str = toml::to_string_pretty(&file)
        .map_err(|e| ScrapeError::config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Determine where each config field is coming from.
pub fn config_sources() -> ConfigSources {
    let file = config_path()
        .and_then(|path| read_config_file(&path).ok().flatten())
        .unwrap_or_default();
    sources_from(&file, |var| std::env::var(var).is_ok())
}

fn sources_from(file: &ScraperSection, env_set: impl Fn(&str) -> bool) -> ConfigSources {
    let pick = |var: &'static str, in_file: bool| {
        if env_set(var) {
            ConfigSource::EnvVar(var)
        } else if in_file {
            ConfigSource::ConfigFile
        } else {
            ConfigSource::Default
        }
    };

    ConfigSources {
        base_url: pick(ENV_BASE_URL, file.base_url.is_some()),
        output_dir: pick(ENV_OUTPUT_DIR, file.output_dir.is_some()),
        image_dir: pick(ENV_IMAGE_DIR, file.image_dir.is_some()),
        cache_ttl_secs: pick(ENV_CACHE_TTL, file.cache_ttl_secs.is_some()),
        use_cache: pick(ENV_NO_CACHE, file.use_cache.is_some()),
        debug_dir: if file.debug_dir.is_some() {
            ConfigSource::ConfigFile
        } else {
            ConfigSource::Default
        },
    }
}

fn read_config_file(path: &Path) -> Result<Option<ScraperSection>, ScrapeError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    let config: ConfigFile = toml::from_str(&content)
        .map_err(|e| ScrapeError::config(format!("Invalid config file {}: {}", path.display(), e)))?;
    Ok(config.scraper)
}

fn differs<T: Clone + PartialEq>(value: &T, default: &T) -> Option<T> {
    (value != default).then(|| value.clone())
}

fn is_truthy(raw: &str) -> bool {
    !matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "" | "0" | "false" | "no" | "off"
    )
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
