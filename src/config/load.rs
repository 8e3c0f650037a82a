use std::{
    env, fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `AUDIO_SPLITTER_`),
/// then an optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("AUDIO_SPLITTER").try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Load and validate, falling back to defaults on any problem. Config is
    /// optional; a broken file must not stop the tool. The returned message
    /// is for the caller to log once logging is up.
    pub fn load_or_default() -> (Self, Option<String>) {
        match Self::load() {
            Ok(s) => match s.validate() {
                Ok(()) => (s, None),
                Err(msg) => (
                    Self::default(),
                    Some(format!("invalid config, using defaults: {msg}")),
                ),
            },
            Err(e) => (
                Self::default(),
                Some(format!("failed to load config, using defaults: {e}")),
            ),
        }
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if !self.default_format.is_output() {
            return Err(format!(
                "default_format must be wav, mp3 or flac (got {})",
                self.default_format
            ));
        }
        if self.ffmpeg_path.as_os_str().is_empty() {
            return Err("ffmpeg_path must not be empty".to_string());
        }
        if self.log_level.trim().is_empty() {
            return Err("log_level must not be empty".to_string());
        }
        Ok(())
    }

    /// Create `dir` (and parents) if it does not exist yet.
    pub fn ensure_dir(dir: &Path) -> std::io::Result<()> {
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "creating directory");
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// Create every configured working directory.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        for dir in [&self.output_dir, &self.sources_dir, &self.templates_dir] {
            Self::ensure_dir(dir)?;
        }
        Ok(())
    }

    /// `path` as given when it exists, else the same relative path under
    /// `sources_dir` when that exists. Otherwise `path` unchanged, so the
    /// caller reports the name the user typed.
    pub fn locate_input(&self, path: &Path) -> PathBuf {
        if path.exists() || path.is_absolute() {
            return path.to_path_buf();
        }
        let candidate = self.sources_dir.join(path);
        if candidate.exists() {
            candidate
        } else {
            path.to_path_buf()
        }
    }

    /// Effective settings rendered as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Resolve the config path from `AUDIO_SPLITTER_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("AUDIO_SPLITTER_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/audio-splitter/config.toml`
/// or `~/.config/audio-splitter/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("audio-splitter").join("config.toml"))
}
