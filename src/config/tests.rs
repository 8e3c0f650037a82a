use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use crate::audio::{AudioFormat, QualityPreset};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

/// Clears every variable the loader reads so the host environment cannot leak in.
fn clean_env() -> Vec<EnvGuard> {
    [
        "AUDIO_SPLITTER_OUTPUT_DIR",
        "AUDIO_SPLITTER_SOURCES_DIR",
        "AUDIO_SPLITTER_TEMPLATES_DIR",
        "AUDIO_SPLITTER_DEFAULT_QUALITY",
        "AUDIO_SPLITTER_DEFAULT_FORMAT",
        "AUDIO_SPLITTER_PRESERVE_METADATA",
        "AUDIO_SPLITTER_LOG_LEVEL",
        "AUDIO_SPLITTER_LOG_FILE",
        "AUDIO_SPLITTER_FFMPEG_PATH",
    ]
    .into_iter()
    .map(EnvGuard::remove)
    .collect()
}

#[test]
fn resolve_config_path_prefers_explicit_variable() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("AUDIO_SPLITTER_CONFIG_PATH", "/tmp/audio-splitter-test.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/audio-splitter-test.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        PathBuf::from("/tmp/xdg-config-home")
            .join("audio-splitter")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("audio-splitter")
            .join("config.toml")
    );
}

#[test]
fn missing_config_file_yields_defaults() {
    let _lock = env_lock();
    let _env = clean_env();
    let dir = tempfile::tempdir().unwrap();
    let _g = EnvGuard::set(
        "AUDIO_SPLITTER_CONFIG_PATH",
        dir.path().join("absent.toml").to_str().unwrap(),
    );

    let s = Settings::load().unwrap();
    assert_eq!(s, Settings::default());
    assert_eq!(s.output_dir, PathBuf::from("data/output"));
    assert_eq!(s.default_quality, QualityPreset::High);
    assert_eq!(s.default_format, AudioFormat::Mp3);
    assert!(s.preserve_metadata);
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();
    let _env = clean_env();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
output_dir = "/srv/cuts"
default_quality = "vbr_high"
default_format = "flac"
preserve_metadata = false
log_level = "debug"
log_file = "/var/log/audio-splitter.log"
ffmpeg_path = "/opt/ffmpeg/bin/ffmpeg"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("AUDIO_SPLITTER_CONFIG_PATH", cfg_path.to_str().unwrap());

    let s = Settings::load().unwrap();
    assert_eq!(s.output_dir, PathBuf::from("/srv/cuts"));
    assert_eq!(s.sources_dir, PathBuf::from("data/sources"));
    assert_eq!(s.default_quality, QualityPreset::VbrHigh);
    assert_eq!(s.default_format, AudioFormat::Flac);
    assert!(!s.preserve_metadata);
    assert_eq!(s.log_level, "debug");
    assert_eq!(s.log_file, Some(PathBuf::from("/var/log/audio-splitter.log")));
    assert_eq!(s.ffmpeg_path, PathBuf::from("/opt/ffmpeg/bin/ffmpeg"));
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();
    let _env = clean_env();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
output_dir = "from-file"
preserve_metadata = true
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("AUDIO_SPLITTER_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("AUDIO_SPLITTER_OUTPUT_DIR", "from-env");
    let _g3 = EnvGuard::set("AUDIO_SPLITTER_PRESERVE_METADATA", "false");
    let _g4 = EnvGuard::set("AUDIO_SPLITTER_DEFAULT_QUALITY", "low");

    let s = Settings::load().unwrap();
    assert_eq!(s.output_dir, PathBuf::from("from-env"));
    assert!(!s.preserve_metadata);
    assert_eq!(s.default_quality, QualityPreset::Low);
}

#[test]
fn validate_rejects_input_only_default_format() {
    let s = Settings {
        default_format: AudioFormat::M4a,
        ..Settings::default()
    };
    assert!(s.validate().is_err());

    let s = Settings {
        ffmpeg_path: PathBuf::new(),
        ..Settings::default()
    };
    assert!(s.validate().is_err());
}

#[test]
fn broken_config_falls_back_to_defaults_with_message() {
    let _lock = env_lock();
    let _env = clean_env();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(&cfg_path, "default_format = \"ogg\"\n").unwrap();
    let _g1 = EnvGuard::set("AUDIO_SPLITTER_CONFIG_PATH", cfg_path.to_str().unwrap());

    let (s, warning) = Settings::load_or_default();
    assert_eq!(s, Settings::default());
    assert!(warning.unwrap().contains("default_format"));
}

#[test]
fn ensure_dirs_creates_missing_directories() {
    let dir = tempfile::tempdir().unwrap();
    let s = Settings {
        output_dir: dir.path().join("out/nested"),
        sources_dir: dir.path().join("sources"),
        templates_dir: dir.path().join("templates"),
        ..Settings::default()
    };
    s.ensure_dirs().unwrap();
    assert!(s.output_dir.is_dir());
    assert!(s.sources_dir.is_dir());
    assert!(s.templates_dir.is_dir());
    // idempotent
    s.ensure_dirs().unwrap();
}

#[test]
fn locate_input_falls_back_to_sources_dir() {
    let dir = tempfile::tempdir().unwrap();
    let sources = dir.path().join("sources");
    std::fs::create_dir_all(&sources).unwrap();
    std::fs::write(sources.join("only-here.wav"), b"x").unwrap();

    let s = Settings {
        sources_dir: sources.clone(),
        ..Settings::default()
    };
    assert_eq!(
        s.locate_input(std::path::Path::new("only-here.wav")),
        sources.join("only-here.wav")
    );
    assert_eq!(
        s.locate_input(std::path::Path::new("nowhere.wav")),
        PathBuf::from("nowhere.wav")
    );
}

#[test]
fn settings_render_as_toml() {
    let text = Settings::default().to_toml().unwrap();
    assert!(text.contains("output_dir = \"data/output\""));
    assert!(text.contains("default_quality = \"high\""));
    assert!(text.contains("default_format = \"mp3\""));
    assert!(!text.contains("log_file"));

    let back: Settings = toml::from_str(&text).unwrap();
    assert_eq!(back, Settings::default());
}
