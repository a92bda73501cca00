
use std::env;

use tempfile::TempDir;

/// RAII guard for environment variables - restores the old value on drop
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self { key, original }
        }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::remove_var(key);
            Self { key, original }
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(val) => env::set_var(self.key, val),
                None => env::remove_var(self.key),
            }
        }
    }
}

/// A temp config directory with WIT_CONFIG_DIR pointing at it
pub(crate) struct ConfigDir {
    pub(crate) temp: TempDir,
    _guard: EnvGuard,
}

impl ConfigDir {
    pub(crate) fn write(&self, contents: &str) {
        std::fs::write(self.temp.path().join("config.toml"), contents).unwrap();
    }
}

pub(crate) fn setup_config_dir() -> ConfigDir {
    let temp = TempDir::new().unwrap();
    let guard = EnvGuard::set("WIT_CONFIG_DIR", temp.path().to_str().unwrap());
    ConfigDir {
        temp,
        _guard: guard,
    }
}
