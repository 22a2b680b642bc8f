use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub scripts_dir: PathBuf,
    pub env_name: String,
}

impl Default for Config {
    fn default() -> Self {
        let env_name = env::var("MLC_ENV").unwrap_or_else(|_| String::from("default"));
        let base_dir = if cfg!(windows) {
            PathBuf::from(env::var("USERPROFILE").unwrap_or_else(|_| String::from(".")))
        } else {
            PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from(".")))
        };

        let scripts_dir = if let Ok(custom_dir) = env::var("MLC_SCRIPTS_DIR") {
            PathBuf::from(custom_dir)
        } else {
            // A local scripts directory takes priority over the installed one
            let local_scripts = Path::new("./scripts");
            if local_scripts.is_dir() {
                local_scripts.to_path_buf()
            } else {
                base_dir.join(".mlc").join(&env_name).join("scripts")
            }
        };

        Config {
            scripts_dir,
            env_name,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let config_path = Self::get_config_path();
        if !config_path.exists() {
            let config = Config::default();
            config.save().unwrap_or_default();
            return config;
        }

        match fs::read_to_string(&config_path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
            Err(_) => Config::default(),
        }
    }

    pub fn save(&self) -> io::Result<()> {
        let config_path = Self::get_config_path();
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)
    }

    pub fn get_config_path() -> PathBuf {
        let env_name = env::var("MLC_ENV").unwrap_or_else(|_| String::from("default"));
        let base_dir = if cfg!(windows) {
            PathBuf::from(env::var("USERPROFILE").unwrap_or_else(|_| String::from(".")))
        } else {
            PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from(".")))
        };

        base_dir.join(".mlc").join(&env_name).join("config.json")
    }

    // Resolves a script argument: an existing path is used as-is, anything
    // else is looked up as <scripts_dir>/<name>.mini
    pub fn resolve_script(&self, script: &str) -> PathBuf {
        let direct = PathBuf::from(script);
        if direct.exists() {
            return direct;
        }

        self.scripts_dir.join(format!("{}.mini", script))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_script_appends_extension_for_bare_names() {
        let config = Config {
            scripts_dir: PathBuf::from("/tmp/scripts"),
            env_name: String::from("default"),
        };
        assert_eq!(
            config.resolve_script("fib"),
            PathBuf::from("/tmp/scripts/fib.mini")
        );
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = Config {
            scripts_dir: PathBuf::from("/tmp/scripts"),
            env_name: String::from("test"),
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.scripts_dir, config.scripts_dir);
        assert_eq!(parsed.env_name, config.env_name);
    }
}
