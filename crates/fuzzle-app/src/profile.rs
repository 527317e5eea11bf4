use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use fuzzle_config::Config;
use serde::{Deserialize, Serialize};

/// Root folder for user data, `$FUZZLE_HOME` or `./.fuzzle`
pub fn fuzzle_root() -> PathBuf {
    env::var_os("FUZZLE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".fuzzle"))
}

fn profiles_dir(root: &Path) -> PathBuf {
    root.join("profiles")
}

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

/// Create the profiles folder and the main profile if missing
pub fn init_user_config(root: &Path) -> anyhow::Result<()> {
    let dir = profiles_dir(root);
    fs::create_dir_all(&dir)?;

    let main_profile = dir.join("main.json");

    if !main_profile.exists() {
        let profile = Profile {
            name: "main".into(),
            value: Config::new(),
        };
        fs::write(&main_profile, serde_json::to_string_pretty(&profile)?)?;
        tracing::info!("Created main profile at {}", main_profile.display());
    }

    Ok(())
}

fn read_profile(path: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)?;
    let profile: Profile = serde_json::from_str(&data)?;
    Ok(profile.value)
}

/// Load a user profile by name, falling back to main, then to defaults
pub fn load_user_profile(root: &Path, name: &str) -> anyhow::Result<Config> {
    let dir = profiles_dir(root);
    let profile_file = dir.join(format!("{name}.json"));

    if profile_file.exists() {
        return read_profile(&profile_file);
    }

    tracing::warn!("Profile {name} not found, falling back to main profile or defaults");
    let main_file = dir.join("main.json");
    if main_file.exists() {
        read_profile(&main_file)
    } else {
        Ok(Config::new())
    }
}

/// Add a new profile cloned from main
pub fn add_profile_from_default(root: &Path, new_name: &str) -> anyhow::Result<PathBuf> {
    let default_config = load_user_profile(root, "main")?;
    let profile = Profile {
        name: new_name.into(),
        value: default_config,
    };
    let file = profiles_dir(root).join(format!("{new_name}.json"));
    fs::write(&file, serde_json::to_string_pretty(&profile)?)?;
    tracing::info!("Created new profile: {new_name}");
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root(tag: &str) -> PathBuf {
        let root = env::temp_dir().join(format!("fuzzle-profile-{}-{}", tag, std::process::id()));
        let _ = fs::remove_dir_all(&root);
        root
    }

    #[test]
    fn first_run_creates_main_profile() {
        let root = temp_root("init");

        init_user_config(&root).unwrap();
        let main = root.join("profiles").join("main.json");
        assert!(main.exists());

        let data = fs::read_to_string(&main).unwrap();
        assert!(data.contains("\"name\": \"main\""));

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn unknown_profile_falls_back_to_main() {
        let root = temp_root("fallback");
        init_user_config(&root).unwrap();

        let mut tuned = load_user_profile(&root, "main").unwrap();
        tuned.reading.syllable_mode = true;
        let profile = Profile {
            name: "main".into(),
            value: tuned,
        };
        fs::write(
            root.join("profiles").join("main.json"),
            serde_json::to_string_pretty(&profile).unwrap(),
        )
        .unwrap();

        let config = load_user_profile(&root, "nobody").unwrap();
        assert!(config.reading.syllable_mode);

        let copy = add_profile_from_default(&root, "kids").unwrap();
        assert!(copy.exists());
        assert!(load_user_profile(&root, "kids").unwrap().reading.syllable_mode);

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn missing_root_uses_defaults() {
        let root = temp_root("missing");

        let config = load_user_profile(&root, "main").unwrap();
        assert_eq!(config.vocabulary.min_word_len, 6);
    }
}
