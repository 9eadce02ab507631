use anyhow::{Context, Result};
use directories::ProjectDirs;
use petscene::{Breed, EngineConfig, PetKind, PetParams, SceneKind};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub(crate) pet_kind: String,
    pub(crate) pet_breed: String,
    pub(crate) start_scene: SceneKind,
    pub(crate) fps_cap: u32,
    pub(crate) enable_color: bool,
    pub(crate) seed: u64,
    pub(crate) tick_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        let breed = PetKind::Cat.default_breed();
        Self {
            pet_kind: breed.kind().id().to_string(),
            pet_breed: breed.id().to_string(),
            start_scene: SceneKind::Room,
            fps_cap: 30,
            enable_color: true,
            seed: 0xC0FFEE_u64,
            tick_ms: 16,
        }
    }
}

impl Settings {
    /// The pet to boot with. Settings are user-edited, so a bad pair falls
    /// back to the species default (or the cat default) instead of failing.
    pub(crate) fn pet_params(&self) -> PetParams {
        match PetParams::parse(&self.pet_kind, &self.pet_breed) {
            Ok(p) => p,
            Err(e) => {
                let kind = self.pet_kind.parse::<PetKind>().unwrap_or(PetKind::Cat);
                log::warn!("settings: {e}; using {}", kind.default_breed());
                kind.default_breed().into()
            }
        }
    }

    pub(crate) fn remember_pet(&mut self, breed: Breed) {
        self.pet_kind = breed.kind().id().to_string();
        self.pet_breed = breed.id().to_string();
    }

    pub(crate) fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            tick_ms: self.tick_ms.clamp(1, 100),
            seed: self.seed,
            ..EngineConfig::default()
        }
    }
}

pub(crate) struct Paths {
    pub(crate) settings_path: PathBuf,
    pub(crate) log_path: PathBuf,
}

pub(crate) fn project_paths() -> Result<Paths> {
    let proj = ProjectDirs::from("com", "petscene", "Petscene")
        .context("could not resolve project directories")?;
    let dir = proj.data_local_dir().to_path_buf();
    fs::create_dir_all(&dir).ok();
    Ok(Paths {
        settings_path: dir.join("settings.json"),
        log_path: dir.join("petscene.log"),
    })
}

pub(crate) fn load_settings(path: &Path) -> Settings {
    if let Ok(s) = fs::read_to_string(path) {
        match serde_json::from_str::<Settings>(&s) {
            Ok(v) => return v,
            Err(e) => log::warn!("ignoring unreadable settings {}: {e}", path.display()),
        }
    }
    Settings::default()
}

pub(crate) fn save_settings_atomic(path: &Path, s: &Settings) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    let data = serde_json::to_vec_pretty(s)?;
    fs::write(&tmp, data).with_context(|| format!("writing {}", tmp.display()))?;
    atomic_rename(&tmp, path)?;
    Ok(())
}

fn atomic_rename(from: &Path, to: &Path) -> Result<()> {
    if to.exists() {
        let _ = fs::remove_file(to);
    }
    fs::rename(from, to)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use petscene::{CatBreed, DogBreed};

    #[test]
    fn settings_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut s = Settings::default();
        s.remember_pet(Breed::Dog(DogBreed::Corgi));
        s.start_scene = SceneKind::Bath;
        save_settings_atomic(&path, &s).unwrap();
        assert_eq!(load_settings(&path), s);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn missing_or_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        assert_eq!(load_settings(&path), Settings::default());
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_settings(&path), Settings::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"start_scene": "sleep"}"#).unwrap();
        let s = load_settings(&path);
        assert_eq!(s.start_scene, SceneKind::Sleep);
        assert_eq!(s.fps_cap, 30);
    }

    #[test]
    fn bad_breed_falls_back_to_species_default() {
        let s = Settings {
            pet_kind: "dog".into(),
            pet_breed: "siamese".into(),
            ..Settings::default()
        };
        assert_eq!(s.pet_params().breed, Breed::Dog(DogBreed::Shiba));
        let s = Settings {
            pet_kind: "ferret".into(),
            ..Settings::default()
        };
        assert_eq!(s.pet_params().breed, Breed::Cat(CatBreed::OrangeTabby));
    }
}
