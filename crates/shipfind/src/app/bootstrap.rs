use std::env;

use engine::{
    resolve_app_paths, AssetStore, CueSink, LoopConfig, Screen, SoundPlayer, StartupError,
};
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use super::content::{load_content_table, ContentError};
use super::exploration::{
    build_scenes, DisplayProfile, ExplorationScreen, InteractionController, ModalInputPolicy,
};

const PROFILE_ENV_VAR: &str = "SHIPFIND_PROFILE";
const MODAL_POLICY_ENV_VAR: &str = "SHIPFIND_MODAL_POLICY";

#[derive(Debug, Error)]
pub(crate) enum BootstrapError {
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error("content table defines no scenes")]
    NoScenes,
}

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) screen: Box<dyn Screen>,
    pub(crate) cues: Box<dyn CueSink>,
}

pub(crate) fn build_app() -> Result<AppWiring, BootstrapError> {
    init_tracing();

    let paths = resolve_app_paths()?;
    let profile = select_profile(env::var(PROFILE_ENV_VAR).ok().as_deref())?;
    let policy = select_modal_policy(profile, env::var(MODAL_POLICY_ENV_VAR).ok().as_deref());
    info!(
        root = %paths.root.display(),
        profile = profile.name(),
        modal_policy = ?policy,
        "startup"
    );

    let mut assets = AssetStore::new(paths.assets_dir.clone());
    let content_path = paths.content_dir.join(format!("{}.json", profile.name()));
    let table = load_content_table(&content_path)?;
    let scenes = build_scenes(&table, &mut assets)?;
    info!(
        path = %content_path.display(),
        scenes = scenes.len(),
        items = scenes.iter().map(|scene| scene.items().len()).sum::<usize>(),
        "content_loaded"
    );

    let confirm = table.sound.as_deref().and_then(|key| match assets.read_bytes(key) {
        Ok(bytes) => Some(bytes),
        Err(error) => {
            warn!(sound = key, reason = %error, "sound_load_failed");
            None
        }
    });
    let cues = SoundPlayer::new(confirm);

    let controller =
        InteractionController::new(profile, policy, scenes).ok_or(BootstrapError::NoScenes)?;
    let (width, height) = profile.reference_size();
    let config = LoopConfig {
        window_width: width as u32,
        window_height: height as u32,
        ..LoopConfig::default()
    };
    info!(
        width = config.window_width,
        height = config.window_height,
        target_tps = config.target_tps,
        max_render_fps = ?config.max_render_fps,
        "loop_configured"
    );

    Ok(AppWiring {
        config,
        screen: Box::new(ExplorationScreen::new(controller)),
        cues: Box::new(cues),
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn select_profile(raw: Option<&str>) -> Result<DisplayProfile, ContentError> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        Some(name) => DisplayProfile::from_name(name),
        None => Ok(DisplayProfile::DESKTOP),
    }
}

/// Unrecognized values fall back to the profile default with a warning.
fn select_modal_policy(profile: DisplayProfile, raw: Option<&str>) -> ModalInputPolicy {
    let Some(value) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return profile.default_modal_policy();
    };
    ModalInputPolicy::from_name(value).unwrap_or_else(|| {
        let fallback = profile.default_modal_policy();
        warn!(
            var = MODAL_POLICY_ENV_VAR,
            value,
            fallback = ?fallback,
            "invalid_modal_policy_using_default"
        );
        fallback
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_defaults_to_desktop() {
        assert_eq!(select_profile(None).expect("profile"), DisplayProfile::DESKTOP);
        assert_eq!(select_profile(Some("  ")).expect("profile"), DisplayProfile::DESKTOP);
        assert_eq!(
            select_profile(Some("compact")).expect("profile"),
            DisplayProfile::COMPACT
        );
    }

    #[test]
    fn unknown_profile_is_an_error() {
        assert!(matches!(
            select_profile(Some("tablet")),
            Err(ContentError::UnknownProfile { .. })
        ));
    }

    #[test]
    fn modal_policy_follows_profile_unless_overridden() {
        assert_eq!(
            select_modal_policy(DisplayProfile::DESKTOP, None),
            ModalInputPolicy::PassThrough
        );
        assert_eq!(
            select_modal_policy(DisplayProfile::COMPACT, None),
            ModalInputPolicy::Blocking
        );
        assert_eq!(
            select_modal_policy(DisplayProfile::DESKTOP, Some("blocking")),
            ModalInputPolicy::Blocking
        );
        assert_eq!(
            select_modal_policy(DisplayProfile::COMPACT, Some("pass-through")),
            ModalInputPolicy::PassThrough
        );
    }

    #[test]
    fn invalid_modal_policy_falls_back_to_profile_default() {
        assert_eq!(
            select_modal_policy(DisplayProfile::COMPACT, Some("sometimes")),
            ModalInputPolicy::Blocking
        );
    }
}
