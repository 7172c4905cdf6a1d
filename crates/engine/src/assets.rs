use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::ImageReader;
use thiserror::Error;
use tracing::warn;

use crate::asset_keys::{validate_asset_key, AssetKeyError};

/// Sentinel drawn wherever an image failed to decode.
pub const PLACEHOLDER_COLOR: [u8; 4] = [255, 0, 255, 255];

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("invalid asset key {key:?}: {source}")]
    InvalidKey {
        key: String,
        #[source]
        source: AssetKeyError,
    },
    #[error("failed to open asset {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("image {path} has no pixels")]
    EmptyImage { path: PathBuf },
    #[error("asset {key} already failed to load")]
    PreviouslyFailed { key: String },
}

pub struct LoadedImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl LoadedImage {
    /// Returns `None` when `rgba` is too short for the given dimensions.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || rgba.len() < expected {
            return None;
        }
        Some(Self {
            width,
            height,
            rgba,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }
}

impl fmt::Debug for LoadedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

pub type ImageHandle = Arc<LoadedImage>;

/// What the renderer draws for an item: the decoded image, or the placeholder
/// sentinel. Always replaced as a whole value.
#[derive(Debug, Clone, Default)]
pub enum Thumbnail {
    Image(ImageHandle),
    #[default]
    Placeholder,
}

impl Thumbnail {
    pub fn image(&self) -> Option<&ImageHandle> {
        match self {
            Thumbnail::Image(handle) => Some(handle),
            Thumbnail::Placeholder => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Thumbnail::Placeholder)
    }
}

pub struct AssetStore {
    root: PathBuf,
    images: HashMap<String, Option<ImageHandle>>,
    warned_keys: HashSet<String>,
}

impl AssetStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            images: HashMap::new(),
            warned_keys: HashSet::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve_path(&self, key: &str) -> Result<PathBuf, AssetError> {
        validate_asset_key(key).map_err(|source| AssetError::InvalidKey {
            key: key.to_string(),
            source,
        })?;
        Ok(self.root.join(key))
    }

    /// Decodes once per key; failures are cached too.
    pub fn load_image(&mut self, key: &str) -> Result<ImageHandle, AssetError> {
        if let Some(cached) = self.images.get(key) {
            return cached
                .clone()
                .ok_or_else(|| AssetError::PreviouslyFailed {
                    key: key.to_string(),
                });
        }

        let result = self
            .resolve_path(key)
            .and_then(|path| decode_image_rgba(&path))
            .map(Arc::new);
        self.images
            .insert(key.to_string(), result.as_ref().ok().cloned());
        result
    }

    pub fn image_or_placeholder(&mut self, key: &str) -> Thumbnail {
        match self.load_image(key) {
            Ok(handle) => Thumbnail::Image(handle),
            Err(error) => {
                self.warn_load_failure_once(key, &error);
                Thumbnail::Placeholder
            }
        }
    }

    pub fn read_bytes(&self, key: &str) -> Result<Arc<[u8]>, AssetError> {
        let path = self.resolve_path(key)?;
        let bytes = fs::read(&path).map_err(|source| AssetError::Open { path, source })?;
        Ok(Arc::from(bytes))
    }

    pub fn warn_load_failure_once(&mut self, key: &str, error: &AssetError) {
        if matches!(error, AssetError::PreviouslyFailed { .. }) {
            return;
        }
        if !self.warned_keys.insert(key.to_string()) {
            return;
        }
        warn!(asset_key = key, reason = %error, "asset_load_failed_using_placeholder");
    }
}

fn decode_image_rgba(path: &Path) -> Result<LoadedImage, AssetError> {
    let reader = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|source| AssetError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    let decoded = reader.decode().map_err(|source| AssetError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let image = decoded.to_rgba8();
    let (width, height) = (image.width(), image.height());
    LoadedImage::from_rgba(width, height, image.into_raw()).ok_or_else(|| AssetError::EmptyImage {
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) {
        let image = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        image.save(dir.join(name)).expect("save png");
    }

    #[test]
    fn loads_and_caches_decoded_png() {
        let temp = TempDir::new().expect("temp");
        write_png(temp.path(), "compass.png", 3, 2);
        let mut store = AssetStore::new(temp.path().to_path_buf());

        let first = store.load_image("compass.png").expect("decode");
        assert_eq!((first.width(), first.height()), (3, 2));
        assert_eq!(first.rgba().len(), 3 * 2 * 4);

        let second = store.load_image("compass.png").expect("cached");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn missing_file_degrades_to_placeholder() {
        let temp = TempDir::new().expect("temp");
        let mut store = AssetStore::new(temp.path().to_path_buf());

        assert!(matches!(
            store.load_image("missing.png"),
            Err(AssetError::Open { .. })
        ));
        assert!(matches!(
            store.load_image("missing.png"),
            Err(AssetError::PreviouslyFailed { .. })
        ));
        assert!(store.image_or_placeholder("missing.png").is_placeholder());
    }

    #[test]
    fn corrupt_file_degrades_to_placeholder() {
        let temp = TempDir::new().expect("temp");
        fs::write(temp.path().join("gold.png"), b"not an image").expect("write");
        let mut store = AssetStore::new(temp.path().to_path_buf());

        assert!(store.load_image("gold.png").is_err());
        assert!(store.image_or_placeholder("gold.png").is_placeholder());
    }

    #[test]
    fn invalid_key_is_rejected_before_touching_disk() {
        let temp = TempDir::new().expect("temp");
        let mut store = AssetStore::new(temp.path().to_path_buf());
        assert!(matches!(
            store.load_image("../outside.png"),
            Err(AssetError::InvalidKey { .. })
        ));
        assert!(store.read_bytes("/abs.mp3").is_err());
    }

    #[test]
    fn read_bytes_returns_file_contents() {
        let temp = TempDir::new().expect("temp");
        fs::write(temp.path().join("correct.mp3"), [1u8, 2, 3]).expect("write");
        let store = AssetStore::new(temp.path().to_path_buf());
        assert_eq!(&*store.read_bytes("correct.mp3").expect("bytes"), &[1u8, 2, 3]);
    }

    #[test]
    fn loaded_image_rejects_short_buffers() {
        assert!(LoadedImage::from_rgba(2, 2, vec![0; 15]).is_none());
        assert!(LoadedImage::from_rgba(0, 2, Vec::new()).is_none());
        assert!(LoadedImage::from_rgba(1, 1, vec![0; 4]).is_some());
    }
}
