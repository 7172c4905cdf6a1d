use std::fs;
use std::path::{Path, PathBuf};

use engine::{Point, Shape};
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub(crate) enum ContentError {
    #[error("failed to read content table {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode content table {path} at {field}: {source}")]
    Decode {
        path: PathBuf,
        field: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("content table {path} defines no scenes")]
    NoScenes { path: PathBuf },
    #[error("scene #{index} has an empty name")]
    EmptySceneName { index: usize },
    #[error("item #{index} in scene '{scene}' has an empty name")]
    EmptyItemName { scene: String, index: usize },
    #[error("circle hotspot of item '{item}' in scene '{scene}' needs both center and radius")]
    CircleMissingGeometry { scene: String, item: String },
    #[error("unknown display profile '{name}' (expected desktop or compact)")]
    UnknownProfile { name: String },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ContentTable {
    #[serde(default)]
    pub(crate) sound: Option<String>,
    pub(crate) scenes: Vec<SceneDef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SceneDef {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) background: Option<String>,
    #[serde(default)]
    pub(crate) items: Vec<ItemDef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ItemDef {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) description: String,
    pub(crate) hotspot: HotspotDef,
    #[serde(default)]
    pub(crate) images: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct HotspotDef {
    #[serde(default)]
    pub(crate) shape: Option<String>,
    #[serde(default)]
    pub(crate) center: Option<[f32; 2]>,
    #[serde(default)]
    pub(crate) radius: Option<f32>,
    #[serde(default)]
    pub(crate) points: Vec<[f32; 2]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShapeKind {
    Circle,
    Polygon,
}

impl ShapeKind {
    /// Used when a hotspot omits its shape tag or names one we do not know.
    pub(crate) const DEFAULT: ShapeKind = ShapeKind::Circle;

    pub(crate) fn parse(tag: &str) -> Option<ShapeKind> {
        match tag {
            "circle" => Some(ShapeKind::Circle),
            "polygon" => Some(ShapeKind::Polygon),
            _ => None,
        }
    }
}

impl HotspotDef {
    fn resolved_kind(&self) -> ShapeKind {
        self.shape
            .as_deref()
            .and_then(ShapeKind::parse)
            .unwrap_or(ShapeKind::DEFAULT)
    }

    /// Rejects circles without a center or radius. Does not log.
    pub(crate) fn check_geometry(&self, scene: &str, item: &str) -> Result<(), ContentError> {
        if self.resolved_kind() == ShapeKind::Circle
            && (self.center.is_none() || self.radius.is_none())
        {
            return Err(ContentError::CircleMissingGeometry {
                scene: scene.to_string(),
                item: item.to_string(),
            });
        }
        Ok(())
    }

    pub(crate) fn kind(&self, scene: &str, item: &str) -> ShapeKind {
        let Some(tag) = self.shape.as_deref() else {
            return ShapeKind::DEFAULT;
        };
        ShapeKind::parse(tag).unwrap_or_else(|| {
            warn!(
                scene,
                item,
                shape = tag,
                fallback = ?ShapeKind::DEFAULT,
                "unknown_hotspot_shape"
            );
            ShapeKind::DEFAULT
        })
    }

    /// Design-space shape for this hotspot. Degenerate shapes are kept and
    /// logged; they never report containment.
    pub(crate) fn to_shape(&self, scene: &str, item: &str) -> Result<Shape, ContentError> {
        let shape = match self.kind(scene, item) {
            ShapeKind::Circle => {
                let (Some([x, y]), Some(radius)) = (self.center, self.radius) else {
                    return Err(ContentError::CircleMissingGeometry {
                        scene: scene.to_string(),
                        item: item.to_string(),
                    });
                };
                Shape::Circle {
                    center: Point::new(x, y),
                    radius,
                }
            }
            ShapeKind::Polygon => Shape::Polygon {
                vertices: self
                    .points
                    .iter()
                    .map(|[x, y]| Point::new(*x, *y))
                    .collect(),
            },
        };
        if shape.is_degenerate() {
            warn!(scene, item, shape = ?shape, "degenerate_hotspot_never_hits");
        }
        Ok(shape)
    }
}

pub(crate) fn load_content_table(path: &Path) -> Result<ContentTable, ContentError> {
    let raw = fs::read_to_string(path).map_err(|source| ContentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_content_table(&raw, path)
}

pub(crate) fn parse_content_table(raw: &str, path: &Path) -> Result<ContentTable, ContentError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    let table: ContentTable = serde_path_to_error::deserialize(&mut deserializer).map_err(
        |error| {
            let field = error.path().to_string();
            ContentError::Decode {
                path: path.to_path_buf(),
                field,
                source: error.into_inner(),
            }
        },
    )?;
    validate_content_table(&table, path)?;
    Ok(table)
}

fn validate_content_table(table: &ContentTable, path: &Path) -> Result<(), ContentError> {
    if table.scenes.is_empty() {
        return Err(ContentError::NoScenes {
            path: path.to_path_buf(),
        });
    }
    for (scene_index, scene) in table.scenes.iter().enumerate() {
        if scene.name.trim().is_empty() {
            return Err(ContentError::EmptySceneName { index: scene_index });
        }
        for (item_index, item) in scene.items.iter().enumerate() {
            if item.name.trim().is_empty() {
                return Err(ContentError::EmptyItemName {
                    scene: scene.name.clone(),
                    index: item_index,
                });
            }
            item.hotspot.check_geometry(&scene.name, &item.name)?;
        }
    }
    Ok(())
}
