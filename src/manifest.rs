//! Asset-generation manifest types.
//!
//! These map directly to the `asset_manifest.json` schema consumed by the
//! remote generation tools: a model id, a list of jobs, and the target
//! sizes each output group is resized to after download.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

// ── Manifest (top-level) ────────────────────────────────────

/// Top-level generation manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Shared style settings for the whole batch.
    pub style: StyleConfig,
    /// Output groups and their target sizes, keyed by group name
    /// (e.g. "icons", "backgrounds").
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub outputs: BTreeMap<String, OutputSpec>,
    /// The generation jobs, run in order.
    pub assets: Vec<AssetJob>,
}

/// Batch-wide style settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Hosted model identifier (e.g. "fal-ai/gpt-image-1.5").
    pub model: String,
}

/// Declared output target for one asset group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSpec {
    /// Target `[width, height]` the downloaded image is resized to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<[u32; 2]>,
}

// ── Jobs ────────────────────────────────────────────────────

/// What kind of asset a job produces. Drives the size hint sent to the
/// model and the output-group lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Icon,
    Background,
    Mascot,
}

impl AssetKind {
    /// Size hint for models that validate a fixed `image_size` set.
    pub fn image_size(self) -> &'static str {
        match self {
            AssetKind::Background => "1024x1536",
            _ => "1024x1024",
        }
    }

    /// Aspect-ratio hint for models that take `aspect_ratio` instead.
    pub fn aspect_ratio(self) -> &'static str {
        match self {
            AssetKind::Background => "16:9",
            _ => "1:1",
        }
    }
}

/// One generation job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetJob {
    /// Unique id within the manifest, used for CLI filtering.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AssetKind,
    pub prompt: String,
    /// Things the image must avoid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative: Option<String>,
    /// Where the finished image is written.
    pub out: PathBuf,
}

impl AssetManifest {
    /// Load and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let text = fs::read_to_string(path)?;
        let manifest: AssetManifest = serde_json::from_str(&text)?;
        if manifest.style.model.is_empty() {
            return Err(PipelineError::Manifest("style.model is empty".to_string()));
        }
        Ok(manifest)
    }

    /// Target size declared for a job kind, if any.
    ///
    /// Group names have drifted between manifests (singular and plural
    /// both occur), so each kind checks its known spellings; icons are
    /// the final fallback for non-background kinds.
    pub fn target_size(&self, kind: AssetKind) -> Option<[u32; 2]> {
        let lookup = |key: &str| self.outputs.get(key).and_then(|o| o.size);
        match kind {
            AssetKind::Background => lookup("background").or_else(|| lookup("backgrounds")),
            AssetKind::Mascot => lookup("mascot")
                .or_else(|| lookup("mascots"))
                .or_else(|| lookup("icons")),
            AssetKind::Icon => lookup("icons").or_else(|| lookup("icon")),
        }
    }

    /// Jobs selected by id. An empty filter keeps every job.
    pub fn selected_jobs<'a>(&'a self, only_ids: &'a [String]) -> impl Iterator<Item = &'a AssetJob> {
        self.assets
            .iter()
            .filter(move |job| only_ids.is_empty() || only_ids.iter().any(|id| *id == job.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "style": { "model": "fal-ai/gpt-image-1.5" },
        "outputs": {
            "icons": { "size": [256, 256] },
            "backgrounds": { "size": [1080, 1920] }
        },
        "assets": [
            {
                "id": "icon_komodo",
                "type": "icon",
                "prompt": "a friendly cartoon komodo dragon",
                "negative": "text, watermark",
                "out": "assets/icons/komodo.png"
            },
            {
                "id": "bg_piano",
                "type": "background",
                "prompt": "soft pastel piano room",
                "out": "assets/backgrounds/piano.png"
            }
        ]
    }"#;

    #[test]
    fn parses_sample_manifest() {
        let manifest: AssetManifest = serde_json::from_str(SAMPLE).expect("parse");
        assert_eq!(manifest.style.model, "fal-ai/gpt-image-1.5");
        assert_eq!(manifest.assets.len(), 2);
        assert_eq!(manifest.assets[0].kind, AssetKind::Icon);
        assert_eq!(manifest.assets[0].negative.as_deref(), Some("text, watermark"));
        assert_eq!(manifest.assets[1].negative, None);
    }

    #[test]
    fn target_size_prefers_exact_group() {
        let manifest: AssetManifest = serde_json::from_str(SAMPLE).expect("parse");
        assert_eq!(manifest.target_size(AssetKind::Icon), Some([256, 256]));
        assert_eq!(manifest.target_size(AssetKind::Background), Some([1080, 1920]));
        // mascots fall back to the icon group
        assert_eq!(manifest.target_size(AssetKind::Mascot), Some([256, 256]));
    }

    #[test]
    fn target_size_absent_means_no_resize() {
        let manifest: AssetManifest = serde_json::from_str(
            r#"{ "style": { "model": "m" }, "assets": [] }"#,
        )
        .expect("parse");
        assert_eq!(manifest.target_size(AssetKind::Background), None);
    }

    #[test]
    fn size_hints_follow_kind() {
        assert_eq!(AssetKind::Background.image_size(), "1024x1536");
        assert_eq!(AssetKind::Icon.image_size(), "1024x1024");
        assert_eq!(AssetKind::Background.aspect_ratio(), "16:9");
        assert_eq!(AssetKind::Mascot.aspect_ratio(), "1:1");
    }

    #[test]
    fn selected_jobs_filters_by_id() {
        let manifest: AssetManifest = serde_json::from_str(SAMPLE).expect("parse");

        let all: Vec<_> = manifest.selected_jobs(&[]).collect();
        assert_eq!(all.len(), 2);

        let only = vec!["bg_piano".to_string()];
        let picked: Vec<_> = manifest.selected_jobs(&only).collect();
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].id, "bg_piano");
    }

    #[test]
    fn empty_model_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("manifest.json");
        std::fs::write(&path, r#"{ "style": { "model": "" }, "assets": [] }"#).expect("write");

        let err = AssetManifest::load(&path).expect_err("must reject");
        assert!(matches!(err, PipelineError::Manifest(_)));
    }

    #[test]
    fn roundtrips_through_json() {
        let manifest: AssetManifest = serde_json::from_str(SAMPLE).expect("parse");
        let json = serde_json::to_string(&manifest).expect("serialize");
        let back: AssetManifest = serde_json::from_str(&json).expect("reparse");
        assert_eq!(back.assets[0].id, "icon_komodo");
        assert_eq!(back.assets[0].kind, AssetKind::Icon);
    }
}
