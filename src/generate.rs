//! Card generation — the boundary between the engine and a site build.
//!
//! The pipeline for one page:
//!
//! ```text
//! title ──wrap──► rows ──template──► SVG ──raster──► PNG ──► {output_dir}/{slug}.png
//!                                                            returns {url_path}/{slug}.png
//! ```
//!
//! ## Partial Failure By Design
//!
//! A static-site build generates one card per page; a single unreadable
//! avatar or broken option must not abort the whole build. [`try_generate`]
//! is the strict, error-propagating engine entry point; [`generate`] wraps
//! it with the forgiving policy: report the failure with full context on
//! stderr and return `None`, letting the caller publish the page without a
//! preview image. No retries — transient failures surface immediately.
//!
//! ## Batch Mode
//!
//! [`generate_batch`] drives [`generate`] over a JSON page manifest with
//! rayon, one independent render per page. Pages share the immutable
//! site-wide defaults and may carry their own [`CardOverrides`]; nothing is
//! cached or reused across pages.

use crate::config::{CardConfig, CardOverrides, ConfigError};
use crate::raster::RenderError;
use crate::{layout, naming, output, raster};
use rayon::prelude::*;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    /// A required request field is empty. Raised before any layout or
    /// rendering work happens.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Render failed: {0}")]
    Render(#[from] RenderError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Everything needed to generate one card, minus the styling.
#[derive(Debug, Clone)]
pub struct CardRequest {
    /// Page title. Required; also the source of the output slug.
    pub title: String,
    /// Site name rendered in the footer label.
    pub site_name: String,
    /// Avatar image file (JPEG/PNG/WebP).
    pub avatar: PathBuf,
    /// Directory the PNG is written into. Created on demand.
    pub output_dir: PathBuf,
    /// Public URL prefix for the returned image URL.
    pub url_path: String,
}

/// Generate one card, strict version.
///
/// Validates the request and config, ensures the output directory exists,
/// then wraps, renders, and writes `{output_dir}/{slug}.png`. Returns the
/// public URL `{url_path}/{slug}.png`.
pub fn try_generate(request: &CardRequest, config: &CardConfig) -> Result<String, GenerateError> {
    if request.title.is_empty() {
        return Err(GenerateError::MissingField("title"));
    }
    if request.output_dir.as_os_str().is_empty() {
        return Err(GenerateError::MissingField("output_dir"));
    }
    if request.url_path.is_empty() {
        return Err(GenerateError::MissingField("url_path"));
    }
    config.validate()?;

    ensure_output_dir(&request.output_dir)?;

    let rows = layout::wrap_title(&request.title, config.line_break_at, layout::MAX_ROWS);
    let png = raster::render(&rows, &request.site_name, &request.avatar, config)?;

    let slug = naming::slugify(&request.title);
    fs::write(request.output_dir.join(format!("{slug}.png")), &png)?;
    Ok(format!("{}/{}.png", request.url_path, slug))
}

/// Generate one card, forgiving version.
///
/// On any failure the error and the full request context are reported to
/// stderr and `None` is returned; nothing is raised to the caller. This is
/// the entry point a site build should use per page.
pub fn generate(request: &CardRequest, config: &CardConfig) -> Option<String> {
    match try_generate(request, config) {
        Ok(url) => Some(url),
        Err(err) => {
            output::print_failure(request, config, &err);
            None
        }
    }
}

/// Create the output directory if it does not exist.
///
/// Idempotent and safe under concurrent invocation: losing the creation
/// race to another render targeting the same directory counts as success.
fn ensure_output_dir(dir: &Path) -> io::Result<()> {
    match fs::create_dir_all(dir) {
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        other => other,
    }
}

/// A page manifest driving batch generation.
///
/// Produced by the site generator (one entry per page), consumed by the
/// `batch` subcommand:
///
/// ```json
/// {
///   "site_name": "example.com",
///   "avatar": "assets/avatar.png",
///   "output_dir": "_site/img/preview",
///   "url_path": "/img/preview",
///   "pages": [
///     { "title": "Hello, World!" },
///     { "title": "Dark post", "overrides": { "bg_color": "#000" } }
///   ]
/// }
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchManifest {
    pub site_name: String,
    pub avatar: PathBuf,
    pub output_dir: PathBuf,
    pub url_path: String,
    pub pages: Vec<PageEntry>,
}

/// One page in a [`BatchManifest`].
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageEntry {
    pub title: String,
    /// Per-page style overrides, merged over the site-wide defaults.
    #[serde(default)]
    pub overrides: CardOverrides,
}

impl BatchManifest {
    pub fn load(path: &Path) -> Result<Self, GenerateError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Outcome of one page in a batch run.
#[derive(Debug)]
pub struct PageResult {
    pub title: String,
    /// The public URL, or `None` when that page failed.
    pub url: Option<String>,
}

/// Generate cards for every page in the manifest, in parallel.
///
/// Each page resolves its own config and fails independently; the result
/// vector preserves manifest order.
pub fn generate_batch(manifest: &BatchManifest, defaults: &CardConfig) -> Vec<PageResult> {
    manifest
        .pages
        .par_iter()
        .map(|page| {
            let config = defaults.merge(&page.overrides);
            let request = CardRequest {
                title: page.title.clone(),
                site_name: manifest.site_name.clone(),
                avatar: manifest.avatar.clone(),
                output_dir: manifest.output_dir.clone(),
                url_path: manifest.url_path.clone(),
            };
            PageResult {
                title: page.title.clone(),
                url: generate(&request, &config),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::create_test_jpeg;
    use tempfile::TempDir;

    fn request(tmp: &TempDir) -> CardRequest {
        let avatar = tmp.path().join("avatar.jpg");
        create_test_jpeg(&avatar, 120, 120);
        CardRequest {
            title: "Hello, World!".to_string(),
            site_name: "example.com".to_string(),
            avatar,
            output_dir: tmp.path().join("img").join("preview"),
            url_path: "/img/preview".to_string(),
        }
    }

    #[test]
    fn generates_file_and_returns_url() {
        let tmp = TempDir::new().unwrap();
        let req = request(&tmp);

        let url = try_generate(&req, &CardConfig::default()).unwrap();
        assert_eq!(url, "/img/preview/hello-world.png");
        assert!(req.output_dir.join("hello-world.png").exists());
    }

    #[test]
    fn missing_title_aborts_before_any_work() {
        let tmp = TempDir::new().unwrap();
        let req = CardRequest {
            title: String::new(),
            ..request(&tmp)
        };

        let result = try_generate(&req, &CardConfig::default());
        assert!(matches!(result, Err(GenerateError::MissingField("title"))));
        // Aborted before directory creation, let alone rendering.
        assert!(!req.output_dir.exists());
    }

    #[test]
    fn missing_output_dir_and_url_path_are_rejected() {
        let tmp = TempDir::new().unwrap();
        let req = CardRequest {
            output_dir: PathBuf::new(),
            ..request(&tmp)
        };
        assert!(matches!(
            try_generate(&req, &CardConfig::default()),
            Err(GenerateError::MissingField("output_dir"))
        ));

        let req = CardRequest {
            url_path: String::new(),
            ..request(&tmp)
        };
        assert!(matches!(
            try_generate(&req, &CardConfig::default()),
            Err(GenerateError::MissingField("url_path"))
        ));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let config = CardConfig {
            line_break_at: 0,
            ..CardConfig::default()
        };
        assert!(matches!(
            try_generate(&request(&tmp), &config),
            Err(GenerateError::Config(_))
        ));
    }

    #[test]
    fn unreadable_avatar_leaves_no_output_file() {
        let tmp = TempDir::new().unwrap();
        let req = CardRequest {
            avatar: tmp.path().join("missing.jpg"),
            ..request(&tmp)
        };

        assert!(generate(&req, &CardConfig::default()).is_none());
        assert!(!req.output_dir.join("hello-world.png").exists());
    }

    #[test]
    fn forgiving_wrapper_returns_url_on_success() {
        let tmp = TempDir::new().unwrap();
        let req = request(&tmp);
        assert_eq!(
            generate(&req, &CardConfig::default()).as_deref(),
            Some("/img/preview/hello-world.png")
        );
    }

    #[test]
    fn ensure_output_dir_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("a").join("b");
        ensure_output_dir(&dir).unwrap();
        ensure_output_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn batch_isolates_page_failures() {
        let tmp = TempDir::new().unwrap();
        let avatar = tmp.path().join("avatar.jpg");
        create_test_jpeg(&avatar, 80, 80);

        let manifest = BatchManifest {
            site_name: "example.com".to_string(),
            avatar,
            output_dir: tmp.path().join("out"),
            url_path: "/img/preview".to_string(),
            pages: vec![
                PageEntry {
                    title: "Good page".to_string(),
                    overrides: CardOverrides::default(),
                },
                PageEntry {
                    // Empty title: this page fails, the batch continues.
                    title: String::new(),
                    overrides: CardOverrides::default(),
                },
            ],
        };

        let results = generate_batch(&manifest, &CardConfig::default());
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].url.as_deref(), Some("/img/preview/good-page.png"));
        assert!(results[1].url.is_none());
        assert!(manifest.output_dir.join("good-page.png").exists());
    }

    #[test]
    fn batch_applies_per_page_overrides() {
        let tmp = TempDir::new().unwrap();
        let avatar = tmp.path().join("avatar.jpg");
        create_test_jpeg(&avatar, 80, 80);

        let manifest = BatchManifest {
            site_name: "example.com".to_string(),
            avatar,
            output_dir: tmp.path().join("out"),
            url_path: "/p".to_string(),
            pages: vec![PageEntry {
                title: "Styled".to_string(),
                overrides: CardOverrides {
                    // An invalid override must fail only this page.
                    line_break_at: Some(0),
                    ..CardOverrides::default()
                },
            }],
        };

        let results = generate_batch(&manifest, &CardConfig::default());
        assert!(results[0].url.is_none());
    }

    #[test]
    fn manifest_parses_with_and_without_overrides() {
        let json = r##"{
            "site_name": "example.com",
            "avatar": "avatar.png",
            "output_dir": "out",
            "url_path": "/img",
            "pages": [
                {"title": "Plain"},
                {"title": "Styled", "overrides": {"hide_chrome": true}}
            ]
        }"##;

        let manifest: BatchManifest = serde_json::from_str(json).unwrap();
        assert_eq!(manifest.pages.len(), 2);
        assert_eq!(manifest.pages[1].overrides.hide_chrome, Some(true));
    }
}
