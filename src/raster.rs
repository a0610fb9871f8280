//! Rasterization — SVG document to finished PNG bytes.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Parse SVG | `usvg::Tree::from_str` |
//! | Fonts | `fontdb` (system fonts + custom font registration) |
//! | Render | `resvg::render` into a `tiny_skia::Pixmap` |
//! | Avatar decode (JPEG, PNG, WebP) | `image` crate (pure Rust decoders) |
//! | Avatar resize | `DynamicImage::resize`, Lanczos3, fit-within |
//! | Composite | `image::imageops::overlay` |
//! | Encode → PNG | `image::codecs::png::PngEncoder` |
//!
//! Everything is statically linked — no headless browser, no system
//! ImageMagick, so a CI runner or a bare container can build cards with
//! nothing installed.
//!
//! The avatar is composited *after* rasterization rather than referenced
//! from inside the SVG. That keeps the vector document free of external
//! resource resolution and gives the avatar a real raster resize (Lanczos3)
//! instead of whatever filtering the SVG renderer would apply.

use crate::config::CardConfig;
use crate::template::{self, CANVAS_HEIGHT, CANVAS_WIDTH};
use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::{ImageReader, RgbaImage};
use std::path::Path;
use thiserror::Error;
use usvg::fontdb;

/// Edge length of the square box the avatar is resized into.
pub const AVATAR_SIZE: u32 = 100;

/// Horizontal offset of the composited avatar on the canvas.
pub const AVATAR_LEFT: i64 = 150;

/// Vertical offset of the composited avatar on the canvas.
pub const AVATAR_TOP: i64 = 440;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("SVG error: {0}")]
    Svg(#[from] usvg::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Rendering failed: {0}")]
    RenderFailed(String),
}

/// Render one card to PNG bytes.
///
/// `rows` is the wrapped title from [`crate::layout::wrap_title`]; the
/// config must be fully resolved. Assembles the vector document, rasterizes
/// it to the fixed 1200×628 canvas, composites the avatar at
/// ([`AVATAR_LEFT`], [`AVATAR_TOP`]), and encodes the result.
pub fn render(
    rows: &[String],
    site_name: &str,
    avatar: &Path,
    config: &CardConfig,
) -> Result<Vec<u8>, RenderError> {
    let document = template::build_document(rows, site_name, config);
    let mut canvas = rasterize(&document, config.custom_font.as_deref())?;
    let inset = avatar_inset(avatar)?;
    image::imageops::overlay(&mut canvas, &inset, AVATAR_LEFT, AVATAR_TOP);
    encode_png(&canvas)
}

/// Build the font database for rasterization.
///
/// System fonts back the generic `sans-serif` fallback. A custom font file
/// is loaded on top, and its first face's family is mapped as the
/// sans-serif family — the document's `'cust',sans-serif` chain then
/// resolves to the custom face no matter what family name the font file
/// itself declares.
fn font_database(custom_font: Option<&Path>) -> Result<fontdb::Database, RenderError> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    if let Some(font) = custom_font {
        db.load_font_file(font)?;
        let family = db.faces().find_map(|face| {
            let source_path = match &face.source {
                fontdb::Source::File(path) | fontdb::Source::SharedFile(path, _) => Some(path),
                fontdb::Source::Binary(_) => None,
            };
            match source_path {
                Some(path) if path.as_path() == font => {
                    face.families.first().map(|(name, _)| name.clone())
                }
                _ => None,
            }
        });
        match family {
            Some(name) => db.set_sans_serif_family(name),
            None => {
                return Err(RenderError::RenderFailed(format!(
                    "no usable font face in {}",
                    font.display()
                )));
            }
        }
    }

    Ok(db)
}

/// Rasterize the vector document into an RGBA canvas of the fixed card size.
fn rasterize(document: &str, custom_font: Option<&Path>) -> Result<RgbaImage, RenderError> {
    let mut options = usvg::Options::default();
    *options.fontdb_mut() = font_database(custom_font)?;
    let tree = usvg::Tree::from_str(document, &options)?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(CANVAS_WIDTH, CANVAS_HEIGHT)
        .ok_or_else(|| RenderError::RenderFailed("failed to allocate canvas pixmap".into()))?;

    let sx = CANVAS_WIDTH as f32 / tree.size().width();
    let sy = CANVAS_HEIGHT as f32 / tree.size().height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    rgba_from_pixmap(&pixmap)
}

/// Convert a premultiplied tiny-skia pixmap into a straight-alpha
/// [`RgbaImage`] the `image` crate can composite onto.
fn rgba_from_pixmap(pixmap: &resvg::tiny_skia::Pixmap) -> Result<RgbaImage, RenderError> {
    let mut data = Vec::with_capacity(pixmap.pixels().len() * 4);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), data)
        .ok_or_else(|| RenderError::RenderFailed("pixmap buffer size mismatch".into()))
}

/// Load the avatar and resize it to fit within the avatar box.
///
/// Fit-within semantics: the aspect ratio is preserved and nothing is
/// cropped, so a non-square avatar comes out smaller than
/// [`AVATAR_SIZE`]×[`AVATAR_SIZE`] on one axis.
fn avatar_inset(path: &Path) -> Result<RgbaImage, RenderError> {
    let avatar = ImageReader::open(path)?.decode()?;
    Ok(avatar
        .resize(AVATAR_SIZE, AVATAR_SIZE, FilterType::Lanczos3)
        .to_rgba8())
}

/// Encode the finished canvas as PNG bytes.
fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::new();
    canvas.write_with_encoder(PngEncoder::new(&mut bytes))?;
    Ok(bytes)
}
