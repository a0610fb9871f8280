//! SVG document assembly.
//!
//! The card is composed as an SVG string first and rasterized afterwards
//! ([`crate::raster`]). Building markup text instead of driving a canvas
//! API keeps every visual decision in one template that can be unit tested
//! by substring, and lets callers inject their own decorative fragments
//! (`custom_svg`) without the engine understanding them.
//!
//! Layer order, bottom to top:
//!
//! 1. background rect (solid color or `bg-gradient`)
//! 2. terminal-window chrome (unless hidden)
//! 3. caller-supplied `custom_svg`, verbatim
//! 4. text layer: title rows + site name
//!
//! All caller text (title rows, site name) goes through [`escape_markup`].
//! The `custom_svg` fragment deliberately does not — it is trusted input
//! meant to carry real markup.

use crate::config::CardConfig;
use crate::layout::{self, LINE_HEIGHT, TEXT_ORIGIN_X};
use std::path::Path;

/// Card width in pixels, fixed by the social-preview aspect ratio.
pub const CANVAS_WIDTH: u32 = 1200;

/// Card height in pixels.
pub const CANVAS_HEIGHT: u32 = 628;

/// Title font size in pixels.
pub const FONT_SIZE: u32 = 38;

const SITE_NAME_X: u32 = 265;
const SITE_NAME_Y: u32 = 500;
const SITE_NAME_FONT_SIZE: u32 = 30;

/// Escape text for embedding into the SVG document.
///
/// Neutralizes the five reserved markup characters in a single pass:
/// `&` `<` `>` `"` `'`. Text without reserved characters passes through
/// unchanged.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Build the `<stop>` list for the background gradient.
///
/// Stops are spread evenly: for `n` colors, stop `i` sits at
/// `i * (100 / (n - 1))` percent, with integer floor division. The floor
/// means the last stop does not always land exactly on 100% (e.g. 0/33/66/99
/// for four colors) — accepted, and relied on by snapshot tests; do not
/// round instead.
pub fn gradient_stops(colors: &[String]) -> String {
    let stop_gap = 100 / (colors.len() - 1);
    colors
        .iter()
        .enumerate()
        .map(|(i, color)| format!(r#"<stop offset="{}%" stop-color="{}" />"#, i * stop_gap, color))
        .collect()
}

fn gradient_def(colors: &[String]) -> String {
    format!(
        r#"<linearGradient id="bg-gradient" x1="0" y1="0" x2="1" y2="1">{}</linearGradient>"#,
        gradient_stops(colors)
    )
}

/// `@font-face` declaration binding the `cust` family to a font file.
fn font_face(font: &Path) -> String {
    format!(
        r#"@font-face {{
				font-family: 'cust';
				font-style: 'normal';
				src: url("{}");
			}}"#,
        font.display()
    )
}

/// The decorative terminal-window chrome: a rounded title bar rect plus the
/// three traffic-light dots.
fn chrome_window(chrome_color: &str) -> String {
    format!(
        r##"<rect x="100" y="64" width="1000" height="500" rx="16" ry="16" fill="{chrome_color}" stroke-width="1" stroke="#aaa" />
		<circle cx="135" cy="100" r="12" fill="#FD5454" />
		<circle cx="170" cy="100" r="12" fill="#F6B23C" />
		<circle cx="205" cy="100" r="12" fill="#22C036" />"##
    )
}

/// One positioned, escaped `<text>` element per wrapped title row.
///
/// Rows start at the vertically centered baseline for this row count and
/// step down by [`LINE_HEIGHT`].
fn title_elements(rows: &[String], title_color: &str) -> String {
    let start_y = layout::first_baseline_y(rows.len());
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            format!(
                r#"<text x="{TEXT_ORIGIN_X}" y="{}" fill="{title_color}" font-size="{FONT_SIZE}px" font-weight="700">{}</text>"#,
                start_y + i as u32 * LINE_HEIGHT,
                escape_markup(row)
            )
        })
        .collect()
}

/// Assemble the complete vector document for one card.
///
/// `rows` is the already-wrapped title (see [`layout::wrap_title`]); the
/// config must be fully resolved. The returned string is a self-describing
/// SVG image of [`CANVAS_WIDTH`]×[`CANVAS_HEIGHT`].
pub fn build_document(rows: &[String], site_name: &str, config: &CardConfig) -> String {
    let custom_font = config
        .custom_font
        .as_deref()
        .map(|font| font_face(font))
        .unwrap_or_default();

    let (background_fill, background_def) = match config.solid_background() {
        Some(color) => (color.to_string(), String::new()),
        None => (
            "url(#bg-gradient)".to_string(),
            gradient_def(&config.bg_gradient),
        ),
    };

    let chrome = if config.hide_chrome {
        String::new()
    } else {
        chrome_window(&config.chrome_color)
    };

    format!(
        r##"<svg width="{CANVAS_WIDTH}" height="{CANVAS_HEIGHT}" viewBox="0 0 {CANVAS_WIDTH} {CANVAS_HEIGHT}" xmlns="http://www.w3.org/2000/svg">

	<defs>
		<style>
			{custom_font}
		</style>
		{background_def}
	</defs>

	<rect x="0" y="0" width="{CANVAS_WIDTH}" height="{CANVAS_HEIGHT}" rx="0" ry="0" fill="{background_fill}" />

	{chrome}

	{custom_svg}

	<g style="font-family:'cust',sans-serif">
		{title}
		<text x="{SITE_NAME_X}" y="{SITE_NAME_Y}" fill="#fff" font-size="{SITE_NAME_FONT_SIZE}px" font-weight="700">{site_name}</text>
	</g>
</svg>"##,
        custom_svg = config.custom_svg,
        title = title_elements(rows, &config.title_color),
        site_name = escape_markup(site_name),
    )
}
