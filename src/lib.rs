//! # Social Card
//!
//! A build-time social-preview image generator for static sites. Give it a
//! page title, a site name, an avatar image, and styling options; it writes
//! a 1200×628 PNG next to your other build artifacts and hands back the
//! public URL for the page's `og:image` tag.
//!
//! # Architecture: One-Way Pipeline
//!
//! Every card is derived from scratch, in one direction:
//!
//! ```text
//! title ──► wrapped rows ──► SVG document ──► raster canvas ──► PNG file
//!   (layout)     (template)        (raster)         (raster)     (generate)
//! ```
//!
//! Each stage owns its output until it hands it to the next; there is no
//! shared mutable state, no cache, and nothing survives an invocation, so
//! any number of pages can render in parallel without coordination.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`layout`] | Greedy word wrap of the title into at most 4 rows, ellipsis truncation, vertical centering |
//! | [`template`] | Markup escaping and SVG document assembly: background, chrome, overlay, text layer |
//! | [`raster`] | SVG → pixels (resvg), avatar resize + composite, PNG encoding |
//! | [`config`] | `CardConfig` styling options: TOML loading, validation, per-page override merging |
//! | [`naming`] | Title → URL/filename slug |
//! | [`generate`] | The boundary operation: validate, render, write, return URL; batch mode over a page manifest |
//! | [`output`] | CLI report formatting — pure `format_*` functions, `print_*` wrappers |
//!
//! # Design Decisions
//!
//! ## SVG as the Intermediate Representation
//!
//! The card is assembled as an SVG string and rasterized with
//! [resvg](https://docs.rs/resvg) rather than drawn through a canvas API.
//! The template stays inspectable (tests assert on markup substrings, not
//! pixels), and the `custom_svg` option falls out for free: callers inject
//! arbitrary decorative markup without the engine understanding it.
//!
//! ## Pure-Rust Rasterization (No Headless Browser)
//!
//! resvg + the `image` crate are statically linked, so card generation
//! works in any CI container with zero system dependencies — no Chromium,
//! no ImageMagick, no native font shaping library to install.
//!
//! ## Partial Failure By Design
//!
//! One page's corrupt avatar must not kill a 500-page build. The forgiving
//! entry point ([`generate::generate`]) reports every failure to stderr
//! with full context and returns `None`; the strict one
//! ([`generate::try_generate`]) propagates typed errors for callers that
//! want to fail hard.
//!
//! ## Explicit Configuration, No Globals
//!
//! The resolved option set is a plain immutable value passed into each
//! render call. Site-wide defaults and per-page overrides are merged up
//! front ([`config::CardConfig::merge`]), so concurrent renders with
//! different styling never observe each other.

pub mod config;
pub mod generate;
pub mod layout;
pub mod naming;
pub mod output;
pub mod raster;
pub mod template;

#[cfg(test)]
pub(crate) mod test_helpers;
