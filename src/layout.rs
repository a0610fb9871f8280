//! Title wrapping and vertical centering.
//!
//! A page title of arbitrary length has to fit a fixed text area on the
//! card: at most [`MAX_ROWS`] rows of [`LINE_HEIGHT`]-pixel lines starting
//! at ([`TEXT_ORIGIN_X`], [`TEXT_ORIGIN_Y`]). [`wrap_title`] performs a
//! greedy width-bounded word wrap and truncates overlong titles with an
//! ellipsis; [`first_baseline_y`] shifts short titles down so they sit
//! centered within the space reserved for the maximum row count.
//!
//! Wrapping is purely character-count based — no glyph metrics. The wrap
//! width is chosen by the caller (`line_break_at`, default 35) to match the
//! fixed 38px font, which is close enough for a preview card and keeps the
//! layout engine free of font dependencies.

/// Maximum number of title rows on a card.
pub const MAX_ROWS: usize = 4;

/// Vertical distance between consecutive title baselines, in pixels.
pub const LINE_HEIGHT: u32 = 60;

/// Left edge of the title text block.
pub const TEXT_ORIGIN_X: u32 = 150;

/// Baseline of the first title row when all [`MAX_ROWS`] rows are used.
pub const TEXT_ORIGIN_Y: u32 = 210;

/// Truncation marker appended to the last row of an overlong title.
pub const ELLIPSIS: char = '…';

/// Split a title into word-like tokens.
///
/// A token boundary falls immediately after every character that is not
/// ASCII-alphanumeric, so punctuation stays attached to the word it follows
/// and whitespace becomes its own token. No characters are discarded:
/// concatenating the tokens reproduces the input exactly.
fn split_words(title: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    for c in title.chars() {
        current.push(c);
        if !c.is_ascii_alphanumeric() {
            words.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Wrap a title into at most `max_rows` display rows of roughly
/// `row_length` characters.
///
/// Tokens are accumulated greedily: when the current row plus the next
/// token would reach `row_length`, the row is closed and the token starts
/// the next one. A single token longer than `row_length` is kept whole —
/// the row overflows rather than splitting mid-word.
///
/// If the natural wrap needs more than `max_rows` rows, the result is cut
/// to `max_rows` and the last retained row gets an [`ELLIPSIS`] appended
/// (which may push it past `row_length`; that is accepted).
///
/// An empty title yields no rows. Callers are expected to reject empty
/// titles before invoking layout.
pub fn wrap_title(title: &str, row_length: usize, max_rows: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut row = String::new();
    for word in split_words(title) {
        if row.chars().count() + word.chars().count() >= row_length {
            rows.push(std::mem::take(&mut row));
        }
        row.push_str(&word);
    }
    if !row.is_empty() {
        rows.push(row);
    }

    if rows.len() > max_rows {
        rows.truncate(max_rows);
        rows[max_rows - 1].push(ELLIPSIS);
    }

    rows
}

/// Baseline y-coordinate of the first title row.
///
/// Titles using fewer than [`MAX_ROWS`] rows are shifted down by a third of
/// the unused line height so the block reads as vertically centered. The
/// divisor is an empirically tuned constant; snapshot stability depends on
/// reproducing this exact integer arithmetic.
pub fn first_baseline_y(row_count: usize) -> u32 {
    TEXT_ORIGIN_Y + (MAX_ROWS.saturating_sub(row_count) as u32 * LINE_HEIGHT) / 3
}
