//! scorelayout: page layout engine for multi-track music scores.
//!
//! Decides which bars go on which line of a fixed-width page, justifies each
//! line to the page width, stacks the lines below a score info header and
//! paints the result (SVG out of the box).
//!
//! # Example
//! ```
//! use scorelayout::{layout_score, MasterBar, Score, Settings, Track};
//!
//! let score = Score {
//!     title: Some("Etude".into()),
//!     master_bars: vec![MasterBar::new(); 12],
//!     tracks: vec![Track::new("Piano")],
//!     ..Score::default()
//! };
//! let settings = Settings::default().with_option("barsPerRow", 4);
//! let page = layout_score(&score, &settings)?;
//! assert_eq!(page.groups.len(), 3);
//! # Ok::<(), scorelayout::LayoutError>(())
//! ```

pub mod error;
pub mod model;
pub mod renderer;
pub mod settings;
pub mod tuning;

#[cfg(target_os = "android")]
pub mod android;

pub use error::{LayoutError, Result};
pub use model::*;
pub use renderer::{build_boundings_lookup, layout_score, render_score_to_svg, PageLayoutSummary};
pub use settings::{LayoutSettings, Settings};

/// Parse a score from JSON.
pub fn parse_score_json(json: &str) -> Result<Score> {
    Ok(serde_json::from_str(json)?)
}

/// Parse settings from JSON. An empty string yields the defaults.
pub fn parse_settings_json(json: &str) -> Result<Settings> {
    if json.trim().is_empty() {
        return Ok(Settings::default());
    }
    Settings::from_json(json)
}

/// Serialize a layout summary to JSON.
pub fn layout_to_json(page: &PageLayoutSummary) -> Result<String> {
    Ok(serde_json::to_string(page)?)
}

/// Lay out a JSON score with JSON settings and return the layout as JSON.
pub fn layout_json(score_json: &str, settings_json: &str) -> Result<String> {
    let score = parse_score_json(score_json)?;
    let settings = parse_settings_json(settings_json)?;
    layout_to_json(&layout_score(&score, &settings)?)
}

/// Render a JSON score with JSON settings to SVG.
pub fn render_json_to_svg(score_json: &str, settings_json: &str) -> Result<String> {
    let score = parse_score_json(score_json)?;
    let settings = parse_settings_json(settings_json)?;
    render_score_to_svg(&score, &settings)
}

// ═══════════════════════════════════════════════════════════════════════
// C FFI: for iOS (static library) and Android (JNI)
// ═══════════════════════════════════════════════════════════════════════

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Read an optional C string; null means "".
///
/// # Safety
/// `ptr` must be null or a valid null-terminated C string.
unsafe fn c_str_or_empty<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return Some("");
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

fn into_c_string(result: Result<String>) -> *mut c_char {
    match result {
        Ok(s) => CString::new(s).unwrap_or_default().into_raw(),
        Err(e) => {
            log::warn!("scorelayout FFI call failed: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Render a JSON score to SVG and return it as a C string.
/// The caller must free the returned string with `scorelayout_free_string`.
///
/// # Safety
/// `score_json` must be a valid null-terminated UTF-8 C string.
/// `settings_json` may be null (default settings).
#[no_mangle]
pub unsafe extern "C" fn scorelayout_render_json(
    score_json: *const c_char,
    settings_json: *const c_char,
) -> *mut c_char {
    if score_json.is_null() {
        return std::ptr::null_mut();
    }
    let (Some(score), Some(settings)) =
        (unsafe { c_str_or_empty(score_json) }, unsafe { c_str_or_empty(settings_json) })
    else {
        return std::ptr::null_mut();
    };
    into_c_string(render_json_to_svg(score, settings))
}

/// Lay out a JSON score and return the layout summary as a JSON C string.
/// The caller must free the returned string with `scorelayout_free_string`.
///
/// # Safety
/// `score_json` must be a valid null-terminated UTF-8 C string.
/// `settings_json` may be null (default settings).
#[no_mangle]
pub unsafe extern "C" fn scorelayout_layout_json(
    score_json: *const c_char,
    settings_json: *const c_char,
) -> *mut c_char {
    if score_json.is_null() {
        return std::ptr::null_mut();
    }
    let (Some(score), Some(settings)) =
        (unsafe { c_str_or_empty(score_json) }, unsafe { c_str_or_empty(settings_json) })
    else {
        return std::ptr::null_mut();
    };
    into_c_string(layout_json(score, settings))
}

/// Free a string previously returned by scorelayout functions.
///
/// # Safety
/// `ptr` must be a string previously returned by a scorelayout function, or null.
#[no_mangle]
pub unsafe extern "C" fn scorelayout_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}
