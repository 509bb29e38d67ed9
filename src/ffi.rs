//! FFI bindings for the heatmap engine
//!
//! This module provides C-compatible functions for calling the engine from a
//! rendering layer written in another language. All functions use C strings
//! (null-terminated) and return allocated memory that must be freed by the
//! caller using `heatmap_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::classifier::classify;
use crate::config::HeatmapConfig;
use crate::pipeline::{render_heatmap, HeatmapRenderer};
use crate::types::MetricKind;

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Read the three string arguments shared by the render functions
unsafe fn render_args(
    series_json: *const c_char,
    metric: *const c_char,
    today: *const c_char,
) -> Option<(String, String, String)> {
    let Some(series) = cstr_to_string(series_json) else {
        set_last_error("Invalid series JSON string pointer");
        return None;
    };
    let Some(metric) = cstr_to_string(metric) else {
        set_last_error("Invalid metric string pointer");
        return None;
    };
    let Some(today) = cstr_to_string(today) else {
        set_last_error("Invalid today string pointer");
        return None;
    };
    Some((series, metric, today))
}

// ============================================================================
// Stateless API
// ============================================================================

/// Render one metric's heatmap payload as JSON using the default layout.
///
/// # Safety
/// - `series_json`, `metric`, and `today` must be valid null-terminated C strings.
/// - Returns a newly allocated string that must be freed with `heatmap_free_string`.
/// - Returns NULL on error; call `heatmap_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn heatmap_render(
    series_json: *const c_char,
    metric: *const c_char,
    today: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let Some((series, metric, today)) = render_args(series_json, metric, today) else {
        return ptr::null_mut();
    };

    match render_heatmap(series, metric, today) {
        Ok(payload) => string_to_cstr(&payload),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Classify a single value.
///
/// A NaN `value` stands for "no data". Returns the level, or -1 when the
/// metric name is not recognized.
///
/// # Safety
/// - `metric` must be a valid null-terminated C string.
#[no_mangle]
pub unsafe extern "C" fn heatmap_classify(value: f64, metric: *const c_char) -> i32 {
    clear_last_error();

    let Some(metric) = cstr_to_string(metric) else {
        set_last_error("Invalid metric string pointer");
        return -1;
    };

    match metric.parse::<MetricKind>() {
        Ok(metric) => {
            let value = (!value.is_nan()).then_some(value);
            i32::from(classify(value, metric))
        }
        Err(e) => {
            set_last_error(&e.to_string());
            -1
        }
    }
}

// ============================================================================
// Configured Renderer API
// ============================================================================

/// Opaque handle to a HeatmapRenderer
pub struct HeatmapRendererHandle {
    renderer: HeatmapRenderer,
}

/// Create a renderer from a JSON configuration, or the defaults when
/// `config_json` is NULL.
///
/// # Safety
/// - `config_json` must be NULL or a valid null-terminated C string.
/// - Returns a pointer that must be freed with `heatmap_renderer_free`.
/// - Returns NULL on error; call `heatmap_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn heatmap_renderer_new(config_json: *const c_char) -> *mut HeatmapRendererHandle {
    clear_last_error();

    let renderer = if config_json.is_null() {
        HeatmapRenderer::new()
    } else {
        let Some(json) = cstr_to_string(config_json) else {
            set_last_error("Invalid config JSON string pointer");
            return ptr::null_mut();
        };
        match HeatmapConfig::from_json(&json).and_then(HeatmapRenderer::with_config) {
            Ok(renderer) => renderer,
            Err(e) => {
                set_last_error(&e.to_string());
                return ptr::null_mut();
            }
        }
    };

    Box::into_raw(Box::new(HeatmapRendererHandle { renderer }))
}

/// Free a renderer.
///
/// # Safety
/// - `renderer` must be a valid pointer returned by `heatmap_renderer_new`, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn heatmap_renderer_free(renderer: *mut HeatmapRendererHandle) {
    if !renderer.is_null() {
        drop(Box::from_raw(renderer));
    }
}

/// Render one metric's heatmap payload as JSON with a configured renderer.
///
/// # Safety
/// - `renderer` must be a valid pointer returned by `heatmap_renderer_new`.
/// - `series_json`, `metric`, and `today` must be valid null-terminated C strings.
/// - Returns a newly allocated string that must be freed with `heatmap_free_string`.
/// - Returns NULL on error; call `heatmap_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn heatmap_renderer_render(
    renderer: *const HeatmapRendererHandle,
    series_json: *const c_char,
    metric: *const c_char,
    today: *const c_char,
) -> *mut c_char {
    clear_last_error();

    if renderer.is_null() {
        set_last_error("Null renderer pointer");
        return ptr::null_mut();
    }
    let handle = &*renderer;

    let Some((series, metric, today)) = render_args(series_json, metric, today) else {
        return ptr::null_mut();
    };

    match handle.renderer.render_json(&series, &metric, &today) {
        Ok(payload) => string_to_cstr(&payload),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by heatmap functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a heatmap function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn heatmap_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next heatmap function call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn heatmap_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

/// Get the library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn heatmap_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
