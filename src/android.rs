//! JNI bindings for Android.
//!
//! These functions are called from Kotlin via the JNI bridge.

use jni::objects::{JClass, JString};
use jni::sys::jstring;
use jni::JNIEnv;

use crate::{layout_json, render_json_to_svg, Result};

fn read_settings(env: &mut JNIEnv, settings_json: &JString) -> Option<String> {
    if settings_json.is_null() {
        return Some(String::new());
    }
    env.get_string(settings_json).ok().map(|s| s.into())
}

fn to_jstring(env: &mut JNIEnv, result: Result<String>) -> jstring {
    match result {
        Ok(out) => match env.new_string(&out) {
            Ok(js) => js.into_raw(),
            Err(_) => std::ptr::null_mut(),
        },
        Err(e) => {
            log::warn!("scorelayout JNI call failed: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Render a JSON score to SVG.
///
/// Called from Kotlin as:
///   external fun renderJson(scoreJson: String, settingsJson: String?): String?
#[no_mangle]
pub extern "system" fn Java_com_scorelayout_ScoreLayout_renderJson(
    mut env: JNIEnv,
    _class: JClass,
    score_json: JString,
    settings_json: JString,
) -> jstring {
    let score: String = match env.get_string(&score_json) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };
    let Some(settings) = read_settings(&mut env, &settings_json) else {
        return std::ptr::null_mut();
    };

    let result = render_json_to_svg(&score, &settings);
    to_jstring(&mut env, result)
}

/// Lay out a JSON score and return the line/bar positions as JSON.
///
/// Called from Kotlin as:
///   external fun layoutJson(scoreJson: String, settingsJson: String?): String?
#[no_mangle]
pub extern "system" fn Java_com_scorelayout_ScoreLayout_layoutJson(
    mut env: JNIEnv,
    _class: JClass,
    score_json: JString,
    settings_json: JString,
) -> jstring {
    let score: String = match env.get_string(&score_json) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };
    let Some(settings) = read_settings(&mut env, &settings_json) else {
        return std::ptr::null_mut();
    };

    let result = layout_json(&score, &settings);
    to_jstring(&mut env, result)
}
