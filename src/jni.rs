//! JNI bindings for Android.
//!
//! Thin wrappers translating Java-visible symbol names onto the
//! `ffi` module's C-ABI functions.

#![cfg(target_os = "android")]

use jni::objects::{JClass, JString};
use jni::sys::{jboolean, jstring, JNI_FALSE, JNI_TRUE};
use jni::JNIEnv;
use std::ffi::CString;

use crate::ffi;

#[no_mangle]
pub extern "system" fn Java_com_urlfilter_FilterEngine_nativeInit(_env: JNIEnv, _class: JClass) -> jboolean {
    if ffi::urlfilter_init() {
        JNI_TRUE
    } else {
        JNI_FALSE
    }
}

#[no_mangle]
pub extern "system" fn Java_com_urlfilter_FilterEngine_nativeLoadFilterRules(
    env: JNIEnv,
    _class: JClass,
    text: JString,
) -> jboolean {
    let text = match env.get_string(text) {
        Ok(s) => s,
        Err(_) => return JNI_FALSE,
    };
    let text_cstr = match CString::new(text.to_string_lossy().as_bytes()) {
        Ok(s) => s,
        Err(_) => return JNI_FALSE,
    };

    let success = unsafe { ffi::urlfilter_load_filter_rules(text_cstr.as_ptr()) };
    if success {
        JNI_TRUE
    } else {
        JNI_FALSE
    }
}

#[no_mangle]
pub extern "system" fn Java_com_urlfilter_FilterEngine_nativeShouldBlock(
    env: JNIEnv,
    _class: JClass,
    url: JString,
) -> jboolean {
    let url = match env.get_string(url) {
        Ok(s) => s,
        Err(_) => return JNI_FALSE,
    };
    let url_cstr = match CString::new(url.to_string_lossy().as_bytes()) {
        Ok(s) => s,
        Err(_) => return JNI_FALSE,
    };

    let should_block = unsafe { ffi::urlfilter_should_block(url_cstr.as_ptr()) };
    if should_block {
        JNI_TRUE
    } else {
        JNI_FALSE
    }
}

#[no_mangle]
pub extern "system" fn Java_com_urlfilter_FilterEngine_nativeClearFilters(
    _env: JNIEnv,
    _class: JClass,
) -> jboolean {
    if ffi::urlfilter_clear_filters() {
        JNI_TRUE
    } else {
        JNI_FALSE
    }
}

#[no_mangle]
pub extern "system" fn Java_com_urlfilter_FilterEngine_nativeNormalizeUrl(
    env: JNIEnv,
    _class: JClass,
    url: JString,
) -> jstring {
    let url = match env.get_string(url) {
        Ok(s) => s,
        Err(_) => return std::ptr::null_mut(),
    };
    let url_cstr = match CString::new(url.to_string_lossy().as_bytes()) {
        Ok(s) => s,
        Err(_) => return std::ptr::null_mut(),
    };

    let result_ptr = unsafe { ffi::urlfilter_normalize_url(url_cstr.as_ptr()) };
    if result_ptr.is_null() {
        return std::ptr::null_mut();
    }

    let result_cstr = unsafe { std::ffi::CStr::from_ptr(result_ptr) };
    let result = match env.new_string(result_cstr.to_string_lossy()) {
        Ok(s) => s.into_inner(),
        Err(_) => std::ptr::null_mut(),
    };

    unsafe { ffi::urlfilter_free_string(result_ptr) };
    result
}

#[no_mangle]
pub extern "system" fn Java_com_urlfilter_FilterEngine_nativeCleanup(_env: JNIEnv, _class: JClass) {
    ffi::urlfilter_cleanup();
}
