//! C ABI over [`Bitset`].
//!
//! Handles are opaque `Bitset` pointers obtained from `bitset_malloc` or `bitset_dup` and released
//! with `bitset_free`. Fallible calls return a [`BitsetStatus`].
//!
//! # Safety
//!
//! Every pointer argument must be null or a live handle returned by this module. A handle must not
//! be used after `bitset_free`, and must not be used from two threads at once.

use std::os::raw::c_uint;
use std::ptr;

use crate::{Bitset, BitsetError, MergeOp};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitsetStatus {
    Ok = 0,
    /// A handle or output pointer was null.
    InvalidArgument = 1,
    OutOfRange = 2,
    OutOfMemory = 3,
}

impl From<&BitsetError> for BitsetStatus {
    fn from(err: &BitsetError) -> Self {
        match err {
            BitsetError::InvalidArgument(_) => BitsetStatus::InvalidArgument,
            BitsetError::OutOfRange { .. } => BitsetStatus::OutOfRange,
            BitsetError::Allocation { .. } => BitsetStatus::OutOfMemory,
        }
    }
}

fn status(call: &str, result: Result<(), BitsetError>) -> BitsetStatus {
    match result {
        Ok(()) => BitsetStatus::Ok,
        Err(err) => {
            log::debug!("[capi::{}] {}", call, err);
            BitsetStatus::from(&err)
        }
    }
}

fn null(call: &str, argument: &'static str) -> BitsetStatus {
    status(call, Err(BitsetError::InvalidArgument(argument)))
}

fn into_handle(call: &str, result: Result<Bitset, BitsetError>) -> *mut Bitset {
    match result {
        Ok(set) => Box::into_raw(Box::new(set)),
        Err(err) => {
            log::debug!("[capi::{}] {}", call, err);
            ptr::null_mut()
        }
    }
}

/// Allocates a zeroed bitset of `length` bits. Returns NULL when storage cannot be allocated.
///
/// # Safety
/// The returned handle must be released with `bitset_free`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bitset_malloc(length: usize) -> *mut Bitset {
    into_handle("bitset_malloc", Bitset::new(length))
}

/// Copies `set` into a new handle. Returns NULL if `set` is NULL or allocation fails.
///
/// # Safety
/// `set` must be NULL or a live handle. The returned handle must be released with `bitset_free`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bitset_dup(set: *const Bitset) -> *mut Bitset {
    let Some(set) = (unsafe { set.as_ref() }) else {
        null("bitset_dup", "set");
        return ptr::null_mut();
    };
    into_handle("bitset_dup", set.duplicate())
}

/// Resizes `set` to `length` bits. On `OutOfMemory` the set is unchanged.
///
/// # Safety
/// `set` must be NULL or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bitset_resize(set: *mut Bitset, length: usize) -> BitsetStatus {
    match unsafe { set.as_mut() } {
        Some(set) => status("bitset_resize", set.resize(length)),
        None => null("bitset_resize", "set"),
    }
}

/// Releases `set`. NULL is ignored.
///
/// # Safety
/// `set` must be NULL or a live handle, and is dangling afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bitset_free(set: *mut Bitset) {
    if !set.is_null() {
        drop(unsafe { Box::from_raw(set) });
    }
}

/// # Safety
/// `set` must be NULL or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bitset_length(set: *const Bitset) -> usize {
    unsafe { set.as_ref() }.map_or(0, Bitset::len)
}

/// # Safety
/// `set` must be NULL or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bitset_word_count(set: *const Bitset) -> usize {
    unsafe { set.as_ref() }.map_or(0, Bitset::word_count)
}

/// # Safety
/// `set` must be NULL or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bitset_set(set: *mut Bitset, bit: usize) -> BitsetStatus {
    match unsafe { set.as_mut() } {
        Some(set) => status("bitset_set", set.set(bit)),
        None => null("bitset_set", "set"),
    }
}

/// # Safety
/// `set` must be NULL or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bitset_reset(set: *mut Bitset, bit: usize) -> BitsetStatus {
    match unsafe { set.as_mut() } {
        Some(set) => status("bitset_reset", set.reset(bit)),
        None => null("bitset_reset", "set"),
    }
}

/// # Safety
/// `set` must be NULL or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bitset_toggle(set: *mut Bitset, bit: usize) -> BitsetStatus {
    match unsafe { set.as_mut() } {
        Some(set) => status("bitset_toggle", set.toggle(bit)),
        None => null("bitset_toggle", "set"),
    }
}

/// Writes 0 or 1 to `value`.
///
/// # Safety
/// `set` must be NULL or a live handle, `value` NULL or valid for a write.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bitset_test(
    set: *const Bitset,
    bit: usize,
    value: *mut c_uint,
) -> BitsetStatus {
    let Some(set) = (unsafe { set.as_ref() }) else {
        return null("bitset_test", "set");
    };
    let Some(value) = (unsafe { value.as_mut() }) else {
        return null("bitset_test", "value");
    };
    status(
        "bitset_test",
        set.test(bit).map(|bit| *value = c_uint::from(bit)),
    )
}

/// # Safety
/// `dst` and `src` must each be NULL or a live handle. They may be the same handle.
unsafe fn merge(call: &str, dst: *mut Bitset, src: *const Bitset, op: MergeOp) -> BitsetStatus {
    if dst.is_null() {
        return null(call, "dst");
    }
    if src.is_null() {
        return null(call, "src");
    }

    if ptr::eq(dst, src) {
        unsafe { &mut *dst }.merge_in_place(op);
    } else {
        let (dst, src) = unsafe { (&mut *dst, &*src) };
        dst.merge(src, op);
    }
    BitsetStatus::Ok
}

/// # Safety
/// `dst` and `src` must each be NULL or a live handle. They may be the same handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bitset_and(dst: *mut Bitset, src: *const Bitset) -> BitsetStatus {
    unsafe { merge("bitset_and", dst, src, MergeOp::And) }
}

/// # Safety
/// `dst` and `src` must each be NULL or a live handle. They may be the same handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bitset_or(dst: *mut Bitset, src: *const Bitset) -> BitsetStatus {
    unsafe { merge("bitset_or", dst, src, MergeOp::Or) }
}

/// # Safety
/// `dst` and `src` must each be NULL or a live handle. They may be the same handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bitset_xor(dst: *mut Bitset, src: *const Bitset) -> BitsetStatus {
    unsafe { merge("bitset_xor", dst, src, MergeOp::Xor) }
}

/// # Safety
/// `dst` and `src` must each be NULL or a live handle. They may be the same handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bitset_and_not(dst: *mut Bitset, src: *const Bitset) -> BitsetStatus {
    unsafe { merge("bitset_and_not", dst, src, MergeOp::AndNot) }
}

/// # Safety
/// `dst` must be NULL or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bitset_not(dst: *mut Bitset) -> BitsetStatus {
    unsafe { merge("bitset_not", dst, dst, MergeOp::Not) }
}

/// # Safety
/// `set` must be NULL or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bitset_clear(set: *mut Bitset) -> BitsetStatus {
    match unsafe { set.as_mut() } {
        Some(set) => {
            set.clear();
            BitsetStatus::Ok
        }
        None => null("bitset_clear", "set"),
    }
}
