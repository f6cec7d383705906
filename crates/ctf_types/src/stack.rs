//! Stack growth for recursive instantiation and copy.
//!
//! Declarations nest arbitrarily deep (structs of variants of structs), and
//! both instantiation and transcoding recurse once per level. Native targets
//! grow the stack on demand with `stacker`; WASM calls straight through.

/// Minimum stack space to keep available (64KB red zone).
const RED_ZONE: usize = 64 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
