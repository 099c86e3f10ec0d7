//! Host stack headroom for method invocation.
//!
//! Each interpreted call nests `invoke`, `exec_block`, `eval_expr` and
//! `eval_call` on the Rust stack, so an Adv method that recurses a few
//! thousand times would overflow a default thread stack. Every invocation
//! goes through [`ensure_sufficient_stack`], which moves onto a fresh
//! segment when headroom runs low. The optional call-depth limit is the
//! only bound on recursion.

/// Headroom one invocation needs before its body starts (128KB).
#[cfg(not(target_arch = "wasm32"))]
const MIN_HEADROOM: usize = 128 * 1024;

/// Segment allocated when headroom runs out (2MB, room for many calls).
#[cfg(not(target_arch = "wasm32"))]
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f` with at least [`MIN_HEADROOM`] bytes of stack available.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(MIN_HEADROOM, SEGMENT_SIZE, f)
}

/// wasm32 has no stack switching; deep recursion traps instead.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
