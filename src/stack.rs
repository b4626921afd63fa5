//! Stack growth for the recursive parser and evaluator.
//!
//! A Tanglish call nests several evaluator frames, so deep recursion in a
//! program would overflow the native stack long before `max_depth` is hit.
//! Wrapping the recursive entry points in [`ensure_sufficient_stack`] moves
//! the remainder of the recursion onto freshly allocated segments instead.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
