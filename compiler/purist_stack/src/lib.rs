//! Stack growth for deep recursion.
//!
//! Grammar evaluation recurses once per nested combinator, so a source file
//! with a few thousand nested parentheses or `case` blocks would overflow a
//! thread's native stack. Every recursive evaluation step goes through
//! [`ensure_sufficient_stack`], which grows the stack on demand.
//!
//! - **Native targets**: `stacker` allocates a new segment when less than
//!   [`RED_ZONE`] bytes remain.
//! - **WASM targets**: passthrough.

/// Grow when less than this much stack remains.
pub const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
pub const STACK_PER_RECURSION: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if fewer than [`RED_ZONE`] bytes remain.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_returns_closure_result() {
        assert_eq!(ensure_sufficient_stack(|| 42), 42);
        let result: Result<i32, &str> = ensure_sufficient_stack(|| Ok(123));
        assert_eq!(result, Ok(123));
    }

    #[test]
    fn test_deep_recursion() {
        // Each frame carries a buffer so a plain 8MB stack would not survive.
        fn nest(depth: u32) -> u32 {
            ensure_sufficient_stack(|| {
                let pad = [depth; 64];
                if depth == 0 {
                    0
                } else {
                    nest(depth - 1) + 1 + pad[0] - depth
                }
            })
        }

        assert_eq!(nest(100_000), 100_000);
    }
}
