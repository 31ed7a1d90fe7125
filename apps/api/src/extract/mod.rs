//! Tolerant extraction helpers shared by every adapter.
//!
//! Upstream markup is unstable, so nothing in this module fails hard: each
//! field is located through an ordered list of candidate selectors or
//! patterns, the first hit wins, and a total miss yields the caller's
//! default value.

pub mod html;
pub mod text;
pub mod time;
