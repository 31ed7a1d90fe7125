// Coding-platform statistics: the uniform record, username validation, and
// one adapter per upstream. Handlers own the degrade-to-defaults policy.

pub mod codechef;
pub mod hackerrank;
pub mod handlers;
pub mod leetcode;
pub mod models;
pub mod username;
