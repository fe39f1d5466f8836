// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Token-budget truncation for function results.
//!
//! A function result re-enters the conversation as message content and must
//! fit a request-token budget. The policy is lossy truncate-from-the-end:
//! a fast approximate pass assuming ~4 characters per token, then 4-character
//! trims re-checked against the exact token count. No semantic truncation.

use once_cell::sync::Lazy;
use tiktoken_rs::{cl100k_base, CoreBPE};

/// Default truncation budget for a function result, in tokens.
pub const DEFAULT_REQUEST_MAX_TOKENS: usize = 2048;

/// Fast-pass approximation: ~4 characters per token.
const APPROX_CHARS_PER_TOKEN: usize = 4;

/// Trim granularity once inside the approximate bound.
const TRIM_STEP_CHARS: usize = 4;

static ENCODER: Lazy<CoreBPE> =
    Lazy::new(|| cl100k_base().expect("Failed to load cl100k_base encoding"));

/// Count the exact tokens in a text.
pub fn token_count(text: &str) -> usize {
    ENCODER.encode_with_special_tokens(text).len()
}

/// Shrink `text` until it is within `max_tokens`.
///
/// Each pass strictly shrinks the text, so the loop terminates; the worst
/// case degrades to 4-character trims near the boundary. Applying the
/// policy to its own output is a no-op.
pub fn truncate_to_token_budget(text: &str, max_tokens: usize) -> String {
    let mut text = text.to_string();

    while token_count(&text) > max_tokens {
        let chars = text.chars().count();
        let fast_cut = max_tokens.saturating_mul(APPROX_CHARS_PER_TOKEN);

        let keep = if chars > fast_cut {
            fast_cut
        } else {
            chars.saturating_sub(TRIM_STEP_CHARS)
        };

        text = text.chars().take(keep).collect();
        if text.is_empty() {
            break;
        }
    }

    text
}
