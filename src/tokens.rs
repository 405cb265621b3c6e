// src/tokens.rs
//! Exact token counting for the tokenizer cost model.

use std::sync::LazyLock;
use tiktoken_rs::CoreBPE;

/// `cl100k_base`, loaded on first use. `None` if the encoding failed to load.
static BPE: LazyLock<Option<CoreBPE>> = LazyLock::new(|| {
    tiktoken_rs::cl100k_base()
        .map_err(|e| tracing::error!("failed to load cl100k_base tokenizer: {e}"))
        .ok()
});

pub struct Tokenizer;

impl Tokenizer {
    /// Token count of `text`, or `None` when the encoding is unavailable.
    #[must_use]
    pub fn try_count(text: &str) -> Option<usize> {
        BPE.as_ref().map(|bpe| bpe.encode_ordinary(text).len())
    }

    #[must_use]
    pub fn is_available() -> bool {
        BPE.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_no_tokens() {
        if let Some(n) = Tokenizer::try_count("") {
            assert_eq!(n, 0);
        }
    }

    #[test]
    fn longer_text_costs_more() {
        if !Tokenizer::is_available() {
            return;
        }
        assert!(Tokenizer::try_count("fn main() { println!(\"hi\"); }") > Tokenizer::try_count("fn"));
    }
}
