//! Content-stream analysis.
//!
//! The `--analyze` mode of the CLI: instead of rendering, tally how often
//! each operator appears in a page's content stream. Counts keep
//! first-seen order so the summary reads in roughly stream order.

use crate::tokenizer::{Token, Tokenizer};

/// Count operator occurrences in a decoded content stream.
///
/// Only operator lexemes are counted; operands (numbers, names, strings)
/// and array delimiters are not.
pub fn analyze_operators(content: &[u8]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();

    for token in Tokenizer::new(content) {
        if let Token::Operator(name) = token {
            match counts.iter_mut().find(|(n, _)| *n == name) {
                Some((_, count)) => *count += 1,
                None => counts.push((name, 1)),
            }
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_each_operator() {
        let counts = analyze_operators(b"q 1 0 0 rg 0 0 10 10 re f Q q 0 0 5 5 re f Q");
        assert_eq!(
            counts,
            vec![
                ("q".to_string(), 2),
                ("rg".to_string(), 1),
                ("re".to_string(), 2),
                ("f".to_string(), 2),
                ("Q".to_string(), 2),
            ]
        );
    }

    #[test]
    fn operands_are_not_counted() {
        let counts = analyze_operators(b"/F1 12 Tf (text) Tj");
        assert_eq!(counts, vec![("Tf".to_string(), 1), ("Tj".to_string(), 1)]);
    }

    #[test]
    fn unknown_operators_still_count() {
        let counts = analyze_operators(b"BOGUS BOGUS");
        assert_eq!(counts, vec![("BOGUS".to_string(), 2)]);
    }

    #[test]
    fn empty_stream_has_no_counts() {
        assert!(analyze_operators(b"").is_empty());
    }
}
