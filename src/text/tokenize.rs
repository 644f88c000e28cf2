//! Whitespace tokenization of plain runs
//!
//! Plain text between annotations is rendered one token per element so the
//! host can wrap lines naturally. A token boundary sits at every transition
//! between whitespace and non-whitespace, keeping each maximal run intact:
//! `"Hello world"` becomes `["Hello", " ", "world"]`. Purely presentational;
//! concatenating the tokens always reproduces the input, so offsets are
//! unaffected.

/// Split text into alternating maximal whitespace / non-whitespace runs
pub fn split_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut run_start = 0;
    let mut run_is_ws: Option<bool> = None;
    for (byte_idx, ch) in text.char_indices() {
        let is_ws = ch.is_whitespace();
        match run_is_ws {
            Some(prev) if prev != is_ws => {
                tokens.push(&text[run_start..byte_idx]);
                run_start = byte_idx;
                run_is_ws = Some(is_ws);
            }
            Some(_) => {}
            None => run_is_ws = Some(is_ws),
        }
    }
    if run_is_ws.is_some() {
        tokens.push(&text[run_start..]);
    }
    tokens
}
