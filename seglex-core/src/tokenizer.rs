//! Whitespace tokenizer

use crate::span::TextSpan;

/// Characters that separate tokens.
///
/// Unicode white space minus the no-break spaces (U+00A0, U+2007, U+202F) and
/// NEXT LINE (U+0085), plus the information separators U+001C..=U+001F. French
/// typography glues `!?:;` and guillemets to words with no-break spaces, so
/// those stay inside the token.
pub fn is_separator(ch: char) -> bool {
    matches!(ch, '\u{1C}'..='\u{1F}')
        || (ch.is_whitespace() && !matches!(ch, '\u{A0}' | '\u{2007}' | '\u{202F}' | '\u{85}'))
}

/// Split text into maximal runs of non-separator characters.
///
/// A boundary is recorded wherever whitespace-ness changes between two
/// neighbouring characters; every run that is not entirely whitespace becomes
/// a span. Spans come out strictly ordered and non-overlapping.
pub fn tokenize(chars: &[char]) -> Vec<TextSpan> {
    let mut tokens = Vec::new();
    let mut begin = 0;

    for index in 1..chars.len() {
        if is_separator(chars[index - 1]) != is_separator(chars[index]) {
            push_run(chars, begin, index, &mut tokens);
            begin = index;
        }
    }
    push_run(chars, begin, chars.len(), &mut tokens);

    tracing::trace!(tokens = tokens.len(), "tokenized");
    tokens
}

fn push_run(chars: &[char], begin: usize, end: usize, tokens: &mut Vec<TextSpan>) {
    // Runs are homogeneous, so checking the first char is enough
    if let Some(span) = TextSpan::non_empty(begin, end) {
        if !is_separator(chars[begin]) {
            tokens.push(span);
        }
    }
}
