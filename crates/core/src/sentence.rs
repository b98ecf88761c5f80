//! Sentence segmentation tuned for Korean news prose.
//!
//! A sentence ends after a run of terminal punctuation (plus any closing
//! quotes or brackets) when followed by whitespace or the end of the text.
//! Line breaks always end a sentence. Terminal punctuation glued to the next
//! character (`3.5%`, `"좋다."라고`) is not a boundary.
//!
//! Generated Korean often drops the final period, so an unpunctuated
//! declarative (`했다`, `한다`, `입니다`) or polite (`해요`, `있어요`) ending
//! followed by whitespace also closes a sentence, unless the next visible
//! character is terminal punctuation.

/// Sentence-final punctuation, including full-width and ellipsis forms.
const TERMINALS: &[char] = &['.', '!', '?', '…', '。', '！', '？', '‼', '⁇', '⁈', '⁉'];

/// Characters that close a quotation or parenthetical after terminal punctuation.
const CLOSERS: &[char] = &['"', '\'', '”', '’', ')', ']', '}', '」', '』', '》', '〉', '）', '］'];

/// Syllables that end a declarative `다` regardless of their final consonant.
const DECLARATIVE_STEMS: &[char] = &['니', '이'];

/// Syllables that precede a polite `요` ending.
const POLITE_STEMS: &[char] = &[
    '어', '아', '여', '해', '워', '와', '봐', '줘', '돼', '에', '예', '네', '세', '데', '대', '래', '군', '지', '게',
];

/// Final consonants (jongseong indices) of present and past tense stems: ㄴ, ㅄ, ㅆ.
const DECLARATIVE_FINALS: &[u32] = &[4, 18, 20];

fn is_terminal(ch: char) -> bool {
    TERMINALS.contains(&ch)
}

fn is_closer(ch: char) -> bool {
    CLOSERS.contains(&ch)
}

/// Jongseong index of a precomposed Hangul syllable (0 for an open syllable).
fn final_consonant(ch: char) -> Option<u32> {
    let offset = (ch as u32).checked_sub(0xAC00)?;
    (offset < 11172).then_some(offset % 28)
}

/// Whether `chars[..next]` ends in an unpunctuated sentence-final ending.
fn ends_unpunctuated(chars: &[char], next: usize) -> bool {
    let Some(start) = next.checked_sub(2) else {
        return false;
    };
    let closes = match &chars[start..next] {
        [stem, '다'] => {
            DECLARATIVE_STEMS.contains(stem)
                || final_consonant(*stem).is_some_and(|jong| DECLARATIVE_FINALS.contains(&jong))
        }
        [stem, '요'] => POLITE_STEMS.contains(stem),
        _ => false,
    };
    if !closes {
        return false;
    }

    let mut rest = chars[next..].iter();
    rest.next().is_some_and(|c| c.is_whitespace())
        && rest.find(|c| !c.is_whitespace()).is_some_and(|&c| !is_terminal(c))
}

/// Splits text into trimmed, non-empty sentences in source order.
///
/// # Example
///
/// ```rust
/// use gist_core::split_sentences;
///
/// let sentences = split_sentences("금리가 3.5%로 올랐다. 시장은 \"예상했다.\"고 밝혔다! 다음은?");
/// assert_eq!(sentences, vec!["금리가 3.5%로 올랐다.", "시장은 \"예상했다.\"고 밝혔다!", "다음은?"]);
/// ```
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        i += 1;

        if ch == '\n' || ch == '\r' {
            push_sentence(&mut sentences, &mut current);
            continue;
        }

        current.push(ch);
        if !is_terminal(ch) {
            if ends_unpunctuated(&chars, i) {
                push_sentence(&mut sentences, &mut current);
            }
            continue;
        }

        while i < chars.len() && is_terminal(chars[i]) {
            current.push(chars[i]);
            i += 1;
        }
        while i < chars.len() && is_closer(chars[i]) {
            current.push(chars[i]);
            i += 1;
        }
        if i == chars.len() || chars[i].is_whitespace() {
            push_sentence(&mut sentences, &mut current);
        }
    }

    push_sentence(&mut sentences, &mut current);
    sentences
}

fn push_sentence(sentences: &mut Vec<String>, current: &mut String) {
    let sentence = current.trim();
    if !sentence.is_empty() {
        sentences.push(sentence.to_string());
    }
    current.clear();
}
