//! Kana classification and katakana → hiragana normalization.
//!
//! Dictionary keys are stored in hiragana, so every query goes through
//! [`to_hiragana`] (or the incremental [`normalize_at`]) before lookup.

pub const VOICED_MARK: char = '\u{FF9E}';
pub const SEMI_VOICED_MARK: char = '\u{FF9F}';
pub const ZERO_WIDTH_NON_JOINER: char = '\u{200C}';
/// Full-width tilde, often typed in place of the wave dash
pub const FULLWIDTH_TILDE: char = '\u{FF5E}';
pub const WAVE_DASH: char = '\u{301C}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Hiragana,
    Katakana,
    HalfwidthKatakana,
    Punctuation(Punctuation),
    Other,
}

/// Code points that get special treatment while scanning query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Punctuation {
    VoicedMark,
    SemiVoicedMark,
    ZeroWidthNonJoiner,
    FullwidthTilde,
    WaveDash,
}

pub fn classify(c: char) -> CharClass {
    match c {
        '\u{3041}'..='\u{309F}' => CharClass::Hiragana,
        '\u{30A0}'..='\u{30FF}' => CharClass::Katakana,
        '\u{FF66}'..='\u{FF9D}' => CharClass::HalfwidthKatakana,
        VOICED_MARK => CharClass::Punctuation(Punctuation::VoicedMark),
        SEMI_VOICED_MARK => CharClass::Punctuation(Punctuation::SemiVoicedMark),
        ZERO_WIDTH_NON_JOINER => CharClass::Punctuation(Punctuation::ZeroWidthNonJoiner),
        FULLWIDTH_TILDE => CharClass::Punctuation(Punctuation::FullwidthTilde),
        WAVE_DASH => CharClass::Punctuation(Punctuation::WaveDash),
        _ => CharClass::Other,
    }
}

pub fn is_kana(c: char) -> bool {
    matches!(
        classify(c),
        CharClass::Hiragana | CharClass::Katakana | CharClass::HalfwidthKatakana
    )
}

/// Hiragana for U+FF66..=U+FF9D, in code point order.
const HALFWIDTH: [char; 56] = [
    'を', 'ぁ', 'ぃ', 'ぅ', 'ぇ', 'ぉ', 'ゃ', 'ゅ', 'ょ', 'っ', //
    'ー', 'あ', 'い', 'う', 'え', 'お', 'か', 'き', 'く', 'け', //
    'こ', 'さ', 'し', 'す', 'せ', 'そ', 'た', 'ち', 'つ', 'て', //
    'と', 'な', 'に', 'ぬ', 'ね', 'の', 'は', 'ひ', 'ふ', 'へ', //
    'ほ', 'ま', 'み', 'む', 'め', 'も', 'や', 'ゆ', 'よ', 'ら', //
    'り', 'る', 'れ', 'ろ', 'わ', 'ん',
];

/// Half-width base followed by a separate voicing mark.
const COMBINING: &[(char, char, char)] = &[
    ('ｳ', VOICED_MARK, 'ゔ'),
    ('ｶ', VOICED_MARK, 'が'),
    ('ｷ', VOICED_MARK, 'ぎ'),
    ('ｸ', VOICED_MARK, 'ぐ'),
    ('ｹ', VOICED_MARK, 'げ'),
    ('ｺ', VOICED_MARK, 'ご'),
    ('ｻ', VOICED_MARK, 'ざ'),
    ('ｼ', VOICED_MARK, 'じ'),
    ('ｽ', VOICED_MARK, 'ず'),
    ('ｾ', VOICED_MARK, 'ぜ'),
    ('ｿ', VOICED_MARK, 'ぞ'),
    ('ﾀ', VOICED_MARK, 'だ'),
    ('ﾁ', VOICED_MARK, 'ぢ'),
    ('ﾂ', VOICED_MARK, 'づ'),
    ('ﾃ', VOICED_MARK, 'で'),
    ('ﾄ', VOICED_MARK, 'ど'),
    ('ﾊ', VOICED_MARK, 'ば'),
    ('ﾋ', VOICED_MARK, 'び'),
    ('ﾌ', VOICED_MARK, 'ぶ'),
    ('ﾍ', VOICED_MARK, 'べ'),
    ('ﾎ', VOICED_MARK, 'ぼ'),
    ('ﾊ', SEMI_VOICED_MARK, 'ぱ'),
    ('ﾋ', SEMI_VOICED_MARK, 'ぴ'),
    ('ﾌ', SEMI_VOICED_MARK, 'ぷ'),
    ('ﾍ', SEMI_VOICED_MARK, 'ぺ'),
    ('ﾎ', SEMI_VOICED_MARK, 'ぽ'),
];

fn combine(base: char, mark: char) -> Option<char> {
    COMBINING
        .iter()
        .find(|(b, m, _)| *b == base && *m == mark)
        .map(|(_, _, voiced)| *voiced)
}

/// Single-character mapping; characters without one are returned unchanged.
pub fn hiragana_of(c: char) -> char {
    match c {
        'ァ'..='ヴ' => char::from_u32(c as u32 - 0x60).unwrap_or(c),
        '\u{FF66}'..='\u{FF9D}' => HALFWIDTH[(c as u32 - 0xFF66) as usize],
        _ => c,
    }
}

/// Normalize the character at `i`, returning it and how many input
/// characters it consumed (2 for a half-width base + voicing mark).
pub fn normalize_at(chars: &[char], i: usize) -> Option<(char, usize)> {
    let c = *chars.get(i)?;
    if let Some(voiced) = chars.get(i + 1).and_then(|&mark| combine(c, mark)) {
        return Some((voiced, 2));
    }
    Some((hiragana_of(c), 1))
}

/// Convert full- and half-width katakana to hiragana, passing everything
/// else through.
pub fn to_hiragana(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while let Some((c, used)) = normalize_at(&chars, i) {
        out.push(c);
        i += used;
    }
    out
}
