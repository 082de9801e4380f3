use regex::Regex;
use std::sync::LazyLock;

/// Hebrew letters, final forms included
const ALEF_ORD: u32 = 'א' as u32;
const TAF_ORD: u32 = 'ת' as u32;

pub const DAGESH: char = '\u{05bc}';
pub const SHIN_DOT: char = '\u{05c1}';
pub const SIN_DOT: char = '\u{05c2}';

const VOWELS: &[char] = &[
    '\u{05b0}', // shva
    '\u{05b1}', // hataf segol
    '\u{05b2}', // hataf patah
    '\u{05b3}', // hataf qamats
    '\u{05b4}', // hiriq
    '\u{05b5}', // tsere
    '\u{05b6}', // segol
    '\u{05b7}', // patah
    '\u{05b8}', // qamats
    '\u{05b9}', // holam
    '\u{05bb}', // qubuts
    '\u{05c7}', // qamats qatan
];

/// First and last code point of the cantillation + points block.
const DIACRITIC_FIRST: u32 = 0x0591;
const DIACRITIC_LAST: u32 = 0x05c7;

static DIACRITICS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\u{0591}-\u{05C7}]").expect("diacritic pattern is valid"));

/// What a single code point means to the canonicalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkCategory {
    Letter,
    Dagesh,
    ShinDot,
    Vowel,
    /// Cantillation and the remaining points of the block. Never reordered.
    OtherDiacritic,
    Other,
}

pub fn classify(ch: char) -> MarkCategory {
    let ord = ch as u32;
    if (ALEF_ORD..=TAF_ORD).contains(&ord) {
        MarkCategory::Letter
    } else if ch == DAGESH {
        MarkCategory::Dagesh
    } else if ch == SHIN_DOT || ch == SIN_DOT {
        MarkCategory::ShinDot
    } else if VOWELS.contains(&ch) {
        MarkCategory::Vowel
    } else if (DIACRITIC_FIRST..=DIACRITIC_LAST).contains(&ord) {
        MarkCategory::OtherDiacritic
    } else {
        MarkCategory::Other
    }
}

pub fn is_hebrew_letter(ch: char) -> bool {
    classify(ch) == MarkCategory::Letter
}

pub fn is_diacritic(ch: char) -> bool {
    (DIACRITIC_FIRST..=DIACRITIC_LAST).contains(&(ch as u32))
}

/// Marks collected for one letter. The first mark of each category sticks.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct ClusterMarks {
    dagesh: Option<char>,
    shin_dot: Option<char>,
    vowel: Option<char>,
}

impl ClusterMarks {
    /// Records `ch` if it belongs to a tracked category. Returns `false` when
    /// the character ends the cluster.
    fn offer(&mut self, ch: char) -> bool {
        let slot = match classify(ch) {
            MarkCategory::Dagesh => &mut self.dagesh,
            MarkCategory::ShinDot => &mut self.shin_dot,
            MarkCategory::Vowel => &mut self.vowel,
            _ => return false,
        };
        if slot.is_none() {
            *slot = Some(ch);
        }
        true
    }

    fn emit(&self, out: &mut String) {
        out.extend([self.dagesh, self.shin_dot, self.vowel].into_iter().flatten());
    }

    fn len(&self) -> usize {
        [self.dagesh, self.shin_dot, self.vowel].iter().flatten().count()
    }
}

/// Rewrites every letter cluster into dagesh, shin/sin dot, vowel order, keeping
/// only the first mark of each kind.
///
/// Marks that do not follow a letter directly are copied through untouched, and
/// any untracked diacritic (cantillation, meteg, ...) ends the cluster it
/// appears in.
pub fn canonicalize(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        result.push(ch);
        if !is_hebrew_letter(ch) {
            continue;
        }

        let mut marks = ClusterMarks::default();
        let mut seen = 0usize;
        while let Some(&next) = chars.peek() {
            if !marks.offer(next) {
                break;
            }
            seen += 1;
            chars.next();
        }

        if seen > marks.len() {
            tracing::trace!(letter = %ch, dropped = seen - marks.len(), "dropped duplicate marks");
        }
        marks.emit(&mut result);
    }

    result
}

/// Removes every cantillation mark and point, leaving the bare consonantal text.
pub fn strip(text: &str) -> String {
    DIACRITICS.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALEF: char = 'א';
    const PATAH: char = '\u{05b7}';
    const QAMATS: char = '\u{05b8}';
    const HOLAM: char = '\u{05b9}';
    const ETNAHTA: char = '\u{0591}';
    const METEG: char = '\u{05bd}';

    fn s(chars: &[char]) -> String {
        chars.iter().collect()
    }

    #[test]
    fn classifies_every_category() {
        assert_eq!(classify('א'), MarkCategory::Letter);
        assert_eq!(classify('ך'), MarkCategory::Letter);
        assert_eq!(classify('ת'), MarkCategory::Letter);
        assert_eq!(classify(DAGESH), MarkCategory::Dagesh);
        assert_eq!(classify(SHIN_DOT), MarkCategory::ShinDot);
        assert_eq!(classify(SIN_DOT), MarkCategory::ShinDot);
        assert_eq!(classify('\u{05b0}'), MarkCategory::Vowel);
        assert_eq!(classify('\u{05c7}'), MarkCategory::Vowel);
        assert_eq!(classify(ETNAHTA), MarkCategory::OtherDiacritic);
        assert_eq!(classify(METEG), MarkCategory::OtherDiacritic);
        assert_eq!(classify('\u{05ba}'), MarkCategory::OtherDiacritic);
        assert_eq!(classify('a'), MarkCategory::Other);
        assert_eq!(classify('\u{05f3}'), MarkCategory::Other);
    }

    #[test]
    fn letter_range_has_27_letters() {
        let count = ('\u{0590}'..='\u{05ff}').filter(|&c| is_hebrew_letter(c)).count();
        assert_eq!(count, 27);
        assert_eq!(VOWELS.len(), 12);
    }

    #[test]
    fn reorders_vowel_before_dagesh() {
        assert_eq!(canonicalize(&s(&[ALEF, PATAH, DAGESH])), s(&[ALEF, DAGESH, PATAH]));
    }

    #[test]
    fn full_cluster_order() {
        let input = s(&['ש', PATAH, SHIN_DOT, DAGESH]);
        assert_eq!(canonicalize(&input), s(&['ש', DAGESH, SHIN_DOT, PATAH]));
    }

    #[test]
    fn duplicate_dagesh_keeps_one() {
        let input = s(&['ב', DAGESH, QAMATS, DAGESH]);
        assert_eq!(canonicalize(&input), s(&['ב', DAGESH, QAMATS]));
    }

    #[test]
    fn first_occurrence_wins() {
        assert_eq!(canonicalize(&s(&['ש', SIN_DOT, SHIN_DOT])), s(&['ש', SIN_DOT]));
        assert_eq!(canonicalize(&s(&['ל', QAMATS, PATAH])), s(&['ל', QAMATS]));
    }

    #[test]
    fn cantillation_ends_cluster() {
        // the dagesh after etnahta is no longer part of the letter's cluster
        let input = s(&[ALEF, PATAH, ETNAHTA, DAGESH, PATAH]);
        assert_eq!(canonicalize(&input), input);

        let input = s(&[ALEF, PATAH, PATAH, METEG, DAGESH]);
        assert_eq!(canonicalize(&input), s(&[ALEF, PATAH, METEG, DAGESH]));
    }

    #[test]
    fn holam_haser_ends_cluster() {
        const HOLAM_HASER: char = '\u{05ba}';
        assert_eq!(classify(HOLAM_HASER), MarkCategory::OtherDiacritic);

        // vav, holam haser, dagesh: the dagesh is not pulled in front
        let input = s(&['ו', HOLAM_HASER, DAGESH]);
        assert_eq!(canonicalize(&input), input);

        let input = s(&['ו', HOLAM, HOLAM_HASER, HOLAM]);
        assert_eq!(canonicalize(&input), input);
        assert_eq!(strip(&input), "ו");
    }

    #[test]
    fn marks_after_non_letters_pass_through() {
        let input = s(&[' ', PATAH, DAGESH, PATAH, '-']);
        assert_eq!(canonicalize(&input), input);
    }

    #[test]
    fn non_hebrew_text_is_unchanged() {
        assert_eq!(canonicalize(""), "");
        assert_eq!(canonicalize("hello, world 123"), "hello, world 123");
    }

    #[test]
    fn shalom() {
        let shalom = s(&['ש', QAMATS, SHIN_DOT, 'ל', 'ו', HOLAM, 'ם']);
        assert_eq!(canonicalize(&shalom), s(&['ש', SHIN_DOT, QAMATS, 'ל', 'ו', HOLAM, 'ם']));
        assert_eq!(strip(&shalom), "שלום");
    }

    #[test]
    fn strip_removes_block_only() {
        let input = s(&['ב', DAGESH, ETNAHTA, 'א', '\u{05be}', 'x', '|', '\u{05d0}']);
        assert_eq!(strip(&input), "באx|א");
        assert!(strip(&input).chars().all(|c| !is_diacritic(c)));
    }

    #[test]
    fn strip_is_idempotent() {
        let input = s(&['מ', PATAH, DAGESH, ' ', 'ל', METEG]);
        let once = strip(&input);
        assert_eq!(strip(&once), once);
    }
}
