//! Verse selection formatting for copying.
//!
//! Selected verses are grouped by (version, book, chapter) in visual order
//! and rendered as:
//!
//! ```text
//! Kejadian 1:1-3, 5 (TB)
//! 1 Pada mulanya ...
//! 2 Bumi belum berbentuk ...
//! ```
//!
//! Groups are separated by a blank line. Headers and verse numbers can be
//! rendered in Unicode bold (Mathematical Sans-Serif Bold) so the emphasis
//! survives plain-text paste targets such as chat apps.

/// One selected verse, ready for formatting.
///
/// `book` is the display (translated) book name and `text` is plain text
/// with markup already stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedVerse {
    pub version: String,
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
}

/// Consolidates sorted verse numbers into a compact reference string.
///
/// `[4, 6, 7, 8, 10]` becomes `"4, 6-8, 10"`.
pub fn format_reference_string(verse_numbers: &[u32]) -> String {
    if verse_numbers.is_empty() {
        return String::new();
    }
    let mut result = Vec::new();
    let mut range_start = verse_numbers[0];

    for (i, &current) in verse_numbers.iter().enumerate() {
        let next = verse_numbers.get(i + 1).copied();
        if next != Some(current + 1) {
            if current == range_start {
                result.push(current.to_string());
            } else {
                result.push(format!("{range_start}-{current}"));
            }
            if let Some(next) = next {
                range_start = next;
            }
        }
    }
    result.join(", ")
}

/// Maps ASCII letters and digits to Mathematical Sans-Serif Bold.
///
/// Everything else passes through unchanged, so translated book names and
/// punctuation survive intact.
pub fn to_unicode_bold(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            'A'..='Z' => bold_from('\u{1D5D4}', c as u32 - 'A' as u32),
            'a'..='z' => bold_from('\u{1D5EE}', c as u32 - 'a' as u32),
            '0'..='9' => bold_from('\u{1D7EC}', c as u32 - '0' as u32),
            other => other,
        })
        .collect()
}

fn bold_from(base: char, offset: u32) -> char {
    char::from_u32(base as u32 + offset).unwrap_or('\u{FFFD}')
}

/// Formats a selection into copy text.
///
/// Verses are grouped by consecutive (version, book, chapter) runs in the
/// order given (visual order: left panel before right panel); within a
/// group they are sorted by verse number and deduplicated in the reference
/// string by consolidation.
pub fn format_selection(verses: &[SelectedVerse], bold: bool) -> String {
    let mut blocks: Vec<String> = Vec::new();
    let mut group: Vec<&SelectedVerse> = Vec::new();

    for verse in verses {
        if let Some(first) = group.first() {
            let same_group = first.version == verse.version
                && first.book == verse.book
                && first.chapter == verse.chapter;
            if !same_group {
                blocks.push(format_group(&mut group, bold));
            }
        }
        group.push(verse);
    }
    if !group.is_empty() {
        blocks.push(format_group(&mut group, bold));
    }

    blocks.join("\n\n")
}

fn format_group(group: &mut Vec<&SelectedVerse>, bold: bool) -> String {
    group.sort_by_key(|v| v.verse);
    let first = group[0];
    let numbers: Vec<u32> = group.iter().map(|v| v.verse).collect();
    let refs = format_reference_string(&numbers);

    let mut header = format!("{} {}:{} ({})", first.book, first.chapter, refs, first.version);
    let mut lines: Vec<String> = Vec::with_capacity(group.len() + 1);
    if bold {
        header = to_unicode_bold(&header);
        lines.push(header);
        lines.extend(
            group
                .iter()
                .map(|v| format!("{} {}", to_unicode_bold(&v.verse.to_string()), v.text)),
        );
    } else {
        lines.push(header);
        lines.extend(group.iter().map(|v| format!("{} {}", v.verse, v.text)));
    }
    group.clear();
    lines.join("\n")
}
