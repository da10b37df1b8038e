//! The comparison alignment engine.
//!
//! Given two independently fetched passages for two translations, produce
//! two equal-length, positionally aligned row sequences for side-by-side
//! rendering, inserting placeholders where one side lacks a corresponding
//! verse or heading.
//!
//! The merge is a two-pointer walk over both verse sequences. At each step
//! the canonically earlier of the two current references wins; an exact
//! match consumes both sides at once. Before the verse row pair, a heading
//! row pair is emitted if either side has a heading pinned to the winning
//! reference. Every iteration appends the same number of rows to both
//! outputs, so the length invariant holds by construction.

use crate::books::BookOrder;
use crate::model::{AlignedRow, Passage, VerseRef};

/// Aligns two passages for side-by-side display.
///
/// Inputs are read-only snapshots; the outputs are fresh sequences of equal
/// length where row `i` on both sides is the same logical position.
///
/// Each side's verses must be in non-decreasing reference order within each
/// book run (the order the API returns them). That is a precondition, not a
/// runtime-checked invariant: unsorted input or duplicate references produce
/// a misaligned (but never panicking) result.
///
/// `order` resolves reference order when the two sides diverge at a book
/// boundary; see [`VerseRef::cmp_with`] for the fallback without one.
pub fn align_passages(
    side1: &Passage,
    side2: &Passage,
    order: Option<&BookOrder>,
) -> (Vec<AlignedRow>, Vec<AlignedRow>) {
    let mut aligned1 = Vec::new();
    let mut aligned2 = Vec::new();

    let mut i1 = 0;
    let mut i2 = 0;

    while i1 < side1.verses.len() || i2 < side2.verses.len() {
        let v1 = side1.verses.get(i1);
        let v2 = side2.verses.get(i2);

        // Decide which side(s) advance this iteration. The winning
        // reference anchors both the heading lookup and any placeholder
        // emitted on the stalled side.
        let (use1, use2, pivot): (bool, bool, VerseRef) = match (v1, v2) {
            (Some(a), None) => (true, false, a.reference()),
            (None, Some(b)) => (false, true, b.reference()),
            (Some(a), Some(b)) => {
                match a.reference().cmp_with(&b.reference(), order) {
                    std::cmp::Ordering::Equal => (true, true, a.reference()),
                    std::cmp::Ordering::Less => (true, false, a.reference()),
                    std::cmp::Ordering::Greater => (false, true, b.reference()),
                }
            }
            (None, None) => break,
        };

        // Both maps are keyed identically, so a heading pinned to this
        // reference shows up for whichever side carries it.
        let key = pivot.heading_key();
        let h1 = side1.headings.get(&key);
        let h2 = side2.headings.get(&key);
        if h1.is_some() || h2.is_some() {
            aligned1.push(heading_row(h1));
            aligned2.push(heading_row(h2));
        }

        if use1 {
            aligned1.push(AlignedRow::Verse(side1.verses[i1].clone()));
            i1 += 1;
        } else {
            aligned1.push(AlignedRow::EmptyVerse(pivot.clone()));
        }

        if use2 {
            aligned2.push(AlignedRow::Verse(side2.verses[i2].clone()));
            i2 += 1;
        } else {
            aligned2.push(AlignedRow::EmptyVerse(pivot));
        }
    }

    (aligned1, aligned2)
}

fn heading_row(content: Option<&String>) -> AlignedRow {
    match content {
        Some(text) => AlignedRow::Heading {
            content: text.clone(),
        },
        None => AlignedRow::EmptyHeading,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingsMap, VerseRecord};

    fn verse(book: &str, chapter: u32, verse_no: u32) -> VerseRecord {
        VerseRecord::new(book, chapter, verse_no, format!("{book} {chapter}:{verse_no} text"))
    }

    fn passage(verses: Vec<VerseRecord>) -> Passage {
        Passage::new(verses, HeadingsMap::new())
    }

    fn with_heading(mut passage: Passage, key: &str, heading: &str) -> Passage {
        passage.headings.insert(key.to_string(), heading.to_string());
        passage
    }

    fn order() -> BookOrder {
        BookOrder::canonical()
    }

    #[test]
    fn test_identical_inputs_have_no_placeholders() {
        let verses = vec![verse("Genesis", 1, 1), verse("Genesis", 1, 2), verse("Genesis", 1, 3)];
        let p1 = passage(verses.clone());
        let p2 = passage(verses);
        let (a1, a2) = align_passages(&p1, &p2, Some(&order()));

        assert_eq!(a1.len(), a2.len());
        assert_eq!(a1, a2);
        assert!(a1.iter().all(|row| row.as_verse().is_some()));
    }

    #[test]
    fn test_gap_on_one_side() {
        // Side 2 is missing Gen 1:2.
        let p1 = passage(vec![verse("Genesis", 1, 1), verse("Genesis", 1, 2), verse("Genesis", 1, 3)]);
        let p2 = passage(vec![verse("Genesis", 1, 1), verse("Genesis", 1, 3)]);
        let (a1, a2) = align_passages(&p1, &p2, Some(&order()));

        assert_eq!(a1.len(), 3);
        assert_eq!(a2.len(), 3);
        assert_eq!(a1[1], AlignedRow::Verse(verse("Genesis", 1, 2)));
        assert_eq!(a2[1], AlignedRow::EmptyVerse(VerseRef::new("Genesis", 1, 2)));
        // The surrounding rows still face each other.
        assert_eq!(a1[0].reference(), a2[0].reference());
        assert_eq!(a1[2].reference(), a2[2].reference());
    }

    #[test]
    fn test_empty_side_becomes_all_placeholders() {
        let p1 = passage(Vec::new());
        let p2 = passage(vec![verse("Genesis", 1, 1), verse("Genesis", 1, 2)]);
        let (a1, a2) = align_passages(&p1, &p2, Some(&order()));

        assert_eq!(a1.len(), 2);
        assert_eq!(
            a1,
            vec![
                AlignedRow::EmptyVerse(VerseRef::new("Genesis", 1, 1)),
                AlignedRow::EmptyVerse(VerseRef::new("Genesis", 1, 2)),
            ]
        );
        assert!(a2.iter().all(|row| row.as_verse().is_some()));
    }

    #[test]
    fn test_both_sides_empty() {
        let (a1, a2) = align_passages(&passage(Vec::new()), &passage(Vec::new()), Some(&order()));
        assert!(a1.is_empty());
        assert!(a2.is_empty());
    }

    #[test]
    fn test_heading_on_one_side_pairs_with_placeholder() {
        let p1 = with_heading(
            passage(vec![verse("Genesis", 1, 1)]),
            "Genesis 1:1",
            "Creation",
        );
        let p2 = passage(vec![verse("Genesis", 1, 1)]);
        let (a1, a2) = align_passages(&p1, &p2, Some(&order()));

        assert_eq!(a1.len(), 2);
        assert_eq!(a1[0], AlignedRow::Heading { content: "Creation".into() });
        assert_eq!(a2[0], AlignedRow::EmptyHeading);
        assert!(a1[1].as_verse().is_some());
        assert!(a2[1].as_verse().is_some());
    }

    #[test]
    fn test_heading_on_both_sides() {
        let p1 = with_heading(
            passage(vec![verse("John", 3, 16)]),
            "John 3:16",
            "God So Loved the World",
        );
        let p2 = with_heading(
            passage(vec![verse("John", 3, 16)]),
            "John 3:16",
            "Kasih Allah",
        );
        let (a1, a2) = align_passages(&p1, &p2, Some(&order()));

        assert_eq!(a1[0], AlignedRow::Heading { content: "God So Loved the World".into() });
        assert_eq!(a2[0], AlignedRow::Heading { content: "Kasih Allah".into() });
    }

    #[test]
    fn test_heading_at_gap_reference() {
        // The heading sits on a verse side 1 lacks; the winning reference
        // comes from side 2, and the heading still pairs up.
        let p1 = passage(vec![verse("Genesis", 1, 2)]);
        let p2 = with_heading(
            passage(vec![verse("Genesis", 1, 1), verse("Genesis", 1, 2)]),
            "Genesis 1:1",
            "Creation",
        );
        let (a1, a2) = align_passages(&p1, &p2, Some(&order()));

        assert_eq!(a1.len(), 3);
        assert_eq!(a1[0], AlignedRow::EmptyHeading);
        assert_eq!(a2[0], AlignedRow::Heading { content: "Creation".into() });
        assert_eq!(a1[1], AlignedRow::EmptyVerse(VerseRef::new("Genesis", 1, 1)));
        assert!(a2[1].as_verse().is_some());
        assert_eq!(a1[2].reference(), a2[2].reference());
    }

    #[test]
    fn test_heading_rows_face_heading_rows() {
        let p1 = with_heading(
            passage(vec![verse("Genesis", 1, 1), verse("Genesis", 2, 1)]),
            "Genesis 2:1",
            "The Seventh Day",
        );
        let p2 = passage(vec![verse("Genesis", 1, 1)]);
        let (a1, a2) = align_passages(&p1, &p2, Some(&order()));

        assert_eq!(a1.len(), a2.len());
        for (row1, row2) in a1.iter().zip(&a2) {
            assert_eq!(row1.is_heading_slot(), row2.is_heading_slot());
        }
    }

    #[test]
    fn test_completeness_every_input_verse_appears_once() {
        let p1 = passage(vec![verse("Psalms", 23, 1), verse("Psalms", 23, 2), verse("Psalms", 23, 4)]);
        let p2 = passage(vec![verse("Psalms", 23, 2), verse("Psalms", 23, 3), verse("Psalms", 23, 4)]);
        let (a1, a2) = align_passages(&p1, &p2, Some(&order()));

        let present1: Vec<_> = a1.iter().filter_map(AlignedRow::as_verse).collect();
        let present2: Vec<_> = a2.iter().filter_map(AlignedRow::as_verse).collect();
        assert_eq!(present1, p1.verses.iter().collect::<Vec<_>>());
        assert_eq!(present2, p2.verses.iter().collect::<Vec<_>>());

        // Where one side is a placeholder, the other holds that reference.
        for (row1, row2) in a1.iter().zip(&a2) {
            assert_eq!(row1.reference(), row2.reference());
        }
    }

    #[test]
    fn test_cross_book_with_order_table() {
        // Side 1 skips straight to Matthew; side 2 still has Malachi.
        let p1 = passage(vec![verse("Malachi", 4, 5), verse("Matthew", 1, 1)]);
        let p2 = passage(vec![verse("Malachi", 4, 5), verse("Malachi", 4, 6), verse("Matthew", 1, 1)]);
        let (a1, a2) = align_passages(&p1, &p2, Some(&order()));

        assert_eq!(a1.len(), 3);
        assert_eq!(a1[1], AlignedRow::EmptyVerse(VerseRef::new("Malachi", 4, 6)));
        assert!(a2[1].as_verse().is_some());
        assert_eq!(a1[2].reference(), Some(VerseRef::new("Matthew", 1, 1)));
        assert_eq!(a2[2].reference(), Some(VerseRef::new("Matthew", 1, 1)));
    }

    #[test]
    fn test_cross_book_fallback_drains_side_one_first() {
        // Without a table the books cannot be ordered; side 1 wins until it
        // is exhausted, then side 2 drains.
        let p1 = passage(vec![verse("Matthew", 1, 1)]);
        let p2 = passage(vec![verse("Malachi", 4, 6)]);
        let (a1, a2) = align_passages(&p1, &p2, None);

        assert_eq!(a1.len(), 2);
        assert!(a1[0].as_verse().is_some());
        assert_eq!(a2[0], AlignedRow::EmptyVerse(VerseRef::new("Matthew", 1, 1)));
        assert_eq!(a1[1], AlignedRow::EmptyVerse(VerseRef::new("Malachi", 4, 6)));
        assert!(a2[1].as_verse().is_some());
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let p1 = with_heading(
            passage(vec![verse("Genesis", 1, 1), verse("Genesis", 1, 2)]),
            "Genesis 1:1",
            "Creation",
        );
        let p2 = passage(vec![verse("Genesis", 1, 2)]);
        let snapshot1 = p1.clone();
        let snapshot2 = p2.clone();

        let _ = align_passages(&p1, &p2, Some(&order()));

        assert_eq!(p1.verses, snapshot1.verses);
        assert_eq!(p1.headings, snapshot1.headings);
        assert_eq!(p2.verses, snapshot2.verses);
        assert_eq!(p2.headings, snapshot2.headings);
    }

    #[test]
    fn test_multi_block_day_reading() {
        // A daily reading with two blocks (Psalm + Gospel) where side 2 is
        // missing one verse in each block.
        let p1 = passage(vec![
            verse("Psalms", 117, 1),
            verse("Psalms", 117, 2),
            verse("John", 11, 35),
            verse("John", 11, 36),
        ]);
        let p2 = passage(vec![verse("Psalms", 117, 1), verse("John", 11, 36)]);
        let (a1, a2) = align_passages(&p1, &p2, Some(&order()));

        assert_eq!(a1.len(), 4);
        let placeholders: Vec<_> = a2
            .iter()
            .filter_map(|row| match row {
                AlignedRow::EmptyVerse(r) => Some(r.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(
            placeholders,
            vec![VerseRef::new("Psalms", 117, 2), VerseRef::new("John", 11, 35)]
        );
    }
}
