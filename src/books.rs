//! Canonical book data and per-version book names.
//!
//! This module provides:
//! - The canonical (Protestant, 66-book) ordering of Bible books
//! - A rank table for cross-book reference comparison
//! - Translated book names for non-English Bible versions
//! - The list of supported versions

use std::collections::HashMap;

/// The 66 books in canonical order, Genesis through Revelation.
///
/// Book names use the English spellings returned by the verse API.
pub const CANONICAL_BOOKS: [&str; 66] = [
    "Genesis", "Exodus", "Leviticus", "Numbers", "Deuteronomy",
    "Joshua", "Judges", "Ruth", "1 Samuel", "2 Samuel",
    "1 Kings", "2 Kings", "1 Chronicles", "2 Chronicles", "Ezra",
    "Nehemiah", "Esther", "Job", "Psalms", "Proverbs",
    "Ecclesiastes", "Song of Solomon", "Isaiah", "Jeremiah", "Lamentations",
    "Ezekiel", "Daniel", "Hosea", "Joel", "Amos",
    "Obadiah", "Jonah", "Micah", "Nahum", "Habakkuk",
    "Zephaniah", "Haggai", "Zechariah", "Malachi", "Matthew",
    "Mark", "Luke", "John", "Acts", "Romans",
    "1 Corinthians", "2 Corinthians", "Galatians", "Ephesians", "Philippians",
    "Colossians", "1 Thessalonians", "2 Thessalonians", "1 Timothy", "2 Timothy",
    "Titus", "Philemon", "Hebrews", "James", "1 Peter",
    "2 Peter", "1 John", "2 John", "3 John", "Jude",
    "Revelation",
];

/// Supported Bible versions, in selector order.
pub const BIBLE_VERSIONS: [&str; 11] = [
    "TB", "ESV", "KJV", "NASB", "NIV", "NLT", "TLB",
    "CNVS", "CUNPSS-上帝", "CUNPSS-神", "CUV",
];

/// A ranked table of book names used to order references across books.
///
/// The alignment engine only needs this when the two comparison sides
/// diverge at a book boundary; within a book, chapter/verse numbers are
/// enough. Callers that cannot supply a table fall back to a documented
/// heuristic (see [`crate::model::VerseRef::cmp_with`]).
#[derive(Debug, Clone)]
pub struct BookOrder {
    ranks: HashMap<String, usize>,
}

impl BookOrder {
    /// Builds the canonical 66-book order table.
    pub fn canonical() -> Self {
        Self::from_books(&CANONICAL_BOOKS)
    }

    /// Builds an order table from an explicit book list.
    ///
    /// Earlier entries rank earlier. Duplicate names keep their first rank.
    pub fn from_books<S: AsRef<str>>(books: &[S]) -> Self {
        let mut ranks = HashMap::with_capacity(books.len());
        for (rank, book) in books.iter().enumerate() {
            ranks.entry(book.as_ref().to_string()).or_insert(rank);
        }
        Self { ranks }
    }

    /// Returns the rank of a book, or `None` if the name is not in the table.
    pub fn rank(&self, book: &str) -> Option<usize> {
        self.ranks.get(book).copied()
    }
}

/// English → Indonesian book names (TB).
const INDONESIAN_BOOKS: [(&str, &str); 66] = [
    ("Genesis", "Kejadian"), ("Exodus", "Keluaran"), ("Leviticus", "Imamat"),
    ("Numbers", "Bilangan"), ("Deuteronomy", "Ulangan"), ("Joshua", "Yosua"),
    ("Judges", "Hakim-Hakim"), ("Ruth", "Rut"), ("1 Samuel", "1 Samuel"),
    ("2 Samuel", "2 Samuel"), ("1 Kings", "1 Raja-Raja"), ("2 Kings", "2 Raja-Raja"),
    ("1 Chronicles", "1 Tawarikh"), ("2 Chronicles", "2 Tawarikh"), ("Ezra", "Ezra"),
    ("Nehemiah", "Nehemia"), ("Esther", "Ester"), ("Job", "Ayub"),
    ("Psalms", "Mazmur"), ("Proverbs", "Amsal"), ("Ecclesiastes", "Pengkhotbah"),
    ("Song of Solomon", "Kidung Agung"), ("Isaiah", "Yesaya"), ("Jeremiah", "Yeremia"),
    ("Lamentations", "Ratapan"), ("Ezekiel", "Yehezkiel"), ("Daniel", "Daniel"),
    ("Hosea", "Hosea"), ("Joel", "Yoel"), ("Amos", "Amos"),
    ("Obadiah", "Obaja"), ("Jonah", "Yunus"), ("Micah", "Mikha"),
    ("Nahum", "Nahum"), ("Habakkuk", "Habakuk"), ("Zephaniah", "Zefanya"),
    ("Haggai", "Hagai"), ("Zechariah", "Zakharia"), ("Malachi", "Maleakhi"),
    ("Matthew", "Matius"), ("Mark", "Markus"), ("Luke", "Lukas"),
    ("John", "Yohanes"), ("Acts", "Kisah Para Rasul"), ("Romans", "Roma"),
    ("1 Corinthians", "1 Korintus"), ("2 Corinthians", "2 Korintus"),
    ("Galatians", "Galatia"), ("Ephesians", "Efesus"), ("Philippians", "Filipi"),
    ("Colossians", "Kolose"), ("1 Thessalonians", "1 Tesalonika"),
    ("2 Thessalonians", "2 Tesalonika"), ("1 Timothy", "1 Timotius"),
    ("2 Timothy", "2 Timotius"), ("Titus", "Titus"), ("Philemon", "Filemon"),
    ("Hebrews", "Ibrani"), ("James", "Yakobus"), ("1 Peter", "1 Petrus"),
    ("2 Peter", "2 Petrus"), ("1 John", "1 Yohanes"), ("2 John", "2 Yohanes"),
    ("3 John", "3 Yohanes"), ("Jude", "Yudas"), ("Revelation", "Wahyu"),
];

/// English → Simplified Chinese book names (CNVS, CUNPSS).
const CHINESE_SIMPLIFIED_BOOKS: [(&str, &str); 66] = [
    ("Genesis", "创世纪"), ("Exodus", "出埃及记"), ("Leviticus", "利未记"),
    ("Numbers", "民数记"), ("Deuteronomy", "申命记"), ("Joshua", "约书亚记"),
    ("Judges", "士师记"), ("Ruth", "路得记"), ("1 Samuel", "撒母耳记上"),
    ("2 Samuel", "撒母耳记下"), ("1 Kings", "列王记上"), ("2 Kings", "列王记下"),
    ("1 Chronicles", "历代志上"), ("2 Chronicles", "历代志下"), ("Ezra", "以斯拉记"),
    ("Nehemiah", "尼希米记"), ("Esther", "以斯帖记"), ("Job", "约伯记"),
    ("Psalms", "诗篇"), ("Proverbs", "箴言"), ("Ecclesiastes", "传道书"),
    ("Song of Solomon", "雅歌"), ("Isaiah", "以赛亚书"), ("Jeremiah", "耶利米书"),
    ("Lamentations", "耶利米哀歌"), ("Ezekiel", "以西结书"), ("Daniel", "但以理书"),
    ("Hosea", "何西阿书"), ("Joel", "约珥书"), ("Amos", "阿摩司书"),
    ("Obadiah", "俄巴底亚书"), ("Jonah", "约拿书"), ("Micah", "弥迦书"),
    ("Nahum", "那鸿书"), ("Habakkuk", "哈巴谷书"), ("Zephaniah", "西番雅书"),
    ("Haggai", "哈该书"), ("Zechariah", "撒迦利亚书"), ("Malachi", "玛拉基书"),
    ("Matthew", "马太福音"), ("Mark", "马可福音"), ("Luke", "路加福音"),
    ("John", "约翰福音"), ("Acts", "使徒行传"), ("Romans", "罗马书"),
    ("1 Corinthians", "歌林多前书"), ("2 Corinthians", "歌林多后书"),
    ("Galatians", "加拉太书"), ("Ephesians", "以弗所书"), ("Philippians", "腓利比书"),
    ("Colossians", "歌罗西书"), ("1 Thessalonians", "帖撒罗尼迦前书"),
    ("2 Thessalonians", "帖撒罗尼迦后书"), ("1 Timothy", "提摩太前书"),
    ("2 Timothy", "提摩太后书"), ("Titus", "提多书"), ("Philemon", "腓利门书"),
    ("Hebrews", "希伯来书"), ("James", "雅各书"), ("1 Peter", "彼得前书"),
    ("2 Peter", "彼得后书"), ("1 John", "约翰一书"), ("2 John", "约翰二书"),
    ("3 John", "约翰三书"), ("Jude", "犹大书"), ("Revelation", "启示录"),
];

/// English → Traditional Chinese book names (CUV).
const CHINESE_TRADITIONAL_BOOKS: [(&str, &str); 66] = [
    ("Genesis", "創世記"), ("Exodus", "出埃及記"), ("Leviticus", "利未記"),
    ("Numbers", "民數記"), ("Deuteronomy", "申命記"), ("Joshua", "約書亞記"),
    ("Judges", "士師記"), ("Ruth", "路得記"), ("1 Samuel", "撒母耳記上"),
    ("2 Samuel", "撒母耳記下"), ("1 Kings", "列王紀上"), ("2 Kings", "列王紀下"),
    ("1 Chronicles", "歷代志上"), ("2 Chronicles", "歷代志下"), ("Ezra", "以斯拉記"),
    ("Nehemiah", "尼希米記"), ("Esther", "以斯帖記"), ("Job", "約伯記"),
    ("Psalms", "詩篇"), ("Proverbs", "箴言"), ("Ecclesiastes", "傳道書"),
    ("Song of Solomon", "雅歌"), ("Isaiah", "以賽亞書"), ("Jeremiah", "耶利米書"),
    ("Lamentations", "耶利米哀歌"), ("Ezekiel", "以西結書"), ("Daniel", "但以理書"),
    ("Hosea", "何西阿書"), ("Joel", "約珥書"), ("Amos", "阿摩司書"),
    ("Obadiah", "俄巴底亞書"), ("Jonah", "約拿書"), ("Micah", "彌迦書"),
    ("Nahum", "那鴻書"), ("Habakkuk", "哈巴谷書"), ("Zephaniah", "西番雅書"),
    ("Haggai", "哈該書"), ("Zechariah", "撒迦利亞書"), ("Malachi", "瑪拉基書"),
    ("Matthew", "馬太福音"), ("Mark", "馬可福音"), ("Luke", "路加福音"),
    ("John", "約翰福音"), ("Acts", "使徒行傳"), ("Romans", "羅馬書"),
    ("1 Corinthians", "哥林多前書"), ("2 Corinthians", "哥林多後書"),
    ("Galatians", "加拉太書"), ("Ephesians", "以弗所書"), ("Philippians", "腓立比書"),
    ("Colossians", "歌羅西書"), ("1 Thessalonians", "帖撒羅尼迦前書"),
    ("2 Thessalonians", "帖撒羅尼迦後書"), ("1 Timothy", "提摩太前書"),
    ("2 Timothy", "提摩太後書"), ("Titus", "提多書"), ("Philemon", "腓利門書"),
    ("Hebrews", "希伯來書"), ("James", "雅各書"), ("1 Peter", "彼得前書"),
    ("2 Peter", "彼得後書"), ("1 John", "約翰一書"), ("2 John", "約翰二書"),
    ("3 John", "約翰三書"), ("Jude", "猶大書"), ("Revelation", "啟示錄"),
];

/// Versions whose book names are displayed in Simplified Chinese.
const CHINESE_SIMPLIFIED_VERSIONS: [&str; 3] = ["CNVS", "CUNPSS-上帝", "CUNPSS-神"];

fn lookup(table: &'static [(&str, &str); 66], book: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(english, _)| *english == book)
        .map(|(_, translated)| *translated)
}

/// Returns the display name of an English book name for a given version.
///
/// Unknown versions and unknown book names fall back to the English name.
pub fn translated_book_name<'a>(book: &'a str, version: &str) -> &'a str {
    let translated = if version == "TB" {
        lookup(&INDONESIAN_BOOKS, book)
    } else if CHINESE_SIMPLIFIED_VERSIONS.contains(&version) {
        lookup(&CHINESE_SIMPLIFIED_BOOKS, book)
    } else if version == "CUV" {
        lookup(&CHINESE_TRADITIONAL_BOOKS, book)
    } else {
        None
    };
    translated.unwrap_or(book)
}
