//! # Choseong Buckets
//!
//! Cards are navigated by the initial consonant (choseong) of their label, the way a
//! Korean dictionary is thumbed through. Labels that do not start with a Hangul
//! syllable fall into a bucket named after their uppercased first character.
//!
//! A precomposed syllable is encoded as
//! `0xAC00 + initial * 588 + medial * 28 + final`, so dividing the offset from
//! `0xAC00` by 588 yields the initial consonant's index in [`CHOSEONG`].

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// The 19 initial consonants, in encoding order.
pub const CHOSEONG: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ', 'ㅌ',
    'ㅍ', 'ㅎ',
];

const SYLLABLE_FIRST: u32 = 0xAC00;
const SYLLABLE_LAST: u32 = 0xD7A3;
const SYLLABLES_PER_INITIAL: u32 = 588;

const IMAGE_EXTENSIONS: [&str; 3] = [".jpg", ".jpeg", ".png"];

/// Bucket key for `label`, or `None` when the label is empty.
pub fn choseong(label: &str) -> Option<char> {
    let first = label.chars().next()?;
    let code = first as u32;

    if (SYLLABLE_FIRST..=SYLLABLE_LAST).contains(&code) {
        let index = ((code - SYLLABLE_FIRST) / SYLLABLES_PER_INITIAL) as usize;
        return Some(CHOSEONG[index]);
    }

    // Multi-char uppercase forms (e.g. 'ß') keep their first char.
    Some(first.to_uppercase().next().unwrap_or(first))
}

/// Display label of a card path: file name without directory and image extension.
pub fn card_label(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    for ext in IMAGE_EXTENSIONS {
        if name.len() > ext.len() {
            let split = name.len() - ext.len();
            if name.is_char_boundary(split) && name[split..].eq_ignore_ascii_case(ext) {
                return &name[..split];
            }
        }
    }
    name
}

/// Navigation order of bucket keys: Korean consonants first in table order, then
/// everything else by code point.
pub fn bucket_order(a: char, b: char) -> Ordering {
    bucket_rank(a).cmp(&bucket_rank(b))
}

fn bucket_rank(key: char) -> (u8, u32) {
    match CHOSEONG.iter().position(|&c| c == key) {
        Some(index) => (0, index as u32),
        None => (1, key as u32),
    }
}

/// Anything that can be bucketed by its answer.
///
/// Bare card paths answer with their file name, see [`card_label`].
pub trait Labeled {
    fn label(&self) -> &str;
}

impl Labeled for str {
    fn label(&self) -> &str {
        card_label(self)
    }
}

impl Labeled for String {
    fn label(&self) -> &str {
        card_label(self)
    }
}

impl<T: Labeled + ?Sized> Labeled for &T {
    fn label(&self) -> &str {
        (**self).label()
    }
}

/// A bucket of cards sharing a choseong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoseongGroup<C = String> {
    pub key: char,
    pub cards: Vec<C>,
}

/// Buckets `cards` by the choseong of their labels.
///
/// Groups come back in [`bucket_order`]; cards inside a group keep their input order.
/// Cards whose label is empty are skipped.
pub fn group_by_choseong<I, C>(cards: I) -> Vec<ChoseongGroup<C>>
where
    I: IntoIterator<Item = C>,
    C: Labeled,
{
    let mut buckets: BTreeMap<(u8, u32), ChoseongGroup<C>> = BTreeMap::new();
    for card in cards {
        let Some(key) = choseong(card.label()) else {
            continue;
        };
        buckets
            .entry(bucket_rank(key))
            .or_insert_with(|| ChoseongGroup {
                key,
                cards: Vec::new(),
            })
            .cards
            .push(card);
    }
    buckets.into_values().collect()
}

/// Cards whose bucket is one of `keys`, in input order.
pub fn filter_by_choseong<C: Labeled + Clone>(cards: &[C], keys: &[char]) -> Vec<C> {
    cards
        .iter()
        .filter(|card| choseong(card.label()).is_some_and(|key| keys.contains(&key)))
        .cloned()
        .collect()
}
