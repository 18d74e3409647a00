//! Unit tests for the ordered keyed dictionary.

use super::{Dictionary, Keyed};

#[derive(Clone, Debug, PartialEq, Eq)]
struct Entry {
    name: &'static str,
    value: i64,
}

impl Keyed for Entry {
    fn dictionary_key(&self) -> &str {
        self.name
    }
}

fn names(dictionary: &Dictionary<Entry>) -> Vec<&'static str> {
    dictionary.iter().map(|entry| entry.name).collect()
}

#[test]
fn preserves_insertion_order() {
    let mut dictionary = Dictionary::new();
    dictionary.insert(Entry { name: "zulu", value: 1 });
    dictionary.insert(Entry { name: "alpha", value: 2 });
    dictionary.insert(Entry { name: "mike", value: 3 });

    assert_eq!(names(&dictionary), vec!["zulu", "alpha", "mike"]);
}

#[test]
fn find_ignores_case() {
    let mut dictionary = Dictionary::new();
    dictionary.insert(Entry { name: "max_width", value: 1 });

    assert_eq!(
        dictionary.find("MAX_WIDTH"),
        Some(&Entry { name: "max_width", value: 1 })
    );
    assert_eq!(dictionary.find("absent"), None);
}

#[test]
fn reinsertion_replaces_in_place() {
    let mut dictionary = Dictionary::new();
    dictionary.insert(Entry { name: "first", value: 1 });
    dictionary.insert(Entry { name: "second", value: 2 });
    dictionary.insert(Entry { name: "FIRST", value: 9 });

    assert_eq!(names(&dictionary), vec!["first", "second"]);
    assert_eq!(dictionary.find("first").map(|entry| entry.value), Some(9));
}

#[test]
fn merge_from_overrides_without_reordering() {
    let mut base = Dictionary::new();
    base.insert(Entry { name: "title", value: 1 });
    base.insert(Entry { name: "width", value: 2 });

    let mut overlay = Dictionary::new();
    overlay.insert(Entry { name: "width", value: 20 });
    overlay.insert(Entry { name: "height", value: 30 });

    base.merge_from(&overlay);

    assert_eq!(names(&base), vec!["title", "width", "height"]);
    assert_eq!(base.find("width").map(|entry| entry.value), Some(20));
    assert_eq!(base.len(), 3);
    assert!(!base.is_empty());
}
