use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static RE_BRACKETED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*[(\[{].*?[)\]}]").unwrap()
});
static RE_EDITION_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*-\s*(remaster(?:ed)?(?: \d{4})?|single version|album version|radio edit|live.*)$")
        .unwrap()
});
static RE_FEAT_CREDIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+feat\..*$").unwrap());
static RE_NON_ALNUM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Separator between the title and artist components of a dedup key. Both
/// components have all punctuation collapsed away, so it cannot collide with
/// either of them.
pub const KEY_SEPARATOR: &str = "||";

/// Normalizes a display title into its canonical dedup form: lower-cased,
/// bracketed segments gone, remaster/live/radio-edit/version suffixes gone,
/// trailing "feat." credits gone, punctuation collapsed to single spaces.
///
/// Catalogs carry many editions of the same recording under cosmetically
/// different titles; exact-string comparison misses nearly all of them.
pub fn canonical_title(title: &str) -> String {
    let s = title.to_lowercase();
    let s = RE_BRACKETED.replace_all(&s, "");
    let s = RE_EDITION_SUFFIX.replace(&s, "");
    let s = RE_FEAT_CREDIT.replace(&s, "");
    let s = RE_NON_ALNUM.replace_all(&s, " ");
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn squash(name: &str) -> String {
    let lowered = name.to_lowercase();
    let s = RE_NON_ALNUM.replace_all(&lowered, " ");
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalizes an artist credit list: per-name cleanup, empties dropped, then
/// deduplicated and sorted before joining. Sorting makes two copies of the
/// same recording with reordered featured credits canonicalize identically.
pub fn canonical_artists<S: AsRef<str>>(names: &[S]) -> String {
    let names: BTreeSet<String> = names
        .iter()
        .map(|name| squash(name.as_ref()))
        .filter(|name| !name.is_empty())
        .collect();
    names.into_iter().collect::<Vec<_>>().join(" & ")
}

/// The composite dedup key, or `None` when either component normalizes to
/// the empty string. Items without a readable title or artist never group;
/// grouping them would make every symbol-only entry "the same song".
pub fn canonical_key<S: AsRef<str>>(title: &str, artists: &[S]) -> Option<String> {
    let title_key = canonical_title(title);
    let artist_key = canonical_artists(artists);
    if title_key.is_empty() || artist_key.is_empty() {
        return None;
    }
    Some(format!("{title_key}{KEY_SEPARATOR}{artist_key}"))
}
