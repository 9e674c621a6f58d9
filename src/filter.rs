//! Allow-list matching for name and room selectors.

/// Whether `candidate` is one of the comma-separated entries of `list`.
///
/// A missing list matches everything. Entries are compared exactly: no
/// trimming, no case folding, no substrings. An empty entry (`"a,,b"`)
/// matches the empty candidate; an empty list string matches nothing.
///
/// # Examples
///
/// ```
/// use wizctl::matches;
///
/// assert!(matches("desk", None));
/// assert!(matches("desk", Some("lamp,desk")));
/// assert!(!matches("des", Some("lamp,desk")));
/// assert!(!matches("Desk", Some("desk")));
/// ```
pub fn matches(candidate: &str, list: Option<&str>) -> bool {
    match list {
        None => true,
        Some("") => false,
        Some(list) => list.split(',').any(|entry| entry == candidate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_list_matches_everything() {
        for s in ["", "lamp", "a,b", " "] {
            assert!(matches(s, None));
        }
    }

    #[test]
    fn test_exact_entries_only() {
        let list = Some("kitchen,living room,bed");
        assert!(matches("kitchen", list));
        assert!(matches("living room", list));
        assert!(matches("bed", list));
        assert!(!matches("bedroom", list));
        assert!(!matches("living", list));
        assert!(!matches(" kitchen", list));
        assert!(!matches("kitchen,living room", list));
    }

    #[test]
    fn test_empty_candidate() {
        assert!(!matches("", Some("a,b")));
        assert!(matches("", Some("a,,b")));
        assert!(matches("", Some("a,")));
        assert!(!matches("", Some("")));
    }
}
