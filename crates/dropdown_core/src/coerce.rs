//! Selected-index coercion
//!
//! `selectedIndex` is always either unset or a valid index into the current
//! items. Every write and every items change runs the candidate through
//! [`coerce_selected_index`].

/// A candidate value for `selectedIndex` as written by host code or templates
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IndexCandidate {
    /// No selection
    #[default]
    Unset,
    /// Numeric candidate, possibly out of range or negative
    Index(i64),
    /// Textual candidate from a template attribute, parsed as an integer
    Text(String),
}

impl IndexCandidate {
    /// Resolve text to a number. Unparseable text resolves to `None`.
    pub fn to_number(&self) -> Option<i64> {
        match self {
            IndexCandidate::Unset => None,
            IndexCandidate::Index(i) => Some(*i),
            IndexCandidate::Text(text) => parse_leading_int(text),
        }
    }
}

impl From<i64> for IndexCandidate {
    fn from(value: i64) -> Self {
        IndexCandidate::Index(value)
    }
}

impl From<i32> for IndexCandidate {
    fn from(value: i32) -> Self {
        IndexCandidate::Index(value as i64)
    }
}

impl From<usize> for IndexCandidate {
    fn from(value: usize) -> Self {
        IndexCandidate::Index(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<Option<usize>> for IndexCandidate {
    fn from(value: Option<usize>) -> Self {
        value.map(Into::into).unwrap_or(IndexCandidate::Unset)
    }
}

impl From<&str> for IndexCandidate {
    fn from(value: &str) -> Self {
        IndexCandidate::Text(value.to_string())
    }
}

impl From<String> for IndexCandidate {
    fn from(value: String) -> Self {
        IndexCandidate::Text(value)
    }
}

/// Coerce a candidate against the current item count
///
/// - unset stays unset
/// - no items (or zero items) yields unset regardless of the candidate
/// - otherwise the candidate is clamped into `[0, count - 1]`
pub fn coerce_selected_index(candidate: &IndexCandidate, item_count: Option<usize>) -> Option<usize> {
    let value = candidate.to_number()?;
    let count = item_count.filter(|count| *count > 0)?;
    let max = count - 1;
    if value <= 0 {
        Some(0)
    } else {
        Some(usize::try_from(value).map_or(max, |v| v.min(max)))
    }
}

/// Integer prefix parse: optional surrounding whitespace, optional sign, digits.
/// Trailing garbage after the digits is ignored.
fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let magnitude = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamps_into_range() {
        let count = Some(10);
        for c in -20i64..30 {
            let coerced = coerce_selected_index(&c.into(), count).unwrap();
            assert!(coerced <= 9);
            assert_eq!(coerced as i64, c.clamp(0, 9));
        }
    }

    #[test]
    fn test_empty_items_yield_unset() {
        for c in [IndexCandidate::Index(0), IndexCandidate::Index(5), "3".into()] {
            assert_eq!(coerce_selected_index(&c, Some(0)), None);
            assert_eq!(coerce_selected_index(&c, None), None);
        }
    }

    #[test]
    fn test_unset_passes_through() {
        assert_eq!(coerce_selected_index(&IndexCandidate::Unset, Some(5)), None);
        assert_eq!(coerce_selected_index(&None::<usize>.into(), Some(5)), None);
    }

    #[test]
    fn test_text_candidates() {
        assert_eq!(coerce_selected_index(&"3".into(), Some(5)), Some(3));
        assert_eq!(coerce_selected_index(&" 12px".into(), Some(5)), Some(4));
        assert_eq!(coerce_selected_index(&"-7".into(), Some(5)), Some(0));
        assert_eq!(coerce_selected_index(&"abc".into(), Some(5)), None);
        assert_eq!(coerce_selected_index(&"".into(), Some(5)), None);
    }

    #[test]
    fn test_huge_values_clamp_to_max() {
        assert_eq!(coerce_selected_index(&i64::MAX.into(), Some(3)), Some(2));
        assert_eq!(
            coerce_selected_index(&"99999999999999999999999".into(), Some(3)),
            Some(2)
        );
    }
}
