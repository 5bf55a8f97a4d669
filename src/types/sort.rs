//! Sort state types.

use serde::{Deserialize, Serialize};

/// Direction of the active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    /// Ascending order.
    Ascending,
    /// Descending order.
    Descending,
}

/// At most one column sorted at a time; direction exists iff a column does.
///
/// The invariant is held by construction: both halves live inside the same
/// `Option`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    active: Option<(String, SortDirection)>,
}

impl SortState {
    /// The unsorted state.
    pub fn unsorted() -> Self {
        SortState { active: None }
    }

    /// Sort by a column in a direction.
    pub fn by(column_id: impl Into<String>, direction: SortDirection) -> Self {
        SortState {
            active: Some((column_id.into(), direction)),
        }
    }

    /// The active `(column_id, direction)` pair, if any.
    pub fn active(&self) -> Option<(&str, SortDirection)> {
        self.active.as_ref().map(|(id, dir)| (id.as_str(), *dir))
    }

    /// Whether nothing is sorted.
    pub fn is_unsorted(&self) -> bool {
        self.active.is_none()
    }

    /// Encode for the data provider: `"col"` ascending, `"-col"`
    /// descending, `None` unsorted. This is the only wire contract the
    /// grid owns.
    pub fn encode_for_server(&self) -> Option<String> {
        self.active.as_ref().map(|(id, dir)| match dir {
            SortDirection::Ascending => id.clone(),
            SortDirection::Descending => format!("-{id}"),
        })
    }

    /// Decode the wire encoding (used for `initial_sort_by` configuration).
    ///
    /// Returns `None` for empty input.
    pub fn decode(encoded: &str) -> Option<Self> {
        let encoded = encoded.trim();
        if encoded.is_empty() || encoded == "-" {
            return None;
        }
        Some(match encoded.strip_prefix('-') {
            Some(id) => SortState::by(id, SortDirection::Descending),
            None => SortState::by(encoded, SortDirection::Ascending),
        })
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_encode() {
        assert_eq!(SortState::unsorted().encode_for_server(), None);
        assert_eq!(
            SortState::by("name", SortDirection::Ascending).encode_for_server(),
            Some("name".to_string())
        );
        assert_eq!(
            SortState::by("name", SortDirection::Descending).encode_for_server(),
            Some("-name".to_string())
        );
    }

    #[test_case("name", Some(("name", SortDirection::Ascending)); "ascending")]
    #[test_case("-name", Some(("name", SortDirection::Descending)); "descending")]
    #[test_case("", None; "empty")]
    #[test_case("-", None; "bare dash")]
    fn test_decode(encoded: &str, expected: Option<(&str, SortDirection)>) {
        let state = SortState::decode(encoded);
        assert_eq!(state.as_ref().and_then(|s| s.active()), expected);
    }

    #[test]
    fn test_round_trip() {
        let state = SortState::by("age", SortDirection::Descending);
        let encoded = state.encode_for_server().unwrap();
        assert_eq!(SortState::decode(&encoded), Some(state));
    }
}
