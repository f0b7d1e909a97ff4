//! Port list representations and their canonical normalization.
//!
//! Callers hand ports over either as raw text (`"1 2 3"`) or as a sequence
//! of mixed numeric and textual items. Both normalize to an ordered
//! `Vec<PortId>`; duplicates and order are preserved as given because
//! batch diagnostics are reported in request order.

use super::{PortId, PortListError};

/// Text token that selects every port currently held by the session.
pub const ALL_PORTS: &str = "all";

/// One element of a sequence-style port list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortItem {
    /// An already-numeric port identifier.
    Id(u32),
    /// A textual port identifier that still needs parsing.
    Text(String),
}

impl PortItem {
    fn to_port_id(&self) -> Result<PortId, PortListError> {
        match self {
            Self::Id(value) => Ok(PortId::new(*value)),
            Self::Text(text) => parse_token(text),
        }
    }
}

impl From<u32> for PortItem {
    fn from(value: u32) -> Self {
        Self::Id(value)
    }
}

impl From<PortId> for PortItem {
    fn from(value: PortId) -> Self {
        Self::Id(value.value())
    }
}

impl From<&str> for PortItem {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for PortItem {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Heterogeneous port-list input accepted by lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortList {
    /// Whitespace-delimited port identifiers.
    Text(String),
    /// An ordered sequence of port items.
    Items(Vec<PortItem>),
}

impl PortList {
    /// Builds a sequence-style list from anything convertible to items.
    #[must_use]
    pub fn items<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<PortItem>,
    {
        Self::Items(values.into_iter().map(Into::into).collect())
    }

    /// Normalizes the list into canonical port identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`PortListError::InvalidToken`] for the first token that is
    /// not a non-negative integer.
    pub fn normalize(&self) -> Result<Vec<PortId>, PortListError> {
        match self {
            Self::Text(text) => text.split_whitespace().map(parse_token).collect(),
            Self::Items(items) => items.iter().map(PortItem::to_port_id).collect(),
        }
    }
}

impl From<&str> for PortList {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for PortList {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<PortId>> for PortList {
    fn from(value: Vec<PortId>) -> Self {
        Self::items(value)
    }
}

impl From<Vec<u32>> for PortList {
    fn from(value: Vec<u32>) -> Self {
        Self::items(value)
    }
}

/// Port selection for release, including the "every held port" sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortSelection {
    /// Every port the live session currently holds, queried at call time.
    All,
    /// An explicit list of ports.
    Ports(PortList),
}

impl From<&str> for PortSelection {
    fn from(value: &str) -> Self {
        if value.trim() == ALL_PORTS {
            Self::All
        } else {
            Self::Ports(PortList::from(value))
        }
    }
}

impl From<PortList> for PortSelection {
    fn from(value: PortList) -> Self {
        Self::Ports(value)
    }
}

impl From<Vec<u32>> for PortSelection {
    fn from(value: Vec<u32>) -> Self {
        Self::Ports(PortList::from(value))
    }
}

fn parse_token(token: &str) -> Result<PortId, PortListError> {
    token
        .trim()
        .parse::<u32>()
        .map(PortId::new)
        .map_err(|_| PortListError::InvalidToken(token.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ids(values: &[u32]) -> Vec<PortId> {
        values.iter().copied().map(PortId::new).collect()
    }

    #[rstest]
    #[case("1 2 3", &[1, 2, 3])]
    #[case("  4\t0\n7 ", &[4, 0, 7])]
    #[case("3 1 3", &[3, 1, 3])]
    #[case("", &[])]
    fn text_lists_split_on_whitespace(#[case] input: &str, #[case] expected: &[u32]) {
        let normalized = PortList::from(input)
            .normalize()
            .expect("text list should normalize");
        assert_eq!(normalized, ids(expected));
    }

    #[test]
    fn mixed_items_are_coerced_in_order() {
        let list = PortList::Items(vec![
            PortItem::from(1),
            PortItem::from("2"),
            PortItem::from(3),
        ]);

        let normalized = list.normalize().expect("mixed list should normalize");

        assert_eq!(normalized, ids(&[1, 2, 3]));
    }

    #[rstest]
    #[case(PortList::from("1 two 3"), "two")]
    #[case(PortList::from("1 -2"), "-2")]
    #[case(PortList::items(["1", "x"]), "x")]
    fn non_numeric_tokens_are_rejected(#[case] list: PortList, #[case] token: &str) {
        let result = list.normalize();

        assert_eq!(result, Err(PortListError::InvalidToken(token.to_owned())));
        assert_eq!(
            result.expect_err("normalization should fail").kind(),
            crate::error::ErrorKind::InvalidArgument
        );
    }

    #[rstest]
    #[case("all", true)]
    #[case(" all ", true)]
    #[case("1 2", false)]
    #[case("ALL", false)]
    fn all_sentinel_selects_every_port(#[case] input: &str, #[case] is_all: bool) {
        assert_eq!(PortSelection::from(input) == PortSelection::All, is_all);
    }
}
