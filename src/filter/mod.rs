//! Live search filter over the current snapshot.
//!
//! The filter is a pure function of (snapshot, term). It is re-run from scratch
//! whenever either input changes, so the snapshot path and the keystroke path
//! always agree on the view.

use crate::snapshot::{MonitoredTarget, Snapshot};

/// A search term, lowercased once when captured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterTerm(String);

impl FilterTerm {
    pub fn new(raw: &str) -> Self {
        Self(raw.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Derive the ordered view of `snapshot` matching `term`.
///
/// An empty term yields the whole snapshot in order. Otherwise every target
/// whose url or status text contains the term (case-insensitive substring) is
/// kept, in original relative order.
///
/// # Examples
///
/// ```
/// use sitewatch::filter::{filter, FilterTerm};
/// use sitewatch::snapshot::{MonitoredTarget, Snapshot};
///
/// let snapshot = Snapshot::new(vec![
///     MonitoredTarget::new("https://shop.test"),
///     MonitoredTarget::new("https://blog.test"),
/// ]);
///
/// let view = filter(&snapshot, &FilterTerm::new("SHOP"));
/// assert_eq!(view.len(), 1);
/// assert_eq!(view[0].url, "https://shop.test");
/// ```
pub fn filter<'a>(snapshot: &'a Snapshot, term: &FilterTerm) -> Vec<&'a MonitoredTarget> {
    if term.is_empty() {
        return snapshot.iter().collect();
    }
    snapshot.iter().filter(|t| t.matches(term.as_str())).collect()
}

/// Session-scoped search state. Written only by the search-input handler.
#[derive(Debug, Default)]
pub struct FilterState {
    term: FilterTerm,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(&self) -> &FilterTerm {
        &self.term
    }

    pub(crate) fn set(&mut self, raw: &str) {
        self.term = FilterTerm::new(raw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::TargetStatus;

    fn target(url: &str, status: TargetStatus) -> MonitoredTarget {
        let mut t = MonitoredTarget::new(url);
        t.status = status;
        t
    }

    fn sample() -> Snapshot {
        Snapshot::new(vec![
            target("https://a.test", TargetStatus::Up),
            target("https://down-detector.test", TargetStatus::Ok(200)),
            target("https://c.test", TargetStatus::Down),
            target("https://d.test", TargetStatus::Http(503)),
        ])
    }

    #[test]
    fn test_empty_term_is_identity() {
        let snapshot = sample();
        let view = filter(&snapshot, &FilterTerm::default());
        let urls: Vec<_> = view.iter().map(|t| t.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://a.test",
                "https://down-detector.test",
                "https://c.test",
                "https://d.test"
            ]
        );
    }

    #[test]
    fn test_matches_url_or_status_preserving_order() {
        let snapshot = sample();
        let view = filter(&snapshot, &FilterTerm::new("Down"));
        let urls: Vec<_> = view.iter().map(|t| t.url.as_str()).collect();
        assert_eq!(urls, vec!["https://down-detector.test", "https://c.test"]);
    }

    #[test]
    fn test_no_match_yields_empty_view() {
        let snapshot = Snapshot::new(vec![target("https://a.test", TargetStatus::Up)]);
        assert!(filter(&snapshot, &FilterTerm::new("down")).is_empty());
    }

    #[test]
    fn test_term_is_lowercased_on_capture() {
        let mut state = FilterState::new();
        state.set("HTTP 5");
        assert_eq!(state.term().as_str(), "http 5");

        let snapshot = sample();
        let view = filter(&snapshot, state.term());
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].url, "https://d.test");
    }

    #[test]
    fn test_clearing_term_restores_full_view() {
        let mut state = FilterState::new();
        state.set("c.test");
        state.set("");
        assert!(state.term().is_empty());
        assert_eq!(filter(&sample(), state.term()).len(), 4);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_status() -> impl Strategy<Value = TargetStatus> {
            prop_oneof![
                Just(TargetStatus::Unknown),
                Just(TargetStatus::Up),
                Just(TargetStatus::Down),
                (100u16..600).prop_map(TargetStatus::Ok),
                (100u16..600).prop_map(TargetStatus::Http),
            ]
        }

        fn arb_snapshot() -> impl Strategy<Value = Snapshot> {
            prop::collection::vec(("[a-zA-Z]{1,8}", arb_status()), 0..12).prop_map(|items| {
                Snapshot::new(
                    items
                        .into_iter()
                        .enumerate()
                        .map(|(i, (host, status))| {
                            target(&format!("https://{}{}.test", host, i), status)
                        })
                        .collect(),
                )
            })
        }

        proptest! {
            #[test]
            fn prop_empty_term_returns_snapshot(snapshot in arb_snapshot()) {
                let view = filter(&snapshot, &FilterTerm::new(""));
                let expected: Vec<&MonitoredTarget> = snapshot.iter().collect();
                prop_assert_eq!(view, expected);
            }

            #[test]
            fn prop_view_is_exact_matching_subsequence(
                snapshot in arb_snapshot(),
                raw in "[a-zA-Z0-9 ]{0,4}",
            ) {
                let term = FilterTerm::new(&raw);
                let view = filter(&snapshot, &term);
                let needle = raw.to_lowercase();

                let expected: Vec<&MonitoredTarget> = snapshot
                    .iter()
                    .filter(|t| {
                        needle.is_empty()
                            || t.url.to_lowercase().contains(&needle)
                            || t.status.to_string().to_lowercase().contains(&needle)
                    })
                    .collect();

                prop_assert_eq!(view, expected);
            }

            #[test]
            fn prop_filter_is_referentially_transparent(
                snapshot in arb_snapshot(),
                raw in "[a-z]{0,3}",
            ) {
                let term = FilterTerm::new(&raw);
                prop_assert_eq!(filter(&snapshot, &term), filter(&snapshot, &term));
            }
        }
    }
}
