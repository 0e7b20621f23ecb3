//! First-match-wins selection of a redirect target from geo rules.

use crate::domain::entities::GeoRule;
use crate::utils::url_norm::ensure_scheme;

/// Selects the redirect URL for a resolved country.
///
/// Scans `rules` in their stored order and returns the first rule whose
/// country set contains `country`, or `(fallback, None)` when none match.
///
/// This is first-match-wins, not most-specific-match: rule order as persisted
/// is semantically significant, so callers must pass rules exactly as returned
/// by storage.
///
/// The returned URL always carries an `http://` or `https://` scheme so the
/// resulting `Location` header cannot be interpreted as a relative path.
pub fn select_redirect(rules: &[GeoRule], country: &str, fallback: &str) -> (String, Option<i64>) {
    for rule in rules {
        if rule.matches(country) {
            return (ensure_scheme(&rule.redirect_url), Some(rule.id));
        }
    }

    (ensure_scheme(fallback), None)
}
