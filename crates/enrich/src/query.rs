/// Site filter prepended when handing phrases to an external web engine.
const SITE_FILTER: &str = "site:en.wikipedia.org";

/// Join phrases into one OR-disjunction search string, input order kept.
///
/// No length validation happens here; the search API's practical query
/// ceiling (around 300 characters) surfaces as a search failure.
pub fn or_join(phrases: &[String]) -> String {
    phrases.join(" OR ")
}

/// The same phrases as a site-scoped query for an external web engine.
/// With no phrases this is exactly the site filter, no trailing operator.
pub fn site_scoped_query(phrases: &[String]) -> String {
    if phrases.is_empty() {
        return SITE_FILTER.to_string();
    }
    format!("{} {}", SITE_FILTER, or_join(phrases))
}
