//! Naming-convention conversion for GraphQL field and argument names.
//!
//! Schema definitions historically exposed database-shaped `snake_case` names.
//! [`camelize`] maps them to the `camelCase` convention, with a small table of
//! acronyms that are written fully upper-cased (`channel_id` becomes
//! `channelID`, not `channelId`).

/// Components that are spelled as acronyms rather than capitalized words.
const CASE_EXCEPTIONS: &[(&str, &str)] = &[
    ("id", "ID"),
    ("ids", "IDs"),
    ("url", "URL"),
    ("usd", "USD"),
    ("utc", "UTC"),
    ("md", "MD"),
    ("jwt", "JWT"),
];

/// Look up the acronym spelling of a single name component.
#[must_use]
pub fn case_exception(component: &str) -> Option<&'static str> {
    CASE_EXCEPTIONS
        .iter()
        .find(|(from, _)| *from == component)
        .map(|(_, to)| *to)
}

/// Returns `true` if [`camelize`] would change `name`.
///
/// Names starting with `__` are reserved (`__id`, `__typename`) and names
/// without an underscore are already in the target convention.
#[must_use]
pub fn needs_camelize(name: &str) -> bool {
    !name.starts_with("__") && name.contains('_')
}

/// Convert a `snake_case` identifier to `camelCase`.
///
/// Every component goes through the acronym table, and every component after
/// the first gets its first letter upper-cased. Empty components (from
/// doubled or trailing underscores) contribute nothing.
///
/// ```
/// use graphql_naming::camelize;
///
/// assert_eq!(camelize("channel_id"), "channelID");
/// assert_eq!(camelize("cents_usd"), "centsUSD");
/// assert_eq!(camelize("__id"), "__id");
/// ```
#[must_use]
pub fn camelize(name: &str) -> String {
    if !needs_camelize(name) {
        return name.to_string();
    }

    let mut result = String::with_capacity(name.len());
    for (index, component) in name.split('_').enumerate() {
        let component = case_exception(component).unwrap_or(component);
        if index == 0 {
            result.push_str(component);
        } else {
            let mut chars = component.chars();
            if let Some(first) = chars.next() {
                result.extend(first.to_uppercase());
                result.push_str(chars.as_str());
            }
        }
    }
    result
}

/// Strip a `Connection` / `_connection` suffix from a field name.
///
/// Returns the bare name, or `None` if the name has no such suffix or nothing
/// would remain.
#[must_use]
pub fn strip_connection_suffix(name: &str) -> Option<&str> {
    name.strip_suffix("_connection")
        .or_else(|| name.strip_suffix("Connection"))
        .filter(|bare| !bare.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camelize_examples() {
        assert_eq!(camelize("channel_id"), "channelID");
        assert_eq!(camelize("cents_usd"), "centsUSD");
        assert_eq!(camelize("image_url"), "imageURL");
        assert_eq!(camelize("created_at"), "createdAt");
        assert_eq!(camelize("is_in_auction"), "isInAuction");
        assert_eq!(camelize("partner_ids"), "partnerIDs");
        assert_eq!(camelize("published_at_utc"), "publishedAtUTC");
        assert_eq!(camelize("description_md"), "descriptionMD");
        assert_eq!(camelize("session_jwt"), "sessionJWT");
    }

    #[test]
    fn test_camelize_passthrough() {
        assert_eq!(camelize("__id"), "__id");
        assert_eq!(camelize("__typename"), "__typename");
        assert_eq!(camelize("channelID"), "channelID");
        assert_eq!(camelize("id"), "id");
        assert_eq!(camelize(""), "");
    }

    #[test]
    fn test_camelize_maps_first_component() {
        assert_eq!(camelize("id_token"), "IDToken");
        assert_eq!(camelize("url_slug"), "URLSlug");
    }

    #[test]
    fn test_camelize_empty_components() {
        assert_eq!(camelize("channel__id"), "channelID");
        assert_eq!(camelize("channel_"), "channel");
        assert_eq!(camelize("_id"), "ID");
    }

    #[test]
    fn test_camelize_is_idempotent() {
        for name in ["channel_id", "cents_usd", "__id", "a_b_c", "_id", "x__"] {
            let once = camelize(name);
            assert_eq!(camelize(&once), once, "{name}");
        }
    }

    #[test]
    fn test_needs_camelize() {
        assert!(needs_camelize("channel_id"));
        assert!(needs_camelize("_id"));
        assert!(!needs_camelize("__id"));
        assert!(!needs_camelize("channelID"));
    }

    #[test]
    fn test_case_exception() {
        assert_eq!(case_exception("ids"), Some("IDs"));
        assert_eq!(case_exception("name"), None);
    }

    #[test]
    fn test_strip_connection_suffix() {
        assert_eq!(strip_connection_suffix("artworksConnection"), Some("artworks"));
        assert_eq!(strip_connection_suffix("artworks_connection"), Some("artworks"));
        assert_eq!(strip_connection_suffix("artworks"), None);
        assert_eq!(strip_connection_suffix("Connection"), None);
        assert_eq!(strip_connection_suffix("_connection"), None);
    }
}
