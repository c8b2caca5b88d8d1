//! # URI Mapping
//!
//! Turns bare store identifiers and node labels into the public URIs
//! carried by a [`ContentItem`](super::ContentItem).

/// Namespace prefix of concept and content thing URIs
pub const THING_URI_PREFIX: &str = "http://api.ft.com/things/";

const PROD_API_BASE: &str = "http://api.ft.com/";
const TEST_API_BASE: &str = "http://test.api.ft.com/";

/// Known labels with their ontology type URI, most general first
const TYPE_HIERARCHY: &[(&str, &str)] = &[
    ("Thing", "http://www.ft.com/ontology/core/Thing"),
    ("Content", "http://www.ft.com/ontology/content/Content"),
    ("Article", "http://www.ft.com/ontology/content/Article"),
    ("Video", "http://www.ft.com/ontology/content/Video"),
    ("Audio", "http://www.ft.com/ontology/content/Audio"),
    ("ImageSet", "http://www.ft.com/ontology/content/ImageSet"),
    ("Graphic", "http://www.ft.com/ontology/content/Graphic"),
    ("LiveBlogPost", "http://www.ft.com/ontology/content/LiveBlogPost"),
    ("ContentPackage", "http://www.ft.com/ontology/content/ContentPackage"),
];

/// Strip the thing namespace from a concept URI.
///
/// Values without the prefix are returned unchanged.
pub fn strip_thing_prefix(uri: &str) -> &str {
    uri.strip_prefix(THING_URI_PREFIX).unwrap_or(uri)
}

/// Thing URI for a bare uuid
pub fn id_url(uuid: &str) -> String {
    format!("{}{}", THING_URI_PREFIX, uuid)
}

/// Public API URL of a content item in the given environment
pub fn api_url(uuid: &str, env: &str) -> String {
    let base = if env == "test" { TEST_API_BASE } else { PROD_API_BASE };
    format!("{}content/{}", base, uuid)
}

/// Map node labels to ontology type URIs, most general first.
///
/// Labels outside the content hierarchy are dropped, duplicates collapse.
pub fn type_uris<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    TYPE_HIERARCHY
        .iter()
        .filter(|(label, _)| labels.iter().any(|l| l.as_ref() == *label))
        .map(|(_, uri)| uri.to_string())
        .collect()
}
