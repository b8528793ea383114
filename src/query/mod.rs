/// Surface forms rewritten to a canonical term, applied once each in this order.
pub const SYNONYMS: &[(&str, &str)] = &[
    // creation / issuance
    ("creation", "create"),
    ("issuance", "issue"),
    ("issuing", "issue"),
    ("provision", "create"),
    ("provisioning", "create"),
    ("generation", "create"),
    ("generating", "create"),
    // technical
    ("endpoint", "api"),
    ("endpoints", "api"),
    ("route", "api"),
    ("routes", "api"),
    // process
    ("workflow", "process"),
    ("procedure", "process"),
    ("steps", "process"),
    // integration
    ("integration", "integrate"),
    ("connection", "connect"),
    ("linking", "connect"),
    // common variations
    ("setup", "set up"),
    ("config", "configure"),
];

/// Phrases that carry no intent. Matched literally, leading space included.
pub const NOISE_PHRASES: &[&str] = &[
    " with ramp",
    " with the ramp",
    " using ramp",
    " using the ramp",
    " api",
    " the api",
    " ramp's api",
    " ramp api",
    " with",
    " using",
    " the",
    " a",
    " an",
    " how do i",
    " how to",
    " i want to",
    " i need to",
];

/// Rewrites a raw query into the lowercase canonical form the classifier matches against.
///
/// Synonyms run before noise stripping because several noise phrases only exist in
/// canonical form (`" api"`). Every replacement is a single literal pass; the result is
/// not iterated to a fixed point.
pub fn normalize(query: &str) -> String {
    let mut text = query.to_lowercase();

    for (surface, canonical) in SYNONYMS {
        text = text.replace(surface, canonical);
    }

    for noise in NOISE_PHRASES {
        text = text.replace(noise, " ");
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
