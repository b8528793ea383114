use crate::catalog::{CATALOG, Cluster, LOW_SPECIFICITY_KEYWORDS};
use crate::query::normalize;

/// Bonus per matched keyword of more than one word.
pub const MULTI_WORD_BONUS: f64 = 0.5;
/// Penalty per matched low-specificity keyword.
pub const LOW_SPECIFICITY_PENALTY: f64 = 0.3;

/// How well one cluster matched a query.
#[derive(Debug, Clone, Copy)]
pub struct IntentMatch<'a> {
    pub cluster: &'a Cluster,
    pub raw_matches: usize,
    pub score: f64,
}

/// Keyword classifier over an ordered cluster catalog.
#[derive(Debug, Clone, Copy)]
pub struct IntentClassifier<'a> {
    clusters: &'a [Cluster],
    low_specificity: &'a [&'a str],
}

impl Default for IntentClassifier<'static> {
    fn default() -> Self {
        Self::new(CATALOG, LOW_SPECIFICITY_KEYWORDS)
    }
}

impl<'a> IntentClassifier<'a> {
    pub fn new(clusters: &'a [Cluster], low_specificity: &'a [&'a str]) -> Self {
        Self {
            clusters,
            low_specificity,
        }
    }

    /// Scores one cluster against already-normalized text. `None` when no keyword matches.
    pub fn score(&self, cluster: &'a Cluster, normalized: &str) -> Option<IntentMatch<'a>> {
        let matched: Vec<&str> = cluster
            .keywords
            .iter()
            .copied()
            .filter(|kw| normalized.contains(&kw.to_lowercase()))
            .collect();

        if matched.is_empty() {
            return None;
        }

        let mut score = matched.len() as f64;
        for kw in &matched {
            if kw.split_whitespace().count() > 1 {
                score += MULTI_WORD_BONUS;
            }
            if self.low_specificity.contains(kw) {
                score -= LOW_SPECIFICITY_PENALTY;
            }
        }

        Some(IntentMatch {
            cluster,
            raw_matches: matched.len(),
            score,
        })
    }

    /// Best match for a raw query: most raw matches, then highest score, then catalog order.
    pub fn classify(&self, query: &str) -> Option<IntentMatch<'a>> {
        let normalized = normalize(query);
        let mut best: Option<IntentMatch<'a>> = None;

        for cluster in self.clusters {
            let Some(candidate) = self.score(cluster, &normalized) else {
                continue;
            };

            let better = match &best {
                None => true,
                Some(current) => {
                    candidate.raw_matches > current.raw_matches
                        || (candidate.raw_matches == current.raw_matches
                            && candidate.score > current.score)
                }
            };
            if better {
                best = Some(candidate);
            }
        }

        if let Some(found) = &best {
            tracing::debug!(
                query,
                normalized = %normalized,
                cluster = %found.cluster.id,
                raw_matches = found.raw_matches,
                score = found.score,
                "intent detected"
            );
        }

        best
    }

    pub fn detect(&self, query: &str) -> Option<&'a Cluster> {
        self.classify(query).map(|m| m.cluster)
    }
}

/// Classifies against the built-in catalog.
pub fn detect_intent(query: &str) -> Option<&'static Cluster> {
    IntentClassifier::default().detect(query)
}
