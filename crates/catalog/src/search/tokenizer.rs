//! Query tokenization.

/// Ordered, de-duplicated, lowercase query terms.
///
/// No term is empty or carries surrounding whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermSet(Vec<String>);

impl TermSet {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Terms joined with `sep`, in first-seen order.
    pub fn join(&self, sep: &str) -> String {
        self.0.join(sep)
    }
}

/// Split a raw query into normalized terms.
pub fn tokenize(query: &str) -> TermSet {
    let lowered = query.to_lowercase();
    let mut terms: Vec<String> = Vec::new();

    for fragment in lowered.split_whitespace() {
        if !terms.iter().any(|t| t == fragment) {
            terms.push(fragment.to_string());
        }
    }

    TermSet(terms)
}
