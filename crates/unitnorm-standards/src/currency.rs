use std::collections::BTreeMap;

/// Suffix that marks a currency code expressed in billions.
pub const BILLIONS_SUFFIX: &str = " bn";

/// Raw currency code to canonical token, for one country.
///
/// Entries are kept longest code first so a specific variant (`"CNY bn"`) is
/// always applied before the bare code it contains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrencyMap {
    entries: Vec<(String, String)>,
}

impl CurrencyMap {
    pub fn new(map: BTreeMap<String, String>) -> Self {
        let mut entries: Vec<(String, String)> = map
            .into_iter()
            .filter(|(code, _)| !code.trim().is_empty())
            .collect();
        entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries
            .iter()
            .map(|(code, token)| (code.as_str(), token.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for CurrencyMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(code, token)| (code.into(), token.into()))
                .collect(),
        )
    }
}
