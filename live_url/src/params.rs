//! An ordered, index-addressable view of a query string.
//!
//! Keys and values are decoded with the `application/x-www-form-urlencoded`
//! rules browsers use for search params: `+` becomes a space and `%XX`
//! escapes are decoded. A `%` that does not start a valid escape (`%zz`,
//! a trailing `%`) is kept literally, and escapes that decode to invalid
//! UTF-8 are replaced with U+FFFD. Parsing never fails.

use crate::error::ParamError;
use std::fmt;
use url::form_urlencoded;

/// One `key=value` entry.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct QueryParam {
    pub key: String,
    pub value: String,
}

impl QueryParam {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    fn part_mut(&mut self, part: ParamPart) -> &mut String {
        match part {
            ParamPart::Key => &mut self.key,
            ParamPart::Value => &mut self.value,
        }
    }
}

/// Which half of an entry an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamPart {
    Key,
    Value,
}

/// Query parameters in display order. Duplicate keys are kept.
///
/// Every editing operation returns a new list, leaving `self` untouched.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct QueryParamList(Vec<QueryParam>);

impl QueryParamList {
    /// Creates an empty list.
    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a query string, with or without its leading `?`.
    ///
    /// Empty segments (`a=1&&b=2`) are skipped; a segment without `=` gets
    /// an empty value.
    pub fn parse(query: &str) -> Self {
        Self::from_query(query.strip_prefix('?').unwrap_or(query))
    }

    /// Parses a query that has already been split off its URL, so a leading
    /// `?` is part of the first key.
    pub fn from_query(query: &str) -> Self {
        form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| QueryParam::new(k, v))
            .collect()
    }

    /// Serializes the list as `key=value&key=value`, without a leading `?`.
    ///
    /// An empty list serializes to the empty string.
    pub fn serialize(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.0.iter().map(|p| (&p.key, &p.value)))
            .finish()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&QueryParam> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QueryParam> {
        self.0.iter()
    }

    /// Gets the value of the first entry with this key.
    pub fn get_first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }

    /// Returns a list with one half of entry `index` replaced.
    pub fn set_at(
        &self,
        index: usize,
        part: ParamPart,
        value: impl Into<String>,
    ) -> Result<Self, ParamError> {
        self.check_index(index)?;
        let mut next = self.clone();
        *next.0[index].part_mut(part) = value.into();
        Ok(next)
    }

    /// Returns a list without entry `index`; later entries shift down by one.
    pub fn remove_at(&self, index: usize) -> Result<Self, ParamError> {
        self.check_index(index)?;
        let mut next = self.clone();
        next.0.remove(index);
        Ok(next)
    }

    /// Returns a list with `entry` added at the end.
    pub fn append(&self, entry: QueryParam) -> Self {
        let mut next = self.clone();
        next.0.push(entry);
        next
    }

    /// Returns a list where the first entry named `key` holds `value` and any
    /// later entries with that key are dropped. Appends when `key` is absent.
    pub fn set(&self, key: &str, value: impl Into<String>) -> Self {
        let mut value = Some(value.into());
        let mut next = Vec::with_capacity(self.0.len() + 1);
        for param in &self.0 {
            if param.key != key {
                next.push(param.clone());
            } else if let Some(value) = value.take() {
                next.push(QueryParam::new(key, value));
            }
        }
        if let Some(value) = value {
            next.push(QueryParam::new(key, value));
        }
        Self(next)
    }

    fn check_index(&self, index: usize) -> Result<(), ParamError> {
        if index < self.0.len() {
            Ok(())
        } else {
            Err(ParamError::IndexOutOfRange {
                index,
                len: self.0.len(),
            })
        }
    }
}

impl fmt::Display for QueryParamList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParamList
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| QueryParam::new(key, value))
                .collect(),
        )
    }
}

impl FromIterator<QueryParam> for QueryParamList {
    fn from_iter<T: IntoIterator<Item = QueryParam>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for QueryParamList {
    type Item = QueryParam;
    type IntoIter = std::vec::IntoIter<QueryParam>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a QueryParamList {
    type Item = &'a QueryParam;
    type IntoIter = std::slice::Iter<'a, QueryParam>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
