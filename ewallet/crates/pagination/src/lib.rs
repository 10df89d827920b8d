//! List container and pagination metadata shared by eWallet API responses.
//!
//! Multi-record responses arrive as a `list` object wrapping a `data` array
//! and, for paginated endpoints, a `pagination` block:
//!
//! ```
//! use pagination::List;
//!
//! let json = r#"{
//!     "object": "list",
//!     "data": [1, 2, 3],
//!     "pagination": {"per_page": 10, "current_page": 1,
//!                    "is_first_page": true, "is_last_page": true}
//! }"#;
//! let list: List<u32> = serde_json::from_str(json).expect("valid list");
//!
//! assert_eq!(list.first(), Some(&1));
//! assert_eq!(list.len(), 3);
//! assert!(list.pagination().is_some_and(|page| page.is_last_page()));
//! ```

use serde::{Deserialize, Serialize};

/// Pagination metadata attached to a [`List`].
///
/// Every field is optional because non-paginated endpoints omit the block
/// entirely and older servers send only a subset of it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    per_page: Option<u32>,
    #[serde(default)]
    current_page: Option<u32>,
    #[serde(default)]
    is_first_page: Option<bool>,
    #[serde(default)]
    is_last_page: Option<bool>,
}

impl Pagination {
    /// Build pagination metadata from explicit page coordinates.
    #[must_use]
    pub const fn new(per_page: u32, current_page: u32, is_first: bool, is_last: bool) -> Self {
        Self {
            per_page: Some(per_page),
            current_page: Some(current_page),
            is_first_page: Some(is_first),
            is_last_page: Some(is_last),
        }
    }

    /// Maximum number of records per page, when reported.
    #[must_use]
    pub const fn per_page(&self) -> Option<u32> {
        self.per_page
    }

    /// One-based index of the returned page, when reported.
    #[must_use]
    pub const fn current_page(&self) -> Option<u32> {
        self.current_page
    }

    /// Whether this is the first page. Unreported values count as `false`.
    #[must_use]
    pub fn is_first_page(&self) -> bool {
        self.is_first_page.unwrap_or(false)
    }

    /// Whether this is the last page. Unreported values count as `false`.
    #[must_use]
    pub fn is_last_page(&self) -> bool {
        self.is_last_page.unwrap_or(false)
    }
}

/// Ordered, read-only sequence of records decoded from a `list` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pagination: Option<Pagination>,
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            pagination: None,
        }
    }
}

impl<T> List<T> {
    /// Wrap already decoded records.
    #[must_use]
    pub const fn new(data: Vec<T>, pagination: Option<Pagination>) -> Self {
        Self { data, pagination }
    }

    /// First record, if any.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.data.first()
    }

    /// Last record, if any.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.data.last()
    }

    /// Record at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    /// Number of records in this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the page holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over the records in response order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Records as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        self.data.as_slice()
    }

    /// Pagination metadata, when the endpoint is paginated.
    #[must_use]
    pub const fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    /// Convert every record, keeping pagination metadata.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `convert`.
    pub fn try_map<U, E>(self, convert: impl FnMut(T) -> Result<U, E>) -> Result<List<U>, E> {
        let data = self.data.into_iter().map(convert).collect::<Result<_, _>>()?;
        Ok(List {
            data,
            pagination: self.pagination,
        })
    }

    /// Consume the list and return its records.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect(), None)
    }
}
