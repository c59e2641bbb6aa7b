//! Page requests, sort specifications, and the slicer that cuts a page out of
//! an ordered snapshot.
//!
//! Repositories only ever order by key. A [`Sort`] can still be attached to a
//! [`PageRequest`] so that callers written against sortable repositories get a
//! clear [`StoreError::UnsupportedSort`] instead of silently key-ordered data.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Sort direction of a single [`Order`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "ASC"),
            Self::Desc => write!(f, "DESC"),
        }
    }
}

/// Ordering on one named property.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    pub property: String,
    pub direction: Direction,
}

impl Order {
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Desc,
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.direction)
    }
}

/// A multi-property sort specification.
///
/// The empty specification ([`Sort::unsorted`]) is accepted alongside page
/// requests; anything else is rejected by the slicer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sort {
    orders: Vec<Order>,
}

impl Sort {
    /// The empty specification.
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn new(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    /// Ascending on each of `properties`, in the given priority.
    pub fn by<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            orders: properties.into_iter().map(Order::asc).collect(),
        }
    }

    /// Append a lower-priority order.
    pub fn and(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn is_unsorted(&self) -> bool {
        self.orders.is_empty()
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.orders.is_empty() {
            return write!(f, "UNSORTED");
        }
        for (i, order) in self.orders.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{order}")?;
        }
        Ok(())
    }
}

/// A request for a contiguous window of a repository's contents.
///
/// Offsets and sizes are signed so that malformed requests coming from
/// callers are representable and rejected with
/// [`StoreError::InvalidPageRequest`] rather than wrapping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    offset: i64,
    size: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sort: Option<Sort>,
}

impl PageRequest {
    /// Request `size` entries starting at entry `offset`.
    pub fn new(offset: i64, size: i64) -> Self {
        Self {
            offset,
            size,
            sort: None,
        }
    }

    /// Request the zero-based `page` of `size` entries.
    pub fn of(page: i64, size: i64) -> Self {
        Self::new(page.saturating_mul(size), size)
    }

    /// Attach a sort specification.
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    pub fn sort(&self) -> Option<&Sort> {
        self.sort.as_ref()
    }

    /// The request for the page after this one.
    pub fn next(&self) -> Self {
        Self {
            offset: self.offset.saturating_add(self.size),
            size: self.size,
            sort: self.sort.clone(),
        }
    }

    fn validate(&self) -> StoreResult<()> {
        if self.offset < 0 || self.size < 0 {
            return Err(StoreError::InvalidPageRequest {
                offset: self.offset,
                size: self.size,
            });
        }
        match &self.sort {
            Some(sort) if !sort.is_unsorted() => Err(StoreError::UnsupportedSort(sort.to_string())),
            _ => Ok(()),
        }
    }
}

/// A key-ordered window of a repository plus the entry count of the snapshot
/// it was cut from.
///
/// Pages are only produced by [`slice`], which guarantees `len() <= size()`
/// and, for a non-empty page, `offset() + len() <= total()`. They serialize
/// for output but cannot be deserialized:
///
/// ```compile_fail
/// let page: keel_store::Page<u32> = serde_json::from_str(
///     r#"{"content":[1,2,3],"offset":0,"size":1,"total":0}"#,
/// ).unwrap();
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    content: Vec<T>,
    offset: usize,
    size: usize,
    total: usize,
}

impl<T> Page<T> {
    /// Entries on this page, in key order.
    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    /// Number of entries in the snapshot the page was cut from.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Effective page size (after any configured clamp).
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Zero-based page number.
    pub fn number(&self) -> usize {
        if self.size == 0 {
            0
        } else {
            self.offset / self.size
        }
    }

    pub fn total_pages(&self) -> usize {
        if self.size == 0 {
            0
        } else {
            self.total.div_ceil(self.size)
        }
    }

    pub fn has_next(&self) -> bool {
        self.size > 0 && self.offset.saturating_add(self.size) < self.total
    }

    pub fn has_previous(&self) -> bool {
        self.offset > 0
    }

    pub fn is_first(&self) -> bool {
        !self.has_previous()
    }

    pub fn is_last(&self) -> bool {
        !self.has_next()
    }

    /// Convert the entries, keeping the paging metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            offset: self.offset,
            size: self.size,
            total: self.total,
        }
    }
}

/// Cut the page described by `request` out of an ordered snapshot.
///
/// `max_page_size` clamps the requested size. An offset at or past the end
/// of `items` yields an empty page; the total is always `items.len()`.
pub fn slice<T>(
    items: Vec<T>,
    request: &PageRequest,
    max_page_size: Option<usize>,
) -> StoreResult<Page<T>> {
    request.validate()?;

    let total = items.len();
    let offset = usize::try_from(request.offset).unwrap_or(usize::MAX);
    let mut size = usize::try_from(request.size).unwrap_or(usize::MAX);
    if let Some(max) = max_page_size {
        size = size.min(max);
    }

    let content = if offset >= total {
        Vec::new()
    } else {
        let end = total.min(offset.saturating_add(size));
        items.into_iter().skip(offset).take(end - offset).collect()
    };

    Ok(Page {
        content,
        offset,
        size,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn five() -> Vec<u32> {
        vec![1, 2, 3, 4, 5]
    }

    // -----------------------------------------------------------------------
    // Slicing
    // -----------------------------------------------------------------------

    #[test]
    fn slice_middle() {
        let page = slice(five(), &PageRequest::new(1, 2), None).unwrap();
        assert_eq!(page.content(), &[2, 3]);
        assert_eq!(page.total(), 5);
    }

    #[test]
    fn slice_clipped_at_end() {
        let page = slice(five(), &PageRequest::new(4, 10), None).unwrap();
        assert_eq!(page.content(), &[5]);
        assert_eq!(page.total(), 5);
    }

    #[test]
    fn slice_offset_past_end_is_empty() {
        let page = slice(five(), &PageRequest::new(10, 5), None).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total(), 5);
    }

    #[test]
    fn slice_offset_equal_to_len_is_empty() {
        let page = slice(five(), &PageRequest::new(5, 1), None).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total(), 5);
    }

    #[test]
    fn slice_zero_size() {
        let page = slice(five(), &PageRequest::new(0, 0), None).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total(), 5);
        assert_eq!(page.total_pages(), 0);
        assert!(!page.has_next());
    }

    #[test]
    fn slice_empty_input() {
        let page = slice(Vec::<u32>::new(), &PageRequest::new(0, 10), None).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total(), 0);
        assert!(page.is_last());
    }

    #[test]
    fn slice_huge_values_do_not_overflow() {
        let page = slice(five(), &PageRequest::new(3, i64::MAX), None).unwrap();
        assert_eq!(page.content(), &[4, 5]);
    }

    #[test]
    fn slice_clamped_by_max_page_size() {
        let page = slice(five(), &PageRequest::new(0, 100), Some(2)).unwrap();
        assert_eq!(page.content(), &[1, 2]);
        assert_eq!(page.size(), 2);
        assert!(page.has_next());
    }

    // -----------------------------------------------------------------------
    // Rejected requests
    // -----------------------------------------------------------------------

    #[test]
    fn negative_offset_rejected() {
        let err = slice(five(), &PageRequest::new(-1, 2), None).unwrap_err();
        assert_eq!(err, StoreError::InvalidPageRequest { offset: -1, size: 2 });
    }

    #[test]
    fn negative_size_rejected() {
        let err = slice(five(), &PageRequest::new(0, -3), None).unwrap_err();
        assert_eq!(err, StoreError::InvalidPageRequest { offset: 0, size: -3 });
    }

    #[test]
    fn non_empty_sort_rejected() {
        let request = PageRequest::new(0, 2).with_sort(Sort::by(["name"]));
        let err = slice(five(), &request, None).unwrap_err();
        assert_eq!(err, StoreError::UnsupportedSort("name: ASC".into()));
    }

    #[test]
    fn empty_sort_accepted() {
        let request = PageRequest::new(0, 2).with_sort(Sort::unsorted());
        let page = slice(five(), &request, None).unwrap();
        assert_eq!(page.content(), &[1, 2]);
    }

    // -----------------------------------------------------------------------
    // Request / page metadata
    // -----------------------------------------------------------------------

    #[test]
    fn page_number_request() {
        let request = PageRequest::of(2, 2);
        assert_eq!(request.offset(), 4);
        assert_eq!(request.size(), 2);
        assert_eq!(request.next().offset(), 6);
    }

    #[test]
    fn page_metadata() {
        let page = slice(five(), &PageRequest::of(1, 2), None).unwrap();
        assert_eq!(page.content(), &[3, 4]);
        assert_eq!(page.number(), 1);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());
        assert!(page.has_previous());
        assert!(!page.is_first());
        assert!(!page.is_last());

        let last = slice(five(), &PageRequest::of(2, 2), None).unwrap();
        assert_eq!(last.content(), &[5]);
        assert!(last.is_last());
    }

    #[test]
    fn page_map_keeps_metadata() {
        let page = slice(five(), &PageRequest::new(1, 2), None)
            .unwrap()
            .map(|n| n.to_string());
        assert_eq!(page.content(), &["2".to_string(), "3".to_string()]);
        assert_eq!(page.total(), 5);
        assert_eq!(page.offset(), 1);
    }

    #[test]
    fn page_serializes_metadata() {
        let page = slice(five(), &PageRequest::new(1, 2), None).unwrap();
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"content": [2, 3], "offset": 1, "size": 2, "total": 5})
        );
    }

    #[test]
    fn sort_display() {
        let sort = Sort::by(["name"]).and(Order::desc("created"));
        assert_eq!(sort.to_string(), "name: ASC, created: DESC");
        assert_eq!(Sort::unsorted().to_string(), "UNSORTED");
    }

    #[test]
    fn page_request_serde() {
        let request = PageRequest::new(3, 4).with_sort(Sort::new(vec![Order::desc("id")]));
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"desc\""));
        let back: PageRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    proptest! {
        #[test]
        fn slice_is_bounded_and_contiguous(
            len in 0usize..64,
            offset in 0i64..80,
            size in 0i64..80,
        ) {
            let items: Vec<usize> = (0..len).collect();
            let page = slice(items, &PageRequest::new(offset, size), None).unwrap();
            prop_assert_eq!(page.total(), len);
            prop_assert!(page.len() as i64 <= size);
            for (i, v) in page.content().iter().enumerate() {
                prop_assert_eq!(*v, offset as usize + i);
            }
        }
    }
}
