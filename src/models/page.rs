//! Pagination request and metadata.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Which page of a listing to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PageRequest {
    /// 1-based page number
    pub page: usize,
    pub per_page: usize,
}

impl PageRequest {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self { page, per_page }
    }

    /// First page with the given size.
    pub fn first(per_page: usize) -> Self {
        Self::new(1, per_page)
    }
}

/// Pagination metadata returned with every listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: usize,
    pub per_page: usize,
    pub total: usize,
    pub last_page: usize,
}

/// One page of records plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Paginated<T> {
    /// Convert each record on the page, keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

/// Slice one page out of `items`.
///
/// Page 0 is treated as page 1. A page past the end yields no data, but the metadata still
/// reports the computed `last_page`, which is never less than 1.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Result<Paginated<T>, AppError> {
    if request.per_page == 0 {
        return Err(AppError::Validation(
            "Page size must be at least 1".to_string(),
        ));
    }

    let current_page = request.page.max(1);
    let total = items.len();
    let last_page = total.div_ceil(request.per_page).max(1);
    let start = (current_page - 1).saturating_mul(request.per_page);

    let data = items
        .into_iter()
        .skip(start)
        .take(request.per_page)
        .collect();

    Ok(Paginated {
        data,
        pagination: Pagination {
            current_page,
            per_page: request.per_page,
            total,
            last_page,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_records_page_size_two() {
        let items: Vec<i32> = (1..=5).collect();

        let sizes: Vec<usize> = (1..=3)
            .map(|page| {
                paginate(items.clone(), PageRequest::new(page, 2))
                    .unwrap()
                    .data
                    .len()
            })
            .collect();
        assert_eq!(sizes, vec![2, 2, 1]);

        let page = paginate(items, PageRequest::new(3, 2)).unwrap();
        assert_eq!(page.data, vec![5]);
        assert_eq!(page.pagination.last_page, 3);
        assert_eq!(page.pagination.total, 5);
    }

    #[test]
    fn test_pages_cover_every_record_once() {
        let items: Vec<i32> = (1..=20).collect();
        let per_page = 6;
        let last_page = paginate(items.clone(), PageRequest::first(per_page))
            .unwrap()
            .pagination
            .last_page;
        assert_eq!(last_page, 4);

        let mut seen = Vec::new();
        for page in 1..=last_page {
            seen.extend(paginate(items.clone(), PageRequest::new(page, per_page)).unwrap().data);
        }
        assert_eq!(seen, items);
    }

    #[test]
    fn test_out_of_range_page_is_empty_with_metadata() {
        let page = paginate(vec![1, 2, 3], PageRequest::new(9, 2)).unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.pagination.current_page, 9);
        assert_eq!(page.pagination.last_page, 2);
    }

    #[test]
    fn test_page_zero_is_first_page() {
        let page = paginate(vec![1, 2, 3], PageRequest::new(0, 2)).unwrap();
        assert_eq!(page.data, vec![1, 2]);
        assert_eq!(page.pagination.current_page, 1);
    }

    #[test]
    fn test_empty_collection_reports_one_page() {
        let page = paginate(Vec::<i32>::new(), PageRequest::first(6)).unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.pagination.total, 0);
        assert_eq!(page.pagination.last_page, 1);
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let err = paginate(vec![1], PageRequest::new(1, 0)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
