use crate::domain::{
    errors::ValidationError,
    models::{GalleryCategory, Resource},
    value_objects::ResourceStatus,
};

/// Filter applied to collection listings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceFilter {
    pub status: Option<ResourceStatus>,
    pub category: Option<GalleryCategory>,
    /// Case-insensitive match against title, description and tags
    pub search: Option<String>,
}

impl ResourceFilter {
    pub fn active() -> Self {
        Self {
            status: Some(ResourceStatus::Active),
            ..Default::default()
        }
    }

    pub fn matches(&self, resource: &Resource) -> bool {
        if let Some(status) = self.status {
            if resource.status != status {
                return false;
            }
        }

        if let Some(category) = self.category {
            if resource.details.category() != Some(category) {
                return false;
            }
        }

        match self.search_term() {
            Some(term) => {
                resource.title.to_lowercase().contains(&term)
                    || resource.description.to_lowercase().contains(&term)
                    || resource
                        .details
                        .tags()
                        .iter()
                        .any(|tag| tag.to_lowercase().contains(&term))
            }
            None => true,
        }
    }

    /// Lowercased search term, if a non-blank one was given
    pub fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

/// Page request passed through to the store.
///
/// Built only through [`PageRequest::new`], which guarantees that both the
/// limit and the offset fit a signed 64-bit SQL parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    limit: usize,
}

impl PageRequest {
    pub fn new(page: Option<usize>, limit: usize) -> Result<Self, ValidationError> {
        let page = page.unwrap_or(1).max(1);
        let limit = limit.max(1);

        let fits = (page - 1)
            .checked_mul(limit)
            .is_some_and(|offset| i64::try_from(offset).is_ok() && i64::try_from(limit).is_ok());
        if !fits {
            return Err(ValidationError::PageOutOfRange { page, limit });
        }

        Ok(Self { page, limit })
    }

    /// 1-based page number
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn offset(&self) -> usize {
        (self.page - 1) * self.limit
    }
}

/// Listing query accepted by the resource service
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceQuery {
    pub filter: ResourceFilter,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// Pagination summary returned with a page of results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current: usize,
    pub pages: usize,
    pub total: usize,
}

impl Pagination {
    pub fn new(page: PageRequest, total: usize) -> Self {
        Self {
            current: page.page(),
            pages: total.div_ceil(page.limit()),
            total,
        }
    }
}

/// One page of a collection listing
#[derive(Debug, Clone)]
pub struct ResourcePage {
    pub items: Vec<Resource>,
    pub pagination: Option<Pagination>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_offsets() {
        let page = PageRequest::new(Some(3), 20).unwrap();
        assert_eq!(page.offset(), 40);

        let first = PageRequest::new(Some(0), 0).unwrap();
        assert_eq!(first.page(), 1);
        assert_eq!(first.limit(), 1);
        assert_eq!(first.offset(), 0);
    }

    #[test]
    fn test_page_request_rejects_unreachable_offsets() {
        assert!(matches!(
            PageRequest::new(Some(usize::MAX), 2),
            Err(ValidationError::PageOutOfRange { .. })
        ));
        assert!(PageRequest::new(Some(2), usize::MAX).is_err());
        assert!(PageRequest::new(Some(1), usize::MAX).is_err());
    }

    #[test]
    fn test_pagination_pages() {
        let page = PageRequest::new(None, 20).unwrap();
        assert_eq!(Pagination::new(page, 0).pages, 0);
        assert_eq!(Pagination::new(page, 20).pages, 1);
        assert_eq!(Pagination::new(page, 21).pages, 2);
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let filter = ResourceFilter {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.search_term(), None);
    }
}
