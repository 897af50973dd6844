use std::fmt;

use serde::Serialize;

pub const PAGE_SIZE_OPTIONS: [u32; 4] = [10, 20, 50, 100];
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Server-side rating filter; the absence of a filter is `None` on the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RatingFilter {
    Positive,
    Negative,
}

impl RatingFilter {
    pub fn as_param(&self) -> &'static str {
        match self {
            RatingFilter::Positive => "true",
            RatingFilter::Negative => "false",
        }
    }

    /// `""` clears the filter, anything else unknown is rejected.
    pub fn parse(value: &str) -> Result<Option<RatingFilter>, QueryError> {
        match value.trim() {
            "" => Ok(None),
            "true" => Ok(Some(RatingFilter::Positive)),
            "false" => Ok(Some(RatingFilter::Negative)),
            other => Err(QueryError::UnknownRating(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    InvalidPage(u32),
    UnsupportedPageSize(u32),
    UnknownRating(String),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::InvalidPage(p) => write!(f, "page must be at least 1, got {p}"),
            QueryError::UnsupportedPageSize(s) => {
                write!(f, "page size {s} is not one of {PAGE_SIZE_OPTIONS:?}")
            }
            QueryError::UnknownRating(v) => write!(f, "unknown rating filter '{v}'"),
        }
    }
}

impl std::error::Error for QueryError {}

pub fn validate_page_size(size: u32) -> Result<u32, QueryError> {
    if PAGE_SIZE_OPTIONS.contains(&size) {
        Ok(size)
    } else {
        Err(QueryError::UnsupportedPageSize(size))
    }
}

/// Number of the last page for `total` rows; an empty list still has page 1.
pub fn last_page(total: u64, page_size: u32) -> u32 {
    let size = u64::from(page_size.max(1));
    u32::try_from(total.div_ceil(size)).unwrap_or(u32::MAX).max(1)
}

/// Filter and pagination state for the feedback list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackQuery {
    page: u32,
    page_size: u32,
    keywords: String,
    rating: Option<RatingFilter>,
}

impl Default for FeedbackQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl FeedbackQuery {
    /// Starts on page 1 with no filters. Unsupported sizes fall back to the default.
    pub fn new(page_size: u32) -> Self {
        let page_size = validate_page_size(page_size).unwrap_or(DEFAULT_PAGE_SIZE);
        Self { page: 1, page_size, keywords: String::new(), rating: None }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn keywords(&self) -> &str {
        &self.keywords
    }

    pub fn rating(&self) -> Option<RatingFilter> {
        self.rating
    }

    /// Trims and stores the keywords; always lands on page 1.
    pub fn set_keywords(&mut self, keywords: &str) {
        self.keywords = keywords.trim().to_string();
        self.page = 1;
    }

    /// Always lands on page 1.
    pub fn set_rating(&mut self, rating: Option<RatingFilter>) {
        self.rating = rating;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: u32) -> Result<(), QueryError> {
        if page == 0 {
            return Err(QueryError::InvalidPage(page));
        }
        self.page = page;
        Ok(())
    }

    /// Leaves the page number alone.
    pub fn set_page_size(&mut self, size: u32) -> Result<(), QueryError> {
        self.page_size = validate_page_size(size)?;
        Ok(())
    }

    pub fn key(&self) -> RequestKey {
        RequestKey {
            page: self.page,
            page_size: self.page_size,
            keywords: self.keywords.clone(),
            rating: self.rating,
        }
    }
}

/// The tuple that identifies one feedback request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey {
    pub page: u32,
    pub page_size: u32,
    pub keywords: String,
    pub rating: Option<RatingFilter>,
}

impl RequestKey {
    pub fn params(&self) -> ListFeedbackParams {
        ListFeedbackParams {
            page: self.page,
            page_size: self.page_size,
            keywords: (!self.keywords.is_empty()).then(|| self.keywords.clone()),
            thumbup: self.rating.map(|r| r.as_param()),
        }
    }
}

/// Query string sent to the chat service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListFeedbackParams {
    pub page: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbup: Option<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_trimmed_and_reset_page() {
        let mut q = FeedbackQuery::default();
        q.set_page(4).unwrap();
        q.set_keywords("  refund policy ");
        assert_eq!(q.keywords(), "refund policy");
        assert_eq!(q.page(), 1);
    }

    #[test]
    fn rating_filter_resets_page() {
        let mut q = FeedbackQuery::default();
        q.set_page(7).unwrap();
        q.set_rating(Some(RatingFilter::Negative));
        assert_eq!(q.page(), 1);
        q.set_page(3).unwrap();
        q.set_rating(None);
        assert_eq!(q.page(), 1);
    }

    #[test]
    fn page_size_change_keeps_page() {
        let mut q = FeedbackQuery::default();
        q.set_page(5).unwrap();
        q.set_page_size(50).unwrap();
        assert_eq!(q.page(), 5);
        assert_eq!(q.page_size(), 50);
    }

    #[test]
    fn invalid_input_is_rejected_without_change() {
        let mut q = FeedbackQuery::default();
        assert_eq!(q.set_page(0), Err(QueryError::InvalidPage(0)));
        assert_eq!(q.set_page_size(30), Err(QueryError::UnsupportedPageSize(30)));
        assert_eq!(q, FeedbackQuery::default());
    }

    #[test]
    fn params_skip_empty_filters() {
        let q = FeedbackQuery::default();
        let qs = serde_urlencoded::to_string(q.key().params()).unwrap();
        assert_eq!(qs, "page=1&page_size=20");

        let mut q = FeedbackQuery::new(10);
        q.set_keywords("late reply");
        q.set_rating(Some(RatingFilter::Positive));
        let qs = serde_urlencoded::to_string(q.key().params()).unwrap();
        assert_eq!(qs, "page=1&page_size=10&keywords=late+reply&thumbup=true");
    }

    #[test]
    fn rating_filter_parses_form_values() {
        assert_eq!(RatingFilter::parse(""), Ok(None));
        assert_eq!(RatingFilter::parse("true"), Ok(Some(RatingFilter::Positive)));
        assert_eq!(RatingFilter::parse("false"), Ok(Some(RatingFilter::Negative)));
        assert!(RatingFilter::parse("maybe").is_err());
    }

    #[test]
    fn last_page_rounds_up() {
        assert_eq!(last_page(57, 50), 2);
        assert_eq!(last_page(57, 100), 1);
        assert_eq!(last_page(40, 20), 2);
        assert_eq!(last_page(0, 20), 1);
    }
}
