use askama::Template;

use super::PageContext;
use crate::models::feedback::view::rows;
use crate::models::feedback::{FeedbackRow, FeedbackSnapshot, FeedbackSummary, FetchStatus, PaginationView};

#[derive(Template)]
#[template(path = "feedback/list.html")]
pub struct FeedbackListTemplate {
    pub ctx: PageContext,
    pub summary: FeedbackSummary,
    pub rows: Vec<FeedbackRow>,
    pub pagination: PaginationView,
    pub keywords: String,
    /// Current rating filter as its form value: "", "true" or "false".
    pub rating: String,
    pub loading: bool,
    pub error: Option<String>,
    pub range_label: String,
}

impl FeedbackListTemplate {
    /// Rows and badges come from the displayed page, which may be older than
    /// the query while a fetch runs or after it failed. Pagination follows
    /// the query.
    pub fn from_snapshot(ctx: PageContext, snapshot: FeedbackSnapshot) -> Self {
        let query = &snapshot.query;
        let page = snapshot.page.as_ref();
        let summary = FeedbackSummary::of(page);
        let pagination = PaginationView::new(query.page(), query.page_size(), summary.total);

        let error = match &snapshot.status {
            FetchStatus::Error(message) => {
                let message = if message.is_empty() { ctx.t("feedback.unknownError") } else { message.clone() };
                Some(ctx.lz.t_with("feedback.errorLoading", &[("message", message)]))
            }
            _ => None,
        };
        let range_label = ctx.lz.t_with(
            "feedback.pagination.showTotal",
            &[
                ("start", pagination.start.to_string()),
                ("end", pagination.end.to_string()),
                ("total", pagination.total.to_string()),
            ],
        );

        Self {
            summary,
            rows: rows(page),
            keywords: query.keywords().to_string(),
            rating: query.rating().map(|r| r.as_param()).unwrap_or_default().to_string(),
            loading: snapshot.status == FetchStatus::Fetching,
            error,
            range_label,
            pagination,
            ctx,
        }
    }

    pub fn error_banner(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn per_page_label(&self, size: u32) -> String {
        self.ctx.lz.t_with("feedback.pagination.perPage", &[("size", size.to_string())])
    }
}
