use chrono::{DateTime, Local};

use super::query::{PAGE_SIZE_OPTIONS, last_page};
use super::types::{ConversationKind, FeedbackItem, FeedbackPage, Rating};

/// Badge counts above the table.
///
/// `total` is the dataset-wide count reported by the service; `positive`
/// and `negative` only count the rows of the loaded page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeedbackSummary {
    pub total: u64,
    pub positive: usize,
    pub negative: usize,
}

impl FeedbackSummary {
    pub fn of(page: Option<&FeedbackPage>) -> Self {
        let Some(page) = page else {
            return Self::default();
        };
        let count = |rating: Rating| page.items.iter().filter(|i| i.rating == rating).count();
        Self {
            total: page.total,
            positive: count(Rating::Positive),
            negative: count(Rating::Negative),
        }
    }
}

/// State of the per-row "View" action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    Open { href: String },
    Disabled,
}

impl ViewAction {
    pub fn for_item(item: &FeedbackItem) -> Self {
        match item.conversation_route() {
            Some(route) => ViewAction::Open { href: route.to_path() },
            None => ViewAction::Disabled,
        }
    }

    pub fn href(&self) -> Option<&str> {
        match self {
            ViewAction::Open { href } => Some(href),
            ViewAction::Disabled => None,
        }
    }
}

/// One table row, ready for the template.
#[derive(Debug, Clone)]
pub struct FeedbackRow {
    pub message_id: String,
    pub rating: Rating,
    pub user_question: String,
    pub assistant_content: String,
    pub feedback_text: String,
    pub conversation_name: String,
    pub kind: ConversationKind,
    pub date: String,
    pub action: ViewAction,
}

impl FeedbackRow {
    pub fn from_item(item: &FeedbackItem) -> Self {
        Self {
            message_id: item.message_id.clone(),
            rating: item.rating,
            user_question: item.user_question.clone(),
            assistant_content: item.assistant_content.clone(),
            feedback_text: item.feedback_text.clone(),
            conversation_name: item.conversation_name.clone(),
            kind: item.kind,
            date: local_date(item.timestamp_seconds),
            action: ViewAction::for_item(item),
        }
    }

    pub fn is_positive(&self) -> bool {
        self.rating == Rating::Positive
    }

    pub fn is_negative(&self) -> bool {
        self.rating == Rating::Negative
    }

    pub fn is_regular(&self) -> bool {
        self.kind == ConversationKind::Regular
    }

    pub fn view_href(&self) -> Option<&str> {
        self.action.href()
    }
}

pub fn rows(page: Option<&FeedbackPage>) -> Vec<FeedbackRow> {
    page.map(|p| p.items.iter().map(FeedbackRow::from_item).collect())
        .unwrap_or_default()
}

/// Seconds since epoch as a local calendar date.
pub fn local_date(timestamp_seconds: i64) -> String {
    DateTime::from_timestamp(timestamp_seconds, 0)
        .map(|utc| utc.with_timezone(&Local).format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageLink {
    Page { number: u32, current: bool },
    Gap,
}

impl PageLink {
    pub fn number(&self) -> Option<u32> {
        match self {
            PageLink::Page { number, .. } => Some(*number),
            PageLink::Gap => None,
        }
    }

    pub fn is_current(&self) -> bool {
        matches!(self, PageLink::Page { current: true, .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeChoice {
    pub value: u32,
    pub selected: bool,
}

/// Pagination footer derived from the query and the server total.
#[derive(Debug, Clone)]
pub struct PaginationView {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u32,
    /// 1-based index of the first row on this page; 0 when empty.
    pub start: u64,
    pub end: u64,
    pub links: Vec<PageLink>,
    pub size_choices: Vec<SizeChoice>,
}

const NEIGHBOURS: u32 = 2;

impl PaginationView {
    /// A page past the end (left over from a larger page size) is shown as
    /// the last page.
    pub fn new(page: u32, page_size: u32, total: u64) -> Self {
        let size = u64::from(page_size.max(1));
        let total_pages = last_page(total, page_size);
        let page = page.clamp(1, total_pages);
        let (start, end) = if total == 0 {
            (0, 0)
        } else {
            let start = u64::from(page.saturating_sub(1)) * size + 1;
            (start.min(total), (u64::from(page) * size).min(total))
        };

        Self {
            page,
            page_size,
            total,
            total_pages,
            start,
            end,
            links: page_links(page, total_pages),
            size_choices: PAGE_SIZE_OPTIONS
                .iter()
                .map(|&value| SizeChoice { value, selected: value == page_size })
                .collect(),
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn prev(&self) -> u32 {
        self.page.saturating_sub(1).max(1)
    }

    pub fn next(&self) -> u32 {
        self.page.saturating_add(1)
    }
}

fn page_links(current: u32, total_pages: u32) -> Vec<PageLink> {
    let lo = current.saturating_sub(NEIGHBOURS).max(1);
    let hi = current.saturating_add(NEIGHBOURS).min(total_pages);

    let mut links = Vec::new();
    if lo > 1 {
        links.push(PageLink::Page { number: 1, current: current == 1 });
        if lo > 2 {
            links.push(PageLink::Gap);
        }
    }
    for number in lo..=hi {
        links.push(PageLink::Page { number, current: number == current });
    }
    if hi < total_pages {
        if hi + 1 < total_pages {
            links.push(PageLink::Gap);
        }
        links.push(PageLink::Page { number: total_pages, current: current == total_pages });
    }
    links
}
