pub mod cache;
pub mod machine;
pub mod query;
pub mod registry;
pub mod types;
pub mod view;

pub use machine::{BrowserSettings, FeedbackBrowser, FeedbackSnapshot, FetchStatus, FetchTicket, Resolution};
pub use query::{FeedbackQuery, ListFeedbackParams, QueryError, RatingFilter, RequestKey};
pub use registry::FeedbackBrowsers;
pub use types::{ConversationKind, FeedbackItem, FeedbackPage, Rating};
pub use view::{FeedbackRow, FeedbackSummary, PageLink, PaginationView, SizeChoice, ViewAction};
