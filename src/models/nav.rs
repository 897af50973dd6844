use serde::Serialize;

/// Navigation targets the console links or redirects to.
///
/// `Home`, `Settings` and `Chat` belong to the chat front-end served on the
/// same origin; the rest are handled here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Feedback,
    Settings,
    Chat {
        conversation_id: String,
        dialog_id: Option<String>,
    },
}

#[derive(Serialize)]
struct ChatQuery<'a> {
    conversation_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    dialog_id: Option<&'a str>,
}

impl Route {
    pub fn to_path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Feedback => "/feedback".to_string(),
            Route::Settings => "/user-setting".to_string(),
            Route::Chat { conversation_id, dialog_id } => {
                let query = ChatQuery {
                    conversation_id,
                    dialog_id: dialog_id.as_deref(),
                };
                match serde_urlencoded::to_string(&query) {
                    Ok(qs) => format!("/chat?{qs}"),
                    Err(e) => {
                        log::warn!("Could not encode chat route for {conversation_id}: {e}");
                        "/chat".to_string()
                    }
                }
            }
        }
    }
}

/// Only same-site absolute paths are accepted as post-form redirect targets.
pub fn safe_redirect(target: Option<&str>, default: Route) -> String {
    match target {
        Some(t) if t.starts_with('/') && !t.starts_with("//") => t.to_string(),
        _ => default.to_path(),
    }
}
