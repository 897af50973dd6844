use std::time::Duration;

use crate::models::feedback::FeedbackBrowsers;

const SWEEP_EVERY: Duration = Duration::from_secs(300);

/// Periodically drop feedback browsers whose session went quiet.
pub fn spawn_scheduler(browsers: FeedbackBrowsers) {
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(SWEEP_EVERY);
        loop {
            interval.tick().await;
            let removed = browsers.prune_idle();
            if removed > 0 {
                log::info!("Pruned {removed} idle feedback sessions ({} active)", browsers.len());
            }
        }
    });
}
