use crate::models::BackdropResponse;
use chrono::{DateTime, SecondsFormat, Utc};

/// The current background image and when it was fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshState {
    pub current_resource_url: String,
    pub last_refresh_at: DateTime<Utc>,
}

/// Everything one viewer session keeps between refresh passes.
///
/// `backdrop` is `None` until the first successful fetch. `warning` only
/// describes the most recent pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub backdrop: Option<RefreshState>,
    pub warning: Option<String>,
}

impl Session {
    pub fn current_url(&self) -> Option<&str> {
        self.backdrop
            .as_ref()
            .map(|state| state.current_resource_url.as_str())
    }

    pub fn snapshot(&self) -> BackdropResponse {
        BackdropResponse {
            url: self.current_url().map(str::to_string),
            last_refresh_at: self.backdrop.as_ref().map(|state| {
                state
                    .last_refresh_at
                    .to_rfc3339_opts(SecondsFormat::Secs, true)
            }),
            warning: self.warning.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn empty_session_snapshot_has_no_url() {
        let snapshot = Session::default().snapshot();
        assert!(snapshot.url.is_none());
        assert!(snapshot.last_refresh_at.is_none());
        assert!(snapshot.warning.is_none());
    }

    #[test]
    fn snapshot_formats_refresh_time() {
        let session = Session {
            backdrop: Some(RefreshState {
                current_resource_url: "https://x/a.gif".to_string(),
                last_refresh_at: Utc.with_ymd_and_hms(2026, 1, 5, 9, 30, 0).unwrap(),
            }),
            warning: Some("provider returned HTTP 503".to_string()),
        };

        let snapshot = session.snapshot();
        assert_eq!(snapshot.url.as_deref(), Some("https://x/a.gif"));
        assert_eq!(
            snapshot.last_refresh_at.as_deref(),
            Some("2026-01-05T09:30:00Z")
        );
        assert_eq!(
            snapshot.warning.as_deref(),
            Some("provider returned HTTP 503")
        );
    }
}
