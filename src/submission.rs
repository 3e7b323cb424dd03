use crate::errors::SurveyError;
use crate::storage::Storage;
use chrono::{DateTime, Local, SecondsFormat, TimeDelta, Utc};
use tracing::{debug, warn};

pub const STORAGE_KEY: &str = "last-submitted";
pub const COOLDOWN_MS: i64 = 3_600_000;

/// How long a visitor who just answered is shown the summary.
pub fn cooldown() -> TimeDelta {
    TimeDelta::milliseconds(COOLDOWN_MS)
}

/// The visitor's most recent answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    pub fn new(submitted_at: DateTime<Utc>) -> Self {
        Self { submitted_at }
    }

    /// Reads the last submission. A stored value that is not an RFC 3339
    /// instant reads as no submission at all.
    pub async fn last(storage: &impl Storage) -> Option<Self> {
        let raw = storage.get_item(STORAGE_KEY).await?;
        match DateTime::parse_from_rfc3339(raw.trim()) {
            Ok(submitted_at) => Some(Self::new(submitted_at.with_timezone(&Utc))),
            Err(err) => {
                warn!("ignoring unparsable {STORAGE_KEY} value {raw:?}: {err}");
                None
            }
        }
    }

    /// True while `now` is inside the cooldown. Timestamps in the future give
    /// a negative delta and count as valid.
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        now - self.submitted_at < cooldown()
    }

    pub fn open_at(&self) -> DateTime<Utc> {
        self.submitted_at + cooldown()
    }

    pub async fn save(&self, storage: &mut impl Storage) -> Result<(), SurveyError> {
        let value = self
            .submitted_at
            .to_rfc3339_opts(SecondsFormat::Millis, true);
        storage.set_item(STORAGE_KEY, &value).await?;
        debug!(submitted_at = %value, "submission recorded");
        Ok(())
    }

    pub fn notice(&self, now: DateTime<Utc>) -> String {
        let submitted_at = self.submitted_at.with_timezone(&Local);
        let mut notice = format!(
            "Last submitted at {}.",
            submitted_at.format("%Y-%m-%d %H:%M:%S")
        );
        if self.is_valid(now) {
            let open_at = self.open_at().with_timezone(&Local);
            notice.push_str(&format!(
                " No resubmissions until {}.",
                open_at.format("%H:%M:%S")
            ));
        }
        notice
    }
}
