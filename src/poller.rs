use crate::api::SurveyApi;
use crate::errors::SurveyError;
use crate::models::Summary;
use crate::surface::{Slot, Surface, write_slot};
use std::convert::Infallible;
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, warn};

pub const POLL_PERIOD: Duration = Duration::from_secs(60);

/// Keeps the summary view fed with fresh counts.
#[derive(Debug, Clone, Copy)]
pub struct Poller {
    period: Duration,
}

impl Default for Poller {
    fn default() -> Self {
        Self {
            period: POLL_PERIOD,
        }
    }
}

impl Poller {
    /// A zero period would spin; it falls back to the default.
    pub fn new(period: Duration) -> Self {
        if period.is_zero() {
            warn!("poll period must be non-zero, using {POLL_PERIOD:?}");
            return Self::default();
        }
        Self { period }
    }

    /// Fetches and renders once. A failed fetch leaves the previous counts on
    /// screen and returns `Ok(false)`; only rendering faults are errors.
    pub async fn poll_once<A, S>(&self, api: &A, surface: &mut S) -> Result<bool, SurveyError>
    where
        A: SurveyApi,
        S: Surface + ?Sized,
    {
        match api.summary().await {
            Ok(summary) => {
                render(surface, &summary)?;
                debug!(
                    last_hour_yes = summary.last_hour.yes,
                    last_hour_no = summary.last_hour.no,
                    "summary refreshed"
                );
                Ok(true)
            }
            Err(err) => {
                warn!("summary fetch failed, keeping previous counts: {err}");
                Ok(false)
            }
        }
    }

    /// Polls immediately and then once per period, forever. Ticks missed
    /// while a fetch is in flight are skipped.
    pub async fn run<A, S>(&self, api: &A, surface: &mut S) -> Result<Infallible, SurveyError>
    where
        A: SurveyApi,
        S: Surface + ?Sized,
    {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            self.poll_once(api, surface).await?;
        }
    }
}

pub fn render<S: Surface + ?Sized>(
    surface: &mut S,
    summary: &Summary,
) -> Result<(), SurveyError> {
    for slot in Slot::counts() {
        if let Slot::Count(bucket, answer) = slot {
            let count = summary.tally(bucket).count(answer);
            write_slot(surface, slot, count.to_string())?;
        }
    }
    surface.flush();
    Ok(())
}
