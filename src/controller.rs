use crate::api::SurveyApi;
use crate::errors::SurveyError;
use crate::models::{Answer, View};
use crate::poller::Poller;
use crate::storage::Storage;
use crate::submission::Submission;
use crate::surface::{Slot, Surface, write_slot};
use chrono::{DateTime, Utc};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{info, warn};

/// Decides between the survey form and the summary, and moves from one to
/// the other when an answer is accepted.
pub struct Controller<St, A, Su> {
    storage: St,
    api: A,
    surface: Su,
    poller: Poller,
    view: Option<View>,
}

impl<St, A, Su> Controller<St, A, Su>
where
    St: Storage,
    A: SurveyApi,
    Su: Surface,
{
    pub fn new(storage: St, api: A, surface: Su) -> Self {
        Self {
            storage,
            api,
            surface,
            poller: Poller::default(),
            view: None,
        }
    }

    pub fn with_poller(mut self, poller: Poller) -> Self {
        self.poller = poller;
        self
    }

    pub fn view(&self) -> Option<View> {
        self.view
    }

    pub fn storage(&self) -> &St {
        &self.storage
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn surface(&self) -> &Su {
        &self.surface
    }

    /// Initial decision on load: the form unless a submission inside the
    /// cooldown exists.
    pub async fn reveal(&mut self, now: DateTime<Utc>) -> Result<View, SurveyError> {
        let last = Submission::last(&self.storage).await;
        if let Some(submission) = &last {
            write_slot(&mut self.surface, Slot::LastSubmitted, submission.notice(now))?;
        }

        let view = match last {
            Some(submission) if submission.is_valid(now) => View::Summary,
            _ => View::Form,
        };
        self.enter(view);
        Ok(view)
    }

    /// Submits the selected option. The record is written only after the
    /// service accepted the answer, and before the summary is shown.
    pub async fn submit(
        &mut self,
        selection: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<View, SurveyError> {
        if self.view != Some(View::Form) {
            return Err(SurveyError::FormClosed);
        }

        match self.try_submit(selection, now).await {
            Ok(view) => Ok(view),
            Err(err) if err.is_integration_fault() => Err(err),
            Err(err) => {
                write_slot(&mut self.surface, Slot::Error, err.to_string())?;
                self.surface.flush();
                Err(err)
            }
        }
    }

    async fn try_submit(
        &mut self,
        selection: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<View, SurveyError> {
        let answer = Answer::from_selection(selection)?;
        self.api.submit(answer).await?;

        let submission = Submission::new(now);
        submission.save(&mut self.storage).await?;
        info!(%answer, "answer accepted");

        write_slot(&mut self.surface, Slot::Error, "")?;
        write_slot(&mut self.surface, Slot::LastSubmitted, submission.notice(now))?;
        self.enter(View::Summary);
        Ok(View::Summary)
    }

    /// Runs a whole page view: the form reads selections from `input` until
    /// one is accepted, then the summary is polled until the task is dropped.
    /// Closing the input while the form is open ends the run.
    pub async fn run<R, C>(&mut self, input: R, clock: C) -> Result<(), SurveyError>
    where
        R: AsyncBufRead + Unpin,
        C: Fn() -> DateTime<Utc>,
    {
        let mut view = self.reveal(clock()).await?;
        let mut lines = input.lines();
        while view == View::Form {
            let Some(line) = lines.next_line().await.map_err(SurveyError::Input)? else {
                info!("input closed before an answer was given");
                return Ok(());
            };
            let selection = Some(line.trim()).filter(|value| !value.is_empty());
            match self.submit(selection, clock()).await {
                Ok(next) => view = next,
                Err(err) if err.is_integration_fault() => return Err(err),
                Err(err) => warn!("submission failed: {err}"),
            }
        }

        match self.poller.run(&self.api, &mut self.surface).await? {}
    }

    fn enter(&mut self, view: View) {
        if self.view != Some(view) {
            info!(?view, "showing view");
        }
        self.surface.show(view);
        self.view = Some(view);
        self.surface.flush();
    }
}
