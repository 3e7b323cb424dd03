use crate::api::SurveyApi;
use crate::errors::SurveyError;
use crate::models::{Answer, Summary, Tally};
use reqwest::StatusCode;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

/// Scripted stand-in for the remote service.
#[derive(Debug, Default)]
pub struct FakeApi {
    submit_error: Option<String>,
    summaries: RefCell<VecDeque<Option<Summary>>>,
    pub submitted: RefCell<Vec<Answer>>,
    pub summary_calls: Cell<usize>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(body: &str) -> Self {
        Self {
            submit_error: Some(body.to_string()),
            ..Self::default()
        }
    }

    /// Queues the next summary response; `None` answers with a server error.
    pub fn queue_summary(self, summary: Option<Summary>) -> Self {
        self.summaries.borrow_mut().push_back(summary);
        self
    }
}

impl SurveyApi for FakeApi {
    async fn submit(&self, answer: Answer) -> Result<(), SurveyError> {
        if let Some(body) = &self.submit_error {
            return Err(SurveyError::rejected(
                StatusCode::INTERNAL_SERVER_ERROR,
                body.clone(),
            ));
        }
        self.submitted.borrow_mut().push(answer);
        Ok(())
    }

    async fn summary(&self) -> Result<Summary, SurveyError> {
        self.summary_calls.set(self.summary_calls.get() + 1);
        match self.summaries.borrow_mut().pop_front() {
            Some(Some(summary)) => Ok(summary),
            Some(None) => Err(SurveyError::rejected(
                StatusCode::SERVICE_UNAVAILABLE,
                "unavailable",
            )),
            None => Ok(Summary::default()),
        }
    }
}

pub fn summary_with_last_hour(yes: u64, no: u64) -> Summary {
    Summary {
        last_hour: Tally { yes, no },
        ..Summary::default()
    }
}
