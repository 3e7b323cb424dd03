use crate::surface::Slot;
use reqwest::StatusCode;
use std::{error::Error, fmt};

#[derive(Debug)]
pub enum SurveyError {
    MissingSlot(Slot),
    NoSelection,
    UnknownSelection(String),
    FormClosed,
    Rejected { status: StatusCode, body: String },
    Http(reqwest::Error),
    Storage(std::io::Error),
    Input(std::io::Error),
    Encode(serde_json::Error),
}

impl SurveyError {
    pub fn rejected(status: StatusCode, body: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            body: body.into(),
        }
    }

    /// Setup faults that no retry or reload of data can fix.
    pub fn is_integration_fault(&self) -> bool {
        matches!(self, Self::MissingSlot(_))
    }
}

impl fmt::Display for SurveyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSlot(slot) => write!(f, "{slot} not found"),
            Self::NoSelection => write!(f, "missing response"),
            Self::UnknownSelection(value) => write!(f, "unknown response '{value}'"),
            Self::FormClosed => write!(f, "the survey form is not open"),
            Self::Rejected { body, .. } => write!(f, "{body}"),
            Self::Http(inner) => write!(f, "http: {inner}"),
            Self::Storage(inner) => write!(f, "storage: {inner}"),
            Self::Input(inner) => write!(f, "input: {inner}"),
            Self::Encode(inner) => write!(f, "encode: {inner}"),
        }
    }
}

impl Error for SurveyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Http(inner) => Some(inner),
            Self::Storage(inner) => Some(inner),
            Self::Input(inner) => Some(inner),
            Self::Encode(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SurveyError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

impl From<std::io::Error> for SurveyError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err)
    }
}

impl From<serde_json::Error> for SurveyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encode(err)
    }
}
