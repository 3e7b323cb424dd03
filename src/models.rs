use crate::errors::SurveyError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The visitor's answer to "is it Monday?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    pub const ALL: [Answer; 2] = [Answer::Yes, Answer::No];

    /// Maps the value chosen on the form to an answer. Exactly one of the
    /// two options must be selected.
    pub fn from_selection(selection: Option<&str>) -> Result<Self, SurveyError> {
        match selection.map(str::trim) {
            None | Some("") => Err(SurveyError::NoSelection),
            Some("monday") => Ok(Answer::Yes),
            Some("not-monday") => Ok(Answer::No),
            Some(other) => Err(SurveyError::UnknownSelection(other.to_string())),
        }
    }

    pub fn form_value(self) -> &'static str {
        match self {
            Answer::Yes => "monday",
            Answer::No => "not-monday",
        }
    }

    /// Class of the count slot this answer is rendered into.
    pub fn name(self) -> &'static str {
        match self {
            Answer::Yes => "yes",
            Answer::No => "no",
        }
    }

    pub fn is_yes(self) -> bool {
        self == Answer::Yes
    }
}

impl From<Answer> for bool {
    fn from(answer: Answer) -> Self {
        answer.is_yes()
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the fixed trailing windows the remote service aggregates over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bucket {
    Last24Hours,
    Last12Hours,
    Last6Hours,
    Last3Hours,
    LastHour,
}

impl Bucket {
    pub const ALL: [Bucket; 5] = [
        Bucket::Last24Hours,
        Bucket::Last12Hours,
        Bucket::Last6Hours,
        Bucket::Last3Hours,
        Bucket::LastHour,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Bucket::Last24Hours => "last_24_hours",
            Bucket::Last12Hours => "last_12_hours",
            Bucket::Last6Hours => "last_6_hours",
            Bucket::Last3Hours => "last_3_hours",
            Bucket::LastHour => "last_hour",
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Bucket::Last24Hours => "last-24-hours",
            Bucket::Last12Hours => "last-12-hours",
            Bucket::Last6Hours => "last-6-hours",
            Bucket::Last3Hours => "last-3-hours",
            Bucket::LastHour => "last-hour",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Bucket::Last24Hours => "Last 24 hours",
            Bucket::Last12Hours => "Last 12 hours",
            Bucket::Last6Hours => "Last 6 hours",
            Bucket::Last3Hours => "Last 3 hours",
            Bucket::LastHour => "Last hour",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Tally {
    pub yes: u64,
    pub no: u64,
}

impl Tally {
    pub fn count(&self, answer: Answer) -> u64 {
        match answer {
            Answer::Yes => self.yes,
            Answer::No => self.no,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Summary {
    pub last_24_hours: Tally,
    pub last_12_hours: Tally,
    pub last_6_hours: Tally,
    pub last_3_hours: Tally,
    pub last_hour: Tally,
}

impl Summary {
    pub fn tally(&self, bucket: Bucket) -> &Tally {
        match bucket {
            Bucket::Last24Hours => &self.last_24_hours,
            Bucket::Last12Hours => &self.last_12_hours,
            Bucket::Last6Hours => &self.last_6_hours,
            Bucket::Last3Hours => &self.last_3_hours,
            Bucket::LastHour => &self.last_hour,
        }
    }
}

/// The two views the widget can present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Form,
    Summary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_maps_form_values() {
        assert_eq!(Answer::from_selection(Some("monday")).unwrap(), Answer::Yes);
        assert_eq!(
            Answer::from_selection(Some("not-monday")).unwrap(),
            Answer::No
        );
        assert_eq!(
            Answer::from_selection(Some(Answer::No.form_value())).unwrap(),
            Answer::No
        );
    }

    #[test]
    fn selection_rejects_missing_and_unknown_values() {
        assert!(matches!(
            Answer::from_selection(None),
            Err(SurveyError::NoSelection)
        ));
        assert!(matches!(
            Answer::from_selection(Some("  ")),
            Err(SurveyError::NoSelection)
        ));
        match Answer::from_selection(Some("tuesday")) {
            Err(SurveyError::UnknownSelection(value)) => assert_eq!(value, "tuesday"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn summary_decodes_service_payload() {
        let summary: Summary = serde_json::from_str(
            r#"{
                "last_24_hours": {"yes": 40, "no": 12},
                "last_12_hours": {"yes": 20, "no": 9},
                "last_6_hours": {"yes": 10, "no": 7},
                "last_3_hours": {"yes": 4, "no": 6},
                "last_hour": {"yes": 3, "no": 5}
            }"#,
        )
        .unwrap();

        assert_eq!(summary.tally(Bucket::LastHour).count(Answer::Yes), 3);
        assert_eq!(summary.tally(Bucket::LastHour).count(Answer::No), 5);
        assert_eq!(summary.tally(Bucket::Last24Hours).count(Answer::Yes), 40);
    }

    #[test]
    fn summary_rejects_negative_counts() {
        let result = serde_json::from_str::<Summary>(
            r#"{
                "last_24_hours": {"yes": -1, "no": 0},
                "last_12_hours": {"yes": 0, "no": 0},
                "last_6_hours": {"yes": 0, "no": 0},
                "last_3_hours": {"yes": 0, "no": 0},
                "last_hour": {"yes": 0, "no": 0}
            }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn bucket_keys_match_summary_fields() {
        let summary = Summary::default();
        let value = serde_json::to_value(summary).unwrap();
        for bucket in Bucket::ALL {
            assert!(value.get(bucket.key()).is_some(), "{}", bucket.key());
        }
    }
}
