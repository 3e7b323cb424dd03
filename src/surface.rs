use crate::errors::SurveyError;
use crate::models::{Answer, Bucket, View};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A named insertion point on the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    LastSubmitted,
    Error,
    Count(Bucket, Answer),
}

impl Slot {
    pub fn counts() -> impl Iterator<Item = Slot> {
        Bucket::ALL
            .into_iter()
            .flat_map(|bucket| Answer::ALL.map(|answer| Slot::Count(bucket, answer)))
    }

    fn in_view(self, view: View) -> bool {
        match self {
            Slot::LastSubmitted | Slot::Error => true,
            Slot::Count(..) => view == View::Summary,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::LastSubmitted => f.write_str(".last-submitted"),
            Slot::Error => f.write_str(".error"),
            Slot::Count(bucket, answer) => write!(f, ".{} .{}", bucket.class(), answer.name()),
        }
    }
}

/// Where the widget draws itself. Lookup may fail; writing into a slot that
/// was found cannot.
pub trait Surface {
    fn slot(&mut self, slot: Slot) -> Option<&mut String>;

    /// Replaces the content area with the template of `view`.
    fn show(&mut self, view: View);

    /// Called once a batch of slot writes is complete.
    fn flush(&mut self) {}
}

pub fn require<S: Surface + ?Sized>(
    surface: &mut S,
    slot: Slot,
) -> Result<&mut String, SurveyError> {
    surface.slot(slot).ok_or(SurveyError::MissingSlot(slot))
}

pub fn write_slot<S: Surface + ?Sized>(
    surface: &mut S,
    slot: Slot,
    text: impl Into<String>,
) -> Result<(), SurveyError> {
    *require(surface, slot)? = text.into();
    Ok(())
}

/// In-memory surface rendered as plain text.
#[derive(Debug, Clone, Default)]
pub struct TextSurface {
    view: Option<View>,
    slots: BTreeMap<Slot, String>,
    omitted: BTreeSet<Slot>,
}

impl TextSurface {
    pub fn new() -> Self {
        let mut surface = Self::default();
        surface.insert_slots(None);
        surface
    }

    /// A surface whose markup lacks `slot`.
    pub fn omit(mut self, slot: Slot) -> Self {
        self.slots.remove(&slot);
        self.omitted.insert(slot);
        self
    }

    pub fn view(&self) -> Option<View> {
        self.view
    }

    pub fn text(&self, slot: Slot) -> Option<&str> {
        self.slots.get(&slot).map(String::as_str)
    }

    pub fn render(&self) -> String {
        let mut out = String::from(HEADER);
        for slot in [Slot::LastSubmitted, Slot::Error] {
            if let Some(text) = self.text(slot).filter(|text| !text.is_empty()) {
                out.push_str(text);
                out.push('\n');
            }
        }
        match self.view {
            Some(View::Form) => out.push_str(FORM_TEXT),
            Some(View::Summary) => out.push_str(&self.render_summary()),
            None => {}
        }
        out
    }

    fn render_summary(&self) -> String {
        let mut out = String::from(SUMMARY_HEADER);
        for bucket in Bucket::ALL {
            let [yes, no] = Answer::ALL.map(|answer| {
                self.text(Slot::Count(bucket, answer))
                    .filter(|text| !text.is_empty())
                    .unwrap_or("-")
            });
            out.push_str(&format!("{:<17}{yes}  {no}\n", bucket.label()));
        }
        out
    }

    fn insert_slots(&mut self, view: Option<View>) {
        self.slots.retain(|slot, _| matches!(slot, Slot::LastSubmitted | Slot::Error));
        for slot in [Slot::LastSubmitted, Slot::Error] {
            self.slots.entry(slot).or_default();
        }
        if let Some(view) = view {
            for slot in Slot::counts().filter(|slot| slot.in_view(view)) {
                self.slots.insert(slot, String::new());
            }
        }
        for slot in &self.omitted {
            self.slots.remove(slot);
        }
    }
}

impl Surface for TextSurface {
    fn slot(&mut self, slot: Slot) -> Option<&mut String> {
        self.slots.get_mut(&slot)
    }

    fn show(&mut self, view: View) {
        self.view = Some(view);
        self.insert_slots(Some(view));
    }
}

const HEADER: &str = "== Is it Monday? ==\n";

const FORM_TEXT: &str = "\
Is it Monday today?
  monday      Yes, it is Monday
  not-monday  No, it is not Monday
";

const SUMMARY_HEADER: &str = "Window           Monday  Not Monday\n";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_slots_follow_selector_names() {
        assert_eq!(
            Slot::Count(Bucket::LastHour, Answer::Yes).to_string(),
            ".last-hour .yes"
        );
        assert_eq!(
            Slot::Count(Bucket::Last24Hours, Answer::No).to_string(),
            ".last-24-hours .no"
        );
        assert_eq!(Slot::counts().count(), 10);
    }

    #[test]
    fn count_slots_exist_only_in_summary() {
        let mut surface = TextSurface::new();
        let slot = Slot::Count(Bucket::Last3Hours, Answer::No);
        assert!(surface.slot(Slot::LastSubmitted).is_some());
        assert!(surface.slot(slot).is_none());

        surface.show(View::Form);
        assert!(surface.slot(slot).is_none());

        surface.show(View::Summary);
        assert!(surface.slot(slot).is_some());
    }

    #[test]
    fn missing_slot_fails_with_selector() {
        let slot = Slot::Count(Bucket::LastHour, Answer::Yes);
        let mut surface = TextSurface::new().omit(slot);
        surface.show(View::Summary);

        let err = write_slot(&mut surface, slot, "3").unwrap_err();
        assert!(matches!(err, SurveyError::MissingSlot(missing) if missing == slot));
        assert_eq!(err.to_string(), ".last-hour .yes not found");
    }

    #[test]
    fn render_fills_fetched_counts() {
        let mut surface = TextSurface::new();
        surface.show(View::Summary);
        write_slot(&mut surface, Slot::Count(Bucket::LastHour, Answer::Yes), "3").unwrap();
        write_slot(&mut surface, Slot::LastSubmitted, "Last submitted at now.").unwrap();

        let text = surface.render();
        assert!(text.contains("Last submitted at now."));
        assert!(text.contains("Last hour        3  -"));
    }

    #[test]
    fn render_marks_counts_not_yet_fetched() {
        let mut surface = TextSurface::new();
        surface.show(View::Summary);

        let text = surface.render();
        assert!(text.contains("Window           Monday  Not Monday"));
        assert!(text.contains("Last 24 hours    -  -"));
        assert!(text.contains("Last hour        -  -"));
    }

    #[test]
    fn render_form_lists_both_options() {
        let mut surface = TextSurface::new();
        surface.show(View::Form);
        let text = surface.render();
        assert!(text.contains("monday"));
        assert!(text.contains("not-monday"));
    }
}
