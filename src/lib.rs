pub mod api;
pub mod config;
pub mod controller;
pub mod errors;
pub mod models;
pub mod poller;
pub mod storage;
pub mod submission;
pub mod surface;

#[cfg(test)]
mod testing;

pub use api::{HttpApi, SurveyApi};
pub use config::Config;
pub use controller::Controller;
pub use errors::SurveyError;
pub use models::{Answer, Bucket, Summary, Tally, View};
pub use poller::Poller;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use submission::Submission;
pub use surface::{Slot, Surface, TextSurface};
