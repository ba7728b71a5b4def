//! Usage reporting infrastructure implementations

mod service;
mod view;

pub use service::{UsageService, UsageServiceTrait};
pub use view::UsageTrackingView;
