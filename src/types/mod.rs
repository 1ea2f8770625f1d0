pub mod credential;
pub mod events;
pub mod report;

pub use credential::Credential;
pub use events::{ReportProgress, StageEvent};
pub use report::{ReferenceDocument, ReportResult, ReportStatus};
