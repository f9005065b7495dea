//! Domain services: roster import, attendance recording and reporting.

pub mod access;
pub mod attendance_recorder;
pub mod operators;
pub mod reference_index;
pub mod reporting;
pub mod roster_import;
pub mod spreadsheet;

pub use access::{Capability, Principal, authorize};
pub use attendance_recorder::{AttendanceRecorder, HallRoster, SubmissionSummary};
pub use reporting::Reporting;
pub use roster_import::{ImportSummary, RosterImporter};
pub use operators::{LoginPortal, OperatorService};
