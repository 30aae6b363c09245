mod attendance_lifecycle;
mod correction_workflow;
mod employee_admin;
mod hours_aggregator;
mod record_query;

pub use attendance_lifecycle::*;
pub use correction_workflow::*;
pub use employee_admin::*;
pub use hours_aggregator::*;
pub use record_query::*;
