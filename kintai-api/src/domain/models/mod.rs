mod attendance_record;
mod correction_request;
mod employee;
mod ids;
mod month;
mod working_hours;

pub use attendance_record::*;
pub use correction_request::*;
pub use employee::*;
pub use ids::*;
pub use month::*;
pub use working_hours::*;
