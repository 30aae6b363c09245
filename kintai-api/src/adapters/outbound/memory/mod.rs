mod attendance_store;
mod correction_store;
mod employee_directory;

pub use attendance_store::*;
pub use correction_store::*;
pub use employee_directory::*;
