mod attendance_store;
mod correction_store;
mod employee_directory;
mod store_error;

pub use attendance_store::*;
pub use correction_store::*;
pub use employee_directory::*;
pub use store_error::*;
