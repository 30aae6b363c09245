use std::sync::Arc;

use sqlx::PgPool;

use crate::adapters::outbound::postgres::{
    PgAttendanceRecordStore, PgCorrectionRequestStore, PgEmployeeDirectory,
};
use crate::domain::{
    clock::{Clock, SystemClock},
    services::{
        AttendanceLifecycle, CorrectionWorkflow, EmployeeAdmin, HoursAggregator, RecordQuery,
    },
};

pub type PgAttendanceLifecycle =
    AttendanceLifecycle<PgAttendanceRecordStore, PgEmployeeDirectory>;
pub type PgCorrectionWorkflow =
    CorrectionWorkflow<PgCorrectionRequestStore, PgAttendanceRecordStore, PgEmployeeDirectory>;
pub type PgHoursAggregator = HoursAggregator<PgAttendanceRecordStore, PgEmployeeDirectory>;
pub type PgEmployeeAdmin = EmployeeAdmin<PgEmployeeDirectory>;
pub type PgRecordQuery = RecordQuery<PgAttendanceRecordStore, PgEmployeeDirectory>;

/// Shared handle to the wired-up domain services.
///
/// All wiring is explicit: stores and the clock are injected here once,
/// never reached through globals.
#[derive(Clone)]
pub struct AppState {
    pub attendance: Arc<PgAttendanceLifecycle>,
    pub corrections: Arc<PgCorrectionWorkflow>,
    pub hours: Arc<PgHoursAggregator>,
    pub records: Arc<PgRecordQuery>,
    pub employees: Arc<PgEmployeeAdmin>,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self::with_clock(pool, Arc::new(SystemClock))
    }

    pub fn with_clock(pool: PgPool, clock: Arc<dyn Clock>) -> Self {
        let record_store = Arc::new(PgAttendanceRecordStore::new(pool.clone()));
        let correction_store = Arc::new(PgCorrectionRequestStore::new(pool.clone()));
        let directory = Arc::new(PgEmployeeDirectory::new(pool));

        Self {
            attendance: Arc::new(AttendanceLifecycle::new(
                Arc::clone(&record_store),
                Arc::clone(&directory),
                Arc::clone(&clock),
            )),
            corrections: Arc::new(CorrectionWorkflow::new(
                correction_store,
                Arc::clone(&record_store),
                Arc::clone(&directory),
                Arc::clone(&clock),
            )),
            hours: Arc::new(HoursAggregator::new(
                Arc::clone(&record_store),
                Arc::clone(&directory),
            )),
            records: Arc::new(RecordQuery::new(
                record_store,
                Arc::clone(&directory),
                clock,
            )),
            employees: Arc::new(EmployeeAdmin::new(directory)),
        }
    }
}
