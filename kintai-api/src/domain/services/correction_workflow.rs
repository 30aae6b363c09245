use std::sync::Arc;

use crate::domain::{
    clock::Clock,
    models::{
        AttendanceRecord, AttendanceStatus, CorrectionRequest, CorrectionRequestId,
        CorrectionStatus, CorrectionSubmission, EmployeeId, NewCorrectionRequest,
    },
    ports::outbound::{AttendanceRecordStore, CorrectionRequestStore, EmployeeDirectory},
    AttendanceError,
};

/// Tag prefixed to an appended rejection rationale; the submitter's
/// original justification is never replaced.
const REJECTION_TAG: &str = "[rejection reason]";

/// Submission, listing and one-shot approval/rejection of correction
/// requests. Approval mutates the target attendance record; rejection
/// never does.
pub struct CorrectionWorkflow<C, S, D> {
    corrections: Arc<C>,
    records: Arc<S>,
    employees: Arc<D>,
    clock: Arc<dyn Clock>,
}

impl<C, S, D> CorrectionWorkflow<C, S, D>
where
    C: CorrectionRequestStore,
    S: AttendanceRecordStore,
    D: EmployeeDirectory,
{
    pub fn new(
        corrections: Arc<C>,
        records: Arc<S>,
        employees: Arc<D>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            corrections,
            records,
            employees,
            clock,
        }
    }

    /// File a PENDING request contesting one day's recorded times.
    ///
    /// The target record itself is untouched until approval.
    pub async fn submit(
        &self,
        submission: CorrectionSubmission,
    ) -> Result<CorrectionRequest, AttendanceError> {
        if self
            .employees
            .find_by_id(submission.employee_id)
            .await?
            .is_none()
        {
            return Err(AttendanceError::EmployeeNotFound(submission.employee_id));
        }

        let record = self
            .records
            .find_by_id(submission.record_id)
            .await?
            .ok_or(AttendanceError::RecordNotFound(submission.record_id))?;

        // Employees may only contest their own records.
        if record.employee_id != submission.employee_id {
            return Err(AttendanceError::Forbidden);
        }

        if let (Some(clock_in), Some(clock_out)) = (
            submission.requested_clock_in,
            submission.requested_clock_out,
        ) {
            if clock_in >= clock_out {
                return Err(AttendanceError::InvalidTimeRange);
            }
        }

        Ok(self
            .corrections
            .insert(NewCorrectionRequest {
                employee_id: submission.employee_id,
                record_id: submission.record_id,
                requested_clock_in: submission.requested_clock_in,
                requested_clock_out: submission.requested_clock_out,
                reason: submission.reason,
                request_date: self.clock.now(),
            })
            .await?)
    }

    /// List requests, newest first. The employee filter wins over the
    /// status filter; with neither, PENDING requests are returned.
    pub async fn list(
        &self,
        employee_id: Option<EmployeeId>,
        status: Option<CorrectionStatus>,
    ) -> Result<Vec<CorrectionRequest>, AttendanceError> {
        let requests = if let Some(employee_id) = employee_id {
            self.corrections.find_by_employee(employee_id).await?
        } else if let Some(status) = status {
            self.corrections.find_by_status(status).await?
        } else {
            self.corrections
                .find_by_status(CorrectionStatus::Pending)
                .await?
        };
        Ok(requests)
    }

    /// Apply a PENDING request to its target record and mark it APPROVED.
    ///
    /// The record write happens before the request write; a failure in
    /// between leaves a corrected record with a PENDING request, which is
    /// recovered by retrying the approval (the record half re-applies the
    /// same values).
    pub async fn approve(
        &self,
        request_id: CorrectionRequestId,
    ) -> Result<CorrectionRequest, AttendanceError> {
        let mut request = self
            .corrections
            .find_by_id(request_id)
            .await?
            .ok_or(AttendanceError::CorrectionRequestNotFound(request_id))?;

        if request.status != CorrectionStatus::Pending {
            return Err(AttendanceError::CorrectionAlreadyProcessed);
        }

        match self.records.find_by_id(request.record_id).await? {
            Some(record) => {
                let corrected = Self::apply_correction(record, &request);
                self.records.update(&corrected).await?;
            }
            None => {
                // Tolerated: the request still completes, but the approval
                // changes nothing underneath. Surfaced for telemetry.
                tracing::warn!(
                    request_id = %request.id,
                    record_id = %request.record_id,
                    "approving correction whose target record no longer resolves"
                );
            }
        }

        request.status = CorrectionStatus::Approved;
        request.processed_date = Some(self.clock.now());

        Ok(self.corrections.update(&request).await?)
    }

    /// Mark a PENDING request REJECTED, leaving the target record alone.
    pub async fn reject(
        &self,
        request_id: CorrectionRequestId,
        rejection_reason: Option<&str>,
    ) -> Result<CorrectionRequest, AttendanceError> {
        let mut request = self
            .corrections
            .find_by_id(request_id)
            .await?
            .ok_or(AttendanceError::CorrectionRequestNotFound(request_id))?;

        if request.status != CorrectionStatus::Pending {
            return Err(AttendanceError::CorrectionAlreadyProcessed);
        }

        request.status = CorrectionStatus::Rejected;
        request.processed_date = Some(self.clock.now());

        if let Some(reason) = rejection_reason {
            let reason = reason.trim();
            if !reason.is_empty() {
                request.reason = format!("{}\n{} {}", request.reason, REJECTION_TAG, reason);
            }
        }

        Ok(self.corrections.update(&request).await?)
    }

    fn apply_correction(
        mut record: AttendanceRecord,
        request: &CorrectionRequest,
    ) -> AttendanceRecord {
        if let Some(clock_in) = request.requested_clock_in {
            record.clock_in_time = Some(clock_in);
        }
        if let Some(clock_out) = request.requested_clock_out {
            record.clock_out_time = Some(clock_out);
        }

        // A partial correction leaves the prior minutes in place.
        if let (Some(clock_in), Some(clock_out)) = (record.clock_in_time, record.clock_out_time) {
            record.working_minutes = AttendanceRecord::minutes_between(clock_in, clock_out);
            record.status = AttendanceStatus::Present;
        }

        record
    }
}
