//! Correction request store port (outbound).

use async_trait::async_trait;

use super::StoreError;
use crate::domain::models::{
    CorrectionRequest, CorrectionRequestId, CorrectionStatus, EmployeeId, NewCorrectionRequest,
};

/// Durable storage of correction requests.
///
/// The listing methods order by request time descending.
#[async_trait]
pub trait CorrectionRequestStore: Send + Sync + 'static {
    async fn find_by_id(
        &self,
        id: CorrectionRequestId,
    ) -> Result<Option<CorrectionRequest>, StoreError>;

    async fn find_by_employee(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Vec<CorrectionRequest>, StoreError>;

    async fn find_by_status(
        &self,
        status: CorrectionStatus,
    ) -> Result<Vec<CorrectionRequest>, StoreError>;

    async fn insert(&self, request: NewCorrectionRequest)
        -> Result<CorrectionRequest, StoreError>;

    async fn update(&self, request: &CorrectionRequest) -> Result<CorrectionRequest, StoreError>;
}
