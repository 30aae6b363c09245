//! In-memory implementation of the CorrectionRequestStore port.

use async_trait::async_trait;
use chrono::Local;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

use crate::domain::models::{
    CorrectionRequest, CorrectionRequestId, CorrectionStatus, EmployeeId, NewCorrectionRequest,
};
use crate::domain::ports::outbound::{CorrectionRequestStore, StoreError};

/// Correction request store backed by a HashMap, for tests.
#[derive(Clone)]
pub struct InMemoryCorrectionStore {
    rows: Arc<RwLock<HashMap<i64, CorrectionRequest>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryCorrectionStore {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    fn sorted_desc(mut requests: Vec<CorrectionRequest>) -> Vec<CorrectionRequest> {
        requests.sort_by_key(|r| std::cmp::Reverse((r.request_date, r.id.as_i64())));
        requests
    }
}

#[async_trait]
impl CorrectionRequestStore for InMemoryCorrectionStore {
    async fn find_by_id(
        &self,
        id: CorrectionRequestId,
    ) -> Result<Option<CorrectionRequest>, StoreError> {
        Ok(self.rows.read().unwrap().get(&id.as_i64()).cloned())
    }

    async fn find_by_employee(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Vec<CorrectionRequest>, StoreError> {
        let rows = self.rows.read().unwrap();
        let requests = rows
            .values()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect();
        Ok(Self::sorted_desc(requests))
    }

    async fn find_by_status(
        &self,
        status: CorrectionStatus,
    ) -> Result<Vec<CorrectionRequest>, StoreError> {
        let rows = self.rows.read().unwrap();
        let requests = rows
            .values()
            .filter(|r| r.status == status)
            .cloned()
            .collect();
        Ok(Self::sorted_desc(requests))
    }

    async fn insert(
        &self,
        request: NewCorrectionRequest,
    ) -> Result<CorrectionRequest, StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Local::now().naive_local();
        let persisted = CorrectionRequest {
            id: CorrectionRequestId::new(id),
            employee_id: request.employee_id,
            record_id: request.record_id,
            requested_clock_in: request.requested_clock_in,
            requested_clock_out: request.requested_clock_out,
            reason: request.reason,
            status: CorrectionStatus::Pending,
            request_date: request.request_date,
            processed_date: None,
            created_at: now,
            updated_at: now,
        };
        self.rows.write().unwrap().insert(id, persisted.clone());
        Ok(persisted)
    }

    async fn update(&self, request: &CorrectionRequest) -> Result<CorrectionRequest, StoreError> {
        let mut rows = self.rows.write().unwrap();
        if !rows.contains_key(&request.id.as_i64()) {
            return Err(StoreError::not_found(request.id.to_string()));
        }

        let mut updated = request.clone();
        updated.updated_at = Local::now().naive_local();
        rows.insert(request.id.as_i64(), updated.clone());
        Ok(updated)
    }
}
