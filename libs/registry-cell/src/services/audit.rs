// =====================================================================================
// AUDIT LOG - ONE ENTRY PER REGISTRY OPERATION
// =====================================================================================

use serde_json::{json, Value};
use tracing::{info, warn};

use crate::error::ClinicalError;
use crate::models::AuditEntry;
use crate::services::registry::Registry;

pub const DEFAULT_AUDIT_LIMIT: usize = 50;

impl Registry {
    pub(crate) fn record_audit(&mut self, operation: &str, details: Value, success: bool) {
        let entry = AuditEntry {
            timestamp: self.now(),
            operation: operation.to_string(),
            details,
            success,
        };
        log_to_tracing(&entry);
        self.audit_log.push(entry);
    }

    /// Audits `result`, adding the error kind and message on failure.
    pub(crate) fn audit_result<T>(
        &mut self,
        operation: &str,
        mut details: Value,
        result: &Result<T, ClinicalError>,
    ) {
        if let Err(err) = result {
            if let Some(obj) = details.as_object_mut() {
                obj.insert("error_kind".to_string(), json!(err.kind()));
                obj.insert("error".to_string(), json!(err.to_string()));
            }
        }
        self.record_audit(operation, details, result.is_ok());
    }

    pub fn audit_log(&self) -> &[AuditEntry] {
        &self.audit_log
    }

    /// The newest `limit` entries, oldest first.
    pub fn recent_audit_entries(&self, limit: usize) -> &[AuditEntry] {
        let start = self.audit_log.len().saturating_sub(limit);
        &self.audit_log[start..]
    }
}

fn log_to_tracing(entry: &AuditEntry) {
    if entry.success {
        info!(
            operation = %entry.operation,
            details = %entry.details,
            "AUDIT: {}", entry.operation
        );
    } else {
        warn!(
            operation = %entry.operation,
            details = %entry.details,
            "AUDIT FAILURE: {}", entry.operation
        );
    }
}
