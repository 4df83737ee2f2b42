use pretty_assertions::assert_eq;
use slotline_core::errors::FunnelError;

#[test]
fn test_invalid_request_display() {
    let err = FunnelError::InvalidRequest("Slot is too soon".to_string());
    assert_eq!(err.to_string(), "Invalid request: Slot is too soon");
}

#[test]
fn test_conflict_display() {
    let err = FunnelError::Conflict("Slot already booked".to_string());
    assert_eq!(err.to_string(), "Conflict: Slot already booked");
}

#[test]
fn test_schema_missing_names_the_migration_step() {
    let err = FunnelError::SchemaMissing;
    assert!(err.to_string().contains("db-migrate"));
}

#[test]
fn test_storage_error_hides_detail() {
    // The report carries the low-level cause for logs; the Display the
    // client sees stays generic.
    let err = FunnelError::from(eyre::eyre!("connection refused on 5432"));
    assert_eq!(err.to_string(), "Storage unavailable");
}

#[test]
fn test_upstream_display() {
    let err = FunnelError::Upstream("Meeting creation failed".to_string());
    assert_eq!(err.to_string(), "Upstream failure: Meeting creation failed");
}
