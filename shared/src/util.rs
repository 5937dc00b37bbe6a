/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate the public identifier for a new entity.
///
/// Public ids are UUID v4 strings, assigned once at creation and never
/// reassigned. They are independent of the store's internal row id.
pub fn new_public_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Milliseconds in one day
pub const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;
