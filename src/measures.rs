//! The allow-list of measure names the API will look up.
//!
//! This is the only process-wide shared state besides the database file:
//! a fixed catalog, constructed at compile time and never mutated.

/// Measure names accepted by the `/county_data` endpoint.
///
/// These match the `Measure_name` values in the county health rankings
/// dataset exactly, including capitalization.
pub const ALLOWED_MEASURES: [&str; 12] = [
    "Violent crime rate",
    "Unemployment",
    "Children in poverty",
    "Diabetic screening",
    "Mammography screening",
    "Preventable hospital stays",
    "Uninsured",
    "Sexually transmitted infections",
    "Physical inactivity",
    "Adult obesity",
    "Premature Death",
    "Daily fine particulate matter",
];

/// Whether `name` is a member of the measure catalog (exact match).
pub fn is_allowed(name: &str) -> bool {
    ALLOWED_MEASURES.contains(&name)
}
