//! Derived views over a record's latest layout.

pub mod calls_only;
pub mod unique_types;
