pub mod eligibility;
pub mod priority;
pub mod punchlist;
pub mod scheduling;
