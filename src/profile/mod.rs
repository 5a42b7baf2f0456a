//! Applicant domain model: requests, validated profiles, and shared enums

mod data;
pub mod loader;

pub use data::{
    ApplicantProfile, ApplicationRequest, CreditRating, Decision, EducationLevel,
    EmploymentStatus, Gender, HomeOwnership, Impact, LoanPurpose, MaritalStatus,
};
pub use loader::{load_applications, load_sample_applications};
