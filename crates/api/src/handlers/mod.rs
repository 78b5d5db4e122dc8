pub mod case_studies;
pub mod contact;
pub mod projects;
