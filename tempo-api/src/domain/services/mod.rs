mod activities;
mod reports;

pub use activities::ActivityServiceImpl;
pub use reports::ReportServiceImpl;
