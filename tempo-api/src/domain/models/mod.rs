mod activity;
mod ids;
mod project;
mod report;
mod user;

pub use activity::*;
pub use ids::*;
pub use project::*;
pub use report::*;
pub use user::*;
