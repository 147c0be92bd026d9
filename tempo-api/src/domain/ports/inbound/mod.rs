mod activities;
mod reports;

pub use activities::*;
pub use reports::*;
