pub mod conversation;
pub mod intent;
pub mod keywords;
pub mod strategy;
