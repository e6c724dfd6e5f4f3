pub mod collision;
pub mod man_match;
pub mod zone;
