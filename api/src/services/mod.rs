pub mod group;
pub mod poll;
