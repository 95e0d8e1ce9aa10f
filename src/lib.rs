pub mod compare;
mod dom;
pub mod error;
pub mod fetch;
pub mod grade;
pub mod mode;
pub mod normalize;
pub mod records;
pub mod render;
pub mod tables;
