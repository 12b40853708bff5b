pub mod opportunity;
pub mod post;
