//! Builder style entry points on top of [`commands`](crate::commands).

pub mod embed;
pub mod extract;
