pub mod config;
pub mod intersect;
pub mod layout;
pub mod process;
pub mod replay;
