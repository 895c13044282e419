pub mod config;
pub mod consts;
pub mod error;
pub mod geometry;
pub mod slot;
pub mod scale;
pub mod store;
pub mod intersection;
pub mod crop;
pub mod invert;
pub mod results;
pub mod interaction;
pub mod session;
