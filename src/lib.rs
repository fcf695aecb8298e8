pub mod eastern;
pub mod error;
pub mod espn;
pub mod fetch;
pub mod flex;
pub mod geocode;
pub mod handler;
pub mod loader;
pub mod mastered;
pub mod model;
pub mod nba;
