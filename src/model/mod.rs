pub mod espn;
pub mod nba_cms;
pub mod nba_prod;
pub mod nba_stats;
