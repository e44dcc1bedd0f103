pub mod args;
pub mod calc;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod parse {
    pub mod event;
    pub mod result;
}
pub mod report;
pub mod scrape {
    pub mod client;
    pub mod resolver;
    pub mod session;
}
pub mod storage;

pub use error::ScrapeError;
