pub(crate) mod cache;
pub(crate) mod config;
pub(crate) mod scrape;
