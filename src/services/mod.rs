mod news_api;

pub use news_api::{NewsApiClient, RemoteNews};
