pub mod elasticsearch;

pub use elasticsearch::{parse_street_documents, ElasticsearchStore};
