pub mod entities;
pub mod error;
pub mod pages;
pub mod params;
pub mod search;
pub mod types;

pub use entities::EntityClient;
pub use error::WikimediaError;
pub use pages::PageInfoClient;
pub use search::SearchClient;
pub use types::{PageInfo, SearchHit, WikidataEntity};

use serde_json::Value;

pub const WIKIPEDIA_API_URL: &str = "https://en.wikipedia.org/w/api.php";
pub const WIKIDATA_API_URL: &str = "https://www.wikidata.org/w/api.php";

/// Check the response envelope for the completion marker.
///
/// A response without `batchcomplete` is a continuation (partial) response;
/// treating it as complete would silently drop results, so it is an error.
pub(crate) fn ensure_batch_complete(body: &Value, endpoint: &'static str) -> error::Result<()> {
    let complete = body
        .as_object()
        .map(|envelope| envelope.contains_key("batchcomplete"))
        .unwrap_or(false);

    if !complete {
        return Err(WikimediaError::IncompleteResponse { endpoint });
    }
    Ok(())
}
