use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use wikimedia::{PageInfo, SearchHit, WikidataEntity};

use crate::error::{EnrichError, Result};

/// One search hit joined with its page metadata and linked entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeRecord {
    pub search: SearchHit,
    pub page: PageInfo,
    /// Present only when the page links a wikibase item that resolved in
    /// the entity batch.
    pub entity: Option<WikidataEntity>,
}

/// Merge the three stages into one record per hit, in hit order.
///
/// Every hit must have a fetched page record; a hit whose id is absent
/// from `pages` means the stages disagree and the invocation aborts. A
/// missing entity is a normal outcome, never an error.
pub fn join(
    hits: &[SearchHit],
    pages: &HashMap<u64, PageInfo>,
    entities: &HashMap<String, WikidataEntity>,
) -> Result<Vec<CompositeRecord>> {
    let mut records = Vec::with_capacity(hits.len());

    for hit in hits {
        let page = pages
            .get(&hit.pageid)
            .ok_or(EnrichError::MissingPage { pageid: hit.pageid })?
            .clone();

        let entity = page
            .wikibase_item()
            .and_then(|id| entities.get(id))
            .cloned();

        records.push(CompositeRecord {
            search: hit.clone(),
            page,
            entity,
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(pageid: u64) -> SearchHit {
        serde_json::from_value(serde_json::json!({
            "pageid": pageid,
            "title": format!("Page {}", pageid)
        }))
        .unwrap()
    }

    fn page(pageid: u64, wikibase_item: Option<&str>) -> PageInfo {
        let mut body = serde_json::json!({
            "pageid": pageid,
            "title": format!("Page {}", pageid)
        });
        if let Some(item) = wikibase_item {
            body["pageprops"] = serde_json::json!({ "wikibase_item": item });
        }
        serde_json::from_value(body).unwrap()
    }

    fn entity(id: &str) -> WikidataEntity {
        serde_json::from_value(serde_json::json!({ "id": id })).unwrap()
    }

    #[test]
    fn test_one_record_per_hit() {
        let hits = vec![hit(1), hit(2), hit(3)];
        let pages = HashMap::from([
            (1, page(1, Some("Q1"))),
            (2, page(2, None)),
            (3, page(3, Some("Q3"))),
        ]);
        let entities = HashMap::from([
            ("Q1".to_string(), entity("Q1")),
            ("Q3".to_string(), entity("Q3")),
        ]);

        let records = join(&hits, &pages, &entities).unwrap();
        assert_eq!(records.len(), hits.len());
    }

    #[test]
    fn test_record_order_matches_hit_order() {
        let hits = vec![hit(30), hit(10), hit(20)];
        let pages = HashMap::from([
            (10, page(10, None)),
            (20, page(20, None)),
            (30, page(30, None)),
        ]);

        let records = join(&hits, &pages, &HashMap::new()).unwrap();
        let order: Vec<u64> = records.iter().map(|r| r.search.pageid).collect();
        assert_eq!(order, vec![30, 10, 20]);
    }

    #[test]
    fn test_page_without_item_gets_no_entity() {
        let hits = vec![hit(1)];
        let pages = HashMap::from([(1, page(1, None))]);
        // An unrelated entity in the map must not leak in.
        let entities = HashMap::from([("Q9".to_string(), entity("Q9"))]);

        let records = join(&hits, &pages, &entities).unwrap();
        assert!(records[0].entity.is_none());
    }

    #[test]
    fn test_unresolved_item_id_gets_no_entity() {
        let hits = vec![hit(1)];
        let pages = HashMap::from([(1, page(1, Some("Q404")))]);

        let records = join(&hits, &pages, &HashMap::new()).unwrap();
        assert!(records[0].entity.is_none());
    }

    #[test]
    fn test_resolved_item_id_attaches_entity() {
        let hits = vec![hit(1), hit(2)];
        let pages = HashMap::from([(1, page(1, Some("Q1"))), (2, page(2, None))]);
        let entities = HashMap::from([("Q1".to_string(), entity("Q1"))]);

        let records = join(&hits, &pages, &entities).unwrap();
        assert_eq!(records[0].entity.as_ref().unwrap().id, "Q1");
        assert!(records[1].entity.is_none());
    }

    #[test]
    fn test_hit_without_page_record_is_fatal() {
        let hits = vec![hit(1), hit(2)];
        let pages = HashMap::from([(1, page(1, None))]);

        let err = join(&hits, &pages, &HashMap::new()).unwrap_err();
        assert!(matches!(err, EnrichError::MissingPage { pageid: 2 }));
    }
}
