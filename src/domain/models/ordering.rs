use std::cmp::Ordering;

use crate::domain::models::Resource;

/// Canonical read order: ascending `order`, newest first among equal orders,
/// then by id so that no two resources compare equal.
pub fn canonical_cmp(a: &Resource, b: &Resource) -> Ordering {
    a.order
        .cmp(&b.order)
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Sort resources into canonical order in place
pub fn sort_canonical(resources: &mut [Resource]) {
    resources.sort_by(canonical_cmp);
}

/// Next order value for a collection whose highest order is `max_order`
pub fn next_order(max_order: Option<u32>) -> u32 {
    max_order.map_or(0, |max| max.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        models::ResourceDetails,
        value_objects::{Collection, ResourceId, ResourceStatus},
    };
    use chrono::{Duration, Utc};

    fn resource(id: &str, order: u32, age_secs: i64) -> Resource {
        let created = Utc::now() - Duration::seconds(age_secs);
        Resource {
            id: ResourceId::new(id.to_string()).unwrap(),
            collection: Collection::Services,
            title: id.to_string(),
            description: String::new(),
            media: None,
            order,
            status: ResourceStatus::Active,
            details: ResourceDetails::Service {
                icon: "i".to_string(),
                gradient: "g".to_string(),
            },
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_sorts_by_order_then_newest() {
        let mut items = vec![
            resource("old-zero", 0, 100),
            resource("one", 1, 50),
            resource("new-zero", 0, 10),
        ];
        sort_canonical(&mut items);
        let ids: Vec<&str> = items.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["new-zero", "old-zero", "one"]);
    }

    #[test]
    fn test_id_breaks_remaining_ties() {
        let a = resource("a", 2, 0);
        let mut b = resource("b", 2, 0);
        b.created_at = a.created_at;
        assert_eq!(canonical_cmp(&a, &b), Ordering::Less);
        assert_eq!(canonical_cmp(&b, &a), Ordering::Greater);
    }

    #[test]
    fn test_next_order() {
        assert_eq!(next_order(None), 0);
        assert_eq!(next_order(Some(0)), 1);
        assert_eq!(next_order(Some(7)), 8);
    }
}
