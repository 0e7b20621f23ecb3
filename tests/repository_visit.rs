mod common;

use sqlx::PgPool;
use std::sync::Arc;

use geolink::domain::entities::NewVisit;
use geolink::domain::repositories::VisitRepository;
use geolink::infrastructure::persistence::PgVisitRepository;

#[sqlx::test]
async fn test_insert_visit(pool: PgPool) {
    let link_id = common::create_test_link(&pool, "visited", "https://example.com").await;
    let rule_id = common::add_rule(&pool, link_id, "https://example.de", &["DE"]).await;
    let repo = PgVisitRepository::new(Arc::new(pool.clone()));

    let visit = repo
        .insert(NewVisit {
            link_id,
            ip: "203.0.113.9".to_string(),
            country: "DE".to_string(),
            city: "Berlin".to_string(),
            rule_id: Some(rule_id),
        })
        .await
        .unwrap();

    assert!(visit.id > 0);
    assert_eq!(visit.link_id, link_id);
    assert_eq!(visit.country, "DE");
    assert_eq!(visit.city, "Berlin");
    assert_eq!(visit.rule_id, Some(rule_id));

    assert_eq!(common::count_visits(&pool, link_id).await, 1);
}

#[sqlx::test]
async fn test_insert_visit_without_rule(pool: PgPool) {
    let link_id = common::create_test_link(&pool, "fallback", "https://example.com").await;
    let repo = PgVisitRepository::new(Arc::new(pool));

    let visit = repo
        .insert(NewVisit {
            link_id,
            ip: "203.0.113.9".to_string(),
            country: "UNKNOWN".to_string(),
            city: "Unknown".to_string(),
            rule_id: None,
        })
        .await
        .unwrap();

    assert_eq!(visit.rule_id, None);
    assert_eq!(visit.country, "UNKNOWN");
}

#[sqlx::test]
async fn test_visits_survive_link_deletion(pool: PgPool) {
    let link_id = common::create_test_link(&pool, "shortlived", "https://example.com").await;
    let repo = PgVisitRepository::new(Arc::new(pool.clone()));

    repo.insert(NewVisit {
        link_id,
        ip: "203.0.113.9".to_string(),
        country: "DE".to_string(),
        city: "Berlin".to_string(),
        rule_id: None,
    })
    .await
    .unwrap();

    sqlx::query("DELETE FROM links WHERE id = $1")
        .bind(link_id)
        .execute(&pool)
        .await
        .unwrap();

    // link_id is a weak reference; history stays
    assert_eq!(common::count_visits(&pool, link_id).await, 1);
}
