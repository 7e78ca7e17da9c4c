mod common;

use std::sync::Arc;

use common::logged_in_client;
use schoolhub::models::Student;
use schoolhub::prelude::*;

#[tokio::test]
async fn test_search_without_matches_shows_search_empty_state() {
    let test = logged_in_client().await;
    let query = ListQuery::new().search("John");

    let page = test
        .client
        .resource::<resources::Students>()
        .list(&query)
        .await
        .unwrap();

    assert!(page.is_empty());
    let empty = EmptyState::for_resource::<resources::Students>(&query);
    assert_eq!(empty.title, "No Students Found");
    assert_eq!(empty.message, "No students match \"John\"");
    assert_eq!(empty.action, "Clear Search");
}

#[tokio::test]
async fn test_list_students_with_pagination() {
    let test = logged_in_client().await;

    let page = test
        .client
        .resource::<resources::Students>()
        .list(&ListQuery::new())
        .await
        .unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.data[0].id, "s-1");
    assert_eq!(page.data[0].section_id, None);
    let meta = page.pagination.unwrap();
    assert_eq!(meta.total, 2);
    assert!(!meta.has_more());
}

#[tokio::test]
async fn test_get_student_unwraps_envelope() {
    let test = logged_in_client().await;

    let student: Student = test
        .client
        .resource::<resources::Students>()
        .get("s-9")
        .await
        .unwrap();

    assert_eq!(student.id, "s-9");
    assert_eq!(student.admission_number, "ADM-s-9");
}

#[tokio::test]
async fn test_missing_student_is_not_found() {
    let test = logged_in_client().await;

    let err = test
        .client
        .resource::<resources::Students>()
        .get("missing")
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.user_message(), "Student not found");
    assert!(test.client.sessions().is_authenticated());
}

#[tokio::test]
async fn test_list_store_set_params_fetches_once() {
    let test = logged_in_client().await;
    let (effects, _rx) = effect_channel();
    let client = test.client.clone();
    let store = Arc::new(QueryStore::new(
        ListQuery::new(),
        effects,
        move |query: ListQuery, policy| {
            let client = client.clone();
            async move {
                client
                    .resource::<resources::Students>()
                    .list_with(&query, policy)
                    .await
            }
        },
    ));

    store.dispatch(Intent::SetParams(ListQuery::new().search("John"))).await;
    store.dispatch(Intent::SetParams(ListQuery::new().search("John"))).await;

    assert_eq!(test.backend.hits.count("GET /students"), 1);
    let state = store.state();
    assert!(state.data().is_some_and(|page| page.is_empty()));
}

#[tokio::test]
async fn test_list_store_refresh_hits_network() {
    let test = logged_in_client().await;
    let (effects, mut rx) = effect_channel();
    let client = test.client.clone();
    let store = QueryStore::new(ListQuery::new(), effects, move |query: ListQuery, policy| {
        let client = client.clone();
        async move {
            client
                .resource::<resources::Students>()
                .list_with(&query, policy)
                .await
        }
    });

    store.dispatch(Intent::Load).await;
    store.dispatch(Intent::Refresh).await;

    assert_eq!(test.backend.hits.count("GET /students"), 2);
    assert_eq!(store.state().data().map(|page| page.len()), Some(2));
    assert!(rx.drain().is_empty());
}
