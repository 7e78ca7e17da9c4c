mod common;

use common::logged_in_client;
use schoolhub::cache::keys;
use schoolhub::models::HostelBuildingForm;
use schoolhub::prelude::*;
use schoolhub::store::ToastKind;

fn building(name: &str) -> HostelBuildingForm {
    HostelBuildingForm {
        name: name.into(),
        floors: Some(3),
        ..Default::default()
    }
}

async fn warm_list(test: &common::TestClient) -> QueryKey {
    test.client
        .resource::<resources::HostelBuildings>()
        .list(&ListQuery::new())
        .await
        .unwrap();
    let key = keys::list("hostel-buildings", &ListQuery::new());
    assert!(test.client.cache().get::<serde_json::Value>(&key).await.is_some());
    key
}

#[tokio::test]
async fn test_create_building_invalidates_list_and_navigates_back() {
    let test = logged_in_client().await;
    let list_key = warm_list(&test).await;

    let mut navigator = Navigator::new(Route::list::<resources::HostelBuildings>());
    navigator.navigate(Route::create::<resources::HostelBuildings>());

    let (effects, mut rx) = effect_channel();
    let submitter =
        FormSubmitter::for_create::<resources::HostelBuildings>(test.client.cache().clone(), effects);
    let form = building("South Wing");
    let created = submitter
        .submit(&form, || async {
            test.client
                .resource::<resources::HostelBuildings>()
                .create(&form)
                .await
        })
        .await
        .unwrap();

    assert_eq!(created.id, "b-2");
    assert_eq!(test.backend.hits.count("POST /hostel/buildings"), 1);
    assert!(test.client.cache().get::<serde_json::Value>(&list_key).await.is_none());

    let effects = rx.drain();
    assert_eq!(
        effects[0],
        Effect::ShowToast(Toast::success("Hostel Building created successfully"))
    );
    assert_eq!(effects[1], Effect::NavigateBack);
    for effect in &effects {
        navigator.apply(effect);
    }
    assert_eq!(navigator.current(), &Route::list::<resources::HostelBuildings>());
}

#[tokio::test]
async fn test_create_conflict_shows_server_error() {
    let test = logged_in_client().await;
    let list_key = warm_list(&test).await;

    let (effects, mut rx) = effect_channel();
    let submitter =
        FormSubmitter::for_create::<resources::HostelBuildings>(test.client.cache().clone(), effects);
    let form = building("North Wing");
    let result = submitter
        .submit(&form, || async {
            test.client
                .resource::<resources::HostelBuildings>()
                .create(&form)
                .await
        })
        .await;

    match result {
        Err(SubmitError::Api(err)) => assert_eq!(err.status(), Some(409)),
        other => panic!("expected api error, got {other:?}"),
    }
    let effects = rx.drain();
    assert_eq!(effects.len(), 1);
    match &effects[0] {
        Effect::ShowToast(toast) => {
            assert_eq!(toast.kind, ToastKind::Error);
            assert_eq!(toast.message, "A building with this name already exists");
        }
        other => panic!("expected toast, got {other:?}"),
    }
    assert!(test.client.cache().get::<serde_json::Value>(&list_key).await.is_some());
}

#[tokio::test]
async fn test_blank_building_name_is_rejected_locally() {
    let test = logged_in_client().await;
    let (effects, _rx) = effect_channel();
    let submitter =
        FormSubmitter::for_create::<resources::HostelBuildings>(test.client.cache().clone(), effects);
    let form = building("   ");

    let result = submitter
        .submit(&form, || async {
            test.client
                .resource::<resources::HostelBuildings>()
                .create(&form)
                .await
        })
        .await;

    let errors = result.unwrap_err();
    assert!(errors.field_errors().is_some_and(|e| e.has("name")));
    assert_eq!(test.backend.hits.count("POST /hostel/buildings"), 0);
}
