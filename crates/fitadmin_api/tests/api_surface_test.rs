//! Tests of the typed endpoint wrappers against a mock backend, including a
//! transparent token refresh in the middle of a listing call.

use std::sync::Arc;

use auth_client::{Config, MemoryTokenStore, NoopSessionObserver, SessionObserver, TokenStore};
use fitadmin_api::users::UserListParams;
use fitadmin_api::{FitAdminClient, PageParams};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> (FitAdminClient, Arc<MemoryTokenStore>) {
    let _ = env_logger::builder().is_test(true).try_init();

    let config = Config {
        api_base: base_url.to_string(),
        timeout_secs: 5,
        token_file: None,
    };
    let store = Arc::new(MemoryTokenStore::new());
    let client = FitAdminClient::new(
        &config,
        Arc::clone(&store) as Arc<dyn TokenStore>,
        Arc::new(NoopSessionObserver) as Arc<dyn SessionObserver>,
    )
    .expect("client");
    (client, store)
}

#[tokio::test]
async fn google_login_saves_issued_tokens() {
    let server = MockServer::start().await;
    let (client, store) = test_client(&server.uri());

    Mock::given(method("POST"))
        .and(path("/auth/google-login"))
        .and(body_json(json!({ "idToken": "google-id-token" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "T1",
            "refreshToken": "R1",
            "isNewUser": false,
            "userDto": {
                "id": "u-1",
                "email": "admin@example.com",
                "name": "Admin",
                "roles": ["Admin"]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client
        .auth()
        .login_google("google-id-token")
        .await
        .expect("login");

    assert_eq!(response.user_dto.email, "admin@example.com");
    assert_eq!(store.access().as_deref(), Some("T1"));
    assert_eq!(store.refresh().as_deref(), Some("R1"));
}

#[tokio::test]
async fn user_list_survives_a_token_refresh() {
    let server = MockServer::start().await;
    let (client, store) = test_client(&server.uri());
    store.save("T1", "R1");

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(header("Authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("pageNumber", "1"))
        .and(query_param("pageSize", "10"))
        .and(header("Authorization", "Bearer T2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "id": "u-1", "email": "a@example.com", "name": "A", "roles": [] },
                { "id": "u-2", "email": "b@example.com", "name": "B", "roles": [] }
            ],
            "totalCount": 2
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "T2",
            "refreshToken": "R2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params = UserListParams {
        page_number: Some(1),
        page_size: Some(10),
        search_term: None,
    };
    let page = client.users().list(&params).await.expect("list users");

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total_count, 2);
    assert_eq!(store.access().as_deref(), Some("T2"));
}

#[tokio::test]
async fn dish_update_targets_id_query_param() {
    let server = MockServer::start().await;
    let (client, store) = test_client(&server.uri());
    store.save("T1", "R1");

    Mock::given(method("PUT"))
        .and(path("/dishes"))
        .and(query_param("Id", "d-7"))
        .and(header("Authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "d-7",
            "name": "Oat bowl",
            "calories": 410
        })))
        .expect(1)
        .mount(&server)
        .await;

    let payload = fitadmin_api::dishes::DishPayload {
        name: "Oat bowl".to_string(),
        description: None,
        calories: 410,
        protein: 14.0,
        carbs: 62.0,
        fat: 9.0,
        image_url: None,
    };
    let dish = client
        .dishes()
        .update("d-7", &payload)
        .await
        .expect("update dish");

    assert_eq!(dish.id, "d-7");
    assert_eq!(dish.calories, Some(410));
}

#[tokio::test]
async fn menu_day_and_meal_payloads_include_required_fields() {
    let server = MockServer::start().await;
    let (client, store) = test_client(&server.uri());
    store.save("T1", "R1");

    Mock::given(method("POST"))
        .and(path("/menus/m-1/days"))
        .and(body_json(json!({ "dayNumber": 2 })))
        .and(header("Authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "dayNumber": 2,
            "meals": []
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/menus/m-1/days/2/meals"))
        .and(body_json(json!({
            "mealType": "Lunch",
            "isMainMeal": true,
            "dishIds": ["d-1", "d-2"]
        })))
        .and(header("Authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "mealType": "Lunch",
            "isMainMeal": true,
            "dishIds": ["d-1", "d-2"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let day = client.menus().add_day("m-1", 2).await.expect("add day");
    assert_eq!(day.day_number, 2);

    let meal = fitadmin_api::menus::NewMeal {
        meal_type: "Lunch".to_string(),
        is_main_meal: true,
        dish_ids: vec!["d-1".to_string(), "d-2".to_string()],
    };
    let added = client
        .menus()
        .add_meal("m-1", 2, &meal)
        .await
        .expect("add meal");
    assert!(added.is_main_meal);
}

#[tokio::test]
async fn menu_list_accepts_paging_and_search() {
    let server = MockServer::start().await;
    let (client, store) = test_client(&server.uri());
    store.save("T1", "R1");

    Mock::given(method("GET"))
        .and(path("/menus"))
        .and(query_param("pageNumber", "1"))
        .and(query_param("pageSize", "5"))
        .and(query_param("searchTerm", "cut"))
        .and(header("Authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "id": "m-1", "name": "Cutting plan" }],
            "totalCount": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params = fitadmin_api::menus::MenuListParams {
        page_number: Some(1),
        page_size: Some(5),
        search_term: Some("cut".to_string()),
    };
    let page = client.menus().list(&params).await.expect("list menus");

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].name, "Cutting plan");
}

#[tokio::test]
async fn exercise_listing_uses_capitalized_paging_keys() {
    let server = MockServer::start().await;
    let (client, store) = test_client(&server.uri());
    store.save("T1", "R1");

    Mock::given(method("GET"))
        .and(path("/exercises"))
        .and(query_param("PageIndex", "0"))
        .and(query_param("PageSize", "25"))
        .and(query_param("difficulty", "3"))
        .and(header("Authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "id": "e-1", "name": "Back squat", "difficulty": 3 }],
            "totalCount": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params = fitadmin_api::exercises::ExerciseListParams {
        page_index: Some(0),
        page_size: Some(25),
        difficulty: Some(3),
        ..Default::default()
    };
    let page = client.exercises().list(&params).await.expect("list");

    assert_eq!(page.items[0].difficulty, Some(3));
}

#[tokio::test]
async fn exercise_update_puts_to_resource_url() {
    let server = MockServer::start().await;
    let (client, store) = test_client(&server.uri());
    store.save("T1", "R1");

    Mock::given(method("PUT"))
        .and(path("/exercises/e-3"))
        .and(body_json(json!({ "name": "Deadlift", "difficulty": 4 })))
        .and(header("Authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "e-3",
            "name": "Deadlift",
            "difficulty": 4
        })))
        .expect(1)
        .mount(&server)
        .await;

    let payload = fitadmin_api::exercises::ExercisePayload {
        name: "Deadlift".to_string(),
        muscle_group: None,
        difficulty: Some(4),
        calories_per_minute: None,
    };
    let exercise = client
        .exercises()
        .update("e-3", &payload)
        .await
        .expect("update");

    assert_eq!(exercise.name, "Deadlift");
}

#[tokio::test]
async fn exercise_delete_hits_resource_url() {
    let server = MockServer::start().await;
    let (client, store) = test_client(&server.uri());
    store.save("T1", "R1");

    Mock::given(method("DELETE"))
        .and(path("/exercises/e-3"))
        .and(header("Authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.exercises().delete("e-3").await.expect("delete");
}

#[tokio::test]
async fn revenue_report_passes_year() {
    let server = MockServer::start().await;
    let (client, store) = test_client(&server.uri());
    store.save("T1", "R1");

    Mock::given(method("GET"))
        .and(path("/dashboard/revenue"))
        .and(query_param("year", "2025"))
        .and(header("Authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "month": 1, "revenue": 1200.5 },
            { "month": 2, "revenue": 980.0 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let report = client
        .dashboard()
        .revenue_report(Some(2025))
        .await
        .expect("revenue report");

    assert_eq!(report.len(), 2);
    assert_eq!(report[0].month, 1);
}

#[tokio::test]
async fn dish_listing_uses_zero_based_paging() {
    let server = MockServer::start().await;
    let (client, store) = test_client(&server.uri());
    store.save("T1", "R1");

    Mock::given(method("GET"))
        .and(path("/dishes"))
        .and(query_param("pageIndex", "0"))
        .and(query_param("pageSize", "25"))
        .and(header("Authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "id": "d-1", "name": "Salad" }],
            "totalCount": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params = PageParams {
        page_index: Some(0),
        page_size: Some(25),
    };
    let page = client.dishes().list(&params).await.expect("list dishes");

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].name, "Salad");
}
