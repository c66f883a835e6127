// Appwrite client tests against a mock server

use mockito::{Matcher, Server};
use serde_json::json;

use trip_buddy::models::{Place, PriceLevel, ProfileData, UserPreferences};
use trip_buddy::services::{AppwriteClient, AppwriteCollections, PlaceStore, StoreError, UserStore};

const PLACES_PATH: &str = "/databases/test_db/collections/places/documents";
const USERS_PATH: &str = "/databases/test_db/collections/users/documents";
const PROFILES_PATH: &str = "/databases/test_db/collections/profiles/documents";

fn create_client(base_url: String) -> AppwriteClient {
    AppwriteClient::new(
        base_url,
        "test_key".to_string(),
        "test_project".to_string(),
        "test_db".to_string(),
        AppwriteCollections {
            places: "places".to_string(),
            users: "users".to_string(),
            profiles: "profiles".to_string(),
        },
    )
    .unwrap()
}

#[tokio::test]
async fn test_find_all_decodes_documents() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", PLACES_PATH)
        .match_query(Matcher::Any)
        .match_header("x-appwrite-key", "test_key")
        .match_header("x-appwrite-project", "test_project")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "total": 3,
                "documents": [
                    {
                        "$id": "golden-bay",
                        "$collectionId": "places",
                        "name": "Golden Bay",
                        "category": "beach",
                        "price_level": "€",
                        "tags": "beach",
                        "rating": "not a number",
                    },
                    {
                        "$id": "mdina",
                        "name": "Mdina",
                        "category": "culture",
                        "price_level": "premium",
                        "tags": ["history", 42, "museum"],
                        "location": { "lat": 35.887, "lng": 14.406 },
                    },
                    { "$id": "broken", "tags": ["no name"] },
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = create_client(server.url());
    let places = client.find_all().await.unwrap();

    mock.assert_async().await;
    assert_eq!(places.len(), 2);

    assert_eq!(places[0].id, "golden-bay");
    assert_eq!(places[0].price_level, Some(PriceLevel::Low));
    assert_eq!(places[0].tags, vec!["beach"]);
    assert_eq!(places[0].rating, None);

    assert_eq!(places[1].price_level, None);
    assert_eq!(places[1].tags, vec!["history", "museum"]);
    assert!(places[1].location.is_some());
}

#[tokio::test]
async fn test_find_by_id_missing() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", format!("{}/missing", PLACES_PATH).as_str())
        .with_status(404)
        .with_body(r#"{"message":"Document not found","code":404}"#)
        .create_async()
        .await;

    let client = create_client(server.url());
    let result = PlaceStore::find_by_id(&client, "missing").await.unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_invalid_id_never_reaches_server() {
    let server = Server::new_async().await;
    let client = create_client(server.url());

    let result = client.delete_by_id("../users").await;
    assert!(matches!(result, Err(StoreError::InvalidId(_))));
}

#[tokio::test]
async fn test_insert_place() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PLACES_PATH)
        .match_body(Matcher::PartialJson(json!({
            "data": { "name": "Blue Grotto", "category": "nature" }
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "$id": "65f0c0ffee",
                "name": "Blue Grotto",
                "category": "nature",
                "tags": ["boat"],
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = create_client(server.url());
    let mut place = Place::new("Blue Grotto", "nature");
    place.tags = vec!["boat".to_string()];

    let created = client.insert(place).await.unwrap();

    mock.assert_async().await;
    assert_eq!(created.id, "65f0c0ffee");
    assert_eq!(created.tags, vec!["boat"]);
}

#[tokio::test]
async fn test_delete_place() {
    let mut server = Server::new_async().await;
    server
        .mock("DELETE", format!("{}/gone", PLACES_PATH).as_str())
        .with_status(204)
        .create_async()
        .await;
    server
        .mock("DELETE", format!("{}/never", PLACES_PATH).as_str())
        .with_status(404)
        .create_async()
        .await;

    let client = create_client(server.url());

    assert!(client.delete_by_id("gone").await.unwrap());
    assert!(!client.delete_by_id("never").await.unwrap());
}

#[tokio::test]
async fn test_unauthorized() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", PLACES_PATH)
        .match_query(Matcher::Any)
        .with_status(401)
        .create_async()
        .await;

    let client = create_client(server.url());
    let result = client.find_all().await;

    assert!(matches!(result, Err(StoreError::Unauthorized)));
    assert!(!matches!(client.health_check().await, Ok(true)));
}

#[tokio::test]
async fn test_server_error_maps_to_api_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", USERS_PATH)
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let client = create_client(server.url());
    let result = client.list_users().await;

    assert!(matches!(result, Err(StoreError::ApiError(_))));
}

#[tokio::test]
async fn test_list_users_skips_malformed_documents() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", USERS_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "total": 3,
                "documents": [
                    { "$id": "u1", "email": "maria@example.mt", "role": "admin" },
                    { "$id": "u2", "name": "No Email" },
                    { "$id": "u3", "email": "joe@example.mt", "created_at": "2024-05-01 10:00:00" },
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = create_client(server.url());
    let users = client.list_users().await.unwrap();

    let ids: Vec<&str> = users.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["u1", "u3"]);
    assert!(users[1].created_at.is_some());
}

#[tokio::test]
async fn test_find_user_by_email() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", USERS_PATH)
        .match_query(Matcher::Regex("maria".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "total": 1,
                "documents": [{
                    "$id": "u1",
                    "email": "maria@example.mt",
                    "password_hash": "$2b$04$abc",
                    "role": "admin",
                    "interests": ["beach"],
                    "budget": "LOW",
                    "travel_style": "relaxed",
                    "created_at": "2024-05-01T10:00:00Z",
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = create_client(server.url());
    let user = client
        .find_by_email("maria@example.mt")
        .await
        .unwrap()
        .unwrap();

    mock.assert_async().await;
    assert_eq!(user.id, "u1");
    assert!(user.is_admin());
    assert_eq!(user.preferences.budget, PriceLevel::Low);
    assert!(user.created_at.is_some());
}

#[tokio::test]
async fn test_update_preferences_patches_user() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PATCH", format!("{}/u1", USERS_PATH).as_str())
        .match_body(Matcher::PartialJson(json!({
            "data": { "interests": ["history"], "budget": "high" }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "$id": "u1",
                "email": "maria@example.mt",
                "interests": ["history"],
                "budget": "high",
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = create_client(server.url());
    let preferences = UserPreferences {
        interests: vec!["history".to_string()],
        budget: PriceLevel::High,
        travel_style: None,
    };

    let user = client
        .update_preferences("u1", &preferences)
        .await
        .unwrap()
        .unwrap();

    mock.assert_async().await;
    assert_eq!(user.preferences.interests, vec!["history"]);
}

#[tokio::test]
async fn test_upsert_profile_creates_when_missing() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", PROFILES_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "total": 0, "documents": [] }).to_string())
        .create_async()
        .await;
    let create = server
        .mock("POST", PROFILES_PATH)
        .match_body(Matcher::PartialJson(json!({
            "data": { "user_id": "u1", "age": 30 }
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(json!({ "$id": "p1", "user_id": "u1", "age": 30 }).to_string())
        .create_async()
        .await;

    let client = create_client(server.url());
    let data = ProfileData {
        age: Some(30),
        ..Default::default()
    };

    let profile = client.upsert_profile("u1", &data).await.unwrap();

    create.assert_async().await;
    assert_eq!(profile.id, "p1");
    assert_eq!(profile.data.age, Some(30));
}
