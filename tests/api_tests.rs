//! API integration tests
//!
//! Each test starts its own server on an ephemeral port with a freshly seeded
//! catalog.

use std::sync::Arc;

use reqwest::{multipart, Client, StatusCode};
use serde_json::{json, Value};

use ricxi_inventory::{
    api,
    config::AppConfig,
    repository::Repository,
    services::clock::{Clock, SystemClock},
    AppState,
};

async fn spawn_app() -> String {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let repository = Repository::seeded(clock.today());
    let app = api::create_router(AppState::new(AppConfig::default(), repository, clock));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    format!("http://{}/api/v1", addr)
}

async fn login(client: &Client, base: &str, remember_me: bool) -> String {
    let response = client
        .post(format!("{}/auth/login", base))
        .json(&json!({
            "username": "admin",
            "password": "admin",
            "remember_me": remember_me
        }))
        .send()
        .await
        .expect("Failed to send login request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

async fn get_json(client: &Client, url: String, token: &str) -> Value {
    let response = client
        .get(url)
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
async fn test_health_check() {
    let base = spawn_app().await;
    let body: Value = reqwest::get(format!("{}/health", base))
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_login() {
    let base = spawn_app().await;
    let client = Client::new();

    let token = login(&client, &base, false).await;
    let me = get_json(&client, format!("{}/auth/me", base), &token).await;
    assert_eq!(me["username"], "admin");
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let base = spawn_app().await;
    let client = Client::new();

    for (username, password) in [("admin", "wrong"), ("guest", "admin")] {
        let response = client
            .post(format!("{}/auth/login", base))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["error"], "NotAuthorized");
    }
}

#[tokio::test]
async fn test_remember_me() {
    let base = spawn_app().await;
    let client = Client::new();
    let remembered = |client: Client, base: String| async move {
        client
            .get(format!("{}/auth/remembered", base))
            .send()
            .await
            .expect("Failed to send request")
            .json::<Value>()
            .await
            .expect("Failed to parse response")
    };

    login(&client, &base, true).await;
    assert_eq!(remembered(client.clone(), base.clone()).await["username"], "admin");

    login(&client, &base, false).await;
    assert!(remembered(client.clone(), base.clone()).await["username"].is_null());
}

#[tokio::test]
async fn test_requires_authentication() {
    let base = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/books", base))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = client
        .get(format!("{}/books", base))
        .bearer_auth("not-a-token")
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let base = spawn_app().await;
    let client = Client::new();
    let token = login(&client, &base, false).await;

    let response = client
        .post(format!("{}/auth/logout", base))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = client
        .get(format!("{}/dashboard", base))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_book_search() {
    let base = spawn_app().await;
    let client = Client::new();
    let token = login(&client, &base, false).await;

    let body = get_json(&client, format!("{}/books?search=web", base), &token).await;
    let books = body.as_array().expect("Expected an array");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["bookNo"], "B1002");
}

#[tokio::test]
async fn test_add_and_delete_book() {
    let base = spawn_app().await;
    let client = Client::new();
    let token = login(&client, &base, false).await;

    let response = client
        .post(format!("{}/books", base))
        .bearer_auth(&token)
        .json(&json!({
            "bookNo": "B1009",
            "title": "Compiler Design",
            "author": "Alfred Aho",
            "location": "Shelf E-1",
            "year": 2006
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(created["id"], 9);
    assert_eq!(created["status"], "Available");

    let books = get_json(&client, format!("{}/books", base), &token).await;
    assert_eq!(books.as_array().map(Vec::len), Some(9));

    // Same book number again
    let response = client
        .post(format!("{}/books", base))
        .bearer_auth(&token)
        .json(&json!({
            "bookNo": "b1009",
            "title": "Duplicate",
            "author": "Someone",
            "location": "Shelf E-2",
            "year": 2010
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = client
        .delete(format!("{}/books/9", base))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let books = get_json(&client, format!("{}/books", base), &token).await;
    let ids: Vec<i64> = books
        .as_array()
        .expect("Expected an array")
        .iter()
        .filter_map(|b| b["id"].as_i64())
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8]);
}

#[tokio::test]
async fn test_borrow_and_return() {
    let base = spawn_app().await;
    let client = Client::new();
    let token = login(&client, &base, false).await;

    let response = client
        .post(format!("{}/borrowing", base))
        .bearer_auth(&token)
        .json(&json!({
            "transactionType": "Book",
            "itemNo": "B1003",
            "borrower": "Carlos Mendoza"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let transaction: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(transaction["description"], "Data Structures and Algorithms");
    assert_eq!(transaction["isOverdue"], false);
    let id = transaction["id"].as_i64().expect("No id");

    let book = get_json(&client, format!("{}/books/3", base), &token).await;
    assert_eq!(book["status"], "Borrowed");

    // Lending the same book twice is refused
    let response = client
        .post(format!("{}/borrowing", base))
        .bearer_auth(&token)
        .json(&json!({
            "transactionType": "Book",
            "itemNo": "B1003",
            "borrower": "Ana Garcia"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = client
        .post(format!("{}/borrowing/{}/return", base, id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let returned: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(returned["status"], "Returned");

    let book = get_json(&client, format!("{}/books/3", base), &token).await;
    assert_eq!(book["status"], "Available");

    let response = client
        .post(format!("{}/borrowing/{}/return", base, id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_dashboard_matches_lists() {
    let base = spawn_app().await;
    let client = Client::new();
    let token = login(&client, &base, false).await;

    let dashboard = get_json(&client, format!("{}/dashboard", base), &token).await;
    let borrowed_books = get_json(&client, format!("{}/books?status=Borrowed", base), &token).await;
    let overdue = get_json(&client, format!("{}/borrowing?overdue_only=true", base), &token).await;
    let borrowers = get_json(&client, format!("{}/users", base), &token).await;

    assert_eq!(
        dashboard["books"]["borrowed"].as_u64(),
        borrowed_books.as_array().map(|a| a.len() as u64)
    );
    assert_eq!(
        dashboard["transactions"]["overdue"].as_u64(),
        overdue.as_array().map(|a| a.len() as u64)
    );
    assert_eq!(
        dashboard["borrowers"].as_u64(),
        borrowers.as_array().map(|a| a.len() as u64)
    );

    let overdue_by_borrower: i64 = borrowers
        .as_array()
        .expect("Expected an array")
        .iter()
        .filter_map(|b| b["overdue"].as_i64())
        .sum();
    assert_eq!(Some(overdue_by_borrower), dashboard["transactions"]["overdue"].as_i64());

    let report = get_json(
        &client,
        format!("{}/reports/transactions-overdue", base),
        &token,
    )
    .await;
    assert_eq!(
        report["rows"].as_array().map(|r| r.len() as i64),
        dashboard["transactions"]["overdue"].as_i64()
    );
}

#[tokio::test]
async fn test_project_upload() {
    let base = spawn_app().await;
    let client = Client::new();
    let token = login(&client, &base, false).await;

    let form = multipart::Form::new().part(
        "file",
        multipart::Part::bytes(b"%PDF-1.4 test".to_vec()).file_name("Annual Report.PDF"),
    );
    let response = client
        .post(format!("{}/projects/research/2024/documents", base))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let document: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(document["name"], "Annual Report.PDF");
    assert_eq!(document["type"], "pdf");

    let year = get_json(&client, format!("{}/projects/research/2024", base), &token).await;
    let pdf_names: Vec<&str> = year["pdf"]
        .as_array()
        .expect("Expected an array")
        .iter()
        .filter_map(|d| d["name"].as_str())
        .collect();
    assert!(pdf_names.contains(&"Annual Report.PDF"));

    let response = client
        .delete(format!(
            "{}/projects/research/2024/documents/{}",
            base, document["id"]
        ))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_unknown_routes_return_not_found() {
    let base = spawn_app().await;
    let client = Client::new();
    let token = login(&client, &base, false).await;

    let response = client
        .get(format!("{}/does-not-exist", base))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "NoSuchData");

    for path in ["reports/inventory", "projects/marketing"] {
        let response = client
            .get(format!("{}/{}", base, path))
            .bearer_auth(&token)
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_borrowed_book_edits_keep_loan_in_step() {
    let base = spawn_app().await;
    let client = Client::new();
    let token = login(&client, &base, false).await;

    // Status follows the loans; a status field in an edit is ignored
    let response = client
        .put(format!("{}/books/2", base))
        .bearer_auth(&token)
        .json(&json!({ "status": "Available", "location": "Shelf A-9" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let book: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(book["status"], "Borrowed");
    assert_eq!(book["location"], "Shelf A-9");

    let response = client
        .post(format!("{}/borrowing", base))
        .bearer_auth(&token)
        .json(&json!({
            "transactionType": "Book",
            "itemNo": "B1002",
            "borrower": "Carlos Mendoza"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Renumbering while on loan is refused
    let response = client
        .put(format!("{}/books/2", base))
        .bearer_auth(&token)
        .json(&json!({ "bookNo": "B9999" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "ItemOnLoan");

    let response = client
        .post(format!("{}/borrowing/1/return", base))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let book = get_json(&client, format!("{}/books/2", base), &token).await;
    assert_eq!(book["status"], "Available");
}

#[tokio::test]
async fn test_forced_delete_closes_loan() {
    let base = spawn_app().await;
    let client = Client::new();
    let token = login(&client, &base, false).await;

    let response = client
        .delete(format!("{}/books/2", base))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = client
        .delete(format!("{}/books/2?force=true", base))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let loan = get_json(&client, format!("{}/borrowing/1", base), &token).await;
    assert_eq!(loan["status"], "Returned");

    let dashboard = get_json(&client, format!("{}/dashboard", base), &token).await;
    let borrowed = dashboard["books"]["borrowed"].as_i64().unwrap_or_default()
        + dashboard["equipment"]["borrowed"].as_i64().unwrap_or_default();
    assert_eq!(dashboard["transactions"]["active"].as_i64(), Some(borrowed));
    assert_eq!(borrowed, 4);
}

#[tokio::test]
async fn test_equipment_numbers_shared_across_classes() {
    let base = spawn_app().await;
    let client = Client::new();
    let token = login(&client, &base, false).await;

    let response = client
        .post(format!("{}/equipment/par", base))
        .bearer_auth(&token)
        .json(&json!({
            "propertyNo": "INV-ICS-001",
            "description": "Printer",
            "quantity": 1,
            "unit": "unit",
            "dateAcquired": "2024-01-02",
            "amount": "15000.00",
            "parNo": "PAR-2024-009"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = client
        .put(format!("{}/equipment/ics/1", base))
        .bearer_auth(&token)
        .json(&json!({ "inventoryItemNo": "prop-2022-001" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
