use catalog_api::app::{build_app, AppServices};
use catalog_products::testing::ProductFactory;
use catalog_products::{Category, Product};
use reqwest::StatusCode;
use serde_json::{json, Value};

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod over an in-memory store, bound to an ephemeral port.
        let app = build_app(AppServices::in_memory());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            client: reqwest::Client::new(),
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn create(&self, body: &Value) -> Value {
        let res = self.client.post(self.url("/products")).json(body).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        res.json().await.unwrap()
    }

    async fn get_json(&self, path: &str) -> (StatusCode, Value) {
        let res = self.client.get(self.url(path)).send().await.unwrap();
        let status = res.status();
        (status, res.json().await.unwrap())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn fedora() -> Value {
    json!({
        "name": "Fedora",
        "description": "A red hat",
        "price": "25.00",
        "available": true,
        "category": "CLOTHS",
    })
}

fn product_json(product: &Product) -> Value {
    json!({
        "name": product.name,
        "description": product.description,
        "price": product.price.to_string(),
        "available": product.available,
        "category": product.category.name(),
    })
}

#[tokio::test]
async fn health_check() {
    let srv = TestServer::spawn().await;
    let res = srv.client.get(srv.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn product_lifecycle_create_read_delete() {
    let srv = TestServer::spawn().await;

    let res = srv.client.post(srv.url("/products")).json(&fedora()).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let location = res
        .headers()
        .get(reqwest::header::LOCATION)
        .expect("location header")
        .to_str()
        .unwrap()
        .to_string();
    let created: Value = res.json().await.unwrap();
    assert_eq!(created["name"], "Fedora");
    assert_eq!(created["price"], "25.00");
    assert_eq!(created["available"], true);
    let id = created["id"].as_i64().expect("numeric id");
    let path = format!("/products/{id}");
    assert_eq!(location, srv.url(&path));

    let (status, fetched) = srv.get_json(&path).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let res = srv.client.delete(&location).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.bytes().await.unwrap().is_empty());

    let (status, body) = srv.get_json(&path).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let res = srv.client.delete(srv.url(&path)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_returns_all_products_in_creation_order() {
    let srv = TestServer::spawn().await;
    let mut factory = ProductFactory::seeded(7);

    let mut created = Vec::new();
    for product in factory.build_many(5) {
        created.push(srv.create(&product_json(&product)).await);
    }

    let (status, listed) = srv.get_json("/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, Value::Array(created));
}

#[tokio::test]
async fn query_by_category_name_and_availability() {
    let srv = TestServer::spawn().await;
    let hat = srv.create(&fedora()).await;
    for (seed, (name, category, available)) in [
        ("Saw", Category::Tools, true),
        ("Drill", Category::Tools, false),
        ("Apple", Category::Food, false),
    ]
    .into_iter()
    .enumerate()
    {
        let product = ProductFactory::seeded(seed as u64)
            .name(name)
            .category(category)
            .available(available)
            .build();
        srv.create(&product_json(&product)).await;
    }

    let (status, tools) = srv.get_json("/products/category/TOOLS").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = tools.as_array().unwrap().iter().map(|p| p["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["Saw", "Drill"]);

    let (_, by_query) = srv.get_json("/products?category=TOOLS").await;
    assert_eq!(by_query, tools);

    let (_, hats) = srv.get_json("/products/name/Fedora").await;
    assert_eq!(hats, json!([hat]));

    let (_, available) = srv.get_json("/products/availability/true").await;
    let names: Vec<&str> = available.as_array().unwrap().iter().map(|p| p["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["Fedora", "Saw"]);

    let (_, unavailable) = srv.get_json("/products?available=false").await;
    assert_eq!(unavailable.as_array().unwrap().len(), 2);

    let (_, priced) = srv.get_json("/products/price/25").await;
    assert_eq!(priced, json!([hat]));

    let (status, _) = srv.get_json("/products/category/toys").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_with_partial_body() {
    let srv = TestServer::spawn().await;
    let created = srv.create(&fedora()).await;
    let path = format!("/products/{}", created["id"]);

    let res = srv
        .client
        .put(srv.url(&path))
        .json(&json!({"available": false}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await.unwrap();
    assert_eq!(updated["available"], false);
    assert_eq!(updated["description"], "A red hat");

    let (_, fetched) = srv.get_json(&path).await;
    assert_eq!(fetched, updated);

    let res = srv
        .client
        .put(srv.url("/products/424242"))
        .json(&json!({"available": false}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rejects_invalid_requests() {
    let srv = TestServer::spawn().await;

    let mut no_name = fedora();
    no_name.as_object_mut().unwrap().remove("name");
    let res = srv.client.post(srv.url("/products")).json(&no_name).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["message"], "Invalid product: missing name");

    let mut bad_price = fedora();
    bad_price["price"] = json!("twenty");
    let res = srv.client.post(srv.url("/products")).json(&bad_price).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = srv
        .client
        .post(srv.url("/products"))
        .header(reqwest::header::CONTENT_TYPE, "text/html")
        .body("<p>not json</p>")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let res = srv
        .client
        .post(srv.url("/products"))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let (status, body) = srv.get_json("/products/not-a-number").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_id");
}
