use std::net::SocketAddr;

use configs::AppConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

struct TestApp {
    base_url: String,
    data_dir: String,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Start the full app on an ephemeral port with products in memory and
/// patients in a per-test JSON file.
async fn start_server() -> anyhow::Result<TestApp> {
    let data_dir = format!("target/test-data/{}", Uuid::new_v4());
    let mut cfg = AppConfig::default();
    cfg.storage.patients_file = format!("{}/patients.json", data_dir);
    cfg.storage.data_dir = data_dir.clone();

    let state = server::build_state(&cfg).await?;
    let app = server::app(state);

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, data_dir })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

fn patient(id: &str, height: f64, weight: f64) -> Value {
    json!({"id": id, "name": "Ananya", "city": "Guwahati", "age": 28, "gender": "female", "height": height, "weight": weight})
}

#[tokio::test]
async fn e2e_meta_routes() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.get(app.url("/health")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let v: Value = res.json().await?;
    assert_eq!(v["status"], "ok");

    let res = c.get(app.url("/")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let v: Value = res.json().await?;
    assert!(v["message"].is_string());

    let res = c.get(app.url("/about")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c.get(app.url("/api-docs/openapi.json")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let v: Value = res.json().await?;
    assert!(v["paths"]["/sort"].is_object());
    assert!(v["paths"]["/update_employee/{id}"].is_object());
    Ok(())
}

#[tokio::test]
async fn e2e_products_crud() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    // 启动时写入两条示例商品
    let list: Vec<Value> = c.get(app.url("/products")).send().await?.json().await?;
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["name"], "Phone");

    let body = json!({"id": 3, "name": "Tablet", "description": "Drawing tablet", "price": 250.0, "quantity": 4});
    let res = c.post(app.url("/product")).json(&body).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let created: Value = res.json().await?;
    assert_eq!(created["id"], 3);

    let res = c.post(app.url("/product")).json(&body).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let err: Value = res.json().await?;
    assert_eq!(err["error"], "Already Exists");

    let res = c.get(app.url("/product/3")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let replacement = json!({"id": 99, "name": "Tablet Pro", "description": "Bigger tablet", "price": 400.0, "quantity": 2});
    let res = c.put(app.url("/product?id=3")).json(&replacement).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated: Value = res.json().await?;
    assert_eq!(updated["id"], 3);
    assert_eq!(updated["name"], "Tablet Pro");

    let res = c.put(app.url("/product?id=77")).json(&replacement).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.delete(app.url("/product?id=3")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let v: Value = res.json().await?;
    assert_eq!(v["message"], "product deleted");

    let res = c.delete(app.url("/product?id=3")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let res = c.get(app.url("/product/3")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    // 路径参数或请求体无法解析时返回 400
    let res = c.get(app.url("/product/abc")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let res = c.post(app.url("/product")).json(&json!({"id": 5})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let err: Value = res.json().await?;
    assert_eq!(err["error"], "Invalid Request");
    Ok(())
}

#[tokio::test]
async fn e2e_patients_flow() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.post(app.url("/create")).json(&patient("P001", 1.8, 80.0)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let v: Value = res.json().await?;
    assert_eq!(v["message"], "Patient created successfully");

    let res = c.post(app.url("/create")).json(&patient("P001", 1.7, 60.0)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = c.post(app.url("/create")).json(&json!({"id": "P009", "name": "X", "city": "Y", "age": 120, "gender": "male", "height": 1.7, "weight": 60})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let v: Value = c.get(app.url("/patient/P001")).send().await?.json().await?;
    assert_eq!(v["bmi"], 24.69);
    assert_eq!(v["verdict"], "normal");

    c.post(app.url("/create")).json(&patient("P002", 1.6, 40.0)).send().await?;
    let all: Vec<Value> = c.get(app.url("/view")).send().await?.json().await?;
    let ids: Vec<&str> = all.iter().filter_map(|p| p["id"].as_str()).collect();
    assert_eq!(ids, ["P001", "P002"]);

    let sorted: Vec<Value> = c.get(app.url("/sort?sort_by=bmi&order=desc")).send().await?.json().await?;
    assert_eq!(sorted[0]["id"], "P001");
    let sorted: Vec<Value> = c.get(app.url("/sort?sort_by=bmi")).send().await?.json().await?;
    assert_eq!(sorted[0]["id"], "P002");
    assert_eq!(sorted[0]["bmi"], 15.63);
    assert_eq!(sorted[0]["verdict"], "underweight");

    let res = c.get(app.url("/sort?sort_by=weight2")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let res = c.get(app.url("/sort?sort_by=height&order=sideways")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let err: Value = res.json().await?;
    assert_eq!(err["error"], "Invalid Argument");

    let res = c.put(app.url("/edit/P002")).json(&json!({"weight": 64.0, "city": "Pune"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let v: Value = c.get(app.url("/patient/P002")).send().await?.json().await?;
    assert_eq!(v["city"], "Pune");
    assert_eq!(v["name"], "Ananya");
    assert_eq!(v["bmi"], 25.0);
    assert_eq!(v["verdict"], "overweight");

    let res = c.put(app.url("/edit/P404")).json(&json!({"weight": 64.0})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    // 存储文件以 id 为键，不包含派生字段
    let raw = tokio::fs::read_to_string(format!("{}/patients.json", app.data_dir)).await?;
    let stored: Value = serde_json::from_str(&raw)?;
    assert!(stored["P002"].is_object());
    assert!(stored["P002"].get("bmi").is_none());
    assert!(stored["P002"].get("id").is_none());

    let res = c.delete(app.url("/delete/P002")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let res = c.delete(app.url("/delete/P002")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let err: Value = res.json().await?;
    assert_eq!(err["error"], "Not Found");

    let _ = tokio::fs::remove_dir_all(&app.data_dir).await;
    Ok(())
}

#[tokio::test]
async fn e2e_employees_flow() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let list: Vec<Value> = c.get(app.url("/employees")).send().await?.json().await?;
    assert!(list.is_empty());

    let body = json!({"id": 1, "name": "Ravi Kumar", "age": 58, "department": "dept1"});
    let res = c.post(app.url("/employees")).json(&body).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let res = c.post(app.url("/employees")).json(&body).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = c.post(app.url("/employees")).json(&json!({"id": 2, "name": "Young One", "age": 17, "department": "dept1"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let err: Value = res.json().await?;
    assert_eq!(err["error"], "Validation Error");

    let res = c.put(app.url("/update_employee/1")).json(&json!({"id": 1, "name": "Ravi Kumar", "age": 40, "department": "dept2"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let v: Value = c.get(app.url("/employee/1")).send().await?.json().await?;
    assert_eq!(v["department"], "dept2");

    let res = c.put(app.url("/update_employee/1")).json(&json!({"id": 7, "name": "Ravi Kumar", "age": 40, "department": "dept3"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let res = c.put(app.url("/update_employee/5")).json(&json!({"id": 5, "name": "Nobody", "age": 40, "department": "dept3"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.delete(app.url("/delete_employee/1")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let v: Value = res.json().await?;
    assert_eq!(v["message"], "Employee deleted");

    let res = c.get(app.url("/employee/1")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let res = c.delete(app.url("/delete_employee/1")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}
