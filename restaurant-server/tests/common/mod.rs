#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use restaurant_server::api::build_app;
use restaurant_server::{Config, ServerState};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const HOUR_MILLIS: i64 = 60 * 60 * 1000;

pub struct TestApp {
    pub app: Router,
    pub state: ServerState,
}

/// A signed-up user and its tokens
pub struct Session {
    pub user_id: String,
    pub token: String,
    pub refresh_token: String,
}

impl TestApp {
    pub async fn new() -> Self {
        let state = ServerState::in_memory(Config::for_tests())
            .await
            .expect("in-memory state");
        let app = build_app(state.clone());
        Self { app, state }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("token", token);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(http::header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, Some(token), Some(body)).await
    }

    pub async fn signup(&self, email: &str, phone: &str, role: &str) -> Session {
        let (status, body) = self
            .post(
                "/users/signup",
                None,
                json!({
                    "first_name": "Ada",
                    "last_name": "Lovelace",
                    "email": email,
                    "password": "secret123",
                    "phone": phone,
                    "role": role,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "signup failed: {body}");
        Session {
            user_id: body["user"]["id"].as_str().unwrap().to_string(),
            token: body["token"].as_str().unwrap().to_string(),
            refresh_token: body["refresh_token"].as_str().unwrap().to_string(),
        }
    }

    pub async fn manager(&self) -> Session {
        self.signup("manager@example.com", "555-0100", "MANAGER").await
    }

    pub async fn create_menu(&self, manager: &Session) -> String {
        let (status, body) = self
            .post(
                &format!("/menus/{}", manager.user_id),
                Some(&manager.token),
                json!({ "name": "Dinner", "category": "Main" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "menu create failed: {body}");
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn create_food(
        &self,
        manager: &Session,
        menu_id: &str,
        name: &str,
        price: f64,
    ) -> Value {
        let (status, body) = self
            .post(
                &format!("/foods/{}", manager.user_id),
                Some(&manager.token),
                json!({
                    "name": name,
                    "price": price,
                    "food_image": "https://img.example.com/food.png",
                    "menu_id": menu_id,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "food create failed: {body}");
        body
    }

    pub async fn create_table(&self, manager: &Session, table_number: i64) -> String {
        let (status, body) = self
            .post(
                &format!("/tables/{}", manager.user_id),
                Some(&manager.token),
                json!({ "number_of_guests": 4, "table_number": table_number }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "table create failed: {body}");
        body["id"].as_str().unwrap().to_string()
    }
}

/// Error code carried in an error envelope
pub fn error_code(body: &Value) -> u64 {
    body["code"].as_u64().unwrap_or_default()
}
