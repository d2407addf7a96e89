//! View/set handler scenarios, called directly without a socket.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::Response;

use dynvar_core::Registry;
use dynvar_gateway::http::handle;

async fn call(reg: &Arc<Registry>, method: Method, query: &str) -> Response {
    let uri: Uri = format!("/vars?{query}").parse().unwrap();
    handle(State(Arc::clone(reg)), method, uri).await
}

async fn body(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn content_type(resp: &Response) -> &str {
    resp.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

#[tokio::test]
async fn batch_view_then_set() {
    let reg = Arc::new(Registry::new());
    let batch = reg.new_int(1000, "batch").unwrap();
    assert_eq!(batch.value(), 1000);

    let resp = call(&reg, Method::GET, "format=json").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(content_type(&resp), "application/json; charset=utf-8");
    assert_eq!(body(resp).await, "{\n\"batch\": 1000\n}\n");

    let resp = call(&reg, Method::POST, "name=batch&value=123").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body(resp).await, "");
    assert_eq!(batch.value(), 123);

    let resp = call(&reg, Method::POST, "name=batch&value=notanumber").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(batch.value(), 123);

    let resp = call(&reg, Method::POST, "name=unknown&value=5").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_params_are_bad_requests() {
    let reg = Arc::new(Registry::new());
    reg.new_int(1, "n").unwrap();

    for query in ["", "name=n", "value=2", "name=&value=2", "name=n&value="] {
        let resp = call(&reg, Method::POST, query).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{query}");
        assert_eq!(body(resp).await, "");
    }
    assert_eq!(reg.get("n").unwrap().render(), "1");
}

#[tokio::test]
async fn default_format_is_json_and_sorted() {
    let reg = Arc::new(Registry::new());
    reg.new_float(0.5, "ratio").unwrap();
    reg.new_int(-3, "alpha").unwrap();
    reg.new_string("x", "mode").unwrap();

    let resp = call(&reg, Method::GET, "").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let text = body(resp).await;
    assert_eq!(text, "{\n\"alpha\": -3,\n\"mode\": \"x\",\n\"ratio\": 0.5\n}\n");

    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed["ratio"], 0.5);
}

#[tokio::test]
async fn text_format() {
    let reg = Arc::new(Registry::new());
    reg.new_int(2, "b").unwrap();
    reg.new_string("v", "a").unwrap();

    let resp = call(&reg, Method::GET, "format=text").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(content_type(&resp), "text/plain; charset=utf-8");
    assert_eq!(body(resp).await, "a: \"v\",\nb: 2");
}

#[tokio::test]
async fn unknown_format_names_the_value() {
    let reg = Arc::new(Registry::new());
    let resp = call(&reg, Method::GET, "format=xml").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body(resp).await, "unknown format: \"xml\" (want 'json' or 'text'\n");
}

#[tokio::test]
async fn string_set_is_literal_and_view_escapes() {
    let reg = Arc::new(Registry::new());
    let label = reg.new_string("hello \"world\"", "label").unwrap();

    let resp = call(&reg, Method::GET, "").await;
    assert!(body(resp).await.contains(r#""label": "hello \"world\"""#));

    let resp = call(&reg, Method::POST, "name=label&value=raw").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(&*label.value(), "raw");

    let resp = call(&reg, Method::POST, "name=label&value=%22q%22").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(&*label.value(), "\"q\"");

    let resp = call(&reg, Method::GET, "").await;
    assert_eq!(body(resp).await, "{\n\"label\": \"\\\"q\\\"\"\n}\n");
}

#[tokio::test]
async fn other_methods_not_allowed() {
    let reg = Arc::new(Registry::new());
    for m in [Method::PUT, Method::DELETE, Method::PATCH] {
        for query in ["", "format=a&format=b", "name=n&value=1"] {
            let resp = call(&reg, m.clone(), query).await;
            assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED, "{m} ?{query}");
            assert_eq!(resp.headers().get(header::ALLOW).unwrap(), "GET, POST");
        }
    }
}

#[tokio::test]
async fn repeated_query_keys_use_first_value() {
    let reg = Arc::new(Registry::new());
    let batch = reg.new_int(1000, "batch").unwrap();

    let resp = call(&reg, Method::POST, "name=batch&value=5&value=6").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body(resp).await, "");
    assert_eq!(batch.value(), 5);

    let resp = call(&reg, Method::POST, "name=batch&value=x&value=7").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body(resp).await, "");
    assert_eq!(batch.value(), 5);

    let resp = call(&reg, Method::GET, "format=json&format=text").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body(resp).await, "{\n\"batch\": 5\n}\n");

    let resp = call(&reg, Method::GET, "format=text&format=xml").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body(resp).await, "batch: 5");
}

#[tokio::test]
async fn whole_number_floats_render_without_fraction() {
    let reg = Arc::new(Registry::new());
    let ratio = reg.new_float(3.0, "ratio").unwrap();
    reg.new_float(1000.0, "size").unwrap();

    let resp = call(&reg, Method::GET, "").await;
    assert_eq!(body(resp).await, "{\n\"ratio\": 3,\n\"size\": 1000\n}\n");

    let resp = call(&reg, Method::POST, "name=ratio&value=1e21").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(ratio.value(), 1e21);

    let resp = call(&reg, Method::GET, "format=text").await;
    assert_eq!(body(resp).await, "ratio: 1e+21,\nsize: 1000");
}
