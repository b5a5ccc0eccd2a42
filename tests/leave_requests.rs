use actix_web::http::StatusCode;
use actix_web::middleware::NormalizePath;
use actix_web::{App, test, web::Data};
use serde_json::{Value, json};

use hrleave::routes;

mod common;

fn submit_payload(leave_type_id: i64, start: &str, end: &str, num_days: f64) -> Value {
    json!({
        "leave_type_id": leave_type_id,
        "start_date": start,
        "end_date": end,
        "num_days": num_days,
        "reason": "family trip"
    })
}

#[actix_web::test]
async fn submit_then_approve_consumes_balance() {
    let pool = common::test_pool().await;
    let cfg = common::test_config();
    let app = test::init_service(
        App::new()
            .wrap(NormalizePath::trim())
            .app_data(Data::new(pool.clone()))
            .app_data(Data::new(cfg.clone()))
            .configure(|c| routes::configure(c, cfg.clone())),
    )
    .await;
    let erin = common::employee_token(&cfg, "U-E1", "E1");
    let hr = common::hr_token(&cfg);

    let type_id = common::seed_type(&pool, "Vacation").await;
    common::seed_balance(&pool, "E1", type_id, 2024, 20.0).await;

    let resp = test::call_service(
        &app,
        common::post("/leave/requests", &erin)
            .set_json(submit_payload(type_id, "2024-07-01", "2024-07-03", 3.0))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["status"], json!("pending"));
    assert_eq!(created["employee_id"], json!("E1"));
    assert_eq!(created["num_days"], json!(3.0));
    assert_eq!(created["approved_by_id"], Value::Null);
    assert_eq!(created["processed_date"], Value::Null);
    assert!(created["request_date"].as_str().is_some());
    let id = created["id"].as_i64().unwrap();

    let resp = test::call_service(
        &app,
        common::patch(&format!("/leave/requests/{id}/status"), &hr)
            .set_json(json!({"status": "approved", "comments": "enjoy"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let approved: Value = test::read_body_json(resp).await;
    assert_eq!(approved["status"], json!("approved"));
    assert_eq!(approved["approved_by_id"], json!("U-HR"));
    assert_eq!(approved["comments"], json!("enjoy"));
    assert!(approved["processed_date"].as_str().is_some());

    assert_eq!(common::used_days(&pool, "E1", type_id, 2024).await, 3.0);

    // the balance read API agrees
    let balances: Value = test::call_and_read_body_json(
        &app,
        common::get("/leave/balances/employee/E1?year=2024", &hr).to_request(),
    )
    .await;
    assert_eq!(balances[0]["used_days"], json!(3.0));
}

#[actix_web::test]
async fn cancelling_an_approved_request_restores_balance() {
    let pool = common::test_pool().await;
    let cfg = common::test_config();
    let app = test::init_service(
        App::new()
            .wrap(NormalizePath::trim())
            .app_data(Data::new(pool.clone()))
            .app_data(Data::new(cfg.clone()))
            .configure(|c| routes::configure(c, cfg.clone())),
    )
    .await;
    let erin = common::employee_token(&cfg, "U-E1", "E1");
    let hr = common::hr_token(&cfg);

    let type_id = common::seed_type(&pool, "Vacation").await;
    common::seed_balance(&pool, "E1", type_id, 2024, 20.0).await;

    let created: Value = test::call_and_read_body_json(
        &app,
        common::post("/leave/requests", &erin)
            .set_json(submit_payload(type_id, "2024-07-01", "2024-07-03", 3.0))
            .to_request(),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    for (status, expected_used) in [("approved", 3.0), ("cancelled", 0.0)] {
        let resp = test::call_service(
            &app,
            common::patch(&format!("/leave/requests/{id}/status"), &hr)
                .set_json(json!({"status": status}))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            common::used_days(&pool, "E1", type_id, 2024).await,
            expected_used
        );
    }
}

#[actix_web::test]
async fn repeat_approval_is_idempotent_and_reject_compensates() {
    let pool = common::test_pool().await;
    let cfg = common::test_config();
    let app = test::init_service(
        App::new()
            .wrap(NormalizePath::trim())
            .app_data(Data::new(pool.clone()))
            .app_data(Data::new(cfg.clone()))
            .configure(|c| routes::configure(c, cfg.clone())),
    )
    .await;
    let erin = common::employee_token(&cfg, "U-E1", "E1");
    let hr = common::hr_token(&cfg);

    let type_id = common::seed_type(&pool, "Vacation").await;
    common::seed_balance(&pool, "E1", type_id, 2024, 20.0).await;

    let created: Value = test::call_and_read_body_json(
        &app,
        common::post("/leave/requests", &erin)
            .set_json(submit_payload(type_id, "2024-08-05", "2024-08-09", 5.0))
            .to_request(),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let resp = test::call_service(
        &app,
        common::patch(&format!("/leave/requests/{id}/status"), &hr)
            .set_json(json!({"status": "approved"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(common::used_days(&pool, "E1", type_id, 2024).await, 5.0);

    // approving an approved request changes nothing
    let resp = test::call_service(
        &app,
        common::patch(&format!("/leave/requests/{id}/status"), &hr)
            .set_json(json!({"status": "approved"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], json!("approved"));
    assert_eq!(common::used_days(&pool, "E1", type_id, 2024).await, 5.0);

    // post-approval rejection gives the days back
    let resp = test::call_service(
        &app,
        common::patch(&format!("/leave/requests/{id}/status"), &hr)
            .set_json(json!({"status": "rejected"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(common::used_days(&pool, "E1", type_id, 2024).await, 0.0);
}

#[actix_web::test]
async fn approval_without_balance_row_skips_balance_write() {
    let pool = common::test_pool().await;
    let cfg = common::test_config();
    let app = test::init_service(
        App::new()
            .wrap(NormalizePath::trim())
            .app_data(Data::new(pool.clone()))
            .app_data(Data::new(cfg.clone()))
            .configure(|c| routes::configure(c, cfg.clone())),
    )
    .await;
    let erin = common::employee_token(&cfg, "U-E1", "E1");
    let hr = common::hr_token(&cfg);

    let type_id = common::seed_type(&pool, "Unpaid").await;

    let created: Value = test::call_and_read_body_json(
        &app,
        common::post("/leave/requests", &erin)
            .set_json(submit_payload(type_id, "2024-07-01", "2024-07-03", 3.0))
            .to_request(),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let resp = test::call_service(
        &app,
        common::patch(&format!("/leave/requests/{id}/status"), &hr)
            .set_json(json!({"status": "approved"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], json!("approved"));

    // no balance row was created or written
    let balances: Value = test::call_and_read_body_json(
        &app,
        common::get("/leave/balances/employee/E1", &hr).to_request(),
    )
    .await;
    assert_eq!(balances.as_array().unwrap().len(), 0);
}

#[actix_web::test]
async fn rejecting_a_pending_request_leaves_balance_untouched() {
    let pool = common::test_pool().await;
    let cfg = common::test_config();
    let app = test::init_service(
        App::new()
            .wrap(NormalizePath::trim())
            .app_data(Data::new(pool.clone()))
            .app_data(Data::new(cfg.clone()))
            .configure(|c| routes::configure(c, cfg.clone())),
    )
    .await;
    let erin = common::employee_token(&cfg, "U-E1", "E1");
    let hr = common::hr_token(&cfg);

    let type_id = common::seed_type(&pool, "Vacation").await;
    common::seed_balance(&pool, "E1", type_id, 2024, 20.0).await;

    let created: Value = test::call_and_read_body_json(
        &app,
        common::post("/leave/requests", &erin)
            .set_json(submit_payload(type_id, "2024-07-01", "2024-07-03", 3.0))
            .to_request(),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let resp = test::call_service(
        &app,
        common::patch(&format!("/leave/requests/{id}/status"), &hr)
            .set_json(json!({"status": "rejected", "comments": "coverage gap"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(common::used_days(&pool, "E1", type_id, 2024).await, 0.0);
}

#[actix_web::test]
async fn submit_validation_failures() {
    let pool = common::test_pool().await;
    let cfg = common::test_config();
    let app = test::init_service(
        App::new()
            .wrap(NormalizePath::trim())
            .app_data(Data::new(pool.clone()))
            .app_data(Data::new(cfg.clone()))
            .configure(|c| routes::configure(c, cfg.clone())),
    )
    .await;
    let erin = common::employee_token(&cfg, "U-E1", "E1");

    let type_id = common::seed_type(&pool, "Vacation").await;

    // inverted dates
    let resp = test::call_service(
        &app,
        common::post("/leave/requests", &erin)
            .set_json(submit_payload(type_id, "2024-07-03", "2024-07-01", 3.0))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // non-positive num_days
    let resp = test::call_service(
        &app,
        common::post("/leave/requests", &erin)
            .set_json(submit_payload(type_id, "2024-07-01", "2024-07-03", 0.0))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // unknown leave type
    let resp = test::call_service(
        &app,
        common::post("/leave/requests", &erin)
            .set_json(submit_payload(999, "2024-07-01", "2024-07-03", 3.0))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // elevated callers without an employee profile cannot submit
    let hr = common::hr_token(&cfg);
    let resp = test::call_service(
        &app,
        common::post("/leave/requests", &hr)
            .set_json(submit_payload(type_id, "2024-07-01", "2024-07-03", 3.0))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn status_transition_authorization() {
    let pool = common::test_pool().await;
    let cfg = common::test_config();
    let app = test::init_service(
        App::new()
            .wrap(NormalizePath::trim())
            .app_data(Data::new(pool.clone()))
            .app_data(Data::new(cfg.clone()))
            .configure(|c| routes::configure(c, cfg.clone())),
    )
    .await;
    let erin = common::employee_token(&cfg, "U-E1", "E1");
    let evan = common::employee_token(&cfg, "U-E2", "E2");
    let hr = common::hr_token(&cfg);

    let type_id = common::seed_type(&pool, "Vacation").await;
    common::seed_balance(&pool, "E1", type_id, 2024, 20.0).await;

    let created: Value = test::call_and_read_body_json(
        &app,
        common::post("/leave/requests", &erin)
            .set_json(submit_payload(type_id, "2024-07-01", "2024-07-03", 3.0))
            .to_request(),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    // employees cannot approve
    let resp = test::call_service(
        &app,
        common::patch(&format!("/leave/requests/{id}/status"), &erin)
            .set_json(json!({"status": "approved"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // a different employee cannot cancel a foreign request
    let resp = test::call_service(
        &app,
        common::patch(&format!("/leave/requests/{id}/status"), &evan)
            .set_json(json!({"status": "cancelled"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // the subject may cancel their own pending request
    let resp = test::call_service(
        &app,
        common::patch(&format!("/leave/requests/{id}/status"), &erin)
            .set_json(json!({"status": "cancelled"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], json!("cancelled"));

    // but not their own approved one
    let created: Value = test::call_and_read_body_json(
        &app,
        common::post("/leave/requests", &erin)
            .set_json(submit_payload(type_id, "2024-08-01", "2024-08-02", 2.0))
            .to_request(),
    )
    .await;
    let id = created["id"].as_i64().unwrap();
    let resp = test::call_service(
        &app,
        common::patch(&format!("/leave/requests/{id}/status"), &hr)
            .set_json(json!({"status": "approved"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = test::call_service(
        &app,
        common::patch(&format!("/leave/requests/{id}/status"), &erin)
            .set_json(json!({"status": "cancelled"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn forbidden_transitions_conflict() {
    let pool = common::test_pool().await;
    let cfg = common::test_config();
    let app = test::init_service(
        App::new()
            .wrap(NormalizePath::trim())
            .app_data(Data::new(pool.clone()))
            .app_data(Data::new(cfg.clone()))
            .configure(|c| routes::configure(c, cfg.clone())),
    )
    .await;
    let erin = common::employee_token(&cfg, "U-E1", "E1");
    let hr = common::hr_token(&cfg);

    let type_id = common::seed_type(&pool, "Vacation").await;

    let created: Value = test::call_and_read_body_json(
        &app,
        common::post("/leave/requests", &erin)
            .set_json(submit_payload(type_id, "2024-07-01", "2024-07-03", 3.0))
            .to_request(),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let resp = test::call_service(
        &app,
        common::patch(&format!("/leave/requests/{id}/status"), &hr)
            .set_json(json!({"status": "cancelled"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    // cancelled is terminal
    let resp = test::call_service(
        &app,
        common::patch(&format!("/leave/requests/{id}/status"), &hr)
            .set_json(json!({"status": "approved"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // unknown status strings fail validation
    let resp = test::call_service(
        &app,
        common::patch(&format!("/leave/requests/{id}/status"), &hr)
            .set_json(json!({"status": "granted"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // unknown request id
    let resp = test::call_service(
        &app,
        common::patch("/leave/requests/999/status", &hr)
            .set_json(json!({"status": "approved"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn request_reads_and_lists() {
    let pool = common::test_pool().await;
    let cfg = common::test_config();
    let app = test::init_service(
        App::new()
            .wrap(NormalizePath::trim())
            .app_data(Data::new(pool.clone()))
            .app_data(Data::new(cfg.clone()))
            .configure(|c| routes::configure(c, cfg.clone())),
    )
    .await;
    let erin = common::employee_token(&cfg, "U-E1", "E1");
    let evan = common::employee_token(&cfg, "U-E2", "E2");
    let hr = common::hr_token(&cfg);

    let type_id = common::seed_type(&pool, "Vacation").await;

    let first: Value = test::call_and_read_body_json(
        &app,
        common::post("/leave/requests", &erin)
            .set_json(submit_payload(type_id, "2024-07-01", "2024-07-03", 3.0))
            .to_request(),
    )
    .await;
    let second: Value = test::call_and_read_body_json(
        &app,
        common::post("/leave/requests", &erin)
            .set_json(submit_payload(type_id, "2024-09-02", "2024-09-06", 5.0))
            .to_request(),
    )
    .await;
    let first_id = first["id"].as_i64().unwrap();
    let second_id = second["id"].as_i64().unwrap();

    // subject and elevated callers may read; others may not
    let resp = test::call_service(
        &app,
        common::get(&format!("/leave/requests/{first_id}"), &erin).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = test::call_service(
        &app,
        common::get(&format!("/leave/requests/{first_id}"), &hr).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = test::call_service(
        &app,
        common::get(&format!("/leave/requests/{first_id}"), &evan).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = test::call_service(&app, common::get("/leave/requests/999", &hr).to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // own history is newest first
    let mine: Value =
        test::call_and_read_body_json(&app, common::get("/leave/requests/my", &erin).to_request())
            .await;
    let mine = mine.as_array().unwrap();
    assert_eq!(mine.len(), 2);
    assert_eq!(mine[0]["id"].as_i64().unwrap(), second_id);
    assert_eq!(mine[1]["id"].as_i64().unwrap(), first_id);

    // the filtered list needs a filter
    let resp = test::call_service(&app, common::get("/leave/requests", &hr).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // status queue is oldest first
    let queue: Value = test::call_and_read_body_json(
        &app,
        common::get("/leave/requests?status_filter=pending", &hr).to_request(),
    )
    .await;
    let queue = queue.as_array().unwrap();
    assert_eq!(queue.len(), 2);
    assert_eq!(queue[0]["id"].as_i64().unwrap(), first_id);
    assert_eq!(queue[1]["id"].as_i64().unwrap(), second_id);

    // employee-scoped filter, and it is elevated-only
    let by_employee: Value = test::call_and_read_body_json(
        &app,
        common::get("/leave/requests?employee_id=E1", &hr).to_request(),
    )
    .await;
    assert_eq!(by_employee.as_array().unwrap().len(), 2);
    let resp = test::call_service(
        &app,
        common::get("/leave/requests?employee_id=E1", &erin).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
