use actix_web::{App, http::StatusCode, test};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tiptrack::database::models::ShiftInput;
use tiptrack::services::calculation::PaycheckPreview;

mod common;

use common::{TestContext, approx, approx_value, read_data, shift_payload};

async fn seed(ctx: &TestContext, shifts: &[Value]) {
    for shift in shifts {
        let input: ShiftInput = serde_json::from_value(shift.clone()).unwrap();
        ctx.state.shift_repository.save_shift(input).await.unwrap();
    }
}

fn march_shifts() -> Vec<Value> {
    vec![
        // Previous week (Sun 2025-02-23 .. Sat 2025-03-01)
        shift_payload("2025-02-24", 6.0, 20.0, 20.0, 0.0),
        shift_payload("2025-02-28", 8.0, 50.0, 60.0, 0.0),
        // Current week (Sun 2025-03-02 .. Sat 2025-03-08)
        shift_payload("2025-03-03", 5.0, 40.0, 0.0, 0.0),
        shift_payload("2025-03-04", 6.0, 30.0, 30.0, 10.0),
        shift_payload("2025-03-07", 8.0, 50.0, 100.0, 20.0),
        // Following week
        shift_payload("2025-03-10", 4.0, 10.0, 10.0, 0.0),
    ]
}

#[actix_web::test]
async fn test_paycheck_preview_with_no_shifts_is_zero() {
    common::setup_test_env();
    let ctx = TestContext::new().await.unwrap();
    let app = test::init_service(App::new().configure(|cfg| ctx.state.configure(cfg))).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/summary/paycheck")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let preview: PaycheckPreview = read_data(resp).await;
    assert_eq!(preview.summary.total_shifts, 0);
    assert_eq!(preview.summary.gross_earnings, 0.0);
    assert_eq!(preview.taxes.total_tax, 0.0);
    assert_eq!(preview.breakdown.total_take_home, 0.0);
    assert_eq!(preview.averages.tips_per_shift, 0.0);
    assert_eq!(preview.averages.effective_hourly_rate, 0.0);
}

#[actix_web::test]
async fn test_paycheck_preview_over_date_range() {
    let ctx = TestContext::new().await.unwrap();
    let app = test::init_service(App::new().configure(|cfg| ctx.state.configure(cfg))).await;
    seed(&ctx, &march_shifts()).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/summary/paycheck?start=2025-03-02&end=2025-03-08")
        .to_request();
    let preview: PaycheckPreview = read_data(test::call_service(&app, req).await).await;

    assert_eq!(preview.summary.total_shifts, 3);
    assert!(approx(preview.summary.total_hours, 19.0));
    assert!(approx(preview.summary.total_cash_tips, 120.0));
    assert!(approx(preview.summary.total_credit_tips, 130.0));
    assert!(approx(preview.summary.net_tips, 220.0));
    assert!(approx(
        preview.summary.gross_earnings,
        preview.summary.net_tips + preview.summary.hourly_earnings
    ));
}

#[actix_web::test]
async fn test_week_summary_for_current_and_previous_week() {
    let ctx = TestContext::new().await.unwrap();
    let app = test::init_service(App::new().configure(|cfg| ctx.state.configure(cfg))).await;
    seed(&ctx, &march_shifts()).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/summary/week?date=2025-03-05")
        .to_request();
    let body: Value = read_data(test::call_service(&app, req).await).await;

    assert_eq!(body["week"], json!({ "start": "2025-03-02", "end": "2025-03-08" }));
    let summary = &body["summary"];
    assert_eq!(summary["summary"]["totalShifts"], json!(3));
    assert_eq!(summary["byDay"].as_array().unwrap().len(), 3);
    // Fri nets 130, Tue 50, Mon 40
    assert_eq!(summary["bestDay"]["day"], json!("Fri"));
    assert_eq!(summary["worstDay"]["day"], json!("Mon"));
    assert!(approx_value(&summary["bestDay"]["avgTips"], 130.0));

    let req = test::TestRequest::get()
        .uri("/api/v1/summary/week?date=2025-03-05&offset=-1")
        .to_request();
    let body: Value = read_data(test::call_service(&app, req).await).await;
    assert_eq!(body["week"]["start"], json!("2025-02-23"));
    assert_eq!(body["summary"]["summary"]["totalShifts"], json!(2));
}

#[actix_web::test]
async fn test_week_summary_rejects_future_offset() {
    let ctx = TestContext::new().await.unwrap();
    let app = test::init_service(App::new().configure(|cfg| ctx.state.configure(cfg))).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/summary/week?offset=1")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[actix_web::test]
async fn test_week_offsets_past_the_calendar_are_rejected() {
    let ctx = TestContext::new().await.unwrap();
    let app = test::init_service(App::new().configure(|cfg| ctx.state.configure(cfg))).await;

    for uri in [
        "/api/v1/summary/week?offset=-100000000000",
        "/api/v1/summary/trends?offset=-100000000000",
        "/api/v1/summary/week?offset=-9223372036854775808",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["message"].as_str().unwrap().ends_with("Date out of range"));
    }
}

#[actix_web::test]
async fn test_week_summary_honours_week_start_setting() {
    let ctx = TestContext::new().await.unwrap();
    let app = test::init_service(App::new().configure(|cfg| ctx.state.configure(cfg))).await;
    seed(&ctx, &march_shifts()).await;

    let req = test::TestRequest::patch()
        .uri("/api/v1/settings")
        .set_json(json!({ "weekStartsOn": 1 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    // Sunday 2025-03-09 closes the week that began Monday 2025-03-03
    let req = test::TestRequest::get()
        .uri("/api/v1/summary/week?date=2025-03-09")
        .to_request();
    let body: Value = read_data(test::call_service(&app, req).await).await;
    assert_eq!(body["week"], json!({ "start": "2025-03-03", "end": "2025-03-09" }));
    assert_eq!(body["summary"]["summary"]["totalShifts"], json!(3));
}

#[actix_web::test]
async fn test_trends_compare_with_previous_week() {
    let ctx = TestContext::new().await.unwrap();
    let app = test::init_service(App::new().configure(|cfg| ctx.state.configure(cfg))).await;
    seed(&ctx, &march_shifts()).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/summary/trends?date=2025-03-05")
        .to_request();
    let body: Value = read_data(test::call_service(&app, req).await).await;

    assert_eq!(body["currentWeek"]["start"], json!("2025-03-02"));
    assert_eq!(body["previousWeek"]["start"], json!("2025-02-23"));

    let changes = &body["trends"]["changes"];
    // Net tips 220 vs 150, hours 19 vs 14
    assert!(approx_value(&changes["netTips"], (220.0 - 150.0) / 150.0 * 100.0));
    assert!(approx_value(&changes["totalHours"], (19.0 - 14.0) / 14.0 * 100.0));
}

#[actix_web::test]
async fn test_trends_from_empty_previous_week() {
    let ctx = TestContext::new().await.unwrap();
    let app = test::init_service(App::new().configure(|cfg| ctx.state.configure(cfg))).await;
    seed(&ctx, &[shift_payload("2025-03-04", 5.0, 30.0, 0.0, 0.0)]).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/summary/trends?date=2025-03-05")
        .to_request();
    let body: Value = read_data(test::call_service(&app, req).await).await;

    let changes = &body["trends"]["changes"];
    assert_eq!(changes["netTips"], json!(100.0));
    assert_eq!(changes["grossEarnings"], json!(100.0));
}

#[actix_web::test]
async fn test_dashboard() {
    let ctx = TestContext::new().await.unwrap();
    let app = test::init_service(App::new().configure(|cfg| ctx.state.configure(cfg))).await;
    seed(&ctx, &march_shifts()).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/summary/dashboard?date=2025-03-07")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = read_data(resp).await;

    assert_eq!(body["today"], json!("2025-03-07"));
    assert_eq!(body["todayShift"]["date"], json!("2025-03-07"));
    assert!(approx_value(&body["todayEarnings"]["netTips"], 130.0));

    let recent = body["recentShifts"].as_array().unwrap();
    assert_eq!(recent.len(), 5);
    assert_eq!(recent[0]["date"], json!("2025-03-10"));
    assert_eq!(recent[4]["date"], json!("2025-02-28"));

    assert_eq!(body["weekSummary"]["summary"]["totalShifts"], json!(3));
    assert_eq!(body["allTime"]["summary"]["totalShifts"], json!(6));
    assert!(body["highlights"]["takeHome"].as_str().unwrap().starts_with('$'));
    assert_eq!(body["highlights"]["hours"], json!("19h"));
}

#[actix_web::test]
async fn test_dashboard_without_shift_today() {
    let ctx = TestContext::new().await.unwrap();
    let app = test::init_service(App::new().configure(|cfg| ctx.state.configure(cfg))).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/summary/dashboard?date=2025-03-07")
        .to_request();
    let body: Value = read_data(test::call_service(&app, req).await).await;

    assert_eq!(body["todayShift"], Value::Null);
    assert_eq!(body["recentShifts"], json!([]));
    assert_eq!(body["weekSummary"]["bestDay"], Value::Null);
    assert_eq!(body["highlights"]["takeHome"], json!("$0.00"));
}
