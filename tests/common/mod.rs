#![allow(dead_code)]

use actix_web::{body::MessageBody, dev::ServiceResponse, test};
use anyhow::Result;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tempfile::TempDir;

use tiptrack::database::init_database;
use tiptrack::handlers::shared::ApiResponse;
use tiptrack::{AppState, Config};

/// Isolated store in a temporary SQLite file, removed on drop.
pub struct TestContext {
    pub state: AppState,
    pub config: Config,
    _temp_dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let database_url = format!("sqlite:{}/test.db", temp_dir.path().display());
        let pool = init_database(&database_url).await?;

        let mut config = Config::test_config()?;
        config.database_url = database_url;

        Ok(TestContext {
            state: AppState::new(pool),
            config,
            _temp_dir: temp_dir,
        })
    }
}

pub fn setup_test_env() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn shift_payload(date: &str, hours: f64, cash: f64, credit: f64, tip_out: f64) -> Value {
    json!({
        "date": date,
        "hoursWorked": hours,
        "cashTips": cash,
        "creditTips": credit,
        "tipOut": tip_out,
    })
}

/// Unwraps the `data` field of a successful API response.
pub async fn read_data<T, B>(resp: ServiceResponse<B>) -> T
where
    T: DeserializeOwned,
    B: MessageBody,
{
    let body: ApiResponse<T> = test::read_body_json(resp).await;
    assert!(body.success, "expected a successful response");
    body.data.expect("response carries data")
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

pub fn approx_value(value: &Value, expected: f64) -> bool {
    value.as_f64().is_some_and(|v| approx(v, expected))
}
