//! Front-end export
//!
//! Renders a configuration record under the key names the dashboard reads at
//! runtime (`modulePrefix`, `APP.ApiUrl`, ...).

use crate::schema::Config;
use serde_json::{json, Map, Value};
use types::Result;

/// Render the record as the JSON object embedded into the dashboard build
pub fn to_ember_json(config: &Config) -> Value {
    let app = &config.app;

    let mut app_json = Map::new();
    app_json.insert("ApiUrl".to_string(), json!(app.api_url));
    app_json.insert("HttpHost".to_string(), json!(app.http_host));
    app_json.insert("HttpPort".to_string(), json!(app.http_port));
    app_json.insert("StratumHost".to_string(), json!(app.stratum_host));
    app_json.insert("StratumPort".to_string(), json!(app.stratum_port));
    app_json.insert("PoolFee".to_string(), json!(app.pool_fee));
    app_json.insert("PayoutThreshold".to_string(), json!(app.payout_threshold));
    app_json.insert("BlockTime".to_string(), json!(app.block_time));
    app_json.insert("AnalyticsCode".to_string(), json!(app.analytics_code));

    let toggles = [
        ("LOG_RESOLVER", app.log_resolver),
        ("LOG_ACTIVE_GENERATION", app.log_active_generation),
        ("LOG_TRANSITIONS", app.log_transitions),
        ("LOG_TRANSITIONS_INTERNAL", app.log_transitions_internal),
        ("LOG_VIEW_LOOKUPS", app.log_view_lookups),
    ];
    for (key, value) in toggles {
        if let Some(enabled) = value {
            app_json.insert(key.to_string(), json!(enabled));
        }
    }

    if let Some(ref root_element) = app.root_element {
        app_json.insert("rootElement".to_string(), json!(root_element));
    }

    json!({
        "modulePrefix": config.module_prefix,
        "environment": config.environment.as_str(),
        "baseURL": config.base_url,
        "locationType": config.location_type.as_str(),
        "EmberENV": {
            "FEATURES": config.features,
        },
        "APP": Value::Object(app_json),
    })
}

/// Render the front-end object as pretty-printed JSON
pub fn to_ember_string(config: &Config) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_ember_json(config))?)
}
