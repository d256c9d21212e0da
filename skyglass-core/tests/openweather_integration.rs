//! Integration tests for OpenWeatherProvider and WeatherApp using wiremock.

use std::sync::Arc;

use skyglass_core::{
    Coordinates, FETCH_ERROR_MESSAGE, FetchError, FixedPosition, LocationQuery,
    NoLocationService, OpenWeatherProvider, WeatherApp, WeatherProvider,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn current_body(name: &str) -> serde_json::Value {
    serde_json::json!({
        "coord": { "lon": 13.41, "lat": 52.52 },
        "weather": [{ "id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d" }],
        "main": { "temp": 14.2, "feels_like": 13.5, "humidity": 71, "pressure": 1012 },
        "wind": { "speed": 4.6, "deg": 250 },
        "sys": { "country": "DE" },
        "name": name,
        "cod": 200
    })
}

/// 40 three-hourly entries from 2024-10-14 00:00, one noon per day.
fn forecast_body() -> serde_json::Value {
    let list: Vec<serde_json::Value> = (0..40)
        .map(|i| {
            let day = 14 + i / 8;
            let hour = (i % 8) * 3;
            serde_json::json!({
                "dt": 1728864000 + i * 10800,
                "dt_txt": format!("2024-10-{day:02} {hour:02}:00:00"),
                "main": { "temp": 10.0, "temp_min": 6.0 + i as f64, "temp_max": 12.0 + i as f64 },
                "weather": [{ "main": if hour == 12 { "Rain" } else { "Clouds" }, "description": "x" }]
            })
        })
        .collect();

    serde_json::json!({ "cod": "200", "cnt": 40, "list": list, "city": { "name": "Berlin", "country": "DE" } })
}

#[tokio::test]
async fn current_by_city_sends_expected_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Berlin"))
        .and(query_param("appid", "KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body("Berlin")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = OpenWeatherProvider::with_base_url("KEY", mock_server.uri());
    let weather = provider
        .current(&LocationQuery::City("Berlin".to_string()))
        .await
        .unwrap();

    assert_eq!(weather.city_name, "Berlin");
    assert_eq!(weather.country_code.as_deref(), Some("DE"));
    assert_eq!(weather.condition_main, "Clouds");
    assert_eq!(weather.description, "broken clouds");
    assert_eq!(weather.temperature_c, 14.2);
    assert_eq!(weather.humidity_pct, 71);
    assert_eq!(weather.wind_speed_ms, 4.6);
}

#[tokio::test]
async fn current_by_coordinates_sends_lat_lon() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "52.52"))
        .and(query_param("lon", "13.405"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body("Berlin")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = OpenWeatherProvider::with_base_url("KEY", mock_server.uri());
    let weather = provider
        .current(&LocationQuery::Coordinates(Coordinates::new(52.52, 13.405)))
        .await
        .unwrap();

    assert_eq!(weather.city_name, "Berlin");
}

#[tokio::test]
async fn missing_country_is_optional() {
    let mock_server = MockServer::start().await;
    let mut body = current_body("Open Sea");
    body.as_object_mut().unwrap().remove("sys");

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let provider = OpenWeatherProvider::with_base_url("KEY", mock_server.uri());
    let weather = provider
        .current(&LocationQuery::City("Open Sea".to_string()))
        .await
        .unwrap();

    assert_eq!(weather.country_code, None);
}

#[tokio::test]
async fn not_found_status_is_a_provider_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({ "cod": "404", "message": "city not found" })),
        )
        .mount(&mock_server)
        .await;

    let provider = OpenWeatherProvider::with_base_url("KEY", mock_server.uri());
    let err = provider
        .current(&LocationQuery::City("Nowhereville".to_string()))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Provider { ref cod, .. } if cod == "404"));
}

#[tokio::test]
async fn non_200_cod_fails_even_with_http_ok() {
    let mock_server = MockServer::start().await;
    let mut body = current_body("Berlin");
    body["cod"] = serde_json::json!(401);

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let provider = OpenWeatherProvider::with_base_url("KEY", mock_server.uri());
    let err = provider
        .current(&LocationQuery::City("Berlin".to_string()))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Provider { .. }));
}

#[tokio::test]
async fn non_json_body_is_a_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&mock_server)
        .await;

    let provider = OpenWeatherProvider::with_base_url("KEY", mock_server.uri());
    let err = provider
        .current(&LocationQuery::City("Berlin".to_string()))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Parse { .. }));
}

#[tokio::test]
async fn empty_weather_array_is_a_missing_field() {
    let mock_server = MockServer::start().await;
    let mut body = current_body("Berlin");
    body["weather"] = serde_json::json!([]);

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let provider = OpenWeatherProvider::with_base_url("KEY", mock_server.uri());
    let err = provider
        .current(&LocationQuery::City("Berlin".to_string()))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::MissingField { .. }));
}

#[tokio::test]
async fn forecast_parses_entries_in_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "Berlin"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&mock_server)
        .await;

    let provider = OpenWeatherProvider::with_base_url("KEY", mock_server.uri());
    let entries = provider.forecast("Berlin").await.unwrap();

    assert_eq!(entries.len(), 40);
    assert!(entries.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    assert_eq!(entries[4].condition_main, "Rain");
    assert_eq!(entries[4].temp_max_c, 16.0);
}

#[tokio::test]
async fn forecast_http_error_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({ "cod": "404", "message": "city not found" })),
        )
        .mount(&mock_server)
        .await;

    let provider = OpenWeatherProvider::with_base_url("KEY", mock_server.uri());
    let err = provider.forecast("Nowhereville").await.unwrap_err();

    assert!(matches!(err, FetchError::Http { .. }));
}

#[tokio::test]
async fn located_session_shows_weather_and_five_days() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "52.52"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body("Berlin")))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "Berlin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = Arc::new(OpenWeatherProvider::with_base_url("KEY", mock_server.uri()));
    let mut app = WeatherApp::new(provider, "Frankfurt");

    app.mount(&FixedPosition(Coordinates::new(52.52, 13.405))).await;
    app.settle().await;

    let state = app.state();
    assert_eq!(state.current().map(|w| w.city_name.as_str()), Some("Berlin"));
    assert_eq!(state.error(), None);

    let days = state.forecast();
    assert_eq!(days.len(), 5);
    for (i, day) in days.iter().enumerate() {
        assert_eq!(day.timestamp.format("%H:%M:%S").to_string(), "12:00:00");
        assert_eq!(day.timestamp.format("%d").to_string(), format!("{}", 14 + i));
        assert_eq!(day.condition_main, "Rain");
    }
}

#[tokio::test]
async fn fallback_city_not_found_shows_generic_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Frankfurt"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({ "cod": "404", "message": "city not found" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = Arc::new(OpenWeatherProvider::with_base_url("KEY", mock_server.uri()));
    let mut app = WeatherApp::new(provider, "Frankfurt");

    app.mount(&NoLocationService).await;
    app.settle().await;

    assert!(app.state().current().is_none());
    assert_eq!(app.state().error(), Some(FETCH_ERROR_MESSAGE));
    assert!(app.state().forecast().is_empty());
}
