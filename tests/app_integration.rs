use convertor::core::config::{AppConfig, FrankfurterProviderConfig};
use convertor::core::conversion::FETCH_FAILED_MESSAGE;
use std::fs;
use tracing::{error, info};

// Adds automatic logging to test
mod test_utils {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_mock_server(
        base: &str,
        amount: &str,
        symbol: &str,
        status: u16,
        mock_response: &str,
    ) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/latest"))
            .and(query_param("base", base))
            .and(query_param("amount", amount))
            .and(query_param("symbols", symbol))
            .respond_with(ResponseTemplate::new(status).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }
}

const EUR_RESPONSE: &str =
    r#"{"amount": 100.0, "base": "USD", "date": "2024-01-01", "rates": {"EUR": 92.3456789}}"#;

fn write_config(base_url: &str) -> tempfile::NamedTempFile {
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_content = format!(
        r#"
        providers:
          frankfurter:
            base_url: {base_url}
        defaults:
          from: "USD"
          to: "EUR"
        request_timeout_secs: 5
    "#
    );
    fs::write(config_file.path(), config_content).expect("Failed to write config file");
    config_file
}

fn config_for(base_url: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.providers.frankfurter = Some(FrankfurterProviderConfig {
        base_url: base_url.to_string(),
    });
    config
}

#[test_log::test(tokio::test)]
#[ignore = "requires network access"]
async fn test_real_frankfurter_api() {
    use convertor::core::CurrencyRateProvider;
    use convertor::providers::FrankfurterProvider;

    let provider = FrankfurterProvider::new("https://api.frankfurter.dev", None).unwrap();

    info!("Fetching USD->EUR from Frankfurter");
    match provider.fetch_quote("USD", 100.0, "EUR").await {
        Ok(quote) => {
            info!(?quote, "Received successful rate response");
            assert!(quote.rates["EUR"] > 0.0, "Converted amount should be positive");
        }
        Err(e) => {
            error!("Rate API request failed: {e}\n{e:?}");
            panic!("Rate API request failed: {e}");
        }
    }
}

#[test_log::test(tokio::test)]
async fn test_convert_command_with_mock() {
    let mock_server =
        test_utils::create_mock_server("USD", "100", "EUR", 200, EUR_RESPONSE).await;
    let config_file = write_config(&mock_server.uri());

    let result = convertor::run_command(
        convertor::AppCommand::Convert {
            amount: "100".to_string(),
            from: None,
            to: None,
            json: true,
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Convert failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_convert_command_surfaces_generic_message() {
    let mock_server = test_utils::create_mock_server("USD", "100", "EUR", 500, "").await;
    let config_file = write_config(&mock_server.uri());

    let result = convertor::run_command(
        convertor::AppCommand::Convert {
            amount: "100".to_string(),
            from: Some("usd".to_string()),
            to: Some("eur".to_string()),
            json: false,
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    let err = result.expect_err("HTTP 500 should fail the command");
    assert_eq!(err.to_string(), FETCH_FAILED_MESSAGE);
    assert!(!err.to_string().contains("500"));
}

#[test_log::test(tokio::test)]
async fn test_convert_command_rejects_invalid_amount_without_request() {
    let mock_server = wiremock::MockServer::start().await;
    let config_file = write_config(&mock_server.uri());

    let result = convertor::run_command(
        convertor::AppCommand::Convert {
            amount: "zero".to_string(),
            from: None,
            to: None,
            json: false,
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    assert!(result.is_err());
    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_interactive_session_flow() {
    let mock_server =
        test_utils::create_mock_server("USD", "100", "EUR", 200, EUR_RESPONSE).await;
    let mut controller = convertor::build_controller(&config_for(&mock_server.uri())).unwrap();

    let input = "amount 100,0\nfrom usd\n\nswap\nswap\nconvert\nquit\nto gbp\n";
    let mut out = Vec::new();
    convertor::cli::interactive::run(
        &mut controller,
        tokio::io::BufReader::new(input.as_bytes()),
        &mut out,
    )
    .await
    .unwrap();

    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("evgen4web Currency Convertor"));
    assert_eq!(output.matches("100 USD = 92.3457 EUR").count(), 2);
    assert!(output.contains("Rate date: 2024-01-01"));
    assert!(output.contains("From: EUR ⇄ To: usd"));
    assert_eq!(
        output
            .matches("Unlock a promotional rate on your first 3 transfers")
            .count(),
        1
    );
    // Nothing after `quit` is processed
    assert_eq!(controller.form().to, "EUR");
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 2);
}

#[test_log::test(tokio::test)]
async fn test_interactive_session_reports_errors() {
    let mock_server = test_utils::create_mock_server("USD", "5", "XYZ", 200, EUR_RESPONSE).await;
    let mut controller = convertor::build_controller(&config_for(&mock_server.uri())).unwrap();

    let input = "5 usd eu\n5 usd xyz\nfrobnicate\n";
    let mut out = Vec::new();
    convertor::cli::interactive::run(
        &mut controller,
        tokio::io::BufReader::new(input.as_bytes()),
        &mut out,
    )
    .await
    .unwrap();

    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("Currency codes must be 3 letters (e.g. USD, EUR)."));
    assert!(output.contains(FETCH_FAILED_MESSAGE));
    assert!(output.contains("Unknown command: frobnicate"));
    assert!(!output.contains("promotional rate"));
}

#[test_log::test(tokio::test)]
async fn test_interactive_session_survives_invalid_utf8() {
    let mock_server =
        test_utils::create_mock_server("USD", "100", "EUR", 200, EUR_RESPONSE).await;
    let mut controller = convertor::build_controller(&config_for(&mock_server.uri())).unwrap();

    let input: &[u8] = b"amount \xff\xfe\nshow\n100 usd eur\n";
    let mut out = Vec::new();
    convertor::cli::interactive::run(&mut controller, tokio::io::BufReader::new(input), &mut out)
        .await
        .expect("a bad line must not end the session");

    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("Amount: \u{FFFD}\u{FFFD}"));
    assert!(output.contains("100 USD = 92.3457 EUR"));
}

#[test_log::test(tokio::test)]
async fn test_convert_command_rejects_overlong_amount() {
    let mock_server = wiremock::MockServer::start().await;
    let config_file = write_config(&mock_server.uri());

    let result = convertor::run_command(
        convertor::AppCommand::Convert {
            amount: "12345678901234567".to_string(),
            from: Some("USD".to_string()),
            to: Some("EUR".to_string()),
            json: true,
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    let err = result.expect_err("an overlong amount must not be converted");
    assert_eq!(
        err.to_string(),
        convertor::core::conversion::INVALID_AMOUNT_MESSAGE
    );
    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
}
