// Census API client: builds ACS 1-year query URLs and pulls the total
// population estimate out of the response. A single blocking GET per query,
// no timeout and no retries.

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::query::PopulationSource;

pub const DEFAULT_BASE_URL: &str = "https://api.census.gov/data";

/// Dataset path under the year segment.
pub const DATASET: &str = "acs/acs1";

/// ACS variable holding the total population estimate.
pub const POPULATION_VARIABLE: &str = "B01001_001E";

/// Blocking client for the census data API.
#[derive(Clone)]
pub struct CensusClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CensusClient {
    /// Create a client from resolved configuration. See `config::Config::load`.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(CensusClient {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// The query URL for `year` and a numeric state code.
    pub fn url(&self, year: &str, fips: &str) -> String {
        build_url(&self.base_url, year, fips, self.api_key.as_deref())
    }
}

impl PopulationSource for CensusClient {
    fn population(&self, year: &str, fips: &str) -> Result<String> {
        debug!(%year, %fips, "requesting population from census API");
        let res = self
            .client
            .get(self.url(year, fips))
            .send()
            .context("Failed to send census request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            bail!("Census request failed: {} - {}", status, txt.trim());
        }
        let body = res.text().context("Reading census response body")?;
        parse_population(&body)
    }
}

/// Build `{base}/{year}/acs/acs1?get=NAME,B01001_001E&for=state:{fips}`,
/// appending `&key=` only when a key is configured.
pub fn build_url(base_url: &str, year: &str, fips: &str, api_key: Option<&str>) -> String {
    let mut url = format!(
        "{}/{}/{}?get=NAME,{}&for=state:{}",
        base_url, year, DATASET, POPULATION_VARIABLE, fips
    );
    if let Some(key) = api_key {
        url.push_str("&key=");
        url.push_str(key);
    }
    url
}

/// Extract the population value from a census response body.
///
/// The API answers with a JSON table whose first row names the columns.
/// Bodies that are not a JSON table fall back to the flat layout: the fifth
/// comma-separated field with its surrounding quote characters removed.
pub fn parse_population(body: &str) -> Result<String> {
    match serde_json::from_str::<Vec<Vec<Value>>>(body) {
        Ok(table) => population_from_table(&table),
        Err(err) => {
            warn!("census response is not a JSON table ({err}), reading fifth field");
            population_from_fields(body)
        }
    }
}

fn population_from_table(table: &[Vec<Value>]) -> Result<String> {
    let (header, rows) = table
        .split_first()
        .context("Census response has no header row")?;
    let column = header
        .iter()
        .position(|name| name.as_str() == Some(POPULATION_VARIABLE))
        .with_context(|| format!("Census response has no {} column", POPULATION_VARIABLE))?;
    let row = match rows {
        [row] => row,
        [] => bail!("Census response has no data rows"),
        _ => bail!(
            "Census response has {} data rows, expected one state",
            rows.len()
        ),
    };
    match row.get(column) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => bail!("Unexpected population value in census response: {}", other),
        None => bail!("Census data row is shorter than its header"),
    }
}

fn population_from_fields(body: &str) -> Result<String> {
    let field = body
        .split(',')
        .nth(4)
        .context("Census response has fewer than five fields")?;
    let mut chars = field.chars();
    chars.next();
    chars.next_back();
    let population = chars.as_str();
    if population.is_empty() {
        bail!("Census response has an empty population field");
    }
    Ok(population.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    #[test]
    fn url_embeds_year_fips_and_key() {
        let url = build_url(DEFAULT_BASE_URL, "2019", "48", Some("abc123"));
        assert_eq!(
            url,
            "https://api.census.gov/data/2019/acs/acs1?get=NAME,B01001_001E&for=state:48&key=abc123"
        );
    }

    #[test]
    fn url_without_key_omits_parameter() {
        let url = build_url(DEFAULT_BASE_URL, "2010", "06", None);
        assert!(url.ends_with("/2010/acs/acs1?get=NAME,B01001_001E&for=state:06"));
        assert!(!url.contains("key="));
    }

    #[test]
    fn client_url_trims_trailing_slash() {
        let config = Config {
            api_key: Some("k".into()),
            base_url: "http://localhost:9000/data/".into(),
        };
        let client = CensusClient::new(&config).unwrap();
        assert_eq!(
            client.url("2019", "48"),
            "http://localhost:9000/data/2019/acs/acs1?get=NAME,B01001_001E&for=state:48&key=k"
        );
    }

    #[test]
    fn parses_json_table() {
        let body = r#"[["NAME","B01001_001E","state"],
["Texas","28995881","48"]]"#;
        assert_eq!(parse_population(body).unwrap(), "28995881");
    }

    #[test]
    fn json_column_order_does_not_matter() {
        let body = r#"[["state","B01001_001E","NAME"],["06",39512223,"California"]]"#;
        assert_eq!(parse_population(body).unwrap(), "39512223");
    }

    #[test]
    fn parses_flat_fields() {
        assert_eq!(parse_population(r#"X,Y,Z,W,"1234567""#).unwrap(), "1234567");
    }

    #[test]
    fn json_without_population_column_fails() {
        let body = r#"[["NAME","state"],["Texas","48"]]"#;
        let err = parse_population(body).unwrap_err();
        assert!(err.to_string().contains(POPULATION_VARIABLE));
    }

    #[test]
    fn json_with_several_states_fails() {
        let body = r#"[["NAME","B01001_001E","state"],
["Alabama","4903185","01"],
["Alaska","731545","02"]]"#;
        let err = parse_population(body).unwrap_err();
        assert!(err.to_string().contains("3 data rows"));
    }

    #[test]
    fn json_header_only_fails() {
        assert!(parse_population(r#"[["NAME","B01001_001E","state"]]"#).is_err());
    }

    #[test]
    fn error_payloads_fail() {
        assert!(parse_population("error: unknown/unsupported geography hierarchy").is_err());
        assert!(parse_population("").is_err());
    }

    /// Serve one canned HTTP response on a local port. The handle yields the
    /// request line the client sent.
    fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}/data", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            let mut line = String::new();
            while reader.read_line(&mut line).unwrap() > 2 {
                line.clear();
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            reader.get_mut().write_all(response.as_bytes()).unwrap();
            request_line.trim_end().to_string()
        });
        (base_url, handle)
    }

    fn client_for(base_url: String) -> CensusClient {
        CensusClient {
            client: Client::builder().no_proxy().build().unwrap(),
            base_url,
            api_key: Some("secret".into()),
        }
    }

    #[test]
    fn fetch_returns_population_from_json_table() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"[["NAME","B01001_001E","state"],["Texas","28995881","48"]]"#,
        );

        let population = client_for(base_url).population("2019", "48").unwrap();

        assert_eq!(population, "28995881");
        assert_eq!(
            server.join().unwrap(),
            "GET /data/2019/acs/acs1?get=NAME,B01001_001E&for=state:48&key=secret HTTP/1.1"
        );
    }

    #[test]
    fn fetch_reports_status_and_body_on_failure() {
        let (base_url, server) = serve_once(
            "400 Bad Request",
            "error: unknown/unsupported geography hierarchy",
        );

        let err = client_for(base_url).population("2019", "*").unwrap_err();
        server.join().unwrap();

        let message = err.to_string();
        assert!(message.contains("400"), "{message}");
        assert!(message.contains("unknown/unsupported geography"), "{message}");
    }
}
