use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use reqwest::{Client, StatusCode};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};

use super::{clip_to_window, HistoryPoint, HistoryProvider, ProviderError};
use crate::config::ProviderConfig;

/// Yahoo Finance chart response
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: ChartData,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    result: Option<Vec<ChartResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: Meta,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
    events: Option<Events>,
}

#[derive(Debug, Deserialize)]
struct Meta {
    /// Exchange offset from UTC in seconds; daily timestamps are shifted by it
    /// before taking the calendar date
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
    adjclose: Option<Vec<AdjClose>>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    close: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize)]
struct AdjClose {
    adjclose: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize)]
struct Events {
    dividends: Option<HashMap<String, DividendEvent>>,
}

#[derive(Debug, Deserialize)]
struct DividendEvent {
    amount: f64,
    date: i64,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

/// Daily price and dividend history from the Yahoo Finance chart API
#[derive(Debug, Clone)]
pub struct YahooProvider {
    client: Client,
    base_url: String,
    adjusted_close: bool,
}

impl YahooProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            adjusted_close: config.adjusted_close,
        })
    }

    fn history_url(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
        let period1 = start.and_hms_opt(0, 0, 0).map(|t| t.and_utc().timestamp());
        let period2 = end.and_hms_opt(23, 59, 59).map(|t| t.and_utc().timestamp());

        format!(
            "{}/{}?period1={}&period2={}&interval=1d&events=div",
            self.base_url,
            symbol.replace('^', "%5E"),
            period1.unwrap_or_default(),
            period2.unwrap_or_default()
        )
    }
}

fn local_date(timestamp: i64, gmtoffset: i64) -> Result<NaiveDate, ProviderError> {
    DateTime::from_timestamp(timestamp + gmtoffset, 0)
        .map(|t| t.date_naive())
        .ok_or_else(|| ProviderError::Parse(format!("invalid timestamp {}", timestamp)))
}

fn to_decimal(value: f64) -> Result<Decimal, ProviderError> {
    Decimal::from_f64(value).ok_or_else(|| ProviderError::Parse(format!("invalid number {}", value)))
}

/// Turn a chart API body into history points.
///
/// Rows without a close are skipped. Each dividend is attached to the first
/// price row on or after its date, so a distribution dated on a day without a
/// price row is not lost.
pub fn parse_chart_response(
    symbol: &str,
    body: &str,
    adjusted_close: bool,
) -> Result<Vec<HistoryPoint>, ProviderError> {
    let data: YahooChartResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))?;

    if let Some(error) = data.chart.error {
        if error.code.eq_ignore_ascii_case("Not Found") {
            return Err(ProviderError::NoData(symbol.to_string()));
        }
        return Err(ProviderError::Transport(format!(
            "Yahoo Finance API error: {} - {}",
            error.code, error.description
        )));
    }

    let Some(result) = data.chart.result.and_then(|r| r.into_iter().next()) else {
        return Err(ProviderError::NoData(symbol.to_string()));
    };
    let Some(timestamps) = result.timestamp else {
        return Err(ProviderError::NoData(symbol.to_string()));
    };
    let offset = result.meta.gmtoffset;

    let closes = if adjusted_close {
        result
            .indicators
            .adjclose
            .and_then(|a| a.into_iter().next())
            .and_then(|a| a.adjclose)
    } else {
        result
            .indicators
            .quote
            .into_iter()
            .next()
            .and_then(|q| q.close)
    };
    let closes = closes.ok_or_else(|| ProviderError::Parse("no close prices".to_string()))?;

    let mut dividends = result
        .events
        .and_then(|e| e.dividends)
        .unwrap_or_default()
        .into_values()
        .map(|event| Ok((local_date(event.date, offset)?, to_decimal(event.amount)?)))
        .collect::<Result<Vec<(NaiveDate, Decimal)>, ProviderError>>()?;
    dividends.sort_by_key(|(date, _)| *date);
    let mut pending = dividends.into_iter().peekable();

    let mut points = Vec::with_capacity(timestamps.len());
    for (i, &timestamp) in timestamps.iter().enumerate() {
        let date = local_date(timestamp, offset)?;
        let Some(close) = closes.get(i).copied().flatten() else {
            debug!("Skipping {} on {}: no close price", symbol, date);
            continue;
        };

        // Distributions dated before the first row belong to an earlier window
        if points.is_empty() {
            while pending.next_if(|(d, _)| *d < date).is_some() {}
        }
        let mut dividend = Decimal::ZERO;
        while let Some((_, amount)) = pending.next_if(|(d, _)| *d <= date) {
            dividend += amount;
        }

        points.push(HistoryPoint::new(date, to_decimal(close)?, dividend));
    }

    Ok(points)
}

#[async_trait]
impl HistoryProvider for YahooProvider {
    async fn fetch_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HistoryPoint>, ProviderError> {
        info!(
            "Fetching history for {} from {} to {} from Yahoo Finance",
            symbol, start, end
        );

        let response = self
            .client
            .get(self.history_url(symbol, start, end))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ProviderError::NoData(symbol.to_string()));
        }
        if !status.is_success() {
            return Err(ProviderError::Transport(format!(
                "Yahoo Finance returned error status: {}",
                status
            )));
        }

        let body = response.text().await?;
        let points = clip_to_window(
            parse_chart_response(symbol, &body, self.adjusted_close)?,
            start,
            end,
        );
        if points.is_empty() {
            return Err(ProviderError::NoData(symbol.to_string()));
        }

        debug!("Fetched {} history points for {}", points.len(), symbol);
        Ok(points)
    }
}
