//! Chart-analysis prompt building.

use crate::domain::coin::CoinDetail;
use crate::domain::market_chart::{MarketChart, TimeSeries};
use crate::shared::fmt::num;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How many trailing samples of each series go into the prompt.
pub const RECENT_SAMPLES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesSample {
    pub time: i64,
    pub value: f64,
}

/// The numbers the model is asked to analyze.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSummary {
    pub currency_symbol: String,
    pub current_price: Option<f64>,
    pub price_change_24h: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
    pub market_cap: Option<f64>,
    pub total_volume: Option<f64>,
    /// At most [`RECENT_SAMPLES`] points, oldest first.
    pub prices: Vec<SeriesSample>,
    pub volumes: Vec<SeriesSample>,
}

fn recent(series: &TimeSeries) -> Vec<SeriesSample> {
    let points = series.points();
    points[points.len().saturating_sub(RECENT_SAMPLES)..]
        .iter()
        .map(|p| SeriesSample {
            time: p.time,
            value: p.value,
        })
        .collect()
}

impl ChartSummary {
    /// Summarize a fetched chart, optionally with the coin's current stats.
    pub fn from_chart(chart: &MarketChart, detail: Option<&CoinDetail>) -> Self {
        let mut summary = Self {
            prices: recent(&chart.prices),
            volumes: recent(&chart.total_volumes),
            current_price: chart.prices.last().map(|p| p.value),
            ..Default::default()
        };
        if let Some(d) = detail {
            summary.currency_symbol = d.currency.symbol();
            summary.current_price = d.current_price.or(summary.current_price);
            summary.market_cap = d.market_cap;
            summary.total_volume = d.total_volume;
            summary.high_24h = d.high_24h;
            summary.low_24h = d.low_24h;
            summary.price_change_24h = d.price_change_24h;
            summary.price_change_percentage_24h = d.price_change_percentage_24h;
        }
        summary
    }

    /// Plain-text block handed to the model.
    pub fn to_prompt_text(&self) -> String {
        let sym = self.currency_symbol.as_str();
        let money = |v: Option<f64>| match v {
            Some(v) => num::price(&v, sym),
            None => "N/A".to_string(),
        };
        let plain = |v: Option<f64>| match v {
            Some(v) => format!("{:.2}", v),
            None => "N/A".to_string(),
        };

        let mut out = String::new();
        out.push_str(&format!("Current Price: {}\n", money(self.current_price)));
        out.push_str(&format!(
            "24h Change: {}% ({})\n",
            plain(self.price_change_percentage_24h),
            plain(self.price_change_24h)
        ));
        out.push_str(&format!("24h High: {}\n", money(self.high_24h)));
        out.push_str(&format!("24h Low: {}\n", money(self.low_24h)));
        out.push_str(&format!("Market Cap: {}\n", money(self.market_cap)));
        out.push_str(&format!("Total Volume: {}\n", money(self.total_volume)));

        out.push_str("\nPrice History:\n");
        for s in &self.prices {
            out.push_str(&format!("- {}: {}{:.2}\n", timestamp(s.time), sym, s.value));
        }
        out.push_str("\nVolume History:\n");
        for s in &self.volumes {
            out.push_str(&format!("- {}: {}{:.2}\n", timestamp(s.time), sym, s.value));
        }
        out
    }
}

fn timestamp(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| ms.to_string())
}

/// Full analysis request for `coin` over `timeframe` (e.g. `"30 Days"`).
pub fn analysis_prompt(summary: &ChartSummary, coin: &str, timeframe: &str) -> String {
    format!(
        "Please analyze this {coin} chart data ({timeframe} timeframe) and provide insights:\n\n\
         {data}\n\
         Please provide:\n\
         1. Current trend analysis\n\
         2. Key support and resistance levels\n\
         3. Notable patterns or indicators\n\
         4. Volume analysis\n\
         5. Short-term price prediction\n\
         6. Trading strategy recommendation\n\n\
         Format your response with clear headings and bullet points.",
        data = summary.to_prompt_text(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{CoinId, Currency};

    fn chart(n: i64) -> MarketChart {
        let series = |scale: f64| {
            TimeSeries::from(
                (0..n)
                    .map(|i| (i * 3_600_000, i as f64 * scale))
                    .collect::<Vec<_>>(),
            )
        };
        MarketChart {
            prices: series(1.0),
            market_caps: TimeSeries::default(),
            total_volumes: series(10.0),
        }
    }

    #[test]
    fn test_summary_keeps_last_ten_points() {
        let summary = ChartSummary::from_chart(&chart(24), None);
        assert_eq!(summary.prices.len(), RECENT_SAMPLES);
        assert_eq!(summary.prices[0].value, 14.0);
        assert_eq!(summary.volumes.last().unwrap().value, 230.0);
        assert_eq!(summary.current_price, Some(23.0));
    }

    #[test]
    fn test_short_chart_is_kept_whole() {
        let summary = ChartSummary::from_chart(&chart(3), None);
        assert_eq!(summary.prices.len(), 3);
    }

    #[test]
    fn test_detail_fills_daily_stats() {
        let detail = CoinDetail {
            id: CoinId::from("bitcoin"),
            name: "Bitcoin".to_string(),
            symbol: "btc".to_string(),
            image: None,
            description: String::new(),
            currency: Currency::usd(),
            current_price: Some(64_000.0),
            market_cap: Some(1.2e12),
            total_volume: Some(3.0e10),
            high_24h: Some(65_000.0),
            low_24h: Some(62_500.0),
            price_change_24h: Some(-812.5),
            price_change_percentage_24h: Some(-1.25),
        };
        let summary = ChartSummary::from_chart(&chart(24), Some(&detail));
        assert_eq!(summary.current_price, Some(64_000.0));
        assert_eq!(summary.high_24h, Some(65_000.0));
        assert_eq!(summary.low_24h, Some(62_500.0));

        let text = summary.to_prompt_text();
        assert!(text.contains("24h Change: -1.25% (-812.50)"));
        assert!(!text.contains("24h High: N/A"));
        assert!(!text.contains("24h Low: N/A"));
    }

    #[test]
    fn test_prompt_text() {
        let mut summary = ChartSummary::from_chart(&chart(2), None);
        summary.currency_symbol = "$".to_string();
        let text = summary.to_prompt_text();
        assert!(text.contains("Current Price: $1"));
        assert!(text.contains("24h High: N/A"));
        assert!(text.contains("- 1970-01-01 01:00 UTC: $1.00"));

        let prompt = analysis_prompt(&summary, "Bitcoin", "30 Days");
        assert!(prompt.starts_with("Please analyze this Bitcoin chart data (30 Days timeframe)"));
        assert!(prompt.contains("6. Trading strategy recommendation"));
    }
}
