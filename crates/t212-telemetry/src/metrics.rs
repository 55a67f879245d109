//! Prometheus gauge definitions for the portfolio exporter.
//!
//! All metrics use the `trading212_` prefix. Gauges live in an explicit
//! `Registry` owned by [`PortfolioMetrics`] rather than a process-global
//! one, so tests and the scrape server get handed exactly the state the
//! poll loop publishes into.

use crate::error::{TelemetryError, TelemetryResult};
use prometheus::{Encoder, Gauge, GaugeVec, Opts, Registry, TextEncoder};
use t212_client::Position;
use tracing::info;

/// Gauge registry the poll loop publishes open positions into.
///
/// Cloning is cheap; all gauges share atomic storage with the registry, so
/// concurrent scrapes read whatever the most recent publish wrote. Tickers
/// that disappear from the account keep their last published values until
/// the process restarts.
#[derive(Clone)]
pub struct PortfolioMetrics {
    registry: Registry,
    /// Total number of open positions.
    pub open_positions_total: Gauge,
    /// Quantity per ticker.
    pub position_quantity: GaugeVec,
    /// Market value per ticker (quantity x current price).
    pub position_value: GaugeVec,
    /// Acquisition cost per ticker (quantity x average price).
    pub position_cost: GaugeVec,
    /// Profit/loss per ticker.
    pub position_ppl: GaugeVec,
    /// FX profit/loss per ticker.
    pub position_fxppl: GaugeVec,
}

impl PortfolioMetrics {
    /// Create the registry with all gauges registered.
    pub fn new() -> TelemetryResult<Self> {
        let registry = Registry::new();

        let open_positions_total = Gauge::with_opts(Opts::new(
            "trading212_open_positions_total",
            "Total number of open positions in the Trading 212 account",
        ))?;
        registry.register(Box::new(open_positions_total.clone()))?;

        let position_quantity = GaugeVec::new(
            Opts::new(
                "trading212_position_quantity",
                "Quantity of individual open positions",
            ),
            &["ticker"],
        )?;
        registry.register(Box::new(position_quantity.clone()))?;

        let position_value = GaugeVec::new(
            Opts::new(
                "trading212_position_value",
                "Value of individual open positions",
            ),
            &["ticker"],
        )?;
        registry.register(Box::new(position_value.clone()))?;

        let position_cost = GaugeVec::new(
            Opts::new(
                "trading212_position_cost",
                "Cost of individual open positions",
            ),
            &["ticker"],
        )?;
        registry.register(Box::new(position_cost.clone()))?;

        let position_ppl = GaugeVec::new(
            Opts::new(
                "trading212_position_ppl",
                "Profit/loss of individual open positions",
            ),
            &["ticker"],
        )?;
        registry.register(Box::new(position_ppl.clone()))?;

        let position_fxppl = GaugeVec::new(
            Opts::new(
                "trading212_position_fxppl",
                "FX profit/loss of individual open positions",
            ),
            &["ticker"],
        )?;
        registry.register(Box::new(position_fxppl.clone()))?;

        Ok(Self {
            registry,
            open_positions_total,
            position_quantity,
            position_value,
            position_cost,
            position_ppl,
            position_fxppl,
        })
    }

    /// Publish one poll cycle's positions onto the gauges.
    ///
    /// Sets the total gauge to the batch length, then overwrites the five
    /// per-ticker gauges for each position. Duplicate tickers within one
    /// batch resolve last-write-wins. Tickers absent from the batch are
    /// left untouched.
    pub fn publish(&self, positions: &[Position]) {
        self.open_positions_total.set(positions.len() as f64);

        for pos in positions {
            let ticker = pos.ticker.as_str();
            self.position_quantity
                .with_label_values(&[ticker])
                .set(pos.quantity);
            self.position_value
                .with_label_values(&[ticker])
                .set(pos.value());
            self.position_cost
                .with_label_values(&[ticker])
                .set(pos.cost());
            self.position_ppl.with_label_values(&[ticker]).set(pos.ppl);
            self.position_fxppl
                .with_label_values(&[ticker])
                .set(pos.fx_ppl);
        }

        info!(count = positions.len(), "Updated metrics for open positions");
    }

    /// Render the registry in Prometheus text exposition format.
    pub fn render(&self) -> TelemetryResult<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;

        String::from_utf8(buffer)
            .map_err(|e| TelemetryError::Metrics(prometheus::Error::Msg(e.to_string())))
    }
}
