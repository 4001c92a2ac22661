//! Portfolio-level yearly totals across all assets

use super::YearlyAssetResult;
use crate::error::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// Aggregated impact of all assets in one year
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PortfolioYear {
    pub year: i32,
    /// Assets with a row in this year
    pub assets: usize,
    /// Assets with at least one event day
    pub assets_with_events: usize,
    pub exposed_value: f64,
    pub total_impact: f64,
}

/// Yearly totals, ascending by year
#[derive(Debug, Clone, Default)]
pub struct PortfolioSummary {
    pub years: Vec<PortfolioYear>,
}

impl PortfolioSummary {
    pub fn from_results(rows: &[YearlyAssetResult]) -> Self {
        let mut by_year: BTreeMap<i32, PortfolioYear> = BTreeMap::new();

        for row in rows {
            let agg = by_year.entry(row.year).or_insert_with(|| PortfolioYear {
                year: row.year,
                ..Default::default()
            });
            agg.assets += 1;
            agg.exposed_value += row.asset_value;
            if row.exceedance_count > 0 {
                agg.assets_with_events += 1;
            }
            if !row.impact_value.is_nan() {
                agg.total_impact += row.impact_value;
            }
        }

        Self {
            years: by_year.into_values().collect(),
        }
    }

    pub fn year(&self, year: i32) -> Option<&PortfolioYear> {
        self.years.iter().find(|y| y.year == year)
    }

    /// Year with the largest total impact
    pub fn worst_year(&self) -> Option<&PortfolioYear> {
        self.years
            .iter()
            .max_by(|a, b| a.total_impact.total_cmp(&b.total_impact))
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for year in &self.years {
            wtr.serialize(year)?;
        }
        wtr.flush()?;
        Ok(())
    }
}
