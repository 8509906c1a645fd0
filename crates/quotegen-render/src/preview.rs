//! Plain-text configuration preview
//!
//! A quick look at what a workbook will be generated from: project
//! information, baselines, architecture items, the rate table and the
//! per-baseline quoted figures.

use quotegen_core::{QuotationConfig, QuotationEstimate, RenderError, Renderer};

/// Text preview renderer
#[derive(Clone, Debug)]
pub struct PreviewRenderer {
    pub currency: String,
}

impl Default for PreviewRenderer {
    fn default() -> Self {
        Self {
            currency: "€".into(),
        }
    }
}

impl PreviewRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set currency symbol
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }
}

fn or_unspecified(text: &str) -> &str {
    if text.trim().is_empty() {
        "Not specified"
    } else {
        text
    }
}

impl Renderer for PreviewRenderer {
    type Output = String;

    fn render(
        &self,
        config: &QuotationConfig,
        estimate: &QuotationEstimate,
    ) -> Result<String, RenderError> {
        let mut output = String::new();

        output.push_str("PROJECT CONFIGURATION PREVIEW\n");
        output.push_str("=============================\n\n");

        output.push_str("PROJECT INFORMATION:\n");
        output.push_str(&format!("  Name:        {}\n", config.project_name));
        output.push_str(&format!(
            "  Client:      {}\n",
            or_unspecified(&config.client_name)
        ));
        output.push_str(&format!(
            "  Description: {}\n\n",
            or_unspecified(&config.project_description)
        ));

        output.push_str(&format!("BASELINES: {}\n", config.baselines.len()));
        for (i, baseline) in config.baselines.iter().enumerate() {
            output.push_str(&format!("\n  Baseline {}:\n", i + 1));
            output.push_str(&format!("    Name:        {}\n", baseline.name));
            output.push_str(&format!(
                "    Duration:    {} quarters\n",
                baseline.period_count
            ));
            output.push_str(&format!("    Risk:        {}\n", baseline.risk_level));
            output.push_str(&format!(
                "    Description: {}\n",
                or_unspecified(&baseline.description)
            ));
            if let Some(figures) = estimate.get(i) {
                output.push_str(&format!(
                    "    Quoted:      {} days, {}{} + {}% = {}{}\n",
                    figures.summary.effort_days,
                    self.currency,
                    figures.summary.cost,
                    figures.pricing.margin_percent,
                    self.currency,
                    figures.pricing.final_price.round_dp(2).normalize()
                ));
            }
        }

        let architecture = config.architecture;
        output.push_str("\nSELECTED ARCHITECTURE:\n");
        output.push_str(&format!("  {}\n", architecture.display_name));
        output.push_str(&format!("  {}\n\n", architecture.description));

        output.push_str("PROJECT ITEMS:\n");
        for (i, item) in architecture.items.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, item));
        }

        output.push_str("\nCONFIGURED RATES:\n");
        for (role, rate) in config.rates.iter() {
            output.push_str(&format!("  {}: {}{}/day\n", role, self.currency, rate));
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quotegen_core::{Baseline, Estimator, RiskLevel};
    use quotegen_engine::DeliveryCurveEstimator;

    fn preview(config: &QuotationConfig) -> String {
        let estimate = DeliveryCurveEstimator::new().estimate(config);
        PreviewRenderer::new().render(config, &estimate).unwrap()
    }

    #[test]
    fn preview_lists_every_section() {
        let mut config = QuotationConfig::new("CRM Migration");
        config.baselines[1] = Baseline::new("Fast Track")
            .periods(3)
            .risk(RiskLevel::VeryHigh);
        let text = preview(&config);

        assert!(text.contains("Name:        CRM Migration"));
        assert!(text.contains("Client:      Not specified"));
        assert!(text.contains("BASELINES: 3"));
        assert!(text.contains("Name:        Fast Track"));
        assert!(text.contains("Duration:    3 quarters"));
        assert!(text.contains("Risk:        Very High"));
        assert!(text.contains("Quoted:      160 days, €96000 + 25% = €120000"));
        assert!(text.contains("Enterprise Solution"));
        assert!(text.contains("  10. Project Management"));
        assert!(text.contains("  Project Manager: €900/day"));
    }

    #[test]
    fn preview_uses_currency() {
        let config = QuotationConfig::new("Portal");
        let estimate = DeliveryCurveEstimator::new().estimate(&config);
        let text = PreviewRenderer::new()
            .currency("$")
            .render(&config, &estimate)
            .unwrap();
        assert!(text.contains("  Developer: $600/day"));
    }
}
