//! Prompt templates for the generative AI calls.
//!
//! Templates live under `templates/prompts/` as plain text, so askama does
//! not escape the interpolated catalog JSON.

use askama::Template;
use serde::Serialize;

use nexus_core::admin::AnalyticsPoint;
use nexus_core::catalog::{Catalog, Product};
use nexus_core::types::Persona;

#[derive(Template)]
#[template(path = "prompts/search.txt")]
struct SearchPrompt<'a> {
    catalog_json: String,
    query: &'a str,
}

#[derive(Template)]
#[template(path = "prompts/insights.txt")]
struct InsightsPrompt {
    months: usize,
    analytics_json: String,
}

#[derive(Template)]
#[template(path = "prompts/description.txt")]
struct DescriptionPrompt<'a> {
    name: &'a str,
    keywords: &'a str,
}

#[derive(Template)]
#[template(path = "prompts/assistant.txt")]
struct AssistantInstruction {
    persona_label: &'static str,
    catalog_lines: Vec<String>,
}

/// Catalog entry as given to the ranking model.
#[derive(Serialize)]
struct RankingEntry<'a> {
    id: &'a str,
    name: &'a str,
    description: &'a str,
    category: &'a str,
    price: serde_json::Value,
}

/// Analytics point with the field names shown on the dashboard chart.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyticsEntry<'a> {
    name: &'a str,
    b2c_sales: u32,
    b2b_sales: u32,
}

fn price_number(product: &Product) -> serde_json::Value {
    product
        .price
        .plain()
        .parse::<serde_json::Number>()
        .map_or(serde_json::Value::Null, serde_json::Value::Number)
}

/// Prompt asking the model to rank catalog ids for `query`.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn search_prompt(catalog: &Catalog, query: &str) -> askama::Result<String> {
    let entries: Vec<RankingEntry<'_>> = catalog
        .products()
        .iter()
        .map(|p| RankingEntry {
            id: p.id.as_str(),
            name: &p.name,
            description: &p.description,
            category: &p.category,
            price: price_number(p),
        })
        .collect();
    let catalog_json = serde_json::to_string(&entries).map_err(askama::Error::custom)?;

    SearchPrompt {
        catalog_json,
        query,
    }
    .render()
}

/// Prompt asking for an executive summary of the sales series.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn insights_prompt(analytics: &[AnalyticsPoint]) -> askama::Result<String> {
    let entries: Vec<AnalyticsEntry<'_>> = analytics
        .iter()
        .map(|point| AnalyticsEntry {
            name: &point.name,
            b2c_sales: point.b2c_sales,
            b2b_sales: point.b2b_sales,
        })
        .collect();
    let analytics_json = serde_json::to_string(&entries).map_err(askama::Error::custom)?;

    InsightsPrompt {
        months: analytics.len(),
        analytics_json,
    }
    .render()
}

/// Prompt asking for a marketing description.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn description_prompt(name: &str, keywords: &str) -> askama::Result<String> {
    DescriptionPrompt { name, keywords }.render()
}

/// System instruction for the shopping assistant.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn assistant_instruction(catalog: &Catalog, persona: Persona) -> askama::Result<String> {
    let catalog_lines = catalog
        .products()
        .iter()
        .map(|p| {
            format!(
                "- {} (SKU: {}): ${} (B2B: ${}). {}. Stock: {}",
                p.name,
                p.sku,
                p.price.plain(),
                p.b2b_price.plain(),
                p.description,
                p.stock
            )
        })
        .collect();

    AssistantInstruction {
        persona_label: persona.label(),
        catalog_lines,
    }
    .render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexus_core::seed;

    #[test]
    fn test_search_prompt_embeds_catalog_and_query() {
        let prompt = search_prompt(&seed::catalog(), "something to sit on").expect("render");
        assert!(prompt.contains(r#"User Search Query: "something to sit on""#));
        assert!(prompt.contains(
            r#"{"id":"2","name":"Ergonomic Mesh Chair","description":"Designed for 24/7 comfort with lumbar support.","category":"Office","price":349}"#
        ));
        // JSON escaping only, no HTML entities.
        assert!(prompt.contains(r#"32\" 4K HDR Monitor"#));
        assert!(prompt.contains(r#"Example: ["1", "4"]"#));
    }

    #[test]
    fn test_insights_prompt_serializes_series() {
        let prompt = insights_prompt(&seed::analytics()).expect("render");
        assert!(prompt.starts_with(
            "Analyze the following sales data (B2C vs B2B) for the last 7 months: "
        ));
        assert!(prompt.contains(r#"{"name":"Jan","b2cSales":4000,"b2bSales":2400}"#));
        assert!(prompt.contains("3 clear actionable bullet points"));
    }

    #[test]
    fn test_description_prompt() {
        let prompt = description_prompt("Nexus Dock", "USB-C, 100W, dual 4K").expect("render");
        assert!(prompt.contains(r#"a product named "Nexus Dock""#));
        assert!(prompt.contains("Keywords/Features to include: USB-C, 100W, dual 4K."));
        assert!(prompt.trim_end().ends_with("Tone: Professional, persuasive, tech-focused."));
    }

    #[test]
    fn test_assistant_instruction_lists_catalog() {
        let instruction = assistant_instruction(&seed::catalog(), Persona::B2b).expect("render");
        assert!(instruction.starts_with(
            "You are a helpful sales assistant for Nexus Commerce (B2B & B2C Platform)."
        ));
        assert!(instruction.contains("B2B Purchaser"));
        assert!(instruction.contains(
            "- Ergonomic Mesh Chair (SKU: ACC-042): $349 (B2B: $199). Designed for 24/7 comfort with lumbar support.. Stock: 120"
        ));
        assert!(instruction.contains("4. Highlight stock levels if low."));
        assert_eq!(instruction.matches("(SKU: ").count(), 6);
    }
}
