//! Prompt templates for the two oracle stages.

use pw_protocol::Product;

/// Build the intent-classification prompt.
pub fn classification_prompt(message: &str, categories: &[String]) -> String {
    let category_list =
        serde_json::to_string_pretty(categories).unwrap_or_else(|_| categories.join(", "));

    format!(
        r#"You are a shopping assistant deciding whether a customer message calls for a product recommendation.

Customer message:
"{message}"

Product categories in our catalog:
{category_list}

Decide:
1. Is the customer looking to buy something, or only commenting, asking for support or complaining?
2. If they want to buy, which 3 categories from the list above fit their need best, most relevant first?

Respond with ONLY a JSON object (no markdown, no explanation):
{{
    "should_recommend": true,
    "categories": ["Category1", "Category2", "Category3"],
    "reasoning": "short explanation"
}}

When should_recommend is false, categories may be an empty array."#
    )
}

/// Render candidates one per line: `- id: name | category | $price | rating★ | description`.
pub fn format_candidates(candidates: &[Product]) -> String {
    candidates
        .iter()
        .map(|p| {
            format!(
                "- {}: {} | {} | ${:.2} | {}★ | {}",
                p.id, p.name, p.category, p.price, p.avg_rating, p.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the product-selection prompt.
pub fn selection_prompt(message: &str, candidates: &[Product]) -> String {
    let candidate_list = format_candidates(candidates);

    format!(
        r#"You are a shopping assistant. A customer wrote:

"{message}"

Products we can offer (in stock, well rated):
{candidate_list}

Pick the TOP 3 products that best serve this customer, ranked by relevance.

Weigh:
1. How closely the product matches the stated need
2. Product quality (rating)
3. Value at its price

Respond with ONLY a JSON object (no markdown, no explanation):
{{
    "recommendations": [
        {{"product_id": "P0XX", "confidence": 0.95}},
        {{"product_id": "P0YY", "confidence": 0.80}},
        {{"product_id": "P0ZZ", "confidence": 0.65}}
    ],
    "reasoning": "One sentence on why these three, in this order"
}}

Confidence is how well each product fits the customer's need, from 0.0 to 1.0.
Only use product ids from the list above."#
    )
}
