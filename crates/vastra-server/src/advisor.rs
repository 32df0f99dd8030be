//! Prompts for the single-call advisor tools: stylist chat, pricing and
//! quick fabric advice.

use serde::Deserialize;

use vastra_chat::ChatMessage;

pub const STYLIST_SYSTEM_PROMPT: &str = "You are VastraVaani AI Stylist, an expert fashion consultant with deep knowledge of:
- Fashion history and evolution
- Current global trends
- Styling techniques
- Color theory
- Body types and flattering styles
- Occasion-appropriate fashion
- Sustainable fashion
- Brand recommendations
- Wardrobe building

Provide practical, specific, and personalized fashion advice.";

/// Previous exchanges replayed to the model.
pub const HISTORY_TURNS: usize = 5;

/// One earlier exchange as the chat widget stores it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryTurn {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub assistant: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StylistRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<HistoryTurn>,
}

pub fn stylist_messages(req: &StylistRequest) -> Vec<ChatMessage> {
    let start = req.history.len().saturating_sub(HISTORY_TURNS);
    let mut messages = vec![ChatMessage::system(STYLIST_SYSTEM_PROMPT)];
    for turn in &req.history[start..] {
        messages.push(ChatMessage::user(turn.user.as_str()));
        messages.push(ChatMessage::assistant(turn.assistant.as_str()));
    }
    messages.push(ChatMessage::user(req.message.as_str()));
    messages
}

#[derive(Debug, Clone, Deserialize)]
pub struct PricingRequest {
    pub product_name: String,
    pub cost: f64,
    pub target_market: String,
    #[serde(default)]
    pub competition: String,
}

pub fn pricing_prompt(req: &PricingRequest) -> String {
    format!(
        "As a fashion business consultant, suggest a pricing strategy for:\n\n\
         Product: {}\n\
         Production Cost: ${:?}\n\
         Target Market: {}\n\
         Competition: {}\n\n\
         Provide:\n\
         1. Recommended retail price\n\
         2. Wholesale price\n\
         3. Discount strategy\n\
         4. Profit margins\n\
         5. Pricing justification\n\
         6. Market positioning",
        req.product_name, req.cost, req.target_market, req.competition
    )
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuickFabricRequest {
    pub garment_type: String,
    pub season: String,
    #[serde(default)]
    pub preferences: String,
}

pub fn quick_fabric_prompt(req: &QuickFabricRequest) -> String {
    format!(
        "As a fabric expert, recommend the best fabrics for:\n\
         Garment Type: {}\n\
         Season: {}\n\
         Additional Preferences: {}\n\n\
         Provide:\n\
         1. Top 3 fabric recommendations\n\
         2. Pros and cons for each\n\
         3. Care instructions\n\
         4. Price range\n\n\
         Be specific and practical.",
        req.garment_type, req.season, req.preferences
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stylist_keeps_last_five_turns() {
        let history = (0..8)
            .map(|i| HistoryTurn {
                user: format!("q{}", i),
                assistant: format!("a{}", i),
            })
            .collect();
        let req = StylistRequest {
            message: "What goes with olive chinos?".into(),
            history,
        };
        let messages = stylist_messages(&req);

        assert_eq!(messages.len(), 1 + 2 * HISTORY_TURNS + 1);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1], ChatMessage::user("q3"));
        assert_eq!(messages[2], ChatMessage::assistant("a3"));
        assert_eq!(messages.last(), Some(&ChatMessage::user("What goes with olive chinos?")));
    }

    #[test]
    fn test_missing_history_fields_default_to_empty() {
        let req: StylistRequest =
            serde_json::from_str(r#"{"message": "hi", "history": [{"user": "hello"}]}"#).unwrap();
        let messages = stylist_messages(&req);
        assert_eq!(messages[2], ChatMessage::assistant(""));
    }

    #[test]
    fn test_pricing_prompt_formats_cost_as_decimal() {
        let req = PricingRequest {
            product_name: "Linen Kurta".into(),
            cost: 25.0,
            target_market: "Urban millennials".into(),
            competition: String::new(),
        };
        let prompt = pricing_prompt(&req);
        assert!(prompt.contains("Product: Linen Kurta\nProduction Cost: $25.0\n"));
        assert!(prompt.ends_with("6. Market positioning"));
    }

    #[test]
    fn test_quick_fabric_prompt() {
        let req: QuickFabricRequest =
            serde_json::from_str(r#"{"garment_type": "saree", "season": "monsoon"}"#).unwrap();
        let prompt = quick_fabric_prompt(&req);
        assert!(prompt.starts_with("As a fabric expert, recommend the best fabrics for:\nGarment Type: saree\n"));
        assert!(prompt.contains("Additional Preferences: \n\n"));
    }
}
