use serde::{Deserialize, Serialize};

use crate::prompts::Difficulty;

// Body for the difficulty-only games
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct GenerateRequest {
    #[serde(default)]
    pub difficulty: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct RoastRequest {
    pub name: String,
    #[serde(default, rename = "trait")]
    pub trait_: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct CocktailRequest {
    pub ingredients: String,
}

impl GenerateRequest {
    pub fn difficulty(&self) -> Difficulty {
        Difficulty::parse(self.difficulty.as_deref())
    }
}

impl RoastRequest {
    pub fn difficulty(&self) -> Difficulty {
        Difficulty::parse(self.difficulty.as_deref())
    }
}

// What every generate endpoint returns
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct GenerateResponse {
    pub content: String,
    pub cached: bool,
    pub timestamp: String,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub gemini_configured: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn roast_reads_trait_field() {
        let req: RoastRequest =
            serde_json::from_value(json!({"name": "Sam", "trait": "snoring"})).unwrap();
        assert_eq!(req.trait_.as_deref(), Some("snoring"));
        assert_eq!(req.difficulty(), Difficulty::Moderate);
    }

    #[test]
    fn roast_requires_name() {
        let err = serde_json::from_value::<RoastRequest>(json!({"trait": "snoring"})).unwrap_err();
        assert!(err.to_string().contains("missing field `name`"));
    }

    #[test]
    fn difficulty_is_optional_and_nullable() {
        let empty: GenerateRequest = serde_json::from_value(json!({})).unwrap();
        let null: GenerateRequest = serde_json::from_value(json!({"difficulty": null})).unwrap();
        let spicy: GenerateRequest =
            serde_json::from_value(json!({"difficulty": "spicy"})).unwrap();
        assert_eq!(empty.difficulty(), Difficulty::Moderate);
        assert_eq!(null.difficulty(), Difficulty::Moderate);
        assert_eq!(spicy.difficulty(), Difficulty::Spicy);
    }
}
