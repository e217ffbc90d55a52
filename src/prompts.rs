// Prompt templates for every game kind

pub const SYSTEM_INSTRUCTION: &str =
    "You are a creative AI assistant for party games. Generate fun, engaging content.";

// Filler used when a roast comes without a trait
pub const DEFAULT_ROAST_TRAIT: &str = "being basic";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Mild,
    #[default]
    Moderate,
    Spicy,
}

impl Difficulty {
    // Unknown or missing values fall back to moderate, never rejected
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::to_lowercase).as_deref() {
            Some("mild") => Difficulty::Mild,
            Some("spicy") => Difficulty::Spicy,
            _ => Difficulty::Moderate,
        }
    }

    pub fn guide(self) -> &'static str {
        match self {
            Difficulty::Mild => "Keep it family-friendly and safe for all audiences.",
            Difficulty::Moderate => {
                "Make it fun and slightly cheeky, appropriate for a standard party."
            }
            Difficulty::Spicy => "Make it bold, daring, and adult-oriented. Push boundaries.",
        }
    }

    pub fn roast_intensity(self) -> &'static str {
        match self {
            Difficulty::Mild => "playful and lighthearted",
            Difficulty::Moderate => "witty and slightly savage",
            Difficulty::Spicy => "brutal, savage, and hilariously mean",
        }
    }

    pub fn debate_intensity(self) -> &'static str {
        match self {
            Difficulty::Mild => "silly and wholesome",
            Difficulty::Moderate => "silly, absurd, or funny",
            Difficulty::Spicy => "controversial, provocative, or hilariously inappropriate",
        }
    }
}

pub fn never_have_i_ever(difficulty: Difficulty) -> String {
    format!(
        "Generate a single, unique, creative, and funny 'Never Have I Ever' \
         statement for a group of 20-year-olds. {} \
         Keep it short (under 20 words). Do not include quotes or numbering.",
        difficulty.guide()
    )
}

pub fn most_likely_to(difficulty: Difficulty) -> String {
    format!(
        "Generate a single, unique, creative, and funny 'Most Likely To' \
         statement for a group of 20-year-olds. {} \
         Keep it short (under 20 words). Do not include quotes or numbering.",
        difficulty.guide()
    )
}

pub fn truth(difficulty: Difficulty) -> String {
    format!(
        "Generate a Truth question for a party game for young adults. {} Keep it short.",
        difficulty.guide()
    )
}

pub fn dare(difficulty: Difficulty) -> String {
    format!(
        "Generate a Dare challenge for a party game for young adults. {} \
         Physical or social. Keep it short.",
        difficulty.guide()
    )
}

pub fn roast(name: &str, trait_: Option<&str>, difficulty: Difficulty) -> String {
    let trait_ = match trait_ {
        Some(t) if !t.is_empty() => t,
        _ => DEFAULT_ROAST_TRAIT,
    };
    format!(
        "Write a {} roast for a friend named {} who is known for: {}. \
         Keep it under 2 sentences. Direct address (use 'You').",
        difficulty.roast_intensity(),
        name,
        trait_
    )
}

pub fn debate(difficulty: Difficulty) -> String {
    format!(
        "Generate a {} debate topic for two friends. \
         Examples: 'Is a hotdog a sandwich?' or 'Would you rather have fingers \
         for toes or toes for fingers?'. Keep it short.",
        difficulty.debate_intensity()
    )
}

pub fn cocktail(ingredients: &str) -> String {
    format!(
        "Invent a creative, funny, or weird cocktail recipe based on these \
         ingredients/vibe: \"{}\". Give it a cool name. Keep instructions short.",
        ingredients
    )
}
