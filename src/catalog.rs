//! Mascot reaction lines.
//!
//! Behavior:
//! - Stateless: a fixed catalog of idle chatter plus one line per furnishing type
//! - Random picks go through the injected [`RandomSource`] so tests can script them
//! - Event lines (layer change, save, share, ...) are plain constants

use crate::host::RandomSource;

/// Idle chatter, used for mascot clicks and spontaneous reactions.
pub const CHATTER: [&str; 8] = [
    "This looks perfect for napping! 💤",
    "I love what you've done with the place! 🏠",
    "Can we add more treats? 🥜",
    "This tunnel system is amazing! 🕳️",
    "I need my exercise wheel! 🎡",
    "The flooring feels so cozy! 🐾",
    "Perfect spot for storing my seeds! 🌱",
    "I can't wait to explore every corner! 🔍",
];

pub const LAYER_CHANGED: &str = "I love this new look!";
pub const FURNISHING_REMOVED: &str = "Hmm, I'll miss that one...";
pub const FURNISHING_FALLBACK: &str = "I love this addition!";
pub const PLACEMENT_DONE: &str = "Nice placement! 👍";
pub const DESIGN_SAVED: &str = "Design saved! I won't forget this house! 💾";
pub const SAVE_FAILED: &str = "Oh no, I couldn't remember that house... 😟";
pub const DESIGN_SHARED: &str = "Design shared! Others can see our amazing house! 📤";
pub const SHARED_WELCOME: &str = "Welcome to our shared house design! 🏠✨";
pub const WELCOME: &str = "Welcome to my house builder! Let's create something amazing! 🎉";
pub const SHARE_PROMPT: &str = "Copy this URL to share your design:";

pub const SAVE_LABEL: &str = "💾 Save Design";
pub const SAVED_LABEL: &str = "✅ Saved!";
pub const SHARE_LABEL: &str = "📤 Share Design";
pub const COPIED_LABEL: &str = "📋 Copied!";

/// Pick a chatter line.
pub fn random_reaction(random: &mut dyn RandomSource) -> &'static str {
    CHATTER[random.index(CHATTER.len())]
}

/// The line for a specific furnishing type, or a generic one for unknown types.
pub fn furnishing_reaction(furnishing: &str) -> &'static str {
    match furnishing {
        "hideout" => "Perfect for my secret hideout! 🏠",
        "soft-bed" => "So cozy for sleeping! 😴",
        "tunnel" => "I love exploring tunnels! 🕳️",
        "hammock" => "Time for a relaxing swing! 🌙",
        "food-bowl" => "Yummy treats await! 🥜",
        "water-bottle" => "Fresh water, perfect! 💧",
        "treat-dispenser" => "More treats? Yes please! 🍪",
        "hay-rack" => "Great for snacking! 🌾",
        "litter-box" => "Essential for staying clean! 🧹",
        "exercise-wheel" => "Time to get my cardio in! 🏃‍♂️",
        "climbing-structure" => "I can reach new heights! 🧗‍♂️",
        "digging-pit" => "Perfect for my digging adventures! ⛏️",
        _ => FURNISHING_FALLBACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::Category;
    use crate::host::ScriptedRandom;

    #[test]
    fn every_furnishing_has_its_own_line() {
        for category in Category::ALL {
            for item in category.furnishings() {
                assert_ne!(furnishing_reaction(item), FURNISHING_FALLBACK, "{item}");
            }
        }
    }

    #[test]
    fn unknown_furnishing_falls_back() {
        assert_eq!(furnishing_reaction("jacuzzi"), FURNISHING_FALLBACK);
    }

    #[test]
    fn random_reaction_follows_the_source() {
        let mut random = ScriptedRandom::new(vec![0.0, 0.99, 0.5]);
        assert_eq!(random_reaction(&mut random), CHATTER[0]);
        assert_eq!(random_reaction(&mut random), CHATTER[7]);
        assert_eq!(random_reaction(&mut random), CHATTER[4]);
    }
}
