//! Seed deck used when no card file is given.

use deck::{Card, StaticCards};

pub fn initial_cards() -> StaticCards {
    StaticCards(vec![
        Card::new(
            "Sleep Pod",
            &["Technology", "Sleep", "Pod"],
            "A small, portable pod for a good night's sleep on the go.",
            ("#3C5BD7", "#123AAF"),
        ),
        Card::new(
            "Mindful Moments",
            &["Mindfulness", "Calm", "Focus"],
            "Practice staying present with guided mindfulness techniques.",
            ("#1b5e20", "#004d40"),
        ),
        Card::new(
            "Gratitude Journal",
            &["Gratitude", "Wellbeing", "Journaling"],
            "Keep track of things you are grateful for each day.",
            ("#c17f0a", "#5c3d0a"),
        ),
        Card::new(
            "Deep Breathing",
            &["Relaxation", "Breathing", "Anxiety"],
            "Simple deep breathing exercises to ease tension.",
            ("#006064", "#004d40"),
        ),
        Card::new(
            "Sleep Routine",
            &["Sleep", "Rest", "Self-care"],
            "A healthy nightly routine to improve sleep quality.",
            ("#1a237e", "#0d2137"),
        ),
        Card::new(
            "Mood Tracker",
            &["Mood", "Awareness", "Habits"],
            "Track your mood every day and discover patterns.",
            ("#c2185b", "#6a1b9a"),
        ),
        Card::new(
            "Night Wind Down",
            &["Sleep", "Relaxation", "Evening"],
            "Calming activities to prepare mind and body for rest.",
            ("#1a237e", "#0d47a1"),
        ),
        Card::new(
            "Stress Release",
            &["Stress", "Relief", "Tension"],
            "Targeted exercises to melt away daily stress.",
            ("#4a148c", "#6a1b9a"),
        ),
        Card::new(
            "Focus Flow",
            &["Focus", "Productivity", "Concentration"],
            "Structured sessions designed to minimize distractions.",
            ("#004d40", "#00695c"),
        ),
        Card::new(
            "Calm Anchor",
            &["Anxiety", "Grounding", "Calm"],
            "Grounding and breathing techniques for anxious moments.",
            ("#1b5e20", "#2e7d32"),
        ),
        Card::new(
            "Restful Nights",
            &["Sleep", "Insomnia", "Recovery"],
            "Evidence-based strategies for falling and staying asleep.",
            ("#0d1b2a", "#1b263b"),
        ),
        Card::new(
            "Emotional Reset",
            &["Emotions", "Reset", "Balance"],
            "Guided practices to restore balance and perspective.",
            ("#880e4f", "#ad1457"),
        ),
    ])
}

/// Load cards from a JSON array of `Card` records.
pub fn cards_from_json(json: &str) -> Result<StaticCards, serde_json::Error> {
    Ok(StaticCards(serde_json::from_str(json)?))
}
