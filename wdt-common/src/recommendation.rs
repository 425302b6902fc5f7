//! Handling recommendations per waste category

use crate::classifier::WasteLabel;
use serde::Serialize;

/// A single handling suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub title: &'static str,
    pub description: &'static str,
}

const ORGANIC_HANDLING: [Recommendation; 3] = [
    Recommendation {
        title: "Compost",
        description: "Turn it into organic fertilizer",
    },
    Recommendation {
        title: "Biopore",
        description: "Water infiltration hole technique",
    },
    Recommendation {
        title: "Maggot farming",
        description: "Alternative livestock feed",
    },
];

const INORGANIC_HANDLING: [Recommendation; 3] = [
    Recommendation {
        title: "Recycle",
        description: "Send it to a waste bank",
    },
    Recommendation {
        title: "Reuse",
        description: "Use it again",
    },
    Recommendation {
        title: "Drop-off",
        description: "Waste collection point",
    },
];

/// Handling suggestions for a waste category
pub fn handling_recommendations(label: WasteLabel) -> &'static [Recommendation] {
    match label {
        WasteLabel::Organic => &ORGANIC_HANDLING,
        WasteLabel::Inorganic => &INORGANIC_HANDLING,
    }
}

/// Short recommendation appended to batch output rows
pub fn batch_recommendation(label: WasteLabel) -> &'static str {
    match label {
        WasteLabel::Organic => "Compost",
        WasteLabel::Inorganic => "Recycle",
    }
}

/// One-line description of a waste category
pub fn label_description(label: WasteLabel) -> &'static str {
    match label {
        WasteLabel::Organic => "Decomposes naturally",
        WasteLabel::Inorganic => "Hard to decompose; should be recycled",
    }
}
