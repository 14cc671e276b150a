//! Mood definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Moods that can be attached to an entry (one primary, up to two secondary)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Excited,
    Grateful,
    Calm,
    #[default]
    Neutral,
    Anxious,
    Sad,
    Angry,
    Tired,
    Stressed,
    Motivated,
    Peaceful,
    Loving,
    Hopeful,
    Confused,
}

impl Mood {
    pub const ALL: [Mood; 15] = [
        Mood::Happy,
        Mood::Excited,
        Mood::Grateful,
        Mood::Calm,
        Mood::Neutral,
        Mood::Anxious,
        Mood::Sad,
        Mood::Angry,
        Mood::Tired,
        Mood::Stressed,
        Mood::Motivated,
        Mood::Peaceful,
        Mood::Loving,
        Mood::Hopeful,
        Mood::Confused,
    ];

    /// Lowercase name used in storage and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Excited => "excited",
            Mood::Grateful => "grateful",
            Mood::Calm => "calm",
            Mood::Neutral => "neutral",
            Mood::Anxious => "anxious",
            Mood::Sad => "sad",
            Mood::Angry => "angry",
            Mood::Tired => "tired",
            Mood::Stressed => "stressed",
            Mood::Motivated => "motivated",
            Mood::Peaceful => "peaceful",
            Mood::Loving => "loving",
            Mood::Hopeful => "hopeful",
            Mood::Confused => "confused",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Excited => "🎉",
            Mood::Grateful => "🙏",
            Mood::Calm => "😌",
            Mood::Neutral => "😐",
            Mood::Anxious => "😰",
            Mood::Sad => "😢",
            Mood::Angry => "😠",
            Mood::Tired => "😴",
            Mood::Stressed => "😫",
            Mood::Motivated => "💪",
            Mood::Peaceful => "☮️",
            Mood::Loving => "❤️",
            Mood::Hopeful => "🌟",
            Mood::Confused => "😕",
        }
    }

    /// Display colour as `#RRGGBB`
    pub fn color(&self) -> &'static str {
        match self {
            Mood::Happy => "#FFD700",
            Mood::Excited => "#FF6B6B",
            Mood::Grateful => "#98D8C8",
            Mood::Calm => "#87CEEB",
            Mood::Neutral => "#B0B0B0",
            Mood::Anxious => "#DDA0DD",
            Mood::Sad => "#6495ED",
            Mood::Angry => "#FF4500",
            Mood::Tired => "#708090",
            Mood::Stressed => "#FF8C00",
            Mood::Motivated => "#32CD32",
            Mood::Peaceful => "#E6E6FA",
            Mood::Loving => "#FF69B4",
            Mood::Hopeful => "#FFFACD",
            Mood::Confused => "#D3D3D3",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Mood::ALL
            .iter()
            .copied()
            .find(|mood| mood.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "Invalid mood: '{}'. Valid moods are: {}",
                    s,
                    Mood::ALL
                        .iter()
                        .map(|m| m.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}
