use serde::{Deserialize, Serialize};
use crate::player::widget::QualityLevel;

/// Highest first. Tiers below these are never picked automatically.
pub const QUALITY_PREFERENCE: [QualityLevel; 3] = [
    QualityLevel::Hd1080,
    QualityLevel::Hd720,
    QualityLevel::Large,
];

/// Quality the user asks for from the quality menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityRequest {
    Auto,
    P1080,
    P720,
    P480,
    P360,
}

impl QualityRequest {
    pub const ALL: [QualityRequest; 5] = [
        QualityRequest::Auto,
        QualityRequest::P1080,
        QualityRequest::P720,
        QualityRequest::P480,
        QualityRequest::P360,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::P1080 => "1080p",
            Self::P720 => "720p",
            Self::P480 => "480p",
            Self::P360 => "360p",
        }
    }

    /// Maps the request to the widget's identifier. `Auto` walks the
    /// preference order and falls back to `medium`.
    pub fn resolve(&self, available: &[QualityLevel]) -> QualityLevel {
        match self {
            Self::Auto => best_available(available).unwrap_or(QualityLevel::Medium),
            Self::P1080 => QualityLevel::Hd1080,
            Self::P720 => QualityLevel::Hd720,
            Self::P480 => QualityLevel::Large,
            Self::P360 => QualityLevel::Medium,
        }
    }
}

pub fn best_available(available: &[QualityLevel]) -> Option<QualityLevel> {
    QUALITY_PREFERENCE
        .iter()
        .copied()
        .find(|tier| available.contains(tier))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_available_prefers_highest() {
        let all = [QualityLevel::Medium, QualityLevel::Hd720, QualityLevel::Hd1080];
        assert_eq!(best_available(&all), Some(QualityLevel::Hd1080));

        let no_1080 = [QualityLevel::Large, QualityLevel::Hd720, QualityLevel::Small];
        assert_eq!(best_available(&no_1080), Some(QualityLevel::Hd720));

        let only_large = [QualityLevel::Tiny, QualityLevel::Large];
        assert_eq!(best_available(&only_large), Some(QualityLevel::Large));

        assert_eq!(best_available(&[QualityLevel::Small]), None);
    }

    #[test]
    fn test_auto_falls_back_to_medium() {
        assert_eq!(QualityRequest::Auto.resolve(&[]), QualityLevel::Medium);
        assert_eq!(
            QualityRequest::Auto.resolve(&[QualityLevel::Tiny, QualityLevel::Small]),
            QualityLevel::Medium
        );
    }

    #[test]
    fn test_explicit_buckets_ignore_availability() {
        assert_eq!(QualityRequest::P1080.resolve(&[]), QualityLevel::Hd1080);
        assert_eq!(QualityRequest::P720.resolve(&[]), QualityLevel::Hd720);
        assert_eq!(QualityRequest::P480.resolve(&[]), QualityLevel::Large);
        assert_eq!(QualityRequest::P360.resolve(&[]), QualityLevel::Medium);
    }
}
