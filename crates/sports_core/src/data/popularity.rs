//! Static popularity reference.
//!
//! Fixed at build time, keyed by exact sport name. Parsed into a lookup map
//! on first use and shared for the rest of the process.

use rustc_hash::FxHashMap;
use std::sync::OnceLock;

/// (sport, popularity) pairs in declaration order
pub const POPULARITY_REFERENCE: &[(&str, u32)] = &[
    ("Boxing", 500),
    ("Ice Hockey", 520),
    ("Football", 1000),
    ("Basketball", 850),
    ("Wrestling", 300),
    ("Martial Arts", 480),
    ("Tennis", 750),
    ("Gymnastics", 420),
    ("Baseball/Softball", 600),
    ("Soccer", 1000),
    ("Skiing: Alpine", 350),
    ("Water Polo", 260),
    ("Rugby", 540),
    ("Lacrosse", 200),
    ("Rodeo: Steer Wrestling", 170),
    ("Track and Field: Pole Vault", 330),
    ("Field Hockey", 700),
    ("Speed Skating", 320),
    ("Figure Skating", 360),
    ("Cycling: Distance", 430),
    ("Volleyball", 650),
    ("Racquetball/Squash", 240),
    ("Surfing", 230),
    ("Fencing", 220),
    ("Skiing: Freestyle", 320),
    ("Team Handball", 280),
    ("Cycling: Sprints", 360),
    ("Bobsledding/Luge", 210),
    ("Ski Jumping", 310),
    ("Badminton", 430),
    ("Skiing: Nordic", 330),
    ("Auto Racing", 560),
    ("Track and Field: High Jump", 340),
    ("Track and Field: Long, Triple jumps", 360),
    ("Diving", 300),
    ("Swimming (all strokes): Distance", 380),
    ("Skateboarding", 230),
    ("Track and Field: Sprints", 400),
    ("Rowing", 260),
    ("Rodeo: Calf Roping", 170),
    ("Track and Field: Distance", 380),
    ("Rodeo: Bull/Bareback/Bronc Riding", 190),
    ("Track and Field: Middle Distance", 370),
    ("Weight-Lifting", 250),
    ("Swimming (all strokes): Sprints", 380),
    ("Water Skiing", 210),
    ("Table Tennis", 640),
    ("Track and Field: Weights", 330),
    ("Canoe/Kayak", 240),
    ("Horse Racing", 340),
    ("Golf", 580),
    ("Cheerleading", 190),
    ("Roller Skating", 180),
    ("Equestrian", 260),
    ("Archery", 230),
    ("Curling", 230),
    ("Bowling", 240),
    ("Shooting", 220),
    ("Billiards", 260),
    ("Fishing", 260),
];

/// Immutable sport → popularity lookup.
#[derive(Debug, Clone, Default)]
pub struct PopularityReference {
    scores: FxHashMap<String, u32>,
}

impl PopularityReference {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, u32)>) -> Self {
        Self {
            scores: pairs
                .into_iter()
                .map(|(sport, score)| (sport.to_string(), score))
                .collect(),
        }
    }

    /// Exact, case-sensitive lookup
    pub fn get(&self, sport: &str) -> Option<u32> {
        self.scores.get(sport).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

static BUILTIN_REFERENCE: OnceLock<PopularityReference> = OnceLock::new();

/// The reference table shipped with the dashboard.
///
/// Built on first call, cached afterwards.
pub fn builtin_reference() -> &'static PopularityReference {
    BUILTIN_REFERENCE.get_or_init(|| PopularityReference::from_pairs(POPULARITY_REFERENCE.iter().copied()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_reference_loaded() {
        let reference = builtin_reference();
        assert_eq!(reference.len(), 60);
        assert_eq!(reference.len(), POPULARITY_REFERENCE.len(), "sport names must be unique");
        assert_eq!(reference.get("Football"), Some(1000));
        assert_eq!(reference.get("Basketball"), Some(850));
        assert_eq!(reference.get("Track and Field: Long, Triple jumps"), Some(360));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let reference = builtin_reference();
        assert_eq!(reference.get("football"), None);
        assert_eq!(reference.get("Football "), None);
        assert_eq!(reference.get("Chess"), None);
    }

    #[test]
    fn test_reference_is_cached() {
        let first = builtin_reference();
        let second = builtin_reference();
        assert!(std::ptr::eq(first, second), "Should return cached data");
    }
}
