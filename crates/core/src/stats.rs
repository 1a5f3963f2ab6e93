//! Lifetime player statistics and the rules derived from them.
//!
//! `PlayerStats` is the only persisted record. It serializes as a flat JSON
//! object with camelCase keys; missing keys fall back to their defaults so a
//! partial record merges over a fresh one.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::themes::themes_earned;
use crate::types::ThemeId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerStats {
    pub total_games_played: u32,
    pub best_score: u32,
    pub total_stars: u32,
    /// Not recomputed by any rule yet.
    pub current_streak: u32,
    /// Not recomputed by any rule yet.
    pub longest_streak: u32,
    pub last_play_date: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient_theme_set")]
    pub unlocked_themes: BTreeSet<ThemeId>,
    /// Carried through persistence untouched; see [`Achievement`] for the
    /// derived list.
    pub achievements: Vec<String>,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            total_games_played: 0,
            best_score: 0,
            total_stars: 0,
            current_streak: 0,
            longest_streak: 0,
            last_play_date: None,
            unlocked_themes: BTreeSet::from([ThemeId::default()]),
            achievements: Vec::new(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawThemes {
    List(Vec<RawThemeId>),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawThemeId {
    Id(String),
    Other(IgnoredAny),
}

/// Accept theme ids as plain strings and drop anything else, so stray theme
/// data can't invalidate the whole record. A value that isn't a list at all
/// decodes as empty.
fn lenient_theme_set<'de, D>(deserializer: D) -> Result<BTreeSet<ThemeId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match RawThemes::deserialize(deserializer)? {
        RawThemes::List(raw) => raw,
        RawThemes::Other(_) => {
            log::warn!("ignoring malformed unlockedThemes in saved stats");
            Vec::new()
        }
    };
    let mut out = BTreeSet::new();
    for entry in raw {
        match entry {
            RawThemeId::Id(id) => match ThemeId::from_str(&id) {
                Some(theme) => {
                    out.insert(theme);
                }
                None => log::warn!("ignoring unknown theme id {id:?} in saved stats"),
            },
            RawThemeId::Other(_) => log::warn!("ignoring non-string theme id in saved stats"),
        }
    }
    Ok(out)
}

impl PlayerStats {
    /// Restore the invariants that a decoded record may violate.
    pub fn normalized(mut self) -> Self {
        self.unlocked_themes.insert(ThemeId::default());
        self
    }

    pub fn is_unlocked(&self, id: ThemeId) -> bool {
        self.unlocked_themes.contains(&id)
    }

    /// Insert a theme; returns false if it was already unlocked.
    pub fn unlock(&mut self, id: ThemeId) -> bool {
        self.unlocked_themes.insert(id)
    }

    /// Fold a finished session into the lifetime totals.
    pub fn record_session(&mut self, score: u32, stars: u32, played_at: DateTime<Utc>) {
        self.total_games_played = self.total_games_played.saturating_add(1);
        self.best_score = self.best_score.max(score);
        self.total_stars = self.total_stars.saturating_add(stars);
        self.last_play_date = Some(played_at);
    }

    /// Themes the star total has earned but that are not unlocked yet.
    pub fn pending_unlocks(&self) -> impl Iterator<Item = ThemeId> + '_ {
        themes_earned(self.total_stars).filter(|id| !self.unlocked_themes.contains(id))
    }

    /// Label for the stats screen based on games played.
    pub fn player_title(&self) -> &'static str {
        match self.total_games_played {
            0 => "New Player",
            1..=9 => "Getting Started",
            10..=49 => "Regular Player",
            50..=99 => "Dedicated Player",
            _ => "Memory Master",
        }
    }

    pub fn achieved(&self) -> impl Iterator<Item = Achievement> + '_ {
        Achievement::ALL.into_iter().filter(|a| a.is_achieved(self))
    }
}

/// Milestones shown on the stats screen, derived from [`PlayerStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Achievement {
    FirstGame,
    TenGames,
    FiftyStars,
    HundredPoints,
    SpaceTheme,
    JungleTheme,
}

impl Achievement {
    pub const ALL: [Achievement; 6] = [
        Achievement::FirstGame,
        Achievement::TenGames,
        Achievement::FiftyStars,
        Achievement::HundredPoints,
        Achievement::SpaceTheme,
        Achievement::JungleTheme,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Achievement::FirstGame => "first_game",
            Achievement::TenGames => "ten_games",
            Achievement::FiftyStars => "fifty_stars",
            Achievement::HundredPoints => "hundred_points",
            Achievement::SpaceTheme => "space_theme",
            Achievement::JungleTheme => "jungle_theme",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Achievement::FirstGame => "First Steps",
            Achievement::TenGames => "Getting Good",
            Achievement::FiftyStars => "Star Collector",
            Achievement::HundredPoints => "High Scorer",
            Achievement::SpaceTheme => "Space Explorer",
            Achievement::JungleTheme => "Jungle Navigator",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Achievement::FirstGame => "Played your first game",
            Achievement::TenGames => "Played 10 games",
            Achievement::FiftyStars => "Earned 50 stars",
            Achievement::HundredPoints => "Scored 100 points in a game",
            Achievement::SpaceTheme => "Unlocked Space theme",
            Achievement::JungleTheme => "Unlocked Jungle theme",
        }
    }

    pub fn is_achieved(&self, stats: &PlayerStats) -> bool {
        match self {
            Achievement::FirstGame => stats.total_games_played > 0,
            Achievement::TenGames => stats.total_games_played >= 10,
            Achievement::FiftyStars => stats.total_stars >= 50,
            Achievement::HundredPoints => stats.best_score >= 100,
            Achievement::SpaceTheme => stats.is_unlocked(ThemeId::Space),
            Achievement::JungleTheme => stats.is_unlocked(ThemeId::Jungle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn defaults_unlock_only_the_classic_theme() {
        let s = PlayerStats::default();
        assert_eq!(s.unlocked_themes, BTreeSet::from([ThemeId::Classic]));
        assert_eq!(s.total_games_played, 0);
        assert!(s.last_play_date.is_none());
    }

    #[test]
    fn record_session_folds_totals() {
        let mut s = PlayerStats {
            best_score: 50,
            total_stars: 10,
            ..PlayerStats::default()
        };
        s.record_session(30, 4, at());
        assert_eq!(s.total_games_played, 1);
        assert_eq!(s.best_score, 50);
        assert_eq!(s.total_stars, 14);
        assert_eq!(s.last_play_date, Some(at()));

        s.record_session(80, 0, at());
        assert_eq!(s.best_score, 80);
        assert_eq!(s.total_games_played, 2);
    }

    #[test]
    fn unlock_is_idempotent() {
        let mut s = PlayerStats::default();
        assert!(s.unlock(ThemeId::Space));
        let once = s.unlocked_themes.clone();
        assert!(!s.unlock(ThemeId::Space));
        assert_eq!(s.unlocked_themes, once);
    }

    #[test]
    fn pending_unlocks_skip_already_unlocked() {
        let mut s = PlayerStats {
            total_stars: 120,
            ..PlayerStats::default()
        };
        assert_eq!(
            s.pending_unlocks().collect::<Vec<_>>(),
            vec![ThemeId::Space, ThemeId::Jungle]
        );
        s.unlock(ThemeId::Space);
        assert_eq!(s.pending_unlocks().collect::<Vec<_>>(), vec![ThemeId::Jungle]);
    }

    #[test]
    fn json_uses_camel_case_keys() {
        let s = PlayerStats {
            total_games_played: 3,
            last_play_date: Some(at()),
            ..PlayerStats::default()
        };
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"totalGamesPlayed\":3"));
        assert!(json.contains("\"unlockedThemes\":[\"classic\"]"));
        assert!(json.contains("\"lastPlayDate\":\"2026-03-01T12:00:00"));
    }

    #[test]
    fn round_trip_preserves_every_field() {
        let mut s = PlayerStats {
            total_games_played: 12,
            best_score: 150,
            total_stars: 230,
            current_streak: 2,
            longest_streak: 5,
            last_play_date: Some(at()),
            achievements: vec!["first_game".to_string()],
            ..PlayerStats::default()
        };
        s.unlock(ThemeId::Ocean);
        let back: PlayerStats = serde_json::from_str(&serde_json::to_string(&s).unwrap()).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn partial_record_merges_over_defaults() {
        let back: PlayerStats = serde_json::from_str(r#"{"bestScore": 40}"#).unwrap();
        assert_eq!(back.best_score, 40);
        assert_eq!(back.total_games_played, 0);
        assert!(back.is_unlocked(ThemeId::Classic));
    }

    #[test]
    fn unknown_theme_ids_are_dropped() {
        let back: PlayerStats =
            serde_json::from_str(r#"{"unlockedThemes": ["space", "volcano"]}"#).unwrap();
        let back = back.normalized();
        assert_eq!(
            back.unlocked_themes,
            BTreeSet::from([ThemeId::Classic, ThemeId::Space])
        );
    }

    #[test]
    fn malformed_theme_data_keeps_the_rest_of_the_record() {
        for themes in ["null", "7", r#""space""#, r#"{"a": 1}"#] {
            let raw =
                format!(r#"{{"bestScore": 90, "totalStars": 12, "unlockedThemes": {themes}}}"#);
            let back: PlayerStats = serde_json::from_str(&raw).unwrap();
            let back = back.normalized();
            assert_eq!(back.best_score, 90, "{themes}");
            assert_eq!(back.total_stars, 12, "{themes}");
            assert_eq!(back.unlocked_themes, BTreeSet::from([ThemeId::Classic]));
        }
    }

    #[test]
    fn non_string_theme_entries_are_dropped() {
        let raw = r#"{"bestScore": 5, "unlockedThemes": [null, 3, "jungle", ["x"]]}"#;
        let back: PlayerStats = serde_json::from_str(raw).unwrap();
        assert_eq!(back.best_score, 5);
        assert_eq!(
            back.normalized().unlocked_themes,
            BTreeSet::from([ThemeId::Classic, ThemeId::Jungle])
        );
    }

    #[test]
    fn player_title_by_games_played() {
        let mut s = PlayerStats::default();
        assert_eq!(s.player_title(), "New Player");
        s.total_games_played = 9;
        assert_eq!(s.player_title(), "Getting Started");
        s.total_games_played = 10;
        assert_eq!(s.player_title(), "Regular Player");
        s.total_games_played = 99;
        assert_eq!(s.player_title(), "Dedicated Player");
        s.total_games_played = 100;
        assert_eq!(s.player_title(), "Memory Master");
    }

    #[test]
    fn achievements_derive_from_stats() {
        let mut s = PlayerStats::default();
        assert_eq!(s.achieved().count(), 0);
        s.total_games_played = 1;
        s.best_score = 100;
        s.unlock(ThemeId::Space);
        let got: Vec<&str> = s.achieved().map(|a| a.id()).collect();
        assert_eq!(got, vec!["first_game", "hundred_points", "space_theme"]);
    }
}
