//! Per-day bans keyed by canonical player name.

use std::collections::{BTreeMap, BTreeSet};

use super::player::PlayerId;
use super::roster::Roster;
use crate::diagnostics::{DiagnosticLog, SolvePhase};

/// Caller-facing ban list: 1-based day number to banned canonical names.
///
/// # Example
///
/// ```
/// use matchforge_core::BanList;
///
/// let bans = BanList::new().with_ban(1, "T3").with_ban(3, "J2");
/// assert_eq!(bans.len(), 2);
/// assert!(bans.is_banned(1, "T3"));
/// assert!(!bans.is_banned(2, "T3"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BanList {
    days: BTreeMap<u32, BTreeSet<String>>,
}

impl BanList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bans `name` from every game on the 1-based day `day`.
    pub fn ban(&mut self, day: u32, name: impl Into<String>) {
        self.days.entry(day).or_default().insert(name.into());
    }

    pub fn with_ban(mut self, day: u32, name: impl Into<String>) -> Self {
        self.ban(day, name);
        self
    }

    pub fn is_banned(&self, day: u32, name: &str) -> bool {
        self.days.get(&day).is_some_and(|names| names.contains(name))
    }

    /// Total number of (day, name) entries.
    pub fn len(&self) -> usize {
        self.days.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.days
            .iter()
            .flat_map(|(day, names)| names.iter().map(move |n| (*day, n.as_str())))
    }

    /// Resolves names to player ids and days to 0-based indices.
    ///
    /// Unknown names and days outside `1..=day_count` are dropped with a
    /// warning entry in `log`.
    pub fn resolve(&self, roster: &Roster, day_count: usize, log: &mut DiagnosticLog) -> ResolvedBans {
        let mut resolved = ResolvedBans::empty(day_count, roster.player_count());
        for (day, name) in self.iter() {
            if day == 0 || day as usize > day_count {
                log.warning(
                    SolvePhase::Bans,
                    format!(
                        "ignoring ban of '{}' on day {}: days run 1..={}",
                        name, day, day_count
                    ),
                );
                continue;
            }
            let Some(player) = roster.id_of(name) else {
                log.warning(
                    SolvePhase::Bans,
                    format!("ignoring ban on day {}: unknown player '{}'", day, name),
                );
                continue;
            };
            resolved.insert(day as usize - 1, player);
        }

        if !resolved.is_empty() {
            log.info(
                SolvePhase::Bans,
                format!("{} day bans applied", resolved.len()),
            );
        }
        resolved
    }
}

/// Bans resolved against a roster: `[day][player]` flags plus per-day lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBans {
    flags: Vec<Vec<bool>>,
    by_day: Vec<Vec<PlayerId>>,
}

impl ResolvedBans {
    pub fn empty(day_count: usize, player_count: usize) -> Self {
        Self {
            flags: vec![vec![false; player_count]; day_count],
            by_day: vec![Vec::new(); day_count],
        }
    }

    /// Bans `player` on the 0-based `day`.
    pub fn insert(&mut self, day: usize, player: PlayerId) {
        if !self.flags[day][player] {
            self.flags[day][player] = true;
            self.by_day[day].push(player);
        }
    }

    #[inline]
    pub fn is_banned(&self, day: usize, player: PlayerId) -> bool {
        self.flags[day][player]
    }

    #[inline]
    pub fn banned_on(&self, day: usize) -> &[PlayerId] {
        &self.by_day[day]
    }

    pub fn banned_every_day(&self, player: PlayerId) -> bool {
        !self.flags.is_empty() && self.flags.iter().all(|day| day[player])
    }

    pub fn day_count(&self) -> usize {
        self.flags.len()
    }

    pub fn len(&self) -> usize {
        self.by_day.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
