use serde_json::{Map, Value};

/// Which block of historical stats a command shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsKind {
    Pvp,
    Pve,
    Trials,
    IronBanner,
    Rumble,
    Doubles,
    Mayhem,
}

impl StatsKind {
    /// Bungie activity mode ids to request.
    pub fn modes(self) -> &'static [u32] {
        match self {
            Self::Pvp => &[5],
            Self::Pve => &[7, 4, 16, 18],
            Self::Trials => &[39],
            Self::IronBanner => &[19],
            Self::Rumble => &[48],
            Self::Doubles => &[49],
            Self::Mayhem => &[25],
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Pvp => "Crucible Stats",
            Self::Pve => "PvE Stats",
            Self::Trials => "Trials of the Nine Stats",
            Self::IronBanner => "Iron Banner Stats",
            Self::Rumble => "Rumble Stats",
            Self::Doubles => "Doubles Stats",
            Self::Mayhem => "Mayhem Stats",
        }
    }

    /// Response key holding the stats of a single-mode kind.
    pub fn group(self) -> &'static str {
        match self {
            Self::Pvp => "allPvP",
            Self::Pve => "allPvE",
            Self::Trials => "trialsofthenine",
            Self::IronBanner => "ironBanner",
            Self::Rumble => "rumble",
            Self::Doubles => "allDoubles",
            Self::Mayhem => "allMayhem",
        }
    }
}

/// The `allTime` block of one response group, if it holds anything.
pub fn all_time<'a>(document: &'a Value, group: &str) -> Option<StatBlock<'a>> {
    document
        .get(group)?
        .get("allTime")?
        .as_object()
        .filter(|block| !block.is_empty())
        .map(StatBlock)
}

#[derive(Debug, Clone, Copy)]
pub struct StatBlock<'a>(&'a Map<String, Value>);

impl StatBlock<'_> {
    fn basic(&self, stat: &str) -> Option<&Value> {
        self.0.get(stat)?.get("basic")
    }

    pub fn display(&self, stat: &str) -> String {
        self.basic(stat)
            .and_then(|basic| basic.get("displayValue"))
            .and_then(Value::as_str)
            .unwrap_or("0")
            .to_string()
    }

    pub fn value(&self, stat: &str) -> f64 {
        self.basic(stat)
            .and_then(|basic| basic.get("value"))
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PvpStats {
    pub matches: String,
    pub win_ratio: String,
    pub kd_ratio: String,
    pub kda_ratio: String,
    pub efficiency: String,
    pub kills: String,
    pub deaths: String,
    pub assists: String,
    pub best_weapon: String,
    pub longest_spree: String,
    pub most_kills: String,
    pub combat_rating: String,
    pub time_played: String,
}

impl PvpStats {
    pub fn from_block(block: StatBlock<'_>) -> Self {
        let entered = block.value("activitiesEntered");
        let won = block.value("activitiesWon");
        let win_ratio = if entered > 0.0 {
            format!("{:.1}%", won / entered * 100.0)
        } else {
            "0%".to_string()
        };

        Self {
            matches: block.display("activitiesEntered"),
            win_ratio,
            kd_ratio: block.display("killsDeathsRatio"),
            kda_ratio: block.display("killsDeathsAssists"),
            efficiency: block.display("efficiency"),
            kills: block.display("kills"),
            deaths: block.display("deaths"),
            assists: block.display("assists"),
            best_weapon: block.display("weaponBestType"),
            longest_spree: block.display("longestKillSpree"),
            most_kills: block.display("bestSingleGameKills"),
            combat_rating: block.display("combatRating"),
            time_played: block.display("secondsPlayed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PveStats {
    pub kills: String,
    pub assists: String,
    pub deaths: String,
    pub strikes: String,
    pub nightfalls: String,
    pub fastest_nightfall: String,
    pub public_events: String,
    pub heroic_public_events: String,
    pub favorite_weapon: String,
    pub raid_time: String,
    pub raids: String,
    pub time_played: String,
}

impl PveStats {
    /// Groups the player never touched read as `0`.
    pub fn from_document(document: &Value) -> Self {
        let stat = |group: &str, name: &str| {
            all_time(document, group)
                .map(|block| block.display(name))
                .unwrap_or_else(|| "0".to_string())
        };

        Self {
            kills: stat("allPvE", "kills"),
            assists: stat("allPvE", "assists"),
            deaths: stat("allPvE", "deaths"),
            strikes: stat("allStrikes", "activitiesCleared"),
            nightfalls: stat("nightfall", "activitiesCleared"),
            fastest_nightfall: stat("nightfall", "fastestCompletionMs"),
            public_events: stat("allPvE", "publicEventsCompleted"),
            heroic_public_events: stat("allPvE", "heroicPublicEventsCompleted"),
            favorite_weapon: stat("allPvE", "weaponBestType"),
            raid_time: stat("raid", "totalActivityDurationSeconds"),
            raids: stat("raid", "activitiesCleared"),
            time_played: stat("allPvE", "totalActivityDurationSeconds"),
        }
    }
}
