use super::models::{all_time, PveStats, PvpStats, StatsKind};
use crate::modules::destiny::Membership;
use poise::serenity_prelude::{CreateEmbed, CreateEmbedAuthor};
use serde_json::Value;

const BLUE: u32 = 0x3498db;

fn base(title: &str, membership: &Membership) -> CreateEmbed {
    CreateEmbed::new().colour(BLUE).author(
        CreateEmbedAuthor::new(format!("{} | {}", membership.display_name, title))
            .icon_url(membership.platform.icon_url()),
    )
}

pub fn pvp_embed(stats: &PvpStats, title: &str, membership: &Membership) -> CreateEmbed {
    base(title, membership).fields([
        ("Matches", stats.matches.as_str(), true),
        ("Win Rate", stats.win_ratio.as_str(), true),
        ("K/D", stats.kd_ratio.as_str(), true),
        ("KA/D", stats.kda_ratio.as_str(), true),
        ("Efficiency", stats.efficiency.as_str(), true),
        ("Combat Rating", stats.combat_rating.as_str(), true),
        ("Kills", stats.kills.as_str(), true),
        ("Deaths", stats.deaths.as_str(), true),
        ("Assists", stats.assists.as_str(), true),
        ("Favorite Weapon", stats.best_weapon.as_str(), true),
        ("Longest Spree", stats.longest_spree.as_str(), true),
        ("Most Kills", stats.most_kills.as_str(), true),
        ("Time Played", stats.time_played.as_str(), true),
    ])
}

pub fn pve_embed(stats: &PveStats, membership: &Membership) -> CreateEmbed {
    base(StatsKind::Pve.title(), membership).fields([
        ("Kills", stats.kills.as_str(), true),
        ("Assists", stats.assists.as_str(), true),
        ("Deaths", stats.deaths.as_str(), true),
        ("Strikes", stats.strikes.as_str(), true),
        ("Nightfalls", stats.nightfalls.as_str(), true),
        ("Fastest Nightfall", stats.fastest_nightfall.as_str(), true),
        ("Public Events", stats.public_events.as_str(), true),
        ("Heroic Public Events", stats.heroic_public_events.as_str(), true),
        ("Favorite Weapon", stats.favorite_weapon.as_str(), true),
        ("Total Raid Time", stats.raid_time.as_str(), true),
        ("Raids", stats.raids.as_str(), true),
        ("Time Played", stats.time_played.as_str(), true),
    ])
}

/// Builds the card for `kind`, or `None` when the document has nothing to show.
pub fn stats_embed(kind: StatsKind, document: &Value, membership: &Membership) -> Option<CreateEmbed> {
    match kind {
        StatsKind::Pve => document
            .as_object()
            .filter(|groups| !groups.is_empty())
            .map(|_| pve_embed(&PveStats::from_document(document), membership)),
        kind => all_time(document, kind.group())
            .map(|block| pvp_embed(&PvpStats::from_block(block), kind.title(), membership)),
    }
}
