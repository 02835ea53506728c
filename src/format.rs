//! Display strings for catalog records.

use serde::Serialize;

use crate::model::CreatureDetail;

const SHARE_BASE_URL: &str = "https://www.pokemon.com/us/pokedex";

/// `25` -> `#025`.
pub fn format_id(id: u32) -> String {
    format!("#{:03}", id)
}

/// Uppercases the first character: `pikachu` -> `Pikachu`.
pub fn format_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Height in tenths of a metre.
pub fn format_height(height: u32) -> String {
    format!("{:.1} m", f64::from(height) / 10.0)
}

/// Weight in tenths of a kilogram.
pub fn format_weight(weight: u32) -> String {
    format!("{:.1} kg", f64::from(weight) / 10.0)
}

pub fn format_stat_name(stat: &str) -> String {
    match stat {
        "hp" => "HP",
        "attack" => "Attack",
        "defense" => "Defense",
        "special-attack" => "Sp. Attack",
        "special-defense" => "Sp. Defense",
        "speed" => "Speed",
        other => other,
    }
    .to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLink {
    pub title: String,
    pub message: String,
    pub url: String,
}

impl ShareLink {
    pub fn for_detail(detail: &CreatureDetail) -> Self {
        let name = format_name(&detail.name);
        Self {
            title: format!("{} - Pokédex", name),
            message: format!(
                "Check out {} {} from the Pokédex!",
                name,
                format_id(detail.id)
            ),
            url: format!("{}/{}", SHARE_BASE_URL, detail.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatLine {
    pub label: String,
    pub value: u8,
}

/// Human-readable rendering of a detail record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailDisplay {
    pub id: String,
    pub name: String,
    pub height: String,
    pub weight: String,
    /// First type tag, which picks the card colour. `None` for untyped records.
    pub primary_type: Option<String>,
    pub stats: Vec<StatLine>,
}

impl From<&CreatureDetail> for DetailDisplay {
    fn from(detail: &CreatureDetail) -> Self {
        Self {
            id: format_id(detail.id),
            name: format_name(&detail.name),
            height: format_height(detail.height),
            weight: format_weight(detail.weight),
            primary_type: detail.primary_type().map(str::to_string),
            stats: detail
                .stats
                .iter()
                .map(|stat| StatLine {
                    label: format_stat_name(&stat.name),
                    value: stat.value,
                })
                .collect(),
        }
    }
}
