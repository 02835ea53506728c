// pokemon.rs
// Wire shapes of the PokeAPI responses the catalog reads, and their mapping
// into the catalog's own records.

use serde::{Deserialize, Serialize};

use crate::model::{CreatureDetail, Stat};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NamedAPIResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// Body of the summary endpoint. Paging fields are ignored since the
/// catalog is read in a single bulk request.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NamedAPIResourceList {
    pub results: Vec<NamedAPIResource>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub stats: Vec<PokemonStat>,
    pub types: Vec<PokemonType>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PokemonStat {
    pub base_stat: u8,
    pub stat: NamedAPIResource,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PokemonType {
    #[serde(default)]
    pub slot: u32,
    pub r#type: NamedAPIResource,
}

impl Pokemon {
    pub fn into_detail(self, image_base: &str) -> CreatureDetail {
        CreatureDetail {
            image_url: crate::model::image_url(image_base, self.id),
            id: self.id,
            name: self.name,
            height: self.height,
            weight: self.weight,
            types: self.types.into_iter().map(|t| t.r#type.name).collect(),
            stats: self
                .stats
                .into_iter()
                .map(|s| Stat {
                    name: s.stat.name,
                    value: s.base_stat,
                })
                .collect(),
        }
    }
}
