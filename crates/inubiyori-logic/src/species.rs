//! Dog species and their fixed traits.
//!
//! Species is a closed enum; per-species behavior comes from a static
//! trait table indexed by the variant, never from a type hierarchy.
//!
//! ```
//! use inubiyori_logic::species::Species;
//!
//! let shiba: Species = "shiba inu".parse().unwrap();
//! assert_eq!(shiba.traits().max_lifespan_days, 28.0);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// The dogs a player can adopt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Species {
    Corgi,
    Dachshund,
    Shiba,
}

/// Fixed per-species multipliers and limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesTraits {
    pub display_name: &'static str,
    pub temperament: &'static str,
    /// Multiplier on passive hunger decay.
    pub hunger_rate: f64,
    /// Multiplier on passive energy regeneration.
    pub energy_rate: f64,
    /// Multiplier on passive growth point gain.
    pub growth_rate: f64,
    /// Simulated days after which the dog dies of old age.
    pub max_lifespan_days: f64,
}

static TRAITS: [SpeciesTraits; 3] = [
    SpeciesTraits {
        display_name: "Corgi",
        temperament: "lively and clever",
        hunger_rate: 1.2,
        energy_rate: 1.5,
        growth_rate: 1.0,
        max_lifespan_days: 30.0,
    },
    SpeciesTraits {
        display_name: "Dachshund",
        temperament: "endlessly curious",
        hunger_rate: 1.0,
        energy_rate: 1.2,
        growth_rate: 0.9,
        max_lifespan_days: 35.0,
    },
    SpeciesTraits {
        display_name: "Shiba",
        temperament: "loyal and brave",
        hunger_rate: 1.1,
        energy_rate: 1.3,
        growth_rate: 1.1,
        max_lifespan_days: 28.0,
    },
];

impl Species {
    /// All species in adoption-menu order.
    pub const ALL: [Species; 3] = [Species::Corgi, Species::Dachshund, Species::Shiba];

    pub fn traits(self) -> &'static SpeciesTraits {
        &TRAITS[self as usize]
    }

    pub fn display_name(self) -> &'static str {
        self.traits().display_name
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Species {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "corgi" => Ok(Species::Corgi),
            "dachshund" | "miniature dachshund" | "mini dachshund" => Ok(Species::Dachshund),
            "shiba" | "shiba inu" => Ok(Species::Shiba),
            _ => Err(InputError::UnknownSpecies(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_table_matches_variant() {
        for species in Species::ALL {
            assert_eq!(species.traits().display_name, species.to_string());
        }
    }

    #[test]
    fn test_corgi_traits() {
        let t = Species::Corgi.traits();
        assert_eq!(t.hunger_rate, 1.2);
        assert_eq!(t.energy_rate, 1.5);
        assert_eq!(t.growth_rate, 1.0);
        assert_eq!(t.max_lifespan_days, 30.0);
    }

    #[test]
    fn test_dachshund_lives_longest() {
        let longest = Species::ALL
            .iter()
            .max_by(|a, b| {
                a.traits()
                    .max_lifespan_days
                    .total_cmp(&b.traits().max_lifespan_days)
            })
            .copied();
        assert_eq!(longest, Some(Species::Dachshund));
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("Corgi".parse::<Species>(), Ok(Species::Corgi));
        assert_eq!("  SHIBA INU ".parse::<Species>(), Ok(Species::Shiba));
        assert_eq!(
            "miniature dachshund".parse::<Species>(),
            Ok(Species::Dachshund)
        );
    }

    #[test]
    fn test_parse_unknown_rejected() {
        assert_eq!(
            "poodle".parse::<Species>(),
            Err(InputError::UnknownSpecies("poodle".into()))
        );
    }
}
