use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const ZONE_PREFIX: &str = "tier-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    S,
    A,
    B,
    C,
    D,
    E,
    F,
    #[serde(rename = "NP")]
    NotPlayed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTier(pub String);

impl Tier {
    pub const ALL: [Tier; 8] = [
        Tier::S,
        Tier::A,
        Tier::B,
        Tier::C,
        Tier::D,
        Tier::E,
        Tier::F,
        Tier::NotPlayed,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Tier::S => "S",
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
            Tier::D => "D",
            Tier::E => "E",
            Tier::F => "F",
            Tier::NotPlayed => "NP",
        }
    }

    pub fn zone_id(self) -> String {
        format!("{}{}", ZONE_PREFIX, self.code().to_lowercase())
    }

    pub fn from_zone_id(zone: &str) -> Result<Tier, UnknownTier> {
        zone.strip_prefix(ZONE_PREFIX)
            .ok_or_else(|| UnknownTier(zone.to_owned()))
            .and_then(|code| code.to_uppercase().parse())
            .map_err(|_| UnknownTier(zone.to_owned()))
    }

    pub fn color(self) -> &'static str {
        match self {
            Tier::S => "#FFD700",
            Tier::A => "#FF6B6B",
            Tier::B => "#4ECDC4",
            Tier::C => "#45B7D1",
            Tier::D => "#96CEB4",
            Tier::E => "#FFEAA7",
            Tier::F => "#DDA0DD",
            Tier::NotPlayed => "#778899",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Tier {
    type Err = UnknownTier;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Tier::ALL
            .into_iter()
            .find(|tier| tier.code() == value)
            .ok_or_else(|| UnknownTier(value.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_exactly() {
        assert_eq!("NP".parse::<Tier>(), Ok(Tier::NotPlayed));
        assert_eq!("S".parse::<Tier>(), Ok(Tier::S));
        assert!("s".parse::<Tier>().is_err());
        assert!("G".parse::<Tier>().is_err());
        assert!("".parse::<Tier>().is_err());
    }

    #[test]
    fn zone_ids_resolve_to_their_tier() {
        for tier in Tier::ALL {
            assert_eq!(Tier::from_zone_id(&tier.zone_id()), Ok(tier));
        }
        assert_eq!(Tier::NotPlayed.zone_id(), "tier-np");
    }

    #[test]
    fn unknown_zone_is_rejected() {
        assert_eq!(
            Tier::from_zone_id("tier-x"),
            Err(UnknownTier("tier-x".to_string()))
        );
        assert!(Tier::from_zone_id("s").is_err());
    }

    #[test]
    fn serializes_not_played_as_np() {
        assert_eq!(serde_json::to_string(&Tier::NotPlayed).unwrap(), "\"NP\"");
        let tier: Tier = serde_json::from_str("\"B\"").unwrap();
        assert_eq!(tier, Tier::B);
        assert!(serde_json::from_str::<Tier>("\"Z\"").is_err());
    }
}
