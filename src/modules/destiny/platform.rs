use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Bungie.net membership type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Xbox,
    Playstation,
    Steam,
    Blizzard,
}

impl Platform {
    pub fn membership_type(self) -> u8 {
        match self {
            Self::Xbox => 1,
            Self::Playstation => 2,
            Self::Steam => 3,
            Self::Blizzard => 4,
        }
    }

    pub fn from_membership_type(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Xbox),
            2 => Some(Self::Playstation),
            3 => Some(Self::Steam),
            4 => Some(Self::Blizzard),
            _ => None,
        }
    }

    pub fn icon_url(self) -> &'static str {
        match self {
            Self::Xbox => "https://www.bungie.net/img/theme/bungienet/icons/xboxLiveLogo.png",
            Self::Playstation => "https://www.bungie.net/img/theme/bungienet/icons/psnLogo.png",
            Self::Steam => "https://www.bungie.net/img/theme/bungienet/icons/steamLogo.png",
            Self::Blizzard => "https://www.bungie.net/img/theme/bungienet/icons/blizzardLogo.png",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xbox => write!(f, "Xbox"),
            Self::Playstation => write!(f, "Playstation"),
            Self::Steam => write!(f, "Steam"),
            Self::Blizzard => write!(f, "Battle.net"),
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "xbox" | "xb" | "xbl" => Ok(Self::Xbox),
            "playstation" | "ps" | "psn" | "ps4" => Ok(Self::Playstation),
            "pc" | "bnet" | "battlenet" | "battle.net" | "blizzard" => Ok(Self::Blizzard),
            "steam" => Ok(Self::Steam),
            other => Err(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_aliases() {
        assert_eq!("XBL".parse::<Platform>(), Ok(Platform::Xbox));
        assert_eq!(" psn ".parse::<Platform>(), Ok(Platform::Playstation));
        assert_eq!("bnet".parse::<Platform>(), Ok(Platform::Blizzard));
        assert_eq!("pc".parse::<Platform>(), Ok(Platform::Blizzard));
        assert_eq!("steam".parse::<Platform>(), Ok(Platform::Steam));
        assert_eq!("stadia".parse::<Platform>(), Err("stadia".to_string()));
    }

    #[test]
    fn membership_types_match_bungie() {
        for platform in [
            Platform::Xbox,
            Platform::Playstation,
            Platform::Steam,
            Platform::Blizzard,
        ] {
            assert_eq!(
                Platform::from_membership_type(platform.membership_type()),
                Some(platform)
            );
        }
        assert_eq!(Platform::Blizzard.membership_type(), 4);
        assert_eq!(Platform::from_membership_type(254), None);
    }
}
