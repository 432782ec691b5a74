use crate::errors::RouteError;
use crate::model::CreatureKey;
use std::fmt;
use std::str::FromStr;

/// Client-side routes: the listing and one page per creature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Listing,
    Creature(CreatureKey),
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.trim();
        let segments: Vec<&str> = path.split('/').filter(|seg| !seg.is_empty()).collect();

        match segments.as_slice() {
            [] | ["pokemons"] => Ok(Route::Listing),
            ["pokemon"] => Err(RouteError::MissingKey(path.to_string())),
            ["pokemon", key] => Ok(Route::Creature(CreatureKey::from(*key))),
            _ => Err(RouteError::Unknown(path.to_string())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Listing => write!(f, "/pokemons"),
            Route::Creature(key) => write!(f, "/pokemon/{}", key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/", Route::Listing)]
    #[case("/pokemons", Route::Listing)]
    #[case("/pokemon/25", Route::Creature(CreatureKey::Id(25)))]
    #[case("/pokemon/Pikachu/", Route::Creature(CreatureKey::Name("pikachu".to_string())))]
    fn test_parse_routes(#[case] path: &str, #[case] expected: Route) {
        assert_eq!(path.parse::<Route>().unwrap(), expected);
    }

    #[test]
    fn test_route_errors() {
        assert_eq!(
            "/pokemon".parse::<Route>(),
            Err(RouteError::MissingKey("/pokemon".to_string()))
        );
        assert!(matches!(
            "/berries/1".parse::<Route>(),
            Err(RouteError::Unknown(_))
        ));
    }

    #[test]
    fn test_display_round_trip() {
        let route = Route::Creature(CreatureKey::Id(151));
        assert_eq!(route.to_string(), "/pokemon/151");
        assert_eq!(route.to_string().parse::<Route>().unwrap(), route);
    }
}
