//! Region → IANA timezone lookup.
//!
//! Listings carry a US state name, not an explicit timezone. Each state maps
//! to its dominant IANA zone; unknown regions fall back to Eastern so a bad
//! value renders as a plausible schedule instead of an error page.

use chrono_tz::Tz;

/// Default zone for unmapped regions.
pub const DEFAULT_TZ: Tz = Tz::America__New_York;

/// Resolve a US state name to its dominant IANA timezone.
///
/// Case-insensitive, whitespace-trimmed. Split-zone states (Tennessee,
/// Oregon, Idaho, …) use the zone covering the majority of their population.
pub fn region_timezone(region: &str) -> Tz {
    match region.trim().to_lowercase().as_str() {
        "alabama" => Tz::America__Chicago,
        "alaska" => Tz::America__Anchorage,
        "arizona" => Tz::America__Phoenix,
        "arkansas" => Tz::America__Chicago,
        "california" => Tz::America__Los_Angeles,
        "colorado" => Tz::America__Denver,
        "connecticut" => Tz::America__New_York,
        "delaware" => Tz::America__New_York,
        "district of columbia" => Tz::America__New_York,
        "florida" => Tz::America__New_York,
        "georgia" => Tz::America__New_York,
        "hawaii" => Tz::Pacific__Honolulu,
        "idaho" => Tz::America__Boise,
        "illinois" => Tz::America__Chicago,
        "indiana" => Tz::America__Indiana__Indianapolis,
        "iowa" => Tz::America__Chicago,
        "kansas" => Tz::America__Chicago,
        "kentucky" => Tz::America__New_York,
        "louisiana" => Tz::America__Chicago,
        "maine" => Tz::America__New_York,
        "maryland" => Tz::America__New_York,
        "massachusetts" => Tz::America__New_York,
        "michigan" => Tz::America__Detroit,
        "minnesota" => Tz::America__Chicago,
        "mississippi" => Tz::America__Chicago,
        "missouri" => Tz::America__Chicago,
        "montana" => Tz::America__Denver,
        "nebraska" => Tz::America__Chicago,
        "nevada" => Tz::America__Los_Angeles,
        "new hampshire" => Tz::America__New_York,
        "new jersey" => Tz::America__New_York,
        "new mexico" => Tz::America__Denver,
        "new york" => Tz::America__New_York,
        "north carolina" => Tz::America__New_York,
        "north dakota" => Tz::America__Chicago,
        "ohio" => Tz::America__New_York,
        "oklahoma" => Tz::America__Chicago,
        "oregon" => Tz::America__Los_Angeles,
        "pennsylvania" => Tz::America__New_York,
        "rhode island" => Tz::America__New_York,
        "south carolina" => Tz::America__New_York,
        "south dakota" => Tz::America__Chicago,
        "tennessee" => Tz::America__Chicago,
        "texas" => Tz::America__Chicago,
        "utah" => Tz::America__Denver,
        "vermont" => Tz::America__New_York,
        "virginia" => Tz::America__New_York,
        "washington" => Tz::America__Los_Angeles,
        "west virginia" => Tz::America__New_York,
        "wisconsin" => Tz::America__Chicago,
        "wyoming" => Tz::America__Denver,
        _ => DEFAULT_TZ,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eastern_states() {
        assert_eq!(region_timezone("South Carolina"), Tz::America__New_York);
        assert_eq!(region_timezone("Maine"), Tz::America__New_York);
        assert_eq!(region_timezone("Florida"), Tz::America__New_York);
    }

    #[test]
    fn test_other_zones() {
        assert_eq!(region_timezone("Texas"), Tz::America__Chicago);
        assert_eq!(region_timezone("Colorado"), Tz::America__Denver);
        assert_eq!(region_timezone("California"), Tz::America__Los_Angeles);
        assert_eq!(region_timezone("Hawaii"), Tz::Pacific__Honolulu);
        assert_eq!(region_timezone("Alaska"), Tz::America__Anchorage);
    }

    #[test]
    fn test_no_dst_states() {
        // Arizona stays on MST year-round
        assert_eq!(region_timezone("Arizona"), Tz::America__Phoenix);
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(region_timezone("SOUTH CAROLINA"), Tz::America__New_York);
        assert_eq!(region_timezone("  tennessee  "), Tz::America__Chicago);
    }

    #[test]
    fn test_unknown_region_defaults_to_eastern() {
        assert_eq!(region_timezone("Puerto Rico"), DEFAULT_TZ);
        assert_eq!(region_timezone(""), DEFAULT_TZ);
        assert_eq!(region_timezone("Ontario"), DEFAULT_TZ);
    }
}
