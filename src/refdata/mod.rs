//! Static reference tables consumed by input validation
//!
//! Three read-only datasets ship with the crate: country and subdivision
//! codes accepted by the `geo` parameter, the Trends category id tree, and
//! the locale (`hl`) codes the service localizes responses into. They are
//! compile-time constants; nothing mutates them at runtime.

/// ISO 3166-1 alpha-2 country codes accepted as top-level geo values
pub const COUNTRIES: &[&str] = &[
    "AD", "AE", "AF", "AG", "AI", "AL", "AM", "AO", "AQ", "AR", "AS", "AT", "AU", "AW", "AX",
    "AZ", "BA", "BB", "BD", "BE", "BF", "BG", "BH", "BI", "BJ", "BL", "BM", "BN", "BO", "BQ",
    "BR", "BS", "BT", "BV", "BW", "BY", "BZ", "CA", "CC", "CD", "CF", "CG", "CH", "CI", "CK",
    "CL", "CM", "CN", "CO", "CR", "CU", "CV", "CW", "CX", "CY", "CZ", "DE", "DJ", "DK", "DM",
    "DO", "DZ", "EC", "EE", "EG", "EH", "ER", "ES", "ET", "FI", "FJ", "FK", "FM", "FO", "FR",
    "GA", "GB", "GD", "GE", "GF", "GG", "GH", "GI", "GL", "GM", "GN", "GP", "GQ", "GR", "GS",
    "GT", "GU", "GW", "GY", "HK", "HM", "HN", "HR", "HT", "HU", "ID", "IE", "IL", "IM", "IN",
    "IO", "IQ", "IR", "IS", "IT", "JE", "JM", "JO", "JP", "KE", "KG", "KH", "KI", "KM", "KN",
    "KP", "KR", "KW", "KY", "KZ", "LA", "LB", "LC", "LI", "LK", "LR", "LS", "LT", "LU", "LV",
    "LY", "MA", "MC", "MD", "ME", "MF", "MG", "MH", "MK", "ML", "MM", "MN", "MO", "MP", "MQ",
    "MR", "MS", "MT", "MU", "MV", "MW", "MX", "MY", "MZ", "NA", "NC", "NE", "NF", "NG", "NI",
    "NL", "NO", "NP", "NR", "NU", "NZ", "OM", "PA", "PE", "PF", "PG", "PH", "PK", "PL", "PM",
    "PN", "PR", "PS", "PT", "PW", "PY", "QA", "RE", "RO", "RS", "RU", "RW", "SA", "SB", "SC",
    "SD", "SE", "SG", "SH", "SI", "SJ", "SK", "SL", "SM", "SN", "SO", "SR", "SS", "ST", "SV",
    "SX", "SY", "SZ", "TC", "TD", "TF", "TG", "TH", "TJ", "TK", "TL", "TM", "TN", "TO", "TR",
    "TT", "TV", "TW", "TZ", "UA", "UG", "UM", "US", "UY", "UZ", "VA", "VC", "VE", "VG", "VI",
    "VN", "VU", "WF", "WS", "YE", "YT", "ZA", "ZM", "ZW",
];

/// Subdivision codes accepted as second-level geo values
///
/// Snapshot of the ISO 3166-2 subdivisions the service resolves for the
/// countries where sub-national queries are most common.
pub const SUBDIVISIONS: &[&str] = &[
    // United States: 50 states plus DC
    "US-AK", "US-AL", "US-AR", "US-AZ", "US-CA", "US-CO", "US-CT", "US-DC", "US-DE", "US-FL",
    "US-GA", "US-HI", "US-IA", "US-ID", "US-IL", "US-IN", "US-KS", "US-KY", "US-LA", "US-MA",
    "US-MD", "US-ME", "US-MI", "US-MN", "US-MO", "US-MS", "US-MT", "US-NC", "US-ND", "US-NE",
    "US-NH", "US-NJ", "US-NM", "US-NV", "US-NY", "US-OH", "US-OK", "US-OR", "US-PA", "US-RI",
    "US-SC", "US-SD", "US-TN", "US-TX", "US-UT", "US-VA", "US-VT", "US-WA", "US-WI", "US-WV",
    "US-WY",
    // Canada: provinces and territories
    "CA-AB", "CA-BC", "CA-MB", "CA-NB", "CA-NL", "CA-NS", "CA-NT", "CA-NU", "CA-ON", "CA-PE",
    "CA-QC", "CA-SK", "CA-YT",
    // Australia: states and territories
    "AU-ACT", "AU-NSW", "AU-NT", "AU-QLD", "AU-SA", "AU-TAS", "AU-VIC", "AU-WA",
    // United Kingdom: constituent countries
    "GB-ENG", "GB-NIR", "GB-SCT", "GB-WLS",
    // Germany: federal states
    "DE-BB", "DE-BE", "DE-BW", "DE-BY", "DE-HB", "DE-HE", "DE-HH", "DE-MV", "DE-NI", "DE-NW",
    "DE-RP", "DE-SH", "DE-SL", "DE-SN", "DE-ST", "DE-TH",
];

/// Trends category ids with their display names
///
/// Snapshot of the service's category tree: id 0 is "all categories",
/// the rest are the verticals the explore endpoint accepts.
pub const CATEGORIES: &[(i32, &str)] = &[
    (0, "All categories"),
    (3, "Arts & Entertainment"),
    (5, "Computers & Electronics"),
    (7, "Finance"),
    (8, "Games"),
    (11, "Home & Garden"),
    (12, "Business & Industrial"),
    (13, "Internet & Telecom"),
    (14, "People & Society"),
    (16, "News"),
    (18, "Shopping"),
    (19, "Law & Government"),
    (20, "Sports"),
    (22, "Books & Literature"),
    (23, "Performing Arts"),
    (24, "Visual Art & Design"),
    (25, "Autos & Vehicles"),
    (29, "Real Estate"),
    (30, "Hobbies & Leisure"),
    (31, "Programming"),
    (33, "Online Communities"),
    (34, "Celebrities & Entertainment News"),
    (35, "Comics & Animation"),
    (36, "Movies"),
    (37, "Banking"),
    (40, "Humor"),
    (41, "Music & Audio"),
    (42, "Offbeat"),
    (43, "Online Media"),
    (44, "Beauty & Fitness"),
    (45, "Health"),
    (47, "Autos & Vehicles Classifieds"),
    (53, "Travel"),
    (60, "Insurance"),
    (65, "Social Networks"),
    (66, "Pets & Animals"),
    (67, "Real Estate Listings"),
    (68, "Investing"),
    (71, "Food & Drink"),
    (74, "Jobs & Education"),
    (107, "Weather"),
    (174, "Fashion & Style"),
    (179, "Soccer"),
    (184, "Card Games"),
    (299, "Pop Music"),
    (396, "Hair Care"),
    (533, "Environmental Issues"),
    (958, "Politics"),
];

/// Locale (`hl`) codes the service localizes responses into
pub const LOCALES: &[&str] = &[
    "af", "ar", "bg", "bn", "ca", "cs", "da", "de", "el", "en-GB", "en-US", "es", "es-419",
    "et", "fa", "fi", "fil", "fr", "gu", "he", "hi", "hr", "hu", "id", "it", "ja", "kn", "ko",
    "lt", "lv", "ml", "mr", "ms", "nl", "no", "pl", "pt-BR", "pt-PT", "ro", "ru", "sk", "sl",
    "sr", "sv", "ta", "te", "th", "tr", "uk", "vi", "zh-CN", "zh-TW",
];

/// Check a geo value against the country and subdivision tables
///
/// The empty string is the worldwide sentinel and is always accepted.
pub fn is_valid_geo(code: &str) -> bool {
    code.is_empty() || COUNTRIES.contains(&code) || SUBDIVISIONS.contains(&code)
}

/// Check a category id against the category table
pub fn is_valid_category(id: i32) -> bool {
    CATEGORIES.iter().any(|(cat, _)| *cat == id)
}

/// Look up the display name for a category id
pub fn category_name(id: i32) -> Option<&'static str> {
    CATEGORIES
        .iter()
        .find(|(cat, _)| *cat == id)
        .map(|(_, name)| *name)
}

/// Check a locale code against the `hl` table
pub fn is_valid_locale(hl: &str) -> bool {
    LOCALES.contains(&hl)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_membership() {
        assert!(is_valid_geo("US"));
        assert!(is_valid_geo("KR"));
        assert!(!is_valid_geo("ZZ"));
    }

    #[test]
    fn test_subdivision_membership() {
        assert!(is_valid_geo("US-CA"));
        assert!(is_valid_geo("GB-SCT"));
        assert!(!is_valid_geo("US-XX"));
        assert!(!is_valid_geo("ZZ-CA"));
    }

    #[test]
    fn test_worldwide_sentinel() {
        assert!(is_valid_geo(""));
    }

    #[test]
    fn test_geo_is_case_sensitive() {
        // The service only accepts upper-case codes; validation mirrors that.
        assert!(!is_valid_geo("us"));
    }

    #[test]
    fn test_category_membership() {
        assert!(is_valid_category(0));
        assert!(is_valid_category(31));
        assert!(!is_valid_category(99999));
        assert_eq!(category_name(31), Some("Programming"));
        assert_eq!(category_name(99999), None);
    }

    #[test]
    fn test_locale_membership() {
        assert!(is_valid_locale("en-US"));
        assert!(is_valid_locale("ko"));
        assert!(!is_valid_locale("xx-YY"));
    }
}
