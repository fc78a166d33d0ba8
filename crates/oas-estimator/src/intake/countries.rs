//! Country-of-residence codes and the social security agreement list.

pub const CANADA: &str = "CAN";
/// Placeholder accepted for "some agreement country".
pub const AGREEMENT: &str = "AGREEMENT";
/// Placeholder accepted for "a country without an agreement".
pub const NO_AGREEMENT: &str = "NO_AGREEMENT";

/// ISO 3166-1 alpha-3 codes of countries with a social security agreement with Canada.
const AGREEMENT_COUNTRIES: &[&str] = &[
    "ATG", "AUS", "AUT", "BEL", "BGR", "BRA", "BRB", "CHE", "CHL", "CYP", "CZE", "DEU", "DMA",
    "DNK", "ESP", "EST", "FIN", "FRA", "GBR", "GRC", "GRD", "HRV", "HUN", "IND", "IRL", "ISL",
    "ISR", "ITA", "JAM", "JEY", "JPN", "KNA", "KOR", "LCA", "LTU", "LUX", "LVA", "MAR", "MEX",
    "MKD", "MLT", "NLD", "NOR", "NZL", "PHL", "POL", "PRT", "ROU", "SRB", "SVK", "SVN", "SWE",
    "TTO", "TUR", "URY", "USA", "VCT",
];

/// Accepts three-letter uppercase codes plus the two agreement placeholders.
pub fn is_recognized(code: &str) -> bool {
    code == AGREEMENT
        || code == NO_AGREEMENT
        || (code.len() == 3 && code.bytes().all(|byte| byte.is_ascii_uppercase()))
}

pub fn is_canada(code: &str) -> bool {
    code == CANADA
}

pub fn has_agreement(code: &str) -> bool {
    code == AGREEMENT || AGREEMENT_COUNTRIES.binary_search(&code).is_ok()
}

/// Years in Canada below which the social-country question applies.
pub fn residency_threshold(code: Option<&str>) -> u32 {
    match code {
        Some(code) if is_canada(code) => 10,
        _ => 20,
    }
}
