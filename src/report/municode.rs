//! Static municipal-code link tables.
//!
//! Pure lookup, no fetching: a city-level code (when the city is known and
//! listed) takes precedence over the county-level code.

use crate::counties::canonical_county_name;

/// Municode URL for a city, if the city publishes there
fn city_link(city: &str) -> Option<&'static str> {
    match city.trim().to_uppercase().as_str() {
        "TAMPA" => Some("https://library.municode.com/fl/tampa/codes/code_of_ordinances"),
        "ST. PETERSBURG" | "ST PETERSBURG" => {
            Some("https://library.municode.com/fl/st._petersburg/codes/code_of_ordinances")
        }
        "CLEARWATER" => {
            Some("https://library.municode.com/fl/clearwater/codes/land_development_code")
        }
        "SARASOTA" => Some("https://library.municode.com/fl/sarasota/codes/code_of_ordinances"),
        "BRADENTON" => Some("https://library.municode.com/fl/bradenton/codes/code_of_ordinances"),
        "PALMETTO" => Some("https://library.municode.com/fl/palmetto/codes/code_of_ordinances"),
        "PLANT CITY" => {
            Some("https://library.municode.com/fl/plant_city/codes/code_of_ordinances")
        }
        "TEMPLE TERRACE" => {
            Some("https://library.municode.com/fl/temple_terrace/codes/code_of_ordinances")
        }
        _ => None,
    }
}

fn county_link(county: &str) -> Option<&'static str> {
    match canonical_county_name(county).as_str() {
        "Hillsborough" => {
            Some("https://library.municode.com/fl/hillsborough_county/codes/land_development_code")
        }
        "Pinellas" => {
            Some("https://library.municode.com/fl/pinellas_county/codes/code_of_ordinances")
        }
        "Pasco" => Some("https://library.municode.com/fl/pasco_county/codes/land_development_code"),
        "Manatee" => {
            Some("https://library.municode.com/fl/manatee_county/codes/land_development_code")
        }
        "Sarasota" => {
            Some("https://library.municode.com/fl/sarasota_county/codes/code_of_ordinances")
        }
        _ => None,
    }
}

/// Municode link for the governing jurisdiction.
///
/// A matched city wins over the county; `None` when neither is listed.
pub fn municode_link(county: &str, city: &str) -> Option<&'static str> {
    city_link(city).or_else(|| county_link(county))
}

/// Search URL within a jurisdiction's code, if the jurisdiction is listed
pub fn municode_search_url(county: &str, search_term: &str) -> Option<String> {
    municode_link(county, "").map(|base| {
        format!("{}?searchText={}", base, search_term.replace(' ', "+"))
    })
}
