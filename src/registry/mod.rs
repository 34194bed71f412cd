//! Endpoint registry -- the ordered list of APIs a run will probe.
//!
//! The built-in set is the NASA Earth-science catalog the tool was written
//! for. A TOML file of `[[endpoint]]` tables can replace it at runtime
//! without changing anything downstream.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// A named HTTP(S) endpoint to health-check. URLs are opaque strings; query
/// parameters and embedded API keys are sent as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoint {
    pub name: String,
    pub url: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(rename = "endpoint")]
    endpoints: Vec<Endpoint>,
}

/// Load endpoints from a TOML registry file, preserving file order.
pub fn load_file(path: &Path) -> Result<Vec<Endpoint>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read registry file {}", path.display()))?;
    parse(&raw).with_context(|| format!("Failed to parse registry file {}", path.display()))
}

fn parse(raw: &str) -> Result<Vec<Endpoint>> {
    let file: RegistryFile = toml::from_str(raw)?;
    if file.endpoints.is_empty() {
        anyhow::bail!("registry contains no endpoints");
    }

    // Records are matched back to the registry by name, so names must be
    // unique.
    let mut seen = HashSet::new();
    for e in &file.endpoints {
        if !seen.insert(e.name.as_str()) {
            anyhow::bail!("duplicate endpoint name {:?}", e.name);
        }
    }

    Ok(file.endpoints)
}

fn entry(name: &str, url: &str, description: &str) -> Endpoint {
    Endpoint {
        name: name.to_string(),
        url: url.to_string(),
        description: description.to_string(),
    }
}

/// The built-in NASA API registry. Order is significant: reports and the
/// results file list endpoints exactly as they appear here.
pub fn builtin() -> Vec<Endpoint> {
    vec![
        entry(
            "CMR API",
            "https://cmr.earthdata.nasa.gov/search/collections?page_size=1",
            "Common Metadata Repository for Earth science data",
        ),
        entry(
            "GIBS WMTS GetCapabilities",
            "https://gibs.earthdata.nasa.gov/wmts/epsg4326/best/1.0.0/WMTSCapabilities.xml",
            "Global Imagery Browse Services Web Map Tile Service",
        ),
        entry(
            "NASA POWER API",
            "https://power.larc.nasa.gov/api/temporal/daily/point?parameters=T2M&community=RE&longitude=0&latitude=0&start=20200101&end=20200102&format=JSON",
            "Prediction of Worldwide Energy Resources",
        ),
        entry(
            "AppEEARS API",
            "https://appeears.earthdatacloud.nasa.gov/api/",
            "Application for Extracting and Exploring Analysis Ready Samples",
        ),
        entry(
            "NASA Open APIs - APOD",
            "https://api.nasa.gov/planetary/apod?api_key=DEMO_KEY",
            "Astronomy Picture of the Day",
        ),
        entry(
            "NASA Open APIs - EPIC",
            "https://api.nasa.gov/EPIC/api/natural/images?api_key=DEMO_KEY",
            "Earth Polychromatic Imaging Camera",
        ),
        entry(
            "NASA Open APIs - Earth",
            "https://api.nasa.gov/planetary/earth/assets?lon=-95.33&lat=29.78&date=2018-01-01&api_key=DEMO_KEY",
            "Earth imagery and assets",
        ),
        entry(
            "EONET (Natural Events)",
            "https://eonet.gsfc.nasa.gov/api/v3/events",
            "Earth Observatory Natural Event Tracker",
        ),
        entry(
            "Earthdata Search",
            "https://search.earthdata.nasa.gov/api/health",
            "Earthdata Search API health check",
        ),
        entry(
            "SEDAC Main Website",
            "https://sedac.ciesin.columbia.edu/",
            "SEDAC Main Website - Socioeconomic Data and Applications Center",
        ),
        entry(
            "SEDAC GPW v4 Service Info",
            "https://sedac.ciesin.columbia.edu/arcgis-gis-server/rest/services/sedac-gpw-v4?f=json",
            "SEDAC GPW v4 Service Information",
        ),
        entry(
            "SEDAC Data Catalog",
            "https://sedac.ciesin.columbia.edu/data/collection/gpw-v4",
            "SEDAC GPW v4 Data Collection Page",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_shape() {
        let endpoints = builtin();
        assert_eq!(endpoints.len(), 12);

        // Names must be unique: records are matched back to the registry by name.
        let mut names: Vec<&str> = endpoints.iter().map(|e| e.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 12);

        for e in &endpoints {
            assert!(e.url.starts_with("https://"), "{} is not https", e.name);
            assert!(!e.description.is_empty());
        }
    }

    #[test]
    fn test_builtin_keeps_demo_keys_verbatim() {
        let endpoints = builtin();
        let apod = endpoints
            .iter()
            .find(|e| e.name == "NASA Open APIs - APOD")
            .unwrap();
        assert!(apod.url.ends_with("api_key=DEMO_KEY"));
    }

    #[test]
    fn test_parse_registry_file() {
        let raw = r#"
            [[endpoint]]
            name = "Local health"
            url = "http://127.0.0.1:8080/health"
            description = "local test target"

            [[endpoint]]
            name = "Second"
            url = "http://127.0.0.1:8080/other"
            description = "another target"
        "#;

        let endpoints = parse(raw).unwrap();
        assert_eq!(endpoints.len(), 2);
        assert_eq!(endpoints[0].name, "Local health");
        assert_eq!(endpoints[1].url, "http://127.0.0.1:8080/other");
    }

    #[test]
    fn test_parse_rejects_empty_registry() {
        assert!(parse("").is_err());
        assert!(parse("endpoint = []").is_err());
    }

    #[test]
    fn test_parse_rejects_malformed_toml() {
        assert!(parse("[[endpoint]\nname = broken").is_err());
    }

    #[test]
    fn test_parse_rejects_duplicate_names() {
        let raw = r#"
            [[endpoint]]
            name = "Same"
            url = "http://127.0.0.1:8080/a"
            description = "first"

            [[endpoint]]
            name = "Same"
            url = "http://127.0.0.1:8080/b"
            description = "second"
        "#;

        let err = parse(raw).unwrap_err();
        assert!(err.to_string().contains("duplicate endpoint name"));
    }
}
