use crate::domain::model::{Aircraft, AlertReason};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

fn default_icao_prefixes() -> Vec<String> {
    ["43", "AE"].iter().map(|s| s.to_string()).collect()
}

fn default_callsign_prefixes() -> Vec<String> {
    [
        "MIL", "NOW", "ARR", "RRR", "RAF", "NATO", "AAC", "NAF", "PLF", "TTN", "XXXX", "00000000",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Prefix heuristic for military traffic.
///
/// `43xxxx` is the UK military ICAO block and `AExxxx` the US one; the
/// callsign list covers common tactical and air-force prefixes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilitaryClassifier {
    #[serde(default = "default_icao_prefixes")]
    pub icao_prefixes: Vec<String>,
    #[serde(default = "default_callsign_prefixes")]
    pub callsign_prefixes: Vec<String>,
}

impl Default for MilitaryClassifier {
    fn default() -> Self {
        Self {
            icao_prefixes: default_icao_prefixes(),
            callsign_prefixes: default_callsign_prefixes(),
        }
    }
}

impl MilitaryClassifier {
    pub fn is_military(&self, aircraft: &Aircraft) -> bool {
        let icao = aircraft.icao24.to_uppercase();
        let callsign = aircraft.callsign.to_uppercase();

        self.icao_prefixes
            .iter()
            .any(|p| icao.starts_with(&p.to_uppercase()))
            || (!callsign.is_empty()
                && self
                    .callsign_prefixes
                    .iter()
                    .any(|p| callsign.starts_with(&p.to_uppercase())))
    }
}

/// User-chosen ICAO24 addresses and callsigns, stored upper-case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favourites {
    entries: HashSet<String>,
}

impl Favourites {
    pub fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_uppercase)
            .collect();
        Self { entries }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Like [`Favourites::from_file`], but a broken file only costs the favourites.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::from_file(path) {
            Ok(favourites) => {
                tracing::info!("⭐ Favourites loaded: {} entries from {}", favourites.len(), path.display());
                tracing::debug!("Favourites: {:?}", favourites.entries);
                favourites
            }
            Err(e) => {
                tracing::error!("Error loading favourites from {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn contains(&self, aircraft: &Aircraft) -> bool {
        if self.entries.contains(&aircraft.icao24.to_uppercase()) {
            return true;
        }
        let callsign = aircraft.callsign.trim().to_uppercase();
        !callsign.is_empty() && self.entries.contains(&callsign)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Combines both rules; military takes precedence when both match.
#[derive(Debug, Clone, Default)]
pub struct AlertPolicy {
    pub military: MilitaryClassifier,
    pub favourites: Favourites,
}

impl AlertPolicy {
    pub fn new(military: MilitaryClassifier, favourites: Favourites) -> Self {
        Self { military, favourites }
    }

    pub fn reason_for(&self, aircraft: &Aircraft) -> Option<AlertReason> {
        if self.military.is_military(aircraft) {
            Some(AlertReason::Military)
        } else if self.favourites.contains(aircraft) {
            Some(AlertReason::Favourite)
        } else {
            None
        }
    }
}
