//! Per-person slab boundary tables
//!
//! Each salesperson has four individually negotiated, strictly increasing
//! net-revenue boundaries. Crossing a boundary moves them into the next
//! bracket; the per-block rates above each boundary are global constants
//! (see [`crate::config::SLAB_RATES`]).

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;

/// Four strictly increasing revenue boundaries for one salesperson.
/// `slab1` is the eligibility floor: net revenue below it earns nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlabProfile {
    pub slab1: f64,
    pub slab2: f64,
    pub slab3: f64,
    pub slab4: f64,
}

impl SlabProfile {
    /// The fallback profile for people absent from the table.
    /// Degenerate (not strictly increasing), so the calculator treats the
    /// person as permanently ineligible.
    pub const ZERO: SlabProfile = SlabProfile {
        slab1: 0.0,
        slab2: 0.0,
        slab3: 0.0,
        slab4: 0.0,
    };

    pub fn new(slab1: f64, slab2: f64, slab3: f64, slab4: f64) -> Self {
        Self { slab1, slab2, slab3, slab4 }
    }

    pub fn boundaries(&self) -> [f64; 4] {
        [self.slab1, self.slab2, self.slab3, self.slab4]
    }

    /// A usable profile has strictly increasing boundaries
    pub fn is_valid(&self) -> bool {
        self.slab1 < self.slab2 && self.slab2 < self.slab3 && self.slab3 < self.slab4
    }
}

/// Immutable per-person slab profile table for one payout run
#[derive(Debug, Clone, Default)]
pub struct SlabTable {
    profiles: BTreeMap<String, SlabProfile>,
}

impl SlabTable {
    /// Build a table, rejecting any profile whose boundaries are not
    /// strictly increasing
    pub fn new(profiles: BTreeMap<String, SlabProfile>) -> Result<Self, EngineError> {
        for (name, profile) in &profiles {
            if !profile.is_valid() {
                return Err(EngineError::Config(format!(
                    "slab boundaries for '{}' must be strictly increasing: {:?}",
                    name,
                    profile.boundaries()
                )));
            }
        }
        Ok(Self { profiles })
    }

    /// Load a table from JSON: `{ "Name": {"slab1": ..., ...}, ... }`
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, EngineError> {
        let profiles: BTreeMap<String, SlabProfile> = serde_json::from_reader(reader)?;
        Self::new(profiles)
    }

    /// Profile for a person; unknown people get the all-zero profile and
    /// are therefore always "Not Reached"
    pub fn get(&self, name: &str) -> SlabProfile {
        self.profiles.get(name).copied().unwrap_or(SlabProfile::ZERO)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Builtin profile table for the two sales teams
    pub fn default_team() -> Self {
        // (name, slab1..slab4) — boundaries negotiated per person
        let entries: &[(&str, f64, f64, f64, f64)] = &[
            // Team 1
            ("Nisha Samuel", 90_000.0, 300_000.0, 500_000.0, 734_400.0),
            ("Bindu -", 130_000.0, 340_000.0, 540_000.0, 1_123_200.0),
            ("Remya Raghunath", 110_000.0, 320_000.0, 520_000.0, 907_200.0),
            ("Jibymol Varghese", 100_000.0, 310_000.0, 510_000.0, 820_800.0),
            ("akhila shaji", 100_000.0, 310_000.0, 510_000.0, 864_000.0),
            ("Geethu Babu", 110_000.0, 320_000.0, 520_000.0, 907_200.0),
            ("parvathy R", 80_000.0, 290_000.0, 490_000.0, 650_000.0),
            ("Arya S", 80_000.0, 290_000.0, 490_000.0, 640_000.0),
            // Team 2
            ("Remya Ravindran", 100_000.0, 310_000.0, 510_000.0, 864_000.0),
            ("Sumithra -", 120_000.0, 330_000.0, 530_000.0, 1_036_800.0),
            ("Jayasree -", 90_000.0, 300_000.0, 500_000.0, 777_600.0),
            ("SANIJA K P", 90_000.0, 300_000.0, 500_000.0, 777_600.0),
            ("Shubha Lakshmi", 90_000.0, 300_000.0, 500_000.0, 777_600.0),
            ("Arya Bose", 100_000.0, 310_000.0, 510_000.0, 864_000.0),
            ("Aneena Elsa Shibu", 90_000.0, 300_000.0, 500_000.0, 777_600.0),
            ("Merin j", 100_000.0, 310_000.0, 510_000.0, 660_000.0),
        ];

        let profiles = entries
            .iter()
            .map(|&(name, s1, s2, s3, s4)| (name.to_string(), SlabProfile::new(s1, s2, s3, s4)))
            .collect();

        Self { profiles }
    }
}
