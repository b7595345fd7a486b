//! Contest registry
//!
//! Maps a contest name to its rule profile. Adding a contest means adding a
//! variant to [`ContestKind`] and one [`RegistryEntry`] line.

use serde::{Deserialize, Serialize};

use super::arrl_dx::{self, ArrlDx};
use super::arrl_ss::ArrlSs;
use super::cq_wpx::CqWpx;
use super::cq_ww::CqWw;
use super::cwt::Cwt;
use super::iaru_hf::IaruHf;
use super::jidx::JidxCw;
use super::naqp::Naqp;
use super::wag::{self, Wag};
use super::ContestRules;
use crate::error::ContestError;
use crate::reference::GeoInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContestMode {
    Cw,
    Ssb,
    Rtty,
}

/// A resolved profile, including any flags cached from the own station
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContestKind {
    CqWw(CqWw),
    CqWpx(CqWpx),
    JidxCw(JidxCw),
    IaruHf(IaruHf),
    ArrlDx(ArrlDx),
    Wag(Wag),
    ArrlSs(ArrlSs),
    Naqp(Naqp),
    Cwt(Cwt),
}

impl ContestKind {
    pub fn rules(&self) -> &dyn ContestRules {
        match self {
            ContestKind::CqWw(r) => r,
            ContestKind::CqWpx(r) => r,
            ContestKind::JidxCw(r) => r,
            ContestKind::IaruHf(r) => r,
            ContestKind::ArrlDx(r) => r,
            ContestKind::Wag(r) => r,
            ContestKind::ArrlSs(r) => r,
            ContestKind::Naqp(r) => r,
            ContestKind::Cwt(r) => r,
        }
    }

    /// Same contest, with station-derived flags recomputed for a new own
    /// geography
    pub fn rebuild(&self, own: Option<&GeoInfo>) -> Result<ContestKind, ContestError> {
        lookup(self.rules().name(), own)
    }
}

pub struct RegistryEntry {
    pub name: &'static str,
    pub build: fn(Option<&GeoInfo>) -> ContestKind,
}

fn is_us_or_canada(own: Option<&GeoInfo>) -> bool {
    own.map_or(false, arrl_dx::is_domestic)
}

fn is_germany(own: Option<&GeoInfo>) -> bool {
    own.map_or(false, wag::is_german)
}

fn is_japan(own: Option<&GeoInfo>) -> bool {
    own.map_or(false, |g| g.is_country("JA"))
}

pub static REGISTRY: &[RegistryEntry] = &[
    RegistryEntry { name: "CQ WW CW", build: |_| ContestKind::CqWw(CqWw { mode: ContestMode::Cw }) },
    RegistryEntry { name: "CQ WW SSB", build: |_| ContestKind::CqWw(CqWw { mode: ContestMode::Ssb }) },
    RegistryEntry { name: "CQ WPX CW", build: |_| ContestKind::CqWpx(CqWpx { mode: ContestMode::Cw }) },
    RegistryEntry { name: "CQ WPX SSB", build: |_| ContestKind::CqWpx(CqWpx { mode: ContestMode::Ssb }) },
    RegistryEntry { name: "JIDX CW", build: |own| ContestKind::JidxCw(JidxCw { japanese: is_japan(own) }) },
    RegistryEntry { name: "IARU HF", build: |_| ContestKind::IaruHf(IaruHf) },
    RegistryEntry {
        name: "ARRL DX CW",
        build: |own| ContestKind::ArrlDx(ArrlDx { mode: ContestMode::Cw, domestic: is_us_or_canada(own) }),
    },
    RegistryEntry {
        name: "ARRL DX SSB",
        build: |own| ContestKind::ArrlDx(ArrlDx { mode: ContestMode::Ssb, domestic: is_us_or_canada(own) }),
    },
    RegistryEntry { name: "DARC WAG", build: |own| ContestKind::Wag(Wag { domestic: is_germany(own) }) },
    RegistryEntry { name: "ARRL SS CW", build: |_| ContestKind::ArrlSs(ArrlSs { mode: ContestMode::Cw }) },
    RegistryEntry { name: "ARRL SS SSB", build: |_| ContestKind::ArrlSs(ArrlSs { mode: ContestMode::Ssb }) },
    RegistryEntry { name: "NAQP CW", build: |_| ContestKind::Naqp(Naqp { mode: ContestMode::Cw }) },
    RegistryEntry { name: "NAQP SSB", build: |_| ContestKind::Naqp(Naqp { mode: ContestMode::Ssb }) },
    RegistryEntry { name: "NAQP RTTY", build: |_| ContestKind::Naqp(Naqp { mode: ContestMode::Rtty }) },
    RegistryEntry { name: "CWT", build: |_| ContestKind::Cwt(Cwt) },
];

/// "cq_ww-cw" and "CQ  WW CW" both become "CQ WW CW"
pub fn normalize_name(name: &str) -> String {
    name.replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Resolve a contest by name; an unknown name is a configuration error
pub fn lookup(name: &str, own: Option<&GeoInfo>) -> Result<ContestKind, ContestError> {
    let wanted = normalize_name(name);
    REGISTRY
        .iter()
        .find(|entry| entry.name == wanted)
        .map(|entry| (entry.build)(own))
        .ok_or_else(|| ContestError::UnknownContest(name.to_string()))
}

pub fn contest_names() -> Vec<&'static str> {
    REGISTRY.iter().map(|entry| entry.name).collect()
}
