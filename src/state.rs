//! Application store: the single owner of shared mutable state.
//!
//! The shell constructs one `AppState` per session and passes it by
//! reference into the command layer; views borrow read access and never
//! hold their own copy of the neighbor list. The advisory session keeps its
//! own transcript and does not live here.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;

use crate::types::{
    ActivityEntry, BuildingFacts, Config, ContactStatus, Neighbor, PetitionStatus, Role, ViewTab,
};

/// Maximum number of activity entries kept in memory.
const MAX_ACTIVITY_SIZE: usize = 50;

/// Fixed capacity of the seed building.
pub const SEED_TOTAL_UNITS: u32 = 12;

/// Shared state for one application session.
pub struct AppState {
    pub config: Mutex<Config>,
    /// The one shared mutable collection. All writes go through the helpers
    /// below so each update is atomic from the caller's perspective.
    pub neighbors: Mutex<Vec<Neighbor>>,
    pub active_tab: Mutex<ViewTab>,
    pub activity: Mutex<Vec<ActivityEntry>>,
    pub building_name: String,
    pub total_units: u32,
    pub building_facts: BuildingFacts,
}

impl AppState {
    /// Build a store seeded with the demo building.
    pub fn new(config: Config) -> Self {
        Self::with_neighbors(config, seed_neighbors())
    }

    /// Build a store over an externally supplied neighbor list. The core
    /// never assumes a particular backing source for the records.
    pub fn with_neighbors(config: Config, neighbors: Vec<Neighbor>) -> Self {
        Self {
            config: Mutex::new(config),
            neighbors: Mutex::new(neighbors),
            active_tab: Mutex::new(ViewTab::Dashboard),
            activity: Mutex::new(Vec::new()),
            building_name: "Victoria Garden Courts".to_string(),
            total_units: SEED_TOTAL_UNITS,
            building_facts: BuildingFacts {
                freeholder_name: "Earls Court Freeholds Ltd".to_string(),
                managing_agent: "Prestige Property Mgmt".to_string(),
                annual_fees: "£42,000".to_string(),
            },
        }
    }

    /// Snapshot of the neighbor list in stable insertion order.
    pub fn neighbors_snapshot(&self) -> Vec<Neighbor> {
        self.neighbors
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Apply a mutation to the neighbor with the given id. Returns false
    /// when no record carries that id.
    pub fn update_neighbor(&self, id: &str, f: impl FnOnce(&mut Neighbor)) -> bool {
        if let Ok(mut guard) = self.neighbors.lock() {
            if let Some(neighbor) = guard.iter_mut().find(|n| n.id == id) {
                f(neighbor);
                return true;
            }
        }
        false
    }

    /// Append a neighbor record discovered during outreach.
    pub fn push_neighbor(&self, neighbor: Neighbor) {
        if let Ok(mut guard) = self.neighbors.lock() {
            guard.push(neighbor);
        }
    }

    /// Record a line in the recent-activity feed, newest first.
    pub fn record_activity(&self, message: impl Into<String>) {
        if let Ok(mut guard) = self.activity.lock() {
            guard.insert(
                0,
                ActivityEntry {
                    message: message.into(),
                    occurred_at: Utc::now(),
                },
            );

            if guard.len() > MAX_ACTIVITY_SIZE {
                guard.truncate(MAX_ACTIVITY_SIZE);
            }
        }
    }

    /// Most recent activity entries, newest first.
    pub fn recent_activity(&self, limit: usize) -> Vec<ActivityEntry> {
        self.activity
            .lock()
            .map(|guard| guard.iter().take(limit).cloned().collect())
            .unwrap_or_default()
    }

    pub fn active_tab(&self) -> ViewTab {
        self.active_tab
            .lock()
            .map(|guard| *guard)
            .unwrap_or(ViewTab::Dashboard)
    }

    pub fn set_active_tab(&self, tab: ViewTab) {
        if let Ok(mut guard) = self.active_tab.lock() {
            *guard = tab;
        }
    }
}

/// The six-unit demo building the campaign opens with.
pub fn seed_neighbors() -> Vec<Neighbor> {
    fn neighbor(
        id: &str,
        unit: &str,
        name: &str,
        status: PetitionStatus,
        is_resident: bool,
        role: Option<Role>,
        contact_status: ContactStatus,
    ) -> Neighbor {
        Neighbor {
            id: id.to_string(),
            unit: unit.to_string(),
            name: name.to_string(),
            status,
            is_resident,
            role,
            contact_status,
        }
    }

    vec![
        neighbor(
            "1",
            "Flat 1",
            "Alex Thompson",
            PetitionStatus::Signed,
            true,
            Some(Role::Admin),
            ContactStatus::Available,
        ),
        neighbor(
            "2",
            "Flat 2",
            "Sarah Jenkins",
            PetitionStatus::Signed,
            true,
            None,
            ContactStatus::Available,
        ),
        neighbor(
            "3",
            "Flat 3",
            "Michael Chen",
            PetitionStatus::Pending,
            false,
            None,
            ContactStatus::Available,
        ),
        neighbor(
            "4",
            "Flat 4",
            "Unknown Owner",
            PetitionStatus::Pending,
            true,
            None,
            ContactStatus::Missing,
        ),
        neighbor(
            "5",
            "Flat 5",
            "Alice Wong",
            PetitionStatus::Pending,
            true,
            None,
            ContactStatus::Available,
        ),
        neighbor(
            "6",
            "Flat 6",
            "Bob Smith",
            PetitionStatus::Opposed,
            false,
            None,
            ContactStatus::Missing,
        ),
    ]
}

/// Get the canonical config file path (~/.commonhome/config.json)
pub fn config_path() -> Result<PathBuf, String> {
    let home = dirs::home_dir().ok_or("Could not find home directory")?;
    Ok(home.join(".commonhome").join("config.json"))
}

/// Load configuration from ~/.commonhome/config.json.
///
/// A missing file is a normal first run and yields the defaults; a file
/// that exists but does not parse is an error worth surfacing.
pub fn load_config() -> Result<Config, String> {
    read_config(&config_path()?)
}

fn read_config(path: &Path) -> Result<Config, String> {
    if !path.exists() {
        log::info!("No config at {}; using defaults", path.display());
        return Ok(Config::default());
    }

    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read config: {}", e))?;

    serde_json::from_str(&content).map_err(|e| format!("Failed to parse config: {}", e))
}

/// Write config to ~/.commonhome/config.json, creating the directory on
/// first use.
pub fn save_config(config: &Config) -> Result<(), String> {
    write_config(&config_path()?, config)
}

fn write_config(path: &Path, config: &Config) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config dir: {}", e))?;
        }
    }

    let content = serde_json::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;
    fs::write(path, content).map_err(|e| format!("Failed to write config: {}", e))?;

    Ok(())
}
