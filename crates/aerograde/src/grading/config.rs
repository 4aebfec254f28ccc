use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Static rule configuration: the constraint table plus per-module tolerances.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub aero: AeroRules,
    pub mission: MissionRules,
    pub constraints: ConstraintRules,
    pub attachments: AttachmentRules,
    pub stability: StabilityRules,
    pub fuel: FuelRules,
    pub cost: CostRules,
    pub gear: GearRules,
}

#[derive(Debug, thiserror::Error)]
pub enum RuleSetError {
    #[error("failed to read rule set {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid rule set JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl RuleSet {
    pub fn standard() -> Self {
        Self::default()
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RuleSetError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| RuleSetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, RuleSetError> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AeroRules {
    pub max_cl: f64,
    pub oswald_min: f64,
    pub oswald_max: f64,
    pub cd0_min: f64,
}

impl Default for AeroRules {
    fn default() -> Self {
        Self {
            max_cl: 1.6,
            oswald_min: 0.6,
            oswald_max: 0.95,
            cd0_min: 0.01,
        }
    }
}

/// Envelope targets for the nine fixed mission legs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionRules {
    pub altitude_tolerance: f64,
    pub mach_tolerance: f64,
    pub time_tolerance: f64,
    pub distance_tolerance: f64,
    pub afterburner_tolerance: f64,
    pub full_afterburner: f64,
    pub cruise_altitude: f64,
    pub cruise_mach: f64,
    pub supercruise_distance: f64,
    pub combat_altitude: f64,
    pub combat_mach: f64,
    pub combat_time: f64,
    pub loiter_altitude: f64,
    pub loiter_mach: f64,
    pub loiter_time: f64,
}

impl Default for MissionRules {
    fn default() -> Self {
        Self {
            altitude_tolerance: 10.0,
            mach_tolerance: 0.05,
            time_tolerance: 0.1,
            distance_tolerance: 0.5,
            afterburner_tolerance: 10.0,
            full_afterburner: 100.0,
            cruise_altitude: 35_000.0,
            cruise_mach: 0.9,
            supercruise_distance: 150.0,
            combat_altitude: 30_000.0,
            combat_mach: 1.2,
            combat_time: 2.0,
            loiter_altitude: 10_000.0,
            loiter_mach: 0.4,
            loiter_time: 20.0,
        }
    }
}

/// Requirement on one physical quantity of a constraint row.
///
/// A quantity is either pinned to a value or bounded below with an optional
/// objective, never both.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    #[default]
    Unchecked,
    Equal(f64),
    Minimum {
        threshold: f64,
        #[serde(default)]
        objective: Option<f64>,
    },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragIndexTarget {
    #[default]
    Unchecked,
    Equal(f64),
    OneOf(Vec<f64>),
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightFractionTarget {
    #[default]
    Unchecked,
    Equal(f64),
    /// `1 - fuel_available / (2 * fuel_capacity)`: mid-mission weight.
    MidMissionFuel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceKind {
    Takeoff,
    Landing,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceLimit {
    pub kind: DistanceKind,
    pub threshold: f64,
    pub objective: f64,
}

/// One named row of the constraint table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintSpec {
    pub label: String,
    /// Spreadsheet row on the main sheet.
    pub row: u32,
    #[serde(default)]
    pub mach: Target,
    #[serde(default)]
    pub altitude: Target,
    #[serde(default)]
    pub load_factor: Target,
    #[serde(default)]
    pub afterburner: Option<f64>,
    #[serde(default)]
    pub ps: Target,
    #[serde(default)]
    pub drag_index: DragIndexTarget,
    #[serde(default)]
    pub weight_fraction: WeightFractionTarget,
    #[serde(default)]
    pub distance: Option<DistanceLimit>,
    /// Row of the required-T/W curve on the constants sheet.
    #[serde(default)]
    pub curve_row: Option<u32>,
    /// Emit the detailed T/W shortfall line when the curve check fails.
    #[serde(default)]
    pub report_curve_detail: bool,
}

impl ConstraintSpec {
    fn new(label: &str, row: u32) -> Self {
        Self {
            label: label.to_string(),
            row,
            mach: Target::Unchecked,
            altitude: Target::Unchecked,
            load_factor: Target::Unchecked,
            afterburner: None,
            ps: Target::Unchecked,
            drag_index: DragIndexTarget::Unchecked,
            weight_fraction: WeightFractionTarget::Unchecked,
            distance: None,
            curve_row: None,
            report_curve_detail: false,
        }
    }

    /// Flight-condition row: clean configuration at mid-mission weight.
    fn flight(label: &str, row: u32, curve_row: u32) -> Self {
        Self {
            ps: Target::Equal(0.0),
            drag_index: DragIndexTarget::Equal(0.0),
            weight_fraction: WeightFractionTarget::MidMissionFuel,
            curve_row: Some(curve_row),
            ..Self::new(label, row)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintRules {
    pub mach_tolerance: f64,
    pub altitude_tolerance: f64,
    pub load_factor_tolerance: f64,
    pub afterburner_tolerance: f64,
    pub ps_tolerance: f64,
    pub weight_fraction_tolerance: f64,
    pub drag_index_tolerance: f64,
    pub distance_tolerance: f64,
    pub payload_integer_tolerance: f64,
    pub radius_threshold: f64,
    pub radius_objective: f64,
    pub aim120_minimum: i64,
    pub aim9_objective: i64,
    /// Curve failures beyond this count switch to the "many" suffix.
    pub many_curve_failures: usize,
    pub specs: Vec<ConstraintSpec>,
}

impl Default for ConstraintRules {
    fn default() -> Self {
        Self {
            mach_tolerance: 0.01,
            altitude_tolerance: 1.0,
            load_factor_tolerance: 0.05,
            afterburner_tolerance: 1.0,
            ps_tolerance: 1.0,
            weight_fraction_tolerance: 0.02,
            drag_index_tolerance: 0.0001,
            distance_tolerance: 0.05,
            payload_integer_tolerance: 0.01,
            radius_threshold: 375.0,
            radius_objective: 410.0,
            aim120_minimum: 8,
            aim9_objective: 2,
            many_curve_failures: 6,
            specs: standard_constraint_specs(),
        }
    }
}

fn minimum(threshold: f64, objective: f64) -> Target {
    Target::Minimum {
        threshold,
        objective: Some(objective),
    }
}

fn standard_constraint_specs() -> Vec<ConstraintSpec> {
    vec![
        ConstraintSpec {
            altitude: Target::Minimum {
                threshold: 35_000.0,
                objective: None,
            },
            mach: minimum(2.0, 2.2),
            afterburner: Some(100.0),
            ..ConstraintSpec::flight("MaxMach", 3, 23)
        },
        ConstraintSpec {
            altitude: Target::Minimum {
                threshold: 35_000.0,
                objective: None,
            },
            mach: minimum(1.5, 1.8),
            afterburner: Some(0.0),
            ..ConstraintSpec::flight("Supercruise", 4, 24)
        },
        ConstraintSpec {
            mach: Target::Equal(1.2),
            altitude: Target::Equal(30_000.0),
            load_factor: minimum(3.0, 4.0),
            afterburner: Some(100.0),
            ..ConstraintSpec::flight("Combat Turn 1", 6, 26)
        },
        ConstraintSpec {
            mach: Target::Equal(0.9),
            altitude: Target::Equal(10_000.0),
            load_factor: minimum(4.0, 4.5),
            afterburner: Some(100.0),
            ..ConstraintSpec::flight("Combat Turn 2", 7, 27)
        },
        ConstraintSpec {
            mach: Target::Equal(1.15),
            altitude: Target::Equal(30_000.0),
            load_factor: Target::Equal(1.0),
            afterburner: Some(100.0),
            ps: minimum(400.0, 500.0),
            ..ConstraintSpec::flight("Ps1", 8, 28)
        },
        ConstraintSpec {
            mach: Target::Equal(0.9),
            altitude: Target::Equal(10_000.0),
            load_factor: Target::Equal(1.0),
            afterburner: Some(0.0),
            ps: minimum(400.0, 500.0),
            ..ConstraintSpec::flight("Ps2", 9, 29)
        },
        ConstraintSpec {
            altitude: Target::Equal(0.0),
            mach: Target::Equal(1.2),
            load_factor: Target::Equal(0.03),
            afterburner: Some(100.0),
            weight_fraction: WeightFractionTarget::Equal(1.0),
            drag_index: DragIndexTarget::OneOf(vec![0.0, 0.035]),
            curve_row: Some(32),
            report_curve_detail: true,
            distance: Some(DistanceLimit {
                kind: DistanceKind::Takeoff,
                threshold: 3000.0,
                objective: 2500.0,
            }),
            ..ConstraintSpec::new("Takeoff", 12)
        },
        ConstraintSpec {
            altitude: Target::Equal(0.0),
            mach: Target::Equal(1.3),
            load_factor: Target::Equal(0.5),
            afterburner: Some(0.0),
            weight_fraction: WeightFractionTarget::Equal(1.0),
            drag_index: DragIndexTarget::OneOf(vec![0.0, 0.045]),
            distance: Some(DistanceLimit {
                kind: DistanceKind::Landing,
                threshold: 5000.0,
                objective: 3500.0,
            }),
            ..ConstraintSpec::new("Landing", 13)
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachmentRules {
    /// Reference area (sq ft) at which a component counts as present.
    pub active_area: f64,
    /// Fraction of the root chord that must sit ahead of the fuselage end.
    pub attach_chord_fraction: f64,
    pub strake_tolerance: f64,
    pub parallel_tolerance_deg: f64,
    /// Lateral offset (ft) beyond which a vertical tail counts as offset-mounted.
    pub offset_tail_threshold: f64,
    pub engine_protrusion_allowance: f64,
}

impl Default for AttachmentRules {
    fn default() -> Self {
        Self {
            active_area: 1.0,
            attach_chord_fraction: 0.25,
            strake_tolerance: 0.5,
            parallel_tolerance_deg: 5.0,
            offset_tail_threshold: 0.5,
            engine_protrusion_allowance: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilityRules {
    pub static_margin_min: f64,
    pub static_margin_max: f64,
    pub roll_derivative_max: f64,
    pub yaw_derivative_min: f64,
    pub ratio_min: f64,
    pub ratio_max: f64,
}

impl Default for StabilityRules {
    fn default() -> Self {
        Self {
            static_margin_min: -0.1,
            static_margin_max: 0.11,
            roll_derivative_max: -0.001,
            yaw_derivative_min: 0.002,
            ratio_min: -1.0,
            ratio_max: -0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FuelRules {
    /// Extra fuel (lb) required beyond the mission burn.
    pub fuel_reserve: f64,
    /// Remaining volume (cu ft) below which the layout is over-subscribed.
    pub volume_reserve: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostRules {
    /// $M per aircraft.
    pub ceiling: f64,
    pub objective: f64,
}

impl Default for CostRules {
    fn default() -> Self {
        Self {
            ceiling: 115.0,
            objective: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GearRules {
    pub nose_load_min: f64,
    pub nose_load_max: f64,
    pub rotation_speed_max: f64,
}

impl Default for GearRules {
    fn default() -> Self {
        Self {
            nose_load_min: 10.0,
            nose_load_max: 20.0,
            rotation_speed_max: 200.0,
        }
    }
}
