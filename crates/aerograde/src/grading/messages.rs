use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Declares one catalog section with its built-in English text.
macro_rules! catalog_section {
    ($(#[$meta:meta])* $name:ident { $($field:ident => $text:expr,)* }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(default, rename_all = "camelCase")]
        pub struct $name {
            $(pub $field: String,)*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $($field: $text.to_string(),)*
                }
            }
        }
    };
}

catalog_section! {
    /// Closing lines and the preflight rejection.
    SummaryMessages {
        score => "Total score: %d/%d",
        cutout => "Automated checks only. Report, drawings and presentation are graded separately.",
        invalid_workbook => "Invalid for analysis: Excel errors in Main sheet at %s. Correct the errors and resubmit.",
    }
}

catalog_section! {
    AeroMessages {
        cl_max => "Aero tab: maximum lift coefficient %.2f exceeds the allowed %.2f. -1 point",
        oswald => "Aero tab: Oswald efficiency %.2f is outside the range %.2f to %.2f. -1 point",
        cd0 => "Aero tab: zero-lift drag coefficient %.4f is below the minimum of %.4f. -1 point",
    }
}

catalog_section! {
    MissionMessages {
        leg1 => "Leg 1: Altitude must be 0 and AB = 100 (found alt=%.1f, AB=%.1f)",
        leg2_altitude => "Leg 2: Altitude must be between Leg 1 and Leg 3 (found alt2=%.1f, alt1=%.1f, alt3=%.1f)",
        leg2_mach => "Leg 2: Mach must be between Leg 1 and Leg 3 (found mach2=%.2f, mach1=%.2f, mach3=%.2f)",
        leg2_afterburner => "Leg 2: AB must be 0 (found AB=%.1f)",
        cruise => "Leg %d: Must be ≥35,000 ft, Mach = 0.9, AB = 0 (found alt=%.1f, mach=%.2f, AB=%.1f)",
        supercruise => "Leg %d: Must be ≥35,000 ft, Mach = Contraints block Supercruise Mach (cell U4), AB = 0, Distance ≥ 150 nm (found alt=%.1f, mach=%.2f, AB=%.1f, dist=%.1f)",
        combat => "Leg %d: Must be ≥30,000 ft, Mach ≥ 1.2, AB = 100, Time ≥ 2 min (found alt=%.1f, mach=%.2f, AB=%.1f, time=%.2f)",
        loiter => "Leg %d: Must be 10,000 ft, Mach = 0.4, AB = 0, Time = 20 min (found alt=%.1f, mach=%.2f, AB=%.1f, time=%.2f)",
        summary => "Mission profile does not match the design mission. No points deducted, but fix it before the final submission.",
    }
}

catalog_section! {
    ThrustMessages {
        shortfall => "Thrust available does not exceed drag at %d flight condition(s) on the Miss tab. -1 point",
        takeoff_roll => "Takeoff ground roll exceeds the required takeoff distance. -1 point",
    }
}

catalog_section! {
    ConstraintMessages {
        radius_low => "Mission radius of %.1f nm is below the threshold of %.0f nm.",
        radius_objective => "Meets mission radius objective (%.1f nm).",
        payload_integer => "Payload counts for AIM-120 and AIM-9 must be integers.",
        payload_low => "Payload of %d AIM-120 is below the threshold of %d.",
        payload_objective => "Meets payload objective (%d AIM-120, %d AIM-9).",
        mach_equal => "%s: Mach %.2f does not match the required Mach %.2f.",
        mach_minimum => "%s: Mach %.2f is below the threshold of %.2f.",
        mach_objective => "%s: Meets objective Mach %.2f (design Mach %.2f).",
        altitude_equal => "%s: altitude %.0f ft does not match the required %.0f ft.",
        altitude_minimum => "%s: altitude %.0f ft is below the minimum of %.0f ft.",
        load_factor_equal => "%s: load factor %.2f does not match the required %.2f.",
        load_factor_minimum => "%s: load factor %.2f is below the threshold of %.2f.",
        load_factor_objective => "%s: Meets objective load factor %.2f (design %.2f).",
        afterburner_equal => "%s: AB setting %.0f does not match the required %.0f.",
        ps_equal => "%s: Ps %.0f ft/s does not match the required %.0f ft/s.",
        ps_minimum => "%s: Ps %.0f ft/s is below the threshold of %.0f ft/s.",
        ps_objective => "%s: Meets objective Ps %.0f ft/s (design %.0f ft/s).",
        beta_equal => "%s: weight fraction (beta) should be %.3f, found %.3f.",
        cdx_equal => "%s: CDx %.4f does not match the required %.4f.",
        cdx_allowed => "%s: CDx %.4f must be one of %s.",
        takeoff_high => "Takeoff distance of %.0f ft exceeds the threshold of %.0f ft.",
        takeoff_objective => "Meets takeoff distance objective (%.0f ft).",
        landing_high => "Landing distance of %.0f ft exceeds the threshold of %.0f ft.",
        landing_objective => "Meets landing distance objective (%.0f ft).",
        curve_detail => "%s: design T/W of %.3f is below the required %.3f at the design W/S.",
        landing_curve => "Landing: design W/S of %.1f exceeds the landing limit of %.1f.",
        curve_failure => "Design point lies below the constraint curve%s for: %s.",
        curve_suffix_many => " The design point misses nearly every constraint; revisit the W/S and T/W selection.",
        curve_suffix_few => " Move the design point into the feasible region of the constraint diagram.",
        summary => "Constraint table entries do not meet the requirements. -1 point",
    }
}

catalog_section! {
    AttachmentMessages {
        pcs_longitudinal => "PCS root chord extends past the end of the fuselage, so the PCS is not attached.",
        vt_longitudinal => "Vertical tail root chord extends past the end of the fuselage, so the VT is not attached.",
        pcs_vertical => "PCS vertical location is outside the fuselage height, so the PCS is not attached.",
        vt_lateral => "Vertical tail is mounted outboard of the fuselage width, so the VT is not attached.",
        strake => "Strake does not reach the wing leading edge, so the strake is not attached.",
        behind_fuselage => "Components are located at or behind the end of the fuselage (length %.1f ft).",
        aspect_ratio => "%s aspect ratio of %.2f must be lower than the wing aspect ratio of %.2f.",
        engine_protrusion => "Engine extends %.1f ft past the end of the fuselage.",
        engine_clearance => "Engine diameter of %.1f ft does not fit inside the fuselage height at the engine station.",
        tail_overlap => "Offset vertical tails must overlap the PCS root chord to attach to structure.",
        stealth => "%s %s edge at %.1f deg is not aligned with a wing edge (planform alignment).",
        deduction => "Geometry and attachment problems found. -1 point",
    }
}

catalog_section! {
    StabilityMessages {
        static_margin => "Static margin is outside the allowed range of -0.10 to 0.11.",
        static_margin_warning => "Static margin is negative; the design relies on the flight control system for pitch stability.",
        roll => "Cl_beta must be below -0.001 for roll stability.",
        yaw => "Cn_beta must be above 0.002 for directional stability.",
        ratio => "Cl_beta/Cn_beta ratio must be between -1.0 and -0.3.",
        deduction => "Stability requirements not met. -1 point",
    }
}

catalog_section! {
    FuelMessages {
        fuel => "Fuel available (%.0f lb) is less than the mission fuel required (%.0f lb).",
        volume => "Internal volume is over-subscribed by %.1f cu ft.",
        deduction => "Fuel and volume requirements not met. -1 point",
    }
}

catalog_section! {
    CostMessages {
        ceiling => "Recurring unit cost of $%.1fM exceeds the threshold of $%.1fM. -1 point",
        objective => "Meets recurring cost objective ($%.1fM).",
    }
}

catalog_section! {
    GearMessages {
        nose => "Nose gear should carry between 10 and 20 percent of the aircraft weight.",
        tipback => "Tip-back angle must be smaller than the tail-strike angle.",
        rollover => "Roll-over angle must be smaller than the allowable roll-over angle.",
        rotation => "Rotation speed must be below 200 kts.",
        deduction => "Landing gear requirements not met. -1 point",
    }
}

/// Every feedback string and template the rule modules emit.
///
/// Sections deserialize with defaults, so an override file only needs the
/// entries it changes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageCatalog {
    pub summary: SummaryMessages,
    pub aero: AeroMessages,
    pub mission: MissionMessages,
    pub thrust: ThrustMessages,
    pub constraint: ConstraintMessages,
    pub attachment: AttachmentMessages,
    pub stability: StabilityMessages,
    pub fuel: FuelMessages,
    pub cost: CostMessages,
    pub gear: GearMessages,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read message catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid message catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl MessageCatalog {
    pub fn english() -> Self {
        Self::default()
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(raw)?)
    }
}
