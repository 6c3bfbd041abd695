//! Static schema tables: categorical domains, column drop lists, and the
//! fixed geographic reference point used as a feature.
//!
//! All tables are immutable statics, safe for concurrent read-only access.

/// Valid fuel type labels.
pub const FUEL_TYPES: &[&str] = &[
    "petrol",
    "diesel",
    "hybrid_petrol",
    "hybrid_diesel",
    "plug_in_hybrid_petrol",
    "plug_in_hybrid_diesel",
    "electric",
    "lpg",
    "cng",
    "hydrogen",
    "other",
];

pub const GEARBOX_TYPES: &[&str] = &["automatic", "manual", "semi_automatic"];

pub const INTERIOR_TYPES: &[&str] = &[
    "fabric",
    "leather_fabric",
    "leather",
    "alcantara",
    "velours",
    "other",
];

pub const EXTERIOR_COLORS: &[&str] = &[
    "black", "white", "blue", "silver", "purple", "grey", "red", "light_blue", "beige", "brown",
    "green", "yellow", "gold", "chrome", "burgundy", "orange", "lemon", "pink", "other",
];

pub const INTERIOR_COLORS: &[&str] = &[
    "black",
    "two_colors",
    "grey",
    "beige",
    "brown",
    "white",
    "red",
    "other",
];

pub const NUMBER_PLATE_ENDINGS: &[&str] = &["odd", "even", "unknown", "without", "historic"];

pub const DRIVE_TYPES: &[&str] = &["FWD", "4WD", "RWD", "AWD"];

pub const BODY_TYPES: &[&str] = &[
    "hatchback",
    "sedan",
    "SUV",
    "Pick-Up",
    "van",
    "station wagon",
    "coupe",
    "Hochdach-Kombi",
];

/// Fixed reference coordinates (Athens city centre) carried as a constant
/// feature pair on every assembled row.
pub const REFERENCE_LAT: f64 = 37.983_810;
pub const REFERENCE_LON: f64 = 23.727_539;

/// Numeric-looking fields that are nonetheless treated as discrete
/// categories by the column-type classifier.
pub const CATEGORICAL_EXCEPTIONS: &[&str] = &["seats", "doors", "number_of_gears", "rim_size"];

/// Substring marking optional-trim columns.
pub const OPTION_MARKER: &str = "option";

/// Substring marking extra-equipment flag columns.
pub const EXTRA_MARKER: &str = "extra";

/// Rarely-filled physical/technical attributes dropped by the
/// `drop_unpractical` strategy (on top of the optional-trim columns).
pub const UNPRACTICAL_COLUMNS: &[&str] = &[
    "interior_type",
    "kteo",
    "emissions_co2",
    "battery_charge_time",
    "interior_color",
    "rim_size",
    "vehicle_height",
    "number_of_gears",
    "torque",
    "gross_weight",
    "acceleration",
    "vehicle_width",
    "body_type",
    "vehicle_length",
    "top_speed",
    "trim",
    "wheelbase",
    "fuel_consumption",
    "drive_type",
];

/// Features found to carry little predictive importance in a prior
/// importance audit, dropped wholesale by `drop_low_importance`.
pub const LOW_IMPORTANCE_COLUMNS: &[&str] = &[
    "number_plate_ending",
    "extra_turbo",
    "gross_weight",
    "extra_eco_start_stop",
    "top_speed",
    "extra_wheelchair",
    "extra_electric_sunroof",
    "battery_charge_time",
    "extra_leather_seats",
    "is_new",
    "extra_locking_differential",
    "extra_bluetooth",
    "extra_lane_assist",
    "extra_alarm",
    "extra_bucket_seats",
    "kteo",
    "extra_aircondition(a_c)",
    "acceleration",
    "extra_armored",
    "never_crashed",
    "extra_hitch",
    "extra_collision_avoidance_system",
    "extra_steering_lights",
    "extra_rain_sensor",
    "extra_cd_player",
    "extra_isofix_children_seats",
    "extra_roof_rails",
    "extra_automatic_parking",
    "extra_cruise_control",
    "extra_power_windows",
    "extra_anti_theft_system_gps",
    "extra_abs",
    "extra_alumium_rims",
    "extra_tft_screen",
    "extra_led_lights",
    "extra_esp",
    "extra_xenon",
    "extra_trip_computer",
    "extra_power_steering",
    "extra_multi_purpose_steering_wheel",
    "extra_automatic_air_conditioning",
    "extra_apple_carplay",
    "extra_gps",
    "extra_telephone",
    "extra_tv_camera",
    "extra_central_locking",
    "extra_android_auto",
    "extra_dvd",
    "extra_service_book",
    "extra_radio_player",
    "extra_immobilizer",
    "extra_usb",
    "is_metallic",
    "extra_hill_assist",
    "extra_parktronic",
    "extra_tcs_asr",
    "extra_fog_lights",
    "extra_power_mirrors",
];

/// Columns too sparsely filled to impute, dropped unconditionally before
/// the imputation pass.
pub const HIGH_MISSINGNESS_COLUMNS: &[&str] = &["kteo", "battery_charge_time"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domains_have_no_duplicates() {
        for domain in [
            FUEL_TYPES,
            GEARBOX_TYPES,
            INTERIOR_TYPES,
            EXTERIOR_COLORS,
            INTERIOR_COLORS,
            NUMBER_PLATE_ENDINGS,
            DRIVE_TYPES,
            BODY_TYPES,
        ] {
            let mut seen = std::collections::HashSet::new();
            for label in domain {
                assert!(seen.insert(label), "duplicate label {label}");
            }
        }
    }

    #[test]
    fn test_high_missingness_is_subset_of_unpractical() {
        for name in HIGH_MISSINGNESS_COLUMNS {
            assert!(UNPRACTICAL_COLUMNS.contains(name));
        }
    }
}
