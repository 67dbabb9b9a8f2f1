//! Distances for speaker placement.
//!
//! All distances are stored in feet.  The [`UnitSystem`] is only used when entering and displaying
//! values, so switching unit systems never changes a stored value.
//!
//! | Unit system | Entry (major/minor) | Display             | Rounding           |
//! |-------------|---------------------|---------------------|--------------------|
//! | Imperial    | feet + inches       | `8' 5 1/2"`         | nearest 1/4 inch   |
//! | Metric      | metres + cm         | `2m 15.9cm`         | nearest 0.1 cm     |

mod distance;
mod format;
mod parse;
mod unit_system;

#[cfg(test)]
mod test;

pub use distance::{Distance, DistanceError};
pub use format::{PLACEHOLDER, cm_to_metres, feet_to_fraction, format_distance, format_feet};
pub use parse::{
    ComponentInput, parse_distance, parse_imperial, parse_major_minor, parse_metric, parse_numeric_input,
};
pub use unit_system::{CM_PER_FOOT, CM_PER_METRE, INCHES_PER_FOOT, UnitSystem, UnitSystemError};

#[cfg(test)]
mod example_usage_tests {
    use crate::{UnitSystem, format_distance, parse_major_minor};

    #[test]
    fn test_entry_then_display_in_both_unit_systems() {
        // Room width entered as 12 feet
        let width = parse_major_minor("12", "", UnitSystem::Imperial);
        assert_eq!(format_distance(width, UnitSystem::Imperial), "12'");
        assert_eq!(format_distance(width, UnitSystem::Metric), "3m 65.8cm");

        // Side wall distance entered as 1m 30cm
        let side_wall = parse_major_minor("1", "30", UnitSystem::Metric);
        assert_eq!(format_distance(side_wall, UnitSystem::Metric), "1m 30.0cm");
        assert_eq!(format_distance(side_wall, UnitSystem::Imperial), "4' 3 1/4\"");

        // Nothing entered
        let listening_position = parse_major_minor("", "", UnitSystem::Imperial);
        assert_eq!(format_distance(listening_position, UnitSystem::Imperial), "—");
    }
}
