use crate::shared::*;

/// The built-in pole rack, cheapest first.
pub fn default_poles() -> Vec<PoleDef> {
    vec![
        PoleDef {
            name: "Bamboo Pole".into(),
            level: 1,
            success_bonus: 0.0,
            biting_time_reduction: 0.0,
            wait_time_reduction: 0.0,
        },
        PoleDef {
            name: "Fiberglass Rod".into(),
            level: 2,
            success_bonus: 0.1,
            biting_time_reduction: 0.0,
            wait_time_reduction: 1.0,
        },
        PoleDef {
            name: "Carbon Rod".into(),
            level: 3,
            success_bonus: 0.2,
            biting_time_reduction: 0.5,
            wait_time_reduction: 2.0,
        },
        PoleDef {
            name: "Harbourmaster's Rod".into(),
            level: 5,
            success_bonus: 0.35,
            biting_time_reduction: 1.0,
            wait_time_reduction: 3.0,
        },
    ]
}
