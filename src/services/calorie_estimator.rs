/// Coefficient used for exercises missing from the table.
pub const DEFAULT_MET: f64 = 3.0;

/// Simplified energy-expenditure estimate: `met * weight_kg * minutes / 60`.
#[derive(Debug, Clone)]
pub struct CalorieEstimator {
    met_values: Vec<(&'static str, f64)>,
}

impl Default for CalorieEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl CalorieEstimator {
    pub fn new() -> Self {
        Self {
            met_values: vec![
                ("跑步", 8.0),
                ("running", 8.0),
                ("深蹲", 5.0),
                ("squats", 5.0),
                ("卧推", 3.5),
                ("bench-press", 3.5),
                ("瑜伽", 2.5),
                ("yoga", 2.5),
                ("拉伸", 2.0),
                ("stretching", 2.0),
            ],
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn met_for(&self, exercise: &str) -> f64 {
        self.met_values
            .iter()
            .find(|(name, _)| *name == exercise)
            .map(|(_, met)| *met)
            .unwrap_or(DEFAULT_MET)
    }

    pub fn estimate(&self, exercise: &str, duration_minutes: f64, weight_kg: f64) -> f64 {
        let calories = self.met_for(exercise) * weight_kg * duration_minutes / 60.0;
        ((calories * 10.0).round() / 10.0).max(0.0)
    }
}
