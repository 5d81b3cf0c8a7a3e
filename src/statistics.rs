use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct PlanStatistics {
    pub planner: &'static str,
    pub attempts: usize,
    /// BFS step count of the first maze state, if reachable.
    pub reference_steps: Option<usize>,
    pub original_steps: usize,
    pub original_cost: u64,
    pub replanned_steps: usize,
    pub replanned_cost: u64,
    pub hazards_requested: usize,
    pub hazards_injected: usize,
    pub score: u32,
    pub expanded: usize,
}

impl PlanStatistics {
    /// Extra steps the re-planned route needs compared to the first one.
    pub fn detour(&self) -> usize {
        self.replanned_steps.saturating_sub(self.original_steps)
    }

    /// Ratio of the re-planned route to the reference length; 0 when unknown.
    pub fn route_efficiency(&self) -> f64 {
        match self.reference_steps {
            Some(reference) if reference > 0 => self.replanned_steps as f64 / reference as f64,
            _ => 0.0,
        }
    }
}

impl fmt::Display for PlanStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Planner: {}", self.planner)?;
        writeln!(f, "Attempts: {}", self.attempts)?;
        match self.reference_steps {
            Some(steps) => writeln!(f, "Reference Path Length (BFS): {}", steps)?,
            None => writeln!(f, "Reference Path Length (BFS): unreachable")?,
        }
        writeln!(
            f,
            "Original Path: {} steps, cost {}",
            self.original_steps, self.original_cost
        )?;
        writeln!(
            f,
            "Hazards Injected: {} of {}",
            self.hazards_injected, self.hazards_requested
        )?;
        writeln!(
            f,
            "Re-planned Path: {} steps, cost {}",
            self.replanned_steps, self.replanned_cost
        )?;
        writeln!(f, "Detour: {} steps", self.detour())?;
        writeln!(f, "Score: {}", self.score)?;
        writeln!(f, "Cells Expanded: {}", self.expanded)?;
        if self.route_efficiency() > 0.0 {
            writeln!(f, "Route Efficiency: {:.3}", self.route_efficiency())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct TimingData {
    pub find_path_times: Vec<Duration>,
}

impl TimingData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn average_find_path_time(&self) -> Duration {
        if self.find_path_times.is_empty() {
            Duration::from_nanos(0)
        } else {
            let total: Duration = self.find_path_times.iter().sum();
            total / self.find_path_times.len() as u32
        }
    }

    pub fn total_find_path_time(&self) -> Duration {
        self.find_path_times.iter().sum()
    }

    pub fn total_calls(&self) -> usize {
        self.find_path_times.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PlanStatistics {
        PlanStatistics {
            planner: "dijkstra",
            attempts: 2,
            reference_steps: Some(8),
            original_steps: 8,
            original_cost: 8,
            replanned_steps: 12,
            replanned_cost: 12,
            hazards_requested: 2,
            hazards_injected: 2,
            score: 3,
            expanded: 40,
        }
    }

    #[test]
    fn detour_and_efficiency() {
        let stats = sample();
        assert_eq!(stats.detour(), 4);
        assert!((stats.route_efficiency() - 1.5).abs() < f64::EPSILON);

        let text = stats.to_string();
        assert!(text.contains("Detour: 4 steps"));
        assert!(text.contains("Route Efficiency: 1.500"));
    }

    #[test]
    fn average_of_no_calls_is_zero() {
        let mut timing = TimingData::new();
        assert_eq!(timing.average_find_path_time(), Duration::ZERO);

        timing.find_path_times.push(Duration::from_millis(2));
        timing.find_path_times.push(Duration::from_millis(4));
        assert_eq!(timing.average_find_path_time(), Duration::from_millis(3));
        assert_eq!(timing.total_calls(), 2);
    }
}
