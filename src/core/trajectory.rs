use super::types::{EntityId, EntityKind};
use serde::Serialize;
use std::collections::BTreeMap;

/// Mass time series for every entity of a simulated network.
///
/// Series are keyed by entity id in sorted order, which fixes the
/// summation order of [`Trajectories::total_mass`] so repeated runs are
/// bit-identical.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectories {
    horizon: u64,
    series: BTreeMap<EntityId, Vec<f64>>,
    kinds: BTreeMap<EntityId, EntityKind>,
    initial: BTreeMap<EntityId, f64>,
}

impl Trajectories {
    pub(crate) fn new(horizon: u64) -> Self {
        Self {
            horizon,
            series: BTreeMap::new(),
            kinds: BTreeMap::new(),
            initial: BTreeMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, id: EntityId, kind: EntityKind, initial_mass: f64, series: Vec<f64>) {
        self.kinds.insert(id.clone(), kind);
        self.initial.insert(id.clone(), initial_mass);
        self.series.insert(id, series);
    }

    /// Number of simulated steps (`n_final`)
    pub fn horizon(&self) -> u64 {
        self.horizon
    }

    pub fn series(&self, id: &EntityId) -> Option<&[f64]> {
        self.series.get(id).map(Vec::as_slice)
    }

    pub fn kind(&self, id: &EntityId) -> Option<EntityKind> {
        self.kinds.get(id).copied()
    }

    /// All series in entity id order
    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, &[f64])> {
        self.series.iter().map(|(id, series)| (id, series.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Series of vertices (stocks)
    pub fn stocks(&self) -> impl Iterator<Item = (&EntityId, &[f64])> {
        self.of_kind(EntityKind::Vertex)
    }

    /// Series of arcs (mass in transit)
    pub fn flows(&self) -> impl Iterator<Item = (&EntityId, &[f64])> {
        self.of_kind(EntityKind::Arc)
    }

    fn of_kind(&self, kind: EntityKind) -> impl Iterator<Item = (&EntityId, &[f64])> {
        self.iter()
            .filter(move |(id, _)| self.kinds.get(*id) == Some(&kind))
    }

    /// Mass of every entity at the last step
    pub fn final_masses(&self) -> BTreeMap<EntityId, f64> {
        self.series
            .iter()
            .filter_map(|(id, series)| series.last().map(|&mass| (id.clone(), mass)))
            .collect()
    }

    pub fn initial_total(&self) -> f64 {
        self.initial.values().sum()
    }

    /// Sum over all entities at every step
    pub fn total_mass(&self) -> Vec<f64> {
        let mut total = vec![0.0; self.horizon as usize];
        for series in self.series.values() {
            for (slot, mass) in total.iter_mut().zip(series) {
                *slot += mass;
            }
        }
        total
    }

    /// Largest absolute deviation of the total from the initial total.
    ///
    /// NaN anywhere in the totals makes the result NaN.
    pub fn conservation_error(&self) -> f64 {
        let initial = self.initial_total();
        self.total_mass()
            .into_iter()
            .map(|total| (total - initial).abs())
            .fold(0.0, |worst, deviation| {
                if deviation.is_nan() || deviation > worst {
                    deviation
                } else {
                    worst
                }
            })
    }

    /// Whether total mass stays within `rel_tol` of the initial total.
    ///
    /// The tolerance is scaled by the initial total, or used as-is when
    /// the network starts empty.
    pub fn is_conserved(&self, rel_tol: f64) -> bool {
        let scale = self.initial_total().abs().max(1.0);
        self.conservation_error() <= rel_tol * scale
    }

    /// Entities whose mass went below zero, with the first offending step
    pub fn negative_masses(&self) -> Vec<(EntityId, u64)> {
        self.series
            .iter()
            .filter_map(|(id, series)| {
                series
                    .iter()
                    .position(|&mass| mass < 0.0)
                    .map(|step| (id.clone(), step as u64))
            })
            .collect()
    }

    /// Physical time of each step for a given sample period in seconds
    pub fn time_axis(&self, sample_period: f64) -> Vec<f64> {
        (0..self.horizon).map(|step| step as f64 * sample_period).collect()
    }

    /// Presentation-ready view of the run
    pub fn report(&self, sample_period: f64) -> TrajectoryReport<'_> {
        TrajectoryReport {
            horizon: self.horizon,
            sample_period,
            time: self.time_axis(sample_period),
            stocks: self.stocks().collect(),
            flows: self.flows().collect(),
            total: self.total_mass(),
        }
    }

    pub fn to_json(&self, sample_period: f64) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.report(sample_period))
    }
}

/// Serializable input for a plotting or reporting tool
#[derive(Debug, Serialize)]
pub struct TrajectoryReport<'a> {
    pub horizon: u64,
    pub sample_period: f64,
    pub time: Vec<f64>,
    pub stocks: BTreeMap<&'a EntityId, &'a [f64]>,
    pub flows: BTreeMap<&'a EntityId, &'a [f64]>,
    pub total: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Trajectories {
        let mut trajectories = Trajectories::new(3);
        trajectories.insert("v1".into(), EntityKind::Vertex, 4.0, vec![4.0, 1.0, 1.0]);
        trajectories.insert("a12".into(), EntityKind::Arc, 0.0, vec![0.0, 3.0, 0.0]);
        trajectories.insert("v2".into(), EntityKind::Vertex, 0.0, vec![0.0, 0.0, 3.0]);
        trajectories
    }

    #[test]
    fn test_total_mass_series() {
        let trajectories = sample();
        assert_eq!(trajectories.total_mass(), vec![4.0, 4.0, 4.0]);
        assert_eq!(trajectories.conservation_error(), 0.0);
        assert!(trajectories.is_conserved(1e-9));
    }

    #[test]
    fn test_stocks_and_flows_split() {
        let trajectories = sample();
        let stocks: Vec<_> = trajectories.stocks().map(|(id, _)| id.as_str()).collect();
        let flows: Vec<_> = trajectories.flows().map(|(id, _)| id.as_str()).collect();
        assert_eq!(stocks, vec!["v1", "v2"]);
        assert_eq!(flows, vec!["a12"]);
    }

    #[test]
    fn test_final_masses() {
        let finals = sample().final_masses();
        assert_eq!(finals[&EntityId::from("v1")], 1.0);
        assert_eq!(finals[&EntityId::from("v2")], 3.0);
    }

    #[test]
    fn test_non_conserving_detected() {
        let mut trajectories = Trajectories::new(2);
        trajectories.insert("v1".into(), EntityKind::Vertex, 1.0, vec![1.0, 0.0]);
        assert_eq!(trajectories.conservation_error(), 1.0);
        assert!(!trajectories.is_conserved(1e-9));
    }

    #[test]
    fn test_nan_mass_is_not_conserved() {
        let mut trajectories = Trajectories::new(3);
        trajectories.insert("v1".into(), EntityKind::Vertex, 1.0, vec![1.0, f64::NAN, 1.0]);
        assert!(trajectories.conservation_error().is_nan());
        assert!(!trajectories.is_conserved(1e-9));
    }

    #[test]
    fn test_negative_masses_reported() {
        let mut trajectories = Trajectories::new(3);
        trajectories.insert("v1".into(), EntityKind::Vertex, 1.0, vec![1.0, -2.0, -2.0]);
        assert_eq!(trajectories.negative_masses(), vec![(EntityId::from("v1"), 1u64)]);
    }

    #[test]
    fn test_time_axis_scaling() {
        assert_eq!(sample().time_axis(0.5), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_json_report() {
        let json = sample().to_json(1.0).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["horizon"], 3);
        assert_eq!(value["flows"]["a12"][1], 3.0);
        assert_eq!(value["total"][2], 4.0);
    }
}
