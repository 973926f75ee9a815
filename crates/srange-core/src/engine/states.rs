use super::container::{StressContainer, StressIntensity, StressRange};
use super::context::SearchContext;
use super::error::EngineError;
use super::progress::Progress;
use super::torsor::{TorsorCombination, TorsorPair};
use crate::core::coefficient::Coefficient;
use crate::core::combination::{CombiRanks, Combination};
use crate::core::stress::{EquivalentStress, Stress};
use tracing::{debug, instrument, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Mechanical states of a component and the load channels applied to them.
///
/// Populated append-only, then queried read-only. Every search runs
/// [`StressStates::check_integrity`] first.
#[derive(Debug, Clone, Default)]
pub struct StressStates {
    primary_stresses: Vec<Stress>,
    secondary_stresses: Vec<Stress>,
    temperatures: Vec<f64>,
    torsors: Vec<Stress>,
    coefficients_max: Vec<Vec<f64>>,
    coefficients_min: Vec<Vec<f64>>,
    active_torsors: Vec<bool>,
    method: EquivalentStress,
}

impl StressStates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        let method = self.method;
        *self = Self {
            method,
            ..Self::default()
        };
    }

    pub fn set_equivalent_stress_method(&mut self, method: &str) -> Result<(), EngineError> {
        self.method = method.parse()?;
        Ok(())
    }

    pub fn set_method(&mut self, method: EquivalentStress) {
        self.method = method;
    }

    pub fn method(&self) -> EquivalentStress {
        self.method
    }

    pub fn add_stress(&mut self, primary: Stress, secondary: Option<Stress>) {
        self.primary_stresses.push(primary);
        if let Some(secondary) = secondary {
            self.secondary_stresses.push(secondary);
        }
    }

    pub fn add_temperature(&mut self, temperature: f64) {
        self.temperatures.push(temperature);
    }

    pub fn add_torsor(&mut self, torsor: Stress) {
        self.torsors.push(torsor);
    }

    pub fn add_torsor_coefficients(&mut self, max: Vec<f64>, min: Vec<f64>) {
        self.coefficients_max.push(max);
        self.coefficients_min.push(min);
    }

    /// Restricts the searches to the flagged torsors. Every torsor is
    /// active until this is called.
    pub fn set_active_torsors(&mut self, flags: Vec<bool>) {
        self.active_torsors = flags;
    }

    pub fn nb_states(&self) -> usize {
        self.primary_stresses.len()
    }

    pub fn nb_torsors(&self) -> usize {
        self.torsors.len()
    }

    pub fn primary_stresses(&self) -> &[Stress] {
        &self.primary_stresses
    }

    pub fn secondary_stresses(&self) -> &[Stress] {
        &self.secondary_stresses
    }

    pub fn temperatures(&self) -> &[f64] {
        &self.temperatures
    }

    pub fn torsors(&self) -> &[Stress] {
        &self.torsors
    }

    pub fn check_integrity(&self) -> Result<(), EngineError> {
        let n = self.primary_stresses.len();
        let nt = self.torsors.len();
        let mismatch = |what: &str, found: usize| {
            Err(EngineError::Integrity(format!(
                "{what} has {found} entries for {n} states"
            )))
        };

        if !self.secondary_stresses.is_empty() && self.secondary_stresses.len() != n {
            return mismatch("SecondaryStresses", self.secondary_stresses.len());
        }
        if !self.temperatures.is_empty() && self.temperatures.len() != n {
            return mismatch("Temperatures", self.temperatures.len());
        }
        if nt > 0 && (self.coefficients_max.is_empty() || self.coefficients_min.is_empty()) {
            return Err(EngineError::Integrity(format!(
                "{nt} torsors are defined without CoefficientsMax/CoefficientsMin"
            )));
        }
        if !self.coefficients_max.is_empty() && self.coefficients_max.len() != n {
            return mismatch("CoefficientsMax", self.coefficients_max.len());
        }
        if !self.coefficients_min.is_empty() && self.coefficients_min.len() != n {
            return mismatch("CoefficientsMin", self.coefficients_min.len());
        }
        let rows = self.coefficients_max.iter().chain(&self.coefficients_min);
        if let Some((state, row)) = rows.enumerate().find(|(_, row)| row.len() != nt) {
            return Err(EngineError::Integrity(format!(
                "coefficient row {} has {} entries for {nt} torsors",
                state % n.max(1),
                row.len()
            )));
        }
        if !self.active_torsors.is_empty() && self.active_torsors.len() != nt {
            return Err(EngineError::Integrity(format!(
                "{} activation flags for {nt} torsors",
                self.active_torsors.len()
            )));
        }
        Ok(())
    }

    /// Torsor enumerator over this set's envelopes. Without torsors it is
    /// left unactivated and yields a single empty combination.
    pub fn torsor_combination(&self) -> Result<TorsorCombination<'_>, EngineError> {
        let mut manager =
            TorsorCombination::with_coefficients(&self.coefficients_max, &self.coefficients_min);
        if !self.torsors.is_empty() {
            let flags = if self.active_torsors.is_empty() {
                vec![true; self.torsors.len()]
            } else {
                self.active_torsors.clone()
            };
            manager.set_active_torsors(&flags)?;
        }
        Ok(manager)
    }

    /// Worst equivalent stress of each listed state alone, over every
    /// torsor combination of that state.
    #[instrument(skip_all, name = "stress_intensity", fields(states = states_id.len()))]
    pub fn stress_intensity(
        &self,
        states_id: &[usize],
        context: &SearchContext,
    ) -> Result<StressIntensity, EngineError> {
        self.check_integrity()?;
        for &state in states_id {
            self.check_state(state)?;
        }
        let manager = self.torsor_combination()?;
        debug!(torsors = manager.nb_torsors(), "Searching stress intensity.");

        let mut best = StressContainer::new();
        let mut coefs = vec![0.0; manager.nb_torsors()];
        for &state in states_id {
            context.check_cancelled()?;
            let pair = manager.pair((state, state))?;
            for tcomb in 0..pair.nb_combinations() {
                pair.coef(tcomb, &mut coefs)?;
                let total = self.with_torsors(self.primary_stresses[state], &coefs);
                if let Some(ratio) = self.improvement(&total, 1.0, best.ratio()) {
                    trace!(state, tcomb, ratio, "New maximum stress intensity.");
                    best.set_intensity(&[ratio], state, tcomb)?;
                }
            }
            context.report(Progress::TaskAdvance { steps: 1 });
        }

        Ok(best.get_intensity())
    }

    /// Worst equivalent stress range over every pair of the explorer.
    #[instrument(skip_all, name = "stress_range", fields(pairs = explorer.size()))]
    pub fn stress_range(
        &self,
        explorer: &Combination,
        context: &SearchContext,
    ) -> Result<StressRange, EngineError> {
        self.search_range(explorer, None, context)
    }

    /// Worst ratio of the equivalent stress range to the admissible stress
    /// of a pair: the larger of `coefficient` at the two states'
    /// temperatures, or 1 without temperatures.
    #[instrument(skip_all, name = "stress_range_ratio", fields(pairs = explorer.size()))]
    pub fn stress_range_ratio(
        &self,
        explorer: &Combination,
        coefficient: &Coefficient,
        context: &SearchContext,
    ) -> Result<StressRange, EngineError> {
        self.search_range(explorer, Some(coefficient), context)
    }

    fn search_range(
        &self,
        explorer: &Combination,
        coefficient: Option<&Coefficient>,
        context: &SearchContext,
    ) -> Result<StressRange, EngineError> {
        self.check_integrity()?;
        let explored: Vec<usize> = explorer
            .ranks()
            .iter()
            .chain(explorer.column_ranks())
            .copied()
            .collect();
        for &state in &explored {
            self.check_state(state)?;
        }

        let manager = self.torsor_combination()?;
        let divisors = match coefficient {
            Some(coefficient) if !self.temperatures.is_empty() => {
                Some(self.divisors(&explored, coefficient)?)
            }
            _ => None,
        };
        debug!(
            torsors = manager.nb_torsors(),
            ratio = divisors.is_some(),
            "Searching stress range."
        );

        let scan = RangeScan {
            states: self,
            explorer,
            manager: &manager,
            divisors: divisors.as_deref(),
            context,
        };
        let best = scan.run()?;
        Ok(best.get_range())
    }

    /// Admissible stress per state id, filled for the explored states only.
    fn divisors(
        &self,
        explored: &[usize],
        coefficient: &Coefficient,
    ) -> Result<Vec<f64>, EngineError> {
        let mut divisors = vec![1.0; self.nb_states()];
        for &state in explored {
            let value = coefficient.get_yvalue(self.temperatures[state])?;
            if value.is_nan() || value <= 0.0 {
                return Err(EngineError::InvalidCoefficient { state, value });
            }
            divisors[state] = value;
        }
        Ok(divisors)
    }

    fn check_state(&self, state: usize) -> Result<(), EngineError> {
        if state >= self.nb_states() {
            return Err(EngineError::StateOutOfRange {
                state,
                size: self.nb_states(),
            });
        }
        Ok(())
    }

    fn with_torsors(&self, mut stress: Stress, coefs: &[f64]) -> Stress {
        for (torsor, &coef) in self.torsors.iter().zip(coefs) {
            if coef != 0.0 {
                stress += *torsor * coef;
            }
        }
        stress
    }

    /// Ratio to store when `stress / coef` beats `best_ratio`.
    ///
    /// Under `ReducedMises` the candidate is ranked by reduced von Mises,
    /// then its Tresca ratio is stored, and only if that beats
    /// `best_ratio` as well.
    fn improvement(&self, stress: &Stress, coef: f64, best_ratio: f64) -> Option<f64> {
        let ratio = self.method.evaluate(stress) / coef;
        if ratio.is_nan() || ratio <= best_ratio {
            return None;
        }
        match self.method {
            EquivalentStress::ReducedMises => {
                let tresca = stress.tresca() / coef;
                (tresca > best_ratio).then_some(tresca)
            }
            _ => Some(ratio),
        }
    }

    /// Reduction matching the value stored by [`Self::improvement`].
    fn stored_reduction(&self) -> EquivalentStress {
        match self.method {
            EquivalentStress::ReducedMises => EquivalentStress::Tresca,
            method => method,
        }
    }
}

/// One range search: explorer × torsor combinations.
struct RangeScan<'s, 'c> {
    states: &'s StressStates,
    explorer: &'s Combination,
    manager: &'s TorsorCombination<'s>,
    divisors: Option<&'s [f64]>,
    context: &'s SearchContext<'c>,
}

impl RangeScan<'_, '_> {
    #[cfg(not(feature = "parallel"))]
    fn run(&self) -> Result<StressContainer, EngineError> {
        let mut best = StressContainer::new();
        let mut scratch = Scratch::new(self.manager.nb_torsors());
        for c in 0..self.explorer.size() {
            self.context.check_cancelled()?;
            self.scan_pair(&mut best, &mut scratch, c)?;
            self.context.report(Progress::TaskAdvance { steps: 1 });
        }
        Ok(best)
    }

    // Folds are contiguous and reduced left to right, so the first maximal
    // combination number wins as in the serial loop.
    #[cfg(feature = "parallel")]
    fn run(&self) -> Result<StressContainer, EngineError> {
        let nb_torsors = self.manager.nb_torsors();
        (0..self.explorer.size())
            .into_par_iter()
            .try_fold(
                || (StressContainer::new(), Scratch::new(nb_torsors)),
                |(mut best, mut scratch), c| {
                    self.context.check_cancelled()?;
                    self.scan_pair(&mut best, &mut scratch, c)?;
                    self.context.report(Progress::TaskAdvance { steps: 1 });
                    Ok::<_, EngineError>((best, scratch))
                },
            )
            .map(|folded| folded.map(|(best, _)| best))
            .try_reduce(StressContainer::new, |mut left, right| {
                left.store_max(&right);
                Ok(left)
            })
    }

    fn scan_pair(
        &self,
        best: &mut StressContainer,
        scratch: &mut Scratch,
        c: usize,
    ) -> Result<(), EngineError> {
        let states = self.states;
        let (p, q) = self.explorer.states(c)?;
        let pair = self.manager.pair((p, q))?;
        let coef = self.divisors.map_or(1.0, |d| d[p].max(d[q]));
        let primary = states.primary_stresses[p] - states.primary_stresses[q];

        for tcomb in 0..pair.nb_combinations() {
            pair.diff_coef(tcomb, &mut scratch.coefs)?;
            let range = states.with_torsors(primary, &scratch.coefs);
            let Some(ratio) = states.improvement(&range, coef, best.ratio()) else {
                continue;
            };

            let mean = self.mean_stress((p, q), &pair, tcomb, scratch)?;
            trace!(p, q, tcomb, ratio, "New maximum stress range.");
            best.set_range(&[ratio * coef, ratio, mean], (p, q), (tcomb, tcomb))?;
            if self.divisors.is_some() {
                best.set_temperatures([states.temperatures[p], states.temperatures[q]]);
            }
        }
        Ok(())
    }

    fn mean_stress(
        &self,
        (p, q): CombiRanks,
        pair: &TorsorPair,
        tcomb: usize,
        scratch: &mut Scratch,
    ) -> Result<f64, EngineError> {
        let states = self.states;
        pair.sum_coef(tcomb, &mut scratch.sum)?;
        let sum = states.primary_stresses[p] + states.primary_stresses[q];
        let mean = 0.5 * states.with_torsors(sum, &scratch.sum);
        Ok(states.stored_reduction().evaluate(&mean))
    }
}

struct Scratch {
    coefs: Vec<f64>,
    sum: Vec<f64>,
}

impl Scratch {
    fn new(nb_torsors: usize) -> Self {
        Self {
            coefs: vec![0.0; nb_torsors],
            sum: vec![0.0; nb_torsors],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::Table;
    use std::sync::atomic::AtomicBool;

    const TOLERANCE: f64 = 1e-6;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn uniaxial(value: f64) -> Stress {
        Stress::new([value, 0.0, 0.0, 0.0, 0.0, 0.0])
    }

    fn two_states() -> StressStates {
        let mut states = StressStates::new();
        states.add_stress(uniaxial(100.0), None);
        states.add_stress(uniaxial(-50.0), None);
        states
    }

    fn with_one_torsor(max: [f64; 2], min: [f64; 2]) -> StressStates {
        let mut states = two_states();
        states.add_torsor(uniaxial(10.0));
        states.add_torsor_coefficients(vec![max[0]], vec![min[0]]);
        states.add_torsor_coefficients(vec![max[1]], vec![min[1]]);
        states
    }

    #[test]
    fn range_between_two_states_without_torsors() {
        let states = two_states();
        let explorer = Combination::triangular(&[0, 1]).unwrap();

        let range = states
            .stress_range(&explorer, &SearchContext::default())
            .unwrap();

        assert!(f64_approx_equal(range.range, 150.0));
        assert!(f64_approx_equal(range.ratio, 150.0));
        assert_eq!(range.loads, (0, 1));
        assert_eq!(range.torsors, (0, 0));
        assert_eq!(range.temperatures, None);
    }

    #[test]
    fn range_mean_is_equivalent_of_half_sum() {
        let states = two_states();
        let explorer = Combination::superior_triangular(&[0, 1]).unwrap();

        let range = states
            .stress_range(&explorer, &SearchContext::default())
            .unwrap();
        assert!(f64_approx_equal(range.mean, 25.0));
    }

    #[test]
    fn constant_torsor_channel_reuses_max_coefficient() {
        let states = with_one_torsor([2.0, 2.0], [2.0, 2.0]);
        let manager = states.torsor_combination().unwrap();
        assert_eq!(manager.nb_combinations((0, 1)).unwrap(), 1);

        let explorer = Combination::triangular(&[0, 1]).unwrap();
        let range = states
            .stress_range(&explorer, &SearchContext::default())
            .unwrap();
        assert!(f64_approx_equal(range.range, 150.0));
        assert_eq!(range.loads, (0, 1));
        // (100 + 20 - 50 + 20) / 2
        assert!(f64_approx_equal(range.mean, 45.0));

        let intensity = states
            .stress_intensity(&[0, 1], &SearchContext::default())
            .unwrap();
        assert!(f64_approx_equal(intensity.intensity, 120.0));
        assert_eq!(intensity.load, 0);
        assert_eq!(intensity.torsor, 0);
    }

    #[test]
    fn varying_torsor_channel_picks_worst_envelope() {
        let states = with_one_torsor([2.0, 2.0], [0.0, 0.0]);
        assert_eq!(
            states
                .torsor_combination()
                .unwrap()
                .nb_combinations((0, 1))
                .unwrap(),
            2
        );

        let explorer = Combination::superior_triangular(&[0, 1]).unwrap();
        let range = states
            .stress_range(&explorer, &SearchContext::default())
            .unwrap();

        // 150 + (2 - 0) * 10 against 150 - (2 - 0) * 10.
        assert!(f64_approx_equal(range.range, 170.0));
        assert_eq!(range.torsors, (0, 0));
        // (100 - 50 + (2 + 0) * 10) / 2
        assert!(f64_approx_equal(range.mean, 35.0));
    }

    #[test]
    fn inactive_torsor_is_ignored() {
        let mut states = with_one_torsor([2.0, 2.0], [0.0, 0.0]);
        states.set_active_torsors(vec![false]);
        let explorer = Combination::superior_triangular(&[0, 1]).unwrap();

        let range = states
            .stress_range(&explorer, &SearchContext::default())
            .unwrap();
        assert!(f64_approx_equal(range.range, 150.0));
    }

    #[test]
    fn intensity_takes_worst_torsor_combination() {
        let states = with_one_torsor([2.0, 2.0], [-8.0, 0.0]);
        let intensity = states
            .stress_intensity(&[0, 1], &SearchContext::default())
            .unwrap();

        // State 0 with its max gives 120, state 1 with its min gives -50.
        // State 0 with its min gives 100 - 80 = 20.
        assert!(f64_approx_equal(intensity.intensity, 120.0));
        assert_eq!(intensity.load, 0);
    }

    #[test]
    fn reduced_mises_stores_tresca_of_improving_candidate() {
        let mut states = StressStates::new();
        states.add_stress(uniaxial(100.0), None);
        states.add_stress(Stress::zero(), None);
        let explorer = Combination::superior_triangular(&[0, 1]).unwrap();

        states.set_equivalent_stress_method("reduced_mises").unwrap();
        let quirk = states
            .stress_range(&explorer, &SearchContext::default())
            .unwrap();
        assert!(f64_approx_equal(quirk.range, 100.0));

        states
            .set_equivalent_stress_method("reduced_mises_strict")
            .unwrap();
        let strict = states
            .stress_range(&explorer, &SearchContext::default())
            .unwrap();
        assert!(f64_approx_equal(strict.range, 200.0 / 3.0_f64.sqrt()));
    }

    #[test]
    fn reduced_mises_skips_candidate_whose_tresca_does_not_improve() {
        let mut states = StressStates::new();
        states.add_stress(uniaxial(100.0), None);
        states.add_stress(Stress::zero(), None);
        states.add_stress(uniaxial(90.0), None);
        states.set_method(EquivalentStress::ReducedMises);

        // Pair (1, 2) has reduced von Mises 103.9 > 100 but Tresca 90.
        let explorer = Combination::rectangular(&[0, 2], &[1]).unwrap();
        let range = states
            .stress_range(&explorer, &SearchContext::default())
            .unwrap();
        assert!(f64_approx_equal(range.range, 100.0));
        assert_eq!(range.loads, (0, 1));
    }

    #[test]
    fn unknown_method_is_rejected() {
        let mut states = two_states();
        assert!(matches!(
            states.set_equivalent_stress_method("rankine"),
            Err(EngineError::Stress(_))
        ));
        assert_eq!(states.method(), EquivalentStress::Tresca);
    }

    #[test]
    fn ratio_search_divides_by_larger_admissible_stress() {
        let mut states = two_states();
        states.add_temperature(20.0);
        states.add_temperature(300.0);
        let coefficient = Coefficient::Linear(
            Table::new(vec![20.0, 300.0], vec![200.0, 140.0]).unwrap(),
        );
        let explorer = Combination::superior_triangular(&[0, 1]).unwrap();

        let range = states
            .stress_range_ratio(&explorer, &coefficient, &SearchContext::default())
            .unwrap();

        assert!(f64_approx_equal(range.ratio, 0.75));
        assert!(f64_approx_equal(range.range, 150.0));
        assert_eq!(range.temperatures, Some([20.0, 300.0]));
    }

    #[test]
    fn ratio_search_without_temperatures_uses_unit_divisor() {
        let states = two_states();
        let explorer = Combination::superior_triangular(&[0, 1]).unwrap();
        let range = states
            .stress_range_ratio(
                &explorer,
                &Coefficient::constant(500.0),
                &SearchContext::default(),
            )
            .unwrap();
        assert!(f64_approx_equal(range.ratio, 150.0));
    }

    #[test]
    fn ratio_search_rejects_non_positive_admissible_stress() {
        let mut states = two_states();
        states.add_temperature(20.0);
        states.add_temperature(300.0);
        let explorer = Combination::superior_triangular(&[0, 1]).unwrap();

        let result = states.stress_range_ratio(
            &explorer,
            &Coefficient::constant(0.0),
            &SearchContext::default(),
        );
        assert!(matches!(
            result,
            Err(EngineError::InvalidCoefficient { state: 0, .. })
        ));
    }

    #[test]
    fn ratio_search_propagates_out_of_range_temperature() {
        let mut states = two_states();
        states.add_temperature(20.0);
        states.add_temperature(500.0);
        let coefficient = Coefficient::Linear(
            Table::new(vec![20.0, 300.0], vec![200.0, 140.0]).unwrap(),
        );
        let explorer = Combination::superior_triangular(&[0, 1]).unwrap();

        let result =
            states.stress_range_ratio(&explorer, &coefficient, &SearchContext::default());
        assert!(matches!(result, Err(EngineError::Table { .. })));
    }

    #[test]
    fn integrity_rejects_mismatched_temperatures() {
        let mut states = two_states();
        states.add_temperature(20.0);
        assert!(matches!(
            states.check_integrity(),
            Err(EngineError::Integrity(_))
        ));
    }

    #[test]
    fn added_stresses_and_torsors_are_stored_in_order() {
        let mut states = StressStates::new();
        states.add_stress(uniaxial(1.0), Some(uniaxial(2.0)));
        states.add_stress(uniaxial(3.0), Some(uniaxial(4.0)));
        states.add_torsor(uniaxial(10.0));

        assert_eq!(states.primary_stresses(), &[uniaxial(1.0), uniaxial(3.0)]);
        assert_eq!(states.secondary_stresses(), &[uniaxial(2.0), uniaxial(4.0)]);
        assert_eq!(states.torsors(), &[uniaxial(10.0)]);
    }

    #[test]
    fn integrity_rejects_partial_secondary_stresses() {
        let mut states = StressStates::new();
        states.add_stress(uniaxial(1.0), Some(uniaxial(2.0)));
        states.add_stress(uniaxial(1.0), None);
        assert!(matches!(
            states.check_integrity(),
            Err(EngineError::Integrity(_))
        ));
    }

    #[test]
    fn integrity_rejects_torsors_without_coefficients() {
        let mut states = two_states();
        states.add_torsor(uniaxial(10.0));
        assert!(matches!(
            states.check_integrity(),
            Err(EngineError::Integrity(_))
        ));
    }

    #[test]
    fn integrity_rejects_short_coefficient_row() {
        let mut states = two_states();
        states.add_torsor(uniaxial(10.0));
        states.add_torsor_coefficients(vec![1.0], vec![0.0]);
        states.add_torsor_coefficients(vec![], vec![]);

        let explorer = Combination::triangular(&[0, 1]).unwrap();
        assert!(matches!(
            states.stress_range(&explorer, &SearchContext::default()),
            Err(EngineError::Integrity(_))
        ));
    }

    #[test]
    fn integrity_rejects_activation_flag_count() {
        let mut states = with_one_torsor([1.0, 1.0], [0.0, 0.0]);
        states.set_active_torsors(vec![true, true]);
        assert!(matches!(
            states.check_integrity(),
            Err(EngineError::Integrity(_))
        ));
    }

    #[test]
    fn search_rejects_unknown_state() {
        let states = two_states();
        let explorer = Combination::triangular(&[0, 5]).unwrap();
        assert!(matches!(
            states.stress_range(&explorer, &SearchContext::default()),
            Err(EngineError::StateOutOfRange { state: 5, size: 2 })
        ));
        assert!(matches!(
            states.stress_intensity(&[2], &SearchContext::default()),
            Err(EngineError::StateOutOfRange { state: 2, .. })
        ));
    }

    #[test]
    fn raised_cancellation_flag_aborts_search() {
        let states = two_states();
        let explorer = Combination::triangular(&[0, 1]).unwrap();
        let flag = AtomicBool::new(true);
        let reporter = crate::engine::progress::ProgressReporter::new();
        let context = SearchContext::new(&reporter).with_cancellation(&flag);

        assert!(matches!(
            states.stress_range(&explorer, &context),
            Err(EngineError::Cancelled)
        ));
        assert!(matches!(
            states.stress_intensity(&[0, 1], &context),
            Err(EngineError::Cancelled)
        ));
    }

    #[test]
    fn first_maximal_pair_wins_ties() {
        let mut states = StressStates::new();
        for value in [0.0, 100.0, 0.0, 100.0] {
            states.add_stress(uniaxial(value), None);
        }
        let explorer = Combination::superior_triangular(&[0, 1, 2, 3]).unwrap();
        let range = states
            .stress_range(&explorer, &SearchContext::default())
            .unwrap();
        assert!(f64_approx_equal(range.range, 100.0));
        assert_eq!(range.loads, (0, 1));
    }

    #[test]
    fn reset_keeps_the_method() {
        let mut states = two_states();
        states.set_method(EquivalentStress::Mises);
        states.reset();
        assert_eq!(states.nb_states(), 0);
        assert_eq!(states.method(), EquivalentStress::Mises);
    }
}
