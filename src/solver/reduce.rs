//! Block-structured ladder reduction.

use log::{debug, trace, warn};
use num_complex::Complex64;

use super::{check_frequency, ReducerConfig, ZeroBranchPolicy};
use crate::circuit::{validate_chain, ComponentId, Link};
use crate::components::Component;
use crate::error::Result;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// One component's contribution to a block.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    /// Position in the component list
    pub position: usize,
    pub id: ComponentId,
    /// Impedance at the reduction frequency
    pub impedance: Complex64,
}

impl Branch {
    fn new(position: usize, component: &Component, frequency_hz: f64) -> Self {
        let impedance = component.impedance(frequency_hz);
        trace!(
            "{} '{}' at {} Hz: Z = {}",
            component.kind(),
            component.name,
            frequency_hz,
            impedance
        );
        Self {
            position,
            id: component.id,
            impedance,
        }
    }

    /// Infinite impedance: the branch carries no current.
    pub fn is_open(&self) -> bool {
        !self.impedance.is_finite()
    }

    /// Exactly zero impedance.
    pub fn is_short(&self) -> bool {
        self.impedance == ZERO
    }
}

/// A top-level slot of the reduced ladder. Blocks are chained in series.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// A lone FIRST or SERIES component
    Series(Branch),
    /// A component plus the PARALLEL run that followed it
    Parallel {
        branches: Vec<Branch>,
        /// Equivalent impedance of the group
        impedance: Complex64,
    },
}

impl Block {
    /// Equivalent impedance of the block.
    pub fn impedance(&self) -> Complex64 {
        match self {
            Block::Series(branch) => branch.impedance,
            Block::Parallel { impedance, .. } => *impedance,
        }
    }

    /// Branches contained in the block, in ladder order.
    pub fn branches(&self) -> &[Branch] {
        match self {
            Block::Series(branch) => std::slice::from_ref(branch),
            Block::Parallel { branches, .. } => branches,
        }
    }

    pub fn is_open(&self) -> bool {
        !self.impedance().is_finite()
    }

    fn into_branches(self) -> Vec<Branch> {
        match self {
            Block::Series(branch) => vec![branch],
            Block::Parallel { branches, .. } => branches,
        }
    }
}

/// Merge branch impedances in parallel by summing admittances.
///
/// - An infinite branch contributes no admittance.
/// - An exactly-zero branch is handled by `policy`: skipped under
///   [`ZeroBranchPolicy::Exclude`], or it forces the group to `0` under
///   [`ZeroBranchPolicy::ShortDominates`].
/// - A group whose admittance sums to exactly zero is open: `∞ + j0`.
pub fn combine_parallel<I>(impedances: I, policy: ZeroBranchPolicy) -> Complex64
where
    I: IntoIterator<Item = Complex64>,
{
    let mut admittance = ZERO;

    for z in impedances {
        if z == ZERO {
            match policy {
                ZeroBranchPolicy::Exclude => {
                    warn!("Excluding zero-impedance branch from parallel group");
                    continue;
                }
                ZeroBranchPolicy::ShortDominates => {
                    debug!("Zero-impedance branch shorts the parallel group");
                    return ZERO;
                }
            }
        }
        if !z.is_finite() {
            continue;
        }
        admittance += reciprocal(z);
    }

    if admittance == ZERO {
        warn!("Parallel group admittance is zero; treating the group as open");
        Complex64::new(f64::INFINITY, 0.0)
    } else {
        reciprocal(admittance)
    }
}

/// `1/z` for a finite, non-zero `z`.
///
/// `Complex::inv` divides by `|z|²`, which underflows below ~1e-154 and
/// overflows above ~1e154. Normalizing by the larger part first keeps every
/// positive magnitude in range, and `±jX` pairs still cancel exactly.
fn reciprocal(z: Complex64) -> Complex64 {
    let scale = z.re.abs().max(z.im.abs());
    z.unscale(scale).inv().unscale(scale)
}

/// Fold the ladder into its block structure at `frequency_hz`.
///
/// A PARALLEL component pops the block pushed right before it; any PARALLEL
/// components that follow join the same group.
pub fn reduce_blocks(
    components: &[Component],
    frequency_hz: f64,
    config: &ReducerConfig,
) -> Result<Vec<Block>> {
    check_frequency(frequency_hz)?;
    validate_chain(components)?;

    let mut blocks: Vec<Block> = Vec::with_capacity(components.len());
    let mut iter = components.iter().enumerate().peekable();

    while let Some((position, component)) = iter.next() {
        let branch = Branch::new(position, component, frequency_hz);

        if component.link.starts_block() {
            blocks.push(Block::Series(branch));
            continue;
        }

        // validate_chain guarantees a FIRST head, so a block is always there
        let mut branches = blocks.pop().map(Block::into_branches).unwrap_or_default();
        branches.push(branch);

        while let Some((position, next)) = iter.next_if(|(_, c)| c.link == Link::Parallel) {
            branches.push(Branch::new(position, next, frequency_hz));
        }

        let impedance = combine_parallel(branches.iter().map(|b| b.impedance), config.zero_branch);
        debug!(
            "Parallel group of {} branches at positions {}..={}: Z = {}",
            branches.len(),
            branches[0].position,
            branches[branches.len() - 1].position,
            impedance
        );
        blocks.push(Block::Parallel {
            branches,
            impedance,
        });
    }

    Ok(blocks)
}

/// Equivalent impedance of the ladder with the default configuration.
pub fn reduce(components: &[Component], frequency_hz: f64) -> Result<Complex64> {
    reduce_with(components, frequency_hz, &ReducerConfig::default())
}

/// Equivalent impedance of the ladder.
pub fn reduce_with(
    components: &[Component],
    frequency_hz: f64,
    config: &ReducerConfig,
) -> Result<Complex64> {
    let blocks = reduce_blocks(components, frequency_hz, config)?;
    let total = blocks.iter().map(Block::impedance).sum::<Complex64>();
    debug!(
        "Reduced {} components into {} blocks at {} Hz: Z_total = {}",
        components.len(),
        blocks.len(),
        frequency_hz,
        total
    );
    Ok(total)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;
    use crate::components::Element;
    use crate::error::LadderError;

    fn chain(parts: &[(Element, Link)]) -> Vec<Component> {
        parts
            .iter()
            .enumerate()
            .map(|(i, (element, link))| {
                Component::new(ComponentId(i), format!("E{}", i + 1), *element, *link)
            })
            .collect()
    }

    fn r(ohms: f64) -> Element {
        Element::resistor(ohms).unwrap()
    }

    fn xl(ohms: f64) -> Element {
        Element::inductive_reactance(ohms).unwrap()
    }

    fn xc(ohms: f64) -> Element {
        Element::capacitive_reactance(ohms).unwrap()
    }

    #[test]
    fn test_single_component_is_its_own_impedance() {
        let l = Element::inductor(0.1).unwrap();
        let c = Element::capacitor(1e-6).unwrap();
        for element in [r(47.0), l, c] {
            let ladder = chain(&[(element, Link::First)]);
            assert_eq!(reduce(&ladder, 60.0).unwrap(), element.impedance(60.0));
        }
    }

    #[test]
    fn test_series_adds() {
        let ladder = chain(&[(r(100.0), Link::First), (r(50.0), Link::Series)]);
        assert_eq!(reduce(&ladder, 60.0).unwrap(), Complex64::new(150.0, 0.0));
    }

    #[test]
    fn test_equal_parallel_halves() {
        let ladder = chain(&[(r(100.0), Link::First), (r(100.0), Link::Parallel)]);
        for f in [0.0, 60.0, 10e3] {
            let z = reduce(&ladder, f).unwrap();
            assert_relative_eq!(z.re, 50.0, max_relative = 1e-12);
            assert_abs_diff_eq!(z.im, 0.0);
        }
    }

    #[test]
    fn test_resistor_plus_reactance_at_45_degrees() {
        let ladder = chain(&[(r(100.0), Link::First), (xl(100.0), Link::Series)]);
        let z = reduce(&ladder, 60.0).unwrap();
        assert_eq!(z, Complex64::new(100.0, 100.0));
        assert_relative_eq!(z.norm(), 141.421_356_237, epsilon = 1e-6);
        assert_relative_eq!(z.arg().to_degrees(), 45.0, epsilon = 1e-9);
    }

    #[test]
    fn test_series_resonance_is_purely_resistive() {
        let ladder = chain(&[
            (r(10.0), Link::First),
            (xl(50.0), Link::Series),
            (xc(50.0), Link::Series),
        ]);
        assert_eq!(reduce(&ladder, 60.0).unwrap(), Complex64::new(10.0, 0.0));

        // Same with physical values at f0 = 1/(2π√(LC))
        let l = Element::inductor(10e-3).unwrap();
        let c = Element::capacitor(1e-6).unwrap();
        let f0 = 1.0 / (2.0 * PI * (10e-3_f64 * 1e-6).sqrt());
        let ladder = chain(&[(r(10.0), Link::First), (l, Link::Series), (c, Link::Series)]);
        let z = reduce(&ladder, f0).unwrap();
        assert_relative_eq!(z.re, 10.0);
        assert_abs_diff_eq!(z.im, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_parallel_binds_to_preceding_block_only() {
        // R1 + (R2 ‖ R3): 100 + 50
        let ladder = chain(&[
            (r(100.0), Link::First),
            (r(100.0), Link::Series),
            (r(100.0), Link::Parallel),
        ]);
        let z = reduce(&ladder, 60.0).unwrap();
        assert_relative_eq!(z.re, 150.0, max_relative = 1e-12);

        let blocks = reduce_blocks(&ladder, 60.0, &ReducerConfig::default()).unwrap();
        assert_eq!(blocks.len(), 2);
        assert!(matches!(blocks[0], Block::Series(_)));
        assert_eq!(blocks[1].branches().len(), 2);
        assert_eq!(blocks[1].branches()[0].position, 1);
    }

    #[test]
    fn test_parallel_run_forms_one_group() {
        // 300 ‖ 300 ‖ 300 = 100, then + 20
        let ladder = chain(&[
            (r(300.0), Link::First),
            (r(300.0), Link::Parallel),
            (r(300.0), Link::Parallel),
            (r(20.0), Link::Series),
        ]);
        let blocks = reduce_blocks(&ladder, 60.0, &ReducerConfig::default()).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].branches().len(), 3);

        let z = reduce(&ladder, 60.0).unwrap();
        assert_relative_eq!(z.re, 120.0, max_relative = 1e-12);
    }

    #[test]
    fn test_parallel_lc_tank() {
        // XL ‖ XC with XL=100, XC=50: 1/(1/j100 + 1/(-j50)) = -j100
        let ladder = chain(&[(xl(100.0), Link::First), (xc(50.0), Link::Parallel)]);
        let z = reduce(&ladder, 60.0).unwrap();
        assert_abs_diff_eq!(z.re, 0.0, epsilon = 1e-12);
        assert_relative_eq!(z.im, -100.0, max_relative = 1e-12);
    }

    #[test]
    fn test_parallel_first_is_malformed() {
        let ladder = chain(&[(r(100.0), Link::Parallel)]);
        assert!(matches!(
            reduce(&ladder, 60.0),
            Err(LadderError::MalformedChain { position: 0, .. })
        ));
    }

    #[test]
    fn test_tiny_branch_in_parallel_stays_finite() {
        let ladder = chain(&[(r(1e-170), Link::First), (r(1.0), Link::Parallel)]);
        let z = reduce(&ladder, 60.0).unwrap();
        assert!(!z.is_nan());
        assert_relative_eq!(z.re, 1e-170, max_relative = 1e-12);
        assert_eq!(z.im, 0.0);
    }

    #[test]
    fn test_huge_branches_in_parallel_stay_finite() {
        let ladder = chain(&[(r(1e160), Link::First), (r(1e160), Link::Parallel)]);
        let z = reduce(&ladder, 60.0).unwrap();
        assert!(z.is_finite());
        assert_relative_eq!(z.re, 5e159, max_relative = 1e-12);
    }

    #[test]
    fn test_reciprocal_matches_inv_in_normal_range() {
        for z in [Complex64::new(3.0, -4.0), Complex64::new(0.0, 50.0), Complex64::new(-2.5, 0.1)] {
            let expected = z.inv();
            let got = reciprocal(z);
            assert_relative_eq!(got.re, expected.re, epsilon = 1e-15, max_relative = 1e-12);
            assert_relative_eq!(got.im, expected.im, epsilon = 1e-15, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_empty_ladder() {
        assert!(matches!(reduce(&[], 60.0), Err(LadderError::EmptyChain)));
    }

    #[test]
    fn test_invalid_frequency() {
        let ladder = chain(&[(r(100.0), Link::First)]);
        assert!(matches!(
            reduce(&ladder, -60.0),
            Err(LadderError::InvalidFrequency { .. })
        ));
    }

    #[test]
    fn test_exact_negative_pair_is_open() {
        let z = combine_parallel(
            [Complex64::new(5.0, 5.0), Complex64::new(-5.0, -5.0)],
            ZeroBranchPolicy::Exclude,
        );
        assert!(z.re.is_infinite());
        assert!(!z.is_nan());
    }

    #[test]
    fn test_zero_branch_policies() {
        let branches = [Complex64::new(0.0, 0.0), Complex64::new(100.0, 0.0)];
        let excluded = combine_parallel(branches, ZeroBranchPolicy::Exclude);
        assert_relative_eq!(excluded.re, 100.0, max_relative = 1e-12);
        assert_abs_diff_eq!(excluded.im, 0.0);
        assert_eq!(
            combine_parallel(branches, ZeroBranchPolicy::ShortDominates),
            Complex64::new(0.0, 0.0)
        );
    }

    #[test]
    fn test_dc_inductor_in_parallel() {
        let l = Element::inductor(0.5).unwrap();
        let ladder = chain(&[(r(100.0), Link::First), (l, Link::Parallel)]);

        let excluded = reduce(&ladder, 0.0).unwrap();
        assert_relative_eq!(excluded.re, 100.0, max_relative = 1e-12);
        assert_abs_diff_eq!(excluded.im, 0.0);

        let config = ReducerConfig::new().with_zero_branch(ZeroBranchPolicy::ShortDominates);
        let shorted = reduce_with(&ladder, 0.0, &config).unwrap();
        assert_eq!(shorted, Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_open_group_propagates_through_series() {
        // Two DC inductors in parallel under Exclude leave no admittance at all
        let l = Element::inductor(1.0).unwrap();
        let ladder = chain(&[(l, Link::First), (l, Link::Parallel), (r(10.0), Link::Series)]);
        let z = reduce(&ladder, 0.0).unwrap();
        assert!(z.re.is_infinite());
        assert!(!z.is_nan());
    }

    #[test]
    fn test_dc_capacitor_is_open_in_series_and_ignored_in_parallel() {
        let c = Element::capacitor(1e-6).unwrap();

        let series = chain(&[(r(100.0), Link::First), (c, Link::Series)]);
        let z = reduce(&series, 0.0).unwrap();
        assert!(z.im.is_infinite() && z.im > 0.0);
        assert_eq!(z.re, 100.0);

        let parallel = chain(&[(r(100.0), Link::First), (c, Link::Parallel)]);
        let z = reduce(&parallel, 0.0).unwrap();
        assert_relative_eq!(z.re, 100.0, max_relative = 1e-12);
        assert_abs_diff_eq!(z.im, 0.0);
    }
}
