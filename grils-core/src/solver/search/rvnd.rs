#[cfg(test)]
#[path = "../../../tests/unit/solver/search/rvnd_test.rs"]
mod rvnd_test;

use crate::models::{Instance, Solution};
use crate::solver::search::local::*;
use crate::solver::search::{CommonOperator, LocalSearchOperator, MoveGenerators};
use crate::utils::DefaultRandom;
use std::sync::Arc;

/// Tags naming the available local search neighborhoods.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperatorTag {
    /// Relocate a single customer.
    RelocateSingle,
    /// Swap two single customers.
    SwapSingle,
    /// Relocate a customer pair.
    RelocatePair,
    /// Swap a customer pair with a single customer.
    SwapPairSingle,
    /// Swap two customer pairs.
    SwapPair,
    /// Relocate a three customer string.
    RelocateTriple,
    /// Swap a three customer string with a single customer.
    SwapTripleSingle,
    /// Swap a three customer string with a customer pair.
    SwapTriplePair,
    /// Swap two three customer strings.
    SwapTriple,
    /// Intra-route two-opt.
    TwoOpt,
    /// Inter-route two-opt splitting both routes.
    Split,
    /// Inter-route suffix exchange.
    Tails,
    /// Relocate a reversed customer pair.
    RelocatePairReversed,
    /// Swap a reversed customer pair with a single customer.
    SwapPairSingleReversed,
    /// Swap two customer pairs, both reversed.
    SwapPairReversedBoth,
    /// Swap two customer pairs, one reversed.
    SwapPairReversedOne,
    /// Relocate a reversed three customer string.
    RelocateTripleReversed,
    /// Swap a reversed three customer string with a single customer.
    SwapTripleSingleReversed,
    /// Swap a three customer string with a pair, both reversed.
    SwapTriplePairReversedBoth,
    /// Swap a three customer string with a pair, the string reversed.
    SwapTriplePairReversedOne,
    /// Swap two three customer strings, both reversed.
    SwapTripleReversedBoth,
    /// Swap two three customer strings, one reversed.
    SwapTripleReversedOne,
    /// Ejection chain search over linked relocations.
    EjectionChain,
}

impl OperatorTag {
    /// Returns the whole catalog except the ejection chain, in the order the
    /// main optimization assembles its first descent tier.
    pub fn full_catalog() -> Vec<OperatorTag> {
        use OperatorTag::*;
        vec![
            SwapSingle,
            RelocateSingle,
            Tails,
            Split,
            SwapPairReversedBoth,
            SwapPair,
            RelocatePairReversed,
            SwapPairSingleReversed,
            SwapPairReversedOne,
            SwapPairSingle,
            RelocatePair,
            TwoOpt,
            RelocateTripleReversed,
            RelocateTriple,
            SwapTripleReversedBoth,
            SwapTriple,
            SwapTripleSingleReversed,
            SwapTriplePairReversedBoth,
            SwapTripleReversedOne,
            SwapTripleSingle,
            SwapTriplePair,
            SwapTriplePairReversedOne,
        ]
    }
}

fn create_operator(
    tag: OperatorTag,
    instance: &Arc<Instance>,
    tolerance: f64,
    partial: bool,
) -> Box<dyn LocalSearchOperator> {
    let vertices_num = instance.vertices_num() as usize;

    macro_rules! boxed {
        ($neighborhood:expr) => {
            Box::new(CommonOperator::new($neighborhood, tolerance, partial, vertices_num))
        };
    }

    match tag {
        OperatorTag::RelocateSingle => boxed!(RelocateSingle::new(instance.clone())),
        OperatorTag::SwapSingle => boxed!(SwapSingle::new(instance.clone())),
        OperatorTag::RelocatePair => boxed!(RelocatePair::new(instance.clone())),
        OperatorTag::SwapPairSingle => boxed!(SwapPairSingle::new(instance.clone())),
        OperatorTag::SwapPair => boxed!(SwapPair::new(instance.clone())),
        OperatorTag::RelocateTriple => boxed!(RelocateTriple::new(instance.clone())),
        OperatorTag::SwapTripleSingle => boxed!(SwapTripleSingle::new(instance.clone())),
        OperatorTag::SwapTriplePair => boxed!(SwapTriplePair::new(instance.clone())),
        OperatorTag::SwapTriple => boxed!(SwapTriple::new(instance.clone())),
        OperatorTag::TwoOpt => boxed!(TwoOpt::new(instance.clone())),
        OperatorTag::Split => boxed!(Split::new(instance.clone())),
        OperatorTag::Tails => boxed!(Tails::new(instance.clone())),
        OperatorTag::RelocatePairReversed => boxed!(RelocatePairReversed::new(instance.clone())),
        OperatorTag::SwapPairSingleReversed => boxed!(SwapPairSingleReversed::new(instance.clone())),
        OperatorTag::SwapPairReversedBoth => boxed!(SwapPairReversed::<true>::new(instance.clone())),
        OperatorTag::SwapPairReversedOne => boxed!(SwapPairReversed::<false>::new(instance.clone())),
        OperatorTag::RelocateTripleReversed => boxed!(RelocateTripleReversed::new(instance.clone())),
        OperatorTag::SwapTripleSingleReversed => boxed!(SwapTripleSingleReversed::new(instance.clone())),
        OperatorTag::SwapTriplePairReversedBoth => boxed!(SwapTriplePairReversed::<true>::new(instance.clone())),
        OperatorTag::SwapTriplePairReversedOne => boxed!(SwapTriplePairReversed::<false>::new(instance.clone())),
        OperatorTag::SwapTripleReversedBoth => boxed!(SwapTripleReversed::<true>::new(instance.clone())),
        OperatorTag::SwapTripleReversedOne => boxed!(SwapTripleReversed::<false>::new(instance.clone())),
        OperatorTag::EjectionChain => {
            // The chain search walks whole routes and assumes every customer
            // is served; running it on partial solutions is not supported.
            assert!(!partial, "the ejection chain cannot run on partial solutions");
            boxed!(EjectionChain::new(instance.clone(), tolerance))
        }
    }
}

/// Randomized variable neighborhood descent: applies one rough best
/// improvement cycle of every operator in random order. A single pass, not a
/// descent to the common fixed point, which costs little quality and saves a
/// lot of time.
pub struct RandomizedVnd {
    operators: Vec<Box<dyn LocalSearchOperator>>,
}

impl RandomizedVnd {
    /// Creates a descent tier from the given operator tags. With `partial`
    /// set, operators skip moves whose endpoints are currently unserved.
    pub fn new(instance: &Arc<Instance>, tags: &[OperatorTag], tolerance: f64, partial: bool) -> Self {
        Self { operators: tags.iter().map(|&tag| create_operator(tag, instance, tolerance, partial)).collect() }
    }

    /// Applies the tier to the solution.
    pub fn apply(&mut self, solution: &mut Solution, moves: &mut MoveGenerators, random: &DefaultRandom) {
        random.shuffle(&mut self.operators);

        for operator in &mut self.operators {
            operator.apply_rough_best_improvement(solution, moves);
        }
    }
}

/// Chains descent tiers: tiers run in order, and whenever a tier past the
/// first one improves the solution the composition restarts from the top.
pub struct NeighborhoodComposer {
    tolerance: f64,
    tiers: Vec<RandomizedVnd>,
}

impl NeighborhoodComposer {
    /// Creates an empty composer.
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance, tiers: Vec::new() }
    }

    /// Appends a descent tier.
    pub fn append(&mut self, tier: RandomizedVnd) {
        self.tiers.push(tier);
    }

    /// Applies the tiers until no tier past the first one improves.
    pub fn sequential_apply(&mut self, solution: &mut Solution, moves: &mut MoveGenerators, random: &DefaultRandom) {
        'again: loop {
            for n in 0..self.tiers.len() {
                let current_cost = solution.cost();
                self.tiers[n].apply(solution, moves, random);
                if n > 0 && solution.cost() + self.tolerance < current_cost {
                    continue 'again;
                }
            }
            return;
        }
    }
}
