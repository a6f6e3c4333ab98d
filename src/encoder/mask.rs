/// Mask application, penalty scoring and mask selection
use log::trace;
use rayon::prelude::*;

use crate::models::{BitMatrix, ECLevel, MaskPattern, Module, ModuleMatrix};

use super::format::write_format_info;

const N1_BASE: u32 = 3;
const N2: u32 = 3;
const N3: u32 = 40;
const N4: u32 = 10;

const FINDER_LIKE: [bool; 7] = [true, false, true, true, true, false, true];

/// Penalty of one candidate, split by rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Penalty {
    /// Runs of five or more same-colour modules
    pub runs: u32,
    /// 2x2 same-colour blocks
    pub blocks: u32,
    /// 1:1:3:1:1 finder-like patterns next to four light modules
    pub finder_like: u32,
    /// Deviation of the dark ratio from 50%
    pub balance: u32,
}

impl Penalty {
    /// Sum of all four rules
    pub fn total(&self) -> u32 {
        self.runs + self.blocks + self.finder_like + self.balance
    }
}

/// A masked matrix with format information written, ready to compare
#[derive(Debug, Clone)]
pub struct MaskCandidate {
    mask: MaskPattern,
    penalty: Penalty,
    modules: BitMatrix,
}

impl MaskCandidate {
    /// Mask applied
    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    /// Penalty of the masked matrix
    pub fn penalty(&self) -> Penalty {
        self.penalty
    }

    /// Masked grid
    pub fn modules(&self) -> &BitMatrix {
        &self.modules
    }

    /// Finished module grid, format information included
    pub fn into_modules(self) -> BitMatrix {
        self.modules
    }
}

/// XOR every data module the mask predicate selects (row i = y, column j = x)
pub fn apply_mask(matrix: &mut ModuleMatrix, mask: MaskPattern) {
    let size = matrix.size();
    for y in 0..size {
        for x in 0..size {
            if let Module::Data(dark) = matrix.get(x, y) {
                if mask.is_masked(y, x) {
                    matrix.set(x, y, Module::Data(!dark));
                }
            }
        }
    }
}

/// Mask a copy of `unmasked`, write its format word and score it
pub fn evaluate(unmasked: &ModuleMatrix, ec_level: ECLevel, mask: MaskPattern) -> MaskCandidate {
    let mut matrix = unmasked.clone();
    apply_mask(&mut matrix, mask);
    write_format_info(&mut matrix, ec_level, mask);
    let modules = matrix.to_bit_matrix();
    let penalty = score(&modules);
    trace!("mask {mask}: {penalty:?} total {}", penalty.total());
    MaskCandidate {
        mask,
        penalty,
        modules,
    }
}

/// Evaluate all eight masks, in id order. With `parallel` the candidates are
/// scored on the rayon pool; the result is the same either way.
pub fn evaluate_all(unmasked: &ModuleMatrix, ec_level: ECLevel, parallel: bool) -> Vec<MaskCandidate> {
    if parallel {
        MaskPattern::ALL
            .par_iter()
            .map(|&mask| evaluate(unmasked, ec_level, mask))
            .collect()
    } else {
        MaskPattern::ALL
            .iter()
            .map(|&mask| evaluate(unmasked, ec_level, mask))
            .collect()
    }
}

/// Lowest total penalty wins; ties go to the lowest mask id
pub fn select(candidates: Vec<MaskCandidate>) -> Option<MaskCandidate> {
    let mut best: Option<MaskCandidate> = None;
    for candidate in candidates {
        let better = match &best {
            None => true,
            Some(current) => {
                let (a, b) = (candidate.penalty.total(), current.penalty.total());
                a < b || (a == b && candidate.mask.id() < current.mask.id())
            }
        };
        if better {
            best = Some(candidate);
        }
    }
    best
}

/// Score a finished module grid with the four penalty rules
pub fn score(matrix: &BitMatrix) -> Penalty {
    let size = matrix.width();
    let rows: Vec<Vec<bool>> = (0..size).map(|y| matrix.row(y)).collect();
    let cols: Vec<Vec<bool>> = (0..size)
        .map(|x| (0..size).map(|y| matrix.get(x, y)).collect())
        .collect();

    let runs = rows.iter().chain(&cols).map(|line| run_penalty(line)).sum();

    let mut blocks = 0;
    for y in 0..size.saturating_sub(1) {
        for x in 0..size - 1 {
            let c = rows[y][x];
            if rows[y][x + 1] == c && rows[y + 1][x] == c && rows[y + 1][x + 1] == c {
                blocks += N2;
            }
        }
    }

    let finder_like = rows
        .iter()
        .chain(&cols)
        .map(|line| finder_like_count(line))
        .sum::<u32>()
        * N3;

    let total = size * size;
    let dark = matrix.count_ones();
    let balance = if total == 0 {
        0
    } else {
        ((dark * 2).abs_diff(total) * 10 / total) as u32 * N4
    };

    Penalty {
        runs,
        blocks,
        finder_like,
        balance,
    }
}

fn run_penalty(line: &[bool]) -> u32 {
    let mut penalty = 0;
    let mut run = 0u32;
    let mut prev = None;
    for &module in line {
        if Some(module) == prev {
            run += 1;
        } else {
            if run >= 5 {
                penalty += N1_BASE + run - 5;
            }
            run = 1;
            prev = Some(module);
        }
    }
    if run >= 5 {
        penalty += N1_BASE + run - 5;
    }
    penalty
}

fn finder_like_count(line: &[bool]) -> u32 {
    let light = |from: isize, to: isize| {
        let from = from.max(0) as usize;
        let to = (to.max(0) as usize).min(line.len());
        from >= to || !line[from..to].contains(&true)
    };
    let mut count = 0;
    for start in 0..line.len().saturating_sub(6) {
        if line[start..start + 7] != FINDER_LIKE {
            continue;
        }
        let s = start as isize;
        if light(s - 4, s) || light(s + 7, s + 11) {
            count += 1;
        }
    }
    count
}
