/// Codeword block split, per-block Reed-Solomon and interleaving
use crate::models::{ECLevel, Version};

use super::reed_solomon::ReedSolomonEncoder;
use super::tables::{ec_block_info, total_codewords};

/// One Reed-Solomon block: its data codewords and the EC codewords computed over them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodewordBlock {
    data: Vec<u8>,
    ecc: Vec<u8>,
}

impl CodewordBlock {
    /// Data codewords
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Error correction codewords
    pub fn ecc(&self) -> &[u8] {
        &self.ecc
    }
}

/// Split the padded data codewords into blocks and compute each block's EC codewords.
///
/// Short blocks come first; the trailing `total % num_blocks` blocks carry one
/// more data codeword. `data` must already be exactly the data capacity of
/// `version` at `ec_level`.
pub fn split_into_blocks(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<CodewordBlock> {
    let info = ec_block_info(version, ec_level);
    let total = total_codewords(version);
    let num_long = total % info.num_blocks;
    let num_short = info.num_blocks - num_long;
    let short_len = total / info.num_blocks - info.ecc_per_block;
    debug_assert_eq!(data.len(), short_len * info.num_blocks + num_long);

    let rs = ReedSolomonEncoder::new(info.ecc_per_block);
    let mut blocks = Vec::with_capacity(info.num_blocks);
    let mut offset = 0;
    for i in 0..info.num_blocks {
        let len = short_len + usize::from(i >= num_short);
        let chunk = &data[offset..offset + len];
        offset += len;
        blocks.push(CodewordBlock {
            data: chunk.to_vec(),
            ecc: rs.encode(chunk),
        });
    }
    blocks
}

/// Final codeword sequence: data column by column, then EC column by column
pub fn interleave(blocks: &[CodewordBlock]) -> Vec<u8> {
    let max_data = blocks.iter().map(|b| b.data.len()).max().unwrap_or(0);
    let ecc_len = blocks.first().map_or(0, |b| b.ecc.len());
    let total: usize = blocks.iter().map(|b| b.data.len() + b.ecc.len()).sum();

    let mut out = Vec::with_capacity(total);
    for i in 0..max_data {
        out.extend(blocks.iter().filter_map(|b| b.data.get(i)));
    }
    for i in 0..ecc_len {
        out.extend(blocks.iter().filter_map(|b| b.ecc.get(i)));
    }
    out
}
