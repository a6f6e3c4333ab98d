//! Shared test support: a small reference decoder that reads a finished
//! symbol back into bytes, checking format/version BCH and RS syndromes on
//! the way.

#![allow(dead_code)]

use rust_qr_encoder::encoder::bch::BchEncoder;
use rust_qr_encoder::encoder::format::format_positions;
use rust_qr_encoder::encoder::function_patterns::function_mask;
use rust_qr_encoder::encoder::reed_solomon::Gf256;
use rust_qr_encoder::encoder::tables::{ec_block_info, total_codewords};
use rust_qr_encoder::{BitMatrix, ECLevel, MaskPattern, QrSymbol, Version};

const ALPHANUMERIC: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Everything the reference decoder recovered from a symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub version: Version,
    pub ec_level: ECLevel,
    pub mask: MaskPattern,
    /// ECI designators seen, in stream order
    pub eci: Vec<u32>,
    /// Mode indicator of every segment, in stream order
    pub modes: Vec<u8>,
    /// Payload bytes (kanji as Shift_JIS)
    pub data: Vec<u8>,
}

/// Rows as strings, '#' for dark and '.' for light
pub fn grid(symbol: &QrSymbol) -> Vec<String> {
    (0..symbol.size())
        .map(|y| {
            (0..symbol.size())
                .map(|x| if symbol.is_dark(x, y) { '#' } else { '.' })
                .collect()
        })
        .collect()
}

pub fn decode_symbol(symbol: &QrSymbol) -> Result<Decoded, String> {
    decode(symbol.modules())
}

pub fn decode(matrix: &BitMatrix) -> Result<Decoded, String> {
    let size = matrix.width();
    if size < 21 || (size - 17) % 4 != 0 {
        return Err(format!("bad symbol size {size}"));
    }
    let version = Version::new(((size - 17) / 4) as u8).map_err(|e| e.to_string())?;

    let (ec_level, mask) = read_format(matrix)?;
    if version.has_version_info() {
        check_version_info(matrix, version)?;
    }

    let func = function_mask(version);
    let bits = extract_bits(matrix, &func, mask);
    let codewords: Vec<u8> = bits
        .chunks_exact(8)
        .take(total_codewords(version))
        .map(|byte| byte.iter().fold(0u8, |acc, &b| (acc << 1) | b as u8))
        .collect();

    let data_codewords = deinterleave_and_check(&codewords, version, ec_level)?;
    let (eci, modes, data) = parse_payload(&data_codewords, version)?;

    Ok(Decoded {
        version,
        ec_level,
        mask,
        eci,
        modes,
        data,
    })
}

fn read_format(matrix: &BitMatrix) -> Result<(ECLevel, MaskPattern), String> {
    let [first, second] = format_positions(matrix.width());
    let read = |copy: [(usize, usize); 15]| {
        copy.iter()
            .enumerate()
            .fold(0u16, |acc, (i, &(x, y))| acc | (u16::from(matrix.get(x, y)) << i))
    };
    let word = read(first);
    if word != read(second) {
        return Err(format!("format copies differ: {word:015b} vs {:015b}", read(second)));
    }
    if !BchEncoder::is_valid_format(word) {
        return Err(format!("format word {word:015b} fails BCH check"));
    }
    let raw = word ^ 0x5412;
    let ec_level = ECLevel::from_format_bits((raw >> 13) as u8);
    let mask = MaskPattern::from_bits(((raw >> 10) & 0b111) as u8)
        .ok_or_else(|| "mask bits out of range".to_string())?;
    Ok((ec_level, mask))
}

fn check_version_info(matrix: &BitMatrix, version: Version) -> Result<(), String> {
    let size = matrix.width();
    let mut bottom_left = 0u32;
    let mut top_right = 0u32;
    for i in 0..18 {
        let a = size - 11 + i % 3;
        let b = i / 3;
        bottom_left |= u32::from(matrix.get(b, a)) << i;
        top_right |= u32::from(matrix.get(a, b)) << i;
    }
    let expected = BchEncoder::version_bits(version);
    if bottom_left != expected || top_right != expected {
        return Err(format!(
            "version info {bottom_left:#x}/{top_right:#x}, expected {expected:#x}"
        ));
    }
    Ok(())
}

/// Unmask and read data modules in zig-zag order
fn extract_bits(matrix: &BitMatrix, func: &BitMatrix, mask: MaskPattern) -> Vec<bool> {
    let dimension = matrix.width();
    let mut bits = Vec::new();
    let mut upward = true;
    let mut col = dimension as i32 - 1;

    while col > 0 {
        if col == 6 {
            col -= 1;
            continue;
        }
        for step in 0..dimension {
            let row = if upward { dimension - 1 - step } else { step };
            for c in [col as usize, col as usize - 1] {
                if !func.get(c, row) {
                    bits.push(matrix.get(c, row) ^ mask.is_masked(row, c));
                }
            }
        }
        upward = !upward;
        col -= 2;
    }
    bits
}

fn deinterleave_and_check(
    codewords: &[u8],
    version: Version,
    ec_level: ECLevel,
) -> Result<Vec<u8>, String> {
    let info = ec_block_info(version, ec_level);
    let total = codewords.len();
    let ecc_total = info.num_blocks * info.ecc_per_block;
    let data_total = total - ecc_total;

    let num_long_blocks = data_total % info.num_blocks;
    let num_short_blocks = info.num_blocks - num_long_blocks;
    let short_len = data_total / info.num_blocks;
    let long_len = short_len + 1;

    let mut blocks: Vec<Vec<u8>> = vec![Vec::new(); info.num_blocks];
    let mut idx = 0;
    for i in 0..long_len {
        for (b, block) in blocks.iter_mut().enumerate() {
            let block_len = if b < num_short_blocks { short_len } else { long_len };
            if i < block_len {
                block.push(codewords[idx]);
                idx += 1;
            }
        }
    }
    for _ in 0..info.ecc_per_block {
        for block in blocks.iter_mut() {
            block.push(codewords[idx]);
            idx += 1;
        }
    }

    let mut data_out = Vec::with_capacity(data_total);
    for (b, block) in blocks.iter().enumerate() {
        let syndromes_clean =
            (0..info.ecc_per_block).all(|i| Gf256::eval_poly(block, Gf256::exp(i)) == 0);
        if !syndromes_clean {
            return Err(format!("block {b} has non-zero syndromes"));
        }
        let data_len = block.len() - info.ecc_per_block;
        data_out.extend_from_slice(&block[..data_len]);
    }
    Ok(data_out)
}

struct BitReader<'a> {
    bits: &'a [bool],
    idx: usize,
}

impl<'a> BitReader<'a> {
    fn new(bits: &'a [bool]) -> Self {
        Self { bits, idx: 0 }
    }

    fn remaining(&self) -> usize {
        self.bits.len() - self.idx
    }

    fn read_bits(&mut self, n: usize) -> Result<u32, String> {
        if self.idx + n > self.bits.len() {
            return Err("bit stream ended early".to_string());
        }
        let mut val = 0u32;
        for _ in 0..n {
            val = (val << 1) | (self.bits[self.idx] as u32);
            self.idx += 1;
        }
        Ok(val)
    }
}

fn char_count_bits(mode: u8, version: Version) -> usize {
    let band = version.band();
    match mode {
        1 => [10, 12, 14][band],
        2 => [9, 11, 13][band],
        4 => [8, 16, 16][band],
        8 => [8, 10, 12][band],
        _ => 0,
    }
}

type Payload = (Vec<u32>, Vec<u8>, Vec<u8>);

fn parse_payload(data_codewords: &[u8], version: Version) -> Result<Payload, String> {
    let bits: Vec<bool> = data_codewords
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |i| (byte >> i) & 1 != 0))
        .collect();
    let mut reader = BitReader::new(&bits);
    let mut eci = Vec::new();
    let mut modes = Vec::new();
    let mut data = Vec::new();

    while reader.remaining() >= 4 {
        let mode = reader.read_bits(4)? as u8;
        if mode == 0 {
            break;
        }
        modes.push(mode);
        let count = reader.read_bits(char_count_bits(mode, version))? as usize;
        match mode {
            1 => {
                let mut left = count;
                while left > 0 {
                    let take = left.min(3);
                    let value = reader.read_bits([0, 4, 7, 10][take])?;
                    data.extend(format!("{value:0take$}").bytes());
                    left -= take;
                }
            }
            2 => {
                let mut left = count;
                while left > 0 {
                    if left >= 2 {
                        let value = reader.read_bits(11)? as usize;
                        data.push(ALPHANUMERIC[value / 45]);
                        data.push(ALPHANUMERIC[value % 45]);
                        left -= 2;
                    } else {
                        data.push(ALPHANUMERIC[reader.read_bits(6)? as usize]);
                        left -= 1;
                    }
                }
            }
            4 => {
                for _ in 0..count {
                    data.push(reader.read_bits(8)? as u8);
                }
            }
            7 => {
                let first = reader.read_bits(8)?;
                let designator = if first & 0x80 == 0 {
                    first
                } else if first & 0x40 == 0 {
                    ((first & 0x3F) << 8) | reader.read_bits(8)?
                } else {
                    ((first & 0x1F) << 16) | reader.read_bits(16)?
                };
                eci.push(designator);
            }
            8 => {
                for _ in 0..count {
                    let value = reader.read_bits(13)?;
                    let mut code = ((value / 0xC0) << 8) | (value % 0xC0);
                    code += if code < 0x1F00 { 0x8140 } else { 0xC140 };
                    data.push((code >> 8) as u8);
                    data.push((code & 0xFF) as u8);
                }
            }
            other => return Err(format!("unexpected mode indicator {other}")),
        }
    }

    Ok((eci, modes, data))
}
