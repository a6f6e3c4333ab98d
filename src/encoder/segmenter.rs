/// Minimal-length segmentation of the payload into mode runs
use crate::error::EncodeError;
use crate::models::{Charset, Mode, Segment, Version};

use super::modes::{self, alphanumeric, kanji, numeric};

/// Per-unit cost in sixths of a bit
const NUMERIC_COST: usize = 20;
const ALPHANUMERIC_COST: usize = 33;
const BYTE_COST: usize = 48;
const KANJI_COST: usize = 78;
const UNREACHABLE: usize = usize::MAX / 4;

/// One character of input as far as mode selection is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Unit {
    start: usize,
    len: usize,
    numeric: bool,
    alphanumeric: bool,
    kanji: bool,
}

impl Unit {
    fn cost(&self, mode: Mode) -> Option<usize> {
        match mode {
            Mode::Numeric if self.numeric => Some(NUMERIC_COST),
            Mode::Alphanumeric if self.alphanumeric => Some(ALPHANUMERIC_COST),
            Mode::Byte => Some(BYTE_COST * self.len),
            Mode::Kanji if self.kanji => Some(KANJI_COST),
            _ => None,
        }
    }
}

/// Validated input split into units, ready to be segmented for any version
#[derive(Debug, Clone)]
pub struct Segmenter<'a> {
    input: &'a [u8],
    charset: Charset,
    units: Vec<Unit>,
}

impl<'a> Segmenter<'a> {
    /// Validate `input` against `charset` and split it into units
    pub fn new(input: &'a [u8], charset: Charset) -> Result<Self, EncodeError> {
        let spans = split_units(input, charset)?;
        let units = spans
            .into_iter()
            .map(|(start, len)| classify(input, start, len, charset))
            .collect();
        Ok(Self {
            input,
            charset,
            units,
        })
    }

    /// Number of units (characters) in the input
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Cheapest mode for every unit, given the count field widths of `version`
    pub fn optimal_modes(&self, version: Version) -> Vec<Mode> {
        let modes = Mode::DATA_MODES;
        let head = modes.map(|m| (4 + m.char_count_bits(version)) * 6);

        let mut prev = head;
        let mut came_from: Vec<[usize; 4]> = Vec::with_capacity(self.units.len());

        for unit in &self.units {
            let mut cur = [UNREACHABLE; 4];
            let mut from = [usize::MAX; 4];
            for (m, mode) in modes.iter().enumerate() {
                if let Some(cost) = unit.cost(*mode) {
                    if prev[m] < UNREACHABLE {
                        cur[m] = prev[m] + cost;
                        from[m] = m;
                    }
                }
            }

            // Close the segment after this unit and open another one
            let extended = cur;
            for to in 0..modes.len() {
                for (fr, &cost) in extended.iter().enumerate() {
                    if cost >= UNREACHABLE {
                        continue;
                    }
                    let switched = cost.div_ceil(6) * 6 + head[to];
                    if switched < cur[to] {
                        cur[to] = switched;
                        from[to] = fr;
                    }
                }
            }

            came_from.push(from);
            prev = cur;
        }

        let mut state = (0..modes.len()).min_by_key(|&m| prev[m]).unwrap_or(0);
        let mut result = vec![Mode::Byte; self.units.len()];
        for (i, from) in came_from.iter().enumerate().rev() {
            state = from[state];
            result[i] = modes[state];
        }
        result
    }

    /// Optimal segment list for `version`
    pub fn segments(&self, version: Version) -> Result<Vec<Segment>, EncodeError> {
        let modes = self.optimal_modes(version);
        let mut segments = Vec::new();

        let mut i = 0;
        while i < self.units.len() {
            let mode = modes[i];
            let start = self.units[i].start;
            let mut j = i;
            while j < self.units.len() && modes[j] == mode {
                j += 1;
            }
            let last = self.units[j - 1];
            let run = &self.input[start..last.start + last.len];
            let segment = modes::encode_run(mode, run).ok_or(EncodeError::UnsupportedCharacter {
                offset: start,
                charset: self.charset,
            })?;
            segments.push(segment);
            i = j;
        }

        Ok(segments)
    }
}

/// (start, len) of every unit, rejecting byte sequences invalid in `charset`
fn split_units(input: &[u8], charset: Charset) -> Result<Vec<(usize, usize)>, EncodeError> {
    let unsupported = |offset: usize| EncodeError::UnsupportedCharacter { offset, charset };

    match charset {
        Charset::Utf8 => {
            let text = std::str::from_utf8(input).map_err(|e| unsupported(e.valid_up_to()))?;
            Ok(text
                .char_indices()
                .map(|(start, c)| (start, c.len_utf8()))
                .collect())
        }
        Charset::Ascii => match input.iter().position(|b| !b.is_ascii()) {
            Some(offset) => Err(unsupported(offset)),
            None => Ok((0..input.len()).map(|i| (i, 1)).collect()),
        },
        Charset::Utf16Be => {
            if input.len() % 2 != 0 {
                return Err(unsupported(input.len() - 1));
            }
            let code_units = input
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
            let mut offset = 0;
            for decoded in char::decode_utf16(code_units) {
                match decoded {
                    Ok(c) => offset += c.len_utf16() * 2,
                    Err(_) => return Err(unsupported(offset)),
                }
            }
            Ok((0..input.len()).step_by(2).map(|i| (i, 2)).collect())
        }
        Charset::ShiftJis => {
            let mut units = Vec::with_capacity(input.len());
            let mut i = 0;
            while i < input.len() {
                match input[i] {
                    0x81..=0x9F | 0xE0..=0xFC => match input.get(i + 1) {
                        Some(0x40..=0x7E | 0x80..=0xFC) => {
                            units.push((i, 2));
                            i += 2;
                        }
                        _ => return Err(unsupported(i)),
                    },
                    0x80 | 0xA0 | 0xFD..=0xFF => return Err(unsupported(i)),
                    _ => {
                        units.push((i, 1));
                        i += 1;
                    }
                }
            }
            Ok(units)
        }
        _ => Ok((0..input.len()).map(|i| (i, 1)).collect()),
    }
}

fn classify(input: &[u8], start: usize, len: usize, charset: Charset) -> Unit {
    let bytes = &input[start..start + len];
    let single_ascii = charset.is_ascii_compatible() && len == 1 && bytes[0].is_ascii();
    Unit {
        start,
        len,
        numeric: single_ascii && numeric::is_numeric(bytes[0]),
        alphanumeric: single_ascii && alphanumeric::is_alphanumeric(bytes[0]),
        kanji: charset.supports_kanji() && kanji::is_kanji(bytes),
    }
}
