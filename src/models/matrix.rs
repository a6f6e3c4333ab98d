/// Compact bit matrix (true = dark)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create a new all-light bit matrix with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let bytes_needed = (width * height).div_ceil(8);
        Self {
            width,
            height,
            data: vec![0; bytes_needed],
        }
    }

    /// Get matrix width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get matrix height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get bit at (x, y); out of range reads as false
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y * self.width + x;
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Set bit at (x, y); out of range writes are ignored
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        if value {
            self.data[index / 8] |= 1 << (index % 8);
        } else {
            self.data[index / 8] &= !(1 << (index % 8));
        }
    }

    /// Toggle bit at (x, y)
    pub fn toggle(&mut self, x: usize, y: usize) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        self.data[index / 8] ^= 1 << (index % 8);
    }

    /// Number of set bits
    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Row `y` as a vector of bits, left to right
    pub fn row(&self, y: usize) -> Vec<bool> {
        (0..self.width).map(|x| self.get(x, y)).collect()
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

/// State of one module while a symbol is being laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Module {
    /// Not yet written
    Unset,
    /// Held for format information, filled once the mask is known
    Reserved,
    /// Finder, separator, timing, alignment, version info or dark module
    Function(bool),
    /// Data or error correction bit
    Data(bool),
}

impl Module {
    /// Unset and reserved modules read as light
    pub fn is_dark(&self) -> bool {
        matches!(self, Module::Function(true) | Module::Data(true))
    }

    /// True for everything except data modules and free space
    pub fn is_function(&self) -> bool {
        matches!(self, Module::Function(_) | Module::Reserved)
    }
}

/// Square grid of [`Module`]s, mutated in place while a symbol is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    size: usize,
    modules: Vec<Module>,
}

impl ModuleMatrix {
    /// Create a `size` x `size` grid of unset modules
    pub fn new(size: usize) -> Self {
        Self {
            size,
            modules: vec![Module::Unset; size * size],
        }
    }

    /// Side length in modules
    pub fn size(&self) -> usize {
        self.size
    }

    /// Module at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> Module {
        self.modules[y * self.size + x]
    }

    /// Overwrite the module at column `x`, row `y`
    pub fn set(&mut self, x: usize, y: usize, module: Module) {
        self.modules[y * self.size + x] = module;
    }

    /// Shorthand for dark/light checks during scoring
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_dark()
    }

    /// Number of data modules (remainder bits included)
    pub fn data_module_count(&self) -> usize {
        self.modules
            .iter()
            .filter(|m| matches!(m, Module::Data(_)))
            .count()
    }

    /// True when no module is left unset
    pub fn is_complete(&self) -> bool {
        !self.modules.contains(&Module::Unset)
    }

    /// Flatten to a dark/light bit grid
    pub fn to_bit_matrix(&self) -> BitMatrix {
        let mut bits = BitMatrix::new(self.size, self.size);
        for y in 0..self.size {
            for x in 0..self.size {
                if self.is_dark(x, y) {
                    bits.set(x, y, true);
                }
            }
        }
        bits
    }

    /// Bit grid marking every non-data module
    pub fn function_mask(&self) -> BitMatrix {
        let mut bits = BitMatrix::new(self.size, self.size);
        for y in 0..self.size {
            for x in 0..self.size {
                if self.get(x, y).is_function() {
                    bits.set(x, y, true);
                }
            }
        }
        bits
    }
}
