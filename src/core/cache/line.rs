/// A single cache line.
///
/// Only residency is modelled: no data bytes and no dirty bit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Whether the line holds a block.
    pub valid: bool,

    /// Tag of the resident block. Meaningful only when `valid`.
    pub tag: u64,

    /// Logical-clock value of the most recent access.
    pub last_used: u64,
}

impl CacheLine {
    /// Returns `true` if the line is valid and holds `tag`.
    #[inline]
    pub fn holds(&self, tag: u64) -> bool {
        self.valid && self.tag == tag
    }

    /// Installs `tag` at time `now`.
    #[inline]
    pub fn fill(&mut self, tag: u64, now: u64) {
        self.valid = true;
        self.tag = tag;
        self.last_used = now;
    }
}
