//! Ringpuffer für den Kursverlauf
//!
//! Feste Kapazität `N`, wird zur Laufzeit nie vergrößert.
//! Nicht beschriebene Slots bleiben `0.0`.

#[derive(Debug, Clone, PartialEq)]
pub struct PriceHistory<const N: usize> {
    slots: [f32; N],
    write_index: usize,
    len: usize,
}

impl<const N: usize> Default for PriceHistory<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PriceHistory<N> {
    pub const fn new() -> Self {
        const { assert!(N > 0, "history capacity must be non-zero") };
        Self {
            slots: [0.0; N],
            write_index: 0,
            len: 0,
        }
    }

    /// Schreibt einen Wert an den Schreibindex und rückt ihn modulo `N` weiter
    pub fn push(&mut self, value: f32) {
        self.slots[self.write_index] = value;
        self.write_index = (self.write_index + 1) % N;
        if self.len < N {
            self.len += 1;
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Anzahl geschriebener Werte (maximal `N`)
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Position an die der nächste Wert geschrieben wird
    pub fn write_index(&self) -> usize {
        self.write_index
    }

    /// Alle `N` Slots in Speicher-Reihenfolge
    pub fn slots(&self) -> &[f32; N] {
        &self.slots
    }

    pub fn latest(&self) -> Option<f32> {
        if self.len == 0 {
            None
        } else {
            Some(self.slots[(self.write_index + N - 1) % N])
        }
    }

    /// Geschriebene Werte chronologisch, ältester zuerst
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        let start = (self.write_index + N - self.len) % N;
        (0..self.len).map(move |i| self.slots[(start + i) % N])
    }

    /// Minimum und Maximum der geschriebenen Werte
    pub fn min_max(&self) -> Option<(f32, f32)> {
        self.iter().fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((lo, hi)) => Some((lo.min(value), hi.max(value))),
        })
    }

    pub fn clear(&mut self) {
        self.slots = [0.0; N];
        self.write_index = 0;
        self.len = 0;
    }
}
