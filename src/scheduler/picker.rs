use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source de hasard injectable : tirage uniforme dans une liste ordonnée non vide.
pub trait Picker {
    /// Retourne un index dans `0..len` ; `len` est toujours > 0.
    fn pick_index(&mut self, len: usize) -> usize;

    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            return None;
        }
        items.get(self.pick_index(items.len()))
    }
}

/// Picker reproductible : même graine, même suite de tirages.
#[derive(Debug, Clone)]
pub struct SeededPicker {
    rng: ChaCha8Rng,
}

impl SeededPicker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Picker for SeededPicker {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}
