//! Memo table for one parameter context.
//!
//! Keys are reduced `(a, b)` pairs. Rows are allocated the first time a
//! given `a` is stored and are kept across [`MemoTable::clear`], so a
//! search reuses the same storage for every candidate.

use crate::mod_arith::MODULUS;

const EMPTY: u16 = u16::MAX;

#[derive(Debug, Default)]
pub struct MemoTable {
    rows: Vec<Vec<u16>>,
    len: usize,
}

impl MemoTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, a: u16, b: u16) -> Option<u16> {
        match self.rows.get(a as usize).and_then(|row| row.get(b as usize)) {
            Some(&v) if v != EMPTY => Some(v),
            _ => None,
        }
    }

    /// Stores `value` under `(a, b)`, returning the entry it replaced.
    pub fn insert(&mut self, a: u16, b: u16, value: u16) -> Option<u16> {
        debug_assert!(a < MODULUS && b < MODULUS && value < MODULUS);
        let a = a as usize;
        if self.rows.len() <= a {
            self.rows.resize_with(a + 1, Vec::new);
        }
        let row = &mut self.rows[a];
        if row.is_empty() {
            row.resize(MODULUS as usize, EMPTY);
        }
        let prev = std::mem::replace(&mut row[b as usize], value);
        if prev == EMPTY {
            self.len += 1;
            None
        } else {
            Some(prev)
        }
    }

    pub fn clear(&mut self) {
        for row in self.rows.iter_mut() {
            row.fill(EMPTY);
        }
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn get_misses_before_insert() {
        let mut table = MemoTable::new();
        assert_eq!(table.get(3, 7), None);
        assert_eq!(table.insert(3, 7, 12), None);
        assert_eq!(table.get(3, 7), Some(12));
        assert_eq!(table.get(3, 8), None);
        assert_eq!(table.get(2, 7), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn insert_reports_replaced_value() {
        let mut table = MemoTable::new();
        table.insert(1, 0, 4);
        assert_eq!(table.insert(1, 0, 9), Some(4));
        assert_eq!(table.get(1, 0), Some(9));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn clear_forgets_everything() {
        let mut table = MemoTable::new();
        table.insert(4, MODULUS - 1, 0);
        table.insert(1, 1, 1);
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.get(4, MODULUS - 1), None);
        assert_eq!(table.get(1, 1), None);
    }
}
