//! Fixed-capacity vector with an explicit element count
//!
//! Coin lists never exceed [`MAX_COINS`], so pool records keep them inline
//! instead of on the heap. Unused slots always hold `T::default()`, which
//! keeps the derived equality and hashing consistent with the valid prefix.

use factory_config::limits::MAX_COINS;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors from bounded collection operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FixedVecError {
    #[error("Capacity exceeded: max {max_capacity}, attempted {attempted}")]
    CapacityExceeded { max_capacity: usize, attempted: usize },
}

/// Bounded array: `count` valid elements followed by defaulted slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedVec<T, const N: usize>
where
    T: Copy,
{
    /// Number of valid elements (0 to N)
    count: u8,

    /// Fixed-size array holding elements (unused slots are defaulted)
    elements: [T; N],
}

/// Coin-sized list used throughout pool records
pub type CoinArray<T> = FixedVec<T, MAX_COINS>;

impl<T, const N: usize> FixedVec<T, N>
where
    T: Copy + Default,
{
    /// Create new empty FixedVec
    pub fn new() -> Self {
        Self {
            count: 0,
            elements: [T::default(); N],
        }
    }

    /// Copy a slice into a new FixedVec
    pub fn from_slice(slice: &[T]) -> Result<Self, FixedVecError> {
        if slice.len() > N {
            return Err(FixedVecError::CapacityExceeded {
                max_capacity: N,
                attempted: slice.len(),
            });
        }

        let mut result = Self::new();
        result.elements[..slice.len()].copy_from_slice(slice);
        result.count = slice.len() as u8;
        Ok(result)
    }

    /// Push element if capacity allows
    pub fn try_push(&mut self, element: T) -> Result<(), FixedVecError> {
        let count = self.count as usize;
        if count >= N {
            return Err(FixedVecError::CapacityExceeded {
                max_capacity: N,
                attempted: count + 1,
            });
        }

        self.elements[count] = element;
        self.count += 1;
        Ok(())
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn len(&self) -> usize {
        self.count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Valid elements only
    pub fn as_slice(&self) -> &[T] {
        &self.elements[..self.count as usize]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.as_slice().to_vec()
    }
}

impl<T, const N: usize> FixedVec<T, N>
where
    T: Copy + Default + PartialEq,
{
    pub fn contains(&self, element: &T) -> bool {
        self.as_slice().contains(element)
    }

    /// Index of the first element equal to `element`
    pub fn position(&self, element: &T) -> Option<usize> {
        self.iter().position(|e| e == element)
    }
}

impl<T, const N: usize> Default for FixedVec<T, N>
where
    T: Copy + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> TryFrom<&[T]> for FixedVec<T, N>
where
    T: Copy + Default,
{
    type Error = FixedVecError;

    fn try_from(slice: &[T]) -> Result<Self, Self::Error> {
        Self::from_slice(slice)
    }
}

impl<T, const N: usize> TryFrom<Vec<T>> for FixedVec<T, N>
where
    T: Copy + Default,
{
    type Error = FixedVecError;

    fn try_from(vec: Vec<T>) -> Result<Self, Self::Error> {
        Self::from_slice(&vec)
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a FixedVec<T, N>
where
    T: Copy + Default,
{
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Serialized as a plain sequence of the valid elements
impl<T, const N: usize> Serialize for FixedVec<T, N>
where
    T: Copy + Default + Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.as_slice().serialize(serializer)
    }
}

impl<'de, T, const N: usize> Deserialize<'de> for FixedVec<T, N>
where
    T: Copy + Default + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let items = Vec::<T>::deserialize(deserializer)?;
        Self::from_slice(&items).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_until_full() {
        let mut v: FixedVec<u8, 3> = FixedVec::new();
        v.try_push(1).unwrap();
        v.try_push(2).unwrap();
        v.try_push(3).unwrap();
        assert_eq!(
            v.try_push(4),
            Err(FixedVecError::CapacityExceeded { max_capacity: 3, attempted: 4 })
        );
        assert_eq!(v.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_equality_ignores_capacity_tail() {
        let a: FixedVec<u8, 4> = FixedVec::from_slice(&[5, 6]).unwrap();
        let mut b: FixedVec<u8, 4> = FixedVec::new();
        b.try_push(5).unwrap();
        b.try_push(6).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.position(&6), Some(1));
        assert!(!a.contains(&0));
    }

    #[test]
    fn test_from_slice_too_long() {
        let result: Result<FixedVec<u8, 2>, _> = FixedVec::from_slice(&[1, 2, 3]);
        assert!(result.is_err());
    }

    #[test]
    fn test_serde_as_sequence() {
        let v: CoinArray<u8> = FixedVec::from_slice(&[6, 18]).unwrap();
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "[6,18]");
        let back: CoinArray<u8> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}
