//! Bucket hash functions for the supported key types.
//!
//! Each implementation maps a key to a bucket index in `[0, table_size)`.
//! The functions are pure and stateless; only the table calls them, always
//! with a positive `table_size`.
//!
//! The string hash is a plain sum of byte values, so permutations of the
//! same bytes collide: `"ABC" == "CBA" == "BBB"`. That weakness is kept on
//! purpose — tables built on it depend on the resulting bucket layout for
//! reproducible iteration order, and changing the hash would silently
//! reorder every string-keyed table.

/// Key types that can be assigned a bucket in a table of a given size.
pub trait BucketKey {
    /// Bucket index for this key in a table with `table_size` buckets.
    fn bucket(&self, table_size: usize) -> usize;
}

impl BucketKey for i32 {
    #[inline]
    fn bucket(&self, table_size: usize) -> usize {
        i64::from(*self).bucket(table_size)
    }
}

impl BucketKey for i64 {
    #[inline]
    fn bucket(&self, table_size: usize) -> usize {
        // Remainder first, absolute value second; unsigned_abs keeps
        // i64::MIN well-defined.
        (*self % table_size as i64).unsigned_abs() as usize
    }
}

impl BucketKey for str {
    #[inline]
    fn bucket(&self, table_size: usize) -> usize {
        let sum = self
            .bytes()
            .fold(0u32, |acc, b| acc.wrapping_add(u32::from(b)));
        sum as usize % table_size
    }
}

impl BucketKey for String {
    #[inline]
    fn bucket(&self, table_size: usize) -> usize {
        self.as_str().bucket(table_size)
    }
}

/// Pointer-sized opaque key.
///
/// Wraps whatever handle the caller uses to identify an object — a raw
/// pointer, an id minted elsewhere — without the table knowing anything
/// about what it names.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpaqueHandle(usize);

impl OpaqueHandle {
    pub fn from_raw(raw: usize) -> Self {
        OpaqueHandle(raw)
    }

    pub fn from_ptr<T>(ptr: *const T) -> Self {
        OpaqueHandle(ptr as usize)
    }

    pub fn raw(&self) -> usize {
        self.0
    }
}

impl BucketKey for OpaqueHandle {
    #[inline]
    fn bucket(&self, table_size: usize) -> usize {
        // The low two bits carry no information for the typical 4-byte
        // alignment, so shift them out first. Other alignments still hash,
        // just less uniformly.
        (self.0 >> 2) % table_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: every hash lands in `[0, table_size)`, including for a
    /// one-bucket table.
    #[test]
    fn all_hashes_in_range() {
        for size in [1usize, 2, 23, 331] {
            for key in [0i64, 1, -1, 42, -42, i64::MAX, i64::MIN] {
                assert!(key.bucket(size) < size, "key {key} size {size}");
            }
            for key in ["", "a", "threshold", "zzzzzzzz"] {
                assert!(key.bucket(size) < size);
            }
            for raw in [0usize, 4, 0x1000, usize::MAX] {
                assert!(OpaqueHandle::from_raw(raw).bucket(size) < size);
            }
        }
    }

    /// Integer keys hash as remainder-then-absolute-value, so a key and its
    /// negation share a bucket.
    #[test]
    fn integer_hash_is_abs_of_remainder() {
        assert_eq!(5i64.bucket(23), 5);
        assert_eq!((-5i64).bucket(23), 5);
        assert_eq!(28i64.bucket(23), 5);
        assert_eq!((-28i64).bucket(23), 5);
        assert_eq!((-5i32).bucket(23), 5);
    }

    /// i64::MIN must not panic (plain `abs` would overflow).
    #[test]
    fn integer_hash_handles_min() {
        let _ = i64::MIN.bucket(23);
        let _ = i32::MIN.bucket(23);
    }

    /// The string hash is the sum of byte values mod the table size.
    #[test]
    fn string_hash_is_byte_sum() {
        let size = 101;
        assert_eq!("ABC".bucket(size), (65 + 66 + 67) % size);
        assert_eq!("".bucket(size), 0);
        assert_eq!("A".to_string().bucket(size), 65 % size);
    }

    /// Documented weakness: anagrams collide ("ABC" == "CBA" == "BBB").
    #[test]
    fn string_hash_collides_on_anagrams() {
        for size in [23usize, 331, 2311] {
            assert_eq!("ABC".bucket(size), "CBA".bucket(size));
            assert_eq!("ABC".bucket(size), "BBB".bucket(size));
            assert_eq!("listen".bucket(size), "silent".bucket(size));
        }
    }

    /// Handles drop their two alignment bits before hashing, so 4-byte
    /// neighbors land in consecutive buckets.
    #[test]
    fn handle_hash_shifts_alignment_bits() {
        let size = 2311;
        let base = 0x1000usize;
        for step in 0..4 {
            let h = OpaqueHandle::from_raw(base + 4 * step);
            assert_eq!(h.bucket(size), ((base >> 2) + step) % size);
        }
        // The low two bits are ignored entirely.
        assert_eq!(
            OpaqueHandle::from_raw(base).bucket(size),
            OpaqueHandle::from_raw(base + 3).bucket(size)
        );
    }

    /// `from_ptr` round-trips through `raw`.
    #[test]
    fn handle_from_ptr() {
        let value = 7u32;
        let h = OpaqueHandle::from_ptr(&value);
        assert_eq!(h.raw(), &value as *const u32 as usize);
    }
}
