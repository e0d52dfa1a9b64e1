//! The shape registry: interned fixed-shape type descriptors.
//!
//! Every successfully constructed [`Matrix`](crate::Matrix) carries a
//! `&'static ShapeType` obtained from [`resolve`], so "same shape" is
//! literal pointer identity. The registry is pre-populated with the common
//! small shapes (all of 1..=6 x 1..=6 plus column vectors up to length 9)
//! and mints descriptors for other shapes lazily, at most once per shape,
//! under a lock. Entries live for the rest of the process; they are pure
//! descriptors, so there is nothing to tear down.

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

/// Interned descriptor of a fixed matrix shape.
///
/// Obtain instances through [`resolve`]; two descriptors for the same
/// `(rows, cols)` are always the same `&'static` reference.
///
/// # Examples
///
/// ```
/// use symmat_core::shape;
///
/// let a = shape::resolve(3, 1);
/// let b = shape::resolve(3, 1);
/// assert!(std::ptr::eq(a, b));
/// assert_eq!(a.shape(), (3, 1));
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct ShapeType {
    rows: usize,
    cols: usize,
}

impl ShapeType {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The `(rows, cols)` pair.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of scalar storage elements, `rows * cols`.
    pub fn storage_dim(&self) -> usize {
        self.rows * self.cols
    }

    /// Tangent dimension; matrices are their own tangent space, so this
    /// equals [`ShapeType::storage_dim`].
    pub fn tangent_dim(&self) -> usize {
        self.storage_dim()
    }

    /// Whether this shape is a row or column vector.
    pub fn is_vector(&self) -> bool {
        self.rows == 1 || self.cols == 1
    }
}

type Registry = Mutex<HashMap<(usize, usize), &'static ShapeType>>;

static REGISTRY: OnceLock<Registry> = OnceLock::new();

fn mint(rows: usize, cols: usize) -> &'static ShapeType {
    Box::leak(Box::new(ShapeType { rows, cols }))
}

fn seed() -> Registry {
    let mut map = HashMap::new();
    // The shapes downstream geometry code names all the time.
    for rows in 1..=6 {
        for cols in 1..=6 {
            map.insert((rows, cols), mint(rows, cols));
        }
    }
    for rows in 7..=9 {
        map.insert((rows, 1), mint(rows, 1));
    }
    Mutex::new(map)
}

/// Return the canonical descriptor for `(rows, cols)`, minting and caching
/// it on first use. Idempotent: repeated calls return the identical
/// reference. Zero dimensions are allowed and denote empty matrices.
pub fn resolve(rows: usize, cols: usize) -> &'static ShapeType {
    let registry = REGISTRY.get_or_init(seed);
    let mut map = registry.lock().expect("shape registry poisoned");
    map.entry((rows, cols)).or_insert_with(|| mint(rows, cols))
}
