//! # Constructor Arguments
//!
//! `Args` is the argument list of a synthesized constructor call: positional
//! values followed by keyword values. It is also the change set accepted by
//! `Record::replace`, which takes keywords only.
//!
//! ## Usage
//!
//! ```ignore
//! let p = point.call(Args::new().pos(1).kw("y", 2))?;
//! let q = p.replace(kwargs!(y = 5))?;
//! let r = point.call(args!(1, 2))?;
//! ```
//!
//! Keyword names are kept as given; they are resolved against the record
//! type only when the call is made, so an `Args` can be reused across types.

use smallvec::SmallVec;

#[derive(Debug, Clone, PartialEq)]
pub struct Args<V> {
    positional: SmallVec<[V; 8]>,
    keywords: SmallVec<[(String, V); 8]>,
}

impl<V> Default for Args<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Args<V> {
    pub fn new() -> Self {
        Self {
            positional: SmallVec::new(),
            keywords: SmallVec::new(),
        }
    }

    /// Positional values only.
    pub fn positional<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<V>,
    {
        Self {
            positional: values.into_iter().map(Into::into).collect(),
            keywords: SmallVec::new(),
        }
    }

    /// Keyword values only.
    pub fn keywords<I, K, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Into<V>,
    {
        Self {
            positional: SmallVec::new(),
            keywords: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn pos(mut self, value: impl Into<V>) -> Self {
        self.positional.push(value.into());
        self
    }

    pub fn kw(mut self, name: impl Into<String>, value: impl Into<V>) -> Self {
        self.keywords.push((name.into(), value.into()));
        self
    }

    pub fn positional_len(&self) -> usize {
        self.positional.len()
    }

    pub fn keyword_len(&self) -> usize {
        self.keywords.len()
    }

    pub fn len(&self) -> usize {
        self.positional.len() + self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn into_parts(self) -> (SmallVec<[V; 8]>, SmallVec<[(String, V); 8]>) {
        (self.positional, self.keywords)
    }
}

impl<V, K, T> From<Vec<(K, T)>> for Args<V>
where
    K: Into<String>,
    T: Into<V>,
{
    fn from(pairs: Vec<(K, T)>) -> Self {
        Args::keywords(pairs)
    }
}

impl<V, K, T, const N: usize> From<[(K, T); N]> for Args<V>
where
    K: Into<String>,
    T: Into<V>,
{
    fn from(pairs: [(K, T); N]) -> Self {
        Args::keywords(pairs)
    }
}
