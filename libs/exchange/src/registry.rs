//! Pool registry
//!
//! Keyed store of [`Pair`] records. Share tokens are created lazily, one per
//! ordered key, on the first deposit into that key.

use std::collections::HashMap;

use ethereum_types::Address;
use tracing::info;
use token::{share_token_address, ShareToken};

use crate::pair::{Pair, PairKey};

#[derive(Debug, Clone, Default)]
pub struct PoolRegistry {
    pairs: HashMap<PairKey, Pair>,
}

impl PoolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &PairKey) -> Option<&Pair> {
        self.pairs.get(key)
    }

    /// Pair for `key` only if a share token is bound to it
    pub fn get_bound_mut(&mut self, key: &PairKey) -> Option<&mut Pair> {
        self.pairs.get_mut(key).filter(|pair| pair.is_bound())
    }

    /// Mutable pair for `key`, binding a share token owned by `authority` if unset
    ///
    /// Returns the pair and whether this call created its share token.
    /// Calling again for the same key never creates a second share token.
    pub fn lookup_or_create(&mut self, key: PairKey, authority: Address) -> (&mut Pair, bool) {
        let pair = self.pairs.entry(key).or_default();
        if pair.is_bound() {
            return (pair, false);
        }

        let share_address = share_token_address(authority, key.token_a, key.token_b);
        pair.bind(ShareToken::new(share_address, authority));
        info!(
            "Created pair ({:?}, {:?}) with share token {:?}",
            key.token_a, key.token_b, share_address
        );
        (pair, true)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PairKey, &Pair)> {
        self.pairs.iter()
    }
}
