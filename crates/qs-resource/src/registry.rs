//! `PoolRegistry` — every pool declared for a run, addressable by name.
//!
//! Stages refer to pools by name in scenario files.  Names are resolved to
//! `PoolId`s once, while the pipeline is built, so a misspelt pool is
//! rejected before the first event fires.

use std::ops::{Index, IndexMut};

use rustc_hash::FxHashMap;

use qs_core::PoolId;

use crate::{RegistryError, RegistryResult, ResourcePool};

#[derive(Debug, Default)]
pub struct PoolRegistry {
    pools:   Vec<ResourcePool>,
    by_name: FxHashMap<String, PoolId>,
}

impl PoolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a pool.  Fails on a duplicate name or an invalid capacity.
    pub fn declare(&mut self, name: &str, capacity: i64) -> RegistryResult<PoolId> {
        if self.by_name.contains_key(name) {
            return Err(RegistryError::DuplicatePool(name.to_owned()));
        }
        let id = PoolId(self.pools.len() as u32);
        self.pools.push(ResourcePool::new(id, name, capacity)?);
        self.by_name.insert(name.to_owned(), id);
        Ok(id)
    }

    /// Look a pool up by name.
    pub fn resolve(&self, name: &str) -> RegistryResult<PoolId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| RegistryError::UnknownPool(name.to_owned()))
    }

    pub fn get(&self, id: PoolId) -> Option<&ResourcePool> {
        self.pools.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourcePool> {
        self.pools.iter()
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}

impl Index<PoolId> for PoolRegistry {
    type Output = ResourcePool;

    fn index(&self, id: PoolId) -> &ResourcePool {
        &self.pools[id.index()]
    }
}

impl IndexMut<PoolId> for PoolRegistry {
    fn index_mut(&mut self, id: PoolId) -> &mut ResourcePool {
        &mut self.pools[id.index()]
    }
}
