//! Operand registry: target IR name, element type and shape for every
//! operand id, original or synthesized during lowering.

pub mod naming;
pub mod types;

#[cfg(test)]
mod types_tests;

use indexmap::IndexMap;
use nnpkg_core::{GraphInfo, OperandId};
use nnpkg_format::{DataType, NamedValueType, TensorType};

use crate::invariants::{ensure_fresh, ensure_registered};
use crate::{Error, Result};

/// Derived metadata of one operand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperandInfo {
    /// Name downstream operations refer to. Scalar inputs are rebound to the
    /// output of their reshape.
    pub name: String,
    /// Name used for package features.
    pub external_name: String,
    pub dimensions: Vec<u32>,
    pub data_type: DataType,
}

impl OperandInfo {
    pub fn new(name: String, dimensions: Vec<u32>, data_type: DataType) -> Self {
        Self {
            external_name: name.clone(),
            name,
            dimensions,
            data_type,
        }
    }

    pub fn rank(&self) -> usize {
        self.dimensions.len()
    }

    pub fn tensor_type(&self) -> TensorType {
        TensorType::new(self.data_type, self.dimensions.clone())
    }

    pub fn named_type(&self) -> NamedValueType {
        NamedValueType::new(self.name.clone(), self.tensor_type())
    }
}

/// Hands out ids for internal operands, strictly above every graph id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InternalIdAllocator {
    last: OperandId,
}

impl InternalIdAllocator {
    pub fn starting_after(last: OperandId) -> Self {
        Self { last }
    }

    pub fn next(&mut self) -> Result<OperandId> {
        let id = self.last.checked_add(1).ok_or(Error::CapacityExceeded)?;
        self.last = id;
        Ok(id)
    }

    pub fn last(&self) -> OperandId {
        self.last
    }
}

/// Registry state captured before lowering one operation.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Checkpoint {
    len: usize,
    allocator: InternalIdAllocator,
}

#[derive(Clone, Debug)]
pub struct OperandRegistry {
    infos: IndexMap<OperandId, OperandInfo>,
    allocator: InternalIdAllocator,
}

impl OperandRegistry {
    /// Empty registry whose internal ids start after `max_id`.
    pub fn new(max_id: OperandId) -> Self {
        Self {
            infos: IndexMap::new(),
            allocator: InternalIdAllocator::starting_after(max_id),
        }
    }

    /// Registry with every operand of `graph` registered.
    pub fn for_graph(graph: &GraphInfo) -> Self {
        let mut registry = Self::new(graph.max_operand_id());
        for &id in graph.operands.keys() {
            registry.register(graph, id);
        }
        registry
    }

    /// Record metadata for a graph operand.
    pub fn register(&mut self, graph: &GraphInfo, id: OperandId) {
        let operand = graph.operand(id);
        let info = OperandInfo::new(
            naming::operand_name(id, operand),
            operand.shape().to_vec(),
            types::to_target(operand.data_type()),
        );
        self.insert(id, info);
    }

    /// Register a fresh internal operand and return its id.
    pub fn allocate_internal(
        &mut self,
        data_type: DataType,
        dimensions: impl Into<Vec<u32>>,
    ) -> Result<OperandId> {
        let id = self.allocator.next()?;
        tracing::trace!(id, ?data_type, "allocated internal operand");
        self.insert(
            id,
            OperandInfo::new(naming::internal_name(id), dimensions.into(), data_type),
        );
        Ok(id)
    }

    /// Metadata of a registered operand. Panics on unknown ids.
    pub fn lookup(&self, id: OperandId) -> &OperandInfo {
        ensure_registered(self.infos.get(&id), id)
    }

    pub fn get(&self, id: OperandId) -> Option<&OperandInfo> {
        self.infos.get(&id)
    }

    /// Point downstream references of `id` at another value name.
    pub fn rebind(&mut self, id: OperandId, name: String) {
        ensure_registered(self.infos.get_mut(&id), id).name = name;
    }

    pub fn len(&self) -> usize {
        self.infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (OperandId, &OperandInfo)> {
        self.infos.iter().map(|(&id, info)| (id, info))
    }

    pub fn allocator(&self) -> &InternalIdAllocator {
        &self.allocator
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            len: self.infos.len(),
            allocator: self.allocator,
        }
    }

    /// Drop every internal operand allocated since `checkpoint`.
    pub(crate) fn rollback(&mut self, checkpoint: Checkpoint) {
        self.infos.truncate(checkpoint.len);
        self.allocator = checkpoint.allocator;
    }

    fn insert(&mut self, id: OperandId, info: OperandInfo) {
        let previous = self.infos.insert(id, info);
        ensure_fresh(id, previous.is_none());
    }
}
