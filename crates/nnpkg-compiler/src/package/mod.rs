//! Package assembly.
//!
//! [`GraphCompiler::build`] turns a graph into a [`BuildPlan`] without
//! touching the filesystem. [`BuildPlan::write_to`] lays the plan out as a
//! package directory.

pub mod layout;

#[cfg(test)]
mod package_tests;

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use nnpkg_core::{ConstantOperand, DataTypeLimits, GraphInfo, MAX_RANK, OperandId};
use nnpkg_format::{
    self as ir, ArrayDataType, DataType, FeatureDescription, Manifest, Model, NamedValueType,
    TensorType, WeightFileBuilder,
};

use crate::constants;
use crate::lower::Lowerer;
use crate::registry::naming::{PLACEHOLDER_INPUT, PLACEHOLDER_OUTPUT};
use crate::registry::{OperandInfo, OperandRegistry, types};
use crate::{Error, Result};

pub use layout::PackageLayout;

/// Single-use compiler over caller-owned graph data.
pub struct GraphCompiler<'a> {
    graph: &'a GraphInfo,
    limits: &'a DataTypeLimits,
    constants: &'a IndexMap<OperandId, ConstantOperand>,
}

impl<'a> GraphCompiler<'a> {
    pub fn new(
        graph: &'a GraphInfo,
        limits: &'a DataTypeLimits,
        constants: &'a IndexMap<OperandId, ConstantOperand>,
    ) -> Self {
        Self {
            graph,
            limits,
            constants,
        }
    }

    /// Build the program and weight file in memory.
    pub fn build(self) -> Result<BuildPlan> {
        let mut model = Model::new();
        let mut lowerer = Lowerer::new(self.limits, OperandRegistry::for_graph(self.graph));

        for &id in &self.graph.input_operands {
            self.add_input(id, &mut model, &mut lowerer)?;
        }
        if self.graph.input_operands.is_empty() {
            add_placeholder(&mut model, &mut lowerer);
        }

        let mut weights = WeightFileBuilder::new();
        let constant_ops = constants::place_constants(
            self.constants,
            lowerer.registry(),
            self.limits,
            &mut weights,
        )?;
        for op in constant_ops {
            lowerer.emit(op);
        }

        for operation in &self.graph.operations {
            lowerer.lower(operation)?;
        }

        let (registry, operations) = lowerer.into_parts();
        let mut outputs = Vec::with_capacity(self.graph.output_operands.len());
        for &id in &self.graph.output_operands {
            let info = registry.lookup(id);
            model.description.outputs.push(self.feature(id, info)?);
            outputs.push(info.name.clone());
        }

        let block = &mut model.main_mut().block;
        block.operations = operations;
        block.outputs = outputs;

        tracing::debug!(
            operations = model.main().block.operations.len(),
            blobs = weights.count(),
            "built program"
        );
        // The header counts every constant, not just the stored blobs.
        let constant_count =
            u32::try_from(self.constants.len()).map_err(|_| Error::CapacityExceeded)?;
        Ok(BuildPlan {
            model,
            weights: weights.finish_with_count(constant_count),
            registry,
        })
    }

    /// Build, then write the package under `working_dir`.
    pub fn compile(self, working_dir: &Path) -> Result<CompiledPackage> {
        self.build()?.write_to(working_dir)
    }

    fn add_input(&self, id: OperandId, model: &mut Model, lowerer: &mut Lowerer<'_>) -> Result<()> {
        let info = lowerer.registry().lookup(id);
        let feature = self.feature(id, info)?;
        let ty = TensorType::new(info.data_type, feature.shape.clone());
        let input = NamedValueType::new(info.name.clone(), ty);
        let data_type = info.data_type;

        model.description.inputs.push(feature);
        model.main_mut().inputs.push(input);

        // Features are at least rank 1; restore the scalar for consumers.
        if self.graph.operand(id).descriptor.is_scalar() {
            let scalar = lowerer.registry_mut().allocate_internal(data_type, Vec::new())?;
            lowerer.reshape(id, scalar)?;
            let name = lowerer.registry().lookup(scalar).name.clone();
            lowerer.registry_mut().rebind(id, name);
        }
        Ok(())
    }

    fn feature(&self, id: OperandId, info: &OperandInfo) -> Result<FeatureDescription> {
        let descriptor = &self.graph.operand(id).descriptor;
        if descriptor.rank() > MAX_RANK {
            return Err(Error::not_supported(
                "Unsupported rank for input. It should be between 0 to 5.",
            ));
        }
        let data_type = types::to_array(descriptor.data_type).ok_or_else(|| {
            Error::not_supported(format!(
                "Unsupported data type {} for input or output.",
                descriptor.data_type
            ))
        })?;
        let shape = if descriptor.is_scalar() {
            vec![1]
        } else {
            descriptor.shape.clone()
        };
        Ok(FeatureDescription {
            name: info.external_name.clone(),
            data_type,
            shape,
        })
    }
}

/// The program must read at least one real input.
fn add_placeholder(model: &mut Model, lowerer: &mut Lowerer<'_>) {
    let ty = TensorType::new(DataType::Float16, vec![1]);
    model.description.inputs.push(FeatureDescription {
        name: PLACEHOLDER_INPUT.to_owned(),
        data_type: ArrayDataType::Float16,
        shape: vec![1],
    });
    model
        .main_mut()
        .inputs
        .push(NamedValueType::new(PLACEHOLDER_INPUT, ty.clone()));
    lowerer.emit(
        ir::Operation::new("add")
            .arg("x", PLACEHOLDER_INPUT)
            .arg("y", PLACEHOLDER_INPUT)
            .output(NamedValueType::new(PLACEHOLDER_OUTPUT, ty)),
    );
}

/// A fully built package that has not been written yet.
#[derive(Debug)]
pub struct BuildPlan {
    pub model: Model,
    /// Complete weight file, header included.
    pub weights: Vec<u8>,
    pub registry: OperandRegistry,
}

impl BuildPlan {
    /// Write the package into a fresh directory under `working_dir`.
    ///
    /// Not transactional: on error the directory may be left incomplete.
    /// The manifest is written last, so a package without one is unfinished.
    pub fn write_to(self, working_dir: &Path) -> Result<CompiledPackage> {
        let layout = PackageLayout::new(working_dir, &layout::package_token());

        fs::create_dir_all(layout.weights_dir())
            .map_err(Error::io("Fail to create .mlpackage directory structure"))?;
        fs::write(layout.weights_file(), &self.weights)
            .map_err(Error::io("Fail to write weights file"))?;
        fs::write(layout.model_file(), self.model.to_bytes())
            .map_err(Error::io("Fail to write model file"))?;

        let manifest = Manifest::new(layout::uuid_v4(), layout::uuid_v4());
        let json = manifest
            .to_json()
            .map_err(|err| Error::Unknown(format!("Fail to create Manifest.json: {err}")))?;
        fs::write(layout.manifest_file(), json)
            .map_err(Error::io("Fail to write Manifest.json"))?;

        tracing::info!(
            package = %layout.root().display(),
            operations = self.model.main().block.operations.len(),
            weights_bytes = self.weights.len(),
            "wrote model package"
        );
        Ok(CompiledPackage {
            layout,
            registry: self.registry,
        })
    }
}

/// Handle to a written package plus the registry it was built with.
#[derive(Debug)]
pub struct CompiledPackage {
    layout: PackageLayout,
    registry: OperandRegistry,
}

impl CompiledPackage {
    pub fn package_dir(&self) -> &Path {
        self.layout.root()
    }

    pub fn model_file(&self) -> PathBuf {
        self.layout.model_file()
    }

    pub fn weights_file(&self) -> PathBuf {
        self.layout.weights_file()
    }

    pub fn manifest_file(&self) -> PathBuf {
        self.layout.manifest_file()
    }

    pub fn registry(&self) -> &OperandRegistry {
        &self.registry
    }

    pub fn operand_info(&self, id: OperandId) -> &OperandInfo {
        self.registry.lookup(id)
    }
}
