//! Human-readable listing of a model, one operation per line.

use std::fmt::Write as _;

use crate::program::{
    Binding, FeatureDescription, Model, NamedValueType, Operation, TensorData, TensorType, Value,
    ValueData,
};

/// Render `model` as text.
pub fn dump_model(model: &Model) -> String {
    let mut out = String::new();
    let main = model.main();

    writeln!(out, "[features]").unwrap();
    for feature in &model.description.inputs {
        dump_feature(&mut out, "in ", feature);
    }
    for feature in &model.description.outputs {
        dump_feature(&mut out, "out", feature);
    }

    writeln!(out).unwrap();
    writeln!(out, "[inputs]").unwrap();
    for input in &main.inputs {
        writeln!(out, "{}", named_type(input)).unwrap();
    }

    writeln!(out).unwrap();
    writeln!(out, "[operations]").unwrap();
    for op in &main.block.operations {
        writeln!(out, "{}", operation(op)).unwrap();
    }

    writeln!(out).unwrap();
    writeln!(out, "[outputs]").unwrap();
    for name in &main.block.outputs {
        writeln!(out, "{name}").unwrap();
    }

    out
}

fn dump_feature(out: &mut String, direction: &str, feature: &FeatureDescription) {
    writeln!(
        out,
        "{direction} {}: {} {:?}",
        feature.name,
        feature.data_type.name(),
        feature.shape
    )
    .unwrap();
}

/// One operation as `outputs = op(param: binding, ...) {attr: value}`.
pub fn operation(op: &Operation) -> String {
    let outputs: Vec<String> = op.outputs.iter().map(named_type).collect();
    let inputs: Vec<String> = op
        .inputs
        .iter()
        .map(|(param, bindings)| {
            let rendered: Vec<String> = bindings.iter().map(binding).collect();
            if rendered.len() == 1 {
                format!("{param}: {}", rendered[0])
            } else {
                format!("{param}: ({})", rendered.join(", "))
            }
        })
        .collect();

    let mut line = format!("{} = {}({})", outputs.join(", "), op.op_type, inputs.join(", "));
    if !op.attributes.is_empty() {
        let attributes: Vec<String> = op
            .attributes
            .iter()
            .map(|(key, v)| format!("{key}: {}", value(v)))
            .collect();
        write!(line, " {{{}}}", attributes.join(", ")).unwrap();
    }
    line
}

fn named_type(named: &NamedValueType) -> String {
    format!("{}: {}", named.name, tensor_type(&named.ty))
}

fn tensor_type(ty: &TensorType) -> String {
    format!("{}{:?}", ty.data_type.name(), ty.dimensions)
}

fn binding(binding: &Binding) -> String {
    match binding {
        Binding::Name(name) => name.clone(),
        Binding::Value(v) => value(v),
    }
}

/// Scalars print bare, tensors as lists, file values as `@weights+offset`.
pub fn value(value: &Value) -> String {
    let rendered = match &value.data {
        ValueData::BlobFile { offset, .. } => format!("@weights+{offset}"),
        ValueData::Immediate(TensorData::Bytes(_)) => match value.to_f32_vec() {
            Some(floats) => list(&floats, |f| format!("{f:?}")),
            None => "<bytes>".to_owned(),
        },
        ValueData::Immediate(TensorData::Floats(v)) => list(v, |f| format!("{f:?}")),
        ValueData::Immediate(TensorData::Ints(v)) => list(v, |i| i.to_string()),
        ValueData::Immediate(TensorData::Bools(v)) => list(v, |b| b.to_string()),
        ValueData::Immediate(TensorData::Strings(v)) => list(v, |s| format!("{s:?}")),
    };
    if value.ty.rank() == 0 {
        rendered
    } else {
        format!("{rendered}:{}", tensor_type(&value.ty))
    }
}

fn list<T>(items: &[T], render: impl Fn(&T) -> String) -> String {
    match items {
        [single] => render(single),
        _ => {
            let rendered: Vec<String> = items.iter().map(render).collect();
            format!("[{}]", rendered.join(", "))
        }
    }
}
