//! Cross-reference resolution over the populated registry.
//!
//! Runs strictly after the document walk has registered every input
//! object and strictly before the registry is sealed. Appends the
//! synthetic `"nested"` binding to every field whose custom type names
//! another registered input object. The binding stores only the target
//! type name; the delegated field pipeline is looked up in the sealed
//! registry at invocation time, so it reflects the fully resolved binding
//! lists of every participant even when two types reference each other.
//!
//! No transformer executes during this pass.

use std::collections::{HashMap, HashSet};

use crate::descriptor::{InputObjectDescriptor, TransformerBinding};

pub(crate) fn link_nested(types: &mut HashMap<String, InputObjectDescriptor>) {
    let declared: HashSet<String> = types.keys().cloned().collect();

    for descriptor in types.values_mut() {
        for field in descriptor.fields.values_mut() {
            if field.type_ref.is_custom && declared.contains(&field.type_ref.name) {
                tracing::debug!(
                    object = %descriptor.name,
                    field = %field.name,
                    target = %field.type_ref.name,
                    "linking nested input transformer"
                );
                field.transformers.push(TransformerBinding::nested(
                    field.type_ref.name.clone(),
                ));
            }
        }
    }
}
