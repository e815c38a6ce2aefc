//! Emission of the extra-properties header.

use super::{Emit, close_namespaces, open_namespaces, preamble, string_literal};
use crate::model::{ExtraObject, Literal};

/// Header holding the constant map of extra inventory objects.
#[derive(Debug, Clone, Copy)]
pub struct ExtraPropertiesHeader<'a> {
    /// Objects in output order.
    pub objects: &'a [ExtraObject],
    /// Namespace segments; the map itself sits in a nested `extra` namespace.
    pub namespace: &'a [String],
}

impl<'a> ExtraPropertiesHeader<'a> {
    /// Header for `objects` inside `namespace::extra`.
    pub fn new(objects: &'a [ExtraObject], namespace: &'a [String]) -> Self {
        Self { objects, namespace }
    }
}

impl Emit for ExtraPropertiesHeader<'_> {
    fn emit(&self) -> String {
        let mut namespace = self.namespace.to_vec();
        namespace.push("extra".to_string());

        let mut output = preamble(&["types.hpp"], &["map", "string"]);
        output.push_str(&open_namespaces(&namespace));
        output.push_str("\nconst std::map<Path, InterfaceMap> objects = {\n");
        for object in self.objects {
            output.push_str(&object.emit());
        }
        output.push_str("};\n\n");
        output.push_str(&close_namespaces(&namespace));
        output
    }
}

impl Emit for ExtraObject {
    fn emit(&self) -> String {
        let mut output = format!("    {{{},{{\n", string_literal(&self.path));
        for interface in &self.interfaces {
            output.push_str(&format!("        {{{},{{\n", string_literal(&interface.name)));
            for property in &interface.properties {
                output.push_str(&format!(
                    "            {{{}, {}}},\n",
                    string_literal(&property.name),
                    property.value.emit()
                ));
            }
            output.push_str("        }},\n");
        }
        output.push_str("    }},\n");
        output
    }
}

impl Emit for Literal {
    fn emit(&self) -> String {
        match self {
            Literal::Bool(b) => b.to_string(),
            // 9223372036854775808 itself does not fit in a signed literal.
            Literal::Int(i64::MIN) => "(-9223372036854775807 - 1)".to_string(),
            Literal::Int(i) => i.to_string(),
            // A bare literal would pick the bool alternative of the variant.
            Literal::String(s) => format!("std::string({})", string_literal(s)),
        }
    }
}
