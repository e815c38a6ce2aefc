//! Emission of the `writeFru` accessor header.

use super::{Emit, close_namespaces, open_namespaces, preamble, string_literal};
use crate::model::{FruDescription, InterfaceBlock, ValueReference};

const HELPERS: &str = r#"using Inner = Parsed::mapped_type;
using Outer = std::map<std::string, Inner>;

// Dumps the assembled inventory object to stdout.
inline auto print = [](Outer&& object, const std::string& path) {
    std::cout << "\n";
    std::cout << path << "\n";
    std::cout << "\n";
    for (const auto& o : object)
    {
        std::cout << o.first << "\n";
        for (const auto& i : o.second)
        {
            std::cout << i.first << " : " << i.second << "\n";
        }
        std::cout << "\n";
    }
};

/** @brief API to write parsed VPD to inventory,
 *      for a specific FRU
 *
 *  @param [in] vpdStore - Store object containing
 *      parsed VPD
 *  @param [in] path - FRU object path
 */
template <Fru F>
void writeFru(const Store& vpdStore, const std::string& path);
"#;

/// The complete accessor header for a set of FRUs.
#[derive(Debug, Clone, Copy)]
pub struct WriteFruHeader<'a> {
    /// FRUs to specialize `writeFru` for, in output order.
    pub frus: &'a [FruDescription],
    /// Namespace segments wrapping everything after the includes.
    pub namespace: &'a [String],
}

impl<'a> WriteFruHeader<'a> {
    /// Header for `frus` inside `namespace`.
    pub fn new(frus: &'a [FruDescription], namespace: &'a [String]) -> Self {
        Self { frus, namespace }
    }
}

impl Emit for WriteFruHeader<'_> {
    fn emit(&self) -> String {
        let mut output = preamble(&["defines.hpp", "store.hpp"], &["iostream", "map"]);
        output.push_str(&open_namespaces(self.namespace));
        output.push('\n');
        output.push_str(HELPERS);
        for fru in self.frus {
            output.push('\n');
            output.push_str(&fru.emit());
        }
        output.push('\n');
        output.push_str(&close_namespaces(self.namespace));
        output
    }
}

/// One full specialization of `writeFru`.
impl Emit for FruDescription {
    fn emit(&self) -> String {
        let mut output = format!("// Specialization of {}\n", self.name);
        output.push_str("template <>\n");
        let signature = format!("inline void writeFru<Fru::{}>(", self.name);
        output.push_str(&format!(
            "{signature}const Store& vpdStore,\n{}const std::string& path)\n",
            " ".repeat(signature.len())
        ));
        output.push_str("{\n");
        output.push_str("    Outer object;\n\n");
        output.push_str(
            "    // Inventory manager needs object path, list of interface names to be\n    \
             // implemented, and property:value pairs contained in said interfaces\n",
        );

        for interface in &self.interfaces {
            output.push('\n');
            output.push_str(&interface.emit());
        }

        if !self.interfaces.is_empty() {
            output.push('\n');
        }
        for interface in &self.interfaces {
            output.push_str(&format!(
                "    object.emplace({}, std::move({}));\n",
                string_literal(&interface.name),
                interface.identifier
            ));
        }

        output.push_str("\n    print(std::move(object), path);\n");
        output.push_str("}\n");
        output
    }
}

/// Container declaration followed by one assignment per property.
impl Emit for InterfaceBlock {
    fn emit(&self) -> String {
        let mut output = format!("    Inner {};\n", self.identifier);
        for property in &self.properties {
            output.push_str(&format!(
                "    {}[{}] =\n        {};\n",
                self.identifier,
                string_literal(&property.name),
                property.reference.emit()
            ));
        }
        output
    }
}

/// The store lookup for a record/keyword pair.
impl Emit for ValueReference {
    fn emit(&self) -> String {
        format!(
            "vpdStore.get<Record::{}, record::Keyword::{}>()",
            self.record, self.keyword
        )
    }
}
