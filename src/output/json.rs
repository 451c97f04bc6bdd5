//! JSON rendering of an enumeration result.
//!
//! The tree is converted into plain serializable view structs; register
//! values are rendered as fixed-width uppercase hex strings so the output
//! lines up with the XML form.

use std::io::{self, Write};

use serde::Serialize;

use crate::tree::{CpuIdProcessor, CpuIdTree};

#[derive(Serialize)]
struct TreeDump {
    r#type: &'static str,
    processors: Vec<ProcessorDump>,
}

#[derive(Serialize)]
struct ProcessorDump {
    processor: u32,
    registers: Vec<RegisterDump>,
}

#[derive(Serialize)]
struct RegisterDump {
    leaf: String,
    subleaf: String,
    eax: String,
    ebx: String,
    ecx: String,
    edx: String,
}

fn hex(value: u32) -> String {
    format!("{value:08X}")
}

fn convert(tree: &CpuIdTree) -> TreeDump {
    let processors = tree
        .iter()
        .map(|(&cpu, processor)| ProcessorDump {
            processor: cpu,
            registers: convert_registers(processor),
        })
        .collect();
    TreeDump {
        r#type: "x86",
        processors,
    }
}

fn convert_registers(processor: &CpuIdProcessor) -> Vec<RegisterDump> {
    processor
        .iter()
        .map(|(&(leaf, subleaf), reg)| RegisterDump {
            leaf: hex(leaf),
            subleaf: hex(subleaf),
            eax: hex(reg.eax()),
            ebx: hex(reg.ebx()),
            ecx: hex(reg.ecx()),
            edx: hex(reg.edx()),
        })
        .collect()
}

/// Writes the whole tree as a pretty-printed JSON document.
pub fn write_json<W: Write>(tree: &CpuIdTree, out: &mut W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &convert(tree))?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::CpuIdRegister;

    #[test]
    fn test_json_shape() {
        let mut processor = CpuIdProcessor::new();
        processor
            .add_leaf(CpuIdRegister::new(
                0x4000_0000,
                0,
                0x4000_0001,
                0x4B4D_564B,
                0x564B_4D56,
                0x4D,
            ))
            .unwrap();
        let mut tree = CpuIdTree::new();
        tree.set_processor(2, processor).unwrap();

        let mut out = Vec::new();
        write_json(&tree, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["type"], "x86");
        assert_eq!(value["processors"][0]["processor"], 2);
        let register = &value["processors"][0]["registers"][0];
        assert_eq!(register["leaf"], "40000000");
        assert_eq!(register["subleaf"], "00000000");
        assert_eq!(register["eax"], "40000001");
        assert_eq!(register["edx"], "0000004D");
    }

    #[test]
    fn test_empty_processor_serializes_as_empty_list() {
        let mut tree = CpuIdTree::new();
        tree.set_processor(0, CpuIdProcessor::new()).unwrap();

        let mut out = Vec::new();
        write_json(&tree, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["processors"][0]["registers"], serde_json::json!([]));
    }
}
