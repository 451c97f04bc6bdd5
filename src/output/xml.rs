//! XML rendering of an enumeration result.
//!
//! One `<processor>` element per processor in index order, one `<register>`
//! element per stored leaf in key order. The attributes carry the input
//! selectors, the text content the four output registers.

use std::io::{self, Write};

use crate::tree::{CpuIdProcessor, CpuIdTree};

/// Writes the whole tree as an XML document.
pub fn write_xml<W: Write>(tree: &CpuIdTree, out: &mut W) -> io::Result<()> {
    writeln!(out, r#"<?xml version="1.0" encoding="utf-8"?>"#)?;
    writeln!(out, r#"<cpuid type="x86">"#)?;
    for (_, processor) in tree {
        write_processor(processor, out)?;
    }
    writeln!(out, "</cpuid>")
}

fn write_processor<W: Write>(processor: &CpuIdProcessor, out: &mut W) -> io::Result<()> {
    writeln!(out, "  <processor>")?;
    for (_, reg) in processor {
        writeln!(
            out,
            r#"    <register eax="{:08X}" ecx="{:08X}">{:08X},{:08X},{:08X},{:08X}</register>"#,
            reg.in_eax(),
            reg.in_ecx(),
            reg.eax(),
            reg.ebx(),
            reg.ecx(),
            reg.edx()
        )?;
    }
    writeln!(out, "  </processor>")
}
