//! Detection of QIIME 2 comment directives (`#q2:types` and friends).

use crate::data::TextSource;
use crate::error::Result;
use log::debug;

/// Prefix marking a comment directive line.
pub const DIRECTIVE_PREFIX: &str = "#q2:";

/// Zero-based numbers of the directive lines that directly follow the header.
///
/// Line 0 is the header and is never reported. Scanning stops at the first
/// later line that is not a directive, so directives further down are left
/// for the parser. The source is rewound before returning.
pub fn directive_lines<S: TextSource + ?Sized>(source: &mut S) -> Result<Vec<usize>> {
    let mut lines = Vec::new();
    let mut buf = String::new();
    let mut line_num = 0usize;

    loop {
        buf.clear();
        if source.read_line(&mut buf)? == 0 {
            break;
        }
        if line_num > 0 {
            if buf.starts_with(DIRECTIVE_PREFIX) {
                lines.push(line_num);
            } else {
                break;
            }
        }
        line_num += 1;
    }

    source.rewind()?;
    debug!("Found {} directive line(s) after the header.", lines.len());
    Ok(lines)
}
