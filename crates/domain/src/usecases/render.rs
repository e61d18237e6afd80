//! Digest rendering - formats filtered sections as a flat text listing

use crate::model::Section;

/// Render sections as a Markdown-style digest
///
/// One `# <title>` heading per section with one `- [title](url)` bullet
/// per entry, in the order the filter engine produced. Sections are
/// separated by a blank line. An empty section still emits its heading.
pub fn render_digest(sections: &[Section]) -> String {
    let blocks: Vec<String> = sections
        .iter()
        .map(|section| {
            let mut block = format!("# {}\n", section.title);
            for entry in &section.entries {
                block.push_str(&format!("- [{}]({})\n", entry.title, entry.url));
            }
            block
        })
        .collect();

    blocks.join("\n")
}
