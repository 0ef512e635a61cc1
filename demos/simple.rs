use quill_core::formatter::Dialect;
use quill_core::render;

fn main() {
    let source = "A short introduction.

# Getting started
Install the tool.

## Configuration
Point it at your converter.
";

    for dialect in [Dialect::DocBook, Dialect::Html] {
        match render(source, "example.md", dialect) {
            Ok(rendered) => {
                println!("== {dialect} (.{}) ==\n{}\n", rendered.file_extension, rendered.text);
            }
            Err(e) => {
                eprintln!("Failed to render: {:?}", miette::Report::new(e));
            }
        }
    }
}
