//! Run a model demo from the command line

use anyhow::Result;

use crate::demos::DemoRegistry;

/// Run the demo called `name` and print its output
pub fn run(name: &str) -> Result<()> {
    let registry = DemoRegistry::builtin();
    let output = registry.get(name)?.run();

    println!("{}", output.title);
    println!();
    println!("{}", output.html);
    Ok(())
}
