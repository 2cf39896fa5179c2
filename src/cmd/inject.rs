//! Inject command: keep a diagram in a document up to date.

use super::graph::{DiagramArgs, GraphSettings};
use crate::config::ProjectConfig;
use crate::inject::inject_diagram;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;

/// Run the inject command
pub fn run(
    file: PathBuf,
    args: DiagramArgs,
    begin_tag: String,
    end_tag: String,
    check: bool,
) -> Result<()> {
    let config = ProjectConfig::discover(args.config.as_deref())?;
    let settings = GraphSettings::resolve(args, config)?;
    let diagram = settings.build_diagram()?;
    let fence = settings.request.format.comment_format();

    let old_content = fs::read_to_string(&file)
        .with_context(|| format!("cannot read {}", file.display()))?;

    let Some(new_content) = inject_diagram(&old_content, &diagram, fence, &begin_tag, &end_tag)
    else {
        bail!(
            "{} does not contain the tags {} and {}",
            file.display(),
            begin_tag,
            end_tag
        );
    };

    if check {
        if new_content != old_content {
            bail!(
                "{} is out of date; run without --check to update it",
                file.display()
            );
        }
        eprintln!("{} is up to date", file.display());
        return Ok(());
    }

    if new_content != old_content {
        fs::write(&file, new_content.as_bytes())
            .with_context(|| format!("cannot write {}", file.display()))?;
        eprintln!("Diagram injected into: {}", file.display());
    }

    Ok(())
}
