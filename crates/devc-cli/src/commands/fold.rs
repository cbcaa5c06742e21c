use devc_core::FoldOptions;
use devc_fold::{ImageAssembler, PipelineResult};

/// Capture `container_id` and fold its bind mounts into one image.
pub fn fold(container_id: &str, options: &FoldOptions) -> anyhow::Result<()> {
    tracing::debug!(container = container_id, engine = %options.engine, "starting fold");
    let assembler = ImageAssembler::new(&options.engine);
    let result = assembler.fold(container_id, options)?;

    println!();
    print!("{}", summary(&result));
    Ok(())
}

fn summary(result: &PipelineResult) -> String {
    let removed = |gone: bool| if gone { " (removed)" } else { "" };

    let mut lines = vec![
        "Summary:".to_owned(),
        format!("  Container captured: {}", result.source_container_id),
        format!("  Final image tag:    {}", result.final_image_tag),
        format!(
            "  Intermediate tag:   {}{}",
            result.intermediate_image_tag,
            removed(result.intermediate_removed)
        ),
    ];
    if !result.copies.is_empty() {
        lines.push("  Copied bind mounts:".to_owned());
        lines.extend(
            result
                .copies
                .iter()
                .map(|spec| format!("    {} ← {}", spec.host_path.display(), spec.destination)),
        );
    }
    lines.push(format!(
        "  Temporary dir:      {}{}",
        result.temp_dir.display(),
        removed(result.temp_dir_removed)
    ));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
