use std::path::Path;

use anyhow::Context;
use colored::{ColoredString, Colorize};
use scl_diff::{
    compare_lnodes, DiffConfig, DiffNode, DiffResult, LNodeReport, NodeStatus, TypeDiffer,
};
use scl_registry::{load_scl_file, SclDocument};
use scl_types::TemplateKind;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Compare(args) => cmd_compare(args, &config, &cli.format),
        Command::Lnodes(args) => cmd_lnodes(args, &config, &cli.format),
        Command::Types(args) => cmd_types(args, &cli.format),
    }
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<DiffConfig> {
    let Some(path) = path else {
        return Ok(DiffConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn load(path: &Path) -> anyhow::Result<SclDocument> {
    load_scl_file(path).with_context(|| format!("loading {}", path.display()))
}

fn cmd_compare(
    args: CompareArgs,
    config: &DiffConfig,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let ours_doc = load(&args.file)?;
    let theirs_doc = match &args.theirs_file {
        Some(path) => Some(load(path)?),
        None => None,
    };
    let theirs_doc = theirs_doc.as_ref().unwrap_or(&ours_doc);

    let ours = ours_doc
        .lnode_type(&args.ours)
        .with_context(|| format!("LNodeType `{}` not found", args.ours))?;
    let theirs = theirs_doc
        .lnode_type(&args.theirs)
        .with_context(|| format!("LNodeType `{}` not found", args.theirs))?;

    let diff = TypeDiffer::new(ours_doc.registry(), theirs_doc.registry())
        .with_config(config.clone())
        .compare_types(ours, theirs)?;

    match format {
        OutputFormat::Json => println!("{}", diff.to_json_pretty()?),
        OutputFormat::Text => {
            println!("{} {} {}", args.ours.bold(), "vs".dimmed(), args.theirs.bold());
            print!("{}", render_diff(&diff, args.only_differences));
            println!("{}", summary(&diff));
        }
    }
    Ok(())
}

fn cmd_lnodes(args: LnodesArgs, config: &DiffConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let doc = load(&args.file)?;
    let report = compare_lnodes(&doc, config)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print!("{}", render_report(&report)),
    }
    Ok(())
}

fn cmd_types(args: TypesArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let doc = load(&args.file)?;
    let ids: Vec<String> = doc
        .registry()
        .all_keys()
        .into_iter()
        .filter(|key| key.kind == TemplateKind::LNodeType)
        .map(|key| key.id)
        .collect();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ids)?),
        OutputFormat::Text => {
            for id in &ids {
                println!("{id}");
            }
        }
    }
    Ok(())
}

fn icon(status: NodeStatus) -> ColoredString {
    match status {
        NodeStatus::Ok => "✓".green(),
        NodeStatus::Unknown => "?".yellow(),
        NodeStatus::Warning => "!".red().bold(),
    }
}

pub fn render_diff(diff: &DiffResult, only_differences: bool) -> String {
    let mut out = String::new();
    for node in &diff.children {
        render_node(&mut out, node, 1, only_differences);
    }
    out
}

fn render_node(out: &mut String, node: &DiffNode, depth: usize, only_differences: bool) {
    if only_differences && !node.is_different {
        return;
    }
    let class = node
        .classification
        .as_deref()
        .map(|c| format!(" ({})", c.cyan()))
        .unwrap_or_default();
    let note = match (node.is_missing(), node.status()) {
        (true, _) => format!(" {}", "missing".yellow()),
        (false, NodeStatus::Warning) if node.children.is_empty() => {
            format!(" {}", "type mismatch".red())
        }
        _ => String::new(),
    };
    out.push_str(&format!(
        "{}{} {}{}{}\n",
        "  ".repeat(depth),
        icon(node.status()),
        node.name,
        class,
        note
    ));
    for child in &node.children {
        render_node(out, child, depth + 1, only_differences);
    }
}

fn summary(diff: &DiffResult) -> String {
    if diff.is_different {
        format!("{} {} difference(s)", icon(NodeStatus::Warning), diff.differences())
    } else {
        format!("{} types match", icon(NodeStatus::Ok))
    }
}

pub fn render_report(report: &LNodeReport) -> String {
    let mut out = String::new();
    for lnode in &report.unlinked {
        out.push_str(&format!(
            "{} {}  {}\n",
            "○".dimmed(),
            lnode.title().bold(),
            "not linked".dimmed()
        ));
    }
    for entry in &report.linked {
        let types = format!(
            "{} -> {}",
            entry.specified_type.as_deref().unwrap_or("?"),
            entry.instantiated_type.as_deref().unwrap_or("?"),
        );
        out.push_str(&format!(
            "{} {}  {}  {}\n",
            icon(entry.status()),
            entry.lnode.title().bold(),
            entry.lnode.target_path(),
            types.dimmed()
        ));
    }
    out.push_str(&format!(
        "\n{} linked, {} unlinked, {} mismatched\n",
        report.linked.len(),
        report.unlinked.len(),
        report.mismatches()
    ));
    out
}
