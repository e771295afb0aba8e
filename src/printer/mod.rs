//! Java-like rendering of a host tree.
//!
//! The printer only goes through [`HostTree`] capabilities, so two hosts holding equivalent trees render
//! byte-identical text. It exists for inspection and tests; it is not a faithful pretty-printer for either host.

pub mod config;
pub mod writer;

pub use config::PrintConfig;
pub use writer::SourceWriter;

use fieldconst_core::Modifiers;

use crate::host::{HostTree, Initializer, NodeId, NodeKind};

/// Render every top-level type of `tree`.
pub fn render<H: HostTree + ?Sized>(tree: &H, config: &PrintConfig) -> String {
    let mut w = SourceWriter::new(config);
    for (i, root) in tree.roots().into_iter().enumerate() {
        if i > 0 {
            w.blank_lines(config.blank_lines_top_level);
        }
        render_type(tree, root, config, &mut w);
    }
    w.finish()
}

/// Quote a string as a Java string literal.
pub fn string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn render_annotations<H: HostTree + ?Sized>(tree: &H, node: NodeId, config: &PrintConfig, w: &mut SourceWriter) {
    if !config.show_annotations {
        return;
    }
    for annotation in tree.annotations_of(node) {
        let name = tree.annotation_name(annotation).unwrap_or_default();
        let args = tree.annotation_args(annotation);
        if args.is_empty() {
            w.writeln(&format!("@{name}"));
        } else {
            let args: Vec<String> = args.iter().map(|(k, v)| format!("{k} = {v}")).collect();
            w.writeln(&format!("@{name}({})", args.join(", ")));
        }
    }
}

fn prefix(keywords: &[&str]) -> String {
    keywords.iter().map(|kw| format!("{kw} ")).collect()
}

fn render_type<H: HostTree + ?Sized>(tree: &H, node: NodeId, config: &PrintConfig, w: &mut SourceWriter) {
    let mods = tree.modifiers_of(node);
    let name = tree.name_of(node).unwrap_or_default();
    let keyword = if mods.contains(Modifiers::ANNOTATION) {
        "@interface"
    } else if mods.contains(Modifiers::INTERFACE) {
        "interface"
    } else if mods.contains(Modifiers::ENUM) {
        "enum"
    } else {
        "class"
    };
    let mut keywords = mods.keywords();
    if mods.is_interface_like() {
        keywords.retain(|kw| *kw != "abstract");
    }

    render_annotations(tree, node, config, w);
    w.writeln(&format!("{}{keyword} {name} {{", prefix(&keywords)));
    w.indent();

    let members = tree.members_of(node);
    let enum_constants: Vec<String> = members
        .iter()
        .filter(|m| is_enum_constant(tree, **m))
        .filter_map(|m| tree.name_of(*m))
        .collect();
    if !enum_constants.is_empty() {
        w.writeln(&format!("{};", enum_constants.join(", ")));
    }

    for member in members {
        if is_enum_constant(tree, member) {
            continue;
        }
        match tree.kind_of(member) {
            NodeKind::Type => render_type(tree, member, config, w),
            NodeKind::Field => render_field(tree, member, config, w),
            NodeKind::Other => render_method(tree, member, config, w),
        }
    }

    w.dedent();
    w.writeln("}");
}

fn is_enum_constant<H: HostTree + ?Sized>(tree: &H, node: NodeId) -> bool {
    tree.kind_of(node) == NodeKind::Field && tree.modifiers_of(node).contains(Modifiers::ENUM)
}

fn render_field<H: HostTree + ?Sized>(tree: &H, node: NodeId, config: &PrintConfig, w: &mut SourceWriter) {
    render_annotations(tree, node, config, w);
    let keywords = tree.modifiers_of(node).keywords();
    let ty = tree.declared_type_of(node).unwrap_or_default();
    let name = tree.name_of(node).unwrap_or_default();
    let init = match tree.initializer_of(node) {
        Some(Initializer::StringLiteral(text)) => format!(" = {}", string_literal(&text)),
        Some(Initializer::Expression(text)) => format!(" = {text}"),
        None => String::new(),
    };
    w.writeln(&format!("{}{ty} {name}{init};", prefix(&keywords)));
}

fn render_method<H: HostTree + ?Sized>(tree: &H, node: NodeId, config: &PrintConfig, w: &mut SourceWriter) {
    render_annotations(tree, node, config, w);
    let keywords = tree.modifiers_of(node).keywords();
    let ret = tree.declared_type_of(node).unwrap_or_else(|| "void".to_string());
    let name = tree.name_of(node).unwrap_or_default();
    w.writeln(&format!("{}{ret} {name}() {{}}", prefix(&keywords)));
}
