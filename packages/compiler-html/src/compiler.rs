use canvas_evaluator::{CssRule, VNode, VirtualDomDocument};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors that can occur during HTML compilation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("Invalid tag name: {0:?}")]
    InvalidTagName(String),

    #[error("Invalid attribute name {name:?} on <{tag}>")]
    InvalidAttributeName { tag: String, name: String },

    #[error("Invalid style property: {0:?}")]
    InvalidStyleProperty(String),
}

/// Options for HTML compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Wrap the output in a complete HTML page
    pub full_page: bool,
    /// `<title>` of a full page
    pub title: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            full_page: true,
            title: "Canvas".to_string(),
        }
    }
}

impl CompileOptions {
    /// Compact markup without the page wrapper, for embedding in a host page
    pub fn fragment() -> Self {
        Self {
            pretty: false,
            full_page: false,
            ..Default::default()
        }
    }
}

struct Context {
    options: CompileOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        self.newline();
    }

    fn newline(&mut self) {
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        let indent = self.options.indent.clone();
        for _ in 0..self.depth {
            self.add(&indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Compile a rendered canvas to HTML
#[instrument(skip_all, fields(nodes = document.nodes.len(), rules = document.styles.len()))]
pub fn compile_to_html(
    document: &VirtualDomDocument,
    options: CompileOptions,
) -> Result<String, CompileError> {
    let mut ctx = Context::new(options);

    if ctx.options.full_page {
        ctx.add_line("<!DOCTYPE html>");
        ctx.add_line("<html>");
        ctx.indent();
        compile_head(document, &mut ctx)?;
        ctx.add_line("<body>");
        ctx.indent();
    } else if !document.styles.is_empty() {
        compile_style_block(&document.styles, &mut ctx)?;
    }

    for node in &document.nodes {
        compile_node(node, &mut ctx)?;
    }

    if ctx.options.full_page {
        ctx.dedent();
        ctx.add_line("</body>");
        ctx.dedent();
        ctx.add_line("</html>");
    }

    let html = ctx.get_output();
    debug!(bytes = html.len(), "HTML compiled");
    Ok(html)
}

/// Compile a single node (a block box, for instance) without page chrome
pub fn compile_node_to_html(node: &VNode, options: CompileOptions) -> Result<String, CompileError> {
    let mut ctx = Context::new(options);
    compile_node(node, &mut ctx)?;
    Ok(ctx.get_output())
}

fn compile_head(document: &VirtualDomDocument, ctx: &mut Context) -> Result<(), CompileError> {
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    let title = format!("<title>{}</title>", escape_html(&ctx.options.title));
    ctx.add_line(&title);

    if !document.styles.is_empty() {
        compile_style_block(&document.styles, ctx)?;
    }

    ctx.dedent();
    ctx.add_line("</head>");
    Ok(())
}

fn compile_style_block(rules: &[CssRule], ctx: &mut Context) -> Result<(), CompileError> {
    ctx.add_line("<style>");
    ctx.indent();
    for rule in rules {
        let declarations = declarations(&rule.properties)?;
        let line = format!("{} {{ {} }}", rule.selector, declarations);
        ctx.add_line(&line);
    }
    ctx.dedent();
    ctx.add_line("</style>");
    Ok(())
}

fn compile_node(node: &VNode, ctx: &mut Context) -> Result<(), CompileError> {
    match node {
        VNode::Element {
            tag,
            attributes,
            styles,
            children,
            key: _,
        } => compile_tag(tag, attributes, styles, children, ctx),

        VNode::Text { content } => {
            ctx.add_line(&escape_html(content));
            Ok(())
        }
    }
}

fn compile_tag(
    name: &str,
    attributes: &BTreeMap<String, String>,
    styles: &BTreeMap<String, String>,
    children: &[VNode],
    ctx: &mut Context,
) -> Result<(), CompileError> {
    if !is_valid_name(name) {
        return Err(CompileError::InvalidTagName(name.to_string()));
    }

    // Opening tag
    if ctx.options.pretty {
        ctx.add_indent();
    }
    ctx.add(&format!("<{}", name));

    for (attr_name, value) in attributes {
        if !is_valid_name(attr_name) {
            return Err(CompileError::InvalidAttributeName {
                tag: name.to_string(),
                name: attr_name.clone(),
            });
        }
        ctx.add(" ");
        ctx.add(attr_name);
        // empty value renders as a boolean attribute
        if !value.is_empty() || !is_boolean_attribute(attr_name) {
            ctx.add("=\"");
            ctx.add(&escape_html(value));
            ctx.add("\"");
        }
    }

    if !styles.is_empty() {
        let inline = declarations(styles)?;
        ctx.add(" style=\"");
        ctx.add(&escape_html(&inline));
        ctx.add("\"");
    }

    // Void elements
    if children.is_empty() && is_self_closing(name) {
        ctx.add(" />");
        ctx.newline();
        return Ok(());
    }

    ctx.add(">");

    // Text-only children stay on the tag's line
    if children.iter().all(|c| matches!(c, VNode::Text { .. })) {
        for child in children {
            if let VNode::Text { content } = child {
                ctx.add(&escape_html(content));
            }
        }
    } else {
        ctx.newline();
        ctx.indent();
        for child in children {
            compile_node(child, ctx)?;
        }
        ctx.dedent();
        if ctx.options.pretty {
            ctx.add_indent();
        }
    }

    ctx.add(&format!("</{}>", name));
    ctx.newline();

    Ok(())
}

fn declarations(properties: &BTreeMap<String, String>) -> Result<String, CompileError> {
    let mut out = Vec::with_capacity(properties.len());
    for (key, value) in properties {
        if !is_valid_name(key) {
            return Err(CompileError::InvalidStyleProperty(key.clone()));
        }
        out.push(format!("{}: {};", key, value));
    }
    Ok(out.join(" "))
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':')
}

fn is_boolean_attribute(name: &str) -> bool {
    matches!(
        name,
        "open"
            | "controls"
            | "autoplay"
            | "muted"
            | "loop"
            | "playsinline"
            | "disabled"
            | "checked"
            | "hidden"
    )
}

fn is_self_closing(tag: &str) -> bool {
    matches!(
        tag,
        "img"
            | "input"
            | "br"
            | "hr"
            | "meta"
            | "link"
            | "area"
            | "base"
            | "col"
            | "embed"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}
