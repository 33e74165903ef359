//! Pretty printing of generated markup
//!
//! Each nested element goes on its own line, indented two spaces per level.
//! Elements holding only text or comments stay on a single line. Raw
//! elements (`script`, `style`, `pre`, `textarea` and the `log` div) are
//! copied verbatim.

const INDENT: &str = "  ";

const VOID_ELEMENTS: [&str; 8] = ["meta", "link", "img", "input", "br", "hr", "col", "source"];

const RAW_ELEMENTS: [&str; 4] = ["script", "style", "pre", "textarea"];

#[derive(Debug)]
enum Node<'a> {
    /// Doctype, comment, void element or a raw element copied whole
    Verbatim(&'a str),
    Text(&'a str),
    Element {
        open: &'a str,
        name: String,
        children: Vec<Node<'a>>,
    },
}

impl Node<'_> {
    fn is_element(&self) -> bool {
        matches!(self, Node::Element { .. })
            || matches!(self, Node::Verbatim(s) if s.starts_with('<') && !s.starts_with("<!--"))
    }
}

/// Byte index just past the `>` closing the tag starting at `start`
fn tag_end(html: &str, start: usize) -> usize {
    let mut quote = None;
    for (i, c) in html[start..].char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '>') => return start + i + 1,
            _ => {}
        }
    }
    html.len()
}

fn tag_name(tag: &str) -> String {
    tag.trim_start_matches("</")
        .trim_start_matches('<')
        .split(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

fn is_raw(name: &str, open: &str) -> bool {
    if RAW_ELEMENTS.contains(&name) {
        return true;
    }
    name == "div" && (open.contains("class=\"log\"") || open.contains("class='log'"))
}

/// End of the element opened at `open_end`, skipping nested elements of the
/// same name
fn raw_end(html: &str, name: &str, open_end: usize) -> usize {
    let open_pattern = format!("<{}", name);
    let close_pattern = format!("</{}", name);
    let mut depth = 1;
    let mut pos = open_end;

    while pos < html.len() {
        let rest = &html[pos..];
        let next_open = rest.find(&open_pattern);
        let next_close = match rest.find(&close_pattern) {
            Some(i) => i,
            None => return html.len(),
        };
        match next_open {
            Some(o) if o < next_close => {
                depth += 1;
                pos += o + open_pattern.len();
            }
            _ => {
                depth -= 1;
                let close_start = pos + next_close;
                let close_end = tag_end(html, close_start);
                if depth == 0 {
                    return close_end;
                }
                pos = close_end;
            }
        }
    }
    html.len()
}

fn parse(html: &str) -> Vec<Node<'_>> {
    // stack of open elements: (open tag, name, children)
    let mut stack: Vec<(&str, String, Vec<Node<'_>>)> = vec![("", String::new(), Vec::new())];
    let mut pos = 0;

    while pos < html.len() {
        let rest = &html[pos..];
        if !rest.starts_with('<') {
            let end = rest.find('<').map(|i| pos + i).unwrap_or(html.len());
            push(&mut stack, Node::Text(&html[pos..end]));
            pos = end;
            continue;
        }

        if rest.starts_with("<!--") {
            let end = rest.find("-->").map(|i| pos + i + 3).unwrap_or(html.len());
            push(&mut stack, Node::Verbatim(&html[pos..end]));
            pos = end;
            continue;
        }

        let end = tag_end(html, pos);
        let tag = &html[pos..end];

        if tag.starts_with("</") {
            let name = tag_name(tag);
            if stack[1..].iter().any(|(_, open, _)| *open == name) {
                while let Some((open, open_name, children)) = stack.pop() {
                    let done = open_name == name;
                    push(
                        &mut stack,
                        Node::Element {
                            open,
                            name: open_name,
                            children,
                        },
                    );
                    if done {
                        break;
                    }
                }
            }
        } else if tag.starts_with("<!") || tag.ends_with("/>") {
            push(&mut stack, Node::Verbatim(tag));
        } else {
            let name = tag_name(tag);
            if VOID_ELEMENTS.contains(&name.as_str()) {
                push(&mut stack, Node::Verbatim(tag));
            } else if is_raw(&name, tag) {
                let stop = raw_end(html, &name, end);
                push(&mut stack, Node::Verbatim(&html[pos..stop]));
                pos = stop;
                continue;
            } else {
                stack.push((tag, name, Vec::new()));
            }
        }
        pos = end;
    }

    while stack.len() > 1 {
        if let Some((open, name, children)) = stack.pop() {
            push(&mut stack, Node::Element { open, name, children });
        }
    }
    stack.pop().map(|(_, _, children)| children).unwrap_or_default()
}

fn push<'a>(stack: &mut [(&'a str, String, Vec<Node<'a>>)], node: Node<'a>) {
    if let Some((_, _, children)) = stack.last_mut() {
        children.push(node);
    }
}

fn write_nodes(nodes: &[Node<'_>], depth: usize, out: &mut Vec<String>) {
    for node in nodes {
        let pad = INDENT.repeat(depth);
        match node {
            Node::Text(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    out.push(format!("{}{}", pad, text));
                }
            }
            Node::Verbatim(markup) => out.push(format!("{}{}", pad, markup)),
            Node::Element { open, name, children } => {
                if children.iter().any(Node::is_element) {
                    out.push(format!("{}{}", pad, open));
                    write_nodes(children, depth + 1, out);
                    out.push(format!("{}</{}>", pad, name));
                } else {
                    let mut line = format!("{}{}", pad, open);
                    for child in children {
                        match child {
                            Node::Text(text) | Node::Verbatim(text) => line.push_str(text),
                            Node::Element { .. } => {}
                        }
                    }
                    line.push_str(&format!("</{}>", name));
                    out.push(line);
                }
            }
        }
    }
}

/// Indent a complete document or fragment
pub fn indent(html: &str) -> String {
    let nodes = parse(html);
    let mut lines = Vec::new();
    write_nodes(&nodes, 0, &mut lines);
    lines.join("\n")
}
