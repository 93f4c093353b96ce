// View model. Components render into a `Container` or a `Transcript`; the
// terminal and the HTML export are both pure projections of these.

use crate::theme::Palette;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use std::io::{self, Write};

pub const NO_DESCRIPTION: &str = "No description provided.";
pub const PROMPT_GLYPH: &str = ">";
pub const STAR_ICON: &str = "★";
pub const WATCH_ICON: &str = "◉";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingKind {
    Featured,
    Interesting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Heading {
        kind: HeadingKind,
        text: String,
    },
    RepoItem {
        name: String,
        url: String,
        description: String,
        tags: Vec<String>,
        highlight: bool,
    },
    Card {
        name: String,
        url: String,
        description: String,
        language: Option<String>,
        stars: u64,
        watchers: u64,
    },
    Paragraph(String),
    Error(String),
}

/// Description text with the placeholder applied to absent or blank values.
pub fn description_or_placeholder(description: Option<&str>) -> String {
    match description {
        Some(d) if !d.trim().is_empty() => d.to_string(),
        _ => NO_DESCRIPTION.to_string(),
    }
}

/// A render target. Every `replace` counts as one mutation so callers can
/// tell a re-render from a no-op.
#[derive(Debug, Default)]
pub struct Container {
    nodes: Vec<Node>,
    mutations: usize,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, nodes: Vec<Node>) {
        self.nodes = nodes;
        self.mutations += 1;
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn mutations(&self) -> usize {
        self.mutations
    }

    pub fn to_html(&self) -> String {
        self.nodes.iter().map(node_html).collect::<Vec<_>>().join("\n")
    }

    pub fn paint<W: Write>(&self, out: &mut W, palette: &Palette) -> io::Result<()> {
        for node in &self.nodes {
            paint_node(out, node, palette)?;
        }
        out.flush()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptLine {
    /// Raw input as typed; escaping happens in the projections.
    Prompt(String),
    Output(String),
}

/// Scrolling command log. `scroll` is pinned to the last line after every
/// append.
#[derive(Debug, Default)]
pub struct Transcript {
    lines: Vec<TranscriptLine>,
    scroll: usize,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: TranscriptLine) {
        self.lines.push(line);
        self.scroll = self.max_scroll();
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.scroll = 0;
    }

    pub fn lines(&self) -> &[TranscriptLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }

    pub fn to_html(&self) -> String {
        self.lines
            .iter()
            .map(|line| match line {
                TranscriptLine::Prompt(input) => format!(
                    "<div class=\"prompt-line\"><span class=\"prompt\">&gt;</span> <span>{}</span></div>",
                    escape_html(input)
                ),
                TranscriptLine::Output(text) => format!(
                    "<div class=\"command-output\">{}</div>",
                    escape_html(text)
                ),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Standalone page holding the project list and the console transcript,
/// styled by the `data-theme` attribute on the root element.
pub fn page_html(theme: &str, projects: &Container, transcript: &Transcript) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\" data-theme=\"{}\">\n<head>\n<meta charset=\"utf-8\">\n<title>Portfolio</title>\n<link rel=\"stylesheet\" href=\"style.css\">\n</head>\n<body>\n<div id=\"repos-container\">\n{}\n</div>\n<div class=\"terminal\"><div class=\"output\">\n{}\n</div></div>\n</body>\n</html>\n",
        escape_html(theme),
        projects.to_html(),
        transcript.to_html()
    )
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Drop control characters (escape sequences in feed data would otherwise
/// drive the terminal). Newlines and tabs survive.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

fn node_html(node: &Node) -> String {
    match node {
        Node::Heading { kind, text } => {
            let class = match kind {
                HeadingKind::Featured => "heading featured",
                HeadingKind::Interesting => "heading interesting",
            };
            format!("<div class=\"{class}\"><strong>{}</strong></div>", escape_html(text))
        }
        Node::RepoItem {
            name,
            url,
            description,
            tags,
            highlight,
        } => {
            let class = if *highlight { "repo-item highlight" } else { "repo-item" };
            let mut html = format!(
                "<div class=\"{class}\"><div class=\"repo-name\"><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a></div><div class=\"repo-description\">{}</div>",
                escape_html(url),
                escape_html(name),
                escape_html(description)
            );
            if !tags.is_empty() {
                html.push_str("<div class=\"repo-tags\">");
                for tag in tags {
                    html.push_str(&format!("<span class=\"tag\">{}</span>", escape_html(tag)));
                }
                html.push_str("</div>");
            }
            html.push_str("</div>");
            html
        }
        Node::Card {
            name,
            url,
            description,
            language,
            stars,
            watchers,
        } => {
            let mut html = format!(
                "<div class=\"repo-card\"><h3><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a></h3><p class=\"repo-description\">{}</p>",
                escape_html(url),
                escape_html(name),
                escape_html(description)
            );
            if let Some(lang) = language {
                html.push_str(&format!("<span class=\"tag\">{}</span>", escape_html(lang)));
            }
            html.push_str(&format!(
                "<span class=\"badge\">{STAR_ICON} {stars}</span><span class=\"badge\">{WATCH_ICON} {watchers}</span></div>"
            ));
            html
        }
        Node::Paragraph(text) => format!("<p>{}</p>", escape_html(text)),
        Node::Error(text) => format!("<p class=\"error\">{}</p>", escape_html(text)),
    }
}

fn styled<W: Write>(out: &mut W, color: Color, text: &str) -> io::Result<()> {
    queue!(out, SetForegroundColor(color), Print(sanitize(text)), ResetColor)
}

/// Writes `text` line by line with explicit `\r\n` so it renders the same in
/// raw mode.
pub fn paint_lines<W: Write>(out: &mut W, color: Color, text: &str) -> io::Result<()> {
    for line in text.split('\n') {
        styled(out, color, line)?;
        queue!(out, Print("\r\n"))?;
    }
    Ok(())
}

fn paint_node<W: Write>(out: &mut W, node: &Node, palette: &Palette) -> io::Result<()> {
    match node {
        Node::Heading { kind, text } => {
            let color = match kind {
                HeadingKind::Featured => palette.pink,
                HeadingKind::Interesting => palette.cyan,
            };
            if *kind == HeadingKind::Interesting {
                queue!(out, Print("\r\n"))?;
            }
            queue!(out, SetAttribute(Attribute::Bold))?;
            styled(out, color, text)?;
            queue!(out, SetAttribute(Attribute::Reset), Print("\r\n"))?;
        }
        Node::RepoItem {
            name,
            url,
            description,
            tags,
            highlight,
        } => {
            let marker = if *highlight { "* " } else { "  " };
            styled(out, palette.highlight, marker)?;
            queue!(out, SetAttribute(Attribute::Bold))?;
            styled(out, palette.accent, name)?;
            queue!(out, SetAttribute(Attribute::Reset))?;
            styled(out, palette.muted, &format!("  {url}"))?;
            queue!(out, Print("\r\n"))?;
            styled(out, palette.fg, &format!("    {description}"))?;
            queue!(out, Print("\r\n"))?;
            if !tags.is_empty() {
                queue!(out, Print("    "))?;
                for tag in tags {
                    styled(out, palette.cyan, &format!("[{tag}] "))?;
                }
                queue!(out, Print("\r\n"))?;
            }
        }
        Node::Card {
            name,
            url,
            description,
            language,
            stars,
            watchers,
        } => {
            queue!(out, SetAttribute(Attribute::Bold))?;
            styled(out, palette.accent, name)?;
            queue!(out, SetAttribute(Attribute::Reset))?;
            styled(out, palette.muted, &format!("  {url}"))?;
            queue!(out, Print("\r\n"))?;
            styled(out, palette.fg, &format!("  {description}"))?;
            queue!(out, Print("\r\n  "))?;
            if let Some(lang) = language {
                styled(out, palette.cyan, &format!("[{lang}] "))?;
            }
            styled(
                out,
                palette.highlight,
                &format!("{STAR_ICON} {stars}  {WATCH_ICON} {watchers}"),
            )?;
            queue!(out, Print("\r\n\r\n"))?;
        }
        Node::Paragraph(text) => paint_lines(out, palette.fg, text)?,
        Node::Error(text) => paint_lines(out, palette.error, text)?,
    }
    Ok(())
}
