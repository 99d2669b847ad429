//! Markdown rendering pass: frontmatter is stripped, the body rendered to HTML and its images
//! rewritten.

use gray_matter::{Matter, engine::YAML};
use pulldown_cmark::{Options, Parser, html};
use serde::Deserialize;

use crate::fragment::HtmlFragment;
use crate::host::HostWorkspace;
use crate::models::RewriteReport;
use crate::processor::ImageSrcProcessor;

/// Optional frontmatter fields read from a note.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct NoteFrontmatter {
  /// Note title, when the frontmatter provides one.
  pub title: Option<String>,
}

/// A note rendered to HTML with its image sources rewritten.
#[derive(Debug, Clone)]
pub struct RenderedNote {
  /// Frontmatter fields, defaulted when absent or malformed.
  pub frontmatter: NoteFrontmatter,
  /// Rendered HTML body.
  pub html: String,
  /// Summary of the image rewrite pass.
  pub report: RewriteReport,
}

/// Split a note into its frontmatter and markdown body.
///
/// Notes without frontmatter, or with frontmatter that fails to parse, come back with default
/// fields and their full content as the body.
pub fn split_frontmatter(content: &str) -> (NoteFrontmatter, String) {
  let matter = Matter::<YAML>::new();
  let Ok(parsed) = matter.parse(content) else {
    return (NoteFrontmatter::default(), content.to_string());
  };

  let frontmatter: NoteFrontmatter = parsed
    .data
    .and_then(|yaml| serde_yaml::from_value::<NoteFrontmatter>(yaml).ok())
    .unwrap_or_default();

  (frontmatter, parsed.content)
}

/// Render a markdown body to HTML.
pub fn render_markdown(body: &str) -> String {
  let mut options = Options::empty();
  options.insert(Options::ENABLE_TABLES);
  options.insert(Options::ENABLE_FOOTNOTES);
  options.insert(Options::ENABLE_STRIKETHROUGH);
  options.insert(Options::ENABLE_TASKLISTS);
  options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

  let parser = Parser::new_ext(body, options);
  let mut rendered = String::with_capacity(body.len() * 3 / 2);
  html::push_html(&mut rendered, parser);
  rendered
}

/// Render a note and run the image post-processor over the result.
pub fn render_markdown_note<H: HostWorkspace>(
  content: &str,
  processor: &ImageSrcProcessor<H>,
) -> RenderedNote {
  let (frontmatter, body) = split_frontmatter(content);
  let mut fragment = HtmlFragment::new(render_markdown(&body));
  let report = processor.post_process(&mut fragment);

  RenderedNote {
    frontmatter,
    html: fragment.into_html(),
    report,
  }
}
