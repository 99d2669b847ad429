//! String-backed fragment that rewrites `<img>` tags inside rendered HTML.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use crate::fragment::{ImageElement, RenderedFragment};

fn img_tag_pattern() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| Regex::new(r"(?is)<img\b[^>]*>").expect("invalid img tag regex"))
}

fn attribute_pattern() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| {
    Regex::new(
      r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#,
    )
    .expect("invalid attribute regex")
  })
}

/// Rendered HTML whose `<img>` tags can be read and rewritten in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlFragment {
  html: String,
}

impl HtmlFragment {
  /// Wrap rendered HTML.
  pub fn new(html: impl Into<String>) -> Self {
    Self { html: html.into() }
  }

  /// Current HTML, including any rewrites applied so far.
  pub fn as_str(&self) -> &str {
    &self.html
  }

  /// Consume the fragment and return its HTML.
  pub fn into_html(self) -> String {
    self.html
  }
}

impl RenderedFragment for HtmlFragment {
  fn image_count(&self) -> usize {
    img_tag_pattern().find_iter(&self.html).count()
  }

  fn for_each_image(&mut self, visit: &mut dyn FnMut(&mut dyn ImageElement)) {
    let mut output = String::with_capacity(self.html.len());
    let mut last = 0;

    for tag in img_tag_pattern().find_iter(&self.html) {
      output.push_str(&self.html[last..tag.start()]);
      let mut element = HtmlImageTag {
        markup: tag.as_str().to_string(),
      };
      visit(&mut element);
      output.push_str(&element.markup);
      last = tag.end();
    }
    output.push_str(&self.html[last..]);

    self.html = output;
  }
}

struct HtmlImageTag {
  markup: String,
}

/// Length of the `<img` opener every tag starts with.
const TAG_OPENER_LEN: usize = 4;

impl HtmlImageTag {
  /// Attributes are scanned in sequence after the tag name, so a name directly after a
  /// closing quote (`alt="x"src="a.png"`) is still found.
  fn find(&self, name: &str) -> Option<(Range<usize>, Option<String>)> {
    attribute_pattern()
      .captures_iter(&self.markup[TAG_OPENER_LEN..])
      .find(|caps| caps[1].eq_ignore_ascii_case(name))
      .map(|caps| {
        let span = caps
          .get(0)
          .map(|m| m.start() + TAG_OPENER_LEN..m.end() + TAG_OPENER_LEN)
          .unwrap_or_default();
        let value = caps
          .get(2)
          .or_else(|| caps.get(3))
          .or_else(|| caps.get(4))
          .map(|m| unescape_attribute(m.as_str()));
        (span, value)
      })
  }

  fn insertion_point(&self) -> usize {
    let closing = if self.markup.ends_with("/>") {
      self.markup.len() - 2
    } else {
      self.markup.len() - 1
    };
    self.markup[..closing].trim_end().len()
  }
}

impl ImageElement for HtmlImageTag {
  fn attribute(&self, name: &str) -> Option<String> {
    self
      .find(name)
      .map(|(_, value)| value.unwrap_or_default())
  }

  fn set_attribute(&mut self, name: &str, value: &str) {
    let rendered = format!("{}=\"{}\"", name, escape_attribute(value));
    match self.find(name) {
      Some((span, _)) => self.markup.replace_range(span, &rendered),
      None => {
        let at = self.insertion_point();
        self.markup.insert_str(at, &format!(" {rendered}"));
      }
    }
  }
}

fn escape_attribute(value: &str) -> String {
  html_escape::encode_double_quoted_attribute(value).into_owned()
}

/// Decode named, decimal (`&#32;`) and hex (`&#x27;`) character references, as the DOM does.
fn unescape_attribute(value: &str) -> String {
  html_escape::decode_html_entities(value).into_owned()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sources(fragment: &mut HtmlFragment) -> Vec<Option<String>> {
    let mut found = Vec::new();
    fragment.for_each_image(&mut |image: &mut dyn ImageElement| found.push(image.src()));
    found
  }

  #[test]
  fn counts_image_tags_case_insensitively() {
    let fragment = HtmlFragment::new(r#"<p><img src="a.png"><IMG SRC="b.png"/><imgx></p>"#);
    assert_eq!(fragment.image_count(), 2);
  }

  #[test]
  fn reads_quoted_and_bare_sources() {
    let mut fragment = HtmlFragment::new(
      r#"<img src="a b.png"><img alt='x' src='c.png'><img src=d.png><img alt="none"><img src>"#,
    );
    assert_eq!(sources(&mut fragment), vec![
      Some("a b.png".to_string()),
      Some("c.png".to_string()),
      Some("d.png".to_string()),
      None,
      Some(String::new()),
    ]);
  }

  #[test]
  fn does_not_confuse_similar_attribute_names() {
    let mut fragment = HtmlFragment::new(r#"<img data-src="lazy.png" srcset="x.png 2x">"#);
    assert_eq!(sources(&mut fragment), vec![None]);
  }

  #[test]
  fn unescapes_entities_in_values() {
    let mut fragment = HtmlFragment::new(r#"<img src="a&amp;b.png">"#);
    assert_eq!(sources(&mut fragment), vec![Some("a&b.png".to_string())]);
  }

  #[test]
  fn decodes_numeric_character_references() {
    let mut fragment = HtmlFragment::new(
      r#"<img src="it&#x27;s.png"><img src="a&#32;b.png"><img src='q&#34;.png'>"#,
    );
    assert_eq!(sources(&mut fragment), vec![
      Some("it's.png".to_string()),
      Some("a b.png".to_string()),
      Some("q\".png".to_string()),
    ]);
  }

  #[test]
  fn reads_attribute_directly_after_quoted_value() {
    let mut fragment = HtmlFragment::new(r#"<img alt="x"src="a.png"><img alt='src'src=b.png>"#);
    assert_eq!(sources(&mut fragment), vec![
      Some("a.png".to_string()),
      Some("b.png".to_string()),
    ]);

    fragment.for_each_image(&mut |image: &mut dyn ImageElement| {
      image.set_attribute("src", "app://v/a.png")
    });
    assert_eq!(
      fragment.as_str(),
      r#"<img alt="x"src="app://v/a.png"><img alt='src'src="app://v/a.png">"#
    );
  }

  #[test]
  fn replaces_existing_attribute() {
    let mut fragment = HtmlFragment::new(r#"<p>x</p><img src="a.png" alt="A"><p>y</p>"#);
    fragment.for_each_image(&mut |image: &mut dyn ImageElement| {
      image.set_attribute("src", "app://v/a.png")
    });
    assert_eq!(
      fragment.as_str(),
      r#"<p>x</p><img src="app://v/a.png" alt="A"><p>y</p>"#
    );
  }

  #[test]
  fn inserts_missing_attribute_before_closing() {
    let mut fragment = HtmlFragment::new(r#"<img src="a.png" /><img src="b.png">"#);
    fragment.for_each_image(&mut |image: &mut dyn ImageElement| {
      image.set_attribute("srcset", "x\"y")
    });
    assert_eq!(
      fragment.into_html(),
      r#"<img src="a.png" srcset="x&quot;y" /><img src="b.png" srcset="x&quot;y">"#
    );
  }
}
