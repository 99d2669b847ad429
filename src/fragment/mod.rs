//! Access to the image elements of a rendered fragment.
//!
//! The post-processing pass only needs to count images, read their `src` and write a new
//! attribute value, so the DOM is reduced to the two traits below. [`HtmlFragment`] implements
//! them over an HTML string.

mod html;

pub use html::HtmlFragment;

/// A single image element inside a rendered fragment.
pub trait ImageElement {
  /// Read an attribute value, or `None` when the attribute is absent.
  fn attribute(&self, name: &str) -> Option<String>;

  /// Set an attribute, replacing any existing value.
  fn set_attribute(&mut self, name: &str, value: &str);

  /// The element's `src` attribute.
  fn src(&self) -> Option<String> {
    self.attribute("src")
  }
}

/// A rendered fragment that can be scanned for image elements.
pub trait RenderedFragment {
  /// Number of image elements in the fragment.
  fn image_count(&self) -> usize;

  /// Visit every image element in document order, allowing it to be modified in place.
  fn for_each_image(&mut self, visit: &mut dyn FnMut(&mut dyn ImageElement));
}
