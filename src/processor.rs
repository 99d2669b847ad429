//! Render-pass hooks that rewrite image sources inside rendered fragments.

use std::time::Instant;

use tracing::{debug, trace};

use crate::config::{ResolverConfig, RewriteTarget};
use crate::debounce::Debouncer;
use crate::fragment::{ImageElement, RenderedFragment};
use crate::host::{HostWorkspace, ResourceRoots};
use crate::models::{Resolution, RewriteReport, SkipReason};
use crate::resolver::Resolver;

/// Post-processor that points local image references at sandbox-loadable URIs.
#[derive(Debug, Clone)]
pub struct ImageSrcProcessor<H> {
  host: H,
  resolver: Resolver,
  target: RewriteTarget,
}

impl<H: HostWorkspace> ImageSrcProcessor<H> {
  /// Build a processor reading resource roots from `host`.
  pub fn new(host: H, config: &ResolverConfig) -> Self {
    Self {
      host,
      resolver: Resolver::new(config.path_policy),
      target: config.rewrite_target,
    }
  }

  /// Rewrite every local image reference in `fragment`.
  ///
  /// The pass is skipped entirely, without resolving anything, when no document is active or
  /// the fragment has no images.
  pub fn post_process<F: RenderedFragment + ?Sized>(&self, fragment: &mut F) -> RewriteReport {
    let images_found = fragment.image_count();
    if images_found == 0 {
      return RewriteReport::skipped(0, SkipReason::NoImages);
    }

    let Some(roots) = ResourceRoots::from_host(&self.host) else {
      debug!(images_found, "no active document, skipping image rewrite");
      return RewriteReport::skipped(images_found, SkipReason::NoActiveDocument);
    };

    let mut report = RewriteReport {
      images_found,
      ..RewriteReport::default()
    };
    let attribute = self.target.attribute_name();

    fragment.for_each_image(&mut |image: &mut dyn ImageElement| {
      let src = image.src();
      match self.resolver.resolve(
        src.as_deref(),
        &roots.document_base_uri,
        &roots.vault_root_base_uri,
      ) {
        Resolution::Unchanged => {
          trace!(
            src = src.as_deref().unwrap_or_default(),
            "leaving image source unchanged"
          );
          report.unchanged += 1;
        }
        Resolution::Resolved(uri) => {
          debug!(
            src = src.as_deref().unwrap_or_default(),
            %uri,
            attribute,
            "rewrote image source"
          );
          image.set_attribute(attribute, &uri);
          report.rewritten += 1;
        }
      }
    });

    report
  }
}

/// Editor-change hook that re-runs the post-processor once edits settle.
#[derive(Debug, Clone)]
pub struct EditorUpdateHook {
  debouncer: Debouncer<()>,
}

impl EditorUpdateHook {
  /// Create a hook using the configured debounce interval.
  pub fn new(config: &ResolverConfig) -> Self {
    Self {
      debouncer: Debouncer::new(config.debounce_delay()),
    }
  }

  /// Record a content change.
  pub fn on_update(&mut self, now: Instant) {
    self.debouncer.call((), now);
  }

  /// Returns `true` while a re-scan is waiting for edits to settle.
  pub fn is_pending(&self) -> bool {
    self.debouncer.is_pending()
  }

  /// Run the post-processor if the quiet interval has elapsed.
  ///
  /// The fragment is fetched only when the debounce fires, so a view that closed in the
  /// meantime (`fetch` returning `None`) turns the firing into a no-op.
  pub fn poll<'f, H, F, G>(
    &mut self,
    now: Instant,
    processor: &ImageSrcProcessor<H>,
    fetch: G,
  ) -> Option<RewriteReport>
  where
    H: HostWorkspace,
    F: RenderedFragment + ?Sized + 'f,
    G: FnOnce() -> Option<&'f mut F>,
  {
    self.debouncer.poll(now)?;
    let Some(fragment) = fetch() else {
      debug!("editor view went away before the debounced rewrite fired");
      return None;
    };
    Some(processor.post_process(fragment))
  }
}
