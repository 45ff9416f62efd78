//! Image preloading.

use crate::effects::Document;

/// Hand every URL to the document for caching.
///
/// Fire-and-forget: nothing tracks completion and failures are not
/// retried. Returns how many URLs were requested.
pub fn preload_assets<D: Document>(doc: &mut D, urls: &[String]) -> usize {
    for url in urls {
        doc.preload_image(url);
    }
    urls.len()
}
