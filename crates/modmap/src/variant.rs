//! Platform-variant file selection.
//!
//! A platform tag selects a tier, and each tier contributes an ordered set of
//! filename suffixes. Lower tiers are appended as fallbacks:
//!
//! | tier    | tags                               | candidates, in order                           |
//! |---------|------------------------------------|------------------------------------------------|
//! | mobile  | `mobile`, `ios`, `android`, `windows` | `.mobile.js`, `.<tag>.js`, then desktop tier |
//! | desktop | `desktop`                          | `.desktop.js`, then web tier                   |
//! | web     | anything else, including empty     | `.web.js`, `.js`                               |
//!
//! First hit wins; there is no scoring.

use crate::cache::DirectoryListing;

/// Tags that select the mobile tier.
pub const MOBILE_TAGS: &[&str] = &["mobile", "ios", "android", "windows"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformTier {
    Mobile,
    Desktop,
    Web,
}

impl PlatformTier {
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.to_ascii_lowercase();
        if MOBILE_TAGS.contains(&tag.as_str()) {
            PlatformTier::Mobile
        } else if tag == "desktop" {
            PlatformTier::Desktop
        } else {
            PlatformTier::Web
        }
    }
}

/// Ordered filename suffixes tried for `platform`.
pub fn suffix_cascade(platform: &str) -> Vec<String> {
    let platform = platform.to_ascii_lowercase();
    let tier = PlatformTier::from_tag(&platform);
    let mut suffixes: Vec<String> = Vec::with_capacity(5);

    if tier == PlatformTier::Mobile {
        suffixes.push(".mobile.js".to_string());
        let own = format!(".{platform}.js");
        if !suffixes.contains(&own) {
            suffixes.push(own);
        }
    }
    if tier != PlatformTier::Web {
        suffixes.push(".desktop.js".to_string());
    }
    suffixes.push(".web.js".to_string());
    suffixes.push(".js".to_string());

    suffixes
}

/// Pick the best variant of `base` present in `listing`.
///
/// `base` is the file name without its `.js` extension. Returns the on-disk
/// file name, or `None` when no tier matches.
///
/// # Example
///
/// ```
/// use modmap::cache::DirectoryListing;
/// use modmap::variant::pick_variant;
///
/// let listing = DirectoryListing::from_names(["foo.desktop.js", "foo.js"]);
/// assert_eq!(pick_variant("ios", "foo", &listing).as_deref(), Some("foo.desktop.js"));
/// ```
pub fn pick_variant(platform: &str, base: &str, listing: &DirectoryListing) -> Option<String> {
    suffix_cascade(platform)
        .into_iter()
        .find_map(|suffix| listing.get(&format!("{base}{suffix}")).map(str::to_string))
}
