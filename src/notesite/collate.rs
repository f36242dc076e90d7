//! # Collation
//!
//! Locale-aware string comparison used to order note titles and category
//! labels, backed by the ICU4X collator for the configured locale.
//!
//! Traditional Chinese locales (`zh-TW`, `zh-HK`, `zh-MO`, `zh-Hant`) sort
//! Han characters by stroke count unless the tag already names a collation
//! (`-u-co-…`). Han text sorts before Latin text in Chinese locales.
//!
//! Strings the collator considers equal fall back to code point order, so
//! the result is total. A tag that cannot be parsed or loaded is logged and
//! replaced by a plain comparison: case-insensitive, then lower case first,
//! then code point order.

use icu_collator::{Collator as IcuCollator, CollatorOptions, Strength};
use icu_locid::extensions::unicode::{key, value};
use icu_locid::subtags::{language, region, script};
use icu_locid::Locale;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

pub const DEFAULT_LOCALE: &str = "zh-TW";

#[derive(Clone)]
pub struct Collator {
    locale: String,
    icu: Option<Arc<IcuCollator>>,
}

impl fmt::Debug for Collator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collator")
            .field("locale", &self.locale)
            .field("icu", &self.icu.is_some())
            .finish()
    }
}

impl PartialEq for Collator {
    fn eq(&self, other: &Self) -> bool {
        self.locale == other.locale
    }
}

impl Eq for Collator {}

impl Default for Collator {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}

impl Collator {
    pub fn new(locale: impl Into<String>) -> Self {
        let locale = locale.into();
        let icu = match load_collator(&locale) {
            Ok(collator) => Some(Arc::new(collator)),
            Err(message) => {
                tracing::warn!(locale = %locale, error = %message, "locale collation unavailable, using plain ordering");
                None
            }
        };
        Self { locale, icu }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.icu {
            Some(collator) => collator.compare(a, b).then_with(|| a.cmp(b)),
            None => plain_compare(a, b),
        }
    }
}

/// Parses a BCP 47 tag such as `zh-TW` or `en-US`.
pub fn parse_locale(tag: &str) -> Result<Locale, String> {
    tag.trim()
        .parse::<Locale>()
        .map_err(|e| format!("invalid locale {:?}: {}", tag, e))
}

fn load_collator(tag: &str) -> Result<IcuCollator, String> {
    let mut locale = parse_locale(tag)?;
    prefer_stroke_order(&mut locale);

    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Tertiary);
    IcuCollator::try_new(&(&locale).into(), options).map_err(|e| e.to_string())
}

/// Traditional Chinese defaults to stroke order.
fn prefer_stroke_order(locale: &mut Locale) {
    if locale.id.language != language!("zh") {
        return;
    }
    let traditional = locale.id.script == Some(script!("Hant"))
        || matches!(
            locale.id.region,
            Some(r) if r == region!("TW") || r == region!("HK") || r == region!("MO")
        );
    if traditional && locale.extensions.unicode.keywords.get(&key!("co")).is_none() {
        locale
            .extensions
            .unicode
            .keywords
            .set(key!("co"), value!("stroke"));
    }
}

fn plain_compare(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| compare_case(a, b))
        .then_with(|| a.cmp(b))
}

fn compare_case(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        if x == y {
            continue;
        }
        match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}
