//! Cache key derivation
//!
//! A [`StyleDescriptor`] is canonicalized into a compact string: sections are
//! emitted in a fixed order (font, fill, border, alignment, protection, number
//! format), absent sections are skipped, and every string field is written
//! with a byte-length prefix (`7:#FF0000`) so that no field value can be
//! mistaken for a delimiter or for the start of the next field.
//!
//! Short canonical strings are used verbatim as keys, which keeps the common
//! case readable in logs. Long ones are replaced by their SHA-256 hex digest.
//!
//! | Section    | Form                                  |
//! |------------|---------------------------------------|
//! | font       | `F{b;i;u;s12;c7:#FF0000;f5:Arial}`    |
//! | fill       | `P{k7:pattern;c7:#FFFF00}`            |
//! | border     | `B{t4:thin/7:#000000;b6:double/0:}`   |
//! | alignment  | `A{h6:center;v3:top;w;r45}`           |
//! | protection | `K{l1;h0}`                            |
//! | number fmt | `N{4:0.00}`                           |

use crate::descriptor::{BorderSide, StyleDescriptor};
use crate::error::{Result, StyleCacheError};
use sha2::{Digest, Sha256};
use std::borrow::Borrow;
use std::fmt;

/// Canonical strings at least this long are hashed.
pub const DEFAULT_HASH_THRESHOLD: usize = 100;

/// Deterministic key identifying a distinct style.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    value: String,
    hashed: bool,
}

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// `true` if the key is a SHA-256 digest rather than the canonical string.
    pub fn is_hashed(&self) -> bool {
        self.hashed
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_empty() {
            f.write_str("<empty>")
        } else {
            f.write_str(&self.value)
        }
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl Borrow<str> for CacheKey {
    fn borrow(&self) -> &str {
        &self.value
    }
}

/// Turns descriptors into [`CacheKey`]s.
///
/// # Examples
///
/// ```
/// use stylecache_core::{CacheKeyGenerator, StyleDescriptor};
///
/// let keys = CacheKeyGenerator::default();
/// let key = keys.key(&StyleDescriptor::new().bold(true).font_size(12)).unwrap();
/// assert_eq!(key.as_str(), "F{b;s12}");
/// assert!(!key.is_hashed());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheKeyGenerator {
    hash_threshold: usize,
}

impl Default for CacheKeyGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_THRESHOLD)
    }
}

impl CacheKeyGenerator {
    /// Canonical strings with `len() >= hash_threshold` are hashed.
    ///
    /// A threshold of 0 hashes every key.
    pub const fn new(hash_threshold: usize) -> Self {
        Self { hash_threshold }
    }

    pub fn hash_threshold(&self) -> usize {
        self.hash_threshold
    }

    /// Derives the cache key for `descriptor`.
    ///
    /// Field-wise equal descriptors always produce equal keys. Fails only for
    /// malformed descriptors (a negative font size).
    pub fn key(&self, descriptor: &StyleDescriptor) -> Result<CacheKey> {
        let canonical = self.canonical(descriptor)?;
        if canonical.len() < self.hash_threshold {
            return Ok(CacheKey {
                value: canonical,
                hashed: false,
            });
        }

        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        let digest = hasher.finalize();
        Ok(CacheKey {
            value: hex::encode(digest),
            hashed: true,
        })
    }

    /// Returns the unhashed canonical form of `descriptor`.
    pub fn canonical(&self, descriptor: &StyleDescriptor) -> Result<String> {
        let font = &descriptor.font;
        if font.size < 0 {
            return Err(StyleCacheError::KeyGeneration {
                reason: format!("negative font size {}", font.size),
            });
        }

        let mut out = String::new();

        if !font.is_empty() {
            let mut tokens = Vec::new();
            if font.bold {
                tokens.push("b".to_string());
            }
            if font.italic {
                tokens.push("i".to_string());
            }
            if font.underline {
                tokens.push("u".to_string());
            }
            if font.size != 0 {
                tokens.push(format!("s{}", font.size));
            }
            if !font.color.is_empty() {
                tokens.push(format!("c{}", lp(&font.color)));
            }
            if !font.family.is_empty() {
                tokens.push(format!("f{}", lp(&font.family)));
            }
            push_section(&mut out, 'F', &tokens);
        }

        let fill = &descriptor.fill;
        if !fill.is_empty() {
            let mut tokens = Vec::new();
            if !fill.kind.is_empty() {
                tokens.push(format!("k{}", lp(&fill.kind)));
            }
            if !fill.color.is_empty() {
                tokens.push(format!("c{}", lp(&fill.color)));
            }
            push_section(&mut out, 'P', &tokens);
        }

        let border = &descriptor.border;
        if !border.is_empty() {
            let tokens: Vec<String> = BorderSide::ALL
                .iter()
                .filter_map(|&side| {
                    let color = border.effective_color(side)?;
                    Some(format!(
                        "{}{}/{}",
                        side.tag(),
                        lp(&border.side(side).style),
                        lp(color)
                    ))
                })
                .collect();
            push_section(&mut out, 'B', &tokens);
        }

        let align = &descriptor.alignment;
        if !align.is_empty() {
            let mut tokens = Vec::new();
            if !align.horizontal.is_empty() {
                tokens.push(format!("h{}", lp(&align.horizontal)));
            }
            if !align.vertical.is_empty() {
                tokens.push(format!("v{}", lp(&align.vertical)));
            }
            if align.wrap_text {
                tokens.push("w".to_string());
            }
            if align.rotation != 0 {
                tokens.push(format!("r{}", align.rotation));
            }
            push_section(&mut out, 'A', &tokens);
        }

        if let Some(p) = descriptor.protection {
            let tokens = [
                format!("l{}", u8::from(p.locked)),
                format!("h{}", u8::from(p.hidden)),
            ];
            push_section(&mut out, 'K', &tokens);
        }

        if !descriptor.number_format.is_empty() {
            push_section(&mut out, 'N', &[lp(&descriptor.number_format)]);
        }

        Ok(out)
    }
}

/// Length-prefixed string token.
fn lp(s: &str) -> String {
    format!("{}:{}", s.len(), s)
}

fn push_section(out: &mut String, tag: char, tokens: &[String]) {
    out.push(tag);
    out.push('{');
    out.push_str(&tokens.join(";"));
    out.push('}');
}
