use {
    anyhow::{anyhow, Context, Result},
    regex::Regex,
    std::{fmt, str::FromStr, sync::OnceLock},
};

/// A dotted version made of two or three numeric components.
///
/// Ordering is the lexicographic ordering of the components.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    components: Vec<u64>,
}

impl Version {
    pub fn components(&self) -> &[u64] {
        &self.components
    }

    /// Parses an explicitly requested release version, which must have
    /// exactly three numeric components.
    pub fn parse_release(s: &str) -> Result<Self> {
        static RELEASE: OnceLock<Regex> = OnceLock::new();
        let release = RELEASE.get_or_init(|| {
            Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+$").expect("release pattern is valid")
        });
        if !release.is_match(s) {
            return Err(anyhow!(r"Invalid version number (must match `\d+.\d+.\d+`)"));
        }
        s.parse()
    }

    /// Next patch version: `a.b -> a.b.1`, `a.b.c -> a.b.(c+1)`.
    pub fn increment(&self) -> Version {
        let mut components = self.components.clone();
        if components.len() == 2 {
            components.push(1);
        } else if let Some(last) = components.last_mut() {
            *last = last.saturating_add(1);
        }
        Version { components }
    }

    /// Whether `new` is exactly one step above `self`: components equal up to
    /// the first difference, that one raised by exactly one, and every
    /// following component of `new` equal to zero.
    ///
    /// Components of `new` beyond the length of `self` are not checked.
    pub fn is_logical_increment(&self, new: &Version) -> bool {
        let mut incremented = false;
        for (i, &new_part) in new.components.iter().enumerate() {
            let Some(&old_part) = self.components.get(i) else {
                return true;
            };
            if new_part == old_part {
                continue;
            }
            if incremented {
                if new_part != 0 {
                    return false;
                }
            } else if Some(new_part) == old_part.checked_add(1) {
                incremented = true;
            } else {
                return false;
            }
        }
        true
    }

    /// Why moving from `self` to `new` must be confirmed by the user, if it
    /// must: anything that is not a logical increment, or a major change.
    pub fn confirmation_reason(&self, new: &Version) -> Option<&'static str> {
        if !self.is_logical_increment(new) {
            Some("Not a logical increment")
        } else if self.components.first() != new.components.first() {
            Some("Major version change")
        } else {
            None
        }
    }
}

impl FromStr for Version {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let components = s
            .split('.')
            .map(|part| {
                part.parse::<u64>()
                    .with_context(|| format!("invalid version component `{part}` in `{s}`"))
            })
            .collect::<Result<Vec<_>>>()?;
        if !(2..=3).contains(&components.len()) {
            return Err(anyhow!(
                "version `{s}` must have two or three components, found {}",
                components.len()
            ));
        }
        Ok(Version { components })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for component in &self.components {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{component}")?;
            first = false;
        }
        Ok(())
    }
}
