//! Chemical-name boundary analysis.
//!
//! Compound names are long concatenations of morphemes
//! ("chlorodifluoromethane"), so a whitespace tokenizer sees them as one
//! opaque term and a character n-gram tokenizer floods the index with
//! noise. The [`BoundaryRule`] here segments names at chemically
//! meaningful points instead:
//!
//! - immediately after a recognized suffix morpheme ("-ate", "-ine", "-yl"),
//! - immediately before a recognized substituent prefix ("fluoro", "chloro",
//!   "bromo", "iodo"),
//! - on either side of a joiner morpheme ("poly"),
//! - at any run of non-alphanumeric characters.
//!
//! The rule is data, not code: the morpheme sets are configuration,
//! versioned together with the index, and changing them requires re-indexing
//! all existing text. Two consumers exist: [`BoundaryRule::segment`] applies
//! the rule directly (an explicit gap classifier, independent of any regex
//! lookaround dialect), and [`BoundaryRule::tokenizer_pattern`] exports the
//! equivalent pattern for the engine's index-time analyzer configuration
//! (see [`crate::schema`]).

/// Boundary classifier over a fixed set of suffix, prefix and joiner
/// morphemes. Case-insensitive; boundaries are zero-width, so surrounding
/// characters are never consumed.
#[derive(Debug, Clone)]
pub struct BoundaryRule {
    suffixes: Vec<String>,
    prefixes: Vec<String>,
    joiners: Vec<String>,
}

impl BoundaryRule {
    /// Build a rule from explicit morpheme sets. Morphemes are stored
    /// lowercase.
    pub fn new<S, P, J>(suffixes: S, prefixes: P, joiners: J) -> Self
    where
        S: IntoIterator<Item = &'static str>,
        P: IntoIterator<Item = &'static str>,
        J: IntoIterator<Item = &'static str>,
    {
        let lower = |it: &'static str| it.to_ascii_lowercase();
        Self {
            suffixes: suffixes.into_iter().map(lower).collect(),
            prefixes: prefixes.into_iter().map(lower).collect(),
            joiners: joiners.into_iter().map(lower).collect(),
        }
    }

    /// The morpheme sets the compound index is currently built with.
    ///
    /// Version these together with the index: a change here requires
    /// re-indexing all existing text.
    pub fn chemical() -> Self {
        Self::new(
            ["ate", "ine", "yl"],
            ["fluoro", "chloro", "bromo", "iodo"],
            ["poly"],
        )
    }

    /// Classify the inter-character gap at byte offset `at` (0 < at < len,
    /// on a char boundary) of the already-lowercased `text`.
    fn is_split(&self, text: &str, at: usize) -> bool {
        let (head, tail) = text.split_at(at);

        // Punctuation runs always separate tokens.
        let prev = head.chars().next_back();
        let next = tail.chars().next();
        if prev.is_some_and(|c| !c.is_alphanumeric()) || next.is_some_and(|c| !c.is_alphanumeric())
        {
            return true;
        }

        self.suffixes.iter().any(|m| head.ends_with(m.as_str()))
            || self.prefixes.iter().any(|m| tail.starts_with(m.as_str()))
            || self.joiners.iter().any(|m| head.ends_with(m.as_str()))
            || self.joiners.iter().any(|m| tail.starts_with(m.as_str()))
    }

    /// Byte offsets (into the ASCII-lowercased form of `name`) of every
    /// internal gap classified as a split. Offsets are unique and ascending;
    /// overlapping boundary candidates collapse to a single split point.
    pub fn split_points(&self, name: &str) -> Vec<usize> {
        let lower = name.to_ascii_lowercase();
        lower
            .char_indices()
            .map(|(i, _)| i)
            .skip(1)
            .filter(|&i| self.is_split(&lower, i))
            .collect()
    }

    /// Segment a name into tokens. Slices that carry no alphanumeric
    /// character (pure punctuation runs) are dropped; a name with no
    /// recognized morpheme and no punctuation yields exactly one token.
    pub fn segment(&self, name: &str) -> Vec<String> {
        let lower = name.to_ascii_lowercase();
        let mut tokens = Vec::new();
        let mut start = 0;
        for point in self.split_points(name) {
            push_token(&mut tokens, &lower[start..point]);
            start = point;
        }
        push_token(&mut tokens, &lower[start..]);
        tokens
    }

    /// Export the rule as a lookaround alternation for the engine's pattern
    /// tokenizer. The split point is zero-width (`(?<=…)`/`(?=…)`), so the
    /// engine never consumes name characters; `\W` runs are consumed as
    /// separators.
    pub fn tokenizer_pattern(&self) -> String {
        let suffixes = self.suffixes.join("|");
        let prefixes = self.prefixes.join("|");
        let joiners = self.joiners.join("|");
        format!(
            r"(((?<={suffixes})|(?={prefixes})|(?<={joiners})|(?={joiners}))|\W)+"
        )
    }
}

impl Default for BoundaryRule {
    fn default() -> Self {
        Self::chemical()
    }
}

fn push_token(tokens: &mut Vec<String>, slice: &str) {
    let trimmed: String = slice.chars().filter(|c| c.is_alphanumeric()).collect();
    if !trimmed.is_empty() {
        tokens.push(trimmed);
    }
}
