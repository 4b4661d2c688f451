//! Domain lexicon of chemical element and group names.
//!
//! The acceptance filter uses this lookup to decide whether an unmatched
//! word in a highlight excerpt is chemically meaningful. An unmatched
//! "poly" or "chloride" changes the identity of a compound even though it
//! is short, so its presence disqualifies a candidate outright.
//!
//! The lexicon is an explicitly constructed, immutable lookup passed into
//! the filter at construction time; it is not ambient global state.

use ahash::AHashSet;

/// Element names, lowercase.
const ELEMENT_NAMES: &[&str] = &[
    "hydrogen",
    "helium",
    "lithium",
    "beryllium",
    "boron",
    "carbon",
    "nitrogen",
    "oxygen",
    "fluorine",
    "neon",
    "sodium",
    "magnesium",
    "aluminium",
    "silicon",
    "phosphorus",
    "sulfur",
    "chlorine",
    "argon",
    "potassium",
    "calcium",
    "scandium",
    "titanium",
    "vanadium",
    "chromium",
    "manganese",
    "iron",
    "cobalt",
    "nickel",
    "copper",
    "zinc",
    "gallium",
    "germanium",
    "arsenic",
    "selenium",
    "bromine",
    "krypton",
    "rubidium",
    "strontium",
    "yttrium",
    "zirconium",
    "niobium",
    "molybdenum",
    "technetium",
    "ruthenium",
    "rhodium",
    "palladium",
    "silver",
    "cadmium",
    "indium",
    "tin",
    "antimony",
    "tellurium",
    "iodine",
    "xenon",
    "caesium",
    "barium",
    "lanthanum",
    "cerium",
    "praseodymium",
    "neodymium",
    "promethium",
    "samarium",
    "europium",
    "gadolinium",
    "terbium",
    "dysprosium",
    "holmium",
    "erbium",
    "thulium",
    "ytterbium",
    "lutetium",
    "hafnium",
    "tantalum",
    "tungsten",
    "rhenium",
    "osmium",
    "iridium",
    "platinum",
    "gold",
    "mercury",
    "thallium",
    "lead",
    "bismuth",
    "polonium",
    "astatine",
    "radon",
    "francium",
    "radium",
    "actinium",
    "thorium",
    "protactinium",
    "uranium",
    "neptunium",
    "plutonium",
    "americium",
    "curium",
    "berkelium",
    "californium",
    "einsteinium",
    "fermium",
    "mendelevium",
    "nobelium",
    "lawrencium",
    "rutherfordium",
    "dubnium",
    "seaborgium",
    "bohrium",
    "hassium",
    "meitnerium",
    "darmstadtium",
    "roentgenium",
    "copernicium",
    "nihonium",
    "flerovium",
    "moscovium",
    "livermorium",
    "tennessine",
    "oganesson",
];

/// Recognized chemical group, substituent and ion names, lowercase.
const GROUP_NAMES: &[&str] = &[
    "acetate",
    "acetyl",
    "acid",
    "alcohol",
    "aldehyde",
    "allyl",
    "amide",
    "amine",
    "amino",
    "ammonium",
    "benzyl",
    "bromide",
    "butyl",
    "carbonate",
    "carbonyl",
    "carboxyl",
    "chloride",
    "cyanide",
    "cyano",
    "ester",
    "ether",
    "ethyl",
    "fluoride",
    "glycol",
    "hydrate",
    "hydride",
    "hydroxide",
    "hydroxyl",
    "iodide",
    "ketone",
    "methyl",
    "nitrate",
    "nitrile",
    "nitrite",
    "nitro",
    "oxide",
    "phenyl",
    "phosphate",
    "poly",
    "propyl",
    "sulfate",
    "sulfide",
    "sulfite",
    "sulfonyl",
    "vinyl",
];

/// Immutable lookup over known chemical element and group names.
#[derive(Debug, Clone)]
pub struct Lexicon {
    terms: AHashSet<&'static str>,
}

impl Lexicon {
    /// Build the lexicon from the built-in element and group name lists.
    pub fn builtin() -> Self {
        let terms = ELEMENT_NAMES
            .iter()
            .chain(GROUP_NAMES.iter())
            .copied()
            .collect();
        Self { terms }
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, word: &str) -> bool {
        if self.terms.contains(word) {
            return true;
        }
        // Fall back to a lowercase copy only when the input has uppercase.
        if word.chars().any(|c| c.is_ascii_uppercase()) {
            return self.terms.contains(word.to_ascii_lowercase().as_str());
        }
        false
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_contains_elements_and_groups() {
        let lexicon = Lexicon::builtin();
        assert!(lexicon.contains("chlorine"));
        assert!(lexicon.contains("poly"));
        assert!(lexicon.contains("methyl"));
        assert!(!lexicon.contains("impurity"));
        assert!(!lexicon.contains(""));
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let lexicon = Lexicon::builtin();
        assert!(lexicon.contains("Chlorine"));
        assert!(lexicon.contains("POLY"));
    }

    #[test]
    fn test_no_duplicate_inflation() {
        let lexicon = Lexicon::builtin();
        assert_eq!(lexicon.len(), ELEMENT_NAMES.len() + GROUP_NAMES.len());
    }
}
