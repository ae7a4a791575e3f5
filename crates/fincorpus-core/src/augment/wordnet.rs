//! Synonym lookup over a Princeton WordNet 3.x dictionary directory.
//!
//! Only the `data.*` files are needed: each line holds one synset and its
//! lemmas, which is all synonym lookup uses. The `*.exc` exception lists are
//! read when present so irregular forms ("went", "mice") reach their base
//! lemma.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;

use super::lexicon::{Lexicon, LexiconError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Pos {
    Noun,
    Verb,
    Adj,
    Adv,
}

impl Pos {
    const ALL: [Self; 4] = [Self::Noun, Self::Verb, Self::Adj, Self::Adv];

    const fn file_stem(self) -> &'static str {
        match self {
            Self::Noun => "noun",
            Self::Verb => "verb",
            Self::Adj => "adj",
            Self::Adv => "adv",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Noun => 0,
            Self::Verb => 1,
            Self::Adj => 2,
            Self::Adv => 3,
        }
    }

    /// Suffix detachment rules tried when no exception entry applies
    const fn substitutions(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Noun => &[
                ("s", ""),
                ("ses", "s"),
                ("ves", "f"),
                ("xes", "x"),
                ("zes", "z"),
                ("ches", "ch"),
                ("shes", "sh"),
                ("men", "man"),
                ("ies", "y"),
            ],
            Self::Verb => &[
                ("s", ""),
                ("ies", "y"),
                ("es", "e"),
                ("es", ""),
                ("ed", "e"),
                ("ed", ""),
                ("ing", "e"),
                ("ing", ""),
            ],
            Self::Adj => &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")],
            Self::Adv => &[],
        }
    }
}

#[derive(Debug, Default)]
struct PosTable {
    /// lowercase lemma -> synset indices
    lemmas: HashMap<String, Vec<usize>>,
    /// inflected form -> base forms
    exceptions: HashMap<String, Vec<String>>,
}

#[derive(Debug)]
pub struct WordNet {
    tables: [PosTable; 4],
    /// display lemmas of each synset, underscores replaced by spaces
    synsets: Vec<Vec<String>>,
}

impl WordNet {
    pub fn load(dir: &Path) -> Result<Self, LexiconError> {
        let mut wordnet = Self {
            tables: Default::default(),
            synsets: Vec::new(),
        };
        let mut loaded_any = false;

        for pos in Pos::ALL {
            let data_path = dir.join(format!("data.{}", pos.file_stem()));
            if data_path.is_file() {
                let contents = read(&data_path)?;
                wordnet.parse_data(pos, &contents, &data_path)?;
                loaded_any = true;
            }

            let exc_path = dir.join(format!("{}.exc", pos.file_stem()));
            if exc_path.is_file() {
                let contents = read(&exc_path)?;
                wordnet.parse_exceptions(pos, &contents);
            }
        }

        if !loaded_any {
            return Err(LexiconError::NoDataFiles(dir.to_path_buf()));
        }
        tracing::info!(
            "Loaded WordNet from {} ({} synsets)",
            dir.display(),
            wordnet.synsets.len()
        );
        Ok(wordnet)
    }

    fn parse_data(&mut self, pos: Pos, contents: &str, path: &Path) -> Result<(), LexiconError> {
        let malformed = |line: usize| LexiconError::Malformed {
            path: path.to_path_buf(),
            line,
        };

        for (lineno, line) in contents.lines().enumerate() {
            // license header lines start with whitespace
            if line.is_empty() || line.starts_with([' ', '\t']) {
                continue;
            }
            let fields: Vec<&str> = line.split_ascii_whitespace().collect();
            if fields.len() < 4 {
                return Err(malformed(lineno + 1));
            }
            let w_cnt =
                usize::from_str_radix(fields[3], 16).map_err(|_| malformed(lineno + 1))?;
            if fields.len() < 4 + w_cnt * 2 {
                return Err(malformed(lineno + 1));
            }

            let synset = self.synsets.len();
            let mut lemmas = Vec::with_capacity(w_cnt);
            for word in fields[4..4 + w_cnt * 2].iter().step_by(2) {
                let word = strip_adjective_marker(word);
                self.tables[pos.index()]
                    .lemmas
                    .entry(word.to_lowercase())
                    .or_default()
                    .push(synset);
                lemmas.push(word.replace('_', " "));
            }
            self.synsets.push(lemmas);
        }
        Ok(())
    }

    fn parse_exceptions(&mut self, pos: Pos, contents: &str) {
        let table = &mut self.tables[pos.index()].exceptions;
        for line in contents.lines() {
            let mut fields = line.split_ascii_whitespace();
            if let Some(inflected) = fields.next() {
                table
                    .entry(inflected.to_string())
                    .or_default()
                    .extend(fields.map(String::from));
            }
        }
    }

    fn contains(&self, pos: Pos, form: &str) -> bool {
        self.tables[pos.index()].lemmas.contains_key(form)
    }

    /// Base forms of `form` that exist as lemmas for `pos`.
    fn morphy(&self, form: &str, pos: Pos) -> Vec<String> {
        let filter = |candidates: Vec<String>| -> Vec<String> {
            let mut seen = HashSet::new();
            candidates
                .into_iter()
                .filter(|c| self.contains(pos, c) && seen.insert(c.clone()))
                .collect()
        };

        if let Some(bases) = self.tables[pos.index()].exceptions.get(form) {
            let mut candidates = vec![form.to_string()];
            candidates.extend(bases.iter().cloned());
            return filter(candidates);
        }

        let mut forms = apply_rules(&[form.to_string()], pos);
        let mut candidates = vec![form.to_string()];
        candidates.extend(forms.iter().cloned());
        let found = filter(candidates);
        if !found.is_empty() {
            return found;
        }

        while !forms.is_empty() {
            forms = apply_rules(&forms, pos);
            let found = filter(forms.clone());
            if !found.is_empty() {
                return found;
            }
        }
        Vec::new()
    }
}

impl Lexicon for WordNet {
    fn synonyms_for(&self, word: &str) -> BTreeSet<String> {
        let word = word.to_lowercase();
        let mut synonyms = BTreeSet::new();
        for pos in Pos::ALL {
            for base in self.morphy(&word, pos) {
                let Some(indices) = self.tables[pos.index()].lemmas.get(&base) else {
                    continue;
                };
                for &index in indices {
                    synonyms.extend(self.synsets[index].iter().cloned());
                }
            }
        }
        synonyms
    }
}

fn read(path: &Path) -> Result<String, LexiconError> {
    std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn apply_rules(forms: &[String], pos: Pos) -> Vec<String> {
    let mut out = Vec::new();
    for form in forms {
        for (old, new) in pos.substitutions() {
            if let Some(stem) = form.strip_suffix(old) {
                let candidate = format!("{stem}{new}");
                if !out.contains(&candidate) {
                    out.push(candidate);
                }
            }
        }
    }
    out
}

/// `galore(ip)` -> `galore`
fn strip_adjective_marker(word: &str) -> &str {
    match word.find('(') {
        Some(idx) if word.ends_with(')') => &word[..idx],
        _ => word,
    }
}
