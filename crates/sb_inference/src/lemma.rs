//! Noun lemmatization without a dictionary.
//!
//! Irregular plurals come from a small exception table; regular ones are
//! reduced with WordNet's noun suffix rules. Words the rules would mangle
//! (short words, `-ss`, `-us`, `-is` endings) are returned unchanged.

const EXCEPTIONS: &[(&str, &str)] = &[
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("people", "person"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
    ("mice", "mouse"),
    ("lice", "louse"),
    ("oxen", "ox"),
    ("data", "datum"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("analyses", "analysis"),
    ("theses", "thesis"),
    ("crises", "crisis"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("vertices", "vertex"),
    ("cacti", "cactus"),
    ("fungi", "fungus"),
    ("nuclei", "nucleus"),
    ("alumni", "alumnus"),
    ("wolves", "wolf"),
    ("knives", "knife"),
    ("wives", "wife"),
    ("lives", "life"),
    ("leaves", "leaf"),
    ("halves", "half"),
    ("selves", "self"),
    ("shelves", "shelf"),
    ("thieves", "thief"),
    ("loaves", "loaf"),
];

/// Nouns ending in `-ie`, whose plurals the `-ies` rule would turn into `-y`.
const IE_NOUNS: &[&str] = &[
    "movie", "cookie", "pie", "tie", "lie", "die", "calorie", "zombie", "rookie", "prairie",
    "genie", "hippie", "selfie", "brownie", "smoothie", "hoodie", "goalie", "auntie", "budgie",
    "pixie", "magpie", "necktie", "lassie", "birdie", "bootie", "collie", "junkie", "newbie",
    "sortie", "veggie", "yuppie", "boogie",
];

const INVARIANT: &[&str] = &["news", "series", "species", "physics", "mathematics", "economics"];

/// Reduces a lowercase token to its noun base form.
pub fn lemmatize(word: &str) -> String {
    if let Some((_, lemma)) = EXCEPTIONS.iter().find(|(plural, _)| *plural == word) {
        return lemma.to_string();
    }
    if word.chars().count() <= 3
        || INVARIANT.contains(&word)
        || word.ends_with("ss")
        || word.ends_with("us")
        || word.ends_with("is")
    {
        return word.to_string();
    }

    if let Some(stem) = word.strip_suffix("ies") {
        let singular = format!("{}ie", stem);
        if IE_NOUNS.contains(&singular.as_str()) {
            return singular;
        }
        return format!("{}y", stem);
    }
    for suffix in ["sses", "ches", "shes", "xes", "zes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    if let Some(stem) = word.strip_suffix("men") {
        if stem.len() >= 3 {
            return format!("{}man", stem);
        }
    }
    match word.strip_suffix('s') {
        Some(stem) => stem.to_string(),
        None => word.to_string(),
    }
}
