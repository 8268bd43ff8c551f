use std::collections::HashMap;

use crate::domain::ports::Translate;

/// English localization table. A missing key falls back to the key itself so
/// an incomplete table never breaks label rendering.
pub struct StaticTranslator {
    table: HashMap<&'static str, &'static str>,
}

impl Default for StaticTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticTranslator {
    pub fn new() -> Self {
        let table = HashMap::from([
            ("frequent", "frequent"),
            ("highest_start", "highest start"),
            ("highest_core", "highest core"),
            ("highest_items", "highest items"),
            ("highest_boots", "highest boots"),
            ("mf_starters", "most frequent starters"),
            ("mf_core", "most frequent core build"),
            ("mf_items", "most frequent items"),
            ("mf_boots", "most frequent boots"),
            ("hw_starters", "highest win starters"),
            ("hw_core", "highest win core build"),
            ("hw_items", "highest win items"),
            ("hw_boots", "highest win boots"),
            ("most_freq", "most frequent"),
            ("highest_win", "highest win"),
            ("top", "top"),
            ("jungle", "jungle"),
            ("mid", "mid"),
            ("adc", "adc"),
            ("support", "support"),
        ]);
        Self { table }
    }
}

fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl Translate for StaticTranslator {
    fn translate(&self, key: &str, titled: bool) -> String {
        let text = self.table.get(key).copied().unwrap_or(key);
        if titled {
            title_case(text)
        } else {
            text.to_string()
        }
    }
}
