//! Known neighborhood names and their spelling variants.
//!
//! Matching is substring based and runs over entries in list order, so
//! compound names ("bè-kpota") must be listed before the shorter names they
//! contain ("bè", "kpota"). Short entries still produce false positives
//! ("Belle villa" matches "Bè"); the first hit wins and that is accepted.

use std::collections::HashSet;

use serde::Deserialize;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

pub const UNSPECIFIED: &str = "Unspecified";

/// A canonical name plus spellings seen in the wild. Accent-only
/// differences need no variant since matching strips diacritics.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GazetteerEntry {
    pub name: String,
    #[serde(default)]
    pub variants: Vec<String>,
}

impl GazetteerEntry {
    pub fn new(name: &str, variants: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            variants: variants.iter().map(|v| v.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone)]
struct Form {
    exact: String,
    squashed: String,
}

#[derive(Debug, Clone)]
struct CompiledEntry {
    display: String,
    forms: Vec<Form>,
}

/// Read-only lookup table built once from the configured entries.
#[derive(Debug, Clone)]
pub struct Gazetteer {
    entries: Vec<CompiledEntry>,
}

impl Gazetteer {
    /// Forms are normalized up front. A form already claimed by an earlier
    /// entry is dropped so each spelling belongs to one locality.
    pub fn new(entries: &[GazetteerEntry]) -> Self {
        let mut seen = HashSet::new();
        let mut compiled = Vec::with_capacity(entries.len());

        for entry in entries {
            let mut forms = Vec::new();
            for raw in std::iter::once(&entry.name).chain(entry.variants.iter()) {
                let exact = normalize(raw.trim());
                let squashed = squash(&exact);
                if squashed.is_empty() || !seen.insert(exact.clone()) {
                    continue;
                }
                forms.push(Form { exact, squashed });
            }
            if !forms.is_empty() {
                compiled.push(CompiledEntry {
                    display: format_name(entry.name.trim()),
                    forms,
                });
            }
        }

        Self { entries: compiled }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// First entry whose form occurs in the title, exactly or with spaces
    /// and hyphens ignored on both sides.
    pub fn lookup(&self, title: &str) -> Option<&str> {
        let text = normalize(title);
        let flat = squash(&text);

        self.entries
            .iter()
            .find(|entry| {
                entry
                    .forms
                    .iter()
                    .any(|f| text.contains(&f.exact) || flat.contains(&f.squashed))
            })
            .map(|entry| entry.display.as_str())
    }

    /// Like `lookup`, with the "Unspecified" sentinel on a miss.
    pub fn match_title(&self, title: &str) -> String {
        self.lookup(title).unwrap_or(UNSPECIFIED).to_string()
    }
}

impl Default for Gazetteer {
    fn default() -> Self {
        Self::new(&default_lome_entries())
    }
}

/// Strip diacritics and lower-case.
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

fn squash(text: &str) -> String {
    text.chars().filter(|c| *c != ' ' && *c != '-').collect()
}

/// "bè-kpota" -> "Bè-Kpota", "tokoin" -> "Tokoin", "lomé ii" -> "Lomé ii".
pub fn format_name(name: &str) -> String {
    if name.contains('-') {
        name.split('-').map(capitalize).collect::<Vec<_>>().join("-")
    } else {
        capitalize(name)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Greater Lomé, compound names first.
pub fn default_lome_entries() -> Vec<GazetteerEntry> {
    let e = GazetteerEntry::new;
    vec![
        // Bè sub-quarters
        e("bè-kpota", &[]),
        e("bè-centre", &[]),
        e("bè-apéyémé", &[]),
        e("bè-dangbuipé", &[]),
        e("bè-adzrometi", &[]),
        e("bè-agodogan", &[]),
        e("bè-agodo", &[]),
        e("bè-allaglo", &[]),
        e("bè-ahligo", &[]),
        e("bè-hounvémé", &[]),
        e("bè-adanlekponsi", &[]),
        e("bè-wété", &[]),
        e("bè-akodesséwa", &["bè-akodeséwa"]),
        e("bè-kotokou", &[]),
        e("bè-ablogamé", &[]),
        e("bè-kanyikopé", &[]),
        e("bè-adakpamé", &[]),
        e("bè-anfamé", &[]),
        e("bè-atiégou", &[]),
        e("bè-souza", &[]),
        e("bè-anthony", &[]),
        e("bè-klikamé", &[]),
        // Tokoin sub-quarters
        e("tokoin-wuiti", &[]),
        e("tokoin-tamé", &[]),
        e("tokoin-enyonam", &[]),
        e("tokoin-gbadago", &[]),
        e("tokoin-aviation", &[]),
        // Other compound names
        e("agoè-nyivé", &[]),
        e("aflao-gakli", &[]),
        e("aflao-sagbado", &[]),
        e("atikoumé-adjomayi", &[]),
        e("lom-nava", &[]),
        e("nukafu nord", &[]),
        e("lomé 2", &["lomé ii"]),
        e("quartier administratif", &[]),
        e("zone portuaire", &[]),
        e("cité oua", &[]),
        e("togo 2000", &[]),
        // 1st district
        e("abobokomé", &[]),
        e("adoboukomé", &[]),
        e("agbadahonou", &[]),
        e("aguiakomé", &[]),
        e("adawlato", &[]),
        e("bassadji", &[]),
        e("doumassessé", &[]),
        e("octaviano", &["octavio"]),
        e("zanguéra", &[]),
        e("zongo", &[]),
        // 2nd district
        e("adakpamé", &[]),
        e("adétikopé", &["adeticopé"]),
        e("anfamé", &[]),
        e("aklavé", &[]),
        e("cacavéli", &["cacavelli"]),
        e("forever", &[]),
        e("kanyikopé", &[]),
        e("dékon", &[]),
        e("légokonmé", &[]),
        e("noèpé", &[]),
        e("nukafu", &[]),
        e("tokoin", &[]),
        // 3rd district
        e("ablogamé", &[]),
        e("afédomé", &[]),
        e("akodesséwa", &["akodeséwa"]),
        e("katanga", &[]),
        e("kélégougan", &["kélékougan"]),
        e("klobatèmé", &[]),
        e("hédzranawoé", &["xédranawoé", "hedziranawoe"]),
        e("hédjé", &[]),
        e("kégué", &[]),
        // 4th district
        e("agoè", &[]),
        e("avédji", &[]),
        e("baguida", &[]),
        e("djidjolé", &[]),
        // 5th district
        e("adidogomé", &[]),
        e("adéwui", &["adewi"]),
        e("agbalépédogan", &[]),
        e("amoutivé", &[]),
        e("assivito", &[]),
        e("béniglato", &[]),
        e("biossé", &[]),
        e("doulassamé", &[]),
        e("hanoukopé", &[]),
        e("hétrivikondji", &[]),
        e("kodjoviakopé", &[]),
        e("kodomé", &[]),
        e("nyékonakpoé", &["nyekonakpo"]),
        e("ntifafa", &[]),
        e("sanguéra", &[]),
        // Outskirts and nearby towns
        e("attikoumé", &["atikoumé"]),
        e("kpogan", &[]),
        e("aného", &[]),
        e("kpalimé", &[]),
        e("tsévié", &[]),
        e("vogan", &[]),
        e("anfoin", &[]),
        e("nanegbé", &[]),
        e("wonyomé", &[]),
        e("wessomé", &[]),
        e("kagomé", &[]),
        e("kpala", &[]),
        e("totsi", &[]),
        // Short names last, they hide inside longer ones
        e("kpota", &[]),
        e("bè", &[]),
        e("vo", &[]),
    ]
}
