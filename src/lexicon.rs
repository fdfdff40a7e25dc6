//! Phrase lists consulted by the text analyzers.
//!
//! Everything here is data: sensationalist markers, suspicious phrases,
//! technical vocabulary and per-category topic keywords. The built-in seed
//! can be replaced section by section from the verifier config.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::registry::{clean_list, to_strings};

/// Blog content categories. Serialized with the slugs the front-end uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "programacao")]
    Programming,
    #[serde(rename = "ciberseguranca")]
    Cybersecurity,
    #[serde(rename = "cibercrimes")]
    DigitalCrime,
    #[serde(rename = "noticias")]
    News,
    #[serde(rename = "leis")]
    Legislation,
    #[serde(rename = "campanhas")]
    Campaigns,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Programming,
        Category::Cybersecurity,
        Category::DigitalCrime,
        Category::News,
        Category::Legislation,
        Category::Campaigns,
    ];

    pub fn from_slug(slug: &str) -> Option<Self> {
        let s = slug.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|c| c.slug() == s)
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Category::Programming => "programacao",
            Category::Cybersecurity => "ciberseguranca",
            Category::DigitalCrime => "cibercrimes",
            Category::News => "noticias",
            Category::Legislation => "leis",
            Category::Campaigns => "campanhas",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    /// Literal urgency markers, matched case-insensitively.
    pub markers: Vec<String>,
    /// Trigger phrases, stored lowercased.
    pub suspicious: Vec<String>,
    /// Whole-word technical vocabulary for the structure bonus.
    pub technical_terms: Vec<String>,
    pub categories: BTreeMap<Category, Vec<String>>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::default_seed()
    }
}

impl Lexicon {
    pub fn default_seed() -> Self {
        Self {
            markers: default_markers(),
            suspicious: default_suspicious(),
            technical_terms: default_technical_terms(),
            categories: default_categories(),
        }
    }

    /// Replace only the sections that were provided.
    pub fn with_overrides(
        mut self,
        markers: Option<Vec<String>>,
        suspicious: Option<Vec<String>>,
        technical_terms: Option<Vec<String>>,
        categories: Option<BTreeMap<Category, Vec<String>>>,
    ) -> Self {
        if let Some(m) = markers {
            // Markers keep their case; matching is case-insensitive anyway.
            self.markers = m
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(s) = suspicious {
            self.suspicious = clean_list(s);
        }
        if let Some(t) = technical_terms {
            self.technical_terms = t
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(c) = categories {
            self.categories = c.into_iter().map(|(k, v)| (k, clean_list(v))).collect();
        }
        self
    }
}

pub fn default_markers() -> Vec<String> {
    to_strings(&[
        "URGENTE:",
        "BOMBA:",
        "EXCLUSIVO:",
        "CHOCANTE:",
        "INACREDITÁVEL:",
        "SURPREENDENTE:",
    ])
}

pub fn default_suspicious() -> Vec<String> {
    to_strings(&[
        "descoberta revolucionária",
        "médicos odeiam",
        "governo esconde",
        "mídia não quer que você saiba",
        "método secreto",
        "conspiração",
        "teoria da conspiração",
        "fake news",
        "informação censurada",
        "verdade oculta",
    ])
}

pub fn default_technical_terms() -> Vec<String> {
    to_strings(&[
        "API",
        "HTTP",
        "SSL",
        "TLS",
        "SQL",
        "JavaScript",
        "Python",
        "React",
        "Node.js",
        "cybersecurity",
        "malware",
        "phishing",
    ])
}

pub fn default_categories() -> BTreeMap<Category, Vec<String>> {
    let mut m = BTreeMap::new();
    m.insert(
        Category::Programming,
        to_strings(&[
            "código",
            "programação",
            "desenvolvimento",
            "software",
            "algoritmo",
            "javascript",
            "python",
            "react",
        ]),
    );
    m.insert(
        Category::Cybersecurity,
        to_strings(&[
            "segurança",
            "proteção",
            "criptografia",
            "firewall",
            "antivírus",
            "vulnerability",
            "exploit",
        ]),
    );
    m.insert(
        Category::DigitalCrime,
        to_strings(&[
            "crime", "fraude", "phishing", "scam", "golpe", "roubo", "invasão", "hacker",
        ]),
    );
    m.insert(
        Category::News,
        to_strings(&[
            "notícia",
            "atualização",
            "lançamento",
            "empresa",
            "mercado",
            "tecnologia",
        ]),
    );
    m.insert(
        Category::Legislation,
        to_strings(&[
            "lei",
            "legislação",
            "marco civil",
            "lgpd",
            "regulamentação",
            "jurídico",
            "direito",
        ]),
    );
    m.insert(
        Category::Campaigns,
        to_strings(&[
            "campanha",
            "conscientização",
            "educação",
            "prevenção",
            "comunidade",
        ]),
    );
    m
}
