//! Keyword-based tax advice.
//!
//! The question is lower-cased and tested against an ordered list of topics.
//! The first topic with a keyword contained in the question wins; when none
//! matches, a low-confidence general answer is returned.
//!
//! | Order | Topic        | Keywords                     | Category       | Confidence |
//! |-------|--------------|------------------------------|----------------|------------|
//! | 1     | `Laptop`     | laptop, computer             | `aftrekposten` | 0.95       |
//! | 2     | `Phone`      | telefoon, mobiel             | `aftrekposten` | 0.90       |
//! | 3     | `Car`        | auto, km, benzine            | `transport`    | 0.85       |
//! | 4     | `Btw`        | btw, aangifte                | `btw`          | 0.90       |
//! | 5     | `Deductions` | aftrekpost, aftrek           | `aftrekposten` | 0.80       |
//! | –     | `General`    | (no match)                   | `algemeen`     | 0.30       |

use tracing::debug;

use crate::models::{AdviceCategory, TaxAdviceResponse};

/// Fixed answer text for one topic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdviceTemplate {
    pub answer: &'static str,
    pub details: &'static str,
    pub tip: &'static str,
    pub category: AdviceCategory,
    pub confidence: f64,
}

impl AdviceTemplate {
    pub fn to_response(&self) -> TaxAdviceResponse {
        TaxAdviceResponse {
            answer: self.answer.to_string(),
            details: self.details.to_string(),
            tip: self.tip.to_string(),
            category: self.category,
            confidence: self.confidence,
        }
    }
}

/// The topics the advisor recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdviceTopic {
    Laptop,
    Phone,
    Car,
    Btw,
    Deductions,
    General,
}

impl AdviceTopic {
    /// Topics in detection priority. `General` is the fallback and is not
    /// part of the list.
    pub const DETECTION_ORDER: [AdviceTopic; 5] = [
        Self::Laptop,
        Self::Phone,
        Self::Car,
        Self::Btw,
        Self::Deductions,
    ];

    /// Lower-case keywords that select this topic.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Laptop => &["laptop", "computer"],
            Self::Phone => &["telefoon", "mobiel"],
            Self::Car => &["auto", "km", "benzine"],
            Self::Btw => &["btw", "aangifte"],
            Self::Deductions => &["aftrekpost", "aftrek"],
            Self::General => &[],
        }
    }

    /// Picks the first topic whose keyword occurs in `question`.
    pub fn detect(question: &str) -> Self {
        let question = question.to_lowercase();
        Self::DETECTION_ORDER
            .into_iter()
            .find(|topic| topic.keywords().iter().any(|kw| question.contains(kw)))
            .unwrap_or(Self::General)
    }

    pub fn template(&self) -> &'static AdviceTemplate {
        match self {
            Self::Laptop => &LAPTOP,
            Self::Phone => &PHONE,
            Self::Car => &CAR,
            Self::Btw => &BTW,
            Self::Deductions => &DEDUCTIONS,
            Self::General => &GENERAL,
        }
    }
}

const LAPTOP: AdviceTemplate = AdviceTemplate {
    answer: "Ja, een laptop of computer die je voor je onderneming gebruikt is aftrekbaar.",
    details: "Kost het apparaat minder dan €450 exclusief BTW, dan boek je het in één keer als \
              kosten. Boven die grens schrijf je het af over minimaal vijf jaar. Gebruik je het \
              apparaat ook privé, dan is alleen het zakelijke deel aftrekbaar. De BTW op het \
              zakelijke deel kun je terugvragen.",
    tip: "Bewaar de factuur en noteer voor welk percentage je het apparaat zakelijk gebruikt.",
    category: AdviceCategory::Aftrekposten,
    confidence: 0.95,
};

const PHONE: AdviceTemplate = AdviceTemplate {
    answer: "De zakelijke kosten van je telefoon zijn aftrekbaar.",
    details: "Abonnement en toestel zijn aftrekbaar voor het deel dat je zakelijk gebruikt. Is \
              dat vrijwel volledig zakelijk, dan mag je de volledige kosten opvoeren. De BTW op \
              het zakelijke deel kun je terugvragen in je BTW-aangifte.",
    tip: "Een apart zakelijk abonnement maakt de verdeling tussen privé en zakelijk eenvoudig.",
    category: AdviceCategory::Aftrekposten,
    confidence: 0.90,
};

const CAR: AdviceTemplate = AdviceTemplate {
    answer: "Zakelijke kilometers met je privéauto leveren €0,23 aftrek per kilometer op.",
    details: "Rijd je zakelijk met een auto die privé op je naam staat, dan mag je €0,23 per \
              zakelijke kilometer aftrekken. Staat de auto op de zaak, dan trek je de werkelijke \
              kosten af, zoals benzine, onderhoud en verzekering, maar betaal je bijtelling als \
              je meer dan 500 kilometer per jaar privé rijdt.",
    tip: "Houd een sluitende rittenregistratie bij met datum, route, doel en kilometerstand.",
    category: AdviceCategory::Transport,
    confidence: 0.85,
};

const BTW: AdviceTemplate = AdviceTemplate {
    answer: "De BTW-aangifte doe je in de meeste gevallen per kwartaal.",
    details: "Aangifte en betaling moeten binnen zijn op de laatste dag van de maand na afloop \
              van het kwartaal: 30 april, 31 juli, 31 oktober en 31 januari. Dien je te laat in \
              of betaal je te laat, dan kan de Belastingdienst een boete opleggen.",
    tip: "Zet de BTW die je ontvangt direct apart op een aparte rekening.",
    category: AdviceCategory::Btw,
    confidence: 0.90,
};

const DEDUCTIONS: AdviceTemplate = AdviceTemplate {
    answer: "Als ondernemer kun je gebruikmaken van verschillende aftrekposten.",
    details: "Denk aan de zelfstandigenaftrek, de startersaftrek, de MKB-winstvrijstelling en \
              zakelijke kosten zoals software, vakliteratuur, opleidingen en reiskosten. Voor \
              de zelfstandigenaftrek moet je minimaal 1.225 uur per jaar aan je onderneming \
              besteden.",
    tip: "Registreer je uren gedurende het jaar zodat je het urencriterium kunt aantonen.",
    category: AdviceCategory::Aftrekposten,
    confidence: 0.80,
};

const GENERAL: AdviceTemplate = AdviceTemplate {
    answer: "Voor deze vraag raad ik je aan een accountant of belastingadviseur te raadplegen.",
    details: "Ik kan je vraag niet koppelen aan een onderwerp waarvoor ik een standaardadvies \
              heb. Een accountant kan je persoonlijke situatie beoordelen.",
    tip: "Stel je vraag over een concreet onderwerp, zoals een laptop, telefoon, auto, de \
          BTW-aangifte of aftrekposten.",
    category: AdviceCategory::Algemeen,
    confidence: 0.30,
};

/// Produces advice for `question`.
///
/// `business_type` and `sector` are accepted as context but do not change
/// the answer. Identical input always yields identical output.
pub fn generate_tax_advice(
    question: &str,
    business_type: Option<&str>,
    sector: Option<&str>,
) -> TaxAdviceResponse {
    let topic = AdviceTopic::detect(question);
    debug!(?topic, business_type, sector, "resolved advice topic");
    topic.template().to_response()
}
