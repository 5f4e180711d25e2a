// file: src/models/plan.rs
// description: structured query plan emitted by the intent oracle
// reference: oracle json shape {intent, keywords, filters, reasoning}

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    #[default]
    FindDoctor,
    FindClinic,
}

impl Intent {
    /// Anything other than a clinic label is a doctor search.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "find_clinic" | "clinic" => Intent::FindClinic,
            _ => Intent::FindDoctor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::FindDoctor => "find_doctor",
            Intent::FindClinic => "find_clinic",
        }
    }
}

impl<'de> Deserialize<'de> for Intent {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label.map(|l| Intent::from_label(&l)).unwrap_or_default())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    #[serde(rename = "Specialty", default, deserialize_with = "null_as_empty")]
    pub specialty: String,
    #[serde(rename = "Languages", default, deserialize_with = "null_as_empty")]
    pub languages: String,
    #[serde(rename = "Area", default, deserialize_with = "null_as_empty")]
    pub area: String,
}

impl Filters {
    pub fn specialty(&self) -> Option<&str> {
        non_blank(&self.specialty)
    }

    pub fn languages(&self) -> Option<&str> {
        non_blank(&self.languages)
    }

    pub fn area(&self) -> Option<&str> {
        non_blank(&self.area)
    }

    pub fn is_empty(&self) -> bool {
        self.specialty().is_none() && self.languages().is_none() && self.area().is_none()
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPlan {
    #[serde(default)]
    pub intent: Intent,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub keywords: String,
    #[serde(default)]
    pub filters: Filters,
    /// Diagnostic text from the oracle; never read by the engine.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub reasoning: String,
}

impl QueryPlan {
    pub fn new(intent: Intent) -> Self {
        Self {
            intent,
            ..Self::default()
        }
    }

    /// Placeholder plan surfaced when no plan could be obtained.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            reasoning: reason.into(),
            ..Self::default()
        }
    }

    /// Keyword text as given, `None` when blank.
    pub fn keyword(&self) -> Option<&str> {
        non_blank(&self.keywords).map(|_| self.keywords.as_str())
    }

    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = keywords.into();
        self
    }

    pub fn with_specialty(mut self, specialty: impl Into<String>) -> Self {
        self.filters.specialty = specialty.into();
        self
    }

    pub fn with_languages(mut self, languages: impl Into<String>) -> Self {
        self.filters.languages = languages.into();
        self
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.filters.area = area.into();
        self
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = reasoning.into();
        self
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_oracle_output() {
        let plan = QueryPlan::from_json(
            r#"{
                "intent": "find_clinic",
                "keywords": "",
                "filters": {"Specialty": "", "Languages": null, "Area": "Bedok"},
                "reasoning": "location-based clinic search"
            }"#,
        )
        .unwrap();

        assert_eq!(plan.intent, Intent::FindClinic);
        assert_eq!(plan.filters.area(), Some("Bedok"));
        assert_eq!(plan.filters.languages(), None);
        assert_eq!(plan.filters.specialty(), None);
    }

    #[test]
    fn test_missing_fields_default() {
        let plan = QueryPlan::from_json("{}").unwrap();
        assert_eq!(plan, QueryPlan::default());
        assert_eq!(plan.intent, Intent::FindDoctor);
        assert!(plan.filters.is_empty());
    }

    #[test]
    fn test_unknown_intent_is_doctor_search() {
        let plan = QueryPlan::from_json(r#"{"intent": "find_pharmacy", "keywords": null}"#).unwrap();
        assert_eq!(plan.intent, Intent::FindDoctor);
        assert!(plan.keywords.is_empty());
    }

    #[test]
    fn test_keyword_keeps_padding() {
        assert_eq!(QueryPlan::default().with_keywords(" d").keyword(), Some(" d"));
        assert_eq!(QueryPlan::default().with_keywords("   ").keyword(), None);
    }

    #[test]
    fn test_intent_round_trip_label() {
        let json = serde_json::to_string(&QueryPlan::new(Intent::FindClinic)).unwrap();
        assert!(json.contains("\"find_clinic\""));
    }
}
